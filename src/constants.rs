/// Environment variables checked, in order, for the model API key.
pub const MODEL_API_KEY_ENV_NAMES: [&str; 2] = ["SUMMARIST_API_KEY", "OPENAI_API_KEY"];

pub const DEFAULT_MODEL: &str = "openai://gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_PROMPT_FILE: &str = "prompt.txt";
pub const DEFAULT_LIST_FILE: &str = "urls.txt";
pub const DEFAULT_TEXT_FILE: &str = "input.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "summaries";

pub const USER_AGENT: &str = concat!("summarist/", env!("CARGO_PKG_VERSION"));

/// The single substitution point every prompt template carries.
pub const PROMPT_PLACEHOLDER: &str = "{{ insert blog post or raw dev thread here }}";

pub const SAMPLE_PROMPT_TEMPLATE: &str =
    "Please summarize the following content:\n\n{{ insert blog post or raw dev thread here }}";

pub(crate) const SAMPLE_LIST_FILE: &str = "# Add URLs here, one per line
# Example:
# https://example.com/blog-post
";
