//! The summarist library fetches web pages or text files, summarizes them with
//! an LLM model through a prompt template and saves the summaries as markdown.

use std::path::PathBuf;

pub mod batch;
pub mod constants;
pub mod items;
pub mod output;
pub mod prompt;
pub mod source;
pub mod summarize;

/// Enum representing the processing mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    /// Summarize every entry of a list file into a directory
    #[default]
    Web,
    /// Summarize a single text file
    Text,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "web" => Ok(Mode::Web),
            "text" => Ok(Mode::Text),
            _ => Err(format!("Invalid mode: {}", input)),
        }
    }
}

/// The work a run performs, with every path already resolved.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Job {
    /// Summarize each list entry into `output_dir/summary_NNN.md`.
    Batch {
        list_file: PathBuf,
        output_dir: PathBuf,
    },
    /// Summarize one file; without `output` the summary lands next to the input.
    Single {
        input: PathBuf,
        output: Option<PathBuf>,
    },
}

/// Everything a run needs besides the model and the HTTP client.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RunOptions {
    pub prompt_file: PathBuf,
    pub job: Job,
}

pub use batch::{
    BatchReport, ItemOutcome, Preflight, RunOutcome, RunPlan, preflight, run, run_batch, run_single,
};
pub use items::parse_item_list;
pub use prompt::PromptTemplate;
pub use source::{Item, extract_paragraphs, fetch_file, fetch_web};
pub use summarize::{SummarizeContext, summarize_text};
