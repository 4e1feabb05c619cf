//! summarist is a CLI tool that summarizes web articles or text files with an LLM
//! and saves the summaries as markdown.
//!
//! It has two modes:
//! 1. `web` - Summarizes every URL (or file path) listed in a list file into a directory
//! 2. `text` - Summarizes a single text file into one markdown file

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, debug};

use summarist::{
    Job, Mode, RunOptions,
    batch::{Preflight, RunOutcome, preflight},
    constants::{
        DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_LIST_FILE, DEFAULT_MODEL, DEFAULT_OUTPUT_DIR,
        DEFAULT_PROMPT_FILE, DEFAULT_TEMPERATURE, DEFAULT_TEXT_FILE, MODEL_API_KEY_ENV_NAMES,
        USER_AGENT,
    },
    summarize::model_builder,
};

/// Summarize web articles or text files using AI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Processing mode: "web" for a list of URLs or "text" for a single text file
    #[arg(long, short, default_value = "web")]
    mode: Mode,
    /// Input file: URLs file for web mode, text file for text mode
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Output location: directory for web mode, file for text mode
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Path to the file with a prompt template
    #[arg(long, short = 'p', default_value = DEFAULT_PROMPT_FILE)]
    prompt_file: PathBuf,
    /// URL of the LLM model to use, backend as scheme and model name as host
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
    /// Sampling temperature of the model
    #[arg(long, short, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,
    /// Timeout for fetching a web page, in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    timeout: u64,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", default_value_t = 2)]
    verbose: u8,
}

impl Cli {
    /// Resolves working-directory defaults into explicit paths.
    fn run_options(&self) -> RunOptions {
        let job = match self.mode {
            Mode::Web => Job::Batch {
                list_file: self
                    .input
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LIST_FILE)),
                output_dir: self
                    .output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            },
            Mode::Text => Job::Single {
                input: self
                    .input
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_TEXT_FILE)),
                output: self.output.clone(),
            },
        };

        RunOptions {
            prompt_file: self.prompt_file.clone(),
            job,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    // Template and input checks come before the model is built.
    let plan = match preflight(&cli.run_options())? {
        Preflight::ListCreated(_) => return Ok(()),
        Preflight::Ready(plan) => plan,
    };

    let api_key = MODEL_API_KEY_ENV_NAMES
        .iter()
        .find_map(|name| std::env::var(name).ok());
    if api_key.is_none() {
        debug!("No API key found in {}", MODEL_API_KEY_ENV_NAMES.join(", "));
    }

    let model = model_builder(&cli.model, cli.temperature, api_key)?
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build LLM model: {}", e))?;

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("Failed to build HTTP client")?;

    match plan.execute(model.as_ref(), &client).await? {
        RunOutcome::Single(outcome) if !outcome.is_written() => {
            bail!("No summary was saved: {outcome}")
        }
        RunOutcome::ListCreated(_) | RunOutcome::Batch(_) | RunOutcome::Single(_) => Ok(()),
    }
}
