//! The batch module drives items through fetch, summarize and write, one at a time.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use llm::chat::ChatProvider;
use log::{error, info, warn};

use crate::constants::DEFAULT_TEXT_FILE;
use crate::items::{create_sample_list, read_item_list};
use crate::output::{DocumentStyle, SummaryDocument, batch_file_name, single_output_path};
use crate::prompt::PromptTemplate;
use crate::source::Item;
use crate::summarize::{SummarizeContext, summarize_text};
use crate::{Job, RunOptions};

/// What happened to a single item.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ItemOutcome {
    /// The summary was saved to this path.
    Written(PathBuf),
    /// The item was reachable but had no text.
    NoContent,
    /// The page or file could not be read.
    FetchFailed,
    /// The model answered with nothing.
    NoSummary,
    SummarizeFailed,
    WriteFailed,
}

impl ItemOutcome {
    /// True when a summary file was produced.
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written(path) => write!(formatter, "saved to {}", path.display()),
            Self::NoContent => write!(formatter, "no content extracted"),
            Self::FetchFailed => write!(formatter, "content could not be fetched"),
            Self::NoSummary => write!(formatter, "no summary generated"),
            Self::SummarizeFailed => write!(formatter, "summarization failed"),
            Self::WriteFailed => write!(formatter, "summary could not be written"),
        }
    }
}

/// Per-item outcomes of a batch run, in list order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    /// Number of items in the list.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of summaries saved.
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_written()).count()
    }

    /// Number of items that produced no file, whatever the reason.
    pub fn skipped(&self) -> usize {
        self.total() - self.written()
    }
}

/// Result of a whole run.
#[derive(Debug)]
pub enum RunOutcome {
    /// The list file was missing and a sample was created in its place.
    ListCreated(PathBuf),
    Batch(BatchReport),
    Single(ItemOutcome),
}

/// What is left to do once the local checks of a run have passed.
#[derive(Debug)]
pub enum Preflight {
    /// The list file was missing and a sample was created; nothing else to do.
    ListCreated(PathBuf),
    Ready(RunPlan),
}

/// A run whose template is loaded and whose input exists.
#[derive(Debug)]
pub struct RunPlan {
    pub prompt_template: PromptTemplate,
    pub job: Job,
}

/// Performs every check of a run that needs neither the model nor the network.
///
/// The prompt template is loaded first, then the list file (web mode) or the
/// input file (text mode) is checked. A missing list file is replaced by a
/// commented sample. The single-file output path is resolved here.
///
/// # Errors
///
/// Returns an error if:
/// * The prompt template cannot be loaded
/// * The sample list file cannot be created
/// * The input file of a single run does not exist
pub fn preflight(options: &RunOptions) -> Result<Preflight> {
    let prompt_template = PromptTemplate::load(&options.prompt_file)?;

    let job = match &options.job {
        Job::Batch { list_file, .. } if !list_file.exists() => {
            info!("Creating sample {} file...", list_file.display());
            create_sample_list(list_file)?;
            info!("Please add URLs to {} and run again.", list_file.display());
            return Ok(Preflight::ListCreated(list_file.clone()));
        }
        Job::Batch { .. } => options.job.clone(),
        Job::Single { input, .. } if !input.exists() => {
            bail!(
                "Input file {} not found. Please specify a text file using --input or create {DEFAULT_TEXT_FILE}",
                input.display()
            );
        }
        Job::Single { input, output } => Job::Single {
            input: input.clone(),
            output: Some(
                output
                    .clone()
                    .unwrap_or_else(|| single_output_path(input)),
            ),
        },
    };

    Ok(Preflight::Ready(RunPlan {
        prompt_template,
        job,
    }))
}

impl RunPlan {
    /// Processes the planned items with `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if the list file cannot be read or the output directory cannot be created.
    pub async fn execute(
        &self,
        model: &dyn ChatProvider,
        client: &reqwest::Client,
    ) -> Result<RunOutcome> {
        let ctx = SummarizeContext {
            model,
            prompt_template: &self.prompt_template,
        };

        match &self.job {
            Job::Batch {
                list_file,
                output_dir,
            } => {
                let report = run_batch(client, &ctx, list_file, output_dir).await?;
                Ok(RunOutcome::Batch(report))
            }
            Job::Single { input, output } => {
                let output = output.clone().unwrap_or_else(|| single_output_path(input));
                Ok(RunOutcome::Single(run_single(client, &ctx, input, &output).await))
            }
        }
    }
}

/// Runs one invocation of the tool with an already built model.
///
/// Equivalent to [`preflight`] followed by [`RunPlan::execute`], so a missing
/// template stops the run before any page is requested.
///
/// # Errors
///
/// Returns an error if [`preflight`] or [`RunPlan::execute`] fails.
pub async fn run(
    options: &RunOptions,
    model: &dyn ChatProvider,
    client: &reqwest::Client,
) -> Result<RunOutcome> {
    match preflight(options)? {
        Preflight::ListCreated(list_file) => Ok(RunOutcome::ListCreated(list_file)),
        Preflight::Ready(plan) => plan.execute(model, client).await,
    }
}

/// Summarizes every item of a list file into `output_dir`.
/// The n-th item (1-based) is written to `summary_{n:03}.md`; failed items are skipped.
///
/// # Errors
///
/// Returns an error if the list file cannot be read or the output directory cannot be created.
pub async fn run_batch(
    client: &reqwest::Client,
    ctx: &SummarizeContext<'_>,
    list_file: &Path,
    output_dir: &Path,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
    let items = read_item_list(list_file)?;
    let total = items.len();

    let mut report = BatchReport::default();
    for (index, item) in (1..).zip(&items) {
        info!("Processing item {index}/{total}: {item}");
        let output = output_dir.join(batch_file_name(index));
        let outcome = process_item(client, ctx, item, &output, DocumentStyle::Batch).await;
        report.outcomes.push(outcome);
    }

    info!(
        "Saved {}/{total} summaries to {} ({} skipped)",
        report.written(),
        output_dir.display(),
        report.skipped()
    );
    Ok(report)
}

/// Summarizes one local file into `output`.
pub async fn run_single(
    client: &reqwest::Client,
    ctx: &SummarizeContext<'_>,
    input: &Path,
    output: &Path,
) -> ItemOutcome {
    info!("Processing text file: {}", input.display());
    let item = Item::File(input.to_path_buf());
    process_item(client, ctx, &item, output, DocumentStyle::Single).await
}

/// Runs one item through every stage. Failures are logged, never propagated.
pub async fn process_item(
    client: &reqwest::Client,
    ctx: &SummarizeContext<'_>,
    item: &Item,
    output: &Path,
    style: DocumentStyle,
) -> ItemOutcome {
    let text = match item.fetch(client).await {
        Ok(text) => text,
        Err(err) => {
            error!("Error extracting content from {item}: {err:#}");
            return ItemOutcome::FetchFailed;
        }
    };
    if text.is_empty() {
        warn!("Skipping {item} - {}", ItemOutcome::NoContent);
        return ItemOutcome::NoContent;
    }

    let summary = match summarize_text(&text, ctx).await {
        Ok(summary) => summary,
        Err(err) => {
            error!("Error summarizing {item}: {err:#}");
            return ItemOutcome::SummarizeFailed;
        }
    };
    if summary.trim().is_empty() {
        warn!("Skipping {item} - {}", ItemOutcome::NoSummary);
        return ItemOutcome::NoSummary;
    }

    let source = item.to_string();
    let document = SummaryDocument {
        source: &source,
        summary: &summary,
        style,
    };
    match document.write_to(output) {
        Ok(()) => {
            info!("Saved summary to {}", output.display());
            ItemOutcome::Written(output.to_path_buf())
        }
        Err(err) => {
            error!("Error saving summary for {item}: {err:#}");
            ItemOutcome::WriteFailed
        }
    }
}
