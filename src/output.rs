//! The output module renders summaries as markdown documents and writes them to disk.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Layout of a summary document.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DocumentStyle {
    /// One file per list entry, source on its own line and a `<br>` separator.
    Batch,
    /// A single file next to its input.
    Single,
}

/// A summary ready to be written.
#[derive(Debug)]
pub struct SummaryDocument<'a> {
    /// URL or file name shown in the header.
    pub source: &'a str,
    /// Model answer, written unchanged.
    pub summary: &'a str,
    pub style: DocumentStyle,
}

impl SummaryDocument<'_> {
    /// Renders the header, the summary and the trailing separator of the style.
    pub fn render(&self) -> String {
        match self.style {
            DocumentStyle::Batch => {
                format!("# Summary for:\n{}\n\n{}\n\n<br>\n", self.source, self.summary)
            }
            DocumentStyle::Single => {
                format!("# Summary for: {}\n\n{}\n", self.source, self.summary)
            }
        }
    }

    /// Writes the document to `path`, replacing whatever was there.
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        file.write_all(self.render().as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// File name of the `index`-th (1-based) summary in batch mode.
pub fn batch_file_name(index: usize) -> String {
    format!("summary_{index:03}.md")
}

/// `notes/article.txt` becomes `notes/article_summary.md`.
pub fn single_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_summary.md"))
}
