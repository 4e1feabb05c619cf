//! The prompt module loads the summarization template and merges content into it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use crate::constants::{PROMPT_PLACEHOLDER, SAMPLE_PROMPT_TEMPLATE};

/// Instructional text sent to the model, with one substitution point for the content.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PromptTemplate {
    text: String,
}

impl From<String> for PromptTemplate {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for PromptTemplate {
    fn from(text: &str) -> Self {
        Self::from(text.to_owned())
    }
}

impl PromptTemplate {
    /// Loads the template from a file.
    ///
    /// A template without the placeholder is accepted; the content is then
    /// appended after it.
    ///
    /// # Errors
    ///
    /// Returns an error with a hint on how to create the file if it cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| {
            format!(
                "{} not found. Please create it with your summarization prompt.\n\
                 Example content: '{SAMPLE_PROMPT_TEMPLATE}'",
                path.display()
            )
        })?;

        let template = Self::from(text);
        if !template.has_placeholder() {
            warn!(
                "{} has no {PROMPT_PLACEHOLDER} placeholder, content will be appended to it",
                path.display()
            );
        }

        Ok(template)
    }

    /// True when the template contains the substitution point.
    pub fn has_placeholder(&self) -> bool {
        self.text.contains(PROMPT_PLACEHOLDER)
    }

    /// Builds the prompt for `content`.
    ///
    /// Every placeholder is replaced by `content`; without a placeholder the
    /// content follows the template after a blank line. Nothing is truncated.
    pub fn render(&self, content: &str) -> String {
        if self.has_placeholder() {
            self.text.replace(PROMPT_PLACEHOLDER, content)
        } else {
            format!("{}\n\n{content}", self.text.trim_end())
        }
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::from(SAMPLE_PROMPT_TEMPLATE)
    }
}
