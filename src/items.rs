//! The items module reads the list file that drives a batch run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::constants::SAMPLE_LIST_FILE;
use crate::source::Item;

/// Parses list file content into items, in file order.
/// Blank lines and lines starting with `#` are ignored.
pub fn parse_item_list(content: &str) -> Vec<Item> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Item::from)
        .collect()
}

/// Reads and parses a list file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_item_list(path: &Path) -> Result<Vec<Item>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read list file {}", path.display()))?;
    Ok(parse_item_list(&content))
}

/// Writes a list file containing only explanatory comments.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn create_sample_list(path: &Path) -> Result<()> {
    fs::write(path, SAMPLE_LIST_FILE)
        .with_context(|| format!("Could not create sample list file {}", path.display()))
}
