//! The source module turns an input item (a web page or a local file) into
//! the plain text that gets summarized.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to compile paragraph selector"));

/// Elements whose text never makes it into extracted content.
const IGNORED_ELEMENTS: [&str; 2] = ["script", "style"];

/// One unit of work: a web page or a local file.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Item {
    /// An absolute `http` or `https` URL, with the entry exactly as it was written.
    Url { raw: String, url: Url },
    /// Anything else is treated as a path on disk.
    File(PathBuf),
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url {
                raw: value.to_owned(),
                url,
            },
            _ => Self::File(PathBuf::from(value)),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url { raw, .. } => write!(formatter, "{raw}"),
            Self::File(path) => write!(formatter, "{}", path.display()),
        }
    }
}

impl Item {
    /// Fetches the text behind this item.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched or the file cannot be read.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<String> {
        match self {
            Self::Url { url, .. } => fetch_web(client, url).await,
            Self::File(path) => fetch_file(path),
        }
    }
}

/// Downloads a web page and extracts its paragraph text.
///
/// The request timeout is whatever `client` was built with.
/// An empty string means the page was fetched but had no paragraphs.
///
/// # Errors
///
/// Returns an error if the request fails, the server answers with a non-success
/// status or the body cannot be read.
pub async fn fetch_web(client: &reqwest::Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Request to {url} failed"))?
        .error_for_status()
        .with_context(|| format!("{url} answered with an error status"))?;

    let html = response
        .text()
        .await
        .with_context(|| format!("Failed to read body of {url}"))?;
    debug!("Fetched {} bytes from {url}", html.len());

    Ok(extract_paragraphs(&html))
}

/// Reads a local UTF-8 text file, trimmed.
///
/// # Errors
///
/// Returns an error if the file does not exist or is not valid UTF-8.
pub fn fetch_file(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))?;
    Ok(text.trim().to_owned())
}

/// Joins the text of every `<p>` element in document order, one paragraph per line.
/// Script and style content is skipped, and so are headings, lists and other non-paragraph text.
pub fn extract_paragraphs(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .select(&PARAGRAPH_SELECTOR)
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

fn paragraph_text(paragraph: ElementRef<'_>) -> String {
    paragraph
        .descendants()
        .filter(|node| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|element| IGNORED_ELEMENTS.contains(&element.name()))
            })
        })
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect()
}
