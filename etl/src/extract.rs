//! Extract stage: fetch the source and parse it into a [`RawTable`].
//!
//! [`RawTable`]: crate::parser::RawTable

use std::path::PathBuf;

use crate::error::{ExtractError, ExtractResult};
use crate::logs::{log_info, log_success};
use crate::parser::{parse_bytes_auto, ParseResult};

/// Where the source CSV lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    /// `http://` and `https://` locators are URLs, anything else a file path.
    pub fn parse(locator: &str) -> Self {
        let lower = locator.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(locator.to_string())
        } else {
            Source::Path(PathBuf::from(locator))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read the raw source bytes.
pub async fn fetch_bytes(source: &Source) -> ExtractResult<Vec<u8>> {
    match source {
        Source::Url(url) => {
            let response = reqwest::get(url.as_str()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ExtractError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            Ok(response.bytes().await?.to_vec())
        }
        Source::Path(path) => Ok(tokio::fs::read(path).await?),
    }
}

/// Fetch and parse the source table.
pub async fn extract(source: &Source) -> ExtractResult<ParseResult> {
    log_info(format!("📥 Fetching {}", source));
    let bytes = fetch_bytes(source).await?;
    log_success(format!("Received {} bytes", bytes.len()));

    let result = parse_bytes_auto(&bytes)?;
    log_success(format!(
        "Parsed {} rows, {} columns (encoding: {}, delimiter: '{}')",
        result.info.row_count,
        result.info.headers.len(),
        result.info.encoding,
        format_delimiter(result.info.delimiter),
    ));

    Ok(result)
}

pub(crate) fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
