//! Text normalization: raw upload bytes → one clean text blob.
//!
//! This is the only pipeline stage with an unconditional failure mode. If
//! the bytes cannot be read as text at all, the whole run aborts here.

use once_cell::sync::Lazy;
use regex::Regex;
use scrumsight_core::{Error, Result};
use tracing::debug;

/// Normalized document text. Owned by a single pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

static HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Convert raw upload bytes into normalized text.
///
/// Decodes as UTF-8 (lossily), rejects byte streams that are clearly binary,
/// and canonicalizes line endings and whitespace so the anchor and field
/// patterns see a predictable surface.
pub fn normalize(bytes: &[u8]) -> Result<NormalizedText> {
    if bytes.is_empty() {
        return Err(Error::ExtractionFailed("empty document".into()));
    }

    let decoded = String::from_utf8_lossy(bytes);

    // Too many control or replacement characters means this was never text.
    let suspicious = decoded
        .chars()
        .filter(|c| (c.is_control() && *c != '\n' && *c != '\r' && *c != '\t') || *c == '\u{FFFD}')
        .count();
    if suspicious > decoded.chars().count() / 10 {
        return Err(Error::ExtractionFailed(format!(
            "binary content: {suspicious} unprintable characters"
        )));
    }

    let unified = decoded.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = HORIZONTAL_WS.replace_all(&unified, " ");

    let mut text = String::with_capacity(collapsed.len());
    for line in collapsed.split('\n') {
        text.push_str(line.trim_end());
        text.push('\n');
    }
    let text = BLANK_RUNS.replace_all(text.trim_end(), "\n\n").into_owned();

    if text.trim().is_empty() {
        return Err(Error::ExtractionFailed("document contains no text".into()));
    }

    debug!("Normalized {} bytes to {} chars", bytes.len(), text.len());
    Ok(NormalizedText(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_line_endings_and_spacing() {
        let text = normalize(b"MATCH OVERVIEW\r\nHarbour RFC\tvs  Valley RFC\r\n\r\n\r\n\r\nScore: 24 - 17").unwrap();
        assert_eq!(
            text.as_str(),
            "MATCH OVERVIEW\nHarbour RFC vs Valley RFC\n\nScore: 24 - 17"
        );
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(normalize(b""), Err(Error::ExtractionFailed(_))));
    }

    #[test]
    fn test_binary_input_fails() {
        let bytes: Vec<u8> = (0..200u8).cycle().take(2000).collect();
        assert!(matches!(normalize(&bytes), Err(Error::ExtractionFailed(_))));
    }

    #[test]
    fn test_whitespace_only_fails() {
        assert!(normalize(b"   \n \t \n  ").is_err());
    }
}
