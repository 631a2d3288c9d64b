use serde::{Deserialize, Serialize};

/// Result handed over by a text extraction collaborator.
///
/// An empty `Extracted` text is a valid, if unpromising, document; `Failed` means the
/// upstream service could not produce text at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    Extracted { text: String },
    Failed { reason: String },
}

impl ExtractionOutcome {
    pub fn extracted(text: impl Into<String>) -> Self {
        Self::Extracted { text: text.into() }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Turns raw document bytes into text for scoring.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, media_type: &str, bytes: &[u8]) -> ExtractionOutcome;
}

/// Extractor for UTF-8 plain text and markdown. Other media types are reported as failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    const SUPPORTED: [&'static str; 2] = ["text/plain", "text/markdown"];

    pub fn supports(media_type: &str) -> bool {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self::SUPPORTED.contains(&essence.as_str())
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, media_type: &str, bytes: &[u8]) -> ExtractionOutcome {
        if !Self::supports(media_type) {
            return ExtractionOutcome::failed(format!("unsupported media type `{media_type}`"));
        }

        match std::str::from_utf8(bytes) {
            Ok(text) => ExtractionOutcome::extracted(text.trim()),
            Err(err) => ExtractionOutcome::failed(format!("document is not valid UTF-8: {err}")),
        }
    }
}
