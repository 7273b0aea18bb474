use crate::types::date_range::DateRange;
use crate::types::variable::VariableKind;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why an external source could not provide usable data.
///
/// The selector treats every variant as "source unavailable" and falls back
/// to generation; these errors only surface when a source is used directly.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read results file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse results payload")]
    JsonParse(#[from] serde_json::Error),

    #[error("External source did not answer within {0:?}")]
    Timeout(Duration),

    #[error("External payload contains no records")]
    EmptyPayload,

    #[error("External payload has no records within {0}")]
    NoRecordsInRange(DateRange),

    // Also raised when only some records carry the field
    #[error("External payload does not provide '{0}'")]
    MissingVariable(VariableKind),

    #[error("External source rejected the request: {0}")]
    Rejected(String),
}
