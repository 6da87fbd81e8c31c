use std::path::PathBuf;

use thiserror::Error;

/// Failure while obtaining the raw snapshot
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Sync request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Sync endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Failed to read snapshot file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
