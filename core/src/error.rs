use thiserror::Error;

/// Failure to decode a raw snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("snapshot must be a JSON object")]
    NotAnObject,
    #[error("snapshot has an unexpected shape: {0}")]
    Decode(#[source] serde_json::Error),
}
