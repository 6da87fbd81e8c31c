use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::SourceError;

/// Resource collections requested from the sync endpoint
pub const RESOURCE_TYPES: &str = r#"["projects","items","sections","labels","filters"]"#;
/// Sync token asking for a full snapshot instead of a delta
pub const FULL_SYNC_TOKEN: &str = "*";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY: usize = 500;

/// Anything that can hand over a raw, flat snapshot
pub trait SnapshotSource {
    fn fetch_snapshot(&self) -> Result<Value, SourceError>;
}

/// Full-snapshot request against the sync endpoint
pub struct SyncClient {
    client: reqwest::blocking::Client,
    url: String,
    token: String,
}

impl SyncClient {
    pub fn new(url: &str, token: &str) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("tasktree/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, url, token))
    }

    pub fn with_client(client: reqwest::blocking::Client, url: &str, token: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
            token: token.to_string(),
        }
    }
}

impl SnapshotSource for SyncClient {
    fn fetch_snapshot(&self) -> Result<Value, SourceError> {
        info!("Requesting full snapshot from {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .form(&[
                ("sync_token", FULL_SYNC_TOKEN),
                ("resource_types", RESOURCE_TYPES),
            ])
            .send()?;

        let status = response.status();
        debug!("Sync endpoint answered {}", status);

        if !status.is_success() {
            let body: String = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            return Err(SourceError::Status { status, body });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Snapshot previously saved to disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SnapshotSource for FileSource {
    fn fetch_snapshot(&self) -> Result<Value, SourceError> {
        info!("Reading snapshot from {:?}", self.path);

        let contents = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;

        Ok(serde_json::from_str(&contents)?)
    }
}
