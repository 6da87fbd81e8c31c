use std::path::Path;

use anyhow::Context;

use crate::{
    app_config::AppConfig,
    source::{FileSource, SnapshotSource, SyncClient},
};

pub mod completions;
pub mod config;
pub mod export;
pub mod fetch;

/// Pick the snapshot file when one is given, the sync endpoint otherwise
fn snapshot_source(
    config: &AppConfig,
    input: Option<&str>,
) -> anyhow::Result<Box<dyn SnapshotSource>> {
    match input {
        Some(path) => Ok(Box::new(FileSource::new(Path::new(path)))),
        None => {
            let token = config.require_token()?;
            let client = SyncClient::new(&config.sync_url, token)
                .context("Failed to set up HTTP client")?;
            Ok(Box::new(client))
        }
    }
}
