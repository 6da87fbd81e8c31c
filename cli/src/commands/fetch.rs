use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;

use crate::{
    app_config::AppConfig,
    args::FetchArgs,
    sink::{timestamped_filename, write_json, SNAPSHOT_PREFIX},
};

use super::snapshot_source;

pub fn fetch_cmd(config: &AppConfig, args: FetchArgs) -> Result<(), anyhow::Error> {
    let source = snapshot_source(config, None)?;
    let raw = source
        .fetch_snapshot()
        .context("Failed to fetch snapshot")?;

    let path = args.output.map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(&config.output_dir)
            .join(timestamped_filename(SNAPSHOT_PREFIX, &Local::now()))
    });
    let path = write_json(&raw, &path, false)?;

    println!("Snapshot saved to {}", path.display());
    Ok(())
}
