use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

pub const EXPORT_PREFIX: &str = "todoist_export";
pub const SNAPSHOT_PREFIX: &str = "todoist_snapshot";

/// `<prefix>_YYYYmmdd_HHMMSS.json`
pub fn timestamped_filename<Tz: TimeZone>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}.json", prefix, at.format("%Y%m%d_%H%M%S"))
}

pub fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.context("Failed to serialize JSON")
}

/// Write JSON to `path` through a temporary sibling file, so an interrupted
/// run never leaves a truncated file behind
pub fn write_json<T: Serialize>(value: &T, path: &Path, compact: bool) -> Result<PathBuf> {
    let json = to_json(value, compact)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {:?}", dir))?;

    let mut file = NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
    file.write_all(json.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .context("Failed to write JSON")?;
    file.persist(path)
        .with_context(|| format!("Failed to move output into place at {:?}", path))?;

    info!("Wrote {} bytes to {:?}", json.len() + 1, path);
    Ok(path.to_path_buf())
}
