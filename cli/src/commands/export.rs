use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, Utc};
use tasktree_core::{build_export, ExportOptions, SectionPolicy, Snapshot};
use tracing::{debug, info};

use crate::{
    app_config::AppConfig,
    args::ExportArgs,
    report::ExportReport,
    sink::{timestamped_filename, to_json, write_json, EXPORT_PREFIX},
};

use super::snapshot_source;

pub fn export_cmd(config: &AppConfig, args: ExportArgs) -> Result<(), anyhow::Error> {
    let source = snapshot_source(config, args.input.as_deref())?;
    let raw = source
        .fetch_snapshot()
        .context("Failed to fetch snapshot")?;

    let snapshot = Snapshot::from_value(raw).context("Failed to decode snapshot")?;
    debug!(
        projects = snapshot.projects.len(),
        sections = snapshot.sections.len(),
        items = snapshot.items.len(),
        labels = snapshot.labels.len(),
        filters = snapshot.filters.len(),
        "Snapshot decoded"
    );

    let options = ExportOptions {
        section_policy: if args.drop_empty_sections {
            SectionPolicy::DropEmpty
        } else {
            SectionPolicy::KeepAll
        },
    };
    let now = Utc::now();
    let export = build_export(&snapshot, &options, now);
    info!(
        projects = export.exported_project_count(),
        tasks = export.exported_task_count(),
        "Export built"
    );

    if args.stdout {
        println!("{}", to_json(&export, args.compact)?);
        return Ok(());
    }

    let output_dir = args.output_dir.unwrap_or_else(|| config.output_dir.clone());
    let path = PathBuf::from(output_dir).join(timestamped_filename(
        EXPORT_PREFIX,
        &now.with_timezone(&Local),
    ));
    let path = write_json(&export, &path, args.compact)?;

    if !args.quiet {
        ExportReport::new(&export, &path)
            .print()
            .context("Failed to print summary")?;
    }

    Ok(())
}
