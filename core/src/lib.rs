#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod de;
pub mod definitions;
pub mod error;
pub mod export;
pub mod models;
pub mod projects;
pub mod tasks;

// Re-export commonly used types
pub use definitions::{extract_filters, extract_labels, LabelIndex, UNKNOWN_LABEL};
pub use error::SnapshotError;
pub use export::{build_export, ExportOptions};
pub use models::{
    CleanFilter, CleanProject, CleanSection, CleanTask, FullExport, GlobalDefinitions, Meta,
    Snapshot, Stats,
};
pub use projects::{build_project_tree, SectionPolicy};
pub use tasks::{build_task_groups, priority_label, TaskGroups};
