use serde::{Deserialize, Serialize};

use crate::de;
use crate::error::SnapshotError;

/// Full account snapshot as returned by the sync endpoint
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Tasks
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl Snapshot {
    /// Decode a snapshot from an already parsed sync response
    pub fn from_value(value: serde_json::Value) -> Result<Self, SnapshotError> {
        if !value.is_object() {
            return Err(SnapshotError::NotAnObject);
        }
        serde_json::from_value(value).map_err(SnapshotError::Decode)
    }

    /// Decode a snapshot from raw JSON text
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(SnapshotError::Parse)?;
        Self::from_value(value)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Label {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::order")]
    pub item_order: i64,
}

/// Saved search
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Filter {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub query: String,
    #[serde(default, deserialize_with = "de::order")]
    pub item_order: i64,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Due {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub date: Option<String>,
    /// Natural-language form, e.g. "every monday"
    #[serde(default, deserialize_with = "de::opt_string")]
    pub string: Option<String>,
}

impl Due {
    pub fn display(&self) -> Option<String> {
        self.string.clone().or_else(|| self.date.clone())
    }
}

/// A task
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Item {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::id")]
    pub project_id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub section_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub content: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,
    /// 4 is the most urgent
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default, deserialize_with = "de::flag")]
    pub checked: bool,
    #[serde(default)]
    pub due: Option<Due>,
    /// Label identifiers
    #[serde(default, deserialize_with = "de::ids")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "de::order")]
    pub child_order: i64,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Project {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_archived: bool,
    #[serde(
        default = "de::default_view_style",
        deserialize_with = "de::view_style"
    )]
    pub view_style: String,
    #[serde(default, deserialize_with = "de::order")]
    pub child_order: i64,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Section {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::id")]
    pub project_id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::order")]
    pub section_order: i64,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_deleted: bool,
}

/// Task as it appears in the export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanTask {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// "P1" (most urgent) to "P4"
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    pub is_completed: bool,
    /// Resolved label names
    pub labels: Vec<String>,
    pub subtasks: Vec<CleanTask>,
}

impl CleanTask {
    /// Number of tasks in this subtree, including itself
    pub fn task_count(&self) -> usize {
        1 + self.subtasks.iter().map(CleanTask::task_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanSection {
    pub name: String,
    pub tasks: Vec<CleanTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanProject {
    /// Project name
    pub project: String,
    pub is_archived: bool,
    pub view_style: String,
    pub sections: Vec<CleanSection>,
    /// Tasks that belong to no section
    pub tasks: Vec<CleanTask>,
    pub sub_projects: Vec<CleanProject>,
}

impl CleanProject {
    pub fn project_count(&self) -> usize {
        1 + self
            .sub_projects
            .iter()
            .map(CleanProject::project_count)
            .sum::<usize>()
    }

    pub fn task_count(&self) -> usize {
        let sectioned: usize = self
            .sections
            .iter()
            .flat_map(|s| s.tasks.iter())
            .map(CleanTask::task_count)
            .sum();
        let unsectioned: usize = self.tasks.iter().map(CleanTask::task_count).sum();
        let nested: usize = self.sub_projects.iter().map(CleanProject::task_count).sum();

        sectioned + unsectioned + nested
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanFilter {
    pub name: String,
    pub query: String,
}

/// Raw collection sizes, soft-deleted records included
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub total_projects: usize,
    pub total_tasks: usize,
    pub total_labels: usize,
    pub total_filters: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub stats: Stats,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalDefinitions {
    pub available_labels: Vec<String>,
    pub available_filters: Vec<CleanFilter>,
}

/// Root of the export document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FullExport {
    pub meta: Meta,
    pub global_definitions: GlobalDefinitions,
    pub projects_tree: Vec<CleanProject>,
}

impl FullExport {
    /// Projects that made it into the tree, nested ones included
    pub fn exported_project_count(&self) -> usize {
        self.projects_tree.iter().map(CleanProject::project_count).sum()
    }

    /// Tasks that made it into the tree, subtasks included
    pub fn exported_task_count(&self) -> usize {
        self.projects_tree.iter().map(CleanProject::task_count).sum()
    }
}
