use chrono::{DateTime, SecondsFormat, Utc};

use crate::definitions::{extract_filters, extract_labels};
use crate::models::{FullExport, GlobalDefinitions, Meta, Snapshot, Stats};
use crate::projects::{build_project_tree, SectionPolicy};
use crate::tasks::build_task_groups;

/// Knobs for the normalization pass
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub section_policy: SectionPolicy,
}

/// Turn a flat snapshot into the nested export.
///
/// Deterministic for a given snapshot, options and timestamp.
pub fn build_export(
    snapshot: &Snapshot,
    options: &ExportOptions,
    generated_at: DateTime<Utc>,
) -> FullExport {
    let (label_index, available_labels) = extract_labels(&snapshot.labels);
    let available_filters = extract_filters(&snapshot.filters);

    let task_groups = build_task_groups(&snapshot.items, &label_index);
    let projects_tree = build_project_tree(
        &snapshot.projects,
        &snapshot.sections,
        task_groups,
        options.section_policy,
    );

    // Counts are taken before soft-deleted records are filtered out
    let stats = Stats {
        total_projects: snapshot.projects.len(),
        total_tasks: snapshot.items.len(),
        total_labels: available_labels.len(),
        total_filters: available_filters.len(),
    };

    FullExport {
        meta: Meta {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            stats,
        },
        global_definitions: GlobalDefinitions {
            available_labels,
            available_filters,
        },
        projects_tree,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 16, 9, 30, 0).unwrap()
    }

    fn export(value: Value) -> FullExport {
        let snapshot = Snapshot::from_value(value).unwrap();
        build_export(&snapshot, &ExportOptions::default(), fixed_time())
    }

    fn sample_snapshot() -> Value {
        json!({
            "labels": [
                { "id": "L2", "name": "work", "item_order": 2 },
                { "id": "L1", "name": "home", "item_order": 1 }
            ],
            "filters": [
                { "id": "F1", "name": "Today", "query": "today | overdue", "item_order": 1, "is_deleted": false },
                { "id": "F2", "name": "Old", "query": "p1", "item_order": 0, "is_deleted": true }
            ],
            "projects": [
                { "id": "P1", "name": "Work", "parent_id": null, "child_order": 1, "is_archived": false, "view_style": "board", "is_deleted": false },
                { "id": "P2", "name": "Inbox", "parent_id": null, "child_order": 0, "is_archived": false, "view_style": "list", "is_deleted": false },
                { "id": "P3", "name": "Clients", "parent_id": "P1", "child_order": 0, "is_archived": true, "view_style": "list", "is_deleted": false },
                { "id": "P4", "name": "Trash", "parent_id": null, "child_order": 2, "is_archived": false, "view_style": "list", "is_deleted": true }
            ],
            "sections": [
                { "id": "S1", "project_id": "P1", "name": "Doing", "section_order": 2, "is_deleted": false },
                { "id": "S2", "project_id": "P1", "name": "Todo", "section_order": 1, "is_deleted": false }
            ],
            "items": [
                { "id": "T1", "project_id": "P1", "section_id": "S1", "parent_id": null, "content": "Write report",
                  "description": "Q1 numbers", "priority": 4, "checked": false, "labels": ["L2", "L9"],
                  "due": { "date": "2024-03-20", "string": "next wed" }, "child_order": 0, "is_deleted": false },
                { "id": "T2", "project_id": "P1", "section_id": "S1", "parent_id": "T1", "content": "Collect data",
                  "priority": 2, "checked": true, "labels": [], "child_order": 1, "is_deleted": false },
                { "id": "T3", "project_id": "P2", "section_id": null, "parent_id": null, "content": "Buy milk",
                  "priority": 1, "checked": false, "labels": ["L1"], "due": { "date": "2024-03-17" },
                  "child_order": 0, "is_deleted": false },
                { "id": "T4", "project_id": "P2", "section_id": null, "parent_id": null, "content": "Deleted",
                  "priority": 1, "checked": false, "labels": [], "child_order": 1, "is_deleted": true }
            ]
        })
    }

    fn collect_keys(value: &Value, keys: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    keys.push(k.clone());
                    collect_keys(v, keys);
                }
            }
            Value::Array(items) => items.iter().for_each(|v| collect_keys(v, keys)),
            _ => {}
        }
    }

    #[test]
    fn test_parent_child_example() {
        let export = export(json!({
            "items": [
                { "id": "1", "child_order": 0, "project_id": "P", "parent_id": null, "priority": 4, "checked": 0, "labels": [], "content": "parent" },
                { "id": "2", "child_order": 1, "project_id": "P", "parent_id": "1", "priority": 1, "checked": 0, "labels": [], "content": "child" }
            ],
            "projects": [{ "id": "P", "child_order": 0, "parent_id": null, "name": "Work" }]
        }));

        let value = serde_json::to_value(&export.projects_tree).unwrap();
        assert_eq!(
            value,
            json!([{
                "project": "Work",
                "is_archived": false,
                "view_style": "list",
                "sections": [],
                "tasks": [{
                    "content": "parent",
                    "priority": "P1",
                    "is_completed": false,
                    "labels": [],
                    "subtasks": [{
                        "content": "child",
                        "priority": "P4",
                        "is_completed": false,
                        "labels": [],
                        "subtasks": []
                    }]
                }],
                "sub_projects": []
            }])
        );
    }

    #[test]
    fn test_full_export_shape() {
        let export = export(sample_snapshot());

        assert_eq!(export.meta.generated_at, "2024-03-16T09:30:00Z");
        assert_eq!(export.global_definitions.available_labels, vec!["home", "work"]);
        assert_eq!(export.global_definitions.available_filters.len(), 1);
        assert_eq!(export.global_definitions.available_filters[0].name, "Today");

        let names: Vec<&str> = export.projects_tree.iter().map(|p| p.project.as_str()).collect();
        assert_eq!(names, vec!["Inbox", "Work"]);

        let work = &export.projects_tree[1];
        assert_eq!(work.view_style, "board");
        assert_eq!(work.sub_projects[0].project, "Clients");
        assert!(work.sub_projects[0].is_archived);

        let section_names: Vec<&str> = work.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(section_names, vec!["Todo", "Doing"]);

        let report = &work.sections[1].tasks[0];
        assert_eq!(report.description.as_deref(), Some("Q1 numbers"));
        assert_eq!(report.due.as_deref(), Some("next wed"));
        assert_eq!(report.labels, vec!["work", "Unknown Label"]);
        assert_eq!(report.subtasks[0].priority, "P3");
        assert!(report.subtasks[0].is_completed);

        let inbox = &export.projects_tree[0];
        assert_eq!(inbox.tasks.len(), 1);
        assert_eq!(inbox.tasks[0].due.as_deref(), Some("2024-03-17"));
        assert_eq!(inbox.tasks[0].labels, vec!["home"]);
    }

    #[test]
    fn test_stats_count_raw_totals() {
        let export = export(sample_snapshot());

        assert_eq!(
            export.meta.stats,
            Stats {
                total_projects: 4,
                total_tasks: 4,
                total_labels: 2,
                total_filters: 1,
            }
        );
        assert_eq!(export.exported_project_count(), 3);
        assert_eq!(export.exported_task_count(), 3);
    }

    #[test]
    fn test_no_identifiers_or_deleted_records_in_output() {
        let export = export(sample_snapshot());
        let value = serde_json::to_value(&export).unwrap();

        let mut keys = Vec::new();
        collect_keys(&value["projects_tree"], &mut keys);
        collect_keys(&value["global_definitions"], &mut keys);
        for forbidden in ["id", "project_id", "section_id", "parent_id", "child_order"] {
            assert!(!keys.iter().any(|k| k == forbidden), "leaked {}", forbidden);
        }

        let text = value.to_string();
        assert!(!text.contains("Trash"));
        assert!(!text.contains("Deleted"));
        assert!(!text.contains("\"Old\""));
    }

    #[test]
    fn test_top_level_keys() {
        let value = serde_json::to_value(export(sample_snapshot())).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["global_definitions", "meta", "projects_tree"]);
        assert!(value["meta"]["stats"]["total_tasks"].is_u64());
    }

    #[test]
    fn test_empty_snapshot() {
        let export = export(json!({}));

        assert!(export.projects_tree.is_empty());
        assert_eq!(export.meta.stats.total_projects, 0);
        assert!(export.global_definitions.available_labels.is_empty());
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let a = export(sample_snapshot());
        let b = export(sample_snapshot());

        assert_eq!(a, b);
    }

    #[test]
    fn test_drop_empty_sections_option() {
        let snapshot = Snapshot::from_value(sample_snapshot()).unwrap();
        let options = ExportOptions {
            section_policy: SectionPolicy::DropEmpty,
        };

        let export = build_export(&snapshot, &options, fixed_time());

        let work = &export.projects_tree[1];
        assert_eq!(work.sections.len(), 1);
        assert_eq!(work.sections[0].name, "Doing");
    }
}
