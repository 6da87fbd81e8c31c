use std::collections::HashMap;

use crate::definitions::LabelIndex;
use crate::models::{CleanTask, Item};

/// Map the source priority (4 = most urgent) to its display label
pub fn priority_label(priority: Option<i64>) -> &'static str {
    match priority {
        Some(4) => "P1",
        Some(3) => "P2",
        Some(2) => "P3",
        _ => "P4",
    }
}

/// Root tasks of one project, split by section
#[derive(Debug, Default)]
struct ProjectTasks {
    unsectioned: Vec<CleanTask>,
    by_section: HashMap<String, Vec<CleanTask>>,
}

/// Root tasks grouped by project and section
#[derive(Debug, Default)]
pub struct TaskGroups {
    projects: HashMap<String, ProjectTasks>,
}

impl TaskGroups {
    fn push(&mut self, project_id: &str, section_id: Option<&str>, task: CleanTask) {
        let bucket = self.projects.entry(project_id.to_string()).or_default();
        match section_id {
            Some(section_id) => bucket
                .by_section
                .entry(section_id.to_string())
                .or_default()
                .push(task),
            None => bucket.unsectioned.push(task),
        }
    }

    /// Remove and return the tasks filed under a project and section
    pub fn take_section(&mut self, project_id: &str, section_id: &str) -> Vec<CleanTask> {
        self.projects
            .get_mut(project_id)
            .and_then(|p| p.by_section.remove(section_id))
            .unwrap_or_default()
    }

    /// Remove and return the tasks of a project that have no section
    pub fn take_unsectioned(&mut self, project_id: &str) -> Vec<CleanTask> {
        self.projects
            .get_mut(project_id)
            .map(|p| std::mem::take(&mut p.unsectioned))
            .unwrap_or_default()
    }
}

/// Arena slot; the id fields are only used for linking
struct TaskNode<'a> {
    project_id: &'a str,
    section_id: Option<&'a str>,
    parent_id: Option<&'a str>,
    task: CleanTask,
    children: Vec<usize>,
}

fn clean_task(item: &Item, labels: &LabelIndex<'_>) -> CleanTask {
    CleanTask {
        content: item.content.clone(),
        description: item.description.clone(),
        priority: priority_label(item.priority).to_string(),
        due: item.due.as_ref().and_then(|d| d.display()),
        is_completed: item.checked,
        labels: item.labels.iter().map(|id| labels.resolve(id)).collect(),
        subtasks: Vec::new(),
    }
}

/// Build the subtask trees and group root tasks by project and section.
///
/// Deleted items are dropped. Siblings keep ascending `child_order`. An item
/// whose parent is missing or deleted is promoted to a root task.
pub fn build_task_groups(items: &[Item], labels: &LabelIndex<'_>) -> TaskGroups {
    let mut live: Vec<&Item> = items.iter().filter(|i| !i.is_deleted).collect();
    live.sort_by_key(|i| i.child_order);

    let mut nodes: Vec<Option<TaskNode<'_>>> = Vec::with_capacity(live.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(live.len());

    for item in &live {
        index.insert(item.id.as_str(), nodes.len());
        nodes.push(Some(TaskNode {
            project_id: item.project_id.as_str(),
            section_id: item.section_id.as_deref(),
            parent_id: item.parent_id.as_deref(),
            task: clean_task(item, labels),
            children: Vec::new(),
        }));
    }

    let mut roots = Vec::new();
    for idx in 0..nodes.len() {
        let parent = nodes[idx]
            .as_ref()
            .and_then(|n| n.parent_id)
            .and_then(|pid| index.get(pid).copied())
            .filter(|&p| p != idx);

        match parent.and_then(|p| nodes[p].as_mut()) {
            Some(parent_node) => parent_node.children.push(idx),
            None => roots.push(idx),
        }
    }

    let mut groups = TaskGroups::default();
    for idx in roots {
        let Some((project_id, section_id)) = nodes[idx]
            .as_ref()
            .map(|n| (n.project_id, n.section_id))
        else {
            continue;
        };
        if let Some(task) = materialize(&mut nodes, idx) {
            groups.push(project_id, section_id, task);
        }
    }

    groups
}

/// Move a node and its descendants out of the arena into an owned tree
fn materialize(nodes: &mut [Option<TaskNode<'_>>], idx: usize) -> Option<CleanTask> {
    let node = nodes.get_mut(idx)?.take()?;
    let mut task = node.task;
    task.subtasks = node
        .children
        .iter()
        .filter_map(|&child| materialize(nodes, child))
        .collect();
    Some(task)
}
