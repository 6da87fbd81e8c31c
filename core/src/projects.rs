use std::collections::HashMap;

use crate::models::{CleanProject, CleanSection, Project, Section};
use crate::tasks::TaskGroups;

/// What to do with sections that end up without tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionPolicy {
    /// Every live section is exported, even when empty
    #[default]
    KeepAll,
    DropEmpty,
}

/// Arena slot; `parent_id` and `child_order` never reach the output
struct ProjectNode<'a> {
    parent_id: Option<&'a str>,
    child_order: i64,
    project: CleanProject,
    children: Vec<usize>,
}

/// Live sections per project, ordered by `section_order`
fn live_sections(sections: &[Section]) -> HashMap<&str, Vec<&Section>> {
    let mut by_project: HashMap<&str, Vec<&Section>> = HashMap::new();
    for section in sections.iter().filter(|s| !s.is_deleted) {
        by_project
            .entry(section.project_id.as_str())
            .or_default()
            .push(section);
    }
    for list in by_project.values_mut() {
        list.sort_by_key(|s| s.section_order);
    }
    by_project
}

/// Build the project forest from live projects, attaching sections and
/// the root tasks grouped in `tasks`.
///
/// A project whose parent is missing or deleted becomes a root. Roots and
/// every `sub_projects` list are ordered by `child_order`.
pub fn build_project_tree(
    projects: &[Project],
    sections: &[Section],
    mut tasks: TaskGroups,
    policy: SectionPolicy,
) -> Vec<CleanProject> {
    let sections = live_sections(sections);

    let mut nodes: Vec<Option<ProjectNode<'_>>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for project in projects.iter().filter(|p| !p.is_deleted) {
        let project_sections: Vec<CleanSection> = sections
            .get(project.id.as_str())
            .map(|list| {
                list.iter()
                    .map(|s| CleanSection {
                        name: s.name.clone(),
                        tasks: tasks.take_section(&project.id, &s.id),
                    })
                    .filter(|s| policy == SectionPolicy::KeepAll || !s.tasks.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        index.insert(project.id.as_str(), nodes.len());
        nodes.push(Some(ProjectNode {
            parent_id: project.parent_id.as_deref(),
            child_order: project.child_order,
            project: CleanProject {
                project: project.name.clone(),
                is_archived: project.is_archived,
                view_style: project.view_style.clone(),
                sections: project_sections,
                tasks: tasks.take_unsectioned(&project.id),
                sub_projects: Vec::new(),
            },
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

    sort_by_child_order(&nodes, &mut roots);
    roots
        .into_iter()
        .filter_map(|idx| materialize(&mut nodes, idx))
        .collect()
}

fn sort_by_child_order(nodes: &[Option<ProjectNode<'_>>], indices: &mut [usize]) {
    indices.sort_by_key(|&i| nodes[i].as_ref().map(|n| n.child_order).unwrap_or_default());
}

fn materialize(nodes: &mut [Option<ProjectNode<'_>>], idx: usize) -> Option<CleanProject> {
    let mut node = nodes.get_mut(idx)?.take()?;
    sort_by_child_order(nodes, &mut node.children);

    let mut project = node.project;
    project.sub_projects = node
        .children
        .iter()
        .filter_map(|&child| materialize(nodes, child))
        .collect();
    Some(project)
}
