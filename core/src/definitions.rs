use std::collections::HashMap;

use crate::models::{CleanFilter, Filter, Label};

/// Name substituted for label ids missing from the label collection
pub const UNKNOWN_LABEL: &str = "Unknown Label";

/// Label id to label name lookup
#[derive(Debug, Default)]
pub struct LabelIndex<'a> {
    names: HashMap<&'a str, &'a str>,
}

impl<'a> LabelIndex<'a> {
    pub fn resolve(&self, id: &str) -> String {
        self.names
            .get(id)
            .copied()
            .unwrap_or(UNKNOWN_LABEL)
            .to_string()
    }
}

/// Build the label lookup and the label names ordered by `item_order`
pub fn extract_labels(labels: &[Label]) -> (LabelIndex<'_>, Vec<String>) {
    let mut sorted: Vec<&Label> = labels.iter().collect();
    sorted.sort_by_key(|l| l.item_order);

    let index = LabelIndex {
        names: labels
            .iter()
            .map(|l| (l.id.as_str(), l.name.as_str()))
            .collect(),
    };
    let names = sorted.into_iter().map(|l| l.name.clone()).collect();

    (index, names)
}

/// Live filters ordered by `item_order`
pub fn extract_filters(filters: &[Filter]) -> Vec<CleanFilter> {
    let mut live: Vec<&Filter> = filters.iter().filter(|f| !f.is_deleted).collect();
    live.sort_by_key(|f| f.item_order);

    live.into_iter()
        .map(|f| CleanFilter {
            name: f.name.clone(),
            query: f.query.clone(),
        })
        .collect()
}
