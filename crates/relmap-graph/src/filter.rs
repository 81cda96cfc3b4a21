//! Selection and tag-filter state.
//!
//! The selection is an ordered set of entity ids toggled by clicking nodes;
//! the tag set mirrors the filter checkboxes. An empty set on either axis
//! means "no filtering on that axis".

use relmap_core::{EntityId, Relation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Visual treatment of a node under the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Explicitly selected.
    Selected,
    /// Not selected while a selection exists.
    Dimmed,
    /// No selection active.
    Normal,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ViewFilter {
    selection: Vec<EntityId>,
    tags: BTreeSet<String>,
}

impl ViewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle an entity in the selection: remove if present, append if not.
    pub fn toggle_selection(&mut self, id: &EntityId) {
        if let Some(pos) = self.selection.iter().position(|s| s == id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(id.clone());
        }
    }

    pub fn selection(&self) -> &[EntityId] {
        &self.selection
    }

    pub fn set_tag(&mut self, tag: &str, checked: bool) {
        if checked {
            self.tags.insert(tag.to_owned());
        } else {
            self.tags.remove(tag);
        }
    }

    pub fn tag_checked(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn highlight(&self, id: &EntityId) -> Highlight {
        if self.selection.iter().any(|s| s == id) {
            Highlight::Selected
        } else if self.selection.is_empty() {
            Highlight::Normal
        } else {
            Highlight::Dimmed
        }
    }

    /// Whether a relation survives both filter axes. Endpoint existence is
    /// checked separately by the scene builder.
    pub fn passes(&self, relation: &Relation) -> bool {
        let tag_ok = self.tags.is_empty() || self.tags.contains(&relation.tag);
        let selection_ok = self.selection.is_empty()
            || self.selection.iter().any(|s| s == &relation.from)
            || self.selection.iter().any(|s| s == &relation.to);
        tag_ok && selection_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(from: &str, to: &str, tag: &str) -> Relation {
        Relation {
            from: from.into(),
            to: to.into(),
            tag: tag.into(),
            label: String::new(),
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut filter = ViewFilter::new();
        let a = EntityId::from("a");
        filter.toggle_selection(&a);
        assert_eq!(filter.selection(), &[a.clone()]);
        filter.toggle_selection(&a);
        assert!(filter.selection().is_empty());
    }

    #[test]
    fn empty_filters_pass_everything() {
        let filter = ViewFilter::new();
        assert!(filter.passes(&rel("a", "b", "knows")));
        assert_eq!(filter.highlight(&"a".into()), Highlight::Normal);
    }

    #[test]
    fn selection_keeps_touching_edges_only() {
        let mut filter = ViewFilter::new();
        filter.toggle_selection(&"a".into());

        assert!(filter.passes(&rel("a", "b", "t")));
        assert!(filter.passes(&rel("c", "a", "t")));
        assert!(!filter.passes(&rel("b", "c", "t")));

        assert_eq!(filter.highlight(&"a".into()), Highlight::Selected);
        assert_eq!(filter.highlight(&"b".into()), Highlight::Dimmed);
    }

    #[test]
    fn tag_filter_combines_with_selection() {
        let mut filter = ViewFilter::new();
        filter.set_tag("knows", true);
        assert!(filter.passes(&rel("a", "b", "knows")));
        assert!(!filter.passes(&rel("a", "b", "owns")));

        filter.toggle_selection(&"c".into());
        assert!(!filter.passes(&rel("a", "b", "knows")));
        assert!(filter.passes(&rel("c", "b", "knows")));

        filter.set_tag("knows", false);
        assert!(filter.passes(&rel("c", "b", "owns")));
    }
}
