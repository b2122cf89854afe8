//! A diff group: one independent text-set store plus its selection.

use std::collections::HashSet;

use crate::error::Result;
use crate::text_set::TextSetStore;
use crate::types::{GroupId, Source, TextSet, TextSetId};

/// Text sets in different groups are never compared with each other.
///
/// `selected` is always a subset of the ids in `text_sets`: every mutation
/// that drops a text set also drops its selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffGroup {
    id: GroupId,
    name: String,
    text_sets: TextSetStore,
    selected: HashSet<TextSetId>,
}

impl DiffGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(GroupId::generate(), name)
    }

    pub(crate) fn with_id(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            text_sets: TextSetStore::new(),
            selected: HashSet::new(),
        }
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Read view of the text sets in display order.
    pub fn text_sets(&self) -> &TextSetStore {
        &self.text_sets
    }

    /// Position 0, if any.
    pub fn base(&self) -> Option<&TextSet> {
        self.text_sets.base()
    }

    pub fn is_selected(&self, id: &TextSetId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected text sets in display order (not selection order).
    pub fn selected_text_sets(&self) -> Vec<&TextSet> {
        self.text_sets.iter().filter(|t| self.selected.contains(t.id())).collect()
    }

    /// Selected ids in display order.
    pub fn selected_ids(&self) -> Vec<TextSetId> {
        self.text_sets
            .ids()
            .iter()
            .filter(|id| self.selected.contains(*id))
            .cloned()
            .collect()
    }

    pub fn add_text_set(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
        source: Source,
    ) -> TextSetId {
        self.text_sets.add(name, content, source)
    }

    /// Appends an already-built text set, e.g. one produced from a
    /// transcription. Returns `false` if its id is already in the group.
    pub fn push_text_set(&mut self, text_set: TextSet) -> bool {
        self.text_sets.push(text_set)
    }

    /// Removes the text set and its selection. No-op if absent.
    pub fn remove_text_set(&mut self, id: &TextSetId) -> Option<TextSet> {
        self.selected.remove(id);
        self.text_sets.remove(id)
    }

    pub fn reorder_text_sets(&mut self, new_order: &[TextSetId]) -> Result<()> {
        self.text_sets.reorder(new_order)
    }

    pub fn move_text_set(&mut self, id: &TextSetId, target: usize) -> bool {
        self.text_sets.move_to(id, target)
    }

    /// Moves `id` to position 0, making it the base.
    pub fn make_base(&mut self, id: &TextSetId) -> bool {
        self.move_text_set(id, 0)
    }

    pub fn rename_text_set(&mut self, id: &TextSetId, new_name: &str) -> bool {
        self.text_sets.rename(id, new_name)
    }

    /// Empties the text sets and the selection together.
    pub fn clear(&mut self) {
        self.text_sets.clear();
        self.selected.clear();
    }

    /// Adds or removes `id` from the selection. Unknown ids are ignored so
    /// the selection never points outside the group. Returns whether the
    /// selection changed.
    pub fn set_selected(&mut self, id: &TextSetId, included: bool) -> bool {
        if !included {
            return self.selected.remove(id);
        }
        if !self.text_sets.contains(id) {
            return false;
        }
        self.selected.insert(id.clone())
    }

    /// Flips the selection of `id`. Returns the new state, `None` if unknown.
    pub fn toggle_selected(&mut self, id: &TextSetId) -> Option<bool> {
        if !self.text_sets.contains(id) {
            return None;
        }
        let included = !self.selected.contains(id);
        self.set_selected(id, included);
        Some(included)
    }

    pub fn select_all(&mut self) {
        self.selected = self.text_sets.ids().iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }
}
