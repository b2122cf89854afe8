//! Ordered storage of the text sets belonging to one group.
//!
//! Records live in a map keyed by id; display order is a separate vector of
//! ids. Position 0 of that vector is the group's base. Nothing else records
//! which text set is the base, so order and base can never disagree.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::types::{Source, TextSet, TextSetId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSetStore {
    records: HashMap<TextSetId, TextSet>,
    order: Vec<TextSetId>,
}

impl TextSetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &TextSetId) -> bool {
        self.records.contains_key(id)
    }

    pub fn get(&self, id: &TextSetId) -> Option<&TextSet> {
        self.records.get(id)
    }

    /// Position of `id` in display order.
    pub fn position(&self, id: &TextSetId) -> Option<usize> {
        self.order.iter().position(|x| x == id)
    }

    /// Text set at `index` in display order.
    pub fn at(&self, index: usize) -> Option<&TextSet> {
        self.order.get(index).and_then(|id| self.records.get(id))
    }

    /// Ids in display order.
    pub fn ids(&self) -> &[TextSetId] {
        &self.order
    }

    /// Text sets in display order.
    pub fn iter(&self) -> impl Iterator<Item = &TextSet> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// The comparison base: whatever sits at position 0.
    pub fn base(&self) -> Option<&TextSet> {
        self.at(0)
    }

    /// Appends a new text set and returns its id. Always succeeds.
    pub fn add(&mut self, name: impl Into<String>, content: impl Into<String>, source: Source) -> TextSetId {
        let content: String = content.into();
        let text_set = TextSet::new(name, content, source);
        let id = text_set.id().clone();
        self.push(text_set);
        id
    }

    /// Appends an existing text set. Returns `false` (and changes nothing) if
    /// its id is already present.
    pub fn push(&mut self, text_set: TextSet) -> bool {
        if self.records.contains_key(text_set.id()) {
            return false;
        }
        self.order.push(text_set.id().clone());
        self.records.insert(text_set.id().clone(), text_set);
        true
    }

    /// Removes and returns the text set with `id`; `None` if absent.
    pub(crate) fn remove(&mut self, id: &TextSetId) -> Option<TextSet> {
        let removed = self.records.remove(id)?;
        self.order.retain(|x| x != id);
        Some(removed)
    }

    /// Replaces the display order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReorder`] unless `new_order` holds every current
    /// id exactly once and nothing else. The store is untouched on error.
    pub fn reorder(&mut self, new_order: &[TextSetId]) -> Result<()> {
        if new_order.len() != self.order.len() {
            return Err(Error::InvalidReorder);
        }
        let mut seen = HashSet::with_capacity(new_order.len());
        for id in new_order {
            if !self.records.contains_key(id) || !seen.insert(id) {
                return Err(Error::InvalidReorder);
            }
        }
        self.order = new_order.to_vec();
        Ok(())
    }

    /// Moves `id` to `target` (clamped to the last position), shifting the
    /// items in between. Returns `false` if `id` is unknown.
    pub fn move_to(&mut self, id: &TextSetId, target: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let mut new_order = self.order.clone();
        let moved = new_order.remove(from);
        new_order.insert(target.min(new_order.len()), moved);
        self.reorder(&new_order).is_ok()
    }

    /// Renames `id`. The name is trimmed; a blank name or an unknown id is a
    /// no-op. Returns whether anything changed.
    pub fn rename(&mut self, id: &TextSetId, new_name: &str) -> bool {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.records.get_mut(id) {
            Some(text_set) => {
                text_set.set_name(trimmed.to_owned());
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(names: &[&str]) -> (TextSetStore, Vec<TextSetId>) {
        let mut store = TextSetStore::new();
        let ids = names.iter().map(|n| store.add(*n, format!("{n} content"), Source::Manual)).collect();
        (store, ids)
    }

    fn names(store: &TextSetStore) -> Vec<&str> {
        store.iter().map(TextSet::name).collect()
    }

    #[test]
    fn add_appends_with_unique_ids() {
        let (store, ids) = store_of(&["a", "b", "c"]);
        assert_eq!(names(&store), ["a", "b", "c"]);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(store.base().map(TextSet::name), Some("a"));
    }

    #[test]
    fn reorder_changes_base() {
        let (mut store, ids) = store_of(&["a", "b", "c"]);
        store.reorder(&[ids[2].clone(), ids[0].clone(), ids[1].clone()]).unwrap();
        assert_eq!(names(&store), ["c", "a", "b"]);
        assert_eq!(store.base().map(TextSet::name), Some("c"));
    }

    #[test]
    fn reorder_rejects_non_permutations() {
        let (mut store, ids) = store_of(&["a", "b"]);
        let dup = [ids[0].clone(), ids[0].clone()];
        let short = [ids[0].clone()];
        let foreign = [ids[0].clone(), TextSetId::from("nope")];
        for bad in [&dup[..], &short[..], &foreign[..]] {
            assert!(matches!(store.reorder(bad), Err(Error::InvalidReorder)));
        }
        assert_eq!(names(&store), ["a", "b"]);
    }

    #[test]
    fn move_to_has_splice_semantics() {
        let (mut store, ids) = store_of(&["a", "b", "c", "d"]);
        assert!(store.move_to(&ids[3], 1));
        assert_eq!(names(&store), ["a", "d", "b", "c"]);
        assert!(store.move_to(&ids[0], 99));
        assert_eq!(names(&store), ["d", "b", "c", "a"]);
        assert!(!store.move_to(&TextSetId::from("missing"), 0));
    }

    #[test]
    fn rename_trims_and_ignores_blank() {
        let (mut store, ids) = store_of(&["a"]);
        assert!(store.rename(&ids[0], "  renamed "));
        assert_eq!(store.get(&ids[0]).unwrap().name(), "renamed");
        assert!(!store.rename(&ids[0], "   "));
        assert!(!store.rename(&TextSetId::from("missing"), "x"));
        assert_eq!(store.get(&ids[0]).unwrap().name(), "renamed");
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let (mut store, ids) = store_of(&["a", "b"]);
        assert!(store.remove(&TextSetId::from("missing")).is_none());
        assert_eq!(store.remove(&ids[0]).map(|t| t.name().to_owned()), Some("a".to_owned()));
        assert_eq!(names(&store), ["b"]);
    }

    #[test]
    fn push_rejects_duplicate_id() {
        let (mut store, ids) = store_of(&["a"]);
        let dup = store.get(&ids[0]).unwrap().clone();
        assert!(!store.push(dup));
        assert_eq!(store.len(), 1);
    }
}
