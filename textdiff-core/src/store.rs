//! The group store: every group plus the active-group pointer.
//!
//! Invariants held across all public operations:
//! - at least one group exists;
//! - `active` names a group in `groups`.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::group::DiffGroup;
use crate::snapshot::{GroupRecord, Snapshot, TextSetRecord};
use crate::types::{GroupId, TextSet, TextSetId};

pub const DEFAULT_GROUP_NAME: &str = "Default Group";

#[derive(Debug, Clone, PartialEq)]
pub struct GroupStore {
    groups: Vec<DiffGroup>,
    active: GroupId,
}

impl Default for GroupStore {
    /// A single empty group named [`DEFAULT_GROUP_NAME`], active.
    fn default() -> Self {
        let group = DiffGroup::new(DEFAULT_GROUP_NAME);
        let active = group.id().clone();
        Self { groups: vec![group], active }
    }
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[DiffGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, id: &GroupId) -> Option<&DiffGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    pub fn get_mut(&mut self, id: &GroupId) -> Option<&mut DiffGroup> {
        self.groups.iter_mut().find(|g| g.id() == id)
    }

    pub fn position(&self, id: &GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id() == id)
    }

    pub fn active_id(&self) -> &GroupId {
        &self.active
    }

    pub fn active_index(&self) -> usize {
        self.position(&self.active).unwrap_or(0)
    }

    pub fn active(&self) -> &DiffGroup {
        &self.groups[self.active_index()]
    }

    pub fn active_mut(&mut self) -> &mut DiffGroup {
        let index = self.active_index();
        &mut self.groups[index]
    }

    /// Appends `"Group N"` (N = current count + 1) and makes it active.
    pub fn add_group(&mut self) -> GroupId {
        let group = DiffGroup::new(format!("Group {}", self.groups.len() + 1));
        let id = group.id().clone();
        tracing::info!(group_id = %id, name = group.name(), "group added");
        self.groups.push(group);
        self.active = id.clone();
        id
    }

    /// Deletes the group. Refused while it is the only one.
    ///
    /// If the active group goes away the first remaining group becomes
    /// active. Returns whether a group was removed.
    pub fn remove_group(&mut self, id: &GroupId) -> bool {
        if self.groups.len() <= 1 {
            tracing::debug!(group_id = %id, "refusing to remove the last group");
            return false;
        }
        let Some(index) = self.position(id) else {
            return false;
        };
        let removed = self.groups.remove(index);
        if &self.active == id {
            self.active = self.groups[0].id().clone();
        }
        tracing::info!(group_id = %id, name = removed.name(), "group removed");
        true
    }

    /// Renames the group. The name is trimmed; blank names are ignored.
    pub fn rename_group(&mut self, id: &GroupId, new_name: &str) -> bool {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(group) => {
                group.set_name(trimmed.to_owned());
                true
            }
            None => false,
        }
    }

    /// Points `active` at `id` if such a group exists; otherwise no-op.
    pub fn set_active(&mut self, id: &GroupId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active = id.clone();
        true
    }

    /// Adds or removes a text set from a group's selection.
    pub fn select_set(&mut self, group_id: &GroupId, text_set_id: &TextSetId, included: bool) -> bool {
        self.get_mut(group_id)
            .map(|g| g.set_selected(text_set_id, included))
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> Snapshot {
        let groups = self
            .groups
            .iter()
            .map(|group| GroupRecord {
                id: group.id().to_string(),
                name: group.name().to_owned(),
                text_sets: group
                    .text_sets()
                    .iter()
                    .map(|t| TextSetRecord {
                        id: t.id().to_string(),
                        name: t.name().to_owned(),
                        content: t.content().to_owned(),
                        source: t.source(),
                        timestamp: t.created_at(),
                    })
                    .collect(),
                selected_sets: group.selected_ids().iter().map(ToString::to_string).collect(),
            })
            .collect();
        Snapshot { groups, active_group_id: Some(self.active.to_string()) }
    }

    /// Replaces the whole state with `snapshot`. Ids are kept as given.
    ///
    /// The new state is built off to the side and swapped in only once
    /// complete, so on error the store is exactly as before. Selections that
    /// name text sets outside their group are dropped. A missing or unknown
    /// active id falls back to the first group.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedSnapshot`] if there are no groups, or group ids or
    /// text-set ids within a group repeat.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        if snapshot.groups.is_empty() {
            return Err(Error::MalformedSnapshot("snapshot contains no groups".to_owned()));
        }

        let mut seen_groups = HashSet::new();
        let mut groups = Vec::with_capacity(snapshot.groups.len());
        for record in snapshot.groups {
            if !seen_groups.insert(record.id.clone()) {
                return Err(Error::MalformedSnapshot(format!("duplicate group id {}", record.id)));
            }
            groups.push(build_group(record)?);
        }

        let active = snapshot
            .active_group_id
            .map(GroupId::from)
            .filter(|id| groups.iter().any(|g| g.id() == id))
            .unwrap_or_else(|| groups[0].id().clone());

        tracing::info!(groups = groups.len(), active_group_id = %active, "state restored");
        self.groups = groups;
        self.active = active;
        Ok(())
    }

    pub fn export_json(&self) -> Result<String> {
        self.snapshot().to_json()
    }

    /// Parses a JSON export and restores it. All or nothing.
    pub fn import_json(&mut self, payload: &str) -> Result<()> {
        let snapshot = Snapshot::from_json(payload)?;
        self.restore(snapshot)
    }
}

fn build_group(record: GroupRecord) -> Result<DiffGroup> {
    let mut group = DiffGroup::with_id(GroupId::from(record.id), record.name);
    for t in record.text_sets {
        let text_set = TextSet::from_parts(TextSetId::from(t.id), t.name, t.content, t.source, t.timestamp);
        let id = text_set.id().clone();
        if !group.push_text_set(text_set) {
            return Err(Error::MalformedSnapshot(format!(
                "duplicate text set id {id} in group {}",
                group.id()
            )));
        }
    }
    for id in record.selected_sets.into_iter().map(TextSetId::from) {
        if !group.text_sets().contains(&id) {
            tracing::warn!(group_id = %group.id(), text_set_id = %id, "dropping selection of unknown text set");
            continue;
        }
        group.set_selected(&id, true);
    }
    Ok(group)
}
