//! Group store behaviour across groups, selections and snapshot restore.

use textdiff_core::store::DEFAULT_GROUP_NAME;
use textdiff_core::{
    DiffCache, DiffOptions, DiffSegment, Error, GroupId, GroupStore, Source, TextSet, TextSetId,
};

#[test]
fn starts_with_one_active_default_group() {
    let store = GroupStore::new();
    assert_eq!(store.len(), 1);
    assert_eq!(store.active().name(), DEFAULT_GROUP_NAME);
    assert_eq!(store.active_id(), store.groups()[0].id());
}

#[test]
fn last_group_cannot_be_removed() {
    let mut store = GroupStore::new();
    let only = store.active_id().clone();
    assert!(!store.remove_group(&only));
    assert_eq!(store.len(), 1);
    assert_eq!(store.active_id(), &only);
}

#[test]
fn new_groups_are_numbered_and_become_active() {
    let mut store = GroupStore::new();
    let second = store.add_group();
    assert_eq!(store.active_id(), &second);
    assert_eq!(store.active().name(), "Group 2");
    store.add_group();
    assert_eq!(store.active().name(), "Group 3");
}

#[test]
fn removing_active_group_activates_first_remaining() {
    let mut store = GroupStore::new();
    let first = store.active_id().clone();
    let second = store.add_group();
    let third = store.add_group();

    assert!(store.set_active(&second));
    assert!(store.remove_group(&second));
    assert_eq!(store.active_id(), &first);

    assert!(store.set_active(&third));
    assert!(store.remove_group(&first));
    assert_eq!(store.active_id(), &third);
    assert_eq!(store.len(), 1);
}

#[test]
fn removing_inactive_group_keeps_active() {
    let mut store = GroupStore::new();
    let first = store.active_id().clone();
    let second = store.add_group();
    assert!(store.remove_group(&first));
    assert_eq!(store.active_id(), &second);
    assert!(!store.remove_group(&GroupId::from("ghost")));
}

#[test]
fn unknown_active_id_is_ignored() {
    let mut store = GroupStore::new();
    let before = store.active_id().clone();
    assert!(!store.set_active(&GroupId::from("ghost")));
    assert_eq!(store.active_id(), &before);
}

#[test]
fn blank_group_rename_is_ignored() {
    let mut store = GroupStore::new();
    let id = store.active_id().clone();
    assert!(!store.rename_group(&id, "   "));
    assert_eq!(store.active().name(), DEFAULT_GROUP_NAME);
    assert!(store.rename_group(&id, "  Interviews "));
    assert_eq!(store.active().name(), "Interviews");
}

#[test]
fn selection_stays_within_group_under_any_removal_order() {
    let mut store = GroupStore::new();
    let group_id = store.active_id().clone();
    let ids: Vec<TextSetId> = (0..5)
        .map(|n| store.active_mut().add_text_set(format!("t{n}"), format!("text {n}"), Source::Manual))
        .collect();
    for id in &ids {
        assert!(store.select_set(&group_id, id, true));
    }

    for id in [&ids[3], &ids[0], &ids[4], &ids[1], &ids[2]] {
        store.active_mut().remove_text_set(id);
        let group = store.active();
        for selected in group.selected_ids() {
            assert!(group.text_sets().contains(&selected));
        }
        assert!(!group.is_selected(id));
    }
    assert_eq!(store.active().selected_count(), 0);
}

#[test]
fn groups_are_compared_independently() {
    let mut store = GroupStore::new();
    let first = store.active_id().clone();
    store.active_mut().add_text_set("A", "the cat sat", Source::Manual);
    store.add_group();
    store.active_mut().add_text_set("B", "the dog sat", Source::Manual);

    assert_eq!(store.active().text_sets().len(), 1);
    assert_eq!(store.get(&first).unwrap().text_sets().len(), 1);
}

#[test]
fn cat_and_dog_end_to_end() {
    let mut store = GroupStore::new();
    let group_id = store.active_id().clone();
    let a = store.active_mut().add_text_set("A", "the cat sat", Source::Manual);
    let b = store.active_mut().add_text_set("B", "the dog sat", Source::Manual);
    store.select_set(&group_id, &a, true);
    store.select_set(&group_id, &b, true);

    let mut cache = DiffCache::default();
    let cmp = cache.compare(store.active(), DiffOptions::default()).unwrap();
    assert_eq!(cmp.base.id(), &a);
    assert_eq!(cmp.candidates.len(), 1);
    assert_eq!(
        &cmp.candidates[0].segments[..],
        [
            DiffSegment::equal("the"),
            DiffSegment::delete("cat"),
            DiffSegment::insert("dog"),
            DiffSegment::equal("sat"),
        ]
    );
    assert_eq!(cmp.candidates[0].summary.equal, 2);
}

#[test]
fn transcribed_text_sets_join_like_manual_ones() {
    let mut store = GroupStore::new();
    let text_set = TextSet::new("clip.wav", "hello there", Source::Transcribed);
    let id = text_set.id().clone();
    assert!(store.active_mut().push_text_set(text_set.clone()));
    assert!(!store.active_mut().push_text_set(text_set));
    assert_eq!(store.active().text_sets().get(&id).unwrap().source(), Source::Transcribed);
}

#[test]
fn snapshot_restore_is_exact() {
    let mut store = GroupStore::new();
    let group_id = store.active_id().clone();
    let a = store.active_mut().add_text_set("A", "one two", Source::Manual);
    let b = store.active_mut().add_text_set("B", "one three", Source::Transcribed);
    store.active_mut().make_base(&b);
    store.select_set(&group_id, &a, true);
    store.add_group();
    store.active_mut().add_text_set("C", "four", Source::Manual);
    store.set_active(&group_id);

    let mut restored = GroupStore::new();
    restored.restore(store.snapshot()).unwrap();
    assert_eq!(restored, store);

    let mut imported = GroupStore::new();
    imported.import_json(&store.export_json().unwrap()).unwrap();
    // The JSON export carries no active group, so the first one is active.
    assert_eq!(imported.active_id(), &group_id);
    assert_eq!(imported.groups(), store.groups());
}

#[test]
fn failed_import_leaves_state_untouched() {
    let mut store = GroupStore::new();
    store.active_mut().add_text_set("A", "kept", Source::Manual);
    let before = store.clone();

    for payload in [
        "not json",
        r#"{"id": "g"}"#,
        "[]",
        r#"[{"id": "g", "name": "x", "textSets": [], "selectedSets": []},
            {"id": "g", "name": "y", "textSets": [], "selectedSets": []}]"#,
        r#"[{"id": "g", "name": "x", "selectedSets": [], "textSets": [
            {"id": "t", "name": "a", "content": "c", "source": "manual", "timestamp": "2024-01-01T00:00:00Z"},
            {"id": "t", "name": "b", "content": "d", "source": "manual", "timestamp": "2024-01-01T00:00:00Z"}]}]"#,
    ] {
        let err = store.import_json(payload).unwrap_err();
        assert!(matches!(err, Error::MalformedSnapshot(_)), "{payload}: {err:?}");
        assert_eq!(store, before);
    }
}

#[test]
fn restore_repairs_active_and_selection() {
    let payload = r#"[
        {"id": "g1", "name": "One", "selectedSets": ["t1", "missing"], "textSets": [
            {"id": "t1", "name": "a", "content": "x", "source": "manual", "timestamp": "2024-01-01T00:00:00Z"}]},
        {"id": "g2", "name": "Two", "selectedSets": [], "textSets": []}
    ]"#;
    let mut snapshot = textdiff_core::Snapshot::from_json(payload).unwrap();
    snapshot.active_group_id = Some("gone".to_owned());

    let mut store = GroupStore::new();
    store.restore(snapshot).unwrap();
    assert_eq!(store.active_id().as_str(), "g1");
    assert_eq!(store.active().selected_ids(), [TextSetId::from("t1")]);
}

#[test]
fn reorder_must_be_a_permutation() {
    let mut store = GroupStore::new();
    let group = store.active_mut();
    let a = group.add_text_set("A", "a", Source::Manual);
    let b = group.add_text_set("B", "b", Source::Manual);

    assert!(matches!(group.reorder_text_sets(&[a.clone()]), Err(Error::InvalidReorder)));
    assert!(matches!(group.reorder_text_sets(&[a.clone(), a.clone()]), Err(Error::InvalidReorder)));
    group.reorder_text_sets(&[b.clone(), a.clone()]).unwrap();
    assert_eq!(group.base().unwrap().id(), &b);
}
