use playground_core::{PluginList, PluginRegistry, SelectionMode, SelectionState};

fn registry() -> PluginRegistry {
    PluginRegistry::new(&["a", "b", "c", "d", "e", "f"], &["b", "d"])
}

fn names(list: &PluginList) -> Vec<&'static str> {
    list.entries().iter().map(|entry| entry.name).collect()
}

fn assert_invariant(list: &PluginList) {
    let entries = list.entries();
    let prefix = entries.iter().take_while(|entry| entry.checked).count();
    assert!(
        entries[prefix..].iter().all(|entry| !entry.checked),
        "checked entries must form a prefix: {entries:?}"
    );
    let suffix: Vec<_> = entries[prefix..].iter().map(|entry| entry.name).collect();
    let mut sorted = suffix.clone();
    sorted.sort_unstable();
    assert_eq!(suffix, sorted, "unchecked suffix must stay sorted");
}

#[test]
fn checked_entries_keep_check_order() {
    let mut list = PluginList::from_registry(&registry());

    list.toggle("d", true);
    list.toggle("a", true);
    list.toggle("f", true);

    assert_eq!(names(&list), vec!["d", "a", "f", "b", "c", "e"]);
    assert_eq!(list.checked_names().collect::<Vec<_>>(), vec!["d", "a", "f"]);
    assert_invariant(&list);
}

#[test]
fn unchecked_entry_returns_to_sorted_position() {
    let mut list = PluginList::from_registry(&registry());
    list.toggle("d", true);
    list.toggle("a", true);
    list.toggle("f", true);

    list.toggle("a", false);

    assert_eq!(names(&list), vec!["d", "f", "a", "b", "c", "e"]);
    assert_invariant(&list);
}

#[test]
fn unchecking_the_greatest_name_appends_it() {
    let mut list = PluginList::from_registry(&registry());
    list.toggle("f", true);
    assert_eq!(names(&list), vec!["f", "a", "b", "c", "d", "e"]);

    list.toggle("f", false);

    assert_eq!(names(&list), vec!["a", "b", "c", "d", "e", "f"]);
}

#[test]
fn checking_the_last_unchecked_moves_it_to_the_end() {
    let mut list = PluginList::from_registry(&registry());
    for name in ["c", "a", "f", "b", "e"] {
        list.toggle(name, true);
    }
    assert_eq!(names(&list), vec!["c", "a", "f", "b", "e", "d"]);

    list.toggle("d", true);

    assert_eq!(names(&list), vec!["c", "a", "f", "b", "e", "d"]);
    assert_eq!(list.checked_names().count(), 6);
}

#[test]
fn unknown_plugin_is_rejected() {
    let mut list = PluginList::from_registry(&registry());
    assert!(!list.toggle("zzz", true));
    assert_eq!(names(&list), vec!["a", "b", "c", "d", "e", "f"]);
}

#[test]
fn invariant_holds_after_arbitrary_toggle_sequences() {
    let all = ["a", "b", "c", "d", "e", "f"];
    let mut list = PluginList::from_registry(&registry());
    let mut seed: u32 = 0x2545_f491;

    for _ in 0..500 {
        // xorshift keeps the sequence deterministic.
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let name = all[(seed % all.len() as u32) as usize];
        let checked = !list
            .entries()
            .iter()
            .any(|entry| entry.name == name && entry.checked);

        let before: Vec<_> = list.checked_names().collect();
        list.toggle(name, checked);
        let after: Vec<_> = list.checked_names().collect();

        let mut expected = before.clone();
        if checked {
            expected.push(name);
        } else {
            expected.retain(|other| *other != name);
        }
        assert_eq!(after, expected);
        assert_invariant(&list);
    }
}

#[test]
fn defaults_rows_list_defaults_then_optional() {
    let registry = registry();
    let selection = SelectionState::new(SelectionMode::Defaults, &registry);

    let rows: Vec<_> = selection
        .rows(&registry)
        .into_iter()
        .map(|(_, entry)| (entry.name, entry.checked))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("b", true),
            ("d", true),
            ("a", false),
            ("c", false),
            ("e", false),
            ("f", false),
        ]
    );
}

#[test]
fn switching_modes_discards_edits() {
    let registry = registry();
    let mut selection = SelectionState::new(SelectionMode::ExplicitList, &registry);
    selection.set_checked("c", true);

    let selection_defaults = SelectionState::new(SelectionMode::Defaults, &registry);
    assert!(!selection_defaults.is_checked("c"));

    selection = SelectionState::new(SelectionMode::ExplicitList, &registry);
    assert!(!selection.is_checked("c"));
    assert_eq!(selection.mode(), SelectionMode::ExplicitList);
}
