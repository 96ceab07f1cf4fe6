use std::collections::BTreeMap;

use crate::plugins::PluginRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Run the default pipeline, minus disabled defaults, plus enabled extras.
    #[default]
    Defaults,
    /// Run only the checked plugins, in list order.
    ExplicitList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginGroup {
    Default,
    Optional,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginEntry {
    pub name: &'static str,
    pub checked: bool,
}

/// Ordered, checkable plugin list used in explicit-list mode.
///
/// Checked entries form a prefix in the order they were checked; the
/// unchecked suffix stays sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluginList {
    entries: Vec<PluginEntry>,
}

impl PluginList {
    /// All builtins, unchecked, in registry order.
    pub fn from_registry(registry: &PluginRegistry) -> Self {
        let entries = registry
            .builtins()
            .iter()
            .map(|plugin| PluginEntry {
                name: plugin.name,
                checked: false,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[PluginEntry] {
        &self.entries
    }

    pub fn checked_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.checked)
            .map(|entry| entry.name)
    }

    /// Records the new checked state of `name` and relocates its entry.
    ///
    /// Returns `false` when the name is not in the list.
    pub fn toggle(&mut self, name: &str, checked: bool) -> bool {
        let Some(from) = self.entries.iter().position(|entry| entry.name == name) else {
            return false;
        };
        let mut entry = self.entries.remove(from);
        entry.checked = checked;

        let insert_at = if checked {
            self.entries.iter().position(|other| !other.checked)
        } else {
            self.entries
                .iter()
                .position(|other| !other.checked && other.name > entry.name)
        }
        .unwrap_or(self.entries.len());

        self.entries.insert(insert_at, entry);
        true
    }
}

/// Plugin selection, one independent selection space per mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Defaults(BTreeMap<&'static str, bool>),
    ExplicitList(PluginList),
}

impl SelectionState {
    /// Fresh selection for `mode`; edits made in the other mode are not carried.
    pub fn new(mode: SelectionMode, registry: &PluginRegistry) -> Self {
        match mode {
            SelectionMode::Defaults => Self::Defaults(
                registry
                    .builtins()
                    .iter()
                    .map(|plugin| (plugin.name, plugin.is_default))
                    .collect(),
            ),
            SelectionMode::ExplicitList => Self::ExplicitList(PluginList::from_registry(registry)),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Defaults(_) => SelectionMode::Defaults,
            Self::ExplicitList(_) => SelectionMode::ExplicitList,
        }
    }

    pub fn is_checked(&self, name: &str) -> bool {
        match self {
            Self::Defaults(checked) => checked.get(name).copied().unwrap_or(false),
            Self::ExplicitList(list) => list
                .entries()
                .iter()
                .any(|entry| entry.name == name && entry.checked),
        }
    }

    /// Applies a checkbox change. Returns `false` for unknown plugins.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        match self {
            Self::Defaults(map) => match map.get_mut(name) {
                Some(flag) => {
                    *flag = checked;
                    true
                }
                None => false,
            },
            Self::ExplicitList(list) => list.toggle(name, checked),
        }
    }

    /// Rows in rendered order: defaults then optional builtins, or the list.
    pub fn rows(&self, registry: &PluginRegistry) -> Vec<(PluginGroup, PluginEntry)> {
        match self {
            Self::Defaults(_) => registry
                .default_names()
                .map(|name| (PluginGroup::Default, name))
                .chain(
                    registry
                        .optional_names()
                        .map(|name| (PluginGroup::Optional, name)),
                )
                .map(|(group, name)| {
                    (
                        group,
                        PluginEntry {
                            name,
                            checked: self.is_checked(name),
                        },
                    )
                })
                .collect(),
            Self::ExplicitList(list) => list
                .entries()
                .iter()
                .map(|entry| (PluginGroup::List, *entry))
                .collect(),
        }
    }
}
