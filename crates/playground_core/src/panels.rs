use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use playground_logging::pg_debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Input,
    Output,
    Info,
    PluginTimes,
    Config,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Input,
        Region::Output,
        Region::Info,
        Region::PluginTimes,
        Region::Config,
    ];

    /// Element id prefix of the region's section.
    pub fn id(self) -> &'static str {
        match self {
            Region::Input => "input",
            Region::Output => "output",
            Region::Info => "info",
            Region::PluginTimes => "info-plugin-times",
            Region::Config => "config",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.id() == s)
            .ok_or_else(|| format!("unknown region {s:?}"))
    }
}

/// Observable state of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
    OpenSplit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Section {
    /// Whether the section is shown at all; sections stay shown once opened.
    revealed: bool,
    open: bool,
}

/// Open/closed state of every region. Split view is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels {
    sections: BTreeMap<Region, Section>,
}

impl Default for Panels {
    fn default() -> Self {
        let mut sections: BTreeMap<Region, Section> =
            Region::ALL.into_iter().map(|r| (r, Section::default())).collect();
        sections.insert(
            Region::Input,
            Section {
                revealed: true,
                open: true,
            },
        );
        for region in [Region::Config, Region::PluginTimes] {
            sections.insert(
                region,
                Section {
                    revealed: true,
                    open: false,
                },
            );
        }
        Self { sections }
    }
}

impl Panels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, region: Region) {
        self.set_open(region, true);
    }

    pub fn close(&mut self, region: Region) {
        self.set_open(region, false);
    }

    pub fn set_open(&mut self, region: Region, open: bool) {
        let section = self.sections.entry(region).or_default();
        if section.open == open {
            return;
        }
        section.open = open;
        if open {
            section.revealed = true;
        }
        pg_debug!(
            "Panel {} -> {} (split={})",
            region,
            if open { "open" } else { "closed" },
            self.is_split()
        );
    }

    pub fn is_open(&self, region: Region) -> bool {
        self.sections
            .get(&region)
            .is_some_and(|section| section.revealed && section.open)
    }

    pub fn is_revealed(&self, region: Region) -> bool {
        self.sections
            .get(&region)
            .is_some_and(|section| section.revealed)
    }

    /// Input and output side by side, at half width each.
    pub fn is_split(&self) -> bool {
        self.is_open(Region::Input) && self.is_open(Region::Output)
    }

    pub fn state(&self, region: Region) -> PanelState {
        if !self.is_open(region) {
            PanelState::Closed
        } else if matches!(region, Region::Input | Region::Output) && self.is_split() {
            PanelState::OpenSplit
        } else {
            PanelState::Open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_ids_round_trip_through_from_str() {
        for region in Region::ALL {
            assert_eq!(region.id().parse::<Region>(), Ok(region));
        }
        assert!("sidebar".parse::<Region>().is_err());
    }

    #[test]
    fn initial_layout_has_only_input_open() {
        let panels = Panels::new();
        assert_eq!(panels.state(Region::Input), PanelState::Open);
        assert!(!panels.is_revealed(Region::Output));
        assert!(!panels.is_revealed(Region::Info));
        assert!(panels.is_revealed(Region::Config));
        assert!(!panels.is_split());
    }

    #[test]
    fn closing_keeps_section_revealed() {
        let mut panels = Panels::new();
        panels.open(Region::Info);
        panels.close(Region::Info);
        assert!(panels.is_revealed(Region::Info));
        assert_eq!(panels.state(Region::Info), PanelState::Closed);
    }
}
