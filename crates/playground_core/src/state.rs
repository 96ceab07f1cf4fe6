use std::fmt;
use std::str::FromStr;

use playground_logging::pg_debug;

use crate::blob::{BlobChange, BlobCache, BlobUrl, Slot};
use crate::config::{derive_config, render_command_line, OptimizationConfig, DEFAULT_MAX_PASSES};
use crate::effect::Effect;
use crate::panels::{Panels, Region};
use crate::plugin_list::{SelectionMode, SelectionState};
use crate::plugins::PluginRegistry;
use crate::stats::OptimizationStats;
use crate::timing::PluginTimes;
use crate::view_model::AppViewModel;

/// Where input text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    File,
    Image,
    Url,
    #[default]
    Xml,
}

impl InputType {
    pub const ALL: [InputType; 4] = [InputType::File, InputType::Image, InputType::Url, InputType::Xml];

    pub fn id(self) -> &'static str {
        match self {
            InputType::File => "file",
            InputType::Image => "image",
            InputType::Url => "url",
            InputType::Xml => "xml",
        }
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputType::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| format!("unknown input type {s:?}"))
    }
}

/// How the output is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputView {
    #[default]
    Image,
    Xml,
}

impl OutputView {
    pub const ALL: [OutputView; 2] = [OutputView::Image, OutputView::Xml];

    pub fn id(self) -> &'static str {
        match self {
            OutputView::Image => "image",
            OutputView::Xml => "xml",
        }
    }
}

impl FromStr for OutputView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputView::ALL
            .into_iter()
            .find(|view| view.id() == s)
            .ok_or_else(|| format!("unknown output view {s:?}"))
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for OutputView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Single owned session state, mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) registry: PluginRegistry,
    pub(crate) selection: SelectionState,
    pub(crate) max_passes: String,
    pub(crate) indent: String,
    pub(crate) command_line: String,
    pub(crate) input_text: String,
    pub(crate) output_text: Option<String>,
    pub(crate) blobs: BlobCache,
    /// Last rendered previews. They outlive their blob handles until a
    /// successful run replaces them.
    pub(crate) input_preview: Option<BlobUrl>,
    pub(crate) output_preview: Option<BlobUrl>,
    pub(crate) panels: Panels,
    pub(crate) plugin_times: PluginTimes,
    pub(crate) stats: Option<OptimizationStats>,
    pub(crate) input_type: InputType,
    pub(crate) output_view: OutputView,
    pub(crate) busy: bool,
    pub(crate) rerun_pending: bool,
    pub(crate) input_closable: bool,
    pub(crate) alert: Option<String>,
    pub(crate) feedback_visible: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_registry(PluginRegistry::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: PluginRegistry) -> Self {
        let selection = SelectionState::new(SelectionMode::Defaults, &registry);
        let mut state = Self {
            registry,
            selection,
            max_passes: DEFAULT_MAX_PASSES.to_string(),
            indent: String::new(),
            command_line: String::new(),
            input_text: String::new(),
            output_text: None,
            blobs: BlobCache::new(),
            input_preview: None,
            output_preview: None,
            panels: Panels::new(),
            plugin_times: PluginTimes::new(),
            stats: None,
            input_type: InputType::default(),
            output_view: OutputView::default(),
            busy: false,
            rerun_pending: false,
            input_closable: false,
            alert: None,
            feedback_visible: false,
            dirty: false,
        };
        state.command_line = render_command_line(&state.config());
        state
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self, self.dirty)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn output_text(&self) -> Option<&str> {
        self.output_text.as_deref()
    }

    pub fn blob_url(&self, slot: Slot) -> Option<&BlobUrl> {
        self.blobs.get(slot)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn stats(&self) -> Option<&OptimizationStats> {
        self.stats.as_ref()
    }

    pub fn plugin_times(&self) -> &PluginTimes {
        &self.plugin_times
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn has_input(&self) -> bool {
        !self.input_text.trim().is_empty()
    }

    /// Configuration derived from the current selections.
    pub fn config(&self) -> OptimizationConfig {
        derive_config(&self.selection, &self.registry, &self.max_passes, &self.indent)
    }

    pub(crate) fn slot_text(&self, slot: Slot) -> &str {
        match slot {
            Slot::Input => &self.input_text,
            Slot::Output => self.output_text.as_deref().unwrap_or(""),
        }
    }

    pub(crate) fn refresh_command_line(&mut self) {
        self.command_line = render_command_line(&self.config());
        pg_debug!("Command line: {}", self.command_line);
        self.mark_dirty();
    }

    /// Handle for `slot`, created over the slot's current text when absent.
    pub(crate) fn blob_for(&mut self, slot: Slot, effects: &mut Vec<Effect>) -> BlobUrl {
        let text = self.slot_text(slot).to_string();
        let (url, change) = self.blobs.get_or_create(slot, &text);
        effects.extend(change.map(Effect::from));
        url
    }

    pub(crate) fn invalidate_blob(&mut self, slot: Slot, effects: &mut Vec<Effect>) {
        if let Some(change) = self.blobs.invalidate(slot) {
            if let BlobChange::Revoked { url } = &change {
                pg_debug!("Revoking {} blob {}", slot, url);
            }
            effects.push(change.into());
        }
    }

    pub(crate) fn region_enabled(&self, region: Region) -> bool {
        !(self.busy && matches!(region, Region::Input | Region::Output | Region::Info))
    }
}
