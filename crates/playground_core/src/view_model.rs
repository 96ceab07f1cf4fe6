use crate::plugin_list::{PluginGroup, SelectionMode};
use crate::stats::{format_percent, format_with_commas, plugin_time_rows, PluginTimeRow};
use crate::{AppState, BlobUrl, InputType, OutputView, PanelState, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelView {
    pub region: Region,
    /// Section shown at all.
    pub revealed: bool,
    pub state: PanelState,
    /// Interactive; false while an optimization runs.
    pub enabled: bool,
}

impl PanelView {
    pub fn is_open(&self) -> bool {
        self.state != PanelState::Closed
    }

    pub fn is_half_width(&self) -> bool {
        self.state == PanelState::OpenSplit
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRowView {
    pub name: &'static str,
    pub group: PluginGroup,
    pub checked: bool,
}

/// Formatted statistics, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub input_size: String,
    pub output_size: String,
    pub bytes_saved: String,
    pub compression: String,
    pub time: String,
    pub parse_time: String,
    pub passes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub input_text: String,
    pub output_text: String,
    pub input_type: InputType,
    pub output_view: OutputView,
    pub panels: Vec<PanelView>,
    pub split: bool,
    pub busy: bool,
    pub input_actions_enabled: bool,
    pub output_actions_enabled: bool,
    pub input_closable: bool,
    pub selection_mode: SelectionMode,
    pub plugins: Vec<PluginRowView>,
    pub max_passes: String,
    pub indent: String,
    pub command_line: String,
    pub stats: Option<StatsView>,
    pub plugin_times: Vec<PluginTimeRow>,
    pub input_preview: Option<BlobUrl>,
    pub output_preview: Option<BlobUrl>,
    pub alert: Option<String>,
    pub feedback_visible: bool,
    pub dirty: bool,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState, dirty: bool) -> Self {
        let panels = Region::ALL
            .into_iter()
            .map(|region| PanelView {
                region,
                revealed: state.panels.is_revealed(region),
                state: state.panels.state(region),
                enabled: state.region_enabled(region),
            })
            .collect();

        let plugins = state
            .selection
            .rows(&state.registry)
            .into_iter()
            .map(|(group, entry)| PluginRowView {
                name: entry.name,
                group,
                checked: entry.checked,
            })
            .collect();

        let stats = state.stats.as_ref().map(|stats| StatsView {
            input_size: format_with_commas(stats.input_size as i64),
            output_size: format_with_commas(stats.output_size as i64),
            bytes_saved: format_with_commas(stats.bytes_saved()),
            compression: format_percent(stats.compression()),
            time: stats.time_ms.to_string(),
            parse_time: or_unavailable(stats.parse_time_ms),
            passes: or_unavailable(stats.passes),
        });

        Self {
            input_text: state.input_text.clone(),
            output_text: state.output_text.clone().unwrap_or_default(),
            input_type: state.input_type,
            output_view: state.output_view,
            panels,
            split: state.panels.is_split(),
            busy: state.busy,
            input_actions_enabled: state.has_input(),
            output_actions_enabled: state.output_text.is_some() && !state.busy,
            input_closable: state.input_closable,
            selection_mode: state.selection.mode(),
            plugins,
            max_passes: state.max_passes.clone(),
            indent: state.indent.clone(),
            command_line: state.command_line.clone(),
            stats,
            plugin_times: plugin_time_rows(&state.plugin_times),
            input_preview: state.input_preview.clone(),
            output_preview: state.output_preview.clone(),
            alert: state.alert.clone(),
            feedback_visible: state.feedback_visible,
            dirty,
        }
    }

    pub fn panel(&self, region: Region) -> Option<&PanelView> {
        self.panels.iter().find(|panel| panel.region == region)
    }
}

/// Figures the optimizer did not report render as a dash.
fn or_unavailable(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}
