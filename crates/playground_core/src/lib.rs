//! Playground core: pure session controller and view-model helpers.
mod blob;
mod config;
mod effect;
mod msg;
mod panels;
mod plugin_list;
mod plugins;
mod state;
mod stats;
mod timing;
mod update;
mod view_model;

pub use blob::{BlobCache, BlobChange, BlobUrl, Slot, SVG_MIME};
pub use config::{
    command_args, derive_config, render_command_line, Js2Svg, OptimizationConfig, CLI_NAME,
    DEFAULT_INDENT, DEFAULT_MAX_PASSES,
};
pub use effect::Effect;
pub use msg::{CopyTarget, Msg, OptimizedDocument};
pub use panels::{PanelState, Panels, Region};
pub use plugin_list::{PluginEntry, PluginGroup, PluginList, SelectionMode, SelectionState};
pub use plugins::{PluginDescriptor, PluginRegistry};
pub use state::{AppState, InputType, OutputView};
pub use stats::{
    format_percent, format_with_commas, plugin_time_rows, OptimizationStats, PluginTimeRow,
};
pub use timing::{PluginPhase, PluginTimer, PluginTimes, ProgressEvent};
pub use update::update;
pub use view_model::{AppViewModel, PanelView, PluginRowView, StatsView};
