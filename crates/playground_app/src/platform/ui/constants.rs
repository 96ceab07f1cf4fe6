use playground_core::{InputType, OutputView, Region, SelectionMode, Slot};

pub const APP_ROOT: &str = "playground";
pub const BUSY_INDICATOR: &str = "busy-indicator";

pub const INPUT_XML: &str = "input-xml";
pub const INPUT_FILE_CONTROL: &str = "input-file-control";
pub const INPUT_URL_CONTROL: &str = "input-url-control";
pub const INPUT_IMAGE: &str = "input-image";
pub const OUTPUT_XML: &str = "output-xml";
pub const OUTPUT_IMAGE: &str = "output-image";
pub const COPY_FEEDBACK: &str = "copy-feedback";
pub const CONFIG_COPY: &str = "config-copy";

pub const MODE_DEFAULTS: &str = "mode-defaults";
pub const MODE_LIST: &str = "mode-list";
pub const LIST_PLUGINS: &str = "list-plugins";
pub const MAX_PASSES: &str = "max-passes";
pub const INDENT: &str = "indent";
pub const COMMAND_LINE: &str = "command-line";

pub const INFO_INPUT_SIZE: &str = "info-input-size";
pub const INFO_OUTPUT_SIZE: &str = "info-output-size";
pub const INFO_BYTES_SAVED: &str = "info-bytes-saved";
pub const INFO_COMPRESSION: &str = "info-compression";
pub const INFO_TIME: &str = "info-time";
pub const INFO_PARSE_TIME: &str = "info-parse-time";
pub const INFO_PASSES: &str = "info-passes";
pub const LIST_PLUGIN_TIMES: &str = "list-plugin-times";

pub const ALERT_MODAL: &str = "alert-modal";
pub const ALERT_MESSAGE: &str = "alert-message";
pub const ALERT_CLOSE: &str = "alert-close";

pub const CLASS_HALF: &str = "half";
pub const CLASS_OPEN: &str = "open";
pub const ATTR_CHECKED: &str = "checked";
pub const ATTR_PLUGIN: &str = "data-plugin";
pub const ATTR_SRC: &str = "src";

pub fn section(region: Region) -> String {
    region.id().to_string()
}

pub fn content(region: Region) -> String {
    format!("{}-content", region.id())
}

pub fn open_button(region: Region) -> String {
    format!("{}-open", region.id())
}

pub fn close_button(region: Region) -> String {
    format!("{}-close", region.id())
}

pub fn input_type_radio(input_type: InputType) -> String {
    format!("input-type-{}", input_type.id())
}

/// Sub-panel holding the controls for one input source.
pub fn input_source(input_type: InputType) -> String {
    format!("input-source-{}", input_type.id())
}

pub fn output_type_radio(view: OutputView) -> String {
    format!("output-type-{}", view.id())
}

pub fn output_view(view: OutputView) -> String {
    format!("output-view-{}", view.id())
}

pub fn mode_radio(mode: SelectionMode) -> &'static str {
    match mode {
        SelectionMode::Defaults => MODE_DEFAULTS,
        SelectionMode::ExplicitList => MODE_LIST,
    }
}

pub fn copy_button(slot: Slot) -> String {
    format!("{}-copy", slot.id())
}

pub fn download_button(slot: Slot) -> String {
    format!("{}-download", slot.id())
}

pub fn window_button(slot: Slot) -> String {
    format!("{}-newwindow", slot.id())
}

pub fn plugin_row(index: usize) -> String {
    format!("plugin-row-{index}")
}

pub fn plugin_checkbox(index: usize) -> String {
    format!("plugin-check-{index}")
}

pub fn plugin_label(index: usize) -> String {
    format!("plugin-name-{index}")
}

pub fn time_row(index: usize) -> String {
    format!("plugin-time-row-{index}")
}

pub fn time_name(index: usize) -> String {
    format!("plugin-time-name-{index}")
}

pub fn time_millis(index: usize) -> String {
    format!("plugin-time-ms-{index}")
}

pub fn time_bar(index: usize) -> String {
    format!("plugin-time-bar-{index}")
}

pub fn time_share(index: usize) -> String {
    format!("plugin-time-share-{index}")
}
