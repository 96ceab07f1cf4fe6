use playground_core::{
    format_percent, AppViewModel, InputType, OutputView, PanelView, PluginGroup, Region,
    SelectionMode, Slot,
};

use super::constants::*;
use super::layout::Layout;
use super::surface::{Surface, SurfaceError};

/// One mutation of the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SetText { id: String, text: String },
    SetValue { id: String, value: String },
    SetAttribute { id: String, name: &'static str, value: String },
    SetHidden { id: String, hidden: bool },
    SetEnabled { id: String, enabled: bool },
    SetClass { id: String, class: &'static str, on: bool },
}

pub fn apply(surface: &mut dyn Surface, commands: &[UiCommand]) -> Result<(), SurfaceError> {
    for command in commands {
        match command {
            UiCommand::SetText { id, text } => surface.set_text(id, text)?,
            UiCommand::SetValue { id, value } => surface.set_value(id, value)?,
            UiCommand::SetAttribute { id, name, value } => surface.set_attribute(id, name, value)?,
            UiCommand::SetHidden { id, hidden } => surface.set_hidden(id, *hidden)?,
            UiCommand::SetEnabled { id, enabled } => surface.set_enabled(id, *enabled)?,
            UiCommand::SetClass { id, class, on } => surface.set_class(id, class, *on)?,
        }
    }
    Ok(())
}

pub fn render(layout: &Layout, view: &AppViewModel) -> Vec<UiCommand> {
    let mut cmds = Commands::default();

    cmds.hidden(BUSY_INDICATOR, !view.busy);
    for panel in &view.panels {
        render_panel(&mut cmds, panel, view.input_closable);
    }

    render_input(&mut cmds, view);
    render_output(&mut cmds, view);
    render_config(&mut cmds, layout, view);
    render_info(&mut cmds, layout, view);

    cmds.hidden(COPY_FEEDBACK, !view.feedback_visible);
    cmds.hidden(ALERT_MODAL, view.alert.is_none());
    cmds.text(ALERT_MESSAGE, view.alert.clone().unwrap_or_default());

    cmds.0
}

#[derive(Default)]
struct Commands(Vec<UiCommand>);

impl Commands {
    fn text(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.0.push(UiCommand::SetText {
            id: id.into(),
            text: text.into(),
        });
    }

    fn value(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.push(UiCommand::SetValue {
            id: id.into(),
            value: value.into(),
        });
    }

    fn attribute(&mut self, id: impl Into<String>, name: &'static str, value: impl Into<String>) {
        self.0.push(UiCommand::SetAttribute {
            id: id.into(),
            name,
            value: value.into(),
        });
    }

    fn checked(&mut self, id: impl Into<String>, checked: bool) {
        self.attribute(id, ATTR_CHECKED, checked.to_string());
    }

    fn hidden(&mut self, id: impl Into<String>, hidden: bool) {
        self.0.push(UiCommand::SetHidden {
            id: id.into(),
            hidden,
        });
    }

    fn enabled(&mut self, id: impl Into<String>, enabled: bool) {
        self.0.push(UiCommand::SetEnabled {
            id: id.into(),
            enabled,
        });
    }

    fn class(&mut self, id: impl Into<String>, class: &'static str, on: bool) {
        self.0.push(UiCommand::SetClass {
            id: id.into(),
            class,
            on,
        });
    }
}

fn render_panel(cmds: &mut Commands, panel: &PanelView, input_closable: bool) {
    let region = panel.region;
    let open = panel.is_open();
    cmds.hidden(section(region), !panel.revealed);
    cmds.class(section(region), CLASS_OPEN, open);
    cmds.class(section(region), CLASS_HALF, panel.is_half_width());
    cmds.hidden(content(region), !open);

    cmds.hidden(open_button(region), open);
    cmds.enabled(open_button(region), panel.enabled);
    cmds.hidden(close_button(region), !open);
    let closable = region != Region::Input || input_closable;
    cmds.enabled(close_button(region), panel.enabled && closable);
}

fn render_slot_actions(cmds: &mut Commands, slot: Slot, enabled: bool) {
    cmds.enabled(copy_button(slot), enabled);
    cmds.enabled(download_button(slot), enabled);
    cmds.enabled(window_button(slot), enabled);
}

fn blob_src(url: &Option<playground_core::BlobUrl>) -> String {
    url.as_ref().map(|url| url.to_string()).unwrap_or_default()
}

fn render_input(cmds: &mut Commands, view: &AppViewModel) {
    for input_type in InputType::ALL {
        let selected = view.input_type == input_type;
        cmds.checked(input_type_radio(input_type), selected);
        cmds.hidden(input_source(input_type), !selected);
    }
    cmds.value(INPUT_XML, view.input_text.clone());
    cmds.attribute(INPUT_IMAGE, ATTR_SRC, blob_src(&view.input_preview));
    render_slot_actions(cmds, Slot::Input, view.input_actions_enabled && !view.busy);
}

fn render_output(cmds: &mut Commands, view: &AppViewModel) {
    for output in OutputView::ALL {
        let selected = view.output_view == output;
        cmds.checked(output_type_radio(output), selected);
        cmds.hidden(output_view(output), !selected);
    }
    cmds.value(OUTPUT_XML, view.output_text.clone());
    cmds.attribute(OUTPUT_IMAGE, ATTR_SRC, blob_src(&view.output_preview));
    render_slot_actions(cmds, Slot::Output, view.output_actions_enabled);
}

fn render_config(cmds: &mut Commands, layout: &Layout, view: &AppViewModel) {
    for mode in [SelectionMode::Defaults, SelectionMode::ExplicitList] {
        cmds.checked(mode_radio(mode), view.selection_mode == mode);
    }

    for index in 0..layout.plugin_rows {
        match view.plugins.get(index) {
            Some(row) => {
                cmds.hidden(plugin_row(index), false);
                cmds.attribute(plugin_row(index), ATTR_PLUGIN, row.name);
                cmds.attribute(plugin_checkbox(index), ATTR_PLUGIN, row.name);
                cmds.checked(plugin_checkbox(index), row.checked);
                cmds.text(plugin_label(index), row.name);
                for (group, class) in [
                    (PluginGroup::Default, "plugin-default"),
                    (PluginGroup::Optional, "plugin-optional"),
                    (PluginGroup::List, "plugin-list"),
                ] {
                    cmds.class(plugin_row(index), class, row.group == group);
                }
            }
            None => cmds.hidden(plugin_row(index), true),
        }
    }

    cmds.value(MAX_PASSES, view.max_passes.clone());
    cmds.value(INDENT, view.indent.clone());
    cmds.text(COMMAND_LINE, view.command_line.clone());
}

fn render_info(cmds: &mut Commands, layout: &Layout, view: &AppViewModel) {
    let fields = [
        INFO_INPUT_SIZE,
        INFO_OUTPUT_SIZE,
        INFO_BYTES_SAVED,
        INFO_COMPRESSION,
        INFO_TIME,
        INFO_PARSE_TIME,
        INFO_PASSES,
    ];
    match &view.stats {
        Some(stats) => {
            let values = [
                &stats.input_size,
                &stats.output_size,
                &stats.bytes_saved,
                &stats.compression,
                &stats.time,
                &stats.parse_time,
                &stats.passes,
            ];
            for (id, value) in fields.into_iter().zip(values) {
                cmds.text(id, value.clone());
            }
        }
        None => {
            for id in fields {
                cmds.text(id, "");
            }
        }
    }

    for index in 0..layout.time_rows {
        match view.plugin_times.get(index) {
            Some(row) => {
                cmds.hidden(time_row(index), false);
                cmds.text(time_name(index), row.name.clone());
                cmds.text(time_millis(index), row.millis.to_string());
                cmds.attribute(
                    time_bar(index),
                    "style",
                    format!("width: {:.1}%", row.bar_width_pct),
                );
                cmds.text(time_share(index), format_percent(row.share));
            }
            None => cmds.hidden(time_row(index), true),
        }
    }
}
