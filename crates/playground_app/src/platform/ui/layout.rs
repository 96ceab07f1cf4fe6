use playground_core::{InputType, OutputView, PluginRegistry, Region, SelectionMode, Slot};

use super::constants::*;
use super::surface::{Surface, SurfaceError};

/// How many repeated rows the layout created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub plugin_rows: usize,
    pub time_rows: usize,
}

/// Creates every element the renderer and event translation refer to.
pub fn build(surface: &mut dyn Surface, registry: &PluginRegistry) -> Result<Layout, SurfaceError> {
    let layout = Layout {
        plugin_rows: registry.builtins().len(),
        time_rows: registry.builtins().len(),
    };

    surface.create_element(None, "main", APP_ROOT, &[])?;
    surface.create_element(Some(APP_ROOT), "div", BUSY_INDICATOR, &[])?;
    surface.set_text(BUSY_INDICATOR, "Optimizing...")?;
    surface.set_hidden(BUSY_INDICATOR, true)?;

    for region in [Region::Input, Region::Output, Region::Info, Region::Config] {
        section_frame(surface, APP_ROOT, region)?;
    }
    // Plugin timings live inside the info panel.
    section_frame(surface, &content(Region::Info), Region::PluginTimes)?;

    input_section(surface)?;
    output_section(surface)?;
    info_section(surface, layout.time_rows)?;
    config_section(surface, registry)?;

    surface.create_element(Some(APP_ROOT), "div", COPY_FEEDBACK, &[])?;
    surface.set_text(COPY_FEEDBACK, "Copied")?;
    surface.set_hidden(COPY_FEEDBACK, true)?;

    surface.create_element(Some(APP_ROOT), "dialog", ALERT_MODAL, &[])?;
    surface.set_hidden(ALERT_MODAL, true)?;
    surface.create_element(Some(ALERT_MODAL), "p", ALERT_MESSAGE, &[])?;
    button(surface, ALERT_MODAL, ALERT_CLOSE, "Close")?;

    Ok(layout)
}

fn section_frame(surface: &mut dyn Surface, parent: &str, region: Region) -> Result<(), SurfaceError> {
    let id = section(region);
    surface.create_element(Some(parent), "section", &id, &[])?;
    button(surface, &id, &open_button(region), "Open")?;
    button(surface, &id, &close_button(region), "Close")?;
    surface.create_element(Some(&id), "div", &content(region), &[])
}

fn button(surface: &mut dyn Surface, parent: &str, id: &str, label: &str) -> Result<(), SurfaceError> {
    surface.create_element(Some(parent), "button", id, &[])?;
    surface.set_text(id, label)?;
    surface.listen(id, "click")
}

fn radio(
    surface: &mut dyn Surface,
    parent: &str,
    id: &str,
    group: &str,
    label: &str,
) -> Result<(), SurfaceError> {
    surface.create_element(
        Some(parent),
        "input",
        id,
        &[("type", "radio"), ("name", group), (ATTR_CHECKED, "false")],
    )?;
    surface.set_text(id, label)?;
    surface.listen(id, "change")
}

fn slot_actions(surface: &mut dyn Surface, parent: &str, slot: Slot) -> Result<(), SurfaceError> {
    button(surface, parent, &copy_button(slot), "Copy")?;
    button(surface, parent, &download_button(slot), "Download")?;
    button(surface, parent, &window_button(slot), "Open in new window")
}

fn input_section(surface: &mut dyn Surface) -> Result<(), SurfaceError> {
    let parent = content(Region::Input);
    for input_type in InputType::ALL {
        radio(
            surface,
            &parent,
            &input_type_radio(input_type),
            "input-type",
            input_type.id(),
        )?;
    }
    for input_type in InputType::ALL {
        surface.create_element(Some(&parent), "div", &input_source(input_type), &[])?;
    }

    let file_panel = input_source(InputType::File);
    surface.create_element(
        Some(&file_panel),
        "input",
        INPUT_FILE_CONTROL,
        &[("type", "file"), ("accept", ".svg")],
    )?;
    surface.listen(INPUT_FILE_CONTROL, "change")?;

    surface.create_element(
        Some(&input_source(InputType::Image)),
        "iframe",
        INPUT_IMAGE,
        &[(ATTR_SRC, "")],
    )?;

    let url_panel = input_source(InputType::Url);
    surface.listen(&url_panel, "drop")?;
    surface.create_element(Some(&url_panel), "input", INPUT_URL_CONTROL, &[("type", "url")])?;
    surface.listen(INPUT_URL_CONTROL, "change")?;
    surface.listen(INPUT_URL_CONTROL, "paste")?;

    surface.create_element(Some(&input_source(InputType::Xml)), "textarea", INPUT_XML, &[])?;
    for event in ["change", "input", "paste"] {
        surface.listen(INPUT_XML, event)?;
    }

    slot_actions(surface, &parent, Slot::Input)
}

fn output_section(surface: &mut dyn Surface) -> Result<(), SurfaceError> {
    let parent = content(Region::Output);
    for view in OutputView::ALL {
        radio(surface, &parent, &output_type_radio(view), "output-type", view.id())?;
    }
    for view in OutputView::ALL {
        surface.create_element(Some(&parent), "div", &output_view(view), &[])?;
    }
    surface.create_element(
        Some(&output_view(OutputView::Image)),
        "iframe",
        OUTPUT_IMAGE,
        &[(ATTR_SRC, "")],
    )?;
    surface.create_element(
        Some(&output_view(OutputView::Xml)),
        "textarea",
        OUTPUT_XML,
        &[("readonly", "true")],
    )?;
    slot_actions(surface, &parent, Slot::Output)
}

fn info_section(surface: &mut dyn Surface, time_rows: usize) -> Result<(), SurfaceError> {
    let parent = content(Region::Info);
    for id in [
        INFO_INPUT_SIZE,
        INFO_OUTPUT_SIZE,
        INFO_BYTES_SAVED,
        INFO_COMPRESSION,
        INFO_TIME,
        INFO_PARSE_TIME,
        INFO_PASSES,
    ] {
        surface.create_element(Some(&parent), "span", id, &[])?;
    }

    let times = content(Region::PluginTimes);
    surface.create_element(Some(&times), "table", LIST_PLUGIN_TIMES, &[])?;
    for index in 0..time_rows {
        let row = time_row(index);
        surface.create_element(Some(LIST_PLUGIN_TIMES), "tr", &row, &[])?;
        surface.set_hidden(&row, true)?;
        surface.create_element(Some(&row), "td", &time_name(index), &[])?;
        surface.create_element(Some(&row), "td", &time_millis(index), &[])?;
        surface.create_element(Some(&row), "div", &time_bar(index), &[("style", "width: 0%")])?;
        surface.create_element(Some(&row), "td", &time_share(index), &[])?;
    }
    Ok(())
}

fn config_section(surface: &mut dyn Surface, registry: &PluginRegistry) -> Result<(), SurfaceError> {
    let parent = content(Region::Config);
    radio(surface, &parent, MODE_DEFAULTS, "plugin-mode", "Default plugins")?;
    radio(surface, &parent, MODE_LIST, "plugin-mode", "Plugin list")?;
    surface.set_attribute(mode_radio(SelectionMode::default()), ATTR_CHECKED, "true")?;

    surface.create_element(Some(&parent), "div", LIST_PLUGINS, &[])?;
    for index in 0..registry.builtins().len() {
        let row = plugin_row(index);
        surface.create_element(Some(LIST_PLUGINS), "div", &row, &[(ATTR_PLUGIN, "")])?;
        surface.create_element(
            Some(&row),
            "input",
            &plugin_checkbox(index),
            &[("type", "checkbox"), (ATTR_CHECKED, "false"), (ATTR_PLUGIN, "")],
        )?;
        surface.listen(&plugin_checkbox(index), "change")?;
        surface.create_element(Some(&row), "label", &plugin_label(index), &[])?;
    }

    for id in [MAX_PASSES, INDENT] {
        surface.create_element(Some(&parent), "input", id, &[("type", "text")])?;
        surface.listen(id, "change")?;
    }
    surface.create_element(Some(&parent), "code", COMMAND_LINE, &[])?;
    button(surface, &parent, CONFIG_COPY, "Copy")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ui::surface::ElementTree;

    #[test]
    fn layout_creates_one_row_per_builtin() {
        let registry = PluginRegistry::new(&["a", "b", "c"], &["a"]);
        let mut tree = ElementTree::new();

        let layout = build(&mut tree, &registry).unwrap();

        assert_eq!(layout.plugin_rows, 3);
        assert!(tree.contains(&plugin_checkbox(2)));
        assert!(!tree.contains(&plugin_checkbox(3)));
        assert!(tree.contains(&time_share(2)));
    }

    #[test]
    fn every_region_has_open_and_close_controls() {
        let mut tree = ElementTree::new();
        build(&mut tree, &PluginRegistry::default()).unwrap();

        for region in Region::ALL {
            assert!(tree.is_listening(&open_button(region), "click").unwrap());
            assert!(tree.is_listening(&close_button(region), "click").unwrap());
            assert!(tree.contains(&content(region)));
        }
    }

    #[test]
    fn building_twice_collides() {
        let registry = PluginRegistry::default();
        let mut tree = ElementTree::new();
        build(&mut tree, &registry).unwrap();
        assert!(matches!(
            build(&mut tree, &registry),
            Err(SurfaceError::DuplicateId(_))
        ));
    }
}
