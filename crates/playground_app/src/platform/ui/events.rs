use std::path::PathBuf;

use playground_core::{CopyTarget, InputType, Msg, OutputView, Region, SelectionMode, Slot};

use super::constants::*;
use super::surface::{Surface, SurfaceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
    Input,
    /// Clipboard text pasted into the target.
    Paste(String),
    /// Link text dropped onto the target.
    Drop(String),
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Change => "change",
            EventKind::Input => "input",
            EventKind::Paste(_) => "paste",
            EventKind::Drop(_) => "drop",
        }
    }
}

/// An event fired at one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub target: String,
    pub kind: EventKind,
}

impl UiEvent {
    pub fn new(target: impl Into<String>, kind: EventKind) -> Self {
        Self {
            target: target.into(),
            kind,
        }
    }
}

/// Deliver `event` to its target: apply the element's default behavior
/// (a paste lands in the field) and translate it into a message when a
/// listener is registered. Disabled targets swallow the event.
pub fn deliver(surface: &mut dyn Surface, event: &UiEvent) -> Result<Option<Msg>, SurfaceError> {
    if !surface.is_enabled(&event.target)? {
        return Ok(None);
    }
    if let EventKind::Paste(text) = &event.kind {
        surface.set_value(&event.target, text)?;
    }
    if !surface.is_listening(&event.target, event.kind.name())? {
        return Ok(None);
    }
    to_msg(surface, event)
}

fn to_msg(surface: &dyn Surface, event: &UiEvent) -> Result<Option<Msg>, SurfaceError> {
    let target = event.target.as_str();
    let msg = match &event.kind {
        EventKind::Click => click_msg(target),
        EventKind::Change => change_msg(surface, target)?,
        EventKind::Input if target == INPUT_XML => Some(Msg::InputEdited(surface.value(target)?)),
        EventKind::Input => None,
        // Both paste targets re-read their field once the paste has landed.
        EventKind::Paste(_) if target == INPUT_XML => Some(Msg::InputEdited(surface.value(target)?)),
        EventKind::Paste(_) if target == INPUT_URL_CONTROL => {
            Some(Msg::UrlSubmitted(surface.value(target)?))
        }
        EventKind::Paste(_) => None,
        EventKind::Drop(url) if target == input_source(InputType::Url) => {
            Some(Msg::UrlSubmitted(url.clone()))
        }
        EventKind::Drop(_) => None,
    };
    Ok(msg)
}

fn click_msg(target: &str) -> Option<Msg> {
    if target == ALERT_CLOSE {
        return Some(Msg::AlertDismissed);
    }
    if target == CONFIG_COPY {
        return Some(Msg::CopyClicked(CopyTarget::Config));
    }
    for region in Region::ALL {
        if target == open_button(region) {
            return Some(Msg::PanelOpened(region));
        }
        if target == close_button(region) {
            return Some(Msg::PanelClosed(region));
        }
    }
    for slot in Slot::ALL {
        if target == copy_button(slot) {
            return Some(Msg::CopyClicked(CopyTarget::Slot(slot)));
        }
        if target == download_button(slot) {
            return Some(Msg::DownloadClicked(slot));
        }
        if target == window_button(slot) {
            return Some(Msg::NewWindowClicked(slot));
        }
    }
    None
}

fn is_checked(surface: &dyn Surface, id: &str) -> Result<bool, SurfaceError> {
    Ok(surface.attribute(id, ATTR_CHECKED)?.as_deref() == Some("true"))
}

fn change_msg(surface: &dyn Surface, target: &str) -> Result<Option<Msg>, SurfaceError> {
    let msg = match target {
        INPUT_XML => Some(Msg::InputEdited(surface.value(target)?)),
        INPUT_FILE_CONTROL => {
            let path = surface.value(target)?;
            (!path.trim().is_empty()).then(|| Msg::FileSelected(PathBuf::from(path.trim())))
        }
        INPUT_URL_CONTROL => Some(Msg::UrlSubmitted(surface.value(target)?)),
        MAX_PASSES => Some(Msg::MaxPassesChanged(surface.value(target)?)),
        INDENT => Some(Msg::IndentChanged(surface.value(target)?)),
        MODE_DEFAULTS | MODE_LIST => {
            let mode = if target == MODE_LIST {
                SelectionMode::ExplicitList
            } else {
                SelectionMode::Defaults
            };
            is_checked(surface, target)?.then_some(Msg::SelectionModeChanged(mode))
        }
        _ if target.starts_with("plugin-check-") => {
            match surface.attribute(target, ATTR_PLUGIN)? {
                Some(name) if !name.is_empty() => Some(Msg::PluginToggled {
                    name,
                    checked: is_checked(surface, target)?,
                }),
                _ => None,
            }
        }
        _ => radio_msg(surface, target)?,
    };
    Ok(msg)
}

fn radio_msg(surface: &dyn Surface, target: &str) -> Result<Option<Msg>, SurfaceError> {
    if let Some(input_type) = InputType::ALL
        .into_iter()
        .find(|input_type| target == input_type_radio(*input_type))
    {
        return Ok(is_checked(surface, target)?.then_some(Msg::InputTypeSelected(input_type)));
    }
    if let Some(view) = OutputView::ALL
        .into_iter()
        .find(|view| target == output_type_radio(*view))
    {
        return Ok(is_checked(surface, target)?.then_some(Msg::OutputViewSelected(view)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ui::layout;
    use crate::platform::ui::surface::ElementTree;
    use playground_core::PluginRegistry;

    fn tree() -> ElementTree {
        let mut tree = ElementTree::new();
        layout::build(&mut tree, &PluginRegistry::new(&["a", "b"], &["a"])).unwrap();
        tree
    }

    #[test]
    fn clicks_map_to_panel_and_slot_actions() {
        let mut tree = tree();
        let msg = deliver(&mut tree, &UiEvent::new(open_button(Region::Info), EventKind::Click));
        assert_eq!(msg, Ok(Some(Msg::PanelOpened(Region::Info))));

        let msg = deliver(&mut tree, &UiEvent::new(download_button(Slot::Output), EventKind::Click));
        assert_eq!(msg, Ok(Some(Msg::DownloadClicked(Slot::Output))));
    }

    #[test]
    fn disabled_targets_swallow_events() {
        let mut tree = tree();
        tree.set_enabled(&copy_button(Slot::Input), false).unwrap();
        let msg = deliver(&mut tree, &UiEvent::new(copy_button(Slot::Input), EventKind::Click));
        assert_eq!(msg, Ok(None));
    }

    #[test]
    fn paste_lands_in_the_field_before_reading() {
        let mut tree = tree();
        let msg = deliver(
            &mut tree,
            &UiEvent::new(INPUT_XML, EventKind::Paste("<svg/>".into())),
        );
        assert_eq!(msg, Ok(Some(Msg::InputEdited("<svg/>".into()))));
        assert_eq!(tree.value(INPUT_XML).unwrap(), "<svg/>");
    }

    #[test]
    fn plugin_checkbox_reports_its_plugin() {
        let mut tree = tree();
        let checkbox = plugin_checkbox(1);
        tree.set_attribute(&checkbox, ATTR_PLUGIN, "b").unwrap();
        tree.set_attribute(&checkbox, ATTR_CHECKED, "true").unwrap();

        let msg = deliver(&mut tree, &UiEvent::new(checkbox, EventKind::Change));
        assert_eq!(
            msg,
            Ok(Some(Msg::PluginToggled {
                name: "b".into(),
                checked: true
            }))
        );
    }

    #[test]
    fn unchecked_radio_is_ignored() {
        let mut tree = tree();
        let radio = input_type_radio(InputType::Url);
        assert_eq!(deliver(&mut tree, &UiEvent::new(radio.clone(), EventKind::Change)), Ok(None));

        tree.set_attribute(&radio, ATTR_CHECKED, "true").unwrap();
        assert_eq!(
            deliver(&mut tree, &UiEvent::new(radio, EventKind::Change)),
            Ok(Some(Msg::InputTypeSelected(InputType::Url)))
        );
    }

    #[test]
    fn dropped_link_is_submitted() {
        let mut tree = tree();
        let msg = deliver(
            &mut tree,
            &UiEvent::new(
                input_source(InputType::Url),
                EventKind::Drop("https://example.com/a.svg".into()),
            ),
        );
        assert_eq!(
            msg,
            Ok(Some(Msg::UrlSubmitted("https://example.com/a.svg".into())))
        );
    }

    #[test]
    fn unknown_target_is_an_error() {
        let mut tree = tree();
        assert_eq!(
            deliver(&mut tree, &UiEvent::new("nowhere", EventKind::Click)),
            Err(SurfaceError::ElementNotFound("nowhere".into()))
        );
    }
}
