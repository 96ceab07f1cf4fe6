//! Console front end: one user gesture per line.

use std::convert::Infallible;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use playground_core::{CopyTarget, InputType, OutputView, Region, SelectionMode, Slot};
use thiserror::Error;

use super::ui::constants::*;
use super::ui::events::{EventKind, UiEvent};
use super::ui::layout::Layout;
use super::ui::surface::{Surface, SurfaceError};

/// Commands whose argument is free text, kept verbatim apart from escapes.
const TEXT_COMMANDS: [&str; 2] = ["paste", "edit"];

/// One console line. The first word names the command.
#[derive(Parser, Debug)]
#[command(
    multicall = true,
    about = "svgo-ll playground console",
    after_help = "text arguments accept \\n for a line break"
)]
struct ConsoleLine {
    #[command(subcommand)]
    command: ConsoleCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Open a region (input, output, info, info-plugin-times, config)
    Open { region: Region },
    /// Close a region
    Close { region: Region },
    /// Choose the input source (file, image, url, xml)
    InputType { input_type: InputType },
    /// Choose the output view (image, xml)
    OutputType { view: OutputView },
    /// Switch plugin selection mode
    Mode { mode: ModeChoice },
    /// Tick or untick a plugin
    Toggle { plugin: String },
    /// Set the maximum pass count; empty clears it
    Passes {
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },
    /// Set the pretty-print indent; empty disables it
    Indent {
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },
    /// Copy a text to the clipboard
    Copy { target: CopyChoice },
    /// Save a document (input, output)
    Download { slot: Slot },
    /// Open a document in a new window
    Window { slot: Slot },
    /// Read the input from a file
    Load { path: PathBuf },
    /// Fetch the input from a url
    Url { url: String },
    /// Drop a url onto the input
    Drop { url: String },
    /// Paste text into the input
    Paste {
        #[arg(allow_hyphen_values = true, value_parser = unescaped)]
        text: Option<String>,
    },
    /// Replace the input text as if typed
    Edit {
        #[arg(allow_hyphen_values = true, value_parser = unescaped)]
        text: Option<String>,
    },
    /// Close the alert
    Dismiss,
    /// Print the element tree
    Show,
    /// Leave the playground
    #[command(visible_alias = "exit")]
    Quit,
    /// Rendered help text.
    #[command(skip)]
    Help(String),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    Defaults,
    List,
}

impl From<ModeChoice> for SelectionMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Defaults => SelectionMode::Defaults,
            ModeChoice::List => SelectionMode::ExplicitList,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyChoice {
    Input,
    Output,
    Config,
}

impl From<CopyChoice> for CopyTarget {
    fn from(choice: CopyChoice) -> Self {
        match choice {
            CopyChoice::Input => CopyTarget::Slot(Slot::Input),
            CopyChoice::Output => CopyTarget::Slot(Slot::Output),
            CopyChoice::Config => CopyTarget::Config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Usage(String),
    #[error("no plugin named {0:?}")]
    UnknownPlugin(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Parse one console line. Blank lines and `#` comments yield `None`.
///
/// Every command takes at most one argument: the rest of the line. A missing
/// text argument means empty text.
pub fn parse(line: &str) -> Result<Option<ConsoleCommand>, ConsoleError> {
    let line = line.trim_start();
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_end_matches(['\r', '\n'])),
        None => (line.trim_end(), ""),
    };
    let rest = if TEXT_COMMANDS.contains(&word) {
        rest
    } else {
        rest.trim()
    };

    let mut argv = vec![word];
    if !rest.is_empty() {
        argv.push(rest);
    }
    match ConsoleLine::try_parse_from(argv) {
        Ok(parsed) => Ok(Some(parsed.command)),
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            Ok(Some(ConsoleCommand::Help(err.render().to_string())))
        }
        Err(err) => Err(ConsoleError::Usage(err.render().to_string().trim_end().to_string())),
    }
}

fn unescaped(text: &str) -> Result<String, Infallible> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    Ok(out)
}

/// Perform the gesture on the surface the way a user would: tick the radio
/// or checkbox, fill in the field, then fire the resulting event.
/// `Show`, `Help` and `Quit` are not gestures and yield `None`.
pub fn perform(
    command: &ConsoleCommand,
    surface: &mut dyn Surface,
    layout: &Layout,
) -> Result<Option<UiEvent>, ConsoleError> {
    let event = match command {
        ConsoleCommand::Open { region } => UiEvent::new(open_button(*region), EventKind::Click),
        ConsoleCommand::Close { region } => UiEvent::new(close_button(*region), EventKind::Click),
        ConsoleCommand::InputType { input_type } => {
            let ids: Vec<_> = InputType::ALL.into_iter().map(input_type_radio).collect();
            select_radio(surface, &ids, &input_type_radio(*input_type))?
        }
        ConsoleCommand::OutputType { view } => {
            let ids: Vec<_> = OutputView::ALL.into_iter().map(output_type_radio).collect();
            select_radio(surface, &ids, &output_type_radio(*view))?
        }
        ConsoleCommand::Mode { mode } => {
            let ids = [MODE_DEFAULTS.to_string(), MODE_LIST.to_string()];
            select_radio(surface, &ids, mode_radio((*mode).into()))?
        }
        ConsoleCommand::Toggle { plugin: name } => {
            let checkbox = (0..layout.plugin_rows)
                .map(plugin_checkbox)
                .find(|id| {
                    surface
                        .attribute(id, ATTR_PLUGIN)
                        .ok()
                        .flatten()
                        .is_some_and(|plugin| plugin == *name)
                })
                .ok_or_else(|| ConsoleError::UnknownPlugin(name.clone()))?;
            if !surface.is_enabled(&checkbox)? {
                return Ok(None);
            }
            let checked = surface.attribute(&checkbox, ATTR_CHECKED)?.as_deref() == Some("true");
            surface.set_attribute(&checkbox, ATTR_CHECKED, &(!checked).to_string())?;
            UiEvent::new(checkbox, EventKind::Change)
        }
        ConsoleCommand::Passes { value } => {
            fill(surface, MAX_PASSES, value.as_deref().unwrap_or_default(), EventKind::Change)?
        }
        ConsoleCommand::Indent { value } => {
            fill(surface, INDENT, value.as_deref().unwrap_or_default(), EventKind::Change)?
        }
        ConsoleCommand::Copy { target } => match CopyTarget::from(*target) {
            CopyTarget::Config => UiEvent::new(CONFIG_COPY, EventKind::Click),
            CopyTarget::Slot(slot) => UiEvent::new(copy_button(slot), EventKind::Click),
        },
        ConsoleCommand::Download { slot } => {
            UiEvent::new(download_button(*slot), EventKind::Click)
        }
        ConsoleCommand::Window { slot } => UiEvent::new(window_button(*slot), EventKind::Click),
        ConsoleCommand::Load { path } => fill(
            surface,
            INPUT_FILE_CONTROL,
            &path.display().to_string(),
            EventKind::Change,
        )?,
        ConsoleCommand::Url { url } => fill(surface, INPUT_URL_CONTROL, url, EventKind::Change)?,
        ConsoleCommand::Drop { url } => {
            UiEvent::new(input_source(InputType::Url), EventKind::Drop(url.clone()))
        }
        ConsoleCommand::Paste { text } => UiEvent::new(
            INPUT_XML,
            EventKind::Paste(text.clone().unwrap_or_default()),
        ),
        ConsoleCommand::Edit { text } => fill(
            surface,
            INPUT_XML,
            text.as_deref().unwrap_or_default(),
            EventKind::Input,
        )?,
        ConsoleCommand::Dismiss => UiEvent::new(ALERT_CLOSE, EventKind::Click),
        ConsoleCommand::Show | ConsoleCommand::Help(_) | ConsoleCommand::Quit => return Ok(None),
    };
    Ok(Some(event))
}

fn select_radio(
    surface: &mut dyn Surface,
    group: &[String],
    selected: &str,
) -> Result<UiEvent, ConsoleError> {
    for id in group {
        surface.set_attribute(id, ATTR_CHECKED, &(id == selected).to_string())?;
    }
    Ok(UiEvent::new(selected, EventKind::Change))
}

fn fill(
    surface: &mut dyn Surface,
    id: &str,
    value: &str,
    kind: EventKind,
) -> Result<UiEvent, ConsoleError> {
    if surface.is_enabled(id)? {
        surface.set_value(id, value)?;
    }
    Ok(UiEvent::new(id, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ui::layout;
    use crate::platform::ui::surface::ElementTree;
    use playground_core::PluginRegistry;

    #[test]
    fn parses_region_and_slot_arguments() {
        assert_eq!(
            parse("open info-plugin-times").unwrap(),
            Some(ConsoleCommand::Open {
                region: Region::PluginTimes
            })
        );
        assert_eq!(
            parse("copy config").unwrap(),
            Some(ConsoleCommand::Copy {
                target: CopyChoice::Config
            })
        );
        assert_eq!(
            parse("window output").unwrap(),
            Some(ConsoleCommand::Window { slot: Slot::Output })
        );
        assert_eq!(
            parse("mode list").unwrap(),
            Some(ConsoleCommand::Mode {
                mode: ModeChoice::List
            })
        );
        assert_eq!(parse("exit").unwrap(), Some(ConsoleCommand::Quit));
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("# setup").unwrap(), None);
    }

    #[test]
    fn text_arguments_keep_spacing_and_unescape() {
        assert_eq!(
            parse("paste <svg>\\n  <g/>\\n</svg>").unwrap(),
            Some(ConsoleCommand::Paste {
                text: Some("<svg>\n  <g/>\n</svg>".into())
            })
        );
        assert_eq!(
            parse("indent").unwrap(),
            Some(ConsoleCommand::Indent { value: None })
        );
        assert_eq!(
            parse("passes -1").unwrap(),
            Some(ConsoleCommand::Passes {
                value: Some("-1".into())
            })
        );
        assert_eq!(
            parse("load /tmp/my drawing.svg").unwrap(),
            Some(ConsoleCommand::Load {
                path: PathBuf::from("/tmp/my drawing.svg")
            })
        );
    }

    #[test]
    fn bad_input_is_reported() {
        for line in ["frobnicate", "open", "open sidebar", "mode sometimes"] {
            assert!(
                matches!(parse(line), Err(ConsoleError::Usage(_))),
                "{line}"
            );
        }
        let ConsoleError::Usage(message) = parse("open sidebar").unwrap_err() else {
            panic!("expected a usage error");
        };
        assert!(message.contains("sidebar"), "{message}");
    }

    #[test]
    fn help_lists_commands() {
        let Some(ConsoleCommand::Help(text)) = parse("help").unwrap() else {
            panic!("expected help");
        };
        assert!(text.contains("paste"), "{text}");
        assert!(text.contains("input-type"), "{text}");

        let Some(ConsoleCommand::Help(text)) = parse("open --help").unwrap() else {
            panic!("expected help");
        };
        assert!(text.contains("<REGION>"), "{text}");
    }

    #[test]
    fn toggle_flips_the_named_checkbox() {
        let mut tree = ElementTree::new();
        let layout = layout::build(&mut tree, &PluginRegistry::new(&["a", "b"], &[])).unwrap();
        tree.set_attribute(&plugin_checkbox(1), ATTR_PLUGIN, "b").unwrap();

        let toggle = |name: &str| ConsoleCommand::Toggle {
            plugin: name.into(),
        };
        let event = perform(&toggle("b"), &mut tree, &layout).unwrap();

        assert_eq!(event, Some(UiEvent::new(plugin_checkbox(1), EventKind::Change)));
        assert_eq!(
            tree.attribute(&plugin_checkbox(1), ATTR_CHECKED).unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            perform(&toggle("zzz"), &mut tree, &layout).unwrap_err(),
            ConsoleError::UnknownPlugin("zzz".into())
        );
    }

    #[test]
    fn radio_selection_is_exclusive() {
        let mut tree = ElementTree::new();
        let layout = layout::build(&mut tree, &PluginRegistry::default()).unwrap();

        let command = ConsoleCommand::InputType {
            input_type: InputType::Url,
        };
        perform(&command, &mut tree, &layout).unwrap();

        for input_type in InputType::ALL {
            let checked = tree
                .attribute(&input_type_radio(input_type), ATTR_CHECKED)
                .unwrap();
            assert_eq!(
                checked.as_deref() == Some("true"),
                input_type == InputType::Url
            );
        }
    }
}
