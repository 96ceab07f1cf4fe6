use playground_logging::pg_warn;
use serde::Serialize;

use crate::plugin_list::SelectionState;
use crate::plugins::PluginRegistry;

/// Pass count the optimizer uses when none is given.
pub const DEFAULT_MAX_PASSES: i64 = 10;
/// Indent the optimizer uses for `--pretty` when none is given.
pub const DEFAULT_INDENT: &str = "4";
/// Program name shown at the start of the rendered command line.
pub const CLI_NAME: &str = "svgo-ll";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Js2Svg {
    pub pretty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<String>,
}

/// Configuration handed to the optimizer.
///
/// `plugin_names` is only set in explicit-list mode, `disable`/`enable` only
/// in defaults mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_passes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js2svg: Option<Js2Svg>,
}

impl OptimizationConfig {
    /// JSON in the shape the optimizer's config file uses.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Derives the optimizer configuration from the current UI selections.
pub fn derive_config(
    selection: &SelectionState,
    registry: &PluginRegistry,
    pass_count: &str,
    indent: &str,
) -> OptimizationConfig {
    let mut config = OptimizationConfig::default();

    match selection {
        SelectionState::Defaults(_) => {
            let disabled: Vec<String> = registry
                .default_names()
                .filter(|name| !selection.is_checked(name))
                .map(str::to_string)
                .collect();
            if !disabled.is_empty() {
                config.disable = Some(disabled);
            }

            let enabled: Vec<String> = registry
                .optional_names()
                .filter(|name| selection.is_checked(name))
                .map(str::to_string)
                .collect();
            if !enabled.is_empty() {
                config.enable = Some(enabled);
            }
        }
        SelectionState::ExplicitList(list) => {
            config.plugin_names = Some(list.checked_names().map(str::to_string).collect());
        }
    }

    config.max_passes = parse_max_passes(pass_count);

    config.js2svg = match indent {
        "" => None,
        DEFAULT_INDENT => Some(Js2Svg {
            pretty: true,
            indent: None,
        }),
        other => Some(Js2Svg {
            pretty: true,
            indent: Some(other.to_string()),
        }),
    };

    config
}

fn parse_max_passes(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(DEFAULT_MAX_PASSES) => None,
        Ok(value) => Some(value),
        Err(err) => {
            pg_warn!("Ignoring max passes {:?}: {}", raw, err);
            None
        }
    }
}

/// Command arguments (without the program name) equivalent to `config`.
pub fn command_args(config: &OptimizationConfig) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(names) = &config.plugin_names {
        args.push("--plugins".to_string());
        args.extend(names.iter().cloned());
    }
    if let Some(names) = &config.disable {
        args.push("--disable".to_string());
        args.extend(names.iter().cloned());
    }
    if let Some(names) = &config.enable {
        args.push("--enable".to_string());
        args.extend(names.iter().cloned());
    }
    if let Some(passes) = config.max_passes {
        args.push("--max-passes".to_string());
        args.push(passes.to_string());
    }
    if let Some(js2svg) = &config.js2svg {
        if js2svg.pretty {
            args.push("--pretty".to_string());
            if let Some(indent) = &js2svg.indent {
                args.push("--indent".to_string());
                args.push(indent.clone());
            }
        }
    }

    args
}

/// Human-readable command invocation for `config`.
pub fn render_command_line(config: &OptimizationConfig) -> String {
    std::iter::once(CLI_NAME.to_string())
        .chain(command_args(config))
        .collect::<Vec<_>>()
        .join(" ")
}
