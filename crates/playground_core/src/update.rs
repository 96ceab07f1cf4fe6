use playground_logging::{pg_debug, pg_info, pg_warn};

use crate::msg::{CopyTarget, OptimizedDocument};
use crate::stats::OptimizationStats;
use crate::{AppState, Effect, Msg, PluginTimes, Region, SelectionState, Slot};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    match msg {
        Msg::InputEdited(text) => accept_input(&mut state, text, &mut effects),
        Msg::FileSelected(path) => effects.push(Effect::ReadFile { path }),
        Msg::FileLoaded { text } => accept_input(&mut state, text, &mut effects),
        Msg::FileReadFailed { path } => {
            show_alert(&mut state, format!("Unable to read {}.", path.display()));
        }
        Msg::UrlSubmitted(raw) => match url::Url::parse(raw.trim()) {
            Ok(url) => {
                pg_info!("Fetching input from {}", url);
                effects.push(Effect::FetchUrl {
                    url: url.to_string(),
                });
            }
            Err(err) => show_alert(&mut state, err.to_string()),
        },
        Msg::UrlFetched { url, text } => {
            pg_debug!("Fetched {} bytes from {}", text.len(), url);
            accept_input(&mut state, text, &mut effects);
        }
        Msg::UrlFetchFailed { url } => {
            // Cross-origin failures carry no usable detail.
            show_alert(&mut state, format!("Unable to retrieve {url}."));
        }
        Msg::InputTypeSelected(input_type) => {
            state.input_type = input_type;
            state.panels.open(Region::Input);
            state.mark_dirty();
        }
        Msg::OutputViewSelected(view) => {
            state.output_view = view;
            state.panels.open(Region::Output);
            state.mark_dirty();
        }
        Msg::PanelOpened(region) => {
            if state.region_enabled(region) {
                state.panels.open(region);
                state.mark_dirty();
            }
        }
        Msg::PanelClosed(region) => {
            let closable = region != Region::Input || state.input_closable;
            if closable && state.region_enabled(region) {
                state.panels.close(region);
                state.mark_dirty();
            }
        }
        Msg::SelectionModeChanged(mode) => {
            if state.selection.mode() != mode {
                state.selection = SelectionState::new(mode, &state.registry);
                pg_debug!("Plugin selection mode -> {:?}", mode);
            }
            config_changed(&mut state, &mut effects);
        }
        Msg::PluginToggled { name, checked } => {
            if state.selection.set_checked(&name, checked) {
                config_changed(&mut state, &mut effects);
            } else {
                pg_warn!("Ignoring toggle of unknown plugin {:?}", name);
            }
        }
        Msg::MaxPassesChanged(value) => {
            state.max_passes = value;
            config_changed(&mut state, &mut effects);
        }
        Msg::IndentChanged(value) => {
            state.indent = value;
            config_changed(&mut state, &mut effects);
        }
        Msg::CopyClicked(target) => {
            let text = match target {
                CopyTarget::Config => state.command_line.clone(),
                CopyTarget::Slot(slot) => state.slot_text(slot).to_string(),
            };
            if !text.is_empty() {
                effects.push(Effect::CopyToClipboard { text });
                effects.push(Effect::ShowFeedback);
                state.feedback_visible = true;
                state.mark_dirty();
            }
        }
        Msg::DownloadClicked(slot) => {
            if slot_actions_enabled(&state, slot) {
                let url = state.blob_for(slot, &mut effects);
                effects.push(Effect::Download {
                    url,
                    file_name: slot.file_name(),
                });
            }
        }
        Msg::NewWindowClicked(slot) => {
            if slot_actions_enabled(&state, slot) {
                let url = state.blob_for(slot, &mut effects);
                effects.push(Effect::OpenWindow { url });
            }
        }
        Msg::FeedbackElapsed => {
            if state.feedback_visible {
                state.feedback_visible = false;
                state.mark_dirty();
            }
        }
        Msg::AlertDismissed => {
            if state.alert.take().is_some() {
                state.mark_dirty();
            }
        }
        Msg::OptimizationFinished {
            result,
            plugin_times,
        } => finish_optimization(&mut state, result, plugin_times, &mut effects),
        Msg::SessionEnded => {
            effects.extend(state.blobs.drain().into_iter().map(Effect::from));
            state.input_preview = None;
            state.output_preview = None;
        }
    }

    (state, effects)
}

/// New input from any acquisition path.
fn accept_input(state: &mut AppState, text: String, effects: &mut Vec<Effect>) {
    state.input_text = text;
    for slot in Slot::ALL {
        state.invalidate_blob(slot, effects);
    }
    state.panels.close(Region::Info);
    state.mark_dirty();

    start_optimization(state, effects);
}

fn config_changed(state: &mut AppState, effects: &mut Vec<Effect>) {
    state.refresh_command_line();
    start_optimization(state, effects);
}

/// Any trigger during a run makes the in-flight result stale, even when the
/// input has since gone blank.
fn start_optimization(state: &mut AppState, effects: &mut Vec<Effect>) {
    if state.busy {
        pg_debug!("Optimization in flight; queueing a re-run");
        state.rerun_pending = true;
        return;
    }
    if !state.has_input() {
        return;
    }

    state.busy = true;
    state.invalidate_blob(Slot::Output, effects);
    state.mark_dirty();

    let config = state.config();
    pg_debug!("Starting optimization with {}", config.to_json());
    effects.push(Effect::Optimize {
        input: state.input_text.clone(),
        config,
    });
}

fn finish_optimization(
    state: &mut AppState,
    result: Result<OptimizedDocument, String>,
    plugin_times: PluginTimes,
    effects: &mut Vec<Effect>,
) {
    if !state.busy {
        pg_warn!("Optimization result arrived with no run in flight; ignored");
        return;
    }
    state.busy = false;
    state.mark_dirty();

    if std::mem::take(&mut state.rerun_pending) {
        pg_debug!("Discarding stale optimization result");
        start_optimization(state, effects);
        return;
    }

    let document = match result {
        Ok(document) => document,
        Err(message) => {
            pg_warn!("Optimization failed: {}", message);
            show_alert(state, message);
            return;
        }
    };

    state.stats = Some(OptimizationStats::new(
        &state.input_text,
        &document.data,
        document.time_ms,
        document.parse_time_ms,
        document.passes,
    ));
    state.plugin_times = plugin_times;
    state.output_text = Some(document.data);

    state.input_preview = Some(state.blob_for(Slot::Input, effects));
    state.output_preview = Some(state.blob_for(Slot::Output, effects));

    state.input_closable = true;
    if state.panels.is_open(Region::Input) {
        state.panels.open(Region::Output);
    }
    state.panels.open(Region::Info);
}

fn slot_actions_enabled(state: &AppState, slot: Slot) -> bool {
    match slot {
        Slot::Input => state.has_input(),
        Slot::Output => state.output_text.is_some() && !state.busy,
    }
}

/// Replaces whatever message the shared dialog currently shows.
fn show_alert(state: &mut AppState, message: String) {
    state.alert = Some(message);
    state.mark_dirty();
}
