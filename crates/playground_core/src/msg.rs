use std::path::PathBuf;

use crate::{InputType, OutputView, PluginTimes, Region, SelectionMode, Slot};

/// What to copy to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Config,
    Slot(Slot),
}

/// Result of a successful optimizer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedDocument {
    pub data: String,
    pub time_ms: u64,
    /// `None` when the optimizer does not report it.
    pub parse_time_ms: Option<u64>,
    pub passes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User typed or pasted document text into the input box.
    InputEdited(String),
    /// User picked a file to load as input.
    FileSelected(PathBuf),
    /// File contents finished reading.
    FileLoaded { text: String },
    /// File could not be read.
    FileReadFailed { path: PathBuf },
    /// User pasted or dropped URL text.
    UrlSubmitted(String),
    /// The fetch for `url` completed.
    UrlFetched { url: String, text: String },
    /// The fetch for `url` failed; no detail is surfaced.
    UrlFetchFailed { url: String },
    InputTypeSelected(InputType),
    OutputViewSelected(OutputView),
    PanelOpened(Region),
    PanelClosed(Region),
    SelectionModeChanged(SelectionMode),
    /// A plugin checkbox changed to `checked`.
    PluginToggled { name: String, checked: bool },
    MaxPassesChanged(String),
    IndentChanged(String),
    CopyClicked(CopyTarget),
    DownloadClicked(Slot),
    NewWindowClicked(Slot),
    /// Copy feedback notice timed out.
    FeedbackElapsed,
    /// User closed the alert dialog.
    AlertDismissed,
    /// The optimizer call returned.
    OptimizationFinished {
        result: Result<OptimizedDocument, String>,
        plugin_times: PluginTimes,
    },
    /// The session is ending; release every resource.
    SessionEnded,
}
