use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use playground_core::{BlobUrl, Effect, Msg};
use playground_engine::{run_timed, AtomicFileWriter, EngineEvent, EngineHandle, Optimizer};
use playground_logging::{pg_debug, pg_error, pg_info, pg_warn};

pub const FEEDBACK_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PublishedBlob {
    mime: &'static str,
    text: String,
}

/// Executes core effects. Optimization runs inline; fetches and file reads go
/// to the engine and come back through [`EffectRunner::poll`].
pub struct EffectRunner {
    engine: EngineHandle,
    optimizer: Box<dyn Optimizer>,
    downloads: AtomicFileWriter,
    blobs: BTreeMap<String, PublishedBlob>,
    clipboard: Option<String>,
    feedback_deadline: Option<Instant>,
    opened_windows: Vec<BlobUrl>,
    saved: Vec<PathBuf>,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, optimizer: Box<dyn Optimizer>, download_dir: PathBuf) -> Self {
        Self {
            engine,
            optimizer,
            downloads: AtomicFileWriter::new(download_dir),
            blobs: BTreeMap::new(),
            clipboard: None,
            feedback_deadline: None,
            opened_windows: Vec::new(),
            saved: Vec::new(),
            in_flight: 0,
        }
    }

    /// Run one effect. Effects that complete synchronously return their
    /// follow-up message.
    pub fn run(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::Optimize { input, config } => {
                pg_info!("Optimizing {} bytes", input.len());
                let (result, plugin_times) = run_timed(self.optimizer.as_ref(), &input, &config);
                if let Err(err) = &result {
                    pg_warn!("Optimization failed: {}", err);
                }
                return Some(Msg::OptimizationFinished {
                    result,
                    plugin_times,
                });
            }
            Effect::ReadFile { path } => match self.engine.read_file(path.clone()) {
                Ok(()) => self.in_flight += 1,
                Err(err) => {
                    pg_error!("Cannot read {:?}: {}", path, err);
                    return Some(Msg::FileReadFailed { path });
                }
            },
            Effect::FetchUrl { url } => match self.engine.fetch(url.clone()) {
                Ok(()) => self.in_flight += 1,
                Err(err) => {
                    pg_error!("Cannot fetch {}: {}", url, err);
                    return Some(Msg::UrlFetchFailed { url });
                }
            },
            Effect::PublishBlob { url, mime, text } => {
                pg_debug!("Publishing {} ({} bytes)", url, text.len());
                if self
                    .blobs
                    .insert(url.as_str().to_string(), PublishedBlob { mime, text })
                    .is_some()
                {
                    pg_warn!("Blob {} published twice", url);
                }
            }
            Effect::RevokeBlob { url } => {
                if self.blobs.remove(url.as_str()).is_none() {
                    pg_warn!("Revoking unknown blob {}", url);
                }
            }
            Effect::CopyToClipboard { text } => {
                pg_info!("Copied {} characters to the clipboard", text.chars().count());
                self.clipboard = Some(text);
            }
            Effect::ShowFeedback => {
                self.feedback_deadline = Some(Instant::now() + FEEDBACK_DURATION);
            }
            Effect::Download { url, file_name } => match self.blobs.get(url.as_str()) {
                Some(blob) => match self.downloads.write_new(file_name, &blob.text) {
                    Ok(path) => {
                        pg_info!("Saved {} ({}) to {:?}", url, blob.mime, path);
                        self.saved.push(path);
                    }
                    Err(err) => pg_error!("Download of {} failed: {}", url, err),
                },
                None => pg_error!("Download of unpublished blob {}", url),
            },
            Effect::OpenWindow { url } => {
                if self.blobs.contains_key(url.as_str()) {
                    pg_info!("Opened {} in a new window", url);
                    self.opened_windows.push(url);
                } else {
                    pg_error!("Cannot open unpublished blob {}", url);
                }
            }
        }
        None
    }

    /// Messages from completed engine work and elapsed timers.
    pub fn poll(&mut self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(self.engine_msg(event));
        }
        self.push_elapsed(&mut inbox);
        inbox
    }

    /// Like [`EffectRunner::poll`], but blocks up to `timeout` for engine work
    /// when some is outstanding.
    pub fn wait(&mut self, timeout: Duration) -> Vec<Msg> {
        if self.in_flight > 0 {
            if let Some(event) = self.engine.recv_timeout(timeout) {
                let msg = self.engine_msg(event);
                let mut inbox = vec![msg];
                inbox.extend(self.poll());
                return inbox;
            }
        } else if let Some(deadline) = self.feedback_deadline {
            std::thread::sleep(deadline.saturating_duration_since(Instant::now()).min(timeout));
        }
        self.poll()
    }

    /// Stop the engine. Later reads and fetches fail immediately.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
        self.in_flight = 0;
    }

    /// Engine requests still outstanding.
    pub fn is_waiting(&self) -> bool {
        self.in_flight > 0
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    pub fn blob_text(&self, url: &BlobUrl) -> Option<&str> {
        self.blobs.get(url.as_str()).map(|blob| blob.text.as_str())
    }

    /// Published blobs not yet revoked.
    pub fn live_blobs(&self) -> usize {
        self.blobs.len()
    }

    pub fn opened_windows(&self) -> &[BlobUrl] {
        &self.opened_windows
    }

    pub fn saved_files(&self) -> &[PathBuf] {
        &self.saved
    }

    fn engine_msg(&mut self, event: EngineEvent) -> Msg {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            EngineEvent::FetchCompleted { url, result } => match result {
                Ok(output) => Msg::UrlFetched {
                    url,
                    text: output.text,
                },
                Err(_) => Msg::UrlFetchFailed { url },
            },
            EngineEvent::FileRead { path, result } => match result {
                Ok(text) => Msg::FileLoaded { text },
                Err(_) => Msg::FileReadFailed { path },
            },
        }
    }

    fn push_elapsed(&mut self, inbox: &mut Vec<Msg>) {
        if self
            .feedback_deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.feedback_deadline = None;
            inbox.push(Msg::FeedbackElapsed);
        }
    }
}
