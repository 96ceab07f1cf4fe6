use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use playground_logging::{pg_info, pg_warn};

use crate::decode::decode_text;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineEvent, EngineStopped, ReadError};

enum EngineCommand {
    Fetch { url: String },
    ReadFile { path: PathBuf },
}

/// Runs fetches and file reads on a background runtime and reports
/// completions as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: Option<mpsc::Sender<EngineCommand>>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> io::Result<Self> {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let worker = thread::Builder::new()
            .name("playground-engine".into())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(fetcher.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            event_rx,
            worker: Some(worker),
        })
    }

    /// On `Ok` exactly one [`EngineEvent::FetchCompleted`] will follow.
    pub fn fetch(&self, url: impl Into<String>) -> Result<(), EngineStopped> {
        self.send(EngineCommand::Fetch { url: url.into() })
    }

    /// On `Ok` exactly one [`EngineEvent::FileRead`] will follow.
    pub fn read_file(&self, path: impl Into<PathBuf>) -> Result<(), EngineStopped> {
        self.send(EngineCommand::ReadFile { path: path.into() })
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineStopped> {
        let tx = self.cmd_tx.as_ref().ok_or(EngineStopped)?;
        tx.send(command).map_err(|_| {
            pg_warn!("engine worker is gone; command dropped");
            EngineStopped
        })
    }

    /// Stop accepting commands and wait for the worker thread to exit.
    /// Work still in flight is cancelled with the runtime.
    pub fn shutdown(&mut self) {
        self.cmd_tx = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                pg_warn!("engine worker panicked");
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Fetch { url } => {
            let result = fetcher.fetch(&url).await;
            match &result {
                Ok(output) => pg_info!(
                    "retrieved {} after {} redirect(s)",
                    output.metadata.final_url,
                    output.metadata.redirect_count
                ),
                Err(err) => pg_warn!("fetch of {} failed: {}", url, err),
            }
            EngineEvent::FetchCompleted { url, result }
        }
        EngineCommand::ReadFile { path } => {
            let result = read_text(&path).await;
            if let Err(err) = &result {
                pg_warn!("reading {} failed: {}", path.display(), err);
            }
            EngineEvent::FileRead { path, result }
        }
    };
    let _ = event_tx.send(event);
}

async fn read_text(path: &std::path::Path) -> Result<String, ReadError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| ReadError::Io(err.to_string()))?;
    Ok(decode_text(&bytes, None)?.text)
}
