use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use playground_core::{update, AppState, Msg, PluginRegistry};
use playground_engine::{EngineHandle, ExternalOptimizer, FetchSettings};
use playground_logging::{pg_error, pg_info, pg_warn};

use super::console::{self, ConsoleCommand, ConsoleError};
use super::effects::EffectRunner;
use super::logging;
use super::settings;
use super::ui::events::{self, UiEvent};
use super::ui::layout::{self, Layout};
use super::ui::render;
use super::ui::surface::{ElementTree, SurfaceError};

const TICK: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("resolving the working directory")?;
    let (settings, problem) = settings::load_settings(&cwd);
    logging::initialize(settings.log_destination);
    if let Some(err) = problem {
        pg_warn!("{}; using default settings", err);
    }

    let engine = EngineHandle::new(FetchSettings::from(&settings.fetch))
        .context("starting the fetch engine")?;
    let optimizer = ExternalOptimizer::new(&settings.optimizer_program);
    let runner = EffectRunner::new(engine, Box::new(optimizer), cwd.join(&settings.download_dir));
    let mut session = Session::new(PluginRegistry::default(), runner)?;
    pg_info!("Session started");

    let lines = spawn_line_reader();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "svgo-ll playground; type `help` for commands")?;

    loop {
        session.pump();
        if session.runner().is_waiting() {
            // Hold further gestures until the pending read or fetch lands.
            session.settle(TICK);
            continue;
        }
        match lines.recv_timeout(TICK) {
            Ok(line) => match session.handle_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Print(text)) => writeln!(out, "{}", text.trim_end())?,
                Ok(Flow::Quit) => break,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    session.end();
    pg_info!("Session ended");
    Ok(())
}

fn spawn_line_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// What the console should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Print(String),
    Quit,
}

/// One playground session: state, its rendered element tree, and the
/// effect runner.
pub struct Session {
    state: AppState,
    surface: ElementTree,
    layout: Layout,
    runner: EffectRunner,
}

impl Session {
    pub fn new(registry: PluginRegistry, runner: EffectRunner) -> Result<Self, SurfaceError> {
        let mut surface = ElementTree::new();
        let layout = layout::build(&mut surface, &registry)?;
        let state = AppState::with_registry(registry);
        render::apply(&mut surface, &render::render(&layout, &state.view()))?;
        Ok(Self {
            state,
            surface,
            layout,
            runner,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &ElementTree {
        &self.surface
    }

    pub fn runner(&self) -> &EffectRunner {
        &self.runner
    }

    /// Apply `msg` and everything it leads to synchronously. The view is
    /// rendered before any effect runs, so a busy view is on screen while
    /// the optimizer works.
    pub fn dispatch(&mut self, msg: Msg) -> Result<(), SurfaceError> {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            let was_dirty = state.consume_dirty();
            let view = state.view();
            self.state = state;

            if was_dirty {
                render::apply(&mut self.surface, &render::render(&self.layout, &view))?;
            }
            for effect in effects {
                if let Some(next) = self.runner.run(effect) {
                    queue.push_back(next);
                }
            }
        }
        Ok(())
    }

    /// Deliver a UI event. A surface failure aborts the handler.
    pub fn handle_event(&mut self, event: &UiEvent) -> Result<(), SurfaceError> {
        let result = match events::deliver(&mut self.surface, event) {
            Ok(Some(msg)) => self.dispatch(msg),
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            pg_error!("Handler for {:?} aborted: {}", event, err);
        }
        result
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Flow, ConsoleError> {
        let Some(command) = console::parse(line)? else {
            return Ok(Flow::Continue);
        };
        match &command {
            ConsoleCommand::Quit => return Ok(Flow::Quit),
            ConsoleCommand::Show => return Ok(Flow::Print(self.surface.outline())),
            ConsoleCommand::Help(text) => return Ok(Flow::Print(text.clone())),
            _ => {}
        }
        if let Some(event) = console::perform(&command, &mut self.surface, &self.layout)? {
            self.handle_event(&event)?;
        }
        Ok(Flow::Continue)
    }

    /// Feed completed engine work and timers back into the session.
    pub fn pump(&mut self) {
        for msg in self.runner.poll() {
            self.dispatch_logged(msg);
        }
    }

    /// Block up to `timeout` for outstanding engine work, then pump.
    pub fn settle(&mut self, timeout: Duration) {
        for msg in self.runner.wait(timeout) {
            self.dispatch_logged(msg);
        }
    }

    /// Keep settling until no engine work is outstanding or `limit` passes.
    pub fn settle_all(&mut self, limit: Duration) {
        let deadline = Instant::now() + limit;
        while self.runner.is_waiting() && Instant::now() < deadline {
            self.settle(TICK);
        }
    }

    /// Release every remaining resource and stop the engine.
    pub fn end(&mut self) {
        self.dispatch_logged(Msg::SessionEnded);
        self.runner.shutdown();
    }

    fn dispatch_logged(&mut self, msg: Msg) {
        if let Err(err) = self.dispatch(msg) {
            pg_error!("Handler aborted: {}", err);
        }
    }
}
