use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Instant;

use playground_core::{
    command_args, OptimizationConfig, OptimizedDocument, PluginTimer, PluginTimes, ProgressEvent,
};
use playground_logging::{pg_debug, pg_warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("failed to start optimizer {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("optimizer io error: {0}")]
    Io(#[from] io::Error),
    #[error("optimizer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("optimizer produced non-UTF-8 output")]
    InvalidOutput,
}

/// Something that turns SVG text into optimized SVG text.
pub trait Optimizer {
    fn optimize(
        &self,
        input: &str,
        config: &OptimizationConfig,
        progress: &mut dyn FnMut(ProgressEvent),
    ) -> Result<OptimizedDocument, OptimizeError>;
}

/// Pipes the document through an external optimizer command line.
///
/// The command line only returns the optimized text, so parse time and pass
/// count are reported as unknown and no progress events are emitted.
#[derive(Debug, Clone)]
pub struct ExternalOptimizer {
    program: PathBuf,
    io_args: Vec<String>,
}

impl ExternalOptimizer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            io_args: vec!["-i".into(), "-".into(), "-o".into(), "-".into()],
        }
    }

    /// Replace the trailing arguments that route the document through stdin/stdout.
    pub fn with_io_args(mut self, io_args: Vec<String>) -> Self {
        self.io_args = io_args;
        self
    }

    fn args(&self, config: &OptimizationConfig) -> Vec<String> {
        let mut args = command_args(config);
        args.extend(self.io_args.iter().cloned());
        args
    }
}

impl Optimizer for ExternalOptimizer {
    fn optimize(
        &self,
        input: &str,
        config: &OptimizationConfig,
        _progress: &mut dyn FnMut(ProgressEvent),
    ) -> Result<OptimizedDocument, OptimizeError> {
        let args = self.args(config);
        pg_debug!("running {} {}", self.program.display(), args.join(" "));
        let started = Instant::now();

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| OptimizeError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let writer = child.stdin.take().map(|mut stdin| {
            let input = input.to_owned();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;
        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The child may exit before draining stdin; its own status decides.
                Ok(Err(err)) => pg_warn!("writing optimizer input failed: {}", err),
                Err(_) => pg_warn!("optimizer input writer panicked"),
            }
        }

        if !output.status.success() {
            return Err(OptimizeError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let data = String::from_utf8(output.stdout).map_err(|_| OptimizeError::InvalidOutput)?;
        Ok(OptimizedDocument {
            data,
            time_ms: started.elapsed().as_millis() as u64,
            parse_time_ms: None,
            passes: None,
        })
    }
}

/// Run one optimization while timing each plugin from its progress events.
pub fn run_timed(
    optimizer: &dyn Optimizer,
    input: &str,
    config: &OptimizationConfig,
) -> (Result<OptimizedDocument, String>, PluginTimes) {
    let started = Instant::now();
    let mut timer = PluginTimer::new();
    let result = optimizer
        .optimize(input, config, &mut |event| {
            timer.record(&event, started.elapsed().as_millis() as u64);
        })
        .map_err(|err| err.to_string());
    (result, timer.finish())
}
