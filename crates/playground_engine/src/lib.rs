//! Playground engine: fetching, file reads, optimizer invocation and downloads.
mod decode;
mod engine;
mod fetch;
mod optimizer;
mod persist;
mod types;

pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use optimizer::{run_timed, ExternalOptimizer, OptimizeError, Optimizer};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, EngineStopped, FailureKind, FetchError, FetchMetadata, FetchOutput, ReadError,
};
