//! Minutes engine: backend IO, report acquisition and the orchestrator that drives
//! the core state machine.
mod acquire;
mod backend;
mod decode;
mod engine;
mod export;
mod filename;
mod orchestrator;
mod persist;
mod types;

pub use acquire::acquire_report;
pub use backend::{
    Backend, ClientSettings, FetchedArtifact, ReqwestBackend, HEALTH_PATH, PROCESS_PATH,
};
pub use decode::{decode_text, DecodeError};
pub use engine::EngineHandle;
pub use export::{build_report_page, export_report_page};
pub use filename::report_file_name;
pub use orchestrator::{Clock, Orchestrator};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    AcquiredReport, EngineEvent, FailureKind, FetchError, ProcessedSubmission, ReportSource,
    SubmitError,
};
