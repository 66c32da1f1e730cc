use std::fmt;

use minutes_core::{MeetingReport, RequestToken, SubmitFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmissionCompleted {
        token: RequestToken,
        outcome: Result<ProcessedSubmission, SubmitError>,
    },
}

/// A successfully processed submission with the report text ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedSubmission {
    pub report: MeetingReport,
    pub report_text: String,
    pub source: ReportSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    /// The server-rendered text artifact.
    Artifact,
    /// Synthesized client side from the structured result.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredReport {
    pub text: String,
    pub source: ReportSource,
}

/// Failure of the `/parse_transcript/` call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
}

impl From<SubmitError> for SubmitFailure {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Server { message, .. } => SubmitFailure::Server(message),
            SubmitError::Transport(message) => SubmitFailure::Transport(message),
        }
    }
}

/// Failure of an artifact or health retrieval.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
