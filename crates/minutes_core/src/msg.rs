use std::fmt;

use crate::{MeetingReport, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the transcript input.
    TranscriptChanged(String),
    /// User edited the meeting id input.
    MeetingIdChanged(String),
    /// User clicked the process control. `now_millis` seeds the default meeting id.
    SubmitClicked { now_millis: u64 },
    /// User clicked Clear.
    ClearClicked,
    /// Backend processing succeeded and the report text was acquired.
    ProcessingSucceeded {
        token: RequestToken,
        report: MeetingReport,
        report_text: String,
        generated_at: String,
    },
    /// Backend processing failed.
    ProcessingFailed {
        token: RequestToken,
        failure: SubmitFailure,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// Non-success HTTP status; carries the best available detail text.
    Server(String),
    /// Network or decoding failure while talking to the backend.
    Transport(String),
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitFailure::Server(detail) => write!(f, "Server error: {detail}"),
            SubmitFailure::Transport(message) => write!(f, "Unexpected error: {message}"),
        }
    }
}
