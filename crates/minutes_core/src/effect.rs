use crate::{RequestToken, SubmissionRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitTranscript {
        token: RequestToken,
        request: SubmissionRequest,
    },
}
