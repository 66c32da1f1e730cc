use crate::view_model::{AppViewModel, ReportViewModel, StatusLine, PROCESS_LABEL_BUSY, PROCESS_LABEL_IDLE};

/// Identifies one submission. Completions carrying a stale token are dropped.
pub type RequestToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Body of the `/parse_transcript/` request. Built only from a non-blank transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub transcript: String,
    pub meeting_id: String,
}

impl SubmissionRequest {
    /// Trims both inputs. Returns `None` for a blank transcript; a blank meeting id
    /// becomes `meeting-<now_millis>`.
    pub fn from_inputs(transcript: &str, meeting_id: &str, now_millis: u64) -> Option<Self> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return None;
        }
        let meeting_id = match meeting_id.trim() {
            "" => format!("meeting-{now_millis}"),
            id => id.to_string(),
        };
        Some(Self {
            transcript: transcript.to_string(),
            meeting_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    transcript: String,
    meeting_id: String,
    ui: UiState,
    last_token: RequestToken,
    active_token: Option<RequestToken>,
    status: StatusLine,
    report: Option<ReportViewModel>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.ui == UiState::Submitting;
        AppViewModel {
            ui: self.ui,
            status: self.status.clone(),
            transcript: self.transcript.clone(),
            meeting_id: self.meeting_id.clone(),
            controls_enabled: !busy,
            process_label: if busy {
                PROCESS_LABEL_BUSY
            } else {
                PROCESS_LABEL_IDLE
            },
            report: self.report.clone(),
            active_token: self.active_token,
            dirty: self.dirty,
        }
    }

    pub fn ui_state(&self) -> UiState {
        self.ui
    }

    pub fn active_token(&self) -> Option<RequestToken> {
        self.active_token
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn meeting_id(&self) -> &str {
        &self.meeting_id
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_active(&self, token: RequestToken) -> bool {
        self.active_token == Some(token)
    }

    pub(crate) fn set_transcript(&mut self, text: String) {
        self.transcript = text;
    }

    pub(crate) fn set_meeting_id(&mut self, text: String) {
        self.meeting_id = text;
    }

    pub(crate) fn set_status(&mut self, status: StatusLine) {
        self.status = status;
        self.dirty = true;
    }

    pub(crate) fn begin_submission(&mut self) -> RequestToken {
        self.last_token += 1;
        self.active_token = Some(self.last_token);
        self.ui = UiState::Submitting;
        self.set_status(StatusLine::info("Processing meeting locally…"));
        self.last_token
    }

    pub(crate) fn finish_success(&mut self, report: ReportViewModel) {
        self.active_token = None;
        self.ui = UiState::Success;
        self.report = Some(report);
        self.set_status(StatusLine::info("Done. Report ready."));
    }

    pub(crate) fn finish_error(&mut self, status: StatusLine) {
        self.active_token = None;
        self.ui = UiState::Error;
        self.set_status(status);
    }

    /// Resets inputs and the report panel. An in-flight request keeps running but its
    /// token is forgotten.
    pub(crate) fn clear(&mut self) {
        self.transcript.clear();
        self.meeting_id.clear();
        self.active_token = None;
        self.ui = UiState::Idle;
        self.report = None;
        self.set_status(StatusLine::default());
    }
}
