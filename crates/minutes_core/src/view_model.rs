use crate::{DownloadLink, RequestToken, UiState};

pub const PROCESS_LABEL_IDLE: &str = "PROCESS MEETING";
pub const PROCESS_LABEL_BUSY: &str = "PROCESSING…";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    pub text: String,
    pub severity: Severity,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Placeholder,
    Report,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportViewModel {
    pub meeting_id: String,
    pub title: String,
    pub subtitle: String,
    pub content_html: String,
    pub links: Vec<DownloadLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub ui: UiState,
    pub status: StatusLine,
    pub transcript: String,
    pub meeting_id: String,
    pub controls_enabled: bool,
    pub process_label: &'static str,
    pub report: Option<ReportViewModel>,
    pub active_token: Option<RequestToken>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn panel(&self) -> Panel {
        if self.report.is_some() {
            Panel::Report
        } else {
            Panel::Placeholder
        }
    }
}
