//! Minutes core: report text pipeline and the pure UI state machine.
mod convert;
mod effect;
mod escape;
mod msg;
mod present;
mod result;
mod state;
mod synthesize;
mod update;
mod view_model;

pub use convert::{classify, render, LineRole, RenderableLine};
pub use effect::Effect;
pub use escape::escape;
pub use msg::{Msg, SubmitFailure};
pub use present::{present, FormInputs, ReportView, StatusView};
pub use result::{
    artifact_file_name, artifact_href, ActionItem, ArtifactKind, CreatedTask, DownloadLink,
    MeetingReport, Notification, ProcessingResult, ReportPaths, ARTIFACT_BASE_PATH,
};
pub use state::{AppState, RequestToken, SubmissionRequest, UiState};
pub use synthesize::synthesize;
pub use update::update;
pub use view_model::{
    AppViewModel, Panel, ReportViewModel, Severity, StatusLine, PROCESS_LABEL_BUSY,
    PROCESS_LABEL_IDLE,
};
