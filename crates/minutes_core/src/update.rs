use crate::view_model::{ReportViewModel, StatusLine};
use crate::{render, AppState, Effect, Msg, SubmissionRequest, UiState};

const EMPTY_TRANSCRIPT: &str = "Please paste a meeting transcript to process.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TranscriptChanged(text) => {
            state.set_transcript(text);
            Vec::new()
        }
        Msg::MeetingIdChanged(text) => {
            state.set_meeting_id(text);
            Vec::new()
        }
        Msg::SubmitClicked { now_millis } => {
            // The process control is disabled while a request is in flight.
            if state.ui_state() == UiState::Submitting {
                return (state, Vec::new());
            }
            match SubmissionRequest::from_inputs(state.transcript(), state.meeting_id(), now_millis)
            {
                Some(request) => {
                    let token = state.begin_submission();
                    vec![Effect::SubmitTranscript { token, request }]
                }
                None => {
                    state.set_status(StatusLine::error(EMPTY_TRANSCRIPT));
                    Vec::new()
                }
            }
        }
        Msg::ClearClicked => {
            state.clear();
            Vec::new()
        }
        Msg::ProcessingSucceeded {
            token,
            report,
            report_text,
            generated_at,
        } => {
            if !state.is_active(token) {
                return (state, Vec::new());
            }
            state.finish_success(ReportViewModel {
                title: format!("Meeting Summary – {}", report.meeting_id),
                meeting_id: report.meeting_id.clone(),
                subtitle: format!("Generated: {generated_at}"),
                content_html: render(&report_text),
                links: report.download_links(),
            });
            Vec::new()
        }
        Msg::ProcessingFailed { token, failure } => {
            if !state.is_active(token) {
                return (state, Vec::new());
            }
            state.finish_error(StatusLine::error(failure.to_string()));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
