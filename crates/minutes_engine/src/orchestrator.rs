use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use engine_logging::{engine_debug, engine_info, engine_warn};
use minutes_core::{
    present, update, AppState, AppViewModel, Effect, FormInputs, Msg, ReportView, StatusView,
};

use crate::{EngineEvent, EngineHandle};

/// Time sources the orchestrator needs: epoch milliseconds for default meeting ids and a
/// human-readable local time for the report subtitle.
#[derive(Clone)]
pub struct Clock {
    pub now_millis: Arc<dyn Fn() -> u64 + Send + Sync>,
    pub local_time: Arc<dyn Fn() -> String + Send + Sync>,
}

impl Clock {
    pub fn new(local_time: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            now_millis: Arc::new(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_millis() as u64)
                    .unwrap_or_default()
            }),
            local_time: Arc::new(local_time),
        }
    }

    pub fn fixed(now_millis: u64, local_time: impl Into<String>) -> Self {
        let local_time = local_time.into();
        Self {
            now_millis: Arc::new(move || now_millis),
            local_time: Arc::new(move || local_time.clone()),
        }
    }
}

/// Owns the UI state machine, runs its effects on the engine and pushes every visible
/// change into the presentation targets.
pub struct Orchestrator<S, F, R> {
    state: AppState,
    engine: EngineHandle,
    clock: Clock,
    status: S,
    form: F,
    report: R,
}

impl<S, F, R> Orchestrator<S, F, R>
where
    S: StatusView,
    F: FormInputs,
    R: ReportView,
{
    pub fn new(engine: EngineHandle, clock: Clock, status: S, form: F, report: R) -> Self {
        let mut orchestrator = Self {
            state: AppState::new(),
            engine,
            clock,
            status,
            form,
            report,
        };
        orchestrator.render();
        orchestrator
    }

    pub fn set_transcript(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::TranscriptChanged(text.into()));
    }

    pub fn set_meeting_id(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::MeetingIdChanged(text.into()));
    }

    pub fn submit(&mut self) {
        let now_millis = (self.clock.now_millis)();
        self.dispatch(Msg::SubmitClicked { now_millis });
    }

    pub fn clear(&mut self) {
        self.dispatch(Msg::ClearClicked);
    }

    /// Applies every engine event that has already arrived. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.engine.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Blocks until no request is in flight or `timeout` elapses. Returns `true` when idle.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.state.active_token().is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.engine.recv_timeout(remaining) {
                Some(event) => self.handle_event(event),
                None => return false,
            }
        }
        true
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn status_view(&self) -> &S {
        &self.status
    }

    pub fn form_inputs(&self) -> &F {
        &self.form
    }

    pub fn report_view(&self) -> &R {
        &self.report
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.run_effects(effects);
        if was_dirty {
            self.render();
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitTranscript { token, request } => {
                    engine_info!(
                        "Submitting request {} meeting_id={} transcript_len={}",
                        token,
                        request.meeting_id,
                        request.transcript.len()
                    );
                    self.engine.submit(token, request);
                }
            }
        }
    }

    fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::SubmissionCompleted { token, outcome } => {
                if self.state.active_token() != Some(token) {
                    engine_debug!("Discarding stale result for request {}", token);
                    return;
                }
                let msg = match outcome {
                    Ok(processed) => {
                        engine_info!(
                            "Request {} done, report source {:?}",
                            token,
                            processed.source
                        );
                        Msg::ProcessingSucceeded {
                            token,
                            report: processed.report,
                            report_text: processed.report_text,
                            generated_at: (self.clock.local_time)(),
                        }
                    }
                    Err(err) => {
                        engine_warn!("Request {} failed: {}", token, err);
                        Msg::ProcessingFailed {
                            token,
                            failure: err.into(),
                        }
                    }
                };
                self.dispatch(msg);
            }
        }
    }

    fn render(&mut self) {
        let view = self.state.view();
        present(&view, &mut self.status, &mut self.form, &mut self.report);
    }
}
