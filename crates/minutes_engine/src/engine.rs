use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use minutes_core::{MeetingReport, RequestToken, SubmissionRequest};

use crate::{acquire_report, Backend, EngineEvent, ProcessedSubmission, SubmitError};

enum EngineCommand {
    Submit {
        token: RequestToken,
        request: SubmissionRequest,
    },
}

/// Runs backend calls on a background runtime. Results come back as [`EngineEvent`]s
/// that the owner polls from its own thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, token: RequestToken, request: SubmissionRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { token, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { token, request } => {
            let outcome = process_submission(backend, &request).await;
            let _ = event_tx.send(EngineEvent::SubmissionCompleted { token, outcome });
        }
    }
}

// The artifact fetch only starts once processing has succeeded.
async fn process_submission(
    backend: &dyn Backend,
    request: &SubmissionRequest,
) -> Result<ProcessedSubmission, SubmitError> {
    let result = backend.process(request).await?;
    let report = MeetingReport::normalize(result, &request.meeting_id);
    let acquired = acquire_report(backend, &report).await;
    Ok(ProcessedSubmission {
        report,
        report_text: acquired.text,
        source: acquired.source,
    })
}
