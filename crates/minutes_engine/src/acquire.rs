use engine_logging::{engine_debug, engine_warn};
use minutes_core::{synthesize, MeetingReport};

use crate::{decode_text, AcquiredReport, Backend, FailureKind, FetchError, ReportSource};

/// Returns the server-rendered text report when it can be retrieved, otherwise a
/// report synthesized from the structured result. Retrieval failures never surface.
///
/// An artifact that comes back empty counts as unavailable.
pub async fn acquire_report(backend: &dyn Backend, report: &MeetingReport) -> AcquiredReport {
    let Some(file_name) = report.text_artifact() else {
        engine_debug!(
            "No text artifact for meeting {}; synthesizing report",
            report.meeting_id
        );
        return fallback(report);
    };

    match fetch_text(backend, file_name).await {
        Ok(text) if !text.is_empty() => {
            engine_debug!("Using text artifact {} ({} bytes)", file_name, text.len());
            AcquiredReport {
                text,
                source: ReportSource::Artifact,
            }
        }
        Ok(_) => {
            engine_warn!("Text artifact {} is empty; synthesizing report", file_name);
            fallback(report)
        }
        Err(err) => {
            engine_warn!(
                "Text artifact {} unavailable ({}); synthesizing report",
                file_name,
                err
            );
            fallback(report)
        }
    }
}

async fn fetch_text(backend: &dyn Backend, file_name: &str) -> Result<String, FetchError> {
    let artifact = backend.fetch_artifact(file_name).await?;
    decode_text(&artifact.bytes, artifact.content_type.as_deref())
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
}

fn fallback(report: &MeetingReport) -> AcquiredReport {
    AcquiredReport {
        text: synthesize(report),
        source: ReportSource::Fallback,
    }
}
