//! Presentation targets the state machine drives, and the function that pushes a
//! view model into them.

use crate::view_model::{AppViewModel, Panel, ReportViewModel, Severity};
use crate::ArtifactKind;

pub trait StatusView {
    fn show_status(&mut self, text: &str, severity: Severity);
}

pub trait FormInputs {
    fn set_transcript(&mut self, text: &str);
    fn set_meeting_id(&mut self, text: &str);
    /// Enables or disables both the process and the clear control.
    fn set_controls_enabled(&mut self, enabled: bool);
    fn set_process_label(&mut self, label: &str);
}

pub trait ReportView {
    fn show_placeholder(&mut self);
    fn show_report(&mut self, report: &ReportViewModel);
    /// `None` hides the link.
    fn set_download_link(&mut self, kind: ArtifactKind, href: Option<&str>);
}

const LINK_KINDS: [ArtifactKind; 3] = [ArtifactKind::Docx, ArtifactKind::Pdf, ArtifactKind::Rtf];

pub fn present(
    view: &AppViewModel,
    status: &mut dyn StatusView,
    form: &mut dyn FormInputs,
    report: &mut dyn ReportView,
) {
    status.show_status(&view.status.text, view.status.severity);

    form.set_transcript(&view.transcript);
    form.set_meeting_id(&view.meeting_id);
    form.set_controls_enabled(view.controls_enabled);
    form.set_process_label(view.process_label);

    match (view.panel(), view.report.as_ref()) {
        (Panel::Report, Some(model)) => {
            report.show_report(model);
            for kind in LINK_KINDS {
                let href = model
                    .links
                    .iter()
                    .find(|link| link.kind == kind)
                    .map(|link| link.href.as_str());
                report.set_download_link(kind, href);
            }
        }
        _ => {
            report.show_placeholder();
            for kind in LINK_KINDS {
                report.set_download_link(kind, None);
            }
        }
    }
}
