//! Terminal stand-ins for the form, status line and report panel.
//!
//! `present` pushes the whole view on every change; these only echo what actually
//! changed so the terminal shows a readable progress trail.

use std::collections::BTreeMap;
use std::io::Write;

use engine_logging::engine_debug;
use minutes_core::{
    ArtifactKind, FormInputs, ReportView, ReportViewModel, Severity, StatusView,
};

pub struct TerminalStatus<W: Write> {
    out: W,
    last: Option<(String, Severity)>,
}

impl<W: Write> TerminalStatus<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn current(&self) -> Option<(&str, Severity)> {
        self.last
            .as_ref()
            .map(|(text, severity)| (text.as_str(), *severity))
    }
}

impl<W: Write> StatusView for TerminalStatus<W> {
    fn show_status(&mut self, text: &str, severity: Severity) {
        if self.current() == Some((text, severity)) {
            return;
        }
        self.last = Some((text.to_string(), severity));
        if text.is_empty() {
            return;
        }
        let _ = match severity {
            Severity::Info => writeln!(self.out, "{text}"),
            Severity::Error => writeln!(self.out, "error: {text}"),
        };
    }
}

/// Nothing to type into on a terminal; control changes go to the debug log.
#[derive(Debug, Default)]
pub struct TerminalForm {
    meeting_id: String,
    controls_enabled: Option<bool>,
    process_label: String,
}

impl FormInputs for TerminalForm {
    fn set_transcript(&mut self, _text: &str) {}

    fn set_meeting_id(&mut self, text: &str) {
        if self.meeting_id != text {
            engine_debug!("Meeting id field: {:?}", text);
            self.meeting_id = text.to_string();
        }
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        if self.controls_enabled != Some(enabled) {
            engine_debug!("Controls enabled: {}", enabled);
            self.controls_enabled = Some(enabled);
        }
    }

    fn set_process_label(&mut self, label: &str) {
        if self.process_label != label {
            engine_debug!("Process control label: {}", label);
            self.process_label = label.to_string();
        }
    }
}

pub struct TerminalReport<W: Write> {
    out: W,
    shown: Option<ReportViewModel>,
    links: BTreeMap<&'static str, String>,
}

impl<W: Write> TerminalReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: None,
            links: BTreeMap::new(),
        }
    }

    pub fn shown(&self) -> Option<&ReportViewModel> {
        self.shown.as_ref()
    }
}

impl<W: Write> ReportView for TerminalReport<W> {
    fn show_placeholder(&mut self) {
        self.shown = None;
    }

    fn show_report(&mut self, report: &ReportViewModel) {
        if self.shown.as_ref() == Some(report) {
            return;
        }
        let _ = writeln!(self.out, "{}\n{}", report.title, report.subtitle);
        self.shown = Some(report.clone());
    }

    fn set_download_link(&mut self, kind: ArtifactKind, href: Option<&str>) {
        let label = kind.label();
        match href {
            Some(href) => {
                if self.links.get(label).map(String::as_str) != Some(href) {
                    let _ = writeln!(self.out, "  {label}: {href}");
                    self.links.insert(label, href.to_string());
                }
            }
            None => {
                self.links.remove(label);
            }
        }
    }
}
