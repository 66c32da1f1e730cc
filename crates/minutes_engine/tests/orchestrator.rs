use std::collections::HashMap;
use std::sync::{Arc, Once};
use std::time::Duration;

use minutes_core::{
    ArtifactKind, FormInputs, ReportView, ReportViewModel, Severity, StatusView, UiState,
};
use minutes_engine::{ClientSettings, Clock, EngineHandle, Orchestrator, ReqwestBackend};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NOW_MILLIS: u64 = 1_700_000_000_000;
const WAIT: Duration = Duration::from_secs(5);

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[derive(Default)]
struct FakeStatus {
    history: Vec<(String, Severity)>,
}

impl FakeStatus {
    fn current(&self) -> (&str, Severity) {
        self.history
            .last()
            .map(|(text, severity)| (text.as_str(), *severity))
            .unwrap_or(("", Severity::Info))
    }
}

impl StatusView for FakeStatus {
    fn show_status(&mut self, text: &str, severity: Severity) {
        self.history.push((text.to_string(), severity));
    }
}

#[derive(Default)]
struct FakeForm {
    transcript: String,
    meeting_id: String,
    controls_enabled: bool,
    process_label: String,
    disabled_at_least_once: bool,
}

impl FormInputs for FakeForm {
    fn set_transcript(&mut self, text: &str) {
        self.transcript = text.to_string();
    }

    fn set_meeting_id(&mut self, text: &str) {
        self.meeting_id = text.to_string();
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
        self.disabled_at_least_once |= !enabled;
    }

    fn set_process_label(&mut self, label: &str) {
        self.process_label = label.to_string();
    }
}

#[derive(Default)]
struct FakeReport {
    placeholder_visible: bool,
    shown: Option<ReportViewModel>,
    links: HashMap<ArtifactKind, Option<String>>,
}

impl FakeReport {
    fn visible_links(&self) -> Vec<(ArtifactKind, String)> {
        let mut links: Vec<_> = self
            .links
            .iter()
            .filter_map(|(kind, href)| href.clone().map(|href| (*kind, href)))
            .collect();
        links.sort_by_key(|(kind, _)| format!("{kind:?}"));
        links
    }
}

impl ReportView for FakeReport {
    fn show_placeholder(&mut self) {
        self.placeholder_visible = true;
        self.shown = None;
    }

    fn show_report(&mut self, report: &ReportViewModel) {
        self.placeholder_visible = false;
        self.shown = Some(report.clone());
    }

    fn set_download_link(&mut self, kind: ArtifactKind, href: Option<&str>) {
        self.links.insert(kind, href.map(str::to_string));
    }
}

type TestOrchestrator = Orchestrator<FakeStatus, FakeForm, FakeReport>;

fn orchestrator_for(server: &MockServer) -> TestOrchestrator {
    init_logging();
    let backend = ReqwestBackend::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("backend");
    let engine = EngineHandle::new(Arc::new(backend)).expect("engine");
    Orchestrator::new(
        engine,
        Clock::fixed(NOW_MILLIS, "16/10/2026, 10:00:00"),
        FakeStatus::default(),
        FakeForm::default(),
        FakeReport::default(),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn end_to_end_with_server_rendered_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse_transcript/"))
        .and(body_json(serde_json::json!({
            "transcript": "Alice: let's ship by Friday.",
            "meeting_id": "meeting-1700000000000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "meeting_id": "meeting-1700000000000",
            "summary": "- Ship by Friday",
            "action_items": [{"task": "Ship", "owner": "alice@example.com", "due": "Friday"}],
            "tasks": [{"id": "MOCK-1", "summary": "Ship", "assignee": "alice@example.com"}],
            "notifications": [{"issue": "MOCK-1", "email_status": "sent"}],
            "reports": {
                "report_text_path": "artifacts/reports/report_meeting.txt",
                "report_docx_path": "/var/data/out/report-42.docx",
                "report_pdf_path": "C:\\data\\out\\report-42.pdf"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artifacts/reports/report_meeting.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "Meeting Summary – meeting-1700000000000\nDate: 16 Oct 2026\n\nSummary of Discussion:\n- Ship by Friday",
            "text/plain; charset=utf-8",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut orchestrator = orchestrator_for(&server);
    assert!(orchestrator.report_view().placeholder_visible);

    orchestrator.set_transcript("Alice: let's ship by Friday.");
    orchestrator.set_meeting_id("");
    orchestrator.submit();

    assert_eq!(orchestrator.view().ui, UiState::Submitting);
    assert_eq!(
        orchestrator.status_view().current(),
        ("Processing meeting locally…", Severity::Info)
    );
    assert!(!orchestrator.form_inputs().controls_enabled);
    assert_eq!(orchestrator.form_inputs().process_label, "PROCESSING…");

    assert!(orchestrator.wait_for_completion(WAIT));

    assert_eq!(orchestrator.view().ui, UiState::Success);
    assert_eq!(
        orchestrator.status_view().current(),
        ("Done. Report ready.", Severity::Info)
    );
    let form = orchestrator.form_inputs();
    assert!(form.controls_enabled);
    assert!(form.disabled_at_least_once);
    assert_eq!(form.process_label, "PROCESS MEETING");

    let report_view = orchestrator.report_view();
    assert!(!report_view.placeholder_visible);
    let shown = report_view.shown.as_ref().expect("report shown");
    assert_eq!(shown.title, "Meeting Summary – meeting-1700000000000");
    assert_eq!(shown.subtitle, "Generated: 16/10/2026, 10:00:00");
    assert_eq!(
        shown.content_html,
        concat!(
            "<h3>Meeting Summary – meeting-1700000000000</h3>",
            "<div class=\"meta-line\"><em>Date: 16 Oct 2026</em></div>",
            "<br/>",
            "<h3>Summary of Discussion</h3>",
            "<div class=\"bullet\">Ship by Friday</div>",
        )
    );
    assert_eq!(
        report_view.visible_links(),
        vec![
            (
                ArtifactKind::Docx,
                "/artifacts/reports/report-42.docx".to_string()
            ),
            (
                ArtifactKind::Pdf,
                "/artifacts/reports/report-42.pdf".to_string()
            ),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_reports_render_fallback_without_links() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse_transcript/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "meeting_id": "m1",
            "summary": "s",
            "action_items": [{"task": "t1"}]
        })))
        .mount(&server)
        .await;

    let mut orchestrator = orchestrator_for(&server);
    orchestrator.set_transcript("t");
    orchestrator.set_meeting_id("m1");
    orchestrator.submit();
    assert!(orchestrator.wait_for_completion(WAIT));

    let report_view = orchestrator.report_view();
    let shown = report_view.shown.as_ref().expect("report shown");
    assert!(shown
        .content_html
        .starts_with("<h3>Meeting Summary – m1</h3><br/><h3>Summary of Discussion</h3><div>s</div>"));
    assert!(shown
        .content_html
        .contains("<div class=\"list-number\">1. t1</div><div>Owner: Not assigned</div><div>Due: Not specified</div>"));
    assert!(report_view.visible_links().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_text_artifact_falls_back_silently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse_transcript/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "meeting_id": "m1",
            "reports": {"report_text_path": "/out/gone.txt", "report_rtf_path": "/out/r.rtf"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artifacts/reports/gone.txt"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut orchestrator = orchestrator_for(&server);
    orchestrator.set_transcript("t");
    orchestrator.submit();
    assert!(orchestrator.wait_for_completion(WAIT));

    assert_eq!(orchestrator.view().ui, UiState::Success);
    assert_eq!(
        orchestrator.status_view().current(),
        ("Done. Report ready.", Severity::Info)
    );
    let report_view = orchestrator.report_view();
    let shown = report_view.shown.as_ref().expect("report shown");
    assert!(shown.content_html.contains("<h3>Notifications Sent</h3>"));
    assert_eq!(
        report_view.visible_links(),
        vec![(ArtifactKind::Rtf, "/artifacts/reports/r.rtf".to_string())]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_error_shows_detail_and_reenables_controls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse_transcript/"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({"detail": "transcript too short"})),
        )
        .mount(&server)
        .await;

    let mut orchestrator = orchestrator_for(&server);
    orchestrator.set_transcript("t");
    orchestrator.submit();
    assert!(orchestrator.wait_for_completion(WAIT));

    assert_eq!(orchestrator.view().ui, UiState::Error);
    assert_eq!(
        orchestrator.status_view().current(),
        ("Server error: transcript too short", Severity::Error)
    );
    assert!(orchestrator.form_inputs().controls_enabled);
    assert_eq!(orchestrator.form_inputs().process_label, "PROCESS MEETING");
    assert!(orchestrator.report_view().placeholder_visible);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_response_shows_unexpected_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse_transcript/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut orchestrator = orchestrator_for(&server);
    orchestrator.set_transcript("t");
    orchestrator.submit();
    assert!(orchestrator.wait_for_completion(WAIT));

    let (text, severity) = orchestrator.status_view().current();
    assert!(text.starts_with("Unexpected error: invalid response body"), "{text}");
    assert_eq!(severity, Severity::Error);
    assert!(orchestrator.form_inputs().controls_enabled);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blank_transcript_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse_transcript/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut orchestrator = orchestrator_for(&server);
    orchestrator.set_transcript("   \n  ");
    orchestrator.submit();

    assert_eq!(orchestrator.view().ui, UiState::Idle);
    assert!(orchestrator.wait_for_completion(Duration::from_millis(10)));
    assert_eq!(
        orchestrator.status_view().current(),
        (
            "Please paste a meeting transcript to process.",
            Severity::Error
        )
    );
    assert!(orchestrator.form_inputs().controls_enabled);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn clear_discards_late_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse_transcript/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(200))
                .set_body_json(serde_json::json!({"meeting_id": "late"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut orchestrator = orchestrator_for(&server);
    orchestrator.set_transcript("t");
    orchestrator.set_meeting_id("late");
    orchestrator.submit();
    orchestrator.clear();

    let form = orchestrator.form_inputs();
    assert_eq!(form.transcript, "");
    assert_eq!(form.meeting_id, "");
    assert!(form.controls_enabled);
    assert_eq!(orchestrator.status_view().current(), ("", Severity::Info));
    assert!(orchestrator.wait_for_completion(Duration::from_millis(10)));

    std::thread::sleep(Duration::from_millis(600));
    assert_eq!(orchestrator.pump(), 1);

    assert_eq!(orchestrator.view().ui, UiState::Idle);
    assert!(orchestrator.report_view().placeholder_visible);
    assert!(orchestrator.report_view().shown.is_none());
    assert_eq!(orchestrator.status_view().current(), ("", Severity::Info));
}
