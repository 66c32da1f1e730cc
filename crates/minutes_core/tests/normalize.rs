use minutes_core::{ArtifactKind, MeetingReport, ProcessingResult};

fn normalize(json: serde_json::Value, submitted: &str) -> MeetingReport {
    let result: ProcessingResult = serde_json::from_value(json).expect("processing result");
    MeetingReport::normalize(result, submitted)
}

#[test]
fn alternate_collection_names_are_used_when_primary_is_absent() {
    let report = normalize(
        serde_json::json!({
            "actions_extracted": [{"task": "a"}],
            "created_issues": [{"id": "I-1", "summary": "a"}]
        }),
        "m1",
    );
    assert_eq!(report.action_items.len(), 1);
    assert_eq!(report.tasks.len(), 1);
    assert_eq!(report.tasks[0].id.as_deref(), Some("I-1"));
}

#[test]
fn present_but_empty_primary_collection_wins() {
    let report = normalize(
        serde_json::json!({
            "action_items": [],
            "actions_extracted": [{"task": "a"}]
        }),
        "m1",
    );
    assert!(report.action_items.is_empty());
}

#[test]
fn missing_meeting_id_falls_back_to_submitted_one() {
    let report = normalize(serde_json::json!({"summary": "s"}), "meeting-123");
    assert_eq!(report.meeting_id, "meeting-123");
    assert_eq!(report.summary, "s");
}

#[test]
fn scalar_fields_of_other_types_are_stringified() {
    let report = normalize(
        serde_json::json!({
            "meeting_id": 42,
            "tasks": [{"id": 7, "summary": "x", "assignee": null}],
            "notifications": [{"issue": 7, "email_status": true}],
            "extra": {"ignored": [1, 2]}
        }),
        "m",
    );
    assert_eq!(report.meeting_id, "42");
    assert_eq!(report.tasks[0].id.as_deref(), Some("7"));
    assert_eq!(report.tasks[0].assignee, None);
    assert_eq!(report.notifications[0].email_status.as_deref(), Some("true"));
}

#[test]
fn missing_reports_yield_no_links_or_text_artifact() {
    let report = normalize(serde_json::json!({"meeting_id": "m1"}), "m1");
    assert!(report.download_links().is_empty());
    assert_eq!(report.text_artifact(), None);
}

#[test]
fn links_only_for_present_non_empty_paths() {
    let report = normalize(
        serde_json::json!({
            "reports": {
                "report_text_path": "artifacts/reports/report_m1.txt",
                "report_docx_path": "/var/data/out/report-42.docx",
                "report_pdf_path": "",
                "report_rtf_path": null
            }
        }),
        "m1",
    );
    assert_eq!(report.text_artifact(), Some("report_m1.txt"));
    let links = report.download_links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].kind, ArtifactKind::Docx);
    assert_eq!(links[0].file_name, "report-42.docx");
    assert_eq!(links[0].href, "/artifacts/reports/report-42.docx");
}

#[test]
fn backslash_paths_give_the_same_link() {
    let forward = normalize(
        serde_json::json!({"reports": {"report_pdf_path": "/var/data/out/report-42.pdf"}}),
        "m1",
    );
    let backward = normalize(
        serde_json::json!({"reports": {"report_pdf_path": "C:\\data\\out\\report-42.pdf"}}),
        "m1",
    );
    assert_eq!(forward.download_links(), backward.download_links());
}

#[test]
fn link_targets_percent_encode_the_file_name() {
    let report = normalize(
        serde_json::json!({"reports": {"report_rtf_path": "/out/weekly #3 v2?.rtf"}}),
        "m1",
    );
    let links = report.download_links();
    assert_eq!(links[0].file_name, "weekly #3 v2?.rtf");
    assert_eq!(links[0].href, "/artifacts/reports/weekly%20%233%20v2%3F.rtf");
}

#[test]
fn nested_values_in_text_fields_keep_their_json_text() {
    let report = normalize(
        serde_json::json!({
            "meeting_id": "m1",
            "action_items": [{"task": "Ship", "owner": {"name": "A"}, "due": 1.5}],
            "notifications": [{"issue": ["X-1"], "email_status": null}]
        }),
        "m1",
    );
    assert_eq!(report.action_items[0].owner.as_deref(), Some(r#"{"name":"A"}"#));
    assert_eq!(report.action_items[0].due.as_deref(), Some("1.5"));
    assert_eq!(report.notifications[0].issue.as_deref(), Some(r#"["X-1"]"#));
    assert_eq!(report.notifications[0].email_status, None);
}
