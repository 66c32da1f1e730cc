use crate::result::MeetingReport;

const NOT_ASSIGNED: &str = "Not assigned";
const NOT_SPECIFIED: &str = "Not specified";
const NO_OWNER: &str = "No owner";
const UNTITLED_ACTION: &str = "Untitled action";
const UNKNOWN_STATUS: &str = "unknown";

/// Builds the plain-text report client side when the server-rendered one is unavailable.
///
/// The section labels keep their multi-word `Label:` shape so that [`crate::render`]
/// classifies them as section headers.
pub fn synthesize(report: &MeetingReport) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Meeting Summary – {}", report.meeting_id));
    lines.push(String::new());
    lines.push("Summary of Discussion:".to_string());
    lines.push(report.summary.clone());
    lines.push(String::new());

    lines.push("Extracted Action Items:".to_string());
    for (idx, item) in report.action_items.iter().enumerate() {
        let task = item.task.as_deref().unwrap_or(UNTITLED_ACTION);
        lines.push(format!("{}. {task}", idx + 1));
        lines.push(format!(
            "   Owner: {}",
            item.owner.as_deref().unwrap_or(NOT_ASSIGNED)
        ));
        lines.push(format!(
            "   Due: {}",
            item.due.as_deref().unwrap_or(NOT_SPECIFIED)
        ));
        lines.push(String::new());
    }

    lines.push("Tasks Created:".to_string());
    for task in &report.tasks {
        lines.push(format!(
            "- {} – {} (Owner: {}; Due: {})",
            task.id.as_deref().unwrap_or_default(),
            task.summary.as_deref().unwrap_or_default(),
            task.assignee.as_deref().unwrap_or(NO_OWNER),
            task.due.as_deref().unwrap_or(NOT_SPECIFIED),
        ));
    }
    lines.push(String::new());

    lines.push("Notifications Sent:".to_string());
    for notification in &report.notifications {
        lines.push(format!(
            "- Issue {} -> status: {}",
            notification.issue.as_deref().unwrap_or_default(),
            notification
                .email_status
                .as_deref()
                .filter(|status| !status.is_empty())
                .unwrap_or(UNKNOWN_STATUS),
        ));
    }

    lines.join("\n")
}
