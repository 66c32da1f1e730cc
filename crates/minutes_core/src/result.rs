//! Backend response shapes and the single normalization step applied at the boundary.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Path under which the backend serves generated report artifacts.
pub const ARTIFACT_BASE_PATH: &str = "/artifacts/reports/";

/// Raw JSON body of a successful `/parse_transcript/` call. Every field is optional
/// and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ProcessingResult {
    #[serde(deserialize_with = "loose_text")]
    pub meeting_id: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub summary: Option<String>,
    pub action_items: Option<Vec<ActionItem>>,
    pub actions_extracted: Option<Vec<ActionItem>>,
    pub tasks: Option<Vec<CreatedTask>>,
    pub created_issues: Option<Vec<CreatedTask>>,
    pub notifications: Option<Vec<Notification>>,
    pub reports: Option<ReportPaths>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ActionItem {
    #[serde(deserialize_with = "loose_text")]
    pub task: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub owner: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub due: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CreatedTask {
    #[serde(deserialize_with = "loose_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub assignee: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub due: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Notification {
    #[serde(deserialize_with = "loose_text")]
    pub issue: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub email_status: Option<String>,
}

/// Filesystem-style paths of the generated artifacts. Only the final segment matters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ReportPaths {
    #[serde(deserialize_with = "loose_text")]
    pub report_text_path: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub report_docx_path: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub report_pdf_path: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub report_rtf_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Text,
    Docx,
    Pdf,
    Rtf,
}

impl ArtifactKind {
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Text => "TXT",
            ArtifactKind::Docx => "DOCX",
            ArtifactKind::Pdf => "PDF",
            ArtifactKind::Rtf => "RTF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub href: String,
}

/// Normalized processing result. Alternate field names are resolved, empty strings
/// are treated as absent and collections default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeetingReport {
    pub meeting_id: String,
    pub summary: String,
    pub action_items: Vec<ActionItem>,
    pub tasks: Vec<CreatedTask>,
    pub notifications: Vec<Notification>,
    pub reports: Option<ReportPaths>,
}

impl MeetingReport {
    /// `submitted_meeting_id` stands in when the response carries no `meeting_id`.
    pub fn normalize(result: ProcessingResult, submitted_meeting_id: &str) -> Self {
        let action_items = result
            .action_items
            .or(result.actions_extracted)
            .unwrap_or_default()
            .into_iter()
            .map(|item| ActionItem {
                task: item.task,
                owner: non_empty(item.owner),
                due: non_empty(item.due),
            })
            .collect();
        let tasks = result
            .tasks
            .or(result.created_issues)
            .unwrap_or_default()
            .into_iter()
            .map(|task| CreatedTask {
                assignee: non_empty(task.assignee),
                due: non_empty(task.due),
                ..task
            })
            .collect();

        Self {
            meeting_id: non_empty(result.meeting_id)
                .unwrap_or_else(|| submitted_meeting_id.to_string()),
            summary: result.summary.unwrap_or_default(),
            action_items,
            tasks,
            notifications: result.notifications.unwrap_or_default(),
            reports: result.reports,
        }
    }

    fn artifact_path(&self, kind: ArtifactKind) -> Option<&str> {
        let reports = self.reports.as_ref()?;
        let path = match kind {
            ArtifactKind::Text => &reports.report_text_path,
            ArtifactKind::Docx => &reports.report_docx_path,
            ArtifactKind::Pdf => &reports.report_pdf_path,
            ArtifactKind::Rtf => &reports.report_rtf_path,
        };
        path.as_deref()
    }

    /// File name of the server-rendered text report, if one was produced.
    pub fn text_artifact(&self) -> Option<&str> {
        self.artifact_path(ArtifactKind::Text)
            .and_then(artifact_file_name)
    }

    /// Download links for the docx, pdf and rtf artifacts that are present.
    pub fn download_links(&self) -> Vec<DownloadLink> {
        [ArtifactKind::Docx, ArtifactKind::Pdf, ArtifactKind::Rtf]
            .into_iter()
            .filter_map(|kind| {
                let file_name = self.artifact_path(kind).and_then(artifact_file_name)?;
                Some(DownloadLink {
                    kind,
                    file_name: file_name.to_string(),
                    href: artifact_href(file_name),
                })
            })
            .collect()
    }
}

/// Final segment of a path, splitting on both `/` and `\`. Empty segments yield `None`.
pub fn artifact_file_name(path: &str) -> Option<&str> {
    path.rsplit(['/', '\\']).next().filter(|name| !name.is_empty())
}

/// Link target for an artifact. The file name is percent-encoded as one path segment.
pub fn artifact_href(file_name: &str) -> String {
    format!("{ARTIFACT_BASE_PATH}{}", urlencoding::encode(file_name))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// Any JSON value is accepted so a numeric id or a nested status object does not reject
// the whole response. Non-strings keep their compact JSON text.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }))
}
