use std::fmt::Write;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use minutes_core::{escape, ReportViewModel};

use crate::{report_file_name, AtomicFileWriter, PersistError};

const STYLE: &str = "body{font-family:sans-serif;max-width:52rem;margin:2rem auto;color:#111827}\
h3{color:#13478a}.meta-line{color:#6b7280}.list-number{font-weight:600;margin-top:.5rem}\
.bullet::before{content:'• '}.downloads a{margin-right:1rem}";

/// Standalone HTML page for a rendered report. Download links are made absolute
/// against `base_url`.
pub fn build_report_page(report: &ReportViewModel, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let mut page = String::with_capacity(report.content_html.len() + 1024);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>{}</title>", escape(&report.title));
    let _ = writeln!(page, "<style>{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(page, "<h2>{}</h2>", escape(&report.title));
    let _ = writeln!(page, "<p class=\"meta-line\">{}</p>", escape(&report.subtitle));
    if !report.links.is_empty() {
        page.push_str("<p class=\"downloads\">");
        for link in &report.links {
            let _ = write!(
                page,
                "<a href=\"{base}{href}\" download>Download {label}</a>",
                href = escape(&link.href).replace('"', "&quot;"),
                label = link.kind.label(),
            );
        }
        page.push_str("</p>\n");
    }
    let _ = writeln!(page, "<div id=\"r-content\">{}</div>", report.content_html);
    page.push_str("</body>\n</html>\n");
    page
}

/// Writes the report page into `dir` and returns its path.
pub fn export_report_page(
    dir: &Path,
    report: &ReportViewModel,
    base_url: &str,
) -> Result<PathBuf, PersistError> {
    let page = build_report_page(report, base_url);
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    let path = writer.write(&report_file_name(&report.meeting_id), page)?;
    engine_info!("Exported report for {} to {:?}", report.meeting_id, path);
    Ok(path)
}
