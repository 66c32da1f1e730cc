//! Line-oriented structural inference from a plain-text report to an HTML fragment.
//!
//! Every line is classified on its own, with no look-ahead or look-behind. Anything
//! the rules do not recognize degrades to a plain line.

use crate::escape::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Heading,
    Meta,
    SectionHeader,
    NumberedItem,
    Bullet,
    Blank,
    Plain,
}

/// One classified report line. `text` is trimmed and already stripped of any
/// marker the role consumes (trailing colon, bullet dash).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderableLine<'a> {
    pub role: LineRole,
    pub text: &'a str,
}

type Rule = fn(&str) -> Option<&str>;

/// Evaluated top to bottom; the first matching rule wins.
const RULES: &[(LineRole, Rule)] = &[
    (LineRole::Heading, heading),
    (LineRole::Meta, meta),
    (LineRole::SectionHeader, section_header),
    (LineRole::NumberedItem, numbered_item),
    (LineRole::Bullet, bullet),
];

pub fn classify(raw: &str) -> RenderableLine<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return RenderableLine {
            role: LineRole::Blank,
            text: line,
        };
    }
    RULES
        .iter()
        .find_map(|(role, rule)| rule(line).map(|text| RenderableLine { role: *role, text }))
        .unwrap_or(RenderableLine {
            role: LineRole::Plain,
            text: line,
        })
}

/// Converts a plain-text report into an HTML fragment, one element per line.
pub fn render(report: &str) -> String {
    let mut html = String::with_capacity(report.len() * 2);
    for raw in report.split('\n') {
        push_fragment(&mut html, classify(raw));
    }
    html
}

fn push_fragment(html: &mut String, line: RenderableLine<'_>) {
    let (open, close) = match line.role {
        LineRole::Blank => {
            html.push_str("<br/>");
            return;
        }
        LineRole::Heading | LineRole::SectionHeader => ("<h3>", "</h3>"),
        LineRole::Meta => ("<div class=\"meta-line\"><em>", "</em></div>"),
        LineRole::NumberedItem => ("<div class=\"list-number\">", "</div>"),
        LineRole::Bullet => ("<div class=\"bullet\">", "</div>"),
        LineRole::Plain => ("<div>", "</div>"),
    };
    html.push_str(open);
    html.push_str(&escape(line.text));
    html.push_str(close);
}

fn heading(line: &str) -> Option<&str> {
    line.starts_with("Meeting Summary").then_some(line)
}

fn meta(line: &str) -> Option<&str> {
    line.starts_with("Date:").then_some(line)
}

// Multi-word label ending in a colon; a single token like `Note:` stays plain.
fn section_header(line: &str) -> Option<&str> {
    let label = line.strip_suffix(':')?;
    label.contains(' ').then_some(label)
}

fn numbered_item(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    rest.starts_with(char::is_whitespace).then_some(line)
}

fn bullet(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
}
