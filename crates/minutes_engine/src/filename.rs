use sha2::{Digest, Sha256};

/// Windows-safe, deterministic file name for an exported report:
/// `{sanitized_meeting_id}--{short_hash(meeting_id)}.html`.
///
/// The hash keeps ids that sanitize to the same text apart.
pub fn report_file_name(meeting_id: &str) -> String {
    let sanitized = sanitize(meeting_id);
    let hash = short_hash(meeting_id);
    format!("{sanitized}--{hash}.html")
}

fn sanitize(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    let mut name = compacted.trim_matches(&['_', ' ', '.'][..]).to_string();
    if name.is_empty() {
        name = "meeting".to_string();
    }
    if name.len() > 80 {
        let mut end = 80;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    if is_reserved_windows_name(&name) {
        name.push('_');
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(4).map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::report_file_name;

    #[test]
    fn unsafe_characters_are_replaced() {
        let name = report_file_name("team: sync/weekly?");
        assert!(name.starts_with("team_ sync_weekly--"), "{name}");
        assert!(name.ends_with(".html"));
    }

    #[test]
    fn name_is_stable_and_distinguishes_ids() {
        assert_eq!(report_file_name("m1"), report_file_name("m1"));
        assert_ne!(report_file_name("a/b"), report_file_name("a:b"));
    }

    #[test]
    fn reserved_and_empty_names_are_patched() {
        assert!(report_file_name("nul").starts_with("nul_--"));
        assert!(report_file_name("...").starts_with("meeting--"));
    }

    #[test]
    fn long_ids_are_truncated_on_char_boundary() {
        let id = "é".repeat(60);
        let name = report_file_name(&id);
        let stem = name.split("--").next().unwrap();
        assert!(stem.len() <= 80);
    }
}
