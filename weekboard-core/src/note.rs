//! Reading and writing the daily-note markdown format.
//!
//! A daily note is a heading followed by one list item per task:
//!
//! ```text
//! # 2026-02-05
//!
//! - [x] Buy milk
//! - [ ] Call dentist
//! - Plain note
//! ```
//!
//! Only the two list-item shapes are recognized. Heading lines, blank lines
//! and anything else are skipped without error, so stray prose in a note
//! survives until the next write but never shows up on the board.

use crate::date::NoteDate;
use crate::task::{Task, TaskFormat};

/// Parse note content into its task list, in file order.
pub fn parse_note(content: &str) -> Vec<Task> {
    content.lines().filter_map(parse_line).collect()
}

/// Serialize a task list back to note content: heading, blank line, one
/// list item per task.
///
/// Task text is written as-is; parsing is the side that trims, so a list
/// that came out of [`parse_note`] reproduces itself exactly.
pub fn serialize_note(date: NoteDate, tasks: &[Task]) -> String {
    let mut content = format!("# {date}\n\n");

    for task in tasks {
        let line = match (task.format, task.completed) {
            (TaskFormat::Checkbox, true) => format!("- [x] {}\n", task.text),
            (TaskFormat::Checkbox, false) => format!("- [ ] {}\n", task.text),
            (TaskFormat::Plain, _) => format!("- {}\n", task.text),
        };
        content.push_str(&line);
    }

    content
}

fn parse_line(line: &str) -> Option<Task> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if let Some((completed, text)) = parse_checkbox(line) {
        return Some(Task {
            text: text.to_string(),
            completed,
            format: TaskFormat::Checkbox,
        });
    }

    parse_plain(line).map(|text| Task {
        text: text.to_string(),
        completed: false,
        format: TaskFormat::Plain,
    })
}

/// Match `- [<marker>] <text>` where the marker is a space, `x` or `X`.
///
/// Lines that look like a checkbox but miss the shape (unknown marker, no
/// text after the brackets) are not errors; they fall through to the plain
/// pattern and keep their brackets as text.
fn parse_checkbox(line: &str) -> Option<(bool, &str)> {
    let rest = line.strip_prefix('-')?.trim_start();
    let rest = rest.strip_prefix('[')?;

    let mut chars = rest.chars();
    let marker = chars.next()?;
    if marker != ' ' && !marker.eq_ignore_ascii_case(&'x') {
        return None;
    }

    let rest = chars.as_str().strip_prefix(']')?;
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }

    Some((marker.eq_ignore_ascii_case(&'x'), text))
}

/// Match `- <text>`, requiring whitespace between the dash and the text.
fn parse_plain(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NoteDate {
        s.parse().unwrap()
    }

    fn checkbox(text: &str, completed: bool) -> Task {
        Task {
            text: text.to_string(),
            completed,
            format: TaskFormat::Checkbox,
        }
    }

    fn plain(text: &str) -> Task {
        Task {
            text: text.to_string(),
            completed: false,
            format: TaskFormat::Plain,
        }
    }

    #[test]
    fn test_parse_mixed_note() {
        let content = "# 2026-02-05\n\n- [x] Buy milk\n- [ ] Call dentist\n- Plain note\n";
        let tasks = parse_note(content);

        assert_eq!(
            tasks,
            vec![
                checkbox("Buy milk", true),
                checkbox("Call dentist", false),
                plain("Plain note"),
            ]
        );
    }

    #[test]
    fn test_parse_skips_headings_and_blank_lines() {
        let content = "# 2026-02-05\n\n## Morning\n- [ ] One\n\n# Another heading\n- Two\n";
        let tasks = parse_note(content);
        assert_eq!(tasks, vec![checkbox("One", false), plain("Two")]);
    }

    #[test]
    fn test_parse_drops_unrecognized_lines() {
        let content = "Some prose\n* star item\n-nospace\n1. numbered\n- [ ] Kept\n";
        let tasks = parse_note(content);
        assert_eq!(tasks, vec![checkbox("Kept", false)]);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let tasks = parse_note("   - [ ]   padded text   \n\t- \t tabbed \n");
        assert_eq!(tasks, vec![checkbox("padded text", false), plain("tabbed")]);
    }

    #[test]
    fn test_parse_marker_case_and_spacing() {
        let tasks = parse_note("- [X] Shouted\n-[x] Tight\n");
        assert_eq!(tasks, vec![checkbox("Shouted", true), checkbox("Tight", true)]);
    }

    #[test]
    fn test_parse_unknown_marker_falls_back_to_plain() {
        let tasks = parse_note("- [y] Maybe\n");
        assert_eq!(tasks, vec![plain("[y] Maybe")]);
    }

    #[test]
    fn test_parse_checkbox_without_text_falls_back_to_plain() {
        let tasks = parse_note("- [x]\n- [ ]   \n");
        assert_eq!(tasks, vec![plain("[x]"), plain("[ ]")]);
    }

    #[test]
    fn test_serialize_empty_list_is_heading_only() {
        let content = serialize_note(date("2026-02-05"), &[]);
        assert_eq!(content, "# 2026-02-05\n\n");
    }

    #[test]
    fn test_serialize_all_formats() {
        let tasks = vec![
            checkbox("Buy milk", true),
            checkbox("Call dentist", false),
            plain("Plain note"),
        ];
        let content = serialize_note(date("2026-02-05"), &tasks);
        assert_eq!(
            content,
            "# 2026-02-05\n\n- [x] Buy milk\n- [ ] Call dentist\n- Plain note\n"
        );
    }

    #[test]
    fn test_roundtrip_preserves_tasks() {
        let tasks = vec![
            checkbox("Buy milk", true),
            plain("Plain note"),
            checkbox("Call dentist", false),
        ];
        let reparsed = parse_note(&serialize_note(date("2026-02-05"), &tasks));
        assert_eq!(reparsed, tasks);
    }

    #[test]
    fn test_reserializing_messy_input_is_stable() {
        let messy = "# heading\nnoise line\n  - [X]  Loud  \n- [ ] quiet\n- note\n";
        let first = parse_note(messy);
        let second = parse_note(&serialize_note(date("2026-02-05"), &first));
        assert_eq!(second, first);
    }
}
