//! Record rendering: single-line or framed multi-line shape.
//!
//! A framed record looks like:
//!
//! ```text
//! ╔════════════════
//! ║ app.main (main.rs:12)
//! ║    Worker.run (worker.rs:40)
//! ╟────────────────
//! ║ appended message
//! ╟────────────────
//! ║ final message
//! ╚════════════════
//! ```

use crate::level::Level;
use crate::stack::{self, Frame};

pub const TOP_BORDER: &str = "╔════════════════════════════════════════════════════════════════════════════════════════";
pub const BOTTOM_BORDER: &str = "╚════════════════════════════════════════════════════════════════════════════════════════";
pub const MIDDLE_BORDER: &str = "╟────────────────────────────────────────────────────────────────────────────────────────";

/// Prefix for every content line inside a frame.
pub const CONTENT_PREFIX: &str = "║ ";

/// Extra indentation per caller-frame header line.
const HEADER_INDENT: &str = "   ";

/// A fully resolved record, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    pub level: Level,
    pub tag: String,
    pub method_count: usize,
    pub print_to_file: bool,
    pub message: String,
    pub appends: Vec<String>,
}

impl Record {
    /// Anything beyond one plain line gets a frame.
    pub fn is_framed(&self) -> bool {
        self.method_count > 0 || !self.appends.is_empty() || self.message.contains('\n')
    }

    /// Caller frames are only looked up when a header will be drawn.
    pub fn needs_stack(&self) -> bool {
        self.method_count > 0
    }
}

/// Render a record into the ordered lines handed to sinks.
pub(crate) fn render(record: &Record, frames: &[Frame]) -> Vec<String> {
    if !record.is_framed() {
        return vec![record.message.clone()];
    }

    let mut lines = vec![TOP_BORDER.to_string()];

    let header = header_lines(frames, record.method_count);
    if !header.is_empty() {
        lines.extend(header);
        lines.push(MIDDLE_BORDER.to_string());
    }

    for append in &record.appends {
        push_content(&mut lines, append);
        lines.push(MIDDLE_BORDER.to_string());
    }

    push_content(&mut lines, &record.message);
    lines.push(BOTTOM_BORDER.to_string());
    lines
}

/// One line per caller frame, oldest requested frame first, each further
/// line indented one more step.
pub(crate) fn header_lines(frames: &[Frame], method_count: usize) -> Vec<String> {
    let Some(offset) = stack::stack_offset(frames) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut indent = String::new();
    for level in (1..=method_count).rev() {
        let Some(frame) = frames.get(offset + level) else {
            continue;
        };
        lines.push(format!("{CONTENT_PREFIX}{indent}{}", frame.describe()));
        indent.push_str(HEADER_INDENT);
    }
    lines
}

fn push_content(lines: &mut Vec<String>, chunk: &str) {
    for line in chunk.lines() {
        lines.push(format!("{CONTENT_PREFIX}{line}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(method_count: usize, message: &str, appends: &[&str]) -> Record {
        Record {
            level: Level::Debug,
            tag: "T".into(),
            method_count,
            print_to_file: false,
            message: message.into(),
            appends: appends.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn frames() -> Vec<Frame> {
        vec![
            Frame::new("ueueo_log::printer::Printer::log", Some("mod.rs"), Some(1)),
            Frame::new("app::service::Worker::run", Some("worker.rs"), Some(40)),
            Frame::new("app::main", Some("main.rs"), Some(12)),
        ]
    }

    #[test]
    fn test_plain_record_is_single_line() {
        let lines = render(&record(0, "hello", &[]), &frames());
        assert_eq!(lines, vec!["hello"]);
    }

    #[test]
    fn test_one_method_renders_five_lines() {
        let lines = render(&record(1, "hello", &[]), &frames());
        assert_eq!(
            lines,
            vec![
                TOP_BORDER.to_string(),
                "║ Worker.run (worker.rs:40)".to_string(),
                MIDDLE_BORDER.to_string(),
                "║ hello".to_string(),
                BOTTOM_BORDER.to_string(),
            ]
        );
    }

    #[test]
    fn test_header_indents_each_deeper_line() {
        let header = header_lines(&frames(), 2);
        assert_eq!(
            header,
            vec!["║ app.main (main.rs:12)", "║    Worker.run (worker.rs:40)"]
        );
    }

    #[test]
    fn test_header_skips_frames_past_the_stack() {
        let header = header_lines(&frames(), 5);
        assert_eq!(header.len(), 2);
        assert_eq!(header[0], "║ app.main (main.rs:12)");
    }

    #[test]
    fn test_missing_caller_renders_no_header_and_no_divider() {
        let lines = render(&record(1, "hello", &[]), &[]);
        assert_eq!(
            lines,
            vec![
                TOP_BORDER.to_string(),
                "║ hello".to_string(),
                BOTTOM_BORDER.to_string()
            ]
        );
    }

    #[test]
    fn test_multiline_message_forces_frame() {
        let lines = render(&record(0, "a\nb", &[]), &[]);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "║ a");
        assert_eq!(lines[2], "║ b");
    }

    #[test]
    fn test_appends_are_separated_by_dividers() {
        let lines = render(&record(0, "done", &["first", "x\ny"]), &[]);
        assert_eq!(
            lines,
            vec![
                TOP_BORDER.to_string(),
                "║ first".to_string(),
                MIDDLE_BORDER.to_string(),
                "║ x".to_string(),
                "║ y".to_string(),
                MIDDLE_BORDER.to_string(),
                "║ done".to_string(),
                BOTTOM_BORDER.to_string(),
            ]
        );
    }

    #[test]
    fn test_border_widths() {
        assert_eq!(TOP_BORDER.chars().count(), 89);
        assert_eq!(BOTTOM_BORDER.chars().count(), 89);
        assert_eq!(MIDDLE_BORDER.chars().count(), 89);
    }
}
