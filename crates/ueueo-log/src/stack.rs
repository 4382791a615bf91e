//! Caller introspection: capture the current call stack and find the first
//! frame outside the logging library.
//!
//! Frame-skip counts differ between platforms, optimization levels and
//! inlining decisions, so the caller is located by symbol name rather than
//! by a fixed depth.

/// Symbol path prefixes owned by the logging library.
const LIBRARY_PATHS: [&str; 3] = [
    "ueueo_log::printer::Printer",
    "ueueo_log::facade::",
    "ueueo_log::stack::",
];

/// Runtime frames that may sit between the library and its caller.
const RUNTIME_PATHS: [&str; 4] = ["std::", "core::", "alloc::", "backtrace::"];

const CLOSURE_SUFFIX: &str = "::{{closure}}";

/// One symbolized stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Demangled symbol path without the hash suffix
    pub symbol: String,
    /// Source file name (no directories)
    pub file: Option<String>,
    /// Source line
    pub line: Option<u32>,
}

impl Frame {
    pub fn new(symbol: impl Into<String>, file: Option<&str>, line: Option<u32>) -> Self {
        Self {
            symbol: symbol.into(),
            file: file.map(str::to_string),
            line,
        }
    }

    /// `<Type>.<method> (<file>:<line>)`
    pub fn describe(&self) -> String {
        let (owner, method) = split_symbol(&self.symbol);
        let file = self.file.as_deref().unwrap_or("unknown");
        match self.line {
            Some(line) => format!("{owner}.{method} ({file}:{line})"),
            None => format!("{owner}.{method} ({file})"),
        }
    }

    fn path(&self) -> &str {
        self.symbol.trim_start_matches('<')
    }

    fn is_library(&self) -> bool {
        LIBRARY_PATHS.iter().any(|prefix| self.path().starts_with(prefix))
    }

    fn is_runtime(&self) -> bool {
        RUNTIME_PATHS.iter().any(|prefix| self.path().starts_with(prefix))
    }
}

/// Something that can capture the calling thread's stack, innermost frame
/// first.
pub trait StackSource: Send + Sync {
    fn capture(&self) -> Vec<Frame>;
}

/// Captures and symbolizes frames with the `backtrace` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BacktraceSource;

impl StackSource for BacktraceSource {
    fn capture(&self) -> Vec<Frame> {
        let trace = backtrace::Backtrace::new();
        trace
            .frames()
            .iter()
            .flat_map(|frame| frame.symbols())
            .map(|symbol| Frame {
                symbol: symbol
                    .name()
                    .map(|name| format!("{name:#}"))
                    .unwrap_or_default(),
                file: symbol
                    .filename()
                    .and_then(|path| path.file_name())
                    .map(|name| name.to_string_lossy().into_owned()),
                line: symbol.lineno(),
            })
            .collect()
    }
}

/// Index just before the first frame that belongs to the caller.
///
/// Frames before the library's own frames (the capture machinery) are
/// skipped, then library and runtime frames are walked over. `None` means
/// no caller frame could be found and no header should be rendered.
pub fn stack_offset(frames: &[Frame]) -> Option<usize> {
    let start = frames.iter().position(Frame::is_library)?;
    frames
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, frame)| !frame.is_library() && !frame.is_runtime())
        .map(|(index, _)| index - 1)
}

/// Split a symbol into its owning type (or module) and method name.
fn split_symbol(symbol: &str) -> (String, String) {
    let mut symbol = symbol;
    while let Some(stripped) = symbol.strip_suffix(CLOSURE_SUFFIX) {
        symbol = stripped;
    }

    // `<Type as Trait>::method` and `<Type>::method`
    if let Some(rest) = symbol.strip_prefix('<') {
        if let Some(close) = matching_angle(rest) {
            let qualified = &rest[..close];
            let owner = qualified.split(" as ").next().unwrap_or(qualified);
            let method = rest[close + 1..].trim_start_matches("::");
            return (last_segment(owner), last_segment(method));
        }
    }

    let path = strip_generics(symbol);
    let mut segments = path.rsplit("::");
    let method = segments.next().unwrap_or_default().to_string();
    let owner = segments.next().unwrap_or_default().to_string();
    (owner, method)
}

/// Position of the `>` closing an already-opened `<`.
fn matching_angle(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (index, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn strip_generics(s: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.trim_end_matches("::").to_string()
}

fn last_segment(path: &str) -> String {
    let path = strip_generics(path);
    path.rsplit("::").next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(symbol: &str) -> Frame {
        Frame::new(symbol, Some("lib.rs"), Some(1))
    }

    #[test]
    fn test_describe_method_on_type() {
        let f = Frame::new("app::service::Worker::run", Some("worker.rs"), Some(42));
        assert_eq!(f.describe(), "Worker.run (worker.rs:42)");
    }

    #[test]
    fn test_describe_free_function_and_closure() {
        let f = Frame::new("app::main::{{closure}}", Some("main.rs"), Some(7));
        assert_eq!(f.describe(), "app.main (main.rs:7)");
    }

    #[test]
    fn test_describe_trait_impl() {
        let f = Frame::new(
            "<app::model::User as core::fmt::Display>::fmt",
            Some("model.rs"),
            Some(3),
        );
        assert_eq!(f.describe(), "User.fmt (model.rs:3)");
    }

    #[test]
    fn test_describe_generic_method() {
        let f = Frame::new("app::Cache<K, V>::get::<u32>", None, None);
        assert_eq!(f.describe(), "Cache.get (unknown)");
    }

    #[test]
    fn test_stack_offset_skips_capture_and_library_frames() {
        let frames = vec![
            frame("backtrace::backtrace::trace"),
            frame("<ueueo_log::stack::BacktraceSource as ueueo_log::stack::StackSource>::capture"),
            frame("ueueo_log::printer::Printer::log"),
            frame("ueueo_log::printer::Printer::d"),
            frame("ueueo_log::facade::d"),
            frame("app::main"),
        ];
        assert_eq!(stack_offset(&frames), Some(4));
    }

    #[test]
    fn test_stack_offset_walks_over_runtime_frames() {
        let frames = vec![
            frame("ueueo_log::printer::Printer::log"),
            frame("std::thread::local::LocalKey<T>::with"),
            frame("ueueo_log::facade::d"),
            frame("core::ops::function::FnOnce::call_once"),
            frame("app::worker"),
        ];
        assert_eq!(stack_offset(&frames), Some(3));
    }

    #[test]
    fn test_stack_offset_without_caller() {
        let only_library = vec![frame("ueueo_log::printer::Printer::log")];
        assert_eq!(stack_offset(&only_library), None);

        let no_library = vec![frame("app::main")];
        assert_eq!(stack_offset(&no_library), None);

        assert_eq!(stack_offset(&[]), None);
    }

    #[test]
    fn test_backtrace_source_captures_frames() {
        let frames = BacktraceSource.capture();
        assert!(!frames.is_empty());
    }
}
