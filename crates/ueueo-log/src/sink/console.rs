//! Console sink: logcat-style lines on stderr.

use console::{Style, Term};

use super::Sink;
use crate::level::Level;

/// Writes `<Letter>/<tag>: <line>` to stderr, colored per level when the
/// terminal supports it.
///
/// stdout is left alone so applications can keep it for data output.
pub struct ConsoleSink {
    term: Term,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn style_for(level: Level) -> Style {
        let style = Style::new().for_stderr();
        match level {
            Level::Verbose | Level::None => style.dim(),
            Level::Debug => style.cyan(),
            Level::Info => style.green(),
            Level::Warn => style.yellow(),
            Level::Error => style.red(),
            Level::Assert => style.red().bold(),
        }
    }

    fn print(&self, level: Level, tag: &str, line: &str) {
        let text = format_console_line(level, tag, line);
        let styled = Self::style_for(level).apply_to(text);
        // Console output is best-effort
        let _ = self.term.write_line(&styled.to_string());
    }
}

/// Plain (unstyled) console line.
pub(crate) fn format_console_line(level: Level, tag: &str, line: &str) -> String {
    let letter = match level {
        Level::Assert => 'A',
        other => other.letter(),
    };
    format!("{letter}/{tag}: {line}")
}

impl Sink for ConsoleSink {
    fn verbose(&self, tag: &str, line: &str) {
        self.print(Level::Verbose, tag, line);
    }

    fn debug(&self, tag: &str, line: &str) {
        self.print(Level::Debug, tag, line);
    }

    fn info(&self, tag: &str, line: &str) {
        self.print(Level::Info, tag, line);
    }

    fn warn(&self, tag: &str, line: &str) {
        self.print(Level::Warn, tag, line);
    }

    fn error(&self, tag: &str, line: &str) {
        self.print(Level::Error, tag, line);
    }

    fn assert(&self, tag: &str, line: &str) {
        self.print(Level::Assert, tag, line);
    }
}
