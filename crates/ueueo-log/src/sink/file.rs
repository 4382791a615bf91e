//! File sink: one directory per base tag, one file per calendar minute.
//!
//! Layout under the base directory:
//!
//! ```text
//! <dir>/<base tag>/<yyyy-MM-dd HH:mm>.log
//! ```
//!
//! Each line is `<yyyy-MM-dd HH:mm:ss.SSS>: <Letter>/<tag>: <message>\r\n`.
//! The file is opened in append mode, written and closed on every write.

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::{base_tag, Sink};
use crate::level::Level;

/// Directory name used under the platform data directory.
pub const DEFAULT_DIR_NAME: &str = "UELOG";

const BUCKET_FORMAT: &str = "%Y-%m-%d %H:%M";
const LINE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// The file currently open for a base tag.
#[derive(Debug, Clone)]
struct BucketFile {
    bucket: String,
    path: PathBuf,
}

/// Persists lines to per-tag, per-minute log files.
///
/// All I/O failures are swallowed; a failing disk never reaches the caller.
pub struct FileSink {
    dir: PathBuf,
    clock: Clock,
    files: Mutex<HashMap<String, BucketFile>>,
}

impl FileSink {
    /// Create a file sink rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, Arc::new(Local::now))
    }

    /// Create a file sink with a custom time source.
    pub fn with_clock(dir: impl Into<PathBuf>, clock: Clock) -> Self {
        Self {
            dir: dir.into(),
            clock,
            files: Mutex::new(HashMap::new()),
        }
    }

    /// Platform-conventional base directory.
    ///
    /// - macOS: ~/Library/Application Support/UELOG
    /// - Linux: ~/.local/share/UELOG
    /// - Windows: C:\Users\<User>\AppData\Local\UELOG
    ///
    /// Falls back to ./UELOG if directory detection fails.
    pub fn default_dir() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.data_local_dir().join(DEFAULT_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR_NAME))
    }

    fn write_to_file(&self, level: Level, tag: &str, message: &str) {
        let now = (self.clock)();
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);

        let Some(path) = self.current_file(&mut files, base_tag(tag), &now) else {
            return;
        };
        let line = format_file_line(&now, level, tag, message);
        if let Err(e) = append_line(&path, &line) {
            tracing::debug!("File sink write to {} failed: {}", path.display(), e);
        }
    }

    /// Resolve the file for `base` in the minute bucket of `now`, reusing
    /// the cached path while the bucket is unchanged.
    fn current_file(
        &self,
        files: &mut HashMap<String, BucketFile>,
        base: &str,
        now: &DateTime<Local>,
    ) -> Option<PathBuf> {
        let bucket = now.format(BUCKET_FORMAT).to_string();
        if let Some(cached) = files.get(base) {
            if cached.bucket == bucket {
                return Some(cached.path.clone());
            }
        }

        let tag_dir = self.dir.join(base);
        if let Err(e) = std::fs::create_dir_all(&tag_dir) {
            tracing::debug!("File sink could not create {}: {}", tag_dir.display(), e);
            return None;
        }

        let path = tag_dir.join(format!("{bucket}.log"));
        files.insert(
            base.to_string(),
            BucketFile {
                bucket,
                path: path.clone(),
            },
        );
        Some(path)
    }
}

fn format_file_line(now: &DateTime<Local>, level: Level, tag: &str, message: &str) -> String {
    format!(
        "{}: {}/{}: {}\r\n",
        now.format(LINE_TIME_FORMAT),
        level.letter(),
        tag,
        message
    )
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    file.flush()
}

impl Sink for FileSink {
    fn verbose(&self, tag: &str, line: &str) {
        self.write_to_file(Level::Verbose, tag, line);
    }

    fn debug(&self, tag: &str, line: &str) {
        self.write_to_file(Level::Debug, tag, line);
    }

    fn info(&self, tag: &str, line: &str) {
        self.write_to_file(Level::Info, tag, line);
    }

    fn warn(&self, tag: &str, line: &str) {
        self.write_to_file(Level::Warn, tag, line);
    }

    fn error(&self, tag: &str, line: &str) {
        self.write_to_file(Level::Error, tag, line);
    }

    fn assert(&self, tag: &str, line: &str) {
        self.write_to_file(Level::Assert, tag, line);
    }

    fn is_file_backed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// A clock that returns whatever timestamp the test last stored.
    fn manual_clock(start: DateTime<Local>) -> (Arc<AtomicI64>, Clock) {
        let millis = Arc::new(AtomicI64::new(start.timestamp_millis()));
        let handle = Arc::clone(&millis);
        let clock: Clock = Arc::new(move || {
            Local
                .timestamp_millis_opt(handle.load(Ordering::SeqCst))
                .single()
                .unwrap()
        });
        (millis, clock)
    }

    fn log_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        files.sort();
        files
    }

    fn start_of_minute() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 1).single().unwrap()
    }

    #[test]
    fn test_same_minute_appends_to_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let (_millis, clock) = manual_clock(start_of_minute());
        let sink = FileSink::with_clock(dir.path(), clock);

        sink.info("UEUEO[main]", "first");
        sink.warn("UEUEO[worker-1]", "second");

        let files = log_files(&dir.path().join("UEUEO"));
        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].file_name().unwrap().to_string_lossy(),
            "2024-03-09 14:05.log"
        );

        let content = std::fs::read_to_string(&files[0]).unwrap();
        let lines: Vec<&str> = content.split_terminator("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "2024-03-09 14:05:01.000: I/UEUEO[main]: first");
        assert_eq!(lines[1], "2024-03-09 14:05:01.000: W/UEUEO[worker-1]: second");
    }

    #[test]
    fn test_next_minute_opens_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let start = start_of_minute();
        let (millis, clock) = manual_clock(start);
        let sink = FileSink::with_clock(dir.path(), clock);

        sink.debug("Net", "one");
        millis.store(start.timestamp_millis() + 60_000, Ordering::SeqCst);
        sink.debug("Net", "two");

        let files = log_files(&dir.path().join("Net"));
        assert_eq!(files.len(), 2);
        assert_ne!(files[0], files[1]);
        assert!(std::fs::read_to_string(&files[1]).unwrap().contains("D/Net: two"));
    }

    #[test]
    fn test_assert_is_written_with_error_letter() {
        let dir = tempfile::tempdir().unwrap();
        let (_millis, clock) = manual_clock(start_of_minute());
        let sink = FileSink::with_clock(dir.path(), clock);

        sink.assert("T", "never");
        let files = log_files(&dir.path().join("T"));
        let content = std::fs::read_to_string(&files[0]).unwrap();
        assert!(content.ends_with(": E/T: never\r\n"));
    }

    #[test]
    fn test_unwritable_directory_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let sink = FileSink::new(&blocker);
        sink.error("T", "lost");
        assert!(blocker.is_file());
    }

    #[test]
    fn test_file_sink_is_file_backed() {
        assert!(FileSink::new("/tmp/unused").is_file_backed());
    }
}
