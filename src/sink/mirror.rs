//! Append-only audit mirror.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use super::MirrorSink;

/// Mirror sink writing one line per call to any `Write`.
///
/// Best effort: write and flush errors are discarded so the mirror can
/// never fail a log call.
pub struct WriterMirror<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterMirror<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Take back the inner writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl WriterMirror<io::Stderr> {
    /// Mirror to standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl WriterMirror<File> {
    /// Mirror to `path`, creating it and its parent directory if needed and
    /// appending to existing content.
    pub fn append_to(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> MirrorSink for WriterMirror<W> {
    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

impl<W: Write + Send> std::fmt::Debug for WriterMirror<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterMirror").finish_non_exhaustive()
    }
}
