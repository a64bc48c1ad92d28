//! Sink implementations
//!
//! A [`Sink`] pairs a destination with its own threshold and [`Layout`].
//! Destinations are a closed set ([`Destination::Console`] or
//! [`Destination::File`]); each sink serializes its writes behind a mutex so
//! records from different threads never interleave mid-line.

pub mod console;
pub mod file;

pub use console::{CaptureBuffer, ConsoleDestination, ConsoleTarget};
pub use file::FileDestination;

use crate::core::{Layout, LogLevel, LogRecord, LoggerError, Result, TimestampFormat};
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What happened when a record was offered to a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStatus {
    Written,
    BelowThreshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    File,
}

pub enum Destination {
    Console(ConsoleDestination),
    File(FileDestination),
}

impl Destination {
    fn append(&mut self, text: &str, level: LogLevel) -> std::io::Result<()> {
        match self {
            Destination::Console(console) => console.append(text, level),
            Destination::File(file) => file.append(text),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Destination::Console(console) => console.flush(),
            Destination::File(file) => file.flush(),
        }
    }

    fn close(&mut self) -> std::io::Result<()> {
        match self {
            Destination::Console(console) => console.flush(),
            Destination::File(file) => file.close(),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Destination::Console(_) => false,
            Destination::File(file) => file.is_closed(),
        }
    }
}

pub struct Sink {
    id: String,
    threshold: LogLevel,
    layout: Layout,
    kind: SinkKind,
    path: Option<PathBuf>,
    destination: Mutex<Destination>,
}

impl Sink {
    /// Console sink writing to standard output
    pub fn console(id: impl Into<String>, threshold: LogLevel) -> Self {
        Self::with_console_target(id, threshold, ConsoleTarget::Stdout)
    }

    /// Console sink writing to standard error
    pub fn stderr(id: impl Into<String>, threshold: LogLevel) -> Self {
        Self::with_console_target(id, threshold, ConsoleTarget::Stderr)
    }

    /// Console sink writing to any writer, e.g. a [`CaptureBuffer`]
    ///
    /// ```
    /// use birdlog::{CaptureBuffer, LogLevel, LogRecord, Sink};
    ///
    /// let capture = CaptureBuffer::new();
    /// let sink = Sink::console_writer("console", LogLevel::Warn, capture.clone());
    /// sink.write(&LogRecord::new("", LogLevel::Warn, "wren", None)).unwrap();
    /// assert_eq!(capture.lines(), vec!["wren"]);
    /// ```
    pub fn console_writer(
        id: impl Into<String>,
        threshold: LogLevel,
        writer: impl Write + Send + 'static,
    ) -> Self {
        Self::with_console_target(id, threshold, ConsoleTarget::Writer(Box::new(writer)))
    }

    fn with_console_target(id: impl Into<String>, threshold: LogLevel, target: ConsoleTarget) -> Self {
        Self {
            id: id.into(),
            threshold,
            layout: Layout::Message,
            kind: SinkKind::Console,
            path: None,
            destination: Mutex::new(Destination::Console(ConsoleDestination::new(target))),
        }
    }

    /// File sink appending to `path`; the file is created if absent and never truncated
    pub fn file(id: impl Into<String>, threshold: LogLevel, path: impl AsRef<Path>) -> Result<Self> {
        let id = id.into();
        let path = path.as_ref().to_path_buf();
        let file = FileDestination::open(&path).map_err(|e| LoggerError::sink_io(&id, e))?;

        Ok(Self {
            id,
            threshold,
            layout: Layout::Text(TimestampFormat::default()),
            kind: SinkKind::File,
            path: Some(path),
            destination: Mutex::new(Destination::File(file)),
        })
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Color console output by level; ignored by file sinks
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        if let Destination::Console(console) = self.destination.get_mut() {
            console.set_colors(use_colors);
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Format and append one record
    ///
    /// Records below the sink threshold cause no I/O. File appends are flushed
    /// before this returns.
    pub fn write(&self, record: &LogRecord) -> Result<SinkStatus> {
        if !record.level().passes(self.threshold) {
            return Ok(SinkStatus::BelowThreshold);
        }

        let text = self.layout.format(record);

        let mut destination = self.destination.lock();
        if destination.is_closed() {
            return Err(LoggerError::sink_closed(&self.id));
        }
        destination
            .append(&text, record.level())
            .map_err(|e| LoggerError::sink_io(&self.id, e))?;
        Ok(SinkStatus::Written)
    }

    pub fn flush(&self) -> Result<()> {
        let mut destination = self.destination.lock();
        if destination.is_closed() {
            return Ok(());
        }
        destination
            .flush()
            .map_err(|e| LoggerError::sink_io(&self.id, e))
    }

    /// Flush and release the destination. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let mut destination = self.destination.lock();
        if destination.is_closed() {
            return Ok(());
        }
        destination
            .close()
            .map_err(|e| LoggerError::sink_io(&self.id, e))
    }

    pub fn is_closed(&self) -> bool {
        self.destination.lock().is_closed()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("id", &self.id)
            .field("threshold", &self.threshold)
            .field("kind", &self.kind)
            .field("layout", &self.layout)
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cause;
    use tempfile::TempDir;

    #[test]
    fn test_below_threshold_writes_nothing() {
        let capture = CaptureBuffer::new();
        let sink = Sink::console_writer("console", LogLevel::Warn, capture.clone());

        let status = sink
            .write(&LogRecord::new("", LogLevel::Info, "ibis", None))
            .unwrap();
        assert_eq!(status, SinkStatus::BelowThreshold);
        assert!(capture.contents().is_empty());
    }

    #[test]
    fn test_console_sink_writes_message_layout() {
        let capture = CaptureBuffer::new();
        let sink = Sink::console_writer("console", LogLevel::Warn, capture.clone());

        sink.write(&LogRecord::new("", LogLevel::Warn, "wren", None)).unwrap();
        sink.write(&LogRecord::new(
            "",
            LogLevel::Error,
            "egret",
            Some(Cause::new("eagle")),
        ))
        .unwrap();
        sink.write(&LogRecord::catching("", LogLevel::Fatal, Cause::new("finch")))
            .unwrap();

        assert_eq!(capture.lines(), vec!["wren", "egret eagle", "Catching finch"]);
    }

    #[test]
    fn test_file_sink_appends_and_closes() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("debug.log");

        let sink = Sink::file("file", LogLevel::Trace, &path).unwrap();
        assert_eq!(sink.kind(), SinkKind::File);
        assert_eq!(sink.path(), Some(path.as_path()));

        sink.write(&LogRecord::new("", LogLevel::Trace, "tucan", None)).unwrap();

        // Durable on return, no explicit flush needed
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("root - tucan\n"));

        sink.close().unwrap();
        assert!(sink.is_closed());
        sink.close().unwrap();

        let err = sink
            .write(&LogRecord::new("", LogLevel::Warn, "wren", None))
            .unwrap_err();
        assert!(matches!(err, LoggerError::SinkClosed { ref sink_id } if sink_id == "file"));
    }

    #[test]
    fn test_file_sink_open_failure_is_sink_io() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing").join("debug.log");

        let err = Sink::file("file", LogLevel::Trace, &path).unwrap_err();
        assert!(matches!(err, LoggerError::SinkIo { ref sink_id, .. } if sink_id == "file"));
    }

    #[test]
    fn test_custom_layout_is_used() {
        let capture = CaptureBuffer::new();
        let sink = Sink::console_writer("console", LogLevel::Trace, capture.clone())
            .with_layout(Layout::custom(|r| format!("{} {}", r.level(), r.message())));

        sink.write(&LogRecord::new("", LogLevel::Debug, "duck", None)).unwrap();
        assert_eq!(capture.lines(), vec!["DEBUG duck"]);
    }

    #[test]
    fn test_console_close_keeps_sink_usable() {
        let capture = CaptureBuffer::new();
        let sink = Sink::console_writer("console", LogLevel::Trace, capture.clone());
        sink.close().unwrap();
        assert!(!sink.is_closed());
        sink.write(&LogRecord::new("", LogLevel::Info, "ibis", None)).unwrap();
        assert_eq!(capture.lines(), vec!["ibis"]);
    }

    struct FailingWriter;

    impl std::io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_write_failure_is_sink_io() {
        let sink = Sink::console_writer("pipe", LogLevel::Trace, FailingWriter);

        let err = sink
            .write(&LogRecord::new("", LogLevel::Warn, "wren", None))
            .unwrap_err();
        assert!(matches!(err, LoggerError::SinkIo { ref sink_id, .. } if sink_id == "pipe"));
        assert!(!sink.is_closed());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_write_failure_is_sink_io() {
        let sink = Sink::file("full", LogLevel::Trace, "/dev/full").unwrap();

        let err = sink
            .write(&LogRecord::new("", LogLevel::Error, "egret", None))
            .unwrap_err();
        match err {
            LoggerError::SinkIo { sink_id, source } => {
                assert_eq!(sink_id, "full");
                assert_eq!(source.raw_os_error(), Some(28));
            }
            other => panic!("expected SinkIo, got {:?}", other),
        }

        // The failed record is not retried by a later flush
        sink.flush().unwrap();
    }
}
