//! Console destination

use crate::core::LogLevel;
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

pub enum ConsoleTarget {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

/// Writes each record immediately and flushes; nothing is buffered
pub struct ConsoleDestination {
    target: ConsoleTarget,
    use_colors: bool,
}

impl ConsoleDestination {
    pub fn new(target: ConsoleTarget) -> Self {
        Self {
            target,
            use_colors: false,
        }
    }

    pub fn set_colors(&mut self, use_colors: bool) {
        self.use_colors = use_colors;
    }

    pub(crate) fn append(&mut self, text: &str, level: LogLevel) -> io::Result<()> {
        let line = self.paint(text, level);
        match &mut self.target {
            ConsoleTarget::Stdout => Self::write_line(&mut io::stdout().lock(), &line),
            ConsoleTarget::Stderr => Self::write_line(&mut io::stderr().lock(), &line),
            ConsoleTarget::Writer(writer) => Self::write_line(writer, &line),
        }
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match &mut self.target {
            ConsoleTarget::Stdout => io::stdout().flush(),
            ConsoleTarget::Stderr => io::stderr().flush(),
            ConsoleTarget::Writer(writer) => writer.flush(),
        }
    }

    fn write_line<W: Write + ?Sized>(out: &mut W, line: &str) -> io::Result<()> {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }

    #[cfg(feature = "console")]
    fn paint(&self, text: &str, level: LogLevel) -> String {
        if self.use_colors {
            text.color(level.color_code()).to_string()
        } else {
            text.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, text: &str, _level: LogLevel) -> String {
        text.to_string()
    }
}

/// In-memory console target, handy for asserting on console output
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Captured text split on line breaks, empty lines dropped
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .split(|c: char| c == '\n' || c == '\r')
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
