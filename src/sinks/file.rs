//! Append-only file destination

#[cfg(feature = "file")]
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Owns the open handle until [`close`](FileDestination::close); `None` once closed
///
/// Writes go straight to the file, so a failed append leaves nothing behind
/// to resurface on a later write or on close.
pub struct FileDestination {
    file: Option<File>,
}

impl FileDestination {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Some(file) })
    }

    /// Append `text` plus a newline with a single write
    pub(crate) fn append(&mut self, text: &str) -> io::Result<()> {
        let file = self.file.as_mut().ok_or_else(closed_error)?;

        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');

        #[cfg(feature = "file")]
        FileExt::lock_exclusive(&*file)?;

        let result = file.write_all(line.as_bytes()).and_then(|()| file.flush());

        #[cfg(feature = "file")]
        FileExt::unlock(&*file)?;

        result
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Sync and drop the handle. The destination is closed even if syncing
    /// fails.
    pub(crate) fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(file) => file.sync_all(),
            None => Ok(()),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "file destination closed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_never_truncates() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("debug.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let mut file = FileDestination::open(&path).unwrap();
        file.append("this run").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier run\nthis run\n");
    }

    #[test]
    fn test_append_after_close_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("debug.log");

        let mut file = FileDestination::open(&path).unwrap();
        file.close().unwrap();
        assert!(file.is_closed());
        assert!(file.append("late").is_err());
        file.close().unwrap();
    }

    #[test]
    fn test_multi_line_text_is_written_whole() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("debug.log");

        let mut file = FileDestination::open(&path).unwrap();
        file.append("egret\n\teagle").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "egret\n\teagle\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_append_is_not_replayed() {
        let mut file = FileDestination::open(Path::new("/dev/full")).unwrap();

        let err = file.append("egret").unwrap_err();
        assert_eq!(err.raw_os_error(), Some(28));

        // Nothing from the failed append is left to fail a later flush
        file.flush().unwrap();
        assert!(file.append("egret").is_err());
    }
}
