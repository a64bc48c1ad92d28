//! Structured error values attached to log records
//!
//! A [`Cause`] carries a message, optional frame descriptions and an optional
//! chained source, so a record can render a trace without relying on panics or
//! captured backtraces.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    frames: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<Box<Cause>>,
}

impl Cause {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frames: Vec::new(),
            source: None,
        }
    }

    /// Build a cause chain from an error and its `source()` links
    ///
    /// ```
    /// use birdlog::Cause;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "eagle");
    /// let cause = Cause::from_error(&io);
    /// assert_eq!(cause.message(), "eagle");
    /// ```
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut cause = Cause::new(err.to_string());
        if let Some(source) = err.source() {
            cause.source = Some(Box::new(Cause::from_error(source)));
        }
        cause
    }

    /// Append one frame description, rendered as `at <frame>`
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }

    #[must_use]
    pub fn with_frames<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frames.extend(frames.into_iter().map(Into::into));
        self
    }

    /// Attach `source` at the end of this cause's chain
    #[must_use]
    pub fn caused_by(mut self, source: Cause) -> Self {
        self.source = Some(Box::new(match self.source.take() {
            Some(inner) => (*inner).caused_by(source),
            None => source,
        }));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn source(&self) -> Option<&Cause> {
        self.source.as_deref()
    }

    /// This cause followed by every chained source, outermost first
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    pub(crate) fn sanitized(&self) -> Self {
        Self {
            message: super::record::sanitize(&self.message),
            frames: self.frames.iter().map(|f| super::record::sanitize(f)).collect(),
            source: self.source.as_ref().map(|s| Box::new(s.sanitized())),
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&str> for Cause {
    fn from(message: &str) -> Self {
        Cause::new(message)
    }
}

impl From<String> for Cause {
    fn from(message: String) -> Self {
        Cause::new(message)
    }
}

impl From<std::io::Error> for Cause {
    fn from(err: std::io::Error) -> Self {
        Cause::from_error(&err)
    }
}

pub struct Chain<'a> {
    next: Option<&'a Cause>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Cause;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "could not load nest")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_from_error_walks_sources() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "no such branch"));
        let cause = Cause::from_error(&err);

        let messages: Vec<&str> = cause.chain().map(Cause::message).collect();
        assert_eq!(messages, vec!["could not load nest", "no such branch"]);
    }

    #[test]
    fn test_caused_by_appends_to_end_of_chain() {
        let cause = Cause::new("a")
            .caused_by(Cause::new("b"))
            .caused_by(Cause::new("c"));

        let messages: Vec<&str> = cause.chain().map(Cause::message).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_frames_are_kept_in_order() {
        let cause = Cause::new("eagle")
            .with_frame("birds::egret(birds.rs:12)")
            .with_frames(["birds::main(birds.rs:30)"]);
        assert_eq!(
            cause.frames(),
            &["birds::egret(birds.rs:12)", "birds::main(birds.rs:30)"]
        );
    }

    #[test]
    fn test_sanitized_escapes_line_breaks() {
        let cause = Cause::new("line\nbreak").with_frame("tab\there");
        let clean = cause.sanitized();
        assert_eq!(clean.message(), "line\\nbreak");
        assert_eq!(clean.frames()[0], "tab\\there");
    }
}
