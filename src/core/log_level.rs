//! Log level definitions

use super::error::{LoggerError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ordered severity. A record at level `L` passes a threshold `T` iff `L >= T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    #[default]
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Parse a level name, case-insensitively
    ///
    /// ```
    /// use birdlog::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("warning").unwrap(), LogLevel::Warn);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::invalid_level(name)),
        }
    }

    #[inline]
    pub fn compare(a: LogLevel, b: LogLevel) -> Ordering {
        a.cmp(&b)
    }

    /// Whether a record at this level passes `threshold`
    #[inline]
    pub fn passes(self, threshold: LogLevel) -> bool {
        self >= threshold
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).map_err(serde::de::Error::custom)
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(LogLevel::parse("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::parse("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::parse(" FATAL ").unwrap(), LogLevel::Fatal);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = LogLevel::parse("verbose").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { ref name } if name == "verbose"));
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_compare() {
        assert_eq!(LogLevel::compare(LogLevel::Trace, LogLevel::Fatal), Ordering::Less);
        assert_eq!(LogLevel::compare(LogLevel::Warn, LogLevel::Warn), Ordering::Equal);
        assert_eq!(LogLevel::compare(LogLevel::Error, LogLevel::Info), Ordering::Greater);
    }

    #[test]
    fn test_passes_threshold() {
        assert!(LogLevel::Warn.passes(LogLevel::Warn));
        assert!(LogLevel::Fatal.passes(LogLevel::Warn));
        assert!(!LogLevel::Info.passes(LogLevel::Warn));
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"WARN\"");
        let level: LogLevel = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(level, LogLevel::Error);
        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
    }
}
