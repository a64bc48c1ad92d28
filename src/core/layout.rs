//! Per-sink record formatting
//!
//! A [`Layout`] turns a [`LogRecord`] into the text a sink appends:
//! - `Message`: bare message, causes inlined on the same line (console default)
//! - `Text`: timestamped line plus a tab-indented cause block (file default)
//! - `Json`: one JSON object per record
//! - `Custom`: any caller-supplied function

use super::cause::Cause;
use super::record::LogRecord;
use super::timestamp::TimestampFormat;
use std::fmt;
use std::sync::Arc;

pub type FormatFn = Arc<dyn Fn(&LogRecord) -> String + Send + Sync>;

#[derive(Clone, Default)]
pub enum Layout {
    /// `wren`, `egret eagle`, `Catching finch`
    #[default]
    Message,

    /// `[2025-01-08T10:30:45.123Z] [ERROR] [main] app - egret` followed by
    /// one `\t`-prefixed line per cause and frame
    Text(TimestampFormat),

    /// `{"timestamp":"…","level":"ERROR","logger":"app","message":"egret",…}`
    Json(TimestampFormat),

    Custom(FormatFn),
}

impl Layout {
    /// Wrap a closure as a layout
    ///
    /// ```
    /// use birdlog::Layout;
    ///
    /// let layout = Layout::custom(|record| format!("{}: {}", record.level(), record.message()));
    /// ```
    pub fn custom<F>(format: F) -> Self
    where
        F: Fn(&LogRecord) -> String + Send + Sync + 'static,
    {
        Layout::Custom(Arc::new(format))
    }

    /// Render a record without the trailing newline
    pub fn format(&self, record: &LogRecord) -> String {
        match self {
            Layout::Message => Self::format_message(record),
            Layout::Text(timestamp_format) => Self::format_text(record, timestamp_format),
            Layout::Json(timestamp_format) => Self::format_json(record, timestamp_format),
            Layout::Custom(format) => format(record),
        }
    }

    fn format_message(record: &LogRecord) -> String {
        match record.cause() {
            Some(_) if record.is_catching() => record.rendered_message(),
            Some(cause) => format!("{} {}", record.message(), cause.message()),
            None => record.message().to_string(),
        }
    }

    fn format_text(record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        let mut output = format!(
            "[{}] [{:5}] [{}] {} - {}",
            timestamp_format.format(record.timestamp()),
            record.level().to_str(),
            record.thread_label(),
            record.display_logger_name(),
            record.rendered_message()
        );

        if let Some(cause) = record.cause() {
            output.push('\n');
            output.push_str(&render_stack(cause));
        }

        output
    }

    fn format_json(record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "timestamp".to_string(),
            timestamp_format.to_json_value(record.timestamp()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level().to_str().to_string()),
        );
        json_obj.insert(
            "logger".to_string(),
            serde_json::Value::String(record.display_logger_name().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(record.rendered_message()),
        );
        json_obj.insert(
            "thread".to_string(),
            serde_json::Value::String(record.thread_label().to_string()),
        );

        if let Some(cause) = record.cause() {
            let chain = cause
                .chain()
                .map(|c| {
                    serde_json::json!({
                        "message": c.message(),
                        "frames": c.frames(),
                    })
                })
                .collect();
            json_obj.insert("cause".to_string(), serde_json::Value::Array(chain));
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }
}

/// The cause block: one line per cause and frame, each prefixed by a tab
pub fn render_stack(cause: &Cause) -> String {
    let mut lines = Vec::new();
    for (depth, link) in cause.chain().enumerate() {
        if depth == 0 {
            lines.push(format!("\t{}", link.message()));
        } else {
            lines.push(format!("\tCaused by: {}", link.message()));
        }
        lines.extend(link.frames().iter().map(|frame| format!("\tat {}", frame)));
    }
    lines.join("\n")
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Message => write!(f, "Message"),
            Layout::Text(ts) => f.debug_tuple("Text").field(ts).finish(),
            Layout::Json(ts) => f.debug_tuple("Json").field(ts).finish(),
            Layout::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
