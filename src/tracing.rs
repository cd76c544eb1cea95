//! Logging setup and state snapshots for diagnostics
//!
//! Configure console output via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=ame::update=trace` - module-level filtering
//!
//! Logs are also written to `~/.config/ame/logs/ame.log` with daily rotation,
//! always at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{Document, ViewSlot};

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "ame.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Cursor and mark state of one view, as `(line, offset)` pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub slot: ViewSlot,
    pub cursor: (usize, usize),
    pub selection: Option<((usize, usize), (usize, usize))>,
    pub line_count: usize,
}

impl ViewSnapshot {
    pub fn capture(doc: &Document, slot: ViewSlot) -> Self {
        Self {
            slot,
            cursor: doc.cursor_position(slot),
            selection: doc
                .selection(slot)
                .map(|(first, second)| (doc.position_of(first), doc.position_of(second))),
            line_count: doc.line_count(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &ViewSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.cursor != other.cursor {
            changes.push(format!(
                "cursor ({},{}) → ({},{})",
                self.cursor.0, self.cursor.1, other.cursor.0, other.cursor.1
            ));
        }
        match (self.selection, other.selection) {
            (None, Some(_)) => changes.push("mark set".to_string()),
            (Some(_), None) => changes.push("mark cleared".to_string()),
            _ => {}
        }
        if self.line_count != other.line_count {
            changes.push(format!("lines {} → {}", self.line_count, other.line_count));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_reports_cursor_and_mark() {
        let mut doc = Document::with_text("abc\ndef");
        let before = ViewSnapshot::capture(&doc, ViewSlot::Left);
        assert_eq!(before.diff(&before), None);

        doc.set_mark(ViewSlot::Left, false);
        doc.move_down(ViewSlot::Left);
        let after = ViewSnapshot::capture(&doc, ViewSlot::Left);
        assert_eq!(
            before.diff(&after).as_deref(),
            Some("cursor (0,0) → (1,0); mark set")
        );
    }
}
