// LabelDesk - core/console.rs
//
// View model for the backend log console: visibility, auto-scroll, and the
// most recently fetched log lines with their severity classification.
// Fetching is the app layer's job (see app::log_poll).

use crate::util::constants::{LOG_TAG_ERROR, LOG_TAG_WARNING};

/// Display severity of one backend log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSeverity {
    Error,
    Warning,
    Info,
}

impl LogSeverity {
    /// Classify a raw line by its severity tag. `[ERROR]` wins over
    /// `[WARNING]`; untagged lines are informational.
    pub fn classify(line: &str) -> Self {
        if line.contains(LOG_TAG_ERROR) {
            LogSeverity::Error
        } else if line.contains(LOG_TAG_WARNING) {
            LogSeverity::Warning
        } else {
            LogSeverity::Info
        }
    }
}

/// One classified log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub severity: LogSeverity,
}

impl LogLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let severity = LogSeverity::classify(&text);
        Self { text, severity }
    }
}

/// State of the log console panel.
#[derive(Debug)]
pub struct LogConsole {
    visible: bool,
    /// Pin the view to the newest entry after each refresh.
    pub auto_scroll: bool,
    lines: Vec<LogLine>,
    /// Set by `replace` when auto-scroll is on; consumed by the renderer.
    scroll_pending: bool,
    /// Number of refreshes applied since the console was created.
    refreshes: u64,
}

impl Default for LogConsole {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LogConsole {
    pub fn new(auto_scroll: bool) -> Self {
        Self {
            visible: false,
            auto_scroll,
            lines: Vec::new(),
            scroll_pending: false,
            refreshes: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Change visibility. Returns true when the value actually changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Clear and rebuild the entry list from a full fetch.
    pub fn replace(&mut self, raw: Vec<String>) {
        self.lines = raw.into_iter().map(LogLine::new).collect();
        self.refreshes += 1;
        if self.auto_scroll {
            self.scroll_pending = true;
        }
    }

    /// True once after each refresh that should pin the view to the bottom.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    /// Count of lines per severity: (errors, warnings, info).
    pub fn severity_counts(&self) -> (usize, usize, usize) {
        self.lines
            .iter()
            .fold((0, 0, 0), |(e, w, i), line| match line.severity {
                LogSeverity::Error => (e + 1, w, i),
                LogSeverity::Warning => (e, w + 1, i),
                LogSeverity::Info => (e, w, i + 1),
            })
    }
}

/// Newline-joined text of a log set, as copied to the clipboard.
pub fn clipboard_text(lines: &[String]) -> String {
    lines.join("\n")
}
