// LabelDesk - core/notice.rs
//
// Transient on-screen notice ("toast"). At most one is shown; a new notice
// replaces the current one and restarts the timer.

use std::time::{Duration, Instant};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub shown_at: Instant,
}

/// Holder for the single current notice.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    duration: Duration,
}

impl NoticeBoard {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Show `text` from `now` on.
    pub fn show_at(&mut self, text: impl Into<String>, level: NoticeLevel, now: Instant) {
        let text = text.into();
        tracing::debug!(notice = %text, ?level, "Notice shown");
        self.current = Some(Notice {
            text,
            level,
            shown_at: now,
        });
    }

    pub fn show(&mut self, text: impl Into<String>, level: NoticeLevel) {
        self.show_at(text, level, Instant::now());
    }

    /// The notice visible at `now`, if it has not expired.
    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < self.duration)
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    /// Text of the most recent notice, expired or not.
    pub fn last_text(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.text.as_str())
    }

    /// Time left before the current notice expires.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.current_at(now)
            .map(|n| self.duration.saturating_sub(now.saturating_duration_since(n.shown_at)))
    }
}
