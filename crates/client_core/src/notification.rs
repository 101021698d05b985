use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

/// Single-slot toast. A new message replaces the current one; nothing queues.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Toast>,
    duration: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(Toast {
            message: message.into(),
            severity,
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.show(message, Severity::Success, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.show(message, Severity::Error, now);
    }

    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Closes the toast once its duration has elapsed. Returns true if it closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|toast| now.saturating_duration_since(toast.shown_at) >= self.duration);
        if expired {
            self.current = None;
        }
        expired
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current.as_ref().map(|toast| {
            self.duration
                .saturating_sub(now.saturating_duration_since(toast.shown_at))
        })
    }
}
