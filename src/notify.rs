//! Transient user notifications ("toasts").
//!
//! Views report side effects through the [`Notifier`] trait instead of
//! printing directly, so the front end decides how they are shown.

use colored::Colorize;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Sink for user-visible notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn info(&self, message: &str) {
        self.notify(Notification::new(Level::Info, message));
    }

    fn success(&self, message: &str) {
        self.notify(Notification::new(Level::Success, message));
    }

    fn warning(&self, message: &str) {
        self.notify(Notification::new(Level::Warning, message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::new(Level::Error, message));
    }
}

/// Prints notifications to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        log::debug!("notification ({:?}): {}", notification.level, notification.message);
        let line = match notification.level {
            Level::Info => format!("ℹ️  {}", notification.message).normal(),
            Level::Success => format!("✅ {}", notification.message).green(),
            Level::Warning => format!("⚠️  {}", notification.message).yellow(),
            Level::Error => format!("❌ {}", notification.message).red(),
        };
        eprintln!("{}", line);
    }
}

/// Keeps notifications in memory, in the order they were raised
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    received: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }

    /// Messages received at the given level
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications().is_empty()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut received) = self.received.lock() {
            received.push(notification);
        }
    }
}
