use std::time::{Duration, Instant};

use gradedom::Element;

pub use crate::config::DEFAULT_TOAST_DURATION;

/// Severity of a banner message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastLevel {
    /// Alert class used by the markup.
    pub fn alert_class(self) -> &'static str {
        match self {
            ToastLevel::Success => "alert-success",
            ToastLevel::Error => "alert-danger",
            ToastLevel::Warning => "alert-warning",
            ToastLevel::Info => "alert-info",
        }
    }
}

/// A transient banner message.
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use gradekit::toast::{Toast, ToastQueue};
///
/// let now = Instant::now();
/// let mut queue = ToastQueue::new();
/// queue.push(Toast::success("Score saved"), now);
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    /// How long to show the toast.
    pub duration: Duration,
}

impl Toast {
    fn with_level(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Error)
    }

    /// Set a custom duration for this toast.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Build the banner element.
    pub fn element(&self) -> Element {
        Element::div()
            .class("alert")
            .class(self.level.alert_class())
            .class("alert-dismissible")
            .attr("data-toast", "")
            .text(self.message.clone())
            .child(
                Element::new("button")
                    .class("btn-close")
                    .attr("data-bs-dismiss", "alert"),
            )
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::info(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::info(message)
    }
}

/// Banners currently on screen, newest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    entries: Vec<(Toast, Instant)>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast from `now` until its duration elapses.
    pub fn push(&mut self, toast: impl Into<Toast>, now: Instant) {
        let toast = toast.into();
        let deadline = now + toast.duration;
        self.entries.insert(0, (toast, deadline));
    }

    /// Remove every toast whose deadline has passed. Returns the removed ones.
    pub fn expire(&mut self, now: Instant) -> Vec<Toast> {
        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(_, deadline)| *deadline <= now);
        self.entries = kept;
        expired.into_iter().map(|(toast, _)| toast).collect()
    }

    /// Dismiss a toast early by position.
    pub fn dismiss(&mut self, index: usize) -> Option<Toast> {
        (index < self.entries.len()).then(|| self.entries.remove(index).0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|(toast, _)| toast)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
