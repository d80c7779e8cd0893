//! Notification service implementation
//!
//! Toasts are the transient notices screens and stores raise for the user. The
//! [`Notifier`] trait is the seam the stores talk to; [`NotificationCenter`]
//! queues toasts for the front end to drain and keeps per-kind statistics.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Toast flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A transient user notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub detail: Option<String>,
}

impl Toast {
    pub fn success(title: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, title: title.into(), detail: None }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self { kind: ToastKind::Error, title: title.into(), detail: None }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self { kind: ToastKind::Info, title: title.into(), detail: None }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Sink for toasts
pub trait Notifier: Send + Sync {
    fn show(&self, toast: Toast);
}

/// Notification statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationStats {
    pub total_shown: u64,
    pub total_dropped: u64,
    pub shown_by_kind: HashMap<ToastKind, u64>,
}

/// Bounded toast queue shared between the stores and the front end
#[derive(Debug)]
pub struct NotificationCenter {
    capacity: usize,
    inner: Mutex<CenterInner>,
}

#[derive(Debug, Default)]
struct CenterInner {
    queue: VecDeque<Toast>,
    stats: NotificationStats,
}

impl NotificationCenter {
    /// Create a new NotificationCenter instance
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CenterInner::default()),
        }
    }

    /// Take every pending toast, oldest first
    pub fn drain(&self) -> Vec<Toast> {
        let mut inner = self.lock();
        inner.queue.drain(..).collect()
    }

    /// Pending toasts without removing them
    pub fn pending(&self) -> Vec<Toast> {
        self.lock().queue.iter().cloned().collect()
    }

    pub fn stats(&self) -> NotificationStats {
        self.lock().stats.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CenterInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(32)
    }
}

impl Notifier for NotificationCenter {
    fn show(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => warn!(title = %toast.title, detail = ?toast.detail, "Error toast"),
            ToastKind::Success => info!(title = %toast.title, "Success toast"),
            ToastKind::Info => debug!(title = %toast.title, detail = ?toast.detail, "Info toast"),
        }

        let mut inner = self.lock();
        if inner.queue.len() >= self.capacity {
            inner.queue.pop_front();
            inner.stats.total_dropped += 1;
        }

        inner.stats.total_shown += 1;
        *inner.stats.shown_by_kind.entry(toast.kind).or_insert(0) += 1;
        inner.queue.push_back(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_in_order() {
        let center = NotificationCenter::new(4);
        center.show(Toast::info("first"));
        center.show(Toast::error("second").with_detail("boom"));

        let toasts = center.drain();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].title, "first");
        assert_eq!(toasts[1].detail.as_deref(), Some("boom"));
        assert!(center.drain().is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let center = NotificationCenter::new(2);
        center.show(Toast::info("a"));
        center.show(Toast::info("b"));
        center.show(Toast::success("c"));

        let titles: Vec<_> = center.pending().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["b", "c"]);

        let stats = center.stats();
        assert_eq!(stats.total_shown, 3);
        assert_eq!(stats.total_dropped, 1);
        assert_eq!(stats.shown_by_kind.get(&ToastKind::Info), Some(&2));
    }
}
