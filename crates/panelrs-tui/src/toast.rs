//! Transient toast notifications.

use panelrs_core::Notifier;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    created: Instant,
}

/// Holds the toasts currently on screen and expires them after a TTL.
///
/// This is the production implementation of the core's [`Notifier`]
/// capability; the controllers never talk to the UI directly.
pub struct ToastBin {
    toasts: Vec<Toast>,
    ttl: Duration,
}

impl ToastBin {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            ttl,
        }
    }

    fn push(&mut self, level: ToastLevel, message: &str) {
        self.toasts.push(Toast {
            level,
            message: message.to_string(),
            created: Instant::now(),
        });
    }

    /// Drop toasts older than the TTL.
    pub fn prune(&mut self) {
        let ttl = self.ttl;
        self.toasts.retain(|t| t.created.elapsed() < ttl);
    }

    /// Most recent toast still alive, if any.
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}

impl Notifier for ToastBin {
    fn success(&mut self, message: &str) {
        self.push(ToastLevel::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.push(ToastLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_wins_and_prune_expires() {
        let mut bin = ToastBin::new(Duration::from_secs(60));
        bin.success("saved");
        bin.error("nope");
        assert_eq!(bin.latest().unwrap().message, "nope");
        assert_eq!(bin.latest().unwrap().level, ToastLevel::Error);

        bin.prune();
        assert!(bin.latest().is_some());

        let mut short = ToastBin::new(Duration::from_secs(0));
        short.success("gone");
        short.prune();
        assert!(short.latest().is_none());
    }
}
