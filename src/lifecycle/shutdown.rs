//! Shutdown notification primitive.

use tokio::sync::broadcast;

/// Single-shot shutdown notification.
///
/// The coordinator subscribes once at construction and blocks on the
/// receiver exactly once; signal handling (or a test) triggers it. Built on
/// a capacity-1 broadcast channel — no fairness or multi-consumer semantics
/// are relied on.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown notification.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the notification. Only triggers after this call are
    /// observed by the returned receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the notification. A trigger with no subscribers is a no-op.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
