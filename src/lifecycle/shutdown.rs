//! Shutdown coordination for the relay.
//!
//! One [`Shutdown`] lives in `main` (or a test); the server holds a receiver
//! and finishes draining once [`notified`] resolves.

use tokio::sync::broadcast;

/// Broadcasts a single "stop accepting" event to every subscriber.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown event.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the shutdown event; returns how many subscribers were notified.
    pub fn trigger(&self, reason: &str) -> usize {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::info!(reason = %reason, notified, "Shutdown triggered");
        notified
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve when shutdown fires or when the coordinator is dropped.
pub async fn notified(mut rx: broadcast::Receiver<()>) {
    match rx.recv().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections"),
        Err(_) => tracing::info!("Shutdown coordinator dropped, draining connections"),
    }
}
