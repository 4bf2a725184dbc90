//! Outbound side of a session's event channel.

use jobfish_core::session_events::SessionEvent;
use tokio::sync::mpsc;

/// Sends [`SessionEvent`]s to whoever relays them to the client.
///
/// Once the receiver is dropped (client disconnected) sends are discarded.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<SessionEvent>,
}

impl EventSink {
    /// Create a bounded channel and wrap its sending half.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Send one event, waiting for capacity. Returns `false` if the
    /// receiver is gone.
    pub async fn emit(&self, event: SessionEvent) -> bool {
        let kind = event.kind();
        match self.tx.send(event).await {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!(kind, "Event receiver dropped; discarding event");
                false
            }
        }
    }

    /// Whether the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
