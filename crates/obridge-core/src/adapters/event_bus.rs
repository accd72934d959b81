//! In-process event bus backed by a tokio broadcast channel.
//!
//! Subscribers that fall behind by more than the channel capacity lose the
//! oldest events (`RecvError::Lagged`). Publishing with no subscribers is
//! not an error.

use crate::events::ObridgeEvent;
use crate::ports::outbound::EventPublisher;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Broadcast publisher for one chain instance.
pub struct BroadcastEventBus {
    sender: broadcast::Sender<ObridgeEvent>,
    events_published: AtomicU64,
}

impl BroadcastEventBus {
    /// Create a bus holding up to `capacity` undelivered events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            events_published: AtomicU64::new(0),
        }
    }

    /// Receive every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ObridgeEvent> {
        self.sender.subscribe()
    }

    /// Total events published.
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }

    /// Current subscriber count.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventPublisher for BroadcastEventBus {
    fn publish(&self, event: ObridgeEvent) -> usize {
        self.events_published.fetch_add(1, Ordering::Relaxed);
        let name = event.name();
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!(event = name, receivers, "Published event");
        receivers
    }
}
