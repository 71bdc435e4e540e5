//! Event bus for ledger notifications.
//!
//! Successful mutations publish [`LedgerEvent`] values over a broadcast
//! channel. Publishing is fire-and-forget: the ledger does not care whether
//! anyone is listening, and a slow consumer only lags its own receiver.

use ledger_types::LedgerEvent;
use tokio::sync::broadcast;

/// Default capacity of the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// Broadcast bus carrying ledger notification events.
#[derive(Debug, Clone)]
pub struct EventBus {
	sender: broadcast::Sender<LedgerEvent>,
}

impl EventBus {
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Publish an event to all current subscribers. Having no subscribers is
	/// not an error.
	pub fn publish(&self, event: LedgerEvent) {
		let _ = self.sender.send(event);
	}

	/// Subscribe to all events published after this call.
	pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
		self.sender.subscribe()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}
