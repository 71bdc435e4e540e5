//! Per-account replay-protection counters.
//!
//! Every account's counter starts at zero, is embedded in the digest that
//! must be signed, and advances by exactly one when a signed authorization
//! is accepted. A message signed over a nonce that has already been consumed
//! recomputes to a stale digest and fails signer-match, so each signed
//! message is usable at most once. There is no cancel mechanism: a signed
//! message stays valid until it is consumed or its deadline passes.

use alloy_primitives::Address;
use std::collections::HashMap;

/// Registry of per-account replay counters.
#[derive(Debug, Default, Clone)]
pub struct NonceRegistry {
	counters: HashMap<Address, u64>,
}

impl NonceRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// The nonce the account's next signed authorization must embed.
	pub fn current(&self, account: &Address) -> u64 {
		self.counters.get(account).copied().unwrap_or(0)
	}

	/// Advance the account's counter by exactly one, returning the consumed
	/// value. Call only after signature and deadline validation succeed.
	pub fn consume(&mut self, account: &Address) -> u64 {
		let current = self.current(account);
		self.counters.insert(*account, current.saturating_add(1));
		current
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn addr(byte: u8) -> Address {
		Address::from_slice(&[byte; 20])
	}

	#[test]
	fn test_starts_at_zero() {
		let registry = NonceRegistry::new();
		assert_eq!(registry.current(&addr(1)), 0);
	}

	#[test]
	fn test_consume_advances_by_one() {
		let mut registry = NonceRegistry::new();
		assert_eq!(registry.consume(&addr(1)), 0);
		assert_eq!(registry.current(&addr(1)), 1);
		assert_eq!(registry.consume(&addr(1)), 1);
		assert_eq!(registry.current(&addr(1)), 2);
	}

	#[test]
	fn test_accounts_are_independent() {
		let mut registry = NonceRegistry::new();
		registry.consume(&addr(1));
		registry.consume(&addr(1));
		assert_eq!(registry.current(&addr(1)), 2);
		assert_eq!(registry.current(&addr(2)), 0);
	}
}
