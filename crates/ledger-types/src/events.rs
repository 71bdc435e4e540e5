//! Notification events for external observers.
//!
//! Events fire on successful mutations and flow through a broadcast bus so
//! indexers and other consumers can react to state changes without polling.
//! A failed operation never publishes an event.

use crate::Role;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Main event type encompassing all ledger notifications.
///
/// Mint and burn are reported as `ValueMoved` with the null account as the
/// counterparty, so supply changes and transfers share one consumer surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
	/// Value moved between two accounts (or issued/destroyed when one side
	/// is the null account).
	ValueMoved {
		from: Address,
		to: Address,
		amount: U256,
	},
	/// A spending allowance was set.
	SpendAuthorized {
		owner: Address,
		spender: Address,
		amount: U256,
	},
	/// A role was granted to an account.
	RoleGranted { role: Role, account: Address },
	/// A role was revoked from an account.
	RoleRevoked { role: Role, account: Address },
	/// The active logic version advanced.
	UpgradeApplied { old_version: u32, new_version: u32 },
}
