//! Shared storage schema for the ledger.
//!
//! Every logic version operates over this one schema. An upgrade migrates
//! data through an explicit transform (usually a no-op) rather than through
//! code inheritance, so the schema is public to candidate logic modules.

use alloy_primitives::{Address, U256};
use ledger_types::Role;
use std::collections::{HashMap, HashSet};

/// Complete mutable ledger state.
///
/// Entries are created implicitly on first write (default zero) and never
/// explicitly destroyed, only driven to zero.
#[derive(Debug, Clone)]
pub struct LedgerState {
	/// Total issued supply; always equals the sum of all balances.
	pub total_supply: U256,
	/// Account balances.
	pub balances: HashMap<Address, U256>,
	/// (owner, spender) remaining-spend budgets. Every approval is finite;
	/// there is no "unlimited" sentinel.
	pub allowances: HashMap<(Address, Address), U256>,
	/// Role table: one explicit set of (role, account) grants.
	pub roles: HashSet<(Role, Address)>,
	/// Version counter recorded by the currently active logic.
	pub logic_version: u32,
	/// Versions whose one-time migration step already ran.
	pub migrations_applied: HashSet<u32>,
}

impl LedgerState {
	/// Fresh state at logic version 1. Version 1's setup is the deploy-time
	/// initialization, so it counts as already migrated.
	pub fn new() -> Self {
		Self {
			total_supply: U256::ZERO,
			balances: HashMap::new(),
			allowances: HashMap::new(),
			roles: HashSet::new(),
			logic_version: 1,
			migrations_applied: HashSet::from([1]),
		}
	}

	pub fn balance_of(&self, account: &Address) -> U256 {
		self.balances.get(account).copied().unwrap_or(U256::ZERO)
	}

	pub fn allowance_of(&self, owner: &Address, spender: &Address) -> U256 {
		self.allowances
			.get(&(*owner, *spender))
			.copied()
			.unwrap_or(U256::ZERO)
	}

	pub fn has_role(&self, role: Role, account: &Address) -> bool {
		self.roles.contains(&(role, *account))
	}
}

impl Default for LedgerState {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fresh_state_defaults() {
		let state = LedgerState::new();
		assert_eq!(state.total_supply, U256::ZERO);
		assert_eq!(state.logic_version, 1);
		assert!(state.migrations_applied.contains(&1));
		assert_eq!(state.balance_of(&Address::ZERO), U256::ZERO);
	}
}
