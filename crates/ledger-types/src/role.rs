//! Role identifiers for gated ledger operations.
//!
//! Roles are additive grants, independently revocable; an account may hold
//! zero, one, or both roles. The role table itself lives in the ledger state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named capability grant controlling which accounts may call gated
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
	/// Administrative role: controls role management and upgrade
	/// authorization.
	Admin,
	/// Issuance role: controls minting of new supply.
	Issuer,
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::Admin => write!(f, "admin"),
			Role::Issuer => write!(f, "issuer"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_role_display() {
		assert_eq!(Role::Admin.to_string(), "admin");
		assert_eq!(Role::Issuer.to_string(), "issuer");
	}
}
