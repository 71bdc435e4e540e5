//! Versioned-upgrade authorization gate.
//!
//! The gate runs immediately before the surrounding platform swaps the
//! active logic code. It enforces strict version monotonicity — the
//! candidate must self-report exactly `current + 1` — and routes the
//! candidate's explicit data migration through a version-scoped one-time
//! gate. There is no terminal "finalized" state; the gate re-arms for every
//! future increment.

use crate::state::LedgerState;
use thiserror::Error;

/// Errors a candidate's version probe can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
	/// The candidate exposes no version at all.
	#[error("candidate reported no version")]
	Missing,
	/// The probe itself failed.
	#[error("version probe failed: {0}")]
	Failed(String),
}

/// A candidate replacement for the active ledger logic.
///
/// Versions are independent modules sharing [`LedgerState`] as their common
/// storage schema; the trait is the seam through which the gate inspects a
/// candidate without trusting it to cooperate beyond these two calls.
pub trait LogicCandidate {
	/// Side-effect-free probe for the candidate's self-reported version.
	fn reported_version(&self) -> Result<u32, ProbeError>;

	/// Explicit data transform run once when this candidate becomes active.
	/// Usually a no-op. A failed transform aborts the upgrade and leaves the
	/// previous state untouched.
	fn migrate(&self, _state: &mut LedgerState) -> Result<(), String> {
		Ok(())
	}
}

/// Strict sequencing policy: only `current + 1` is ever acceptable — no
/// skipping, no re-applying, no downgrade.
pub fn is_next_version(current: u32, candidate: u32) -> bool {
	candidate == current.wrapping_add(1) && candidate > current
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_only_immediate_successor_accepted() {
		assert!(is_next_version(1, 2));
		assert!(!is_next_version(1, 1));
		assert!(!is_next_version(1, 3));
		assert!(!is_next_version(2, 1));
		assert!(!is_next_version(u32::MAX, 0));
	}

	#[test]
	fn test_default_migration_is_noop() {
		struct Candidate;
		impl LogicCandidate for Candidate {
			fn reported_version(&self) -> Result<u32, ProbeError> {
				Ok(2)
			}
		}

		let mut state = LedgerState::new();
		let before = state.clone().total_supply;
		Candidate.migrate(&mut state).unwrap();
		assert_eq!(state.total_supply, before);
	}
}
