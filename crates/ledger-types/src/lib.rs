//! Common types module for the token ledger system.
//!
//! This module defines the core data types shared across the ledger
//! components. It provides a centralized location for role identifiers,
//! notification events, and address helpers to ensure consistency across
//! all ledger crates.

/// Notification events published on successful mutations.
pub mod events;
/// Role identifiers gating privileged entry points.
pub mod role;
/// Address parsing and hex formatting helpers.
pub mod utils;

// Re-export the primitive layer so downstream crates use one set of types.
pub use alloy_primitives::{Address, B256, U256};

pub use events::LedgerEvent;
pub use role::Role;
pub use utils::{parse_address, with_0x_prefix, without_0x_prefix, AddressParseError};
