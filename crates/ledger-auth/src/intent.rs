//! Typed authorization intents and their structural hashes.
//!
//! Each intent has a fixed ordered field tuple and its own canonical type
//! string. The type hash is baked into the struct hash, so a signature for
//! one intent can never be replayed as another even when the field shapes
//! match — `Permit` and `SignedApprove` are deliberately shape-identical but
//! hash-distinct.

use crate::eip712::{signing_digest, WordEncoder};
use alloy_primitives::{keccak256, Address, B256, U256};

/// Canonical type string for a transfer-by-signature intent.
pub const SIGNED_TRANSFER_TYPE: &str =
	"SignedTransfer(address from,address to,uint256 amount,uint256 nonce,uint256 deadline)";

/// Canonical type string for an approve-by-signature intent.
pub const SIGNED_APPROVE_TYPE: &str =
	"SignedApprove(address owner,address spender,uint256 amount,uint256 nonce,uint256 deadline)";

/// Canonical type string for a permit intent.
///
/// Same field shape as [`SIGNED_APPROVE_TYPE`], distinct type hash.
pub const PERMIT_TYPE: &str =
	"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

/// A transfer-by-signature intent, bound to the signer's current nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferIntent {
	pub from: Address,
	pub to: Address,
	pub amount: U256,
	pub nonce: u64,
	pub deadline: u64,
}

impl TransferIntent {
	/// Structural hash: `keccak256(typeHash || encode(fields))`.
	pub fn struct_hash(&self) -> B256 {
		let mut enc = WordEncoder::new();
		enc.push_b256(&keccak256(SIGNED_TRANSFER_TYPE.as_bytes()));
		enc.push_address(&self.from);
		enc.push_address(&self.to);
		enc.push_u256(self.amount);
		enc.push_u64(self.nonce);
		enc.push_u64(self.deadline);
		keccak256(enc.finish())
	}

	/// Final signing digest under the given domain hash.
	pub fn signing_digest(&self, domain: &B256) -> B256 {
		signing_digest(domain, &self.struct_hash())
	}
}

/// An approve-shaped intent: (owner, spender, amount, nonce, deadline).
///
/// The same fields serve both the `SignedApprove` and `Permit` intents;
/// callers pick the digest for the entry point they target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveIntent {
	pub owner: Address,
	pub spender: Address,
	pub amount: U256,
	pub nonce: u64,
	pub deadline: u64,
}

impl ApproveIntent {
	fn struct_hash_with(&self, type_string: &str) -> B256 {
		let mut enc = WordEncoder::new();
		enc.push_b256(&keccak256(type_string.as_bytes()));
		enc.push_address(&self.owner);
		enc.push_address(&self.spender);
		enc.push_u256(self.amount);
		enc.push_u64(self.nonce);
		enc.push_u64(self.deadline);
		keccak256(enc.finish())
	}

	/// Structural hash under the `SignedApprove` type.
	pub fn approve_struct_hash(&self) -> B256 {
		self.struct_hash_with(SIGNED_APPROVE_TYPE)
	}

	/// Structural hash under the `Permit` type.
	pub fn permit_struct_hash(&self) -> B256 {
		self.struct_hash_with(PERMIT_TYPE)
	}

	/// Final `SignedApprove` digest under the given domain hash.
	pub fn approve_signing_digest(&self, domain: &B256) -> B256 {
		signing_digest(domain, &self.approve_struct_hash())
	}

	/// Final `Permit` digest under the given domain hash.
	pub fn permit_signing_digest(&self, domain: &B256) -> B256 {
		signing_digest(domain, &self.permit_struct_hash())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::eip712::domain_hash;

	fn addr(byte: u8) -> Address {
		Address::from_slice(&[byte; 20])
	}

	fn domain() -> B256 {
		domain_hash("Token", "1", 1, &addr(0xEE))
	}

	fn approve_intent() -> ApproveIntent {
		ApproveIntent {
			owner: addr(1),
			spender: addr(2),
			amount: U256::from(100u64),
			nonce: 0,
			deadline: 1_000,
		}
	}

	#[test]
	fn test_type_hashes_are_distinct() {
		let hashes = [
			keccak256(SIGNED_TRANSFER_TYPE.as_bytes()),
			keccak256(SIGNED_APPROVE_TYPE.as_bytes()),
			keccak256(PERMIT_TYPE.as_bytes()),
		];
		assert_ne!(hashes[0], hashes[1]);
		assert_ne!(hashes[0], hashes[2]);
		assert_ne!(hashes[1], hashes[2]);
	}

	#[test]
	fn test_approve_and_permit_digests_never_collide() {
		// Identical fields, different intent kind: cross-intent replay must
		// be impossible.
		let intent = approve_intent();
		assert_ne!(
			intent.approve_signing_digest(&domain()),
			intent.permit_signing_digest(&domain())
		);
	}

	#[test]
	fn test_digest_changes_with_nonce() {
		let mut intent = approve_intent();
		let first = intent.permit_signing_digest(&domain());
		intent.nonce = 1;
		assert_ne!(first, intent.permit_signing_digest(&domain()));
	}

	#[test]
	fn test_digest_changes_with_domain() {
		let intent = approve_intent();
		let other_domain = domain_hash("Token", "1", 2, &addr(0xEE));
		assert_ne!(
			intent.permit_signing_digest(&domain()),
			intent.permit_signing_digest(&other_domain)
		);
	}

	#[test]
	fn test_transfer_struct_hash_is_stable() {
		let intent = TransferIntent {
			from: addr(1),
			to: addr(2),
			amount: U256::from(5u64),
			nonce: 3,
			deadline: 9,
		};
		assert_eq!(intent.struct_hash(), intent.clone().struct_hash());
	}
}
