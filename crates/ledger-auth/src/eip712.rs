//! EIP-712 style domain separation and digest construction.
//!
//! These helpers provide:
//! - Domain hash computation over (name, version, chainId, verifyingContract)
//! - Final digest computation (0x1901 || domainHash || structHash)
//! - A minimal fixed-width word encoder for the static field types used by
//!   the ledger's intents
//!
//! The domain hash binds every signature to one deployed instance on one
//! chain. Its inputs are fixed at initialization and survive logic upgrades,
//! so signatures stay valid across an upgrade by construction.

use alloy_primitives::{keccak256, Address, B256, U256};

/// Canonical type string for the signing domain.
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Compute the domain hash:
/// `keccak256(abi.encode(typeHash, nameHash, versionHash, chainId, verifyingContract))`.
pub fn domain_hash(
	name: &str,
	version_tag: &str,
	chain_id: u64,
	verifying_address: &Address,
) -> B256 {
	let mut enc = WordEncoder::new();
	enc.push_b256(&keccak256(DOMAIN_TYPE.as_bytes()));
	enc.push_b256(&keccak256(name.as_bytes()));
	enc.push_b256(&keccak256(version_tag.as_bytes()));
	enc.push_u256(U256::from(chain_id));
	enc.push_address(verifying_address);
	keccak256(enc.finish())
}

/// Compute the final signing digest: `keccak256(0x1901 || domainHash || structHash)`.
///
/// The two-byte prefix marks the payload as a structured authorization
/// digest, keeping it disjoint from any other signed-data scheme.
pub fn signing_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Minimal encoder producing the fixed-width, order-preserving word
/// concatenation used for struct hashing.
///
/// Every pushed value occupies exactly one 32-byte word, so the encoding is
/// unambiguous without length prefixes.
pub struct WordEncoder {
	buf: Vec<u8>,
}

impl Default for WordEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl WordEncoder {
	pub fn new() -> Self {
		Self { buf: Vec::new() }
	}

	pub fn push_b256(&mut self, value: &B256) {
		self.buf.extend_from_slice(value.as_slice());
	}

	pub fn push_address(&mut self, addr: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u256(&mut self, value: U256) {
		let word: [u8; 32] = value.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u64(&mut self, value: u64) {
		self.push_u256(U256::from(value));
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}
