//! Signature payload normalization and signer recovery.
//!
//! Two input shapes are accepted — a packed 65-byte `r || s || v` blob and
//! three discrete scalars — and both normalize to the same internal form, so
//! equivalent signatures always recover the same signer. High-s signatures
//! are rejected outright (EIP-2): accepting them would give every intent two
//! valid signature encodings.

use crate::AuthError;
use alloy_primitives::{keccak256, Address, B256};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};

/// A normalized recoverable signature: `r`, `s` and the recovery parity bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignaturePayload {
	r: B256,
	s: B256,
	y_parity: bool,
}

impl SignaturePayload {
	/// Parse a packed 65-byte `r || s || v` blob.
	pub fn from_packed(bytes: &[u8]) -> Result<Self, AuthError> {
		if bytes.len() != 65 {
			return Err(AuthError::MalformedSignature(format!(
				"expected 65 bytes, got {}",
				bytes.len()
			)));
		}
		Self::from_scalars(
			B256::from_slice(&bytes[..32]),
			B256::from_slice(&bytes[32..64]),
			bytes[64],
		)
	}

	/// Build from three discrete scalars. `v` may be a raw parity bit (0/1)
	/// or the legacy 27/28 form; anything else is malformed.
	pub fn from_scalars(r: B256, s: B256, v: u8) -> Result<Self, AuthError> {
		let y_parity = match v {
			0 | 27 => false,
			1 | 28 => true,
			other => {
				return Err(AuthError::MalformedSignature(format!(
					"invalid recovery id {}",
					other
				)))
			},
		};
		Ok(Self { r, s, y_parity })
	}

	pub fn r(&self) -> B256 {
		self.r
	}

	pub fn s(&self) -> B256 {
		self.s
	}

	pub fn y_parity(&self) -> bool {
		self.y_parity
	}
}

/// Recover the signing account from (digest, signature).
///
/// Fails, never panics, when the scalars are invalid curve elements, the
/// signature is malleable (high-s), recovery produces no key, or the
/// recovered address is the zero account.
pub fn recover_signer(digest: &B256, payload: &SignaturePayload) -> Result<Address, AuthError> {
	let mut rs = [0u8; 64];
	rs[..32].copy_from_slice(payload.r.as_slice());
	rs[32..].copy_from_slice(payload.s.as_slice());

	let signature = EcdsaSignature::from_slice(&rs)
		.map_err(|e| AuthError::MalformedSignature(e.to_string()))?;
	if signature.normalize_s().is_some() {
		return Err(AuthError::MalformedSignature(
			"high-s signature rejected".to_string(),
		));
	}

	let recovery_id = RecoveryId::new(payload.y_parity, false);
	let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
		.map_err(|e| AuthError::RecoveryFailed(e.to_string()))?;

	let signer = public_key_address(&key);
	if signer == Address::ZERO {
		return Err(AuthError::ZeroSigner);
	}
	Ok(signer)
}

/// Derive the account address from a secp256k1 public key:
/// last 20 bytes of `keccak256(uncompressed_point_without_tag)`.
pub fn public_key_address(key: &VerifyingKey) -> Address {
	let point = key.to_encoded_point(false);
	let hash = keccak256(&point.as_bytes()[1..]);
	Address::from_slice(&hash[12..])
}
