//! Signature-authenticated authorization for the token ledger.
//!
//! This crate implements the typed-message hashing scheme, signature
//! normalization and signer recovery, and the per-account replay guard that
//! every meta-authorization path feeds through. The flow for a signed intent
//! is:
//!
//! 1. read the signer's current nonce from the [`NonceRegistry`],
//! 2. build the structural hash for the intent and combine it with the
//!    domain hash into one signing digest ([`eip712`], [`intent`]),
//! 3. recover the signer from (digest, signature) ([`signature`]),
//! 4. after deadline and signer-match validation succeed, consume the nonce.
//!
//! All functions here are pure given their inputs except the nonce registry,
//! which is the only stateful piece.

use thiserror::Error;

/// Domain separator and final-digest construction.
pub mod eip712;
/// Typed authorization intents and their structural hashes.
pub mod intent;
/// Per-account replay-protection counters.
pub mod nonce;
/// Signature payload normalization and signer recovery.
pub mod signature;

pub use eip712::{domain_hash, signing_digest, WordEncoder, DOMAIN_TYPE};
pub use intent::{
	ApproveIntent, TransferIntent, PERMIT_TYPE, SIGNED_APPROVE_TYPE, SIGNED_TRANSFER_TYPE,
};
pub use nonce::NonceRegistry;
pub use signature::{public_key_address, recover_signer, SignaturePayload};

/// Errors that can occur during signature authorization.
///
/// These are all reported to the caller rather than panicking; a malformed
/// or unattributable signature is a routine input, not a crash.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
	/// The signature bytes could not be interpreted at all.
	#[error("malformed signature: {0}")]
	MalformedSignature(String),
	/// The signature parsed but no public key could be recovered from it.
	#[error("signer recovery failed: {0}")]
	RecoveryFailed(String),
	/// Recovery produced the zero address, which is never a valid signer.
	#[error("recovered signer is the zero address")]
	ZeroSigner,
}
