//! Address parsing and hex formatting helpers.
//!
//! These helpers normalize the hex representations used at the ledger's
//! boundaries (configuration files, logs, event consumers).

use alloy_primitives::Address;
use thiserror::Error;

/// Errors that can occur when parsing an address from its hex form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
	#[error("invalid hex: {0}")]
	InvalidHex(String),
	#[error("invalid address length: expected 20 bytes, got {0}")]
	InvalidLength(usize),
}

/// Parse a 20-byte address from a hex string, with or without `0x` prefix.
pub fn parse_address(input: &str) -> Result<Address, AddressParseError> {
	let stripped = without_0x_prefix(input);
	let bytes =
		hex::decode(stripped).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
	if bytes.len() != 20 {
		return Err(AddressParseError::InvalidLength(bytes.len()));
	}
	Ok(Address::from_slice(&bytes))
}

/// Ensure a hex string carries a `0x` prefix.
pub fn with_0x_prefix(value: &str) -> String {
	if value.starts_with("0x") {
		value.to_string()
	} else {
		format!("0x{}", value)
	}
}

/// Strip a leading `0x` prefix if present.
pub fn without_0x_prefix(value: &str) -> &str {
	value.strip_prefix("0x").unwrap_or(value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_address_with_prefix() {
		let addr = parse_address("0x5fbdb2315678afecb367f032d93f642f64180aa3").unwrap();
		assert_eq!(
			hex::encode(addr.as_slice()),
			"5fbdb2315678afecb367f032d93f642f64180aa3"
		);
	}

	#[test]
	fn test_parse_address_without_prefix() {
		let addr = parse_address("5fbdb2315678afecb367f032d93f642f64180aa3").unwrap();
		assert_eq!(
			hex::encode(addr.as_slice()),
			"5fbdb2315678afecb367f032d93f642f64180aa3"
		);
	}

	#[test]
	fn test_parse_address_rejects_bad_length() {
		assert_eq!(
			parse_address("0xdeadbeef"),
			Err(AddressParseError::InvalidLength(4))
		);
	}

	#[test]
	fn test_parse_address_rejects_bad_hex() {
		assert!(matches!(
			parse_address("0xzz5fbdb2315678afecb367f032d93f642f64180a"),
			Err(AddressParseError::InvalidHex(_))
		));
	}

	#[test]
	fn test_prefix_helpers() {
		assert_eq!(with_0x_prefix("abcd"), "0xabcd");
		assert_eq!(with_0x_prefix("0xabcd"), "0xabcd");
		assert_eq!(without_0x_prefix("0xabcd"), "abcd");
		assert_eq!(without_0x_prefix("abcd"), "abcd");
	}
}
