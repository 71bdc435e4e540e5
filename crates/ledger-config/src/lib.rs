//! Instance configuration for the token ledger.
//!
//! Configuration is consumed exactly once, at instance creation, and fixes
//! the token metadata, the signing-domain identity, and the genesis grant.
//! The domain identity must never change once an instance is live, or all
//! previously issued signatures silently invalidate — so everything here is
//! read, validated, and then owned immutably by the ledger.

use alloy_primitives::Address;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading the configuration file.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error parsing TOML content.
	#[error("Parse error: {0}")]
	Parse(#[from] toml::de::Error),
	/// Configuration parsed but failed a semantic check.
	#[error("Validation error: {0}")]
	Validation(String),
}

/// Complete ledger instance configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Token display metadata.
	pub token: TokenConfig,
	/// Signing-domain identity, fixed for the life of the instance.
	pub domain: DomainConfig,
	/// Genesis grant consumed at initialization.
	pub genesis: GenesisConfig,
}

/// Token display metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
	/// Human-readable token name; also the signing-domain name.
	pub name: String,
	/// Short display symbol.
	pub symbol: String,
	/// Decimal precision for display purposes.
	pub decimals: u8,
}

/// Signing-domain identity.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
	/// Domain version tag (distinct from the logic version counter).
	pub version: String,
	/// Chain identifier bound into every digest.
	pub chain_id: u64,
	/// Verifying-entity address bound into every digest.
	pub verifying_address: Address,
}

/// Genesis parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct GenesisConfig {
	/// Deployer account: receives both roles and the initial issuance.
	pub deployer: Address,
	/// Fixed initial issuance credited to the deployer. May be zero.
	#[serde(default)]
	pub initial_supply: u128,
}

impl Config {
	/// Load and validate configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Semantic checks that TOML parsing cannot express.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.token.name.is_empty() {
			return Err(ConfigError::Validation("token.name must not be empty".into()));
		}
		if self.token.symbol.is_empty() {
			return Err(ConfigError::Validation(
				"token.symbol must not be empty".into(),
			));
		}
		if self.domain.version.is_empty() {
			return Err(ConfigError::Validation(
				"domain.version must not be empty".into(),
			));
		}
		if self.domain.verifying_address == Address::ZERO {
			return Err(ConfigError::Validation(
				"domain.verifying_address must not be the zero address".into(),
			));
		}
		if self.genesis.deployer == Address::ZERO {
			return Err(ConfigError::Validation(
				"genesis.deployer must not be the zero address".into(),
			));
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const VALID: &str = r#"
		[token]
		name = "Example Token"
		symbol = "EXT"
		decimals = 18

		[domain]
		version = "1"
		chain_id = 31337
		verifying_address = "0x5fbdb2315678afecb367f032d93f642f64180aa3"

		[genesis]
		deployer = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
		initial_supply = 1000
	"#;

	#[test]
	fn test_parse_valid_config() {
		let config: Config = VALID.parse().unwrap();
		assert_eq!(config.token.name, "Example Token");
		assert_eq!(config.token.decimals, 18);
		assert_eq!(config.domain.chain_id, 31337);
		assert_eq!(config.genesis.initial_supply, 1000);
	}

	#[test]
	fn test_initial_supply_defaults_to_zero() {
		let without_supply = VALID.replace("initial_supply = 1000", "");
		let config: Config = without_supply.parse().unwrap();
		assert_eq!(config.genesis.initial_supply, 0);
	}

	#[test]
	fn test_empty_name_rejected() {
		let bad = VALID.replace("name = \"Example Token\"", "name = \"\"");
		assert!(matches!(
			bad.parse::<Config>(),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn test_zero_deployer_rejected() {
		let bad = VALID.replace(
			"deployer = \"0x70997970c51812dc3a010c7d01b50e0d17dc79c8\"",
			"deployer = \"0x0000000000000000000000000000000000000000\"",
		);
		assert!(matches!(
			bad.parse::<Config>(),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn test_malformed_address_is_parse_error() {
		let bad = VALID.replace(
			"0x5fbdb2315678afecb367f032d93f642f64180aa3",
			"0xnot-an-address",
		);
		assert!(matches!(bad.parse::<Config>(), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_missing_section_is_parse_error() {
		let bad = VALID.replace("[genesis]", "[something_else]");
		assert!(matches!(bad.parse::<Config>(), Err(ConfigError::Parse(_))));
	}
}
