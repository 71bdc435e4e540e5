//! Core state machine for the signature-authenticated token ledger.
//!
//! This crate coordinates the ledger's balances, allowances, role table and
//! logic version, exposing direct mutation entry points alongside the
//! meta-authorization paths that accept off-chain-signed intents. Every
//! transfer-shaped entry point funnels through one internal value-movement
//! primitive, and every signed path shares one verification discipline:
//! deadline check, digest over the signer's current nonce, signer recovery
//! and match, then nonce consumption.
//!
//! The execution environment is assumed to impose a total order over all
//! mutating calls (single in-flight operation); each operation validates
//! fully before writing, so a failure never leaves partial state.

use alloy_primitives::{Address, B256, U256};
use ledger_auth::{
	intent::{ApproveIntent, TransferIntent},
	nonce::NonceRegistry,
	recover_signer, AuthError, SignaturePayload,
};
use ledger_config::Config;
use ledger_types::{LedgerEvent, Role};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Current-time oracle for deadline checks.
pub mod clock;
/// Broadcast bus for notification events.
pub mod event_bus;
/// Shared storage schema.
pub mod state;
/// Versioned-upgrade authorization gate.
pub mod upgrade;

pub use clock::{FixedClock, SystemClock, TimeOracle};
pub use event_bus::EventBus;
pub use state::LedgerState;
pub use upgrade::{LogicCandidate, ProbeError};

/// Errors that can occur during ledger operations.
///
/// All variants are synchronous, non-retriable failures that abort the
/// triggering operation with no partial write. Retry, if any, is the
/// caller's responsibility.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
	/// Caller lacks a required role.
	#[error("caller lacks required role: {0}")]
	MissingRole(Role),
	/// The recovered signer does not authorize this operation. A stale or
	/// reused nonce surfaces here too: the recomputed digest no longer
	/// matches what was signed.
	#[error("signature does not authorize this operation")]
	BadSignature,
	/// The signature input itself was unusable.
	#[error(transparent)]
	Signature(#[from] AuthError),
	/// Current time exceeds the supplied deadline.
	#[error("deadline {deadline} has passed (now {now})")]
	DeadlineExpired { deadline: u64, now: u64 },
	/// Balance below the requested amount.
	#[error("insufficient balance")]
	InsufficientBalance,
	/// Allowance below the requested amount.
	#[error("insufficient allowance")]
	InsufficientAllowance,
	/// The null account is not a valid participant.
	#[error("null account is not a valid participant")]
	NullAccount,
	/// Zero-amount issuance is rejected.
	#[error("amount must be nonzero")]
	ZeroAmount,
	/// A credit would overflow the fixed-width balance or supply.
	#[error("arithmetic overflow")]
	ArithmeticOverflow,
	/// The candidate's version could not be obtained.
	#[error("candidate version unavailable: {0}")]
	VersionUnavailable(ProbeError),
	/// The candidate version is not exactly current + 1.
	#[error("candidate version {candidate} is not current version {current} + 1")]
	VersionPolicy { current: u32, candidate: u32 },
	/// The candidate's data migration failed; state is unchanged.
	#[error("migration to version {version} failed: {reason}")]
	MigrationFailed { version: u32, reason: String },
}

/// Token display metadata, fixed at initialization.
#[derive(Debug, Clone)]
pub struct TokenMetadata {
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
}

/// The ledger instance: state, replay counters, domain binding and the
/// notification bus.
pub struct Ledger {
	metadata: TokenMetadata,
	domain: B256,
	state: LedgerState,
	nonces: NonceRegistry,
	events: EventBus,
	clock: Arc<dyn TimeOracle>,
}

impl Ledger {
	/// Initialize a fresh instance from validated configuration, using the
	/// system clock as the time oracle.
	///
	/// The deployer receives the administrative and issuance roles plus the
	/// fixed initial issuance; the logic version starts at 1.
	pub fn initialize(config: &Config) -> Self {
		Self::with_clock(config, Arc::new(SystemClock))
	}

	/// Initialize with an explicit time oracle.
	pub fn with_clock(config: &Config, clock: Arc<dyn TimeOracle>) -> Self {
		let domain = ledger_auth::domain_hash(
			&config.token.name,
			&config.domain.version,
			config.domain.chain_id,
			&config.domain.verifying_address,
		);
		let mut ledger = Self {
			metadata: TokenMetadata {
				name: config.token.name.clone(),
				symbol: config.token.symbol.clone(),
				decimals: config.token.decimals,
			},
			domain,
			state: LedgerState::new(),
			nonces: NonceRegistry::new(),
			events: EventBus::default(),
			clock,
		};

		let deployer = config.genesis.deployer;
		for role in [Role::Admin, Role::Issuer] {
			ledger.state.roles.insert((role, deployer));
			ledger.events.publish(LedgerEvent::RoleGranted {
				role,
				account: deployer,
			});
		}

		let initial_supply = U256::from(config.genesis.initial_supply);
		if initial_supply > U256::ZERO {
			ledger.state.balances.insert(deployer, initial_supply);
			ledger.state.total_supply = initial_supply;
			ledger.events.publish(LedgerEvent::ValueMoved {
				from: Address::ZERO,
				to: deployer,
				amount: initial_supply,
			});
		}

		tracing::info!(
			token = %ledger.metadata.name,
			deployer = %deployer,
			initial_supply = %initial_supply,
			"ledger initialized"
		);
		ledger
	}

	// -------- read-only queries --------

	pub fn name(&self) -> &str {
		&self.metadata.name
	}

	pub fn symbol(&self) -> &str {
		&self.metadata.symbol
	}

	pub fn decimals(&self) -> u8 {
		self.metadata.decimals
	}

	/// The frozen domain hash binding signatures to this instance.
	pub fn domain_hash(&self) -> B256 {
		self.domain
	}

	pub fn total_supply(&self) -> U256 {
		self.state.total_supply
	}

	pub fn balance_of(&self, account: &Address) -> U256 {
		self.state.balance_of(account)
	}

	pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
		self.state.allowance_of(owner, spender)
	}

	/// The nonce the account's next signed authorization must embed.
	pub fn nonce_of(&self, account: &Address) -> u64 {
		self.nonces.current(account)
	}

	pub fn has_role(&self, role: Role, account: &Address) -> bool {
		self.state.has_role(role, account)
	}

	pub fn current_version(&self) -> u32 {
		self.state.logic_version
	}

	/// Read access to the raw storage schema.
	pub fn state(&self) -> &LedgerState {
		&self.state
	}

	/// Subscribe to notification events published after this call.
	pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
		self.events.subscribe()
	}

	// -------- signing digests for off-chain signers --------

	/// Digest a transfer-by-signature intent must sign, embedding the
	/// signer's current nonce.
	pub fn transfer_digest(
		&self,
		from: Address,
		to: Address,
		amount: U256,
		deadline: u64,
	) -> B256 {
		TransferIntent {
			from,
			to,
			amount,
			nonce: self.nonces.current(&from),
			deadline,
		}
		.signing_digest(&self.domain)
	}

	/// Digest an approve-by-signature intent must sign.
	pub fn approve_digest(
		&self,
		owner: Address,
		spender: Address,
		amount: U256,
		deadline: u64,
	) -> B256 {
		self.approve_intent(owner, spender, amount, deadline)
			.approve_signing_digest(&self.domain)
	}

	/// Digest a permit intent must sign. Distinct from [`Self::approve_digest`]
	/// even for identical fields.
	pub fn permit_digest(
		&self,
		owner: Address,
		spender: Address,
		value: U256,
		deadline: u64,
	) -> B256 {
		self.approve_intent(owner, spender, value, deadline)
			.permit_signing_digest(&self.domain)
	}

	fn approve_intent(
		&self,
		owner: Address,
		spender: Address,
		amount: U256,
		deadline: u64,
	) -> ApproveIntent {
		ApproveIntent {
			owner,
			spender,
			amount,
			nonce: self.nonces.current(&owner),
			deadline,
		}
	}

	// -------- role management --------

	/// Grant `role` to `account`. Caller must hold the administrative role.
	pub fn grant_role(
		&mut self,
		caller: Address,
		role: Role,
		account: Address,
	) -> Result<(), LedgerError> {
		self.require_role(&caller, Role::Admin)?;
		self.state.roles.insert((role, account));
		self.events.publish(LedgerEvent::RoleGranted { role, account });
		tracing::info!(%role, %account, "role granted");
		Ok(())
	}

	/// Revoke `role` from `account`. Caller must hold the administrative role.
	pub fn revoke_role(
		&mut self,
		caller: Address,
		role: Role,
		account: Address,
	) -> Result<(), LedgerError> {
		self.require_role(&caller, Role::Admin)?;
		self.state.roles.remove(&(role, account));
		self.events.publish(LedgerEvent::RoleRevoked { role, account });
		tracing::info!(%role, %account, "role revoked");
		Ok(())
	}

	// -------- direct mutation paths --------

	/// Issue `amount` new units to `to`. Caller must hold the issuance role;
	/// zero-value issuance and the null target are rejected.
	pub fn mint(&mut self, caller: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
		self.require_role(&caller, Role::Issuer)?;
		if to == Address::ZERO {
			return Err(LedgerError::NullAccount);
		}
		if amount == U256::ZERO {
			return Err(LedgerError::ZeroAmount);
		}

		let new_supply = self
			.state
			.total_supply
			.checked_add(amount)
			.ok_or(LedgerError::ArithmeticOverflow)?;
		let new_balance = self
			.state
			.balance_of(&to)
			.checked_add(amount)
			.ok_or(LedgerError::ArithmeticOverflow)?;

		self.state.total_supply = new_supply;
		self.state.balances.insert(to, new_balance);
		self.events.publish(LedgerEvent::ValueMoved {
			from: Address::ZERO,
			to,
			amount,
		});
		tracing::info!(%to, %amount, "minted");
		Ok(())
	}

	/// Destroy `amount` units from the caller's own balance.
	pub fn burn(&mut self, caller: Address, amount: U256) -> Result<(), LedgerError> {
		if amount == U256::ZERO {
			return Err(LedgerError::ZeroAmount);
		}
		let balance = self.state.balance_of(&caller);
		if balance < amount {
			return Err(LedgerError::InsufficientBalance);
		}

		self.state.balances.insert(caller, balance - amount);
		self.state.total_supply = self
			.state
			.total_supply
			.checked_sub(amount)
			.ok_or(LedgerError::ArithmeticOverflow)?;
		self.events.publish(LedgerEvent::ValueMoved {
			from: caller,
			to: Address::ZERO,
			amount,
		});
		tracing::info!(from = %caller, %amount, "burned");
		Ok(())
	}

	/// Move `amount` from the caller to `to`.
	pub fn transfer(
		&mut self,
		caller: Address,
		to: Address,
		amount: U256,
	) -> Result<(), LedgerError> {
		self.move_value(caller, to, amount)
	}

	/// Set (not add) the caller's allowance for `spender`.
	///
	/// Overwrite semantics are deliberate and carry the classic approve-race
	/// exposure: a spender can observe a pending re-approval and spend both
	/// the old and the new budget. Callers that care should set to zero
	/// first.
	pub fn approve(
		&mut self,
		caller: Address,
		spender: Address,
		amount: U256,
	) -> Result<(), LedgerError> {
		self.set_allowance(caller, spender, amount)
	}

	/// Spend from an allowance granted by `from` to the caller, then move
	/// the value. The allowance decrements by exactly `amount`.
	pub fn transfer_from(
		&mut self,
		caller: Address,
		from: Address,
		to: Address,
		amount: U256,
	) -> Result<(), LedgerError> {
		// Validate the movement first so a doomed call cannot burn allowance.
		self.ensure_movable(&from, &to, amount)?;
		let allowance = self.state.allowance_of(&from, &caller);
		if allowance < amount {
			return Err(LedgerError::InsufficientAllowance);
		}

		self.state
			.allowances
			.insert((from, caller), allowance - amount);
		self.move_value(from, to, amount)
	}

	// -------- signed (meta-authorization) paths --------

	/// Execute a transfer authorized by `from`'s signature over a
	/// [`TransferIntent`]. The submitter need not be the signer.
	pub fn signed_transfer(
		&mut self,
		from: Address,
		to: Address,
		amount: U256,
		deadline: u64,
		signature: &[u8],
	) -> Result<(), LedgerError> {
		let payload = SignaturePayload::from_packed(signature)?;
		self.check_deadline(deadline)?;

		let digest = self.transfer_digest(from, to, amount, deadline);
		self.check_signer(&digest, &payload, &from)?;

		// All remaining failure modes must be ruled out before the nonce
		// advances, or a failed call would invalidate the signature.
		self.ensure_movable(&from, &to, amount)?;
		self.nonces.consume(&from);
		self.move_value(from, to, amount)
	}

	/// Set an allowance authorized by the owner's signature over a
	/// `SignedApprove` intent (packed signature form).
	pub fn signed_approve(
		&mut self,
		owner: Address,
		spender: Address,
		amount: U256,
		deadline: u64,
		signature: &[u8],
	) -> Result<(), LedgerError> {
		let payload = SignaturePayload::from_packed(signature)?;
		self.signed_approval(owner, spender, amount, deadline, payload, false)
	}

	/// Set an allowance authorized by the owner's signature over a `Permit`
	/// intent, with the signature supplied as three discrete scalars.
	///
	/// Behaves identically to [`Self::signed_approve`] apart from the
	/// distinct type hash and signature shape.
	pub fn permit(
		&mut self,
		owner: Address,
		spender: Address,
		value: U256,
		deadline: u64,
		r: B256,
		s: B256,
		v: u8,
	) -> Result<(), LedgerError> {
		let payload = SignaturePayload::from_scalars(r, s, v)?;
		self.signed_approval(owner, spender, value, deadline, payload, true)
	}

	fn signed_approval(
		&mut self,
		owner: Address,
		spender: Address,
		amount: U256,
		deadline: u64,
		payload: SignaturePayload,
		permit: bool,
	) -> Result<(), LedgerError> {
		self.check_deadline(deadline)?;
		if spender == Address::ZERO {
			return Err(LedgerError::NullAccount);
		}

		let intent = self.approve_intent(owner, spender, amount, deadline);
		let digest = if permit {
			intent.permit_signing_digest(&self.domain)
		} else {
			intent.approve_signing_digest(&self.domain)
		};
		self.check_signer(&digest, &payload, &owner)?;

		self.nonces.consume(&owner);
		self.set_allowance(owner, spender, amount)
	}

	// -------- upgrade gate --------

	/// Authorize a logic swap to `candidate` and run its one-time data
	/// migration. Invoked by the surrounding platform immediately before the
	/// code swap; on error the version and state are unchanged.
	pub fn upgrade(
		&mut self,
		caller: Address,
		candidate: &dyn LogicCandidate,
	) -> Result<(), LedgerError> {
		self.require_role(&caller, Role::Admin)?;

		let candidate_version = candidate
			.reported_version()
			.map_err(LedgerError::VersionUnavailable)?;
		let current = self.state.logic_version;
		if !upgrade::is_next_version(current, candidate_version)
			|| self.state.migrations_applied.contains(&candidate_version)
		{
			return Err(LedgerError::VersionPolicy {
				current,
				candidate: candidate_version,
			});
		}

		// Run the transform against a staged copy so a failed migration
		// cannot leave partial state.
		let mut staged = self.state.clone();
		candidate
			.migrate(&mut staged)
			.map_err(|reason| LedgerError::MigrationFailed {
				version: candidate_version,
				reason,
			})?;
		staged.logic_version = candidate_version;
		staged.migrations_applied.insert(candidate_version);
		self.state = staged;

		self.events.publish(LedgerEvent::UpgradeApplied {
			old_version: current,
			new_version: candidate_version,
		});
		tracing::info!(
			old_version = current,
			new_version = candidate_version,
			"upgrade authorized"
		);
		Ok(())
	}

	// -------- internals --------

	/// Single capability check consulted by every gated operation.
	fn require_role(&self, caller: &Address, role: Role) -> Result<(), LedgerError> {
		if self.state.has_role(role, caller) {
			Ok(())
		} else {
			Err(LedgerError::MissingRole(role))
		}
	}

	fn check_deadline(&self, deadline: u64) -> Result<(), LedgerError> {
		let now = self.clock.now();
		// A deadline equal to the current time is still live.
		if now > deadline {
			return Err(LedgerError::DeadlineExpired { deadline, now });
		}
		Ok(())
	}

	fn check_signer(
		&self,
		digest: &B256,
		payload: &SignaturePayload,
		expected: &Address,
	) -> Result<(), LedgerError> {
		let signer = recover_signer(digest, payload)?;
		if signer != *expected {
			return Err(LedgerError::BadSignature);
		}
		Ok(())
	}

	/// Preconditions of [`Self::move_value`], without mutating anything.
	fn ensure_movable(
		&self,
		from: &Address,
		to: &Address,
		amount: U256,
	) -> Result<(), LedgerError> {
		if *from == Address::ZERO || *to == Address::ZERO {
			return Err(LedgerError::NullAccount);
		}
		if self.state.balance_of(from) < amount {
			return Err(LedgerError::InsufficientBalance);
		}
		Ok(())
	}

	/// The sole value-movement primitive. Every transfer-shaped entry point
	/// funnels through here; total supply is untouched.
	fn move_value(&mut self, from: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
		self.ensure_movable(&from, &to, amount)?;

		if from != to {
			let from_balance = self.state.balance_of(&from);
			let to_balance = self
				.state
				.balance_of(&to)
				.checked_add(amount)
				.ok_or(LedgerError::ArithmeticOverflow)?;
			// Sufficiency was checked above; the subtraction cannot wrap.
			self.state.balances.insert(from, from_balance - amount);
			self.state.balances.insert(to, to_balance);
		}

		self.events.publish(LedgerEvent::ValueMoved { from, to, amount });
		tracing::debug!(%from, %to, %amount, "value moved");
		Ok(())
	}

	fn set_allowance(
		&mut self,
		owner: Address,
		spender: Address,
		amount: U256,
	) -> Result<(), LedgerError> {
		if spender == Address::ZERO {
			return Err(LedgerError::NullAccount);
		}
		self.state.allowances.insert((owner, spender), amount);
		self.events.publish(LedgerEvent::SpendAuthorized {
			owner,
			spender,
			amount,
		});
		tracing::debug!(%owner, %spender, %amount, "spend authorized");
		Ok(())
	}
}
