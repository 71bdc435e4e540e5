//! Current-time oracle for deadline checks.
//!
//! The ledger never blocks or schedules; "deadline" is a plain value
//! comparison against whatever oracle the embedder supplies. Production use
//! takes the system clock; tests pin time to exercise the deadline boundary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current UNIX time in seconds.
pub trait TimeOracle: Send + Sync {
	fn now(&self) -> u64;
}

/// System clock; returns 0 if system time is somehow before the UNIX epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeOracle for SystemClock {
	fn now(&self) -> u64 {
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_secs())
			.unwrap_or(0)
	}
}

/// Manually driven clock for deterministic runs.
#[derive(Debug, Default)]
pub struct FixedClock {
	now: AtomicU64,
}

impl FixedClock {
	pub fn new(now: u64) -> Self {
		Self {
			now: AtomicU64::new(now),
		}
	}

	pub fn set(&self, now: u64) {
		self.now.store(now, Ordering::SeqCst);
	}
}

impl TimeOracle for FixedClock {
	fn now(&self) -> u64 {
		self.now.load(Ordering::SeqCst)
	}
}
