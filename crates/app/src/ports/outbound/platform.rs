//! Platform abstraction ports
//!
//! These traits abstract platform-specific operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with mock implementations
//!
//! NOTE: The `Platform` struct (DI container) that aggregates these traits
//! lives in `state/platform.rs`. Ports layer contains only trait definitions.

use chrono::{DateTime, Utc};

/// Network reachability, as last observed
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ConnectivityProvider: Send + Sync {
    /// Latest known value; may lag the real network state.
    fn is_online(&self) -> bool;
}

/// Local key/value byte storage (overwrite semantics, single writer)
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait StorageProvider: Send + Sync {
    /// Load the bytes stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &[u8]);
}

/// Wall clock
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ClockProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Storage key constants
///
/// Kept in the ports layer as they define the contract for what keys are
/// used across the application.
pub mod storage_keys {
    pub const SAVED_COUNTRIES: &str = "SavedCountries";
}
