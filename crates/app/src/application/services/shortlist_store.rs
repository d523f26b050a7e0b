//! Shortlist Store - persists the shortlist as a JSON blob
//!
//! The blob is written under a single storage key after every shortlist
//! mutation and read back once when starting offline.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use countrylist_domain::{Country, Shortlist};
use serde::{Deserialize, Serialize};

use crate::ports::outbound::{ClockProvider, CodecError, StorageProvider};

/// Stored representation of a shortlist
#[derive(Debug, Serialize, Deserialize)]
struct StoredShortlist {
    saved_at: DateTime<Utc>,
    countries: Vec<Country>,
}

/// Result of restoring the shortlist from storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The stored shortlist replaced the current one; carries its length
    Restored(usize),
    /// Nothing stored under the key
    Missing,
    /// Stored bytes could not be decoded; the current shortlist was kept
    Corrupt,
}

/// Serialize `shortlist` stamped with `saved_at`.
pub fn encode(shortlist: &Shortlist, saved_at: DateTime<Utc>) -> Result<Vec<u8>, CodecError> {
    let stored = StoredShortlist {
        saved_at,
        countries: shortlist.as_slice().to_vec(),
    };
    serde_json::to_vec(&stored).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Deserialize a blob, revalidating the shortlist invariants against
/// `capacity`.
pub fn decode(bytes: &[u8], capacity: usize) -> Result<Shortlist, CodecError> {
    let stored: StoredShortlist =
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
    Shortlist::from_entries(stored.countries, capacity).map_err(|e| CodecError::Decode(e.to_string()))
}

/// Reads and writes the shortlist blob through a `StorageProvider`
#[derive(Clone)]
pub struct ShortlistStore {
    storage: Arc<dyn StorageProvider>,
    clock: Arc<dyn ClockProvider>,
    key: String,
}

impl ShortlistStore {
    pub fn new(
        storage: Arc<dyn StorageProvider>,
        clock: Arc<dyn ClockProvider>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            clock,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored blob with `shortlist`.
    pub fn save(&self, shortlist: &Shortlist) -> Result<(), CodecError> {
        let bytes = encode(shortlist, self.clock.now())?;
        self.storage.set(&self.key, &bytes);
        tracing::debug!(key = %self.key, entries = shortlist.len(), "Shortlist persisted");
        Ok(())
    }

    /// Read the stored shortlist, `Ok(None)` when nothing is stored.
    pub fn load(&self, capacity: usize) -> Result<Option<Shortlist>, CodecError> {
        match self.storage.get(&self.key) {
            Some(bytes) => decode(&bytes, capacity).map(Some),
            None => Ok(None),
        }
    }
}
