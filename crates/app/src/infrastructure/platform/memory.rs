//! In-memory platform implementations
//!
//! Used when persistence is switched off and by tests that need stateful
//! collaborators rather than expectation-driven mocks.

use crate::ports::outbound::platform::{ClockProvider, ConnectivityProvider, StorageProvider};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Storage that lives for the lifetime of the process
#[derive(Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageProvider for MemoryStorage {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.values.lock() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!(error = %e, "Memory storage lock poisoned");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &[u8]) {
        match self.values.lock() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), value.to_vec());
            }
            Err(e) => tracing::error!(error = %e, "Memory storage lock poisoned"),
        }
    }
}

/// Connectivity that only changes when told to
#[derive(Clone)]
pub struct StaticConnectivity {
    online: Arc<AtomicBool>,
}

impl StaticConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl ConnectivityProvider for StaticConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}

/// Clock frozen at one instant
#[derive(Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl ClockProvider for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
