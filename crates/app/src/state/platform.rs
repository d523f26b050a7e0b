//! Platform DI Container
//!
//! This module provides the `Platform` struct - a dependency injection container
//! that aggregates every collaborator the selection manager talks to behind
//! port traits.
//!
//! Usage:
//! - Created by `create_platform()` in `infrastructure/platform` from `AppConfig`
//! - Built by hand in tests with in-memory adapters and mocks
//! - Handed to `SelectionManager::new`

use std::sync::Arc;

use crate::ports::outbound::{
    ClockProvider, ConnectivityProvider, DirectoryPort, LocationPort, StorageProvider,
};

/// Unified platform services container
#[derive(Clone)]
pub struct Platform {
    directory: Arc<dyn DirectoryPort>,
    location: Arc<dyn LocationPort>,
    connectivity: Arc<dyn ConnectivityProvider>,
    storage: Arc<dyn StorageProvider>,
    clock: Arc<dyn ClockProvider>,
}

impl Platform {
    /// Create a new Platform with the given providers
    pub fn new(
        directory: Arc<dyn DirectoryPort>,
        location: Arc<dyn LocationPort>,
        connectivity: Arc<dyn ConnectivityProvider>,
        storage: Arc<dyn StorageProvider>,
        clock: Arc<dyn ClockProvider>,
    ) -> Self {
        Self {
            directory,
            location,
            connectivity,
            storage,
            clock,
        }
    }

    pub fn directory(&self) -> Arc<dyn DirectoryPort> {
        Arc::clone(&self.directory)
    }

    pub fn location(&self) -> Arc<dyn LocationPort> {
        Arc::clone(&self.location)
    }

    pub fn connectivity(&self) -> Arc<dyn ConnectivityProvider> {
        Arc::clone(&self.connectivity)
    }

    pub fn storage(&self) -> Arc<dyn StorageProvider> {
        Arc::clone(&self.storage)
    }

    pub fn clock(&self) -> Arc<dyn ClockProvider> {
        Arc::clone(&self.clock)
    }

    /// Latest known network reachability
    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }
}
