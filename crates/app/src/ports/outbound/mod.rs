//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the selection manager to interact with external systems without
//! depending on concrete implementations.

pub mod directory_port;
pub mod error;
pub mod location_port;
pub mod platform;

pub use directory_port::DirectoryPort;
pub use error::{CodecError, DirectoryError};
pub use location_port::LocationPort;
pub use platform::{storage_keys, ClockProvider, ConnectivityProvider, StorageProvider};

#[cfg(any(test, feature = "testing"))]
pub use directory_port::MockDirectoryPort;
#[cfg(any(test, feature = "testing"))]
pub use location_port::MockLocationPort;
#[cfg(any(test, feature = "testing"))]
pub use platform::{MockClockProvider, MockConnectivityProvider, MockStorageProvider};
