//! Platform-specific implementations
//!
//! Concrete adapters for the platform ports in `ports/outbound/platform.rs`.
//! `desktop` talks to the real filesystem, network and clock and wires the
//! `Platform` container; `memory` keeps everything in process.

mod desktop;
mod memory;

pub use desktop::{
    create_platform, probe, DesktopPlatform, FileStorage, NetworkMonitor, SystemClock,
    DEFAULT_PROBE_ADDR,
};
pub use memory::{FixedClock, MemoryStorage, StaticConnectivity};
