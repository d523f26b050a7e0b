//! State containers for dependency injection
//!
//! This module contains DI containers that aggregate adapters behind port
//! traits. These are concrete types that belong in the adapters layer, not
//! the ports layer.

mod platform;

pub use platform::Platform;
