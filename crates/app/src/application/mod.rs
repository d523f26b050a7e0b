//! Application layer: use cases built on the outbound ports.

pub mod services;

pub use services::{
    FetchOutcome, RestoreOutcome, SelectionError, SelectionHandle, SelectionManager,
    SelectionSettings, SelectionSnapshot, ShortlistStore,
};
