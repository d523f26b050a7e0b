//! Application services
//!
//! Use cases for the country shortlist. Services depend on port traits, not
//! concrete infrastructure implementations.

pub mod selection;
pub mod shortlist_store;

pub use selection::{
    FetchOutcome, SelectionError, SelectionHandle, SelectionManager, SelectionSettings,
    SelectionSnapshot,
};
pub use shortlist_store::{RestoreOutcome, ShortlistStore};
