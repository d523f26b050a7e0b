//! Common utility functions shared by the domain types.
//!
//! Pure functions only - no side effects, no I/O.

pub mod string;

pub use string::{first_or_unknown, non_blank, UNKNOWN};
