//! Test doubles shared by unit tests across the crate.

mod fixtures;

pub use fixtures::{country, sample_catalog, SlowLocation, StubDirectory};
