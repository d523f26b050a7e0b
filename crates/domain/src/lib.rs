//! Countrylist domain: countries, the catalog they come in, and the bounded
//! shortlist a user curates from it.
//!
//! This crate is pure - no I/O, no async, no clocks.

extern crate self as countrylist_domain;

pub mod aggregates;
pub mod common;
pub mod entities;
pub mod error;
pub mod events;
pub mod value_objects;

pub use aggregates::{Catalog, Shortlist, DEFAULT_SHORTLIST_CAPACITY};
pub use entities::Country;
pub use error::DomainError;
pub use events::{AddOutcome, AddRejection, RemoveOutcome, SearchOutcome, SeedOutcome};
pub use value_objects::CountryName;
