//! Domain entities.

pub mod country;

pub use country::Country;
