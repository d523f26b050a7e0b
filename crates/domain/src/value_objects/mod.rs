//! Value objects - immutable, valid-by-construction domain values.

mod names;

pub use names::CountryName;
