//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome enums from mutations
//!
//! | Invariant | Enforced by |
//! |-----------|-------------|
//! | Catalog is replaced, never edited | no `&mut` methods on `Catalog` |
//! | Shortlist capacity and uniqueness | `Shortlist::add` is the only growth path |
//! | Stored shortlists are revalidated | `Shortlist::from_entries` |

pub mod catalog;
pub mod shortlist;

pub use catalog::Catalog;
pub use shortlist::{Shortlist, DEFAULT_SHORTLIST_CAPACITY};
