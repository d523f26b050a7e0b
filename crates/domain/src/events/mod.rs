//! Domain Events
//!
//! Return types from aggregate mutations, communicating what happened when
//! state was (or was not) modified. Rejections are outcomes rather than
//! errors so callers can ignore them without ceremony.

pub mod shortlist_events;

pub use shortlist_events::*;
