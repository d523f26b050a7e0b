//! Selection state: the catalog, the user's shortlist, and the workflow that
//! fetches, seeds, mutates and persists them.

mod handle;
mod manager;
mod snapshot;

pub use handle::{SelectionCommand, SelectionError, SelectionHandle};
pub use manager::{
    FetchOutcome, SelectionManager, SelectionSettings, DEFAULT_COUNTRY, DEFAULT_LOCATION_TIMEOUT,
};
pub use snapshot::SelectionSnapshot;
