//! Read-only view of the selection state

use std::sync::Arc;

use countrylist_domain::{Catalog, Shortlist};

/// Point-in-time copy of everything a front-end renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// Catalog from the last successful fetch; shared, never copied
    pub catalog: Arc<Catalog>,
    pub shortlist: Shortlist,
    /// A directory fetch is in flight
    pub loading: bool,
    /// A location lookup for auto-seeding is in flight
    pub locating: bool,
    pub search_term: String,
    /// Last non-fatal failure, cleared by the next successful fetch
    pub notice: Option<String>,
}

impl SelectionSnapshot {
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether background work may still change the state
    pub fn is_busy(&self) -> bool {
        self.loading || self.locating
    }
}
