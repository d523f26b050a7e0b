//! Selection Manager - owns the catalog and the user's shortlist
//!
//! All state lives on whichever task owns the manager. Directory fetches and
//! location lookups run as spawned tasks and report back through a completion
//! channel; nothing touches state until the owner applies the completion.

use std::sync::Arc;
use std::time::Duration;

use countrylist_domain::{
    AddOutcome, Catalog, Country, RemoveOutcome, SearchOutcome, SeedOutcome, Shortlist,
    DEFAULT_SHORTLIST_CAPACITY,
};
use tokio::sync::mpsc;

use super::snapshot::SelectionSnapshot;
use crate::application::services::shortlist_store::{RestoreOutcome, ShortlistStore};
use crate::ports::outbound::{
    storage_keys, CodecError, ConnectivityProvider, DirectoryError, DirectoryPort, LocationPort,
};
use crate::state::Platform;

/// Country seeded when the located one is unavailable.
pub const DEFAULT_COUNTRY: &str = "Russia";

/// Longest wait for a location answer before falling back.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for a `SelectionManager`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSettings {
    pub default_country: String,
    pub capacity: usize,
    pub location_timeout: Duration,
    pub storage_key: String,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            default_country: DEFAULT_COUNTRY.to_string(),
            capacity: DEFAULT_SHORTLIST_CAPACITY,
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
            storage_key: storage_keys::SAVED_COUNTRIES.to_string(),
        }
    }
}

/// Result of asking for a catalog fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A fetch task was spawned
    Started,
    /// A fetch is already in flight; this request was dropped
    AlreadyLoading,
    /// Offline: the saved shortlist was restored instead
    RestoredOffline(RestoreOutcome),
}

/// Result of background work, applied by the owning task
#[derive(Debug)]
pub(super) enum Completion {
    Fetched(Result<Vec<Country>, DirectoryError>),
    Located(Option<String>),
}

pub struct SelectionManager {
    directory: Arc<dyn DirectoryPort>,
    location: Arc<dyn LocationPort>,
    connectivity: Arc<dyn ConnectivityProvider>,
    store: ShortlistStore,
    settings: SelectionSettings,

    catalog: Arc<Catalog>,
    shortlist: Shortlist,
    loading: bool,
    pending_locations: usize,
    search_term: String,
    notice: Option<String>,
    last_seed: Option<SeedOutcome>,

    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl SelectionManager {
    /// Build a manager and immediately fetch the catalog (or restore the
    /// saved shortlist when offline).
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(platform: &Platform, settings: SelectionSettings) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let store = ShortlistStore::new(
            platform.storage(),
            platform.clock(),
            settings.storage_key.clone(),
        );

        let mut manager = Self {
            directory: platform.directory(),
            location: platform.location(),
            connectivity: platform.connectivity(),
            store,
            shortlist: Shortlist::with_capacity(settings.capacity),
            settings,
            catalog: Arc::new(Catalog::empty()),
            loading: false,
            pending_locations: 0,
            search_term: String::new(),
            notice: None,
            last_seed: None,
            completions_tx,
            completions_rx,
        };
        manager.fetch_countries();
        manager
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shortlist(&self) -> &Shortlist {
        &self.shortlist
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_locating(&self) -> bool {
        self.pending_locations > 0
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// How the most recent auto-seed went, if one has run
    pub fn last_seed(&self) -> Option<&SeedOutcome> {
        self.last_seed.as_ref()
    }

    pub fn settings(&self) -> &SelectionSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            catalog: Arc::clone(&self.catalog),
            shortlist: self.shortlist.clone(),
            loading: self.loading,
            locating: self.is_locating(),
            search_term: self.search_term.clone(),
            notice: self.notice.clone(),
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Start a catalog fetch, or restore the saved shortlist when offline.
    pub fn fetch_countries(&mut self) -> FetchOutcome {
        if self.loading {
            tracing::debug!("Fetch already in flight, ignoring request");
            return FetchOutcome::AlreadyLoading;
        }

        if !self.connectivity.is_online() {
            tracing::info!("Offline, restoring saved shortlist instead of fetching");
            return FetchOutcome::RestoredOffline(self.restore_shortlist());
        }

        self.loading = true;
        let directory = Arc::clone(&self.directory);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = directory.fetch_all().await;
            // The manager may have been dropped meanwhile
            let _ = completions.send(Completion::Fetched(result));
        });
        FetchOutcome::Started
    }

    /// Drive background work until no fetch or location lookup is pending.
    pub async fn settle(&mut self) {
        while self.loading || self.pending_locations > 0 {
            match self.completions_rx.recv().await {
                Some(completion) => self.apply(completion),
                None => break,
            }
        }
    }

    pub(super) async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    pub(super) fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Fetched(Ok(countries)) => {
                self.loading = false;
                self.notice = None;
                tracing::info!(count = countries.len(), "Catalog loaded");
                self.catalog = Arc::new(Catalog::new(countries));
                self.start_location();
            }
            Completion::Fetched(Err(e)) => {
                self.loading = false;
                tracing::error!(error = %e, "Failed to fetch countries");
                self.notice = Some(format!("Could not load countries: {e}"));
            }
            Completion::Located(resolved) => {
                self.pending_locations = self.pending_locations.saturating_sub(1);
                let outcome = self.seed_from(resolved.as_deref());
                self.last_seed = Some(outcome);
            }
        }
    }

    fn start_location(&mut self) {
        self.pending_locations += 1;
        let location = Arc::clone(&self.location);
        let timeout = self.settings.location_timeout;
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let resolved = resolve_within(location.as_ref(), timeout).await;
            let _ = completions.send(Completion::Located(resolved));
        });
    }

    // =========================================================================
    // Auto-seed
    // =========================================================================

    /// Resolve the current country now and seed the shortlist from it.
    pub async fn auto_seed_from_location(&mut self) -> SeedOutcome {
        let location = Arc::clone(&self.location);
        let resolved = resolve_within(location.as_ref(), self.settings.location_timeout).await;
        let outcome = self.seed_from(resolved.as_deref());
        self.last_seed = Some(outcome.clone());
        outcome
    }

    /// Add the catalog entry named `resolved`, or the default country when
    /// that is absent or unknown.
    pub fn seed_from(&mut self, resolved: Option<&str>) -> SeedOutcome {
        if let Some(name) = resolved {
            if let Some(country) = self.catalog.find_exact(name).cloned() {
                return match self.add(country.clone()) {
                    AddOutcome::Added { .. } => SeedOutcome::Located(country),
                    AddOutcome::Rejected(reason) => SeedOutcome::Rejected { country, reason },
                };
            }
            tracing::info!(country = %name, "Located country is not in the catalog");
        }

        match self.catalog.find_exact(&self.settings.default_country).cloned() {
            Some(country) => match self.add(country.clone()) {
                AddOutcome::Added { .. } => SeedOutcome::Fallback(country),
                AddOutcome::Rejected(reason) => SeedOutcome::Rejected { country, reason },
            },
            None => {
                tracing::warn!(
                    default = %self.settings.default_country,
                    "Default country is not in the catalog, nothing seeded"
                );
                SeedOutcome::NoMatch
            }
        }
    }

    // =========================================================================
    // Shortlist mutations
    // =========================================================================

    /// Add the first catalog entry whose name equals `term` ignoring case.
    ///
    /// The search term is cleared whenever a match is found, even if the
    /// shortlist refuses it.
    pub fn search_country(&mut self, term: &str) -> SearchOutcome {
        self.search_term = term.to_string();

        let Some(country) = self.catalog.find_ignore_case(term).cloned() else {
            tracing::debug!(term, "No catalog entry matches search");
            return SearchOutcome::NotFound;
        };

        let outcome = self.add(country.clone());
        self.search_term.clear();
        match outcome {
            AddOutcome::Added { position } => SearchOutcome::Added { country, position },
            AddOutcome::Rejected(reason) => SearchOutcome::Rejected { country, reason },
        }
    }

    pub fn add(&mut self, country: Country) -> AddOutcome {
        let name = country.common_name().clone();
        let outcome = self.shortlist.add(country);
        match outcome {
            AddOutcome::Added { position } => {
                tracing::info!(country = %name, position, "Added to shortlist");
                self.persist_after_change();
            }
            AddOutcome::Rejected(reason) => {
                tracing::debug!(country = %name, ?reason, "Shortlist refused country");
            }
        }
        outcome
    }

    pub fn remove(&mut self, index: usize) -> RemoveOutcome {
        self.remove_at(&[index])
    }

    /// Remove several entries as one change.
    pub fn remove_at(&mut self, offsets: &[usize]) -> RemoveOutcome {
        let outcome = self.shortlist.remove_at(offsets);
        match &outcome {
            RemoveOutcome::Removed(removed) => {
                tracing::info!(count = removed.len(), "Removed from shortlist");
                self.persist_after_change();
            }
            RemoveOutcome::OutOfRange { index, len } => {
                tracing::debug!(index, len, "Remove offset out of range");
            }
            RemoveOutcome::Nothing => {}
        }
        outcome
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn persist_shortlist(&self) -> Result<(), CodecError> {
        self.store.save(&self.shortlist)
    }

    fn persist_after_change(&self) {
        if let Err(e) = self.persist_shortlist() {
            tracing::warn!(error = %e, "Failed to persist shortlist");
        }
    }

    /// Replace the shortlist with the saved one, if it can be read.
    pub fn restore_shortlist(&mut self) -> RestoreOutcome {
        match self.store.load(self.settings.capacity) {
            Ok(Some(saved)) => {
                let count = saved.len();
                if let Err(e) = self.shortlist.replace_with(saved) {
                    tracing::warn!(error = %e, "Saved shortlist does not fit, keeping current one");
                    return RestoreOutcome::Corrupt;
                }
                tracing::info!(count, "Shortlist restored");
                RestoreOutcome::Restored(count)
            }
            Ok(None) => {
                tracing::debug!(key = %self.store.key(), "No saved shortlist");
                RestoreOutcome::Missing
            }
            Err(e) => {
                tracing::warn!(error = %e, "Saved shortlist unreadable, keeping current one");
                RestoreOutcome::Corrupt
            }
        }
    }
}

async fn resolve_within(location: &dyn LocationPort, timeout: Duration) -> Option<String> {
    match tokio::time::timeout(timeout, location.resolve_country()).await {
        Ok(resolved) => resolved,
        Err(_) => {
            tracing::warn!(timeout_secs = timeout.as_secs(), "Location lookup timed out");
            None
        }
    }
}
