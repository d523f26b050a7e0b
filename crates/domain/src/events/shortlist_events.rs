//! Shortlist mutation outcomes

use crate::entities::Country;

/// Why an add was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddRejection {
    /// An entry with the same common name is already listed
    Duplicate,
    /// The shortlist already holds `capacity` entries
    Full { capacity: usize },
}

/// Outcome of adding a country to the shortlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended at `position` (zero-based)
    Added { position: usize },
    /// Nothing changed
    Rejected(AddRejection),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// Outcome of removing entries from the shortlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Entries removed, in their former shortlist order
    Removed(Vec<Country>),
    /// An offset did not address an entry; nothing changed
    OutOfRange { index: usize, len: usize },
    /// No offsets were given
    Nothing,
}

impl RemoveOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }
}

/// Outcome of a case-insensitive catalog search feeding the shortlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The match was appended
    Added { country: Country, position: usize },
    /// A match exists but the shortlist refused it
    Rejected {
        country: Country,
        reason: AddRejection,
    },
    /// No catalog entry matched
    NotFound,
}

/// Outcome of seeding the shortlist from the device location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The located country was added
    Located(Country),
    /// The default country was added instead
    Fallback(Country),
    /// The chosen country was refused by the shortlist
    Rejected {
        country: Country,
        reason: AddRejection,
    },
    /// Neither the located nor the default country is in the catalog
    NoMatch,
}
