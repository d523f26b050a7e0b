//! Catalog aggregate - the full directory listing from one fetch.

use crate::entities::Country;

/// Ordered list of countries exactly as returned by one directory fetch.
///
/// A catalog is never edited; a new fetch produces a new catalog that
/// replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    countries: Vec<Country>,
}

impl Catalog {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    pub fn as_slice(&self) -> &[Country] {
        &self.countries
    }

    /// First entry whose common name equals `name` exactly.
    pub fn find_exact(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.is_named(name))
    }

    /// First entry whose common name equals `term` ignoring case.
    pub fn find_ignore_case(&self, term: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.common_name().matches_ignore_case(term))
    }

    /// Entries whose common name contains `fragment` ignoring case, in catalog
    /// order. An empty fragment yields every entry.
    pub fn filter<'a>(&'a self, fragment: &str) -> impl Iterator<Item = &'a Country> + 'a {
        let needle = fragment.to_lowercase();
        self.countries
            .iter()
            .filter(move |c| c.common_name().as_str().to_lowercase().contains(&needle))
    }
}

impl FromIterator<Country> for Catalog {
    fn from_iter<T: IntoIterator<Item = Country>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
