//! Shortlist aggregate - the user's bounded, ordered pick of countries.

use std::collections::BTreeSet;

use crate::entities::Country;
use crate::error::DomainError;
use crate::events::{AddOutcome, AddRejection, RemoveOutcome};

/// Default number of countries a shortlist may hold.
pub const DEFAULT_SHORTLIST_CAPACITY: usize = 5;

/// Ordered, capacity-bounded list of distinct countries.
///
/// Invariants, upheld by every mutation:
/// - `len() <= capacity()`
/// - no two entries share a common name
/// - entries keep insertion order; growth only appends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortlist {
    entries: Vec<Country>,
    capacity: usize,
}

impl Default for Shortlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Shortlist {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SHORTLIST_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild a shortlist from previously stored entries.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ContainerFull` when there are more entries than
    /// `capacity`, and `DomainError::Constraint` on a repeated common name.
    pub fn from_entries(entries: Vec<Country>, capacity: usize) -> Result<Self, DomainError> {
        if entries.len() > capacity {
            return Err(DomainError::container_full(entries.len(), capacity));
        }
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.common_name()) {
                return Err(DomainError::constraint(format!(
                    "Duplicate shortlist entry: {}",
                    entry.common_name()
                )));
            }
        }
        Ok(Self { entries, capacity })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Country> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Country] {
        &self.entries
    }

    pub fn contains(&self, country: &Country) -> bool {
        self.entries.contains(country)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append `country` unless the list is full or already holds it.
    pub fn add(&mut self, country: Country) -> AddOutcome {
        if self.is_full() {
            return AddOutcome::Rejected(AddRejection::Full {
                capacity: self.capacity,
            });
        }
        if self.contains(&country) {
            return AddOutcome::Rejected(AddRejection::Duplicate);
        }
        self.entries.push(country);
        AddOutcome::Added {
            position: self.entries.len() - 1,
        }
    }

    /// Remove the entry at `index`.
    pub fn remove(&mut self, index: usize) -> RemoveOutcome {
        self.remove_at(&[index])
    }

    /// Remove every entry addressed by `offsets` in one step.
    ///
    /// Repeated offsets count once. If any offset is out of range nothing is
    /// removed.
    pub fn remove_at(&mut self, offsets: &[usize]) -> RemoveOutcome {
        if offsets.is_empty() {
            return RemoveOutcome::Nothing;
        }
        let len = self.entries.len();
        if let Some(&index) = offsets.iter().find(|&&i| i >= len) {
            return RemoveOutcome::OutOfRange { index, len };
        }

        let targets: BTreeSet<usize> = offsets.iter().copied().collect();
        let mut removed = Vec::with_capacity(targets.len());
        let mut kept = Vec::with_capacity(len - targets.len());
        for (i, entry) in std::mem::take(&mut self.entries).into_iter().enumerate() {
            if targets.contains(&i) {
                removed.push(entry);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        RemoveOutcome::Removed(removed)
    }

    /// Replace all entries with `other`'s, keeping this list's capacity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ContainerFull` and leaves the list untouched when
    /// `other` holds more entries than this list's capacity.
    pub fn replace_with(&mut self, other: Shortlist) -> Result<(), DomainError> {
        if other.entries.len() > self.capacity {
            return Err(DomainError::container_full(
                other.entries.len(),
                self.capacity,
            ));
        }
        self.entries = other.entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str) -> Country {
        Country::named(name).unwrap()
    }

    fn names(list: &Shortlist) -> Vec<&str> {
        list.iter().map(|c| c.common_name().as_str()).collect()
    }

    mod add {
        use super::*;

        #[test]
        fn appends_in_insertion_order() {
            let mut list = Shortlist::new();
            assert_eq!(list.add(country("USA")), AddOutcome::Added { position: 0 });
            assert_eq!(list.add(country("Canada")), AddOutcome::Added { position: 1 });
            assert_eq!(names(&list), vec!["USA", "Canada"]);
        }

        #[test]
        fn duplicate_is_rejected() {
            let mut list = Shortlist::new();
            list.add(country("USA"));
            assert_eq!(
                list.add(country("USA")),
                AddOutcome::Rejected(AddRejection::Duplicate)
            );
            assert_eq!(list.len(), 1);
        }

        #[test]
        fn duplicate_check_is_case_sensitive() {
            let mut list = Shortlist::new();
            list.add(country("USA"));
            assert!(list.add(country("usa")).is_added());
        }

        #[test]
        fn capacity_is_never_exceeded() {
            let mut list = Shortlist::new();
            for name in ["A", "B", "C", "D", "E", "F", "G"] {
                list.add(country(name));
                assert!(list.len() <= DEFAULT_SHORTLIST_CAPACITY);
            }
            assert_eq!(names(&list), vec!["A", "B", "C", "D", "E"]);
            assert_eq!(
                list.add(country("Italy")),
                AddOutcome::Rejected(AddRejection::Full { capacity: 5 })
            );
        }

        #[test]
        fn full_takes_precedence_over_duplicate() {
            let mut list = Shortlist::with_capacity(1);
            list.add(country("USA"));
            assert_eq!(
                list.add(country("USA")),
                AddOutcome::Rejected(AddRejection::Full { capacity: 1 })
            );
        }

        #[test]
        fn zero_capacity_refuses_everything() {
            let mut list = Shortlist::with_capacity(0);
            assert!(!list.add(country("USA")).is_added());
            assert!(list.is_empty());
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn removes_by_index() {
            let mut list = Shortlist::new();
            list.add(country("USA"));
            list.add(country("Canada"));
            assert_eq!(list.remove(0), RemoveOutcome::Removed(vec![country("USA")]));
            assert_eq!(names(&list), vec!["Canada"]);
        }

        #[test]
        fn out_of_range_leaves_list_untouched() {
            let mut list = Shortlist::new();
            list.add(country("USA"));
            assert_eq!(
                list.remove(3),
                RemoveOutcome::OutOfRange { index: 3, len: 1 }
            );
            assert_eq!(names(&list), vec!["USA"]);
        }

        #[test]
        fn remove_from_empty_is_out_of_range() {
            let mut list = Shortlist::new();
            assert_eq!(
                list.remove(0),
                RemoveOutcome::OutOfRange { index: 0, len: 0 }
            );
        }

        #[test]
        fn removes_several_offsets_at_once() {
            let mut list = Shortlist::new();
            for name in ["A", "B", "C", "D"] {
                list.add(country(name));
            }
            let outcome = list.remove_at(&[3, 1, 1]);
            assert_eq!(
                outcome,
                RemoveOutcome::Removed(vec![country("B"), country("D")])
            );
            assert_eq!(names(&list), vec!["A", "C"]);
        }

        #[test]
        fn any_bad_offset_rejects_the_batch() {
            let mut list = Shortlist::new();
            list.add(country("A"));
            list.add(country("B"));
            assert_eq!(
                list.remove_at(&[0, 5]),
                RemoveOutcome::OutOfRange { index: 5, len: 2 }
            );
            assert_eq!(list.len(), 2);
            assert_eq!(list.remove_at(&[]), RemoveOutcome::Nothing);
        }

        #[test]
        fn removal_frees_capacity() {
            let mut list = Shortlist::with_capacity(1);
            list.add(country("A"));
            list.remove(0);
            assert!(list.add(country("B")).is_added());
        }
    }

    mod from_entries {
        use super::*;

        #[test]
        fn accepts_valid_entries() {
            let list =
                Shortlist::from_entries(vec![country("A"), country("B")], 5).unwrap();
            assert_eq!(names(&list), vec!["A", "B"]);
        }

        #[test]
        fn rejects_duplicates() {
            let result = Shortlist::from_entries(vec![country("A"), country("A")], 5);
            assert!(matches!(result, Err(DomainError::Constraint(_))));
        }

        #[test]
        fn rejects_too_many() {
            let entries = ["A", "B", "C"].into_iter().map(country).collect();
            let result = Shortlist::from_entries(entries, 2);
            assert_eq!(result, Err(DomainError::container_full(3, 2)));
        }
    }

    #[test]
    fn replace_with_swaps_entries() {
        let mut list = Shortlist::new();
        list.add(country("A"));
        let restored = Shortlist::from_entries(vec![country("B"), country("C")], 5).unwrap();
        list.replace_with(restored).unwrap();
        assert_eq!(names(&list), vec!["B", "C"]);
        assert_eq!(list.capacity(), 5);
    }

    #[test]
    fn replace_with_refuses_more_than_capacity() {
        let mut list = Shortlist::with_capacity(2);
        list.add(country("A"));
        let bigger = Shortlist::from_entries(vec![country("B"), country("C"), country("D")], 5)
            .unwrap();

        assert_eq!(
            list.replace_with(bigger),
            Err(DomainError::container_full(3, 2))
        );
        assert_eq!(names(&list), vec!["A"]);
        assert_eq!(list.capacity(), 2);
    }
}
