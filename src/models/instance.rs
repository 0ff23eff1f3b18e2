//! Problem instance.
//!
//! Bundles the books, the libraries and the scanning-day budget of one run.
//! An instance is immutable once built; all per-run mutable state lives in
//! [`ScanState`](crate::dispatching::ScanState).

use serde::{Deserialize, Serialize};

use super::{Book, BookId, Library, LibraryId};

/// A fully materialized problem instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    books: Vec<Book>,
    libraries: Vec<Library>,
    days: u64,
}

impl Instance {
    /// Creates an instance and computes every library's catalog value.
    ///
    /// Catalog entries that do not resolve to a book contribute nothing;
    /// [`validate_instance`](crate::validation::validate_instance) reports them.
    pub fn new(books: Vec<Book>, mut libraries: Vec<Library>, days: u64) -> Self {
        for library in &mut libraries {
            library.catalog_value = library
                .books
                .iter()
                .filter_map(|&id| books.get(id))
                .fold(0, |acc: u64, b| acc.saturating_add(b.value));
        }
        Self {
            books,
            libraries,
            days,
        }
    }

    /// Creates an instance whose book ids are the positions in `values`.
    pub fn from_values(values: &[u64], libraries: Vec<Library>, days: u64) -> Self {
        let books = values
            .iter()
            .enumerate()
            .map(|(id, &value)| Book::new(id, value))
            .collect();
        Self::new(books, libraries, days)
    }

    /// All books, indexed by id.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All libraries, in input order.
    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// Scanning-day budget.
    pub fn days(&self) -> u64 {
        self.days
    }

    /// Number of books.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Number of libraries.
    pub fn library_count(&self) -> usize {
        self.libraries.len()
    }

    /// Looks up a book by id.
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(id)
    }

    /// Value of a book, or zero for an unknown id.
    #[inline]
    pub fn book_value(&self, id: BookId) -> u64 {
        self.books.get(id).map_or(0, |b| b.value)
    }

    /// Finds a library by id.
    ///
    /// Libraries loaded from text have `id == position`; instances built by
    /// hand may not, so this falls back to a linear search.
    pub fn library(&self, id: LibraryId) -> Option<&Library> {
        match self.libraries.get(id) {
            Some(l) if l.id == id => Some(l),
            _ => self.libraries.iter().find(|l| l.id == id),
        }
    }

    /// Sum of the values of every book referenced by at least one catalog.
    ///
    /// Upper bound on the value any schedule can deliver. Saturates at
    /// `u64::MAX`.
    pub fn reachable_value(&self) -> u64 {
        let mut seen = vec![false; self.books.len()];
        let mut total: u64 = 0;
        for library in &self.libraries {
            for &id in &library.books {
                if let Some(flag) = seen.get_mut(id) {
                    if !*flag {
                        *flag = true;
                        total = self.books[id].value.saturating_add(total);
                    }
                }
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Instance {
        Instance::from_values(
            &[1, 2, 3, 5, 8, 13],
            vec![
                Library::new(0)
                    .with_books_per_day(2)
                    .with_books(vec![0, 1, 2, 3]),
                Library::new(1).with_books(vec![4, 5]),
            ],
            7,
        )
    }

    #[test]
    fn test_catalog_value_computed() {
        let inst = sample();
        assert_eq!(inst.libraries()[0].catalog_value, 11);
        assert_eq!(inst.libraries()[1].catalog_value, 21);
    }

    #[test]
    fn test_lookups() {
        let inst = sample();
        assert_eq!(inst.book_count(), 6);
        assert_eq!(inst.library_count(), 2);
        assert_eq!(inst.days(), 7);
        assert_eq!(inst.book_value(5), 13);
        assert_eq!(inst.book_value(99), 0);
        assert_eq!(inst.library(1).map(|l| l.catalog_value), Some(21));
        assert!(inst.library(7).is_none());
    }

    #[test]
    fn test_library_lookup_non_positional() {
        let inst = Instance::from_values(&[1], vec![Library::new(9).with_book(0)], 1);
        assert_eq!(inst.library(9).map(|l| l.id), Some(9));
        assert!(inst.library(0).is_none());
    }

    #[test]
    fn test_unknown_reference_ignored_in_value() {
        let inst = Instance::from_values(&[4], vec![Library::new(0).with_books(vec![0, 3])], 1);
        assert_eq!(inst.libraries()[0].catalog_value, 4);
    }

    #[test]
    fn test_reachable_value_counts_shared_books_once() {
        let inst = Instance::from_values(
            &[10, 20, 40],
            vec![
                Library::new(0).with_books(vec![0, 1]),
                Library::new(1).with_books(vec![1]),
            ],
            3,
        );
        assert_eq!(inst.reachable_value(), 30);
    }

    #[test]
    fn test_values_saturate() {
        let inst = Instance::from_values(
            &[u64::MAX, 1, 2],
            vec![
                Library::new(0).with_books(vec![0, 1]),
                Library::new(1).with_books(vec![2]),
            ],
            5,
        );
        assert_eq!(inst.libraries()[0].catalog_value, u64::MAX);
        assert_eq!(inst.libraries()[1].catalog_value, 2);
        assert_eq!(inst.reachable_value(), u64::MAX);
    }
}
