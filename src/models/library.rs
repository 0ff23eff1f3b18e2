//! Library model.
//!
//! Libraries are the resources of the problem: each one needs a number of
//! signup days before it can ship anything, then ships up to
//! `books_per_day` books every remaining day.

use serde::{Deserialize, Serialize};

use super::BookId;

/// Library identifier (position in the instance's library list).
pub type LibraryId = usize;

/// A library that can be signed up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Unique library identifier.
    pub id: LibraryId,
    /// Catalog, in input order.
    pub books: Vec<BookId>,
    /// Days consumed by the signup process.
    pub signup_days: u64,
    /// Books shipped per day once signed up.
    pub books_per_day: u64,
    /// Sum of the catalog's book values.
    ///
    /// Filled in by [`Instance::new`](super::Instance::new); a library built
    /// on its own carries zero until it joins an instance.
    pub catalog_value: u64,
}

impl Library {
    /// Creates an empty library with a one-day signup and one book per day.
    pub fn new(id: LibraryId) -> Self {
        Self {
            id,
            books: Vec::new(),
            signup_days: 1,
            books_per_day: 1,
            catalog_value: 0,
        }
    }

    /// Sets the signup duration (days).
    pub fn with_signup_days(mut self, days: u64) -> Self {
        self.signup_days = days;
        self
    }

    /// Sets the shipping rate (books per day).
    pub fn with_books_per_day(mut self, rate: u64) -> Self {
        self.books_per_day = rate;
        self
    }

    /// Replaces the catalog.
    pub fn with_books(mut self, books: Vec<BookId>) -> Self {
        self.books = books;
        self
    }

    /// Appends a book to the catalog.
    pub fn with_book(mut self, book: BookId) -> Self {
        self.books.push(book);
        self
    }

    /// Maximum number of books shipped over `days` scanning days.
    ///
    /// Saturates instead of overflowing on huge inputs.
    #[inline]
    pub fn capacity(&self, days: u64) -> u64 {
        days.saturating_mul(self.books_per_day)
    }

    /// Number of catalog entries.
    pub fn catalog_size(&self) -> usize {
        self.books.len()
    }
}

impl std::fmt::Display for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "library {} holds {} books, takes {} days to sign up, ships {} books per day, catalog value {}",
            self.id,
            self.books.len(),
            self.signup_days,
            self.books_per_day,
            self.catalog_value
        )
    }
}
