//! Schedule (solution) model.
//!
//! A schedule lists the signed-up libraries in activation order, each with
//! the books it ships. Libraries that were signed up but ship nothing do
//! not appear. Audits may attach violations.

use serde::{Deserialize, Serialize};

use super::{BookId, LibraryId};

/// A complete schedule (solution to a scanning instance).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Entries in activation order.
    pub entries: Vec<ScanEntry>,
}

/// One signed-up library and the books it ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    /// Signed-up library.
    pub library_id: LibraryId,
    /// Shipped books, in shipping order.
    pub books: Vec<BookId>,
    /// Day on which the signup started.
    pub signup_start: u64,
    /// Scanning days left once the signup finished.
    pub scan_days: u64,
}

/// An invariant violation found by an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related library id.
    pub library_id: LibraryId,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A book is shipped by more than one entry.
    DuplicateDelivery,
    /// Cumulative signup days exceed the budget.
    BudgetExceeded,
    /// An entry ships more books than its scan days allow.
    CapacityExceeded,
    /// An entry ships a book outside its library's catalog.
    NotInCatalog,
    /// An entry's books are not in non-increasing value order.
    OrderViolation,
    /// An entry references a library that does not exist.
    UnknownLibrary,
    /// A library appears in more than one entry.
    DuplicateLibrary,
}

impl ScanEntry {
    /// Creates a new entry.
    pub fn new(library_id: LibraryId, books: Vec<BookId>) -> Self {
        Self {
            library_id,
            books,
            signup_start: 0,
            scan_days: 0,
        }
    }

    /// Sets the activation window.
    pub fn with_window(mut self, signup_start: u64, scan_days: u64) -> Self {
        self.signup_start = signup_start;
        self.scan_days = scan_days;
        self
    }

    /// Number of shipped books.
    #[inline]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        library_id: LibraryId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            library_id,
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn add_entry(&mut self, entry: ScanEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether no library ships anything.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry of a library.
    pub fn entry_for_library(&self, library_id: LibraryId) -> Option<&ScanEntry> {
        self.entries.iter().find(|e| e.library_id == library_id)
    }

    /// Library ids in activation order.
    pub fn library_order(&self) -> Vec<LibraryId> {
        self.entries.iter().map(|e| e.library_id).collect()
    }

    /// Total number of shipped books.
    pub fn delivered_book_count(&self) -> usize {
        self.entries.iter().map(ScanEntry::book_count).sum()
    }

    /// Iterates every shipped book id across all entries.
    pub fn delivered_books(&self) -> impl Iterator<Item = BookId> + '_ {
        self.entries.iter().flat_map(|e| e.books.iter().copied())
    }
}
