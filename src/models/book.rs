//! Book model.
//!
//! A book is the unit of value. It is referenced by one or more library
//! catalogs but can be delivered by at most one library per run. Delivery
//! state is tracked by the scheduler, not on the book itself.

use serde::{Deserialize, Serialize};

/// Book identifier (position in the instance's book list).
pub type BookId = usize;

/// A book that can be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    /// Unique book identifier.
    pub id: BookId,
    /// Value gained when the book is delivered.
    pub value: u64,
}

impl Book {
    /// Creates a new book.
    pub fn new(id: BookId, value: u64) -> Self {
        Self { id, value }
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "book {} (value {})", self.id, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_display() {
        let b = Book::new(3, 42);
        assert_eq!(b.to_string(), "book 3 (value 42)");
    }
}
