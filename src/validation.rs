//! Instance validation and schedule audits.
//!
//! [`validate_instance`] checks the structure of an instance before
//! scheduling:
//! - Book ids match their positions and are unique
//! - Library ids are unique
//! - Catalogs only reference existing books
//!
//! [`catalog_warnings`] reports catalogs listing a book more than once.
//! Such instances still schedule: the allocator ships each book once.
//!
//! [`audit_schedule`] re-checks a finished schedule against its instance:
//! claim uniqueness, signup budget, shipping capacity, catalog membership
//! and shipping order. A non-empty audit means the scheduler is broken.

use crate::models::{Instance, Schedule, Violation, ViolationType};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A book's id differs from its position in the book list.
    MisplacedBook,
    /// A catalog references a book that doesn't exist.
    UnknownBook,
    /// A catalog lists the same book more than once.
    DuplicateCatalogEntry,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the structure of an instance.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    let mut book_ids = HashSet::new();
    for (pos, book) in instance.books().iter().enumerate() {
        if !book_ids.insert(book.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate book ID: {}", book.id),
            ));
        } else if book.id != pos {
            errors.push(ValidationError::new(
                ValidationErrorKind::MisplacedBook,
                format!("Book {} is stored at position {pos}", book.id),
            ));
        }
    }

    let mut library_ids = HashSet::new();
    for library in instance.libraries() {
        if !library_ids.insert(library.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate library ID: {}", library.id),
            ));
        }

        for &book in &library.books {
            if book >= instance.book_count() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownBook,
                    format!("Library {} references unknown book {book}", library.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-fatal findings on an instance: catalogs listing a book twice.
pub fn catalog_warnings(instance: &Instance) -> Vec<ValidationError> {
    let mut warnings = Vec::new();
    for library in instance.libraries() {
        let mut catalog = HashSet::new();
        for &book in &library.books {
            if !catalog.insert(book) {
                warnings.push(ValidationError::new(
                    ValidationErrorKind::DuplicateCatalogEntry,
                    format!("Library {} lists book {book} more than once", library.id),
                ));
            }
        }
    }
    warnings
}

/// Audits a schedule against its instance.
///
/// Returns every violation found; an empty list means the schedule is
/// feasible and consistent with the allocation rules.
pub fn audit_schedule(schedule: &Schedule, instance: &Instance) -> Vec<Violation> {
    let mut violations = Vec::new();
    let budget = instance.days();
    let mut delivered = HashSet::new();
    let mut libraries = HashSet::new();
    let mut signup_total: u64 = 0;
    let mut clock: u64 = 0;

    for entry in &schedule.entries {
        let id = entry.library_id;
        let Some(library) = instance.library(id) else {
            violations.push(Violation::new(
                ViolationType::UnknownLibrary,
                id,
                format!("Library {id} does not exist"),
            ));
            continue;
        };

        if !libraries.insert(id) {
            violations.push(Violation::new(
                ViolationType::DuplicateLibrary,
                id,
                format!("Library {id} is scheduled more than once"),
            ));
        }

        // Signup windows
        signup_total = signup_total.saturating_add(library.signup_days);
        let signup_end = entry.signup_start.saturating_add(library.signup_days);
        if signup_total > budget || signup_end > budget {
            violations.push(Violation::new(
                ViolationType::BudgetExceeded,
                id,
                format!("Signup of library {id} ends on day {signup_end}, budget is {budget}"),
            ));
        }
        if entry.signup_start < clock {
            violations.push(Violation::new(
                ViolationType::BudgetExceeded,
                id,
                format!(
                    "Signup of library {id} starts on day {} before the previous one ended on day {clock}",
                    entry.signup_start
                ),
            ));
        }
        clock = clock.max(signup_end);

        // Capacity
        let window = budget.saturating_sub(signup_end);
        if entry.scan_days > window {
            violations.push(Violation::new(
                ViolationType::CapacityExceeded,
                id,
                format!(
                    "Library {id} scans for {} days but only {window} remain after signup",
                    entry.scan_days
                ),
            ));
        }
        let capacity = library.capacity(entry.scan_days);
        if entry.books.len() as u64 > capacity {
            violations.push(Violation::new(
                ViolationType::CapacityExceeded,
                id,
                format!(
                    "Library {id} ships {} books, capacity is {capacity}",
                    entry.books.len()
                ),
            ));
        }

        // Books
        for &book in &entry.books {
            if !library.books.contains(&book) {
                violations.push(Violation::new(
                    ViolationType::NotInCatalog,
                    id,
                    format!("Book {book} is not in the catalog of library {id}"),
                ));
            }
            if !delivered.insert(book) {
                violations.push(Violation::new(
                    ViolationType::DuplicateDelivery,
                    id,
                    format!("Book {book} is shipped more than once"),
                ));
            }
        }

        // Shipping order
        for pair in entry.books.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (va, vb) = (instance.book_value(a), instance.book_value(b));
            if va < vb || (va == vb && a > b) {
                violations.push(Violation::new(
                    ViolationType::OrderViolation,
                    id,
                    format!("Library {id} ships book {a} before book {b}"),
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, Library, ScanEntry};

    fn sample_instance() -> Instance {
        Instance::from_values(
            &[1, 2, 3, 5, 8, 13],
            vec![
                Library::new(0)
                    .with_signup_days(1)
                    .with_books_per_day(2)
                    .with_books(vec![0, 1, 2, 3]),
                Library::new(1)
                    .with_signup_days(1)
                    .with_books(vec![4, 5]),
            ],
            7,
        )
    }

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new();
        s.add_entry(ScanEntry::new(1, vec![5, 4]).with_window(0, 6));
        s.add_entry(ScanEntry::new(0, vec![3, 2, 1, 0]).with_window(1, 5));
        s
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type.clone()).collect()
    }

    #[test]
    fn test_valid_instance() {
        assert!(validate_instance(&sample_instance()).is_ok());
    }

    #[test]
    fn test_unknown_book() {
        let inst = Instance::from_values(&[1], vec![Library::new(0).with_books(vec![0, 4])], 3);
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownBook));
    }

    #[test]
    fn test_duplicate_catalog_entry_is_a_warning() {
        let inst = Instance::from_values(
            &[1, 2],
            vec![Library::new(0).with_books(vec![1, 0, 1])],
            3,
        );
        assert!(validate_instance(&inst).is_ok());

        let warnings = catalog_warnings(&inst);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ValidationErrorKind::DuplicateCatalogEntry);
        assert!(catalog_warnings(&sample_instance()).is_empty());
    }

    #[test]
    fn test_duplicate_library_id() {
        let inst = Instance::from_values(&[1], vec![Library::new(0), Library::new(0)], 3);
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("library")));
    }

    #[test]
    fn test_book_ids() {
        let inst = Instance::new(
            vec![Book::new(0, 1), Book::new(0, 2), Book::new(5, 3)],
            vec![],
            3,
        );
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("book")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MisplacedBook));
    }

    #[test]
    fn test_audit_clean() {
        assert!(audit_schedule(&sample_schedule(), &sample_instance()).is_empty());
        assert!(audit_schedule(&Schedule::new(), &sample_instance()).is_empty());
    }

    #[test]
    fn test_audit_duplicate_delivery() {
        let inst = Instance::from_values(
            &[4, 4],
            vec![
                Library::new(0).with_books(vec![0, 1]),
                Library::new(1).with_books(vec![0]),
            ],
            5,
        );
        let mut s = Schedule::new();
        s.add_entry(ScanEntry::new(0, vec![0]).with_window(0, 4));
        s.add_entry(ScanEntry::new(1, vec![0]).with_window(1, 3));
        assert_eq!(kinds(&audit_schedule(&s, &inst)), vec![ViolationType::DuplicateDelivery]);
    }

    #[test]
    fn test_audit_budget() {
        let inst = Instance::from_values(
            &[4, 4],
            vec![
                Library::new(0).with_signup_days(3).with_book(0),
                Library::new(1).with_signup_days(3).with_book(1),
            ],
            5,
        );
        let mut s = Schedule::new();
        s.add_entry(ScanEntry::new(0, vec![0]).with_window(0, 2));
        s.add_entry(ScanEntry::new(1, vec![1]).with_window(3, 0));
        let v = audit_schedule(&s, &inst);
        assert!(kinds(&v).contains(&ViolationType::BudgetExceeded));
    }

    #[test]
    fn test_audit_overlapping_signups() {
        let inst = sample_instance();
        let mut s = Schedule::new();
        s.add_entry(ScanEntry::new(1, vec![5]).with_window(0, 6));
        s.add_entry(ScanEntry::new(0, vec![3]).with_window(0, 6));
        let v = audit_schedule(&s, &inst);
        assert!(kinds(&v).contains(&ViolationType::BudgetExceeded));
    }

    #[test]
    fn test_audit_capacity() {
        let inst = sample_instance();
        let mut s = Schedule::new();
        // Library 1 ships one book per day; one scan day cannot ship two.
        s.add_entry(ScanEntry::new(1, vec![5, 4]).with_window(5, 1));
        assert_eq!(kinds(&audit_schedule(&s, &inst)), vec![ViolationType::CapacityExceeded]);
    }

    #[test]
    fn test_audit_scan_window_too_long() {
        let inst = sample_instance();
        let mut s = Schedule::new();
        s.add_entry(ScanEntry::new(1, vec![5]).with_window(3, 6));
        assert_eq!(kinds(&audit_schedule(&s, &inst)), vec![ViolationType::CapacityExceeded]);
    }

    #[test]
    fn test_audit_catalog_and_order() {
        let inst = sample_instance();
        let mut s = Schedule::new();
        s.add_entry(ScanEntry::new(0, vec![2, 3, 5]).with_window(0, 6));
        let v = kinds(&audit_schedule(&s, &inst));
        assert!(v.contains(&ViolationType::NotInCatalog));
        assert!(v.contains(&ViolationType::OrderViolation));
    }

    #[test]
    fn test_audit_unknown_and_repeated_library() {
        let inst = sample_instance();
        let mut s = Schedule::new();
        s.add_entry(ScanEntry::new(9, vec![0]));
        s.add_entry(ScanEntry::new(1, vec![5]).with_window(0, 3));
        s.add_entry(ScanEntry::new(1, vec![4]).with_window(1, 3));
        let v = kinds(&audit_schedule(&s, &inst));
        assert_eq!(v[0], ViolationType::UnknownLibrary);
        assert!(v.contains(&ViolationType::DuplicateLibrary));
    }
}
