//! Per-run scanning state and the context handed to scoring policies.

use std::collections::HashSet;

use crate::models::{BookId, Instance, Library, LibraryId};

/// Mutable state of one scheduling run.
///
/// Owns the claimed-book set, the selected-library set and the consumed
/// day counter. Entities in the [`Instance`] stay untouched; two runs over
/// the same instance never share a `ScanState`.
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    claimed: Vec<bool>,
    claimed_count: usize,
    selected: HashSet<LibraryId>,
    consumed_days: u64,
}

impl ScanState {
    /// Creates an empty state sized for `book_count` books.
    pub fn new(book_count: usize) -> Self {
        Self {
            claimed: vec![false; book_count],
            ..Default::default()
        }
    }

    /// Creates an empty state sized for an instance.
    pub fn for_instance(instance: &Instance) -> Self {
        Self::new(instance.book_count())
    }

    /// Whether a book has been claimed by some library.
    #[inline]
    pub fn is_claimed(&self, book: BookId) -> bool {
        self.claimed.get(book).copied().unwrap_or(false)
    }

    /// Claims a book. Returns `false` if it was already claimed.
    pub fn claim(&mut self, book: BookId) -> bool {
        if book >= self.claimed.len() {
            self.claimed.resize(book + 1, false);
        }
        if self.claimed[book] {
            return false;
        }
        self.claimed[book] = true;
        self.claimed_count += 1;
        true
    }

    /// Claims every book in `books`, returning how many were newly claimed.
    pub fn claim_all(&mut self, books: &[BookId]) -> usize {
        books.iter().filter(|&&b| self.claim(b)).count()
    }

    /// Number of claimed books.
    pub fn claimed_count(&self) -> usize {
        self.claimed_count
    }

    /// Whether a library has been signed up.
    #[inline]
    pub fn is_selected(&self, library: LibraryId) -> bool {
        self.selected.contains(&library)
    }

    /// Marks a library as signed up. Returns `false` if it already was.
    pub fn select(&mut self, library: LibraryId) -> bool {
        self.selected.insert(library)
    }

    /// Number of signed-up libraries.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Days consumed by signups so far.
    pub fn consumed_days(&self) -> u64 {
        self.consumed_days
    }

    /// Adds signup days to the consumed counter.
    pub fn consume_days(&mut self, days: u64) {
        self.consumed_days = self.consumed_days.saturating_add(days);
    }

    /// Days left in a budget of `total` days.
    #[inline]
    pub fn remaining_days(&self, total: u64) -> u64 {
        total.saturating_sub(self.consumed_days)
    }
}

/// Read-only view passed to [`ScoringPolicy::score`](super::ScoringPolicy::score).
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    /// Instance being scheduled.
    pub instance: &'a Instance,
    /// Current run state.
    pub state: &'a ScanState,
    /// Scanning days left before the next signup starts.
    pub remaining_days: u64,
    /// Signup-day dispersion of the instance (see [`signup_dispersion`]).
    pub dispersion: f64,
}

impl<'a> ScanContext<'a> {
    /// Creates a context from the state's consumed days, with unit dispersion.
    pub fn new(instance: &'a Instance, state: &'a ScanState) -> Self {
        Self {
            instance,
            state,
            remaining_days: state.remaining_days(instance.days()),
            dispersion: 1.0,
        }
    }

    /// Overrides the remaining days.
    pub fn with_remaining_days(mut self, days: u64) -> Self {
        self.remaining_days = days;
        self
    }

    /// Sets the dispersion statistic.
    pub fn with_dispersion(mut self, dispersion: f64) -> Self {
        self.dispersion = dispersion;
        self
    }
}

/// Population standard deviation of the libraries' signup days.
///
/// Returns `1.0` when the deviation is zero (every library shares one
/// signup duration) or undefined (no libraries), so it can always be used
/// as a divisor.
pub fn signup_dispersion(libraries: &[Library]) -> f64 {
    if libraries.is_empty() {
        return 1.0;
    }
    let n = libraries.len() as f64;
    let mean = libraries.iter().map(|l| l.signup_days as f64).sum::<f64>() / n;
    let variance = libraries
        .iter()
        .map(|l| {
            let d = l.signup_days as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    if std_dev.is_finite() && std_dev > 0.0 {
        std_dev
    } else {
        1.0
    }
}
