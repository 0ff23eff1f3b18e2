//! Book allocation.
//!
//! Picks the books a signed-up library ships: its still-unclaimed catalog
//! entries, highest value first, truncated to what the library can ship in
//! the available scanning days.
//!
//! # Ordering
//! Value descending, then book id ascending. The order is total, so the
//! result does not depend on catalog order or sort stability.
//!
//! Allocation never claims anything; the scheduler claims the returned
//! books in the same step it commits the library.

use std::cmp::Ordering;

use crate::dispatching::ScanState;
use crate::models::{BookId, Instance, Library};

/// Books `library` would ship over `days` scanning days, in shipping order.
///
/// Duplicate catalog entries collapse to one and ids unknown to `instance`
/// are skipped. The result length is at most `library.capacity(days)`.
///
/// # Example
/// ```
/// use u_bookscan::allocation::allocate;
/// use u_bookscan::dispatching::ScanState;
/// use u_bookscan::models::{Instance, Library};
///
/// let inst = Instance::from_values(
///     &[5, 9, 1],
///     vec![Library::new(0).with_books_per_day(1).with_books(vec![0, 1, 2])],
///     10,
/// );
/// let state = ScanState::for_instance(&inst);
/// assert_eq!(allocate(&inst.libraries()[0], &inst, &state, 2), vec![1, 0]);
/// ```
pub fn allocate(
    library: &Library,
    instance: &Instance,
    state: &ScanState,
    days: u64,
) -> Vec<BookId> {
    let ranked = ranked_unclaimed(library, instance, state);
    let take = shippable(library, days, ranked.len());
    ranked.into_iter().take(take).map(|(_, id)| id).collect()
}

/// Total value of the books [`allocate`] would return, saturating at
/// `u64::MAX`.
pub fn deliverable_value(
    library: &Library,
    instance: &Instance,
    state: &ScanState,
    days: u64,
) -> u64 {
    let ranked = ranked_unclaimed(library, instance, state);
    let take = shippable(library, days, ranked.len());
    ranked
        .iter()
        .take(take)
        .fold(0u64, |acc, &(value, _)| acc.saturating_add(value))
}

/// Number of books shippable out of `available` candidates.
#[inline]
fn shippable(library: &Library, days: u64, available: usize) -> usize {
    usize::try_from(library.capacity(days))
        .unwrap_or(usize::MAX)
        .min(available)
}

/// Unclaimed catalog entries as `(value, id)`, best first, deduplicated.
fn ranked_unclaimed(
    library: &Library,
    instance: &Instance,
    state: &ScanState,
) -> Vec<(u64, BookId)> {
    let mut ranked: Vec<(u64, BookId)> = library
        .books
        .iter()
        .filter(|&&id| !state.is_claimed(id))
        .filter_map(|&id| instance.book(id).map(|b| (b.value, id)))
        .collect();

    ranked.sort_unstable_by(shipping_order);
    ranked.dedup();
    ranked
}

fn shipping_order(a: &(u64, BookId), b: &(u64, BookId)) -> Ordering {
    b.0.cmp(&a.0).then(a.1.cmp(&b.1))
}
