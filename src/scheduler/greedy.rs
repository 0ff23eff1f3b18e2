//! Greedy signup scheduler.
//!
//! # Algorithm
//!
//! 1. Compute the signup dispersion once, if the policy uses it.
//! 2. While days remain, ask the selector for the best library not yet
//!    signed up.
//! 3. Stop if there is none, or if the best one cannot finish its signup
//!    within the remaining days. No cheaper library is tried instead, so
//!    the result is a heuristic, not an optimum.
//! 4. Sign it up, allocate its books over the days left after signup, and
//!    claim them. Libraries that ship nothing are signed up but left out
//!    of the schedule.
//!
//! # Complexity
//! O(L² · C log C) with the dynamic policy, where L = libraries and
//! C = largest catalog; O(L² + L · C log C) with the static policy.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::allocation::allocate;
use crate::dispatching::{signup_dispersion, LibrarySelector, Policy, ScanContext, ScanState};
use crate::models::{Instance, ScanEntry, Schedule};

/// Why the selection loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No days left, or the best candidate's signup does not fit.
    BudgetExhausted,
    /// Every library is signed up or has nothing left to offer.
    CandidatesExhausted,
}

/// Result of a greedy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Libraries that ship at least one book, in signup order.
    pub schedule: Schedule,
    /// Why the loop stopped.
    pub termination: Termination,
    /// Libraries signed up, including those that ship nothing.
    pub signed_up: usize,
    /// Days consumed by signups.
    pub days_used: u64,
    /// Dispersion used by the policy (1.0 when unused).
    pub dispersion: f64,
}

/// Greedy scheduler driven by a [`LibrarySelector`].
///
/// # Example
///
/// ```
/// use u_bookscan::scheduler::GreedyScheduler;
/// use u_bookscan::dispatching::Policy;
/// use u_bookscan::models::{Instance, Library};
///
/// let inst = Instance::from_values(
///     &[1, 2, 3, 5, 8, 13],
///     vec![
///         Library::new(0).with_books_per_day(2).with_books(vec![0, 1, 2, 3]),
///         Library::new(1).with_books(vec![4, 5]),
///     ],
///     7,
/// );
/// let schedule = GreedyScheduler::with_policy(Policy::Static).schedule(&inst);
/// assert_eq!(schedule.library_order(), vec![1, 0]);
/// assert_eq!(schedule.entries[0].books, vec![5, 4]);
/// assert_eq!(schedule.entries[1].books, vec![3, 2, 1, 0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    selector: LibrarySelector,
}

impl GreedyScheduler {
    /// Creates a scheduler with the default (dynamic) policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler for a built-in policy.
    pub fn with_policy(policy: Policy) -> Self {
        Self::with_selector(LibrarySelector::from_policy(policy))
    }

    /// Creates a scheduler around a configured selector.
    pub fn with_selector(selector: LibrarySelector) -> Self {
        Self { selector }
    }

    /// The selector in use.
    pub fn selector(&self) -> &LibrarySelector {
        &self.selector
    }

    /// Schedules an instance and returns only the schedule.
    pub fn schedule(&self, instance: &Instance) -> Schedule {
        self.run(instance).schedule
    }

    /// Schedules an instance.
    pub fn run(&self, instance: &Instance) -> ScanOutcome {
        let dispersion = if self.selector.policy().uses_dispersion() {
            signup_dispersion(instance.libraries())
        } else {
            1.0
        };
        debug!(
            policy = self.selector.policy().name(),
            dispersion,
            budget = instance.days(),
            "starting greedy run"
        );

        let budget = instance.days();
        let mut state = ScanState::for_instance(instance);
        let mut schedule = Schedule::new();

        let termination = loop {
            let remaining = state.remaining_days(budget);
            if remaining == 0 {
                break Termination::BudgetExhausted;
            }

            let context = ScanContext::new(instance, &state)
                .with_remaining_days(remaining)
                .with_dispersion(dispersion);
            let Some(idx) = self.selector.select_best(&context) else {
                break Termination::CandidatesExhausted;
            };

            let library = &instance.libraries()[idx];
            if remaining < library.signup_days {
                debug!(
                    library = library.id,
                    signup_days = library.signup_days,
                    remaining,
                    "best candidate does not fit the remaining days"
                );
                break Termination::BudgetExhausted;
            }

            let signup_start = state.consumed_days();
            state.select(library.id);
            state.consume_days(library.signup_days);

            let scan_days = state.remaining_days(budget);
            let books = allocate(library, instance, &state, scan_days);
            let claimed = state.claim_all(&books);
            debug_assert_eq!(claimed, books.len(), "allocated an already claimed book");

            trace!(
                library = library.id,
                signup_start,
                scan_days,
                books = books.len(),
                "signed up library"
            );

            if books.is_empty() {
                continue;
            }
            schedule.add_entry(
                ScanEntry::new(library.id, books).with_window(signup_start, scan_days),
            );
        };

        debug!(
            ?termination,
            entries = schedule.entry_count(),
            signed_up = state.selected_count(),
            days_used = state.consumed_days(),
            "greedy run finished"
        );

        ScanOutcome {
            schedule,
            termination,
            signed_up: state.selected_count(),
            days_used: state.consumed_days(),
            dispersion,
        }
    }
}
