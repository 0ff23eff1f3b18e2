//! Built-in scoring policies.
//!
//! - **Static**: `CatalogValue`
//! - **Dynamic**: `DispersionWeighted`
//!
//! # Score Convention
//! All policies return higher scores for libraries that should sign up first.

use super::{PolicyScore, ScanContext, ScoringPolicy};
use crate::allocation::deliverable_value;
use crate::models::Library;

/// Total catalog value.
///
/// Ignores the remaining days and the claim state, so the ranking is fixed
/// for the whole run. Ties fall back to input order in the selector.
#[derive(Debug, Clone, Copy)]
pub struct CatalogValue;

impl ScoringPolicy for CatalogValue {
    fn name(&self) -> &'static str {
        "STATIC"
    }

    fn score(&self, library: &Library, _context: &ScanContext<'_>) -> PolicyScore {
        library.catalog_value as f64
    }

    fn description(&self) -> &'static str {
        "Total Catalog Value"
    }
}

/// Deliverable value per signup day, normalized by signup dispersion.
///
/// `score = value(top remaining_days × books_per_day unclaimed books)
///          / (signup_days × dispersion)`
///
/// Re-ranks as days run out and books are claimed elsewhere. A zero-day
/// signup scores `+inf` if it can ship anything and `0` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct DispersionWeighted;

impl ScoringPolicy for DispersionWeighted {
    fn name(&self) -> &'static str {
        "DYNAMIC"
    }

    fn score(&self, library: &Library, context: &ScanContext<'_>) -> PolicyScore {
        let value = deliverable_value(
            library,
            context.instance,
            context.state,
            context.remaining_days,
        ) as f64;

        if library.signup_days == 0 {
            return if value > 0.0 { f64::INFINITY } else { 0.0 };
        }

        value / (library.signup_days as f64 * context.dispersion)
    }

    fn description(&self) -> &'static str {
        "Deliverable Value per Signup Day over Signup Dispersion"
    }

    fn uses_dispersion(&self) -> bool {
        true
    }
}
