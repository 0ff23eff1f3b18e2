//! Library scoring policies and the selection engine.
//!
//! A scoring policy ranks a library given the days left and the current
//! claim state; the [`LibrarySelector`] applies a policy to every library
//! not yet signed up and returns the best one.
//!
//! # Usage
//!
//! ```
//! use u_bookscan::dispatching::{LibrarySelector, ScanContext, ScanState, rules};
//! use u_bookscan::models::{Instance, Library};
//!
//! let inst = Instance::from_values(
//!     &[1, 2, 3, 5, 8, 13],
//!     vec![
//!         Library::new(0).with_books_per_day(2).with_books(vec![0, 1, 2, 3]),
//!         Library::new(1).with_books(vec![4, 5]),
//!     ],
//!     7,
//! );
//! let state = ScanState::for_instance(&inst);
//! let selector = LibrarySelector::new(rules::CatalogValue);
//!
//! assert_eq!(selector.select_best(&ScanContext::new(&inst, &state)), Some(1));
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{signup_dispersion, ScanContext, ScanState};
pub use engine::{LibrarySelector, TieBreaker};

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::Library;

/// Score returned by a scoring policy.
///
/// **Higher scores = higher priority.** A library whose score is not
/// strictly positive is never signed up.
pub type PolicyScore = f64;

/// A policy that ranks libraries for signup.
pub trait ScoringPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "STATIC").
    fn name(&self) -> &'static str;

    /// Scores `library` in the given context; higher is better.
    fn score(&self, library: &Library, context: &ScanContext<'_>) -> PolicyScore;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Whether the policy reads [`ScanContext::dispersion`].
    fn uses_dispersion(&self) -> bool {
        false
    }
}

/// Built-in policy selector, used by configuration and the CLI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Rank by total catalog value, ignoring time.
    Static,
    /// Rank by deliverable value over signup days and signup dispersion.
    #[default]
    Dynamic,
}

impl Policy {
    /// Instantiates the policy's rule.
    pub fn rule(self) -> Arc<dyn ScoringPolicy> {
        match self {
            Policy::Static => Arc::new(rules::CatalogValue),
            Policy::Dynamic => Arc::new(rules::DispersionWeighted),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Static => f.write_str("static"),
            Policy::Dynamic => f.write_str("dynamic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rule_names() {
        assert_eq!(Policy::Static.rule().name(), "STATIC");
        assert_eq!(Policy::Dynamic.rule().name(), "DYNAMIC");
        assert!(!Policy::Static.rule().uses_dispersion());
        assert!(Policy::Dynamic.rule().uses_dispersion());
    }

    #[test]
    fn test_policy_serde_names() {
        assert_eq!(serde_json::to_string(&Policy::Static).unwrap(), "\"static\"");
        let p: Policy = serde_json::from_str("\"dynamic\"").unwrap();
        assert_eq!(p, Policy::Dynamic);
        assert_eq!(Policy::default(), Policy::Dynamic);
        assert_eq!(Policy::Static.to_string(), "static");
    }
}
