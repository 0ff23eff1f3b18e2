//! Selection engine.
//!
//! Applies a scoring policy to every library that has not signed up yet
//! and picks the best one, with a deterministic tie-breaker.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Policy, PolicyScore, ScanContext, ScoringPolicy};
use crate::models::Library;

/// How equal scores are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Earlier in the instance's library list wins (default).
    #[default]
    InputOrder,
    /// Lower library id wins.
    ById,
}

/// Picks the next library to sign up.
///
/// # Example
/// ```
/// use u_bookscan::dispatching::{LibrarySelector, Policy, TieBreaker};
///
/// let selector = LibrarySelector::from_policy(Policy::Static)
///     .with_tie_breaker(TieBreaker::ById);
/// assert_eq!(selector.policy().name(), "STATIC");
/// ```
#[derive(Clone)]
pub struct LibrarySelector {
    policy: Arc<dyn ScoringPolicy>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl LibrarySelector {
    /// Creates a selector for a scoring policy.
    pub fn new<P: ScoringPolicy + 'static>(policy: P) -> Self {
        Self::with_rule(Arc::new(policy))
    }

    /// Creates a selector for a shared scoring policy.
    pub fn with_rule(policy: Arc<dyn ScoringPolicy>) -> Self {
        Self {
            policy,
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// Creates a selector for a built-in policy.
    pub fn from_policy(policy: Policy) -> Self {
        Self::with_rule(policy.rule())
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Sets the tolerance under which two scores count as equal.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// The scoring policy.
    pub fn policy(&self) -> &dyn ScoringPolicy {
        self.policy.as_ref()
    }

    /// Scores one library.
    pub fn evaluate(&self, library: &Library, context: &ScanContext<'_>) -> PolicyScore {
        self.policy.score(library, context)
    }

    /// Index (into `context.instance.libraries()`) of the best candidate.
    ///
    /// Candidates are libraries not yet selected whose score is strictly
    /// positive. Returns `None` when there is none.
    pub fn select_best(&self, context: &ScanContext<'_>) -> Option<usize> {
        let libraries = context.instance.libraries();
        let mut best: Option<(usize, PolicyScore)> = None;

        for (idx, library) in libraries.iter().enumerate() {
            if context.state.is_selected(library.id) {
                continue;
            }
            let score = self.evaluate(library, context);
            if score.is_nan() || score <= 0.0 {
                continue;
            }

            let better = match best {
                None => true,
                Some((best_idx, best_score)) => {
                    self.compare(idx, score, best_idx, best_score, libraries) == Ordering::Less
                }
            };
            if better {
                best = Some((idx, score));
            }
        }

        best.map(|(idx, _)| idx)
    }

    /// All candidates with their scores, best first.
    pub fn rank(&self, context: &ScanContext<'_>) -> Vec<(usize, PolicyScore)> {
        let libraries = context.instance.libraries();
        let mut ranked: Vec<(usize, PolicyScore)> = libraries
            .iter()
            .enumerate()
            .filter(|(_, l)| !context.state.is_selected(l.id))
            .map(|(idx, l)| (idx, self.evaluate(l, context)))
            .filter(|&(_, s)| s > 0.0)
            .collect();

        ranked.sort_by(|&(a, sa), &(b, sb)| self.compare(a, sa, b, sb, libraries));
        ranked
    }

    /// `Less` when `(a, score_a)` should sign up before `(b, score_b)`.
    fn compare(
        &self,
        a: usize,
        score_a: PolicyScore,
        b: usize,
        score_b: PolicyScore,
        libraries: &[Library],
    ) -> Ordering {
        let tied = score_a == score_b || (score_a - score_b).abs() <= self.epsilon;
        if !tied {
            return score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal);
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => a.cmp(&b),
            TieBreaker::ById => libraries[a].id.cmp(&libraries[b].id).then(a.cmp(&b)),
        }
    }
}

impl Default for LibrarySelector {
    fn default() -> Self {
        Self::from_policy(Policy::default())
    }
}

impl std::fmt::Debug for LibrarySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibrarySelector")
            .field("policy", &self.policy.name())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
