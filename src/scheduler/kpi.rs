//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Value | Sum of the values of shipped books |
//! | Books Delivered | Number of shipped books |
//! | Libraries Scheduled | Number of schedule entries |
//! | Signup Days | Sum of signup days of scheduled libraries |
//! | Reachable Value | Value of every book present in some catalog |
//! | Coverage | Total value / reachable value |

use serde::{Deserialize, Serialize};

use crate::models::{Instance, Schedule};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Sum of shipped book values.
    pub total_value: u64,
    /// Shipped books.
    pub books_delivered: usize,
    /// Libraries with at least one shipped book.
    pub libraries_scheduled: usize,
    /// Signup days of scheduled libraries.
    pub signup_days: u64,
    /// Scanning-day budget of the instance.
    pub day_budget: u64,
    /// Upper bound on the value of any schedule.
    pub reachable_value: u64,
    /// `total_value / reachable_value` (1.0 when nothing is reachable).
    pub coverage: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its instance.
    ///
    /// Unknown book or library ids count for nothing.
    pub fn calculate(schedule: &Schedule, instance: &Instance) -> Self {
        let total_value: u64 = schedule
            .delivered_books()
            .fold(0u64, |acc, id| acc.saturating_add(instance.book_value(id)));

        let signup_days = schedule
            .entries
            .iter()
            .filter_map(|e| instance.library(e.library_id))
            .fold(0, |acc: u64, l| acc.saturating_add(l.signup_days));

        let reachable_value = instance.reachable_value();
        let coverage = if reachable_value == 0 {
            1.0
        } else {
            total_value as f64 / reachable_value as f64
        };

        Self {
            total_value,
            books_delivered: schedule.delivered_book_count(),
            libraries_scheduled: schedule.entry_count(),
            signup_days,
            day_budget: instance.days(),
            reachable_value,
            coverage,
        }
    }

    /// Whether the schedule captures at least `min_coverage` of the reachable value.
    pub fn meets_coverage(&self, min_coverage: f64) -> bool {
        self.coverage >= min_coverage
    }
}
