//! Greedy scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `GreedyScheduler` repeatedly signs up the best-scoring library, gives
//! it the most valuable unclaimed books it can ship in the days left, and
//! stops when the budget or the candidates run out. It is not optimal, but
//! provides fast solutions for large instances.
//!
//! # KPI
//!
//! `ScheduleKpi` computes delivered value, coverage and signup usage.

mod greedy;
mod kpi;

pub use greedy::{GreedyScheduler, ScanOutcome, Termination};
pub use kpi::ScheduleKpi;
