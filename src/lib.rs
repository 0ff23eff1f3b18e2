//! Library signup and book scanning scheduler.
//!
//! Given a day budget, libraries with a signup duration and a shipping
//! rate, and books with a value, decides which libraries to sign up, in
//! which order, and which books each one ships, so that the total value
//! of shipped books is as high as a greedy heuristic can make it. Each
//! book counts once, whichever library ships it.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Book`, `Library`, `Instance`, `Schedule`
//! - **`dispatching`**: Scoring policies, per-run `ScanState`, `LibrarySelector`
//! - **`allocation`**: Picks the books a signed-up library ships
//! - **`scheduler`**: `GreedyScheduler` and `ScheduleKpi`
//! - **`validation`**: Instance checks and schedule audits
//! - **`io`**: Text loader and writer
//! - **`runner`**: Parallel batch runs over many input files
//! - **`config`**, **`error`**: Run settings and error types
//!
//! # Example
//!
//! ```
//! use u_bookscan::io::{render_schedule, InstanceLoader};
//! use u_bookscan::scheduler::GreedyScheduler;
//!
//! let instance = InstanceLoader::new()
//!     .parse_str("6 2 7\n1 2 3 5 8 13\n4 1 2\n0 1 2 3\n2 1 1\n4 5\n")
//!     .unwrap();
//! let schedule = GreedyScheduler::new().schedule(&instance);
//! assert_eq!(render_schedule(&schedule), "2\n1 2\n5 4\n0 4\n3 2 1 0\n");
//! ```

pub mod allocation;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod io;
pub mod models;
pub mod runner;
pub mod scheduler;
pub mod validation;
