//! Scanning domain models.
//!
//! Provides the data types describing a scanning instance and its
//! solution. Entities are plain immutable values; per-run state such as
//! claimed books lives in [`crate::dispatching::ScanState`].
//!
//! # Domain Mappings
//!
//! | u-bookscan | Scheduling | Logistics |
//! |------------|------------|-----------|
//! | Book | Job value | Parcel |
//! | Library | Resource with setup | Depot |
//! | Instance | Problem | Planning horizon |
//! | Schedule | Plan | Dispatch plan |

mod book;
mod instance;
mod library;
mod schedule;

pub use book::{Book, BookId};
pub use instance::Instance;
pub use library::{Library, LibraryId};
pub use schedule::{ScanEntry, Schedule, Violation, ViolationType};
