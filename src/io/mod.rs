//! Text adapters: instance loading and schedule writing.

mod loader;
mod writer;

pub use loader::InstanceLoader;
pub use writer::{render_schedule, write_schedule, write_schedule_file};
