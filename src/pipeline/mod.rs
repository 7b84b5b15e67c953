//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::collect_source_files;
pub use processor::{JobResult, process_job};
