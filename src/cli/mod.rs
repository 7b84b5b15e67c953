//! Command-line interface.

mod args;

pub use args::{Cli, Command, ConfigAction, SegmentArgs};
