//! Labeled clip extraction.
//!
//! Materializes each accepted speech segment as one output audio file named
//! by its integer label.

mod extractor;

pub use extractor::ClipExtractor;
