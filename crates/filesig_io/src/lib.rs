//! File-backed byte sources for signature matching.

mod reader;

pub use reader::FileSource;
