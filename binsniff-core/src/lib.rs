pub mod binary;
pub mod detector;
pub mod format;
pub mod header;

#[cfg(test)]
mod fixtures;

pub use binary::*;
pub use detector::*;
pub use format::*;
pub use header::{Header, Identity};
