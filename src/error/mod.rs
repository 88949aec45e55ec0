//! Error types for the Firebase AI request layer.

mod types;
mod classifier;

pub use types::*;
pub use classifier::*;
