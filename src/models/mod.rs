//! Wire models

pub mod prediction;

pub use prediction::*;
