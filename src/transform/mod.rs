//! Baseplate splitting logic.

mod split;

pub use split::*;
