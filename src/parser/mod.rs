//! Dimension parsing module.

mod dimension;

pub use dimension::{inches_to_mm, mm_to_inches, parse_dimension, parse_dimension_mm};
