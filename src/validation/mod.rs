//! Input and plan validation.

mod validate;

pub use validate::*;
