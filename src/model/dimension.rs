//! Physical lengths as entered by the user.

use serde::{Deserialize, Serialize};

use crate::config::Unit;

/// A positive physical length tagged with the unit it was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    value: f64,
    unit: Unit,
}

impl Dimension {
    /// Create a dimension. Callers are expected to have checked `value > 0`;
    /// use [`crate::parser::parse_dimension`] for untrusted input.
    pub(crate) fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// A length in millimetres.
    pub fn from_mm(mm: f64) -> Self {
        Self::new(mm, Unit::Millimeters)
    }

    /// The value as entered.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit it was entered in.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The length in millimetres.
    pub fn mm(&self) -> f64 {
        self.value * self.unit.to_mm_factor()
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            Unit::Millimeters => write!(f, "{:.1}mm", self.value),
            Unit::Inches => write!(f, "{}in ({:.1}mm)", self.value, self.mm()),
        }
    }
}
