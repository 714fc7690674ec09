//! Configuration constants and defaults for drawer planning.

use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// One Gridfinity grid unit in millimetres.
pub const GRID_UNIT_MM: f64 = 42.0;

/// Conversion factor: inch to mm.
pub const MM_PER_INCH: f64 = 25.4;

/// Default spacer tolerance in mm. Names omit the tolerance at this value.
pub const DEFAULT_TOLERANCE_MM: f64 = 1.0;

/// Default spacer thickness in mm.
pub const DEFAULT_SPACER_THICKNESS_MM: f64 = 5.0;

/// Default spacer edge chamfer in mm.
pub const DEFAULT_SPACER_CHAMFER_MM: f64 = 1.0;

/// Default clearance for the spacer jigsaw joints in mm.
pub const DEFAULT_ALIGN_TOLERANCE_MM: f64 = 0.15;

/// Spacers narrower than this are not generated.
pub const DEFAULT_MIN_MARGIN_MM: f64 = 4.0;

/// Default corner screw hole diameter in mm.
pub const DEFAULT_SCREW_HOLE_DIAM_MM: f64 = 5.0;

/// Default countersink diameter in mm.
pub const DEFAULT_COUNTERSINK_DIAM_MM: f64 = 10.0;

/// Default countersink angle in degrees.
pub const DEFAULT_COUNTERSINK_ANGLE_DEG: f64 = 82.0;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default printer preset key.
pub const DEFAULT_PRINTER: &str = "bambu-x1c";

/// Largest accepted drawer dimension (10 m). Anything above is almost
/// certainly a unit mix-up.
pub const MAX_DRAWER_MM: f64 = 10_000.0;

/// Largest accepted printer bed dimension.
pub const MAX_PRINTER_BED_MM: f64 = 2_000.0;

/// Accepted tolerance range upper bound (exclusive lower bound is zero).
pub const MAX_TOLERANCE_MM: f64 = 5.0;

/// Unit of measurement for a dimension token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Millimeters,
    Inches,
}

impl Unit {
    /// Get the conversion factor to convert from this unit to millimeters.
    pub fn to_mm_factor(&self) -> f64 {
        match self {
            Unit::Millimeters => 1.0,
            Unit::Inches => MM_PER_INCH,
        }
    }

    /// Suffix accepted on dimension tokens for this unit.
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Millimeters => "",
            Unit::Inches => "in",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Millimeters => write!(f, "mm"),
            Unit::Inches => write!(f, "in"),
        }
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if `a` is no larger than `b`, with epsilon tolerance.
    #[inline]
    pub fn approx_le(a: f64, b: f64) -> bool {
        a <= b + EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_factor() {
        assert_eq!(Unit::Millimeters.to_mm_factor(), 1.0);
        assert_eq!(Unit::Inches.to_mm_factor(), 25.4);
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(Unit::Millimeters.to_string(), "mm");
        assert_eq!(Unit::Inches.to_string(), "in");
    }

    #[test]
    fn test_approx_le() {
        assert!(float_cmp::approx_le(42.0, 42.0));
        assert!(float_cmp::approx_le(41.9, 42.0));
        assert!(!float_cmp::approx_le(42.1, 42.0));
    }
}
