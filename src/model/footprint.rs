//! Footprints measured in Gridfinity grid units.

use serde::{Deserialize, Serialize};

use crate::config::GRID_UNIT_MM;

/// Whole grid units along an axis that fit in `mm`.
///
/// The remainder is dropped so a baseplate never exceeds the space it sits in.
pub fn units_for_mm(mm: f64) -> u32 {
    if mm <= 0.0 || !mm.is_finite() {
        return 0;
    }
    (mm / GRID_UNIT_MM).floor() as u32
}

/// A rectangle of whole grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridFootprint {
    /// Units along the width (X) axis.
    pub units_wide: u32,
    /// Units along the depth (Y) axis.
    pub units_deep: u32,
}

impl GridFootprint {
    /// Create a footprint.
    pub fn new(units_wide: u32, units_deep: u32) -> Self {
        Self {
            units_wide,
            units_deep,
        }
    }

    /// Largest footprint that fits inside a millimetre area.
    pub fn from_mm(width_mm: f64, depth_mm: f64) -> Self {
        Self::new(units_for_mm(width_mm), units_for_mm(depth_mm))
    }

    /// Physical width in mm.
    pub fn width_mm(&self) -> f64 {
        f64::from(self.units_wide) * GRID_UNIT_MM
    }

    /// Physical depth in mm.
    pub fn depth_mm(&self) -> f64 {
        f64::from(self.units_deep) * GRID_UNIT_MM
    }

    /// Number of grid cells.
    pub fn area_units(&self) -> u32 {
        self.units_wide * self.units_deep
    }
}

impl std::fmt::Display for GridFootprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.units_wide, self.units_deep)
    }
}
