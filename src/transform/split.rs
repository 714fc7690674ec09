//! Baseplate splitting for printer bed limits.
//!
//! A baseplate that is larger than the bed on either axis is cut into a grid
//! of pieces. Each axis is handled on its own: the number of pieces is the
//! smallest that keeps every piece within the bed, and the units are shared
//! out so that piece sizes differ by at most one unit, larger pieces first.

use crate::config::{EPS, GRID_UNIT_MM};
use crate::error::{PlanError, Result};
use crate::model::{GridFootprint, PrinterProfile, SplitPlan};
use crate::validation::validate_baseplate_units;

/// Most whole grid units that fit within `bed_mm`.
///
/// Uses the same mm tolerance as [`PrinterProfile::fits`].
pub fn max_units_per_piece(bed_mm: f64, axis: &'static str) -> Result<u32> {
    let units = ((bed_mm + EPS) / GRID_UNIT_MM).floor();
    if units < 1.0 {
        return Err(PlanError::PrinterTooSmall {
            axis,
            bed_mm,
            grid_mm: GRID_UNIT_MM,
        });
    }
    Ok(units as u32)
}

/// Share `total_units` across the fewest pieces of at most `max_units` each.
///
/// The first `total % pieces` pieces get one extra unit.
pub fn split_axis(total_units: u32, max_units: u32) -> Vec<u32> {
    debug_assert!(max_units >= 1);
    if total_units <= max_units {
        return vec![total_units];
    }

    let pieces = total_units.div_ceil(max_units);
    let base = total_units / pieces;
    let extra = total_units % pieces;

    (0..pieces)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}

/// Decide how `footprint` must be cut to print on `printer`.
pub fn plan_split(footprint: GridFootprint, printer: &PrinterProfile) -> Result<SplitPlan> {
    validate_baseplate_units(footprint.units_wide, footprint.units_deep)?;

    if printer.fits(footprint.width_mm(), footprint.depth_mm()) {
        tracing::debug!(
            "Baseplate {} ({}x{}mm) fits {} in one piece",
            footprint,
            footprint.width_mm(),
            footprint.depth_mm(),
            printer
        );
        return Ok(SplitPlan::single(footprint));
    }

    let max_wide = max_units_per_piece(printer.max_width_mm(), "width")?;
    let max_deep = max_units_per_piece(printer.max_depth_mm(), "depth")?;

    let column_widths = split_axis(footprint.units_wide, max_wide);
    let row_depths = split_axis(footprint.units_deep, max_deep);

    tracing::debug!(
        "Baseplate {} split for {}: columns {:?}, rows {:?}",
        footprint,
        printer,
        column_widths,
        row_depths
    );

    Ok(SplitPlan::from_axes(footprint, column_widths, row_depths))
}
