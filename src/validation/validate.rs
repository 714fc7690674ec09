//! Domain checks on user-supplied values and finished plans.

use crate::config::{
    float_cmp, GRID_UNIT_MM, MAX_DRAWER_MM, MAX_PRINTER_BED_MM, MAX_TOLERANCE_MM,
};
use crate::error::{Constraint, PlanError, Result};
use crate::model::{DrawerPlan, ExportFormat};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }
}

/// Check that a value is strictly positive.
pub fn validate_positive(value: f64, name: &str) -> Result<f64> {
    if value.is_nan() || value <= 0.0 {
        return Err(PlanError::validation(
            name,
            Constraint::Positive,
            value,
            "must be positive",
        ));
    }
    Ok(value)
}

/// Check drawer interior dimensions in mm.
///
/// A drawer must hold at least one grid unit on each axis and must not be
/// larger than [`MAX_DRAWER_MM`].
pub fn validate_drawer_dimensions(width_mm: f64, depth_mm: f64) -> Result<(f64, f64)> {
    for (value, name) in [(width_mm, "drawer width"), (depth_mm, "drawer depth")] {
        validate_positive(value, name)?;

        if value > MAX_DRAWER_MM {
            return Err(PlanError::validation(
                name,
                Constraint::DrawerMaximum,
                value,
                format!("must be at most {MAX_DRAWER_MM}mm, check the units"),
            ));
        }

        if value < GRID_UNIT_MM {
            return Err(PlanError::validation(
                name,
                Constraint::DrawerMinimum,
                value,
                format!("must be at least {GRID_UNIT_MM}mm to hold one grid unit"),
            ));
        }
    }

    Ok((width_mm, depth_mm))
}

/// Check a grid unit count.
pub fn validate_grid_units(units: u32, name: &str) -> Result<u32> {
    if units < 1 {
        return Err(PlanError::validation(
            name,
            Constraint::GridUnits,
            f64::from(units),
            "must be at least 1 unit",
        ));
    }
    Ok(units)
}

/// Check a baseplate footprint in grid units.
pub fn validate_baseplate_units(units_wide: u32, units_deep: u32) -> Result<(u32, u32)> {
    validate_grid_units(units_wide, "baseplate width")?;
    validate_grid_units(units_deep, "baseplate depth")?;
    Ok((units_wide, units_deep))
}

/// Check a spacer tolerance in mm.
pub fn validate_tolerance(tolerance_mm: f64) -> Result<f64> {
    validate_positive(tolerance_mm, "tolerance")?;

    if tolerance_mm > MAX_TOLERANCE_MM {
        return Err(PlanError::validation(
            "tolerance",
            Constraint::ToleranceRange,
            tolerance_mm,
            format!("must be at most {MAX_TOLERANCE_MM}mm"),
        ));
    }

    Ok(tolerance_mm)
}

/// Check printer bed dimensions in mm.
///
/// Beds smaller than a grid unit pass here; the split planner rejects them
/// once it knows a baseplate has to be placed on them.
pub fn validate_printer_dimensions(max_width_mm: f64, max_depth_mm: f64) -> Result<(f64, f64)> {
    for (value, name) in [
        (max_width_mm, "printer max width"),
        (max_depth_mm, "printer max depth"),
    ] {
        validate_positive(value, name)?;

        if value > MAX_PRINTER_BED_MM {
            return Err(PlanError::validation(
                name,
                Constraint::PrinterMaximum,
                value,
                format!("must be at most {MAX_PRINTER_BED_MM}mm"),
            ));
        }
    }

    Ok((max_width_mm, max_depth_mm))
}

/// Check an export format name, case-insensitively.
pub fn validate_file_format(value: &str) -> Result<ExportFormat> {
    let normalized = value.trim().to_lowercase();
    ExportFormat::ALL
        .into_iter()
        .find(|format| format.extension() == normalized)
        .ok_or_else(|| PlanError::UnsupportedFormat {
            value: value.to_string(),
            allowed: ExportFormat::ALL
                .iter()
                .map(|format| format.extension().to_string())
                .collect(),
        })
}

/// Review a finished drawer plan for physical problems that do not block
/// generation.
pub fn validate_drawer_plan(plan: &DrawerPlan) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let spacer = plan.spacer();
    let printer = plan.printer();

    // Spacers are never split, so an oversized drawer means oversized spacers.
    if !float_cmp::approx_le(spacer.width_mm, printer.max_width_mm()) {
        result.add_warning(format!(
            "Spacer width {:.1}mm exceeds the {} bed width; the spacers will not print in one piece",
            spacer.width_mm,
            printer.name()
        ));
    }
    if !float_cmp::approx_le(spacer.depth_mm, printer.max_depth_mm()) {
        result.add_warning(format!(
            "Spacer depth {:.1}mm exceeds the {} bed depth; the spacers will not print in one piece",
            spacer.depth_mm,
            printer.name()
        ));
    }

    // Each side of the baseplate gets half of what the tolerance leaves over.
    let side_width = (spacer.width_mm - spacer.options.tolerance_mm - plan.footprint().width_mm()) / 2.0;
    let side_depth = (spacer.depth_mm - spacer.options.tolerance_mm - plan.footprint().depth_mm()) / 2.0;
    for (side, axis) in [(side_width, "width"), (side_depth, "depth")] {
        if side < spacer.options.min_margin_mm {
            result.add_warning(format!(
                "Spacer along the {} would be {:.1}mm, below the {:.1}mm minimum margin; it will be left out",
                axis, side, spacer.options.min_margin_mm
            ));
        }
    }

    for (idx, placement) in plan.split().pieces().iter().enumerate() {
        if !printer.fits(placement.footprint.width_mm(), placement.footprint.depth_mm()) {
            result.add_error(format!(
                "Baseplate piece {} ({}) does not fit the {} bed",
                idx + 1,
                placement.footprint,
                printer.name()
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ==================== positivity ====================

    #[test]
    fn test_validate_positive_accepts() {
        assert_eq!(validate_positive(330.0, "width").unwrap(), 330.0);
    }

    #[test]
    fn test_validate_positive_rejects_zero_negative_nan() {
        for value in [0.0, -10.0, f64::NAN] {
            let err = validate_positive(value, "width").unwrap_err();
            assert!(matches!(
                err,
                PlanError::Validation {
                    constraint: Constraint::Positive,
                    ..
                }
            ));
        }
    }

    // ==================== drawer ====================

    #[test]
    fn test_validate_drawer_dimensions_ok() {
        assert_eq!(
            validate_drawer_dimensions(330.0, 340.0).unwrap(),
            (330.0, 340.0)
        );
    }

    #[test]
    fn test_validate_drawer_dimensions_too_small() {
        let err = validate_drawer_dimensions(41.0, 340.0).unwrap_err();
        match err {
            PlanError::Validation {
                field, constraint, ..
            } => {
                assert_eq!(field, "drawer width");
                assert_eq!(constraint, Constraint::DrawerMinimum);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_drawer_dimensions_absurd() {
        // 330 inches entered as millimetres * 100 or similar slips
        let err = validate_drawer_dimensions(330.0, 34_000.0).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Validation {
                constraint: Constraint::DrawerMaximum,
                ..
            }
        ));
    }

    // ==================== grid units ====================

    #[test]
    fn test_validate_baseplate_units() {
        assert_eq!(validate_baseplate_units(7, 8).unwrap(), (7, 8));
        let err = validate_baseplate_units(7, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "baseplate depth violates grid-units: must be at least 1 unit (got 0)"
        );
    }

    // ==================== tolerance ====================

    #[test]
    fn test_validate_tolerance_range() {
        assert_eq!(validate_tolerance(0.5).unwrap(), 0.5);
        assert_eq!(validate_tolerance(5.0).unwrap(), 5.0);
        assert!(validate_tolerance(0.0).is_err());
        assert!(validate_tolerance(-0.5).is_err());

        let err = validate_tolerance(5.5).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Validation {
                constraint: Constraint::ToleranceRange,
                ..
            }
        ));
    }

    // ==================== printer ====================

    #[test]
    fn test_validate_printer_dimensions() {
        assert!(validate_printer_dimensions(256.0, 256.0).is_ok());
        assert!(validate_printer_dimensions(30.0, 30.0).is_ok());
        assert!(validate_printer_dimensions(-1.0, 256.0).is_err());

        let err = validate_printer_dimensions(256.0, 5_000.0).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Validation {
                constraint: Constraint::PrinterMaximum,
                ..
            }
        ));
    }

    // ==================== file format ====================

    #[test]
    fn test_validate_file_format() {
        assert_eq!(validate_file_format("stl").unwrap(), ExportFormat::Stl);
        assert_eq!(validate_file_format("Step").unwrap(), ExportFormat::Step);
        assert_eq!(validate_file_format("svg").unwrap(), ExportFormat::Svg);
    }

    #[test]
    fn test_validate_file_format_rejects_obj() {
        let err = validate_file_format("obj").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported file format 'obj', must be one of: stl, step, svg"
        );
    }
}
