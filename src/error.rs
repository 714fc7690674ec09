//! Error types for drawer planning.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for planning failures, used as process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed dimension token (2)
    ParseError = 2,
    /// Value outside its domain range (3)
    ValidationError = 3,
    /// Unknown printer preset key (4)
    UnknownPreset = 4,
    /// Printer bed cannot hold a single grid unit (5)
    PrinterTooSmall = 5,
    /// Export format not supported (6)
    UnsupportedFormat = 6,
    /// Geometry backend or file system failure (7)
    ExportFailed = 7,
    /// Preset table could not be loaded (8)
    PresetTable = 8,
}

/// Named domain constraint reported by a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value must be strictly positive.
    Positive,
    /// Drawer must hold at least one grid unit per axis.
    DrawerMinimum,
    /// Drawer dimension above the sanity bound.
    DrawerMaximum,
    /// Grid unit count must be at least one.
    GridUnits,
    /// Tolerance must lie within (0, 5] mm.
    ToleranceRange,
    /// Printer bed dimension above the plausibility bound.
    PrinterMaximum,
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Constraint::Positive => "positive",
            Constraint::DrawerMinimum => "drawer-minimum",
            Constraint::DrawerMaximum => "drawer-maximum",
            Constraint::GridUnits => "grid-units",
            Constraint::ToleranceRange => "tolerance-range",
            Constraint::PrinterMaximum => "printer-maximum",
        };
        f.write_str(name)
    }
}

/// Main error type for planning.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid dimension '{token}': {message}")]
    Parse { token: String, message: String },

    #[error("{field} violates {constraint}: {message} (got {value})")]
    Validation {
        field: String,
        constraint: Constraint,
        value: f64,
        message: String,
    },

    #[error("Unknown printer preset '{key}', must be one of: {}", .valid.join(", "))]
    UnknownPreset { key: String, valid: Vec<String> },

    #[error("Printer bed is too small: {axis} of {bed_mm}mm cannot hold one {grid_mm}mm grid unit")]
    PrinterTooSmall {
        axis: &'static str,
        bed_mm: f64,
        grid_mm: f64,
    },

    #[error("Unsupported file format '{value}', must be one of: {}", .allowed.join(", "))]
    UnsupportedFormat { value: String, allowed: Vec<String> },

    #[error("Plan failed checks: {}", .errors.join("; "))]
    PlanCheck { errors: Vec<String> },

    #[error("Geometry backend failed: {message}")]
    Geometry { message: String },

    #[error("Invalid preset table: {0}")]
    PresetTable(#[from] serde_json::Error),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlanError {
    /// Build a validation error.
    pub fn validation(
        field: impl Into<String>,
        constraint: Constraint,
        value: f64,
        message: impl Into<String>,
    ) -> Self {
        PlanError::Validation {
            field: field.into(),
            constraint,
            value,
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PlanError::Parse { .. } => ErrorCode::ParseError,
            PlanError::Validation { .. } => ErrorCode::ValidationError,
            PlanError::UnknownPreset { .. } => ErrorCode::UnknownPreset,
            PlanError::PrinterTooSmall { .. } => ErrorCode::PrinterTooSmall,
            PlanError::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            PlanError::PlanCheck { .. } => ErrorCode::ValidationError,
            PlanError::Geometry { .. } => ErrorCode::ExportFailed,
            PlanError::PresetTable(_) => ErrorCode::PresetTable,
            PlanError::Io { .. } => ErrorCode::ExportFailed,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for planning operations.
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_preset_message_lists_keys() {
        let err = PlanError::UnknownPreset {
            key: "voron".into(),
            valid: vec!["bambu-x1c".into(), "ender3".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown printer preset 'voron', must be one of: bambu-x1c, ender3"
        );
        assert_eq!(err.code(), ErrorCode::UnknownPreset);
    }

    #[test]
    fn test_validation_message_names_constraint() {
        let err = PlanError::validation("tolerance", Constraint::ToleranceRange, 7.5, "must be at most 5mm");
        assert_eq!(
            err.to_string(),
            "tolerance violates tolerance-range: must be at most 5mm (got 7.5)"
        );
        assert_eq!(err.code_value(), 3);
    }

    #[test]
    fn test_plan_check_joins_errors() {
        let err = PlanError::PlanCheck {
            errors: vec!["piece 1 too wide".into(), "piece 2 too deep".into()],
        };
        assert_eq!(err.to_string(), "Plan failed checks: piece 1 too wide; piece 2 too deep");
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }
}
