//! Dimension token parsing.
//!
//! Tokens are plain decimal numbers in millimetres (`330`, `292.1`) or carry
//! an inch suffix (`11.5in`). Everything is normalized to millimetres.

use crate::config::{Unit, MM_PER_INCH};
use crate::error::{PlanError, Result};
use crate::model::Dimension;

/// Convert inches to millimetres.
pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Convert millimetres to inches.
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Parse a dimension token.
pub fn parse_dimension(token: &str) -> Result<Dimension> {
    let normalized = token.trim().to_lowercase();

    let (number, unit) = match normalized.strip_suffix(Unit::Inches.suffix()) {
        Some(rest) => (rest.trim_end(), Unit::Inches),
        None => (normalized.as_str(), Unit::Millimeters),
    };

    let value = parse_decimal(number).ok_or_else(|| PlanError::Parse {
        token: token.to_string(),
        message: match unit {
            Unit::Inches => "expected a number followed by 'in'".to_string(),
            Unit::Millimeters => "expected a number of millimetres or a value like '11.5in'".to_string(),
        },
    })?;

    if value <= 0.0 {
        return Err(PlanError::Parse {
            token: token.to_string(),
            message: format!("dimension must be positive, got {value} {unit}"),
        });
    }

    Ok(Dimension::new(value, unit))
}

/// Parse a dimension token straight to millimetres.
pub fn parse_dimension_mm(token: &str) -> Result<f64> {
    parse_dimension(token).map(|dim| dim.mm())
}

/// Accept signed decimal numbers only: no exponents, no `inf`/`nan`.
fn parse_decimal(s: &str) -> Option<f64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let mut seen_digit = false;
    let mut seen_dot = false;

    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }

    if !seen_digit {
        return None;
    }

    s.parse::<f64>().ok()
}
