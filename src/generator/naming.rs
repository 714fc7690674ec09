//! File naming for generated parts.
//!
//! Names encode the drawer footprint and every non-default parameter, e.g.
//! `drawer_330x340_tol0.5_spacer_half_set` or
//! `drawer_330x340_screws_baseplate_4x4_r1c2`. Downstream scripts match on
//! these patterns, so changes here are breaking changes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_TOLERANCE_MM;
use crate::model::{ExportFormat, GridFootprint, SpacerMode, SplitPlan};

/// What kind of part is being named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Spacer(SpacerMode),
    Baseplate(GridFootprint),
    Assembly,
}

/// Optional name segments. Fields left at their default are not rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NamingParameters {
    /// Spacer tolerance in mm; omitted when equal to the default.
    pub tolerance_mm: Option<f64>,
    /// Corner screws on a baseplate.
    pub corner_screws: bool,
    /// Zero-based (row, column) of a split piece that needs disambiguating.
    pub position: Option<(usize, usize)>,
}

/// Build a file name stem for a part of a drawer.
pub fn part_name(width_mm: f64, depth_mm: f64, kind: NameKind, params: &NamingParameters) -> String {
    let mut name = format!("drawer_{}x{}", format_mm(width_mm), format_mm(depth_mm));

    match kind {
        NameKind::Spacer(_) | NameKind::Assembly => {
            if let Some(tolerance) = params.tolerance_mm {
                if tolerance != DEFAULT_TOLERANCE_MM {
                    name.push_str("_tol");
                    name.push_str(&format_tolerance(tolerance));
                }
            }
        }
        NameKind::Baseplate(_) => {
            if params.corner_screws {
                name.push_str("_screws");
            }
        }
    }

    match kind {
        NameKind::Spacer(mode) => {
            name.push_str("_spacer_");
            name.push_str(mode.as_str());
        }
        NameKind::Baseplate(footprint) => {
            name.push_str("_baseplate_");
            name.push_str(&footprint.to_string());
        }
        NameKind::Assembly => name.push_str("_full_assembly"),
    }

    if let Some((row, column)) = params.position {
        name.push_str(&position_suffix(row, column));
    }

    name
}

/// Spacer name stem.
pub fn spacer_name(width_mm: f64, depth_mm: f64, tolerance_mm: f64, mode: SpacerMode) -> String {
    let params = NamingParameters {
        tolerance_mm: Some(tolerance_mm),
        ..Default::default()
    };
    part_name(width_mm, depth_mm, NameKind::Spacer(mode), &params)
}

/// Baseplate name stem for one piece footprint.
pub fn baseplate_name(
    width_mm: f64,
    depth_mm: f64,
    footprint: GridFootprint,
    corner_screws: bool,
) -> String {
    let params = NamingParameters {
        corner_screws,
        ..Default::default()
    };
    part_name(width_mm, depth_mm, NameKind::Baseplate(footprint), &params)
}

/// Full assembly name stem.
pub fn assembly_name(width_mm: f64, depth_mm: f64, tolerance_mm: f64) -> String {
    let params = NamingParameters {
        tolerance_mm: Some(tolerance_mm),
        ..Default::default()
    };
    part_name(width_mm, depth_mm, NameKind::Assembly, &params)
}

/// Name stems for every piece of a split baseplate, in piece order.
///
/// Pieces whose plain names would collide get a `_r{row}c{column}` suffix
/// (1-based); pieces with a unique size keep the plain name.
pub fn baseplate_piece_names(
    width_mm: f64,
    depth_mm: f64,
    split: &SplitPlan,
    corner_screws: bool,
) -> Vec<String> {
    let plain: Vec<String> = split
        .pieces()
        .iter()
        .map(|piece| baseplate_name(width_mm, depth_mm, piece.footprint, corner_screws))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &plain {
        *counts.entry(name.as_str()).or_default() += 1;
    }

    plain
        .iter()
        .zip(split.pieces())
        .map(|(name, piece)| {
            if counts[name.as_str()] > 1 {
                format!("{}{}", name, position_suffix(piece.row, piece.column))
            } else {
                name.clone()
            }
        })
        .collect()
}

/// Append the extension for `format`.
pub fn with_extension(name: &str, format: ExportFormat) -> String {
    format!("{}.{}", name, format.extension())
}

/// Join a file name with an output directory.
pub fn output_path(file_name: &str, output_dir: impl AsRef<Path>) -> PathBuf {
    output_dir.as_ref().join(file_name)
}

fn position_suffix(row: usize, column: usize) -> String {
    format!("_r{}c{}", row + 1, column + 1)
}

/// Drawer dimensions are truncated to whole millimetres.
fn format_mm(mm: f64) -> String {
    format!("{}", mm.trunc() as u64)
}

/// Whole tolerances keep one decimal (`2.0`), others print as-is (`0.75`).
fn format_tolerance(tolerance_mm: f64) -> String {
    if tolerance_mm.fract() == 0.0 {
        format!("{tolerance_mm:.1}")
    } else {
        format!("{tolerance_mm}")
    }
}
