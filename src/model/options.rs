//! Typed option sets for each part type.

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_ALIGN_TOLERANCE_MM, DEFAULT_COUNTERSINK_ANGLE_DEG, DEFAULT_COUNTERSINK_DIAM_MM,
    DEFAULT_MIN_MARGIN_MM, DEFAULT_SCREW_HOLE_DIAM_MM, DEFAULT_SPACER_CHAMFER_MM,
    DEFAULT_SPACER_THICKNESS_MM, DEFAULT_TOLERANCE_MM,
};
use crate::error::{PlanError, Result};
use crate::validation::{validate_file_format, validate_positive, validate_tolerance};

/// File formats a solid can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Stl,
    Step,
    Svg,
}

impl ExportFormat {
    /// Every supported format, in display order.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Stl, ExportFormat::Step, ExportFormat::Svg];

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Stl => "stl",
            ExportFormat::Step => "step",
            ExportFormat::Svg => "svg",
        }
    }
}

/// Drop repeated formats, keeping the first occurrence of each.
pub fn unique_formats(formats: &[ExportFormat]) -> Vec<ExportFormat> {
    let mut unique = Vec::with_capacity(formats.len());
    for &format in formats {
        if !unique.contains(&format) {
            unique.push(format);
        }
    }
    unique
}

impl std::str::FromStr for ExportFormat {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        validate_file_format(s)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Which spacer parts a spacer file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacerMode {
    /// One of each spacer; print twice for a complete set.
    #[default]
    HalfSet,
    /// Every spacer for the drawer.
    FullSet,
}

impl SpacerMode {
    /// Name used in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpacerMode::HalfSet => "half_set",
            SpacerMode::FullSet => "full_set",
        }
    }
}

impl std::fmt::Display for SpacerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spacer generation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacerOptions {
    /// Gap left between spacers and drawer walls, in mm.
    pub tolerance_mm: f64,
    /// Spacer thickness in mm.
    pub thickness_mm: f64,
    /// Edge chamfer in mm.
    pub chamfer_mm: f64,
    /// Emboss orientation arrows.
    pub show_arrows: bool,
    /// Add jigsaw interlocking joints.
    pub align_features: bool,
    /// Clearance for the interlocking joints in mm.
    pub align_tolerance_mm: f64,
    /// Gaps narrower than this get no spacer.
    pub min_margin_mm: f64,
}

impl Default for SpacerOptions {
    fn default() -> Self {
        Self {
            tolerance_mm: DEFAULT_TOLERANCE_MM,
            thickness_mm: DEFAULT_SPACER_THICKNESS_MM,
            chamfer_mm: DEFAULT_SPACER_CHAMFER_MM,
            show_arrows: true,
            align_features: true,
            align_tolerance_mm: DEFAULT_ALIGN_TOLERANCE_MM,
            min_margin_mm: DEFAULT_MIN_MARGIN_MM,
        }
    }
}

impl SpacerOptions {
    /// Check every numeric option.
    pub fn validate(&self) -> Result<()> {
        validate_tolerance(self.tolerance_mm)?;
        validate_positive(self.thickness_mm, "spacer thickness")?;
        validate_positive(self.chamfer_mm, "spacer chamfer")?;
        validate_positive(self.align_tolerance_mm, "align tolerance")?;
        validate_positive(self.min_margin_mm, "minimum margin")?;
        Ok(())
    }
}

/// Baseplate generation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseplateOptions {
    /// Add corner mounting screw tabs.
    pub corner_screws: bool,
    /// Screw hole diameter in mm.
    pub screw_hole_diam_mm: f64,
    /// Countersink diameter in mm.
    pub countersink_diam_mm: f64,
    /// Countersink angle in degrees.
    pub countersink_angle_deg: f64,
    /// Extra depth below the baseplate in mm.
    pub ext_depth_mm: f64,
    /// Flat bottom instead of the chamfered one.
    pub straight_bottom: bool,
}

impl Default for BaseplateOptions {
    fn default() -> Self {
        Self {
            corner_screws: false,
            screw_hole_diam_mm: DEFAULT_SCREW_HOLE_DIAM_MM,
            countersink_diam_mm: DEFAULT_COUNTERSINK_DIAM_MM,
            countersink_angle_deg: DEFAULT_COUNTERSINK_ANGLE_DEG,
            ext_depth_mm: 0.0,
            straight_bottom: false,
        }
    }
}

impl BaseplateOptions {
    /// Default options with corner screws switched on or off.
    pub fn with_corner_screws(corner_screws: bool) -> Self {
        Self {
            corner_screws,
            ..Default::default()
        }
    }

    /// Check every numeric option.
    pub fn validate(&self) -> Result<()> {
        validate_positive(self.screw_hole_diam_mm, "screw hole diameter")?;
        validate_positive(self.countersink_diam_mm, "countersink diameter")?;
        validate_positive(self.countersink_angle_deg, "countersink angle")?;
        if self.ext_depth_mm < 0.0 {
            return Err(PlanError::validation(
                "extended depth",
                crate::error::Constraint::Positive,
                self.ext_depth_mm,
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// Everything a drawer plan needs besides the drawer and the printer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerOptions {
    pub spacer: SpacerOptions,
    pub baseplate: BaseplateOptions,
    /// Formats for every baseplate piece.
    pub baseplate_formats: Vec<ExportFormat>,
    /// Formats for the spacer half set.
    pub spacer_formats: Vec<ExportFormat>,
    /// Formats for the full assembly.
    pub assembly_formats: Vec<ExportFormat>,
    /// Produce the full assembly reference.
    pub include_assembly: bool,
}

impl Default for DrawerOptions {
    fn default() -> Self {
        Self {
            spacer: SpacerOptions::default(),
            baseplate: BaseplateOptions::default(),
            baseplate_formats: vec![ExportFormat::Stl],
            spacer_formats: vec![ExportFormat::Stl],
            assembly_formats: vec![ExportFormat::Step],
            include_assembly: true,
        }
    }
}

impl DrawerOptions {
    /// Check the part options.
    pub fn validate(&self) -> Result<()> {
        self.spacer.validate()?;
        self.baseplate.validate()
    }
}
