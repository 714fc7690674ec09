//! Split plans, planned parts, and the drawer plan that ties them together.

use serde::Serialize;

use super::{BaseplateOptions, ExportFormat, GridFootprint, PrinterProfile, SpacerMode, SpacerOptions};

/// Where one baseplate piece sits in a split baseplate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PiecePlacement {
    /// Zero-based row, along the depth axis.
    pub row: usize,
    /// Zero-based column, along the width axis.
    pub column: usize,
    /// Size of this piece.
    pub footprint: GridFootprint,
    /// Units from the left edge of the full baseplate.
    pub offset_wide: u32,
    /// Units from the front edge of the full baseplate.
    pub offset_deep: u32,
}

/// A baseplate partitioned into a grid of printable pieces.
///
/// Pieces are stored row-major: left to right, then front to back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitPlan {
    total: GridFootprint,
    column_widths: Vec<u32>,
    row_depths: Vec<u32>,
    pieces: Vec<PiecePlacement>,
}

impl SplitPlan {
    /// Lay out the grid given per-column widths and per-row depths.
    pub(crate) fn from_axes(total: GridFootprint, column_widths: Vec<u32>, row_depths: Vec<u32>) -> Self {
        let mut pieces = Vec::with_capacity(column_widths.len() * row_depths.len());
        let mut offset_deep = 0;

        for (row, &depth) in row_depths.iter().enumerate() {
            let mut offset_wide = 0;
            for (column, &width) in column_widths.iter().enumerate() {
                pieces.push(PiecePlacement {
                    row,
                    column,
                    footprint: GridFootprint::new(width, depth),
                    offset_wide,
                    offset_deep,
                });
                offset_wide += width;
            }
            offset_deep += depth;
        }

        Self {
            total,
            column_widths,
            row_depths,
            pieces,
        }
    }

    /// A plan with the whole footprint as its only piece.
    pub(crate) fn single(total: GridFootprint) -> Self {
        Self::from_axes(total, vec![total.units_wide], vec![total.units_deep])
    }

    /// Footprint of the whole baseplate.
    pub fn total_footprint(&self) -> GridFootprint {
        self.total
    }

    /// Pieces in row-major order.
    pub fn pieces(&self) -> &[PiecePlacement] {
        &self.pieces
    }

    /// Width in units of each column.
    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    /// Depth in units of each row.
    pub fn row_depths(&self) -> &[u32] {
        &self.row_depths
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.row_depths.len()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.column_widths.len()
    }

    /// Total number of pieces.
    pub fn total_pieces(&self) -> usize {
        self.pieces.len()
    }

    /// Whether the baseplate had to be cut.
    pub fn is_split(&self) -> bool {
        self.pieces.len() > 1
    }
}

/// Everything the geometry backend needs to build the spacers for a drawer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpacerSpec {
    /// Drawer interior width in mm.
    pub width_mm: f64,
    /// Drawer interior depth in mm.
    pub depth_mm: f64,
    pub options: SpacerOptions,
}

/// A part that a plan asks the geometry backend to build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Part {
    /// One baseplate piece.
    Baseplate {
        piece_index: usize,
        placement: PiecePlacement,
        options: BaseplateOptions,
    },
    /// A set of spacers.
    Spacer { spec: SpacerSpec, mode: SpacerMode },
    /// Spacers and baseplate pieces together, for reference.
    Assembly { spec: SpacerSpec, split: SplitPlan },
}

impl Part {
    /// Short label for logs and reports.
    pub fn label(&self) -> String {
        match self {
            Part::Baseplate {
                piece_index,
                placement,
                ..
            } => format!("baseplate piece {} ({})", piece_index + 1, placement.footprint),
            Part::Spacer { mode, .. } => format!("spacer {mode}"),
            Part::Assembly { .. } => "full assembly".to_string(),
        }
    }

    /// Baseplate piece index, if this is a baseplate piece.
    pub fn piece_index(&self) -> Option<usize> {
        match self {
            Part::Baseplate { piece_index, .. } => Some(*piece_index),
            _ => None,
        }
    }
}

/// A part together with its file name stem and requested export formats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedPart {
    pub part: Part,
    /// File name without extension or directory.
    pub base_name: String,
    pub formats: Vec<ExportFormat>,
}

impl PlannedPart {
    /// File names, one per format.
    pub fn file_names(&self) -> Vec<String> {
        self.formats
            .iter()
            .map(|format| crate::generator::with_extension(&self.base_name, *format))
            .collect()
    }
}

/// The complete, immutable plan for one drawer.
#[derive(Debug, Clone, Serialize)]
pub struct DrawerPlan {
    pub(crate) drawer_width_mm: f64,
    pub(crate) drawer_depth_mm: f64,
    pub(crate) footprint: GridFootprint,
    pub(crate) printer: PrinterProfile,
    pub(crate) split: SplitPlan,
    pub(crate) spacer: SpacerSpec,
    pub(crate) baseplate: BaseplateOptions,
    pub(crate) parts: Vec<PlannedPart>,
    pub(crate) warnings: Vec<String>,
}

impl DrawerPlan {
    /// Drawer interior width in mm.
    pub fn drawer_width_mm(&self) -> f64 {
        self.drawer_width_mm
    }

    /// Drawer interior depth in mm.
    pub fn drawer_depth_mm(&self) -> f64 {
        self.drawer_depth_mm
    }

    /// Baseplate footprint before splitting.
    pub fn footprint(&self) -> GridFootprint {
        self.footprint
    }

    /// Printer the baseplate was split for.
    pub fn printer(&self) -> &PrinterProfile {
        &self.printer
    }

    /// How the baseplate is cut.
    pub fn split(&self) -> &SplitPlan {
        &self.split
    }

    /// Spacer size and options.
    pub fn spacer(&self) -> &SpacerSpec {
        &self.spacer
    }

    /// Baseplate options shared by every piece.
    pub fn baseplate_options(&self) -> &BaseplateOptions {
        &self.baseplate
    }

    /// Every part to build, in export order.
    pub fn parts(&self) -> &[PlannedPart] {
        &self.parts
    }

    /// Non-blocking problems found while planning, such as spacers larger
    /// than the bed.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Every file name the plan produces.
    pub fn file_names(&self) -> Vec<String> {
        self.parts.iter().flat_map(PlannedPart::file_names).collect()
    }
}
