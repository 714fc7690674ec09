//! Data model types for drawer planning.

mod dimension;
mod footprint;
mod options;
mod plan;
mod printer;

pub use dimension::Dimension;
pub use footprint::{units_for_mm, GridFootprint};
pub use options::{
    unique_formats, BaseplateOptions, DrawerOptions, ExportFormat, SpacerMode, SpacerOptions,
};
pub use plan::{DrawerPlan, Part, PiecePlacement, PlannedPart, SpacerSpec, SplitPlan};
pub use printer::{PresetEntry, PresetTable, PrinterProfile, CUSTOM_PRINTER_NAME};
