//! gridfinity-planner - Plan Gridfinity baseplates and drawer spacers.
//!
//! Turns a drawer's interior size and a printer's bed limits into a plan of
//! printable parts: baseplate pieces split to fit the bed, a spacer set that
//! fills the leftover gap, and an optional reference assembly. Every part
//! gets a deterministic file name.
//!
//! # Example
//!
//! ```no_run
//! use gridfinity_planner::{
//!     generate_drawer, parse_dimension_mm, plan_drawer, DescriptorBackend, DrawerOptions,
//!     PresetTable, PrinterProfile,
//! };
//! use std::path::Path;
//!
//! let presets = PresetTable::builtin();
//! let printer = PrinterProfile::from_preset(&presets, "bambu-x1c").unwrap();
//! let width = parse_dimension_mm("11.5in").unwrap();
//! let depth = parse_dimension_mm("20.5in").unwrap();
//!
//! let plan = plan_drawer(width, depth, &printer, &DrawerOptions::default()).unwrap();
//! let report = generate_drawer(&DescriptorBackend::new(), &plan, Path::new("output"));
//! assert!(report.is_complete());
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod transform;
pub mod validation;

// Re-exports for convenience
pub use config::Unit;
pub use error::{Constraint, ErrorCode, PlanError, Result};
pub use generator::{
    export_parts, generate_drawer, plan_baseplate, plan_drawer, plan_spacer, DescriptorBackend,
    ExportFailure, ExportReport, GeometryBackend, SpacerOutput,
};
pub use model::{
    BaseplateOptions, Dimension, DrawerOptions, DrawerPlan, ExportFormat, GridFootprint, Part,
    PlannedPart, PresetTable, PrinterProfile, SpacerMode, SpacerOptions, SplitPlan,
};
pub use parser::{parse_dimension, parse_dimension_mm};
pub use transform::plan_split;
pub use validation::{validate_drawer_plan, ValidationResult};
