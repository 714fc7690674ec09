//! Part planning, naming, and export.

mod drawer;
mod export;
mod geometry;
pub mod naming;

pub use drawer::{plan_baseplate, plan_drawer, plan_spacer, SpacerOutput};
pub use export::{export_parts, generate_drawer, ExportFailure, ExportReport};
pub use geometry::{DescriptorBackend, GeometryBackend, PartDescriptor};
pub use naming::{output_path, with_extension};
