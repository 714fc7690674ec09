//! Best-effort export of planned parts.
//!
//! Each part is built once and exported in every requested format. A failure
//! is recorded against its part and the remaining parts still run, so a
//! partly failed run leaves every file that could be produced.

use std::path::{Path, PathBuf};

use crate::generator::geometry::GeometryBackend;
use crate::generator::naming::{output_path, with_extension};
use crate::model::{DrawerPlan, ExportFormat, Part, PlannedPart};
use crate::validation::validate_drawer_plan;

/// One part/format that could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFailure {
    /// Position of the part in the plan.
    pub part_index: usize,
    /// Baseplate piece index, for baseplate pieces.
    pub piece_index: Option<usize>,
    /// Human-readable part label.
    pub part: String,
    /// Target file; `None` when the solid could not be built at all.
    pub path: Option<PathBuf>,
    /// Target format; `None` when the solid could not be built at all.
    pub format: Option<ExportFormat>,
    pub message: String,
}

impl std::fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} -> {}: {}", self.part, path.display(), self.message),
            None => write!(f, "{}: {}", self.part, self.message),
        }
    }
}

/// Outcome of an export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files the backend wrote, in order.
    pub written: Vec<PathBuf>,
    /// Everything that failed.
    pub failures: Vec<ExportFailure>,
    /// Non-blocking problems found in the plan.
    pub warnings: Vec<String>,
    /// Plan checks that failed; nothing is exported when this is not empty.
    pub errors: Vec<String>,
}

impl ExportReport {
    /// Whether every part was exported.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.errors.is_empty()
    }
}

/// Build and export `parts` into `output_dir`.
pub fn export_parts<B: GeometryBackend>(
    backend: &B,
    parts: &[PlannedPart],
    output_dir: &Path,
) -> ExportReport {
    let mut report = ExportReport::default();

    for (part_index, planned) in parts.iter().enumerate() {
        let label = planned.part.label();
        let failure = |path: Option<PathBuf>, format: Option<ExportFormat>, message: String| ExportFailure {
            part_index,
            piece_index: planned.part.piece_index(),
            part: label.clone(),
            path,
            format,
            message,
        };

        let solid = match build(backend, &planned.part) {
            Ok(solid) => solid,
            Err(e) => {
                tracing::warn!("Failed to build {}: {}", label, e);
                report.failures.push(failure(None, None, e.to_string()));
                continue;
            }
        };

        for &format in &planned.formats {
            let path = output_path(&with_extension(&planned.base_name, format), output_dir);
            match backend.export(&solid, &path, format) {
                Ok(written) => {
                    tracing::info!("Exported {}", written.display());
                    report.written.push(written);
                }
                Err(e) => {
                    tracing::warn!("Failed to export {} to {}: {}", label, path.display(), e);
                    report.failures.push(failure(Some(path), Some(format), e.to_string()));
                }
            }
        }
    }

    report
}

/// Export every part of a drawer plan.
///
/// The plan is checked again first. A plan with failed checks is not
/// exported at all and the failures are returned in [`ExportReport::errors`].
pub fn generate_drawer<B: GeometryBackend>(
    backend: &B,
    plan: &DrawerPlan,
    output_dir: &Path,
) -> ExportReport {
    let review = validate_drawer_plan(plan);
    if !review.passed {
        for err in &review.errors {
            tracing::error!("{}", err);
        }
        return ExportReport {
            warnings: review.warnings,
            errors: review.errors,
            ..Default::default()
        };
    }

    let mut report = export_parts(backend, plan.parts(), output_dir);
    report.warnings = review.warnings;
    report
}

fn build<B: GeometryBackend>(backend: &B, part: &Part) -> crate::error::Result<B::Solid> {
    match part {
        Part::Baseplate {
            placement, options, ..
        } => backend.build_baseplate(placement.footprint, options),
        Part::Spacer { spec, mode } => backend.build_spacer(spec, *mode),
        Part::Assembly { spec, split } => backend.build_spacer_assembly(spec, split),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{plan_drawer, DescriptorBackend};
    use crate::model::{DrawerOptions, PresetTable, PrinterProfile};
    use pretty_assertions::assert_eq;

    fn bambu_plan() -> DrawerPlan {
        let printer = PrinterProfile::from_preset(&PresetTable::builtin(), "bambu-x1c").unwrap();
        plan_drawer(330.0, 340.0, &printer, &DrawerOptions::default()).unwrap()
    }

    #[test]
    fn test_generate_drawer_reports_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let plan = bambu_plan();

        let report = generate_drawer(&DescriptorBackend::new(), &plan, dir.path());

        assert!(report.is_complete());
        assert_eq!(report.written.len(), plan.file_names().len());
        for path in &report.written {
            assert!(path.exists(), "{} was not written", path.display());
        }
        assert_eq!(report.warnings, plan.warnings());
    }

    #[test]
    fn test_generate_drawer_refuses_plan_with_oversized_pieces() {
        let dir = tempfile::tempdir().unwrap();
        let mut plan = bambu_plan();
        // 4x4 pieces (168mm) no longer fit a 150mm bed.
        plan.printer = PrinterProfile::from_custom(150.0, 150.0).unwrap();

        let report = generate_drawer(&DescriptorBackend::new(), &plan, dir.path());

        assert!(!report.is_complete());
        assert!(report.written.is_empty());
        assert!(report.failures.is_empty());
        assert_eq!(report.errors.len(), 4);
        assert!(report.errors[0].contains("does not fit the custom bed"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
