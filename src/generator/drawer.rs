//! Drawer, baseplate, and spacer planning.
//!
//! Planning is pure: every check that can reject the input runs here, before
//! any geometry is built. The resulting parts are handed to
//! [`super::export_parts`].

use crate::error::{PlanError, Result};
use crate::generator::naming::{assembly_name, baseplate_name, baseplate_piece_names, spacer_name};
use crate::model::{
    unique_formats, BaseplateOptions, DrawerOptions, DrawerPlan, ExportFormat, GridFootprint, Part, PlannedPart,
    PrinterProfile, SpacerMode, SpacerOptions, SpacerSpec, SplitPlan,
};
use crate::transform::plan_split;
use crate::validation::{validate_baseplate_units, validate_drawer_dimensions, validate_drawer_plan};

/// What the standalone spacer command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacerOutput {
    /// A spacer set.
    Set(SpacerMode),
    /// Spacers laid out around the baseplate, for reference.
    Assembly,
}

impl std::str::FromStr for SpacerOutput {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "half_set" => Ok(SpacerOutput::Set(SpacerMode::HalfSet)),
            "full_set" => Ok(SpacerOutput::Set(SpacerMode::FullSet)),
            "full_assembly" => Ok(SpacerOutput::Assembly),
            other => Err(format!(
                "unknown spacer mode '{other}', must be one of: half_set, full_set, full_assembly"
            )),
        }
    }
}

/// Plan every part for a drawer.
///
/// Fails before any geometry work if the drawer, the options, or the printer
/// cannot produce a valid baseplate. Problems that do not block generation
/// are logged and kept in [`DrawerPlan::warnings`].
pub fn plan_drawer(
    width_mm: f64,
    depth_mm: f64,
    printer: &PrinterProfile,
    options: &DrawerOptions,
) -> Result<DrawerPlan> {
    validate_drawer_dimensions(width_mm, depth_mm)?;
    options.validate()?;

    let footprint = GridFootprint::from_mm(width_mm, depth_mm);
    validate_baseplate_units(footprint.units_wide, footprint.units_deep)?;

    let split = plan_split(footprint, printer)?;
    tracing::debug!(
        "Drawer {:.1}x{:.1}mm -> baseplate {} in {} piece(s)",
        width_mm,
        depth_mm,
        footprint,
        split.total_pieces()
    );

    let spacer = SpacerSpec {
        width_mm,
        depth_mm,
        options: options.spacer.clone(),
    };

    let mut parts = Vec::new();

    let piece_names = baseplate_piece_names(width_mm, depth_mm, &split, options.baseplate.corner_screws);
    for (piece_index, (placement, base_name)) in split.pieces().iter().zip(piece_names).enumerate() {
        push_part(
            &mut parts,
            Part::Baseplate {
                piece_index,
                placement: *placement,
                options: options.baseplate.clone(),
            },
            base_name,
            &options.baseplate_formats,
        );
    }

    push_part(
        &mut parts,
        Part::Spacer {
            spec: spacer.clone(),
            mode: SpacerMode::HalfSet,
        },
        spacer_name(width_mm, depth_mm, spacer.options.tolerance_mm, SpacerMode::HalfSet),
        &options.spacer_formats,
    );

    if options.include_assembly {
        push_part(
            &mut parts,
            Part::Assembly {
                spec: spacer.clone(),
                split: split.clone(),
            },
            assembly_name(width_mm, depth_mm, spacer.options.tolerance_mm),
            &options.assembly_formats,
        );
    }

    let mut plan = DrawerPlan {
        drawer_width_mm: width_mm,
        drawer_depth_mm: depth_mm,
        footprint,
        printer: printer.clone(),
        split,
        spacer,
        baseplate: options.baseplate.clone(),
        parts,
        warnings: Vec::new(),
    };

    let review = validate_drawer_plan(&plan);
    if !review.passed {
        return Err(PlanError::PlanCheck {
            errors: review.errors,
        });
    }
    for warning in &review.warnings {
        tracing::warn!("{}", warning);
    }
    plan.warnings = review.warnings;

    Ok(plan)
}

/// Plan a single, unsplit baseplate of the given grid size.
///
/// The name uses the baseplate's own size in mm as the drawer footprint.
pub fn plan_baseplate(
    units_wide: u32,
    units_deep: u32,
    options: &BaseplateOptions,
    formats: &[ExportFormat],
) -> Result<Vec<PlannedPart>> {
    validate_baseplate_units(units_wide, units_deep)?;
    options.validate()?;

    let footprint = GridFootprint::new(units_wide, units_deep);
    let split = SplitPlan::single(footprint);
    let placement = split.pieces()[0];

    let mut parts = Vec::new();
    push_part(
        &mut parts,
        Part::Baseplate {
            piece_index: 0,
            placement,
            options: options.clone(),
        },
        baseplate_name(footprint.width_mm(), footprint.depth_mm(), footprint, options.corner_screws),
        formats,
    );
    Ok(parts)
}

/// Plan the spacers for a drawer without its baseplate.
pub fn plan_spacer(
    width_mm: f64,
    depth_mm: f64,
    options: &SpacerOptions,
    output: SpacerOutput,
    formats: &[ExportFormat],
) -> Result<Vec<PlannedPart>> {
    validate_drawer_dimensions(width_mm, depth_mm)?;
    options.validate()?;

    let spec = SpacerSpec {
        width_mm,
        depth_mm,
        options: options.clone(),
    };

    let mut parts = Vec::new();
    match output {
        SpacerOutput::Set(mode) => push_part(
            &mut parts,
            Part::Spacer {
                spec: spec.clone(),
                mode,
            },
            spacer_name(width_mm, depth_mm, options.tolerance_mm, mode),
            formats,
        ),
        SpacerOutput::Assembly => {
            let split = SplitPlan::single(GridFootprint::from_mm(width_mm, depth_mm));
            push_part(
                &mut parts,
                Part::Assembly { spec, split },
                assembly_name(width_mm, depth_mm, options.tolerance_mm),
                formats,
            )
        }
    }
    Ok(parts)
}

/// Parts without formats are not exported and are left out of the plan.
fn push_part(parts: &mut Vec<PlannedPart>, part: Part, base_name: String, formats: &[ExportFormat]) {
    if formats.is_empty() {
        tracing::debug!("Skipping {}: no export formats requested", part.label());
        return;
    }
    parts.push(PlannedPart {
        part,
        base_name,
        formats: unique_formats(formats),
    });
}
