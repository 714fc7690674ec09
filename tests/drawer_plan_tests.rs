//! Integration tests for drawer planning and export.
//!
//! These run the whole pipeline through the public API: parse the drawer
//! size, resolve a printer, plan the parts, and export them to a temporary
//! directory. Backends that fail on purpose check that one bad part does not
//! take the rest of the run down with it.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use gridfinity_planner::{
    export_parts, generate_drawer, parse_dimension_mm, plan_drawer, plan_spacer,
    BaseplateOptions, DescriptorBackend, DrawerOptions, ErrorCode, ExportFormat, GeometryBackend,
    GridFootprint, PlanError, PresetTable, PrinterProfile, SpacerMode, SpacerOptions, SpacerOutput,
    SplitPlan,
};
use gridfinity_planner::model::SpacerSpec;
use pretty_assertions::assert_eq;

fn preset(key: &str) -> PrinterProfile {
    PrinterProfile::from_preset(&PresetTable::builtin(), key).unwrap()
}

// ==================== Scenarios ====================

#[test]
fn test_split_drawer_on_bambu() {
    let plan = plan_drawer(330.0, 340.0, &preset("bambu-x1c"), &DrawerOptions::default()).unwrap();

    assert_eq!(plan.footprint(), GridFootprint::new(7, 8));
    assert_eq!(plan.split().column_widths(), &[4, 3]);
    assert_eq!(plan.split().row_depths(), &[4, 4]);

    insta::assert_snapshot!(plan.file_names().join("\n"), @r###"
    drawer_330x340_baseplate_4x4_r1c1.stl
    drawer_330x340_baseplate_3x4_r1c2.stl
    drawer_330x340_baseplate_4x4_r2c1.stl
    drawer_330x340_baseplate_3x4_r2c2.stl
    drawer_330x340_spacer_half_set.stl
    drawer_330x340_full_assembly.step
    "###);
}

#[test]
fn test_default_tolerance_omitted_from_spacer_name() {
    let parts = plan_spacer(
        220.0,
        425.0,
        &SpacerOptions::default(),
        SpacerOutput::Set(SpacerMode::HalfSet),
        &[ExportFormat::Stl],
    )
    .unwrap();

    assert_eq!(parts[0].file_names(), vec!["drawer_220x425_spacer_half_set.stl"]);
}

#[test]
fn test_inch_drawer_with_custom_tolerance() {
    let width = parse_dimension_mm("11.5in").unwrap();
    let depth = parse_dimension_mm("20.5in").unwrap();
    assert!((width - 292.1).abs() < 1e-9);
    assert!((depth - 520.7).abs() < 1e-9);

    let mut options = DrawerOptions::default();
    options.spacer.tolerance_mm = 0.5;
    let plan = plan_drawer(width, depth, &preset("bambu-x1c"), &options).unwrap();

    assert_eq!(plan.footprint(), GridFootprint::new(6, 12));
    insta::assert_snapshot!(plan.file_names().join("\n"), @r###"
    drawer_292x520_baseplate_6x6_r1c1.stl
    drawer_292x520_baseplate_6x6_r2c1.stl
    drawer_292x520_tol0.5_spacer_half_set.stl
    drawer_292x520_tol0.5_full_assembly.step
    "###);
}

#[test]
fn test_small_custom_printer_fits_single_unit() {
    let printer = PrinterProfile::from_custom(50.0, 50.0).unwrap();
    assert_eq!(printer.name(), "custom");

    let plan = plan_drawer(42.0, 42.0, &printer, &DrawerOptions::default()).unwrap();
    assert_eq!(plan.footprint(), GridFootprint::new(1, 1));
    assert!(!plan.split().is_split());
    assert_eq!(plan.parts()[0].base_name, "drawer_42x42_baseplate_1x1");
}

#[test]
fn test_printer_smaller_than_one_unit() {
    let printer = PrinterProfile::from_custom(30.0, 30.0).unwrap();
    let err = plan_drawer(330.0, 340.0, &printer, &DrawerOptions::default()).unwrap_err();

    assert!(matches!(err, PlanError::PrinterTooSmall { .. }));
    assert_eq!(err.code(), ErrorCode::PrinterTooSmall);
    assert_eq!(err.code_value(), 5);
}

// ==================== Input errors ====================

#[test]
fn test_unknown_preset_lists_valid_keys() {
    let err = PrinterProfile::from_preset(&PresetTable::builtin(), "voron").unwrap_err();
    match err {
        PlanError::UnknownPreset { key, valid } => {
            assert_eq!(key, "voron");
            assert!(valid.contains(&"prusa-mk4".to_string()));
        }
        other => panic!("expected UnknownPreset, got {other:?}"),
    }
}

#[test]
fn test_bad_tokens_and_formats() {
    assert_eq!(parse_dimension_mm("abc").unwrap_err().code(), ErrorCode::ParseError);
    assert_eq!(parse_dimension_mm("-5").unwrap_err().code(), ErrorCode::ParseError);
    assert_eq!(
        "obj".parse::<ExportFormat>().unwrap_err().code(),
        ErrorCode::UnsupportedFormat
    );
}

#[test]
fn test_preset_file_overrides_builtin() {
    let json = r#"{"voron-24": {"name": "Voron 2.4", "max_width_mm": 350, "max_depth_mm": 350}}"#;
    let table = PresetTable::from_json_str(json).unwrap();
    let printer = PrinterProfile::from_preset(&table, "voron-24").unwrap();

    let plan = plan_drawer(330.0, 340.0, &printer, &DrawerOptions::default()).unwrap();
    assert!(!plan.split().is_split());
}

// ==================== Export ====================

#[test]
fn test_generate_drawer_writes_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let plan = plan_drawer(330.0, 340.0, &preset("bambu-x1c"), &DrawerOptions::default()).unwrap();

    let report = generate_drawer(&DescriptorBackend::new(), &plan, dir.path());

    assert!(report.is_complete());
    assert_eq!(report.written.len(), 6);
    for name in plan.file_names() {
        let descriptor = DescriptorBackend::descriptor_path(&dir.path().join(&name));
        assert!(report.written.contains(&descriptor), "unreported {}", descriptor.display());
        assert!(descriptor.exists(), "missing {}", descriptor.display());
    }
}

#[test]
fn test_repeated_formats_written_once() {
    let dir = tempfile::tempdir().unwrap();
    let options = DrawerOptions {
        baseplate_formats: vec![ExportFormat::Stl, ExportFormat::Stl],
        ..Default::default()
    };
    let plan = plan_drawer(330.0, 340.0, &preset("bambu-x1c"), &options).unwrap();

    let report = generate_drawer(&DescriptorBackend::new(), &plan, dir.path());
    assert!(report.is_complete());
    assert_eq!(report.written.len(), 6);
}

#[test]
fn test_printer_just_under_two_units() {
    let printer = PrinterProfile::from_custom(83.997, 83.997).unwrap();
    let plan = plan_drawer(130.0, 130.0, &printer, &DrawerOptions::default()).unwrap();

    assert_eq!(plan.footprint(), GridFootprint::new(3, 3));
    assert_eq!(plan.split().total_pieces(), 9);
    assert!(plan
        .split()
        .pieces()
        .iter()
        .all(|p| p.footprint == GridFootprint::new(1, 1)));
}

#[test]
fn test_generate_drawer_warns_about_oversized_spacers() {
    let dir = tempfile::tempdir().unwrap();
    let plan = plan_drawer(330.0, 340.0, &preset("bambu-x1c"), &DrawerOptions::default()).unwrap();

    assert!(plan
        .warnings()
        .iter()
        .any(|w| w.contains("Spacer width 330.0mm exceeds")));

    let report = generate_drawer(&DescriptorBackend::new(), &plan, dir.path());
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("Spacer width 330.0mm exceeds")));
}

/// Backend that fails on chosen parts and records what it exported.
#[derive(Default)]
struct FlakyBackend {
    fail_export_containing: Option<&'static str>,
    fail_spacer_build: bool,
    exported: RefCell<Vec<String>>,
}

impl GeometryBackend for FlakyBackend {
    type Solid = String;

    fn build_baseplate(&self, footprint: GridFootprint, _: &BaseplateOptions) -> gridfinity_planner::Result<String> {
        Ok(format!("baseplate {footprint}"))
    }

    fn build_spacer_half_set(&self, _: &SpacerSpec) -> gridfinity_planner::Result<String> {
        if self.fail_spacer_build {
            return Err(PlanError::Geometry {
                message: "spacer too thin to mesh".to_string(),
            });
        }
        Ok("spacer half_set".to_string())
    }

    fn build_spacer_full_set(&self, _: &SpacerSpec) -> gridfinity_planner::Result<String> {
        Ok("spacer full_set".to_string())
    }

    fn build_spacer_assembly(&self, _: &SpacerSpec, split: &SplitPlan) -> gridfinity_planner::Result<String> {
        Ok(format!("assembly of {}", split.total_pieces()))
    }

    fn export(&self, _: &String, path: &Path, _: ExportFormat) -> gridfinity_planner::Result<PathBuf> {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        if let Some(needle) = self.fail_export_containing {
            if name.contains(needle) {
                return Err(PlanError::Geometry {
                    message: "kernel crashed".to_string(),
                });
            }
        }
        self.exported.borrow_mut().push(name);
        Ok(path.to_path_buf())
    }
}

#[test]
fn test_export_failure_is_isolated_to_one_piece() {
    let plan = plan_drawer(330.0, 340.0, &preset("bambu-x1c"), &DrawerOptions::default()).unwrap();
    let backend = FlakyBackend {
        fail_export_containing: Some("r2c1"),
        ..Default::default()
    };

    let report = export_parts(&backend, plan.parts(), Path::new("out"));

    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].piece_index, Some(2));
    assert_eq!(report.failures[0].format, Some(ExportFormat::Stl));
    assert_eq!(report.written.len(), 5);
    assert_eq!(
        backend.exported.borrow().clone(),
        vec![
            "drawer_330x340_baseplate_4x4_r1c1.stl",
            "drawer_330x340_baseplate_3x4_r1c2.stl",
            "drawer_330x340_baseplate_3x4_r2c2.stl",
            "drawer_330x340_spacer_half_set.stl",
            "drawer_330x340_full_assembly.step",
        ]
    );
}

#[test]
fn test_build_failure_skips_only_that_part() {
    let plan = plan_drawer(330.0, 340.0, &preset("bambu-x1c"), &DrawerOptions::default()).unwrap();
    let backend = FlakyBackend {
        fail_spacer_build: true,
        ..Default::default()
    };

    let report = export_parts(&backend, plan.parts(), Path::new("out"));

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.part_index, 4);
    assert_eq!(failure.piece_index, None);
    assert_eq!(failure.path, None);
    assert!(failure.message.contains("spacer too thin"));
    assert_eq!(report.written.len(), 5);
}
