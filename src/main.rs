//! gridfinity-planner - CLI for planning Gridfinity drawer inserts.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gridfinity_planner::config::{DEFAULT_OUTPUT_DIR, DEFAULT_PRINTER, GRID_UNIT_MM};
use gridfinity_planner::{
    export_parts, generate_drawer, parse_dimension, plan_baseplate, plan_drawer, plan_spacer,
    BaseplateOptions, DescriptorBackend, DrawerOptions, ExportFormat, ExportReport, PlanError,
    PresetTable, PrinterProfile, SpacerMode, SpacerOptions, SpacerOutput,
};
use gridfinity_planner::model::unique_formats;

/// Generate Gridfinity baseplates and drawer spacers sized for your drawers
/// and your printer.
#[derive(Parser, Debug)]
#[command(name = "gridfinity-planner")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Spacers plus baseplate pieces split to fit the printer
    Drawer(DrawerArgs),
    /// A single baseplate of a given size in grid units (1 unit = 42mm)
    Baseplate(BaseplateArgs),
    /// Spacers only
    Spacer(SpacerArgs),
}

/// Options shared by the spacer-producing commands.
#[derive(Args, Debug)]
struct SpacerFlags {
    /// Spacer tolerance in mm
    #[arg(short, long, default_value_t = 1.0)]
    tolerance: f64,

    /// Spacer thickness in mm
    #[arg(long, default_value_t = 5.0)]
    thickness: f64,

    /// Edge chamfer radius in mm
    #[arg(long, default_value_t = 1.0)]
    chamfer: f64,

    /// Disable orientation arrows on spacers
    #[arg(long)]
    no_arrows: bool,

    /// Disable jigsaw interlocking features
    #[arg(long)]
    no_align: bool,
}

impl SpacerFlags {
    fn to_options(&self) -> SpacerOptions {
        SpacerOptions {
            tolerance_mm: self.tolerance,
            thickness_mm: self.thickness,
            chamfer_mm: self.chamfer,
            show_arrows: !self.no_arrows,
            align_features: !self.no_align,
            ..Default::default()
        }
    }
}

#[derive(Args, Debug)]
struct DrawerArgs {
    /// Drawer interior width (mm, or inches with an "in" suffix)
    width: String,

    /// Drawer interior depth (mm, or inches with an "in" suffix)
    depth: String,

    /// Printer preset
    #[arg(short, long, default_value = DEFAULT_PRINTER)]
    printer: String,

    /// Custom bed width in mm (overrides --printer)
    #[arg(long, requires = "bed_depth")]
    bed_width: Option<f64>,

    /// Custom bed depth in mm (overrides --printer)
    #[arg(long, requires = "bed_width")]
    bed_depth: Option<f64>,

    /// JSON file with printer presets to use instead of the built-in table
    #[arg(long)]
    presets: Option<PathBuf>,

    #[command(flatten)]
    spacer: SpacerFlags,

    /// Add corner mounting screws to the baseplate
    #[arg(long)]
    corner_screws: bool,

    /// Skip the full assembly reference file
    #[arg(long)]
    no_assembly: bool,

    /// Formats for baseplate pieces and spacers
    #[arg(short, long, value_delimiter = ',', default_value = "stl")]
    format: Vec<String>,

    /// Formats for the full assembly
    #[arg(long, value_delimiter = ',', default_value = "step")]
    assembly_format: Vec<String>,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Print the plan as JSON and exit without generating files
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct BaseplateArgs {
    /// Width in grid units
    width: u32,

    /// Depth in grid units
    depth: u32,

    /// Output file format
    #[arg(short, long, value_delimiter = ',', default_value = "stl")]
    format: Vec<String>,

    /// Add corner mounting screws
    #[arg(long)]
    corner_screws: bool,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct SpacerArgs {
    /// Drawer interior width (mm, or inches with an "in" suffix)
    width: String,

    /// Drawer interior depth (mm, or inches with an "in" suffix)
    depth: String,

    /// Rendering mode: half_set (print twice), full_set, or full_assembly
    #[arg(short, long, default_value = "half_set")]
    mode: SpacerOutput,

    #[command(flatten)]
    spacer: SpacerFlags,

    /// Output file format
    #[arg(short, long, value_delimiter = ',', default_value = "stl")]
    format: Vec<String>,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let outcome = match cli.command {
        Command::Drawer(args) => run_drawer(args),
        Command::Baseplate(args) => run_baseplate(args),
        Command::Spacer(args) => run_spacer(args),
    };

    match outcome {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(report)) => finish(&report),
        Err(err) => {
            error!("{:#}", err);
            let code = err
                .downcast_ref::<PlanError>()
                .map(PlanError::code_value)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run_drawer(args: DrawerArgs) -> Result<Option<ExportReport>> {
    let width = parse_dimension(&args.width)?;
    let depth = parse_dimension(&args.depth)?;
    info!("Drawer dimensions: {} × {}", width, depth);

    let printer = load_printer(&args)?;
    info!("Printer: {}", printer);

    let options = DrawerOptions {
        spacer: args.spacer.to_options(),
        baseplate: BaseplateOptions::with_corner_screws(args.corner_screws),
        baseplate_formats: parse_formats(&args.format)?,
        spacer_formats: parse_formats(&args.format)?,
        assembly_formats: parse_formats(&args.assembly_format)?,
        include_assembly: !args.no_assembly,
    };

    let plan = plan_drawer(width.mm(), depth.mm(), &printer, &options)?;
    let footprint = plan.footprint();
    info!(
        "Baseplate dimensions: {} units ({}×{} mm)",
        footprint,
        footprint.width_mm(),
        footprint.depth_mm()
    );

    let split = plan.split();
    if split.is_split() {
        warn!(
            "Baseplate will be split into {} pieces ({} × {}) to fit printer constraints",
            split.total_pieces(),
            split.columns(),
            split.rows()
        );
    } else {
        info!("Baseplate fits on printer in one piece");
    }

    if args.dry_run {
        let json = serde_json::to_string_pretty(&plan)?;
        println!("{}", json);
        return Ok(None);
    }

    Ok(Some(generate_drawer(
        &DescriptorBackend::new(),
        &plan,
        &args.output,
    )))
}

fn run_baseplate(args: BaseplateArgs) -> Result<Option<ExportReport>> {
    info!(
        "Baseplate dimensions: {}×{} units ({}×{} mm)",
        args.width,
        args.depth,
        f64::from(args.width) * GRID_UNIT_MM,
        f64::from(args.depth) * GRID_UNIT_MM
    );

    let options = BaseplateOptions::with_corner_screws(args.corner_screws);
    let parts = plan_baseplate(args.width, args.depth, &options, &parse_formats(&args.format)?)?;
    Ok(Some(export_parts(
        &DescriptorBackend::new(),
        &parts,
        &args.output,
    )))
}

fn run_spacer(args: SpacerArgs) -> Result<Option<ExportReport>> {
    let width = parse_dimension(&args.width)?;
    let depth = parse_dimension(&args.depth)?;
    info!("Spacer dimensions: {} × {}", width, depth);

    let parts = plan_spacer(
        width.mm(),
        depth.mm(),
        &args.spacer.to_options(),
        args.mode,
        &parse_formats(&args.format)?,
    )?;
    let report = export_parts(&DescriptorBackend::new(), &parts, &args.output);

    if args.mode == SpacerOutput::Set(SpacerMode::HalfSet) {
        info!("Print the half set twice to get a complete set");
    }
    Ok(Some(report))
}

fn load_printer(args: &DrawerArgs) -> Result<PrinterProfile> {
    if let (Some(width), Some(depth)) = (args.bed_width, args.bed_depth) {
        return Ok(PrinterProfile::from_custom(width, depth)?);
    }

    let presets = match &args.presets {
        Some(path) => load_presets(path)?,
        None => PresetTable::builtin(),
    };
    Ok(PrinterProfile::from_preset(&presets, &args.printer)?)
}

fn load_presets(path: &Path) -> Result<PresetTable> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let table = PresetTable::from_json_str(&json)
        .with_context(|| format!("Failed to load presets from {}", path.display()))?;
    Ok(table)
}

fn parse_formats(values: &[String]) -> Result<Vec<ExportFormat>> {
    let formats = values
        .iter()
        .map(|value| value.parse::<ExportFormat>())
        .collect::<std::result::Result<Vec<_>, PlanError>>()?;
    Ok(unique_formats(&formats))
}

fn finish(report: &ExportReport) -> ExitCode {
    for path in &report.written {
        info!("Generated: {}", path.display());
    }

    if report.is_complete() {
        info!("Generation complete: {} file(s)", report.written.len());
        return ExitCode::SUCCESS;
    }

    if !report.errors.is_empty() {
        for err in &report.errors {
            error!("{}", err);
        }
        error!("Plan failed checks, nothing was exported");
        return ExitCode::from(1);
    }

    for failure in &report.failures {
        error!("{}", failure);
    }
    error!(
        "{} of {} export(s) failed",
        report.failures.len(),
        report.failures.len() + report.written.len()
    );
    ExitCode::from(1)
}
