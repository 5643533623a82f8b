extern crate heatload;

use anyhow::Context;
use clap::Parser;
use heatload::output::FileOutput;
use heatload::{run_project, BuildingProfile, ClimateRegion, PreprocessingOptions};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct HeatLoadArgs {
    input_file: String,
    /// directory for the result files, defaults to the directory of the input file
    #[arg(long, short)]
    output_dir: Option<PathBuf>,
    /// overwrite all U-values with those of a typical building profile
    #[arg(long, short, value_enum)]
    building_profile: Option<BuildingProfile>,
    /// also use the recommended climate parameters of the building profile
    #[arg(long, requires = "building_profile", default_value_t = false)]
    apply_recommended_climate: bool,
    /// use the reference outdoor design temperature of a climate region
    #[arg(long, short, value_enum)]
    climate_region: Option<ClimateRegion>,
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = HeatLoadArgs::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let input_file = Path::new(args.input_file.as_str());
    let input_file_stem = input_file
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("heatload");
    let output_dir = match args.output_dir {
        Some(dir) => dir,
        None => input_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Could not create output directory {output_dir:?}"))?;

    let output = FileOutput::new(output_dir, format!("{input_file_stem}__{{}}.{{}}"));

    let input = BufReader::new(
        File::open(input_file).with_context(|| format!("Could not open {input_file:?}"))?,
    );

    let results = run_project(
        input,
        &output,
        PreprocessingOptions {
            building_profile: args.building_profile,
            apply_recommended_climate: args.apply_recommended_climate,
            climate_region: args.climate_region,
        },
    )?;

    let summary = &results.summary;
    println!(
        "{} rooms, {} apartment types: building heating load {:.2} kW",
        results.rooms.len(),
        results.apartment_types.len(),
        summary.total_load_kw
    );
    if let Some(assessment) = &results.heat_pump {
        println!(
            "heat pump {} at {:.1} kW covers {:.0}% of the load ({})",
            assessment.heat_pump_type,
            assessment.nominal_power_kw,
            assessment.coverage_percentage,
            assessment.coverage_tier
        );
    }

    Ok(())
}
