mod compare_floats;
pub mod core;
pub mod corpus;
pub mod errors;
pub mod input;
pub mod output;
pub mod output_writer;
mod statistics;
mod wrappers;

pub use crate::corpus::CalculationResults;
use crate::corpus::Corpus;
use crate::errors::{HeatLoadError, OutputError};
use crate::input::{ingest_for_processing, Input};
use crate::output::Output;
use crate::output_writer::write_results;
pub use crate::wrappers::building_profiles::{BuildingProfile, ClimateRegion};
use crate::wrappers::{ChosenWrapper, InputWrapper};
use std::io::Read;
use tracing::info;

/// Optional preprocessing of a request before it is calculated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PreprocessingOptions {
    /// overwrite the U-values of every room with those of this profile
    pub building_profile: Option<BuildingProfile>,
    /// also overwrite the global parameters with the profile's recommended ones
    pub apply_recommended_climate: bool,
    /// overwrite the outdoor design temperature with this region's reference value
    pub climate_region: Option<ClimateRegion>,
}

/// Read a JSON request, calculate it and write the results to the given output.
///
/// Arguments:
/// * `input` - JSON calculation request
/// * `output` - destination of the rooms, apartment types and summary files
/// * `options` - preprocessing to apply before calculation
pub fn run_project(
    input: impl Read,
    output: impl Output,
    options: PreprocessingOptions,
) -> Result<CalculationResults, HeatLoadError> {
    let input = ingest_for_processing(input)?;

    let results = calculate(input, options)?;

    write_results(&output, &results)
        .map_err(|e| HeatLoadError::ErrorInOutput(OutputError::new(e)))?;

    Ok(results)
}

/// Calculate an already deserialised request. No results are produced unless the
/// whole request is valid.
pub fn calculate(
    input: Input,
    options: PreprocessingOptions,
) -> Result<CalculationResults, HeatLoadError> {
    let input = ChosenWrapper::for_options(&options)
        .iter()
        .try_fold(input, |input, wrapper| wrapper.apply_preprocessing(input))?;

    let corpus = Corpus::from_inputs(input)?;
    info!("Input validated, running calculation");

    Ok(corpus.run())
}
