use crate::core::apartment_types::{
    aggregate_apartment_types, summarise_building, BuildingSummary, TypeAggregate,
};
use crate::core::heating_systems::heat_pump::{assess_heat_pump, HeatPumpAssessment};
use crate::core::space_heat_demand::room::{calculate_room_load, validate_room, RoomResult};
use crate::errors::InputError;
use crate::input::{AnalysisLevel, GlobalParameters, HeatPumpInput, Input, RoomInput};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

/// Outdoor design temperatures outside this range are unusual enough to be worth a warning
const PLAUSIBLE_OUTDOOR_DESIGN_TEMPERATURES: std::ops::RangeInclusive<f64> = -25.0..=5.0;

/// A validated calculation request, ready to be run.
#[derive(Clone, Debug)]
pub struct Corpus {
    global_parameters: GlobalParameters,
    analysis_level: AnalysisLevel,
    rooms: Vec<RoomInput>,
    heat_pump: Option<HeatPumpInput>,
}

/// Everything produced by one calculation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationResults {
    pub global_parameters: GlobalParameters,
    pub analysis_level: AnalysisLevel,
    pub rooms: Vec<RoomResult>,
    pub apartment_types: Vec<TypeAggregate>,
    pub summary: BuildingSummary,
    pub heat_pump: Option<HeatPumpAssessment>,
}

impl Corpus {
    /// Validate every part of the input. The first invalid value rejects the whole request.
    pub fn from_inputs(input: Input) -> Result<Self, InputError> {
        let Input {
            global_parameters,
            analysis_level,
            rooms,
            heat_pump,
        } = input;

        validate_global_parameters(&global_parameters)?;
        for (index, room) in rooms.iter().enumerate() {
            validate_room(index, room)?;
        }
        if let Some(heat_pump) = &heat_pump {
            validate_heat_pump(heat_pump)?;
        }

        if !PLAUSIBLE_OUTDOOR_DESIGN_TEMPERATURES
            .contains(&global_parameters.outdoor_design_temperature)
        {
            warn!(
                "Outdoor design temperature of {} deg C is outside the usual range of {} to {} deg C",
                global_parameters.outdoor_design_temperature,
                PLAUSIBLE_OUTDOOR_DESIGN_TEMPERATURES.start(),
                PLAUSIBLE_OUTDOOR_DESIGN_TEMPERATURES.end(),
            );
        }

        Ok(Self {
            global_parameters,
            analysis_level,
            rooms,
            heat_pump,
        })
    }

    /// Run the calculation: room loads, then apartment type and building aggregation,
    /// then (at heat pump analysis level) the heat pump assessment.
    pub fn run(&self) -> CalculationResults {
        let rooms = calculate_room_dataset(&self.rooms, &self.global_parameters);
        let apartment_types = aggregate_apartment_types(&rooms);
        let summary = summarise_building(&rooms, &apartment_types);

        info!(
            rooms = rooms.len(),
            apartment_types = apartment_types.len(),
            total_load_kw = summary.total_load_kw,
            "Calculated building heating load"
        );

        let heat_pump = match (&self.heat_pump, self.analysis_level.includes_heat_pump()) {
            (Some(heat_pump), true) => assess_heat_pump(
                heat_pump,
                summary.total_load,
                summary.weighted_mean_system_temperature,
                summary.limited_or_critical_load_share,
            ),
            _ => None,
        };

        CalculationResults {
            global_parameters: self.global_parameters,
            analysis_level: self.analysis_level,
            rooms,
            apartment_types,
            summary,
            heat_pump,
        }
    }
}

/// Calculate every room of a dataset. Rooms are independent of one another, so are
/// calculated in parallel; results keep the order of the input rows.
pub fn calculate_room_dataset(
    rooms: &[RoomInput],
    global_parameters: &GlobalParameters,
) -> Vec<RoomResult> {
    rooms
        .par_iter()
        .map(|room| calculate_room_load(room, global_parameters))
        .collect()
}

fn validate_global_parameters(global_parameters: &GlobalParameters) -> Result<(), InputError> {
    for (field, value) in [
        (
            "outdoor design temperature",
            global_parameters.outdoor_design_temperature,
        ),
        (
            "default indoor temperature",
            global_parameters.default_indoor_temperature,
        ),
        ("safety margin", global_parameters.safety_margin),
    ] {
        if !value.is_finite() {
            return Err(InputError::NonFiniteGlobalParameter { field, value });
        }
    }

    Ok(())
}

fn validate_heat_pump(heat_pump: &HeatPumpInput) -> Result<(), InputError> {
    for (field, value) in [
        ("nominal power", heat_pump.nominal_power_kw),
        ("annual heat demand", heat_pump.annual_heat_demand_kwh),
    ] {
        if !(value.is_finite() && value >= 0.) {
            return Err(InputError::InvalidHeatPumpValue { field, value });
        }
    }

    Ok(())
}
