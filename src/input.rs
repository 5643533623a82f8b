use serde::{Deserialize, Serialize};
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use std::io::{BufReader, Read};
use strum_macros::{Display, EnumIter};

pub fn ingest_for_processing(json: impl Read) -> Result<Input, anyhow::Error> {
    let input: Input = serde_json::from_reader(BufReader::new(json))?;

    Ok(input)
}

/// A complete calculation request: global climate/safety parameters, the room
/// dataset and (optionally) a heat pump to evaluate against the building load.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Input {
    pub global_parameters: GlobalParameters,
    #[serde(default)]
    pub analysis_level: AnalysisLevel,
    pub rooms: Vec<RoomInput>,
    pub heat_pump: Option<HeatPumpInput>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalParameters {
    /// design outdoor temperature, in deg C
    pub outdoor_design_temperature: f64,
    /// indoor set-point used for rooms that do not state their own, in deg C
    pub default_indoor_temperature: f64,
    /// safety margin as a fraction of the calculated load (0.1 = 10%)
    pub safety_margin: f64,
}

impl Default for GlobalParameters {
    fn default() -> Self {
        Self {
            outdoor_design_temperature: -12.0,
            default_indoor_temperature: 20.0,
            safety_margin: 0.1,
        }
    }
}

/// Depth of the analysis requested by the caller.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AnalysisLevel {
    /// room, apartment type and building heating loads only
    Basic,
    /// additionally reports heating surface system temperatures and suitability
    SystemTemperatures,
    /// additionally evaluates the heat pump against the building load
    #[default]
    HeatPump,
}

impl AnalysisLevel {
    pub fn includes_system_temperatures(&self) -> bool {
        matches!(
            self,
            AnalysisLevel::SystemTemperatures | AnalysisLevel::HeatPump
        )
    }

    pub fn includes_heat_pump(&self) -> bool {
        matches!(self, AnalysisLevel::HeatPump)
    }
}

/// One row of the room dataset. Where the building is described by apartment types,
/// each row is a room of the representative unit of its type.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoomInput {
    pub name: String,
    pub apartment_type: Option<String>,
    /// number of physically identical units of this apartment type in the building
    pub unit_count: Option<u32>,
    /// in m2
    pub floor_area: f64,
    /// in m
    pub room_height: f64,
    /// in deg C
    pub indoor_temperature: Option<f64>,
    pub wall: EnvelopeElementInput,
    pub upper_boundary: EnvelopeElementInput,
    pub upper_boundary_type: UpperBoundaryType,
    pub floor: EnvelopeElementInput,
    pub window: EnvelopeElementInput,
    /// in air changes per hour
    pub air_change_rate: f64,
    pub heating_surface_type: HeatingSurfaceType,
    /// design supply (flow) temperature, in deg C
    pub supply_temperature: Option<f64>,
    /// design return temperature, in deg C
    pub return_temperature: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvelopeElementInput {
    /// in m2
    pub area: f64,
    /// in W/(m2.K)
    pub u_value: f64,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum UpperBoundaryType {
    #[serde(rename = "roof to outside air")]
    #[strum(serialize = "roof to outside air")]
    RoofToOutsideAir,
    #[serde(rename = "ceiling to heated space")]
    #[strum(serialize = "ceiling to heated space")]
    CeilingToHeatedSpace,
    #[serde(rename = "ceiling to unheated space")]
    #[strum(serialize = "ceiling to unheated space")]
    CeilingToUnheatedSpace,
}

impl UpperBoundaryType {
    /// Whether losses through the upper boundary are counted at all.
    pub fn is_loss_surface(&self) -> bool {
        !matches!(self, UpperBoundaryType::CeilingToHeatedSpace)
    }
}

/// Heating surface (emitter) type of a room. Names that are not known to the
/// catalog are carried through as `Other` so that the room can still be calculated.
#[derive(Clone, Debug, Deserialize_enum_str, Eq, Hash, PartialEq, Serialize_enum_str)]
pub enum HeatingSurfaceType {
    #[serde(rename = "floor heating")]
    FloorHeating,
    #[serde(rename = "wall/ceiling heating")]
    WallCeilingHeating,
    #[serde(rename = "low-temperature radiator")]
    LowTemperatureRadiator,
    #[serde(rename = "standard radiator")]
    StandardRadiator,
    #[serde(rename = "old-building radiator")]
    OldBuildingRadiator,
    #[serde(other)]
    Other(String),
}

impl HeatingSurfaceType {
    pub fn name(&self) -> &str {
        match self {
            HeatingSurfaceType::FloorHeating => "floor heating",
            HeatingSurfaceType::WallCeilingHeating => "wall/ceiling heating",
            HeatingSurfaceType::LowTemperatureRadiator => "low-temperature radiator",
            HeatingSurfaceType::StandardRadiator => "standard radiator",
            HeatingSurfaceType::OldBuildingRadiator => "old-building radiator",
            HeatingSurfaceType::Other(name) => name,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HeatPumpInput {
    pub heat_pump_type: HeatPumpType,
    /// nominal heating power at the design point, in kW
    pub nominal_power_kw: f64,
    /// annual heat demand of the building, in kWh
    #[serde(default)]
    pub annual_heat_demand_kwh: f64,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, PartialEq, Serialize)]
pub enum HeatPumpType {
    #[serde(rename = "air/water")]
    #[strum(serialize = "air/water")]
    AirWater,
    #[serde(rename = "brine/water")]
    #[strum(serialize = "brine/water")]
    BrineWater,
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    None,
}
