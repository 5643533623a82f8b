use crate::input::{EnvelopeElementInput, GlobalParameters, Input};
use crate::wrappers::InputWrapper;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tracing::info;

/// Typical fabric standard of a building, used to fill in U-values and climate
/// parameters where the details are not known.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, PartialEq, Serialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum BuildingProfile {
    #[strum(serialize = "new build (efficiency house)")]
    NewBuild,
    #[strum(serialize = "existing, refurbished")]
    Refurbished,
    #[strum(serialize = "old building, unrefurbished")]
    UnrefurbishedOld,
}

/// U-values of the envelope elements, in W/(m2.K)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UValueProfile {
    pub wall: f64,
    pub upper_boundary: f64,
    pub floor: f64,
    pub window: f64,
}

impl BuildingProfile {
    pub fn u_values(&self) -> UValueProfile {
        match self {
            BuildingProfile::NewBuild => UValueProfile {
                wall: 0.20,
                upper_boundary: 0.14,
                floor: 0.25,
                window: 0.90,
            },
            BuildingProfile::Refurbished => UValueProfile {
                wall: 0.35,
                upper_boundary: 0.25,
                floor: 0.40,
                window: 1.30,
            },
            BuildingProfile::UnrefurbishedOld => UValueProfile {
                wall: 1.20,
                upper_boundary: 0.80,
                floor: 0.80,
                window: 2.70,
            },
        }
    }

    /// Recommended outdoor design temperature, indoor set-point and safety margin
    pub fn recommended_global_parameters(&self) -> GlobalParameters {
        let (outdoor_design_temperature, default_indoor_temperature, safety_percentage) =
            match self {
                BuildingProfile::NewBuild => (-12.0, 21.0, 5.0),
                BuildingProfile::Refurbished => (-12.0, 20.0, 10.0),
                BuildingProfile::UnrefurbishedOld => (-14.0, 21.0, 15.0),
            };

        GlobalParameters {
            outdoor_design_temperature,
            default_indoor_temperature,
            safety_margin: safety_percentage / 100.,
        }
    }
}

/// Simplified reference table of design outdoor temperatures by climate region.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, PartialEq, Serialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ClimateRegion {
    #[strum(serialize = "Northern Germany (coast)")]
    NorthernCoast,
    #[strum(serialize = "Central Germany / NRW / Hesse")]
    Central,
    #[strum(serialize = "Southern Germany / Bavaria / Baden-Wuerttemberg")]
    Southern,
    #[strum(serialize = "Low mountain ranges / Alpine foothills")]
    Upland,
}

impl ClimateRegion {
    /// in deg C
    pub fn outdoor_design_temperature(&self) -> f64 {
        match self {
            ClimateRegion::NorthernCoast => -10.0,
            ClimateRegion::Central => -12.0,
            ClimateRegion::Southern => -14.0,
            ClimateRegion::Upland => -16.0,
        }
    }
}

/// Overwrites the U-values of every room with those of a building profile and,
/// optionally, the global parameters with the profile's recommended ones.
pub(crate) struct BuildingProfileWrapper {
    profile: BuildingProfile,
    apply_recommended_climate: bool,
}

impl BuildingProfileWrapper {
    pub(crate) fn new(profile: BuildingProfile, apply_recommended_climate: bool) -> Self {
        Self {
            profile,
            apply_recommended_climate,
        }
    }
}

impl InputWrapper for BuildingProfileWrapper {
    fn apply_preprocessing(&self, mut input: Input) -> anyhow::Result<Input> {
        let u_values = self.profile.u_values();
        let with_u_value = |element: EnvelopeElementInput, u_value: f64| EnvelopeElementInput {
            u_value,
            ..element
        };

        for room in input.rooms.iter_mut() {
            room.wall = with_u_value(room.wall, u_values.wall);
            room.upper_boundary = with_u_value(room.upper_boundary, u_values.upper_boundary);
            room.floor = with_u_value(room.floor, u_values.floor);
            room.window = with_u_value(room.window, u_values.window);
        }
        info!(
            "Applied U-values of building profile '{}' to {} rooms",
            self.profile,
            input.rooms.len()
        );

        if self.apply_recommended_climate {
            input.global_parameters = self.profile.recommended_global_parameters();
            info!(
                "Applied recommended climate parameters of building profile '{}'",
                self.profile
            );
        }

        Ok(input)
    }
}

/// Overwrites the outdoor design temperature with the reference value of a climate region.
pub(crate) struct ClimateRegionWrapper {
    region: ClimateRegion,
}

impl ClimateRegionWrapper {
    pub(crate) fn new(region: ClimateRegion) -> Self {
        Self { region }
    }
}

impl InputWrapper for ClimateRegionWrapper {
    fn apply_preprocessing(&self, mut input: Input) -> anyhow::Result<Input> {
        input.global_parameters.outdoor_design_temperature =
            self.region.outdoor_design_temperature();
        info!(
            "Applied outdoor design temperature of {} deg C for climate region '{}'",
            input.global_parameters.outdoor_design_temperature, self.region
        );

        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{AnalysisLevel, HeatingSurfaceType, RoomInput, UpperBoundaryType};
    use pretty_assertions::assert_eq;
    use rstest::*;
    use strum::IntoEnumIterator;

    #[fixture]
    fn input() -> Input {
        let element = |area: f64| EnvelopeElementInput {
            area,
            u_value: 9.9,
        };
        Input {
            global_parameters: GlobalParameters {
                outdoor_design_temperature: -8.0,
                default_indoor_temperature: 22.0,
                safety_margin: 0.0,
            },
            analysis_level: AnalysisLevel::Basic,
            rooms: vec![RoomInput {
                name: "Living".into(),
                apartment_type: None,
                unit_count: None,
                floor_area: 25.0,
                room_height: 2.6,
                indoor_temperature: None,
                wall: element(18.0),
                upper_boundary: element(25.0),
                upper_boundary_type: UpperBoundaryType::RoofToOutsideAir,
                floor: element(25.0),
                window: element(5.0),
                air_change_rate: 0.7,
                heating_surface_type: HeatingSurfaceType::StandardRadiator,
                supply_temperature: None,
                return_temperature: None,
            }],
            heat_pump: None,
        }
    }

    #[rstest]
    fn should_apply_profile_u_values_and_keep_areas(input: Input) {
        let wrapper = BuildingProfileWrapper::new(BuildingProfile::UnrefurbishedOld, false);
        let output = wrapper.apply_preprocessing(input.clone()).unwrap();
        let room = &output.rooms[0];

        assert_eq!(room.wall.u_value, 1.20);
        assert_eq!(room.upper_boundary.u_value, 0.80);
        assert_eq!(room.floor.u_value, 0.80);
        assert_eq!(room.window.u_value, 2.70);
        assert_eq!(room.wall.area, 18.0);
        assert_eq!(room.window.area, 5.0);
        assert_eq!(output.global_parameters, input.global_parameters);
    }

    #[rstest]
    fn should_apply_recommended_climate_when_requested(input: Input) {
        let wrapper = BuildingProfileWrapper::new(BuildingProfile::NewBuild, true);
        let output = wrapper.apply_preprocessing(input).unwrap();

        assert_eq!(
            output.global_parameters,
            GlobalParameters {
                outdoor_design_temperature: -12.0,
                default_indoor_temperature: 21.0,
                safety_margin: 0.05,
            }
        );
        assert_eq!(output.rooms[0].window.u_value, 0.90);
    }

    #[rstest]
    fn should_recommend_climate_parameters_per_profile() {
        let refurbished = BuildingProfile::Refurbished.recommended_global_parameters();
        assert_eq!(refurbished.outdoor_design_temperature, -12.0);
        assert_eq!(refurbished.default_indoor_temperature, 20.0);
        assert_eq!(refurbished.safety_margin, 0.1);

        let old = BuildingProfile::UnrefurbishedOld.recommended_global_parameters();
        assert_eq!(old.outdoor_design_temperature, -14.0);
        assert_eq!(old.safety_margin, 0.15);
    }

    #[rstest]
    fn should_apply_outdoor_design_temperature_of_climate_region(input: Input) {
        let wrapper = ClimateRegionWrapper::new(ClimateRegion::Upland);
        let output = wrapper.apply_preprocessing(input.clone()).unwrap();

        assert_eq!(output.global_parameters.outdoor_design_temperature, -16.0);
        assert_eq!(output.global_parameters.default_indoor_temperature, 22.0);
        assert_eq!(output.global_parameters.safety_margin, 0.0);
        assert_eq!(output.rooms, input.rooms);
    }

    #[rstest]
    fn should_have_colder_design_temperatures_further_south_and_higher() {
        let temps: Vec<f64> = ClimateRegion::iter()
            .map(|region| region.outdoor_design_temperature())
            .collect();

        assert_eq!(temps, vec![-10.0, -12.0, -14.0, -16.0]);
    }
}
