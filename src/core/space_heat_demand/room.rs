use crate::core::heating_systems::emitters::{
    mean_system_temperature, resolve_system_temperatures, Suitability,
};
use crate::core::space_heat_demand::building_element::{ElementConductances, Envelope};
use crate::core::space_heat_demand::ventilation::ventilation_heat_loss;
use crate::errors::InputError;
use crate::input::{GlobalParameters, HeatingSurfaceType, RoomInput};
use serde::Serialize;
use tracing::{debug, warn};

// This module provides the steady-state design heat load of a single room, made up of
// transmission losses through the envelope and ventilation losses, plus a safety margin.

/// A room together with every value derived for it in a calculation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoomResult {
    /// the room as supplied by the caller
    pub room: RoomInput,
    /// unit count with the default applied
    pub unit_count: u32,
    /// in deg C
    pub indoor_temperature: f64,
    /// in m3
    pub volume: f64,
    /// indoor minus outdoor design temperature, in K
    pub temp_diff: f64,
    /// envelope after the upper boundary rule has been applied
    pub envelope: Envelope,
    /// in W/K
    pub conductances: ElementConductances,
    /// in W/K
    pub total_conductance: f64,
    /// in W
    pub transmission_loss: f64,
    /// in W
    pub ventilation_loss: f64,
    /// in W
    pub load_before_margin: f64,
    /// in W
    pub load_after_margin: f64,
    /// in deg C
    pub supply_temperature: Option<f64>,
    /// in deg C
    pub return_temperature: Option<f64>,
    /// in deg C
    pub mean_system_temperature: Option<f64>,
    pub suitability: Suitability,
}

impl RoomResult {
    pub fn name(&self) -> &str {
        &self.room.name
    }

    pub fn apartment_type(&self) -> Option<&str> {
        self.room.apartment_type.as_deref()
    }
}

/// Check one row of the room dataset before any calculation takes place.
///
/// Arguments:
/// * `index` - position of the row in the dataset, used to identify it in errors
/// * `room`
pub fn validate_room(index: usize, room: &RoomInput) -> Result<(), InputError> {
    let finite = |field: &'static str, value: f64| -> Result<(), InputError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(InputError::NonFiniteRoomValue {
                index,
                room: room.name.clone(),
                field,
                value,
            })
        }
    };
    let positive = |field: &'static str, value: f64| -> Result<(), InputError> {
        finite(field, value)?;
        if value > 0. {
            Ok(())
        } else {
            Err(InputError::NonPositiveRoomValue {
                index,
                room: room.name.clone(),
                field,
                value,
            })
        }
    };
    let non_negative = |field: &'static str, value: f64| -> Result<(), InputError> {
        finite(field, value)?;
        if value >= 0. {
            Ok(())
        } else {
            Err(InputError::NegativeRoomValue {
                index,
                room: room.name.clone(),
                field,
                value,
            })
        }
    };

    positive("floor area", room.floor_area)?;
    positive("room height", room.room_height)?;
    non_negative("wall area", room.wall.area)?;
    non_negative("wall U-value", room.wall.u_value)?;
    non_negative("upper boundary area", room.upper_boundary.area)?;
    non_negative("upper boundary U-value", room.upper_boundary.u_value)?;
    non_negative("floor element area", room.floor.area)?;
    non_negative("floor element U-value", room.floor.u_value)?;
    non_negative("window area", room.window.area)?;
    non_negative("window U-value", room.window.u_value)?;
    non_negative("air change rate", room.air_change_rate)?;
    if let Some(temp) = room.indoor_temperature {
        finite("indoor temperature", temp)?;
    }
    if let Some(temp) = room.supply_temperature {
        finite("supply temperature", temp)?;
    }
    if let Some(temp) = room.return_temperature {
        finite("return temperature", temp)?;
    }
    if room.unit_count == Some(0) {
        return Err(InputError::ZeroUnitCount {
            index,
            room: room.name.clone(),
        });
    }

    Ok(())
}

/// Calculate the design heat load of a room.
///
/// A negative temperature difference (indoor target below the outdoor design
/// temperature) is not clamped and yields a negative load.
///
/// Arguments:
/// * `room` - a room that has passed `validate_room`
/// * `global_parameters` - outdoor design temperature, default indoor set-point and safety margin
pub fn calculate_room_load(room: &RoomInput, global_parameters: &GlobalParameters) -> RoomResult {
    let indoor_temperature = room
        .indoor_temperature
        .unwrap_or(global_parameters.default_indoor_temperature);
    let envelope = Envelope::for_room(room);

    let (supply_temperature, return_temperature) = resolve_system_temperatures(
        &room.heating_surface_type,
        room.supply_temperature,
        room.return_temperature,
    );
    if let HeatingSurfaceType::Other(name) = &room.heating_surface_type {
        if supply_temperature.is_none() || return_temperature.is_none() {
            warn!(
                "Heating surface type '{name}' of room '{}' is not in the catalog; its system temperature is unknown",
                room.name
            );
        }
    }

    let volume = room.floor_area * room.room_height;
    let temp_diff = indoor_temperature - global_parameters.outdoor_design_temperature;
    if temp_diff < 0. {
        warn!(
            "Room '{}' has an indoor temperature below the outdoor design temperature ({temp_diff} K); its load is negative",
            room.name
        );
    }

    let conductances = envelope.conductances();
    let total_conductance = conductances.total();
    let transmission_loss = total_conductance * temp_diff;
    let ventilation_loss = ventilation_heat_loss(room.air_change_rate, volume, temp_diff);

    let load_before_margin = transmission_loss + ventilation_loss;
    let load_after_margin = load_before_margin * (1. + global_parameters.safety_margin);

    let mean_system_temperature = mean_system_temperature(supply_temperature, return_temperature);
    let suitability = Suitability::from_mean_system_temperature(mean_system_temperature);

    debug!(
        room = room.name.as_str(),
        load_after_margin, "Calculated room heating load"
    );

    RoomResult {
        room: room.clone(),
        unit_count: room.unit_count.unwrap_or(1),
        indoor_temperature,
        volume,
        temp_diff,
        envelope,
        conductances,
        total_conductance,
        transmission_loss,
        ventilation_loss,
        load_before_margin,
        load_after_margin,
        supply_temperature,
        return_temperature,
        mean_system_temperature,
        suitability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{EnvelopeElementInput, UpperBoundaryType};
    use approx::{assert_relative_eq, assert_ulps_eq};
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn global_parameters() -> GlobalParameters {
        GlobalParameters {
            outdoor_design_temperature: -12.0,
            default_indoor_temperature: 20.0,
            safety_margin: 0.1,
        }
    }

    #[fixture]
    fn room() -> RoomInput {
        RoomInput {
            name: "Living".to_string(),
            apartment_type: None,
            unit_count: None,
            floor_area: 20.0,
            room_height: 2.5,
            indoor_temperature: Some(20.0),
            wall: EnvelopeElementInput {
                area: 15.0,
                u_value: 0.3,
            },
            upper_boundary: EnvelopeElementInput {
                area: 0.0,
                u_value: 0.2,
            },
            upper_boundary_type: UpperBoundaryType::RoofToOutsideAir,
            floor: EnvelopeElementInput {
                area: 20.0,
                u_value: 0.3,
            },
            window: EnvelopeElementInput {
                area: 4.0,
                u_value: 1.3,
            },
            air_change_rate: 0.5,
            heating_surface_type: HeatingSurfaceType::FloorHeating,
            supply_temperature: None,
            return_temperature: None,
        }
    }

    #[rstest]
    fn should_calc_reference_room_load(room: RoomInput, global_parameters: GlobalParameters) {
        let result = calculate_room_load(&room, &global_parameters);

        assert_eq!(result.temp_diff, 32.0);
        assert_relative_eq!(result.total_conductance, 15.7, max_relative = 1e-12);
        assert_relative_eq!(result.transmission_loss, 502.4, max_relative = 1e-12);
        assert_eq!(result.volume, 50.0);
        assert_relative_eq!(result.ventilation_loss, 264.0, max_relative = 1e-12);
        assert_relative_eq!(result.load_before_margin, 766.4, max_relative = 1e-12);
        assert_relative_eq!(result.load_after_margin, 843.04, max_relative = 1e-12);
        assert_eq!(result.unit_count, 1);
    }

    #[rstest]
    fn should_default_indoor_temperature(room: RoomInput, global_parameters: GlobalParameters) {
        let room = RoomInput {
            indoor_temperature: None,
            ..room
        };
        let params = GlobalParameters {
            default_indoor_temperature: 18.0,
            ..global_parameters
        };
        let result = calculate_room_load(&room, &params);

        assert_eq!(result.indoor_temperature, 18.0);
        assert_eq!(result.temp_diff, 30.0);
    }

    #[rstest]
    fn should_have_zero_load_without_temp_diff(room: RoomInput) {
        for safety_margin in [0.0, 0.1, 0.5] {
            let params = GlobalParameters {
                outdoor_design_temperature: 20.0,
                default_indoor_temperature: 20.0,
                safety_margin,
            };
            let result = calculate_room_load(&room, &params);

            assert_eq!(result.transmission_loss, 0.0);
            assert_eq!(result.ventilation_loss, 0.0);
            assert_eq!(result.load_after_margin, 0.0);
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.05)]
    #[case(0.15)]
    fn should_apply_safety_margin(
        room: RoomInput,
        global_parameters: GlobalParameters,
        #[case] safety_margin: f64,
    ) {
        let params = GlobalParameters {
            safety_margin,
            ..global_parameters
        };
        let result = calculate_room_load(&room, &params);

        assert_ulps_eq!(
            result.load_after_margin,
            result.load_before_margin * (1. + safety_margin)
        );
        if safety_margin == 0.0 {
            assert_eq!(result.load_after_margin, result.load_before_margin);
        }
    }

    #[rstest]
    fn should_not_clamp_negative_temp_diff(room: RoomInput, global_parameters: GlobalParameters) {
        let params = GlobalParameters {
            outdoor_design_temperature: 22.0,
            ..global_parameters
        };
        let result = calculate_room_load(&room, &params);

        assert_eq!(result.temp_diff, -2.0);
        assert!(result.transmission_loss < 0.0);
        assert!(result.load_after_margin < 0.0);
    }

    #[rstest]
    fn should_ignore_upper_boundary_against_heated_space(
        room: RoomInput,
        global_parameters: GlobalParameters,
    ) {
        let roof = RoomInput {
            upper_boundary: EnvelopeElementInput {
                area: 20.0,
                u_value: 0.2,
            },
            ..room.clone()
        };
        let ceiling = RoomInput {
            upper_boundary_type: UpperBoundaryType::CeilingToHeatedSpace,
            ..roof.clone()
        };

        let roof_result = calculate_room_load(&roof, &global_parameters);
        let ceiling_result = calculate_room_load(&ceiling, &global_parameters);
        let reference = calculate_room_load(&room, &global_parameters);

        assert_relative_eq!(roof_result.conductances.upper_boundary, 4.0);
        assert_eq!(ceiling_result.conductances.upper_boundary, 0.0);
        assert_eq!(ceiling_result.envelope.upper_boundary.area, 0.0);
        assert_eq!(ceiling_result.room.upper_boundary.area, 20.0);
        assert_eq!(ceiling_result.load_after_margin, reference.load_after_margin);
    }

    #[rstest]
    fn should_default_system_temperatures_from_catalog(
        room: RoomInput,
        global_parameters: GlobalParameters,
    ) {
        let result = calculate_room_load(&room, &global_parameters);

        assert_eq!(result.supply_temperature, Some(35.0));
        assert_eq!(result.return_temperature, Some(28.0));
        assert_eq!(result.mean_system_temperature, Some(31.5));
        assert_eq!(result.suitability, Suitability::VeryGood);
    }

    #[rstest]
    fn should_prefer_stated_system_temperatures(
        room: RoomInput,
        global_parameters: GlobalParameters,
    ) {
        let room = RoomInput {
            heating_surface_type: HeatingSurfaceType::StandardRadiator,
            supply_temperature: Some(55.0),
            return_temperature: Some(45.0),
            ..room
        };
        let result = calculate_room_load(&room, &global_parameters);

        assert_eq!(result.mean_system_temperature, Some(50.0));
        assert_eq!(result.suitability, Suitability::Limited);
    }

    #[rstest]
    fn should_degrade_to_unknown_suitability_for_unknown_heating_surface(
        room: RoomInput,
        global_parameters: GlobalParameters,
    ) {
        let room = RoomInput {
            heating_surface_type: HeatingSurfaceType::Other("convector".into()),
            ..room
        };
        let result = calculate_room_load(&room, &global_parameters);

        assert_eq!(result.mean_system_temperature, None);
        assert_eq!(result.suitability, Suitability::Unknown);
        assert_relative_eq!(result.load_after_margin, 843.04, max_relative = 1e-12);
    }

    #[rstest]
    fn should_accept_valid_room(room: RoomInput) {
        assert_eq!(validate_room(0, &room), Ok(()));
    }

    #[rstest]
    fn should_reject_non_positive_floor_area(room: RoomInput) {
        let room = RoomInput {
            floor_area: 0.0,
            ..room
        };

        assert_eq!(
            validate_room(3, &room),
            Err(InputError::NonPositiveRoomValue {
                index: 3,
                room: "Living".into(),
                field: "floor area",
                value: 0.0,
            })
        );
    }

    #[rstest]
    fn should_reject_negative_room_height(room: RoomInput) {
        let room = RoomInput {
            room_height: -2.5,
            ..room
        };

        assert!(matches!(
            validate_room(0, &room),
            Err(InputError::NonPositiveRoomValue {
                field: "room height",
                ..
            })
        ));
    }

    #[rstest]
    fn should_reject_negative_u_value(room: RoomInput) {
        let room = RoomInput {
            window: EnvelopeElementInput {
                area: 4.0,
                u_value: -1.3,
            },
            ..room
        };

        assert!(matches!(
            validate_room(0, &room),
            Err(InputError::NegativeRoomValue {
                field: "window U-value",
                ..
            })
        ));
    }

    #[rstest]
    fn should_reject_non_finite_values(room: RoomInput) {
        let room = RoomInput {
            air_change_rate: f64::NAN,
            ..room
        };

        assert!(matches!(
            validate_room(0, &room),
            Err(InputError::NonFiniteRoomValue {
                field: "air change rate",
                ..
            })
        ));
    }

    #[rstest]
    fn should_reject_zero_unit_count(room: RoomInput) {
        let room = RoomInput {
            unit_count: Some(0),
            ..room
        };

        assert_eq!(
            validate_room(1, &room),
            Err(InputError::ZeroUnitCount {
                index: 1,
                room: "Living".into()
            })
        );
    }
}
