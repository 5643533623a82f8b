use crate::compare_floats::max_of_2;
use crate::core::space_heat_demand::room::RoomResult;
use crate::core::units::{percentage_of, watts_to_kilowatts};
use crate::statistics::weighted_mean;
use indexmap::IndexMap;
use serde::Serialize;

// This module rolls room loads up to apartment types and to the whole building.
// Each apartment type is described by the rooms of one representative unit and a
// count of physically identical units of that type.

/// Label reported for rooms that are not assigned to an apartment type
pub const IMPLICIT_APARTMENT_TYPE_LABEL: &str = "(all rooms)";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeAggregate {
    /// None for the implicit type made up of all unlabelled rooms
    pub apartment_type: Option<String>,
    pub unit_count: u32,
    /// load of one representative unit, in W
    pub load_per_unit: f64,
    pub load_per_unit_kw: f64,
    /// load of all units of this type, in W
    pub type_building_load: f64,
    pub type_building_load_kw: f64,
    /// in deg C
    pub weighted_mean_system_temperature: Option<f64>,
}

impl TypeAggregate {
    pub fn label(&self) -> &str {
        self.apartment_type
            .as_deref()
            .unwrap_or(IMPLICIT_APARTMENT_TYPE_LABEL)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuildingSummary {
    /// in W
    pub total_load: f64,
    pub total_load_kw: f64,
    /// in deg C
    pub weighted_mean_system_temperature: Option<f64>,
    /// percentage of the building load in rooms of limited or critical heat pump suitability
    pub limited_or_critical_load_share: f64,
}

fn apartment_type_key(room: &RoomResult) -> Option<&str> {
    room.apartment_type()
        .map(str::trim)
        .filter(|label| !label.is_empty())
}

/// Group rooms by apartment type, ordered by label with the implicit type first.
fn group_by_apartment_type(rooms: &[RoomResult]) -> IndexMap<Option<&str>, Vec<&RoomResult>> {
    let mut groups: IndexMap<Option<&str>, Vec<&RoomResult>> = IndexMap::new();
    for room in rooms {
        groups.entry(apartment_type_key(room)).or_default().push(room);
    }
    groups.sort_keys();

    groups
}

/// Aggregate room results into one row per apartment type.
///
/// The unit count of a type is the largest unit count stated on any of its rooms, as
/// all rooms of a type belong to the same representative unit.
pub fn aggregate_apartment_types(rooms: &[RoomResult]) -> Vec<TypeAggregate> {
    group_by_apartment_type(rooms)
        .into_iter()
        .map(|(apartment_type, group)| {
            let unit_count = group
                .iter()
                .fold(1, |count, room| max_of_2(count, room.unit_count));
            let load_per_unit = group
                .iter()
                .fold(0., |load, room| load + room.load_after_margin);
            let type_building_load = load_per_unit * unit_count as f64;
            let weighted_mean_system_temperature = weighted_mean(
                group
                    .iter()
                    .filter_map(|room| {
                        room.mean_system_temperature
                            .map(|temp| (temp, room.load_after_margin * unit_count as f64))
                    }),
            );

            TypeAggregate {
                apartment_type: apartment_type.map(str::to_owned),
                unit_count,
                load_per_unit,
                load_per_unit_kw: watts_to_kilowatts(load_per_unit),
                type_building_load,
                type_building_load_kw: watts_to_kilowatts(type_building_load),
                weighted_mean_system_temperature,
            }
        })
        .collect()
}

/// Pair each room with its load replicated across all identical units of its type, in W.
fn replicated_room_loads<'a>(
    rooms: &'a [RoomResult],
    apartment_types: &[TypeAggregate],
) -> Vec<(&'a RoomResult, f64)> {
    let unit_counts: IndexMap<Option<&str>, u32> = apartment_types
        .iter()
        .map(|aggregate| (aggregate.apartment_type.as_deref(), aggregate.unit_count))
        .collect();

    rooms
        .iter()
        .map(|room| {
            let unit_count = unit_counts
                .get(&apartment_type_key(room))
                .copied()
                .unwrap_or(room.unit_count);
            (room, room.load_after_margin * unit_count as f64)
        })
        .collect()
}

/// Building-wide totals over the apartment types.
///
/// The weighted mean system temperature weights each room by its replicated load and
/// leaves out rooms with an unknown mean temperature or no positive load. The limited or
/// critical share is zero where there are no such rooms or the building load is not positive.
pub fn summarise_building(
    rooms: &[RoomResult],
    apartment_types: &[TypeAggregate],
) -> BuildingSummary {
    let total_load = apartment_types
        .iter()
        .fold(0., |load, aggregate| load + aggregate.type_building_load);
    let replicated_loads = replicated_room_loads(rooms, apartment_types);

    let weighted_mean_system_temperature = weighted_mean(
        replicated_loads
            .iter()
            .filter_map(|(room, load)| room.mean_system_temperature.map(|temp| (temp, *load))),
    );

    let limited_or_critical_load = replicated_loads
        .iter()
        .filter(|(room, _)| room.suitability.is_limited_or_critical())
        .fold(0., |total, (_, load)| total + load);
    let limited_or_critical_load_share =
        percentage_of(limited_or_critical_load, total_load).unwrap_or(0.);

    BuildingSummary {
        total_load,
        total_load_kw: watts_to_kilowatts(total_load),
        weighted_mean_system_temperature,
        limited_or_critical_load_share,
    }
}
