// Spreadsheet rendering of a calculation run: one CSV file per record shape, each
// starting with a row of headings and a row of units.

use crate::corpus::CalculationResults;
use crate::core::apartment_types::TypeAggregate;
use crate::core::space_heat_demand::room::RoomResult;
use crate::output::Output;
use csv::WriterBuilder;
use tracing::{debug, info};

pub const ROOMS_OUTPUT_KEY: &str = "rooms";
pub const APARTMENT_TYPES_OUTPUT_KEY: &str = "apartment_types";
pub const SUMMARY_OUTPUT_KEY: &str = "summary";

const NOT_AVAILABLE: &str = "n/a";

type Column = (&'static str, &'static str);

const ROOM_LOAD_COLUMNS: [Column; 28] = [
    ("Room", ""),
    ("Apartment type", ""),
    ("Unit count", "[count]"),
    ("Floor area", "[m2]"),
    ("Room height", "[m]"),
    ("Volume", "[m3]"),
    ("Indoor temperature", "[deg C]"),
    ("Temperature difference", "[K]"),
    ("Wall area", "[m2]"),
    ("Wall U-value", "[W/(m2.K)]"),
    ("Upper boundary type", ""),
    ("Upper boundary area", "[m2]"),
    ("Upper boundary U-value", "[W/(m2.K)]"),
    ("Floor area (envelope)", "[m2]"),
    ("Floor U-value", "[W/(m2.K)]"),
    ("Window area", "[m2]"),
    ("Window U-value", "[W/(m2.K)]"),
    ("Wall conductance", "[W/K]"),
    ("Upper boundary conductance", "[W/K]"),
    ("Floor conductance", "[W/K]"),
    ("Window conductance", "[W/K]"),
    ("Total conductance", "[W/K]"),
    ("Transmission loss", "[W]"),
    ("Air change rate", "[1/h]"),
    ("Ventilation loss", "[W]"),
    ("Load before margin", "[W]"),
    ("Load after margin", "[W]"),
    ("Heating surface type", ""),
];

const ROOM_SYSTEM_TEMPERATURE_COLUMNS: [Column; 4] = [
    ("Supply temperature", "[deg C]"),
    ("Return temperature", "[deg C]"),
    ("Mean system temperature", "[deg C]"),
    ("Heat pump suitability", ""),
];

const APARTMENT_TYPE_COLUMNS: [Column; 6] = [
    ("Apartment type", ""),
    ("Unit count", "[count]"),
    ("Load per unit", "[W]"),
    ("Load per unit", "[kW]"),
    ("Type building load", "[W]"),
    ("Type building load", "[kW]"),
];

const SUMMARY_COLUMNS: [Column; 6] = [
    ("Outdoor design temperature", "[deg C]"),
    ("Default indoor temperature", "[deg C]"),
    ("Safety margin", "[%]"),
    ("Building heating load", "[W]"),
    ("Building heating load", "[kW]"),
    ("Load share in limited or critical rooms", "[%]"),
];

const HEAT_PUMP_COLUMNS: [Column; 11] = [
    ("Heat pump type", ""),
    ("Heat pump nominal power", "[kW]"),
    ("Heat pump coverage", "[%]"),
    ("Coverage assessment", ""),
    ("Estimated COP", "[ratio]"),
    ("Estimated JAZ", "[ratio]"),
    ("Annual heat demand", "[kWh]"),
    ("Annual electricity demand", "[kWh]"),
    ("Assessed mean system temperature", "[deg C]"),
    ("System temperature assessment", ""),
    ("Critical room assessment", ""),
];

/// Write the rooms, apartment types and summary files for a calculation run.
///
/// System temperature columns are only written from the system temperature analysis
/// level upwards.
pub fn write_results(output: &impl Output, results: &CalculationResults) -> anyhow::Result<()> {
    if output.is_noop() {
        debug!("Output is a no-op, skipping writing of results");
        return Ok(());
    }
    let include_system_temperatures = results.analysis_level.includes_system_temperatures();

    write_rooms_file(output, &results.rooms, include_system_temperatures)?;
    write_apartment_types_file(output, &results.apartment_types, include_system_temperatures)?;
    write_summary_file(output, results, include_system_temperatures)?;

    Ok(())
}

fn write_rooms_file(
    output: &impl Output,
    rooms: &[RoomResult],
    include_system_temperatures: bool,
) -> anyhow::Result<()> {
    let mut columns = ROOM_LOAD_COLUMNS.to_vec();
    if include_system_temperatures {
        columns.extend(ROOM_SYSTEM_TEMPERATURE_COLUMNS);
    }

    let rows = rooms
        .iter()
        .map(|room| room_row(room, include_system_temperatures));

    write_csv(output, ROOMS_OUTPUT_KEY, &columns, rows)
}

fn room_row(room: &RoomResult, include_system_temperatures: bool) -> Vec<String> {
    let input = &room.room;
    let envelope = &room.envelope;
    let conductances = &room.conductances;

    let mut row = vec![
        input.name.clone(),
        input.apartment_type.clone().unwrap_or_default(),
        room.unit_count.to_string(),
        input.floor_area.to_string(),
        input.room_height.to_string(),
        room.volume.to_string(),
        room.indoor_temperature.to_string(),
        room.temp_diff.to_string(),
        envelope.wall.area.to_string(),
        envelope.wall.u_value.to_string(),
        input.upper_boundary_type.to_string(),
        envelope.upper_boundary.area.to_string(),
        envelope.upper_boundary.u_value.to_string(),
        envelope.floor.area.to_string(),
        envelope.floor.u_value.to_string(),
        envelope.window.area.to_string(),
        envelope.window.u_value.to_string(),
        conductances.wall.to_string(),
        conductances.upper_boundary.to_string(),
        conductances.floor.to_string(),
        conductances.window.to_string(),
        room.total_conductance.to_string(),
        room.transmission_loss.to_string(),
        input.air_change_rate.to_string(),
        room.ventilation_loss.to_string(),
        room.load_before_margin.to_string(),
        room.load_after_margin.to_string(),
        input.heating_surface_type.name().to_string(),
    ];

    if include_system_temperatures {
        row.extend([
            optional_value(room.supply_temperature),
            optional_value(room.return_temperature),
            optional_value(room.mean_system_temperature),
            room.suitability.to_string(),
        ]);
    }

    row
}

fn write_apartment_types_file(
    output: &impl Output,
    apartment_types: &[TypeAggregate],
    include_system_temperatures: bool,
) -> anyhow::Result<()> {
    let mut columns = APARTMENT_TYPE_COLUMNS.to_vec();
    if include_system_temperatures {
        columns.push(("Weighted mean system temperature", "[deg C]"));
    }

    let rows = apartment_types.iter().map(|aggregate| {
        let mut row = vec![
            aggregate.label().to_string(),
            aggregate.unit_count.to_string(),
            aggregate.load_per_unit.to_string(),
            aggregate.load_per_unit_kw.to_string(),
            aggregate.type_building_load.to_string(),
            aggregate.type_building_load_kw.to_string(),
        ];
        if include_system_temperatures {
            row.push(optional_value(aggregate.weighted_mean_system_temperature));
        }
        row
    });

    write_csv(output, APARTMENT_TYPES_OUTPUT_KEY, &columns, rows)
}

fn write_summary_file(
    output: &impl Output,
    results: &CalculationResults,
    include_system_temperatures: bool,
) -> anyhow::Result<()> {
    let CalculationResults {
        global_parameters,
        summary,
        heat_pump,
        ..
    } = results;

    let mut columns = SUMMARY_COLUMNS.to_vec();
    let mut row = vec![
        global_parameters.outdoor_design_temperature.to_string(),
        global_parameters.default_indoor_temperature.to_string(),
        (global_parameters.safety_margin * 100.).to_string(),
        summary.total_load.to_string(),
        summary.total_load_kw.to_string(),
        summary.limited_or_critical_load_share.to_string(),
    ];

    if include_system_temperatures {
        columns.push(("Weighted mean system temperature", "[deg C]"));
        row.push(optional_value(summary.weighted_mean_system_temperature));
    }

    if let Some(assessment) = heat_pump {
        columns.extend(HEAT_PUMP_COLUMNS);
        row.extend([
            assessment.heat_pump_type.to_string(),
            assessment.nominal_power_kw.to_string(),
            assessment.coverage_percentage.to_string(),
            assessment.coverage_tier.to_string(),
            optional_value(assessment.cop_estimate),
            optional_value(assessment.jaz_estimate),
            assessment.annual_heat_demand_kwh.to_string(),
            optional_value(assessment.annual_electricity_demand_kwh),
            optional_value(assessment.weighted_mean_system_temperature),
            assessment.temperature_tier.to_string(),
            assessment.critical_share_tier.to_string(),
        ]);
    }

    write_csv(output, SUMMARY_OUTPUT_KEY, &columns, [row])
}

fn write_csv(
    output: &impl Output,
    location_key: &str,
    columns: &[Column],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> anyhow::Result<()> {
    info!("writing out to {location_key}");
    let writer = output.writer_for_location_key(location_key, "csv")?;
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(columns.iter().map(|(heading, _)| heading))?;
    writer.write_record(columns.iter().map(|(_, unit)| unit))?;

    for row in rows {
        writer.write_record(&row)?;
    }

    writer.flush()?;

    Ok(())
}

fn optional_value(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |value| value.to_string())
}
