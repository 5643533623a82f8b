use crate::input::{EnvelopeElementInput, RoomInput, UpperBoundaryType};
use serde::Serialize;

// This module provides objects to represent the envelope elements of a room
// (walls, the upper boundary, floor and windows) and their conductances.

/// An opaque or glazed envelope element through which heat is transmitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BuildingElement {
    /// in m2
    pub area: f64,
    /// in W/(m2.K)
    pub u_value: f64,
}

impl BuildingElement {
    pub fn new(area: f64, u_value: f64) -> Self {
        Self { area, u_value }
    }

    /// Conductance (area x U-value) of the element, in W/K
    pub fn heat_transfer_coefficient(&self) -> f64 {
        self.area * self.u_value
    }
}

impl From<EnvelopeElementInput> for BuildingElement {
    fn from(input: EnvelopeElementInput) -> Self {
        Self::new(input.area, input.u_value)
    }
}

/// The effective envelope of a room, as used by the loss calculation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Envelope {
    pub wall: BuildingElement,
    pub upper_boundary: BuildingElement,
    pub floor: BuildingElement,
    pub window: BuildingElement,
}

impl Envelope {
    /// Build the effective envelope of a room. An upper boundary against a heated space
    /// does not drive losses, so its area is taken as zero; the room input is left as given.
    pub fn for_room(room: &RoomInput) -> Self {
        Self {
            wall: room.wall.into(),
            upper_boundary: effective_upper_boundary(
                room.upper_boundary.into(),
                room.upper_boundary_type,
            ),
            floor: room.floor.into(),
            window: room.window.into(),
        }
    }

    pub fn conductances(&self) -> ElementConductances {
        ElementConductances {
            wall: self.wall.heat_transfer_coefficient(),
            upper_boundary: self.upper_boundary.heat_transfer_coefficient(),
            floor: self.floor.heat_transfer_coefficient(),
            window: self.window.heat_transfer_coefficient(),
        }
    }
}

pub fn effective_upper_boundary(
    element: BuildingElement,
    upper_boundary_type: UpperBoundaryType,
) -> BuildingElement {
    if upper_boundary_type.is_loss_surface() {
        element
    } else {
        BuildingElement {
            area: 0.,
            ..element
        }
    }
}

/// Per-element conductances of a room envelope, in W/K
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ElementConductances {
    pub wall: f64,
    pub upper_boundary: f64,
    pub floor: f64,
    pub window: f64,
}

impl ElementConductances {
    pub fn total(&self) -> f64 {
        self.wall + self.upper_boundary + self.floor + self.window
    }
}
