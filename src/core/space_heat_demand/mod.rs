pub mod building_element;
pub mod room;
pub mod ventilation;
