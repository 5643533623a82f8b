use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeatLoadError {
    #[error("Request was considered invalid due to error: {0}")]
    InvalidRequest(#[from] anyhow::Error),
    #[error("Input was rejected before calculation: {0}")]
    InvalidInput(#[from] InputError),
    #[error("Error during writing of results: {0}")]
    ErrorInOutput(OutputError),
}

/// Reasons for which a whole calculation run is rejected. A run is never partially
/// applied, so any one of these fails the run.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Room {index} ('{room}'): {field} must be a finite number but was {value}")]
    NonFiniteRoomValue {
        index: usize,
        room: String,
        field: &'static str,
        value: f64,
    },
    #[error("Room {index} ('{room}'): {field} must be greater than zero but was {value}")]
    NonPositiveRoomValue {
        index: usize,
        room: String,
        field: &'static str,
        value: f64,
    },
    #[error("Room {index} ('{room}'): {field} must not be negative but was {value}")]
    NegativeRoomValue {
        index: usize,
        room: String,
        field: &'static str,
        value: f64,
    },
    #[error("Room {index} ('{room}'): unit count must be at least 1")]
    ZeroUnitCount { index: usize, room: String },
    #[error("Global parameter {field} must be a finite number but was {value}")]
    NonFiniteGlobalParameter { field: &'static str, value: f64 },
    #[error("Heat pump {field} must be a non-negative finite number but was {value}")]
    InvalidHeatPumpValue { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct OutputError {
    error: anyhow::Error,
}

impl OutputError {
    pub(crate) fn new(error: anyhow::Error) -> Self {
        Self { error }
    }
}
