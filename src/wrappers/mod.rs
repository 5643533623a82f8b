use crate::input::Input;
use crate::PreprocessingOptions;

pub mod building_profiles;

use building_profiles::{BuildingProfileWrapper, ClimateRegionWrapper};

/// Common trait for a wrapper around the calculation, which in its preprocessing stage
/// produces the input for the core calculation from the input supplied by the caller.
pub(crate) trait InputWrapper {
    fn apply_preprocessing(&self, input: Input) -> anyhow::Result<Input>;
}

/// A wrapper that does nothing, so can be used in cases when the input for the core
/// calculation should be passed through without mutation.
pub(crate) struct PassthroughWrapper;

impl InputWrapper for PassthroughWrapper {
    fn apply_preprocessing(&self, input: Input) -> anyhow::Result<Input> {
        Ok(input)
    }
}

/// An enum to wrap the known wrappers that could be chosen for a given invocation.
pub(crate) enum ChosenWrapper {
    Passthrough(PassthroughWrapper),
    BuildingProfile(BuildingProfileWrapper),
    ClimateRegion(ClimateRegionWrapper),
}

impl ChosenWrapper {
    /// The wrappers to apply for the given options, in order. A climate region is applied
    /// after a building profile, so its design temperature wins over a recommended one.
    pub(crate) fn for_options(options: &PreprocessingOptions) -> Vec<Self> {
        let mut wrappers = vec![];
        if let Some(profile) = options.building_profile {
            wrappers.push(ChosenWrapper::BuildingProfile(BuildingProfileWrapper::new(
                profile,
                options.apply_recommended_climate,
            )));
        }
        if let Some(region) = options.climate_region {
            wrappers.push(ChosenWrapper::ClimateRegion(ClimateRegionWrapper::new(
                region,
            )));
        }
        if wrappers.is_empty() {
            wrappers.push(ChosenWrapper::Passthrough(PassthroughWrapper));
        }

        wrappers
    }
}

impl InputWrapper for ChosenWrapper {
    fn apply_preprocessing(&self, input: Input) -> anyhow::Result<Input> {
        match self {
            ChosenWrapper::Passthrough(wrapper) => wrapper.apply_preprocessing(input),
            ChosenWrapper::BuildingProfile(wrapper) => wrapper.apply_preprocessing(input),
            ChosenWrapper::ClimateRegion(wrapper) => wrapper.apply_preprocessing(input),
        }
    }
}
