//! Ideal gas equation of state helpers.
//!
//! These functions implement the ideal gas equation of state `p = ρ·R·T`
//! for a mixture whose specific gas constant is `R = R̄·Σ Yₖ/Wₖ`.

use uom::si::{
    f64::{MassDensity, Pressure, ThermodynamicTemperature},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval, thermodynamic_temperature,
};

use crate::support::{thermo::GAS_CONSTANT, units::SpecificGasConstant};

/// Returns the specific gas constant for a mixture with `moles_per_mass` kmol/kg.
#[must_use]
pub(crate) fn gas_constant(moles_per_mass: f64) -> SpecificGasConstant {
    SpecificGasConstant::new::<joule_per_kilogram_kelvin>(GAS_CONSTANT * moles_per_mass)
}

/// Computes pressure using the ideal gas equation of state.
#[must_use]
pub(crate) fn pressure(
    temperature: ThermodynamicTemperature,
    density: MassDensity,
    gas_constant: SpecificGasConstant,
) -> Pressure {
    density * gas_constant * temperature
}

/// Computes density using the ideal gas equation of state.
#[must_use]
pub(crate) fn density(
    temperature: ThermodynamicTemperature,
    pressure: Pressure,
    gas_constant: SpecificGasConstant,
) -> MassDensity {
    pressure / (gas_constant * temperature)
}

/// Computes temperature using the ideal gas equation of state.
///
/// Since [`SpecificGasConstant`] is associated with a `TemperatureInterval`,
/// the result must be manually converted to an absolute temperature.
#[must_use]
pub(crate) fn temperature(
    pressure: Pressure,
    density: MassDensity,
    gas_constant: SpecificGasConstant,
) -> ThermodynamicTemperature {
    let temperature = pressure / (density * gas_constant);
    ThermodynamicTemperature::new::<thermodynamic_temperature::kelvin>(
        temperature.get::<temperature_interval::kelvin>(),
    )
}
