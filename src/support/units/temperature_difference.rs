use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Subtraction of absolute temperatures.
///
/// [`uom`] does not define `ThermodynamicTemperature - ThermodynamicTemperature`
/// ([#380](https://github.com/iliekturtles/uom/issues/380)), so
/// [`minus`](Self::minus) returns the [`TemperatureInterval`] directly.
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn hot_gas_against_cool_surroundings() {
        let gas = ThermodynamicTemperature::new::<abs_kelvin>(800.0);
        let surroundings = ThermodynamicTemperature::new::<degree_celsius>(26.85);

        assert_relative_eq!(gas.minus(surroundings).get::<delta_kelvin>(), 500.0, epsilon = 1e-9);
        assert_relative_eq!(surroundings.minus(gas).get::<delta_kelvin>(), -500.0, epsilon = 1e-9);
    }
}
