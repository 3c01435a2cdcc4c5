use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassRate, Time},
    mass_rate::kilogram_per_second,
};

use crate::support::{constraint::NonNegative, units::SpecificEnthalpy};

use super::{ConnectorError, FlowDevice};

/// A flow device that imposes a mass flow rate.
///
/// The carried fluid has the composition and enthalpy last reported by the
/// upstream reactor, or the values given at construction for a device fed
/// from a fixed reservoir.
#[derive(Debug, Clone, PartialEq)]
pub struct MassFlowController {
    mass_flow_rate: MassRate,
    mass_fractions: Vec<f64>,
    enthalpy: SpecificEnthalpy,
}

impl MassFlowController {
    /// Creates a controller with no upstream fluid yet.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::MassFlow`] if the rate is negative or NaN.
    pub fn new(mass_flow_rate: MassRate) -> Result<Self, ConnectorError> {
        Self::check(mass_flow_rate)?;
        Ok(Self {
            mass_flow_rate,
            mass_fractions: Vec::new(),
            enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(0.0),
        })
    }

    /// Sets the fluid delivered by the controller.
    #[must_use]
    pub fn with_upstream(mut self, mass_fractions: &[f64], enthalpy: SpecificEnthalpy) -> Self {
        self.set_upstream(mass_fractions, enthalpy);
        self
    }

    /// Changes the imposed mass flow rate.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::MassFlow`] if the rate is negative or NaN.
    pub fn set_mass_flow_rate(&mut self, mass_flow_rate: MassRate) -> Result<(), ConnectorError> {
        Self::check(mass_flow_rate)?;
        self.mass_flow_rate = mass_flow_rate;
        Ok(())
    }

    #[must_use]
    pub fn mass_fractions(&self) -> &[f64] {
        &self.mass_fractions
    }

    fn check(mass_flow_rate: MassRate) -> Result<(), ConnectorError> {
        NonNegative::new(mass_flow_rate.get::<kilogram_per_second>())
            .map(|_| ())
            .map_err(ConnectorError::MassFlow)
    }
}

impl FlowDevice for MassFlowController {
    fn mass_flow_rate(&self, _time: Time) -> MassRate {
        self.mass_flow_rate
    }

    /// Returns `ṁ·Yₖ`, or zero for a species the upstream fluid lacks.
    fn outlet_species_mass_flow_rate(&self, time: Time, k: usize) -> MassRate {
        let y = self.mass_fractions.get(k).copied().unwrap_or(0.0);
        self.mass_flow_rate(time) * y
    }

    fn enthalpy_mass(&self) -> SpecificEnthalpy {
        self.enthalpy
    }

    fn set_upstream(&mut self, mass_fractions: &[f64], enthalpy: SpecificEnthalpy) {
        self.mass_fractions.clear();
        self.mass_fractions.extend_from_slice(mass_fractions);
        self.enthalpy = enthalpy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::second;

    #[test]
    fn species_flows_follow_upstream_composition() {
        let mut mfc = MassFlowController::new(MassRate::new::<kilogram_per_second>(0.2))
            .unwrap()
            .with_upstream(
                &[0.25, 0.75],
                SpecificEnthalpy::new::<joule_per_kilogram>(1.0e5),
            );
        let t = Time::new::<second>(0.0);

        assert_relative_eq!(
            mfc.outlet_species_mass_flow_rate(t, 1)
                .get::<kilogram_per_second>(),
            0.15
        );
        assert_relative_eq!(
            mfc.outlet_species_mass_flow_rate(t, 2)
                .get::<kilogram_per_second>(),
            0.0
        );

        mfc.set_upstream(&[1.0, 0.0], SpecificEnthalpy::new::<joule_per_kilogram>(2.0e5));
        assert_eq!(mfc.mass_fractions(), &[1.0, 0.0]);
        assert_relative_eq!(mfc.enthalpy_mass().get::<joule_per_kilogram>(), 2.0e5);
    }

    #[test]
    fn rejects_negative_flow() {
        assert!(matches!(
            MassFlowController::new(MassRate::new::<kilogram_per_second>(-1.0)),
            Err(ConnectorError::MassFlow(_))
        ));

        let mut mfc = MassFlowController::new(MassRate::new::<kilogram_per_second>(1.0)).unwrap();
        assert!(mfc.set_mass_flow_rate(MassRate::new::<kilogram_per_second>(f64::NAN)).is_err());
        assert_relative_eq!(
            mfc.mass_flow_rate(Time::new::<second>(0.0))
                .get::<kilogram_per_second>(),
            1.0
        );
    }
}
