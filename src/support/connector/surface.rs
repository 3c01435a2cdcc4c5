use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::{
    kinetics::{KineticsError, Mechanism, SurfaceKinetics},
    sensitivity::{ParameterKind, SensitivityParameter, SensitivityRegistry},
    thermo::{
        REFERENCE_TEMPERATURE, State, SurfacePhase, SurfaceState, capability::SpeciesNames,
        fluid::Mixture,
    },
};

use super::ConnectorError;

/// Surface chemistry on one side of a wall.
///
/// Owns the surface phase, its kinetics, and the current coverages. Coverages
/// are stored as given, without normalization, since they come straight
/// from the integrator's state vector.
#[derive(Debug)]
pub struct ReactingSurface {
    phase: SurfacePhase,
    kinetics: Box<dyn SurfaceKinetics>,
    state: SurfaceState,
    sens_params: Vec<SensitivityParameter>,
}

impl ReactingSurface {
    /// Creates a surface with every site empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::SurfaceMismatch`] if the kinetics does not
    /// report rates for exactly the species of `phase`.
    pub fn new(
        phase: SurfacePhase,
        kinetics: impl SurfaceKinetics + 'static,
    ) -> Result<Self, ConnectorError> {
        let n_kinetics = kinetics.n_total_species() - kinetics.surface_species_offset();
        if n_kinetics != phase.n_species() {
            return Err(ConnectorError::SurfaceMismatch {
                phase: phase.n_species(),
                kinetics: n_kinetics,
            });
        }

        let state = SurfaceState {
            temperature: ThermodynamicTemperature::new::<kelvin>(REFERENCE_TEMPERATURE),
            coverages: phase.bare_coverages(),
        };
        Ok(Self {
            phase,
            kinetics: Box::new(kinetics),
            state,
            sens_params: Vec::new(),
        })
    }

    /// Returns the surface with the given initial coverages.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::CoverageLength`] if the length is wrong.
    pub fn with_coverages(mut self, coverages: &[f64]) -> Result<Self, ConnectorError> {
        self.set_coverages(coverages)?;
        Ok(self)
    }

    #[must_use]
    pub fn phase(&self) -> &SurfacePhase {
        &self.phase
    }

    #[must_use]
    pub fn kinetics(&self) -> &dyn SurfaceKinetics {
        self.kinetics.as_ref()
    }

    pub fn kinetics_mut(&mut self) -> &mut dyn SurfaceKinetics {
        self.kinetics.as_mut()
    }

    #[must_use]
    pub fn n_species(&self) -> usize {
        self.phase.n_species()
    }

    #[must_use]
    pub fn coverages(&self) -> &[f64] {
        &self.state.coverages
    }

    /// Overwrites the coverages, without normalization.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::CoverageLength`] if the length is wrong.
    pub fn set_coverages(&mut self, coverages: &[f64]) -> Result<(), ConnectorError> {
        if coverages.len() != self.state.coverages.len() {
            return Err(ConnectorError::CoverageLength {
                expected: self.state.coverages.len(),
                found: coverages.len(),
            });
        }
        self.state.coverages.copy_from_slice(coverages);
        Ok(())
    }

    pub fn set_temperature(&mut self, temperature: ThermodynamicTemperature) {
        self.state.temperature = temperature;
    }

    #[must_use]
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Evaluates net production rates against the adjacent gas, kmol/m²·s.
    ///
    /// # Errors
    ///
    /// Propagates any [`KineticsError`] from the surface kinetics.
    pub fn net_production_rates(
        &self,
        gas: &State<Mixture>,
        sdot: &mut [f64],
    ) -> Result<(), KineticsError> {
        self.kinetics.net_production_rates(gas, &self.state, sdot)
    }

    #[must_use]
    pub fn n_sens_params(&self) -> usize {
        self.sens_params.len()
    }

    /// Registers the rate multiplier of surface reaction `reaction`.
    ///
    /// The parameter is labelled `"<owner>: <reaction equation>"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::ReactionOutOfRange`] for a bad index.
    pub fn register_reaction_sensitivity(
        &mut self,
        reaction: usize,
        owner: &str,
        registry: &mut SensitivityRegistry,
    ) -> Result<usize, ConnectorError> {
        let n_reactions = self.kinetics.n_reactions();
        let equation = self
            .kinetics
            .reaction_string(reaction)
            .ok_or(ConnectorError::ReactionOutOfRange {
                index: reaction,
                n_reactions,
            })?;

        let global = registry.register(format!("{owner}: {equation}"), 1.0, 1.0);
        self.sens_params.push(SensitivityParameter {
            local: reaction,
            global,
            value: 1.0,
            kind: ParameterKind::Reaction,
        });
        Ok(global)
    }

    /// Scales each registered reaction multiplier by its parameter value.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::ParameterVectorTooShort`] before touching
    /// any multiplier if `params` lacks a registered slot.
    pub fn apply_sensitivity(&mut self, params: &[f64]) -> Result<(), ConnectorError> {
        if let Some(p) = self.sens_params.iter().find(|p| p.global >= params.len()) {
            return Err(ConnectorError::ParameterVectorTooShort {
                slot: p.global,
                len: params.len(),
            });
        }
        for p in &mut self.sens_params {
            p.value = self.kinetics.multiplier(p.local);
            self.kinetics
                .set_multiplier(p.local, p.value * params[p.global]);
        }
        self.kinetics.invalidate_cache();
        Ok(())
    }

    /// Restores the multipliers saved by [`ReactingSurface::apply_sensitivity`].
    pub fn reset_sensitivity(&mut self) {
        for p in self.sens_params.iter().rev() {
            self.kinetics.set_multiplier(p.local, p.value);
        }
        self.kinetics.invalidate_cache();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{
        kinetics::{InterfaceKinetics, RateConstant, Reaction},
        thermo::{
            SurfaceSpecies, share,
            model::{IdealGasMixture, IdealGasSpecies},
        },
    };

    fn surface() -> ReactingSurface {
        let gas = share(
            IdealGasMixture::new(vec![IdealGasSpecies::new("N2", 28.0, 29_000.0)]).unwrap(),
        );
        let phase = SurfacePhase::new(
            vec![
                SurfaceSpecies::new("PT(S)"),
                SurfaceSpecies::new("X(S)"),
                SurfaceSpecies::new("Y(S)"),
            ],
            1.0e-8,
        )
        .unwrap();
        let kinetics = InterfaceKinetics::new(
            gas,
            phase.clone(),
            &[Reaction::new(RateConstant::constant(10.0))
                .reactant("X(S)", 1)
                .product("Y(S)", 1)],
        )
        .unwrap();
        ReactingSurface::new(phase, kinetics).unwrap()
    }

    #[test]
    fn starts_bare_and_accepts_coverages() {
        let mut surf = surface();
        assert_eq!(surf.coverages(), &[1.0, 0.0, 0.0]);

        surf.set_coverages(&[0.5, 0.3, 0.3]).unwrap();
        assert_eq!(surf.coverages(), &[0.5, 0.3, 0.3]);

        assert_eq!(
            surf.set_coverages(&[1.0]),
            Err(ConnectorError::CoverageLength {
                expected: 3,
                found: 1
            })
        );
    }

    #[test]
    fn sensitivity_round_trip() {
        let mut surf = surface();
        let mut registry = SensitivityRegistry::new();
        registry.register("other", 1.0, 1.0);

        let slot = surf
            .register_reaction_sensitivity(0, "reactor", &mut registry)
            .unwrap();
        assert_eq!(slot, 1);
        assert_eq!(registry.get(1).unwrap().label, "reactor: X(S) => Y(S)");
        assert_eq!(surf.n_sens_params(), 1);

        assert_eq!(
            surf.apply_sensitivity(&[1.0]),
            Err(ConnectorError::ParameterVectorTooShort { slot: 1, len: 1 })
        );
        assert_relative_eq!(surf.kinetics().multiplier(0), 1.0);

        surf.apply_sensitivity(&[1.0, 1.5]).unwrap();
        assert_relative_eq!(surf.kinetics().multiplier(0), 1.5);

        surf.reset_sensitivity();
        assert_relative_eq!(surf.kinetics().multiplier(0), 1.0);

        assert!(matches!(
            surf.register_reaction_sensitivity(1, "reactor", &mut registry),
            Err(ConnectorError::ReactionOutOfRange { index: 1, .. })
        ));
    }

    #[test]
    fn reaction_registered_twice_resets_to_its_original_multiplier() {
        let mut surf = surface();
        let mut registry = SensitivityRegistry::new();
        surf.register_reaction_sensitivity(0, "reactor", &mut registry)
            .unwrap();
        surf.register_reaction_sensitivity(0, "reactor", &mut registry)
            .unwrap();

        surf.apply_sensitivity(&[2.0, 3.0]).unwrap();
        assert_relative_eq!(surf.kinetics().multiplier(0), 6.0);

        surf.reset_sensitivity();
        assert_relative_eq!(surf.kinetics().multiplier(0), 1.0);
    }
}
