//! Ideal gas mixture with constant species heat capacities.
//!
//! `IdealGasMixture` is the reference gas phase for reactors. Each species
//! has a molecular weight, a constant molar heat capacity and a standard
//! formation enthalpy at 298.15 K.
//!
//! # Assumptions
//!
//! - Ideal gas equation of state: `p = ρ·R̄·T·Σ Yₖ/Wₖ`
//! - Species enthalpy: `hₖ = h°f,ₖ + cp,ₖ·(T − 298.15)`
//! - Ideal mixing: `h = Σ (Yₖ/Wₖ)·hₖ` and `uₖ = hₖ − R̄·T`
//!
//! Per-species quantities are molar (J/kmol, kg/kmol). Mixture properties are
//! returned per unit mass as `uom` quantities.
//!
//! Mass fractions are used as given. They need not sum exactly to one, which
//! lets a reactor evaluate properties on compositions an integrator has drifted
//! slightly away from normalization.

use std::collections::HashSet;

use thiserror::Error;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{ConstraintError, NonNegative, StrictlyPositive},
    thermo::{
        GAS_CONSTANT, PropertyError, REFERENCE_TEMPERATURE, State,
        capability::{
            HasCp, HasCv, HasEnthalpy, HasFormationEnthalpy, HasInternalEnergy,
            HasMolecularWeights, HasPartialMolarIntEnergies, HasPressure, SpeciesNames, StateFrom,
            ThermoModel,
        },
        fluid::Mixture,
    },
    units::{SpecificEnthalpy, SpecificInternalEnergy},
};

use super::ideal_gas_eos;

/// Constant data for one species of an [`IdealGasMixture`].
#[derive(Debug, Clone, PartialEq)]
pub struct IdealGasSpecies {
    pub name: String,

    /// Molecular weight, kg/kmol.
    pub molecular_weight: f64,

    /// Constant-pressure molar heat capacity, J/kmol·K.
    pub cp: f64,

    /// Standard formation enthalpy at 298.15 K, J/kmol.
    pub formation_enthalpy: f64,
}

impl IdealGasSpecies {
    #[must_use]
    pub fn new(name: impl Into<String>, molecular_weight: f64, cp: f64) -> Self {
        Self {
            name: name.into(),
            molecular_weight,
            cp,
            formation_enthalpy: 0.0,
        }
    }

    #[must_use]
    pub fn with_formation_enthalpy(self, formation_enthalpy: f64) -> Self {
        Self {
            formation_enthalpy,
            ..self
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdealGasMixtureError {
    #[error("an ideal gas mixture needs at least one species")]
    NoSpecies,
    #[error("duplicate species name `{name}`")]
    DuplicateSpecies { name: String },
    #[error("invalid molecular weight for `{name}`: {source}")]
    MolecularWeight {
        name: String,
        #[source]
        source: ConstraintError,
    },
    #[error("invalid heat capacity for `{name}`: {source}")]
    HeatCapacity {
        name: String,
        #[source]
        source: ConstraintError,
    },
}

/// Ideal gas mixture model.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealGasMixture {
    species: Vec<IdealGasSpecies>,
    molecular_weights: Vec<f64>,
    original_formation_enthalpies: Vec<f64>,
}

impl ThermoModel for IdealGasMixture {
    type Fluid = Mixture;
}

impl IdealGasMixture {
    /// Creates a mixture model from its species.
    ///
    /// # Errors
    ///
    /// Returns [`IdealGasMixtureError`] if there are no species, if names
    /// repeat, if a molecular weight is not strictly positive, or if a heat
    /// capacity is negative.
    pub fn new(species: Vec<IdealGasSpecies>) -> Result<Self, IdealGasMixtureError> {
        if species.is_empty() {
            return Err(IdealGasMixtureError::NoSpecies);
        }

        let mut names = HashSet::new();
        for sp in &species {
            if !names.insert(sp.name.as_str()) {
                return Err(IdealGasMixtureError::DuplicateSpecies {
                    name: sp.name.clone(),
                });
            }
            StrictlyPositive::new(sp.molecular_weight).map_err(|source| {
                IdealGasMixtureError::MolecularWeight {
                    name: sp.name.clone(),
                    source,
                }
            })?;
            NonNegative::new(sp.cp).map_err(|source| IdealGasMixtureError::HeatCapacity {
                name: sp.name.clone(),
                source,
            })?;
        }

        let molecular_weights = species.iter().map(|sp| sp.molecular_weight).collect();
        let original_formation_enthalpies =
            species.iter().map(|sp| sp.formation_enthalpy).collect();

        Ok(Self {
            species,
            molecular_weights,
            original_formation_enthalpies,
        })
    }

    /// Returns the molar enthalpy of every species at `temperature`, J/kmol.
    #[must_use]
    pub fn species_enthalpies(&self, temperature: ThermodynamicTemperature) -> Vec<f64> {
        let dt = temperature.get::<kelvin>() - REFERENCE_TEMPERATURE;
        self.species
            .iter()
            .map(|sp| sp.formation_enthalpy + sp.cp * dt)
            .collect()
    }

    /// Returns the inverse mean molecular weight of the state, kmol/kg.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the state is invalid for this model, or if
    /// the mixture holds no moles.
    pub fn moles_per_mass(&self, state: &State<Mixture>) -> Result<f64, PropertyError> {
        check_temperature(state.temperature)?;
        self.composition_moles(&state.fluid)
    }

    fn composition_moles(&self, fluid: &Mixture) -> Result<f64, PropertyError> {
        let n_species = self.species.len();
        if fluid.n_species() != n_species {
            return Err(PropertyError::InvalidState {
                context: format!(
                    "composition has {} species, model has {n_species}",
                    fluid.n_species()
                ),
            });
        }
        let moles = fluid.moles_per_mass(&self.molecular_weights);
        if moles > 0.0 {
            Ok(moles)
        } else {
            Err(PropertyError::Undefined {
                context: format!("mean molecular weight of composition {fluid:?}"),
            })
        }
    }

    /// Returns the mixture enthalpy in J/kg along with `Σ Yₖ/Wₖ`.
    fn enthalpy_and_moles(&self, state: &State<Mixture>) -> Result<(f64, f64), PropertyError> {
        let moles = self.moles_per_mass(state)?;
        let h = self
            .species_enthalpies(state.temperature)
            .iter()
            .zip(state.fluid.mass_fractions())
            .zip(&self.molecular_weights)
            .map(|((h_k, y), w)| y / w * h_k)
            .sum();
        Ok((h, moles))
    }
}

fn check_temperature(temperature: ThermodynamicTemperature) -> Result<(), PropertyError> {
    if temperature.get::<kelvin>() > 0.0 {
        Ok(())
    } else {
        Err(PropertyError::OutOfDomain {
            context: format!("temperature {temperature:?}"),
        })
    }
}

impl SpeciesNames for IdealGasMixture {
    fn n_species(&self) -> usize {
        self.species.len()
    }

    fn species_name(&self, k: usize) -> Option<&str> {
        self.species.get(k).map(|sp| sp.name.as_str())
    }
}

impl HasMolecularWeights for IdealGasMixture {
    fn molecular_weights(&self) -> &[f64] {
        &self.molecular_weights
    }
}

impl HasPressure for IdealGasMixture {
    /// Computes pressure with `P = ρ·R̄·T·Σ Yₖ/Wₖ`.
    fn pressure(&self, state: &State<Mixture>) -> Result<Pressure, PropertyError> {
        let r = ideal_gas_eos::gas_constant(self.moles_per_mass(state)?);
        Ok(ideal_gas_eos::pressure(state.temperature, state.density, r))
    }
}

impl HasEnthalpy for IdealGasMixture {
    /// Computes enthalpy with `h = Σ (Yₖ/Wₖ)·hₖ`.
    fn enthalpy(&self, state: &State<Mixture>) -> Result<SpecificEnthalpy, PropertyError> {
        let (h, _) = self.enthalpy_and_moles(state)?;
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(h))
    }
}

impl HasInternalEnergy for IdealGasMixture {
    /// Computes internal energy with `u = h − R̄·T·Σ Yₖ/Wₖ`.
    fn internal_energy(
        &self,
        state: &State<Mixture>,
    ) -> Result<SpecificInternalEnergy, PropertyError> {
        let (h, moles) = self.enthalpy_and_moles(state)?;
        let t = state.temperature.get::<kelvin>();
        Ok(SpecificInternalEnergy::new::<joule_per_kilogram>(
            h - GAS_CONSTANT * t * moles,
        ))
    }
}

impl HasCp for IdealGasMixture {
    /// Computes `cp = Σ (Yₖ/Wₖ)·cp,ₖ`.
    fn cp(&self, state: &State<Mixture>) -> Result<SpecificHeatCapacity, PropertyError> {
        self.moles_per_mass(state)?;
        let cp = self
            .species
            .iter()
            .zip(state.fluid.mass_fractions())
            .map(|(sp, y)| y / sp.molecular_weight * sp.cp)
            .sum();
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp))
    }
}

impl HasCv for IdealGasMixture {
    /// Computes `cv = cp − R̄·Σ Yₖ/Wₖ`.
    fn cv(&self, state: &State<Mixture>) -> Result<SpecificHeatCapacity, PropertyError> {
        let r = ideal_gas_eos::gas_constant(self.moles_per_mass(state)?);
        let cv = self.cp(state)? - r;
        if cv.get::<joule_per_kilogram_kelvin>() > 0.0 {
            Ok(cv)
        } else {
            Err(PropertyError::Undefined {
                context: format!("non-positive cv {cv:?}"),
            })
        }
    }
}

impl HasPartialMolarIntEnergies for IdealGasMixture {
    /// Computes `uₖ = hₖ − R̄·T`.
    fn partial_molar_int_energies(
        &self,
        state: &State<Mixture>,
    ) -> Result<Vec<f64>, PropertyError> {
        self.moles_per_mass(state)?;
        let rt = GAS_CONSTANT * state.temperature.get::<kelvin>();
        Ok(self
            .species_enthalpies(state.temperature)
            .into_iter()
            .map(|h_k| h_k - rt)
            .collect())
    }
}

impl HasFormationEnthalpy for IdealGasMixture {
    fn formation_enthalpy(&self, k: usize) -> f64 {
        self.species[k].formation_enthalpy
    }

    fn modify_formation_enthalpy(&mut self, k: usize, value: f64) {
        self.species[k].formation_enthalpy = value;
    }

    fn reset_formation_enthalpy(&mut self, k: usize) {
        self.species[k].formation_enthalpy = self.original_formation_enthalpies[k];
    }
}

impl StateFrom<(Mixture, ThermodynamicTemperature, MassDensity)> for IdealGasMixture {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, density): (Mixture, ThermodynamicTemperature, MassDensity),
    ) -> Result<State<Mixture>, Self::Error> {
        let state = State {
            temperature,
            density,
            fluid,
        };
        self.moles_per_mass(&state)?;
        Ok(state)
    }
}

impl StateFrom<(Mixture, ThermodynamicTemperature, Pressure)> for IdealGasMixture {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (Mixture, ThermodynamicTemperature, Pressure),
    ) -> Result<State<Mixture>, Self::Error> {
        check_temperature(temperature)?;
        let r = ideal_gas_eos::gas_constant(self.composition_moles(&fluid)?);
        let density = ideal_gas_eos::density(temperature, pressure, r);

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl StateFrom<(Mixture, Pressure, MassDensity)> for IdealGasMixture {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, density): (Mixture, Pressure, MassDensity),
    ) -> Result<State<Mixture>, Self::Error> {
        let r = ideal_gas_eos::gas_constant(self.composition_moles(&fluid)?);
        let temperature = ideal_gas_eos::temperature(pressure, density, r);
        check_temperature(temperature)?;

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        mass_density::kilogram_per_cubic_meter,
        pressure::{atmosphere, pascal},
    };

    fn air() -> IdealGasMixture {
        IdealGasMixture::new(vec![
            IdealGasSpecies::new("O2", 31.998, 29_376.0),
            IdealGasSpecies::new("N2", 28.014, 29_124.0),
            IdealGasSpecies::new("H2O", 18.015, 33_590.0).with_formation_enthalpy(-241.826e6),
        ])
        .unwrap()
    }

    fn air_at(temperature: f64) -> State<Mixture> {
        air()
            .state_from((
                Mixture::new(vec![0.23, 0.77, 0.0]),
                ThermodynamicTemperature::new::<kelvin>(temperature),
                Pressure::new::<atmosphere>(1.0),
            ))
            .unwrap()
    }

    #[test]
    fn pressure_roundtrip() -> Result<(), PropertyError> {
        let gas = air();
        let state = air_at(300.0);

        assert_relative_eq!(
            gas.pressure(&state)?.get::<pascal>(),
            101_325.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            state.density.get::<kilogram_per_cubic_meter>(),
            1.1715,
            max_relative = 1e-3
        );

        let back = gas.state_from((state.fluid.clone(), gas.pressure(&state)?, state.density))?;
        assert_relative_eq!(back.temperature.get::<kelvin>(), 300.0, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn energy_relations() -> Result<(), PropertyError> {
        let gas = air();
        let state = air_at(500.0);

        let h = gas.enthalpy(&state)?.get::<joule_per_kilogram>();
        let u = gas.internal_energy(&state)?.get::<joule_per_kilogram>();
        let p = gas.pressure(&state)?.get::<pascal>();
        let rho = state.density.get::<kilogram_per_cubic_meter>();
        assert_relative_eq!(h - u, p / rho, max_relative = 1e-12);

        let cp = gas.cp(&state)?.get::<joule_per_kilogram_kelvin>();
        let cv = gas.cv(&state)?.get::<joule_per_kilogram_kelvin>();
        let moles = gas.moles_per_mass(&state)?;
        assert_relative_eq!(cp - cv, GAS_CONSTANT * moles, max_relative = 1e-12);

        // du/dT equals cv for constant heat capacities.
        let hotter = state.clone().with_temperature(ThermodynamicTemperature::new::<kelvin>(501.0));
        let du = gas.internal_energy(&hotter)?.get::<joule_per_kilogram>() - u;
        assert_relative_eq!(du, cv, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn enthalpy_at_reference_is_formation_enthalpy() -> Result<(), PropertyError> {
        let gas = air();
        let state = gas.state_from((
            Mixture::new(vec![0.0, 0.0, 1.0]),
            ThermodynamicTemperature::new::<kelvin>(REFERENCE_TEMPERATURE),
            MassDensity::new::<kilogram_per_cubic_meter>(0.7),
        ))?;

        assert_relative_eq!(
            gas.enthalpy(&state)?.get::<joule_per_kilogram>(),
            -241.826e6 / 18.015
        );
        Ok(())
    }

    #[test]
    fn partial_molar_energies_average_to_mixture_energy() -> Result<(), PropertyError> {
        let gas = air();
        let state = air_at(900.0);

        let u_k = gas.partial_molar_int_energies(&state)?;
        let u: f64 = u_k
            .iter()
            .zip(state.fluid.mass_fractions())
            .zip(gas.molecular_weights())
            .map(|((u, y), w)| u * y / w)
            .sum();

        assert_relative_eq!(
            u,
            gas.internal_energy(&state)?.get::<joule_per_kilogram>(),
            max_relative = 1e-12
        );
        Ok(())
    }

    #[test]
    fn formation_enthalpy_modify_and_reset() {
        let mut gas = air();
        gas.modify_formation_enthalpy(2, -1.0e8);
        assert_relative_eq!(gas.formation_enthalpy(2), -1.0e8);

        gas.reset_formation_enthalpy(2);
        assert_relative_eq!(gas.formation_enthalpy(2), -241.826e6);
    }

    #[test]
    fn invalid_states_are_errors() {
        let gas = air();
        let empty = State::new(
            ThermodynamicTemperature::new::<kelvin>(300.0),
            MassDensity::new::<kilogram_per_cubic_meter>(1.0),
            Mixture::new(vec![0.0, 0.0, 0.0]),
        );
        assert!(matches!(
            gas.pressure(&empty),
            Err(PropertyError::Undefined { .. })
        ));

        let short = empty.clone().with_fluid(Mixture::new(vec![1.0]));
        assert!(matches!(
            gas.enthalpy(&short),
            Err(PropertyError::InvalidState { .. })
        ));

        let cold = empty
            .with_fluid(Mixture::new(vec![0.0, 1.0, 0.0]))
            .with_temperature(ThermodynamicTemperature::new::<kelvin>(0.0));
        assert!(matches!(
            gas.cp(&cold),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn rejects_bad_species() {
        assert_eq!(
            IdealGasMixture::new(vec![]),
            Err(IdealGasMixtureError::NoSpecies)
        );
        assert!(matches!(
            IdealGasMixture::new(vec![
                IdealGasSpecies::new("A", 1.0, 1.0),
                IdealGasSpecies::new("A", 2.0, 1.0),
            ]),
            Err(IdealGasMixtureError::DuplicateSpecies { .. })
        ));
        assert!(matches!(
            IdealGasMixture::new(vec![IdealGasSpecies::new("A", 0.0, 1.0)]),
            Err(IdealGasMixtureError::MolecularWeight { .. })
        ));
    }
}
