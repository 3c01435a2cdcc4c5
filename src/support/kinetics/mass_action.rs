use uom::si::mass_density::kilogram_per_cubic_meter;

use crate::support::thermo::{
    PropertyError, SharedThermo, State,
    capability::{HasMolecularWeights, SpeciesNames},
    fluid::Mixture,
};

use super::{
    Kinetics, KineticsError, Mechanism, Reaction, check_buffer, reaction::ResolvedReaction,
};

/// Gas-phase mass-action kinetics.
///
/// Rates of progress are `qᵢ = mᵢ·kᵢ(T)·Π Cₖ^νₖ` with molar concentrations
/// `Cₖ = ρ·Yₖ/Wₖ` in kmol/m³, where `mᵢ` is the reaction's multiplier.
#[derive(Debug)]
pub struct MassAction {
    gas: SharedThermo,
    molecular_weights: Vec<f64>,
    reactions: Vec<ResolvedReaction>,
    multipliers: Vec<f64>,
}

impl MassAction {
    /// Builds a mechanism over the species of `gas`.
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError::UnknownSpecies`] if a reaction names a species
    /// the gas phase does not have.
    pub fn new(gas: SharedThermo, reactions: &[Reaction]) -> Result<Self, KineticsError> {
        let (molecular_weights, reactions) = {
            let phase = gas.borrow();
            let resolved = reactions
                .iter()
                .map(|rxn| rxn.resolve(|name| phase.species_index(name)))
                .collect::<Result<Vec<_>, _>>()?;
            (phase.molecular_weights().to_vec(), resolved)
        };

        Ok(Self {
            multipliers: vec![1.0; reactions.len()],
            gas,
            molecular_weights,
            reactions,
        })
    }
}

impl Mechanism for MassAction {
    fn n_reactions(&self) -> usize {
        self.reactions.len()
    }

    fn n_total_species(&self) -> usize {
        self.molecular_weights.len()
    }

    fn gas_phase(&self) -> &SharedThermo {
        &self.gas
    }

    fn multiplier(&self, i: usize) -> f64 {
        self.multipliers[i]
    }

    fn set_multiplier(&mut self, i: usize, value: f64) {
        self.multipliers[i] = value;
    }

    fn reaction_string(&self, i: usize) -> Option<&str> {
        self.reactions.get(i).map(|rxn| rxn.equation.as_str())
    }
}

impl Kinetics for MassAction {
    fn net_production_rates(
        &self,
        state: &State<Mixture>,
        wdot: &mut [f64],
    ) -> Result<(), KineticsError> {
        let n_species = self.molecular_weights.len();
        check_buffer(n_species, wdot)?;
        if state.fluid.n_species() != n_species {
            return Err(PropertyError::InvalidState {
                context: format!(
                    "composition has {} species, mechanism has {n_species}",
                    state.fluid.n_species()
                ),
            }
            .into());
        }

        let rho = state.density.get::<kilogram_per_cubic_meter>();
        let concentrations: Vec<f64> = state
            .fluid
            .mass_fractions()
            .iter()
            .zip(&self.molecular_weights)
            .map(|(y, w)| rho * y / w)
            .collect();

        wdot[..n_species].fill(0.0);
        for (rxn, multiplier) in self.reactions.iter().zip(&self.multipliers) {
            let q = multiplier * rxn.rate_of_progress(state.temperature, &concentrations);
            rxn.accumulate(q, wdot);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{MassDensity, ThermodynamicTemperature},
        thermodynamic_temperature::kelvin,
    };

    use crate::support::{
        kinetics::RateConstant,
        thermo::{
            share,
            model::{IdealGasMixture, IdealGasSpecies},
        },
    };

    fn gas() -> SharedThermo {
        share(
            IdealGasMixture::new(vec![
                IdealGasSpecies::new("A", 20.0, 30_000.0),
                IdealGasSpecies::new("B", 20.0, 30_000.0),
                IdealGasSpecies::new("C", 40.0, 40_000.0),
            ])
            .unwrap(),
        )
    }

    fn state(mass_fractions: Vec<f64>) -> State<Mixture> {
        State::new(
            ThermodynamicTemperature::new::<kelvin>(400.0),
            MassDensity::new::<kilogram_per_cubic_meter>(2.0),
            Mixture::new(mass_fractions),
        )
    }

    #[test]
    fn first_order_isomerization() {
        let kin = MassAction::new(
            gas(),
            &[Reaction::new(RateConstant::constant(5.0))
                .reactant("A", 1)
                .product("B", 1)],
        )
        .unwrap();

        let mut wdot = vec![f64::NAN; 3];
        kin.net_production_rates(&state(vec![0.5, 0.5, 0.0]), &mut wdot)
            .unwrap();

        // C_A = 2.0 * 0.5 / 20 = 0.05 kmol/m³
        assert_relative_eq!(wdot[0], -0.25);
        assert_relative_eq!(wdot[1], 0.25);
        assert_relative_eq!(wdot[2], 0.0);
    }

    #[test]
    fn multiplier_scales_rates_and_conserves_mass() {
        let mut kin = MassAction::new(
            gas(),
            &[Reaction::new(RateConstant::new(1.0e3, 0.5, 2000.0))
                .reactant("A", 1)
                .reactant("B", 1)
                .product("C", 1)],
        )
        .unwrap();
        let s = state(vec![0.3, 0.3, 0.4]);

        let mut base = vec![0.0; 3];
        kin.net_production_rates(&s, &mut base).unwrap();
        let mass_rate: f64 = base.iter().zip([20.0, 20.0, 40.0]).map(|(w, mw)| w * mw).sum();
        assert_relative_eq!(mass_rate, 0.0, epsilon = 1e-12);

        kin.set_multiplier(0, 2.5);
        let mut scaled = vec![0.0; 3];
        kin.net_production_rates(&s, &mut scaled).unwrap();
        assert_relative_eq!(scaled[2], 2.5 * base[2]);
        assert_eq!(kin.reaction_string(0), Some("A + B => C"));
        assert_eq!(kin.reaction_string(1), None);
    }

    #[test]
    fn short_buffer_is_an_error() {
        let kin = MassAction::new(gas(), &[]).unwrap();
        let mut wdot = vec![0.0; 2];
        assert_eq!(
            kin.net_production_rates(&state(vec![1.0, 0.0, 0.0]), &mut wdot),
            Err(KineticsError::BufferTooShort { needed: 3, len: 2 })
        );
    }
}
