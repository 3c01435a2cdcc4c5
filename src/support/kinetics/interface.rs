use uom::si::mass_density::kilogram_per_cubic_meter;

use crate::support::thermo::{
    PropertyError, SharedThermo, State, SurfacePhase, SurfaceState,
    capability::{HasMolecularWeights, SpeciesNames},
    fluid::Mixture,
};

use super::{
    KineticsError, Mechanism, Reaction, SurfaceKinetics, check_buffer, reaction::ResolvedReaction,
};

/// Mass-action kinetics on a surface phase adjacent to a gas.
///
/// Gas species enter rate expressions as volumetric concentrations
/// `ρ·Yₖ/Wₖ` (kmol/m³) and surface species as `Γ·θₖ/sizeₖ` (kmol/m²).
/// Species names resolve against the gas first, then the surface.
#[derive(Debug)]
pub struct InterfaceKinetics {
    gas: SharedThermo,
    molecular_weights: Vec<f64>,
    surface: SurfacePhase,
    reactions: Vec<ResolvedReaction>,
    multipliers: Vec<f64>,
}

impl InterfaceKinetics {
    /// Builds a surface mechanism between `gas` and `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError::UnknownSpecies`] if a reaction names a species
    /// found in neither phase.
    pub fn new(
        gas: SharedThermo,
        surface: SurfacePhase,
        reactions: &[Reaction],
    ) -> Result<Self, KineticsError> {
        let (molecular_weights, reactions) = {
            let phase = gas.borrow();
            let n_gas = phase.n_species();
            let lookup = |name: &str| {
                phase
                    .species_index(name)
                    .or_else(|| surface.species_index(name).map(|k| n_gas + k))
            };
            let resolved = reactions
                .iter()
                .map(|rxn| rxn.resolve(lookup))
                .collect::<Result<Vec<_>, _>>()?;
            (phase.molecular_weights().to_vec(), resolved)
        };

        Ok(Self {
            multipliers: vec![1.0; reactions.len()],
            gas,
            molecular_weights,
            surface,
            reactions,
        })
    }

    /// Returns the surface phase the mechanism acts on.
    #[must_use]
    pub fn surface(&self) -> &SurfacePhase {
        &self.surface
    }
}

impl Mechanism for InterfaceKinetics {
    fn n_reactions(&self) -> usize {
        self.reactions.len()
    }

    fn n_total_species(&self) -> usize {
        self.molecular_weights.len() + self.surface.n_species()
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

impl SurfaceKinetics for InterfaceKinetics {
    fn surface_species_offset(&self) -> usize {
        self.molecular_weights.len()
    }

    fn net_production_rates(
        &self,
        gas: &State<Mixture>,
        surface: &SurfaceState,
        sdot: &mut [f64],
    ) -> Result<(), KineticsError> {
        let n_total = self.n_total_species();
        check_buffer(n_total, sdot)?;
        if gas.fluid.n_species() != self.molecular_weights.len()
            || surface.coverages.len() != self.surface.n_species()
        {
            return Err(PropertyError::InvalidState {
                context: format!(
                    "{} gas and {} surface values for a mechanism over {} and {} species",
                    gas.fluid.n_species(),
                    surface.coverages.len(),
                    self.molecular_weights.len(),
                    self.surface.n_species(),
                ),
            }
            .into());
        }

        let rho = gas.density.get::<kilogram_per_cubic_meter>();
        let mut concentrations: Vec<f64> = gas
            .fluid
            .mass_fractions()
            .iter()
            .zip(&self.molecular_weights)
            .map(|(y, w)| rho * y / w)
            .collect();
        concentrations.extend(self.surface.concentrations(&surface.coverages));

        sdot[..n_total].fill(0.0);
        for (rxn, multiplier) in self.reactions.iter().zip(&self.multipliers) {
            let q = multiplier * rxn.rate_of_progress(surface.temperature, &concentrations);
            rxn.accumulate(q, sdot);
        }
        Ok(())
    }
}
