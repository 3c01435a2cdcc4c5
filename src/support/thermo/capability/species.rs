use super::ThermoModel;

/// Name-based lookup of the species in a phase.
///
/// Implemented by gas mixtures and by surface phases alike, so a reactor can
/// resolve component names without knowing which kind of phase it is asking.
pub trait SpeciesNames {
    /// Returns the number of species in the phase.
    fn n_species(&self) -> usize;

    /// Returns the name of species `k`, or `None` if `k` is out of range.
    fn species_name(&self, k: usize) -> Option<&str>;

    /// Returns the index of the species called `name`, or `None` if the
    /// phase has no such species.
    fn species_index(&self, name: &str) -> Option<usize> {
        (0..self.n_species()).find(|&k| self.species_name(k) == Some(name))
    }
}

pub trait HasMolecularWeights: ThermoModel {
    /// Returns the molecular weight of every species, kg/kmol.
    fn molecular_weights(&self) -> &[f64];
}

/// Access to the standard formation enthalpies of a phase's species.
///
/// Sensitivity analysis perturbs a formation enthalpy for the duration of a
/// single right-hand-side evaluation and then restores it, so models must be
/// able to return to their original values on demand.
pub trait HasFormationEnthalpy: ThermoModel {
    /// Returns the standard formation enthalpy of species `k` at 298.15 K, J/kmol.
    fn formation_enthalpy(&self, k: usize) -> f64;

    /// Overrides the standard formation enthalpy of species `k`, J/kmol.
    fn modify_formation_enthalpy(&mut self, k: usize, value: f64);

    /// Restores the original standard formation enthalpy of species `k`.
    fn reset_formation_enthalpy(&mut self, k: usize);

    /// Discards any cached evaluation that depends on the formation enthalpies.
    fn invalidate_cache(&mut self) {}
}
