use std::fmt::Debug;

use crate::support::thermo::fluid::Mixture;

use super::{
    HasCp, HasCv, HasEnthalpy, HasFormationEnthalpy, HasInternalEnergy, HasMolecularWeights,
    HasPartialMolarIntEnergies, HasPressure, SpeciesNames, ThermoModel,
};

/// Required thermo model bounds for the gas phase of a reactor.
///
/// This trait is object safe so reactors and kinetics can share a phase as a
/// [`SharedThermo`](crate::support::thermo::SharedThermo) handle.
pub trait MixtureModel:
    Debug
    + ThermoModel<Fluid = Mixture>
    + SpeciesNames
    + HasMolecularWeights
    + HasPressure
    + HasInternalEnergy
    + HasEnthalpy
    + HasCp
    + HasCv
    + HasPartialMolarIntEnergies
    + HasFormationEnthalpy
{
}

impl<T> MixtureModel for T where
    T: Debug
        + ThermoModel<Fluid = Mixture>
        + SpeciesNames
        + HasMolecularWeights
        + HasPressure
        + HasInternalEnergy
        + HasEnthalpy
        + HasCp
        + HasCv
        + HasPartialMolarIntEnergies
        + HasFormationEnthalpy
{
}
