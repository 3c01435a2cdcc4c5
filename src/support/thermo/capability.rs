//! Capability traits used to query and construct thermodynamic states.
//!
//! Each trait exposes one property family. A reactor needs several of them at
//! once, so [`MixtureModel`] bundles everything a reacting gas phase must
//! provide and is implemented automatically for any type with the full set.

mod base;
mod mixture;
mod properties;
mod species;
mod state_from;

pub use base::ThermoModel;
pub use mixture::MixtureModel;
pub use properties::*;
pub use species::{HasFormationEnthalpy, HasMolecularWeights, SpeciesNames};
pub use state_from::StateFrom;
