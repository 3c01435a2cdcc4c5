//! Thermodynamic property models.

pub mod ideal_gas_mixture;

pub(crate) mod ideal_gas_eos;

pub use ideal_gas_mixture::{IdealGasMixture, IdealGasMixtureError, IdealGasSpecies};
