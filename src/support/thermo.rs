//! Thermodynamic property modeling for reacting mixtures.
//!
//! Properties are evaluated on a value-type [`State`], so a model never holds
//! the "current" state of a phase. Callers keep their own copy and pass it back
//! for every evaluation.

mod error;
mod shared;
mod state;
mod surface;

pub mod capability;
pub mod fluid;
pub mod model;

pub use error::PropertyError;
pub use shared::{SharedThermo, share};
pub use state::State;
pub use surface::{SurfacePhase, SurfacePhaseError, SurfaceSpecies, SurfaceState};

/// Universal gas constant, J/kmol·K.
pub const GAS_CONSTANT: f64 = 8_314.462_618;

/// Reference temperature for standard formation enthalpies, K.
pub const REFERENCE_TEMPERATURE: f64 = 298.15;
