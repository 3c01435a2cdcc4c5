use thiserror::Error;

use crate::support::thermo::PropertyError;

/// Errors that may occur when building or evaluating kinetics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KineticsError {
    #[error("unknown species `{name}` in reaction `{equation}`")]
    UnknownSpecies { name: String, equation: String },

    #[error("rate buffer holds {len} values but {needed} are needed")]
    BufferTooShort { needed: usize, len: usize },

    #[error(transparent)]
    Property(#[from] PropertyError),
}
