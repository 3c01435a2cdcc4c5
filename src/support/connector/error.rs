use thiserror::Error;

use crate::support::{constraint::ConstraintError, kinetics::KineticsError};

/// Errors raised by walls, surfaces, and flow devices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectorError {
    #[error("invalid wall area: {0}")]
    Area(ConstraintError),

    #[error("invalid mass flow rate: {0}")]
    MassFlow(ConstraintError),

    #[error("surface phase has {phase} species but its kinetics reports {kinetics}")]
    SurfaceMismatch { phase: usize, kinetics: usize },

    #[error("expected {expected} coverages, got {found}")]
    CoverageLength { expected: usize, found: usize },

    #[error("reaction {index} is out of range for a mechanism with {n_reactions} reactions")]
    ReactionOutOfRange { index: usize, n_reactions: usize },

    #[error("parameter vector has {len} values but slot {slot} is registered")]
    ParameterVectorTooShort { slot: usize, len: usize },

    #[error(transparent)]
    Kinetics(#[from] KineticsError),
}
