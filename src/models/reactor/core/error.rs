use thiserror::Error;

use crate::support::{
    connector::ConnectorError, constraint::ConstraintError, kinetics::KineticsError,
};

use super::TemperatureSolveError;

/// Errors raised while configuring or evaluating a reactor.
#[derive(Debug, Error)]
pub enum ReactorError {
    /// The reactor has no thermo model or no kinetics model.
    #[error("reactor contents not set for reactor '{name}'")]
    MissingContents { name: String },

    /// A kinetics model is bound to a different gas phase than the reactor.
    ///
    /// `wall` is `None` for the reactor's own kinetics and the wall index for
    /// surface kinetics.
    #[error("kinetics on reactor '{name}' (wall {wall:?}) does not share the reactor's gas phase")]
    GasPhaseMismatch { name: String, wall: Option<usize> },

    /// The reactor volume is not strictly positive.
    #[error("invalid reactor volume: {0}")]
    Volume(ConstraintError),

    /// A reaction, species, or wall index is out of range.
    #[error("{what} index {index} is out of range ({len} available)")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// The wall has no reacting surface on the reactor's side.
    #[error("wall {wall} has no reacting surface facing reactor '{name}'")]
    NoSurface { name: String, wall: usize },

    /// The operation requires [`Reactor::initialize`](super::Reactor::initialize).
    #[error("reactor '{name}' has not been initialized")]
    NotInitialized { name: String },

    /// A state or derivative vector is shorter than the reactor's equation count.
    #[error("expected a vector of at least {expected} values, got {found}")]
    StateLength { expected: usize, found: usize },

    /// A component index is past the end of the state vector.
    #[error("component index {index} is out of bounds ({n_equations} equations)")]
    ComponentOutOfBounds { index: usize, n_equations: usize },

    /// A sensitivity parameter slot is missing from the parameter vector.
    #[error("parameter vector has {len} values but slot {slot} is registered")]
    ParameterVectorTooShort { slot: usize, len: usize },

    /// The temperature solve in `update_state` failed.
    #[error("temperature solve failed for reactor '{name}'")]
    TemperatureSolve {
        name: String,
        #[source]
        source: TemperatureSolveError,
    },

    /// A thermodynamic model operation failed.
    #[error("thermodynamic model failed: {context}")]
    ThermoModelFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Kinetics(#[from] KineticsError),

    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl ReactorError {
    /// Creates a thermo model failure error with context.
    pub(super) fn thermo_failed(
        context: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ThermoModelFailed {
            context: context.into(),
            source: Box::new(err),
        }
    }
}
