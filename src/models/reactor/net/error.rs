use thiserror::Error;

use crate::models::reactor::ReactorError;

/// Errors raised by a [`ReactorNet`](super::ReactorNet).
#[derive(Debug, Error)]
pub enum NetError {
    /// The network has no reactors to integrate.
    #[error("reactor network is empty")]
    Empty,

    /// The operation requires [`ReactorNet::initialize`](super::ReactorNet::initialize).
    #[error("reactor network has not been initialized")]
    NotInitialized,

    #[error("reactor index {index} is out of range ({n_reactors} reactors)")]
    ReactorIndex { index: usize, n_reactors: usize },

    /// A state or derivative vector is shorter than the network's equation count.
    #[error("expected a vector of at least {expected} values, got {found}")]
    StateLength { expected: usize, found: usize },

    #[error("component index {index} is out of bounds ({n_equations} equations)")]
    ComponentOutOfBounds { index: usize, n_equations: usize },

    #[error(transparent)]
    Reactor(#[from] ReactorError),
}
