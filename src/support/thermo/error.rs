use thiserror::Error;

/// Errors that may occur when evaluating thermodynamic properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is undefined at the given state.
    ///
    /// For example, the mean molecular weight of a mixture whose mass
    /// fractions are all zero.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The input state is outside the model's valid domain.
    ///
    /// For example, a non-positive absolute temperature.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The provided state is invalid or inconsistent.
    ///
    /// For example, a composition whose length does not match the species count.
    #[error("invalid state: {context}")]
    InvalidState { context: String },
}
