use crate::support::thermo::State;

use super::ThermoModel;

/// Capability for constructing a [`State`] from a typed input.
///
/// A thermodynamic [`State`] includes a `Fluid` value, which for reacting gases
/// carries the mixture composition. `StateFrom<Input>` expresses, at compile
/// time, which combinations of inputs a model can use to construct a state.
/// If a model does not implement `StateFrom<Input>`, that input is simply not
/// supported (no runtime "not implemented" errors).
///
/// Inputs are ordinary Rust tuples, for example
/// `(Mixture, ThermodynamicTemperature, Pressure)` to build a reactor's initial
/// state from temperature, pressure, and composition.
pub trait StateFrom<Input>: ThermoModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a thermodynamic state from the provided input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be created from `input`.
    fn state_from(&self, input: Input) -> Result<State<Self::Fluid>, Self::Error>;
}
