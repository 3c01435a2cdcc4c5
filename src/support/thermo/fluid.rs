//! Fluid data carried by thermodynamic states.
//!
//! A fluid type is the state-defining data a model needs beyond temperature
//! and density. Reacting gases carry their composition in a [`Mixture`].

mod mixture;

pub use mixture::Mixture;
