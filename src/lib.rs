//! # Twine Reactors
//!
//! Zero-dimensional chemically reacting reactor models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! A reactor is a well-mixed control volume whose gas phase may react, whose
//! walls may move, conduct heat, and host surface chemistry, and which may
//! exchange mass with its surroundings through flow devices. The reactor owns
//! the layout of its integration state vector and evaluates the right-hand side
//! of the coupled mass, volume, energy, species, and surface-coverage balances.
//!
//! ## Crate layout
//!
//! - [`models`]: Reactor models, the reactor network, and the [`twine_core::Model`]
//!   adapter used to integrate a network in time.
//! - [`support`]: Collaborator interfaces and reference implementations the
//!   reactor is evaluated against (thermodynamics, kinetics, walls, flow devices).
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
