//! Zero-dimensional reactor models.
//!
//! A [`Reactor`] evaluates the right-hand side of its own balances. A
//! [`ReactorNet`] couples reactors through shared walls and flow devices,
//! and [`Transient`] adapts a network to [`twine_core::Model`] so Twine's
//! transient solvers can integrate it.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use twine_reactors::{
//!     models::reactor::{EnergyFormulation, Reactor, ReactorNet, Transient, TransientProblem},
//!     support::{
//!         kinetics::{self, MassAction, RateConstant, Reaction},
//!         thermo::{
//!             self,
//!             capability::StateFrom,
//!             fluid::Mixture,
//!             model::{IdealGasMixture, IdealGasSpecies},
//!         },
//!     },
//! };
//! use twine_solvers::transient::euler;
//! use uom::si::{
//!     f64::{Pressure, ThermodynamicTemperature, Time},
//!     pressure::atmosphere,
//!     thermodynamic_temperature::kelvin,
//!     time::second,
//! };
//!
//! let gas = IdealGasMixture::new(vec![
//!     IdealGasSpecies::new("A", 28.0, 30_000.0),
//!     IdealGasSpecies::new("B", 28.0, 30_000.0).with_formation_enthalpy(-1.0e7),
//! ])?;
//! let initial = gas.state_from((
//!     Mixture::new(vec![1.0, 0.0]),
//!     ThermodynamicTemperature::new::<kelvin>(600.0),
//!     Pressure::new::<atmosphere>(1.0),
//! ))?;
//!
//! let gas = thermo::share(gas);
//! let mechanism = MassAction::new(
//!     Rc::clone(&gas),
//!     &[Reaction::new(RateConstant::constant(2.0)).reactant("A", 1).product("B", 1)],
//! )?;
//!
//! let mut reactor = Reactor::new("batch", EnergyFormulation::InternalEnergy);
//! reactor.set_thermo(gas, initial)?;
//! reactor.set_kinetics(kinetics::share(mechanism));
//!
//! let mut net = ReactorNet::new();
//! net.add_reactor(reactor);
//!
//! let model = Transient::new(net);
//! let start = model.initial_input(Time::new::<second>(0.0))?;
//! let solution =
//!     euler::solve_unobserved(&model, &TransientProblem, start, Time::new::<second>(1.0e-3), 500)?;
//!
//! let last = &solution.history[500].input;
//! assert!(last.state.values()[3] < 0.5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod core;
mod net;
mod transient;

pub use self::core::{
    EnergyFormulation, Reactor, ReactorError, StateLayout, SurfaceBlock, TemperatureSolution,
    TemperatureSolveConfig, TemperatureSolveError, TemperatureTarget, WallRates,
    solve_temperature,
};
pub use net::{NetError, ReactorNet};
pub use transient::{StateRates, StateVector, Transient, TransientInput, TransientProblem};
