//! Extensions to [`uom`].
//!
//! Reactor APIs take [`uom`] quantities at their boundaries. This module adds
//! the mass-specific energy quantities [`uom`] lacks and a way to subtract
//! absolute temperatures, which a wall needs to drive heat transfer:
//!
//! ```
//! use uom::si::{
//!     f64::ThermodynamicTemperature,
//!     temperature_interval::kelvin as delta_kelvin,
//!     thermodynamic_temperature::kelvin,
//! };
//! use twine_reactors::support::units::TemperatureDifference;
//!
//! let gas = ThermodynamicTemperature::new::<kelvin>(650.0);
//! let surroundings = ThermodynamicTemperature::new::<kelvin>(300.0);
//! assert_eq!(gas.minus(surroundings).get::<delta_kelvin>(), 350.0);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{SpecificEnthalpy, SpecificGasConstant, SpecificInternalEnergy};
pub use temperature_difference::TemperatureDifference;
