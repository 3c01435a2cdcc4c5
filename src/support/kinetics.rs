//! Reaction-rate evaluation for gas-phase and surface chemistry.
//!
//! A reactor needs only net production rates, reaction multipliers and
//! reaction labels from its chemistry, so the traits here stay small:
//!
//! - [`Mechanism`] is the shared bookkeeping (reaction count, multipliers,
//!   reaction strings, and the gas phase the mechanism is bound to).
//! - [`Kinetics`] evaluates homogeneous rates, kmol/m³·s.
//! - [`SurfaceKinetics`] evaluates heterogeneous rates on a surface, kmol/m²·s.
//!
//! [`MassAction`] and [`InterfaceKinetics`] implement them for irreversible
//! reactions with modified-Arrhenius rate constants.

mod error;
mod interface;
mod mass_action;
mod reaction;

use std::{cell::RefCell, fmt::Debug, rc::Rc};

use crate::support::thermo::{SharedThermo, State, SurfaceState, fluid::Mixture};

pub use error::KineticsError;
pub use interface::InterfaceKinetics;
pub use mass_action::MassAction;
pub use reaction::{RateConstant, Reaction};

/// Shared handle to a gas-phase kinetics model.
pub type SharedKinetics = Rc<RefCell<dyn Kinetics>>;

/// Wraps a kinetics model in a [`SharedKinetics`] handle.
pub fn share<K: Kinetics + 'static>(kinetics: K) -> SharedKinetics {
    Rc::new(RefCell::new(kinetics))
}

/// Bookkeeping common to every reaction mechanism.
pub trait Mechanism: Debug {
    /// Returns the number of reactions.
    fn n_reactions(&self) -> usize;

    /// Returns the number of species the mechanism reports rates for.
    fn n_total_species(&self) -> usize;

    /// Returns the gas phase whose species come first in the rate vector.
    fn gas_phase(&self) -> &SharedThermo;

    /// Returns the rate multiplier of reaction `i`.
    fn multiplier(&self, i: usize) -> f64;

    /// Sets the rate multiplier of reaction `i`.
    fn set_multiplier(&mut self, i: usize, value: f64);

    /// Returns a human-readable equation for reaction `i`.
    fn reaction_string(&self, i: usize) -> Option<&str>;

    /// Discards any cached evaluation.
    fn invalidate_cache(&mut self) {}
}

/// Homogeneous (volumetric) kinetics.
pub trait Kinetics: Mechanism {
    /// Writes the net molar production rate of every gas species, kmol/m³·s.
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError`] if the rates cannot be evaluated at `state`
    /// or if `wdot` is shorter than [`Mechanism::n_total_species`].
    fn net_production_rates(
        &self,
        state: &State<Mixture>,
        wdot: &mut [f64],
    ) -> Result<(), KineticsError>;
}

/// Heterogeneous (surface) kinetics.
///
/// Rates are indexed over the gas species followed by the surface species,
/// so surface species `k` sits at `surface_species_offset() + k`.
pub trait SurfaceKinetics: Mechanism {
    /// Returns the index of the first surface species in the rate vector.
    fn surface_species_offset(&self) -> usize;

    /// Writes the net molar production rate of every species, kmol/m²·s.
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError`] if the rates cannot be evaluated or if `sdot`
    /// is shorter than [`Mechanism::n_total_species`].
    fn net_production_rates(
        &self,
        gas: &State<Mixture>,
        surface: &SurfaceState,
        sdot: &mut [f64],
    ) -> Result<(), KineticsError>;
}

/// Checks that an output buffer can hold `needed` rates.
fn check_buffer(needed: usize, buffer: &[f64]) -> Result<(), KineticsError> {
    if buffer.len() < needed {
        Err(KineticsError::BufferTooShort {
            needed,
            len: buffer.len(),
        })
    } else {
        Ok(())
    }
}
