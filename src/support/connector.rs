//! Walls and flow devices that connect reactors to each other and to their
//! surroundings.
//!
//! A reactor holds connectors as shared handles tagged with the [`Side`] that
//! faces it, so the same wall can separate two reactors and the same flow
//! device can be the outlet of one reactor and the inlet of another.

mod error;
mod flow_device;
mod surface;
mod wall;

use std::{cell::RefCell, fmt::Debug, rc::Rc};

use uom::si::f64::{
    Area, MassRate, Power, Pressure, ThermodynamicTemperature, Time, VolumeRate,
};

use crate::support::units::SpecificEnthalpy;

pub use error::ConnectorError;
pub use flow_device::MassFlowController;
pub use surface::ReactingSurface;
pub use wall::SimpleWall;

/// Shared handle to a wall.
pub type SharedWall = Rc<RefCell<dyn Wall>>;

/// Shared handle to a flow device.
pub type SharedFlowDevice = Rc<RefCell<dyn FlowDevice>>;

/// Wraps a wall in a [`SharedWall`] handle.
pub fn share_wall<W: Wall + 'static>(wall: W) -> SharedWall {
    Rc::new(RefCell::new(wall))
}

/// Wraps a flow device in a [`SharedFlowDevice`] handle.
pub fn share_flow_device<F: FlowDevice + 'static>(device: F) -> SharedFlowDevice {
    Rc::new(RefCell::new(device))
}

/// The face of a wall a reactor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns 0 for [`Side::Left`] and 1 for [`Side::Right`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Returns `1 − 2·index`: wall rates are positive as seen from the left.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Conditions a reactor presents to the wall side it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideConditions {
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
}

/// A boundary that moves, conducts heat, and may carry surface chemistry.
///
/// Rates are reported from the point of view of the left side: a positive
/// volume rate expands the left reactor and a positive heat rate flows from
/// left to right.
pub trait Wall: Debug {
    /// Returns the wall area.
    fn area(&self) -> Area;

    /// Returns the rate at which the left side's volume grows.
    fn volume_rate(&self, time: Time) -> VolumeRate;

    /// Returns the heat flow from the left side to the right side.
    fn heat_rate(&self, time: Time) -> Power;

    /// Returns the reacting surface on `side`, if any.
    fn surface(&self, _side: Side) -> Option<&ReactingSurface> {
        None
    }

    fn surface_mut(&mut self, _side: Side) -> Option<&mut ReactingSurface> {
        None
    }

    /// Prepares the wall for integration.
    fn initialize(&mut self) {}

    /// Records the current state of the reactor facing `side`.
    fn set_side_conditions(&mut self, _side: Side, _conditions: SideConditions) {}

    /// Returns the number of sensitivity parameters registered on `side`.
    fn n_sens_params(&self, side: Side) -> usize {
        self.surface(side).map_or(0, ReactingSurface::n_sens_params)
    }

    /// Applies the parameters registered on `side`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::ParameterVectorTooShort`] if `params` lacks a
    /// registered slot. Nothing is perturbed in that case.
    fn set_sensitivity_parameters(
        &mut self,
        side: Side,
        params: &[f64],
    ) -> Result<(), ConnectorError> {
        match self.surface_mut(side) {
            Some(surface) => surface.apply_sensitivity(params),
            None => Ok(()),
        }
    }

    /// Restores the values perturbed by [`Wall::set_sensitivity_parameters`].
    fn reset_sensitivity_parameters(&mut self, side: Side) {
        if let Some(surface) = self.surface_mut(side) {
            surface.reset_sensitivity();
        }
    }
}

/// A device that moves mass between two reactors.
///
/// Each device knows the composition and enthalpy of the fluid it carries,
/// taken from its upstream reactor.
pub trait FlowDevice: Debug {
    /// Returns the mass flow rate through the device.
    fn mass_flow_rate(&self, time: Time) -> MassRate;

    /// Returns the mass flow rate of species `k` leaving the device.
    fn outlet_species_mass_flow_rate(&self, time: Time, k: usize) -> MassRate;

    /// Returns the specific enthalpy of the fluid carried.
    fn enthalpy_mass(&self) -> SpecificEnthalpy;

    /// Records the composition and enthalpy of the upstream reactor.
    fn set_upstream(&mut self, mass_fractions: &[f64], enthalpy: SpecificEnthalpy);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_sign_matches_index() {
        assert_eq!((Side::Left.index(), Side::Left.sign()), (0, 1.0));
        assert_eq!((Side::Right.index(), Side::Right.sign()), (1, -1.0));
        assert_eq!(Side::Left.opposite(), Side::Right);
    }
}
