//! A network of reactors integrated as one system.
//!
//! The network concatenates the state vectors of its reactors, in the order
//! they were added, and owns the registry that hands out global sensitivity
//! parameter slots.

mod error;

pub use error::NetError;

use std::ops::Range;

use tracing::info;
use uom::si::{f64::Time, time::second};

use crate::support::sensitivity::SensitivityRegistry;

use super::Reactor;

/// An ordered collection of coupled reactors.
#[derive(Debug, Default)]
pub struct ReactorNet {
    reactors: Vec<Reactor>,
    offsets: Vec<usize>,
    n_equations: usize,
    registry: SensitivityRegistry,
    initialized: bool,
}

impl ReactorNet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reactor and returns its index in the network.
    pub fn add_reactor(&mut self, reactor: Reactor) -> usize {
        self.reactors.push(reactor);
        self.initialized = false;
        self.reactors.len() - 1
    }

    #[must_use]
    pub fn reactor(&self, index: usize) -> Option<&Reactor> {
        self.reactors.get(index)
    }

    /// Returns a reactor for modification.
    ///
    /// The network must be initialized again before it is evaluated.
    pub fn reactor_mut(&mut self, index: usize) -> Option<&mut Reactor> {
        self.initialized = false;
        self.reactors.get_mut(index)
    }

    #[must_use]
    pub fn reactors(&self) -> &[Reactor] {
        &self.reactors
    }

    /// Initializes every reactor and assigns its offset in the global state.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Empty`] for a network without reactors, or the
    /// first error raised by a reactor.
    pub fn initialize(&mut self, t0: Time) -> Result<(), NetError> {
        if self.reactors.is_empty() {
            return Err(NetError::Empty);
        }

        self.initialized = false;
        self.offsets.clear();
        let mut n_equations = 0;
        for reactor in &mut self.reactors {
            reactor.initialize(t0)?;
            self.offsets.push(n_equations);
            n_equations += reactor.n_equations();
        }
        self.n_equations = n_equations;
        self.initialized = true;

        info!(
            t0 = t0.get::<second>(),
            n_reactors = self.reactors.len(),
            n_equations,
            n_sens_params = self.registry.len(),
            "initialized reactor network"
        );
        Ok(())
    }

    /// Returns the length of the global state vector, or 0 before initialization.
    #[must_use]
    pub fn n_equations(&self) -> usize {
        if self.initialized { self.n_equations } else { 0 }
    }

    /// Returns the range of the global state vector held by reactor `index`.
    #[must_use]
    pub fn reactor_range(&self, index: usize) -> Option<Range<usize>> {
        if !self.initialized {
            return None;
        }
        let start = *self.offsets.get(index)?;
        Some(start..start + self.reactors[index].n_equations())
    }

    /// Writes the global state vector into `y`.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::NotInitialized`], [`NetError::StateLength`], or
    /// the first error raised by a reactor.
    pub fn get_state(&mut self, y: &mut [f64]) -> Result<(), NetError> {
        self.check_len(y)?;
        for (reactor, &offset) in self.reactors.iter_mut().zip(&self.offsets) {
            let n = reactor.n_equations();
            reactor.get_state(&mut y[offset..offset + n])?;
        }
        Ok(())
    }

    /// Synchronizes every reactor with the global state vector `y`.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::NotInitialized`], [`NetError::StateLength`], or
    /// the first error raised by a reactor.
    pub fn update_state(&mut self, y: &[f64]) -> Result<(), NetError> {
        self.check_len(y)?;
        for (reactor, &offset) in self.reactors.iter_mut().zip(&self.offsets) {
            let n = reactor.n_equations();
            reactor.update_state(&y[offset..offset + n])?;
        }
        Ok(())
    }

    /// Evaluates the global right-hand side at `(time, y)`.
    ///
    /// Every reactor is synchronized with `y` before any reactor is
    /// evaluated, so walls and flow devices see current conditions on both
    /// of their sides.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::NotInitialized`], [`NetError::StateLength`], or
    /// the first error raised by a reactor.
    pub fn eval(
        &mut self,
        time: Time,
        y: &[f64],
        ydot: &mut [f64],
        params: Option<&[f64]>,
    ) -> Result<(), NetError> {
        self.check_len(ydot)?;
        self.update_state(y)?;
        for (reactor, &offset) in self.reactors.iter_mut().zip(&self.offsets) {
            let range = offset..offset + reactor.n_equations();
            reactor.eval_eqs(time, &y[range.clone()], &mut ydot[range], params)?;
        }
        Ok(())
    }

    /// Registers the rate multiplier of gas reaction `reaction` in reactor
    /// `reactor` and returns its global parameter slot.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::ReactorIndex`] or the reactor's registration error.
    pub fn register_reaction_sensitivity(
        &mut self,
        reactor: usize,
        reaction: usize,
    ) -> Result<usize, NetError> {
        let (reactors, registry) = (&mut self.reactors, &mut self.registry);
        let r = lookup(reactors, reactor)?;
        Ok(r.register_reaction_sensitivity(reaction, registry)?)
    }

    /// Registers the formation enthalpy of gas species `species` in reactor
    /// `reactor` and returns its global parameter slot.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::ReactorIndex`] or the reactor's registration error.
    pub fn register_enthalpy_sensitivity(
        &mut self,
        reactor: usize,
        species: usize,
    ) -> Result<usize, NetError> {
        let (reactors, registry) = (&mut self.reactors, &mut self.registry);
        let r = lookup(reactors, reactor)?;
        Ok(r.register_enthalpy_sensitivity(species, registry)?)
    }

    /// Registers the rate multiplier of surface reaction `reaction` on wall
    /// `wall` of reactor `reactor` and returns its global parameter slot.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::ReactorIndex`] or the reactor's registration error.
    pub fn register_surface_reaction_sensitivity(
        &mut self,
        reactor: usize,
        wall: usize,
        reaction: usize,
    ) -> Result<usize, NetError> {
        let (reactors, registry) = (&mut self.reactors, &mut self.registry);
        let r = lookup(reactors, reactor)?;
        Ok(r.register_surface_reaction_sensitivity(wall, reaction, registry)?)
    }

    #[must_use]
    pub fn sensitivity_registry(&self) -> &SensitivityRegistry {
        &self.registry
    }

    #[must_use]
    pub fn n_sens_params(&self) -> usize {
        self.registry.len()
    }

    /// Returns `"<reactor>: <component>"` for global state index `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::NotInitialized`] before initialization or
    /// [`NetError::ComponentOutOfBounds`] past the end of the state.
    pub fn component_name(&self, index: usize) -> Result<String, NetError> {
        if !self.initialized {
            return Err(NetError::NotInitialized);
        }
        let (reactor, offset) = self
            .reactors
            .iter()
            .zip(&self.offsets)
            .find(|&(reactor, &offset)| (offset..offset + reactor.n_equations()).contains(&index))
            .ok_or(NetError::ComponentOutOfBounds {
                index,
                n_equations: self.n_equations,
            })?;
        let component = reactor.component_name(index - offset)?;
        Ok(format!("{}: {component}", reactor.name()))
    }

    /// Returns the global state index of component `name` of reactor `reactor`.
    #[must_use]
    pub fn global_component_index(&self, reactor: usize, name: &str) -> Option<usize> {
        let range = self.reactor_range(reactor)?;
        Some(range.start + self.reactors[reactor].component_index(name)?)
    }

    fn check_len(&self, values: &[f64]) -> Result<(), NetError> {
        if !self.initialized {
            return Err(NetError::NotInitialized);
        }
        if values.len() < self.n_equations {
            return Err(NetError::StateLength {
                expected: self.n_equations,
                found: values.len(),
            });
        }
        Ok(())
    }
}

fn lookup(reactors: &mut [Reactor], index: usize) -> Result<&mut Reactor, NetError> {
    let n_reactors = reactors.len();
    reactors
        .get_mut(index)
        .ok_or(NetError::ReactorIndex { index, n_reactors })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::joule_per_kilogram, f64::MassRate, mass::kilogram,
        mass_rate::kilogram_per_second,
    };

    use crate::{
        models::reactor::{
            ReactorError,
            core::test_support::{isomerization, reactor_at, wall},
        },
        support::connector::{MassFlowController, Side, share_flow_device, share_wall},
    };

    fn t0() -> Time {
        Time::new::<second>(0.0)
    }

    fn evaluated(net: &mut ReactorNet) -> Vec<f64> {
        net.initialize(t0()).unwrap();
        let mut y = vec![0.0; net.n_equations()];
        net.get_state(&mut y).unwrap();
        let mut ydot = vec![f64::NAN; y.len()];
        net.eval(t0(), &y, &mut ydot, None).unwrap();
        ydot
    }

    #[test]
    fn empty_or_uninitialized_networks_are_rejected() {
        let mut net = ReactorNet::new();
        assert!(matches!(net.initialize(t0()), Err(NetError::Empty)));

        net.add_reactor(reactor_at("a", 1.0, &[], vec![1.0, 0.0, 0.0]));
        assert_eq!(net.n_equations(), 0);
        assert!(matches!(
            net.get_state(&mut [0.0; 6]),
            Err(NetError::NotInitialized)
        ));

        net.initialize(t0()).unwrap();
        assert_eq!(net.n_equations(), 6);
        assert!(matches!(
            net.get_state(&mut [0.0; 4]),
            Err(NetError::StateLength {
                expected: 6,
                found: 4
            })
        ));
    }

    #[test]
    fn piston_trades_volume_between_reactors() {
        let piston = share_wall(wall().with_expansion_rate_coefficient(1.0e-6));
        let mut a = reactor_at("a", 2.0, &[], vec![1.0, 0.0, 0.0]);
        let mut b = reactor_at("b", 1.0, &[], vec![1.0, 0.0, 0.0]);
        a.add_wall(piston.clone(), Side::Left);
        b.add_wall(piston, Side::Right);

        let mut net = ReactorNet::new();
        net.add_reactor(a);
        net.add_reactor(b);
        let ydot = evaluated(&mut net);

        let expected = 1.0e-6 * 0.5 * 101_325.0;
        assert_relative_eq!(ydot[1], expected, max_relative = 1e-9);
        assert_relative_eq!(ydot[7], -expected, max_relative = 1e-9);
    }

    #[test]
    fn flow_between_reactors_conserves_mass_and_energy() {
        let mfc = share_flow_device(
            MassFlowController::new(MassRate::new::<kilogram_per_second>(0.05)).unwrap(),
        );
        let mut a = reactor_at("a", 1.0, &[], vec![1.0, 0.0, 0.0]);
        let mut b = reactor_at("b", 1.0, &[], vec![0.0, 0.0, 1.0]);
        a.add_outlet(mfc.clone());
        b.add_inlet(mfc);

        let mut net = ReactorNet::new();
        net.add_reactor(a);
        net.add_reactor(b);
        let ydot = evaluated(&mut net);

        let a = net.reactor(0).unwrap();
        let h_a = a.enthalpy().get::<joule_per_kilogram>();
        let m_b = net.reactor(1).unwrap().mass().get::<kilogram>();

        assert_relative_eq!(ydot[0], -0.05);
        assert_relative_eq!(ydot[6], 0.05);
        assert_relative_eq!(ydot[2], -0.05 * h_a);
        assert_relative_eq!(ydot[8], 0.05 * h_a);
        assert_relative_eq!(ydot[9], 0.05 / m_b);
        assert_relative_eq!(ydot[11], -0.05 / m_b);
        assert_eq!(&ydot[3..6], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn components_are_named_across_reactors() {
        let mut net = ReactorNet::new();
        net.add_reactor(reactor_at("a", 1.0, &[isomerization(1.0)], vec![1.0, 0.0, 0.0]));
        net.add_reactor(reactor_at("b", 1.0, &[], vec![1.0, 0.0, 0.0]));
        assert_eq!(net.global_component_index(1, "mass"), None);

        net.initialize(t0()).unwrap();
        assert_eq!(net.n_equations(), 12);
        assert_eq!(net.reactor_range(1), Some(6..12));
        assert_eq!(net.component_name(0).unwrap(), "a: mass");
        assert_eq!(net.component_name(9).unwrap(), "b: A");
        assert_eq!(net.global_component_index(1, "int_energy"), Some(8));
        assert_eq!(net.global_component_index(0, "C"), Some(5));
        assert_eq!(net.global_component_index(2, "mass"), None);
        assert!(matches!(
            net.component_name(12),
            Err(NetError::ComponentOutOfBounds {
                index: 12,
                n_equations: 12
            })
        ));
    }

    #[test]
    fn sensitivity_parameters_get_global_slots() {
        let mut net = ReactorNet::new();
        net.add_reactor(reactor_at("a", 1.0, &[isomerization(1.0)], vec![1.0, 0.0, 0.0]));
        net.add_reactor(reactor_at("b", 1.0, &[isomerization(2.0)], vec![1.0, 0.0, 0.0]));

        assert_eq!(net.register_reaction_sensitivity(1, 0).unwrap(), 0);
        assert_eq!(net.register_enthalpy_sensitivity(0, 2).unwrap(), 1);
        assert!(matches!(
            net.register_reaction_sensitivity(2, 0),
            Err(NetError::ReactorIndex {
                index: 2,
                n_reactors: 2
            })
        ));
        assert!(matches!(
            net.register_surface_reaction_sensitivity(0, 0, 0),
            Err(NetError::Reactor(ReactorError::IndexOutOfRange { what: "wall", .. }))
        ));

        let labels: Vec<_> = net.sensitivity_registry().labels().collect();
        assert_eq!(labels, ["b: A => B", "a: C enthalpy"]);
        assert_eq!(net.n_sens_params(), 2);

        net.initialize(t0()).unwrap();
        let mut y = vec![0.0; net.n_equations()];
        net.get_state(&mut y).unwrap();
        let mut base = vec![0.0; y.len()];
        let mut scaled = vec![0.0; y.len()];
        net.eval(t0(), &y, &mut base, Some(&[1.0, 0.0])).unwrap();
        net.eval(t0(), &y, &mut scaled, Some(&[3.0, 0.0])).unwrap();

        assert_relative_eq!(base[9], -2.0, max_relative = 1e-12);
        assert_relative_eq!(scaled[9], -6.0, max_relative = 1e-12);
        assert_eq!(base[3], scaled[3]);
    }
}
