//! Time integration of a reactor network with Twine solvers.
//!
//! [`Transient`] is a [`Model`] whose input is a time and a global state
//! vector and whose output is the state's time derivative.
//! [`TransientProblem`] tells a transient solver how to step that state, so
//! any solver in `twine_solvers::transient` can integrate a [`ReactorNet`].

use std::{
    cell::{Ref, RefCell},
    convert::Infallible,
};

use twine_core::{DerivativeOf, Model, OdeProblem, StepIntegrable};
use uom::si::{f64::Time, time::second};

use super::{NetError, ReactorNet};

/// The global state vector of a reactor network.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector(Vec<f64>);

impl StateVector {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Time derivative of a [`StateVector`], per second.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRates(Vec<f64>);

impl StateRates {
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

impl StepIntegrable<Time> for StateVector {
    type Derivative = StateRates;

    fn step(&self, derivative: StateRates, delta: Time) -> Self {
        let dt = delta.get::<second>();
        Self(
            self.0
                .iter()
                .zip(&derivative.0)
                .map(|(y, rate)| y + rate * dt)
                .collect(),
        )
    }
}

/// Input to a [`Transient`] model.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientInput {
    pub time: Time,
    pub state: StateVector,
}

/// A reactor network evaluated as a [`Model`].
///
/// Reactors update their cached state on every evaluation, so the network
/// sits behind a `RefCell`: [`Model::call`] takes `&self`.
#[derive(Debug)]
pub struct Transient {
    net: RefCell<ReactorNet>,
    params: Option<Vec<f64>>,
}

impl Transient {
    #[must_use]
    pub fn new(net: ReactorNet) -> Self {
        Self {
            net: RefCell::new(net),
            params: None,
        }
    }

    /// Evaluates every step with the given sensitivity parameter vector.
    #[must_use]
    pub fn with_sensitivity_parameters(mut self, params: Vec<f64>) -> Self {
        self.params = Some(params);
        self
    }

    /// Initializes the network at `t0` and returns the matching input.
    ///
    /// # Errors
    ///
    /// Returns any error raised while initializing the network or reading
    /// its state.
    pub fn initial_input(&self, t0: Time) -> Result<TransientInput, NetError> {
        let mut net = self.net.borrow_mut();
        net.initialize(t0)?;
        let mut values = vec![0.0; net.n_equations()];
        net.get_state(&mut values)?;
        Ok(TransientInput {
            time: t0,
            state: StateVector(values),
        })
    }

    /// Returns the network, reflecting the state of the last evaluation.
    pub fn net(&self) -> Ref<'_, ReactorNet> {
        self.net.borrow()
    }

    #[must_use]
    pub fn into_inner(self) -> ReactorNet {
        self.net.into_inner()
    }
}

impl Model for Transient {
    type Input = TransientInput;
    type Output = StateRates;
    type Error = NetError;

    fn call(&self, input: &TransientInput) -> Result<StateRates, NetError> {
        let mut net = self.net.borrow_mut();
        let mut rates = vec![0.0; input.state.len()];
        net.eval(
            input.time,
            input.state.values(),
            &mut rates,
            self.params.as_deref(),
        )?;
        Ok(StateRates(rates))
    }
}

/// Steps a [`Transient`] model's state in time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransientProblem;

impl OdeProblem for TransientProblem {
    type Input = TransientInput;
    type Output = StateRates;
    type Delta = Time;
    type State = StateVector;
    type Error = Infallible;

    fn state(&self, input: &TransientInput) -> Result<StateVector, Infallible> {
        Ok(input.state.clone())
    }

    fn derivative(
        &self,
        _input: &TransientInput,
        output: &StateRates,
    ) -> Result<DerivativeOf<StateVector, Time>, Infallible> {
        Ok(output.clone())
    }

    fn build_input(
        &self,
        base: &TransientInput,
        state: &StateVector,
        delta: &Time,
    ) -> Result<TransientInput, Infallible> {
        Ok(TransientInput {
            time: base.time + *delta,
            state: state.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use twine_solvers::transient::euler;
    use uom::si::thermodynamic_temperature::kelvin;

    use crate::models::reactor::core::test_support::{isomerization, reactor_at};

    #[test]
    fn step_adds_scaled_rates() {
        let state = StateVector::new(vec![1.0, 2.0]);
        let next = state.step(StateRates(vec![0.5, -1.0]), Time::new::<second>(0.1));
        assert_relative_eq!(next.values()[0], 1.05);
        assert_relative_eq!(next.values()[1], 1.9);
    }

    #[test]
    fn euler_integrates_isomerization() {
        let k = 1.0;
        let mut net = ReactorNet::new();
        net.add_reactor(reactor_at("r", 1.0, &[isomerization(k)], vec![1.0, 0.0, 0.0]));

        let model = Transient::new(net);
        let initial = model.initial_input(Time::new::<second>(0.0)).unwrap();
        let dt = 0.01;
        let steps = 100;

        let solution = euler::solve_unobserved(
            &model,
            &TransientProblem,
            initial.clone(),
            Time::new::<second>(dt),
            steps,
        )
        .unwrap();

        assert_eq!(solution.history.len(), steps + 1);
        let last = &solution.history[steps].input;
        assert_relative_eq!(last.time.get::<second>(), 1.0, max_relative = 1e-12);

        let y = last.state.values();
        let y0 = initial.state.values();
        assert_relative_eq!(y[0], y0[0]);
        assert_relative_eq!(y[1], y0[1]);
        assert_relative_eq!(y[2], y0[2]);

        assert_relative_eq!(y[3], (1.0 - k * dt).powi(100), max_relative = 1e-10);
        assert_relative_eq!(y[3] + y[4] + y[5], 1.0, max_relative = 1e-12);

        let net = model.net();
        let temperature = net.reactor(0).unwrap().temperature().unwrap();
        assert!(temperature.get::<kelvin>() > 500.0);
    }

    #[test]
    fn sensitivity_parameters_apply_to_every_step() {
        let mut net = ReactorNet::new();
        net.add_reactor(reactor_at("r", 1.0, &[isomerization(1.0)], vec![1.0, 0.0, 0.0]));
        net.register_reaction_sensitivity(0, 0).unwrap();

        let model = Transient::new(net).with_sensitivity_parameters(vec![0.0]);
        let initial = model.initial_input(Time::new::<second>(0.0)).unwrap();
        let rates = model.call(&initial).unwrap();

        assert!(rates.values().iter().all(|&r| r == 0.0));
        assert_eq!(model.into_inner().n_sens_params(), 1);
    }
}
