//! Damped Newton solve for the temperature that matches a target internal energy.

use thiserror::Error;
use tracing::trace;
use uom::si::{
    available_energy::joule_per_kilogram,
    energy::joule,
    f64::{Energy, Mass, MassDensity, ThermodynamicTemperature, Volume},
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    volume::cubic_meter,
};

use crate::support::{
    thermo::{
        State,
        capability::{HasCv, HasInternalEnergy, ThermoModel},
        fluid::Mixture,
    },
    units::SpecificInternalEnergy,
};

/// Solver configuration for the embedded temperature solve.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureSolveConfig {
    /// Maximum number of Newton iterations.
    pub max_iters: usize,

    /// Convergence tolerance on the relative temperature step `|ΔT/T|`.
    pub rel_tol: f64,

    /// Factor applied to the damping coefficient whenever the energy residual
    /// fails to shrink.
    pub damping_factor: f64,

    /// Largest allowed step as a fraction of the current temperature.
    pub max_step_fraction: f64,
}

impl Default for TemperatureSolveConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            rel_tol: 10.0 * f64::EPSILON,
            damping_factor: 0.8,
            max_step_fraction: 0.5,
        }
    }
}

/// The conditions the solved state must reproduce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureTarget {
    /// Total internal energy of the contents.
    pub internal_energy: Energy,
    pub mass: Mass,
    pub volume: Volume,
}

impl TemperatureTarget {
    /// Creates a target from raw SI values: J, kg, and m³.
    #[must_use]
    pub fn from_si(internal_energy: f64, mass: f64, volume: f64) -> Self {
        Self {
            internal_energy: Energy::new::<joule>(internal_energy),
            mass: Mass::new::<kilogram>(mass),
            volume: Volume::new::<cubic_meter>(volume),
        }
    }

    fn density(&self) -> MassDensity {
        self.mass / self.volume
    }

    fn specific_energy(&self) -> SpecificInternalEnergy {
        SpecificInternalEnergy::new::<joule_per_kilogram>(
            self.internal_energy.get::<joule>() / self.mass.get::<kilogram>(),
        )
    }
}

/// A converged temperature solve.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSolution {
    /// State at the solved temperature and the target density.
    pub state: State<Mixture>,
    pub iters: usize,
}

/// Errors that can occur while solving for temperature.
#[derive(Debug, Error)]
pub enum TemperatureSolveError {
    /// The Newton iteration hit its iteration limit.
    #[error(
        "no convergence after {iters} iterations: U/m = {specific_energy:?}, T = {temperature:?}, rho = {density:?}"
    )]
    NoConvergence {
        /// Target internal energy per unit mass.
        specific_energy: SpecificInternalEnergy,

        /// Temperature at the last iterate.
        temperature: ThermodynamicTemperature,

        density: MassDensity,
        iters: usize,
    },

    /// A thermodynamic model operation failed.
    #[error("thermodynamic model failed: {context}")]
    ThermoModelFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TemperatureSolveError {
    fn thermo_failed(
        context: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ThermoModelFailed {
            context: context.into(),
            source: Box::new(err),
        }
    }
}

/// Solves for the temperature at which `mass·u(T, ρ, Y)` equals the target
/// internal energy, at density `ρ = mass/volume` and the composition of `guess`.
///
/// Newton steps `ΔT = (m·u − U)/(m·cv)` are clamped to a fraction of the
/// current temperature and multiplied by a damping coefficient. The
/// coefficient returns to one whenever the energy residual shrinks and is
/// otherwise multiplied by the configured damping factor, so a stalled
/// iteration takes progressively shorter steps.
///
/// # Errors
///
/// Returns [`TemperatureSolveError::NoConvergence`] if the relative step has
/// not fallen below the tolerance within the iteration limit, or
/// [`TemperatureSolveError::ThermoModelFailed`] if a property evaluation fails.
pub fn solve_temperature<M>(
    thermo: &M,
    target: &TemperatureTarget,
    guess: State<Mixture>,
    config: &TemperatureSolveConfig,
) -> Result<TemperatureSolution, TemperatureSolveError>
where
    M: ThermoModel<Fluid = Mixture> + HasInternalEnergy + HasCv + ?Sized,
{
    let mass = target.mass.get::<kilogram>();
    let u_target = target.internal_energy.get::<joule>();

    let mut state = guess.with_density(target.density());
    let mut t = state.temperature.get::<kelvin>();
    let mut du = f64::INFINITY;
    let mut damp = 1.0;

    for iter in 1..=config.max_iters {
        state.temperature = ThermodynamicTemperature::new::<kelvin>(t);

        let cv = thermo
            .cv(&state)
            .map_err(|err| TemperatureSolveError::thermo_failed("cv", err))?
            .get::<joule_per_kilogram_kelvin>();
        let u = thermo
            .internal_energy(&state)
            .map_err(|err| TemperatureSolveError::thermo_failed("internal_energy", err))?
            .get::<joule_per_kilogram>();

        let du_prev = du;
        du = u * mass - u_target;

        if du.abs() < du_prev.abs() {
            damp = 1.0;
        } else {
            damp *= config.damping_factor;
        }

        let max_step = config.max_step_fraction * t;
        let dt = (du / (cv * mass)).clamp(-max_step, max_step) * damp;
        t -= dt;

        if (dt / t).abs() <= config.rel_tol {
            state.temperature = ThermodynamicTemperature::new::<kelvin>(t);
            trace!(iters = iter, temperature = t, "temperature solve converged");
            return Ok(TemperatureSolution { state, iters: iter });
        }
    }

    Err(TemperatureSolveError::NoConvergence {
        specific_energy: target.specific_energy(),
        temperature: ThermodynamicTemperature::new::<kelvin>(t),
        density: target.density(),
        iters: config.max_iters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::reactor::core::test_support::{ConstantEnergyGas, three_species_gas},
        support::thermo::capability::StateFrom,
    };

    fn guess(temperature: f64) -> State<Mixture> {
        three_species_gas()
            .state_from((
                Mixture::new(vec![0.2, 0.3, 0.5]),
                ThermodynamicTemperature::new::<kelvin>(temperature),
                MassDensity::new::<kilogram_per_cubic_meter>(1.0),
            ))
            .unwrap()
    }

    fn energy_at(temperature: f64, mass: f64, volume: f64) -> f64 {
        let gas = three_species_gas();
        let state = guess(temperature)
            .with_density(MassDensity::new::<kilogram_per_cubic_meter>(mass / volume));
        gas.internal_energy(&state).unwrap().get::<joule_per_kilogram>() * mass
    }

    #[test]
    fn recovers_temperature_from_energy() {
        let gas = three_species_gas();
        let config = TemperatureSolveConfig::default();

        for (t_true, t_guess) in [(1500.0, 300.0), (250.0, 1800.0), (800.0, 800.0)] {
            let target = TemperatureTarget::from_si(energy_at(t_true, 2.0, 0.5), 2.0, 0.5);
            let solution = solve_temperature(&gas, &target, guess(t_guess), &config).unwrap();

            assert_relative_eq!(
                solution.state.temperature.get::<kelvin>(),
                t_true,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                solution.state.density.get::<kilogram_per_cubic_meter>(),
                4.0
            );
            assert!(solution.iters <= config.max_iters);
        }
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let gas = three_species_gas();
        let config = TemperatureSolveConfig::default();
        let target = TemperatureTarget::from_si(energy_at(1200.0, 1.0, 1.0), 1.0, 1.0);

        let first = solve_temperature(&gas, &target, guess(400.0), &config).unwrap();
        let second = solve_temperature(&gas, &target, guess(400.0), &config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn converged_guess_stops_immediately() {
        let gas = three_species_gas();
        let target = TemperatureTarget::from_si(energy_at(600.0, 1.0, 2.0), 1.0, 2.0);
        let solution = solve_temperature(
            &gas,
            &target,
            guess(600.0),
            &TemperatureSolveConfig::default(),
        )
        .unwrap();

        assert!(solution.iters <= 2);
        assert_relative_eq!(solution.state.temperature.get::<kelvin>(), 600.0);
    }

    #[test]
    fn stalled_iteration_reports_diagnostics() {
        let gas = ConstantEnergyGas::new(1.0e6);
        let target = TemperatureTarget::from_si(0.0, 2.0, 4.0);

        let err = solve_temperature(
            &gas,
            &target,
            guess(500.0),
            &TemperatureSolveConfig::default(),
        )
        .unwrap_err();

        match err {
            TemperatureSolveError::NoConvergence {
                specific_energy,
                temperature,
                density,
                iters,
            } => {
                assert_relative_eq!(specific_energy.get::<joule_per_kilogram>(), 0.0);
                assert!(temperature.get::<kelvin>() > 0.0);
                assert_relative_eq!(density.get::<kilogram_per_cubic_meter>(), 0.5);
                assert_eq!(iters, 100);
            }
            other @ TemperatureSolveError::ThermoModelFailed { .. } => {
                panic!("unexpected error: {other}")
            }
        }
    }
}
