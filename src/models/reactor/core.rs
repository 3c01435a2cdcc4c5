//! Zero-dimensional reactor core.
//!
//! A [`Reactor`] is a well-mixed control volume. It owns the layout of its
//! state vector (see [`StateLayout`]) and turns a state vector into the rates
//! of change of mass, volume, energy, species mass fractions, and surface
//! coverages.
//!
//! # Evaluation protocol
//!
//! 1. [`Reactor::initialize`] checks the contents and fixes the layout.
//! 2. [`Reactor::get_state`] writes the initial state vector.
//! 3. For every state an integrator proposes, [`Reactor::update_state`]
//!    synchronizes the reactor and its walls and flow devices, then
//!    [`Reactor::eval_eqs`] evaluates the right-hand side.
//!
//! The reactor keeps its own value-type snapshot of the gas state, so the
//! thermo and kinetics models it shares with walls and neighbours are never
//! asked to remember a "current" state.

mod components;
mod error;
mod layout;
mod sensitivity;
mod surface;
mod temperature;
mod walls;

#[cfg(test)]
pub(super) mod test_support;

pub use error::ReactorError;
pub use layout::{StateLayout, SurfaceBlock};
pub use temperature::{
    TemperatureSolution, TemperatureSolveConfig, TemperatureSolveError, TemperatureTarget,
    solve_temperature,
};
pub use walls::WallRates;

use std::rc::Rc;

use tracing::debug;
use uom::si::{
    available_energy::joule_per_kilogram,
    energy::joule,
    f64::{Energy, Mass, Pressure, ThermodynamicTemperature, Time, Volume},
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    power::watt,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    time::second,
    volume::cubic_meter,
    volume_rate::cubic_meter_per_second,
};

use crate::support::{
    connector::{SharedFlowDevice, SharedWall, Side, SideConditions},
    constraint::StrictlyPositive,
    kinetics::{Mechanism, SharedKinetics},
    sensitivity::SensitivityParameter,
    thermo::{
        PropertyError, SharedThermo, State,
        capability::{
            HasCv, HasEnthalpy, HasInternalEnergy, HasMolecularWeights,
            HasPartialMolarIntEnergies, HasPressure, MixtureModel, SpeciesNames,
        },
        fluid::Mixture,
    },
    units::{SpecificEnthalpy, SpecificInternalEnergy},
};

/// What the energy slot of the state vector holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnergyFormulation {
    /// Total internal energy, J. Temperature follows from a Newton solve.
    #[default]
    InternalEnergy,

    /// Temperature, K. Suited to ideal gases, where it avoids the solve.
    Temperature,
}

#[derive(Debug, Clone)]
struct WallAttachment {
    wall: SharedWall,
    side: Side,
}

/// A zero-dimensional reactor.
#[derive(Debug)]
pub struct Reactor {
    name: String,
    formulation: EnergyFormulation,
    thermo: Option<SharedThermo>,
    kinetics: Option<SharedKinetics>,
    state: Option<State<Mixture>>,
    volume: Volume,
    mass: Mass,
    pressure: Pressure,
    enthalpy: SpecificEnthalpy,
    int_energy: SpecificInternalEnergy,
    energy: bool,
    chemistry: bool,
    renormalize: bool,
    walls: Vec<WallAttachment>,
    inlets: Vec<SharedFlowDevice>,
    outlets: Vec<SharedFlowDevice>,
    sens_params: Vec<SensitivityParameter>,
    temperature_solve: TemperatureSolveConfig,
    layout: Option<StateLayout>,
    molecular_weights: Vec<f64>,
    wdot: Vec<f64>,
    sdot: Vec<f64>,
    work: Vec<f64>,
}

impl Reactor {
    /// Creates an empty reactor with a volume of 1 m³.
    ///
    /// Energy is tracked; chemistry is enabled once kinetics with at least
    /// one reaction are installed.
    #[must_use]
    pub fn new(name: impl Into<String>, formulation: EnergyFormulation) -> Self {
        Self {
            name: name.into(),
            formulation,
            thermo: None,
            kinetics: None,
            state: None,
            volume: Volume::new::<cubic_meter>(1.0),
            mass: Mass::new::<kilogram>(0.0),
            pressure: Pressure::new::<pascal>(0.0),
            enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(0.0),
            int_energy: SpecificInternalEnergy::new::<joule_per_kilogram>(0.0),
            energy: true,
            chemistry: false,
            renormalize: false,
            walls: Vec::new(),
            inlets: Vec::new(),
            outlets: Vec::new(),
            sens_params: Vec::new(),
            temperature_solve: TemperatureSolveConfig::default(),
            layout: None,
            molecular_weights: Vec::new(),
            wdot: Vec::new(),
            sdot: Vec::new(),
            work: Vec::new(),
        }
    }

    /// Fills the reactor with `thermo` at the given initial state.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::ThermoModelFailed`] if the state does not
    /// match the model's species or the model cannot evaluate it.
    pub fn set_thermo(
        &mut self,
        thermo: SharedThermo,
        state: State<Mixture>,
    ) -> Result<(), ReactorError> {
        {
            let gas = thermo.borrow();
            if state.fluid.n_species() != gas.n_species() {
                return Err(ReactorError::thermo_failed(
                    "set_thermo",
                    PropertyError::InvalidState {
                        context: format!(
                            "composition has {} species, model has {}",
                            state.fluid.n_species(),
                            gas.n_species()
                        ),
                    },
                ));
            }
            self.cache_properties(&*gas, &state)?;
        }

        self.mass = state.density * self.volume;
        self.thermo = Some(thermo);
        self.state = Some(state);
        self.layout = None;
        Ok(())
    }

    /// Installs the gas-phase kinetics.
    ///
    /// Chemistry is enabled if the mechanism has reactions and disabled
    /// otherwise.
    pub fn set_kinetics(&mut self, kinetics: SharedKinetics) {
        self.chemistry = kinetics.borrow().n_reactions() > 0;
        self.kinetics = Some(kinetics);
        self.layout = None;
    }

    /// Sets the reactor volume, keeping the gas density.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::Volume`] if the volume is not strictly positive.
    pub fn set_initial_volume(&mut self, volume: Volume) -> Result<(), ReactorError> {
        StrictlyPositive::new(volume.get::<cubic_meter>()).map_err(ReactorError::Volume)?;
        self.volume = volume;
        if let Some(state) = &self.state {
            self.mass = state.density * volume;
        }
        Ok(())
    }

    /// Attaches `wall` with this reactor on `side`.
    pub fn add_wall(&mut self, wall: SharedWall, side: Side) {
        self.walls.push(WallAttachment { wall, side });
        self.layout = None;
    }

    /// Adds a flow device that feeds this reactor.
    pub fn add_inlet(&mut self, device: SharedFlowDevice) {
        self.inlets.push(device);
    }

    /// Adds a flow device that drains this reactor.
    pub fn add_outlet(&mut self, device: SharedFlowDevice) {
        self.outlets.push(device);
    }

    /// Turns the energy equation on or off; when off the energy rate is zero.
    pub fn set_energy_enabled(&mut self, enabled: bool) {
        self.energy = enabled;
    }

    /// Turns gas-phase chemistry on or off, overriding [`Reactor::set_kinetics`].
    pub fn set_chemistry_enabled(&mut self, enabled: bool) {
        self.chemistry = enabled;
    }

    /// Renormalizes mass fractions in [`Reactor::update_state`].
    ///
    /// Off by default: mass fractions are used exactly as the integrator
    /// provides them, and their sum may drift slightly from one.
    pub fn set_renormalize_mass_fractions(&mut self, enabled: bool) {
        self.renormalize = enabled;
    }

    /// Sets the Newton solver settings used by [`Reactor::update_state`].
    pub fn set_temperature_solve_config(&mut self, config: TemperatureSolveConfig) {
        self.temperature_solve = config;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn formulation(&self) -> EnergyFormulation {
        self.formulation
    }

    #[must_use]
    pub fn energy_enabled(&self) -> bool {
        self.energy
    }

    #[must_use]
    pub fn chemistry_enabled(&self) -> bool {
        self.chemistry
    }

    #[must_use]
    pub fn thermo(&self) -> Option<&SharedThermo> {
        self.thermo.as_ref()
    }

    #[must_use]
    pub fn kinetics(&self) -> Option<&SharedKinetics> {
        self.kinetics.as_ref()
    }

    /// Returns the gas state as of the last update.
    #[must_use]
    pub fn state(&self) -> Option<&State<Mixture>> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn temperature(&self) -> Option<ThermodynamicTemperature> {
        self.state.as_ref().map(|state| state.temperature)
    }

    #[must_use]
    pub fn mass(&self) -> Mass {
        self.mass
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    #[must_use]
    pub fn enthalpy(&self) -> SpecificEnthalpy {
        self.enthalpy
    }

    #[must_use]
    pub fn int_energy(&self) -> SpecificInternalEnergy {
        self.int_energy
    }

    /// Returns the state layout, once initialized.
    #[must_use]
    pub fn layout(&self) -> Option<&StateLayout> {
        self.layout.as_ref()
    }

    /// Returns the length of the state vector, or 0 before initialization.
    #[must_use]
    pub fn n_equations(&self) -> usize {
        self.layout.as_ref().map_or(0, StateLayout::n_equations)
    }

    /// Checks the reactor's contents and fixes its state layout.
    ///
    /// Every kinetics model, the reactor's own and those on its walls, must
    /// be bound to the very same gas phase handle as the reactor.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::MissingContents`] if thermo or kinetics is
    /// missing, [`ReactorError::GasPhaseMismatch`] if a kinetics model is
    /// bound to another gas phase, or [`ReactorError::ThermoModelFailed`] if
    /// the initial properties cannot be evaluated.
    pub fn initialize(&mut self, t0: Time) -> Result<(), ReactorError> {
        let (thermo, kinetics) = match (&self.thermo, &self.kinetics) {
            (Some(thermo), Some(kinetics)) => (Rc::clone(thermo), Rc::clone(kinetics)),
            _ => return Err(self.missing_contents()),
        };
        let state = self.current_state()?.clone();

        if !Rc::ptr_eq(kinetics.borrow().gas_phase(), &thermo) {
            return Err(ReactorError::GasPhaseMismatch {
                name: self.name.clone(),
                wall: None,
            });
        }

        let mut max_total_species = 0;
        let mut wall_surfaces = Vec::with_capacity(self.walls.len());
        for (i, attachment) in self.walls.iter().enumerate() {
            let mut wall = attachment.wall.borrow_mut();
            wall.initialize();
            let n_surface = match wall.surface(attachment.side) {
                Some(surface) => {
                    let surface_kinetics = surface.kinetics();
                    if !Rc::ptr_eq(surface_kinetics.gas_phase(), &thermo) {
                        return Err(ReactorError::GasPhaseMismatch {
                            name: self.name.clone(),
                            wall: Some(i),
                        });
                    }
                    max_total_species = max_total_species.max(surface_kinetics.n_total_species());
                    Some(surface.n_species())
                }
                None => None,
            };
            wall_surfaces.push(n_surface);
        }

        let n_species = {
            let gas = thermo.borrow();
            self.molecular_weights = gas.molecular_weights().to_vec();
            self.cache_properties(&*gas, &state)?;
            gas.n_species()
        };
        self.mass = state.density * self.volume;

        let layout = StateLayout::new(n_species, wall_surfaces);
        debug!(
            reactor = %self.name,
            t0 = t0.get::<second>(),
            n_species,
            n_surface_species = layout.n_surface_species(),
            n_equations = layout.n_equations(),
            "initialized reactor"
        );
        self.layout = Some(layout);
        self.wdot = vec![0.0; n_species];
        self.sdot = vec![0.0; n_species];
        self.work = vec![0.0; max_total_species];

        self.push_conditions()
    }

    /// Writes the current state vector into `y`.
    ///
    /// Also recomputes the total mass from the gas density and the volume.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::NotInitialized`] before initialization,
    /// [`ReactorError::StateLength`] if `y` is too short, or
    /// [`ReactorError::ThermoModelFailed`] if the energy cannot be evaluated.
    pub fn get_state(&mut self, y: &mut [f64]) -> Result<(), ReactorError> {
        let layout = self.initialized_layout()?;
        let (n_species, surface_offset, n) = (
            layout.n_species(),
            layout.surface_offset(),
            layout.n_equations(),
        );
        check_len(y, n)?;

        let thermo = self.thermo_handle()?;
        let state = self.current_state()?;
        let mass = state.density * self.volume;

        let energy = match self.formulation {
            EnergyFormulation::InternalEnergy => {
                let u = thermo.borrow().internal_energy(state).map_err(|err| {
                    ReactorError::thermo_failed(format!("internal_energy ({})", self.name), err)
                })?;
                u.get::<joule_per_kilogram>() * mass.get::<kilogram>()
            }
            EnergyFormulation::Temperature => state.temperature.get::<kelvin>(),
        };

        y[StateLayout::MASS] = mass.get::<kilogram>();
        y[StateLayout::VOLUME] = self.volume.get::<cubic_meter>();
        y[StateLayout::ENERGY] = energy;
        y[StateLayout::SPECIES..surface_offset].copy_from_slice(state.fluid.mass_fractions());
        debug_assert_eq!(surface_offset - StateLayout::SPECIES, n_species);

        self.get_surface_state(&mut y[surface_offset..n]);
        self.mass = mass;
        Ok(())
    }

    /// Synchronizes the reactor, its walls, and its outlets with `y`.
    ///
    /// Mass and volume are copied, mass fractions are copied without
    /// normalization (unless enabled with
    /// [`Reactor::set_renormalize_mass_fractions`]), and the temperature is
    /// taken from `y` or solved for from the internal energy. Surface
    /// coverages are pushed to the walls, and the new pressure, temperature,
    /// composition, and enthalpy are pushed to walls and outlet devices.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::TemperatureSolve`] if the temperature solve
    /// fails, or any error from the collaborators.
    pub fn update_state(&mut self, y: &[f64]) -> Result<(), ReactorError> {
        let layout = self.initialized_layout()?;
        let (surface_offset, n) = (layout.surface_offset(), layout.n_equations());
        check_len(y, n)?;

        let thermo = self.thermo_handle()?;
        let mut state = self.current_state()?.clone();

        self.mass = Mass::new::<kilogram>(y[StateLayout::MASS]);
        self.volume = Volume::new::<cubic_meter>(y[StateLayout::VOLUME]);
        state
            .fluid
            .set_mass_fractions_no_norm(&y[StateLayout::SPECIES..surface_offset]);
        if self.renormalize {
            state.fluid.normalize();
        }
        state.density = self.mass / self.volume;

        let gas = thermo.borrow();
        match self.formulation {
            EnergyFormulation::Temperature => {
                state.temperature = ThermodynamicTemperature::new::<kelvin>(y[StateLayout::ENERGY]);
            }
            EnergyFormulation::InternalEnergy if self.energy => {
                let target = TemperatureTarget {
                    internal_energy: Energy::new::<joule>(y[StateLayout::ENERGY]),
                    mass: self.mass,
                    volume: self.volume,
                };
                state = solve_temperature(&*gas, &target, state, &self.temperature_solve)
                    .map_err(|source| ReactorError::TemperatureSolve {
                        name: self.name.clone(),
                        source,
                    })?
                    .state;
            }
            EnergyFormulation::InternalEnergy => {}
        }

        self.update_surface_state(&y[surface_offset..n])?;
        self.cache_properties(&*gas, &state)?;
        drop(gas);

        self.state = Some(state);
        self.push_conditions()
    }

    /// Evaluates the right-hand side at the state of the last
    /// [`Reactor::update_state`], writing it into `ydot`.
    ///
    /// `params` is the global sensitivity parameter vector. When present, the
    /// registered parameters are applied for the duration of this call and
    /// reverted before it returns, whether or not the evaluation succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::StateLength`] if `y` or `ydot` is too short,
    /// [`ReactorError::ParameterVectorTooShort`] if `params` lacks a
    /// registered slot, or any error from the collaborators.
    pub fn eval_eqs(
        &mut self,
        time: Time,
        y: &[f64],
        ydot: &mut [f64],
        params: Option<&[f64]>,
    ) -> Result<(), ReactorError> {
        let n = self.initialized_layout()?.n_equations();
        check_len(y, n)?;
        check_len(ydot, n)?;

        self.apply_sensitivity(params)?;
        let result = self.assemble(time, &mut ydot[..n]);
        self.reset_sensitivity(params);
        result
    }

    fn assemble(&mut self, time: Time, ydot: &mut [f64]) -> Result<(), ReactorError> {
        let surface_offset = self.initialized_layout()?.surface_offset();
        let thermo = self.thermo_handle()?;

        let WallRates {
            volume_rate,
            heat_rate,
        } = self.eval_walls(time);
        let (head, surface_rates) = ydot.split_at_mut(surface_offset);
        let mdot_surf = self.eval_surfaces(surface_rates)?.get::<kilogram_per_second>();
        self.eval_chemistry()?;

        let state = self.current_state()?;
        let gas = thermo.borrow();
        let temperature_form = self.formulation == EnergyFormulation::Temperature;
        let u_k = if temperature_form {
            gas.partial_molar_int_energies(state).map_err(|err| {
                ReactorError::thermo_failed(format!("partial_molar_int_energies ({})", self.name), err)
            })?
        } else {
            Vec::new()
        };

        let m = self.mass.get::<kilogram>();
        let v = self.volume.get::<cubic_meter>();
        let p = self.pressure.get::<pascal>();
        let vdot = volume_rate.get::<cubic_meter_per_second>();
        let y = state.fluid.mass_fractions();

        let (head, dydt) = head.split_at_mut(StateLayout::SPECIES);
        let mut dmdt = mdot_surf;
        let mut energy_rate = -p * vdot - heat_rate.get::<watt>();

        head[StateLayout::VOLUME] = vdot;
        for (k, dydt_k) in dydt.iter_mut().enumerate() {
            let production = self.wdot[k] * v + self.sdot[k];
            *dydt_k = production * self.molecular_weights[k] / m - y[k] * mdot_surf / m;
            if temperature_form {
                energy_rate -= production * u_k[k];
            }
        }

        for outlet in &self.outlets {
            let mdot_out = outlet.borrow().mass_flow_rate(time).get::<kilogram_per_second>();
            dmdt -= mdot_out;
            energy_rate -= if temperature_form {
                mdot_out * p * v / m
            } else {
                mdot_out * self.enthalpy.get::<joule_per_kilogram>()
            };
        }

        for inlet in &self.inlets {
            let inlet = inlet.borrow();
            let mdot_in = inlet.mass_flow_rate(time).get::<kilogram_per_second>();
            dmdt += mdot_in;
            energy_rate += mdot_in * inlet.enthalpy_mass().get::<joule_per_kilogram>();
            for (k, dydt_k) in dydt.iter_mut().enumerate() {
                let mdot_spec = inlet
                    .outlet_species_mass_flow_rate(time, k)
                    .get::<kilogram_per_second>();
                *dydt_k += (mdot_spec - mdot_in * y[k]) / m;
                if temperature_form {
                    energy_rate -= u_k[k] / self.molecular_weights[k] * mdot_spec;
                }
            }
        }

        head[StateLayout::MASS] = dmdt;
        head[StateLayout::ENERGY] = match (self.energy, self.formulation) {
            (false, _) => 0.0,
            (true, EnergyFormulation::InternalEnergy) => energy_rate,
            (true, EnergyFormulation::Temperature) => {
                let cv = gas.cv(state).map_err(|err| {
                    ReactorError::thermo_failed(format!("cv ({})", self.name), err)
                })?;
                energy_rate / (m * cv.get::<joule_per_kilogram_kelvin>())
            }
        };
        Ok(())
    }

    /// Writes the gas-phase net production rates into the work buffer, or
    /// zeros when chemistry is disabled.
    fn eval_chemistry(&mut self) -> Result<(), ReactorError> {
        if !self.chemistry {
            self.wdot.fill(0.0);
            return Ok(());
        }
        let (Some(kinetics), Some(state)) = (&self.kinetics, &self.state) else {
            return Err(self.missing_contents());
        };
        kinetics.borrow().net_production_rates(state, &mut self.wdot)?;
        Ok(())
    }

    /// Caches the pressure, enthalpy, and internal energy of `state`.
    fn cache_properties(
        &mut self,
        gas: &dyn MixtureModel,
        state: &State<Mixture>,
    ) -> Result<(), ReactorError> {
        let failed = |what: &str, err: PropertyError| {
            ReactorError::thermo_failed(format!("{what} ({})", self.name), err)
        };
        let pressure = gas.pressure(state).map_err(|err| failed("pressure", err))?;
        let enthalpy = gas.enthalpy(state).map_err(|err| failed("enthalpy", err))?;
        let int_energy = gas
            .internal_energy(state)
            .map_err(|err| failed("internal_energy", err))?;

        self.pressure = pressure;
        self.enthalpy = enthalpy;
        self.int_energy = int_energy;
        Ok(())
    }

    /// Pushes the reactor's conditions to its walls and outlet devices.
    fn push_conditions(&self) -> Result<(), ReactorError> {
        let state = self.current_state()?;
        let conditions = SideConditions {
            pressure: self.pressure,
            temperature: state.temperature,
        };
        for attachment in &self.walls {
            attachment
                .wall
                .borrow_mut()
                .set_side_conditions(attachment.side, conditions);
        }
        for outlet in &self.outlets {
            outlet
                .borrow_mut()
                .set_upstream(state.fluid.mass_fractions(), self.enthalpy);
        }
        Ok(())
    }

    fn missing_contents(&self) -> ReactorError {
        ReactorError::MissingContents {
            name: self.name.clone(),
        }
    }

    fn thermo_handle(&self) -> Result<SharedThermo, ReactorError> {
        self.thermo
            .as_ref()
            .map(Rc::clone)
            .ok_or_else(|| self.missing_contents())
    }

    fn current_state(&self) -> Result<&State<Mixture>, ReactorError> {
        self.state.as_ref().ok_or_else(|| self.missing_contents())
    }

    fn initialized_layout(&self) -> Result<&StateLayout, ReactorError> {
        self.layout
            .as_ref()
            .ok_or_else(|| ReactorError::NotInitialized {
                name: self.name.clone(),
            })
    }

    /// Returns the gas density, kg/m³, or 0 for an empty reactor.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.state
            .as_ref()
            .map_or(0.0, |state| state.density.get::<kilogram_per_cubic_meter>())
    }
}

fn check_len(values: &[f64], expected: usize) -> Result<(), ReactorError> {
    if values.len() < expected {
        Err(ReactorError::StateLength {
            expected,
            found: values.len(),
        })
    } else {
        Ok(())
    }
}
