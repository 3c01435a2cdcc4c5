//! Fixtures shared by the reactor tests.

use std::rc::Rc;

use uom::si::{
    area::square_meter,
    available_energy::joule_per_kilogram,
    f64::{Area, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    pressure::atmosphere,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    connector::{ReactingSurface, SimpleWall},
    kinetics::{self, InterfaceKinetics, MassAction, RateConstant, Reaction},
    thermo::{
        self, PropertyError, SharedThermo, State, SurfacePhase, SurfaceSpecies,
        capability::{HasCv, HasInternalEnergy, StateFrom, ThermoModel},
        fluid::Mixture,
        model::{IdealGasMixture, IdealGasSpecies},
    },
    units::SpecificInternalEnergy,
};

use super::{EnergyFormulation, Reactor};

/// Molar heat capacities of the three test species, J/(kmol·K).
pub(crate) const CP: [f64; 3] = [30_000.0, 32_000.0, 40_000.0];

/// Molecular weights of the three test species, kg/kmol.
pub(crate) const MW: [f64; 3] = [28.0, 28.0, 44.0];

/// Formation enthalpy of species B, J/kmol. A and C have none.
pub(crate) const HF_B: f64 = -2.0e7;

/// A gas with isomers `A` and `B` and a heavier inert `C`.
pub(crate) fn three_species_gas() -> IdealGasMixture {
    IdealGasMixture::new(vec![
        IdealGasSpecies::new("A", MW[0], CP[0]),
        IdealGasSpecies::new("B", MW[1], CP[1]).with_formation_enthalpy(HF_B),
        IdealGasSpecies::new("C", MW[2], CP[2]),
    ])
    .unwrap()
}

/// A state of [`three_species_gas`] at `temperature` and 1 atm.
pub(crate) fn gas_state(temperature: f64, mass_fractions: Vec<f64>) -> State<Mixture> {
    gas_state_at(temperature, 1.0, mass_fractions)
}

/// A state of [`three_species_gas`] at `temperature` and `pressure` atm.
pub(crate) fn gas_state_at(
    temperature: f64,
    pressure: f64,
    mass_fractions: Vec<f64>,
) -> State<Mixture> {
    three_species_gas()
        .state_from((
            Mixture::new(mass_fractions),
            ThermodynamicTemperature::new::<kelvin>(temperature),
            Pressure::new::<atmosphere>(pressure),
        ))
        .unwrap()
}

/// `A => B` with a constant rate coefficient, 1/s.
pub(crate) fn isomerization(k: f64) -> Reaction {
    Reaction::new(RateConstant::constant(k))
        .reactant("A", 1)
        .product("B", 1)
}

/// A 1 m³ reactor of [`three_species_gas`] at 500 K and 1 atm.
pub(crate) fn reactor(
    formulation: EnergyFormulation,
    reactions: &[Reaction],
    mass_fractions: Vec<f64>,
) -> Reactor {
    let mut reactor = Reactor::new("reactor", formulation);
    fill(&mut reactor, reactions, gas_state(500.0, mass_fractions));
    reactor
}

/// A 1 m³ reactor called `name` holding `mass_fractions` at 500 K and
/// `pressure` atm, tracking internal energy.
pub(crate) fn reactor_at(
    name: &str,
    pressure: f64,
    reactions: &[Reaction],
    mass_fractions: Vec<f64>,
) -> Reactor {
    let mut reactor = Reactor::new(name, EnergyFormulation::InternalEnergy);
    fill(&mut reactor, reactions, gas_state_at(500.0, pressure, mass_fractions));
    reactor
}

fn fill(reactor: &mut Reactor, reactions: &[Reaction], state: State<Mixture>) {
    let thermo = thermo::share(three_species_gas());
    let kinetics = kinetics::share(MassAction::new(Rc::clone(&thermo), reactions).unwrap());
    reactor.set_thermo(thermo, state).unwrap();
    reactor.set_kinetics(kinetics);
}

/// A catalytic surface on which `A` adsorbs and desorbs as `B`.
///
/// Species are `PT(S)`, `A(S)`, and `B(S)` with coverages 0.6, 0.3, 0.1.
pub(crate) fn catalyst(gas: &SharedThermo) -> ReactingSurface {
    let phase = SurfacePhase::new(
        vec![
            SurfaceSpecies::new("PT(S)"),
            SurfaceSpecies::new("A(S)"),
            SurfaceSpecies::new("B(S)").with_size(2.0),
        ],
        2.0e-8,
    )
    .unwrap();
    let reactions = [
        Reaction::new(RateConstant::constant(1.0e7))
            .reactant("A", 1)
            .reactant("PT(S)", 1)
            .product("A(S)", 1),
        Reaction::new(RateConstant::constant(50.0))
            .reactant("A(S)", 1)
            .product("B", 1)
            .product("PT(S)", 1),
    ];
    let kinetics = InterfaceKinetics::new(Rc::clone(gas), phase.clone(), &reactions).unwrap();
    ReactingSurface::new(phase, kinetics)
        .unwrap()
        .with_coverages(&[0.6, 0.3, 0.1])
        .unwrap()
}

/// A rigid, adiabatic wall of 0.5 m².
pub(crate) fn wall() -> SimpleWall {
    SimpleWall::new(Area::new::<square_meter>(0.5)).unwrap()
}

/// A model whose internal energy never changes with temperature.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConstantEnergyGas {
    u: f64,
}

impl ConstantEnergyGas {
    pub(crate) fn new(u: f64) -> Self {
        Self { u }
    }
}

impl ThermoModel for ConstantEnergyGas {
    type Fluid = Mixture;
}

impl HasInternalEnergy for ConstantEnergyGas {
    fn internal_energy(
        &self,
        _state: &State<Mixture>,
    ) -> Result<SpecificInternalEnergy, PropertyError> {
        Ok(SpecificInternalEnergy::new::<joule_per_kilogram>(self.u))
    }
}

impl HasCv for ConstantEnergyGas {
    fn cv(&self, _state: &State<Mixture>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1_000.0))
    }
}
