//! Exothermic isomerization `A => B` in a cooled batch reactor.
//!
//! A gas of `A` diluted in inert `N2` converts to `B` homogeneously and on a
//! catalytic wall. The wall loses heat to surroundings held at 300 K. The
//! network is integrated with forward Euler and the reactor temperature,
//! composition, and surface coverage are printed as it evolves.
//!
//! ```text
//! cargo run --example isomerization
//! ```

use std::{error::Error, rc::Rc};

use twine_reactors::{
    models::reactor::{EnergyFormulation, Reactor, ReactorNet, Transient, TransientProblem},
    support::{
        connector::{ReactingSurface, Side, SideConditions, SimpleWall, share_wall},
        kinetics::{self, InterfaceKinetics, MassAction, RateConstant, Reaction},
        thermo::{
            self, SurfacePhase, SurfaceSpecies,
            capability::StateFrom,
            fluid::Mixture,
            model::{IdealGasMixture, IdealGasSpecies},
        },
    },
};
use twine_solvers::transient::euler;
use uom::si::{
    area::square_meter,
    f64::{Area, HeatTransfer, Pressure, ThermodynamicTemperature, Time, Volume},
    heat_transfer::watt_per_square_meter_kelvin,
    pressure::atmosphere,
    thermodynamic_temperature::kelvin,
    time::second,
    volume::liter,
};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let gas = IdealGasMixture::new(vec![
        IdealGasSpecies::new("A", 58.12, 98_000.0),
        IdealGasSpecies::new("B", 58.12, 96_000.0).with_formation_enthalpy(-8.4e7),
        IdealGasSpecies::new("N2", 28.01, 29_100.0),
    ])?;
    let initial = gas.state_from((
        Mixture::new(vec![0.4, 0.0, 0.6]),
        ThermodynamicTemperature::new::<kelvin>(650.0),
        Pressure::new::<atmosphere>(2.0),
    ))?;
    let gas = thermo::share(gas);

    // Homogeneous isomerization with an Arrhenius rate.
    let homogeneous = MassAction::new(
        Rc::clone(&gas),
        &[Reaction::new(RateConstant::new(4.0e10, 0.0, 15_000.0))
            .reactant("A", 1)
            .product("B", 1)],
    )?;

    // Catalytic path: adsorb A, convert on the surface, desorb B.
    let phase = SurfacePhase::new(
        vec![
            SurfaceSpecies::new("PT(S)"),
            SurfaceSpecies::new("A(S)"),
            SurfaceSpecies::new("B(S)"),
        ],
        2.7e-8,
    )?;
    let catalytic = InterfaceKinetics::new(
        Rc::clone(&gas),
        phase.clone(),
        &[
            Reaction::new(RateConstant::constant(1.0e4))
                .reactant("A", 1)
                .reactant("PT(S)", 1)
                .product("A(S)", 1),
            Reaction::new(RateConstant::new(1.0e10, 0.0, 12_000.0))
                .reactant("A(S)", 1)
                .product("B(S)", 1),
            Reaction::new(RateConstant::new(1.0e12, 0.0, 14_000.0))
                .reactant("B(S)", 1)
                .product("B", 1)
                .product("PT(S)", 1),
        ],
    )?;
    let surface = ReactingSurface::new(phase, catalytic)?;

    let surroundings = SideConditions {
        pressure: Pressure::new::<atmosphere>(1.0),
        temperature: ThermodynamicTemperature::new::<kelvin>(300.0),
    };
    let wall = SimpleWall::new(Area::new::<square_meter>(0.05))?
        .with_heat_transfer_coefficient(HeatTransfer::new::<watt_per_square_meter_kelvin>(2.0))
        .with_surface(Side::Left, surface)
        .with_environment(Side::Right, surroundings);

    let mut reactor = Reactor::new("batch", EnergyFormulation::Temperature);
    reactor.set_thermo(gas, initial)?;
    reactor.set_kinetics(kinetics::share(homogeneous));
    reactor.set_initial_volume(Volume::new::<liter>(2.0))?;
    reactor.add_wall(share_wall(wall), Side::Left);

    let mut net = ReactorNet::new();
    net.add_reactor(reactor);

    let model = Transient::new(net);
    let start = model.initial_input(Time::new::<second>(0.0))?;

    let (temperature, y_a, y_b, theta_a) = {
        let net = model.net();
        (
            net.global_component_index(0, "temperature"),
            net.global_component_index(0, "A"),
            net.global_component_index(0, "B"),
            net.global_component_index(0, "A(S)"),
        )
    };
    let (Some(temperature), Some(y_a), Some(y_b), Some(theta_a)) =
        (temperature, y_a, y_b, theta_a)
    else {
        return Err("missing state component".into());
    };

    let steps = 20_000;
    let solution = euler::solve_unobserved(
        &model,
        &TransientProblem,
        start,
        Time::new::<second>(1.0e-4),
        steps,
    )?;

    println!(
        "{:>8}  {:>9}  {:>8}  {:>8}  {:>8}",
        "t [s]", "T [K]", "Y_A", "Y_B", "θ_A(S)"
    );
    for snapshot in solution.history.iter().step_by(steps / 20) {
        let y = snapshot.input.state.values();
        println!(
            "{:>8.3}  {:>9.2}  {:>8.5}  {:>8.5}  {:>8.5}",
            snapshot.input.time.get::<second>(),
            y[temperature],
            y[y_a],
            y[y_b],
            y[theta_a],
        );
    }

    Ok(())
}
