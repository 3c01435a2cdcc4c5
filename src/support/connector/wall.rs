use std::fmt;

use uom::si::{
    area::square_meter,
    f64::{Area, HeatFluxDensity, HeatTransfer, Power, Time, Velocity, VolumeRate},
    power::watt,
    pressure::pascal,
    volume_rate::cubic_meter_per_second,
};

use crate::support::{constraint::StrictlyPositive, units::TemperatureDifference};

use super::{ConnectorError, ReactingSurface, Side, SideConditions, Wall};

type Schedule<T> = Box<dyn Fn(Time) -> T>;

/// A wall driven by pressure difference, temperature difference, and
/// optional prescribed motion and heat flux.
///
/// - Volume rate: `K·A·(Pₗ − Pᵣ) + A·v(t)`
/// - Heat rate: `U·A·(Tₗ − Tᵣ) + A·q(t)`
///
/// Pressure and temperature terms are included only once both sides have
/// reported their conditions, so a wall facing a single reactor moves and
/// conducts only through its schedules until a neighbour (or a fixed
/// environment) is set on the other side.
pub struct SimpleWall {
    area: Area,
    expansion_rate_coefficient: f64,
    heat_transfer_coefficient: Option<HeatTransfer>,
    velocity: Option<Schedule<Velocity>>,
    heat_flux: Option<Schedule<HeatFluxDensity>>,
    conditions: [Option<SideConditions>; 2],
    surfaces: [Option<ReactingSurface>; 2],
}

impl SimpleWall {
    /// Creates a rigid, adiabatic, non-reacting wall.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Area`] if the area is not strictly positive.
    pub fn new(area: Area) -> Result<Self, ConnectorError> {
        StrictlyPositive::new(area.get::<square_meter>()).map_err(ConnectorError::Area)?;
        Ok(Self {
            area,
            expansion_rate_coefficient: 0.0,
            heat_transfer_coefficient: None,
            velocity: None,
            heat_flux: None,
            conditions: [None, None],
            surfaces: [None, None],
        })
    }

    /// Sets the expansion rate coefficient `K`, m/(s·Pa).
    #[must_use]
    pub fn with_expansion_rate_coefficient(mut self, k: f64) -> Self {
        self.expansion_rate_coefficient = k;
        self
    }

    /// Sets the overall heat transfer coefficient `U`.
    #[must_use]
    pub fn with_heat_transfer_coefficient(mut self, u: HeatTransfer) -> Self {
        self.heat_transfer_coefficient = Some(u);
        self
    }

    /// Prescribes the wall velocity as a function of time.
    #[must_use]
    pub fn with_velocity(mut self, velocity: impl Fn(Time) -> Velocity + 'static) -> Self {
        self.velocity = Some(Box::new(velocity));
        self
    }

    /// Prescribes the left-to-right heat flux as a function of time.
    #[must_use]
    pub fn with_heat_flux(mut self, heat_flux: impl Fn(Time) -> HeatFluxDensity + 'static) -> Self {
        self.heat_flux = Some(Box::new(heat_flux));
        self
    }

    /// Installs surface chemistry on `side`.
    #[must_use]
    pub fn with_surface(mut self, side: Side, surface: ReactingSurface) -> Self {
        self.surfaces[side.index()] = Some(surface);
        self
    }

    /// Fixes the conditions on `side`, as for a wall facing the environment.
    #[must_use]
    pub fn with_environment(mut self, side: Side, conditions: SideConditions) -> Self {
        self.conditions[side.index()] = Some(conditions);
        self
    }

    fn both_sides(&self) -> Option<(SideConditions, SideConditions)> {
        match self.conditions {
            [Some(left), Some(right)] => Some((left, right)),
            _ => None,
        }
    }
}

impl fmt::Debug for SimpleWall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleWall")
            .field("area", &self.area)
            .field("expansion_rate_coefficient", &self.expansion_rate_coefficient)
            .field("heat_transfer_coefficient", &self.heat_transfer_coefficient)
            .field("velocity", &self.velocity.is_some())
            .field("heat_flux", &self.heat_flux.is_some())
            .field("conditions", &self.conditions)
            .field("surfaces", &self.surfaces)
            .finish()
    }
}

impl Wall for SimpleWall {
    fn area(&self) -> Area {
        self.area
    }

    fn volume_rate(&self, time: Time) -> VolumeRate {
        let mut rate = VolumeRate::new::<cubic_meter_per_second>(0.0);
        if let Some((left, right)) = self.both_sides() {
            let dp = (left.pressure - right.pressure).get::<pascal>();
            rate += VolumeRate::new::<cubic_meter_per_second>(
                self.expansion_rate_coefficient * self.area.get::<square_meter>() * dp,
            );
        }
        if let Some(velocity) = &self.velocity {
            rate += self.area * velocity(time);
        }
        rate
    }

    fn heat_rate(&self, time: Time) -> Power {
        let mut rate = Power::new::<watt>(0.0);
        if let (Some((left, right)), Some(u)) = (self.both_sides(), self.heat_transfer_coefficient)
        {
            rate += u * self.area * left.temperature.minus(right.temperature);
        }
        if let Some(heat_flux) = &self.heat_flux {
            rate += self.area * heat_flux(time);
        }
        rate
    }

    fn surface(&self, side: Side) -> Option<&ReactingSurface> {
        self.surfaces[side.index()].as_ref()
    }

    fn surface_mut(&mut self, side: Side) -> Option<&mut ReactingSurface> {
        self.surfaces[side.index()].as_mut()
    }

    fn set_side_conditions(&mut self, side: Side, conditions: SideConditions) {
        self.conditions[side.index()] = Some(conditions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Pressure, ThermodynamicTemperature},
        heat_flux_density::watt_per_square_meter,
        heat_transfer::watt_per_square_meter_kelvin,
        pressure::kilopascal,
        thermodynamic_temperature::kelvin,
        time::second,
        velocity::meter_per_second,
    };

    fn conditions(pressure_kpa: f64, temperature: f64) -> SideConditions {
        SideConditions {
            pressure: Pressure::new::<kilopascal>(pressure_kpa),
            temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
        }
    }

    fn wall() -> SimpleWall {
        SimpleWall::new(Area::new::<square_meter>(2.0))
            .unwrap()
            .with_expansion_rate_coefficient(1.0e-6)
            .with_heat_transfer_coefficient(HeatTransfer::new::<watt_per_square_meter_kelvin>(
                10.0,
            ))
    }

    #[test]
    fn one_sided_wall_is_inert() {
        let mut wall = wall();
        wall.set_side_conditions(Side::Left, conditions(200.0, 500.0));
        let t = Time::new::<second>(0.0);

        assert_relative_eq!(wall.volume_rate(t).get::<cubic_meter_per_second>(), 0.0);
        assert_relative_eq!(wall.heat_rate(t).get::<watt>(), 0.0);
    }

    #[test]
    fn pressure_and_temperature_driven_rates() {
        let mut wall = wall().with_environment(Side::Right, conditions(100.0, 300.0));
        wall.set_side_conditions(Side::Left, conditions(200.0, 500.0));
        let t = Time::new::<second>(0.0);

        // K·A·ΔP = 1e-6 · 2 · 1e5
        assert_relative_eq!(wall.volume_rate(t).get::<cubic_meter_per_second>(), 0.2);
        // U·A·ΔT = 10 · 2 · 200
        assert_relative_eq!(wall.heat_rate(t).get::<watt>(), 4000.0);
    }

    #[test]
    fn scheduled_motion_and_heat_flux() {
        let wall = SimpleWall::new(Area::new::<square_meter>(0.5))
            .unwrap()
            .with_velocity(|t| Velocity::new::<meter_per_second>(t.get::<second>()))
            .with_heat_flux(|_| HeatFluxDensity::new::<watt_per_square_meter>(-40.0));
        let t = Time::new::<second>(3.0);

        assert_relative_eq!(wall.volume_rate(t).get::<cubic_meter_per_second>(), 1.5);
        assert_relative_eq!(wall.heat_rate(t).get::<watt>(), -20.0);
    }

    #[test]
    fn rejects_non_positive_area() {
        assert!(matches!(
            SimpleWall::new(Area::new::<square_meter>(0.0)),
            Err(ConnectorError::Area(_))
        ));
    }
}
