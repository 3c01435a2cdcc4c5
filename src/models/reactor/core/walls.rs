use uom::si::{
    f64::{Power, Time, VolumeRate},
    power::watt,
    volume_rate::cubic_meter_per_second,
};

use super::Reactor;

/// Net wall contributions, as seen from one reactor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallRates {
    /// Rate at which the reactor volume grows.
    pub volume_rate: VolumeRate,

    /// Heat flow out of the reactor.
    pub heat_rate: Power,
}

impl WallRates {
    fn zero() -> Self {
        Self {
            volume_rate: VolumeRate::new::<cubic_meter_per_second>(0.0),
            heat_rate: Power::new::<watt>(0.0),
        }
    }
}

impl Reactor {
    /// Sums the wall rates at `time`.
    ///
    /// Walls report rates from their left side's point of view, so each wall
    /// contributes with sign `+1` if the reactor is on its left and `−1` if
    /// it is on its right.
    #[must_use]
    pub fn eval_walls(&self, time: Time) -> WallRates {
        self.walls
            .iter()
            .fold(WallRates::zero(), |rates, attachment| {
                let wall = attachment.wall.borrow();
                let sign = attachment.side.sign();
                WallRates {
                    volume_rate: rates.volume_rate + wall.volume_rate(time) * sign,
                    heat_rate: rates.heat_rate + wall.heat_rate(time) * sign,
                }
            })
    }

    #[must_use]
    pub fn n_walls(&self) -> usize {
        self.walls.len()
    }
}
