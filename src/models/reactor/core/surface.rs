//! Surface coverages held in the reactor's state vector.

use uom::si::{area::square_meter, f64::MassRate, mass_rate::kilogram_per_second};

use super::{Reactor, ReactorError, check_len};

impl Reactor {
    /// Copies the coverages of every reacting surface into `y`, in layout order.
    pub(super) fn get_surface_state(&self, y: &mut [f64]) {
        let Some(layout) = &self.layout else {
            return;
        };
        let base = layout.surface_offset();
        for block in layout.surfaces() {
            let attachment = &self.walls[block.wall];
            if let Some(surface) = attachment.wall.borrow().surface(attachment.side) {
                let start = block.offset - base;
                y[start..start + block.len].copy_from_slice(surface.coverages());
            }
        }
    }

    /// Pushes the coverages in `y` to the walls, without normalization.
    pub(super) fn update_surface_state(&self, y: &[f64]) -> Result<(), ReactorError> {
        let layout = self.initialized_layout()?;
        let base = layout.surface_offset();
        for block in layout.surfaces() {
            let attachment = &self.walls[block.wall];
            let mut wall = attachment.wall.borrow_mut();
            let surface = wall
                .surface_mut(attachment.side)
                .ok_or_else(|| self.no_surface(block.wall))?;
            let start = block.offset - base;
            surface.set_coverages(&y[start..start + block.len])?;
        }
        Ok(())
    }

    /// Evaluates surface chemistry on every wall facing this reactor.
    ///
    /// Writes the coverage rates into `coverage_rates`, one block per
    /// reacting surface in layout order, and accumulates the gas species
    /// production from all surfaces (kmol/s) into the reactor's surface
    /// production buffer. Within a block, the rate of species `k ≥ 1` is
    /// `ṡₖ·σₖ/Γ` and the first species takes the negative sum of the rest,
    /// so the coverages of each surface keep a constant sum.
    ///
    /// Returns the net mass flux from the surfaces into the gas.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::StateLength`] if `coverage_rates` is too short,
    /// [`ReactorError::NoSurface`] if a wall lost its surface since
    /// initialization, or any error from the surface kinetics.
    pub fn eval_surfaces(&mut self, coverage_rates: &mut [f64]) -> Result<MassRate, ReactorError> {
        let layout = self.layout.as_ref().ok_or_else(|| ReactorError::NotInitialized {
            name: self.name.clone(),
        })?;
        let state = self.state.as_ref().ok_or_else(|| ReactorError::MissingContents {
            name: self.name.clone(),
        })?;
        check_len(coverage_rates, layout.n_surface_species())?;

        self.sdot.fill(0.0);
        let base = layout.surface_offset();
        let mut mdot = 0.0;

        for block in layout.surfaces() {
            let attachment = &self.walls[block.wall];
            let mut wall = attachment.wall.borrow_mut();
            let area = wall.area().get::<square_meter>();
            let surface = wall
                .surface_mut(attachment.side)
                .ok_or_else(|| ReactorError::NoSurface {
                    name: self.name.clone(),
                    wall: block.wall,
                })?;

            surface.set_temperature(state.temperature);
            surface.net_production_rates(state, &mut self.work)?;

            let offset = surface.kinetics().surface_species_offset();
            let phase = surface.phase();
            let inv_site_density = 1.0 / phase.site_density();
            let start = block.offset - base;
            let rates = &mut coverage_rates[start..start + block.len];

            let mut sum = 0.0;
            for ((rate, w), size) in rates
                .iter_mut()
                .zip(&self.work[offset..])
                .zip(phase.sizes())
                .skip(1)
            {
                *rate = w * inv_site_density * size;
                sum -= *rate;
            }
            rates[0] = sum;

            for ((sdot, w), mw) in self
                .sdot
                .iter_mut()
                .zip(&self.work)
                .zip(&self.molecular_weights)
            {
                let flux = w * area;
                *sdot += flux;
                mdot += flux * mw;
            }
        }

        Ok(MassRate::new::<kilogram_per_second>(mdot))
    }

    /// Returns the gas species production from surfaces, kmol/s, as of the
    /// last [`Reactor::eval_surfaces`].
    #[must_use]
    pub fn surface_production_rates(&self) -> &[f64] {
        &self.sdot
    }

    fn no_surface(&self, wall: usize) -> ReactorError {
        ReactorError::NoSurface {
            name: self.name.clone(),
            wall,
        }
    }
}
