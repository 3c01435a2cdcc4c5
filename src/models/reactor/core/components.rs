//! Names of the components of a reactor's state vector.

use tracing::warn;

use crate::support::thermo::capability::SpeciesNames;

use super::{EnergyFormulation, Reactor, ReactorError, StateLayout};

impl Reactor {
    /// Returns the index of species `name` among the reactor's species.
    ///
    /// Gas species come first, followed by the species of each reacting
    /// surface facing the reactor, in wall order.
    #[must_use]
    pub fn species_index(&self, name: &str) -> Option<usize> {
        let gas = self.thermo.as_ref()?.borrow();
        if let Some(k) = gas.species_index(name) {
            return Some(k);
        }

        let mut offset = gas.n_species();
        for attachment in &self.walls {
            let wall = attachment.wall.borrow();
            if let Some(surface) = wall.surface(attachment.side) {
                if let Some(k) = surface.phase().species_index(name) {
                    return Some(offset + k);
                }
                offset += surface.n_species();
            }
        }
        None
    }

    /// Returns the state-vector index of the component called `name`.
    ///
    /// Species names are tried first. Otherwise `"mass"`, `"volume"`, and,
    /// depending on the energy formulation, `"int_energy"` or
    /// `"temperature"` name the leading components. The short aliases `m`,
    /// `V`, `U`, and `T` are still accepted with a warning.
    #[must_use]
    pub fn component_index(&self, name: &str) -> Option<usize> {
        if let Some(k) = self.species_index(name) {
            return Some(k + StateLayout::SPECIES);
        }

        let energy = self.energy_component();
        match name {
            "mass" => Some(StateLayout::MASS),
            "volume" => Some(StateLayout::VOLUME),
            _ if name == energy => Some(StateLayout::ENERGY),
            "m" => deprecated(name, "mass", StateLayout::MASS),
            "V" => deprecated(name, "volume", StateLayout::VOLUME),
            "U" if self.formulation == EnergyFormulation::InternalEnergy => {
                deprecated(name, energy, StateLayout::ENERGY)
            }
            "T" if self.formulation == EnergyFormulation::Temperature => {
                deprecated(name, energy, StateLayout::ENERGY)
            }
            _ => None,
        }
    }

    /// Returns the name of state-vector component `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::NotInitialized`] before initialization or
    /// [`ReactorError::ComponentOutOfBounds`] past the end of the state.
    pub fn component_name(&self, index: usize) -> Result<String, ReactorError> {
        let layout = self.initialized_layout()?;
        let out_of_bounds = || ReactorError::ComponentOutOfBounds {
            index,
            n_equations: layout.n_equations(),
        };

        match index {
            StateLayout::MASS => return Ok("mass".to_owned()),
            StateLayout::VOLUME => return Ok("volume".to_owned()),
            StateLayout::ENERGY => return Ok(self.energy_component().to_owned()),
            _ => {}
        }

        if index < layout.surface_offset() {
            let gas = self.thermo_handle()?;
            let gas = gas.borrow();
            return gas
                .species_name(index - StateLayout::SPECIES)
                .map(ToOwned::to_owned)
                .ok_or_else(out_of_bounds);
        }

        let block = layout
            .surfaces()
            .iter()
            .find(|block| (block.offset..block.offset + block.len).contains(&index))
            .ok_or_else(out_of_bounds)?;
        let attachment = &self.walls[block.wall];
        let wall = attachment.wall.borrow();
        wall.surface(attachment.side)
            .and_then(|surface| surface.phase().species_name(index - block.offset))
            .map(ToOwned::to_owned)
            .ok_or_else(out_of_bounds)
    }

    fn energy_component(&self) -> &'static str {
        match self.formulation {
            EnergyFormulation::InternalEnergy => "int_energy",
            EnergyFormulation::Temperature => "temperature",
        }
    }
}

fn deprecated(alias: &str, name: &str, index: usize) -> Option<usize> {
    warn!(alias, replacement = name, "deprecated component name");
    Some(index)
}
