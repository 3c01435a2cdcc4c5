/// The coverages of one wall's surface within the state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceBlock {
    /// Index of the wall in the reactor's wall list.
    pub wall: usize,

    /// Index of the first coverage in the state vector.
    pub offset: usize,

    pub len: usize,
}

/// Layout of a reactor's state vector.
///
/// ```text
/// [ mass, volume, energy, Y₀ … Yₙ₋₁, θ(wall a) …, θ(wall b) …, … ]
/// ```
///
/// The energy slot holds the total internal energy or the temperature,
/// depending on the reactor's energy formulation. Surface blocks follow the
/// order in which walls were added, skipping walls without a reacting
/// surface on the reactor's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLayout {
    n_species: usize,
    surfaces: Vec<SurfaceBlock>,
}

impl StateLayout {
    /// Index of the total mass.
    pub const MASS: usize = 0;

    /// Index of the volume.
    pub const VOLUME: usize = 1;

    /// Index of the energy variable.
    pub const ENERGY: usize = 2;

    /// Index of the first species mass fraction.
    pub const SPECIES: usize = 3;

    /// Builds a layout from the gas species count and the surface species
    /// count of each wall, in wall order (`None` for walls without a surface
    /// on this side).
    pub(super) fn new(
        n_species: usize,
        wall_surfaces: impl IntoIterator<Item = Option<usize>>,
    ) -> Self {
        let mut offset = Self::SPECIES + n_species;
        let surfaces = wall_surfaces
            .into_iter()
            .enumerate()
            .filter_map(|(wall, len)| {
                let len = len?;
                let block = SurfaceBlock { wall, offset, len };
                offset += len;
                Some(block)
            })
            .collect();

        Self {
            n_species,
            surfaces,
        }
    }

    #[must_use]
    pub fn n_species(&self) -> usize {
        self.n_species
    }

    /// Returns the surface blocks in state-vector order.
    #[must_use]
    pub fn surfaces(&self) -> &[SurfaceBlock] {
        &self.surfaces
    }

    /// Returns the index of the first surface coverage.
    #[must_use]
    pub fn surface_offset(&self) -> usize {
        Self::SPECIES + self.n_species
    }

    /// Returns the total number of surface species.
    #[must_use]
    pub fn n_surface_species(&self) -> usize {
        self.surfaces.iter().map(|block| block.len).sum()
    }

    /// Returns the length of the state vector.
    #[must_use]
    pub fn n_equations(&self) -> usize {
        self.surface_offset() + self.n_surface_species()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_only() {
        let layout = StateLayout::new(3, []);
        assert_eq!(layout.n_equations(), 6);
        assert_eq!(layout.surface_offset(), 6);
        assert!(layout.surfaces().is_empty());
    }

    #[test]
    fn surfaces_follow_wall_order() {
        let layout = StateLayout::new(2, [Some(3), None, Some(2)]);

        assert_eq!(
            layout.surfaces(),
            &[
                SurfaceBlock {
                    wall: 0,
                    offset: 5,
                    len: 3
                },
                SurfaceBlock {
                    wall: 2,
                    offset: 8,
                    len: 2
                },
            ]
        );
        assert_eq!(layout.n_surface_species(), 5);
        assert_eq!(layout.n_equations(), 10);
    }
}
