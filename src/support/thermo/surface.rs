use thiserror::Error;
use uom::si::f64::ThermodynamicTemperature;

use crate::support::constraint::{Constrained, ConstraintError, StrictlyPositive};

use super::capability::SpeciesNames;

/// A species adsorbed on a surface phase.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSpecies {
    pub name: String,

    /// Number of sites occupied by one molecule.
    pub size: f64,
}

impl SurfaceSpecies {
    /// Creates a species occupying a single site.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 1.0,
        }
    }

    /// Returns the species with the given site occupancy.
    #[must_use]
    pub fn with_size(self, size: f64) -> Self {
        Self { size, ..self }
    }
}

/// Errors that may occur when building a surface phase.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfacePhaseError {
    #[error("a surface phase needs at least one species")]
    NoSpecies,

    #[error("invalid site density: {0}")]
    SiteDensity(ConstraintError),

    #[error("invalid site size for species `{name}`: {source}")]
    SiteSize {
        name: String,
        #[source]
        source: ConstraintError,
    },
}

/// A two-dimensional phase of adsorbed species on a wall.
///
/// Species 0 is conventionally the empty site. Its coverage is whatever the
/// other species leave free, so its rate of change is the negative sum of
/// theirs.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePhase {
    species: Vec<SurfaceSpecies>,
    site_density: f64,
}

impl SurfacePhase {
    /// Creates a surface phase.
    ///
    /// `site_density` is the total concentration of sites, kmol/m².
    ///
    /// # Errors
    ///
    /// Returns a [`SurfacePhaseError`] if there are no species, or if the site
    /// density or any site size is not strictly positive.
    pub fn new(
        species: Vec<SurfaceSpecies>,
        site_density: f64,
    ) -> Result<Self, SurfacePhaseError> {
        if species.is_empty() {
            return Err(SurfacePhaseError::NoSpecies);
        }
        let site_density = Constrained::<f64, StrictlyPositive>::new(site_density)
            .map_err(SurfacePhaseError::SiteDensity)?
            .into_inner();
        for sp in &species {
            StrictlyPositive::new(sp.size).map_err(|source| SurfacePhaseError::SiteSize {
                name: sp.name.clone(),
                source,
            })?;
        }
        Ok(Self {
            species,
            site_density,
        })
    }

    /// Returns the site density, kmol/m².
    #[must_use]
    pub fn site_density(&self) -> f64 {
        self.site_density
    }

    /// Returns the number of sites occupied by species `k`.
    ///
    /// Returns `None` if `k` is out of range.
    #[must_use]
    pub fn size(&self, k: usize) -> Option<f64> {
        self.species.get(k).map(|sp| sp.size)
    }

    /// Returns the site occupancy of every species, in species order.
    pub fn sizes(&self) -> impl Iterator<Item = f64> + '_ {
        self.species.iter().map(|sp| sp.size)
    }

    /// Returns the surface concentrations `Γ·θₖ/sizeₖ`, kmol/m².
    #[must_use]
    pub fn concentrations(&self, coverages: &[f64]) -> Vec<f64> {
        self.species
            .iter()
            .zip(coverages)
            .map(|(sp, theta)| self.site_density * theta / sp.size)
            .collect()
    }

    /// Returns a clean surface: every site empty.
    #[must_use]
    pub fn bare_coverages(&self) -> Vec<f64> {
        let mut coverages = vec![0.0; self.species.len()];
        coverages[0] = 1.0;
        coverages
    }
}

impl SpeciesNames for SurfacePhase {
    fn n_species(&self) -> usize {
        self.species.len()
    }

    fn species_name(&self, k: usize) -> Option<&str> {
        self.species.get(k).map(|sp| sp.name.as_str())
    }
}

/// The state of a surface phase: its temperature and its site coverages.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    pub temperature: ThermodynamicTemperature,
    pub coverages: Vec<f64>,
}
