/// Composition of a multi-species phase, stored as mass fractions.
///
/// Mass fractions are kept exactly as given. An integrator advances each
/// fraction independently, so their sum drifts slightly away from one; the
/// mixture does not silently renormalize. Call [`Mixture::normalize`] when a
/// normalized composition is wanted.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    mass_fractions: Vec<f64>,
}

impl Mixture {
    /// Creates a mixture from mass fractions, without normalization.
    #[must_use]
    pub fn new(mass_fractions: Vec<f64>) -> Self {
        Self { mass_fractions }
    }

    /// Creates a mixture of `n_species` species made entirely of species `k`.
    ///
    /// Returns `None` if `k` is out of range.
    #[must_use]
    pub fn pure(n_species: usize, k: usize) -> Option<Self> {
        (k < n_species).then(|| {
            let mut mass_fractions = vec![0.0; n_species];
            mass_fractions[k] = 1.0;
            Self { mass_fractions }
        })
    }

    /// Returns the number of species.
    #[must_use]
    pub fn n_species(&self) -> usize {
        self.mass_fractions.len()
    }

    /// Returns the mass fractions as stored.
    #[must_use]
    pub fn mass_fractions(&self) -> &[f64] {
        &self.mass_fractions
    }

    /// Overwrites the mass fractions with `mass_fractions`, without normalization.
    ///
    /// Copies `min(len, n_species)` values; the species count never changes.
    pub fn set_mass_fractions_no_norm(&mut self, mass_fractions: &[f64]) {
        let n = self.mass_fractions.len().min(mass_fractions.len());
        self.mass_fractions[..n].copy_from_slice(&mass_fractions[..n]);
    }

    /// Returns the sum of the stored mass fractions.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.mass_fractions.iter().sum()
    }

    /// Scales the mass fractions so they sum to one.
    ///
    /// Negative fractions are clipped to zero first. A mixture whose fractions
    /// sum to zero is left unchanged.
    pub fn normalize(&mut self) {
        for y in &mut self.mass_fractions {
            *y = y.max(0.0);
        }
        let sum = self.sum();
        if sum > 0.0 {
            for y in &mut self.mass_fractions {
                *y /= sum;
            }
        }
    }

    /// Returns the inverse mean molecular weight `Σ Yₖ/Wₖ`, kmol/kg.
    ///
    /// Species beyond the shorter of the two slices are ignored.
    #[must_use]
    pub fn moles_per_mass(&self, molecular_weights: &[f64]) -> f64 {
        self.mass_fractions
            .iter()
            .zip(molecular_weights)
            .map(|(y, w)| y / w)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn stores_fractions_without_normalizing() {
        let mut mixture = Mixture::new(vec![0.5, 0.5]);
        mixture.set_mass_fractions_no_norm(&[0.6, 0.5]);

        assert_eq!(mixture.mass_fractions(), &[0.6, 0.5]);
        assert_relative_eq!(mixture.sum(), 1.1);
    }

    #[test]
    fn normalize_clips_and_scales() {
        let mut mixture = Mixture::new(vec![-0.1, 1.0, 3.0]);
        mixture.normalize();

        assert_relative_eq!(mixture.mass_fractions()[0], 0.0);
        assert_relative_eq!(mixture.mass_fractions()[1], 0.25);
        assert_relative_eq!(mixture.mass_fractions()[2], 0.75);
    }

    #[test]
    fn normalize_leaves_empty_mixture_alone() {
        let mut mixture = Mixture::new(vec![0.0, 0.0]);
        mixture.normalize();
        assert_eq!(mixture.mass_fractions(), &[0.0, 0.0]);
    }

    #[test]
    fn pure_mixture() {
        let mixture = Mixture::pure(3, 1).unwrap();
        assert_eq!(mixture.mass_fractions(), &[0.0, 1.0, 0.0]);
        assert!(Mixture::pure(3, 3).is_none());
    }

    #[test]
    fn moles_per_mass_of_binary() {
        let mixture = Mixture::new(vec![0.5, 0.5]);
        assert_relative_eq!(mixture.moles_per_mass(&[2.0, 4.0]), 0.375);
    }
}
