use std::fmt::{self, Display};

use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use super::KineticsError;

/// Modified-Arrhenius rate constant `k = A·Tᵇ·exp(−Tₐ/T)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConstant {
    /// Pre-exponential factor, in units consistent with the reaction order.
    pub preexponential_factor: f64,
    pub temperature_exponent: f64,
    /// Activation energy divided by the gas constant, K.
    pub activation_temperature: f64,
}

impl RateConstant {
    #[must_use]
    pub fn new(
        preexponential_factor: f64,
        temperature_exponent: f64,
        activation_temperature: f64,
    ) -> Self {
        Self {
            preexponential_factor,
            temperature_exponent,
            activation_temperature,
        }
    }

    /// Returns a temperature-independent rate constant.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(value, 0.0, 0.0)
    }

    /// Evaluates the rate constant at `temperature`.
    #[must_use]
    pub fn at(&self, temperature: ThermodynamicTemperature) -> f64 {
        let t = temperature.get::<kelvin>();
        let mut k = self.preexponential_factor;
        if self.temperature_exponent != 0.0 {
            k *= t.powf(self.temperature_exponent);
        }
        if self.activation_temperature != 0.0 {
            k *= (-self.activation_temperature / t).exp();
        }
        k
    }
}

/// An irreversible reaction between named species.
///
/// Reaction orders equal the reactant stoichiometric coefficients.
///
/// # Example
///
/// ```
/// use twine_reactors::support::kinetics::{RateConstant, Reaction};
///
/// let rxn = Reaction::new(RateConstant::constant(1.0e3))
///     .reactant("H2", 2)
///     .reactant("O2", 1)
///     .product("H2O", 2);
/// assert_eq!(rxn.to_string(), "2 H2 + O2 => 2 H2O");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub reactants: Vec<(String, u8)>,
    pub products: Vec<(String, u8)>,
    pub rate: RateConstant,
}

impl Reaction {
    #[must_use]
    pub fn new(rate: RateConstant) -> Self {
        Self {
            reactants: Vec::new(),
            products: Vec::new(),
            rate,
        }
    }

    #[must_use]
    pub fn reactant(mut self, name: impl Into<String>, coefficient: u8) -> Self {
        self.reactants.push((name.into(), coefficient));
        self
    }

    #[must_use]
    pub fn product(mut self, name: impl Into<String>, coefficient: u8) -> Self {
        self.products.push((name.into(), coefficient));
        self
    }

    /// Resolves species names to rate-vector indices with `lookup`.
    pub(super) fn resolve(
        &self,
        lookup: impl Fn(&str) -> Option<usize>,
    ) -> Result<ResolvedReaction, KineticsError> {
        let equation = self.to_string();
        let resolve_side = |side: &[(String, u8)]| {
            side.iter()
                .map(|(name, nu)| {
                    lookup(name)
                        .map(|k| (k, *nu))
                        .ok_or_else(|| KineticsError::UnknownSpecies {
                            name: name.clone(),
                            equation: equation.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
        };

        Ok(ResolvedReaction {
            reactants: resolve_side(&self.reactants)?,
            products: resolve_side(&self.products)?,
            rate: self.rate,
            equation: equation.clone(),
        })
    }
}

impl Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(f: &mut fmt::Formatter<'_>, terms: &[(String, u8)]) -> fmt::Result {
            for (i, (name, nu)) in terms.iter().enumerate() {
                if i > 0 {
                    write!(f, " + ")?;
                }
                if *nu == 1 {
                    write!(f, "{name}")?;
                } else {
                    write!(f, "{nu} {name}")?;
                }
            }
            Ok(())
        }

        side(f, &self.reactants)?;
        write!(f, " => ")?;
        side(f, &self.products)
    }
}

/// A reaction with species resolved to indices.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ResolvedReaction {
    pub reactants: Vec<(usize, u8)>,
    pub products: Vec<(usize, u8)>,
    pub rate: RateConstant,
    pub equation: String,
}

impl ResolvedReaction {
    /// Returns the rate of progress given species concentrations.
    pub fn rate_of_progress(
        &self,
        temperature: ThermodynamicTemperature,
        concentrations: &[f64],
    ) -> f64 {
        self.reactants
            .iter()
            .fold(self.rate.at(temperature), |q, &(k, nu)| {
                q * concentrations[k].powi(i32::from(nu))
            })
    }

    /// Adds `q` times the net stoichiometry to `rates`.
    pub fn accumulate(&self, q: f64, rates: &mut [f64]) {
        for &(k, nu) in &self.reactants {
            rates[k] -= f64::from(nu) * q;
        }
        for &(k, nu) in &self.products {
            rates[k] += f64::from(nu) * q;
        }
    }
}
