//! Global registry of sensitivity parameters.
//!
//! Every parameter a reactor or surface wants perturbed gets a slot in a
//! single global parameter vector. During one right-hand-side evaluation the
//! value in slot `p` is applied to the owning model and then reverted.

use tracing::debug;

/// A registered sensitivity parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    pub label: String,

    /// Value of the parameter that leaves the model unperturbed.
    pub baseline: f64,

    /// Characteristic magnitude used to scale sensitivity coefficients.
    pub scale: f64,
}

/// Allocates global sensitivity-parameter slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensitivityRegistry {
    parameters: Vec<ParameterInfo>,
}

impl SensitivityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parameter and returns its global slot.
    pub fn register(&mut self, label: impl Into<String>, baseline: f64, scale: f64) -> usize {
        let label = label.into();
        debug!(slot = self.parameters.len(), %label, baseline, scale, "registered sensitivity parameter");
        self.parameters.push(ParameterInfo {
            label,
            baseline,
            scale,
        });
        self.parameters.len() - 1
    }

    /// Returns the number of registered parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&ParameterInfo> {
        self.parameters.get(slot)
    }

    /// Returns the label of every slot, in slot order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.label.as_str())
    }

    /// Returns a parameter vector with every slot at its baseline value.
    #[must_use]
    pub fn baselines(&self) -> Vec<f64> {
        self.parameters.iter().map(|p| p.baseline).collect()
    }
}

/// What a local sensitivity parameter perturbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Rate multiplier of a reaction.
    Reaction,

    /// Standard formation enthalpy of a species.
    Enthalpy,
}

/// A model-local view of one registered parameter.
///
/// `local` is a reaction or species index within the owning model and
/// `global` is its slot in the parameter vector. `value` holds the
/// unperturbed model value, captured at registration for enthalpies and at
/// each application for reaction multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityParameter {
    pub local: usize,
    pub global: usize,
    pub value: f64,
    pub kind: ParameterKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_allocated_in_order() {
        let mut registry = SensitivityRegistry::new();
        assert!(registry.is_empty());

        assert_eq!(registry.register("r1: A => B", 1.0, 1.0), 0);
        assert_eq!(registry.register("r1: A enthalpy", 0.0, 2478.96), 1);

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.labels().collect::<Vec<_>>(),
            vec!["r1: A => B", "r1: A enthalpy"]
        );
        assert_eq!(registry.baselines(), vec![1.0, 0.0]);
        assert_eq!(registry.get(1).map(|p| p.scale), Some(2478.96));
        assert_eq!(registry.get(2), None);
    }
}
