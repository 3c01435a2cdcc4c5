//! Sensitivity parameters owned by a reactor.
//!
//! A reactor registers gas reaction multipliers and species formation
//! enthalpies, and forwards surface reaction multipliers to the walls it
//! faces. Parameters are applied at the start of a right-hand-side
//! evaluation and reverted at its end.

use crate::support::{
    kinetics::Mechanism,
    sensitivity::{ParameterKind, SensitivityParameter, SensitivityRegistry},
    thermo::{
        GAS_CONSTANT, REFERENCE_TEMPERATURE,
        capability::{HasFormationEnthalpy, SpeciesNames},
    },
};

use super::{Reactor, ReactorError};

impl Reactor {
    /// Registers the rate multiplier of gas reaction `reaction`.
    ///
    /// The parameter is labelled `"<reactor>: <reaction equation>"`, has a
    /// baseline of 1, and multiplies the reaction's current multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::MissingContents`] without kinetics, or
    /// [`ReactorError::IndexOutOfRange`] for a bad reaction index.
    pub fn register_reaction_sensitivity(
        &mut self,
        reaction: usize,
        registry: &mut SensitivityRegistry,
    ) -> Result<usize, ReactorError> {
        let kinetics = self
            .kinetics
            .as_ref()
            .ok_or_else(|| ReactorError::MissingContents {
                name: self.name.clone(),
            })?
            .borrow();
        let equation =
            kinetics
                .reaction_string(reaction)
                .ok_or(ReactorError::IndexOutOfRange {
                    what: "reaction",
                    index: reaction,
                    len: kinetics.n_reactions(),
                })?;

        let global = registry.register(format!("{}: {equation}", self.name), 1.0, 1.0);
        self.sens_params.push(SensitivityParameter {
            local: reaction,
            global,
            value: 1.0,
            kind: ParameterKind::Reaction,
        });
        Ok(global)
    }

    /// Registers the standard formation enthalpy of gas species `k`.
    ///
    /// The parameter is an offset in J/kmol from the species' formation
    /// enthalpy at registration, so its baseline is 0. It is scaled by
    /// `R̄·298.15 K`.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::MissingContents`] without thermo, or
    /// [`ReactorError::IndexOutOfRange`] for a bad species index.
    pub fn register_enthalpy_sensitivity(
        &mut self,
        k: usize,
        registry: &mut SensitivityRegistry,
    ) -> Result<usize, ReactorError> {
        let gas = self
            .thermo
            .as_ref()
            .ok_or_else(|| ReactorError::MissingContents {
                name: self.name.clone(),
            })?
            .borrow();
        let species = gas.species_name(k).ok_or(ReactorError::IndexOutOfRange {
            what: "species",
            index: k,
            len: gas.n_species(),
        })?;

        let global = registry.register(
            format!("{}: {species} enthalpy", self.name),
            0.0,
            GAS_CONSTANT * REFERENCE_TEMPERATURE,
        );
        self.sens_params.push(SensitivityParameter {
            local: k,
            global,
            value: gas.formation_enthalpy(k),
            kind: ParameterKind::Enthalpy,
        });
        Ok(global)
    }

    /// Registers the rate multiplier of reaction `reaction` on the surface of
    /// wall `wall` that faces this reactor.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::IndexOutOfRange`] for a bad wall index,
    /// [`ReactorError::NoSurface`] if the wall has no surface on this
    /// reactor's side, or [`ReactorError::Connector`] for a bad reaction index.
    pub fn register_surface_reaction_sensitivity(
        &mut self,
        wall: usize,
        reaction: usize,
        registry: &mut SensitivityRegistry,
    ) -> Result<usize, ReactorError> {
        let attachment = self.walls.get(wall).ok_or(ReactorError::IndexOutOfRange {
            what: "wall",
            index: wall,
            len: self.walls.len(),
        })?;
        let mut handle = attachment.wall.borrow_mut();
        let surface =
            handle
                .surface_mut(attachment.side)
                .ok_or_else(|| ReactorError::NoSurface {
                    name: self.name.clone(),
                    wall,
                })?;
        Ok(surface.register_reaction_sensitivity(reaction, &self.name, registry)?)
    }

    /// Returns the number of parameters registered by this reactor and by
    /// the surfaces facing it.
    #[must_use]
    pub fn n_sens_params(&self) -> usize {
        let on_walls: usize = self
            .walls
            .iter()
            .map(|attachment| attachment.wall.borrow().n_sens_params(attachment.side))
            .sum();
        self.sens_params.len() + on_walls
    }

    /// Applies every registered parameter from the global vector `params`.
    ///
    /// Does nothing when `params` is `None`. [`Reactor::eval_eqs`] applies
    /// and resets parameters itself; call this directly only to inspect a
    /// perturbed model, and pair it with [`Reactor::reset_sensitivity`].
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::ParameterVectorTooShort`] if `params` lacks a
    /// registered slot, [`ReactorError::MissingContents`] if parameters are
    /// registered but thermo or kinetics is missing, or
    /// [`ReactorError::IndexOutOfRange`] if a registered reaction or species
    /// no longer exists in the installed models. Nothing stays perturbed in
    /// any of these cases.
    pub fn apply_sensitivity(&mut self, params: Option<&[f64]>) -> Result<(), ReactorError> {
        let Some(params) = params else {
            return Ok(());
        };
        if let Some(p) = self.sens_params.iter().find(|p| p.global >= params.len()) {
            return Err(ReactorError::ParameterVectorTooShort {
                slot: p.global,
                len: params.len(),
            });
        }

        if !self.sens_params.is_empty() {
            let (Some(thermo), Some(kinetics)) = (&self.thermo, &self.kinetics) else {
                return Err(self.missing_contents());
            };
            let mut gas = thermo.borrow_mut();
            let mut kinetics = kinetics.borrow_mut();
            let (n_reactions, n_species) = (kinetics.n_reactions(), gas.n_species());
            for p in &self.sens_params {
                let (what, len) = match p.kind {
                    ParameterKind::Reaction => ("reaction", n_reactions),
                    ParameterKind::Enthalpy => ("species", n_species),
                };
                if p.local >= len {
                    return Err(ReactorError::IndexOutOfRange {
                        what,
                        index: p.local,
                        len,
                    });
                }
            }
            for p in &mut self.sens_params {
                match p.kind {
                    ParameterKind::Reaction => {
                        p.value = kinetics.multiplier(p.local);
                        kinetics.set_multiplier(p.local, p.value * params[p.global]);
                    }
                    ParameterKind::Enthalpy => {
                        gas.modify_formation_enthalpy(p.local, p.value + params[p.global]);
                    }
                }
            }
            gas.invalidate_cache();
            kinetics.invalidate_cache();
        }

        for (i, attachment) in self.walls.iter().enumerate() {
            let applied = attachment
                .wall
                .borrow_mut()
                .set_sensitivity_parameters(attachment.side, params);
            if let Err(err) = applied {
                for attachment in &self.walls[..i] {
                    attachment
                        .wall
                        .borrow_mut()
                        .reset_sensitivity_parameters(attachment.side);
                }
                self.reset_own_sensitivity();
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Reverts what [`Reactor::apply_sensitivity`] changed.
    pub fn reset_sensitivity(&mut self, params: Option<&[f64]>) {
        if params.is_none() {
            return;
        }
        self.reset_own_sensitivity();
        for attachment in &self.walls {
            attachment
                .wall
                .borrow_mut()
                .reset_sensitivity_parameters(attachment.side);
        }
    }

    fn reset_own_sensitivity(&self) {
        let (Some(thermo), Some(kinetics)) = (&self.thermo, &self.kinetics) else {
            return;
        };
        let mut gas = thermo.borrow_mut();
        let mut kinetics = kinetics.borrow_mut();
        let (n_reactions, n_species) = (kinetics.n_reactions(), gas.n_species());
        // Reverse order, so a reaction registered twice ends on its first saved value.
        for p in self.sens_params.iter().rev() {
            match p.kind {
                ParameterKind::Reaction if p.local < n_reactions => {
                    kinetics.set_multiplier(p.local, p.value);
                }
                ParameterKind::Enthalpy if p.local < n_species => {
                    gas.reset_formation_enthalpy(p.local);
                }
                ParameterKind::Reaction | ParameterKind::Enthalpy => {}
            }
        }
        gas.invalidate_cache();
        kinetics.invalidate_cache();
    }
}
