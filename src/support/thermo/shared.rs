use std::{cell::RefCell, rc::Rc};

use super::capability::MixtureModel;

/// A gas phase shared between a reactor and the kinetics evaluated against it.
///
/// Reactors, homogeneous kinetics, and every surface kinetics attached to a
/// reactor's walls hold clones of the same handle. Identity (not equality) is
/// what matters: a reactor refuses to initialize unless all of its kinetics
/// point at the exact instance it owns (see `Rc::ptr_eq`).
///
/// Borrows are scoped to single calls and the handle is not `Send`, which
/// encodes the single-threaded, sequential access the reactor relies on.
pub type SharedThermo = Rc<RefCell<dyn MixtureModel>>;

/// Wraps a mixture model in a [`SharedThermo`] handle.
pub fn share<M: MixtureModel + 'static>(model: M) -> SharedThermo {
    Rc::new(RefCell::new(model))
}
