/// Base trait for thermodynamic property models.
///
/// The associated `Fluid` type is the data carried by a [`State`] evaluated
/// with this model. For reacting gases it is a
/// [`Mixture`](crate::support::thermo::fluid::Mixture).
///
/// [`State`]: crate::support::thermo::State
pub trait ThermoModel {
    type Fluid;
}
