pub mod connector;
pub mod constraint;
pub mod kinetics;
pub mod sensitivity;
pub mod thermo;
pub mod units;
