//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model lives in its own module and keeps its computation and domain
//! logic in an internal `core` submodule. The `core` module itself is not part
//! of the public API; the types it defines are re-exported by the model
//! module.
//!
//! The [`twine_core::Model`] implementation is a thin adapter that delegates
//! to the model's core API.

pub mod reactor;
