//! Data-driven event catalog for the simulation core.
//!
//! Houses the RON event definitions and the loader that resolves balancing
//! overrides before anything reaches `sim-core`; the core only ever sees
//! merged, read-only data through the [`sim_core::CatalogOracle`] trait.
//!
//! Event text and presentation stay with the client; this crate carries the
//! mechanical fields only.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogError, EventCatalog};
