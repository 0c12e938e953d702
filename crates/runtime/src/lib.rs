//! Runtime orchestration for the deterministic lab simulation.
//!
//! This crate wires the catalog, RNG, scheduler, and verification tracker
//! into a cohesive [`Session`] API the host application drives turn by
//! turn. Everything is synchronous and single-writer: the session is the
//! one authoritative simulation step, and the verification chain observes
//! it without ever driving behavior.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the driver and its configuration
//! - [`state`] owns the mutable resource container and player actions
//! - [`error`] is the runtime error surface
pub mod error;
pub mod session;
pub mod state;

pub use error::{Result, RuntimeError};
pub use session::{Session, SessionConfig};
pub use state::{ActionKind, GameState, StartingResources};

// Collaborator types the host needs when embedding a session.
pub use sim_content::EventCatalog;
pub use sim_core::{CatalogOracle, EventId, StateSnapshot, SubmissionPayload};
