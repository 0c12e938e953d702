//! Deterministic simulation & verification core.
//!
//! `sim-core` owns the three components every verifiable session is built
//! from: the seed-keyed random source ([`rng`]), the per-turn event
//! eligibility scheduler ([`scheduler`]), and the chained session
//! fingerprint ([`verify`]). Everything here is pure computation over the
//! inputs it is given (no I/O, no wall clock in any deterministic path), so
//! two sessions with the same seed, version, and input sequence are
//! bit-identical on every platform.
//!
//! Collaborators stay behind narrow traits: the event catalog behind
//! [`CatalogOracle`], the mutable game-state container behind
//! [`SnapshotSource`]. The driver composes them leaf-first and the tracker
//! observes; it never drives behavior.
pub mod catalog;
pub mod error;
pub mod rng;
pub mod scheduler;
pub mod verify;

pub use catalog::{
    CatalogOracle, EventDefinition, EventId, Rarity, ResourceDelta, ResponseDefinition,
    TriggerMode,
};
pub use error::{CoreError, ErrorSeverity};
pub use rng::{DeterministicRng, RngError, StreamKey};
pub use scheduler::{EventScheduler, ScheduleError};
pub use verify::{
    SnapshotSource, StateSnapshot, SubmissionPayload, TrackerError, VerificationTracker, canon2,
    canon6,
};
