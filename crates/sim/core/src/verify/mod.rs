//! Verification chain and canonical encodings.
//!
//! [`canonical`] owns the one authoritative definition of canonical numbers
//! and snapshots; [`tracker`] folds them into the session's chained digest.
mod canonical;
mod tracker;

pub use canonical::{SnapshotSource, StateSnapshot, canon2, canon6};
pub use tracker::{SubmissionPayload, TrackerError, VerificationTracker};
