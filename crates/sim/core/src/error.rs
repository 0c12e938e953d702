//! Common error infrastructure for sim-core.
//!
//! Domain-specific errors (`RngError`, `ScheduleError`, `TrackerError`) are
//! defined in their respective modules alongside the operations they guard.
//! This module provides the shared severity classification used to decide,
//! at the driver boundary, whether a failure aborts the session or degrades
//! it to a non-verifiable run.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: absorbed locally; the simulation continues
///   (e.g. a malformed catalog entry treated as never-eligible)
/// - **Validation**: caller misuse that should be surfaced, not retried
///   (e.g. recording before `start()`, requesting a pre-game turn)
/// - **Internal**: unexpected inconsistency that indicates a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Absorbed and logged; the playthrough continues.
    Recoverable,

    /// Invalid use of the API; signaled to the caller.
    Validation,

    /// Unexpected state inconsistency. These indicate bugs.
    Internal,

    /// Unrecoverable; the session must end.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable label for this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the simulation may continue after this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for sim-core errors.
///
/// Gives the simulation driver a uniform way to decide between aborting a
/// session and continuing in a degraded (non-verifiable) mode.
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant, for logging
    /// and metrics.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
