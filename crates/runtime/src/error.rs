//! Runtime error surface.
//!
//! Core misuse errors propagate here unchanged so the driver (or its host)
//! can decide between aborting the session and continuing in a degraded,
//! non-verifiable mode. Catalog data errors never reach this type; they are
//! absorbed at load time or degraded inside the scheduler.

use sim_core::{EventId, ScheduleError, TrackerError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("unknown event `{id}`")]
    UnknownEvent { id: EventId },

    #[error("event `{event_id}` has no response `{response_id}`")]
    UnknownResponse {
        event_id: EventId,
        response_id: String,
    },

    #[error("event `{id}` is not awaiting resolution this turn")]
    EventNotPending { id: EventId },
}
