//! Per-turn event eligibility decisions.
//!
//! The scheduler owns the mutable bookkeeping for every catalog event
//! (fired / retired / last-triggered) and decides, in catalog declaration
//! order, which events fire on a given turn. Every RNG draw it performs is
//! folded into the verification chain before [`get_firing_events`] returns;
//! draws are never invisible to the chain.
//!
//! [`get_firing_events`]: EventScheduler::get_firing_events

use tracing::{debug, warn};

use crate::catalog::{CatalogOracle, EventDefinition, EventId, TriggerMode};
use crate::error::{CoreError, ErrorSeverity};
use crate::rng::{DeterministicRng, StreamKey};
use crate::verify::{TrackerError, VerificationTracker};

/// Errors surfaced by the scheduler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Eligibility was requested for a turn before game start. Turns are
    /// 1-based; the driver should never ask about turn 0.
    #[error("turn {turn} precedes game start (turn {start_turn})")]
    TurnBeforeStart { turn: u64, start_turn: u64 },

    /// A draw or trigger could not be recorded in the verification chain.
    #[error(transparent)]
    Verification(#[from] TrackerError),
}

impl CoreError for ScheduleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TurnBeforeStart { .. } => "scheduler.turn_before_start",
            Self::Verification(_) => "scheduler.verification",
        }
    }
}

/// Mutable per-event bookkeeping layered over the read-only definition.
#[derive(Clone, Debug)]
struct EventEntry {
    def: EventDefinition,
    /// Terminal-fire flag for the Deterministic and ProbabilisticWindow
    /// tiers. RandomAfterEligible events are repeatable and track
    /// `last_triggered_turn` instead.
    fired: bool,
    /// Permanently out of consideration: window expired or malformed data.
    retired: bool,
    last_triggered_turn: Option<u64>,
}

impl EventEntry {
    fn new(def: EventDefinition) -> Self {
        // Malformed window data degrades to never-eligible rather than
        // halting the playthrough.
        let retired = match def.trigger_mode {
            TriggerMode::ProbabilisticWindow => match def.eligibility_end {
                Some(end) if end >= def.eligibility_start => false,
                Some(end) => {
                    warn!(
                        event = %def.id,
                        eligibility_start = def.eligibility_start,
                        eligibility_end = end,
                        "event window ends before it starts; treating as never-eligible"
                    );
                    true
                }
                None => {
                    warn!(
                        event = %def.id,
                        "probabilistic_window event without eligibility_end; treating as never-eligible"
                    );
                    true
                }
            },
            TriggerMode::Deterministic | TriggerMode::RandomAfterEligible => false,
        };

        Self {
            def,
            fired: false,
            retired,
            last_triggered_turn: None,
        }
    }
}

/// Decides which catalog events fire each turn.
///
/// Built once per session from the resolved catalog; definitions are copied
/// in declaration order, which fixes the firing order within a turn and the
/// order of chain records.
#[derive(Clone, Debug)]
pub struct EventScheduler {
    start_turn: u64,
    entries: Vec<EventEntry>,
}

impl EventScheduler {
    /// First valid turn of a session. Turn numbers below this are a caller
    /// error.
    pub const DEFAULT_START_TURN: u64 = 1;

    pub fn new<C>(catalog: &C) -> Self
    where
        C: CatalogOracle + ?Sized,
    {
        Self::with_start_turn(catalog, Self::DEFAULT_START_TURN)
    }

    pub fn with_start_turn<C>(catalog: &C, start_turn: u64) -> Self
    where
        C: CatalogOracle + ?Sized,
    {
        let entries = catalog
            .events()
            .iter()
            .cloned()
            .map(EventEntry::new)
            .collect();
        Self {
            start_turn,
            entries,
        }
    }

    /// Returns the ids of all events firing on `turn`, in catalog order.
    ///
    /// Probabilistic draws use the sub-stream `"event:{id}:turn:{turn}"` and
    /// are recorded through `tracker` before this method returns, as is
    /// every trigger decision.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::TurnBeforeStart`] for pre-game turns;
    /// [`ScheduleError::Verification`] when the tracker refuses a record
    /// (driver forgot to start it).
    pub fn get_firing_events(
        &mut self,
        turn: u64,
        rng: &DeterministicRng,
        tracker: &mut VerificationTracker,
    ) -> Result<Vec<EventId>, ScheduleError> {
        if turn < self.start_turn {
            return Err(ScheduleError::TurnBeforeStart {
                turn,
                start_turn: self.start_turn,
            });
        }

        let mut firing = Vec::new();
        for entry in &mut self.entries {
            if entry.retired || entry.fired {
                continue;
            }

            let def = &entry.def;
            match def.trigger_mode {
                TriggerMode::Deterministic => {
                    // Fixed narrative beat: exactly at the declared turn,
                    // unconditionally, no draw.
                    if turn == def.eligibility_start {
                        tracker.record_event_trigger(def.id.as_str(), &def.category, turn)?;
                        debug!(event = %def.id, turn, "deterministic event fired");
                        entry.fired = true;
                        firing.push(def.id.clone());
                    }
                }
                TriggerMode::ProbabilisticWindow => {
                    let end = def
                        .eligibility_end
                        .expect("validated at construction: window has an end");
                    if turn > end {
                        debug!(event = %def.id, turn, "window closed without firing; retired");
                        entry.retired = true;
                        continue;
                    }
                    if turn < def.eligibility_start {
                        continue;
                    }

                    let key = StreamKey::new("event", def.id.as_str(), turn);
                    let p = rng.draw(key);
                    tracker.record_rng_draw(&key.encode(), p, turn)?;
                    if p < def.base_probability {
                        tracker.record_event_trigger(def.id.as_str(), &def.category, turn)?;
                        debug!(event = %def.id, turn, p, "windowed event fired");
                        entry.fired = true;
                        firing.push(def.id.clone());
                    }
                }
                TriggerMode::RandomAfterEligible => {
                    if turn < def.eligibility_start {
                        continue;
                    }
                    // Eligible again strictly after cooldown_turns full turns.
                    if let Some(last) = entry.last_triggered_turn
                        && turn.saturating_sub(last) <= def.cooldown_turns
                    {
                        continue;
                    }

                    let key = StreamKey::new("event", def.id.as_str(), turn);
                    let p = rng.draw(key);
                    tracker.record_rng_draw(&key.encode(), p, turn)?;
                    if p < def.base_probability {
                        tracker.record_event_trigger(def.id.as_str(), &def.category, turn)?;
                        debug!(event = %def.id, turn, p, "repeatable event fired");
                        entry.last_triggered_turn = Some(turn);
                        firing.push(def.id.clone());
                    }
                }
            }
        }
        Ok(firing)
    }

    /// Looks up the full definition of a catalog event.
    pub fn definition(&self, id: &EventId) -> Option<&EventDefinition> {
        self.entries
            .iter()
            .find(|entry| &entry.def.id == id)
            .map(|entry| &entry.def)
    }

    /// True once a terminal-tier event has fired.
    pub fn has_fired(&self, id: &EventId) -> bool {
        self.entry(id).is_some_and(|entry| entry.fired)
    }

    /// True when an event is permanently out of consideration.
    pub fn is_retired(&self, id: &EventId) -> bool {
        self.entry(id).is_some_and(|entry| entry.retired)
    }

    /// Last turn a repeatable event fired, if ever.
    pub fn last_triggered_turn(&self, id: &EventId) -> Option<u64> {
        self.entry(id).and_then(|entry| entry.last_triggered_turn)
    }

    fn entry(&self, id: &EventId) -> Option<&EventEntry> {
        self.entries.iter().find(|entry| &entry.def.id == id)
    }
}
