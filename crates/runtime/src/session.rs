//! Session driver: the authoritative simulation step.
//!
//! One [`Session`] owns one playthrough: the mutable [`GameState`], the
//! deterministic RNG, the event scheduler, and the verification tracker.
//! Everything is called from this single, synchronous driver in turn order.
//! Event resolutions coming from asynchronous UI are applied only when the
//! host calls [`Session::resolve_event`], never from a UI callback.

use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::{debug, info, warn};

use sim_core::{
    CatalogOracle, DeterministicRng, EventId, EventScheduler, SnapshotSource, SubmissionPayload,
    VerificationTracker,
};

use crate::error::{Result, RuntimeError};
use crate::state::{ActionKind, GameState, StartingResources};

/// Session configuration fixed for the lifetime of one playthrough.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Opaque seed fully determining all randomness.
    pub seed: String,
    /// Balance/content version; bumped whenever canonical encodings change.
    pub version: String,
    /// First turn of the game (1-based).
    pub start_turn: u64,
    pub starting: StartingResources,
}

impl SessionConfig {
    pub const CURRENT_VERSION: &'static str = "1.0";

    pub fn new(seed: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            version: version.into(),
            start_turn: EventScheduler::DEFAULT_START_TURN,
            starting: StartingResources::default(),
        }
    }

    /// Mints a fresh random seed. Host-boundary only: the session stays
    /// fully deterministic once the seed string exists.
    pub fn with_random_seed() -> Self {
        let seed: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();
        Self::new(seed, Self::CURRENT_VERSION)
    }
}

/// One verifiable playthrough.
///
/// Turn cycle: [`begin_turn`](Self::begin_turn) →
/// [`resolve_event`](Self::resolve_event) for each fired event →
/// [`perform_action`](Self::perform_action) as the player acts →
/// [`end_turn`](Self::end_turn). At game end,
/// [`finish`](Self::finish) produces the submission payload.
pub struct Session {
    config: SessionConfig,
    state: GameState,
    rng: DeterministicRng,
    scheduler: EventScheduler,
    tracker: VerificationTracker,
    /// Events fired this turn, awaiting a player response.
    pending_events: Vec<EventId>,
    /// Monotonic action counter; part of every recorded action id.
    action_nonce: u64,
}

impl Session {
    pub fn new<C>(config: SessionConfig, catalog: &C) -> Result<Self>
    where
        C: CatalogOracle + ?Sized,
    {
        let rng = DeterministicRng::new(&config.seed, &config.version);
        let mut tracker = VerificationTracker::new();
        tracker.start(&config.seed, &config.version)?;
        let scheduler = EventScheduler::with_start_turn(catalog, config.start_turn);

        let mut state = GameState::new(config.starting);
        state.turn = config.start_turn.saturating_sub(1);

        info!(seed = %config.seed, version = %config.version, "session started");
        Ok(Self {
            config,
            state,
            rng,
            scheduler,
            tracker,
            pending_events: Vec::new(),
            action_nonce: 0,
        })
    }

    /// Opts this playthrough out of verification (ungraded play). The run
    /// can no longer produce a submission payload.
    pub fn disable_verification(&mut self) {
        warn!("verification disabled; this run cannot be submitted");
        self.tracker.disable();
    }

    /// Advances to the next turn and returns the events firing on it,
    /// in catalog order.
    pub fn begin_turn(&mut self) -> Result<&[EventId]> {
        if !self.pending_events.is_empty() {
            warn!(
                unresolved = self.pending_events.len(),
                turn = self.state.turn,
                "events left unresolved at turn rollover"
            );
        }

        self.state.turn += 1;
        let firing =
            self.scheduler
                .get_firing_events(self.state.turn, &self.rng, &mut self.tracker)?;
        debug!(
            turn = self.state.turn,
            firing = firing.len(),
            chain = self.tracker.get_hash_prefix(8),
            "turn began"
        );
        self.pending_events = firing;
        Ok(&self.pending_events)
    }

    /// Applies the player's chosen response to an event fired this turn.
    pub fn resolve_event(&mut self, event_id: &EventId, response_id: &str) -> Result<()> {
        let position = self
            .pending_events
            .iter()
            .position(|pending| pending == event_id)
            .ok_or_else(|| RuntimeError::EventNotPending {
                id: event_id.clone(),
            })?;

        let definition =
            self.scheduler
                .definition(event_id)
                .ok_or_else(|| RuntimeError::UnknownEvent {
                    id: event_id.clone(),
                })?;
        let response =
            definition
                .response(response_id)
                .ok_or_else(|| RuntimeError::UnknownResponse {
                    event_id: event_id.clone(),
                    response_id: response_id.to_owned(),
                })?;

        let effects = response.effects;
        self.state.apply_delta(&effects);
        self.tracker
            .record_event_response(event_id.as_str(), response_id, self.state.turn)?;
        self.pending_events.remove(position);
        debug!(event = %event_id, response = response_id, "event resolved");
        Ok(())
    }

    /// Performs a player action and records it with the post-action
    /// snapshot. Returns the recorded action id.
    pub fn perform_action(&mut self, kind: ActionKind) -> Result<String> {
        let delta = kind.effect(&self.state);
        self.state.apply_delta(&delta);

        let action_id = format!("{kind}_{}", self.action_nonce);
        self.action_nonce += 1;
        self.tracker
            .record_action(&action_id, &self.state.snapshot())?;
        debug!(action = %action_id, turn = self.state.turn, "action performed");
        Ok(action_id)
    }

    /// Folds the end-of-turn canonical snapshot into the chain.
    pub fn end_turn(&mut self) -> Result<()> {
        self.tracker
            .record_turn_end(self.state.turn, &self.state.snapshot())?;
        Ok(())
    }

    /// Finalizes the chain and builds the leaderboard submission record.
    pub fn finish(&self) -> Result<SubmissionPayload> {
        let payload = self.tracker.export_for_submission(self.state.snapshot())?;
        info!(
            hash = self.tracker.get_hash_prefix(12),
            turns = self.state.turn,
            "session finished"
        );
        Ok(payload)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn turn(&self) -> u64 {
        self.state.turn
    }

    /// Events fired this turn that still await resolution.
    pub fn pending_events(&self) -> &[EventId] {
        &self.pending_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::EventDefinition;

    struct EmptyCatalog;

    impl CatalogOracle for EmptyCatalog {
        fn events(&self) -> &[EventDefinition] {
            &[]
        }
    }

    #[test]
    fn random_seeds_are_distinct_and_usable() {
        let a = SessionConfig::with_random_seed();
        let b = SessionConfig::with_random_seed();
        assert_eq!(a.seed.len(), 16);
        assert_ne!(a.seed, b.seed);

        let mut session = Session::new(a, &EmptyCatalog).unwrap();
        assert!(session.begin_turn().unwrap().is_empty());
        assert_eq!(session.turn(), 1);
    }

    #[test]
    fn turn_counter_starts_below_the_first_turn() {
        let session = Session::new(SessionConfig::new("alpha", "1.0"), &EmptyCatalog).unwrap();
        assert_eq!(session.turn(), 0);
        assert!(session.pending_events().is_empty());
    }
}
