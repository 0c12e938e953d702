//! Chained digest over an entire played session.
//!
//! The tracker is a pure observer: it never drives behavior, it only folds
//! descriptors of what the simulation already did. Each recorded operation
//! advances `current = SHA-256(current_hex || descriptor)`, so the chain is
//! strictly append-only and order-sensitive: a skipped action, a reordered
//! turn end, or a tampered resource value changes the final digest with
//! overwhelming probability.
//!
//! One tracker instance is owned by one session and injected where needed;
//! server-side batch verification can hold any number of independent
//! instances.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::{CoreError, ErrorSeverity};
use crate::verify::canonical::{StateSnapshot, canon6};

/// Errors surfaced by tracker misuse.
///
/// These indicate integration bugs in the driver, not data problems; the
/// driver decides whether to abort or continue in a non-verifiable mode.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("tracking was not started; call start(seed, version) first")]
    NotStarted,

    #[error("tracking already started for this session")]
    AlreadyStarted,

    #[error("tracking was disabled; this run cannot be verified")]
    Disabled,
}

impl CoreError for TrackerError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotStarted => "tracker.not_started",
            Self::AlreadyStarted => "tracker.already_started",
            Self::Disabled => "tracker.disabled",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Created but not started. Recording here is a hard error so a driver
    /// that forgot `start()` fails fast instead of silently producing an
    /// unverifiable run.
    Idle,
    /// Recording.
    Active,
    /// Explicitly opted out (ungraded play modes). Records are accepted as
    /// no-ops; finalization is refused.
    Disabled,
}

/// Submission-ready record for the leaderboard layer.
///
/// Plain serializable data; producing it has no side effects beyond reading
/// the wall clock for `timestamp`, which is informational and never part of
/// the hash chain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmissionPayload {
    pub verification_hash: String,
    pub seed: String,
    pub version: String,
    pub final_state: StateSnapshot,
    pub timestamp: DateTime<Utc>,
}

/// Maintains the single chained fingerprint of a played game.
///
/// Lifecycle: [`VerificationTracker::new`] → [`start`](Self::start) →
/// `record_*` for the duration of the game → [`finalize`](Self::finalize) /
/// [`export_for_submission`](Self::export_for_submission), then discard.
#[derive(Clone, Debug)]
pub struct VerificationTracker {
    phase: Phase,
    current: String,
    seed: String,
    version: String,
}

impl VerificationTracker {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            current: String::new(),
            seed: String::new(),
            version: String::new(),
        }
    }

    /// Seeds the chain: `current = H(H(seed) || "v" || version)`.
    ///
    /// # Errors
    ///
    /// [`TrackerError::AlreadyStarted`] when called twice; the chain is
    /// append-only and must not be re-seeded mid-session.
    pub fn start(&mut self, seed: &str, version: &str) -> Result<(), TrackerError> {
        if self.phase == Phase::Active {
            return Err(TrackerError::AlreadyStarted);
        }

        let seed_digest = hex::encode(Sha256::digest(seed.as_bytes()));
        let mut hasher = Sha256::new();
        hasher.update(seed_digest.as_bytes());
        hasher.update(b"v");
        hasher.update(version.as_bytes());
        self.current = hex::encode(hasher.finalize());
        self.seed = seed.to_owned();
        self.version = version.to_owned();
        self.phase = Phase::Active;
        Ok(())
    }

    /// Turns the tracker into a permissive no-op recorder for ungraded play.
    pub fn disable(&mut self) {
        self.phase = Phase::Disabled;
    }

    /// True while records are being folded into the chain.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Records a player action together with the canonical snapshot taken
    /// after its effect applied.
    pub fn record_action(
        &mut self,
        action_id: &str,
        snapshot: &StateSnapshot,
    ) -> Result<(), TrackerError> {
        if !self.should_record()? {
            return Ok(());
        }
        self.fold(&format!(
            "action:{action_id}|{}",
            snapshot.canonical_encoding()
        ));
        Ok(())
    }

    /// Records an event firing decision.
    pub fn record_event_trigger(
        &mut self,
        event_id: &str,
        category: &str,
        turn: u64,
    ) -> Result<(), TrackerError> {
        if !self.should_record()? {
            return Ok(());
        }
        self.fold(&format!("event:{category}:{event_id}:t{turn}"));
        Ok(())
    }

    /// Records the player's chosen response to a fired event.
    pub fn record_event_response(
        &mut self,
        event_id: &str,
        response_id: &str,
        turn: u64,
    ) -> Result<(), TrackerError> {
        if !self.should_record()? {
            return Ok(());
        }
        self.fold(&format!("response:{event_id}->{response_id}:t{turn}"));
        Ok(())
    }

    /// Records one RNG draw. The value is canonicalized to 6 decimals
    /// before folding; see [`canon6`].
    pub fn record_rng_draw(
        &mut self,
        stream_name: &str,
        value: f64,
        turn: u64,
    ) -> Result<(), TrackerError> {
        if !self.should_record()? {
            return Ok(());
        }
        self.fold(&format!("rng:{stream_name}={}:t{turn}", canon6(value)));
        Ok(())
    }

    /// Records the end-of-turn canonical snapshot.
    pub fn record_turn_end(
        &mut self,
        turn: u64,
        snapshot: &StateSnapshot,
    ) -> Result<(), TrackerError> {
        if !self.should_record()? {
            return Ok(());
        }
        self.fold(&format!("turn_end:{turn}|{}", snapshot.canonical_encoding()));
        Ok(())
    }

    /// Returns the final chain digest without further mutation.
    /// Safe to call multiple times.
    ///
    /// # Errors
    ///
    /// [`TrackerError::NotStarted`] before `start()`;
    /// [`TrackerError::Disabled`] when tracking was opted out, since the
    /// run cannot be verified and there is no digest worth reporting.
    pub fn finalize(&self) -> Result<&str, TrackerError> {
        match self.phase {
            Phase::Active => Ok(&self.current),
            Phase::Idle => Err(TrackerError::NotStarted),
            Phase::Disabled => Err(TrackerError::Disabled),
        }
    }

    /// Alias for [`finalize`](Self::finalize), matching the driver-facing
    /// naming used at game end.
    pub fn get_final_hash(&self) -> Result<&str, TrackerError> {
        self.finalize()
    }

    /// Digest prefix for compact logging.
    pub fn get_hash_prefix(&self, len: usize) -> &str {
        &self.current[..len.min(self.current.len())]
    }

    /// Builds the submission record for the leaderboard layer.
    pub fn export_for_submission(
        &self,
        final_state: StateSnapshot,
    ) -> Result<SubmissionPayload, TrackerError> {
        Ok(SubmissionPayload {
            verification_hash: self.finalize()?.to_owned(),
            seed: self.seed.clone(),
            version: self.version.clone(),
            final_state,
            timestamp: Utc::now(),
        })
    }

    /// Ok(true) = fold it, Ok(false) = disabled no-op, Err = misuse.
    fn should_record(&self) -> Result<bool, TrackerError> {
        match self.phase {
            Phase::Active => Ok(true),
            Phase::Disabled => Ok(false),
            Phase::Idle => Err(TrackerError::NotStarted),
        }
    }

    fn fold(&mut self, descriptor: &str) {
        let mut hasher = Sha256::new();
        hasher.update(self.current.as_bytes());
        hasher.update(descriptor.as_bytes());
        self.current = hex::encode(hasher.finalize());
    }
}

impl Default for VerificationTracker {
    fn default() -> Self {
        Self::new()
    }
}
