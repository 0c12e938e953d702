//! Mutable game-state container and player actions.
//!
//! The resource vector lives here, outside the deterministic core; the core
//! only ever sees it through the [`SnapshotSource`] accessor. All mutation
//! flows through [`GameState::apply_delta`] so rounding and clamping happen
//! in exactly one place.

use sim_core::{ResourceDelta, SnapshotSource, StateSnapshot};

/// Starting resource vector for a new session.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StartingResources {
    pub money: f64,
    pub doom: f64,
    pub papers: f64,
    pub research: f64,
    pub compute: f64,
    pub researchers: u32,
}

impl Default for StartingResources {
    fn default() -> Self {
        Self {
            money: 100_000.0,
            doom: 10.0,
            papers: 0.0,
            research: 0.0,
            compute: 0.0,
            researchers: 0,
        }
    }
}

/// Authoritative mutable state of one lab playthrough.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Current turn number (1-based; 0 until the first turn begins).
    pub turn: u64,
    pub money: f64,
    pub doom: f64,
    pub papers: f64,
    pub research: f64,
    pub compute: f64,
    pub researchers: u32,
}

impl GameState {
    pub fn new(starting: StartingResources) -> Self {
        Self {
            turn: 0,
            money: starting.money,
            doom: starting.doom,
            papers: starting.papers,
            research: starting.research,
            compute: starting.compute,
            researchers: starting.researchers,
        }
    }

    /// Applies a resource delta. Head-count saturates at zero; float
    /// resources are left unclamped (debt and zero-crossing are legal and
    /// the canonical encoding handles negatives).
    pub fn apply_delta(&mut self, delta: &ResourceDelta) {
        self.money += delta.money;
        self.doom += delta.doom;
        self.papers += delta.papers;
        self.research += delta.research;
        self.compute += delta.compute;
        self.researchers = self.researchers.saturating_add_signed(delta.researchers);
    }
}

impl SnapshotSource for GameState {
    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            turn: self.turn,
            money: self.money,
            doom: self.doom,
            papers: self.papers,
            research: self.research,
            compute: self.compute,
            staff: self.researchers,
        }
    }
}

/// Player actions. Effects are pure functions of the current state, so the
/// same action sequence always produces the same resource trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    HireResearcher,
    PublishPaper,
    BuyCompute,
    Research,
    Fundraise,
}

impl ActionKind {
    /// Resource effect of performing this action in `state`.
    pub fn effect(&self, state: &GameState) -> ResourceDelta {
        match self {
            Self::HireResearcher => ResourceDelta {
                money: -1000.0,
                researchers: 1,
                ..ResourceDelta::default()
            },
            Self::PublishPaper => ResourceDelta {
                papers: 1.0,
                research: -10.0,
                doom: -0.5,
                ..ResourceDelta::default()
            },
            Self::BuyCompute => ResourceDelta {
                money: -5000.0,
                compute: 10.0,
                ..ResourceDelta::default()
            },
            Self::Research => ResourceDelta {
                research: f64::from(state.researchers) * 1.5 + state.compute * 0.05,
                doom: 0.25,
                ..ResourceDelta::default()
            },
            Self::Fundraise => ResourceDelta {
                money: 20_000.0,
                doom: 0.5,
                ..ResourceDelta::default()
            },
        }
    }
}
