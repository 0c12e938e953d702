//! Read-only event catalog interface.
//!
//! The catalog (content, balancing overrides, text) lives outside this core;
//! these are the definition types and the oracle trait through which the
//! scheduler consumes it. Declaration order in [`CatalogOracle::events`] is
//! authoritative: it fixes the firing order within a turn.

use core::fmt;

/// Identifier of a catalog event.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Rarity tier of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

/// Firing policy of an event. The three tiers are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TriggerMode {
    /// Fires exactly at `eligibility_start`, unconditionally, once.
    /// Used for fixed narrative beats. No RNG draw.
    Deterministic,

    /// Draws each turn inside `[eligibility_start, eligibility_end]`;
    /// fires at most once, then is permanently retired. Also retired when
    /// the window closes without a fire.
    ProbabilisticWindow,

    /// Draws each turn from `eligibility_start` onward (no upper bound),
    /// subject to `cooldown_turns`. Repeatable.
    RandomAfterEligible,
}

/// Change applied to the resource vector when an event response resolves.
///
/// All fields default to zero so catalog data only names what it touches.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceDelta {
    pub money: f64,
    pub doom: f64,
    pub papers: f64,
    pub research: f64,
    pub compute: f64,
    pub researchers: i32,
}

/// One player-selectable response to a fired event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponseDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: ResourceDelta,
}

/// Catalog-owned definition of one event.
///
/// Read-only to the core; the scheduler keeps its own mutable bookkeeping
/// (fired / retired / last-triggered) alongside each definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventDefinition {
    pub id: EventId,
    /// Topical tag folded into the verification chain on trigger
    /// (e.g. `"funding"`, `"safety"`).
    pub category: String,
    pub rarity: Rarity,
    pub trigger_mode: TriggerMode,
    /// First eligible turn (1-based).
    pub eligibility_start: u64,
    /// Last eligible turn, inclusive. Required for
    /// [`TriggerMode::ProbabilisticWindow`]; ignored by the other tiers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub eligibility_end: Option<u64>,
    /// Per-eligible-turn firing probability for the probabilistic tiers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_probability: f64,
    /// Minimum full turns between repeat fires
    /// ([`TriggerMode::RandomAfterEligible`] only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_turns: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub responses: Vec<ResponseDefinition>,
}

impl EventDefinition {
    /// Looks up a response by id.
    pub fn response(&self, response_id: &str) -> Option<&ResponseDefinition> {
        self.responses.iter().find(|r| r.id == response_id)
    }
}

/// Read-only access to the resolved event catalog.
///
/// Balancing overrides are applied before the core ever sees the data; the
/// slice order is declaration order and fixes per-turn firing order.
pub trait CatalogOracle {
    fn events(&self) -> &[EventDefinition];
}
