//! Event catalog loader.
//!
//! Loads event definitions from RON data files, applies balancing overrides,
//! and serves the merged result in declaration order.

use serde::Deserialize;
use tracing::warn;

use sim_core::{CatalogOracle, EventDefinition, EventId};

/// Errors raised while loading catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse catalog data: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("duplicate event id `{id}` in catalog")]
    DuplicateEvent { id: EventId },
}

/// One balancing override, keyed by event id. Only tunable fields may be
/// overridden; structural fields (windows, trigger modes) belong to the base
/// catalog.
#[derive(Debug, Deserialize)]
struct BalanceOverride {
    id: EventId,
    #[serde(default)]
    base_probability: Option<f64>,
    #[serde(default)]
    cooldown_turns: Option<u64>,
}

/// The resolved event catalog.
///
/// Declaration order of the base file is preserved; overrides change values
/// in place and never reorder.
#[derive(Debug, Clone)]
pub struct EventCatalog {
    events: Vec<EventDefinition>,
}

impl EventCatalog {
    /// Loads the embedded base catalog plus balancing overrides.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_ron_str(
            include_str!("../data/events/core.ron"),
            Some(include_str!("../data/events/balance.ron")),
        )
    }

    /// Parses a catalog from RON text, optionally applying overrides.
    /// Useful for tests and modded catalogs.
    pub fn from_ron_str(
        events_ron: &str,
        balance_ron: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let events: Vec<EventDefinition> = ron::from_str(events_ron)?;

        for (index, event) in events.iter().enumerate() {
            if events[..index].iter().any(|other| other.id == event.id) {
                return Err(CatalogError::DuplicateEvent {
                    id: event.id.clone(),
                });
            }
        }

        let mut catalog = Self { events };
        if let Some(balance_ron) = balance_ron {
            let overrides: Vec<BalanceOverride> = ron::from_str(balance_ron)?;
            catalog.apply_overrides(overrides);
        }
        Ok(catalog)
    }

    /// Loads a catalog from files on disk (modding / balancing workflows).
    pub fn load_from_paths(
        events_path: &std::path::Path,
        balance_path: Option<&std::path::Path>,
    ) -> anyhow::Result<Self> {
        use anyhow::Context;

        let events_ron = std::fs::read_to_string(events_path)
            .with_context(|| format!("reading event catalog {}", events_path.display()))?;
        let balance_ron = balance_path
            .map(|path| {
                std::fs::read_to_string(path)
                    .with_context(|| format!("reading balance overrides {}", path.display()))
            })
            .transpose()?;

        Self::from_ron_str(&events_ron, balance_ron.as_deref())
            .context("parsing event catalog data")
    }

    /// An override naming an unknown event is skipped with a warning; one
    /// stale balance entry should not break the whole catalog.
    fn apply_overrides(&mut self, overrides: Vec<BalanceOverride>) {
        for entry in overrides {
            let Some(event) = self.events.iter_mut().find(|event| event.id == entry.id) else {
                warn!(event = %entry.id, "balance override references unknown event; skipped");
                continue;
            };
            if let Some(base_probability) = entry.base_probability {
                event.base_probability = base_probability;
            }
            if let Some(cooldown_turns) = entry.cooldown_turns {
                event.cooldown_turns = cooldown_turns;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl CatalogOracle for EventCatalog {
    fn events(&self) -> &[EventDefinition] {
        &self.events
    }
}
