//! Canonical number and snapshot encoding.
//!
//! One authoritative definition of "canonical number" for every path that
//! folds data into the verification chain. Resource values round to 2
//! decimal places, recorded RNG draws to 6. Field order and precision are
//! frozen: changing either changes every downstream hash and requires a
//! version bump.

/// Canonical encoding of a resource value (2 decimal places).
pub fn canon2(value: f64) -> String {
    format!("{:.2}", normalize(value))
}

/// Canonical encoding of an RNG draw (6 decimal places).
///
/// Mandatory before folding a draw into the chain, so representation
/// differences below the sixth decimal can never diverge two sessions.
pub fn canon6(value: f64) -> String {
    format!("{:.6}", normalize(value))
}

/// Collapses negative zero, which would otherwise encode as `"-0.00"`.
fn normalize(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Fixed-order, fixed-precision snapshot of the mutable resource vector.
///
/// This is the unit the chain folds at `record_action` and
/// `record_turn_end` time. The state container itself stays outside the
/// core; it hands snapshots over through [`SnapshotSource`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateSnapshot {
    pub turn: u64,
    pub money: f64,
    pub doom: f64,
    pub papers: f64,
    pub research: f64,
    pub compute: f64,
    pub staff: u32,
}

impl StateSnapshot {
    /// Canonical textual encoding.
    ///
    /// `turn:{t}|money:{m}|doom:{d}|papers:{p}|research:{r}|compute:{c}|staff:{s}`
    /// with every float in [`canon2`] form. Frozen; see module docs.
    pub fn canonical_encoding(&self) -> String {
        format!(
            "turn:{}|money:{}|doom:{}|papers:{}|research:{}|compute:{}|staff:{}",
            self.turn,
            canon2(self.money),
            canon2(self.doom),
            canon2(self.papers),
            canon2(self.research),
            canon2(self.compute),
            self.staff,
        )
    }
}

/// Narrow interface the mutable game-state container exposes to this core.
pub trait SnapshotSource {
    /// Canonical snapshot of the current resource vector.
    fn snapshot(&self) -> StateSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canon2_fixes_two_decimals() {
        assert_eq!(canon2(99000.0), "99000.00");
        assert_eq!(canon2(3.14159), "3.14");
        assert_eq!(canon2(2.71828), "2.72");
        assert_eq!(canon2(-3.1), "-3.10");
        assert_eq!(canon2(-0.0), "0.00");
    }

    #[test]
    fn canon6_fixes_six_decimals() {
        assert_eq!(canon6(0.6693020795937628), "0.669302");
        assert_eq!(canon6(0.0), "0.000000");
        assert_eq!(canon6(1.0), "1.000000");
    }

    #[test]
    fn snapshot_encoding_is_frozen() {
        let snapshot = StateSnapshot {
            turn: 1,
            money: 99000.0,
            doom: 10.0,
            papers: 0.0,
            research: 0.0,
            compute: 0.0,
            staff: 1,
        };
        assert_eq!(
            snapshot.canonical_encoding(),
            "turn:1|money:99000.00|doom:10.00|papers:0.00|research:0.00|compute:0.00|staff:1"
        );
    }
}
