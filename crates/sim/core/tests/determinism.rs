//! Property suites for the determinism and sensitivity guarantees.
//!
//! Two independent executions with identical seed, version, and recorded
//! operation sequence must agree on the final hash; any single divergence
//! must change it.

use proptest::prelude::*;

use sim_core::{DeterministicRng, StateSnapshot, StreamKey, VerificationTracker};

fn snapshot_for_turn(turn: u64) -> StateSnapshot {
    StateSnapshot {
        turn,
        money: 100_000.0 - turn as f64 * 250.0,
        doom: turn as f64 * 0.5,
        papers: (turn / 3) as f64,
        research: turn as f64 * 1.25,
        compute: 10.0,
        staff: 1 + (turn / 5) as u32,
    }
}

/// Replays a full recorded session and returns the final digest.
fn run_chain(seed: &str, version: &str, actions: &[(String, u64)]) -> String {
    let mut tracker = VerificationTracker::new();
    tracker.start(seed, version).unwrap();
    for (action_id, turn) in actions {
        tracker
            .record_action(action_id, &snapshot_for_turn(*turn))
            .unwrap();
        tracker
            .record_turn_end(*turn, &snapshot_for_turn(*turn))
            .unwrap();
    }
    tracker.finalize().unwrap().to_owned()
}

fn action_sequence() -> impl Strategy<Value = Vec<(String, u64)>> {
    prop::collection::vec(("[a-z_]{1,16}", 1u64..200), 1..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn same_inputs_same_final_hash(
        seed in "[a-z0-9]{1,12}",
        version in "[0-9]\\.[0-9]",
        actions in action_sequence(),
    ) {
        prop_assert_eq!(
            run_chain(&seed, &version, &actions),
            run_chain(&seed, &version, &actions)
        );
    }

    #[test]
    fn flipping_one_action_id_flips_the_hash(
        seed in "[a-z0-9]{1,12}",
        actions in action_sequence(),
        mutate_at in any::<prop::sample::Index>(),
    ) {
        let baseline = run_chain(&seed, "1.0", &actions);

        let mut mutated = actions.clone();
        let index = mutate_at.index(mutated.len());
        mutated[index].0.push('x');

        prop_assert_ne!(baseline, run_chain(&seed, "1.0", &mutated));
    }

    #[test]
    fn reordering_two_records_flips_the_hash(
        seed in "[a-z0-9]{1,12}",
        actions in action_sequence(),
        swap_at in any::<prop::sample::Index>(),
    ) {
        prop_assume!(actions.len() >= 2);
        let index = swap_at.index(actions.len() - 1);
        prop_assume!(actions[index] != actions[index + 1]);

        let baseline = run_chain(&seed, "1.0", &actions);
        let mut reordered = actions.clone();
        reordered.swap(index, index + 1);

        prop_assert_ne!(baseline, run_chain(&seed, "1.0", &reordered));
    }

    #[test]
    fn unrelated_sub_streams_ignore_call_order(
        seed in "[a-z0-9]{1,12}",
        entity_a in "[a-z_]{1,12}",
        entity_b in "[a-z_]{1,12}",
        turn_a in 1u64..500,
        turn_b in 1u64..500,
    ) {
        prop_assume!(entity_a != entity_b || turn_a != turn_b);
        let rng = DeterministicRng::new(&seed, "1.0");
        let key_a = StreamKey::new("event", &entity_a, turn_a);
        let key_b = StreamKey::new("staff", &entity_b, turn_b);

        let b_alone = rng.draw(key_b);
        let _ = rng.draw(key_a);
        let b_after_a = rng.draw(key_b);

        prop_assert_eq!(b_alone, b_after_a);
    }

    #[test]
    fn sampling_yields_exactly_k_distinct_elements(
        seed in "[a-z0-9]{1,12}",
        n in 0usize..24,
        extra in 1usize..4,
    ) {
        let rng = DeterministicRng::new(&seed, "1.0");
        let items: Vec<usize> = (0..n).collect();
        let key = StreamKey::new("sample", "pool", 1);

        for k in 0..=n {
            let sample = rng.sample_without_replacement(key, &items, k).unwrap();
            prop_assert_eq!(sample.len(), k);
            let mut values: Vec<usize> = sample.into_iter().copied().collect();
            values.sort_unstable();
            values.dedup();
            prop_assert_eq!(values.len(), k);
        }

        prop_assert!(rng.sample_without_replacement(key, &items, n + extra).is_err());
    }
}
