use presence_core::growth::{week_labels, BaselinePolicy, GrowthProjector};
use presence_core::{ScoreVector, SessionConfig};
use presence_test_utils::*;
use proptest::prelude::*;

fn score() -> impl Strategy<Value = f64> {
    (0..=100u32).prop_map(|n| f64::from(n) / 10.0)
}

fn presence() -> impl Strategy<Value = [f64; 5]> {
    [score(), score(), score(), score(), score()]
}

fn policy() -> impl Strategy<Value = BaselinePolicy> {
    prop_oneof![
        Just(BaselinePolicy::default()),
        (0.0..3.0f64, 0.0..3.0f64).prop_map(|(below, above)| BaselinePolicy::Offset { below, above }),
        (-5.0..15.0f64, -5.0..15.0f64).prop_map(|(start, end)| BaselinePolicy::Linspace { start, end }),
        proptest::collection::vec(-5.0..15.0f64, 1..10)
            .prop_map(|points| BaselinePolicy::Static { points }),
    ]
}

proptest! {
    #[test]
    fn prop_paths_share_horizon_and_domain(
        first in presence(),
        last in presence(),
        weeks in 2..16usize,
        baseline in policy(),
    ) {
        let projector = GrowthProjector::new(weeks, baseline).unwrap();
        let t = projector.project(&ScoreVector::presence(first), &ScoreVector::presence(last));

        prop_assert_eq!(t.actual.len(), weeks);
        prop_assert_eq!(t.baseline.len(), weeks);
        prop_assert_eq!(t.weeks.len(), weeks);
        prop_assert!(t.actual.iter().chain(&t.baseline).all(|v| (0.0..=10.0).contains(v)));
    }

    #[test]
    fn prop_actual_endpoints_are_exact(
        first in presence(),
        last in presence(),
        weeks in 2..16usize,
    ) {
        let first = ScoreVector::presence(first);
        let last = ScoreVector::presence(last);
        let t = GrowthProjector::new(weeks, BaselinePolicy::default())
            .unwrap()
            .project(&first, &last);

        prop_assert_eq!(t.actual[0], first.composite());
        prop_assert_eq!(t.actual[weeks - 1], last.composite());
    }

    #[test]
    fn prop_actual_is_monotonic_when_improving(
        first in presence(),
        last in presence(),
        weeks in 2..16usize,
    ) {
        let first = ScoreVector::presence(first);
        let last = ScoreVector::presence(last);
        prop_assume!(last.composite() >= first.composite());

        let t = GrowthProjector::new(weeks, BaselinePolicy::default())
            .unwrap()
            .project(&first, &last);
        prop_assert!(t.actual.windows(2).all(|w| w[0] <= w[1]), "{:?}", t.actual);
    }
}

#[test]
fn test_worked_example_steps_by_constant_increment() {
    let t = GrowthProjector::default().project(
        &ScoreVector::presence([5.0, 5.5, 6.0, 5.0, 4.8]),
        &ScoreVector::presence([8.4, 8.1, 8.6, 7.9, 8.2]),
    );
    for w in t.actual.windows(2) {
        assert_close(w[1] - w[0], 0.596);
    }
    assert_close(t.gain(), 2.98);
}

#[test]
fn test_offset_baseline_follows_first_composite() {
    let config = SessionConfig::new().with_baseline(BaselinePolicy::Offset {
        below: 1.0,
        above: 0.5,
    });
    let t = config.projector().unwrap().project_composites(5.0, 8.0);
    assert_close(t.baseline[0], 4.0);
    assert_close(t.baseline[5], 5.5);
}

#[test]
fn test_week_labels() {
    assert_eq!(week_labels(3), vec!["Week 1", "W2", "W3"]);
}
