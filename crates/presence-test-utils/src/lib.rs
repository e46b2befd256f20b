//! Testing utilities for the presence workspace
//!
//! Shared fixtures and assertions.

#![allow(missing_docs)]

use presence_core::catalog::{AttemptSeed, Scenario, ScenarioCatalog, ScenarioKey};
use presence_core::{
    AttemptIndex, GrowthReporter, ScenarioNavigator, ScoreRecorder, SessionConfig, SessionState,
    VectorShape, WeeklyTrajectory,
};
use std::sync::Arc;

/// Tolerance for float comparisons against hand-computed values
pub const EPSILON: f64 = 1e-9;

pub fn attempt(n: usize) -> AttemptIndex {
    AttemptIndex::new(n).expect("attempt numbers start at 1")
}

/// Fresh session over the built-in catalog
pub fn setup_session() -> SessionState {
    SessionState::new()
}

/// Fresh session with the given horizon
pub fn setup_session_with_weeks(weeks: usize) -> SessionState {
    SessionState::with_config(SessionConfig::new().with_weeks(weeks)).expect("valid weeks")
}

/// Session already inside `key` on its overview page
pub fn session_in(key: ScenarioKey) -> SessionState {
    let mut session = setup_session();
    session.select_scenario(key.as_str()).expect("built-in scenario");
    session
}

/// Catalog whose `key` scenario is reseeded with two presence attempts
pub fn catalog_with_presence(key: ScenarioKey, first: [f64; 5], last: [f64; 5]) -> ScenarioCatalog {
    let mut catalog = ScenarioCatalog::builtin();
    let scenario: Scenario = catalog.remove(key).expect("built-in scenario");
    let seeds = vec![
        AttemptSeed::new(first, [5.0, 5.0, 5.0]),
        AttemptSeed::new(last, [5.0, 5.0, 5.0]),
    ];
    catalog
        .register(scenario.with_seeds(seeds).expect("two attempts"))
        .expect("register");
    catalog
}

/// Session whose `key` scenario starts from the given first and last presence vectors
pub fn session_with_presence(
    key: ScenarioKey,
    first: [f64; 5],
    last: [f64; 5],
    weeks: usize,
) -> SessionState {
    SessionState::with_catalog(
        SessionConfig::new().with_weeks(weeks),
        Arc::new(catalog_with_presence(key, first, last)),
    )
    .expect("valid config")
}

/// Every committed vector of every scenario, for whole-state comparisons
pub fn snapshot(session: &SessionState) -> Vec<(ScenarioKey, VectorShape, usize, Vec<f64>)> {
    let mut out = Vec::new();
    for scenario in session.catalog().iter() {
        for shape in VectorShape::ALL {
            for a in scenario.attempts() {
                let v = session
                    .score_vector(scenario.key, shape, a)
                    .expect("in-range attempt");
                out.push((scenario.key, shape, a.get(), v.values().to_vec()));
            }
        }
    }
    out
}

/// Trajectory for `key`, panicking on error
pub fn trajectory(session: &SessionState, key: ScenarioKey) -> WeeklyTrajectory {
    session.trajectory(key).expect("trajectory")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_path_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "path length");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < EPSILON, "week {}: expected {e}, got {a}", i + 1);
    }
}

pub fn assert_in_score_range(values: &[f64]) {
    for v in values {
        assert!((0.0..=10.0).contains(v), "{v} outside 0..=10");
    }
}
