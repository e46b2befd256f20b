//! Interaction simulator
//!
//! Drives a [`SessionState`] with a seeded stream of valid, edge-case and
//! invalid interactions, checks every outcome against what the operation
//! should do from the current state, and re-checks the session invariants
//! after every step.

use crate::api::{GrowthReporter, ScenarioNavigator, ScoreRecorder};
use crate::catalog::ScenarioKey;
use crate::config::SessionConfig;
use crate::error::{ConfigError, SessionError};
use crate::navigation::{Page, View};
use crate::score::{VectorShape, SCORE_MAX, SCORE_MIN};
use crate::session::SessionState;
use crate::types::AttemptIndex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;
use std::fmt;

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    pub total_operations: u64,
    pub operation_distribution: OperationDistribution,
    /// Configuration of the simulated session
    pub session: SessionConfig,
    pub stop_on_first_violation: bool,
    pub stop_on_error_count: Option<usize>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            total_operations: 2_000,
            operation_distribution: OperationDistribution::default(),
            session: SessionConfig::default(),
            stop_on_first_violation: true,
            stop_on_error_count: None,
        }
    }
}

/// Probability distribution for operation generation
#[derive(Debug, Clone)]
pub struct OperationDistribution {
    /// Ordinary learner behaviour
    pub valid_ops: f64,
    /// Boundary values and repeated actions
    pub edge_cases: f64,
    /// Inputs the session must recover from
    pub invalid_ops: f64,
}

impl Default for OperationDistribution {
    fn default() -> Self {
        Self {
            valid_ops: 0.70,
            edge_cases: 0.20,
            invalid_ops: 0.10,
        }
    }
}

/// Everything a learner can do to a session
#[derive(Debug, Clone)]
pub enum SimulatedOperation {
    Select(String),
    Navigate(Page),
    NavigateNamed(String),
    Back,
    SetScores {
        key: ScenarioKey,
        shape: VectorShape,
        attempt: usize,
        values: Vec<f64>,
    },
    StageScores {
        key: ScenarioKey,
        shape: VectorShape,
        attempt: usize,
        values: Vec<f64>,
    },
    SaveScores {
        key: ScenarioKey,
        shape: VectorShape,
        attempt: usize,
    },
    DiscardScores {
        key: ScenarioKey,
        shape: VectorShape,
        attempt: usize,
    },
    ResetScenario(ScenarioKey),
    ResetAll,
    QueryGrowth(ScenarioKey),
    RenderView,
}

impl SimulatedOperation {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SimulatedOperation::Select(_) => "select",
            SimulatedOperation::Navigate(_) => "navigate",
            SimulatedOperation::NavigateNamed(_) => "navigate_named",
            SimulatedOperation::Back => "back",
            SimulatedOperation::SetScores { .. } => "set_scores",
            SimulatedOperation::StageScores { .. } => "stage_scores",
            SimulatedOperation::SaveScores { .. } => "save_scores",
            SimulatedOperation::DiscardScores { .. } => "discard_scores",
            SimulatedOperation::ResetScenario(_) => "reset_scenario",
            SimulatedOperation::ResetAll => "reset_all",
            SimulatedOperation::QueryGrowth(_) => "query_growth",
            SimulatedOperation::RenderView => "render_view",
        }
    }
}

/// Expected result classification for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedResult {
    ShouldSucceed,
    ShouldFail,
}

/// A violation detected during simulation
#[derive(Debug, Clone)]
pub enum Violation {
    /// Operation outcome didn't match expectation
    UnexpectedOutcome {
        operation_index: u64,
        operation: SimulatedOperation,
        expected: ExpectedResult,
        actual: Result<String, String>,
    },
    Invariant(InvariantViolation),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnexpectedOutcome {
                operation_index,
                operation,
                expected,
                actual,
            } => write!(
                f,
                "op #{operation_index} {operation:?}: expected {expected:?}, got {actual:?}"
            ),
            Violation::Invariant(v) => write!(f, "{:?}: {}", v.check, v.details),
        }
    }
}

/// A specific invariant violation
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    pub check: InvariantCheck,
    pub details: String,
}

/// Types of invariant checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantCheck {
    // Navigation
    PositionIsValid,

    // Store
    VectorsHaveShapeDimensions,
    ValuesWithinScoreRange,

    // Growth
    TrajectoryHasHorizonLength,
    TrajectoryEndpointsMatchComposites,
    ActualPathIsMonotonic,
    CachedTrajectoryIsCurrent,

    // Journal
    JournalIsOrdered,
}

/// Statistics collected during simulation
#[derive(Debug, Clone, Default)]
pub struct OperationStats {
    pub total_operations: u64,
    pub successful_operations: u64,
    pub failed_operations: u64,
    pub invariant_violations: u64,
    pub operations_by_type: HashMap<&'static str, u64>,
}

impl OperationStats {
    pub fn record(&mut self, operation: &SimulatedOperation, result: &Result<String, String>) {
        self.total_operations += 1;
        *self.operations_by_type.entry(operation.name()).or_insert(0) += 1;
        match result {
            Ok(_) => self.successful_operations += 1,
            Err(_) => self.failed_operations += 1,
        }
    }
}

/// Final report from the simulator
#[derive(Debug, Clone)]
pub struct SimulatorReport {
    pub config: SimulatorConfig,
    pub stats: OperationStats,
    pub violations: Vec<Violation>,
    pub final_position: View,
    pub touched_scenarios: usize,
    pub journal_len: usize,
}

impl SimulatorReport {
    /// Check if simulation passed all criteria
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut lines = vec![
            "=== Session Simulator Report ===".to_string(),
            String::new(),
            format!("Seed: {}", self.config.seed),
            format!("Weeks: {}", self.config.session.weeks),
            format!("Total Operations: {}", self.stats.total_operations),
            format!("Successful: {}", self.stats.successful_operations),
            format!("Recovered: {}", self.stats.failed_operations),
            format!("Violations: {}", self.violations.len()),
            format!("Final Position: {}", self.final_position),
            format!("Touched Scenarios: {}", self.touched_scenarios),
            format!("Journal Entries: {}", self.journal_len),
        ];

        let mut by_type: Vec<_> = self.stats.operations_by_type.iter().collect();
        by_type.sort();
        lines.push(String::new());
        lines.push("=== Operations ===".to_string());
        for (name, count) in by_type {
            lines.push(format!("{name}: {count}"));
        }

        if !self.violations.is_empty() {
            lines.push(String::new());
            lines.push("=== Violations ===".to_string());
            for (i, v) in self.violations.iter().enumerate() {
                lines.push(format!("{}. {v}", i + 1));
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "=== Result: {} ===",
            if self.passed() { "PASS" } else { "FAIL" }
        ));
        lines.join("\n") + "\n"
    }
}

/// Run the simulator
pub fn run_simulator(config: SimulatorConfig) -> Result<SimulatorReport, ConfigError> {
    let mut session = SessionState::with_config(config.session.clone())?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut stats = OperationStats::default();
    let mut violations = Vec::new();

    for i in 0..config.total_operations {
        let operation = generate_operation(&mut rng, &config.operation_distribution, &session);
        let expected = classify_expected_result(&session, &operation);
        let actual = execute_operation(&mut session, &operation)
            .map_err(|e| format!("{e:?}"));

        stats.record(&operation, &actual);
        let before = violations.len();

        let outcome_matches = matches!(
            (expected, &actual),
            (ExpectedResult::ShouldSucceed, Ok(_)) | (ExpectedResult::ShouldFail, Err(_))
        );
        if !outcome_matches {
            violations.push(Violation::UnexpectedOutcome {
                operation_index: i,
                operation: operation.clone(),
                expected,
                actual,
            });
        }

        if let Err(found) = SessionInvariants::check_all(&session) {
            stats.invariant_violations += found.len() as u64;
            violations.extend(found.into_iter().map(Violation::Invariant));
        }

        if violations.len() > before && should_stop(&config, violations.len()) {
            break;
        }
    }

    tracing::debug!(
        seed = config.seed,
        operations = stats.total_operations,
        violations = violations.len(),
        "simulation finished"
    );

    Ok(SimulatorReport {
        final_position: session.position(),
        touched_scenarios: session.store().touched_count(),
        journal_len: session.journal().len(),
        config,
        stats,
        violations,
    })
}

fn should_stop(config: &SimulatorConfig, violations: usize) -> bool {
    config.stop_on_first_violation
        || config
            .stop_on_error_count
            .is_some_and(|max_errors| violations >= max_errors)
}

fn generate_operation(
    rng: &mut StdRng,
    distribution: &OperationDistribution,
    session: &SessionState,
) -> SimulatedOperation {
    let r: f64 = rng.gen();

    if r < distribution.valid_ops {
        generate_valid_operation(rng, session)
    } else if r < distribution.valid_ops + distribution.edge_cases {
        generate_edge_case_operation(rng, session)
    } else {
        generate_invalid_operation(rng, session)
    }
}

fn pick_key(rng: &mut StdRng, session: &SessionState) -> ScenarioKey {
    let keys: Vec<_> = session.catalog().keys().collect();
    if keys.is_empty() {
        return ScenarioKey::ALL[rng.gen_range(0..ScenarioKey::ALL.len())];
    }
    keys[rng.gen_range(0..keys.len())]
}

fn pick_shape(rng: &mut StdRng) -> VectorShape {
    VectorShape::ALL[rng.gen_range(0..VectorShape::ALL.len())]
}

fn pick_page(rng: &mut StdRng) -> Page {
    Page::ALL[rng.gen_range(0..Page::ALL.len())]
}

fn attempt_count(session: &SessionState, key: ScenarioKey) -> usize {
    session.catalog().get(key).map_or(0, |s| s.attempt_count())
}

/// Slider values on the tenth grid
fn slider_values(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n)
        .map(|_| f64::from(rng.gen_range(0..=100_u8)) / 10.0)
        .collect()
}

fn generate_valid_operation(rng: &mut StdRng, session: &SessionState) -> SimulatedOperation {
    let key = session
        .position()
        .scenario()
        .unwrap_or_else(|| pick_key(rng, session));
    let shape = pick_shape(rng);
    let attempt = rng.gen_range(1..=attempt_count(session, key).max(1));

    match rng.gen_range(0..10) {
        0 | 1 => SimulatedOperation::Select(key.as_str().to_string()),
        2 | 3 if session.position() != View::Dashboard => {
            SimulatedOperation::Navigate(pick_page(rng))
        }
        4 => SimulatedOperation::SetScores {
            key,
            shape,
            attempt,
            values: slider_values(rng, shape.dimensions()),
        },
        5 => SimulatedOperation::StageScores {
            key,
            shape,
            attempt,
            values: slider_values(rng, shape.dimensions()),
        },
        6 => SimulatedOperation::SaveScores {
            key,
            shape,
            attempt,
        },
        7 => SimulatedOperation::QueryGrowth(key),
        8 => SimulatedOperation::RenderView,
        _ => SimulatedOperation::Back,
    }
}

fn generate_edge_case_operation(rng: &mut StdRng, session: &SessionState) -> SimulatedOperation {
    let key = pick_key(rng, session);
    let shape = pick_shape(rng);
    let last = attempt_count(session, key).max(1);

    match rng.gen_range(0..7) {
        0 => {
            // Endpoints and out-of-range finite values, all clamped
            let values = (0..shape.dimensions())
                .map(|_| match rng.gen_range(0..4) {
                    0 => SCORE_MIN,
                    1 => SCORE_MAX,
                    2 => rng.gen_range(-50.0..0.0),
                    _ => rng.gen_range(10.0..50.0),
                })
                .collect();
            SimulatedOperation::SetScores {
                key,
                shape,
                attempt: last,
                values,
            }
        }
        1 => SimulatedOperation::DiscardScores {
            key,
            shape,
            attempt: last,
        },
        2 => SimulatedOperation::ResetScenario(key),
        3 => SimulatedOperation::ResetAll,
        4 => SimulatedOperation::Select(key.as_str().to_uppercase()),
        5 => SimulatedOperation::NavigateNamed(pick_page(rng).title().to_string()),
        _ => SimulatedOperation::Back,
    }
}

fn generate_invalid_operation(rng: &mut StdRng, session: &SessionState) -> SimulatedOperation {
    let key = pick_key(rng, session);
    let shape = pick_shape(rng);
    let last = attempt_count(session, key);

    match rng.gen_range(0..6) {
        0 => SimulatedOperation::Select("Nonexistent".to_string()),
        1 => SimulatedOperation::NavigateNamed("Settings".to_string()),
        2 => {
            // One value too many or too few
            let n = if rng.gen_bool(0.5) {
                shape.dimensions() + 1
            } else {
                shape.dimensions() - 1
            };
            SimulatedOperation::SetScores {
                key,
                shape,
                attempt: 1,
                values: slider_values(rng, n),
            }
        }
        3 => {
            let mut values = slider_values(rng, shape.dimensions());
            let idx = rng.gen_range(0..values.len());
            values[idx] = if rng.gen_bool(0.5) {
                f64::NAN
            } else {
                f64::INFINITY
            };
            SimulatedOperation::StageScores {
                key,
                shape,
                attempt: 1,
                values,
            }
        }
        4 => SimulatedOperation::SetScores {
            key,
            shape,
            attempt: if rng.gen_bool(0.5) { 0 } else { last + 1 },
            values: slider_values(rng, shape.dimensions()),
        },
        _ => SimulatedOperation::SaveScores {
            key,
            shape,
            attempt: last + 1,
        },
    }
}

fn attempt_in_range(session: &SessionState, key: ScenarioKey, attempt: usize) -> bool {
    (1..=attempt_count(session, key)).contains(&attempt)
}

fn values_valid(shape: VectorShape, values: &[f64]) -> bool {
    values.len() == shape.dimensions() && values.iter().all(|v| v.is_finite())
}

/// Classify whether an operation should succeed from the current state
fn classify_expected_result(session: &SessionState, operation: &SimulatedOperation) -> ExpectedResult {
    let ok = match operation {
        SimulatedOperation::Select(name) => session.catalog().lookup(name).is_ok(),
        SimulatedOperation::Navigate(_) => session.position() != View::Dashboard,
        SimulatedOperation::NavigateNamed(name) => {
            session.position() != View::Dashboard && name.parse::<Page>().is_ok()
        }
        SimulatedOperation::SetScores {
            key,
            shape,
            attempt,
            values,
        }
        | SimulatedOperation::StageScores {
            key,
            shape,
            attempt,
            values,
        } => attempt_in_range(session, *key, *attempt) && values_valid(*shape, values),
        SimulatedOperation::SaveScores {
            key,
            shape,
            attempt,
        } => {
            attempt_in_range(session, *key, *attempt)
                && AttemptIndex::new(*attempt).is_some_and(|a| {
                    matches!(session.store().pending(*key, *shape, a), Ok(Some(_)))
                })
        }
        SimulatedOperation::DiscardScores { key, attempt, .. } => {
            attempt_in_range(session, *key, *attempt)
        }
        SimulatedOperation::QueryGrowth(key) => session.catalog().contains(*key),
        SimulatedOperation::Back
        | SimulatedOperation::ResetScenario(_)
        | SimulatedOperation::ResetAll
        | SimulatedOperation::RenderView => true,
    };
    if ok {
        ExpectedResult::ShouldSucceed
    } else {
        ExpectedResult::ShouldFail
    }
}

fn attempt_index(
    session: &SessionState,
    key: ScenarioKey,
    attempt: usize,
) -> Result<AttemptIndex, SessionError> {
    AttemptIndex::new(attempt).ok_or(SessionError::AttemptOutOfRange {
        attempt,
        max: attempt_count(session, key),
    })
}

fn execute_operation(
    session: &mut SessionState,
    operation: &SimulatedOperation,
) -> Result<String, SessionError> {
    match operation {
        SimulatedOperation::Select(name) => {
            let key = session.select_scenario(name)?;
            Ok(format!("Selected {key}"))
        }
        SimulatedOperation::Navigate(page) => {
            let view = session.navigate(*page)?;
            Ok(format!("At {view}"))
        }
        SimulatedOperation::NavigateNamed(name) => {
            let view = session.navigate_named(name)?;
            Ok(format!("At {view}"))
        }
        SimulatedOperation::Back => Ok(format!("At {}", session.go_back())),
        SimulatedOperation::SetScores {
            key,
            shape,
            attempt,
            values,
        } => {
            let attempt = attempt_index(session, *key, *attempt)?;
            let clamped = session.set_score_vector(*key, *shape, attempt, values)?;
            Ok(format!("Saved, {} clamped", clamped.len()))
        }
        SimulatedOperation::StageScores {
            key,
            shape,
            attempt,
            values,
        } => {
            let attempt = attempt_index(session, *key, *attempt)?;
            let clamped = session.stage_scores(*key, *shape, attempt, values)?;
            Ok(format!("Pending, {} clamped", clamped.len()))
        }
        SimulatedOperation::SaveScores {
            key,
            shape,
            attempt,
        } => {
            let attempt = attempt_index(session, *key, *attempt)?;
            let saved = session.save_scores(*key, *shape, attempt)?;
            Ok(format!("Committed composite {:.2}", saved.composite()))
        }
        SimulatedOperation::DiscardScores {
            key,
            shape,
            attempt,
        } => {
            let attempt = attempt_index(session, *key, *attempt)?;
            let had = session.discard_scores(*key, *shape, attempt)?;
            Ok(format!("Discarded: {had}"))
        }
        SimulatedOperation::ResetScenario(key) => {
            session.reset_scenario(*key);
            Ok(format!("Reset {key}"))
        }
        SimulatedOperation::ResetAll => {
            session.reset_all();
            Ok("Reset all".to_string())
        }
        SimulatedOperation::QueryGrowth(key) => {
            let t = session.trajectory(*key)?;
            Ok(format!("Gain {:.2} over {} weeks", t.gain(), t.len()))
        }
        SimulatedOperation::RenderView => {
            let view = session.current_view()?;
            Ok(format!("Rendered {:?}", view.page()))
        }
    }
}

/// Session invariant checks
pub struct SessionInvariants;

impl SessionInvariants {
    /// Check all invariants
    pub fn check_all(session: &SessionState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if let Err(e) = Self::check_navigation_invariants(session) {
            violations.push(e);
        }
        violations.extend(Self::check_store_invariants(session));
        violations.extend(Self::check_growth_invariants(session));
        if let Err(e) = Self::check_journal_invariants(session) {
            violations.push(e);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    pub fn check_navigation_invariants(session: &SessionState) -> Result<(), InvariantViolation> {
        match session.position() {
            View::Scenario { key, .. } if !session.catalog().contains(key) => {
                Err(InvariantViolation {
                    check: InvariantCheck::PositionIsValid,
                    details: format!("positioned in unknown scenario {key}"),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn check_store_invariants(session: &SessionState) -> Vec<InvariantViolation> {
        let mut found = Vec::new();
        for scenario in session.catalog().iter() {
            for shape in VectorShape::ALL {
                for attempt in scenario.attempts() {
                    let vectors = [
                        session.store().get(scenario.key, shape, attempt),
                        session.store().draft(scenario.key, shape, attempt),
                    ];
                    for vector in vectors {
                        let vector = match vector {
                            Ok(v) => v,
                            Err(e) => {
                                found.push(InvariantViolation {
                                    check: InvariantCheck::VectorsHaveShapeDimensions,
                                    details: format!("{} {shape} {attempt}: {e}", scenario.key),
                                });
                                continue;
                            }
                        };
                        if vector.len() != shape.dimensions() || vector.shape() != shape {
                            found.push(InvariantViolation {
                                check: InvariantCheck::VectorsHaveShapeDimensions,
                                details: format!(
                                    "{} {shape} {attempt} holds {} values",
                                    scenario.key,
                                    vector.len()
                                ),
                            });
                        }
                        if !within_range(vector.values()) {
                            found.push(InvariantViolation {
                                check: InvariantCheck::ValuesWithinScoreRange,
                                details: format!(
                                    "{} {shape} {attempt}: {:?}",
                                    scenario.key,
                                    vector.values()
                                ),
                            });
                        }
                    }
                }
            }
        }
        found
    }

    pub fn check_growth_invariants(session: &SessionState) -> Vec<InvariantViolation> {
        let mut found = Vec::new();
        let weeks = session.weeks();

        for scenario in session.catalog().iter() {
            let key = scenario.key;
            let fresh = match session.trajectory(key) {
                Ok(t) => t,
                Err(e) => {
                    found.push(InvariantViolation {
                        check: InvariantCheck::TrajectoryHasHorizonLength,
                        details: format!("{key}: {e}"),
                    });
                    continue;
                }
            };

            if fresh.actual.len() != weeks
                || fresh.baseline.len() != weeks
                || fresh.weeks.len() != weeks
                || !within_range(&fresh.actual)
                || !within_range(&fresh.baseline)
            {
                found.push(InvariantViolation {
                    check: InvariantCheck::TrajectoryHasHorizonLength,
                    details: format!("{key}: {fresh:?}"),
                });
                continue;
            }

            let store = session.store();
            let composites = (
                store.get(key, VectorShape::Presence, AttemptIndex::FIRST),
                store.get(key, VectorShape::Presence, scenario.last_attempt()),
            );
            if let (Ok(first), Ok(last)) = composites {
                let (first, last) = (first.composite(), last.composite());
                if fresh.actual[0] != first || fresh.actual[weeks - 1] != last {
                    found.push(InvariantViolation {
                        check: InvariantCheck::TrajectoryEndpointsMatchComposites,
                        details: format!("{key}: {first} -> {last} vs {:?}", fresh.actual),
                    });
                }
                if last >= first && fresh.actual.windows(2).any(|w| w[1] < w[0]) {
                    found.push(InvariantViolation {
                        check: InvariantCheck::ActualPathIsMonotonic,
                        details: format!("{key}: {:?}", fresh.actual),
                    });
                }
            }

            if let Some(cached) = session.last_trajectory(key) {
                if *cached != fresh {
                    found.push(InvariantViolation {
                        check: InvariantCheck::CachedTrajectoryIsCurrent,
                        details: format!("{key}: cached trajectory is stale"),
                    });
                }
            }
        }
        found
    }

    pub fn check_journal_invariants(session: &SessionState) -> Result<(), InvariantViolation> {
        if session.journal().is_ordered() {
            Ok(())
        } else {
            Err(InvariantViolation {
                check: InvariantCheck::JournalIsOrdered,
                details: "journal sequence or timestamps went backwards".to_string(),
            })
        }
    }
}

fn within_range(values: &[f64]) -> bool {
    values
        .iter()
        .all(|v| v.is_finite() && (SCORE_MIN..=SCORE_MAX).contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_passes() {
        let report = run_simulator(SimulatorConfig {
            total_operations: 500,
            ..Default::default()
        })
        .unwrap();
        assert!(report.passed(), "{}", report.generate_text());
        assert_eq!(report.stats.total_operations, 500);
        assert!(report.stats.failed_operations > 0);
    }

    #[test]
    fn both_stop_flags_cap_the_run() {
        let capped = SimulatorConfig {
            stop_on_first_violation: false,
            stop_on_error_count: Some(3),
            ..Default::default()
        };
        assert!(!should_stop(&capped, 2));
        assert!(should_stop(&capped, 3));

        let first = SimulatorConfig {
            stop_on_first_violation: true,
            ..Default::default()
        };
        assert!(should_stop(&first, 1));
        let uncapped = SimulatorConfig {
            stop_on_first_violation: false,
            ..Default::default()
        };
        assert!(!should_stop(&uncapped, 1_000));
    }

    #[test]
    fn same_seed_same_outcome() {
        let config = SimulatorConfig {
            seed: 7,
            total_operations: 200,
            ..Default::default()
        };
        let a = run_simulator(config.clone()).unwrap();
        let b = run_simulator(config).unwrap();
        assert_eq!(a.stats.successful_operations, b.stats.successful_operations);
        assert_eq!(a.final_position, b.final_position);
        assert_eq!(a.journal_len, b.journal_len);
    }

    #[test]
    fn invalid_session_config_is_reported() {
        let err = run_simulator(SimulatorConfig {
            session: SessionConfig::new().with_weeks(1),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::TooFewWeeks(1));
    }

    #[test]
    fn report_text_names_result() {
        let report = run_simulator(SimulatorConfig {
            total_operations: 50,
            ..Default::default()
        })
        .unwrap();
        let text = report.generate_text();
        assert!(text.contains("Seed: 42"));
        assert!(text.contains("=== Result: PASS ==="));
    }
}
