use presence_core::test_harness::{run_simulator, OperationDistribution, SimulatorConfig, TestHarness};
use presence_core::{BaselinePolicy, Granularity, SessionConfig};

#[test]
fn test_simulator_multiple_seeds() {
    for seed in 0..8 {
        let report = run_simulator(SimulatorConfig {
            seed,
            total_operations: 1_000,
            ..Default::default()
        })
        .unwrap();
        assert!(report.passed(), "seed {seed}:\n{}", report.generate_text());
    }
}

#[test]
fn test_simulator_invalid_heavy_distribution() {
    let report = run_simulator(SimulatorConfig {
        seed: 99,
        total_operations: 1_000,
        operation_distribution: OperationDistribution {
            valid_ops: 0.2,
            edge_cases: 0.3,
            invalid_ops: 0.5,
        },
        ..Default::default()
    })
    .unwrap();
    assert!(report.passed(), "{}", report.generate_text());
    assert!(report.stats.failed_operations > report.stats.total_operations / 4);
}

#[test]
fn test_simulator_with_alternate_session_config() {
    let session = SessionConfig::new()
        .with_weeks(10)
        .with_granularity(Granularity::Whole)
        .with_baseline(BaselinePolicy::Offset {
            below: 1.5,
            above: 0.5,
        });
    let report = run_simulator(SimulatorConfig {
        seed: 3,
        total_operations: 1_000,
        session,
        ..Default::default()
    })
    .unwrap();
    assert!(report.passed(), "{}", report.generate_text());
}

#[test]
fn test_certification_across_seeds() {
    let report = TestHarness::run_certification(&SessionConfig::default(), 5, 500).unwrap();
    assert!(report.passed, "failed seeds: {:?}", report.failed_seeds);
    assert_eq!(report.seeds_tested, 5);
    assert_eq!(report.total_violations, 0);
}
