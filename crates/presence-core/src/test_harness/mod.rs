// Test harness module
// Seeded interaction simulator and multi-seed certification

pub mod simulator;

pub use simulator::*;

use crate::config::SessionConfig;
use crate::error::ConfigError;

/// Runs the simulator across many seeds
pub struct TestHarness;

impl TestHarness {
    /// Run `operations` interactions for each seed in `0..seeds`
    pub fn run_certification(
        session: &SessionConfig,
        seeds: u64,
        operations: u64,
    ) -> Result<CertificationReport, ConfigError> {
        let mut failed_seeds = Vec::new();
        let mut total_violations = 0;

        for seed in 0..seeds {
            let config = SimulatorConfig {
                seed,
                total_operations: operations,
                session: session.clone(),
                ..Default::default()
            };
            let report = run_simulator(config)?;
            if !report.passed() {
                failed_seeds.push(seed);
            }
            total_violations += report.violations.len();
        }

        tracing::info!(seeds, operations, total_violations, "certification finished");
        Ok(CertificationReport {
            passed: failed_seeds.is_empty(),
            total_violations,
            seeds_tested: seeds,
            failed_seeds,
        })
    }
}

/// Report from certification
#[derive(Debug, Clone)]
pub struct CertificationReport {
    pub passed: bool,
    pub total_violations: usize,
    pub seeds_tested: u64,
    pub failed_seeds: Vec<u64>,
}
