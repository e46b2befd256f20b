//! Boundary traits consumed by rendering layers

use crate::catalog::ScenarioKey;
use crate::error::SessionError;
use crate::growth::WeeklyTrajectory;
use crate::navigation::{Page, View};
use crate::score::{ClampedValue, ScoreVector, VectorShape};
use crate::types::AttemptIndex;

pub trait ScenarioNavigator {
    /// Enter a scenario on its overview page
    fn select_scenario(&mut self, key: &str) -> Result<ScenarioKey, SessionError>;
    fn navigate(&mut self, page: Page) -> Result<View, SessionError>;
    fn navigate_named(&mut self, name: &str) -> Result<View, SessionError>;
    fn go_back(&mut self) -> View;
    fn position(&self) -> View;
}

pub trait ScoreRecorder {
    fn score_vector(
        &self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<ScoreVector, SessionError>;

    /// Validate, clamp and commit; returns the values that were clamped
    fn set_score_vector(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
        values: &[f64],
    ) -> Result<Vec<ClampedValue>, SessionError>;

    /// Validate and clamp into a pending edit without committing
    fn stage_scores(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
        values: &[f64],
    ) -> Result<Vec<ClampedValue>, SessionError>;

    fn save_scores(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<ScoreVector, SessionError>;

    fn discard_scores(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<bool, SessionError>;

    fn reset_scenario(&mut self, key: ScenarioKey);

    /// Restore every scenario to its seeds and return to the dashboard
    fn reset_all(&mut self);
}

pub trait GrowthReporter {
    /// Trajectory from the committed first and last presence vectors
    fn trajectory(&self, key: ScenarioKey) -> Result<WeeklyTrajectory, SessionError>;
}
