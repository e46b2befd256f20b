//! Session state
//!
//! [`SessionState`] owns one navigation position, one attempt store and the
//! growth projector for a single learner. All interaction goes through the
//! traits in [`crate::api`]; every call is journaled and every error is
//! recovered into a [`Notice`] without leaving the session unusable.

use crate::api::{GrowthReporter, ScenarioNavigator, ScoreRecorder};
use crate::catalog::{ScenarioCatalog, ScenarioKey};
use crate::config::{ScoreScale, SessionConfig};
use crate::error::{ConfigError, SessionError};
use crate::growth::{GrowthProjector, WeeklyTrajectory};
use crate::journal::{Outcome, SessionJournal};
use crate::navigation::{NavigationController, Page, View};
use crate::score::{ClampedValue, ScoreVector, VectorShape};
use crate::store::AttemptStore;
use crate::types::{AttemptIndex, SessionId};
use crate::view::{self, PageView};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Informational message for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// An interaction failed and the session fell back to a safe position
    Recovered { action: String, message: String },
    /// Scores were accepted after clamping into range
    Clamped {
        action: String,
        adjustments: Vec<ClampedValue>,
    },
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Notice::Recovered { message, .. } => message.clone(),
            Notice::Clamped { adjustments, .. } => {
                let parts: Vec<String> = adjustments
                    .iter()
                    .map(|c| format!("{} {} -> {}", c.label, c.requested, c.stored))
                    .collect();
                format!("Adjusted into 0-10: {}", parts.join(", "))
            }
        }
    }
}

/// Session-scoped state container
#[derive(Debug)]
pub struct SessionState {
    id: SessionId,
    config: SessionConfig,
    projector: GrowthProjector,
    catalog: Arc<ScenarioCatalog>,
    nav: NavigationController,
    store: AttemptStore,
    trajectories: BTreeMap<ScenarioKey, WeeklyTrajectory>,
    journal: SessionJournal,
    notice: Option<Notice>,
}

impl SessionState {
    /// Default configuration over the built-in catalog
    #[must_use]
    pub fn new() -> Self {
        Self::build(
            SessionConfig::default(),
            GrowthProjector::default(),
            Arc::new(ScenarioCatalog::builtin()),
        )
    }

    /// Custom configuration over the built-in catalog
    pub fn with_config(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_catalog(config, Arc::new(ScenarioCatalog::builtin()))
    }

    /// Custom configuration and catalog
    pub fn with_catalog(
        config: SessionConfig,
        catalog: Arc<ScenarioCatalog>,
    ) -> Result<Self, ConfigError> {
        let projector = config.projector()?;
        Ok(Self::build(config, projector, catalog))
    }

    fn build(
        config: SessionConfig,
        projector: GrowthProjector,
        catalog: Arc<ScenarioCatalog>,
    ) -> Self {
        let id = SessionId::new();
        debug!(session = %id, scenarios = catalog.len(), "session created");
        Self {
            id,
            config,
            projector,
            store: AttemptStore::new(Arc::clone(&catalog)),
            catalog,
            nav: NavigationController::new(),
            trajectories: BTreeMap::new(),
            journal: SessionJournal::default(),
            notice: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &AttemptStore {
        &self.store
    }

    #[must_use]
    pub fn journal(&self) -> &SessionJournal {
        &self.journal
    }

    /// Latest informational message, cleared by the next interaction
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Input constraint for score widgets
    #[must_use]
    pub fn scale(&self) -> ScoreScale {
        self.config.scale()
    }

    /// Horizon of every trajectory this session produces
    #[inline]
    #[must_use]
    pub fn weeks(&self) -> usize {
        self.projector.weeks()
    }

    /// Trajectory as of the last growth visit or score save
    #[must_use]
    pub fn last_trajectory(&self, key: ScenarioKey) -> Option<&WeeklyTrajectory> {
        self.trajectories.get(&key)
    }

    /// Scenarios with a remembered trajectory
    pub fn projected(&self) -> impl Iterator<Item = (ScenarioKey, &WeeklyTrajectory)> {
        self.trajectories.iter().map(|(k, t)| (*k, t))
    }

    /// Snapshot of the current page
    pub fn current_view(&self) -> Result<PageView, SessionError> {
        view::build(
            self.nav.position(),
            &self.catalog,
            &self.store,
            self.scale(),
            |key| self.trajectory(key),
        )
    }

    fn refresh_trajectory(&mut self, key: ScenarioKey) -> Result<(), SessionError> {
        let trajectory = self.trajectory(key)?;
        debug!(
            scenario = %key,
            first = trajectory.actual.first().copied().unwrap_or_default(),
            last = trajectory.actual.last().copied().unwrap_or_default(),
            "recomputed trajectory"
        );
        self.trajectories.insert(key, trajectory);
        Ok(())
    }

    /// Presence writes to the first or last attempt move the trajectory
    fn affects_growth(&self, key: ScenarioKey, shape: VectorShape, attempt: AttemptIndex) -> bool {
        shape == VectorShape::Presence
            && self
                .catalog
                .get(key)
                .is_ok_and(|s| attempt == AttemptIndex::FIRST || attempt == s.last_attempt())
    }

    fn after_write(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<(), SessionError> {
        if self.affects_growth(key, shape, attempt) {
            self.refresh_trajectory(key)?;
        }
        Ok(())
    }

    /// Journal the outcome and turn errors into a notice
    fn settle<T>(
        &mut self,
        action: String,
        result: Result<T, SessionError>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T, SessionError> {
        match &result {
            Ok(value) => {
                let detail = describe(value);
                info!(session = %self.id, %action, %detail, "ok");
                self.journal.record(action, Outcome::Ok(detail));
            }
            Err(err) => {
                let position = self.nav.position();
                warn!(session = %self.id, %action, error = %err, %position, "recovered");
                self.notice = Some(Notice::Recovered {
                    action: action.clone(),
                    message: err.user_message(),
                });
                self.journal.record(action, Outcome::Recovered(err.to_string()));
            }
        }
        result
    }

    fn note_clamps(&mut self, action: &str, adjustments: &[ClampedValue]) {
        if !adjustments.is_empty() {
            self.notice = Some(Notice::Clamped {
                action: action.to_string(),
                adjustments: adjustments.to_vec(),
            });
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioNavigator for SessionState {
    fn select_scenario(&mut self, key: &str) -> Result<ScenarioKey, SessionError> {
        self.notice = None;
        let result = self.nav.select(&self.catalog, key);
        self.settle(format!("select {key}"), result, |k| {
            format!("entered {k}")
        })
    }

    fn navigate(&mut self, page: Page) -> Result<View, SessionError> {
        self.notice = None;
        let mut result = self.nav.navigate(page).map(|_| self.nav.position());
        if result.is_ok() && page == Page::Growth {
            if let Some(key) = self.nav.active_scenario() {
                if let Err(err) = self.refresh_trajectory(key) {
                    result = Err(err);
                }
            }
        }
        self.settle(format!("navigate {}", page.as_str()), result, View::to_string)
    }

    fn navigate_named(&mut self, name: &str) -> Result<View, SessionError> {
        match name.parse::<Page>() {
            Ok(page) => self.navigate(page),
            Err(_) => {
                self.notice = None;
                let result = self.nav.navigate_named(name).map(|_| self.nav.position());
                self.settle(format!("navigate {name}"), result, View::to_string)
            }
        }
    }

    fn go_back(&mut self) -> View {
        self.notice = None;
        self.nav.back();
        let position = self.nav.position();
        info!(session = %self.id, "back to dashboard");
        self.journal
            .record("back", Outcome::Ok(position.to_string()));
        position
    }

    fn position(&self) -> View {
        self.nav.position()
    }
}

impl ScoreRecorder for SessionState {
    fn score_vector(
        &self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<ScoreVector, SessionError> {
        self.store.get(key, shape, attempt).cloned()
    }

    fn set_score_vector(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
        values: &[f64],
    ) -> Result<Vec<ClampedValue>, SessionError> {
        self.notice = None;
        let action = format!("set {key} {shape} {attempt}");
        let result = self
            .store
            .set(key, shape, attempt, values)
            .and_then(|adjusted| self.after_write(key, shape, attempt).map(|()| adjusted));
        let result = self.settle(action.clone(), result, |adjusted| {
            format!("saved with {} clamped", adjusted.len())
        });
        if let Ok(adjusted) = &result {
            self.note_clamps(&action, adjusted);
        }
        result
    }

    fn stage_scores(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
        values: &[f64],
    ) -> Result<Vec<ClampedValue>, SessionError> {
        self.notice = None;
        let action = format!("stage {key} {shape} {attempt}");
        let result = self.store.stage(key, shape, attempt, values);
        let result = self.settle(action.clone(), result, |adjusted| {
            format!("pending with {} clamped", adjusted.len())
        });
        if let Ok(adjusted) = &result {
            self.note_clamps(&action, adjusted);
        }
        result
    }

    fn save_scores(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<ScoreVector, SessionError> {
        self.notice = None;
        let result = self
            .store
            .commit(key, shape, attempt)
            .map(ScoreVector::clone)
            .and_then(|saved| self.after_write(key, shape, attempt).map(|()| saved));
        self.settle(format!("save {key} {shape} {attempt}"), result, |v| {
            format!("composite {:.3}", v.composite())
        })
    }

    fn discard_scores(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<bool, SessionError> {
        self.notice = None;
        let result = self.store.discard(key, shape, attempt);
        self.settle(format!("discard {key} {shape} {attempt}"), result, |had| {
            let detail = if *had { "discarded" } else { "nothing pending" };
            detail.to_string()
        })
    }

    fn reset_scenario(&mut self, key: ScenarioKey) {
        self.notice = None;
        self.store.reset(Some(key));
        self.trajectories.remove(&key);
        info!(session = %self.id, scenario = %key, "scenario reset to seeds");
        self.journal
            .record(format!("reset {key}"), Outcome::Ok("seeded".into()));
    }

    fn reset_all(&mut self) {
        self.notice = None;
        self.store.reset(None);
        self.trajectories.clear();
        self.nav.back();
        info!(session = %self.id, "session reset to seeds");
        self.journal.record("reset all", Outcome::Ok("seeded".into()));
    }
}

impl GrowthReporter for SessionState {
    fn trajectory(&self, key: ScenarioKey) -> Result<WeeklyTrajectory, SessionError> {
        let scenario = self.catalog.get(key)?;
        let first = self
            .store
            .get(key, VectorShape::Presence, AttemptIndex::FIRST)?;
        let last = self
            .store
            .get(key, VectorShape::Presence, scenario.last_attempt())?;
        Ok(self.projector.project(first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(n: usize) -> AttemptIndex {
        AttemptIndex::new(n).unwrap()
    }

    #[test]
    fn new_session_starts_on_dashboard() {
        let session = SessionState::new();
        assert_eq!(session.position(), View::Dashboard);
        assert!(session.journal().is_empty());
        assert!(session.notice().is_none());
        assert!(matches!(
            session.current_view().unwrap(),
            PageView::Dashboard { ref scenarios } if scenarios.len() == 3
        ));
    }

    #[test]
    fn growth_visit_caches_trajectory() {
        let mut session = SessionState::new();
        session.select_scenario("board-update").unwrap();
        assert!(session.last_trajectory(ScenarioKey::BoardUpdate).is_none());
        session.navigate(Page::Growth).unwrap();
        let cached = session.last_trajectory(ScenarioKey::BoardUpdate).unwrap();
        assert_eq!(cached.len(), 6);
        assert_eq!(
            *cached,
            session.trajectory(ScenarioKey::BoardUpdate).unwrap()
        );
    }

    #[test]
    fn unknown_scenario_sets_notice() {
        let mut session = SessionState::new();
        assert!(session.select_scenario("Nonexistent").is_err());
        assert_eq!(session.position(), View::Dashboard);
        assert!(matches!(session.notice(), Some(Notice::Recovered { .. })));
        assert_eq!(session.journal().recovered().count(), 1);
        assert_eq!(session.store().touched_count(), 0);

        session.select_scenario("board-update").unwrap();
        assert!(session.notice().is_none());
    }

    #[test]
    fn clamped_set_leaves_a_notice() {
        let mut session = SessionState::new();
        let adjusted = session
            .set_score_vector(
                ScenarioKey::ClientNegotiation,
                VectorShape::Stage,
                attempt(1),
                &[11.0, -2.0, 5.0],
            )
            .unwrap();
        assert_eq!(adjusted.len(), 2);
        let notice = session.notice().unwrap();
        assert!(matches!(notice, Notice::Clamped { .. }));
        assert!(notice.message().contains("Opening"));
    }

    #[test]
    fn presence_save_on_last_attempt_refreshes_trajectory() {
        let mut session = SessionState::new();
        let key = ScenarioKey::ClientNegotiation;
        session
            .set_score_vector(key, VectorShape::Presence, attempt(2), &[9.0; 5])
            .unwrap();
        let t = session.last_trajectory(key).unwrap();
        assert_eq!(t.actual[5], 9.0);

        session
            .set_score_vector(key, VectorShape::Stage, attempt(2), &[1.0; 3])
            .unwrap();
        assert_eq!(session.last_trajectory(key).unwrap().actual[5], 9.0);
    }

    #[test]
    fn reset_all_returns_to_dashboard() {
        let mut session = SessionState::new();
        session.select_scenario("crisis-briefing").unwrap();
        session.navigate(Page::Growth).unwrap();
        session.reset_all();
        assert_eq!(session.position(), View::Dashboard);
        assert_eq!(session.projected().count(), 0);
        assert_eq!(session.store().touched_count(), 0);
    }
}
