//! Page snapshots for rendering layers
//!
//! A [`PageView`] carries exactly what one page shows: catalog copy plus the
//! current attempt vectors. Renderers consume these and own no state.

use crate::catalog::{
    BaselineScript, Brief, CoachingScript, Kpi, LearningModule, ReSimulationScript, Scenario,
    ScenarioCatalog, ScenarioKey, JOURNEY_STAGES,
};
use crate::config::ScoreScale;
use crate::error::SessionError;
use crate::growth::WeeklyTrajectory;
use crate::navigation::{Page, View};
use crate::score::VectorShape;
use crate::store::{AttemptStore, SlotStatus};
use serde::Serialize;

/// One scenario card on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub key: ScenarioKey,
    pub title: &'static str,
    pub summary: &'static str,
    pub chips: Vec<&'static str>,
    pub attempts: usize,
}

impl From<&Scenario> for ScenarioSummary {
    fn from(s: &Scenario) -> Self {
        Self {
            key: s.key,
            title: s.title,
            summary: s.summary,
            chips: s.chips.clone(),
            attempts: s.attempt_count(),
        }
    }
}

/// Scores of one attempt for one shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptScores {
    pub attempt: usize,
    pub caption: String,
    pub committed: Vec<f64>,
    /// Pending edit if any, else the committed values
    pub draft: Vec<f64>,
    pub composite: f64,
    pub status: SlotStatus,
}

/// All attempts of one shape, for a radar or grouped-bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapePanel {
    pub shape: VectorShape,
    pub labels: &'static [&'static str],
    pub attempts: Vec<AttemptScores>,
}

/// Snapshot of the current page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Dashboard {
        scenarios: Vec<ScenarioSummary>,
    },
    Overview {
        title: &'static str,
        summary: &'static str,
        chips: Vec<&'static str>,
        kpis: Vec<Kpi>,
        client_role: &'static str,
        opening_line: &'static str,
        tip: &'static str,
    },
    Brief {
        title: &'static str,
        brief: Brief,
    },
    Baseline {
        client_role: &'static str,
        script: BaselineScript,
        journey: Vec<&'static str>,
    },
    Coaching {
        script: CoachingScript,
    },
    Feedback {
        scale: ScoreScale,
        presence: ShapePanel,
        stage: ShapePanel,
    },
    Learning {
        modules: Vec<LearningModule>,
    },
    ReSimulation {
        client_role: &'static str,
        script: ReSimulationScript,
    },
    Growth {
        trajectory: WeeklyTrajectory,
        /// Report export is not offered
        export_available: bool,
    },
}

impl PageView {
    /// Page this snapshot belongs to; `None` for the dashboard
    #[must_use]
    pub fn page(&self) -> Option<Page> {
        match self {
            PageView::Dashboard { .. } => None,
            PageView::Overview { .. } => Some(Page::Overview),
            PageView::Brief { .. } => Some(Page::Brief),
            PageView::Baseline { .. } => Some(Page::Baseline),
            PageView::Coaching { .. } => Some(Page::Coaching),
            PageView::Feedback { .. } => Some(Page::Feedback),
            PageView::Learning { .. } => Some(Page::Learning),
            PageView::ReSimulation { .. } => Some(Page::ReSimulation),
            PageView::Growth { .. } => Some(Page::Growth),
        }
    }
}

pub(crate) fn shape_panel(
    store: &AttemptStore,
    scenario: &Scenario,
    shape: VectorShape,
) -> Result<ShapePanel, SessionError> {
    let last = scenario.attempt_count();
    let attempts = scenario
        .attempts()
        .map(|attempt| {
            let committed = store.get(scenario.key, shape, attempt)?;
            let draft = store.draft(scenario.key, shape, attempt)?;
            Ok(AttemptScores {
                attempt: attempt.get(),
                caption: attempt.caption(last),
                committed: committed.values().to_vec(),
                draft: draft.values().to_vec(),
                composite: committed.composite(),
                status: store.status(scenario.key, shape, attempt)?,
            })
        })
        .collect::<Result<Vec<_>, SessionError>>()?;
    Ok(ShapePanel {
        shape,
        labels: shape.labels(),
        attempts,
    })
}

/// Build the snapshot for `view`
///
/// `growth` is only consulted on the growth page.
pub(crate) fn build(
    view: View,
    catalog: &ScenarioCatalog,
    store: &AttemptStore,
    scale: ScoreScale,
    growth: impl FnOnce(ScenarioKey) -> Result<WeeklyTrajectory, SessionError>,
) -> Result<PageView, SessionError> {
    let (key, page) = match view {
        View::Dashboard => {
            return Ok(PageView::Dashboard {
                scenarios: catalog.iter().map(ScenarioSummary::from).collect(),
            })
        }
        View::Scenario { key, page } => (key, page),
    };
    let s = catalog.get(key)?;

    let out = match page {
        Page::Overview => PageView::Overview {
            title: s.title,
            summary: s.summary,
            chips: s.chips.clone(),
            kpis: s.kpis.clone(),
            client_role: s.client_role,
            opening_line: s.opening_line,
            tip: s.tip,
        },
        Page::Brief => PageView::Brief {
            title: s.title,
            brief: s.brief.clone(),
        },
        Page::Baseline => PageView::Baseline {
            client_role: s.client_role,
            script: s.baseline.clone(),
            journey: JOURNEY_STAGES.to_vec(),
        },
        Page::Coaching => PageView::Coaching {
            script: s.coaching.clone(),
        },
        Page::Feedback => PageView::Feedback {
            scale,
            presence: shape_panel(store, s, VectorShape::Presence)?,
            stage: shape_panel(store, s, VectorShape::Stage)?,
        },
        Page::Learning => PageView::Learning {
            modules: s.learning_modules.clone(),
        },
        Page::ReSimulation => PageView::ReSimulation {
            client_role: s.client_role,
            script: s.resimulation.clone(),
        },
        Page::Growth => PageView::Growth {
            trajectory: growth(key)?,
            export_available: false,
        },
    };
    Ok(out)
}
