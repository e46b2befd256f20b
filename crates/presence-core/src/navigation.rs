//! Navigation state machine
//!
//! Two kinds of position: the dashboard, or a page inside one scenario. Pages
//! form a flat menu: any page is reachable from any other, and the suggested
//! journey order is advisory only. Every transition is total. A bad target
//! puts the controller in a safe fallback position and reports the error.

use crate::catalog::{ScenarioCatalog, ScenarioKey};
use crate::error::{Fallback, SessionError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Pages inside a scenario, in suggested journey order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Overview,
    Brief,
    Baseline,
    Coaching,
    Feedback,
    Learning,
    ReSimulation,
    Growth,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Overview,
        Page::Brief,
        Page::Baseline,
        Page::Coaching,
        Page::Feedback,
        Page::Learning,
        Page::ReSimulation,
        Page::Growth,
    ];

    /// Menu title
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Home",
            Page::Brief => "Scenario Brief",
            Page::Baseline => "Baseline Simulation",
            Page::Coaching => "Live Coaching",
            Page::Feedback => "Feedback",
            Page::Learning => "Learning Modules",
            Page::ReSimulation => "Re-Simulation",
            Page::Growth => "Growth Dashboard",
        }
    }

    /// Short machine name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::Brief => "brief",
            Page::Baseline => "baseline",
            Page::Coaching => "coaching",
            Page::Feedback => "feedback",
            Page::Learning => "learning",
            Page::ReSimulation => "re-simulation",
            Page::Growth => "growth",
        }
    }

    /// Next page on the suggested path
    #[must_use]
    pub fn next(self) -> Option<Page> {
        let idx = self.position();
        Page::ALL.get(idx + 1).copied()
    }

    /// Previous page on the suggested path
    #[must_use]
    pub fn previous(self) -> Option<Page> {
        self.position().checked_sub(1).map(|i| Page::ALL[i])
    }

    fn position(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Page {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let normalized: String = wanted
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        let page = match normalized.as_str() {
            "overview" | "home" => Page::Overview,
            "brief" | "scenariobrief" => Page::Brief,
            "baseline" | "baselinesimulation" => Page::Baseline,
            "coaching" | "livecoaching" => Page::Coaching,
            "feedback" => Page::Feedback,
            "learning" | "learningmodules" => Page::Learning,
            "resimulation" | "resim" => Page::ReSimulation,
            "growth" | "growthdashboard" => Page::Growth,
            _ => {
                return Err(SessionError::InvalidPage {
                    name: wanted.to_string(),
                })
            }
        };
        Ok(page)
    }
}

/// Current navigation position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Scenario { key: ScenarioKey, page: Page },
}

impl View {
    #[must_use]
    pub fn scenario(&self) -> Option<ScenarioKey> {
        match self {
            View::Dashboard => None,
            View::Scenario { key, .. } => Some(*key),
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<Page> {
        match self {
            View::Dashboard => None,
            View::Scenario { page, .. } => Some(*page),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Dashboard => f.write_str("dashboard"),
            View::Scenario { key, page } => write!(f, "{key}/{}", page.as_str()),
        }
    }
}

/// A requested move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Select(String),
    Navigate(Page),
    Back,
}

/// Check a transition against the current position
///
/// Only page navigation needs an active scenario. Selection is checked against
/// the catalog when it is applied.
pub fn validate_transition(from: View, transition: &Transition) -> Result<(), SessionError> {
    match (from, transition) {
        (View::Dashboard, Transition::Navigate(_)) => Err(SessionError::NoActiveScenario),
        _ => Ok(()),
    }
}

/// Pages reachable from a position
#[must_use]
pub fn reachable_pages(from: View) -> Vec<Page> {
    match from {
        View::Dashboard => Vec::new(),
        View::Scenario { .. } => Page::ALL.to_vec(),
    }
}

/// Navigation state machine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationController {
    view: View,
}

impl NavigationController {
    /// Start on the dashboard
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> View {
        self.view
    }

    #[inline]
    #[must_use]
    pub fn active_scenario(&self) -> Option<ScenarioKey> {
        self.view.scenario()
    }

    #[inline]
    #[must_use]
    pub fn active_page(&self) -> Option<Page> {
        self.view.page()
    }

    /// Enter a scenario on its overview page
    ///
    /// Unknown keys, and keys missing from `catalog`, leave the controller on
    /// the dashboard.
    pub fn select(
        &mut self,
        catalog: &ScenarioCatalog,
        name: &str,
    ) -> Result<ScenarioKey, SessionError> {
        let selected = name
            .parse::<ScenarioKey>()
            .and_then(|key| catalog.get(key).map(|s| s.key));
        match selected {
            Ok(key) => {
                self.view = View::Scenario {
                    key,
                    page: Page::Overview,
                };
                Ok(key)
            }
            Err(err) => {
                self.fall_back(err.fallback());
                Err(err)
            }
        }
    }

    /// Move to `page` inside the active scenario
    pub fn navigate(&mut self, page: Page) -> Result<Page, SessionError> {
        let transition = Transition::Navigate(page);
        if let Err(err) = validate_transition(self.view, &transition) {
            self.fall_back(err.fallback());
            return Err(err);
        }
        if let View::Scenario { key, .. } = self.view {
            self.view = View::Scenario { key, page };
        }
        Ok(page)
    }

    /// Move to a page given by name
    ///
    /// Names outside the page set land on the overview of the active scenario.
    pub fn navigate_named(&mut self, name: &str) -> Result<Page, SessionError> {
        match name.parse::<Page>() {
            Ok(page) => self.navigate(page),
            Err(err) => {
                self.fall_back(err.fallback());
                Err(err)
            }
        }
    }

    /// Return to the dashboard; always legal
    pub fn back(&mut self) {
        self.view = View::Dashboard;
    }

    /// Apply an error fallback
    pub fn fall_back(&mut self, fallback: Fallback) {
        match (fallback, self.view) {
            (Fallback::Dashboard, _) | (Fallback::Overview, View::Dashboard) => {
                self.view = View::Dashboard;
            }
            (Fallback::Overview, View::Scenario { key, .. }) => {
                self.view = View::Scenario {
                    key,
                    page: Page::Overview,
                };
            }
            (Fallback::Unchanged, _) => {}
        }
    }

    /// Apply a transition
    pub fn apply(
        &mut self,
        catalog: &ScenarioCatalog,
        transition: &Transition,
    ) -> Result<View, SessionError> {
        match transition {
            Transition::Select(name) => self.select(catalog, name).map(|_| self.view),
            Transition::Navigate(page) => self.navigate(*page).map(|_| self.view),
            Transition::Back => {
                self.back();
                Ok(self.view)
            }
        }
    }
}
