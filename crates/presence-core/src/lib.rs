//! Presence Core - scenario progression and performance analytics
//!
//! The engine behind a guided presence-training session:
//! - Walks a learner through the pages of a training scenario
//! - Records presence and stage scores per attempt
//! - Projects a week-by-week growth trajectory from the attempt composites
//!
//! # Example
//!
//! ```rust
//! use presence_core::prelude::*;
//!
//! let mut session = SessionState::new();
//! session.select_scenario("board-update")?;
//! let view = session.navigate(Page::Growth)?;
//! assert_eq!(view.page(), Some(Page::Growth));
//!
//! let trajectory = session.trajectory(ScenarioKey::BoardUpdate)?;
//! assert_eq!(trajectory.len(), 6);
//! # Ok::<(), presence_core::SessionError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod growth;
pub mod journal;
pub mod navigation;
pub mod registry;
pub mod score;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

// Simulation
pub mod test_harness;

// Re-exports for convenience
pub use api::{GrowthReporter, ScenarioNavigator, ScoreRecorder};
pub use catalog::{Scenario, ScenarioCatalog, ScenarioKey};
pub use config::{Granularity, ScoreScale, SessionConfig};
pub use error::{ConfigError, Fallback, SessionError};
pub use growth::{BaselinePolicy, GrowthProjector, WeeklyTrajectory};
pub use journal::{JournalEntry, Outcome, SessionJournal};
pub use navigation::{NavigationController, Page, Transition, View};
pub use registry::SessionRegistry;
pub use score::{ClampedValue, ScoreVector, VectorShape};
pub use session::{Notice, SessionState};
pub use store::{AttemptStore, SlotStatus};
pub use types::{AttemptIndex, SessionId, ZeroAttempt};
pub use view::PageView;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a session
    pub use crate::{
        AttemptIndex, GrowthReporter, Page, PageView, ScenarioKey, ScenarioNavigator,
        ScoreRecorder, ScoreVector, SessionConfig, SessionError, SessionState, VectorShape,
        View, WeeklyTrajectory,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
