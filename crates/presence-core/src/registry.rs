//! Per-learner session scoping
//!
//! One [`SessionState`] per [`SessionId`]. Sessions share the read-only
//! catalog and nothing else.

use crate::catalog::ScenarioCatalog;
use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::session::SessionState;
use crate::types::SessionId;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Open sessions keyed by id
#[derive(Debug)]
pub struct SessionRegistry {
    config: SessionConfig,
    catalog: Arc<ScenarioCatalog>,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<SessionState>>>>,
}

impl SessionRegistry {
    /// Registry whose sessions all use `config` over `catalog`
    pub fn new(config: SessionConfig, catalog: Arc<ScenarioCatalog>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Open a fresh session
    pub fn open(&self) -> Result<SessionId, ConfigError> {
        let session = SessionState::with_catalog(self.config.clone(), Arc::clone(&self.catalog))?;
        let id = session.id();
        self.sessions
            .write()
            .insert(id, Arc::new(Mutex::new(session)));
        tracing::info!(session = %id, "session opened");
        Ok(id)
    }

    /// Run `f` with exclusive access to one session
    ///
    /// Returns `None` when the session is not open. The registry lock is
    /// released before `f` runs, so work on one session never blocks another.
    pub fn with_session<R>(&self, id: SessionId, f: impl FnOnce(&mut SessionState) -> R) -> Option<R> {
        let session = self.sessions.read().get(&id).cloned()?;
        let mut guard = session.lock();
        Some(f(&mut guard))
    }

    /// Drop a session and everything it recorded
    pub fn close(&self, id: SessionId) -> bool {
        let closed = self.sessions.write().remove(&id).is_some();
        if closed {
            tracing::info!(session = %id, "session closed");
        }
        closed
    }

    #[must_use]
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.read().contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self {
            config: SessionConfig::default(),
            catalog: Arc::new(ScenarioCatalog::builtin()),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}
