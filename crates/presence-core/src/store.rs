//! Attempt store
//!
//! One slot per (scenario, shape, attempt). A slot holds the committed vector
//! plus an optional pending edit, so a rendering layer can let the learner
//! adjust inputs before an explicit save. Scenarios are seeded from the
//! catalog lazily: reads of an untouched scenario return the seeds without
//! materializing anything, and the first write copies the seeds in.

use crate::catalog::{Scenario, ScenarioCatalog, ScenarioKey};
use crate::error::SessionError;
use crate::score::{ClampedValue, ScoreVector, VectorShape};
use crate::types::AttemptIndex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Lifecycle of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Still the catalog seed
    Seeded,
    /// Adjusted but not saved
    Pending,
    /// Saved by the learner
    Saved,
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    committed: ScoreVector,
    pending: Option<ScoreVector>,
    saved: bool,
}

impl Slot {
    fn seeded(vector: ScoreVector) -> Self {
        Self {
            committed: vector,
            pending: None,
            saved: false,
        }
    }

    fn status(&self) -> SlotStatus {
        if self.pending.is_some() {
            SlotStatus::Pending
        } else if self.saved {
            SlotStatus::Saved
        } else {
            SlotStatus::Seeded
        }
    }
}

/// Mutable attempt vectors of one scenario
#[derive(Debug, Clone, PartialEq)]
struct ScenarioAttempts {
    presence: Vec<Slot>,
    stage: Vec<Slot>,
}

impl ScenarioAttempts {
    fn seeded(scenario: &Scenario) -> Self {
        Self {
            presence: scenario
                .seeds()
                .iter()
                .map(|s| Slot::seeded(s.presence.clone()))
                .collect(),
            stage: scenario
                .seeds()
                .iter()
                .map(|s| Slot::seeded(s.stage.clone()))
                .collect(),
        }
    }

    fn slots_mut(&mut self, shape: VectorShape) -> &mut Vec<Slot> {
        match shape {
            VectorShape::Presence => &mut self.presence,
            VectorShape::Stage => &mut self.stage,
        }
    }

    fn slots(&self, shape: VectorShape) -> &[Slot] {
        match shape {
            VectorShape::Presence => &self.presence,
            VectorShape::Stage => &self.stage,
        }
    }
}

fn check_attempt(
    catalog: &ScenarioCatalog,
    key: ScenarioKey,
    attempt: AttemptIndex,
) -> Result<&Scenario, SessionError> {
    let scenario = catalog.get(key)?;
    if attempt.get() == 0 || attempt.get() > scenario.attempt_count() {
        return Err(SessionError::AttemptOutOfRange {
            attempt: attempt.get(),
            max: scenario.attempt_count(),
        });
    }
    Ok(scenario)
}

/// Per-scenario, per-shape storage of one vector per attempt
#[derive(Debug, Clone)]
pub struct AttemptStore {
    catalog: Arc<ScenarioCatalog>,
    scenarios: BTreeMap<ScenarioKey, ScenarioAttempts>,
}

impl AttemptStore {
    /// Create an empty store backed by `catalog`
    #[must_use]
    pub fn new(catalog: Arc<ScenarioCatalog>) -> Self {
        Self {
            catalog,
            scenarios: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<ScenarioCatalog> {
        &self.catalog
    }

    /// Whether the scenario has been written to since the last reset
    #[inline]
    #[must_use]
    pub fn is_touched(&self, key: ScenarioKey) -> bool {
        self.scenarios.contains_key(&key)
    }

    /// Number of scenarios holding their own copy
    #[inline]
    #[must_use]
    pub fn touched_count(&self) -> usize {
        self.scenarios.len()
    }

    fn checked(&self, key: ScenarioKey, attempt: AttemptIndex) -> Result<&Scenario, SessionError> {
        check_attempt(&self.catalog, key, attempt)
    }

    fn slot(
        &self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<Option<&Slot>, SessionError> {
        self.checked(key, attempt)?;
        Ok(self
            .scenarios
            .get(&key)
            .map(|s| &s.slots(shape)[attempt.slot()]))
    }

    fn slot_mut(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<&mut Slot, SessionError> {
        let catalog = Arc::clone(&self.catalog);
        let scenario = check_attempt(&catalog, key, attempt)?;
        if !self.scenarios.contains_key(&key) {
            let seeded = ScenarioAttempts::seeded(scenario);
            self.scenarios.insert(key, seeded);
            tracing::debug!(scenario = %key, "seeded attempt store");
        }
        let attempts = self
            .scenarios
            .get_mut(&key)
            .ok_or_else(|| SessionError::ScenarioNotFound {
                key: key.to_string(),
            })?;
        Ok(&mut attempts.slots_mut(shape)[attempt.slot()])
    }

    /// Committed vector for a slot
    pub fn get(
        &self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<&ScoreVector, SessionError> {
        if let Some(slot) = self.slot(key, shape, attempt)? {
            return Ok(&slot.committed);
        }
        let scenario = self.catalog.get(key)?;
        scenario
            .seed(shape, attempt)
            .ok_or(SessionError::AttemptOutOfRange {
                attempt: attempt.get(),
                max: scenario.attempt_count(),
            })
    }

    /// Pending edit for a slot, if any
    pub fn pending(
        &self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<Option<&ScoreVector>, SessionError> {
        Ok(self
            .slot(key, shape, attempt)?
            .and_then(|s| s.pending.as_ref()))
    }

    /// Pending edit if present, otherwise the committed vector
    pub fn draft(
        &self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<&ScoreVector, SessionError> {
        match self.pending(key, shape, attempt)? {
            Some(pending) => Ok(pending),
            None => self.get(key, shape, attempt),
        }
    }

    pub fn status(
        &self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<SlotStatus, SessionError> {
        Ok(self
            .slot(key, shape, attempt)?
            .map_or(SlotStatus::Seeded, Slot::status))
    }

    /// Validate, clamp and commit `values` in one step
    ///
    /// Any pending edit on the slot is dropped. On error the slot is unchanged.
    pub fn set(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
        values: &[f64],
    ) -> Result<Vec<ClampedValue>, SessionError> {
        self.checked(key, attempt)?;
        let clamped = ScoreVector::clamped(shape, values)?;
        let slot = self.slot_mut(key, shape, attempt)?;
        slot.committed = clamped.vector;
        slot.pending = None;
        slot.saved = true;
        Ok(clamped.adjustments)
    }

    /// Validate and clamp `values` into the slot's pending edit
    pub fn stage(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
        values: &[f64],
    ) -> Result<Vec<ClampedValue>, SessionError> {
        self.checked(key, attempt)?;
        let clamped = ScoreVector::clamped(shape, values)?;
        let slot = self.slot_mut(key, shape, attempt)?;
        slot.pending = Some(clamped.vector);
        Ok(clamped.adjustments)
    }

    /// Promote the pending edit to the committed vector
    pub fn commit(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<&ScoreVector, SessionError> {
        if self.pending(key, shape, attempt)?.is_none() {
            return Err(SessionError::NothingPending);
        }
        let slot = self.slot_mut(key, shape, attempt)?;
        if let Some(pending) = slot.pending.take() {
            slot.committed = pending;
            slot.saved = true;
        }
        Ok(&slot.committed)
    }

    /// Drop the pending edit; returns whether there was one
    pub fn discard(
        &mut self,
        key: ScenarioKey,
        shape: VectorShape,
        attempt: AttemptIndex,
    ) -> Result<bool, SessionError> {
        if self.pending(key, shape, attempt)?.is_none() {
            return Ok(false);
        }
        let slot = self.slot_mut(key, shape, attempt)?;
        Ok(slot.pending.take().is_some())
    }

    /// Restore seeds for one scenario, or for every scenario when `key` is `None`
    pub fn reset(&mut self, key: Option<ScenarioKey>) {
        match key {
            Some(key) => {
                self.scenarios.remove(&key);
            }
            None => self.scenarios.clear(),
        }
    }

    /// Committed vectors of one shape, first attempt to last
    pub fn series(
        &self,
        key: ScenarioKey,
        shape: VectorShape,
    ) -> Result<Vec<&ScoreVector>, SessionError> {
        let scenario = self.catalog.get(key)?;
        scenario
            .attempts()
            .map(|attempt| self.get(key, shape, attempt))
            .collect()
    }
}
