//! Append-only record of every session interaction

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    Ok(String),
    Recovered(String),
}

impl Outcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub seq: u64,
    pub at: DateTime<Utc>,
    pub action: String,
    pub outcome: Outcome,
}

/// Append-only record of the interactions in one session
#[derive(Debug, Default, Clone)]
pub struct SessionJournal {
    entries: Vec<JournalEntry>,
    next_seq: u64,
}

impl SessionJournal {
    pub fn record(&mut self, action: impl Into<String>, outcome: Outcome) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(JournalEntry {
            seq,
            at: Utc::now(),
            action: action.into(),
            outcome,
        });
        seq
    }

    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose outcome was a recovered error
    pub fn recovered(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().filter(|e| !e.outcome.is_ok())
    }

    /// Sequence numbers strictly increase and timestamps never go backwards
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| w[0].seq < w[1].seq && w[0].at <= w[1].at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_assigns_increasing_sequence() {
        let mut journal = SessionJournal::default();
        assert_eq!(journal.record("select client-negotiation", Outcome::Ok("overview".into())), 0);
        assert_eq!(
            journal.record("select nope", Outcome::Recovered("scenario not found".into())),
            1
        );
        assert_eq!(journal.len(), 2);
        assert!(journal.is_ordered());
        assert_eq!(journal.recovered().count(), 1);
        assert_eq!(journal.last().map(|e| e.seq), Some(1));
    }
}
