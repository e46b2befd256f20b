//! Scenario catalog
//!
//! Read-only registry of scenario definitions. Each entry carries the copy its
//! pages show and the seed vectors that initialize an attempt store the first
//! time a session touches the scenario.

use crate::error::{ConfigError, SessionError};
use crate::score::{ScoreVector, VectorShape};
use crate::types::AttemptIndex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fewest attempts a scenario can record
pub const MIN_ATTEMPTS: usize = 2;

/// Most attempts a scenario can record
pub const MAX_ATTEMPTS: usize = 3;

/// Suggested journey shown on the baseline page
pub const JOURNEY_STAGES: [&str; 5] = ["Baseline", "Feedback", "Learn", "Re-Sim", "Growth"];

/// Closed set of scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKey {
    ClientNegotiation,
    BoardUpdate,
    CrisisBriefing,
}

impl ScenarioKey {
    pub const ALL: [ScenarioKey; 3] = [
        ScenarioKey::ClientNegotiation,
        ScenarioKey::BoardUpdate,
        ScenarioKey::CrisisBriefing,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKey::ClientNegotiation => "client-negotiation",
            ScenarioKey::BoardUpdate => "board-update",
            ScenarioKey::CrisisBriefing => "crisis-briefing",
        }
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKey {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ScenarioKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SessionError::ScenarioNotFound {
                key: wanted.to_string(),
            })
    }
}

/// Headline figure on the overview page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub title: &'static str,
    pub value: &'static str,
}

/// Parameters shown on the brief page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brief {
    pub context: &'static str,
    pub objective: &'static str,
    pub stakeholder: &'static str,
    pub timebox: &'static str,
    pub assessment: &'static str,
    pub sample_prompt: &'static str,
}

/// Scripted baseline exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaselineScript {
    pub instructions: &'static str,
    pub client_line: &'static str,
    pub guidance: &'static str,
}

/// Fixed coaching copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachingScript {
    pub summary: &'static str,
    pub nudge: &'static str,
    pub prompts: Vec<&'static str>,
}

/// Targeted module offered after feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningModule {
    pub title: &'static str,
    pub description: &'static str,
}

/// Scripted second pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReSimulationScript {
    pub instructions: &'static str,
    pub cue: &'static str,
    pub what_good_looks_like: &'static str,
}

/// Seed vectors for one attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptSeed {
    pub presence: ScoreVector,
    pub stage: ScoreVector,
}

impl AttemptSeed {
    #[must_use]
    pub fn new(presence: [f64; 5], stage: [f64; 3]) -> Self {
        Self {
            presence: ScoreVector::presence(presence),
            stage: ScoreVector::stage(stage),
        }
    }

    #[must_use]
    pub fn vector(&self, shape: VectorShape) -> &ScoreVector {
        match shape {
            VectorShape::Presence => &self.presence,
            VectorShape::Stage => &self.stage,
        }
    }
}

/// Immutable scenario definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub key: ScenarioKey,
    pub title: &'static str,
    pub summary: &'static str,
    pub chips: Vec<&'static str>,
    pub kpis: Vec<Kpi>,
    pub client_role: &'static str,
    pub opening_line: &'static str,
    pub tip: &'static str,
    pub brief: Brief,
    pub baseline: BaselineScript,
    pub coaching: CoachingScript,
    pub learning_modules: Vec<LearningModule>,
    pub resimulation: ReSimulationScript,
    seeds: Vec<AttemptSeed>,
}

impl Scenario {
    /// Number of attempts this scenario records
    #[inline]
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.seeds.len()
    }

    /// Last attempt index
    #[must_use]
    pub fn last_attempt(&self) -> AttemptIndex {
        AttemptIndex::new(self.seeds.len()).unwrap_or(AttemptIndex::FIRST)
    }

    /// All attempt indices, first to last
    pub fn attempts(&self) -> impl Iterator<Item = AttemptIndex> {
        (1..=self.seeds.len()).filter_map(AttemptIndex::new)
    }

    #[must_use]
    pub fn seeds(&self) -> &[AttemptSeed] {
        &self.seeds
    }

    /// Seed vector for one slot
    #[must_use]
    pub fn seed(&self, shape: VectorShape, attempt: AttemptIndex) -> Option<&ScoreVector> {
        self.seeds.get(attempt.slot()).map(|s| s.vector(shape))
    }

    /// Replace the seed vectors
    pub fn with_seeds(mut self, seeds: Vec<AttemptSeed>) -> Result<Self, ConfigError> {
        check_attempt_count(self.key, seeds.len())?;
        self.seeds = seeds;
        Ok(self)
    }
}

fn check_attempt_count(key: ScenarioKey, count: usize) -> Result<(), ConfigError> {
    if (MIN_ATTEMPTS..=MAX_ATTEMPTS).contains(&count) {
        Ok(())
    } else {
        Err(ConfigError::InvalidScenario(format!(
            "{key} has {count} attempts, expected {MIN_ATTEMPTS}..={MAX_ATTEMPTS}"
        )))
    }
}

/// Registry of scenario definitions keyed by [`ScenarioKey`]
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    scenarios: BTreeMap<ScenarioKey, Scenario>,
}

impl ScenarioCatalog {
    /// Create an empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every built-in scenario
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for scenario in [client_negotiation(), board_update(), crisis_briefing()] {
            catalog.scenarios.insert(scenario.key, scenario);
        }
        catalog
    }

    /// Add or replace a scenario
    pub fn register(&mut self, scenario: Scenario) -> Result<(), ConfigError> {
        check_attempt_count(scenario.key, scenario.seeds.len())?;
        self.scenarios.insert(scenario.key, scenario);
        Ok(())
    }

    /// Drop a scenario; returns it if it was present
    pub fn remove(&mut self, key: ScenarioKey) -> Option<Scenario> {
        self.scenarios.remove(&key)
    }

    /// Look up by typed key
    pub fn get(&self, key: ScenarioKey) -> Result<&Scenario, SessionError> {
        self.scenarios
            .get(&key)
            .ok_or_else(|| SessionError::ScenarioNotFound {
                key: key.to_string(),
            })
    }

    /// Look up by user-supplied name
    pub fn lookup(&self, name: &str) -> Result<&Scenario, SessionError> {
        self.get(name.parse()?)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: ScenarioKey) -> bool {
        self.scenarios.contains_key(&key)
    }

    /// Keys in display order
    pub fn keys(&self) -> impl Iterator<Item = ScenarioKey> + '_ {
        self.scenarios.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

fn client_negotiation() -> Scenario {
    Scenario {
        key: ScenarioKey::ClientNegotiation,
        title: "High-Stakes Client Negotiation",
        summary: "Experience a realistic boardroom renewal conversation with a C-suite client. \
                  Practice persuasive framing under pressure and build the executive presence \
                  required to land the deal with confidence.",
        chips: vec![
            "Board-level Dialogue",
            "Objection Handling",
            "Gravitas & Composure",
            "ROI Storytelling",
            "Executive Q&A",
        ],
        kpis: vec![
            Kpi { title: "Session Length", value: "12-15 min" },
            Kpi { title: "Scenario Difficulty", value: "Progressive" },
            Kpi { title: "Focus Areas", value: "Gravitas • Persuasion • Control" },
        ],
        client_role: "Client (CFO)",
        opening_line: "We have two competing offers with better pricing. Convince me why we \
                       should renew with you at current terms.",
        tip: "Lead with outcomes. Quantify impact before discussing price.",
        brief: Brief {
            context: "You are renewing a global account with a C-suite client. Two rivals are \
                      undercutting your price. Your objective is to secure renewal at target \
                      terms and position a value-based upsell. You will navigate pricing \
                      pressure, risk concerns, and ROI scrutiny.",
            objective: "Renewal at target terms + upsell entry",
            stakeholder: "CFO (risk-averse, data-driven, concise)",
            timebox: "8 minutes main exchange, 4 minutes Q&A",
            assessment: "Clarity of opening, confidence under pressure, objection handling, \
                         ROI framing, and executive-level brevity.",
            sample_prompt: "We have two competing offers with better pricing. Convince me why \
                            we should renew with you at current terms.",
        },
        baseline: BaselineScript {
            instructions: "Hold a live conversation with the client avatar. Expect price \
                           pushback, timeline compression, and competitive references. \
                           Maintain composure, lead with outcomes, and secure agreement on \
                           value before discount.",
            client_line: "If we match your terms, what guarantees do we have on time-to-value \
                          within this quarter?",
            guidance: "Hold a calm pause. Reframe to business outcomes, then address risk.",
        },
        coaching: CoachingScript {
            summary: "Non-intrusive nudges appear when your pacing, framing, or presence \
                      drifts. You stay in flow while receiving timely, actionable cues.",
            nudge: "Breathe. Shorten your sentence. Lead with impact → ROI in 90 days.",
            prompts: vec![
                "Slow down 10% - let the point land.",
                "Anchor on outcomes before price.",
                "Use a brief silence - regain control.",
                "Translate features → CFO metrics.",
            ],
        },
        learning_modules: vec![
            LearningModule {
                title: "ROI Story in 60s",
                description: "Craft a concise value narrative that anchors the discussion on \
                              outcomes.",
            },
            LearningModule {
                title: "Handling Price Pushback",
                description: "Reframe discounts to risk-adjusted ROI with confident, executive \
                              wording.",
            },
            LearningModule {
                title: "Composed Delivery",
                description: "Use pacing, intentional pauses, and controlled gestures to \
                              project calm authority.",
            },
        ],
        resimulation: ReSimulationScript {
            instructions: "Face the same client persona with varied objection order. \
                           Demonstrate improved framing, calm under pressure, and a \
                           disciplined close.",
            cue: "Acknowledge risk. Give a concrete plan. Then secure a micro-agreement.",
            what_good_looks_like: "Clear outcome anchor → risk plan → confident price defense \
                                   → crisp close with agreed next step.",
        },
        seeds: vec![
            AttemptSeed::new([5.0, 5.5, 6.0, 5.0, 4.8], [6.0, 5.2, 4.6]),
            AttemptSeed::new([8.0, 7.5, 8.2, 7.1, 7.8], [8.3, 7.9, 7.2]),
        ],
    }
}

fn board_update() -> Scenario {
    Scenario {
        key: ScenarioKey::BoardUpdate,
        title: "Board Strategy Update",
        summary: "Present a quarterly strategy update to a skeptical board. Defend a missed \
                  target, earn support for a pivot, and leave the room with a clear mandate.",
        chips: vec![
            "Board-level Dialogue",
            "Strategic Narrative",
            "Composure Under Scrutiny",
            "Concise Answers",
        ],
        kpis: vec![
            Kpi { title: "Session Length", value: "15-18 min" },
            Kpi { title: "Scenario Difficulty", value: "Advanced" },
            Kpi { title: "Focus Areas", value: "Gravitas • Brevity • Control" },
        ],
        client_role: "Board Chair",
        opening_line: "You missed the growth target by eight points. Why should we back \
                       another change of direction?",
        tip: "Own the miss in one sentence, then move to what you learned.",
        brief: Brief {
            context: "You lead a business unit that missed its growth target. The board is \
                      weighing a budget cut. Your objective is to secure approval for a \
                      focused pivot while keeping the board's confidence in your leadership.",
            objective: "Board approval for the pivot plan and retained budget",
            stakeholder: "Board Chair (direct, impatient, numbers-first)",
            timebox: "10 minutes presentation, 6 minutes questions",
            assessment: "Ownership of results, narrative clarity, handling of hostile \
                         questions, and a decisive ask.",
            sample_prompt: "Walk us through why this plan is different from the last one.",
        },
        baseline: BaselineScript {
            instructions: "Present your update and take questions from the board. Expect \
                           interruptions, requests for detail, and challenges to your \
                           credibility.",
            client_line: "What would you cut first if we halved your budget today?",
            guidance: "Pause, answer the question asked, then bridge back to the plan.",
        },
        coaching: CoachingScript {
            summary: "Short cues appear when answers run long or your posture signals \
                      defensiveness.",
            nudge: "One sentence of ownership. Then the plan.",
            prompts: vec![
                "Answer first, explain second.",
                "Drop the qualifiers.",
                "Look at the person who asked.",
                "Close every answer with the ask.",
            ],
        },
        learning_modules: vec![
            LearningModule {
                title: "Owning a Miss",
                description: "State the result plainly and pivot to learning without \
                              excuses.",
            },
            LearningModule {
                title: "Bridging Hostile Questions",
                description: "Acknowledge, answer, and bridge back to your narrative.",
            },
            LearningModule {
                title: "The Decisive Ask",
                description: "End with a specific decision you need from the board.",
            },
        ],
        resimulation: ReSimulationScript {
            instructions: "Present again to the same board with the questions reordered. Show \
                           ownership, brevity, and a clear ask.",
            cue: "Own it, explain the change, ask for the decision.",
            what_good_looks_like: "Plain ownership → evidence for the pivot → crisp answers → \
                                   explicit decision requested.",
        },
        seeds: vec![
            AttemptSeed::new([5.0, 5.5, 6.0, 5.0, 4.8], [6.0, 5.2, 4.6]),
            AttemptSeed::new([6.6, 6.9, 7.2, 6.4, 6.5], [7.1, 6.6, 6.0]),
            AttemptSeed::new([8.4, 8.1, 8.6, 7.9, 8.2], [8.3, 7.9, 7.2]),
        ],
    }
}

fn crisis_briefing() -> Scenario {
    Scenario {
        key: ScenarioKey::CrisisBriefing,
        title: "Crisis Media Briefing",
        summary: "Brief the press after a service outage affecting thousands of customers. \
                  Project calm, take accountability, and commit to a credible recovery plan.",
        chips: vec![
            "Media Q&A",
            "Accountability",
            "Calm Authority",
            "Message Discipline",
        ],
        kpis: vec![
            Kpi { title: "Session Length", value: "10-12 min" },
            Kpi { title: "Scenario Difficulty", value: "High Pressure" },
            Kpi { title: "Focus Areas", value: "Vocal • Composure • Clarity" },
        ],
        client_role: "Lead Reporter",
        opening_line: "Customers were offline for nine hours. Why should anyone trust your \
                       platform again?",
        tip: "Lead with the people affected, then the facts, then the fix.",
        brief: Brief {
            context: "A regional outage took your service offline for most of a business day. \
                      Reporters are waiting. Your objective is to take accountability, share \
                      verified facts, and commit to a recovery timeline without speculating.",
            objective: "Credible accountability statement and recovery commitment",
            stakeholder: "Press pool (persistent, skeptical, deadline-driven)",
            timebox: "5 minutes statement, 5 minutes questions",
            assessment: "Empathy, factual precision, message discipline, vocal control, and \
                         refusal to speculate.",
            sample_prompt: "Was this outage caused by a cost-cutting decision?",
        },
        baseline: BaselineScript {
            instructions: "Deliver your statement and take rapid-fire questions. Expect \
                           leading questions, requests to speculate, and repeated challenges.",
            client_line: "Can you guarantee this will never happen again?",
            guidance: "Slow your voice. Say what you know, what you are doing, and when you \
                       will update.",
        },
        coaching: CoachingScript {
            summary: "Cues appear when your pace rises, you speculate, or you drift off your \
                      core message.",
            nudge: "Lower your pace. Return to the three facts.",
            prompts: vec![
                "Facts only - no guesses.",
                "Name the people affected.",
                "Repeat the commitment, not the accusation.",
                "Give the time of the next update.",
            ],
        },
        learning_modules: vec![
            LearningModule {
                title: "Holding Message Discipline",
                description: "Keep every answer anchored on three verified points.",
            },
            LearningModule {
                title: "Declining to Speculate",
                description: "Refuse hypotheticals without sounding evasive.",
            },
            LearningModule {
                title: "Vocal Control Under Pressure",
                description: "Use breath and pacing to keep a steady, low register.",
            },
        ],
        resimulation: ReSimulationScript {
            instructions: "Face the same press pool with sharper follow-ups. Show empathy, \
                           precision, and control.",
            cue: "People first. Facts second. Next update time last.",
            what_good_looks_like: "Empathy for those affected → verified facts → concrete \
                                   recovery steps → committed update time.",
        },
        seeds: vec![
            AttemptSeed::new([4.6, 5.0, 4.2, 5.1, 4.4], [5.4, 4.8, 5.0]),
            AttemptSeed::new([6.0, 6.2, 5.9, 6.1, 5.8], [6.5, 6.1, 6.3]),
            AttemptSeed::new([7.5, 7.4, 7.8, 7.0, 7.6], [7.8, 7.6, 7.9]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_every_key() {
        let catalog = ScenarioCatalog::builtin();
        assert_eq!(catalog.len(), ScenarioKey::ALL.len());
        for key in ScenarioKey::ALL {
            assert!(catalog.contains(key));
            let scenario = catalog.get(key).unwrap();
            assert!((MIN_ATTEMPTS..=MAX_ATTEMPTS).contains(&scenario.attempt_count()));
            assert_eq!(scenario.kpis.len(), 3);
        }
    }

    #[test]
    fn lookup_unknown_key_fails() {
        let catalog = ScenarioCatalog::builtin();
        let err = catalog.lookup("Nonexistent").unwrap_err();
        assert_eq!(
            err,
            SessionError::ScenarioNotFound {
                key: "Nonexistent".into()
            }
        );
    }

    #[test]
    fn lookup_ignores_case() {
        let catalog = ScenarioCatalog::builtin();
        let scenario = catalog.lookup("Board-Update").unwrap();
        assert_eq!(scenario.key, ScenarioKey::BoardUpdate);
        assert_eq!(scenario.attempt_count(), 3);
    }

    #[test]
    fn get_on_partial_catalog_fails() {
        let mut catalog = ScenarioCatalog::builtin();
        catalog.remove(ScenarioKey::CrisisBriefing);
        assert!(catalog.get(ScenarioKey::CrisisBriefing).is_err());
    }

    #[test]
    fn seeds_match_shapes() {
        let catalog = ScenarioCatalog::builtin();
        for scenario in catalog.iter() {
            for attempt in scenario.attempts() {
                for shape in VectorShape::ALL {
                    let seed = scenario.seed(shape, attempt).unwrap();
                    assert_eq!(seed.len(), shape.dimensions());
                }
            }
        }
    }

    #[test]
    fn with_seeds_rejects_single_attempt() {
        let scenario = ScenarioCatalog::builtin()
            .get(ScenarioKey::ClientNegotiation)
            .unwrap()
            .clone();
        let err = scenario
            .with_seeds(vec![AttemptSeed::new([1.0; 5], [1.0; 3])])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScenario(_)));
    }
}
