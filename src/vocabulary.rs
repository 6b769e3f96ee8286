//! Qualification levels and the action-verb table used to phrase outcomes.
//!
//! Each supported level (3–8) carries a ranked verb list per outcome
//! dimension. Outcome synthesis always takes the first verb; the full lists
//! are exposed so callers can rephrase existing outcomes later.

use crate::catalogue::OutcomeDimension;
use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal depth/autonomy level of a programme, restricted to 3–8.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QualificationLevel(u8);

impl QualificationLevel {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 8;

    pub fn new(level: u8) -> Result<Self, SpecError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(SpecError::LevelOutOfRange(level))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The level a learner would progress to next, capped at the top level.
    pub fn next(self) -> u8 {
        (self.0 + 1).min(Self::MAX)
    }
}

impl TryFrom<u8> for QualificationLevel {
    type Error = SpecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QualificationLevel> for u8 {
    fn from(level: QualificationLevel) -> Self {
        level.0
    }
}

impl fmt::Display for QualificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ranked action verbs for one qualification level.
#[derive(Debug)]
pub struct ActionVerbs {
    pub knowledge: &'static [&'static str],
    pub skills: &'static [&'static str],
    pub competence: &'static [&'static str],
}

impl ActionVerbs {
    /// Verb list for a dimension; `None` for dimensions outside the core three.
    pub fn for_dimension(&self, dimension: &OutcomeDimension) -> Option<&'static [&'static str]> {
        match dimension {
            OutcomeDimension::Knowledge => Some(self.knowledge),
            OutcomeDimension::Skills => Some(self.skills),
            OutcomeDimension::Competence => Some(self.competence),
            OutcomeDimension::Other(_) => None,
        }
    }

    /// Highest-ranked verb for a dimension.
    pub fn lead(&self, dimension: &OutcomeDimension) -> Option<&'static str> {
        self.for_dimension(dimension)
            .and_then(|verbs| verbs.first().copied())
    }
}

const FALLBACK_LEVEL: u8 = 6;

static VOCABULARY: [(u8, ActionVerbs); 6] = [
    (
        3,
        ActionVerbs {
            knowledge: &["Identify", "List", "Recognize", "State", "Describe"],
            skills: &["Apply", "Demonstrate", "Use", "Perform", "Execute"],
            competence: &["Work", "Take responsibility", "Adapt"],
        },
    ),
    (
        4,
        ActionVerbs {
            knowledge: &["Explain", "Describe", "Outline", "Summarize", "Compare"],
            skills: &["Apply", "Analyze", "Solve", "Select", "Organize"],
            competence: &["Take responsibility", "Exercise management", "Supervise"],
        },
    ),
    (
        5,
        ActionVerbs {
            knowledge: &["Analyze", "Evaluate", "Synthesize", "Critique", "Assess"],
            skills: &["Design", "Develop", "Manage", "Coordinate", "Innovate"],
            competence: &["Manage", "Lead", "Take responsibility for others"],
        },
    ),
    (
        6,
        ActionVerbs {
            knowledge: &["Evaluate", "Synthesize", "Create", "Judge", "Defend"],
            skills: &["Design", "Create", "Evaluate", "Manage complex projects", "Lead"],
            competence: &[
                "Manage complex situations",
                "Lead teams",
                "Make strategic decisions",
            ],
        },
    ),
    (
        7,
        ActionVerbs {
            knowledge: &[
                "Synthesize",
                "Evaluate critically",
                "Create original solutions",
                "Theorize",
            ],
            skills: &[
                "Research",
                "Innovate",
                "Lead complex initiatives",
                "Develop new approaches",
            ],
            competence: &[
                "Lead strategic change",
                "Manage complex stakeholders",
                "Drive innovation",
            ],
        },
    ),
    (
        8,
        ActionVerbs {
            knowledge: &["Develop new theories", "Create paradigms", "Establish frameworks"],
            skills: &[
                "Pioneer",
                "Revolutionize",
                "Lead transformation",
                "Create breakthroughs",
            ],
            competence: &[
                "Drive systemic change",
                "Influence policy",
                "Lead global initiatives",
            ],
        },
    ),
];

/// Verb table for `level`, falling back to level 6 outside the table.
pub fn verbs_for(level: u8) -> &'static ActionVerbs {
    let lookup = |wanted: u8| {
        VOCABULARY
            .iter()
            .find(|(candidate, _)| *candidate == wanted)
            .map(|(_, verbs)| verbs)
    };
    match lookup(level) {
        Some(verbs) => verbs,
        None => &VOCABULARY[(FALLBACK_LEVEL - QualificationLevel::MIN) as usize].1,
    }
}

/// Lead verb for a dimension, with a neutral verb for non-core dimensions.
pub fn lead_verb(level: QualificationLevel, dimension: &OutcomeDimension) -> &'static str {
    verbs_for(level.get()).lead(dimension).unwrap_or("Demonstrate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_rejects_values_outside_window() {
        assert_eq!(QualificationLevel::new(2), Err(SpecError::LevelOutOfRange(2)));
        assert_eq!(QualificationLevel::new(9), Err(SpecError::LevelOutOfRange(9)));
        assert_eq!(QualificationLevel::new(3).map(QualificationLevel::get), Ok(3));
    }

    #[test]
    fn level_deserializes_through_validation() {
        let ok: QualificationLevel = serde_json::from_str("7").unwrap();
        assert_eq!(ok.get(), 7);
        assert!(serde_json::from_str::<QualificationLevel>("10").is_err());
    }

    #[test]
    fn next_level_caps_at_eight() {
        assert_eq!(QualificationLevel::new(6).unwrap().next(), 7);
        assert_eq!(QualificationLevel::new(8).unwrap().next(), 8);
    }

    #[test]
    fn every_supported_level_has_all_three_dimensions() {
        for level in QualificationLevel::MIN..=QualificationLevel::MAX {
            let verbs = verbs_for(level);
            for dimension in OutcomeDimension::CORE {
                assert!(
                    verbs.lead(&dimension).is_some(),
                    "level {level} missing {dimension}"
                );
            }
        }
    }

    #[test]
    fn unknown_level_falls_back_to_level_six() {
        assert_eq!(verbs_for(1).knowledge[0], "Evaluate");
        assert_eq!(verbs_for(6).knowledge[0], "Evaluate");
        assert_eq!(verbs_for(4).knowledge[0], "Explain");
    }

    #[test]
    fn non_core_dimension_gets_neutral_verb() {
        let level = QualificationLevel::new(5).unwrap();
        assert_eq!(lead_verb(level, &OutcomeDimension::Skills), "Design");
        assert_eq!(
            lead_verb(level, &OutcomeDimension::Other("ethics".into())),
            "Demonstrate"
        );
    }
}
