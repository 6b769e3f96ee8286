//! Outcome map: one row per programme outcome, cross-referencing a
//! micro-credential, a job competency, an assessment component, and the next
//! progression step.
//!
//! Which credential a row cites is decided by a [`MatchStrategy`]. The default
//! chain tries an exact dimension match, then a case-insensitive title
//! substring, then the first credential of the first module.

use crate::catalogue::{OutcomeDimension, RoleProfile};
use crate::credentials::MicroCredential;
use crate::programme::ProgrammeOutcomes;
use crate::specification::AssessmentDescriptor;
use crate::vocabulary::QualificationLevel;
use serde::Serialize;

const OUTCOME_PREVIEW_CHARS: usize = 80;
const PLACEHOLDER_CREDIT: f64 = 0.5;

pub const HEADERS: [&str; 5] = [
    "Programme-Level Outcome",
    "Micro-Credential",
    "Job Role Competency",
    "Assessment Component",
    "Progression Path",
];

/// Picks the credential cited for one programme-outcome row.
pub trait MatchStrategy: Send + Sync {
    /// `modules` holds each selected module's credentials in selection order.
    fn pick<'c>(
        &self,
        dimension: &OutcomeDimension,
        modules: &[&'c [MicroCredential]],
    ) -> Option<&'c MicroCredential>;
}

/// Credential whose outcome dimension equals the row's.
#[derive(Clone, Copy, Debug, Default)]
pub struct DimensionTagMatch;

impl MatchStrategy for DimensionTagMatch {
    fn pick<'c>(
        &self,
        dimension: &OutcomeDimension,
        modules: &[&'c [MicroCredential]],
    ) -> Option<&'c MicroCredential> {
        modules
            .iter()
            .flat_map(|credentials| credentials.iter())
            .find(|credential| &credential.dimension == dimension)
    }
}

/// Credential whose title mentions the dimension name, ignoring case.
#[derive(Clone, Copy, Debug, Default)]
pub struct TitleSubstringMatch;

impl MatchStrategy for TitleSubstringMatch {
    fn pick<'c>(
        &self,
        dimension: &OutcomeDimension,
        modules: &[&'c [MicroCredential]],
    ) -> Option<&'c MicroCredential> {
        let needle = dimension.as_str().to_lowercase();
        modules
            .iter()
            .flat_map(|credentials| credentials.iter())
            .find(|credential| credential.title.to_lowercase().contains(&needle))
    }
}

/// First credential of the first selected module.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCredentialFallback;

impl MatchStrategy for FirstCredentialFallback {
    fn pick<'c>(
        &self,
        _dimension: &OutcomeDimension,
        modules: &[&'c [MicroCredential]],
    ) -> Option<&'c MicroCredential> {
        modules.first().and_then(|credentials| credentials.first())
    }
}

/// Tries each strategy in order and returns the first hit.
pub struct ChainedMatch {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl ChainedMatch {
    pub fn new(strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        Self { strategies }
    }
}

impl Default for ChainedMatch {
    fn default() -> Self {
        Self::new(vec![
            Box::new(DimensionTagMatch),
            Box::new(TitleSubstringMatch),
            Box::new(FirstCredentialFallback),
        ])
    }
}

impl MatchStrategy for ChainedMatch {
    fn pick<'c>(
        &self,
        dimension: &OutcomeDimension,
        modules: &[&'c [MicroCredential]],
    ) -> Option<&'c MicroCredential> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.pick(dimension, modules))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutcomeMapRow {
    pub programme_outcome: String,
    pub micro_credential: String,
    pub job_competency: String,
    pub assessment_component: String,
    pub progression_path: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutcomeMap {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<OutcomeMapRow>,
}

/// Everything the assembler reads; borrowed from one build.
pub struct MappingInputs<'a> {
    pub role: &'a RoleProfile,
    pub level: QualificationLevel,
    pub programme_outcomes: &'a ProgrammeOutcomes,
    pub assessment: &'a AssessmentDescriptor,
    pub credentials: Vec<&'a [MicroCredential]>,
}

pub fn assemble(inputs: &MappingInputs<'_>, strategy: &dyn MatchStrategy) -> OutcomeMap {
    let role = inputs.role;
    let next_level = inputs.level.next();
    let components: Vec<(&str, u32)> = inputs.assessment.weighted_components().collect();

    let rows = inputs
        .programme_outcomes
        .iter()
        .enumerate()
        .map(|(idx, (dimension, text))| {
            let micro_credential = match strategy.pick(&dimension, &inputs.credentials) {
                Some(credential) => format!(
                    "{} ({:.1} ECTS)",
                    credential.title, credential.credit_fraction
                ),
                None => format!(
                    "Core Competency - {} ({PLACEHOLDER_CREDIT:.1} ECTS)",
                    dimension.title()
                ),
            };
            let assessment_component = match components.get(idx % components.len().max(1)) {
                Some((name, weight)) => format!("{name} ({weight}%)"),
                None => String::new(),
            };
            OutcomeMapRow {
                programme_outcome: outcome_preview(&dimension, text),
                micro_credential,
                job_competency: job_competency(role, &dimension),
                assessment_component,
                progression_path: progression_path(role, &dimension, next_level),
            }
        })
        .collect();

    OutcomeMap {
        title: format!("Visual Outcome Map: {} ({})", role.title, role.abbreviation),
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

fn outcome_preview(dimension: &OutcomeDimension, text: &str) -> String {
    let label = dimension.title();
    if text.chars().count() > OUTCOME_PREVIEW_CHARS {
        let head: String = text.chars().take(OUTCOME_PREVIEW_CHARS).collect();
        format!("{label}: {head}...")
    } else {
        format!("{label}: {text}")
    }
}

fn job_competency(role: &RoleProfile, dimension: &OutcomeDimension) -> String {
    let table: Option<[&str; 3]> = match role.id.0.as_str() {
        "DAN" => Some([
            "ESG Data Sourcing & Classification",
            "ESG Metrics Analysis & Visualization",
            "Regulatory Reporting and Audit Readiness",
        ]),
        "DSM" => Some([
            "Digital Sustainability Program Design",
            "Stakeholder Coordination & Project Delivery",
            "Program Leadership & Strategic Alignment",
        ]),
        "DSE" => Some([
            "Sustainable Infrastructure Architecture",
            "Green Computing & Performance Optimization",
            "Technical Leadership & Innovation",
        ]),
        "DSL" => Some([
            "Strategic Sustainability Planning",
            "Organizational Change Management",
            "Executive Leadership & Influence",
        ]),
        "DSC" => Some([
            "Multi-Sector Sustainability Expertise",
            "Consulting Methodology & Solution Design",
            "Client Relationship & Business Development",
        ]),
        _ => None,
    };

    let slot = match dimension {
        OutcomeDimension::Knowledge => Some(0),
        OutcomeDimension::Skills => Some(1),
        OutcomeDimension::Competence => Some(2),
        OutcomeDimension::Other(_) => None,
    };

    match (table, slot) {
        (Some(entries), Some(slot)) => entries[slot].to_string(),
        _ => format!("{} Professional Practice", dimension.title()),
    }
}

fn progression_path(role: &RoleProfile, dimension: &OutcomeDimension, next_level: u8) -> String {
    match dimension {
        OutcomeDimension::Knowledge => {
            format!("EQF {next_level}: Advanced {} Analysis", role.competence_focus)
        }
        OutcomeDimension::Skills => match role.key_capabilities.first() {
            Some(capability) => format!("EQF {next_level}: Strategic {capability} Implementation"),
            None => format!("EQF {next_level}: Advanced Professional Practice"),
        },
        OutcomeDimension::Competence => {
            format!("EQF {next_level}: Leadership in {}", role.competence_focus)
        }
        OutcomeDimension::Other(_) => format!("EQF {next_level}: Advanced Professional Practice"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::RoleId;

    fn role(id: &str) -> RoleProfile {
        RoleProfile {
            id: RoleId::from(id),
            title: "Data Analyst".into(),
            abbreviation: id.into(),
            competence_focus: "ESG data analysis".into(),
            key_capabilities: vec!["ESG data collection".into()],
            professional_context: "Reporting teams".into(),
        }
    }

    fn credential(id: &str, dimension: OutcomeDimension, title: &str) -> MicroCredential {
        MicroCredential {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            dimension,
            module_id: "M1".into(),
            credit_fraction: 0.5,
            assessment_method: "portfolio".into(),
            digital_badge: true,
            digitally_verifiable: true,
            stackable: true,
            role_alignment: String::new(),
            quality_criteria: Vec::new(),
        }
    }

    fn descriptor() -> AssessmentDescriptor {
        AssessmentDescriptor {
            primary: "practical_portfolio".into(),
            components: vec!["Project".into(), "Case study".into()],
            weights: vec![60, 40],
        }
    }

    fn outcomes() -> ProgrammeOutcomes {
        ProgrammeOutcomes {
            knowledge: "K".repeat(100),
            skills: "Short skills outcome.".into(),
            competence: "Short competence outcome.".into(),
        }
    }

    #[test]
    fn chained_strategy_prefers_dimension_tag_then_title_then_first() {
        let first = vec![credential(
            "a",
            OutcomeDimension::Other("ethics".into()),
            "A - Ethics Competency",
        )];
        let second = vec![
            credential("b", OutcomeDimension::Other("x".into()), "B - Skills-ish Competency"),
            credential("c", OutcomeDimension::Knowledge, "C - Knowledge Competency"),
        ];
        let modules: Vec<&[MicroCredential]> = vec![first.as_slice(), second.as_slice()];
        let chain = ChainedMatch::default();

        let knowledge = chain.pick(&OutcomeDimension::Knowledge, &modules).unwrap();
        assert_eq!(knowledge.id, "c");
        let skills = chain.pick(&OutcomeDimension::Skills, &modules).unwrap();
        assert_eq!(skills.id, "b");
        let competence = chain.pick(&OutcomeDimension::Competence, &modules).unwrap();
        assert_eq!(competence.id, "a");
    }

    #[test]
    fn rows_cycle_assessment_components_and_truncate_long_outcomes() {
        let role = role("DAN");
        let programme = outcomes();
        let descriptor = descriptor();
        let inputs = MappingInputs {
            role: &role,
            level: QualificationLevel::new(6).unwrap(),
            programme_outcomes: &programme,
            assessment: &descriptor,
            credentials: Vec::new(),
        };
        let map = assemble(&inputs, &ChainedMatch::default());

        assert_eq!(map.title, "Visual Outcome Map: Data Analyst (DAN)");
        assert_eq!(map.headers.len(), 5);
        assert_eq!(map.rows.len(), 3);
        assert_eq!(
            map.rows[0].programme_outcome,
            format!("Knowledge: {}...", "K".repeat(80))
        );
        assert_eq!(map.rows[1].programme_outcome, "Skills: Short skills outcome.");
        assert_eq!(map.rows[0].assessment_component, "Project (60%)");
        assert_eq!(map.rows[1].assessment_component, "Case study (40%)");
        assert_eq!(map.rows[2].assessment_component, "Project (60%)");
        assert_eq!(map.rows[0].micro_credential, "Core Competency - Knowledge (0.5 ECTS)");
        assert_eq!(map.rows[0].job_competency, "ESG Data Sourcing & Classification");
        assert_eq!(map.rows[0].progression_path, "EQF 7: Advanced ESG data analysis Analysis");
        assert_eq!(
            map.rows[1].progression_path,
            "EQF 7: Strategic ESG data collection Implementation"
        );
        assert_eq!(map.rows[2].progression_path, "EQF 7: Leadership in ESG data analysis");
    }

    #[test]
    fn unknown_role_falls_back_to_generic_competency_and_top_level_caps() {
        let role = role("XYZ");
        let programme = outcomes();
        let descriptor = descriptor();
        let owned = vec![credential(
            "k",
            OutcomeDimension::Knowledge,
            "M - Knowledge Competency",
        )];
        let inputs = MappingInputs {
            role: &role,
            level: QualificationLevel::new(8).unwrap(),
            programme_outcomes: &programme,
            assessment: &descriptor,
            credentials: vec![owned.as_slice()],
        };
        let map = assemble(&inputs, &ChainedMatch::default());
        assert_eq!(map.rows[1].job_competency, "Skills Professional Practice");
        assert_eq!(map.rows[2].progression_path, "EQF 8: Leadership in ESG data analysis");
        assert_eq!(map.rows[0].micro_credential, "M - Knowledge Competency (0.5 ECTS)");
        // No skills credential; the fallback cites the first credential.
        assert_eq!(map.rows[1].micro_credential, "M - Knowledge Competency (0.5 ECTS)");
    }
}
