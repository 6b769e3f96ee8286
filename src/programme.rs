//! Programme-level outcomes and the fixed descriptive texts attached to the
//! programme overview.

use crate::catalogue::{OutcomeDimension, RoleProfile};
use crate::vocabulary::{QualificationLevel, lead_verb};
use serde::Serialize;

/// The three programme learning outcomes, one per core dimension.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgrammeOutcomes {
    pub knowledge: String,
    pub skills: String,
    pub competence: String,
}

impl ProgrammeOutcomes {
    /// Synthesize outcomes from the role profile and the level's lead verbs.
    pub fn synthesize(role: &RoleProfile, level: QualificationLevel) -> Self {
        let focus = &role.competence_focus;
        let title = &role.title;
        let leading_capabilities = role
            .key_capabilities
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            knowledge: format!(
                "{} comprehensive knowledge in {focus} relevant to {title} professional practice, including frameworks, technologies, and industry standards.",
                lead_verb(level, &OutcomeDimension::Knowledge)
            ),
            skills: format!(
                "{} advanced skills in {leading_capabilities} and related technical competencies appropriate for EQF Level {level} practice.",
                lead_verb(level, &OutcomeDimension::Skills)
            ),
            competence: format!(
                "{} as a competent {title} with accountability for {focus} and continuous professional development.",
                lead_verb(level, &OutcomeDimension::Competence)
            ),
        }
    }

    /// Outcomes in row order: knowledge, skills, competence.
    pub fn iter(&self) -> impl Iterator<Item = (OutcomeDimension, &str)> {
        [
            (OutcomeDimension::Knowledge, self.knowledge.as_str()),
            (OutcomeDimension::Skills, self.skills.as_str()),
            (OutcomeDimension::Competence, self.competence.as_str()),
        ]
        .into_iter()
    }
}

pub fn programme_type_description(programme_type: &str) -> &'static str {
    match programme_type {
        "micro_learning" => {
            "Focused micro-learning programmes (0.5-5 ECTS) designed for targeted skill development and just-in-time learning needs"
        }
        "comprehensive" => {
            "Comprehensive programmes (5-180 ECTS) providing complete role preparation with integrated workplace learning and extensive competency development"
        }
        _ => "Professional development programme",
    }
}

/// Indicative part-time duration for an allocated credit volume.
pub fn programme_duration(credit: f64) -> &'static str {
    if credit <= 2.0 {
        "1-4 weeks (part-time)"
    } else if credit <= 10.0 {
        "2-6 months (part-time)"
    } else if credit <= 30.0 {
        "6-12 months (part-time)"
    } else if credit <= 60.0 {
        "1-2 years (part-time)"
    } else {
        "2-4 years (part-time)"
    }
}

pub fn target_audience_description(audience: &str) -> &'static str {
    match audience {
        "students_job_seekers" => {
            "Students and job seekers preparing for careers in digital sustainability with comprehensive foundational training and employment readiness support"
        }
        "digital_professionals" => {
            "Experienced digital professionals expanding into sustainability domains with advanced technical skills and specialized competencies"
        }
        "business_owners_managers" => {
            "Business owners, entrepreneurs, and senior managers driving organizational sustainability transformation with strategic oversight and decision-making capabilities"
        }
        _ => "Professional development for sustainability roles",
    }
}
