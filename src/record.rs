//! The assembled curriculum record.
//!
//! Field and section names are the serialized contract consumed by renderers,
//! so they are spelled here exactly as they appear in the JSON output.

use crate::assessment::AssessmentFramework;
use crate::coverage::OutcomeCoverage;
use crate::credentials::MicroCredential;
use crate::delivery::DeliveryFramework;
use crate::mapping::OutcomeMap;
use crate::outcomes::OutcomeSet;
use crate::programme::ProgrammeOutcomes;
use serde::Serialize;

/// Hours of learner workload per unit of credit.
pub const HOURS_PER_CREDIT: f64 = 25.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Curriculum {
    pub curriculum_identification: CurriculumIdentification,
    pub programme_overview: ProgrammeOverview,
    pub modular_structure: ModularStructure,
    pub delivery_framework: DeliveryFramework,
    pub assessment_framework: AssessmentFramework,
    pub visual_outcome_mapping: OutcomeMap,
    pub micro_credential_system: MicroCredentialSystem,
    pub transversal_skills: TransversalSkills,
    pub recognition_framework: RecognitionFramework,
    pub quality_assurance: QualityAssurance,
}

impl Curriculum {
    pub fn id(&self) -> &str {
        &self.curriculum_identification.id
    }

    pub fn modules(&self) -> &[ModuleDetail] {
        &self.modular_structure.module_details
    }

    pub fn credentials(&self) -> impl Iterator<Item = &MicroCredential> {
        self.modules()
            .iter()
            .flat_map(|module| module.micro_credentials.iter())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoleSummary {
    pub role_title: String,
    pub role_abbreviation: String,
    pub competence_focus: String,
    pub professional_context: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurriculumIdentification {
    pub id: String,
    pub clean_title: String,
    pub full_title: String,
    pub role_profile: RoleSummary,
    pub version: String,
    pub curriculum_level: String,
    pub target_role: String,
    pub eqf_level: u8,
    pub target_ects: f64,
    pub total_ects: f64,
    pub total_ecvet: f64,
    pub total_modules: usize,
    pub modules_text: &'static str,
    pub total_micro_credentials: usize,
    pub target_audience: String,
    pub programme_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgrammeTypeClassification {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub ects_range: String,
    pub duration: String,
    pub stackability: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgrammeOverview {
    pub description: String,
    pub target_audience_description: String,
    pub learning_approach: String,
    pub programme_outcomes: ProgrammeOutcomes,
    pub programme_type_classification: ProgrammeTypeClassification,
    pub unique_features: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailedAssessment {
    pub method: String,
    pub components: Vec<String>,
    pub weightings: Vec<u32>,
    pub quality_criteria: Vec<String>,
}

/// Workload split of one module's allocated credit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Workload {
    pub total_workload_hours: f64,
    pub contact_hours: u32,
    pub self_study_hours: u32,
    pub workplace_hours: u32,
    pub assessment_hours: u32,
}

impl Workload {
    /// 35% contact, 30% self-study, 25% workplace, 10% assessment; each share
    /// rounds half to even.
    pub fn for_credit(credit: f64) -> Self {
        let total = credit * HOURS_PER_CREDIT;
        let share = |fraction: f64| (total * fraction).round_ties_even().max(0.0) as u32;
        Self {
            total_workload_hours: total,
            contact_hours: share(0.35),
            self_study_hours: share(0.30),
            workplace_hours: share(0.25),
            assessment_hours: share(0.10),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModuleDetail {
    pub module_number: usize,
    pub module_id: String,
    pub module_title: String,
    pub module_description: String,
    pub extended_description: String,
    /// Allocated credit, possibly a fraction of `nominal_ects`.
    pub ects_credits: f64,
    pub nominal_ects: f64,
    pub ecvet_points: f64,
    pub eqf_level: u8,
    pub role_relevance_score: i32,
    #[serde(flatten)]
    pub workload: Workload,
    pub learning_outcomes: OutcomeSet,
    pub micro_credentials: Vec<MicroCredential>,
    pub stackable_badges: Vec<String>,
    pub topics: Vec<String>,
    pub skills: Vec<String>,
    pub prerequisites: Vec<String>,
    pub thematic_area: String,
    pub delivery_methods: DeliveryFramework,
    pub target_audience_adaptation: String,
    pub detailed_assessment: DetailedAssessment,
    pub is_work_based: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModularStructure {
    pub design_principle: String,
    pub total_modules: usize,
    pub modules_text: &'static str,
    pub total_ects: f64,
    pub total_micro_credentials: usize,
    pub module_details: Vec<ModuleDetail>,
    pub learning_outcome_mapping: OutcomeCoverage,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MicroCredentialSystem {
    pub total_credentials: usize,
    pub stackability: String,
    pub digital_verification: String,
    pub employer_recognition: String,
    pub progression_support: String,
    pub quality_assurance: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransversalSkills {
    pub green_skills: String,
    pub digital_skills: String,
    pub resilience_skills: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecognitionFramework {
    pub eqf_level: u8,
    pub ects_transferable: bool,
    pub ecvet_compatible: bool,
    pub bologna_compliant: bool,
    pub cross_border_recognition: String,
    pub professional_recognition: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityAssurance {
    pub learning_outcomes_based: bool,
    pub competence_validation: String,
    pub external_validation: bool,
    pub stakeholder_feedback: String,
    pub continuous_improvement: String,
    pub eqf_compliance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_rounds_half_to_even() {
        // 0.5 credit = 12.5 h: 4.375, 3.75, 3.125, 1.25
        let small = Workload::for_credit(0.5);
        assert_eq!(small.total_workload_hours, 12.5);
        assert_eq!(
            (
                small.contact_hours,
                small.self_study_hours,
                small.workplace_hours,
                small.assessment_hours
            ),
            (4, 4, 3, 1)
        );

        // 2.0 credit = 50 h: 17.5 rounds to 18, 5.0 stays 5
        let even = Workload::for_credit(2.0);
        assert_eq!(even.contact_hours, 18);
        assert_eq!(even.self_study_hours, 15);
        assert_eq!(even.workplace_hours, 12);
        assert_eq!(even.assessment_hours, 5);
    }
}
