//! Curriculum assembly: one specification in, one complete record out.

use crate::assessment::AssessmentFramework;
use crate::catalogue::{CatalogueRepository, RoleProfile};
use crate::coverage::build_outcome_coverage;
use crate::credentials::{CredentialContext, decompose};
use crate::delivery::DeliveryFramework;
use crate::error::BuildError;
use crate::mapping::{ChainedMatch, MappingInputs, MatchStrategy, assemble};
use crate::outcomes::compose;
use crate::programme::{
    ProgrammeOutcomes, programme_duration, programme_type_description,
    target_audience_description,
};
use crate::record::{
    Curriculum, CurriculumIdentification, DetailedAssessment, MicroCredentialSystem,
    ModularStructure, ModuleDetail, ProgrammeOverview, ProgrammeTypeClassification,
    QualityAssurance, RecognitionFramework, RoleSummary, TransversalSkills, Workload,
};
use crate::selector::{ModuleSelector, SelectedModule, TieBreak};
use crate::specification::CurriculumSpecification;

const RECORD_VERSION: &str = env!("CARGO_PKG_VERSION");
const BOLOGNA_MIN_LEVEL: u8 = 6;
const DETAIL_QUALITY_CRITERIA: [&str; 3] = [
    "Industry relevance",
    "Competency demonstration",
    "Professional application",
];
const UNIQUE_FEATURES: [&str; 6] = [
    "Level 3-8 progression pathways",
    "Modular stackable design with micro-credentials",
    "Industry-validated competence development",
    "Flexible delivery methods with workplace integration",
    "Level-aligned learning outcomes and assessments",
    "EU-wide recognition and transferability",
];

/// Builds curriculum records against one catalogue snapshot.
pub struct CurriculumBuilder<'a> {
    repository: &'a CatalogueRepository,
    tie_break: TieBreak,
    strategy: Box<dyn MatchStrategy>,
}

impl<'a> CurriculumBuilder<'a> {
    pub fn new(repository: &'a CatalogueRepository) -> Self {
        Self {
            repository,
            tie_break: TieBreak::default(),
            strategy: Box::new(ChainedMatch::default()),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_strategy(mut self, strategy: Box<dyn MatchStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn repository(&self) -> &'a CatalogueRepository {
        self.repository
    }

    /// Build one curriculum. Either the whole record is returned or nothing.
    pub fn build(&self, spec: &CurriculumSpecification) -> Result<Curriculum, BuildError> {
        let role = self
            .repository
            .role(&spec.role_id)
            .ok_or_else(|| BuildError::UnknownRole(spec.role_id.clone()))?;

        let selection = ModuleSelector::new(self.repository)
            .with_tie_break(self.tie_break)
            .select(&spec.role_id, spec.eqf_level, spec.target_credit)?;
        if selection.is_under_allocated() {
            tracing::warn!(
                curriculum = %spec.id,
                allocated = selection.total_credit,
                target = selection.target_credit,
                "catalogue could not fill the requested credit volume"
            );
        }

        let module_details: Vec<ModuleDetail> = selection
            .modules
            .iter()
            .enumerate()
            .map(|(idx, selected)| module_detail(spec, idx + 1, selected))
            .collect();
        let total_credentials: usize = module_details
            .iter()
            .map(|detail| detail.micro_credentials.len())
            .sum();

        let programme_outcomes = ProgrammeOutcomes::synthesize(role, spec.eqf_level);
        let coverage = build_outcome_coverage(
            &programme_outcomes,
            module_details.iter().map(|detail| {
                (
                    detail.module_id.as_str(),
                    detail.module_title.as_str(),
                    &detail.learning_outcomes,
                )
            }),
        );
        let assessment_framework = AssessmentFramework::build(
            &spec.assessment,
            module_details.iter().map(|detail| {
                (
                    detail.module_id.as_str(),
                    detail.module_title.as_str(),
                    detail.micro_credentials.as_slice(),
                )
            }),
        );
        let visual_outcome_mapping = assemble(
            &MappingInputs {
                role,
                level: spec.eqf_level,
                programme_outcomes: &programme_outcomes,
                assessment: &spec.assessment,
                credentials: module_details
                    .iter()
                    .map(|detail| detail.micro_credentials.as_slice())
                    .collect(),
            },
            self.strategy.as_ref(),
        );

        let total_credit = selection.total_credit;
        let total_modules = module_details.len();
        let modules_text = if total_modules == 1 { "Module" } else { "Modules" };
        let level = spec.eqf_level.get();

        tracing::info!(
            curriculum = %spec.id,
            modules = total_modules,
            credentials = total_credentials,
            credit = total_credit,
            "curriculum assembled"
        );

        Ok(Curriculum {
            curriculum_identification: CurriculumIdentification {
                id: spec.id.clone(),
                clean_title: format!("{} ({})", role.title, role.abbreviation),
                full_title: format!("{} - {}", role.title, spec.title),
                role_profile: role_summary(role),
                version: RECORD_VERSION.to_string(),
                curriculum_level: spec.title.clone(),
                target_role: spec.role_id.0.clone(),
                eqf_level: level,
                target_ects: spec.target_credit,
                total_ects: total_credit,
                total_ecvet: total_credit,
                total_modules,
                modules_text,
                total_micro_credentials: total_credentials,
                target_audience: spec.target_audience.clone(),
                programme_type: spec.programme_type.clone(),
            },
            programme_overview: ProgrammeOverview {
                description: spec.description.clone(),
                target_audience_description: target_audience_description(&spec.target_audience)
                    .to_string(),
                learning_approach: format!(
                    "EQF Level {level} {} programme with modular structure, workplace integration, and stackable micro-credentials",
                    spec.programme_type
                ),
                programme_outcomes,
                programme_type_classification: ProgrammeTypeClassification {
                    kind: spec.programme_type.clone(),
                    description: programme_type_description(&spec.programme_type).to_string(),
                    ects_range: format!("{total_credit} ECTS"),
                    duration: programme_duration(total_credit).to_string(),
                    stackability: "Full integration with other programme types".to_string(),
                },
                unique_features: UNIQUE_FEATURES.iter().map(|f| f.to_string()).collect(),
            },
            modular_structure: ModularStructure {
                design_principle:
                    "Flexible, stackable modules with comprehensive micro-credential mapping"
                        .to_string(),
                total_modules,
                modules_text,
                total_ects: total_credit,
                total_micro_credentials: total_credentials,
                module_details,
                learning_outcome_mapping: coverage,
            },
            delivery_framework: DeliveryFramework::from_descriptor(&spec.delivery),
            assessment_framework,
            visual_outcome_mapping,
            micro_credential_system: MicroCredentialSystem {
                total_credentials,
                stackability: "Full stackability across curriculum levels and roles".to_string(),
                digital_verification: "Digital badge integration".to_string(),
                employer_recognition: "Industry-validated competence mapping".to_string(),
                progression_support: "Clear pathways for credential accumulation".to_string(),
                quality_assurance: "Multi-level validation and verification".to_string(),
            },
            transversal_skills: TransversalSkills {
                green_skills: "Environmental awareness and sustainable practices embedded throughout curriculum".to_string(),
                digital_skills: "Digital fluency and technology competence developed progressively".to_string(),
                resilience_skills: "Adaptive thinking and system resilience capabilities built systematically".to_string(),
            },
            recognition_framework: RecognitionFramework {
                eqf_level: level,
                ects_transferable: true,
                ecvet_compatible: true,
                bologna_compliant: level >= BOLOGNA_MIN_LEVEL,
                cross_border_recognition:
                    "EU-wide qualification recognition through EQF referencing".to_string(),
                professional_recognition: format!(
                    "Industry recognition for {} competences",
                    role.title
                ),
            },
            quality_assurance: QualityAssurance {
                learning_outcomes_based: true,
                competence_validation: "Multi-method assessment with workplace integration"
                    .to_string(),
                external_validation: true,
                stakeholder_feedback: "Regular industry and learner feedback integration"
                    .to_string(),
                continuous_improvement: "Agile curriculum development with regular updates"
                    .to_string(),
                eqf_compliance: format!("Fully aligned with EQF Level {level} descriptors"),
            },
        })
    }
}

fn role_summary(role: &RoleProfile) -> RoleSummary {
    RoleSummary {
        role_title: role.title.clone(),
        role_abbreviation: role.abbreviation.clone(),
        competence_focus: role.competence_focus.clone(),
        professional_context: role.professional_context.clone(),
    }
}

fn module_detail(
    spec: &CurriculumSpecification,
    module_number: usize,
    selected: &SelectedModule<'_>,
) -> ModuleDetail {
    let module = selected.module;
    let outcomes = compose(module, &spec.role_id, spec.eqf_level);
    let micro_credentials = decompose(
        CredentialContext {
            curriculum_id: &spec.id,
            role: &spec.role_id,
            assessment_method: &spec.assessment.primary,
        },
        module,
        selected.allocated_credit,
        &outcomes,
    );
    let stackable_badges = micro_credentials.iter().map(|c| c.id.clone()).collect();

    ModuleDetail {
        module_number,
        module_id: module.id.0.clone(),
        module_title: module.name.clone(),
        module_description: module.description.clone(),
        extended_description: module.extended_description.clone(),
        ects_credits: selected.allocated_credit,
        nominal_ects: module.credit,
        ecvet_points: selected.allocated_credit,
        eqf_level: module.eqf_level,
        role_relevance_score: selected.score,
        workload: Workload::for_credit(selected.allocated_credit),
        learning_outcomes: outcomes,
        micro_credentials,
        stackable_badges,
        topics: module.topics.clone(),
        skills: module.skills.clone(),
        prerequisites: module.prerequisites.clone(),
        thematic_area: module.thematic_area.clone(),
        delivery_methods: DeliveryFramework::from_descriptor(&spec.delivery),
        target_audience_adaptation: spec.target_audience.clone(),
        detailed_assessment: DetailedAssessment {
            method: spec.assessment.primary.clone(),
            components: spec.assessment.components.clone(),
            weightings: spec.assessment.weights.clone(),
            quality_criteria: DETAIL_QUALITY_CRITERIA.iter().map(|c| c.to_string()).collect(),
        },
        is_work_based: module.is_work_based,
    }
}
