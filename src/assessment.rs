//! Three-tier assessment framework: programme, module, and micro-credential.

use crate::credentials::MicroCredential;
use crate::specification::AssessmentDescriptor;
use serde::Serialize;

const FORMATIVE: [&str; 3] = [
    "Weekly reflection journals",
    "Peer feedback sessions",
    "Progress check-ins",
];
const SUMMATIVE: [&str; 3] = [
    "Final project portfolio",
    "Competency demonstration",
    "Professional presentation",
];
const AUTHENTIC: [&str; 3] = [
    "Real-world case studies",
    "Workplace application",
    "Industry simulation",
];
const FEEDBACK: [&str; 4] = [
    "Instructor feedback",
    "Peer assessment",
    "Self-reflection",
    "Industry mentor input",
];
const CREDENTIAL_VALIDATION: &str = "Digital badge verification";
const CREDENTIAL_CRITERIA: [&str; 3] = [
    "Competency demonstration",
    "Industry relevance",
    "Transferability",
];

/// A weighted component inside one assessment tier.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssessmentComponent {
    pub name: String,
    pub weight: u32,
    pub description: String,
    /// Module or credential id the component applies to; `None` at programme level.
    pub applies_to: Option<String>,
}

/// Activity lists a module uses across its assessment cycle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssessmentStrategy {
    pub formative: Vec<String>,
    pub summative: Vec<String>,
    pub authentic: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModuleAssessment {
    pub module_id: String,
    pub module_title: String,
    pub assessment_strategy: AssessmentStrategy,
    /// Always knowledge application 30, skill demonstration 40, professional competence 30.
    pub assessment_criteria: Vec<AssessmentComponent>,
    pub feedback_mechanisms: Vec<String>,
}

impl ModuleAssessment {
    pub fn for_module(module_id: &str, module_title: &str) -> Self {
        let criterion = |name: &str, weight: u32, description: &str| AssessmentComponent {
            name: name.to_string(),
            weight,
            description: description.to_string(),
            applies_to: Some(module_id.to_string()),
        };
        Self {
            module_id: module_id.to_string(),
            module_title: module_title.to_string(),
            assessment_strategy: AssessmentStrategy {
                formative: owned(&FORMATIVE),
                summative: owned(&SUMMATIVE),
                authentic: owned(&AUTHENTIC),
            },
            assessment_criteria: vec![
                criterion(
                    "knowledge_application",
                    30,
                    "Application of module knowledge to realistic problems",
                ),
                criterion(
                    "skill_demonstration",
                    40,
                    "Demonstrated use of the module's practical skills",
                ),
                criterion(
                    "professional_competence",
                    30,
                    "Responsible, autonomous professional conduct",
                ),
            ],
            feedback_mechanisms: owned(&FEEDBACK),
        }
    }

    pub fn total_weight(&self) -> u32 {
        self.assessment_criteria.iter().map(|c| c.weight).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CredentialAssessment {
    pub credential_id: String,
    pub credential_title: String,
    pub assessment_method: String,
    pub validation_process: String,
    pub quality_criteria: Vec<String>,
}

impl From<&MicroCredential> for CredentialAssessment {
    fn from(credential: &MicroCredential) -> Self {
        Self {
            credential_id: credential.id.clone(),
            credential_title: credential.title.clone(),
            assessment_method: credential.assessment_method.clone(),
            validation_process: CREDENTIAL_VALIDATION.to_string(),
            quality_criteria: owned(&CREDENTIAL_CRITERIA),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityAssuranceFlags {
    pub external_validation: bool,
    pub peer_review: bool,
    pub industry_feedback: bool,
    pub continuous_improvement: bool,
}

impl Default for QualityAssuranceFlags {
    fn default() -> Self {
        Self {
            external_validation: true,
            peer_review: true,
            industry_feedback: true,
            continuous_improvement: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssessmentFramework {
    /// Verbatim copy of the specification's descriptor.
    pub programme_level: AssessmentDescriptor,
    pub module_level: Vec<ModuleAssessment>,
    pub micro_credential_level: Vec<CredentialAssessment>,
    pub quality_assurance: QualityAssuranceFlags,
}

impl AssessmentFramework {
    /// Build all tiers. `modules` yields `(module id, module title, credentials)`
    /// in selection order.
    pub fn build<'m, I>(descriptor: &AssessmentDescriptor, modules: I) -> Self
    where
        I: IntoIterator<Item = (&'m str, &'m str, &'m [MicroCredential])>,
    {
        let mut module_level = Vec::new();
        let mut micro_credential_level = Vec::new();
        for (module_id, module_title, credentials) in modules {
            module_level.push(ModuleAssessment::for_module(module_id, module_title));
            micro_credential_level.extend(credentials.iter().map(CredentialAssessment::from));
        }

        Self {
            programme_level: descriptor.clone(),
            module_level,
            micro_credential_level,
            quality_assurance: QualityAssuranceFlags::default(),
        }
    }

    /// Programme components as weighted entries.
    pub fn programme_components(&self) -> Vec<AssessmentComponent> {
        self.programme_level
            .weighted_components()
            .map(|(name, weight)| AssessmentComponent {
                name: name.to_string(),
                weight,
                description: format!("Programme assessment via {name}"),
                applies_to: None,
            })
            .collect()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
