//! Micro-credentials decomposed from a module's outcome statements.

use crate::catalogue::{Module, OutcomeDimension, RoleId};
use crate::outcomes::OutcomeSet;
use serde::Serialize;

const DEFAULT_OUTCOME: &str = "Professional competence development";
const QUALITY_CRITERIA: [&str; 3] = [
    "Competency demonstration",
    "Industry relevance",
    "Professional application",
];

/// One stackable credential unit tied to a single outcome.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MicroCredential {
    pub id: String,
    pub title: String,
    pub description: String,
    pub dimension: OutcomeDimension,
    pub module_id: String,
    #[serde(rename = "ects_fraction")]
    pub credit_fraction: f64,
    pub assessment_method: String,
    pub digital_badge: bool,
    pub digitally_verifiable: bool,
    pub stackable: bool,
    pub role_alignment: String,
    pub quality_criteria: Vec<String>,
}

/// Inputs shared by every credential of one curriculum build.
#[derive(Clone, Copy, Debug)]
pub struct CredentialContext<'a> {
    pub curriculum_id: &'a str,
    pub role: &'a RoleId,
    pub assessment_method: &'a str,
}

/// Split `allocated_credit` evenly across `outcomes`, one credential each.
///
/// An empty outcome set yields a single competence credential carrying the
/// full allocation, so every selected module is represented.
pub fn decompose(
    context: CredentialContext<'_>,
    module: &Module,
    allocated_credit: f64,
    outcomes: &OutcomeSet,
) -> Vec<MicroCredential> {
    if outcomes.is_empty() {
        return vec![credential(
            context,
            module,
            OutcomeDimension::Competence,
            DEFAULT_OUTCOME,
            allocated_credit,
        )];
    }

    let fraction = allocated_credit / outcomes.len() as f64;
    outcomes
        .iter()
        .map(|(dimension, text)| credential(context, module, dimension.clone(), text, fraction))
        .collect()
}

fn credential(
    context: CredentialContext<'_>,
    module: &Module,
    dimension: OutcomeDimension,
    description: &str,
    credit_fraction: f64,
) -> MicroCredential {
    MicroCredential {
        id: format!("{}_{}_{}", context.curriculum_id, module.id, dimension),
        title: format!("{} - {} Competency", module.name, dimension.title()),
        description: description.to_string(),
        module_id: module.id.0.clone(),
        credit_fraction,
        assessment_method: context.assessment_method.to_string(),
        digital_badge: true,
        digitally_verifiable: true,
        stackable: true,
        role_alignment: format!("Supports {} competence development", context.role),
        quality_criteria: QUALITY_CRITERIA.iter().map(|c| c.to_string()).collect(),
        dimension,
    }
}
