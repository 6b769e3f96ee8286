//! Caller-supplied curriculum specifications.
//!
//! A specification names the role, level, and credit volume to build for,
//! plus the delivery and programme-assessment descriptors that are copied
//! into the record. Deserialization runs the precondition checks, so a
//! `CurriculumSpecification` value in hand is always internally consistent.

use crate::catalogue::RoleId;
use crate::error::SpecError;
use crate::vocabulary::QualificationLevel;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Smallest credit volume that can be requested or allocated.
pub const MIN_CREDIT: f64 = 0.5;

const DEFAULT_PROGRAMME_TYPE: &str = "comprehensive";
const DEFAULT_DELIVERY_PRIMARY: &str = "online_asynchronous";
const DEFAULT_DELIVERY_SECONDARY: &str = "blended";
const DEFAULT_WORKPLACE_COMPONENT: &str = "professional_practice";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Programme-level assessment: a primary method plus weighted components.
pub struct AssessmentDescriptor {
    pub primary: String,
    pub components: Vec<String>,
    #[serde(rename = "weightings")]
    pub weights: Vec<u32>,
}

impl AssessmentDescriptor {
    pub fn total_weight(&self) -> u32 {
        self.weights.iter().sum()
    }

    /// Pair each component name with its weight.
    pub fn weighted_components(&self) -> impl Iterator<Item = (&str, u32)> {
        self.components
            .iter()
            .map(String::as_str)
            .zip(self.weights.iter().copied())
    }

    fn validate(&self) -> Result<(), SpecError> {
        if self.components.is_empty() {
            return Err(SpecError::EmptyAssessment);
        }
        if self.components.len() != self.weights.len() {
            return Err(SpecError::MismatchedAssessment {
                components: self.components.len(),
                weights: self.weights.len(),
            });
        }
        let total = self.total_weight();
        if total != 100 {
            return Err(SpecError::WeightsDoNotSumTo100(total));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// How the programme is delivered; every field has a default.
pub struct DeliveryDescriptor {
    #[serde(default = "default_delivery_primary")]
    pub primary: String,
    #[serde(default = "default_delivery_secondary")]
    pub secondary: Vec<String>,
    #[serde(default = "default_workplace_component")]
    pub workplace_component: String,
}

impl Default for DeliveryDescriptor {
    fn default() -> Self {
        Self {
            primary: default_delivery_primary(),
            secondary: default_delivery_secondary(),
            workplace_component: default_workplace_component(),
        }
    }
}

fn default_delivery_primary() -> String {
    DEFAULT_DELIVERY_PRIMARY.to_string()
}

fn default_delivery_secondary() -> Vec<String> {
    vec![DEFAULT_DELIVERY_SECONDARY.to_string()]
}

fn default_workplace_component() -> String {
    DEFAULT_WORKPLACE_COMPONENT.to_string()
}

fn default_programme_type() -> String {
    DEFAULT_PROGRAMME_TYPE.to_string()
}

#[derive(Clone, Debug, Deserialize)]
struct SpecificationRecord {
    id: String,
    #[serde(default)]
    title: Option<String>,
    role_id: RoleId,
    eqf_level: u8,
    ects: f64,
    #[serde(default)]
    target_audience: String,
    #[serde(default = "default_programme_type")]
    programme_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    delivery_methods: DeliveryDescriptor,
    assessment_methods: AssessmentDescriptor,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "SpecificationRecord")]
/// One curriculum to build. Never mutated after creation.
pub struct CurriculumSpecification {
    pub id: String,
    pub title: String,
    pub role_id: RoleId,
    pub eqf_level: QualificationLevel,
    pub target_credit: f64,
    pub target_audience: String,
    pub programme_type: String,
    pub description: String,
    pub delivery: DeliveryDescriptor,
    pub assessment: AssessmentDescriptor,
}

impl CurriculumSpecification {
    /// Re-run the precondition checks, e.g. after constructing the struct
    /// directly rather than through deserialization.
    pub fn validate(&self) -> Result<(), SpecError> {
        if !(self.target_credit >= MIN_CREDIT) {
            return Err(SpecError::CreditBelowMinimum(self.target_credit));
        }
        self.assessment.validate()
    }
}

impl TryFrom<SpecificationRecord> for CurriculumSpecification {
    type Error = SpecError;

    fn try_from(record: SpecificationRecord) -> Result<Self, Self::Error> {
        let specification = CurriculumSpecification {
            title: record.title.unwrap_or_else(|| record.id.clone()),
            id: record.id,
            role_id: record.role_id,
            eqf_level: QualificationLevel::new(record.eqf_level)?,
            target_credit: record.ects,
            target_audience: record.target_audience,
            programme_type: record.programme_type,
            description: record.description,
            delivery: record.delivery_methods,
            assessment: record.assessment_methods,
        };
        specification.validate()?;
        Ok(specification)
    }
}

/// Parse specifications from JSON text: a bare array or `{"curricula": [...]}`.
pub fn parse_specifications(input: &str) -> Result<Vec<CurriculumSpecification>> {
    let value: Value = serde_json::from_str(input).context("parsing curriculum specifications")?;
    let entries = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("curricula") {
            Some(Value::Array(items)) => items,
            _ => bail!("specification document must contain a 'curricula' array"),
        },
        _ => bail!("unsupported specification document; expected object or array"),
    };

    let mut specifications = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        let label = entry
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", idx + 1));
        let specification: CurriculumSpecification = serde_json::from_value(entry)
            .with_context(|| format!("invalid curriculum specification {label}"))?;
        specifications.push(specification);
    }

    if specifications.is_empty() {
        bail!("no curriculum specifications found");
    }
    Ok(specifications)
}

/// Read specifications from a JSON file.
pub fn load_specifications(path: &Path) -> Result<Vec<CurriculumSpecification>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_specifications(&data).with_context(|| format!("loading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Value {
        json!({
            "id": "DAN_Foundation",
            "title": "ESG Data Analysis (Foundation)",
            "role_id": "DAN",
            "eqf_level": 4,
            "ects": 0.5,
            "target_audience": "students_job_seekers",
            "programme_type": "micro_learning",
            "description": "Foundational ESG data skills.",
            "assessment_methods": {
                "primary": "practical_portfolio",
                "components": ["Project", "Case study", "Peer review"],
                "weightings": [40, 35, 25]
            }
        })
    }

    #[test]
    fn parses_and_defaults_delivery() {
        let spec: CurriculumSpecification = serde_json::from_value(base()).expect("valid");
        assert_eq!(spec.eqf_level.get(), 4);
        assert_eq!(spec.delivery.primary, "online_asynchronous");
        assert_eq!(spec.delivery.secondary, vec!["blended".to_string()]);
        assert_eq!(spec.assessment.total_weight(), 100);
    }

    #[test]
    fn rejects_weights_not_summing_to_100() {
        let mut value = base();
        value["assessment_methods"]["weightings"] = json!([40, 35, 20]);
        let err = serde_json::from_value::<CurriculumSpecification>(value)
            .expect_err("weights must sum to 100");
        assert!(err.to_string().contains("sum to 95"));
    }

    #[test]
    fn rejects_mismatched_components_and_credit_floor() {
        let mut value = base();
        value["assessment_methods"]["weightings"] = json!([100]);
        assert!(serde_json::from_value::<CurriculumSpecification>(value).is_err());

        let mut value = base();
        value["ects"] = json!(0.25);
        let err = serde_json::from_value::<CurriculumSpecification>(value)
            .expect_err("credit below minimum");
        assert!(err.to_string().contains("below the 0.5 minimum"));
    }

    #[test]
    fn rejects_levels_outside_window() {
        let mut value = base();
        value["eqf_level"] = json!(2);
        let err = serde_json::from_value::<CurriculumSpecification>(value)
            .expect_err("level 2 unsupported");
        assert!(err.to_string().contains("outside supported range"));
    }

    #[test]
    fn parse_accepts_wrapped_documents_and_names_bad_entries() {
        let wrapped = json!({"curricula": [base()]}).to_string();
        let specs = parse_specifications(&wrapped).expect("wrapped document");
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].title, "ESG Data Analysis (Foundation)");

        let mut bad = base();
        bad["id"] = json!("Broken");
        bad["ects"] = json!(0.1);
        let err = parse_specifications(&json!([bad]).to_string()).expect_err("bad entry");
        assert!(format!("{err:#}").contains("Broken"));
    }
}
