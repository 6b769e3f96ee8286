//! Module-level learning outcomes.
//!
//! Outcomes the catalogue already supplies pass through untouched. The verb
//! table is only consulted when a module has no outcomes at all, in which
//! case one generic statement per core dimension is synthesized.

use crate::catalogue::{Module, OutcomeDimension, RoleId};
use crate::vocabulary::{QualificationLevel, lead_verb};
use std::collections::BTreeMap;

/// Outcome statements keyed by dimension, iterating in core order.
pub type OutcomeSet = BTreeMap<OutcomeDimension, String>;

/// Outcomes for one selected module at the requested level.
pub fn compose(module: &Module, role: &RoleId, level: QualificationLevel) -> OutcomeSet {
    if !module.learning_outcomes.is_empty() {
        return module.learning_outcomes.clone();
    }

    OutcomeDimension::CORE
        .into_iter()
        .map(|dimension| {
            let verb = lead_verb(level, &dimension);
            let text = synthesize(&dimension, verb, &module.name, role);
            (dimension, text)
        })
        .collect()
}

fn synthesize(dimension: &OutcomeDimension, verb: &str, module_name: &str, role: &RoleId) -> String {
    match dimension {
        OutcomeDimension::Knowledge => format!(
            "{verb} fundamental concepts in {module_name} relevant to {role} professional practice."
        ),
        OutcomeDimension::Skills => format!(
            "{verb} practical techniques and methodologies from {module_name} in professional contexts."
        ),
        OutcomeDimension::Competence => format!(
            "{verb} as a competent professional applying {module_name} knowledge responsibly."
        ),
        OutcomeDimension::Other(name) => {
            format!("{verb} {name} capabilities developed through {module_name}.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{ModuleId, ModuleRecord};
    use serde_json::json;

    fn module(outcomes: serde_json::Value) -> Module {
        let record: ModuleRecord = serde_json::from_value(json!({
            "id": "M1",
            "name": "ESG Reporting",
            "eqf_level": 5,
            "ects_points": 1.0,
            "role_relevance": {"DAN": 80},
            "learning_outcomes": outcomes
        }))
        .unwrap();
        Module::try_from(record).unwrap()
    }

    #[test]
    fn existing_outcomes_pass_through_unchanged() {
        let module = module(json!({"knowledge": "Know CSRD.", "skills": "Build reports."}));
        let outcomes = compose(&module, &RoleId::from("DAN"), QualificationLevel::new(5).unwrap());
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[&OutcomeDimension::Knowledge], "Know CSRD.");
        assert_eq!(outcomes[&OutcomeDimension::Skills], "Build reports.");
        assert_eq!(module.id, ModuleId::from("M1"));
    }

    #[test]
    fn synthesizes_three_outcomes_with_level_verbs() {
        let module = module(json!({}));
        let outcomes = compose(&module, &RoleId::from("DAN"), QualificationLevel::new(4).unwrap());
        assert_eq!(
            outcomes[&OutcomeDimension::Knowledge],
            "Explain fundamental concepts in ESG Reporting relevant to DAN professional practice."
        );
        assert_eq!(
            outcomes[&OutcomeDimension::Skills],
            "Apply practical techniques and methodologies from ESG Reporting in professional contexts."
        );
        assert_eq!(
            outcomes[&OutcomeDimension::Competence],
            "Take responsibility as a competent professional applying ESG Reporting knowledge responsibly."
        );
    }
}
