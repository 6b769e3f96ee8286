//! Coverage accounting between programme outcomes and selected modules.
//!
//! A module covers a programme outcome `strong`ly when it carries an outcome of
//! the same dimension and `indirect`ly otherwise. The reverse index lists, per
//! module, which programme dimensions it contributes to directly.

use crate::catalogue::OutcomeDimension;
use crate::outcomes::OutcomeSet;
use crate::programme::ProgrammeOutcomes;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageLevel {
    Strong,
    Indirect,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// A module listed under a programme outcome it directly supports.
pub struct ModuleContribution {
    pub module_id: String,
    pub module_title: String,
    pub contribution_level: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModuleCoverage {
    pub module_id: String,
    pub module_title: String,
    pub programme_outcome_coverage: BTreeMap<OutcomeDimension, CoverageLevel>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OutcomeCoverage {
    pub programme_to_modules: BTreeMap<OutcomeDimension, Vec<ModuleContribution>>,
    pub modules_to_programme: BTreeMap<String, Vec<OutcomeDimension>>,
    pub coverage_matrix: Vec<ModuleCoverage>,
}

impl OutcomeCoverage {
    /// Programme outcomes no selected module supports directly.
    pub fn uncovered(&self) -> impl Iterator<Item = &OutcomeDimension> {
        self.programme_to_modules
            .iter()
            .filter(|(_, modules)| modules.is_empty())
            .map(|(dimension, _)| dimension)
    }
}

/// Build the coverage view. `modules` yields `(module id, title, outcomes)` in
/// selection order; every programme dimension gets an entry, even when empty.
pub fn build_outcome_coverage<'m, I>(programme: &ProgrammeOutcomes, modules: I) -> OutcomeCoverage
where
    I: IntoIterator<Item = (&'m str, &'m str, &'m OutcomeSet)>,
{
    let dimensions: Vec<OutcomeDimension> = programme.iter().map(|(dimension, _)| dimension).collect();
    let mut coverage = OutcomeCoverage {
        programme_to_modules: dimensions
            .iter()
            .map(|dimension| (dimension.clone(), Vec::new()))
            .collect(),
        ..OutcomeCoverage::default()
    };

    for (module_id, module_title, outcomes) in modules {
        let mut per_dimension = BTreeMap::new();
        let mut direct = Vec::new();
        for dimension in &dimensions {
            let level = if outcomes.contains_key(dimension) {
                direct.push(dimension.clone());
                if let Some(entries) = coverage.programme_to_modules.get_mut(dimension) {
                    entries.push(ModuleContribution {
                        module_id: module_id.to_string(),
                        module_title: module_title.to_string(),
                        contribution_level: "direct",
                    });
                }
                CoverageLevel::Strong
            } else {
                CoverageLevel::Indirect
            };
            per_dimension.insert(dimension.clone(), level);
        }

        coverage
            .modules_to_programme
            .insert(module_id.to_string(), direct);
        coverage.coverage_matrix.push(ModuleCoverage {
            module_id: module_id.to_string(),
            module_title: module_title.to_string(),
            programme_outcome_coverage: per_dimension,
        });
    }

    coverage
}
