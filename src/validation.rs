//! Structural checks over assembled curricula and emitted record files.
//!
//! Checks collect every finding instead of stopping at the first, so a lint
//! run shows all problems in one pass. Under-allocation is a warning: the
//! record is valid, the catalogue simply could not fill the request.

use crate::catalogue::{CatalogueRepository, ModuleId};
use crate::record::Curriculum;
use crate::selector::level_window;
use crate::vocabulary::QualificationLevel;
use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const CREDIT_TOLERANCE: f64 = 1e-6;
const EXPECTED_MAPPING_ROWS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: String) {
        self.errors.push(message);
    }
}

pub fn validate_curriculum(curriculum: &Curriculum) -> ValidationReport {
    let mut report = ValidationReport::default();
    let ident = &curriculum.curriculum_identification;
    let id = &ident.id;

    if ident.total_ects > ident.target_ects + CREDIT_TOLERANCE {
        report.error(format!(
            "{id}: allocated {} exceeds target {}",
            ident.total_ects, ident.target_ects
        ));
    } else if ident.total_ects + CREDIT_TOLERANCE < ident.target_ects {
        report.warnings.push(format!(
            "{id}: under-allocated, {} of {} credits filled",
            ident.total_ects, ident.target_ects
        ));
    }

    let module_sum: f64 = curriculum.modules().iter().map(|m| m.ects_credits).sum();
    if (module_sum - ident.total_ects).abs() > CREDIT_TOLERANCE {
        report.error(format!(
            "{id}: module credits sum to {module_sum}, record total is {}",
            ident.total_ects
        ));
    }

    let window = match QualificationLevel::new(ident.eqf_level) {
        Ok(level) => Some(level_window(level)),
        Err(err) => {
            report.error(format!("{id}: {err}"));
            None
        }
    };

    for module in curriculum.modules() {
        let label = format!("{id}/{}", module.module_id);
        if module.ects_credits <= 0.0 {
            report.error(format!("{label}: allocated credit must be positive"));
        }
        if module.ects_credits > module.nominal_ects + CREDIT_TOLERANCE {
            report.error(format!(
                "{label}: allocated {} exceeds nominal {}",
                module.ects_credits, module.nominal_ects
            ));
        }
        if let Some(window) = &window {
            if !window.contains(&module.eqf_level) {
                report.error(format!(
                    "{label}: level {} outside window {}-{}",
                    module.eqf_level,
                    window.start(),
                    window.end()
                ));
            }
        }
        let fractions: f64 = module
            .micro_credentials
            .iter()
            .map(|c| c.credit_fraction)
            .sum();
        if (fractions - module.ects_credits).abs() > CREDIT_TOLERANCE {
            report.error(format!(
                "{label}: credential fractions sum to {fractions}, module allocation is {}",
                module.ects_credits
            ));
        }
    }

    let assessment = &curriculum.assessment_framework;
    let programme_total = assessment.programme_level.total_weight();
    if programme_total != 100 {
        report.error(format!(
            "{id}: programme assessment weights sum to {programme_total}"
        ));
    }
    for tier in &assessment.module_level {
        let total = tier.total_weight();
        if total != 100 {
            report.error(format!(
                "{id}/{}: module assessment weights sum to {total}",
                tier.module_id
            ));
        }
    }

    let mut seen = BTreeSet::new();
    let mut credential_count = 0;
    for credential in curriculum.credentials() {
        credential_count += 1;
        if !seen.insert(credential.id.as_str()) {
            report.error(format!("{id}: duplicate credential id {}", credential.id));
        }
    }
    if assessment.micro_credential_level.len() != credential_count {
        report.error(format!(
            "{id}: {} credential assessments for {credential_count} credentials",
            assessment.micro_credential_level.len()
        ));
    }

    let rows = curriculum.visual_outcome_mapping.rows.len();
    if rows != EXPECTED_MAPPING_ROWS {
        report.error(format!(
            "{id}: outcome map has {rows} rows, expected {EXPECTED_MAPPING_ROWS}"
        ));
    }

    report
}

/// Check emitted record files under `dirs` against the catalogue: every module
/// id a record cites must still exist. Unreadable or malformed files are
/// reported as findings, not failures.
pub fn validate_record_files(
    catalogue: &CatalogueRepository,
    dirs: &[PathBuf],
) -> Result<Vec<String>> {
    let mut errors = Vec::new();
    for json_file in find_json_files(dirs)? {
        let data = match fs::read_to_string(&json_file) {
            Ok(data) => data,
            Err(err) => {
                errors.push(format!("{}: unable to read: {err}", json_file.display()));
                continue;
            }
        };
        let value: Value = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(err) => {
                errors.push(format!("{}: invalid JSON: {err}", json_file.display()));
                continue;
            }
        };

        let mut seen = BTreeSet::new();
        for module_id in extract_module_ids(&value) {
            if !seen.insert(module_id.clone()) {
                continue;
            }
            if catalogue.module(&module_id).is_none() {
                errors.push(format!(
                    "{} references unknown module '{}'",
                    json_file.display(),
                    module_id
                ));
            }
        }
    }
    Ok(errors)
}

fn find_json_files(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in dirs {
        collect_json(dir, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn collect_json(dir: &Path, acc: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_json(&path, acc)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            acc.push(path);
        }
    }
    Ok(())
}

fn extract_module_ids(value: &Value) -> Vec<ModuleId> {
    let Some(details) = value
        .pointer("/modular_structure/module_details")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };
    details
        .iter()
        .filter_map(|detail| detail.get("module_id").and_then(Value::as_str))
        .map(ModuleId::from)
        .collect()
}
