//! Catalogue records as ingested from disk, and the validated domain types.
//!
//! `ModuleRecord` and `RoleRecord` mirror the catalogue schema with every
//! field optional so integrity failures can name the offending record and
//! field. Conversion into `Module` / `RoleProfile` is the only place defaults
//! are applied; downstream code never sees a missing value.

use crate::catalogue::identity::{CatalogueKey, ModuleId, OutcomeDimension, RoleId};
use crate::error::{CatalogueError, RecordKind};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DEFAULT_THEMATIC_AREA: &str = "General";

#[derive(Clone, Debug, Deserialize)]
/// Full catalogue document as stored on disk.
pub struct CatalogueDocument {
    pub schema_version: CatalogueKey,
    pub modules: Vec<ModuleRecord>,
    pub roles: Vec<RoleRecord>,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Module entry before integrity checks.
pub struct ModuleRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub eqf_level: Option<u8>,
    #[serde(default)]
    pub ects_points: Option<f64>,
    #[serde(default)]
    pub role_relevance: Option<BTreeMap<RoleId, u32>>,
    #[serde(default)]
    pub learning_outcomes: BTreeMap<OutcomeDimension, String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extended_description: Option<String>,
    #[serde(default)]
    pub thematic_area: Option<String>,
    #[serde(default)]
    pub is_work_based: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Role entry before integrity checks and defaulting.
pub struct RoleRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub competence_focus: Option<String>,
    #[serde(default)]
    pub key_capabilities: Vec<String>,
    #[serde(default)]
    pub professional_context: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
/// Reusable learning module. Immutable once owned by the repository.
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub eqf_level: u8,
    pub credit: f64,
    pub role_relevance: BTreeMap<RoleId, u8>,
    pub learning_outcomes: BTreeMap<OutcomeDimension, String>,
    pub topics: Vec<String>,
    pub skills: Vec<String>,
    pub prerequisites: Vec<String>,
    pub description: String,
    pub extended_description: String,
    pub thematic_area: String,
    pub is_work_based: bool,
}

impl Module {
    /// Relevance of this module for `role`, zero when the role is not listed.
    pub fn relevance_for(&self, role: &RoleId) -> u8 {
        self.role_relevance.get(role).copied().unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Named professional role that steers relevance and outcome phrasing.
pub struct RoleProfile {
    pub id: RoleId,
    pub title: String,
    pub abbreviation: String,
    pub competence_focus: String,
    pub key_capabilities: Vec<String>,
    pub professional_context: String,
}

impl TryFrom<ModuleRecord> for Module {
    type Error = CatalogueError;

    fn try_from(record: ModuleRecord) -> Result<Self, Self::Error> {
        let display_id = record.id.clone().unwrap_or_else(|| "unknown".to_string());
        let missing = |field: &'static str| CatalogueError::MissingField {
            kind: RecordKind::Module,
            id: display_id.clone(),
            field,
        };

        let id = record
            .id
            .filter(|id| !id.trim().is_empty())
            .map(ModuleId)
            .ok_or_else(|| missing("id"))?;
        let name = record.name.ok_or_else(|| missing("name"))?;
        let eqf_level = record.eqf_level.ok_or_else(|| missing("eqf_level"))?;
        let credit = record.ects_points.ok_or_else(|| missing("ects_points"))?;
        let raw_relevance = record
            .role_relevance
            .ok_or_else(|| missing("role_relevance"))?;

        if !credit.is_finite() || credit <= 0.0 {
            return Err(CatalogueError::InvalidCredit {
                module: id,
                value: credit,
            });
        }

        let mut role_relevance = BTreeMap::new();
        for (role, score) in raw_relevance {
            let Ok(bounded) = u8::try_from(score) else {
                return Err(CatalogueError::RelevanceOutOfRange {
                    module: id,
                    role,
                    score,
                });
            };
            if bounded > 100 {
                return Err(CatalogueError::RelevanceOutOfRange {
                    module: id,
                    role,
                    score,
                });
            }
            role_relevance.insert(role, bounded);
        }

        Ok(Module {
            id,
            name,
            eqf_level,
            credit,
            role_relevance,
            learning_outcomes: record.learning_outcomes,
            topics: record.topics,
            skills: record.skills,
            prerequisites: record.prerequisites,
            description: record.description.unwrap_or_default(),
            extended_description: record.extended_description.unwrap_or_default(),
            thematic_area: record
                .thematic_area
                .unwrap_or_else(|| DEFAULT_THEMATIC_AREA.to_string()),
            is_work_based: record.is_work_based,
        })
    }
}

impl TryFrom<RoleRecord> for RoleProfile {
    type Error = CatalogueError;

    fn try_from(record: RoleRecord) -> Result<Self, Self::Error> {
        let display_id = record.id.clone().unwrap_or_else(|| "unknown".to_string());
        let id = record
            .id
            .filter(|id| !id.trim().is_empty())
            .map(RoleId)
            .ok_or_else(|| CatalogueError::MissingField {
                kind: RecordKind::Role,
                id: display_id.clone(),
                field: "id",
            })?;
        let name = record.name.ok_or_else(|| CatalogueError::MissingField {
            kind: RecordKind::Role,
            id: display_id,
            field: "name",
        })?;

        let competence_focus = record
            .competence_focus
            .or(record.description)
            .unwrap_or_else(|| name.clone());
        let professional_context = record
            .professional_context
            .unwrap_or_else(|| competence_focus.clone());
        // Programme outcomes and progression paths quote the leading
        // capabilities, so an empty list falls back to the focus statement.
        let key_capabilities = if record.key_capabilities.is_empty() {
            vec![competence_focus.clone()]
        } else {
            record.key_capabilities
        };

        Ok(RoleProfile {
            abbreviation: record.abbreviation.unwrap_or_else(|| id.0.clone()),
            title: record.title.unwrap_or(name),
            id,
            competence_focus,
            key_capabilities,
            professional_context,
        })
    }
}

/// Read and parse a catalogue document from disk without integrity checks.
pub fn load_catalogue_from_path(path: &Path) -> Result<CatalogueDocument> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document: CatalogueDocument =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(document)
}
