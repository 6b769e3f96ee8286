//! Validated, read-only view of the module and role catalogue.
//!
//! The repository is built once (from disk via [`CatalogueRepository::load`]
//! or from already-parsed records) and then only lent out by shared
//! reference. Modules keep their catalogue insertion order because ranking
//! ties fall back to it; lookups go through id indices.

use crate::catalogue::identity::{CatalogueKey, ModuleId, RoleId};
use crate::catalogue::model::{
    CatalogueDocument, Module, ModuleRecord, RoleProfile, RoleRecord, load_catalogue_from_path,
};
use crate::error::{CatalogueError, RecordKind};
use crate::schema_loader::{SchemaLoadOptions, load_json_schema, validate_instance};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// The only catalogue layout this crate understands.
pub const CATALOGUE_SCHEMA_VERSION: &str = "curriculum_catalogue_v1";
const CATALOGUE_SCHEMA_RELATIVE: &str = "schema/catalogue.schema.json";
const EMBEDDED_CATALOGUE_SCHEMA: &str = include_str!("../../schema/catalogue.schema.json");

#[derive(Debug)]
/// Module and role indices keyed by identifier.
pub struct CatalogueRepository {
    key: CatalogueKey,
    modules: Vec<Module>,
    module_index: BTreeMap<ModuleId, usize>,
    roles: BTreeMap<RoleId, RoleProfile>,
}

impl CatalogueRepository {
    /// Load, schema-check, and index a catalogue document from disk.
    ///
    /// Any integrity failure aborts the load; there is no partial catalogue.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let document = load_catalogue_from_path(path)?;
        let repository = Self::from_document(document)
            .with_context(|| format!("validating catalogue {}", path.display()))?;
        tracing::info!(
            catalogue = %path.display(),
            modules = repository.module_count(),
            roles = repository.role_count(),
            "catalogue loaded"
        );
        Ok(repository)
    }

    /// Build from a parsed document, enforcing the required-field contract.
    pub fn from_document(document: CatalogueDocument) -> Result<Self, CatalogueError> {
        Self::from_parts(document.schema_version, document.modules, document.roles)
    }

    /// Build from separately sourced module and role records.
    pub fn from_parts(
        key: CatalogueKey,
        modules: Vec<ModuleRecord>,
        roles: Vec<RoleRecord>,
    ) -> Result<Self, CatalogueError> {
        if modules.is_empty() {
            return Err(CatalogueError::Empty(RecordKind::Module));
        }
        if roles.is_empty() {
            return Err(CatalogueError::Empty(RecordKind::Role));
        }

        let mut validated = Vec::with_capacity(modules.len());
        let mut module_index = BTreeMap::new();
        for record in modules {
            let module = Module::try_from(record)?;
            if module_index.contains_key(&module.id) {
                return Err(CatalogueError::DuplicateId {
                    kind: RecordKind::Module,
                    id: module.id.0,
                });
            }
            module_index.insert(module.id.clone(), validated.len());
            validated.push(module);
        }

        let mut role_map = BTreeMap::new();
        for record in roles {
            let role = RoleProfile::try_from(record)?;
            if role_map.contains_key(&role.id) {
                return Err(CatalogueError::DuplicateId {
                    kind: RecordKind::Role,
                    id: role.id.0,
                });
            }
            role_map.insert(role.id.clone(), role);
        }

        Ok(Self {
            key,
            modules: validated,
            module_index,
            roles: role_map,
        })
    }

    /// The schema key declared by the loaded document.
    pub fn key(&self) -> &CatalogueKey {
        &self.key
    }

    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.module_index.get(id).map(|idx| &self.modules[*idx])
    }

    pub fn role(&self, id: &RoleId) -> Option<&RoleProfile> {
        self.roles.get(id)
    }

    /// Iterates modules in catalogue insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Iterates roles in id order.
    pub fn roles(&self) -> impl Iterator<Item = &RoleProfile> {
        self.roles.values()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([CATALOGUE_SCHEMA_VERSION.to_string()])
}

fn validate_against_schema(catalogue_path: &Path) -> Result<()> {
    let catalogue_file = File::open(catalogue_path)
        .with_context(|| format!("opening catalogue {}", catalogue_path.display()))?;
    let catalogue_value: Value = serde_json::from_reader(BufReader::new(catalogue_file))
        .with_context(|| format!("parsing catalogue {}", catalogue_path.display()))?;

    let catalogue_version = catalogue_value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let schema_path = resolve_catalogue_schema_path(catalogue_path);
    let allowed = allowed_schema_versions();
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            embedded_fallback: Some(EMBEDDED_CATALOGUE_SCHEMA),
            allowed_versions: Some(&allowed),
            expected_version: Some(&catalogue_version),
            patch_schema_version_const: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("loading catalogue schema {}", schema_path.display()))?;

    if let Err(details) = validate_instance(&schema.compiled, &catalogue_value) {
        bail!(
            "catalogue {} failed schema validation:\n{}",
            catalogue_path.display(),
            details
        );
    }
    tracing::debug!(
        schema = %schema_path.display(),
        version = %schema.schema_version,
        "catalogue passed schema validation"
    );
    Ok(())
}

/// Prefer a `schema/` directory beside the catalogue's data directory, then
/// the crate's own copy.
fn resolve_catalogue_schema_path(catalogue_path: &Path) -> PathBuf {
    if let Some(base) = catalogue_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join(CATALOGUE_SCHEMA_RELATIVE);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(CATALOGUE_SCHEMA_RELATIVE)
}
