//! Shared JSON Schema loader for catalogue and specification documents.
//!
//! Callers point at a schema on disk (or fall back to the copy compiled into
//! the binary), optionally pin the accepted `schema_version` values, patch the
//! schema's version const to match the document being checked, and receive a
//! compiled validator.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls how schemas are loaded and normalized before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Schema text used when the path does not exist on disk.
    pub embedded_fallback: Option<&'a str>,
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Override schema_version when provided (used to align consts).
    pub expected_version: Option<&'a str>,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
    /// Patch the schema_version const in the schema payload to match
    /// `expected_version` (or the extracted version when no override is set).
    pub patch_schema_version_const: bool,
}

impl<'a> Default for SchemaLoadOptions<'a> {
    fn default() -> Self {
        Self {
            embedded_fallback: None,
            schema_version_pointer: "/properties/schema_version/const",
            expected_version: None,
            allowed_versions: None,
            patch_schema_version_const: false,
        }
    }
}

pub(crate) fn load_json_schema(path: &Path, options: SchemaLoadOptions<'_>) -> Result<SchemaLoadResult> {
    let schema_value: Value = if path.exists() {
        serde_json::from_reader(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display()))?
    } else if let Some(embedded) = options.embedded_fallback {
        serde_json::from_str(embedded)
            .with_context(|| format!("parsing embedded schema for {}", path.display()))?
    } else {
        bail!("schema {} does not exist", path.display());
    };

    let schema_version = match options.expected_version {
        Some(version) => version.to_string(),
        None => extract_schema_version(&schema_value, options.schema_version_pointer)
            .ok_or_else(|| anyhow!("schema missing schema_version const"))?,
    };

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let mut schema_for_compile = schema_value;
    if options.patch_schema_version_const {
        let target = schema_for_compile
            .pointer_mut(options.schema_version_pointer)
            .ok_or_else(|| {
                anyhow!(
                    "schema missing pointer {} for schema_version const",
                    options.schema_version_pointer
                )
            })?;
        *target = Value::String(schema_version.clone());
    }

    let compiled = JSONSchema::compile(&schema_for_compile)
        .map_err(|err| anyhow!("compiling schema {}: {err}", path.display()))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

/// Validate `instance` and join every schema violation into one message.
pub(crate) fn validate_instance(compiled: &JSONSchema, instance: &Value) -> Result<(), String> {
    match compiled.validate(instance) {
        Ok(()) => Ok(()),
        Err(errors) => Err(errors
            .map(|err| format!("{} (at {})", err, err.instance_path))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
