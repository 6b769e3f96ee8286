//! Run settings: where the catalogue and specifications live, where records
//! go, and how selection ties are broken.
//!
//! Resolution order, lowest to highest: built-in defaults, the settings file,
//! `CURRICULUM_*` environment variables, then command-line flags (applied by
//! the binaries). Relative paths in a settings file resolve against the file's
//! directory.

use crate::selector::TieBreak;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CATALOGUE_ENV: &str = "CURRICULUM_CATALOGUE";
pub const SPECS_ENV: &str = "CURRICULUM_SPECS";
pub const OUTPUT_ENV: &str = "CURRICULUM_OUTPUT";

pub const DEFAULT_CATALOGUE: &str = "data/catalogue.json";
pub const DEFAULT_SPECIFICATIONS: &str = "data/curricula.json";
pub const DEFAULT_OUTPUT_DIR: &str = "output/curricula";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub catalogue: PathBuf,
    pub specifications: PathBuf,
    pub output_dir: PathBuf,
    pub tie_break: TieBreak,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    paths: PathsSection,
    #[serde(default)]
    output: OutputSection,
    #[serde(default)]
    selection: SelectionSection,
}

#[derive(Debug, Default, Deserialize)]
struct PathsSection {
    catalogue: Option<PathBuf>,
    specifications: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputSection {
    directory: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct SelectionSection {
    tie_break: Option<TieBreak>,
}

impl Settings {
    /// Defaults relative to `root`.
    pub fn defaults(root: &Path) -> Self {
        Self {
            catalogue: root.join(DEFAULT_CATALOGUE),
            specifications: root.join(DEFAULT_SPECIFICATIONS),
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            tie_break: TieBreak::default(),
        }
    }

    /// Layer a settings file over the defaults for `root`.
    pub fn load(path: &Path, root: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file: SettingsFile = serde_json::from_str(&data)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        let base = path.parent().unwrap_or(root);

        let mut settings = Self::defaults(root);
        if let Some(catalogue) = file.paths.catalogue {
            settings.catalogue = base.join(catalogue);
        }
        if let Some(specifications) = file.paths.specifications {
            settings.specifications = base.join(specifications);
        }
        if let Some(directory) = file.output.directory {
            settings.output_dir = base.join(directory);
        }
        if let Some(tie_break) = file.selection.tie_break {
            settings.tie_break = tie_break;
        }
        Ok(settings)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(path) = value(CATALOGUE_ENV) {
            self.catalogue = PathBuf::from(path);
        }
        if let Some(path) = value(SPECS_ENV) {
            self.specifications = PathBuf::from(path);
        }
        if let Some(path) = value(OUTPUT_ENV) {
            self.output_dir = PathBuf::from(path);
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }
}
