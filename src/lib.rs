//! Shared library for the curriculum-forge helpers.
//!
//! The crate loads a module/role catalogue, selects modules for a requested
//! role, qualification level, and credit volume, and assembles the full
//! curriculum record (outcomes, micro-credentials, assessment tiers, outcome
//! map). The binaries under `src/bin/` are thin wrappers: project discovery,
//! settings, and JSON output live here so they can be tested directly.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod assessment;
pub mod batch;
pub mod catalogue;
pub mod config;
pub mod coverage;
pub mod credentials;
pub mod curriculum;
pub mod delivery;
pub mod error;
pub mod mapping;
pub mod outcomes;
pub mod output;
pub mod programme;
pub mod record;
mod schema_loader;
pub mod selector;
pub mod specification;
pub mod validation;
pub mod vocabulary;

pub use batch::{BatchAbort, BatchReport, run_batch};
pub use catalogue::{
    CatalogueKey, CatalogueRepository, Module, ModuleId, OutcomeDimension, RoleId, RoleProfile,
};
pub use config::Settings;
pub use curriculum::CurriculumBuilder;
pub use error::{BatchError, BuildError, CatalogueError, SpecError};
pub use mapping::{ChainedMatch, MatchStrategy};
pub use record::Curriculum;
pub use selector::{ModuleSelector, Selection, TieBreak};
pub use specification::{CurriculumSpecification, load_specifications, parse_specifications};
pub use validation::{ValidationReport, validate_curriculum, validate_record_files};
pub use vocabulary::QualificationLevel;

const ROOT_SENTINEL: &str = "schema/catalogue.schema.json";
const MANIFEST: &str = "Cargo.toml";

/// Returns true when `candidate` looks like the project root.
fn is_project_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file() && candidate.join(MANIFEST).is_file()
}

fn project_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_project_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_project_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the project root.
///
/// Honors `CURRICULUM_ROOT` when it points at a real checkout, then climbs up
/// from the current executable, then falls back to the build-time hint.
pub fn find_project_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("CURRICULUM_ROOT") {
        if let Some(root) = project_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("CURRICULUM_ROOT_HINT") {
        if let Some(root) = project_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!("Unable to locate the curriculum-forge project root. Set CURRICULUM_ROOT to the checkout.");
}
