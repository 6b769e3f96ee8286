//! Typed failures for catalogue ingestion, specification checks, and builds.
//!
//! Catalogue integrity problems abort the whole run; build failures are scoped
//! to one curriculum and carried as values so batch callers decide how to
//! report them.

use crate::catalogue::{ModuleId, RoleId};
use thiserror::Error;

/// Record kind named in catalogue integrity errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordKind {
    Module,
    Role,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Module => "module",
            RecordKind::Role => "role",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogue record is missing data or contradicts another record.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("catalogue contains no {0} records")]
    Empty(RecordKind),

    /// `id` is `"unknown"` when the record has no identifier at all.
    #[error("{kind} {id} missing required field: {field}")]
    MissingField {
        kind: RecordKind,
        id: String,
        field: &'static str,
    },

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: RecordKind, id: String },

    #[error("module {module} has relevance {score} for role {role}; expected 0-100")]
    RelevanceOutOfRange {
        module: ModuleId,
        role: RoleId,
        score: u32,
    },

    #[error("module {module} has invalid credit value {value}")]
    InvalidCredit { module: ModuleId, value: f64 },
}

/// A curriculum specification violates its own preconditions.
#[derive(Debug, Error, PartialEq)]
pub enum SpecError {
    #[error("qualification level {0} outside supported range 3-8")]
    LevelOutOfRange(u8),

    #[error("target credit {0} below the 0.5 minimum")]
    CreditBelowMinimum(f64),

    #[error("assessment descriptor lists no components")]
    EmptyAssessment,

    #[error("assessment descriptor has {components} components but {weights} weights")]
    MismatchedAssessment { components: usize, weights: usize },

    #[error("assessment weights sum to {0}, expected 100")]
    WeightsDoNotSumTo100(u32),
}

/// Why a single curriculum could not be built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("no suitable modules for role {role} at qualification level {level}")]
    NoSuitableModules { role: RoleId, level: u8 },

    #[error("role {0} is not defined in the catalogue")]
    UnknownRole(RoleId),
}

/// A batch stopped at the first failing specification.
#[derive(Debug, Error)]
#[error("batch aborted at specification {spec_id} after {completed} curricula were built: {source}")]
pub struct BatchError {
    pub completed: usize,
    pub spec_id: String,
    #[source]
    pub source: BuildError,
}
