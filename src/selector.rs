//! Module selection and credit allocation.
//!
//! Candidates must be relevant to the role (score ≥ 60) and sit in the level
//! window `[max(3, level − 2), level]`. They are ranked by relevance plus a
//! proximity bonus (`10 − 3·|Δlevel|`) and then walked greedily: a module
//! contributes its full credit while that fits, otherwise the remaining
//! credit if at least 0.5 is left, otherwise it is skipped.

use crate::catalogue::{CatalogueRepository, Module, RoleId};
use crate::error::BuildError;
use crate::specification::MIN_CREDIT;
use crate::vocabulary::QualificationLevel;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Minimum role relevance for a module to be considered.
pub const RELEVANCE_THRESHOLD: u8 = 60;
/// How far below the requested level a module may sit.
pub const LEVEL_WINDOW: u8 = 2;
const PROXIMITY_BONUS: i32 = 10;
const PROXIMITY_PENALTY: i32 = 3;
// Allocation totals are sums of decimal fractions; compare with slack.
const CREDIT_EPSILON: f64 = 1e-9;

/// Ordering among candidates with equal adjusted scores.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep catalogue insertion order (stable sort).
    #[default]
    CatalogueOrder,
    /// Lexicographic module id.
    ModuleId,
}

/// A module that passed filtering, with its adjusted score.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    pub module: &'a Module,
    pub score: i32,
}

/// A module chosen for one curriculum build.
#[derive(Clone, Copy, Debug)]
pub struct SelectedModule<'a> {
    pub module: &'a Module,
    pub score: i32,
    pub allocated_credit: f64,
}

/// Selector output: records in rank order plus the allocated total.
#[derive(Clone, Debug)]
pub struct Selection<'a> {
    pub modules: Vec<SelectedModule<'a>>,
    pub total_credit: f64,
    pub target_credit: f64,
}

impl Selection<'_> {
    /// True when the candidates could not cover the requested volume.
    pub fn is_under_allocated(&self) -> bool {
        self.total_credit + CREDIT_EPSILON < self.target_credit
    }
}

/// Closed level window for a requested level.
pub fn level_window(level: QualificationLevel) -> RangeInclusive<u8> {
    let floor = level
        .get()
        .saturating_sub(LEVEL_WINDOW)
        .max(QualificationLevel::MIN);
    floor..=level.get()
}

/// Bonus that rewards modules close to the requested level.
pub fn proximity_bonus(module_level: u8, level: QualificationLevel) -> i32 {
    let distance = (i32::from(module_level) - i32::from(level.get())).abs();
    PROXIMITY_BONUS - PROXIMITY_PENALTY * distance
}

/// Ranks and allocates modules from a shared catalogue.
#[derive(Clone, Copy, Debug)]
pub struct ModuleSelector<'a> {
    repository: &'a CatalogueRepository,
    tie_break: TieBreak,
}

impl<'a> ModuleSelector<'a> {
    pub fn new(repository: &'a CatalogueRepository) -> Self {
        Self {
            repository,
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Filter, score, and rank candidates without allocating credit.
    pub fn candidates(&self, role: &RoleId, level: QualificationLevel) -> Vec<Candidate<'a>> {
        let window = level_window(level);
        let mut candidates: Vec<Candidate<'a>> = self
            .repository
            .modules()
            .filter(|module| {
                module.relevance_for(role) >= RELEVANCE_THRESHOLD
                    && window.contains(&module.eqf_level)
            })
            .map(|module| Candidate {
                module,
                score: i32::from(module.relevance_for(role))
                    + proximity_bonus(module.eqf_level, level),
            })
            .collect();

        // Vec::sort_by is stable, so CatalogueOrder needs no secondary key.
        match self.tie_break {
            TieBreak::CatalogueOrder => candidates.sort_by(|a, b| b.score.cmp(&a.score)),
            TieBreak::ModuleId => candidates.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| a.module.id.cmp(&b.module.id))
            }),
        }
        candidates
    }

    /// Select modules for `role` at `level`, filling `target_credit`.
    ///
    /// Fails only when no module passes the filter; a shortfall is reported
    /// through [`Selection::is_under_allocated`].
    pub fn select(
        &self,
        role: &RoleId,
        level: QualificationLevel,
        target_credit: f64,
    ) -> Result<Selection<'a>, BuildError> {
        let candidates = self.candidates(role, level);
        if candidates.is_empty() {
            return Err(BuildError::NoSuitableModules {
                role: role.clone(),
                level: level.get(),
            });
        }

        let mut modules = Vec::new();
        let mut allocated = 0.0_f64;
        for candidate in candidates {
            if allocated >= target_credit {
                break;
            }
            let remaining = target_credit - allocated;
            let credit = candidate.module.credit;
            let allocation = if remaining >= credit {
                credit
            } else if remaining >= MIN_CREDIT {
                remaining
            } else {
                tracing::debug!(
                    module = %candidate.module.id,
                    remaining,
                    "skipping module; remaining credit below minimum allocation"
                );
                continue;
            };

            tracing::debug!(
                module = %candidate.module.id,
                score = candidate.score,
                allocation,
                "module selected"
            );
            modules.push(SelectedModule {
                module: candidate.module,
                score: candidate.score,
                allocated_credit: allocation,
            });
            allocated += allocation;
        }

        Ok(Selection {
            modules,
            total_credit: allocated,
            target_credit,
        })
    }
}
