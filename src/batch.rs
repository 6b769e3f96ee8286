//! Sequential batch builds that stop at the first failing specification.

use crate::curriculum::CurriculumBuilder;
use crate::error::{BatchError, BuildError};
use crate::record::Curriculum;
use crate::specification::CurriculumSpecification;

/// Where and why a batch stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAbort {
    pub index: usize,
    pub spec_id: String,
    pub error: BuildError,
}

/// Records built before any failure, plus the failure itself if one occurred.
#[derive(Debug)]
pub struct BatchReport {
    pub curricula: Vec<Curriculum>,
    pub aborted: Option<BatchAbort>,
}

impl BatchReport {
    pub fn completed(&self) -> usize {
        self.curricula.len()
    }

    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }

    /// Collapse into the curricula, or the abort as a [`BatchError`].
    pub fn into_result(self) -> Result<Vec<Curriculum>, BatchError> {
        match self.aborted {
            None => Ok(self.curricula),
            Some(abort) => Err(BatchError {
                completed: self.curricula.len(),
                spec_id: abort.spec_id,
                source: abort.error,
            }),
        }
    }
}

/// Build `specs` in order. The first failure ends the batch; later
/// specifications are not attempted.
pub fn run_batch(builder: &CurriculumBuilder<'_>, specs: &[CurriculumSpecification]) -> BatchReport {
    let mut curricula = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        match builder.build(spec) {
            Ok(curriculum) => curricula.push(curriculum),
            Err(error) => {
                tracing::error!(
                    curriculum = %spec.id,
                    completed = curricula.len(),
                    %error,
                    "batch aborted"
                );
                return BatchReport {
                    curricula,
                    aborted: Some(BatchAbort {
                        index,
                        spec_id: spec.id.clone(),
                        error,
                    }),
                };
            }
        }
    }
    BatchReport {
        curricula,
        aborted: None,
    }
}
