//! Capability contract for pipeline steps and the search spaces that produce them.

use std::error::Error;

use crate::schema::{CanonicalKey, ExportedStage};

use super::rng::PipelineRng;

/// Error raised by a step or search space implementation.
pub type DelegateError = Box<dyn Error + Send + Sync + 'static>;

/// An evolvable unit that occupies one position of a linear pipeline.
///
/// Steps are owned by exactly one pipeline at a time; crossover may move a
/// step from one pipeline to another. `Clone` lets a failed crossover restore
/// the steps it touched.
pub trait Step: Clone {
    /// Mutate in place.
    ///
    /// `Some(true)` reports a change, `Some(false)` a no-op, `None` that the
    /// step does not report either way.
    fn mutate(&mut self, rng: &mut PipelineRng) -> Result<Option<bool>, DelegateError>;

    /// Exchange structure with another step of the same kind.
    fn crossover(&mut self, other: &mut Self, rng: &mut PipelineRng)
    -> Result<bool, DelegateError>;

    /// Executable description of this step.
    fn export(&self) -> ExportedStage;

    /// Content-derived identity of this step.
    fn unique_id(&self) -> CanonicalKey;
}

/// Generative factory for steps.
pub trait SearchSpace {
    type Step: Step;

    /// Produce a fresh random step.
    fn generate(&self, rng: &mut PipelineRng) -> Result<Self::Step, DelegateError>;
}
