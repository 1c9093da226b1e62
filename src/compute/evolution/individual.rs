//! Variable-length linear pipeline individuals.

use std::fmt;
use std::sync::Arc;

use crate::schema::{
    CanonicalKey, ExportedPipeline, ExportedStage, LinearPipelineConfig, MIN_PIPELINE_LENGTH,
};

use super::error::{PipelineError, Result};
use super::rng::PipelineRng;
use super::step::{DelegateError, SearchSpace, Step};

/// Leading component of every linear pipeline key.
pub const LINEAR_PIPELINE_KEY: &str = "LinearPipeline";

/// An ordered, variable-length list of steps drawn from one search space.
///
/// The individual exclusively owns its steps and is mutated in place.
/// Copies must be made explicitly with `clone`.
pub struct LinearPipelineIndividual<S: SearchSpace> {
    search_space: Arc<S>,
    config: LinearPipelineConfig,
    pub(super) pipeline: Vec<S::Step>,
}

impl<S: SearchSpace> LinearPipelineIndividual<S> {
    /// Generate a random individual.
    ///
    /// The length is drawn from `[MIN_PIPELINE_LENGTH, max_length)` and then
    /// clamped to `initial_length_cap`; one step is generated per position.
    pub fn generate(
        search_space: Arc<S>,
        config: LinearPipelineConfig,
        rng: &mut PipelineRng,
    ) -> Result<Self> {
        config.validate()?;

        let mut length = rng.integer(MIN_PIPELINE_LENGTH, config.max_length);
        if let Some(cap) = config.initial_length_cap {
            length = length.min(cap);
        }

        let pipeline = (0..length)
            .map(|_| search_space.generate(rng))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        log::trace!(
            "generated linear pipeline of length {} (max_length {})",
            length,
            config.max_length
        );

        Ok(Self {
            search_space,
            config,
            pipeline,
        })
    }

    /// Build an individual from explicit steps.
    ///
    /// The step count must lie in `[MIN_PIPELINE_LENGTH, max_length]`.
    pub fn from_steps(
        search_space: Arc<S>,
        config: LinearPipelineConfig,
        steps: Vec<S::Step>,
    ) -> Result<Self> {
        config.validate()?;
        if steps.len() < MIN_PIPELINE_LENGTH || steps.len() > config.max_length {
            return Err(PipelineError::LengthLimit {
                len: steps.len(),
                min_length: MIN_PIPELINE_LENGTH,
                max_length: config.max_length,
            });
        }
        Ok(Self {
            search_space,
            config,
            pipeline: steps,
        })
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.pipeline.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pipeline.is_empty()
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[S::Step] {
        &self.pipeline
    }

    #[inline]
    pub fn min_length(&self) -> usize {
        MIN_PIPELINE_LENGTH
    }

    #[inline]
    pub fn max_length(&self) -> usize {
        self.config.max_length
    }

    pub fn config(&self) -> &LinearPipelineConfig {
        &self.config
    }

    /// The search space new steps are drawn from.
    pub fn search_space(&self) -> &Arc<S> {
        &self.search_space
    }

    /// Sequential composition of every step's export, in pipeline order.
    pub fn export(&self) -> ExportedPipeline {
        ExportedPipeline::sequential(self.pipeline.iter().map(Step::export))
    }

    /// Order-sensitive identity: the pipeline marker followed by each step's key.
    pub fn unique_id(&self) -> CanonicalKey {
        let mut parts = Vec::with_capacity(self.pipeline.len() + 1);
        parts.push(CanonicalKey::from(LINEAR_PIPELINE_KEY));
        parts.extend(self.pipeline.iter().map(Step::unique_id));
        CanonicalKey::Tuple(parts)
    }

    /// Fail with `OutOfRange` if the pipeline has no steps.
    pub(super) fn ensure_non_empty(&self) -> Result<()> {
        if self.pipeline.is_empty() {
            return Err(PipelineError::OutOfRange { index: 0, len: 0 });
        }
        Ok(())
    }
}

impl<S: SearchSpace> Clone for LinearPipelineIndividual<S> {
    fn clone(&self) -> Self {
        Self {
            search_space: Arc::clone(&self.search_space),
            config: self.config.clone(),
            pipeline: self.pipeline.clone(),
        }
    }
}

impl<S> fmt::Debug for LinearPipelineIndividual<S>
where
    S: SearchSpace,
    S::Step: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearPipelineIndividual")
            .field("max_length", &self.config.max_length)
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

// Linear pipelines nest: a whole pipeline can be one step of an outer one.
//
// Nested crossover delegates to the dispatcher, whose inner-step strategy
// rejects a shorter right-hand pipeline. Ordering the outer pipelines does not
// order their nested ones, so outer inner-step crossover can fail with the
// nested `OutOfRange`; the outer pair is restored when it does.
impl<S: SearchSpace> Step for LinearPipelineIndividual<S> {
    fn mutate(
        &mut self,
        rng: &mut PipelineRng,
    ) -> std::result::Result<Option<bool>, DelegateError> {
        Ok(LinearPipelineIndividual::mutate(self, rng)?)
    }

    fn crossover(
        &mut self,
        other: &mut Self,
        rng: &mut PipelineRng,
    ) -> std::result::Result<bool, DelegateError> {
        Ok(LinearPipelineIndividual::crossover(self, other, rng)?)
    }

    fn export(&self) -> ExportedStage {
        ExportedStage::Pipeline(LinearPipelineIndividual::export(self))
    }

    fn unique_id(&self) -> CanonicalKey {
        LinearPipelineIndividual::unique_id(self)
    }
}
