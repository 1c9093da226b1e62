//! Factory for linear pipeline individuals.

use std::sync::Arc;

use crate::schema::{ConfigError, LinearPipelineConfig};

use super::error::Result;
use super::individual::LinearPipelineIndividual;
use super::rng::PipelineRng;
use super::step::{DelegateError, SearchSpace};

/// Produces independent linear pipelines over one shared search space.
pub struct LinearPipelineGenerator<S: SearchSpace> {
    search_space: Arc<S>,
    config: LinearPipelineConfig,
}

impl<S: SearchSpace> LinearPipelineGenerator<S> {
    /// Create a generator, validating the configuration up front.
    pub fn new(
        search_space: Arc<S>,
        config: LinearPipelineConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        if config.initial_length_limit() < config.max_length - 1 {
            log::warn!(
                "initial pipelines are capped at {} steps although max_length is {}",
                config.initial_length_limit(),
                config.max_length
            );
        }

        Ok(Self {
            search_space,
            config,
        })
    }

    /// Generator with the given maximum length and default settings.
    pub fn with_max_length(
        search_space: Arc<S>,
        max_length: usize,
    ) -> std::result::Result<Self, ConfigError> {
        Self::new(search_space, LinearPipelineConfig::with_max_length(max_length))
    }

    /// Build a new random individual.
    pub fn generate(&self, rng: &mut PipelineRng) -> Result<LinearPipelineIndividual<S>> {
        LinearPipelineIndividual::generate(
            Arc::clone(&self.search_space),
            self.config.clone(),
            rng,
        )
    }

    pub fn config(&self) -> &LinearPipelineConfig {
        &self.config
    }

    pub fn search_space(&self) -> &Arc<S> {
        &self.search_space
    }
}

impl<S: SearchSpace> Clone for LinearPipelineGenerator<S> {
    fn clone(&self) -> Self {
        Self {
            search_space: Arc::clone(&self.search_space),
            config: self.config.clone(),
        }
    }
}

impl<S: SearchSpace> SearchSpace for LinearPipelineGenerator<S> {
    type Step = LinearPipelineIndividual<S>;

    fn generate(&self, rng: &mut PipelineRng) -> std::result::Result<Self::Step, DelegateError> {
        Ok(LinearPipelineGenerator::generate(self, rng)?)
    }
}
