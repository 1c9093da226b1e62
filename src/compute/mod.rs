//! Compute module - Evolutionary operators for linear pipelines.

pub mod evolution;

pub use evolution::{
    LinearPipelineGenerator, LinearPipelineIndividual, PipelineError, PipelineRng, SearchSpace,
    Step,
};
