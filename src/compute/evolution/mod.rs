//! Evolutionary operators for variable-length linear pipelines.
//!
//! A linear pipeline individual is an ordered list of steps, each drawn from
//! one shared search space. This module provides:
//!
//! - **Step contract** (`step`): what every step and search space must offer
//! - **Individuals** (`individual`): length-bounded construction, export and identity
//! - **Mutation** (`mutation`): add, remove or mutate-in-place a step
//! - **Crossover** (`crossover`): swap steps between pipelines, or cross over
//!   steps at matching positions
//! - **Generator** (`generator`): factory binding a search space to length limits
//! - **Operator catalog** (`catalog`): a concrete search space of parameterized operators
//!
//! All randomness flows through one [`PipelineRng`] passed by the caller.
//!
//! Inner-step crossover fails with `OutOfRange` when the right-hand pipeline
//! is shorter than the left. Callers can order a flat pair by length, but
//! nested pipelines are compared again at every level, so crossing nested
//! pipelines may still fail. A failed crossover leaves both individuals as
//! they were.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use linear_pipeline_evo::compute::evolution::{
//!     LinearPipelineGenerator, OperatorCatalog, PipelineRng,
//! };
//! use linear_pipeline_evo::schema::CatalogConfig;
//!
//! let catalog = Arc::new(OperatorCatalog::new(CatalogConfig::default()).unwrap());
//! let generator = LinearPipelineGenerator::with_max_length(catalog, 5).unwrap();
//! let mut rng = PipelineRng::new(42);
//!
//! let mut a = generator.generate(&mut rng).unwrap();
//! let mut b = generator.generate(&mut rng).unwrap();
//! a.mutate(&mut rng).unwrap();
//!
//! // Inner-step crossover needs the left pipeline to be no longer than the right.
//! if a.len() > b.len() {
//!     std::mem::swap(&mut a, &mut b);
//! }
//! a.crossover(&mut b, &mut rng).unwrap();
//!
//! println!("{} => {}", a.unique_id(), a.export());
//! ```

mod catalog;
mod crossover;
mod error;
mod generator;
mod individual;
mod mutation;
mod rng;
mod step;

#[cfg(test)]
mod test_support;

pub use catalog::{OperatorCatalog, OperatorStep};
pub use crossover::CrossoverStrategy;
pub use error::{PipelineError, Result};
pub use generator::LinearPipelineGenerator;
pub use individual::{LINEAR_PIPELINE_KEY, LinearPipelineIndividual};
pub use mutation::MutationOperator;
pub use rng::PipelineRng;
pub use step::{DelegateError, SearchSpace, Step};
