//! Linear pipelines - Variable-length composite individuals for evolutionary pipeline search.
//!
//! This crate provides a candidate representation for genetic-programming
//! style searches over sequential processing pipelines. An individual is an
//! ordered list of steps drawn from one search space; it can be generated
//! within length limits, mutated, crossed over with another individual,
//! exported as a sequential pipeline, and identified by a canonical key.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, canonical keys and exported pipeline descriptions
//! - `compute`: Evolutionary operators (step contract, individuals, generator)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use linear_pipeline_evo::{
//!     compute::evolution::OperatorCatalog,
//!     schema::{CatalogConfig, LinearPipelineConfig},
//!     LinearPipelineGenerator, PipelineRng,
//! };
//!
//! // Search space and structural limits
//! let catalog = Arc::new(OperatorCatalog::new(CatalogConfig::default())?);
//! let config = LinearPipelineConfig::with_max_length(6);
//! let generator = LinearPipelineGenerator::new(catalog, config)?;
//!
//! // One seeded generator drives every operator
//! let mut rng = PipelineRng::new(42);
//! let mut parent = generator.generate(&mut rng)?;
//! let mut child = parent.clone();
//! child.crossover(&mut parent, &mut rng)?;
//! child.mutate(&mut rng)?;
//!
//! println!("{}", child.export());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{
    LinearPipelineGenerator, LinearPipelineIndividual, PipelineError, PipelineRng, SearchSpace,
    Step,
};
pub use schema::{CanonicalKey, ExportedPipeline, ExportedStage, LinearPipelineConfig};
