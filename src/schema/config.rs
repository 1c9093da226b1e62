//! Configuration types for linear pipeline search spaces.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Minimum number of steps in any linear pipeline.
pub const MIN_PIPELINE_LENGTH: usize = 1;

fn default_initial_length_cap() -> Option<usize> {
    Some(3)
}

fn default_inner_crossover_probability() -> f64 {
    0.5
}

fn default_mutation_strength() -> f64 {
    0.1
}

/// Structural limits for variable-length linear pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPipelineConfig {
    /// Upper structural bound on pipeline length.
    ///
    /// Freshly generated pipelines sample their length from
    /// `[MIN_PIPELINE_LENGTH, max_length)`, so `max_length` itself is only
    /// reachable through add-mutations.
    pub max_length: usize,
    /// Clamp applied to the sampled length of freshly generated pipelines.
    /// `None` disables the clamp.
    #[serde(default = "default_initial_length_cap")]
    pub initial_length_cap: Option<usize>,
    /// Probability that inner-step crossover visits a given position.
    #[serde(default = "default_inner_crossover_probability")]
    pub inner_crossover_probability: f64,
}

impl Default for LinearPipelineConfig {
    fn default() -> Self {
        Self {
            max_length: 5,
            initial_length_cap: default_initial_length_cap(),
            inner_crossover_probability: default_inner_crossover_probability(),
        }
    }
}

impl LinearPipelineConfig {
    /// Config with the given maximum length and default everything else.
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            ..Default::default()
        }
    }

    /// Largest length a freshly generated pipeline can have.
    #[inline]
    pub fn initial_length_limit(&self) -> usize {
        let limit = self.max_length.saturating_sub(1);
        match self.initial_length_cap {
            Some(cap) => limit.min(cap),
            None => limit,
        }
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length <= MIN_PIPELINE_LENGTH {
            return Err(ConfigError::MaxLengthTooSmall {
                max_length: self.max_length,
                min_length: MIN_PIPELINE_LENGTH,
            });
        }
        if self.initial_length_cap == Some(0) {
            return Err(ConfigError::InvalidLengthCap);
        }
        if !(0.0..=1.0).contains(&self.inner_crossover_probability) {
            return Err(ConfigError::InvalidProbability(
                self.inner_crossover_probability,
            ));
        }
        Ok(())
    }
}

/// A single tunable parameter of a catalog operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name.
    pub name: String,
    /// Inclusive (min, max) bounds.
    pub bounds: (f64, f64),
}

/// An operator that can appear as a pipeline step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorSpec {
    /// Operator name, used in exports and unique keys.
    pub name: String,
    /// Tunable parameters.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl OperatorSpec {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, params: Vec<ParamSpec>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

impl ParamSpec {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            bounds: (min, max),
        }
    }
}

/// Catalog of operators a step can be drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Available operators.
    pub operators: Vec<OperatorSpec>,
    /// Mutation strength relative to each parameter's range.
    #[serde(default = "default_mutation_strength")]
    pub mutation_strength: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            operators: vec![
                OperatorSpec::new("StandardScaler", Vec::new()),
                OperatorSpec::new("PCA", vec![ParamSpec::new("variance", 0.5, 1.0)]),
                OperatorSpec::new(
                    "SelectPercentile",
                    vec![ParamSpec::new("percentile", 1.0, 100.0)],
                ),
                OperatorSpec::new(
                    "Nystroem",
                    vec![
                        ParamSpec::new("gamma", 0.0, 1.0),
                        ParamSpec::new("components", 1.0, 11.0),
                    ],
                ),
            ],
            mutation_strength: default_mutation_strength(),
        }
    }
}

impl CatalogConfig {
    /// Validate catalog contents.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.operators.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, op) in self.operators.iter().enumerate() {
            if self.operators[..i].iter().any(|o| o.name == op.name) {
                return Err(ConfigError::DuplicateOperator(op.name.clone()));
            }
            for param in &op.params {
                let (lo, hi) = param.bounds;
                if !lo.is_finite() || !hi.is_finite() {
                    return Err(ConfigError::InvalidBounds(format!(
                        "{}.{} bounds ({}, {}) must be finite",
                        op.name, param.name, lo, hi
                    )));
                }
                if lo > hi {
                    return Err(ConfigError::InvalidBounds(format!(
                        "{}.{} min ({}) > max ({})",
                        op.name, param.name, lo, hi
                    )));
                }
            }
        }
        if self.mutation_strength.is_nan() || self.mutation_strength < 0.0 {
            return Err(ConfigError::InvalidBounds(format!(
                "mutation_strength {} must be non-negative",
                self.mutation_strength
            )));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("max_length ({max_length}) must be greater than min_length ({min_length})")]
    MaxLengthTooSmall { max_length: usize, min_length: usize },
    #[error("Initial length cap must be non-zero")]
    InvalidLengthCap,
    #[error("Probability {0} must be within [0, 1]")]
    InvalidProbability(f64),
    #[error("Operator catalog is empty")]
    EmptyCatalog,
    #[error("Operator {0} is listed more than once")]
    DuplicateOperator(String),
    #[error("Invalid parameter bounds: {0}")]
    InvalidBounds(String),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
