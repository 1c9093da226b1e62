//! Executable pipeline descriptions produced by individuals.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One stage of an exported pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExportedStage {
    /// A single configured operator.
    Operator {
        name: String,
        #[serde(default)]
        params: BTreeMap<String, f64>,
    },
    /// A nested sequential pipeline.
    Pipeline(ExportedPipeline),
}

/// Sequential composition of stages: each stage's output feeds the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportedPipeline {
    /// Stages in execution order.
    pub stages: Vec<ExportedStage>,
}

impl ExportedPipeline {
    /// Chain the given stages in order.
    pub fn sequential<I>(stages: I) -> Self
    where
        I: IntoIterator<Item = ExportedStage>,
    {
        Self {
            stages: stages.into_iter().collect(),
        }
    }

    /// Number of stages.
    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Iterate stages in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &ExportedStage> {
        self.stages.iter()
    }
}

impl fmt::Display for ExportedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator { name, params } => {
                f.write_str(name)?;
                if !params.is_empty() {
                    f.write_str("(")?;
                    for (i, (key, value)) in params.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{key}={value:.4}")?;
                    }
                    f.write_str(")")?;
                }
                Ok(())
            }
            Self::Pipeline(inner) => write!(f, "[{inner}]"),
        }
    }
}

impl fmt::Display for ExportedPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}
