//! Labeled marker steps for exercising pipeline operators in tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::schema::{CanonicalKey, ExportedStage, LinearPipelineConfig};

use super::individual::LinearPipelineIndividual;
use super::rng::PipelineRng;
use super::step::{DelegateError, SearchSpace, Step};

/// Step identified only by its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub draw: u64,
    pub mutations: usize,
    pub crossovers: usize,
    pub fail: bool,
}

impl Marker {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            draw: 0,
            mutations: 0,
            crossovers: 0,
            fail: false,
        }
    }

    pub fn failing(label: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(label)
        }
    }
}

impl Step for Marker {
    fn mutate(&mut self, rng: &mut PipelineRng) -> Result<Option<bool>, DelegateError> {
        if self.fail {
            return Err(format!("marker {} refused to mutate", self.label).into());
        }
        self.draw = rng.next_seed();
        self.mutations += 1;
        Ok(Some(true))
    }

    fn crossover(
        &mut self,
        other: &mut Self,
        _rng: &mut PipelineRng,
    ) -> Result<bool, DelegateError> {
        if self.fail || other.fail {
            return Err("marker crossover failed".into());
        }
        std::mem::swap(&mut self.draw, &mut other.draw);
        self.crossovers += 1;
        other.crossovers += 1;
        Ok(true)
    }

    fn export(&self) -> ExportedStage {
        ExportedStage::Operator {
            name: self.label.clone(),
            params: BTreeMap::new(),
        }
    }

    fn unique_id(&self) -> CanonicalKey {
        CanonicalKey::from(self.label.as_str())
    }
}

/// Search space that always produces markers with the same label.
#[derive(Debug)]
pub struct MarkerSpace {
    label: String,
}

impl MarkerSpace {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
        }
    }
}

impl SearchSpace for MarkerSpace {
    type Step = Marker;

    fn generate(&self, rng: &mut PipelineRng) -> Result<Marker, DelegateError> {
        Ok(Marker {
            draw: rng.next_seed(),
            ..Marker::new(&self.label)
        })
    }
}

/// Individual holding one marker per label, in order.
pub fn individual(labels: &[&str], max_length: usize) -> LinearPipelineIndividual<MarkerSpace> {
    LinearPipelineIndividual::from_steps(
        Arc::new(MarkerSpace::new("S")),
        LinearPipelineConfig::with_max_length(max_length),
        labels.iter().map(|label| Marker::new(label)).collect(),
    )
    .unwrap()
}

/// Labels of an individual's steps, in order.
pub fn labels(ind: &LinearPipelineIndividual<MarkerSpace>) -> Vec<String> {
    ind.steps().iter().map(|m| m.label.clone()).collect()
}
