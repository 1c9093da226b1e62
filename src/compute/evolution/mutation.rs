//! Structural mutation operators for linear pipelines.

use crate::schema::MIN_PIPELINE_LENGTH;

use super::error::{PipelineError, Result};
use super::individual::LinearPipelineIndividual;
use super::rng::PipelineRng;
use super::step::{SearchSpace, Step};

/// Mutation operators the dispatcher chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOperator {
    /// Delete one step.
    Remove,
    /// Insert one freshly generated step.
    Add,
    /// Mutate one existing step in place.
    Step,
}

impl<S: SearchSpace> LinearPipelineIndividual<S> {
    /// Operators legal at the current length.
    ///
    /// `Step` is always legal; `Remove` needs a step to spare and `Add`
    /// needs room below `max_length`.
    pub fn legal_mutations(&self) -> Vec<MutationOperator> {
        let mut options = Vec::with_capacity(3);
        if self.len() > self.min_length() {
            options.push(MutationOperator::Remove);
        }
        if self.len() < self.max_length() {
            options.push(MutationOperator::Add);
        }
        options.push(MutationOperator::Step);
        options
    }

    /// Apply one legal mutation operator chosen uniformly at random.
    ///
    /// Add and remove report `Some(true)`; a step mutation returns the
    /// step's own result.
    pub fn mutate(&mut self, rng: &mut PipelineRng) -> Result<Option<bool>> {
        let options = self.legal_mutations();
        let operator = options[rng.index(options.len())];
        log::debug!(
            "mutating pipeline of length {} with {:?} (legal: {:?})",
            self.len(),
            operator,
            options
        );

        match operator {
            MutationOperator::Remove => self.mutate_remove(rng).map(|()| Some(true)),
            MutationOperator::Add => self.mutate_add(rng).map(|()| Some(true)),
            MutationOperator::Step => self.mutate_step(rng),
        }
    }

    /// Insert a freshly generated step before a random existing position.
    ///
    /// The insertion index is drawn from `[0, len)`, so a new step never
    /// lands after the current last step.
    pub fn mutate_add(&mut self, rng: &mut PipelineRng) -> Result<()> {
        self.ensure_non_empty()?;
        if self.len() >= self.max_length() {
            return Err(PipelineError::LengthLimit {
                len: self.len(),
                min_length: MIN_PIPELINE_LENGTH,
                max_length: self.max_length(),
            });
        }

        let step = self.search_space().generate(rng)?;
        let idx = rng.index(self.len());
        log::trace!("inserting step at {idx}");
        self.pipeline.insert(idx, step);
        Ok(())
    }

    /// Remove a random step. The removed step is dropped.
    pub fn mutate_remove(&mut self, rng: &mut PipelineRng) -> Result<()> {
        if self.len() <= self.min_length() {
            return Err(PipelineError::LengthLimit {
                len: self.len(),
                min_length: MIN_PIPELINE_LENGTH,
                max_length: self.max_length(),
            });
        }

        let idx = rng.index(self.len());
        log::trace!("removing step at {idx}");
        self.pipeline.remove(idx);
        Ok(())
    }

    /// Mutate one randomly chosen step in place and return its result.
    pub fn mutate_step(&mut self, rng: &mut PipelineRng) -> Result<Option<bool>> {
        self.ensure_non_empty()?;
        let idx = rng.index(self.len());
        log::trace!("mutating step at {idx}");
        Ok(self.pipeline[idx].mutate(rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::test_support::{individual, labels};

    #[test]
    fn test_full_pipeline_excludes_add() {
        let ind = individual(&["A", "B", "C"], 3);
        assert_eq!(
            ind.legal_mutations(),
            vec![MutationOperator::Remove, MutationOperator::Step]
        );
    }

    #[test]
    fn test_single_step_excludes_remove() {
        let ind = individual(&["A"], 3);
        assert_eq!(
            ind.legal_mutations(),
            vec![MutationOperator::Add, MutationOperator::Step]
        );
    }

    #[test]
    fn test_mutate_respects_bounds() {
        let mut rng = PipelineRng::new(42);
        let mut ind = individual(&["A", "B"], 4);

        for _ in 0..500 {
            ind.mutate(&mut rng).unwrap();
            assert!(ind.len() >= 1);
            assert!(ind.len() <= 4);
        }
    }

    #[test]
    fn test_add_inserts_before_existing_position() {
        let mut rng = PipelineRng::new(11);
        for _ in 0..100 {
            let mut ind = individual(&["A", "B"], 10);
            ind.mutate_add(&mut rng).unwrap();
            assert_eq!(ind.len(), 3);
            // The last step never moves.
            assert_eq!(labels(&ind).last().map(String::as_str), Some("B"));
        }
    }

    #[test]
    fn test_add_at_max_length_fails() {
        let mut rng = PipelineRng::new(0);
        let mut ind = individual(&["A", "B"], 2);
        assert!(matches!(
            ind.mutate_add(&mut rng),
            Err(PipelineError::LengthLimit { len: 2, .. })
        ));
        assert_eq!(labels(&ind), ["A", "B"]);
    }

    #[test]
    fn test_remove_at_min_length_fails() {
        let mut rng = PipelineRng::new(0);
        let mut ind = individual(&["A"], 4);
        assert!(matches!(
            ind.mutate_remove(&mut rng),
            Err(PipelineError::LengthLimit { len: 1, .. })
        ));
        assert_eq!(ind.len(), 1);
    }

    #[test]
    fn test_remove_drops_one_step() {
        let mut rng = PipelineRng::new(3);
        let mut ind = individual(&["A", "B", "C"], 4);
        ind.mutate_remove(&mut rng).unwrap();
        let remaining = labels(&ind);
        assert_eq!(remaining.len(), 2);
        assert!(remaining.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_mutate_step_delegates() {
        let mut rng = PipelineRng::new(8);
        let mut ind = individual(&["A", "B"], 4);
        assert_eq!(ind.mutate_step(&mut rng).unwrap(), Some(true));
        let total: usize = ind.steps().iter().map(|m| m.mutations).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_mutate_step_propagates_failure() {
        use crate::compute::evolution::test_support::{Marker, MarkerSpace};
        use crate::schema::LinearPipelineConfig;
        use std::sync::Arc;

        let mut rng = PipelineRng::new(8);
        let mut ind = LinearPipelineIndividual::from_steps(
            Arc::new(MarkerSpace::new("S")),
            LinearPipelineConfig::with_max_length(4),
            vec![Marker::failing("X")],
        )
        .unwrap();
        assert!(matches!(
            ind.mutate_step(&mut rng),
            Err(PipelineError::Delegate(_))
        ));
    }
}
