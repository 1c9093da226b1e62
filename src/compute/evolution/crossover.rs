//! Structural crossover operators for linear pipelines.

use super::error::{PipelineError, Result};
use super::individual::LinearPipelineIndividual;
use super::rng::PipelineRng;
use super::step::{SearchSpace, Step};

/// Crossover strategies tried by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverStrategy {
    /// Exchange steps at unrelated positions between the two pipelines.
    SwapRandomSteps,
    /// Cross over steps that share a position.
    InnerStep,
}

impl<S: SearchSpace> LinearPipelineIndividual<S> {
    /// Try both strategies in random order; stop at the first success.
    pub fn crossover(&mut self, other: &mut Self, rng: &mut PipelineRng) -> Result<bool> {
        let mut strategies = [CrossoverStrategy::SwapRandomSteps, CrossoverStrategy::InnerStep];
        rng.shuffle(&mut strategies);

        for strategy in strategies {
            let success = match strategy {
                CrossoverStrategy::SwapRandomSteps => {
                    self.crossover_swap_random_steps(other, rng)?
                }
                CrossoverStrategy::InnerStep => self.crossover_inner_step(other, rng)?,
            };
            log::debug!("crossover strategy {strategy:?} succeeded: {success}");
            if success {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Swap `n` steps at independently chosen positions in each pipeline.
    ///
    /// `n` is 1 when half the shorter length is at most 1, otherwise it is
    /// drawn from `[1, min_len / 2)`.
    ///
    /// Lengths are conserved. All indices are drawn before anything moves.
    pub fn crossover_swap_random_steps(
        &mut self,
        other: &mut Self,
        rng: &mut PipelineRng,
    ) -> Result<bool> {
        self.ensure_non_empty()?;
        other.ensure_non_empty()?;

        let max_steps = (self.len().min(other.len()) / 2).max(1);
        let n_steps = if max_steps == 1 {
            1
        } else {
            rng.integer(1, max_steps)
        };

        let other_indices = rng.distinct_indices(other.len(), n_steps);
        let self_indices = rng.distinct_indices(self.len(), n_steps);
        log::trace!("swapping self{self_indices:?} with other{other_indices:?}");

        for (&self_idx, &other_idx) in self_indices.iter().zip(&other_indices) {
            std::mem::swap(
                &mut self.pipeline[self_idx],
                &mut other.pipeline[other_idx],
            );
        }

        Ok(true)
    }

    /// Swap exactly one step at a shared index drawn from `[1, len)`.
    ///
    /// Requires equal lengths of at least two; reports `false` otherwise.
    /// Index 0 is never swapped. Not used by [`Self::crossover`].
    pub fn crossover_swap_single_step(
        &mut self,
        other: &mut Self,
        rng: &mut PipelineRng,
    ) -> bool {
        if self.len() != other.len() || self.len() < 2 {
            return false;
        }

        let idx = rng.integer(1, self.len());
        std::mem::swap(&mut self.pipeline[idx], &mut other.pipeline[idx]);
        true
    }

    /// Visit each position of `self` with probability
    /// `inner_crossover_probability` and cross over the two steps there.
    ///
    /// Fails with `OutOfRange` before touching anything if `other` is shorter
    /// than `self`. Positions are selected before any step is crossed; if a
    /// step crossover fails, every selected position in both pipelines is
    /// restored before the error is returned. Reports `true` if any step
    /// crossover succeeded.
    pub fn crossover_inner_step(
        &mut self,
        other: &mut Self,
        rng: &mut PipelineRng,
    ) -> Result<bool> {
        if other.len() < self.len() {
            return Err(PipelineError::OutOfRange {
                index: other.len(),
                len: other.len(),
            });
        }

        let probability = self.config().inner_crossover_probability;
        let selected: Vec<usize> = (0..self.len()).filter(|_| rng.chance(probability)).collect();
        let snapshot: Vec<(S::Step, S::Step)> = selected
            .iter()
            .map(|&idx| (self.pipeline[idx].clone(), other.pipeline[idx].clone()))
            .collect();

        let mut success = false;
        for &idx in &selected {
            match self.pipeline[idx].crossover(&mut other.pipeline[idx], rng) {
                Ok(crossed) => success |= crossed,
                Err(err) => {
                    for (&pos, (mine, theirs)) in selected.iter().zip(snapshot) {
                        self.pipeline[pos] = mine;
                        other.pipeline[pos] = theirs;
                    }
                    log::debug!("inner-step crossover failed at position {idx}; restored");
                    return Err(err.into());
                }
            }
        }

        Ok(success)
    }
}
