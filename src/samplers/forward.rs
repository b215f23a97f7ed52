//! Defines a simple forward sampler for Bayesian `Model`s
//!
//! Implementation of Koller & Friedman Algorithm 12.1 (pp 489)

use crate::error::Result;
use crate::model::directed::DirectedModel;
use crate::variable::Assignment;
use super::Sampler;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A simple `Sampler` for Bayesian Models that draws every `Variable` in topological order from
/// its CPD given the states already drawn for its parents.
pub struct ForwardSampler<'a, R: Rng = StdRng> {

    /// The `DirectedModel` to sample
    model: &'a DirectedModel,

    /// The source of randomness
    rng: R
}


impl<'a> ForwardSampler<'a, StdRng> {

    /// Construct a `ForwardSampler` seeded from operating system entropy.
    ///
    /// # Errors
    /// if the model is incomplete, see `DirectedModel::check_model`
    pub fn new(model: &'a DirectedModel) -> Result<Self> {
        ForwardSampler::with_rng(model, StdRng::from_entropy())
    }

    /// Construct a `ForwardSampler` that produces a reproducible sequence of samples.
    pub fn with_seed(model: &'a DirectedModel, seed: u64) -> Result<Self> {
        debug!("seeding forward sampler with {}", seed);
        ForwardSampler::with_rng(model, StdRng::seed_from_u64(seed))
    }
}


impl<'a, R: Rng> ForwardSampler<'a, R> {

    /// Construct a `ForwardSampler` drawing from `rng`.
    pub fn with_rng(model: &'a DirectedModel, rng: R) -> Result<Self> {
        model.check_model()?;
        Ok(ForwardSampler { model, rng })
    }

    fn get_sample(&mut self) -> Result<Assignment> {
        let mut a = Assignment::new();

        for var in self.model.topological_order().iter() {
            // check_model guarantees a CPD for every variable, and iterating in topological
            // order means every parent is already assigned
            let cpd = self.model.cpd_or_err(var)?;
            let state = cpd.sample_cpd(&a, &mut self.rng)?;
            a.set(var, state);
        }

        Ok(a)
    }
}

impl<'a, R: Rng> Sampler for ForwardSampler<'a, R> {

    fn sample(&mut self) -> Result<Assignment> {
        self.get_sample()
    }

}
