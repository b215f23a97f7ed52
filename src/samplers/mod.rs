//! Defines the `Sampler` trait - an object that can randomly sample from a `Model`.

use crate::error::Result;
use crate::variable::Assignment;

pub mod forward;

pub use self::forward::ForwardSampler;

pub trait Sampler {

    /// Sample a full `Assignment` from the associated `Model`.
    fn sample(&mut self) -> Result<Assignment>;

    /// Draw `n` samples from the associated `Model`.
    fn sample_n(&mut self, n: usize) -> Result<Vec<Assignment>> {
        (0..n).map(|_| self.sample()).collect()
    }

}
