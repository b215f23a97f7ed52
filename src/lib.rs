//! A small library for discrete Bayesian networks, and the credit-worthiness network built
//! with it.

pub mod error;
pub mod variable;
pub mod factor;
pub mod model;
pub mod samplers;
pub mod render;
pub mod credit;

pub use error::{NetError, Result};
pub use factor::{Factor, Table};
pub use model::Model;
pub use model::directed::{DirectedModel, DirectedModelBuilder};
pub use samplers::{ForwardSampler, Sampler};
pub use variable::{all_assignments, Assignment, Variable};
