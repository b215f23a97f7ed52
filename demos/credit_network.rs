//! Provides an example of how to declare a Bayesian Network, attach tabular CPDs and sample
//! from it, using the credit-worthiness network.

extern crate creditnet;
extern crate ndarray;

use creditnet as c;
use c::credit::{self, CREDIT_WORTHINESS, DEBTS_TO_INCOME_RATIO, RELIABILITY};
use c::{Model, Sampler};
use ndarray::arr2;
use std::collections::HashSet;

fn main() -> c::Result<()> {

    ///////////////////////////////////////////////////
    // Step 1: Define variables and the structure
    let dti = c::Variable::binary();
    let reliability = c::Variable::binary();
    let worthiness = c::Variable::binary();

    let mut model = c::DirectedModelBuilder::new()
        .with_named_variable(&dti, DEBTS_TO_INCOME_RATIO, HashSet::new())
        .with_named_variable(&reliability, RELIABILITY, HashSet::new())
        .with_named_variable(&worthiness, CREDIT_WORTHINESS, vec![dti, reliability].into_iter().collect())
        .build()?;

    ///////////////////////////////////////////////////
    // Step 2: Build and attach the CPDs
    let cpd_dti = c::Factor::tabular_cpd(dti, arr2(&credit::DEBTS_TO_INCOME_RATIO_CPD), vec![])?;
    let cpd_r = c::Factor::tabular_cpd(reliability, arr2(&credit::RELIABILITY_CPD), vec![])?;
    let cpd_cw = c::Factor::tabular_cpd(
        worthiness,
        arr2(&credit::CREDIT_WORTHINESS_CPD),
        vec![dti, reliability]
    )?;

    model.add_cpds(vec![cpd_dti, cpd_r, cpd_cw])?;

    ///////////////////////////////////////////////////
    // Step 3: Determine Probability of Assignments
    let scope = model.topological_order();

    let mut acc = 0.0;
    for assignment in c::all_assignments(&scope) {
        let p = model.probability(&assignment)?;

        println!("P({}) = {:.4}", c::render::text_line(&model, &assignment)?, p);
        acc += p;
    }

    println!("---------------------------------------------");
    println!("TOTAL: {:.4}", acc);

    ///////////////////////////////////////////////////
    // Step 4: Sample
    let mut sampler = c::ForwardSampler::with_seed(&model, 17)?;
    for sample in sampler.sample_n(5)? {
        println!("{}", c::render::text_line(&model, &sample)?);
    }

    Ok(())
}
