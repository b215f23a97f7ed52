//! The credit-worthiness network.
//!
//! Two binary causes, the ratio of debts to income and the reliability of an applicant, both
//! point into a single binary effect, the applicant's credit worthiness:
//!
//! ```text
//! debtsToIncomeRatio    reliability
//!              \          /
//!            creditWorthiness
//! ```

use crate::error::Result;
use crate::factor::Factor;
use crate::model::directed::{DirectedModel, DirectedModelBuilder};
use crate::variable::Variable;

use log::info;
use ndarray::prelude as nd;

use std::collections::HashSet;

pub const DEBTS_TO_INCOME_RATIO: &str = "debtsToIncomeRatio";
pub const RELIABILITY: &str = "reliability";
pub const CREDIT_WORTHINESS: &str = "creditWorthiness";

/// ```P(debtsToIncomeRatio)```
pub const DEBTS_TO_INCOME_RATIO_CPD: [[f64; 1]; 2] = [[0.3], [0.7]];

/// ```P(reliability)```
pub const RELIABILITY_CPD: [[f64; 1]; 2] = [[0.6664], [0.3336]];

/// ```P(creditWorthiness | debtsToIncomeRatio, reliability)```, one column per
/// ```(debtsToIncomeRatio, reliability)``` in the order (0, 0), (0, 1), (1, 0), (1, 1)
pub const CREDIT_WORTHINESS_CPD: [[f64; 4]; 2] = [
    [0.2, 0.3, 0.4, 0.5],
    [0.8, 0.7, 0.6, 0.5],
];


/// The assembled network together with handles to its `Variable`s
pub struct CreditNetwork {
    pub model: DirectedModel,
    pub debts_to_income_ratio: Variable,
    pub reliability: Variable,
    pub credit_worthiness: Variable,
}


/// Build the credit-worthiness network with all of its CPDs attached.
pub fn network() -> Result<CreditNetwork> {
    let debts_to_income_ratio = Variable::binary();
    let reliability = Variable::binary();
    let credit_worthiness = Variable::binary();

    let parents: HashSet<Variable> = vec![debts_to_income_ratio, reliability].into_iter().collect();
    let mut model = DirectedModelBuilder::new()
        .with_named_variable(&debts_to_income_ratio, DEBTS_TO_INCOME_RATIO, HashSet::new())
        .with_named_variable(&reliability, RELIABILITY, HashSet::new())
        .with_named_variable(&credit_worthiness, CREDIT_WORTHINESS, parents)
        .build()?;

    let cpd_dti = Factor::tabular_cpd(debts_to_income_ratio, nd::arr2(&DEBTS_TO_INCOME_RATIO_CPD), vec![])?;
    let cpd_r = Factor::tabular_cpd(reliability, nd::arr2(&RELIABILITY_CPD), vec![])?;
    let cpd_cw = Factor::tabular_cpd(
        credit_worthiness,
        nd::arr2(&CREDIT_WORTHINESS_CPD),
        vec![debts_to_income_ratio, reliability]
    )?;

    model.add_cpds(vec![cpd_dti, cpd_r, cpd_cw])?;
    model.check_model()?;

    info!("assembled credit-worthiness network with {} edges", model.edges().len());

    Ok(CreditNetwork { model, debts_to_income_ratio, reliability, credit_worthiness })
}
