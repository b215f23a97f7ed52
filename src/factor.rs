//! Definition of the factor module
//!
//! A `Factor` represents a relationship between some set of `Variable`s. The `Factor`s used by a
//! `DirectedModel` are tabular Conditional Probability Distributions (CPDs).

use crate::error::{NetError, Result};
use crate::variable::{Assignment, Variable};

use log::trace;
use ndarray::prelude as nd;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Alias f64 ndarray::Array as Table
pub type Table = nd::ArrayD<f64>;

/// Maximum absolute deviation from 1 tolerated for a column of a CPD
pub const NORMALIZATION_TOLERANCE: f64 = 0.01;


#[derive(Clone, Debug)]
pub struct Factor {
    /// The scope of the `Factor`. For a CPD, the last `Variable` is the one the distribution is
    /// over and the others are its parents (the evidence).
    scope: Vec<Variable>,

    /// The values of the `Factor` table. Axis `i` is indexed by the state of `scope[i]`.
    table: Table,

    /// `true`, if the `Factor` is a conditional probability distribution (i.e. is normalized)
    cpd: bool
}


impl Factor {

    /// Create a new `Factor`
    ///
    /// # Errors
    /// * `NetError::InvalidScope` if the scope is empty or holds a `Variable` twice
    /// * `NetError::General` if the table does not match the cardinalities of the scope
    /// * `NetError::General` if the table holds a NaN or infinite value
    /// * `NetError::NegativeProbability` if the table holds a negative value
    /// * `NetError::NotNormalized` if `cpd` is requested but some conditional distribution
    ///   does not sum to 1
    pub fn new(scope: Vec<Variable>, table: Table, cpd: bool) -> Result<Self> {
        if scope.is_empty() {
            return Err(NetError::InvalidScope);
        } else if scope.len() != table.ndim() {
            return Err(
                NetError::General(
                    String::from("Invalid arguments. Cardinality of scope must match number of table dimensions")
                )
            );
        }

        for (i, v) in scope.iter().enumerate() {
            if scope[..i].contains(v) {
                return Err(NetError::InvalidScope);
            }
        }

        for (v, t) in scope.iter().map(|v| v.cardinality()).zip(table.shape().iter()) {
            if v != *t {
                return Err(
                    NetError::General(
                        String::from("Invalid arguments. Dimensions do not match")
                    )
                );
            }
        }

        if table.iter().any(|v| ! v.is_finite()) {
            return Err(NetError::General(String::from("Invalid arguments. Table holds a non-finite value")));
        }

        // factors may not have negative values
        if table.iter().any(|&v| v < 0.0) {
            return Err(NetError::NegativeProbability);
        }

        let factor = Factor { scope, table, cpd };

        // verify the table represents a cpd if the caller says it does
        if cpd {
            for (column, sum) in factor.column_sums().into_iter().enumerate() {
                if (sum - 1.0).abs() > NORMALIZATION_TOLERANCE {
                    return Err(NetError::NotNormalized { column, sum });
                }
            }
        }

        Ok(factor)
    }


    /// Create a Conditional Probability Distribution ```P(var | parents)```
    ///
    /// # Args
    /// * `var`: the `Variable` the distribution is over
    /// * `parents`: the evidence `Variable`s
    /// * `table`: a table of shape ```[|parents[0]|, ..., |parents[k]|, |var|]```
    pub fn cpd(var: Variable, parents: Vec<Variable>, table: Table) -> Result<Self> {
        let mut scope = parents;
        scope.push(var);

        Factor::new(scope, table, true)
    }


    /// Create a Conditional Probability Distribution ```P(var | evidence)``` from a matrix laid
    /// out with one row per state of `var` and one column per combination of evidence states.
    /// Columns enumerate the evidence in row-major order, so the last evidence `Variable` changes
    /// fastest.
    ///
    /// A `Variable` without parents takes a single column matrix, e.g. ```[[0.3], [0.7]]```.
    ///
    /// # Errors
    /// * `NetError::InvalidShape` if the matrix is not ```|var| x prod(|evidence|)```
    /// * any error of `Factor::new`
    pub fn tabular_cpd(var: Variable, values: nd::Array2<f64>, evidence: Vec<Variable>) -> Result<Self> {
        let rows = var.cardinality();
        let cols: usize = evidence.iter().map(|v| v.cardinality()).product();

        let (r, c) = values.dim();
        if (r, c) != (rows, cols) {
            return Err(NetError::InvalidShape { expected: (rows, cols), found: (r, c) });
        }

        // the internal table keeps var on the last axis, so walk the matrix column by column
        let data: Vec<f64> = (0..cols).flat_map(|j| (0..rows).map(move |i| (i, j)))
                                      .map(|idx| values[idx])
                                      .collect();

        let mut shape: Vec<usize> = evidence.iter().map(|v| v.cardinality()).collect();
        shape.push(rows);

        let table = Table::from_shape_vec(shape, data)
            .map_err(|e| NetError::General(e.to_string()))?;

        Factor::cpd(var, evidence, table)
    }


    /// Check if the `Factor` is a Conditional Probability Distribution - i.e. if the values in the
    /// `Factor` are normalized.
    pub fn is_cpd(&self) -> bool {
        self.cpd
    }


    /// Retrieve the scope of the `Factor`.
    ///
    /// # Note
    /// This method returns a clone of the `Factor`'s scope. `Variable`'s are lightweight and
    /// therefore this is an acceptable overhead
    pub fn scope(&self) -> Vec<Variable> {
        self.scope.clone()
    }


    /// The `Variable` a CPD is defined over (the last `Variable` of the scope)
    pub fn variable(&self) -> Variable {
        self.scope[self.scope.len() - 1]
    }


    /// The evidence (parent) `Variable`s of a CPD, in table order
    pub fn evidence(&self) -> &[Variable] {
        &self.scope[..self.scope.len() - 1]
    }


    /// The values of the `Factor` as a ```|variable| x prod(|evidence|)``` matrix, the inverse of
    /// `Factor::tabular_cpd`.
    pub fn values(&self) -> nd::Array2<f64> {
        let rows = self.variable().cardinality();
        let cols = self.table.len() / rows;

        // logical (row-major) order of the table is column-major order of the matrix
        let flat: Vec<f64> = self.table.iter().cloned().collect();
        nd::Array2::from_shape_fn((rows, cols), |(i, j)| flat[j * rows + i])
    }


    /// The sum of each column of `values()`
    fn column_sums(&self) -> Vec<f64> {
        let rows = self.variable().cardinality();
        self.table.iter()
                  .cloned()
                  .collect::<Vec<f64>>()
                  .chunks(rows)
                  .map(|c| c.iter().sum())
                  .collect()
    }


    /// Retrieve the value for a complete assignment over the scope of this `Factor`
    ///
    /// # Args
    /// assignment: a full assignment to the scope of a `Factor`. The assignment's scope  may be a
    ///             superset  of the `Factor`s scope.
    ///
    /// # Errors
    /// * `NetError::IncompleteAssignment`, if assignment is not a complete assignment to the
    ///   scope of the `Factor`
    /// * `NetError::InvalidState`, if a state is out of range for its `Variable`
    pub fn value(&self, assignment: &Assignment) -> Result<f64> {
        let idx = self.index_of(&self.scope, assignment)?;
        Ok(self.table[nd::IxDyn(&idx)])
    }


    /// The distribution over the states of `variable()` given a complete assignment to the
    /// evidence.
    pub fn distribution(&self, assignment: &Assignment) -> Result<Vec<f64>> {
        if ! self.cpd {
            return Err(NetError::NotACPD);
        }

        let mut idx = self.index_of(self.evidence(), assignment)?;
        idx.push(0);
        let last = idx.len() - 1;

        Ok(
            (0..self.variable().cardinality()).map(|s| {
                idx[last] = s;
                self.table[nd::IxDyn(&idx)]
            }).collect()
        )
    }


    /// Draw a state of `variable()` from the CPD given a complete assignment to the evidence.
    ///
    /// Implementation of a single step of Koller & Friedman Algorithm 12.1
    pub fn sample_cpd<R: Rng + ?Sized>(&self, assignment: &Assignment, rng: &mut R) -> Result<usize> {
        let weights = self.distribution(assignment)?;
        let dist = WeightedIndex::new(&weights).map_err(|e| NetError::General(e.to_string()))?;
        let state = dist.sample(rng);

        trace!("sampled {} = {} from {:?}", self.variable(), state, weights);
        Ok(state)
    }


    /// Translate the states of `vars` in `assignment` into table indices
    fn index_of(&self, vars: &[Variable], assignment: &Assignment) -> Result<Vec<usize>> {
        vars.iter().map(|v| {
            let &s = assignment.get(v).ok_or(NetError::IncompleteAssignment)?;
            v.check_state(s)?;
            Ok(s)
        }).collect()
    }

}
