//! Definition of the variable module
//!
//! A `Variable` represents a discrete random variable in a Probabilistic Graphical Model. An
//! `Assignment` maps `Variable`s to the index of one of their states.

use crate::error::{NetError, Result};

use itertools::Itertools;

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A discrete random variable.
///
/// `Variable`s are lightweight handles: two `Variable`s are equal only if one is a copy of the
/// other. Human readable names are attached by the model that holds the `Variable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    /// Process-unique identifier
    id: usize,

    /// The number of states. The states are tagged `0..cardinality`
    cardinality: usize
}

impl Variable {

    /// Construct a new binary `Variable`
    pub fn binary() -> Self {
        Variable::discrete(2)
    }

    /// Construct a new discrete `Variable` with `cardinality` states
    ///
    /// # Panics
    /// if `cardinality` is zero
    pub fn discrete(cardinality: usize) -> Self {
        assert!(cardinality > 0, "a Variable must have at least one state");

        Variable {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            cardinality
        }
    }

    /// The number of states of this `Variable`
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Check that `state` is a valid state of this `Variable`
    pub fn check_state(&self, state: usize) -> Result<()> {
        if state < self.cardinality {
            Ok(())
        } else {
            Err(NetError::InvalidState { state, cardinality: self.cardinality })
        }
    }
}

impl fmt::Display for Variable {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "X{}", self.id)
    }

}


/// A (partial or total) assignment of states to `Variable`s
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    values: HashMap<Variable, usize>
}

impl Assignment {

    pub fn new() -> Self {
        Assignment { values: HashMap::new() }
    }

    /// Assign `state` to `var`, replacing any previous value
    pub fn set(&mut self, var: &Variable, state: usize) {
        self.values.insert(*var, state);
    }

    pub fn get(&self, var: &Variable) -> Option<&usize> {
        self.values.get(var)
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.values.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}


/// Enumerate every total assignment to `scope`.
///
/// Assignments are produced in row-major order: the last `Variable` in `scope` changes fastest.
/// An empty scope has exactly one (empty) assignment.
pub fn all_assignments(scope: &[Variable]) -> impl Iterator<Item = Assignment> {
    let assignments: Vec<Assignment> = if scope.is_empty() {
        vec![Assignment::new()]
    } else {
        let scope = scope.to_vec();
        scope.iter()
             .map(|v| 0..v.cardinality())
             .multi_cartesian_product()
             .map(|states| {
                 let mut a = Assignment::new();
                 for (v, s) in scope.iter().zip(states) {
                     a.set(v, s);
                 }
                 a
             })
             .collect()
    };

    assignments.into_iter()
}


// Unit Tests for the Variable module.
#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn binary() {
        let var = Variable::binary();
        assert_eq!(var.cardinality(), 2);
        assert!(var.check_state(1).is_ok());
        assert_eq!(
            var.check_state(2),
            Err(NetError::InvalidState { state: 2, cardinality: 2 })
        );
    }

    #[test]
    fn distinct() {
        let a = Variable::discrete(3);
        let b = Variable::discrete(3);
        let c = a;
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    #[should_panic]
    fn zero_cardinality() {
        Variable::discrete(0);
    }

    #[test]
    fn assignment() {
        let a = Variable::binary();
        let b = Variable::discrete(4);

        let mut assn = Assignment::new();
        assert!(assn.is_empty());
        assn.set(&a, 1);
        assn.set(&b, 3);
        assn.set(&b, 2);

        assert_eq!(2, assn.len());
        assert_eq!(Some(&1), assn.get(&a));
        assert_eq!(Some(&2), assn.get(&b));
        assert!(assn.contains(&a));
        assert!(! assn.contains(&Variable::binary()));
    }

    #[test]
    fn enumerate_all() {
        let a = Variable::binary();
        let b = Variable::discrete(3);

        let all: Vec<Assignment> = all_assignments(&[a, b]).collect();
        assert_eq!(6, all.len());

        // last variable changes fastest
        let states: Vec<(usize, usize)> = all.iter()
                                             .map(|x| (*x.get(&a).unwrap(), *x.get(&b).unwrap()))
                                             .collect();
        assert_eq!(vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)], states);
    }

    #[test]
    fn enumerate_empty() {
        let all: Vec<Assignment> = all_assignments(&[]).collect();
        assert_eq!(1, all.len());
        assert!(all[0].is_empty());
    }

}
