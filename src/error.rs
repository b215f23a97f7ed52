//! Defines the `NetError` type for the creditnet library

use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, NetError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetError {

    /// Represents an incomplete assignment where a complete assignment was required.
    #[error("Missing assignments to the required Variables")]
    IncompleteAssignment,

    /// An assignment gave a `Variable` a state outside of its cardinality
    #[error("State {state} is out of range for a Variable with cardinality {cardinality}")]
    InvalidState { state: usize, cardinality: usize },

    /// Represents an error where a certain constraint on a scope was not satisfied
    #[error("Provided scope did not satisfy constraints")]
    InvalidScope,

    /// Represents an error where there was a parent variable expected, but not found
    #[error("Missing a parent from the model")]
    MissingParent,

    /// Represents a variable that was present multiple times in a situation where it should only
    /// have been present once
    #[error("A variable was encountered twice")]
    DuplicateVariable,

    /// A name or `Variable` that is not part of the model
    #[error("Unknown variable `{0}`")]
    UnknownVariable(String),

    /// Represents the situation when we expected a CPD but did not receive one
    #[error("Requires a Conditional Probability Distribution")]
    NotACPD,

    /// A `Variable` in the model has no CPD attached
    #[error("No CPD attached to variable `{0}`")]
    MissingCpd(String),

    /// A table did not have the shape required by the cardinalities of its scope.
    /// Shapes are given as (rows, columns).
    #[error("Table has shape {found:?}, expected {expected:?}")]
    InvalidShape { expected: (usize, usize), found: (usize, usize) },

    /// A column of a CPD is not a probability distribution
    #[error("Column {column} of the CPD sums to {sum}, not 1")]
    NotNormalized { column: usize, sum: f64 },

    /// Represents a situation in which there was a negative probability provided
    #[error("Encountered a negative probability")]
    NegativeProbability,

    /// A general error with the given description
    #[error("{0}")]
    General(String),

}
