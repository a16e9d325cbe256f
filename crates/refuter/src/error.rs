//! Error types for the refutation prover
//!
//! Unification failure and reaching a search ceiling are not errors: the first
//! steers the search, the second is the undetermined verdict.

use crate::parser::Operator;
use thiserror::Error;

/// Malformed formula syntax
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} at position {position}")]
pub struct ParseError {
    pub reason: ParseErrorKind,
    /// Character index into the formula text
    pub position: usize,
}

impl ParseError {
    pub fn new(reason: ParseErrorKind, position: usize) -> Self {
        ParseError { reason, position }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,

    #[error("missing operand for {0}")]
    MissingOperand(Operator),

    #[error("quantifier must be followed by a single lowercase variable")]
    InvalidQuantifierVariable,

    #[error("empty predicate name")]
    EmptyPredicateName,

    #[error("empty subformula")]
    EmptySubformula,

    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("formula nested too deeply")]
    TooDeep,
}

/// Malformed argument lists that survive parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("malformed arguments for {predicate}: ({arguments})")]
    MalformedArguments { predicate: String, arguments: String },

    #[error("empty argument in {predicate}")]
    EmptyArgument { predicate: String },

    #[error("invalid term: {0}")]
    InvalidTerm(String),

    #[error("unexpected {0} after distribution")]
    UnexpectedConnective(String),
}

/// Errors aborting a proof attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProveError {
    #[error("formula {index} `{formula}`: {source}")]
    Parse {
        index: usize,
        formula: String,
        source: ParseError,
    },

    #[error("formula {index} `{formula}`: {source}")]
    Normalize {
        index: usize,
        formula: String,
        source: NormalizationError,
    },

    #[error("no clauses to refute")]
    EmptyInput,

    /// Internal defect in the search; never a verdict
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

/// Failures of the formalize → prove → explain pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("formalization failed: {0}")]
    Formalize(String),

    #[error("explanation failed: {0}")]
    Explain(String),

    #[error(transparent)]
    Prove(#[from] ProveError),
}
