//! First-order logic representation
//!
//! This module provides the shared data model of every stage: terms,
//! literals, clauses and substitutions.

pub mod clause;
pub mod literal;
pub mod substitution;
pub mod term;

// Re-export commonly used types
pub use clause::{remove_duplicate_literals, Clause, ClauseId, ClauseSource, Provenance};
pub use literal::Literal;
pub use substitution::Substitution;
pub use term::{Constant, FunctionSymbol, Term, Variable};
