//! Unification algorithm for first-order terms

mod matching;
mod mgu;

pub use matching::{match_literal, match_term};
pub use mgu::{unify, unify_lists, unify_terms, UnificationError};
