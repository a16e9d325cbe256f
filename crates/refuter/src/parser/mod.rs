//! Formula parsing and CNF conversion

pub mod cnf_conversion;
pub mod expression;
pub mod formula;
pub mod terms;

// Re-export main parsing functions and types
pub use cnf_conversion::{Formula, Normalizer, Prenex};
pub use expression::{
    ConnectiveNode, Expression, Operator, PredicateAtom, QuantifierBinding, QuantifierKind,
};
pub use formula::{parse, MAX_NESTING};
pub use terms::{parse_arguments, parse_term_text};
