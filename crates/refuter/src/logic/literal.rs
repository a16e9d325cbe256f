//! Literals: possibly negated predicate applications

use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A literal (positive or negative predicate application)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: String,
    pub args: Vec<Term>,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Literal {
            predicate: predicate.into(),
            args,
            polarity: true,
        }
    }

    /// Create a new negative literal
    pub fn negative(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Literal {
            predicate: predicate.into(),
            args,
            polarity: false,
        }
    }

    /// Get the complement of this literal
    pub fn complement(&self) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self.args.clone(),
            polarity: !self.polarity,
        }
    }

    /// Same predicate and arity, opposite polarity.
    ///
    /// This is the cheap pre-check run before the unifier is ever invoked.
    pub fn may_resolve_with(&self, other: &Literal) -> bool {
        self.polarity != other.polarity
            && self.predicate == other.predicate
            && self.args.len() == other.args.len()
    }

    /// Collect all variables in this literal
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        for term in &self.args {
            term.collect_variables(vars);
        }
    }

    pub fn rename_variables(&self, rename: &dyn Fn(&Variable) -> Option<Variable>) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|t| t.rename_variables(rename)).collect(),
            polarity: self.polarity,
        }
    }

    pub fn replace_variable(&self, var: &Variable, replacement: &Term) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self
                .args
                .iter()
                .map(|t| t.replace_variable(var, replacement))
                .collect(),
            polarity: self.polarity,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "¬")?;
        }
        write!(f, "{}", self.predicate)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let lit = Literal::negative("Loves", vec![Term::var("x"), Term::constant("Mary")]);
        assert_eq!(lit.to_string(), "¬Loves(x, Mary)");
        assert_eq!(Literal::positive("Rain", vec![]).to_string(), "Rain");
    }

    #[test]
    fn test_may_resolve_with() {
        let p = Literal::positive("P", vec![Term::var("x")]);
        let not_p = Literal::negative("P", vec![Term::constant("A")]);
        let not_q = Literal::negative("Q", vec![Term::constant("A")]);
        assert!(p.may_resolve_with(&not_p));
        assert!(!p.may_resolve_with(&p));
        assert!(!p.may_resolve_with(&not_q));
    }
}
