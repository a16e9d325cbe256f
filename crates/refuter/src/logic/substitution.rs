//! Variable substitutions

use super::clause::Clause;
use super::literal::Literal;
use super::term::{Term, Variable};
use indexmap::IndexMap;
use std::fmt;

/// A substitution mapping variables to terms.
///
/// Bindings are stored in triangular form: a variable may be bound to a term
/// that mentions other bound variables. Application follows those chains until
/// it reaches an unbound variable or a term without bound variables. Insertion
/// order is kept so that rendering a substitution is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: IndexMap<Variable, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// Add a variable -> term mapping
    pub fn bind(&mut self, var: Variable, term: Term) {
        self.map.insert(var, term);
    }

    /// Get the term for a variable, if bound
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    /// Check if a variable is bound
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.map.iter()
    }

    /// Current trail position, for undoing bindings with [`Substitution::backtrack`]
    pub fn mark(&self) -> usize {
        self.map.len()
    }

    /// Drop every binding made after `mark`
    pub fn backtrack(&mut self, mark: usize) {
        self.map.truncate(mark);
    }

    /// Follow variable-to-variable and variable-to-term bindings at the top
    /// level of `term` until reaching a non-variable or an unbound variable.
    pub fn walk<'a>(&'a self, term: &'a Term) -> &'a Term {
        let mut current = term;
        let mut hops = 0;
        while let Term::Variable(v) = current {
            match self.map.get(v) {
                // A chain longer than the number of bindings can only be a cycle
                Some(next) if hops <= self.map.len() => {
                    current = next;
                    hops += 1;
                }
                _ => break,
            }
        }
        current
    }

    /// Fully applied form: every binding resolved against the whole substitution
    pub fn resolved(&self) -> Substitution {
        Substitution {
            map: self
                .map
                .iter()
                .map(|(var, term)| (var.clone(), term.apply_substitution(self)))
                .collect(),
        }
    }

    /// Render as `variable name -> term text`, in binding order
    pub fn to_string_map(&self) -> IndexMap<String, String> {
        self.resolved()
            .map
            .into_iter()
            .map(|(var, term)| (var.name, term.to_string()))
            .collect()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.resolved().map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}/{}", var, term)?;
        }
        write!(f, "}}")
    }
}

impl Term {
    /// Apply a substitution to this term, resolving binding chains.
    ///
    /// A cyclic binding is left unexpanded at the point where it would recur,
    /// so application always terminates.
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        let mut resolving = Vec::new();
        self.apply_guarded(subst, &mut resolving)
    }

    fn apply_guarded(&self, subst: &Substitution, resolving: &mut Vec<Variable>) -> Term {
        match self {
            Term::Variable(v) => {
                if resolving.contains(v) {
                    return self.clone();
                }
                match subst.get(v) {
                    Some(bound) => {
                        resolving.push(v.clone());
                        let result = bound.apply_guarded(subst, resolving);
                        resolving.pop();
                        result
                    }
                    None => self.clone(),
                }
            }
            Term::Constant(_) => self.clone(),
            Term::Function(f, args) => Term::Function(
                f.clone(),
                args.iter()
                    .map(|arg| arg.apply_guarded(subst, resolving))
                    .collect(),
            ),
        }
    }
}

impl Literal {
    /// Apply a substitution to this literal
    pub fn apply_substitution(&self, subst: &Substitution) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self
                .args
                .iter()
                .map(|arg| arg.apply_substitution(subst))
                .collect(),
            polarity: self.polarity,
        }
    }
}

impl Clause {
    /// Apply a substitution to this clause; the result is unregistered
    pub fn apply_substitution(&self, subst: &Substitution) -> Clause {
        Clause::with_provenance(
            self.literals
                .iter()
                .map(|lit| lit.apply_substitution(subst))
                .collect(),
            self.provenance.clone(),
        )
    }
}
