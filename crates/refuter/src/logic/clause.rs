//! Clauses and their provenance

use super::literal::Literal;
use super::term::Variable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a clause inside one proof attempt
pub type ClauseId = usize;

/// Where a clause came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClauseSource {
    /// Produced by the normalizer, not yet attributed to an input
    #[default]
    Input,
    /// Clause of the N-th (1-based) input formula
    Premise(usize),
    /// Clause of the negated goal
    NegatedGoal,
    /// Resolvent registered during the given search step
    Resolvent(usize),
}

impl fmt::Display for ClauseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseSource::Input => write!(f, "input"),
            ClauseSource::Premise(n) => write!(f, "premise {}", n),
            ClauseSource::NegatedGoal => write!(f, "negated goal"),
            ClauseSource::Resolvent(step) => write!(f, "resolvent of step {}", step),
        }
    }
}

/// Parents and source tag of a clause
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Provenance {
    /// Parent clause ids; empty for input clauses
    pub parents: Vec<ClauseId>,
    pub source: ClauseSource,
}

impl Provenance {
    pub fn input(source: ClauseSource) -> Self {
        Provenance {
            parents: vec![],
            source,
        }
    }

    pub fn resolvent(parent1: ClauseId, parent2: ClauseId, step: usize) -> Self {
        Provenance {
            parents: vec![parent1, parent2],
            source: ClauseSource::Resolvent(step),
        }
    }
}

/// A clause (disjunction of literals)
///
/// Literals form a set: duplicates collapse on construction, first occurrence
/// wins so storage order stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
    /// Assigned when the clause is registered
    pub id: Option<ClauseId>,
    pub provenance: Provenance,
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause {
            literals: remove_duplicate_literals(literals),
            id: None,
            provenance: Provenance::default(),
        }
    }

    /// Create a new clause with the given provenance
    pub fn with_provenance(literals: Vec<Literal>, provenance: Provenance) -> Self {
        Clause {
            literals: remove_duplicate_literals(literals),
            id: None,
            provenance,
        }
    }

    /// Check if this clause is empty (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Same literal set, ignoring order and provenance
    pub fn same_literals(&self, other: &Clause) -> bool {
        self.literals.len() == other.literals.len()
            && self.literals.iter().all(|lit| other.literals.contains(lit))
    }

    pub fn variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        for lit in &self.literals {
            lit.collect_variables(&mut vars);
        }
        vars
    }
}

/// Remove duplicate literals from a list, keeping the first occurrence
pub fn remove_duplicate_literals(literals: Vec<Literal>) -> Vec<Literal> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(literals.len());

    for lit in literals {
        if seen.insert(lit.clone()) {
            result.push(lit);
        }
    }

    result
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "□")
        } else {
            for (i, lit) in self.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " ∨ ")?;
                }
                write!(f, "{}", lit)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Term;

    fn p(arg: Term) -> Literal {
        Literal::positive("P", vec![arg])
    }

    #[test]
    fn test_duplicates_collapse() {
        let clause = Clause::new(vec![p(Term::var("x")), p(Term::var("x"))]);
        assert_eq!(clause.len(), 1);
    }

    #[test]
    fn test_empty_clause_renders_as_box() {
        assert_eq!(Clause::new(vec![]).to_string(), "□");
    }

    #[test]
    fn test_display_joins_with_or() {
        let clause = Clause::new(vec![
            Literal::negative("Human", vec![Term::var("x")]),
            Literal::positive("Mortal", vec![Term::var("x")]),
        ]);
        assert_eq!(clause.to_string(), "¬Human(x) ∨ Mortal(x)");
    }

    #[test]
    fn test_same_literals_ignores_order() {
        let a = Clause::new(vec![p(Term::var("x")), Literal::positive("Q", vec![])]);
        let b = Clause::new(vec![Literal::positive("Q", vec![]), p(Term::var("x"))]);
        assert!(a.same_literals(&b));
    }

    #[test]
    fn test_source_tags() {
        assert_eq!(ClauseSource::Premise(2).to_string(), "premise 2");
        assert_eq!(ClauseSource::NegatedGoal.to_string(), "negated goal");
        assert_eq!(ClauseSource::Resolvent(4).to_string(), "resolvent of step 4");
    }
}
