//! Subsumption checking for redundancy elimination
//!
//! A clause C subsumes clause D if there exists a substitution σ such that
//! Cσ ⊆ D (every literal in Cσ appears in D). A subsumed resolvent carries no
//! information the search does not already have, so it is never registered.
//!
//! Two modes are available:
//!
//! 1. **Exact** - D is discarded only when some known clause has literally the
//!    same literal set, ignoring order.
//! 2. **Full** - θ-subsumption with backtracking over literal assignments.
//!    The subsumer may not have more literals than the subsumee and each of its
//!    literals maps to a distinct literal of the subsumee.

use crate::config::SubsumptionMode;
use crate::logic::{Clause, Substitution};
use crate::unification::match_literal;

/// Check whether `subsumer` subsumes `subsumee` under the given mode
pub fn subsumes_with(mode: SubsumptionMode, subsumer: &Clause, subsumee: &Clause) -> bool {
    match mode {
        SubsumptionMode::Exact => subsumer.same_literals(subsumee),
        SubsumptionMode::Full => subsumes(subsumer, subsumee),
    }
}

/// Full θ-subsumption check
pub fn subsumes(subsumer: &Clause, subsumee: &Clause) -> bool {
    if subsumer.literals.len() > subsumee.literals.len() {
        return false;
    }

    let mut subst = Substitution::new();
    find_subsumption_mapping(
        subsumer,
        subsumee,
        0,
        &mut subst,
        &mut vec![false; subsumee.literals.len()],
    )
}

/// Recursive search for a subsumption mapping using trail-based backtracking
fn find_subsumption_mapping(
    subsumer: &Clause,
    subsumee: &Clause,
    subsumer_idx: usize,
    subst: &mut Substitution,
    used: &mut Vec<bool>,
) -> bool {
    if subsumer_idx >= subsumer.literals.len() {
        return true; // All literals matched
    }

    let subsumer_lit = &subsumer.literals[subsumer_idx];

    // Try to match with each unused literal in subsumee
    for (i, subsumee_lit) in subsumee.literals.iter().enumerate() {
        if used[i] || subsumee_lit.polarity != subsumer_lit.polarity {
            continue;
        }

        let mark = subst.mark();
        if match_literal(subsumer_lit, subsumee_lit, subst).is_ok() {
            used[i] = true;
            if find_subsumption_mapping(subsumer, subsumee, subsumer_idx + 1, subst, used) {
                return true;
            }
            used[i] = false;
        }
        subst.backtrack(mark);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Literal, Term};

    fn lit(pred: &str, args: Vec<Term>, polarity: bool) -> Literal {
        Literal {
            predicate: pred.to_string(),
            args,
            polarity,
        }
    }

    #[test]
    fn test_general_unit_subsumes_instance() {
        // P(x) subsumes P(A) ∨ Q(B)
        let general = Clause::new(vec![lit("P", vec![Term::var("x")], true)]);
        let specific = Clause::new(vec![
            lit("P", vec![Term::constant("A")], true),
            lit("Q", vec![Term::constant("B")], true),
        ]);
        assert!(subsumes(&general, &specific));
        assert!(!subsumes(&specific, &general));
    }

    #[test]
    fn test_bindings_must_be_consistent() {
        // P(x) ∨ Q(x) does not subsume P(A) ∨ Q(B)
        let subsumer = Clause::new(vec![
            lit("P", vec![Term::var("x")], true),
            lit("Q", vec![Term::var("x")], true),
        ]);
        let subsumee = Clause::new(vec![
            lit("P", vec![Term::constant("A")], true),
            lit("Q", vec![Term::constant("B")], true),
        ]);
        assert!(!subsumes(&subsumer, &subsumee));
    }

    #[test]
    fn test_backtracking_finds_later_assignment() {
        // P(x) ∨ P(f(x)) subsumes P(f(A)) ∨ P(A): the first choice x -> f(A) fails
        let subsumer = Clause::new(vec![
            lit("P", vec![Term::var("x")], true),
            lit("P", vec![Term::function("f", vec![Term::var("x")])], true),
        ]);
        let subsumee = Clause::new(vec![
            lit("P", vec![Term::function("f", vec![Term::constant("A")])], true),
            lit("P", vec![Term::constant("A")], true),
        ]);
        assert!(subsumes(&subsumer, &subsumee));
    }

    #[test]
    fn test_polarity_matters() {
        let pos = Clause::new(vec![lit("P", vec![Term::var("x")], true)]);
        let neg = Clause::new(vec![lit("P", vec![Term::constant("A")], false)]);
        assert!(!subsumes(&pos, &neg));
    }

    #[test]
    fn test_exact_mode_ignores_generality() {
        let general = Clause::new(vec![lit("P", vec![Term::var("x")], true)]);
        let specific = Clause::new(vec![lit("P", vec![Term::constant("A")], true)]);
        assert!(!subsumes_with(SubsumptionMode::Exact, &general, &specific));
        assert!(subsumes_with(SubsumptionMode::Full, &general, &specific));
        assert!(subsumes_with(SubsumptionMode::Exact, &specific, &specific.clone()));
    }
}
