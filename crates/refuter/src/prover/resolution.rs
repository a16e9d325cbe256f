//! Binary resolution of one clause pair

use crate::logic::{Clause, ClauseId, Literal, Provenance, Substitution, Variable};
use crate::unification::unify;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// A resolvent together with how it was obtained
#[derive(Debug, Clone)]
pub struct Resolvent {
    /// Unregistered clause with provenance already set
    pub clause: Clause,
    pub substitution: Substitution,
    /// The complementary literals that were cut, one from each parent
    pub resolved: [Literal; 2],
}

/// Rename the variables of `clause` that also occur in `other`.
///
/// The new name is `name_c<id>`, extended with a counter if that is taken too.
pub fn rename_apart(clause: &Clause, id: ClauseId, other: &Clause) -> Clause {
    let other_vars = other.variables();
    let own_vars = clause.variables();
    let mut clashing: Vec<&Variable> = own_vars.intersection(&other_vars).collect();
    if clashing.is_empty() {
        return clause.clone();
    }
    clashing.sort();

    let mut taken: HashSet<String> = other_vars
        .iter()
        .chain(&own_vars)
        .map(|v| v.name.clone())
        .collect();
    let mut renaming: HashMap<Variable, Variable> = HashMap::new();
    for var in clashing {
        let mut name = format!("{}_c{}", var.name, id);
        let mut k = 1;
        while taken.contains(&name) {
            name = format!("{}_c{}_{}", var.name, id, k);
            k += 1;
        }
        taken.insert(name.clone());
        renaming.insert(var.clone(), Variable::new(name));
    }

    let rename = |v: &Variable| renaming.get(v).cloned();
    Clause {
        literals: clause.literals.iter().map(|lit| lit.rename_variables(&rename)).collect(),
        id: clause.id,
        provenance: clause.provenance.clone(),
    }
}

/// All binary resolvents of two clauses.
///
/// Literal pairs are tried in storage order: every literal of the first
/// clause against every literal of the second.
pub fn resolve_pair(
    (id1, clause1): (ClauseId, &Clause),
    (id2, clause2): (ClauseId, &Clause),
    step: usize,
) -> Vec<Resolvent> {
    let clause2 = rename_apart(clause2, id2, clause1);
    let mut results = Vec::new();

    for (i, lit1) in clause1.literals.iter().enumerate() {
        for (j, lit2) in clause2.literals.iter().enumerate() {
            if !lit1.may_resolve_with(lit2) {
                continue;
            }
            trace!(clause1 = id1, clause2 = id2, left = %lit1, right = %lit2, "unifying");
            let Some(subst) = unify(&lit1.args, &lit2.args) else {
                continue;
            };

            let literals: Vec<Literal> = clause1
                .literals
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != i)
                .map(|(_, lit)| lit)
                .chain(
                    clause2
                        .literals
                        .iter()
                        .enumerate()
                        .filter(|(k, _)| *k != j)
                        .map(|(_, lit)| lit),
                )
                .map(|lit| lit.apply_substitution(&subst))
                .collect();

            results.push(Resolvent {
                clause: Clause::with_provenance(literals, Provenance::resolvent(id1, id2, step)),
                substitution: subst,
                resolved: [lit1.clone(), lit2.clone()],
            });
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{ClauseSource, Term};

    fn unit(lit: Literal) -> Clause {
        Clause::new(vec![lit])
    }

    #[test]
    fn test_complementary_units_give_empty_clause() {
        let p = unit(Literal::positive("P", vec![Term::constant("a")]));
        let not_p = unit(Literal::negative("P", vec![Term::constant("a")]));
        let resolvents = resolve_pair((0, &p), (1, &not_p), 1);
        assert_eq!(resolvents.len(), 1);
        assert!(resolvents[0].clause.is_empty());
        assert_eq!(resolvents[0].clause.provenance.parents, vec![0, 1]);
        assert_eq!(resolvents[0].clause.provenance.source, ClauseSource::Resolvent(1));
    }

    #[test]
    fn test_substitution_applied_to_remaining_literals() {
        let human = unit(Literal::positive("Human", vec![Term::constant("Socrates")]));
        let rule = Clause::new(vec![
            Literal::negative("Human", vec![Term::var("x_2")]),
            Literal::positive("Mortal", vec![Term::var("x_2")]),
        ]);
        let resolvents = resolve_pair((0, &human), (1, &rule), 1);
        assert_eq!(resolvents.len(), 1);
        assert_eq!(resolvents[0].clause.to_string(), "Mortal(Socrates)");
        assert_eq!(resolvents[0].substitution.to_string_map()["x_2"], "Socrates");
        assert_eq!(resolvents[0].resolved[1].to_string(), "¬Human(x_2)");
    }

    #[test]
    fn test_different_predicates_do_not_resolve() {
        let p = unit(Literal::positive("P", vec![Term::constant("a")]));
        let not_q = unit(Literal::negative("Q", vec![Term::constant("a")]));
        assert!(resolve_pair((0, &p), (1, &not_q), 1).is_empty());
    }

    #[test]
    fn test_shared_variables_are_renamed_apart() {
        // P(x) ∨ Q(x) against ¬P(f(x)): without renaming, x = f(x) fails the occurs check
        let left = Clause::new(vec![
            Literal::positive("P", vec![Term::var("x")]),
            Literal::positive("Q", vec![Term::var("x")]),
        ]);
        let right = unit(Literal::negative("P", vec![Term::function("f", vec![Term::var("x")])]));
        let resolvents = resolve_pair((0, &left), (1, &right), 1);
        assert_eq!(resolvents.len(), 1);
        assert_eq!(resolvents[0].clause.to_string(), "Q(f(x_c1))");
    }

    #[test]
    fn test_every_literal_pair_is_tried() {
        let left = Clause::new(vec![
            Literal::positive("P", vec![Term::constant("A")]),
            Literal::positive("P", vec![Term::constant("B")]),
        ]);
        let right = unit(Literal::negative("P", vec![Term::var("y")]));
        let texts: Vec<String> = resolve_pair((0, &left), (1, &right), 1)
            .iter()
            .map(|r| r.clause.to_string())
            .collect();
        assert_eq!(texts, vec!["P(B)", "P(A)"]);
    }
}
