//! One-way matching for subsumption

use super::UnificationError;
use crate::logic::{Literal, Substitution, Term};

/// One-way match: Find a substitution σ such that pattern σ = term
/// Only variables in the pattern can be substituted
pub fn match_term(pattern: &Term, term: &Term) -> Result<Substitution, UnificationError> {
    let mut subst = Substitution::new();
    match_with_subst(pattern, term, &mut subst)?;
    Ok(subst)
}

/// Extend `subst` so that `pattern` maps onto `term`.
///
/// On failure `subst` may hold partial bindings; callers that backtrack take a
/// [`Substitution::mark`] first.
pub fn match_literal(
    pattern: &Literal,
    term: &Literal,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    if pattern.polarity != term.polarity || pattern.predicate != term.predicate {
        return Err(UnificationError::SymbolClash(
            pattern.to_string(),
            term.to_string(),
        ));
    }
    if pattern.args.len() != term.args.len() {
        return Err(UnificationError::ArityMismatch(
            pattern.args.len(),
            term.args.len(),
        ));
    }
    for (p, t) in pattern.args.iter().zip(&term.args) {
        match_with_subst(p, t, subst)?;
    }
    Ok(())
}

fn match_with_subst(
    pattern: &Term,
    term: &Term,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    match (pattern, term) {
        // Variable in pattern matches anything
        (Term::Variable(v), t) => match subst.get(v) {
            Some(bound) if bound == t => Ok(()),
            Some(bound) => Err(UnificationError::SymbolClash(
                bound.to_string(),
                t.to_string(),
            )),
            None => {
                subst.bind(v.clone(), t.clone());
                Ok(())
            }
        },
        // Constants must match exactly
        (Term::Constant(c1), Term::Constant(c2)) => {
            if c1 == c2 {
                Ok(())
            } else {
                Err(UnificationError::SymbolClash(c1.name.clone(), c2.name.clone()))
            }
        }
        // Functions must have same symbol and arity
        (Term::Function(f1, args1), Term::Function(f2, args2)) => {
            if f1 != f2 {
                return Err(UnificationError::SymbolClash(
                    f1.name.clone(),
                    f2.name.clone(),
                ));
            }
            if args1.len() != args2.len() {
                return Err(UnificationError::ArityMismatch(args1.len(), args2.len()));
            }
            for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                match_with_subst(arg1, arg2, subst)?;
            }
            Ok(())
        }
        // A non-variable pattern never matches a variable or a different kind of term
        (p, t) => Err(UnificationError::SymbolClash(p.to_string(), t.to_string())),
    }
}
