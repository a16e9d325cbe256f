//! Most General Unifier (MGU) computation

use crate::logic::{Substitution, Term, Variable};
use thiserror::Error;
use tracing::trace;

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Reasons a unification attempt fails
///
/// These never escape the search: the public [`unify`] turns them into `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnificationError {
    /// Different constant or function symbols, or a constant against a function
    #[error("symbol clash: {0} vs {1}")]
    SymbolClash(String, String),
    /// Argument lists of different lengths
    #[error("arity mismatch: {0} vs {1}")]
    ArityMismatch(usize, usize),
    /// Variable occurs in the term it would be bound to
    #[error("occurs check: {0} in {1}")]
    OccursCheck(Variable, Term),
}

/// Unify two argument lists position by position.
///
/// Returns `None` when no unifier exists, including lists of different length.
pub fn unify(terms1: &[Term], terms2: &[Term]) -> Option<Substitution> {
    match unify_lists(terms1, terms2) {
        Ok(subst) => Some(subst),
        Err(err) => {
            trace!(reason = %err, "unification failed");
            None
        }
    }
}

/// Unify two argument lists, reporting why unification failed
pub fn unify_lists(terms1: &[Term], terms2: &[Term]) -> UnificationResult {
    if terms1.len() != terms2.len() {
        return Err(UnificationError::ArityMismatch(terms1.len(), terms2.len()));
    }
    let mut subst = Substitution::new();
    for (t1, t2) in terms1.iter().zip(terms2) {
        unify_with_subst(t1, t2, &mut subst)?;
    }
    Ok(subst)
}

/// Unify two terms, returning a most general unifier (MGU) if one exists
pub fn unify_terms(term1: &Term, term2: &Term) -> UnificationResult {
    let mut subst = Substitution::new();
    unify_with_subst(term1, term2, &mut subst)?;
    Ok(subst)
}

/// Unify two terms with an existing substitution
fn unify_with_subst(
    term1: &Term,
    term2: &Term,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    let t1 = term1.apply_substitution(subst);
    let t2 = term2.apply_substitution(subst);

    match (&t1, &t2) {
        // Same term - nothing to do
        _ if t1 == t2 => Ok(()),

        // Variable cases; a variable on the left binds to the right side
        (Term::Variable(v), t) | (t, Term::Variable(v)) => {
            if occurs_check(v, t) {
                Err(UnificationError::OccursCheck(v.clone(), t.clone()))
            } else {
                subst.bind(v.clone(), t.clone());
                Ok(())
            }
        }

        (Term::Constant(c1), Term::Constant(c2)) => Err(UnificationError::SymbolClash(
            c1.name.clone(),
            c2.name.clone(),
        )),

        // Function terms
        (Term::Function(f1, args1), Term::Function(f2, args2)) => {
            if f1.name != f2.name {
                return Err(UnificationError::SymbolClash(
                    f1.name.clone(),
                    f2.name.clone(),
                ));
            }
            if args1.len() != args2.len() {
                return Err(UnificationError::ArityMismatch(args1.len(), args2.len()));
            }

            // Unify arguments pairwise
            for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                unify_with_subst(arg1, arg2, subst)?;
            }
            Ok(())
        }

        // Function-Constant clash
        (Term::Function(f, _), Term::Constant(c)) | (Term::Constant(c), Term::Function(f, _)) => {
            Err(UnificationError::SymbolClash(f.name.clone(), c.name.clone()))
        }
    }
}

/// Check if variable occurs in term (occurs check)
fn occurs_check(var: &Variable, term: &Term) -> bool {
    term.contains_variable(var)
}
