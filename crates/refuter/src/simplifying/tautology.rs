//! Tautology deletion.
//!
//! A clause containing a literal and its exact complement is always true and
//! never contributes to a refutation.

use crate::logic::Clause;

/// Check if a clause is a tautology
pub fn is_tautology(clause: &Clause) -> bool {
    // Check for complementary literals
    for i in 0..clause.literals.len() {
        for j in (i + 1)..clause.literals.len() {
            let lit_i = &clause.literals[i];
            let lit_j = &clause.literals[j];
            if lit_i.polarity != lit_j.polarity
                && lit_i.predicate == lit_j.predicate
                && lit_i.args == lit_j.args
            {
                return true;
            }
        }
    }
    false
}
