//! Redundancy filters applied to every resolvent before it is registered.

pub mod subsumption;
pub mod tautology;

pub use subsumption::{subsumes, subsumes_with};
pub use tautology::is_tautology;

use crate::config::SubsumptionMode;
use crate::logic::{Clause, ClauseId};
use std::fmt;

/// Why a resolvent was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redundancy {
    Tautology,
    Subsumed { by: ClauseId },
}

impl fmt::Display for Redundancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Redundancy::Tautology => write!(f, "tautology"),
            Redundancy::Subsumed { by } => write!(f, "subsumed by clause {}", by),
        }
    }
}

/// Check a candidate clause against the known clauses, in id order.
///
/// Returns the first reason the candidate is redundant, or `None` if it
/// should be kept.
pub fn check_redundancy<'a>(
    candidate: &Clause,
    known: impl IntoIterator<Item = (ClauseId, &'a Clause)>,
    mode: SubsumptionMode,
) -> Option<Redundancy> {
    if is_tautology(candidate) {
        return Some(Redundancy::Tautology);
    }
    known
        .into_iter()
        .find(|(_, existing)| subsumes_with(mode, existing, candidate))
        .map(|(by, _)| Redundancy::Subsumed { by })
}
