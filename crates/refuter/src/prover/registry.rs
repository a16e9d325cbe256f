//! Clause registry: the state of one proof attempt

use crate::logic::{Clause, ClauseId};
use crate::trace::{ClauseRecord, LogEntry, ProofLog};

/// Registered clauses, indexed by id, plus the proof log
///
/// Ids are assigned in registration order starting at 0; a registered clause
/// is never modified or removed.
#[derive(Debug, Default)]
pub struct ClauseRegistry {
    clauses: Vec<Clause>,
    log: ProofLog,
}

impl ClauseRegistry {
    pub fn new() -> Self {
        ClauseRegistry {
            clauses: Vec::new(),
            log: ProofLog::new(),
        }
    }

    /// Assign the next id to `clause` and store it
    pub fn register(&mut self, mut clause: Clause) -> ClauseId {
        let id = self.clauses.len();
        clause.id = Some(id);
        self.clauses.push(clause);
        id
    }

    pub fn get(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses.get(id)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Clauses with their ids, in id order
    pub fn iter(&self) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.clauses.iter().enumerate()
    }

    /// First registered empty clause
    pub fn find_empty(&self) -> Option<(ClauseId, &Clause)> {
        self.iter().find(|(_, clause)| clause.is_empty())
    }

    /// Log-ready view of a registered clause
    pub fn record(&self, id: ClauseId) -> Option<ClauseRecord> {
        self.get(id).map(|clause| ClauseRecord {
            id,
            text: clause.to_string(),
            source: clause.provenance.source.to_string(),
        })
    }

    pub fn log_entry(&mut self, entry: LogEntry) {
        self.log.push(entry);
    }

    pub fn log(&self) -> &ProofLog {
        &self.log
    }

    pub fn into_log(self) -> ProofLog {
        self.log
    }
}
