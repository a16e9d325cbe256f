//! Proof log: the structured record of one proof attempt
//!
//! The log is the only artifact handed to explanation and presentation
//! layers. It serializes to JSON with a `type` tag per entry, and the
//! refutation can be reconstructed from it by a backward traversal over the
//! parent ids of the resolution steps.

use crate::logic::ClauseId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A registered clause as it appears in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseRecord {
    pub id: ClauseId,
    pub text: String,
    pub source: String,
}

/// One entry of the proof log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    /// All input clauses, in registration order
    Initial { clauses: Vec<ClauseRecord> },
    /// A resolvent that survived the redundancy filters
    ResolutionStep {
        step: usize,
        parent_ids: [ClauseId; 2],
        parent_texts: [String; 2],
        resolvent_id: ClauseId,
        resolvent_text: String,
        /// Variable name to term text, in binding order
        substitution: IndexMap<String, String>,
        /// The complementary literals that were cut, one from each parent
        resolved_literals: [String; 2],
    },
    ContradictionFound {
        clause_id: ClauseId,
        parent_ids: Vec<ClauseId>,
    },
    NoNewClauses,
    Timeout,
}

/// Ordered list of log entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofLog(Vec<LogEntry>);

impl ProofLog {
    pub fn new() -> Self {
        ProofLog(Vec::new())
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of resolution steps recorded
    pub fn resolution_steps(&self) -> usize {
        self.0
            .iter()
            .filter(|e| matches!(e, LogEntry::ResolutionStep { .. }))
            .count()
    }

    /// Id of the empty clause, if a contradiction was found
    pub fn contradiction(&self) -> Option<ClauseId> {
        self.0.iter().find_map(|e| match e {
            LogEntry::ContradictionFound { clause_id, .. } => Some(*clause_id),
            _ => None,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clauses taking part in the refutation (backward traversal from the
    /// empty clause), in ascending id order
    pub fn proof_clauses(&self) -> Option<Vec<ClauseId>> {
        let empty_clause_id = self.contradiction()?;

        // Build derivation map: resolvent -> parents
        let mut derivation_map: HashMap<ClauseId, [ClauseId; 2]> = HashMap::new();
        for entry in &self.0 {
            if let LogEntry::ResolutionStep {
                parent_ids,
                resolvent_id,
                ..
            } = entry
            {
                derivation_map.insert(*resolvent_id, *parent_ids);
            }
        }

        // Backward traversal from empty clause
        let mut proof_clauses = Vec::new();
        let mut visited = HashSet::new();
        let mut to_visit = vec![empty_clause_id];

        while let Some(id) = to_visit.pop() {
            if !visited.insert(id) {
                continue;
            }
            proof_clauses.push(id);
            if let Some(parents) = derivation_map.get(&id) {
                to_visit.extend(parents);
            }
        }

        // Parents always have lower ids
        proof_clauses.sort_unstable();
        Some(proof_clauses)
    }
}

impl<'a> IntoIterator for &'a ProofLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Initial { clauses } => {
                write!(f, "initial clauses:")?;
                for (i, c) in clauses.iter().enumerate() {
                    let sep = if i == 0 { " " } else { "; " };
                    write!(f, "{}[{}] {} ({})", sep, c.id, c.text, c.source)?;
                }
                Ok(())
            }
            LogEntry::ResolutionStep {
                step,
                parent_ids,
                resolvent_id,
                resolvent_text,
                substitution,
                resolved_literals,
                ..
            } => {
                write!(
                    f,
                    "step {}: [{}] {} from [{}] and [{}] on {} / {}",
                    step,
                    resolvent_id,
                    resolvent_text,
                    parent_ids[0],
                    parent_ids[1],
                    resolved_literals[0],
                    resolved_literals[1]
                )?;
                if !substitution.is_empty() {
                    let bindings: Vec<String> = substitution
                        .iter()
                        .map(|(var, term)| format!("{} ↦ {}", var, term))
                        .collect();
                    write!(f, " with {{{}}}", bindings.join(", "))?;
                }
                Ok(())
            }
            LogEntry::ContradictionFound {
                clause_id,
                parent_ids,
            } => {
                write!(f, "contradiction: [{}] □", clause_id)?;
                if !parent_ids.is_empty() {
                    let parents: Vec<String> =
                        parent_ids.iter().map(|p| format!("[{}]", p)).collect();
                    write!(f, " from {}", parents.join(" and "))?;
                }
                Ok(())
            }
            LogEntry::NoNewClauses => write!(f, "no new clauses"),
            LogEntry::Timeout => write!(f, "timeout: search ceiling reached"),
        }
    }
}

impl fmt::Display for ProofLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.0 {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(step: usize, parents: [ClauseId; 2], resolvent: ClauseId, text: &str) -> LogEntry {
        LogEntry::ResolutionStep {
            step,
            parent_ids: parents,
            parent_texts: [String::new(), String::new()],
            resolvent_id: resolvent,
            resolvent_text: text.to_string(),
            substitution: IndexMap::new(),
            resolved_literals: [String::new(), String::new()],
        }
    }

    #[test]
    fn test_proof_clauses_follow_parents() {
        let mut log = ProofLog::new();
        log.push(step(1, [0, 1], 3, "Mortal(Socrates)"));
        log.push(step(1, [1, 2], 4, "¬Human(Socrates)"));
        log.push(step(2, [2, 3], 5, "□"));
        log.push(LogEntry::ContradictionFound {
            clause_id: 5,
            parent_ids: vec![2, 3],
        });
        assert_eq!(log.proof_clauses(), Some(vec![0, 1, 2, 3, 5]));
    }

    #[test]
    fn test_no_proof_without_contradiction() {
        let mut log = ProofLog::new();
        log.push(LogEntry::NoNewClauses);
        assert_eq!(log.proof_clauses(), None);
    }

    #[test]
    fn test_entries_are_tagged() {
        let json = serde_json::to_value(LogEntry::NoNewClauses).unwrap();
        assert_eq!(json, serde_json::json!({"type": "no_new_clauses"}));

        let json = serde_json::to_value(LogEntry::ContradictionFound {
            clause_id: 5,
            parent_ids: vec![0, 4],
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "contradiction_found", "clause_id": 5, "parent_ids": [0, 4]})
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut log = ProofLog::new();
        log.push(LogEntry::Initial {
            clauses: vec![ClauseRecord {
                id: 0,
                text: "P(a)".into(),
                source: "premise 1".into(),
            }],
        });
        log.push(LogEntry::Timeout);
        let json = log.to_json().unwrap();
        assert_eq!(ProofLog::from_json(&json).unwrap(), log);
    }

    #[test]
    fn test_display_one_line_per_entry() {
        let mut log = ProofLog::new();
        log.push(step(1, [0, 2], 3, "□"));
        log.push(LogEntry::ContradictionFound {
            clause_id: 3,
            parent_ids: vec![0, 2],
        });
        let text = log.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("contradiction: [3] □ from [0] and [2]"));
    }
}
