//! Resolution refutation search
//!
//! A proof attempt parses and normalizes every input formula, registers the
//! resulting clauses, then repeats rounds of pairwise resolution until the
//! empty clause appears (refuted), a round adds nothing (not refuted), or a
//! ceiling is reached (undetermined).
//!
//! Pairing works as a queue: each round pairs every clause registered since
//! the previous round with every clause before it, in ascending
//! `(first id, second id)` order, so each unordered pair is tried exactly once.

pub mod registry;
pub mod resolution;

pub use registry::ClauseRegistry;
pub use resolution::{rename_apart, resolve_pair, Resolvent};

use crate::config::ProverConfig;
use crate::error::ProveError;
use crate::logic::{Clause, ClauseId, ClauseSource, Provenance};
use crate::parser::{parse, Formula, Normalizer};
use crate::simplifying::check_redundancy;
use crate::trace::{LogEntry, ProofLog};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Outcome of a proof attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The empty clause was derived
    Refuted,
    /// The clause set is saturated without a contradiction
    NotRefuted,
    /// A step or clause ceiling was reached first
    Undetermined,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Refuted => write!(f, "refuted"),
            Verdict::NotRefuted => write!(f, "not refuted"),
            Verdict::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// An input formula waiting for the search to start
struct PendingFormula {
    index: usize,
    text: String,
    source: ClauseSource,
    formula: Formula,
}

/// State machine for one proof attempt
pub struct Prover {
    config: ProverConfig,
    normalizer: Normalizer,
    pending: Vec<PendingFormula>,
    registry: ClauseRegistry,
    /// Formulas added so far, blank ones included
    formulas: usize,
    /// Outer loop iterations so far
    step: usize,
    /// Every pair of clauses below this id has been resolved
    paired_upto: usize,
    started: bool,
    verdict: Option<Verdict>,
}

impl Prover {
    pub fn new(config: ProverConfig) -> Self {
        Prover {
            config,
            normalizer: Normalizer::new(),
            pending: Vec::new(),
            registry: ClauseRegistry::new(),
            formulas: 0,
            step: 0,
            paired_upto: 0,
            started: false,
            verdict: None,
        }
    }

    /// Parse one input formula and queue it for normalization.
    ///
    /// The formula's position among all added formulas (1-based) standardizes
    /// its variables apart and is reported in errors. A blank formula adds no
    /// clauses. Queued formulas are normalized when the search starts, once
    /// the symbols of every input are known, so Skolem symbols never collide
    /// with a symbol of a later formula.
    pub fn add_formula(&mut self, text: &str, source: ClauseSource) -> Result<(), ProveError> {
        if self.started {
            return Err(ProveError::Invariant(
                "formula added after the search started".to_string(),
            ));
        }
        self.formulas += 1;
        let index = self.formulas;

        let expr = match parse(text) {
            Ok(Some(expr)) => expr,
            Ok(None) => return Ok(()),
            Err(source) => {
                return Err(ProveError::Parse {
                    index,
                    formula: text.to_string(),
                    source,
                })
            }
        };
        let formula = Formula::from_expression(&expr).map_err(|source| ProveError::Normalize {
            index,
            formula: text.to_string(),
            source,
        })?;
        self.normalizer.reserve_symbols(&formula);
        self.pending.push(PendingFormula {
            index,
            text: text.to_string(),
            source,
            formula,
        });
        Ok(())
    }

    pub fn registry(&self) -> &ClauseRegistry {
        &self.registry
    }

    pub fn log(&self) -> &ProofLog {
        self.registry.log()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Run one outer iteration; returns the verdict once the attempt is over
    pub fn step(&mut self) -> Result<Option<Verdict>, ProveError> {
        if let Some(verdict) = self.verdict {
            return Ok(Some(verdict));
        }
        if !self.started {
            self.start()?;
        }
        self.step += 1;

        if let Some((clause_id, clause)) = self.registry.find_empty() {
            let parent_ids = clause.provenance.parents.clone();
            self.registry.log_entry(LogEntry::ContradictionFound { clause_id, parent_ids });
            return Ok(Some(self.finish(Verdict::Refuted)));
        }

        if self.step > self.config.max_steps || self.registry.len() >= self.config.max_clauses {
            warn!(
                step = self.step,
                clauses = self.registry.len(),
                max_steps = self.config.max_steps,
                max_clauses = self.config.max_clauses,
                "search ceiling reached"
            );
            self.registry.log_entry(LogEntry::Timeout);
            return Ok(Some(self.finish(Verdict::Undetermined)));
        }

        if self.resolution_round()? == 0 {
            self.registry.log_entry(LogEntry::NoNewClauses);
            return Ok(Some(self.finish(Verdict::NotRefuted)));
        }
        Ok(None)
    }

    /// Run to a verdict
    pub fn run(mut self) -> Result<(Verdict, ProofLog), ProveError> {
        loop {
            if let Some(verdict) = self.step()? {
                return Ok((verdict, self.registry.into_log()));
            }
        }
    }

    /// Normalize the queued formulas, register their clauses and log them
    fn start(&mut self) -> Result<(), ProveError> {
        let mut inputs = Vec::new();
        for pending in std::mem::take(&mut self.pending) {
            let clauses = self
                .normalizer
                .normalize_formula(pending.formula, Some(pending.index))
                .map_err(|source| ProveError::Normalize {
                    index: pending.index,
                    formula: pending.text.clone(),
                    source,
                })?;
            inputs.extend(clauses.into_iter().map(|clause| (clause, pending.source)));
        }
        if inputs.is_empty() {
            return Err(ProveError::EmptyInput);
        }

        for (clause, source) in inputs {
            let clause = Clause::with_provenance(clause.literals, Provenance::input(source));
            let text = clause.to_string();
            let id = self.registry.register(clause);
            debug!(id, source = %source, clause = %text, "registered input clause");
        }

        let clauses = (0..self.registry.len())
            .map(|id| self.registry.record(id).ok_or_else(|| missing_clause(id)))
            .collect::<Result<Vec<_>, _>>()?;
        self.registry.log_entry(LogEntry::Initial { clauses });
        self.started = true;
        Ok(())
    }

    fn finish(&mut self, verdict: Verdict) -> Verdict {
        info!(
            verdict = %verdict,
            steps = self.step,
            clauses = self.registry.len(),
            "proof attempt finished"
        );
        self.verdict = Some(verdict);
        verdict
    }

    /// Resolve every untried pair; returns the number of clauses added
    fn resolution_round(&mut self) -> Result<usize, ProveError> {
        let known = self.registry.len();
        let mut added = 0;

        'pairs: for i in 0..known {
            for j in (i + 1).max(self.paired_upto)..known {
                let resolvents = {
                    let c1 = self.registry.get(i).ok_or_else(|| missing_clause(i))?;
                    let c2 = self.registry.get(j).ok_or_else(|| missing_clause(j))?;
                    resolve_pair((i, c1), (j, c2), self.step)
                };

                for resolvent in resolvents {
                    let redundant = check_redundancy(
                        &resolvent.clause,
                        self.registry.iter(),
                        self.config.subsumption,
                    );
                    if let Some(reason) = redundant {
                        debug!(
                            step = self.step,
                            parents = ?[i, j],
                            resolvent = %resolvent.clause,
                            %reason,
                            "discarded"
                        );
                        continue;
                    }

                    let is_empty = resolvent.clause.is_empty();
                    self.record_resolvent(i, j, resolvent)?;
                    added += 1;

                    if is_empty && self.config.early_exit {
                        break 'pairs;
                    }
                    if self.registry.len() >= self.config.max_clauses {
                        break 'pairs;
                    }
                }
            }
        }

        self.paired_upto = known;
        Ok(added)
    }

    fn record_resolvent(
        &mut self,
        i: ClauseId,
        j: ClauseId,
        resolvent: Resolvent,
    ) -> Result<(), ProveError> {
        let parent_texts = [self.clause_text(i)?, self.clause_text(j)?];
        let resolvent_text = resolvent.clause.to_string();
        let resolvent_id = self.registry.register(resolvent.clause);
        debug!(
            step = self.step,
            parents = ?[i, j],
            resolvent = %resolvent_text,
            id = resolvent_id,
            "resolution step"
        );

        let [left, right] = resolvent.resolved;
        self.registry.log_entry(LogEntry::ResolutionStep {
            step: self.step,
            parent_ids: [i, j],
            parent_texts,
            resolvent_id,
            resolvent_text,
            substitution: resolvent.substitution.to_string_map(),
            resolved_literals: [left.to_string(), right.to_string()],
        });
        Ok(())
    }

    fn clause_text(&self, id: ClauseId) -> Result<String, ProveError> {
        self.registry
            .get(id)
            .map(|c| c.to_string())
            .ok_or_else(|| missing_clause(id))
    }
}

fn missing_clause(id: ClauseId) -> ProveError {
    ProveError::Invariant(format!("clause {} is not registered", id))
}

/// Refute a set of formulas with the default configuration
pub fn prove<S: AsRef<str>>(formulas: &[S]) -> Result<(Verdict, ProofLog), ProveError> {
    prove_with_config(formulas, &ProverConfig::default())
}

/// Refute a set of formulas; every formula is tagged as a premise
pub fn prove_with_config<S: AsRef<str>>(
    formulas: &[S],
    config: &ProverConfig,
) -> Result<(Verdict, ProofLog), ProveError> {
    let mut prover = Prover::new(config.clone());
    for (i, formula) in formulas.iter().enumerate() {
        prover.add_formula(formula.as_ref(), ClauseSource::Premise(i + 1))?;
    }
    prover.run()
}

/// Prove `goal` from `premises` by refuting the premises together with `¬(goal)`
pub fn prove_goal<S: AsRef<str>>(
    premises: &[S],
    goal: &str,
    config: &ProverConfig,
) -> Result<(Verdict, ProofLog), ProveError> {
    let mut prover = Prover::new(config.clone());
    for (i, formula) in premises.iter().enumerate() {
        prover.add_formula(formula.as_ref(), ClauseSource::Premise(i + 1))?;
    }
    prover.add_formula(&format!("¬({})", goal), ClauseSource::NegatedGoal)?;
    prover.run()
}
