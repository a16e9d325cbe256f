//! Collaborators around the prover: turning text into formulas and proof
//! logs into explanations.
//!
//! Both are pluggable; the prover itself never depends on them.

use crate::config::ProverConfig;
use crate::error::PipelineError;
use crate::logic::ClauseSource;
use crate::prover::{Prover, Verdict};
use crate::trace::ProofLog;
use tracing::{debug, info};

/// Turns a problem statement into formula strings
pub trait Formalizer {
    fn formalize(&self, text: &str) -> Result<Vec<String>, String>;
}

/// Renders a finished proof attempt for a reader
pub trait Explainer {
    fn explain(&self, log: &ProofLog, verdict: Verdict) -> Result<String, String>;
}

/// Everything a pipeline run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Formulas handed to the prover; a goal taken from the formalizer
    /// output appears negated in last position
    pub formulas: Vec<String>,
    pub verdict: Verdict,
    pub log: ProofLog,
    pub explanation: String,
}

/// formalize → prove → explain
pub struct ProofPipeline<F, E> {
    formalizer: F,
    explainer: E,
    config: ProverConfig,
}

impl<F: Formalizer, E: Explainer> ProofPipeline<F, E> {
    pub fn new(formalizer: F, explainer: E) -> Self {
        Self::with_config(formalizer, explainer, ProverConfig::default())
    }

    pub fn with_config(formalizer: F, explainer: E, config: ProverConfig) -> Self {
        ProofPipeline {
            formalizer,
            explainer,
            config,
        }
    }

    pub fn run(&self, text: &str) -> Result<PipelineOutcome, PipelineError> {
        let mut formulas = self.formalizer.formalize(text).map_err(PipelineError::Formalize)?;
        debug!(count = formulas.len(), "formalized");

        let goal = goal_negation(&formulas);
        if goal.is_some() {
            formulas.pop();
        }

        let mut prover = Prover::new(self.config.clone());
        for (i, formula) in formulas.iter().enumerate() {
            prover.add_formula(formula, ClauseSource::Premise(i + 1))?;
        }
        if let Some(negation) = goal {
            info!(goal = %negation, "taking the last formula as the goal");
            prover.add_formula(&negation, ClauseSource::NegatedGoal)?;
            formulas.push(negation);
        }

        let (verdict, log) = prover.run()?;
        let explanation = self
            .explainer
            .explain(&log, verdict)
            .map_err(PipelineError::Explain)?;

        Ok(PipelineOutcome {
            formulas,
            verdict,
            log,
            explanation,
        })
    }
}

/// The negation of the last formula, when the formalizer supplied no
/// negated goal of its own. The negation replaces the goal.
///
/// Only an atom-like last formula (one with an argument list, not a universal
/// statement) is taken as the goal.
fn goal_negation(formulas: &[String]) -> Option<String> {
    if formulas.len() < 2 || formulas.iter().any(|f| f.trim_start().starts_with('¬')) {
        return None;
    }
    let last = formulas.last()?.trim();
    if !last.contains('(') || last.starts_with('∀') {
        return None;
    }
    Some(format!("¬({})", last))
}
