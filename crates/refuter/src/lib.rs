//! Refuter: a resolution refutation prover for first-order logic
//!
//! Formulas are parsed from a Unicode surface syntax (`¬ ∀ ∃ → ∧ ∨`),
//! normalized to clausal form, and refuted by binary resolution with
//! tautology and subsumption pruning. Every attempt yields a verdict and a
//! structured proof log from which the refutation can be reconstructed.

pub mod config;
pub mod error;
pub mod external;
pub mod logic;
pub mod parser;
pub mod prover;
pub mod simplifying;
pub mod trace;
pub mod unification;

// Re-export commonly used types from logic
pub use logic::{Clause, ClauseId, ClauseSource, Literal, Substitution, Term, Variable};

pub use config::{ConfigError, ProverConfig, SubsumptionMode};
pub use error::{NormalizationError, ParseError, ParseErrorKind, PipelineError, ProveError};
pub use external::{Explainer, Formalizer, PipelineOutcome, ProofPipeline};
pub use parser::{parse, Expression, Normalizer};
pub use prover::{prove, prove_goal, prove_with_config, Prover, Verdict};
pub use trace::{ClauseRecord, LogEntry, ProofLog};
pub use unification::{unify, UnificationError};
