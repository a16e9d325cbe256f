//! formalize → prove → explain with stand-in collaborators.

use refuter::{
    Explainer, Formalizer, PipelineError, ProofLog, ProofPipeline, ProveError, ProverConfig,
    Verdict,
};

/// Returns a fixed formula list regardless of the text
struct Canned(Vec<&'static str>);

impl Formalizer for Canned {
    fn formalize(&self, _text: &str) -> Result<Vec<String>, String> {
        Ok(self.0.iter().map(|f| f.to_string()).collect())
    }
}

struct Unavailable;

impl Formalizer for Unavailable {
    fn formalize(&self, _text: &str) -> Result<Vec<String>, String> {
        Err("service unavailable".to_string())
    }
}

impl Explainer for Unavailable {
    fn explain(&self, _log: &ProofLog, _verdict: Verdict) -> Result<String, String> {
        Err("service unavailable".to_string())
    }
}

/// Summarizes the verdict and the proof length
struct Summary;

impl Explainer for Summary {
    fn explain(&self, log: &ProofLog, verdict: Verdict) -> Result<String, String> {
        Ok(format!("{} after {} resolution steps", verdict, log.resolution_steps()))
    }
}

const SOCRATES: &str = "Socrates is a human. All humans are mortal. Prove that Socrates is mortal.";

#[test]
fn test_last_formula_becomes_negated_goal() {
    let pipeline = ProofPipeline::new(
        Canned(vec!["Human(Socrates)", "∀x(Human(x) → Mortal(x))", "Mortal(Socrates)"]),
        Summary,
    );
    let outcome = pipeline.run(SOCRATES).unwrap();
    assert_eq!(outcome.verdict, Verdict::Refuted);
    assert_eq!(outcome.formulas.len(), 3);
    assert_eq!(outcome.formulas[2], "¬(Mortal(Socrates))");
    assert_eq!(
        outcome.explanation,
        format!("refuted after {} resolution steps", outcome.log.resolution_steps())
    );
}

#[test]
fn test_supplied_negation_is_kept() {
    let pipeline = ProofPipeline::new(
        Canned(vec!["Human(Socrates)", "∀x(Human(x) → Mortal(x))", "¬Mortal(Socrates)"]),
        Summary,
    );
    let outcome = pipeline.run(SOCRATES).unwrap();
    assert_eq!(outcome.formulas.len(), 3);
    assert_eq!(outcome.verdict, Verdict::Refuted);
}

#[test]
fn test_unprovable_goal() {
    let pipeline = ProofPipeline::new(Canned(vec!["Cat(Murka)", "Dog(Rex)"]), Summary);
    let outcome = pipeline.run("Murka is a cat. Rex is a dog.").unwrap();
    assert_eq!(outcome.verdict, Verdict::NotRefuted);
    assert_eq!(outcome.explanation, "not refuted after 0 resolution steps");
}

#[test]
fn test_pipeline_respects_config() {
    let config = ProverConfig {
        max_steps: 3,
        ..Default::default()
    };
    let pipeline = ProofPipeline::with_config(
        Canned(vec!["P(A)", "∀x(P(x) → P(f(x)))", "¬Q(A)"]),
        Summary,
        config,
    );
    let outcome = pipeline.run("").unwrap();
    assert_eq!(outcome.verdict, Verdict::Undetermined);
}

#[test]
fn test_malformed_formalizer_output_is_a_parse_error() {
    let pipeline = ProofPipeline::new(Canned(vec!["Human(Socrates", "Mortal(Socrates)"]), Summary);
    match pipeline.run(SOCRATES) {
        Err(PipelineError::Prove(ProveError::Parse { index, .. })) => assert_eq!(index, 1),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_collaborator_failures() {
    let pipeline = ProofPipeline::new(Unavailable, Summary);
    assert_eq!(
        pipeline.run(SOCRATES),
        Err(PipelineError::Formalize("service unavailable".to_string()))
    );

    let pipeline = ProofPipeline::new(Canned(vec!["P(A)", "¬P(A)"]), Unavailable);
    assert_eq!(
        pipeline.run(SOCRATES),
        Err(PipelineError::Explain("service unavailable".to_string()))
    );
}
