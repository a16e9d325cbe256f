//! End-to-end refutation scenarios.
//!
//! Every refuted scenario also checks that the reconstructed proof reaches
//! back to the expected input clauses.

use refuter::{
    parse, prove, prove_goal, LogEntry, Normalizer, ProofLog, ProverConfig, Verdict,
};

fn clause_texts(formula: &str) -> Vec<String> {
    let expr = parse(formula).unwrap().unwrap();
    Normalizer::new()
        .clausify(&expr)
        .unwrap()
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn initial_texts(log: &ProofLog) -> Vec<String> {
    match &log.entries()[0] {
        LogEntry::Initial { clauses } => clauses.iter().map(|c| c.text.clone()).collect(),
        other => panic!("expected initial entry first, got {:?}", other),
    }
}

fn last_step(log: &ProofLog) -> usize {
    log.iter()
        .filter_map(|e| match e {
            LogEntry::ResolutionStep { step, .. } => Some(*step),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

// =========================================================================
// Refutations
// =========================================================================

#[test]
fn test_socrates_is_refuted() {
    let (verdict, log) = prove(&[
        "Human(Socrates)",
        "∀x(Human(x)→Mortal(x))",
        "¬Mortal(Socrates)",
    ])
    .unwrap();

    assert_eq!(verdict, Verdict::Refuted);
    assert_eq!(
        initial_texts(&log),
        vec!["Human(Socrates)", "¬Human(x_2) ∨ Mortal(x_2)", "¬Mortal(Socrates)"]
    );
    assert!(last_step(&log) <= 2, "took {} steps", last_step(&log));

    let proof = log.proof_clauses().unwrap();
    for input in 0..3 {
        assert!(proof.contains(&input), "proof {:?} misses clause {}", proof, input);
    }
}

#[test]
fn test_socrates_log_sequence() {
    let (_, log) = prove(&[
        "Human(Socrates)",
        "∀x(Human(x)→Mortal(x))",
        "¬Mortal(Socrates)",
    ])
    .unwrap();

    let steps: Vec<(usize, [usize; 2], usize, String)> = log
        .iter()
        .filter_map(|e| match e {
            LogEntry::ResolutionStep {
                step,
                parent_ids,
                resolvent_id,
                resolvent_text,
                ..
            } => Some((*step, *parent_ids, *resolvent_id, resolvent_text.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        steps,
        vec![
            (1, [0, 1], 3, "Mortal(Socrates)".to_string()),
            (1, [1, 2], 4, "¬Human(Socrates)".to_string()),
            (2, [0, 4], 5, "□".to_string()),
        ]
    );
    assert_eq!(
        log.entries().last(),
        Some(&LogEntry::ContradictionFound {
            clause_id: 5,
            parent_ids: vec![0, 4],
        })
    );
}

#[test]
fn test_complementary_units() {
    let (verdict, log) = prove(&["P(A)", "¬P(A)"]).unwrap();
    assert_eq!(verdict, Verdict::Refuted);
    assert_eq!(log.resolution_steps(), 1);
    assert_eq!(log.proof_clauses(), Some(vec![0, 1, 2]));
}

#[test]
fn test_goal_from_premises() {
    let (verdict, _) = prove_goal(
        &["∀x(Cat(x) → Animal(x))", "Cat(Murka)"],
        "Animal(Murka)",
        &ProverConfig::default(),
    )
    .unwrap();
    assert_eq!(verdict, Verdict::Refuted);
}

#[test]
fn test_chain_through_function_terms() {
    let (verdict, log) = prove(&[
        "∀x(P(x) → Q(f(x)))",
        "∀y(Q(y) → R(y))",
        "P(A)",
        "¬R(f(A))",
    ])
    .unwrap();
    assert_eq!(verdict, Verdict::Refuted);
    let proof = log.proof_clauses().unwrap();
    assert!(proof.starts_with(&[0, 1, 2, 3]));
}

#[test]
fn test_existential_premise_is_skolemized() {
    // Some student is clever, every clever student succeeds, nobody succeeds
    let (verdict, _) = prove(&[
        "∃x(Student(x) ∧ Clever(x))",
        "∀x(Clever(x) → Succeeds(x))",
        "¬∃x Succeeds(x)",
    ])
    .unwrap();
    assert_eq!(verdict, Verdict::Refuted);
}

// =========================================================================
// Saturation without contradiction
// =========================================================================

#[test]
fn test_unrelated_atoms_are_not_refuted() {
    let (verdict, log) = prove(&["P(a)", "Q(b)"]).unwrap();
    assert_eq!(verdict, Verdict::NotRefuted);
    assert_eq!(log.resolution_steps(), 0);
    assert_eq!(log.len(), 2);
    assert_eq!(log.entries()[1], LogEntry::NoNewClauses);
}

#[test]
fn test_satisfiable_chain_saturates() {
    let (verdict, log) = prove(&["P(A)", "∀x(P(x) → Q(x))"]).unwrap();
    assert_eq!(verdict, Verdict::NotRefuted);
    assert_eq!(log.resolution_steps(), 1);
    assert_eq!(log.entries().last(), Some(&LogEntry::NoNewClauses));
}

// =========================================================================
// Normalization
// =========================================================================

#[test]
fn test_distribution_gives_two_clauses() {
    assert_eq!(clause_texts("(A ∧ B) ∨ C"), vec!["A ∨ C", "B ∨ C"]);
}

#[test]
fn test_skolem_function_of_universal() {
    assert_eq!(clause_texts("∀x∃y Loves(x,y)"), vec!["Loves(x, f0(x))"]);
}

#[test]
fn test_skolem_counter_spans_formulas() {
    let mut normalizer = Normalizer::new();
    let first = parse("∃x P(x)").unwrap().unwrap();
    let second = parse("∃x Q(x)").unwrap().unwrap();
    let a = normalizer.normalize(&first, 1).unwrap();
    let b = normalizer.normalize(&second, 2).unwrap();
    assert_eq!(a[0].to_string(), "P(C0)");
    assert_eq!(b[0].to_string(), "Q(C1)");
}

#[test]
fn test_skolem_function_avoids_input_symbols() {
    // f0 is taken by the second formula, so y becomes f1(x)
    let (verdict, log) = prove(&["∀x∃y R(x, y)", "∀z ¬R(z, f0(z))"]).unwrap();
    assert_eq!(verdict, Verdict::NotRefuted);
    assert_eq!(log.resolution_steps(), 0);
    assert_eq!(
        initial_texts(&log),
        vec!["R(x_1, f1(x_1))", "¬R(z_2, f0(z_2))"]
    );
}

#[test]
fn test_skolem_constant_avoids_later_input_constant() {
    let (verdict, log) = prove(&["∃x P(x)", "¬P(C0)"]).unwrap();
    assert_eq!(verdict, Verdict::NotRefuted);
    assert_eq!(initial_texts(&log), vec!["P(C1)", "¬P(C0)"]);
}
