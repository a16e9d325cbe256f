//! Shape of the serialized proof log.

use refuter::{prove, prove_goal, ProofLog, ProverConfig};
use serde_json::{json, Value};

fn socrates_json() -> Value {
    let (_, log) = prove(&[
        "Human(Socrates)",
        "∀x(Human(x)→Mortal(x))",
        "¬Mortal(Socrates)",
    ])
    .unwrap();
    serde_json::from_str(&log.to_json().unwrap()).unwrap()
}

#[test]
fn test_initial_entry_lists_input_clauses() {
    let log = socrates_json();
    assert_eq!(
        log[0],
        json!({
            "type": "initial",
            "clauses": [
                {"id": 0, "text": "Human(Socrates)", "source": "premise 1"},
                {"id": 1, "text": "¬Human(x_2) ∨ Mortal(x_2)", "source": "premise 2"},
                {"id": 2, "text": "¬Mortal(Socrates)", "source": "premise 3"},
            ]
        })
    );
}

#[test]
fn test_resolution_step_fields() {
    let log = socrates_json();
    assert_eq!(
        log[1],
        json!({
            "type": "resolution_step",
            "step": 1,
            "parent_ids": [0, 1],
            "parent_texts": ["Human(Socrates)", "¬Human(x_2) ∨ Mortal(x_2)"],
            "resolvent_id": 3,
            "resolvent_text": "Mortal(Socrates)",
            "substitution": {"x_2": "Socrates"},
            "resolved_literals": ["Human(Socrates)", "¬Human(x_2)"],
        })
    );
    assert_eq!(log[3]["resolvent_text"], "□");
}

#[test]
fn test_terminal_entries() {
    let log = socrates_json();
    let entries = log.as_array().unwrap();
    assert_eq!(
        entries.last().unwrap(),
        &json!({"type": "contradiction_found", "clause_id": 5, "parent_ids": [0, 4]})
    );

    let (_, log) = prove(&["P(A)", "Q(B)"]).unwrap();
    let value: Value = serde_json::from_str(&log.to_json().unwrap()).unwrap();
    assert_eq!(value[1], json!({"type": "no_new_clauses"}));
}

#[test]
fn test_goal_and_resolvent_sources() {
    let (_, log) = prove_goal(
        &["Human(Socrates)", "∀x(Human(x) → Mortal(x))"],
        "Mortal(Socrates)",
        &ProverConfig::default(),
    )
    .unwrap();
    let value: Value = serde_json::from_str(&log.to_json().unwrap()).unwrap();
    assert_eq!(value[0]["clauses"][2]["source"], "negated goal");
}

#[test]
fn test_log_survives_json_round_trip() {
    let (_, log) = prove(&["P(A) ∨ Q(A)", "¬P(x)", "¬Q(A)"]).unwrap();
    let json = log.to_json().unwrap();
    let restored = ProofLog::from_json(&json).unwrap();
    assert_eq!(restored, log);
    assert_eq!(restored.proof_clauses(), log.proof_clauses());
}

#[test]
fn test_text_rendering() {
    let (_, log) = prove(&["P(A)", "¬P(A)"]).unwrap();
    let text = log.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "initial clauses: [0] P(A) (premise 1); [1] ¬P(A) (premise 2)");
    assert_eq!(lines[1], "step 1: [2] □ from [0] and [1] on P(A) / ¬P(A)");
    assert_eq!(lines[2], "contradiction: [2] □ from [0] and [1]");
}
