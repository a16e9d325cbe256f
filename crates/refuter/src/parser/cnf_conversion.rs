//! Conversion from expression trees to CNF
//!
//! The conversion runs as a sequence of pure passes over [`Formula`]:
//! implication elimination, negation push-down, prenex, variable
//! standardization, Skolemization, dropping universals, distribution of ∨
//! over ∧ and finally splitting into clauses. [`Normalizer`] chains them and
//! owns the Skolem counter, which is shared by every formula of one proof
//! attempt so Skolem symbols are never reused.

use super::expression::{Expression, Operator, QuantifierKind};
use super::terms::parse_arguments;
use crate::error::NormalizationError;
use crate::logic::{Clause, Literal, Term, Variable};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// First-order formula with structured terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// Atomic formula; a negative literal is a negated atom
    Atom(Literal),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction
    And(Box<Formula>, Box<Formula>),
    /// Disjunction
    Or(Box<Formula>, Box<Formula>),
    /// Implication
    Implies(Box<Formula>, Box<Formula>),
    /// Quantified formula
    Quantified(QuantifierKind, Variable, Box<Formula>),
}

/// A quantifier prefix over a quantifier-free matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prenex {
    /// Outermost quantifier first
    pub prefix: Vec<(QuantifierKind, Variable)>,
    pub matrix: Formula,
}

impl Formula {
    fn and(a: Formula, b: Formula) -> Formula {
        Formula::And(Box::new(a), Box::new(b))
    }

    fn or(a: Formula, b: Formula) -> Formula {
        Formula::Or(Box::new(a), Box::new(b))
    }

    fn not(a: Formula) -> Formula {
        Formula::Not(Box::new(a))
    }

    /// Lower an expression tree, parsing every argument string into terms
    pub fn from_expression(expr: &Expression) -> Result<Formula, NormalizationError> {
        match expr {
            Expression::Predicate(atom) => {
                let args = parse_arguments(&atom.name, atom.arguments.as_deref().unwrap_or(""))?;
                let literal = Literal {
                    predicate: atom.name.clone(),
                    args,
                    polarity: !atom.negated,
                };
                let formula = Formula::Atom(literal);
                Ok(match &atom.quantifier {
                    Some(q) => {
                        Formula::Quantified(q.kind, Variable::new(&q.variable), Box::new(formula))
                    }
                    None => formula,
                })
            }
            Expression::Connective(node) => {
                let left = Formula::from_expression(&node.left)?;
                let mut formula = match (node.operator, &node.right) {
                    (Some(op), Some(right)) => {
                        let right = Formula::from_expression(right)?;
                        match op {
                            Operator::Implies => Formula::Implies(Box::new(left), Box::new(right)),
                            Operator::And => Formula::and(left, right),
                            Operator::Or => Formula::or(left, right),
                        }
                    }
                    (None, None) => left,
                    (Some(op), None) => {
                        return Err(NormalizationError::UnexpectedConnective(format!(
                            "{} without right operand",
                            op
                        )))
                    }
                    (None, Some(_)) => {
                        return Err(NormalizationError::UnexpectedConnective(
                            "right operand without operator".to_string(),
                        ))
                    }
                };
                for q in node.quantifiers.iter().rev() {
                    formula =
                        Formula::Quantified(q.kind, Variable::new(&q.variable), Box::new(formula));
                }
                if node.negated {
                    formula = Formula::not(formula);
                }
                Ok(formula)
            }
        }
    }

    /// Get all free variables in the formula
    pub fn free_variables(&self) -> HashSet<Variable> {
        match self {
            Formula::Atom(lit) => {
                let mut vars = HashSet::new();
                lit.collect_variables(&mut vars);
                vars
            }
            Formula::Not(f) => f.free_variables(),
            Formula::And(f1, f2) | Formula::Or(f1, f2) | Formula::Implies(f1, f2) => {
                let mut vars = f1.free_variables();
                vars.extend(f2.free_variables());
                vars
            }
            Formula::Quantified(_, var, f) => {
                let mut vars = f.free_variables();
                vars.remove(var);
                vars
            }
        }
    }

    /// Collect every constant and function name
    pub fn collect_symbols(&self, out: &mut HashSet<String>) {
        match self {
            Formula::Atom(lit) => {
                for arg in &lit.args {
                    arg.collect_symbols(out);
                }
            }
            Formula::Not(f) | Formula::Quantified(_, _, f) => f.collect_symbols(out),
            Formula::And(f1, f2) | Formula::Or(f1, f2) | Formula::Implies(f1, f2) => {
                f1.collect_symbols(out);
                f2.collect_symbols(out);
            }
        }
    }

    /// Rewrite `A → B` as `¬A ∨ B` everywhere
    pub fn eliminate_implications(self) -> Formula {
        match self {
            Formula::Atom(_) => self,
            Formula::Not(f) => Formula::not(f.eliminate_implications()),
            Formula::And(a, b) => {
                Formula::and(a.eliminate_implications(), b.eliminate_implications())
            }
            Formula::Or(a, b) => {
                Formula::or(a.eliminate_implications(), b.eliminate_implications())
            }
            Formula::Implies(a, b) => Formula::or(
                Formula::not(a.eliminate_implications()),
                b.eliminate_implications(),
            ),
            Formula::Quantified(q, v, f) => {
                Formula::Quantified(q, v, Box::new(f.eliminate_implications()))
            }
        }
    }

    /// Convert to negation normal form: negation only on atoms, as literal polarity
    pub fn push_negations(self) -> Formula {
        self.nnf(false)
    }

    fn nnf(self, negate: bool) -> Formula {
        match self {
            Formula::Atom(lit) => Formula::Atom(if negate { lit.complement() } else { lit }),
            Formula::Not(f) => f.nnf(!negate),
            // De Morgan
            Formula::And(a, b) if negate => Formula::or(a.nnf(true), b.nnf(true)),
            Formula::And(a, b) => Formula::and(a.nnf(false), b.nnf(false)),
            Formula::Or(a, b) if negate => Formula::and(a.nnf(true), b.nnf(true)),
            Formula::Or(a, b) => Formula::or(a.nnf(false), b.nnf(false)),
            // ¬(A → B) = A ∧ ¬B
            Formula::Implies(a, b) if negate => Formula::and(a.nnf(false), b.nnf(true)),
            Formula::Implies(a, b) => Formula::or(a.nnf(true), b.nnf(false)),
            Formula::Quantified(q, v, f) => {
                let q = if negate { q.dual() } else { q };
                Formula::Quantified(q, v, Box::new(f.nnf(negate)))
            }
        }
    }

    /// Move every quantifier to the front.
    ///
    /// Bindings are collected outer before inner and left before right. A
    /// bound variable whose name is already taken (by a free variable or an
    /// earlier binding) is renamed first so that no occurrence changes binder.
    pub fn to_prenex(self) -> Prenex {
        let formula = self.eliminate_implications().push_negations();
        let mut taken: HashSet<String> = formula
            .free_variables()
            .into_iter()
            .map(|v| v.name)
            .collect();
        let mut prefix = Vec::new();
        let matrix = formula.pull_quantifiers(&mut prefix, &mut taken);
        Prenex { prefix, matrix }
    }

    fn pull_quantifiers(
        self,
        prefix: &mut Vec<(QuantifierKind, Variable)>,
        taken: &mut HashSet<String>,
    ) -> Formula {
        match self {
            Formula::Quantified(q, var, body) => {
                let (var, body) = if taken.contains(&var.name) {
                    let fresh = Variable::new(fresh_name(&var.name, taken));
                    let body = body.replace_variable(&var, &Term::Variable(fresh.clone()));
                    (fresh, body)
                } else {
                    (var, *body)
                };
                taken.insert(var.name.clone());
                prefix.push((q, var));
                body.pull_quantifiers(prefix, taken)
            }
            Formula::And(a, b) => {
                let a = a.pull_quantifiers(prefix, taken);
                let b = b.pull_quantifiers(prefix, taken);
                Formula::and(a, b)
            }
            Formula::Or(a, b) => {
                let a = a.pull_quantifiers(prefix, taken);
                let b = b.pull_quantifiers(prefix, taken);
                Formula::or(a, b)
            }
            other => other,
        }
    }

    /// Replace free occurrences of `var` with `term`
    pub fn replace_variable(self, var: &Variable, term: &Term) -> Formula {
        match self {
            Formula::Atom(lit) => Formula::Atom(lit.replace_variable(var, term)),
            Formula::Not(f) => Formula::not(f.replace_variable(var, term)),
            Formula::And(a, b) => {
                Formula::and(a.replace_variable(var, term), b.replace_variable(var, term))
            }
            Formula::Or(a, b) => {
                Formula::or(a.replace_variable(var, term), b.replace_variable(var, term))
            }
            Formula::Implies(a, b) => Formula::Implies(
                Box::new(a.replace_variable(var, term)),
                Box::new(b.replace_variable(var, term)),
            ),
            // Shadowed
            Formula::Quantified(q, v, f) if &v == var => Formula::Quantified(q, v, f),
            Formula::Quantified(q, v, f) => {
                Formula::Quantified(q, v, Box::new(f.replace_variable(var, term)))
            }
        }
    }

    /// Apply `f` to every literal
    fn map_literals(self, f: &dyn Fn(Literal) -> Literal) -> Formula {
        match self {
            Formula::Atom(lit) => Formula::Atom(f(lit)),
            Formula::Not(a) => Formula::not(a.map_literals(f)),
            Formula::And(a, b) => Formula::and(a.map_literals(f), b.map_literals(f)),
            Formula::Or(a, b) => Formula::or(a.map_literals(f), b.map_literals(f)),
            Formula::Implies(a, b) => {
                Formula::Implies(Box::new(a.map_literals(f)), Box::new(b.map_literals(f)))
            }
            Formula::Quantified(q, v, a) => Formula::Quantified(q, v, Box::new(a.map_literals(f))),
        }
    }

    /// Distribute ∨ over ∧ until the formula is a conjunction of disjunctions
    pub fn distribute(self) -> Formula {
        match self {
            Formula::And(a, b) => Formula::and(a.distribute(), b.distribute()),
            Formula::Or(a, b) => distribute_or(a.distribute(), b.distribute()),
            other => other,
        }
    }

    /// Flatten a CNF formula into the literal lists of its clauses
    pub fn split_clauses(self) -> Result<Vec<Vec<Literal>>, NormalizationError> {
        let mut conjuncts = Vec::new();
        collect_conjuncts(self, &mut conjuncts);

        conjuncts
            .into_iter()
            .map(|conjunct| {
                let mut literals = Vec::new();
                collect_disjuncts(conjunct, &mut literals)?;
                Ok(literals)
            })
            .collect()
    }
}

/// `a ∨ b` for CNF operands `a`, `b`, distributed into CNF
fn distribute_or(a: Formula, b: Formula) -> Formula {
    match (a, b) {
        // (A ∧ B) ∨ C => (A ∨ C) ∧ (B ∨ C)
        (Formula::And(a1, a2), b) => {
            Formula::and(distribute_or(*a1, b.clone()), distribute_or(*a2, b))
        }
        // C ∨ (A ∧ B) => (C ∨ A) ∧ (C ∨ B)
        (a, Formula::And(b1, b2)) => {
            Formula::and(distribute_or(a.clone(), *b1), distribute_or(a, *b2))
        }
        (a, b) => Formula::or(a, b),
    }
}

fn collect_conjuncts(formula: Formula, out: &mut Vec<Formula>) {
    match formula {
        Formula::And(a, b) => {
            collect_conjuncts(*a, out);
            collect_conjuncts(*b, out);
        }
        other => out.push(other),
    }
}

fn collect_disjuncts(formula: Formula, out: &mut Vec<Literal>) -> Result<(), NormalizationError> {
    match formula {
        Formula::Or(a, b) => {
            collect_disjuncts(*a, out)?;
            collect_disjuncts(*b, out)
        }
        Formula::Atom(lit) => {
            out.push(lit);
            Ok(())
        }
        Formula::Not(inner) => match *inner {
            Formula::Atom(lit) => {
                out.push(lit.complement());
                Ok(())
            }
            other => Err(NormalizationError::UnexpectedConnective(format!(
                "negation of {}",
                other
            ))),
        },
        other => Err(NormalizationError::UnexpectedConnective(other.to_string())),
    }
}

fn fresh_name(base: &str, taken: &HashSet<String>) -> String {
    let mut k = 1;
    loop {
        let name = format!("{}{}", base, k);
        if !taken.contains(&name) {
            return name;
        }
        k += 1;
    }
}

impl Prenex {
    /// Rename every variable, bound or free, to `name_index`
    pub fn standardize(self, index: usize) -> Prenex {
        let rename = |v: &Variable| Some(Variable::new(format!("{}_{}", v.name, index)));
        Prenex {
            prefix: self
                .prefix
                .into_iter()
                .filter_map(|(q, v)| rename(&v).map(|v| (q, v)))
                .collect(),
            matrix: self.matrix.map_literals(&|lit| lit.rename_variables(&rename)),
        }
    }

    /// Discard the (universal) prefix, leaving the matrix
    pub fn drop_universals(self) -> Formula {
        self.matrix
    }
}

/// Runs the CNF pipeline; one instance per proof attempt
#[derive(Debug, Default)]
pub struct Normalizer {
    skolem_counter: usize,
    /// Constant and function names Skolem symbols must avoid
    reserved: HashSet<String>,
}

impl Normalizer {
    pub fn new() -> Self {
        Normalizer::default()
    }

    /// Keep every constant and function name of `formula` out of the Skolem
    /// namespace.
    ///
    /// Symbols of formulas passed to [`Normalizer::normalize`] are reserved
    /// automatically, but only from that point on; a caller normalizing several
    /// formulas reserves all of them first.
    pub fn reserve_symbols(&mut self, formula: &Formula) {
        formula.collect_symbols(&mut self.reserved);
    }

    /// Normalize the formula with the given index, standardizing its variables apart
    pub fn normalize(
        &mut self,
        expr: &Expression,
        clause_index: usize,
    ) -> Result<Vec<Clause>, NormalizationError> {
        let formula = Formula::from_expression(expr)?;
        self.reserve_symbols(&formula);
        self.normalize_formula(formula, Some(clause_index))
    }

    /// Normalize without renaming variables
    pub fn clausify(&mut self, expr: &Expression) -> Result<Vec<Clause>, NormalizationError> {
        let formula = Formula::from_expression(expr)?;
        self.reserve_symbols(&formula);
        self.normalize_formula(formula, None)
    }

    /// Run the pipeline on an already lowered formula; with an index, its
    /// variables are standardized apart as `name_index`
    pub fn normalize_formula(
        &mut self,
        formula: Formula,
        clause_index: Option<usize>,
    ) -> Result<Vec<Clause>, NormalizationError> {
        let mut prenex = formula.to_prenex();
        if let Some(index) = clause_index {
            prenex = prenex.standardize(index);
        }
        let matrix = self.skolemize(prenex).drop_universals().distribute();

        let clauses: Vec<Clause> = matrix
            .split_clauses()?
            .into_iter()
            .map(Clause::new)
            .collect();
        debug!(index = ?clause_index, clauses = clauses.len(), "normalized");
        Ok(clauses)
    }

    /// Next `<prefix><n>` not taken by an input symbol or an earlier Skolem symbol
    fn fresh_skolem_name(&mut self, prefix: &str) -> String {
        loop {
            let name = format!("{}{}", prefix, self.skolem_counter);
            self.skolem_counter += 1;
            if self.reserved.insert(name.clone()) {
                return name;
            }
        }
    }

    /// Replace every existential with a fresh Skolem term.
    ///
    /// An existential preceded by universals becomes `f<n>(universals...)`,
    /// otherwise the constant `C<n>`. Names already in use are skipped.
    pub fn skolemize(&mut self, prenex: Prenex) -> Prenex {
        let mut universals: Vec<Variable> = Vec::new();
        let mut prefix = Vec::new();
        let mut matrix = prenex.matrix;

        for (q, var) in prenex.prefix {
            match q {
                QuantifierKind::ForAll => {
                    universals.push(var.clone());
                    prefix.push((q, var));
                }
                QuantifierKind::Exists => {
                    let skolem = if universals.is_empty() {
                        Term::constant(self.fresh_skolem_name("C"))
                    } else {
                        Term::function(
                            self.fresh_skolem_name("f"),
                            universals.iter().cloned().map(Term::Variable).collect(),
                        )
                    };
                    matrix = matrix.replace_variable(&var, &skolem);
                }
            }
        }

        Prenex { prefix, matrix }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(lit) => write!(f, "{}", lit),
            Formula::Not(a) => write!(f, "¬({})", a),
            Formula::And(a, b) => write!(f, "({} ∧ {})", a, b),
            Formula::Or(a, b) => write!(f, "({} ∨ {})", a, b),
            Formula::Implies(a, b) => write!(f, "({} → {})", a, b),
            Formula::Quantified(q, v, a) => write!(f, "{}{}({})", q.symbol(), v, a),
        }
    }
}
