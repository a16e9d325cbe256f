//! Expression trees produced by the formula parser
//!
//! An expression tree keeps the surface structure of a formula: where the
//! quantifiers were written, which nodes carry a leading negation, and the raw
//! argument text of each predicate. The normalizer lowers it to a
//! [`Formula`](super::cnf_conversion::Formula) before any rewriting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantifierKind {
    ForAll,
    Exists,
}

impl QuantifierKind {
    pub fn symbol(self) -> char {
        match self {
            QuantifierKind::ForAll => '∀',
            QuantifierKind::Exists => '∃',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '∀' => Some(QuantifierKind::ForAll),
            '∃' => Some(QuantifierKind::Exists),
            _ => None,
        }
    }

    /// ∀ ↔ ∃
    pub fn dual(self) -> Self {
        match self {
            QuantifierKind::ForAll => QuantifierKind::Exists,
            QuantifierKind::Exists => QuantifierKind::ForAll,
        }
    }
}

/// A quantifier together with the variable it binds, e.g. `∀x`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantifierBinding {
    pub kind: QuantifierKind,
    pub variable: String,
}

impl QuantifierBinding {
    pub fn new(kind: QuantifierKind, variable: impl Into<String>) -> Self {
        QuantifierBinding {
            kind,
            variable: variable.into(),
        }
    }

    pub fn dual(&self) -> Self {
        QuantifierBinding {
            kind: self.kind.dual(),
            variable: self.variable.clone(),
        }
    }
}

impl fmt::Display for QuantifierBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.symbol(), self.variable)
    }
}

/// Binary connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Implies,
    And,
    Or,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Implies => '→',
            Operator::And => '∧',
            Operator::Or => '∨',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '→' => Some(Operator::Implies),
            '∧' => Some(Operator::And),
            '∨' => Some(Operator::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An atomic predicate as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateAtom {
    /// Quantifier written directly in front of the predicate, e.g. `∃xP(x)`
    pub quantifier: Option<QuantifierBinding>,
    pub negated: bool,
    pub name: String,
    /// Raw text between the parentheses; `None` for a bare name
    pub arguments: Option<String>,
}

impl PredicateAtom {
    pub fn new(name: impl Into<String>, arguments: Option<String>) -> Self {
        PredicateAtom {
            quantifier: None,
            negated: false,
            name: name.into(),
            arguments,
        }
    }
}

/// A connective node: quantifiers scoped over an optional binary operator
///
/// `operator` and `right` are either both present or both absent; a node
/// without an operator scopes its quantifiers over `left` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectiveNode {
    pub quantifiers: Vec<QuantifierBinding>,
    pub operator: Option<Operator>,
    pub negated: bool,
    pub left: Box<Expression>,
    pub right: Option<Box<Expression>>,
}

impl ConnectiveNode {
    pub fn binary(operator: Operator, left: Expression, right: Expression) -> Self {
        ConnectiveNode {
            quantifiers: Vec::new(),
            operator: Some(operator),
            negated: false,
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    pub fn quantified(quantifiers: Vec<QuantifierBinding>, body: Expression) -> Self {
        ConnectiveNode {
            quantifiers,
            operator: None,
            negated: false,
            left: Box::new(body),
            right: None,
        }
    }

    /// Leading text that forces the core to be parenthesized
    fn prefix(&self) -> String {
        let mut out = String::new();
        if self.negated {
            out.push('¬');
        }
        for q in &self.quantifiers {
            out.push_str(&q.to_string());
        }
        out
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Predicate(PredicateAtom),
    Connective(ConnectiveNode),
}

impl Expression {
    pub fn atom(name: impl Into<String>, arguments: Option<&str>) -> Self {
        Expression::Predicate(PredicateAtom::new(name, arguments.map(str::to_string)))
    }

    pub fn binary(operator: Operator, left: Expression, right: Expression) -> Self {
        Expression::Connective(ConnectiveNode::binary(operator, left, right))
    }

    /// Whole-node negation of this expression.
    ///
    /// Negating an atom flips its negation flag; a quantifier glued to the atom
    /// moves outside the negation and so changes kind (¬∀xP ≡ ∃x¬P).
    pub fn negated(self) -> Expression {
        match self {
            Expression::Predicate(mut atom) => {
                atom.negated = !atom.negated;
                atom.quantifier = atom.quantifier.map(|q| q.dual());
                Expression::Predicate(atom)
            }
            Expression::Connective(mut node) => {
                node.negated = !node.negated;
                Expression::Connective(node)
            }
        }
    }

    pub fn is_predicate(&self) -> bool {
        matches!(self, Expression::Predicate(_))
    }

    /// Render as a child of a binary node: a bare binary node needs parentheses
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Connective(node) if node.operator.is_some() && node.prefix().is_empty() => {
                write!(f, "({})", self)
            }
            _ => write!(f, "{}", self),
        }
    }
}

impl fmt::Display for PredicateAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(q) = &self.quantifier {
            write!(f, "{}", q)?;
        }
        if self.negated {
            write!(f, "¬")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(args) = &self.arguments {
            write!(f, "({})", args)?;
        }
        Ok(())
    }
}

impl fmt::Display for ConnectiveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.prefix();
        if !prefix.is_empty() {
            write!(f, "{}(", prefix)?;
        }
        match (&self.operator, &self.right) {
            (Some(op), Some(right)) => {
                self.left.fmt_operand(f)?;
                write!(f, " {} ", op)?;
                right.fmt_operand(f)?;
            }
            _ => write!(f, "{}", self.left)?,
        }
        if !prefix.is_empty() {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Predicate(atom) => write!(f, "{}", atom),
            Expression::Connective(node) => write!(f, "{}", node),
        }
    }
}
