//! Recursive-descent parser for formula text
//!
//! The parser works directly on the character sequence of the input so that
//! every error can point at a character index. Grouping is driven entirely by
//! parentheses: the first `→`, `∧` or `∨` at parenthesis depth 0 splits a
//! formula, with no precedence among the three. A leading `¬` or quantifier
//! run therefore binds tighter than any binary connective.
//!
//! Nesting deeper than [`MAX_NESTING`] levels is rejected with
//! [`ParseErrorKind::TooDeep`]; the normalization passes recurse over the
//! same structure.

use super::expression::{
    ConnectiveNode, Expression, Operator, PredicateAtom, QuantifierBinding, QuantifierKind,
};
use crate::error::{ParseError, ParseErrorKind};

/// Deepest accepted nesting of negations, quantifiers, connectives,
/// parentheses and argument terms
pub const MAX_NESTING: usize = 256;

/// Parse a formula into an expression tree.
///
/// Returns `Ok(None)` for an empty (or all-whitespace) formula.
pub fn parse(formula: &str) -> Result<Option<Expression>, ParseError> {
    let chars: Vec<char> = formula.chars().collect();
    check_balance(&chars)?;

    let parser = FormulaParser { chars: &chars };
    let (start, end) = parser.trim(0, chars.len());
    if start == end {
        return Ok(None);
    }
    parser.parse_span(start, end, 0).map(Some)
}

/// Report the first unmatched parenthesis, if any
fn check_balance(chars: &[char]) -> Result<(), ParseError> {
    let mut open = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' => open.push(i),
            ')' => {
                if open.pop().is_none() {
                    return Err(ParseError::new(ParseErrorKind::UnbalancedParenthesis, i));
                }
            }
            _ => {}
        }
    }
    match open.first() {
        Some(&i) => Err(ParseError::new(ParseErrorKind::UnbalancedParenthesis, i)),
        None => Ok(()),
    }
}

struct FormulaParser<'a> {
    chars: &'a [char],
}

impl<'a> FormulaParser<'a> {
    /// Shrink `[start, end)` past surrounding whitespace
    fn trim(&self, mut start: usize, mut end: usize) -> (usize, usize) {
        while start < end && self.chars[start].is_whitespace() {
            start += 1;
        }
        while end > start && self.chars[end - 1].is_whitespace() {
            end -= 1;
        }
        (start, end)
    }

    /// Index of the `)` closing the `(` at `open`
    fn matching_paren(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, &c) in self.chars.iter().enumerate().skip(open) {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn is_enclosed(&self, start: usize, end: usize) -> bool {
        start < end && self.chars[start] == '(' && self.matching_paren(start) == Some(end - 1)
    }

    /// First binary connective at depth 0, scanning left to right
    fn find_operator(&self, start: usize, end: usize) -> Option<(usize, Operator)> {
        let mut depth = 0usize;
        for i in start..end {
            match self.chars[i] {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                c if depth == 0 => {
                    if let Some(op) = Operator::from_symbol(c) {
                        return Some((i, op));
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn parse_span(&self, start: usize, end: usize, depth: usize) -> Result<Expression, ParseError> {
        let (start, end) = self.trim(start, end);
        if start == end {
            return Err(ParseError::new(ParseErrorKind::EmptySubformula, start));
        }
        if depth >= MAX_NESTING {
            return Err(ParseError::new(ParseErrorKind::TooDeep, start));
        }

        if let Some((pos, op)) = self.find_operator(start, end) {
            let (left_start, left_end) = self.trim(start, pos);
            let (right_start, right_end) = self.trim(pos + 1, end);
            if left_start == left_end || right_start == right_end {
                return Err(ParseError::new(ParseErrorKind::MissingOperand(op), pos));
            }
            let left = self.parse_span(left_start, left_end, depth + 1)?;
            let right = self.parse_span(right_start, right_end, depth + 1)?;
            return Ok(Expression::binary(op, left, right));
        }

        let first = self.chars[start];
        if first == '¬' {
            return Ok(self.parse_span(start + 1, end, depth + 1)?.negated());
        }
        if QuantifierKind::from_symbol(first).is_some() {
            return self.parse_quantified(start, end, depth);
        }
        if self.is_enclosed(start, end) {
            return self.parse_span(start + 1, end - 1, depth + 1);
        }
        self.parse_atom(start, end, depth).map(Expression::Predicate)
    }

    /// A run of quantifier-variable pairs followed by the formula they scope.
    ///
    /// A single quantifier written directly before a predicate is glued to
    /// that predicate; otherwise the run scopes the whole remainder.
    fn parse_quantified(
        &self,
        start: usize,
        end: usize,
        depth: usize,
    ) -> Result<Expression, ParseError> {
        let mut run = Vec::new();
        let mut i = start;
        while i < end {
            let Some(kind) = QuantifierKind::from_symbol(self.chars[i]) else {
                break;
            };
            // Each binding becomes one level of the normalized formula
            if depth + run.len() >= MAX_NESTING {
                return Err(ParseError::new(ParseErrorKind::TooDeep, i));
            }
            let var_pos = i + 1;
            let variable = match self.chars.get(var_pos) {
                Some(&c) if var_pos < end && c.is_lowercase() => c,
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidQuantifierVariable,
                        var_pos,
                    ))
                }
            };
            // Variables are a single letter: `∀xy` is rejected, not read as `∀x y`
            if let Some(&next) = self.chars.get(var_pos + 1) {
                if var_pos + 1 < end && (next.is_lowercase() || next.is_numeric() || next == '_') {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidQuantifierVariable,
                        var_pos + 1,
                    ));
                }
            }
            run.push(QuantifierBinding::new(kind, variable.to_string()));
            i = self.trim(var_pos + 1, end).0;
        }

        let (body_start, body_end) = self.trim(i, end);
        if body_start == body_end {
            return Err(ParseError::new(ParseErrorKind::EmptySubformula, body_start));
        }
        let parenthesized = self.is_enclosed(body_start, body_end);
        let body = self.parse_span(body_start, body_end, depth + run.len())?;

        match body {
            Expression::Predicate(mut atom)
                if run.len() == 1 && !parenthesized && atom.quantifier.is_none() =>
            {
                atom.quantifier = run.pop();
                Ok(Expression::Predicate(atom))
            }
            Expression::Connective(mut node) if !node.negated => {
                run.append(&mut node.quantifiers);
                node.quantifiers = run;
                Ok(Expression::Connective(node))
            }
            body => Ok(Expression::Connective(ConnectiveNode::quantified(run, body))),
        }
    }

    fn parse_atom(
        &self,
        start: usize,
        end: usize,
        depth: usize,
    ) -> Result<PredicateAtom, ParseError> {
        let mut i = start;
        while i < end && self.chars[i] != '(' {
            let c = self.chars[i];
            if !(c.is_alphanumeric() || c == '_') {
                return Err(ParseError::new(ParseErrorKind::UnexpectedCharacter(c), i));
            }
            i += 1;
        }
        if i == start {
            return Err(ParseError::new(ParseErrorKind::EmptyPredicateName, start));
        }
        let name: String = self.chars[start..i].iter().collect();
        if i == end {
            return Ok(PredicateAtom::new(name, None));
        }

        let close = match self.matching_paren(i) {
            Some(close) if close < end => close,
            _ => return Err(ParseError::new(ParseErrorKind::UnbalancedParenthesis, i)),
        };
        let (rest, _) = self.trim(close + 1, end);
        if rest < end {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedCharacter(self.chars[rest]),
                rest,
            ));
        }
        self.check_term_nesting(i + 1, close, depth)?;
        let arguments: String = self.chars[i + 1..close].iter().collect();
        Ok(PredicateAtom::new(name, Some(arguments.trim().to_string())))
    }

    /// Function applications inside an argument list count toward the limit
    fn check_term_nesting(&self, start: usize, end: usize, depth: usize) -> Result<(), ParseError> {
        let mut nesting = depth + 1;
        for i in start..end {
            match self.chars[i] {
                '(' => {
                    nesting += 1;
                    if nesting >= MAX_NESTING {
                        return Err(ParseError::new(ParseErrorKind::TooDeep, i));
                    }
                }
                ')' => nesting = nesting.saturating_sub(1),
                _ => {}
            }
        }
        Ok(())
    }
}
