//! Argument-list parsing: raw argument text to structured terms
//!
//! A bare identifier starting with a lowercase letter is a variable, any other
//! bare identifier is a constant, and an identifier immediately followed by a
//! parenthesized list is a function application.

use crate::error::NormalizationError;
use crate::logic::Term;
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map},
    multi::separated_list1,
    sequence::{delimited, preceded, tuple},
    IResult,
};

/// Parse the argument text of `predicate` into terms.
///
/// Blank text means a predicate applied to no arguments.
pub fn parse_arguments(predicate: &str, arguments: &str) -> Result<Vec<Term>, NormalizationError> {
    if arguments.trim().is_empty() {
        return Ok(Vec::new());
    }
    check_argument_shape(predicate, arguments)?;

    match all_consuming(delimited(multispace0, parse_term_list, multispace0))(arguments) {
        Ok((_, terms)) => Ok(terms),
        Err(_) => Err(NormalizationError::InvalidTerm(arguments.trim().to_string())),
    }
}

/// Parse a single term, e.g. `f(x, A)`
pub fn parse_term_text(text: &str) -> Result<Term, NormalizationError> {
    match all_consuming(delimited(multispace0, parse_term, multispace0))(text) {
        Ok((_, term)) => Ok(term),
        Err(_) => Err(NormalizationError::InvalidTerm(text.trim().to_string())),
    }
}

/// Reject unbalanced parentheses and empty list entries before term parsing
fn check_argument_shape(predicate: &str, arguments: &str) -> Result<(), NormalizationError> {
    let malformed = || NormalizationError::MalformedArguments {
        predicate: predicate.to_string(),
        arguments: arguments.to_string(),
    };
    let empty = || NormalizationError::EmptyArgument {
        predicate: predicate.to_string(),
    };

    let mut depth = 0usize;
    let mut entry_empty = true;
    for c in arguments.chars() {
        match c {
            '(' => {
                depth += 1;
                entry_empty = true;
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(malformed)?;
                if entry_empty {
                    return Err(empty());
                }
            }
            ',' => {
                if entry_empty {
                    return Err(empty());
                }
                entry_empty = true;
            }
            c if c.is_whitespace() => {}
            _ => entry_empty = false,
        }
    }
    if depth != 0 {
        return Err(malformed());
    }
    if entry_empty {
        return Err(empty());
    }
    Ok(())
}

fn parse_term_list(input: &str) -> IResult<&str, Vec<Term>> {
    separated_list1(
        tuple((multispace0, char(','), multispace0)),
        preceded(multispace0, parse_term),
    )(input)
}

/// Parse a term
fn parse_term(input: &str) -> IResult<&str, Term> {
    alt((parse_function_term, parse_symbol_term))(input)
}

/// Parse a function term
fn parse_function_term(input: &str) -> IResult<&str, Term> {
    let (input, name) = parse_identifier(input)?;
    let (input, _) = char('(')(input)?;
    let (input, args) = parse_term_list(input)?;
    let (input, _) = preceded(multispace0, char(')'))(input)?;
    Ok((input, Term::function(name, args)))
}

/// Parse a variable or constant
fn parse_symbol_term(input: &str) -> IResult<&str, Term> {
    map(parse_identifier, |name: &str| {
        if name.chars().next().is_some_and(char::is_lowercase) {
            Term::var(name)
        } else {
            Term::constant(name)
        }
    })(input)
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}
