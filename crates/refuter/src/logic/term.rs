//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A variable in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

/// A constant symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

/// A function symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
}

/// A term in first-order logic
///
/// Terms are immutable values: substitution and renaming always build new
/// terms and never touch the originals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Build a variable term
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    /// Build a constant term
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(Constant { name: name.into() })
    }

    /// Build a function application
    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Function(FunctionSymbol { name: name.into() }, args)
    }

    /// Check whether the term contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Function(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Collect all variables in this term
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Collect all constant and function names in this term
    pub fn collect_symbols(&self, out: &mut HashSet<String>) {
        match self {
            Term::Variable(_) => {}
            Term::Constant(c) => {
                out.insert(c.name.clone());
            }
            Term::Function(f, args) => {
                out.insert(f.name.clone());
                for arg in args {
                    arg.collect_symbols(out);
                }
            }
        }
    }

    /// Variables in order of first occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut out = Vec::new();
        self.push_variables(&mut out);
        out
    }

    fn push_variables(&self, out: &mut Vec<Variable>) {
        match self {
            Term::Variable(v) => {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.push_variables(out);
                }
            }
        }
    }

    /// Check if `var` occurs anywhere in this term
    pub fn contains_variable(&self, var: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == var,
            Term::Constant(_) => false,
            Term::Function(_, args) => args.iter().any(|arg| arg.contains_variable(var)),
        }
    }

    /// Rename variables through `rename`, leaving unmapped variables untouched
    pub fn rename_variables(&self, rename: &dyn Fn(&Variable) -> Option<Variable>) -> Term {
        match self {
            Term::Variable(v) => match rename(v) {
                Some(renamed) => Term::Variable(renamed),
                None => self.clone(),
            },
            Term::Constant(_) => self.clone(),
            Term::Function(f, args) => Term::Function(
                f.clone(),
                args.iter().map(|arg| arg.rename_variables(rename)).collect(),
            ),
        }
    }

    /// Replace every occurrence of `var` with `replacement`
    pub fn replace_variable(&self, var: &Variable, replacement: &Term) -> Term {
        match self {
            Term::Variable(v) if v == var => replacement.clone(),
            Term::Variable(_) | Term::Constant(_) => self.clone(),
            Term::Function(f, args) => Term::Function(
                f.clone(),
                args.iter()
                    .map(|arg| arg.replace_variable(var, replacement))
                    .collect(),
            ),
        }
    }
}

// Display implementations for pretty printing

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Function(func, args) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_function() {
        let term = Term::function(
            "f",
            vec![Term::var("x"), Term::function("g", vec![Term::constant("A")])],
        );
        assert_eq!(term.to_string(), "f(x, g(A))");
    }

    #[test]
    fn test_variables_in_order_of_occurrence() {
        let term = Term::function("f", vec![Term::var("y"), Term::var("x"), Term::var("y")]);
        let names: Vec<_> = term.variables().into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["y", "x"]);
    }

    #[test]
    fn test_replace_variable_builds_new_term() {
        let original = Term::function("f", vec![Term::var("x")]);
        let replaced = original.replace_variable(&Variable::new("x"), &Term::constant("A"));
        assert_eq!(replaced.to_string(), "f(A)");
        assert_eq!(original.to_string(), "f(x)");
    }

    #[test]
    fn test_is_ground() {
        assert!(Term::function("f", vec![Term::constant("A")]).is_ground());
        assert!(!Term::function("f", vec![Term::var("x")]).is_ground());
    }
}
