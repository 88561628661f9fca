//! Anonymous-function compiler
//!
//! Turns parameter-sheet text of the form `@(x) expr1, expr2` or
//! `@(x) {expr1, expr2}` into one [`CompiledExpression`] per
//! comma-separated sub-expression.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::ast::Expr;
use crate::error::{ExprError, ExprResult};
use crate::evaluator::evaluate;
use crate::parser::parse_expression;

/// Elementwise operator spellings and their scalar equivalents
const OPERATOR_REWRITES: [(&str, &str); 3] = [("./", "/"), (".*", "*"), (".^", "^")];

static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
static OPERATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn prefix_regex() -> &'static Regex {
    PREFIX_REGEX.get_or_init(|| Regex::new(r"@\(.*?\)").expect("prefix pattern is valid"))
}

fn operator_regex() -> &'static Regex {
    OPERATOR_REGEX.get_or_init(|| {
        let keys: Vec<String> = OPERATOR_REWRITES
            .iter()
            .map(|(from, _)| regex::escape(from))
            .collect();
        Regex::new(&format!("({})", keys.join("|"))).expect("operator pattern is valid")
    })
}

/// A compiled single-variable numeric function
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    variable: String,
    source: String,
    ast: Expr,
}

impl CompiledExpression {
    /// Name of the bound variable
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The sub-expression text this was compiled from (after operator rewriting)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression
    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// Evaluate at `x`
    pub fn call(&self, x: f64) -> f64 {
        evaluate(&self.ast, x)
    }

    /// Evaluate elementwise over `xs`
    pub fn map(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.call(x)).collect()
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@({}) {}", self.variable, self.source)
    }
}

/// Compile anonymous-function text into callables
///
/// A single `@(var)` prefix is shared by every sub-expression; text that
/// carries one prefix per sub-expression binds each separately. Braces around
/// the list are optional. An empty body yields no callables.
///
/// # Example
/// ```rust
/// use coslib_expr::compile;
///
/// let fs = compile("@(x) x.*2, x+1").unwrap();
/// assert_eq!(fs.len(), 2);
/// assert_eq!(fs[0].call(3.0), 6.0);
/// assert_eq!(fs[1].call(3.0), 4.0);
/// ```
pub fn compile(text: &str) -> ExprResult<Vec<CompiledExpression>> {
    let variables = bound_variables(text)?;

    let body = prefix_regex().replace_all(text, "");
    let body = rewrite_operators(&body);
    let body: String = body.chars().filter(|c| *c != '{' && *c != '}').collect();

    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items = split_top_level(&body);
    if variables.len() != 1 && variables.len() != items.len() {
        return Err(ExprError::PrefixCount {
            prefixes: variables.len(),
            expressions: items.len(),
        });
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let variable = if variables.len() == 1 {
                &variables[0]
            } else {
                &variables[i]
            };
            let source = item.trim();
            if source.is_empty() {
                return Err(ExprError::Parse(format!(
                    "empty sub-expression {} in '{}'",
                    i + 1,
                    text.trim()
                )));
            }
            Ok(CompiledExpression {
                variable: variable.clone(),
                source: source.to_string(),
                ast: parse_expression(source, variable)?,
            })
        })
        .collect()
}

/// Replace elementwise operators in a single pass
///
/// All keys are matched by one alternation so that `.^` is never seen as a
/// stray `.` followed by `^`.
pub fn rewrite_operators(text: &str) -> String {
    operator_regex()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let matched = &caps[0];
            OPERATOR_REWRITES
                .iter()
                .find(|(from, _)| *from == matched)
                .map_or(matched, |(_, to)| *to)
                .to_string()
        })
        .into_owned()
}

/// Pull the variable names out of every `@(...)` prefix
fn bound_variables(text: &str) -> ExprResult<Vec<String>> {
    let variables: Vec<String> = prefix_regex()
        .find_iter(text)
        .map(|m| {
            m.as_str()
                .trim_start_matches('@')
                .trim_start_matches('(')
                .trim_end_matches(')')
                .trim()
                .to_string()
        })
        .collect();

    if variables.is_empty() {
        return Err(ExprError::MissingPrefix(text.trim().to_string()));
    }

    for var in &variables {
        let mut chars = var.chars();
        let valid = chars
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(ExprError::InvalidVariable(var.clone()));
        }
    }

    Ok(variables)
}

/// Split on commas that are not inside parentheses
fn split_top_level(body: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                items.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&body[start..]);
    items
}
