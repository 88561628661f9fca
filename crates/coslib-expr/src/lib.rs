//! # coslib-expr
//!
//! Compiler for the anonymous-function notation used in parameter sheets.
//!
//! This crate provides:
//! - Expression parsing (text → AST) with a closed grammar
//! - Expression evaluation (AST → `f64`)
//! - `@(x) expr1, expr2` batch compilation into callables
//!
//! No host code is ever evaluated: text that is not arithmetic over the bound
//! variable, `pi` and the built-in functions is rejected at compile time.
//!
//! ## Example
//!
//! ```rust
//! use coslib_expr::compile;
//!
//! let ocp = compile("@(x) 0.7222 + 0.1387*x + 0.029*x.^0.5").unwrap();
//! let u = ocp[0].call(0.25);
//! assert!((u - (0.7222 + 0.1387 * 0.25 + 0.029 * 0.5)).abs() < 1e-12);
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{BinaryOperator, Expr, Function, UnaryOperator};
pub use compiler::{compile, rewrite_operators, CompiledExpression};
pub use error::{ExprError, ExprResult};
pub use evaluator::evaluate;
pub use parser::parse_expression;
