//! Expression evaluator
//!
//! Evaluates an [`Expr`] for one value of the bound variable. Parsing has
//! already rejected everything that could fail, so evaluation is total and
//! follows IEEE semantics (`1/0` is `inf`, `sqrt(-1)` is `NaN`).

use crate::ast::{BinaryOperator, Expr, UnaryOperator};

/// Evaluate `expr` with the bound variable set to `x`
pub fn evaluate(expr: &Expr, x: f64) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Variable => x,
        Expr::UnaryOp { op, operand } => {
            let v = evaluate(operand, x);
            match op {
                UnaryOperator::Negate => -v,
            }
        }
        Expr::BinaryOp { op, left, right } => {
            let l = evaluate(left, x);
            let r = evaluate(right, x);
            match op {
                BinaryOperator::Add => l + r,
                BinaryOperator::Subtract => l - r,
                BinaryOperator::Multiply => l * r,
                BinaryOperator::Divide => l / r,
                BinaryOperator::Power => pow(l, r),
            }
        }
        Expr::Call { function, arg } => function.apply(evaluate(arg, x)),
    }
}

/// Power with integer exponents taken exactly
fn pow(base: f64, exp: f64) -> f64 {
    if exp.fract() == 0.0 && exp.abs() <= i32::MAX as f64 {
        base.powi(exp as i32)
    } else {
        base.powf(exp)
    }
}
