//! Expression abstract syntax tree

/// Expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal (constants such as `pi` are folded into literals)
    Number(f64),
    /// The bound variable
    Variable,
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    /// Call of a built-in function
    Call { function: Function, arg: Box<Expr> },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

/// Built-in elementwise functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sech,
    Exp,
    Sqrt,
    Log,
    Abs,
    Sinh,
    Cosh,
    Tanh,
}

impl Function {
    /// Look up a function by name (case-sensitive, as in the source notation)
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "sech" => Function::Sech,
            "exp" => Function::Exp,
            "sqrt" => Function::Sqrt,
            "log" => Function::Log,
            "abs" => Function::Abs,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            _ => return None,
        })
    }

    /// The function name
    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Sech => "sech",
            Function::Exp => "exp",
            Function::Sqrt => "sqrt",
            Function::Log => "log",
            Function::Abs => "abs",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
        }
    }

    /// Apply the function to one value
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Sech => 1.0 / x.cosh(),
            Function::Exp => x.exp(),
            Function::Sqrt => x.sqrt(),
            // Natural log
            Function::Log => x.ln(),
            Function::Abs => x.abs(),
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
        }
    }
}
