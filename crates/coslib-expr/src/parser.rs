//! Expression parser
//!
//! A recursive descent parser for single-variable arithmetic with proper
//! operator precedence. Only the bound variable, numeric literals, `pi` and
//! the built-in functions are accepted; anything else is a parse error.

use crate::ast::{BinaryOperator, Expr, Function, UnaryOperator};
use crate::error::{ExprError, ExprResult};

/// Parse an expression body that binds `variable`
///
/// # Example
/// ```rust
/// use coslib_expr::parse_expression;
///
/// let ast = parse_expression("2*x + sin(x)", "x").unwrap();
/// let ast = parse_expression("-x^2", "x").unwrap();
/// ```
pub fn parse_expression(text: &str, variable: &str) -> ExprResult<Expr> {
    let mut parser = ExprParser::new(text, variable)?;
    let expr = parser.parse_additive()?;

    if parser.current_token != Token::Eof {
        return Err(ExprError::Parse(format!(
            "Unexpected {:?} in '{}'",
            parser.current_token,
            text.trim()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    // Delimiters
    LeftParen,
    RightParen,

    // End of input
    Eof,
}

/// Expression parser
struct ExprParser<'a> {
    input: &'a str,
    variable: &'a str,
    pos: usize,
    current_token: Token,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str, variable: &'a str) -> ExprResult<Self> {
        let mut parser = Self {
            input,
            variable,
            pos: 0,
            current_token: Token::Eof,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> ExprResult<()> {
        self.current_token = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> ExprResult<Token> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '^' => Some(Token::Caret),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = self.pos;
            while self
                .peek_char()
                .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
            {
                self.advance();
            }
            return Ok(Token::Identifier(self.input[start..self.pos].to_string()));
        }

        Err(ExprError::Parse(format!(
            "Unexpected character '{}' at offset {} in '{}'",
            c,
            self.pos,
            self.input.trim()
        )))
    }

    fn scan_number(&mut self) -> ExprResult<Token> {
        let start = self.pos;

        // Integer part
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part, only when digits follow
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            let sign = self
                .peek_char_at(1)
                .map_or(false, |c| c == '+' || c == '-');
            let digit_at = if sign { 2 } else { 1 };
            if self
                .peek_char_at(digit_at)
                .map_or(false, |c| c.is_ascii_digit())
            {
                for _ in 0..digit_at {
                    self.advance();
                }
                while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let num_str = &self.input[start..self.pos];
        num_str
            .parse()
            .map(Token::Number)
            .map_err(|_| ExprError::Parse(format!("Invalid number '{}'", num_str)))
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn consume(&mut self) -> ExprResult<Token> {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> ExprResult<()> {
        if &self.current_token == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(ExprError::Parse(format!(
                "Expected {:?}, got {:?}",
                expected, self.current_token
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Unary: -, +
    // 4. Exponentiation: ^ (right associative, so -x^2 is -(x^2))
    // 5. Primary: literals, variable, function calls, parentheses

    fn parse_additive(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_unary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ExprResult<Expr> {
        match self.current_token {
            Token::Minus => {
                self.consume()?;
                let operand = self.parse_unary()?;
                Ok(Expr::UnaryOp {
                    op: UnaryOperator::Negate,
                    operand: Box::new(operand),
                })
            }
            // Prefix plus (no-op)
            Token::Plus => {
                self.consume()?;
                self.parse_unary()
            }
            _ => self.parse_exponent(),
        }
    }

    fn parse_exponent(&mut self) -> ExprResult<Expr> {
        let left = self.parse_primary()?;

        if self.current_token == Token::Caret {
            self.consume()?;
            // Right associative; the exponent may carry its own sign
            let right = self.parse_unary()?;
            return Ok(Expr::BinaryOp {
                op: BinaryOperator::Power,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> ExprResult<Expr> {
        match self.consume()? {
            Token::Number(n) => Ok(Expr::Number(n)),

            Token::LeftParen => {
                let expr = self.parse_additive()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::Identifier(name) => {
                if self.current_token == Token::LeftParen {
                    return self.parse_function_call(name);
                }
                if name == self.variable {
                    Ok(Expr::Variable)
                } else if name == "pi" {
                    Ok(Expr::Number(std::f64::consts::PI))
                } else {
                    Err(ExprError::UnknownIdentifier {
                        name,
                        variable: self.variable.to_string(),
                    })
                }
            }

            token => Err(ExprError::Parse(format!("Unexpected token: {:?}", token))),
        }
    }

    fn parse_function_call(&mut self, name: String) -> ExprResult<Expr> {
        let function = Function::from_name(&name).ok_or(ExprError::UnknownFunction(name))?;

        self.expect(&Token::LeftParen)?;
        let arg = self.parse_additive()?;
        self.expect(&Token::RightParen)?;

        Ok(Expr::Call {
            function,
            arg: Box::new(arg),
        })
    }
}
