//! Reference evaluator for emitted CSS math, used by the tests.
//!
//! Lengths are folded to `px` (`1rem = 1em = 16px`), unitless numbers are
//! plain factors. Supports `+ - * /`, parentheses, `calc`, `min`, `max`,
//! `clamp` and `round(strategy, value, step)`.

use thiserror::Error;

pub const PX_PER_REM: f64 = 16.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token: '{0}'")]
    UnexpectedToken(String),
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    #[error("unknown unit: '{0}'")]
    UnknownUnit(String),
    #[error("unknown function: '{0}'")]
    UnknownFunction(String),
    #[error("function '{func}' expects {expected} args, got {got}")]
    WrongArgCount {
        func: String,
        expected: usize,
        got: usize,
    },
    #[error("unknown rounding strategy: '{0}'")]
    UnknownStrategy(String),
}

// ============================================================================
// Lexer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
    Eof,
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if pred(c) {
                self.next_char();
            } else {
                break;
            }
        }
        &input[start..self.pos]
    }

    /// A number with an optional unit suffix, folded to px.
    fn read_dimension(&mut self) -> Result<f64, EvalError> {
        let digits = self.read_while(|c| c.is_ascii_digit() || c == '.');
        let n: f64 = digits
            .parse()
            .map_err(|_| EvalError::InvalidNumber(digits.to_string()))?;
        let scale = match self.read_while(|c| c.is_ascii_alphabetic()) {
            "" | "px" => 1.0,
            "rem" | "em" => PX_PER_REM,
            unit => return Err(EvalError::UnknownUnit(unit.to_string())),
        };
        Ok(n * scale)
    }

    fn next_token(&mut self) -> Result<Token, EvalError> {
        self.skip_whitespace();

        let Some(c) = self.peek_char() else {
            return Ok(Token::Eof);
        };

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '0'..='9' | '.' => return Ok(Token::Number(self.read_dimension()?)),
            'a'..='z' | 'A'..='Z' => {
                let ident = self.read_while(|c| c.is_ascii_alphanumeric() || c == '-');
                return Ok(Token::Ident(ident.to_string()));
            }
            _ => return Err(EvalError::UnexpectedChar(c)),
        };
        self.next_char();
        Ok(token)
    }
}

// ============================================================================
// AST
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Ast {
    Num(f64),
    Ident(String),
    Neg(Box<Ast>),
    Add(Box<Ast>, Box<Ast>),
    Sub(Box<Ast>, Box<Ast>),
    Mul(Box<Ast>, Box<Ast>),
    Div(Box<Ast>, Box<Ast>),
    Call(String, Vec<Ast>),
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, EvalError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn advance(&mut self) -> Result<(), EvalError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), EvalError> {
        if self.current == expected {
            self.advance()
        } else {
            Err(EvalError::UnexpectedToken(format!("{:?}", self.current)))
        }
    }

    fn parse_add_sub(&mut self) -> Result<Ast, EvalError> {
        let mut left = self.parse_mul_div()?;

        loop {
            match &self.current {
                Token::Plus => {
                    self.advance()?;
                    let right = self.parse_mul_div()?;
                    left = Ast::Add(Box::new(left), Box::new(right));
                }
                Token::Minus => {
                    self.advance()?;
                    let right = self.parse_mul_div()?;
                    left = Ast::Sub(Box::new(left), Box::new(right));
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_mul_div(&mut self) -> Result<Ast, EvalError> {
        let mut left = self.parse_unary()?;

        loop {
            match &self.current {
                Token::Star => {
                    self.advance()?;
                    let right = self.parse_unary()?;
                    left = Ast::Mul(Box::new(left), Box::new(right));
                }
                Token::Slash => {
                    self.advance()?;
                    let right = self.parse_unary()?;
                    left = Ast::Div(Box::new(left), Box::new(right));
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Ast, EvalError> {
        match &self.current {
            Token::Minus => {
                self.advance()?;
                let inner = self.parse_unary()?;
                Ok(Ast::Neg(Box::new(inner)))
            }
            Token::Plus => {
                self.advance()?;
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Ast, EvalError> {
        match &self.current {
            Token::Number(n) => {
                let n = *n;
                self.advance()?;
                Ok(Ast::Num(n))
            }
            Token::Ident(name) => {
                let name = name.clone();
                self.advance()?;

                if self.current != Token::LParen {
                    return Ok(Ast::Ident(name));
                }

                self.advance()?;
                let mut args = vec![self.parse_add_sub()?];
                while self.current == Token::Comma {
                    self.advance()?;
                    args.push(self.parse_add_sub()?);
                }
                self.expect(Token::RParen)?;
                Ok(Ast::Call(name, args))
            }
            Token::LParen => {
                self.advance()?;
                let inner = self.parse_add_sub()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Eof => Err(EvalError::UnexpectedEnd),
            _ => Err(EvalError::UnexpectedToken(format!("{:?}", self.current))),
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluates CSS math text to a number of px.
pub fn eval(input: &str) -> Result<f64, EvalError> {
    let mut parser = Parser::new(input)?;
    let ast = parser.parse_add_sub()?;
    if parser.current != Token::Eof {
        return Err(EvalError::UnexpectedToken(format!("{:?}", parser.current)));
    }
    eval_ast(&ast)
}

fn check_args(func: &str, args: &[Ast], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::WrongArgCount {
            func: func.to_string(),
            expected,
            got: args.len(),
        })
    }
}

fn eval_ast(ast: &Ast) -> Result<f64, EvalError> {
    match ast {
        Ast::Num(n) => Ok(*n),
        Ast::Ident(name) => Err(EvalError::UnexpectedToken(name.clone())),
        Ast::Neg(inner) => Ok(-eval_ast(inner)?),
        Ast::Add(l, r) => Ok(eval_ast(l)? + eval_ast(r)?),
        Ast::Sub(l, r) => Ok(eval_ast(l)? - eval_ast(r)?),
        Ast::Mul(l, r) => Ok(eval_ast(l)? * eval_ast(r)?),
        Ast::Div(l, r) => Ok(eval_ast(l)? / eval_ast(r)?),
        Ast::Call(name, args) => eval_call(name, args),
    }
}

fn eval_call(name: &str, args: &[Ast]) -> Result<f64, EvalError> {
    match name {
        "calc" => {
            check_args(name, args, 1)?;
            eval_ast(&args[0])
        }
        "min" => {
            check_args(name, args, 2)?;
            Ok(eval_ast(&args[0])?.min(eval_ast(&args[1])?))
        }
        "max" => {
            check_args(name, args, 2)?;
            Ok(eval_ast(&args[0])?.max(eval_ast(&args[1])?))
        }
        "clamp" => {
            check_args(name, args, 3)?;
            let lo = eval_ast(&args[0])?;
            let v = eval_ast(&args[1])?;
            let hi = eval_ast(&args[2])?;
            Ok(lo.max(v.min(hi)))
        }
        "round" => {
            check_args(name, args, 3)?;
            let Ast::Ident(strategy) = &args[0] else {
                return Err(EvalError::UnexpectedToken(format!("{:?}", args[0])));
            };
            round(strategy, eval_ast(&args[1])?, eval_ast(&args[2])?)
        }
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

/// Rounds `value` to a multiple of `|step|`.
fn round(strategy: &str, value: f64, step: f64) -> Result<f64, EvalError> {
    let step = step.abs();
    let q = value / step;
    let q = match strategy {
        "nearest" => q.round(),
        "up" => q.ceil(),
        "down" => q.floor(),
        "to-zero" => q.trunc(),
        other => return Err(EvalError::UnknownStrategy(other.to_string())),
    };
    Ok(q * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(eval("10px").unwrap(), 10.0);
        assert_eq!(eval("1rem").unwrap(), 16.0);
        assert_eq!(eval("-2.5px * 2").unwrap(), -5.0);
        assert_eq!(eval("(3px) * -1").unwrap(), -3.0);
        assert!(matches!(eval("1vw"), Err(EvalError::UnknownUnit(_))));
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("calc(1px + 2px)").unwrap(), 3.0);
        assert_eq!(eval("min(1px, -2px)").unwrap(), -2.0);
        assert_eq!(eval("max(1px, -2px)").unwrap(), 1.0);
        assert_eq!(eval("clamp(0px, 5px, 3px)").unwrap(), 3.0);
        assert_eq!(eval("clamp(0px, -5px, 3px)").unwrap(), 0.0);
    }

    #[test]
    fn test_round() {
        assert_eq!(eval("round(up, 2.1px, 1px)").unwrap(), 3.0);
        assert_eq!(eval("round(down, -2.1px, 1px)").unwrap(), -3.0);
        assert_eq!(eval("round(to-zero, -2.9px, 1px)").unwrap(), -2.0);
        assert_eq!(eval("round(to-zero, 7px, -4px)").unwrap(), 4.0);
        assert_eq!(eval("round(nearest, 2.5px, 1px)").unwrap(), 3.0);
        assert!(matches!(
            eval("round(sideways, 1px, 1px)"),
            Err(EvalError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(eval("1px +"), Err(EvalError::UnexpectedEnd)));
        assert!(matches!(eval("1px @"), Err(EvalError::UnexpectedChar('@'))));
        assert!(matches!(
            eval("min(1px)"),
            Err(EvalError::WrongArgCount { .. })
        ));
    }
}
