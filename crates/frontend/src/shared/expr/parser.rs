//! Recursive-descent parser producing an evaluable AST.
//!
//! Grammar (standard precedence, `^` right-associative):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := '-' unary | power
//! power  := atom ('^' unary)?
//! atom   := number | 'x' | 'pi' | 'e' | func '(' expr ')' | '(' expr ')'
//! ```

use super::lexer::{lex, Tok};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Var,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

/// Closed table of callable functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Sqrt,
    Abs,
    Exp,
    Floor,
    Ceil,
}

impl Func {
    fn from_name(name: &str) -> Option<Func> {
        Some(match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "log" => Func::Log,
            "ln" => Func::Ln,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            "exp" => Func::Exp,
            "floor" => Func::Floor,
            "ceil" => Func::Ceil,
            _ => return None,
        })
    }
}

pub fn parse(src: &str) -> Result<Expr, String> {
    let tokens = lex(src)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err("trailing input after expression".to_string());
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Tok>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Tok> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, tok: Tok) -> Result<(), String> {
        match self.next() {
            Some(t) if t == tok => Ok(()),
            Some(t) => Err(format!("expected {:?}, found {:?}", tok, t)),
            None => Err(format!("expected {:?}, found end of input", tok)),
        }
    }

    fn expr(&mut self) -> Result<Expr, String> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Tok::Plus) => {
                    self.next();
                    lhs = Expr::Add(Box::new(lhs), Box::new(self.term()?));
                }
                Some(Tok::Minus) => {
                    self.next();
                    lhs = Expr::Sub(Box::new(lhs), Box::new(self.term()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, String> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Tok::Star) => {
                    self.next();
                    lhs = Expr::Mul(Box::new(lhs), Box::new(self.unary()?));
                }
                Some(Tok::Slash) => {
                    self.next();
                    lhs = Expr::Div(Box::new(lhs), Box::new(self.unary()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, String> {
        if matches!(self.peek(), Some(Tok::Minus)) {
            self.next();
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, String> {
        let base = self.atom()?;
        if matches!(self.peek(), Some(Tok::Caret)) {
            self.next();
            // Right-associative: the exponent may itself be unary/power.
            let exponent = self.unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, String> {
        match self.next() {
            Some(Tok::Num(v)) => Ok(Expr::Num(v)),
            Some(Tok::Ident(name)) => match name.as_str() {
                "x" => Ok(Expr::Var),
                "pi" => Ok(Expr::Num(std::f64::consts::PI)),
                "e" => Ok(Expr::Num(std::f64::consts::E)),
                _ => {
                    let func = Func::from_name(&name)
                        .ok_or_else(|| format!("unknown identifier '{}'", name))?;
                    self.expect(Tok::LParen)?;
                    let arg = self.expr()?;
                    self.expect(Tok::RParen)?;
                    Ok(Expr::Call(func, Box::new(arg)))
                }
            },
            Some(Tok::LParen) => {
                let inner = self.expr()?;
                self.expect(Tok::RParen)?;
                Ok(inner)
            }
            Some(t) => Err(format!("unexpected token {:?}", t)),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_and_associativity() {
        // 2 + 3 * 4 = 14, not 20
        let e = parse("2 + 3 * 4").unwrap();
        assert_eq!(super::super::eval(&e, 0.0), 14.0);
        // 2 ^ 3 ^ 2 = 2 ^ 9 = 512 (right-associative)
        let e = parse("2 ^ 3 ^ 2").unwrap();
        assert_eq!(super::super::eval(&e, 0.0), 512.0);
        // -x^2 is -(x^2)
        let e = parse("-x^2").unwrap();
        assert_eq!(super::super::eval(&e, 3.0), -9.0);
    }

    #[test]
    fn functions_require_parentheses() {
        assert!(parse("sin(x)").is_ok());
        assert!(parse("sin x").is_err());
    }

    #[test]
    fn unknown_function_is_rejected() {
        assert!(parse("sinh(x)").is_err());
        assert!(parse("system(x)").is_err());
    }

    #[test]
    fn constants_resolve_at_parse_time() {
        let e = parse("pi").unwrap();
        assert_eq!(e, Expr::Num(std::f64::consts::PI));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse("x + 1)").is_err());
        assert!(parse("(x + 1").is_err());
        assert!(parse("x +* 2").is_err());
    }
}
