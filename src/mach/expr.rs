use super::{Function, Runtime, Val};
use crate::error;
use crate::lang::token::{Function as Name, Ident, Literal, Operator, Token};
use crate::lang::{Error, MAX_STRING_LEN};

type Result<T> = std::result::Result<T, Error>;

/// ## Expression grammars
///
/// Values are computed while parsing. Each grammar has one function per
/// precedence level.
///
/// ```text
/// relation := expr (('<' | '>' | '=') expr)*
/// expr     := term (('+' | '-' | '&' | '|') term)*
/// term     := factor (('*' | '/' | '%') factor)*
/// float    := termf (('+' | '-') termf)*
/// termf    := factorf (('*' | '/') factorf)*
/// string   := factors ('+' factors)*
/// ```

impl Runtime {
    pub(super) fn relation(&mut self) -> Result<i32> {
        let mut r1 = self.expr()?;
        loop {
            let op = match self.token() {
                Token::Operator(op @ Operator::Less)
                | Token::Operator(op @ Operator::Greater)
                | Token::Operator(op @ Operator::Equal) => *op,
                _ => return Ok(r1),
            };
            self.advance()?;
            let r2 = self.expr()?;
            r1 = match op {
                Operator::Less => (r1 < r2) as i32,
                Operator::Greater => (r1 > r2) as i32,
                _ => (r1 == r2) as i32,
            };
        }
    }

    pub(super) fn expr(&mut self) -> Result<i32> {
        let mut t1 = self.term()?;
        loop {
            let op = match self.token() {
                Token::Operator(op @ Operator::Plus)
                | Token::Operator(op @ Operator::Minus)
                | Token::Operator(op @ Operator::And)
                | Token::Operator(op @ Operator::Or) => *op,
                _ => return Ok(t1),
            };
            self.advance()?;
            let t2 = self.term()?;
            t1 = match op {
                Operator::Plus => t1.wrapping_add(t2),
                Operator::Minus => t1.wrapping_sub(t2),
                Operator::And => t1 & t2,
                _ => t1 | t2,
            };
        }
    }

    fn term(&mut self) -> Result<i32> {
        let mut f1 = self.factor()?;
        loop {
            let op = match self.token() {
                Token::Operator(op @ Operator::Multiply)
                | Token::Operator(op @ Operator::Divide)
                | Token::Operator(op @ Operator::Modulo) => *op,
                _ => return Ok(f1),
            };
            self.advance()?;
            let f2 = self.factor()?;
            f1 = match op {
                Operator::Multiply => f1.wrapping_mul(f2),
                _ if f2 == 0 => return Err(error!(DivisionByZero)),
                Operator::Divide => f1.wrapping_div(f2),
                _ => f1.wrapping_rem(f2),
            };
        }
    }

    fn factor(&mut self) -> Result<i32> {
        let r = match self.token().clone() {
            Token::Literal(Literal::Integer(n)) => n,
            Token::Literal(Literal::Float(n)) => n as i32,
            Token::Function(name) if name.is_integer() => {
                self.advance()?;
                let arg = self.argument(0, Runtime::expr)?;
                return Function::integer(name, arg, &mut self.rng);
            }
            Token::LParen => {
                self.advance()?;
                let r = self.expr()?;
                self.accept(Token::RParen)?;
                return Ok(r);
            }
            Token::Operator(Operator::Minus) => {
                self.advance()?;
                return Ok(self.factor()?.wrapping_neg());
            }
            Token::Ident(Ident::Integer(n)) => self.var.integer(n),
            Token::Ident(Ident::Float(n)) => self.var.float(n) as i32,
            _ => return Err(self.unexpected("INTEGER EXPRESSION")),
        };
        self.advance()?;
        Ok(r)
    }

    pub(super) fn exprf(&mut self) -> Result<f64> {
        let mut t1 = self.termf()?;
        loop {
            let op = match self.token() {
                Token::Operator(op @ Operator::Plus) | Token::Operator(op @ Operator::Minus) => *op,
                _ => return Ok(t1),
            };
            self.advance()?;
            let t2 = self.termf()?;
            t1 = match op {
                Operator::Plus => t1 + t2,
                _ => t1 - t2,
            };
        }
    }

    fn termf(&mut self) -> Result<f64> {
        let mut f1 = self.factorf()?;
        loop {
            let op = match self.token() {
                Token::Operator(op @ Operator::Multiply)
                | Token::Operator(op @ Operator::Divide) => *op,
                _ => return Ok(f1),
            };
            self.advance()?;
            let f2 = self.factorf()?;
            f1 = match op {
                Operator::Multiply => f1 * f2,
                _ => f1 / f2,
            };
        }
    }

    fn factorf(&mut self) -> Result<f64> {
        let f = match self.token().clone() {
            Token::Literal(Literal::Integer(n)) => n as f64,
            Token::Literal(Literal::Float(n)) => n,
            Token::Function(name) if name.is_float() => {
                self.advance()?;
                let arg = self.argument(0.0, Runtime::exprf)?;
                return Function::float(name, arg, &mut self.rng);
            }
            Token::LParen => {
                self.advance()?;
                let f = self.exprf()?;
                self.accept(Token::RParen)?;
                return Ok(f);
            }
            Token::Operator(Operator::Minus) => {
                self.advance()?;
                return Ok(-self.factorf()?);
            }
            Token::Ident(Ident::Integer(n)) => self.var.integer(n) as f64,
            Token::Ident(Ident::Float(n)) => self.var.float(n),
            _ => return Err(self.unexpected("FLOAT EXPRESSION")),
        };
        self.advance()?;
        Ok(f)
    }

    pub(super) fn exprs(&mut self) -> Result<Vec<u8>> {
        let mut s = self.factors()?;
        while *self.token() == Token::Operator(Operator::Plus) {
            self.advance()?;
            let s2 = self.factors()?;
            if s.len() + s2.len() >= MAX_STRING_LEN {
                return Err(error!(StringTooLong));
            }
            s.extend_from_slice(&s2);
        }
        Ok(s)
    }

    fn factors(&mut self) -> Result<Vec<u8>> {
        let s = match self.token().clone() {
            Token::Literal(Literal::Integer(n)) => Val::Integer(n).to_bytes(),
            Token::Literal(Literal::Float(n)) => Val::Float(n).to_bytes(),
            Token::Literal(Literal::String(range)) => self.lexer.text(&range).to_vec(),
            Token::Function(Name::Len) => {
                self.advance()?;
                let arg = self.argument(vec![], Runtime::exprs)?;
                return Function::string(Name::Len, &arg);
            }
            Token::LParen => {
                self.advance()?;
                let s = self.exprs()?;
                self.accept(Token::RParen)?;
                return Ok(s);
            }
            Token::Ident(ident) => self.var.fetch(&ident).to_bytes(),
            _ => return Err(self.unexpected("STRING EXPRESSION")),
        };
        self.advance()?;
        Ok(s)
    }

    /// `(` optional argument `)`, the default stands in for `()`.
    fn argument<T>(&mut self, default: T, parse: fn(&mut Runtime) -> Result<T>) -> Result<T> {
        self.accept(Token::LParen)?;
        if *self.token() == Token::RParen {
            self.advance()?;
            return Ok(default);
        }
        let arg = parse(self)?;
        self.accept(Token::RParen)?;
        Ok(arg)
    }
}
