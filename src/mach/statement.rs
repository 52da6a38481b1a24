use super::runtime::{ForFrame, Pin};
use super::{Event, Runtime, Val};
use crate::error;
use crate::lang::token::{Function as Name, Ident, Literal, Operator, Token, Word};
use crate::lang::Error;
use std::time::Duration;

type Result<T> = std::result::Result<T, Error>;

impl Runtime {
    /// Dispatches on the leading token. Leaves the terminator in place
    /// unless the statement jumped.
    pub(super) fn statement(&mut self) -> Result<Event> {
        let token = self.token().clone();
        log::trace!("line {}: {}", self.line_number, token);
        match token {
            Token::Cr | Token::EndOfInput => Ok(Event::Running),
            Token::Word(Word::Print) => self.r#print(),
            Token::Word(Word::If) => self.r#if(),
            Token::Word(Word::Goto) => self.r#goto(),
            Token::Word(Word::Gosub) => self.r#gosub(),
            Token::Word(Word::Return) => self.r#return(),
            Token::Word(Word::For) => self.r#for(),
            Token::Word(Word::Next) => self.r#next(),
            Token::Word(Word::Peek) => self.r#peek(),
            Token::Word(Word::Poke) => self.r#poke(),
            Token::Word(Word::Sleep) => self.r#sleep(1000),
            Token::Word(Word::Delay) => self.r#sleep(1),
            Token::Word(Word::Randomize) => self.r#randomize(),
            Token::Word(Word::Push) => self.r#push(),
            Token::Word(Word::Pop) => self.r#pop(),
            Token::Word(Word::Os) => self.r#os(),
            Token::Word(Word::End) => self.r#end(),
            Token::Word(Word::GpioInit) => self.r#pin(Pin::Init),
            Token::Word(Word::GpioDirIn) => self.r#pin(Pin::DirIn),
            Token::Word(Word::GpioDirOut) => self.r#pin(Pin::DirOut),
            Token::Word(Word::GpioOn) => self.r#pin(Pin::On),
            Token::Word(Word::GpioOff) => self.r#pin(Pin::Off),
            Token::Label(_) => self.r#label(),
            Token::Word(Word::Let) => {
                self.advance()?;
                self.r#let()
            }
            Token::Ident(_) => self.r#let(),
            _ => Err(error!(SyntaxError; &format!("UNKNOWN STATEMENT {}", token))),
        }
    }

    fn r#print(&mut self) -> Result<Event> {
        self.advance()?;
        let mut s: Vec<u8> = vec![];
        loop {
            match self.token().clone() {
                Token::Comma => {
                    s.push(b' ');
                    self.advance()?;
                }
                Token::Semicolon => self.advance()?,
                Token::Literal(Literal::String(_))
                | Token::Ident(Ident::String(_))
                | Token::Function(Name::Len) => {
                    let v = self.exprs()?;
                    s.extend_from_slice(&v);
                }
                Token::LParen | Token::Operator(Operator::Minus) if self.leads_float() => {
                    let v = self.exprf()?;
                    s.extend_from_slice(&Val::Float(v).to_bytes());
                }
                Token::Literal(Literal::Float(_)) | Token::Ident(Ident::Float(_)) => {
                    let v = self.exprf()?;
                    s.extend_from_slice(&Val::Float(v).to_bytes());
                }
                Token::Function(name) if name.is_float() => {
                    let v = self.exprf()?;
                    s.extend_from_slice(&Val::Float(v).to_bytes());
                }
                Token::Literal(Literal::Integer(_))
                | Token::Ident(Ident::Integer(_))
                | Token::Function(_)
                | Token::LParen
                | Token::Operator(Operator::Minus) => {
                    let v = self.expr()?;
                    s.extend_from_slice(&Val::Integer(v).to_bytes());
                }
                t if t.is_terminator() => break,
                _ => return Err(self.unexpected("PRINT ITEM")),
            }
        }
        s.push(b'\n');
        Ok(Event::Print(String::from_utf8_lossy(&s).to_string()))
    }

    fn r#if(&mut self) -> Result<Event> {
        self.advance()?;
        let r = self.relation()?;
        self.accept(Token::Word(Word::Then))?;
        if r != 0 {
            let event = self.statement()?;
            if !self.jumped && *self.token() == Token::Word(Word::Else) {
                while !matches!(self.token(), Token::Cr | Token::EndOfInput) {
                    self.advance()?;
                }
            }
            Ok(event)
        } else {
            while !self.token().is_terminator() {
                self.advance()?;
            }
            if *self.token() == Token::Word(Word::Else) {
                self.advance()?;
                let event = self.statement()?;
                if !self.jumped && *self.token() == Token::Word(Word::Else) {
                    return Err(self.unexpected("END OF LINE"));
                }
                Ok(event)
            } else {
                Ok(Event::Running)
            }
        }
    }

    fn r#let(&mut self) -> Result<Event> {
        let ident = self.accept_ident()?;
        self.accept(Token::Operator(Operator::Equal))?;
        let value = match ident {
            Ident::Integer(_) => Val::Integer(self.expr()?),
            Ident::Float(_) => Val::Float(self.exprf()?),
            Ident::String(_) => Val::String(self.exprs()?),
        };
        self.expect_end()?;
        self.var.store(&ident, value)?;
        Ok(Event::Running)
    }

    fn r#goto(&mut self) -> Result<Event> {
        self.advance()?;
        let label = self.accept_label()?;
        self.expect_end()?;
        self.jump_to_label(&label)?;
        Ok(Event::Running)
    }

    fn r#gosub(&mut self) -> Result<Event> {
        self.advance()?;
        let label = self.accept_label()?;
        self.expect_end()?;
        self.gosub_stack.push(self.line_number)?;
        self.jump_to_label(&label)?;
        Ok(Event::Running)
    }

    fn r#return(&mut self) -> Result<Event> {
        self.advance()?;
        self.expect_end()?;
        let line_number = self.gosub_stack.pop()?;
        self.jump_to_line(line_number + 1)?;
        Ok(Event::Running)
    }

    fn r#for(&mut self) -> Result<Event> {
        self.advance()?;
        let var = self.accept_integer_ident()?;
        self.accept(Token::Operator(Operator::Equal))?;
        let from = self.expr()?;
        self.var.store_integer(var, from);
        self.accept(Token::Word(Word::To))?;
        let to = self.expr()?;
        self.expect_end()?;
        if from > to {
            self.skip_loop(var)?;
            return Ok(Event::Running);
        }
        self.for_stack.push(ForFrame {
            resume_line: self.line_number + 1,
            var,
            to,
        })?;
        Ok(Event::Running)
    }

    fn r#next(&mut self) -> Result<Event> {
        self.advance()?;
        let var = self.accept_integer_ident()?;
        self.expect_end()?;
        let frame = match self.for_stack.last() {
            Some(frame) => *frame,
            None => return Err(error!(NextWithoutFor)),
        };
        if frame.var != var {
            return Err(error!(NextWithoutFor; "VARIABLE DOES NOT MATCH FOR"));
        }
        let value = self.var.integer(var).wrapping_add(1);
        self.var.store_integer(var, value);
        if value <= frame.to {
            self.jump_to_line(frame.resume_line)?;
        } else {
            self.for_stack.pop()?;
        }
        Ok(Event::Running)
    }

    fn r#peek(&mut self) -> Result<Event> {
        self.advance()?;
        let address = self.expr()?;
        self.accept(Token::Comma)?;
        let var = self.accept_integer_ident()?;
        self.expect_end()?;
        let value = match self.peek.as_mut() {
            Some(peek) => peek(address),
            None => return Err(error!(IllegalFunctionCall; "PEEK NOT AVAILABLE")),
        };
        self.var.store_integer(var, value);
        Ok(Event::Running)
    }

    fn r#poke(&mut self) -> Result<Event> {
        self.advance()?;
        let address = self.expr()?;
        self.accept(Token::Comma)?;
        let value = self.expr()?;
        self.expect_end()?;
        match self.poke.as_mut() {
            Some(poke) => poke(address, value),
            None => return Err(error!(IllegalFunctionCall; "POKE NOT AVAILABLE")),
        }
        Ok(Event::Running)
    }

    fn r#sleep(&mut self, millis_per_unit: u64) -> Result<Event> {
        self.advance()?;
        let n = self.expr()?;
        self.expect_end()?;
        let millis = n.max(0) as u64 * millis_per_unit;
        Ok(Event::Sleep(Duration::from_millis(millis)))
    }

    fn r#randomize(&mut self) -> Result<Event> {
        self.advance()?;
        if self.token().is_terminator() {
            self.rng.seed(rand::random());
        } else {
            let seed = self.expr()?;
            self.expect_end()?;
            self.rng.seed(seed as u32);
        }
        Ok(Event::Running)
    }

    fn r#push(&mut self) -> Result<Event> {
        self.advance()?;
        let value = self.expr()?;
        self.expect_end()?;
        self.int_stack.push(value)?;
        Ok(Event::Running)
    }

    fn r#pop(&mut self) -> Result<Event> {
        self.advance()?;
        if self.token().is_terminator() {
            self.int_stack.pop()?;
            return Ok(Event::Running);
        }
        let var = self.accept_integer_ident()?;
        self.expect_end()?;
        let value = self.int_stack.pop()?;
        self.var.store_integer(var, value);
        Ok(Event::Running)
    }

    fn r#os(&mut self) -> Result<Event> {
        self.advance()?;
        let command = self.exprs()?;
        self.expect_end()?;
        Ok(Event::Os(String::from_utf8_lossy(&command).to_string()))
    }

    fn r#end(&mut self) -> Result<Event> {
        self.advance()?;
        self.expect_end()?;
        self.ended = true;
        Ok(Event::Stopped)
    }

    fn r#pin(&mut self, pin: Pin) -> Result<Event> {
        self.advance()?;
        let id = self.expr()?;
        self.expect_end()?;
        Ok(Event::Pin(pin, id))
    }

    fn r#label(&mut self) -> Result<Event> {
        let label = self.accept_label()?;
        if !matches!(self.token(), Token::Cr | Token::EndOfInput) {
            return Err(self.unexpected("END OF LINE"));
        }
        self.index.add_label(self.line_number, &label);
        Ok(Event::Running)
    }
}
