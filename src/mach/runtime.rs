use super::{Index, Lcg, Stack, Var};
use crate::error;
use crate::lang::token::{Ident, Literal, Operator, Token};
use crate::lang::{Error, ErrorCode, Lexer};
use std::rc::Rc;
use std::time::Duration;

type Result<T> = std::result::Result<T, Error>;

pub const GOSUB_DEPTH: usize = 10;
pub const FOR_DEPTH: usize = 4;
pub const INT_STACK_DEPTH: usize = 256;

pub type PeekFn = Box<dyn FnMut(i32) -> i32>;
pub type PokeFn = Box<dyn FnMut(i32, i32)>;

/// ## Interpreter instance
///
/// Everything a running program can touch lives here. `init` resets all
/// of it; nothing is shared between instances.

pub struct Runtime {
    pub(super) lexer: Lexer,
    pub(super) index: Index,
    pub(super) var: Var,
    pub(super) gosub_stack: Stack<usize>,
    pub(super) for_stack: Stack<ForFrame>,
    pub(super) int_stack: Stack<i32>,
    pub(super) line_number: usize,
    pub(super) next_line_number: usize,
    pub(super) jumped: bool,
    pub(super) ended: bool,
    pub(super) rng: Lcg,
    pub(super) peek: Option<PeekFn>,
    pub(super) poke: Option<PokeFn>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForFrame {
    pub resume_line: usize,
    pub var: usize,
    pub to: i32,
}

/// ## Events
///
/// `run` hands every side effect outside the interpreter back to the
/// caller, which owns the serial line and the board.

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Stopped,
    Running,
    Print(String),
    Sleep(Duration),
    Pin(Pin, i32),
    Os(String),
    Error(Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pin {
    Init,
    DirIn,
    DirOut,
    On,
    Off,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime {
            lexer: Lexer::default(),
            index: Index::new(),
            var: Var::new(),
            gosub_stack: Stack::new(
                GOSUB_DEPTH,
                "GOSUB STACK EXHAUSTED",
                ErrorCode::ReturnWithoutGosub,
            ),
            for_stack: Stack::new(FOR_DEPTH, "FOR STACK EXHAUSTED", ErrorCode::NextWithoutFor),
            int_stack: Stack::new(
                INT_STACK_DEPTH,
                "INTEGER STACK EXHAUSTED",
                ErrorCode::OutOfData,
            ),
            line_number: 0,
            next_line_number: 1,
            jumped: false,
            ended: false,
            rng: Lcg::default(),
            peek: None,
            poke: None,
        }
    }
}

impl Runtime {
    /// Loads a program and resets all state. Fails only when the very
    /// first token is malformed.
    pub fn init<S: AsRef<[u8]>>(&mut self, program: S) -> Result<()> {
        self.index.clear();
        self.var.clear();
        self.gosub_stack.clear();
        self.for_stack.clear();
        self.int_stack.clear();
        self.line_number = 0;
        self.next_line_number = 1;
        self.jumped = false;
        self.ended = false;
        self.rng = Lcg::default();
        self.lexer = Lexer::default();
        self.lexer = Lexer::new(Rc::from(program.as_ref()))?;
        Ok(())
    }

    pub fn set_peek(&mut self, peek: PeekFn) {
        self.peek = Some(peek);
    }

    pub fn set_poke(&mut self, poke: PokeFn) {
        self.poke = Some(poke);
    }

    pub fn finished(&self) -> bool {
        self.ended || self.lexer.finished()
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Logical line of the statement last started.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn var(&self) -> &Var {
        &self.var
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn gosub_depth(&self) -> usize {
        self.gosub_stack.len()
    }

    pub fn for_depth(&self) -> usize {
        self.for_stack.len()
    }

    /// Executes one statement. Does nothing once the program is finished.
    pub fn run(&mut self) -> Event {
        if self.finished() {
            return Event::Stopped;
        }
        match self.line() {
            Ok(event) => event,
            Err(error) => {
                let error = if error.is_direct() {
                    error.in_line_number(Some(self.line_number))
                } else {
                    error
                };
                log::debug!("{}", error);
                Event::Error(error)
            }
        }
    }

    fn line(&mut self) -> Result<Event> {
        let position = self.lexer.pos();
        match self.index.line_at(position) {
            Some(line_number) => {
                self.line_number = line_number;
                self.next_line_number = line_number + 1;
            }
            None => {
                self.line_number = self.next_line_number;
                self.index.add(self.line_number, position);
                self.next_line_number += 1;
            }
        }
        self.jumped = false;
        let event = self.statement()?;
        if !self.jumped {
            match self.lexer.token() {
                Token::Cr => self.advance()?,
                Token::EndOfInput => {}
                _ => return Err(self.unexpected("END OF LINE")),
            }
        }
        Ok(event)
    }

    pub(super) fn token(&self) -> &Token {
        self.lexer.token()
    }

    pub(super) fn advance(&mut self) -> Result<()> {
        self.lexer.advance()
    }

    pub(super) fn unexpected(&self, expected: &str) -> Error {
        error!(SyntaxError; &format!("EXPECTED {} FOUND {}", expected, self.token()))
    }

    pub(super) fn accept(&mut self, token: Token) -> Result<()> {
        if *self.token() != token {
            return Err(self.unexpected(&token.to_string()));
        }
        self.advance()
    }

    pub(super) fn accept_ident(&mut self) -> Result<Ident> {
        match *self.token() {
            Token::Ident(ident) => {
                self.advance()?;
                Ok(ident)
            }
            _ => Err(self.unexpected("VARIABLE")),
        }
    }

    pub(super) fn accept_integer_ident(&mut self) -> Result<usize> {
        match *self.token() {
            Token::Ident(Ident::Integer(slot)) => {
                self.advance()?;
                Ok(slot)
            }
            _ => Err(self.unexpected("INTEGER VARIABLE")),
        }
    }

    pub(super) fn accept_label(&mut self) -> Result<String> {
        match self.token().clone() {
            Token::Label(range) => {
                let label = String::from_utf8_lossy(self.lexer.text(&range)).to_string();
                self.advance()?;
                Ok(label)
            }
            _ => Err(self.unexpected("LABEL")),
        }
    }

    /// True when the first operand past any leading `-` and `(` is a float.
    /// Looks ahead on a copy of the lexer.
    pub(super) fn leads_float(&self) -> bool {
        let mut lexer = self.lexer.clone();
        loop {
            match lexer.token() {
                Token::Operator(Operator::Minus) | Token::LParen => {
                    if lexer.advance().is_err() {
                        return false;
                    }
                }
                Token::Literal(Literal::Float(_)) | Token::Ident(Ident::Float(_)) => return true,
                Token::Function(name) => return name.is_float(),
                _ => return false,
            }
        }
    }

    /// The statement must stop here, the terminator is left for the caller.
    pub(super) fn expect_end(&self) -> Result<()> {
        if self.token().is_terminator() {
            Ok(())
        } else {
            Err(self.unexpected("END OF STATEMENT"))
        }
    }
}
