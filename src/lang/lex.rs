use super::token::*;
use super::{Error, MAX_LABEL_LEN, MAX_NUMBER_LEN, MAX_STRING_LEN};
use crate::error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

fn is_basic_whitespace(c: u8) -> bool {
    c == b' ' || c == b'\t' || c == b'\r'
}

fn is_basic_digit(c: u8) -> bool {
    c.is_ascii_digit() || c == b'.'
}

fn is_label_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// ## Cursor over program text
///
/// Only the current token and the position following it are kept.
/// Nothing is scanned until `advance` is called, and the source is
/// shared, never copied.

#[derive(Debug, Clone)]
pub struct Lexer {
    source: Rc<[u8]>,
    pos: usize,
    next: usize,
    token: Token,
}

impl Default for Lexer {
    fn default() -> Lexer {
        Lexer {
            source: Rc::from(&b""[..]),
            pos: 0,
            next: 0,
            token: Token::EndOfInput,
        }
    }
}

impl Lexer {
    pub fn new(source: Rc<[u8]>) -> Result<Lexer> {
        let mut lexer = Lexer {
            source,
            pos: 0,
            next: 0,
            token: Token::EndOfInput,
        };
        lexer.goto(0)?;
        Ok(lexer)
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Start of the current token.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn finished(&self) -> bool {
        self.token == Token::EndOfInput
    }

    pub fn text(&self, range: &std::ops::Range<usize>) -> &[u8] {
        &self.source[range.clone()]
    }

    /// Repositions the cursor and scans the token found there.
    pub fn goto(&mut self, pos: usize) -> Result<()> {
        self.next = pos;
        self.scan()
    }

    pub fn advance(&mut self) -> Result<()> {
        if self.finished() {
            return Ok(());
        }
        self.scan()
    }

    fn peek(&self, at: usize) -> Option<u8> {
        self.source.get(at).copied()
    }

    fn scan(&mut self) -> Result<()> {
        loop {
            let mut pos = self.next;
            while let Some(ch) = self.peek(pos) {
                if !is_basic_whitespace(ch) {
                    break;
                }
                pos += 1;
            }
            self.pos = pos;
            self.token = self.next_token()?;
            if self.token != Token::Word(Word::Rem) {
                return Ok(());
            }
            self.comment();
        }
    }

    /// Skips to the end of the line. A comment on a line of its own also
    /// takes its newline so the line does not exist for the engine.
    fn comment(&mut self) {
        let mut line_start = true;
        for &ch in self.source[..self.pos].iter().rev() {
            if ch == b'\n' {
                break;
            }
            if !is_basic_whitespace(ch) {
                line_start = false;
                break;
            }
        }
        let mut pos = self.next;
        while let Some(ch) = self.peek(pos) {
            if ch == b'\n' {
                if line_start {
                    pos += 1;
                }
                break;
            }
            pos += 1;
        }
        self.next = pos;
    }

    fn next_token(&mut self) -> Result<Token> {
        let pos = self.pos;
        let ch = match self.peek(pos) {
            None | Some(0) => {
                self.next = pos;
                return Ok(Token::EndOfInput);
            }
            Some(ch) => ch,
        };
        if ch.is_ascii_digit() {
            return self.number();
        }
        if ch != b'/' || self.peek(pos + 1) != Some(b'/') {
            if let Some(token) = Token::from_char(ch) {
                self.next = pos + 1;
                return Ok(token);
            }
        }
        if ch == b'"' {
            return self.string();
        }
        if let Some(token) = self.keyword() {
            return Ok(token);
        }
        if let Some(token) = self.label()? {
            return Ok(token);
        }
        Ok(self.ident())
    }

    fn number(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut float = false;
        let mut len = 0;
        while let Some(ch) = self.peek(start + len) {
            if !is_basic_digit(ch) {
                break;
            }
            if ch == b'.' {
                float = true;
            }
            len += 1;
            if len >= MAX_NUMBER_LEN {
                return Err(error!(Overflow; "NUMBER TOO LONG"));
            }
        }
        self.next = start + len;
        let text = String::from_utf8_lossy(&self.source[start..self.next]);
        if float {
            let mut dots = 0;
            let upto: String = text
                .chars()
                .take_while(|c| {
                    if *c == '.' {
                        dots += 1;
                    }
                    dots < 2
                })
                .collect();
            match upto.parse::<f64>() {
                Ok(n) => Ok(Token::Literal(Literal::Float(n))),
                Err(_) => Err(error!(SyntaxError; "MALFORMED NUMBER")),
            }
        } else {
            match text.parse::<i32>() {
                Ok(n) => Ok(Token::Literal(Literal::Integer(n))),
                Err(_) => Err(error!(Overflow; "INTEGER TOO LARGE")),
            }
        }
    }

    fn string(&mut self) -> Result<Token> {
        let start = self.pos + 1;
        let len = match self.source[start..].iter().position(|&c| c == b'"') {
            Some(len) => len,
            None => return Err(error!(SyntaxError; "MISSING QUOTE")),
        };
        if len >= MAX_STRING_LEN {
            return Err(error!(StringTooLong));
        }
        self.next = start + len + 1;
        Ok(Token::Literal(Literal::String(start..start + len)))
    }

    fn keyword(&mut self) -> Option<Token> {
        let rest = &self.source[self.pos..];
        let (text, token) = KEYWORDS
            .iter()
            .filter(|(text, _)| rest.starts_with(text.as_bytes()))
            .max_by_key(|(text, _)| text.len())?;
        self.next = self.pos + text.len();
        Some(token.clone())
    }

    fn label(&mut self) -> Result<Option<Token>> {
        let start = self.pos;
        let mut len = 0;
        while len < MAX_LABEL_LEN {
            match self.peek(start + len) {
                Some(ch) if is_label_char(ch) => len += 1,
                _ => break,
            }
        }
        if len == 0 || self.peek(start + len) != Some(b':') {
            return Ok(None);
        }
        if len >= MAX_LABEL_LEN {
            return Err(error!(StringTooLong; "LABEL TOO LONG"));
        }
        self.next = start + len + 1;
        Ok(Some(Token::Label(start..start + len)))
    }

    fn ident(&mut self) -> Token {
        let pos = self.pos;
        match self.peek(pos) {
            Some(ch) if ch.is_ascii_lowercase() => {
                let slot = (ch - b'a') as usize;
                match self.peek(pos + 1) {
                    Some(b'#') => {
                        self.next = pos + 2;
                        Token::Ident(Ident::Float(slot))
                    }
                    Some(b'$') => {
                        self.next = pos + 2;
                        Token::Ident(Ident::String(slot))
                    }
                    _ => {
                        self.next = pos + 1;
                        Token::Ident(Ident::Integer(slot))
                    }
                }
            }
            _ => {
                self.next = pos + 1;
                Token::Error
            }
        }
    }
}
