use super::Runtime;
use crate::error;
use crate::lang::token::{Ident, Token, Word};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Jump resolution
///
/// Known targets come straight from the index. Anything else is found
/// by lexing the program again from the top, counting newlines. The
/// rescan leaves the cursor on the target and sets the line counter so
/// the next statement indexes itself under the right number.

impl Runtime {
    pub(super) fn jump_to_line(&mut self, line_number: usize) -> Result<()> {
        self.jumped = true;
        if let Some(position) = self.index.find(line_number) {
            log::debug!("line {}: jump to line {}", self.line_number, line_number);
            return self.lexer.goto(position);
        }
        log::debug!("line {}: rescan for line {}", self.line_number, line_number);
        self.lexer.goto(0)?;
        let mut count = 1;
        loop {
            if count == line_number {
                self.next_line_number = count;
                return Ok(());
            }
            if self.lexer.finished() {
                return Err(error!(UndefinedLine, Some(self.line_number);
                    &format!("LINE {} NOT FOUND", line_number)));
            }
            let newline = *self.token() == Token::Cr;
            self.advance()?;
            if newline {
                count += 1;
            }
        }
    }

    pub(super) fn jump_to_label(&mut self, label: &str) -> Result<()> {
        self.jumped = true;
        if let Some(position) = self.index.find_by_label(label) {
            log::debug!("line {}: jump to {}", self.line_number, label);
            return self.lexer.goto(position);
        }
        log::debug!("line {}: rescan for {}", self.line_number, label);
        self.lexer.goto(0)?;
        let mut count = 1;
        let mut previous = Token::Error;
        loop {
            match self.token() {
                Token::EndOfInput => {
                    return Err(error!(UndefinedLine, Some(self.line_number);
                        &format!("LABEL {} NOT FOUND", label)));
                }
                Token::Label(range)
                    if previous != Token::Word(Word::Goto)
                        && previous != Token::Word(Word::Gosub)
                        && self.lexer.text(range) == label.as_bytes() =>
                {
                    self.next_line_number = count;
                    return Ok(());
                }
                _ => {}
            }
            previous = self.token().clone();
            self.advance()?;
            if previous == Token::Cr {
                count += 1;
            }
        }
    }

    /// Moves past the `next` that closes a loop whose body must not run.
    /// Stops on that line's terminator.
    pub(super) fn skip_loop(&mut self, var: usize) -> Result<()> {
        let for_line_number = self.line_number;
        let mut line_number = self.line_number;
        let mut depth = 0;
        loop {
            match self.token() {
                Token::EndOfInput => {
                    return Err(error!(NextWithoutFor, Some(for_line_number); "FOR WITHOUT NEXT"));
                }
                Token::Cr => line_number += 1,
                Token::Word(Word::For) => depth += 1,
                Token::Word(Word::Next) if depth > 0 => depth -= 1,
                Token::Word(Word::Next) => {
                    self.advance()?;
                    self.line_number = line_number;
                    if *self.token() != Token::Ident(Ident::Integer(var)) {
                        return Err(error!(NextWithoutFor; "VARIABLE DOES NOT MATCH FOR"));
                    }
                    self.advance()?;
                    self.expect_end()?;
                    self.next_line_number = line_number + 1;
                    return Ok(());
                }
                _ => {}
            }
            self.advance()?;
        }
    }
}
