/*!
# Rust Language Module

This Rust module provides lexical analysis of the BASIC language.
There is no parser here. The machine pulls one token at a time and
evaluates as it goes.

*/

#[macro_use]
mod error;
mod lex;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::Lexer;

/// Logical line of a program, `None` when not known.
pub type LineNumber = Option<usize>;

/// A number literal must end before this many characters.
pub const MAX_NUMBER_LEN: usize = 18;
/// A label must end before this many characters.
pub const MAX_LABEL_LEN: usize = 16;
/// A string literal must end before this many bytes.
pub const MAX_STRING_LEN: usize = 128;

#[cfg(test)]
mod tests;
