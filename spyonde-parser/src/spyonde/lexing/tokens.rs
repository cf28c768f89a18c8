//! Raw token definitions for Python source
//!
//! This module defines the tokens produced by the logos lexer. Only the lexical classes
//! that decide where comments and strings begin and end are distinguished; everything
//! else (names, numbers, operators) collapses into [`RawToken::Other`].
//!
//! Strings are matched on their opening quote and finished by a callback that scans the
//! remainder, since the closing delimiter depends on the opening one and on escapes.
//! String prefixes (`r`, `b`, `f`, `u`) fall into `Other`: a backslash always stops the
//! following quote from closing the string, raw or not, so the prefix never moves the end.

use crate::spyonde::error::LexError;
use logos::{Lexer, Logos};

/// Failure reported by a token callback, resolved to a line by the tokenizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LexingError {
    #[default]
    InvalidToken,
    UnterminatedString,
    UnterminatedTripleQuote,
}

impl LexingError {
    /// Attach the 1-based line number the failing token started on
    pub fn at_line(self, line: usize) -> LexError {
        match self {
            LexingError::InvalidToken => LexError::InvalidToken { line },
            LexingError::UnterminatedString => LexError::UnterminatedString { line },
            LexingError::UnterminatedTripleQuote => LexError::UnterminatedTripleQuote { line },
        }
    }
}

/// All tokens the Python lexer distinguishes
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexingError)]
pub enum RawToken {
    #[regex(r"#[^\r\n]*")]
    Comment,

    #[token("\"\"\"", |lex| finish_long_string(lex, b'"'))]
    #[token("'''", |lex| finish_long_string(lex, b'\''))]
    #[token("\"", |lex| finish_short_string(lex, b'"'))]
    #[token("'", |lex| finish_short_string(lex, b'\''))]
    String,

    #[regex(r"\r\n|\r|\n")]
    Newline,

    // Explicit line joining with a trailing backslash
    #[regex(r"\\\r\n|\\\r|\\\n")]
    Continuation,

    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[token("(")]
    #[token("[")]
    #[token("{")]
    Open,

    #[token(")")]
    #[token("]")]
    #[token("}")]
    Close,

    #[regex(r#"[^ \t\f\r\n#'"\\()\[\]{}]+"#)]
    #[token("\\")]
    Other,
}

fn finish_short_string(lex: &mut Lexer<RawToken>, quote: u8) -> Result<(), LexingError> {
    match short_string_end(lex.remainder().as_bytes(), quote) {
        Ok(len) => {
            lex.bump(len);
            Ok(())
        }
        Err(len) => {
            lex.bump(len);
            Err(LexingError::UnterminatedString)
        }
    }
}

fn finish_long_string(lex: &mut Lexer<RawToken>, quote: u8) -> Result<(), LexingError> {
    match long_string_end(lex.remainder().as_bytes(), quote) {
        Some(len) => {
            lex.bump(len);
            Ok(())
        }
        None => {
            let rest = lex.remainder().len();
            lex.bump(rest);
            Err(LexingError::UnterminatedTripleQuote)
        }
    }
}

/// Length of the body plus closing quote of a single-quoted string.
///
/// `Err` carries how far the string reached before its line ended.
fn short_string_end(rest: &[u8], quote: u8) -> Result<usize, usize> {
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' if rest[i + 1..].starts_with(b"\r\n") => i += 3,
            b'\\' => i += 2,
            b'\n' | b'\r' => return Err(i),
            b if b == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }
    Err(rest.len())
}

/// Length of the body plus closing delimiter of a triple-quoted string
fn long_string_end(rest: &[u8], quote: u8) -> Option<usize> {
    let closing = [quote; 3];
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' => i += 2,
            b if b == quote && rest[i..].starts_with(&closing) => return Some(i + 3),
            _ => i += 1,
        }
    }
    None
}
