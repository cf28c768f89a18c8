//! Lexer
//!
//!     This module turns raw script bytes into a stream of typed tokens. Cell boundaries
//!     are only ever taken from comment tokens, so the tokenizer has to understand enough
//!     of Python's lexical grammar to know when a `#` really starts a comment: inside a
//!     string literal, single or triple quoted, it never does.
//!
//! The Lexing Pipeline
//!
//!     1. Decoding. See [encoding](encoding). A BOM or coding cookie picks the encoding.
//!
//!     2. Core tokenization using the logos lexer. See [tokens](tokens).
//!        Strings are finished by callbacks which handle escapes and triple quotes.
//!
//!     3. Adaptation. See [tokenizer](tokenizer). Raw tokens are mapped onto the stable
//!        [`TokenKind`] set and tied to their [`SourceLine`](crate::spyonde::source::SourceLine).
//!        Encoding declarations and unclosed brackets are resolved here.
//!
//!     The resulting [`Tokenizer`] is lazy and can only be consumed once.

pub mod encoding;
pub mod tokenizer;
pub mod tokens;

pub use encoding::{decode, Decoded, Encoding};
pub use tokenizer::{Token, TokenKind, Tokenizer};

use crate::spyonde::source::Source;

/// Start tokenizing an already decoded source
pub fn tokenize(source: &Source) -> Tokenizer<'_> {
    Tokenizer::new(source)
}
