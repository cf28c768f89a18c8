//! Error types shared by every pipeline stage
//!
//!     All fatal conditions propagate unchanged to the caller. Nothing in the pipeline
//!     retries: tokenizing and classifying are deterministic, so a second attempt could
//!     never produce a different outcome.
//!
//!     Line numbers carried by errors are 1-based, as an editor would show them.

use std::fmt;
use std::path::PathBuf;

/// Errors raised while decoding or tokenizing the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A single-quoted string reached the end of its line
    UnterminatedString { line: usize },
    /// A triple-quoted string reached the end of the file
    UnterminatedTripleQuote { line: usize },
    /// The file ended inside an open bracket
    UnclosedBracket { line: usize },
    /// The coding cookie names an encoding we cannot decode
    UnknownEncoding { line: usize, name: String },
    /// The bytes are not valid in the declared encoding
    InvalidEncoding { line: usize, encoding: String },
    /// Input the lexer could not match at all
    InvalidToken { line: usize },
}

impl LexError {
    /// The 1-based line the error points at
    pub fn line(&self) -> usize {
        match self {
            LexError::UnterminatedString { line }
            | LexError::UnterminatedTripleQuote { line }
            | LexError::UnclosedBracket { line }
            | LexError::UnknownEncoding { line, .. }
            | LexError::InvalidEncoding { line, .. }
            | LexError::InvalidToken { line } => *line,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedString { line } => {
                write!(f, "line {}: unterminated string literal", line)
            }
            LexError::UnterminatedTripleQuote { line } => {
                write!(f, "line {}: EOF in multi-line string", line)
            }
            LexError::UnclosedBracket { line } => {
                write!(f, "line {}: EOF in multi-line statement", line)
            }
            LexError::UnknownEncoding { line, name } => {
                write!(f, "line {}: unknown encoding '{}'", line, name)
            }
            LexError::InvalidEncoding { line, encoding } => {
                write!(f, "line {}: invalid {} data", line, encoding)
            }
            LexError::InvalidToken { line } => write!(f, "line {}: invalid token", line),
        }
    }
}

impl std::error::Error for LexError {}

/// Errors that can abort a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Malformed or unparseable source
    Lex(LexError),
    /// A second encoding declaration was found
    MultipleEncodingDeclarations { first: usize, second: usize },
    /// Reading the input or writing the output failed
    Io { path: PathBuf, message: String },
    /// The output already exists and overwriting was not confirmed
    OutputExists(PathBuf),
    /// The notebook could not be serialized
    Serialization(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Lex(err) => write!(f, "Lexing error: {}", err),
            ConversionError::MultipleEncodingDeclarations { first, second } => write!(
                f,
                "Multiple encoding declarations: line {} and line {}",
                first, second
            ),
            ConversionError::Io { path, message } => {
                write!(f, "IO error on {}: {}", path.display(), message)
            }
            ConversionError::OutputExists(path) => {
                write!(f, "Output already exists: {}", path.display())
            }
            ConversionError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConversionError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ConversionError {
    fn from(err: LexError) -> Self {
        ConversionError::Lex(err)
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        ConversionError::Serialization(err.to_string())
    }
}

impl ConversionError {
    /// Wraps an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ConversionError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
