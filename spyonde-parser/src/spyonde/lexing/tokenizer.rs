//! Tokenizer adapter
//!
//! Wraps the logos lexer into a lazy stream of [`Token`]s with a stable [`TokenKind`],
//! each tied to the physical line it starts on. Whitespace and line continuations are
//! dropped; newlines, brackets and everything else surface as [`TokenKind::Other`].

use super::encoding;
use super::tokens::RawToken;
use crate::spyonde::error::{ConversionError, LexError};
use crate::spyonde::source::{Source, SourceLine};
use logos::Logos;

/// Token classes downstream stages can rely on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    String,
    EncodingDecl,
    Other,
}

/// A token together with the line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: SourceLine<'a>,
}

/// Lazy, single-pass token stream over a [`Source`].
///
/// Stops after the first error.
pub struct Tokenizer<'a> {
    source: &'a Source,
    lexer: logos::Lexer<'a, RawToken>,
    /// Comment held back while its encoding declaration is yielded first
    pending: Option<Token<'a>>,
    /// Lines of currently open brackets, outermost first
    open_brackets: Vec<usize>,
    encoding_line: Option<usize>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a Source) -> Self {
        Tokenizer {
            source,
            lexer: RawToken::lexer(source.text()),
            pending: None,
            open_brackets: Vec::new(),
            encoding_line: None,
            finished: false,
        }
    }

    fn fail(&mut self, err: ConversionError) -> Option<Result<Token<'a>, ConversionError>> {
        self.finished = true;
        Some(Err(err))
    }

    /// The coding cookie carried by a comment, if its position lets it declare one
    fn declared_encoding(&self, line: SourceLine<'a>) -> Option<&'a str> {
        let allowed = match line.index {
            0 => true,
            1 => self
                .source
                .line(0)
                .is_some_and(|first| encoding::second_line_may_declare(first.text)),
            _ => false,
        };
        if allowed {
            encoding::cookie(line.text)
        } else {
            None
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, ConversionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Some(token) = self.pending.take() {
            return Some(Ok(token));
        }

        loop {
            let raw = match self.lexer.next() {
                Some(raw) => raw,
                None => {
                    if let Some(&line) = self.open_brackets.first() {
                        return self.fail(LexError::UnclosedBracket { line: line + 1 }.into());
                    }
                    self.finished = true;
                    return None;
                }
            };
            let span = self.lexer.span();
            let line = self.source.line_at(span.start);
            let raw = match raw {
                Ok(raw) => raw,
                Err(err) => return self.fail(err.at_line(line.index + 1).into()),
            };
            let text = self.lexer.slice();

            let kind = match raw {
                RawToken::Whitespace | RawToken::Continuation => continue,
                RawToken::Open => {
                    self.open_brackets.push(line.index);
                    TokenKind::Other
                }
                RawToken::Close => {
                    self.open_brackets.pop();
                    TokenKind::Other
                }
                RawToken::String => TokenKind::String,
                RawToken::Newline | RawToken::Other => TokenKind::Other,
                RawToken::Comment => {
                    let comment = Token {
                        kind: TokenKind::Comment,
                        text,
                        line,
                    };
                    let Some(label) = self.declared_encoding(line) else {
                        return Some(Ok(comment));
                    };
                    if let Some(first) = self.encoding_line {
                        return self.fail(ConversionError::MultipleEncodingDeclarations {
                            first: first + 1,
                            second: line.index + 1,
                        });
                    }
                    self.encoding_line = Some(line.index);
                    self.pending = Some(comment);
                    return Some(Ok(Token {
                        kind: TokenKind::EncodingDecl,
                        text: label,
                        line,
                    }));
                }
            };

            return Some(Ok(Token { kind, text, line }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Result<Vec<(TokenKind, String, usize)>, ConversionError> {
        let source = Source::new(text);
        Tokenizer::new(&source)
            .map(|token| token.map(|t| (t.kind, t.text.to_string(), t.line.index)))
            .collect()
    }

    fn comments(text: &str) -> Vec<(String, usize)> {
        collect(text)
            .unwrap()
            .into_iter()
            .filter(|(kind, _, _)| *kind == TokenKind::Comment)
            .map(|(_, text, line)| (text, line))
            .collect()
    }

    #[test]
    fn test_comments_carry_their_line() {
        assert_eq!(
            comments("x = 1\n#%% cell\ny = 2  # trailing\n"),
            vec![("#%% cell".to_string(), 1), ("# trailing".to_string(), 2)]
        );
    }

    #[test]
    fn test_separator_inside_docstring_is_a_string() {
        let text = "\"\"\"\n#%% inside\n\"\"\"\n#%% outside\n";
        assert_eq!(comments(text), vec![("#%% outside".to_string(), 3)]);
        let tokens = collect(text).unwrap();
        assert_eq!(tokens[0].0, TokenKind::String);
        assert_eq!(tokens[0].2, 0);
    }

    #[test]
    fn test_encoding_declaration_precedes_its_comment() {
        let tokens = collect("# -*- coding: utf-8 -*-\nx = 1\n").unwrap();
        assert_eq!(
            tokens[0],
            (TokenKind::EncodingDecl, "utf-8".to_string(), 0)
        );
        assert_eq!(
            tokens[1],
            (TokenKind::Comment, "# -*- coding: utf-8 -*-".to_string(), 0)
        );
    }

    #[test]
    fn test_second_encoding_declaration_is_fatal() {
        let err = collect("# coding: utf-8\n# coding: latin-1\n").unwrap_err();
        assert_eq!(
            err,
            ConversionError::MultipleEncodingDeclarations {
                first: 1,
                second: 2
            }
        );
    }

    #[test]
    fn test_cookie_after_line_two_is_a_plain_comment() {
        let tokens = collect("\n\n# coding: utf-8\n").unwrap();
        assert!(tokens.iter().all(|t| t.0 != TokenKind::EncodingDecl));
    }

    #[test]
    fn test_unterminated_string_reports_line() {
        let err = collect("x = 1\ny = 'oops\n").unwrap_err();
        assert_eq!(
            err,
            ConversionError::Lex(LexError::UnterminatedString { line: 2 })
        );
    }

    #[test]
    fn test_unclosed_bracket_reports_opening_line() {
        let err = collect("x = [\n  1,\n#%% not yet\n").unwrap_err();
        assert_eq!(
            err,
            ConversionError::Lex(LexError::UnclosedBracket { line: 1 })
        );
    }

    #[test]
    fn test_stream_ends_after_error() {
        let source = Source::new("'a\n'b\n");
        let mut tokens = Tokenizer::new(&source);
        assert!(matches!(tokens.next(), Some(Err(_))));
        assert!(tokens.next().is_none());
    }
}
