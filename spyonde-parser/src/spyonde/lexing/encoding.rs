//! Source decoding
//!
//!     Scripts are read as bytes. A UTF-8 byte order mark or a PEP 263 coding cookie on
//!     one of the first two lines picks the encoding; without either the source is UTF-8.
//!     The second line may only declare an encoding when the first one is blank or a
//!     comment, the same rule the host interpreter applies.

use crate::spyonde::error::{ConversionError, LexError};
use once_cell::sync::Lazy;
use regex::Regex;

static CODING_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t\f]*#.*?coding[:=][ \t]*([-\w.]+)").unwrap());

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encodings a script may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf8Sig,
    Latin1,
    Ascii,
}

impl Encoding {
    /// Resolve a cookie label, ignoring case and `_`/`-` differences
    pub fn from_label(label: &str) -> Option<Encoding> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Some(Encoding::Utf8),
            "utf-8-sig" => Some(Encoding::Utf8Sig),
            "latin-1" | "latin1" | "l1" | "iso-8859-1" | "iso8859-1" | "iso-latin-1" => {
                Some(Encoding::Latin1)
            }
            "ascii" | "us-ascii" => Some(Encoding::Ascii),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf8Sig => "utf-8-sig",
            Encoding::Latin1 => "iso-8859-1",
            Encoding::Ascii => "ascii",
        }
    }

    fn is_utf8(&self) -> bool {
        matches!(self, Encoding::Utf8 | Encoding::Utf8Sig)
    }
}

/// Returns the encoding label declared by a coding cookie on this line, if any
pub fn cookie(line: &str) -> Option<&str> {
    CODING_COOKIE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether a cookie on the second line is honoured, given the first line
pub fn second_line_may_declare(first_line: &str) -> bool {
    let trimmed = first_line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Decoded script text together with how its encoding was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: Encoding,
    /// 1-based line of the coding cookie that chose the encoding
    pub declared_on: Option<usize>,
}

/// Decode raw script bytes into text
pub fn decode(bytes: &[u8]) -> Result<Decoded, ConversionError> {
    let (has_bom, body) = match bytes.strip_prefix(BOM) {
        Some(rest) => (true, rest),
        None => (false, bytes),
    };

    let declaration = find_declaration(body)?;
    let encoding = match (&declaration, has_bom) {
        (Some((_, encoding)), false) => *encoding,
        (Some((line, encoding)), true) if !encoding.is_utf8() => {
            return Err(LexError::InvalidEncoding {
                line: *line,
                encoding: "utf-8".to_string(),
            }
            .into());
        }
        (_, true) => Encoding::Utf8Sig,
        (None, false) => Encoding::Utf8,
    };

    let text = match encoding {
        Encoding::Utf8 | Encoding::Utf8Sig => match std::str::from_utf8(body) {
            Ok(text) => text.to_string(),
            Err(err) => {
                return Err(invalid(body, err.valid_up_to(), encoding));
            }
        },
        Encoding::Latin1 => body.iter().map(|&b| b as char).collect(),
        Encoding::Ascii => {
            if let Some(pos) = body.iter().position(|b| !b.is_ascii()) {
                return Err(invalid(body, pos, encoding));
            }
            body.iter().map(|&b| b as char).collect()
        }
    };

    Ok(Decoded {
        text,
        encoding,
        declared_on: declaration.map(|(line, _)| line),
    })
}

/// Finds the first honoured coding cookie as (1-based line, encoding)
fn find_declaration(body: &[u8]) -> Result<Option<(usize, Encoding)>, ConversionError> {
    let mut lines = body.split(|&b| b == b'\n').take(2);
    let first = String::from_utf8_lossy(lines.next().unwrap_or_default());
    if let Some(label) = cookie(&first) {
        return resolve(label, 1).map(Some);
    }
    if !second_line_may_declare(&first) {
        return Ok(None);
    }
    match lines.next() {
        Some(second) => {
            let second = String::from_utf8_lossy(second);
            match cookie(&second) {
                Some(label) => resolve(label, 2).map(Some),
                None => Ok(None),
            }
        }
        None => Ok(None),
    }
}

fn resolve(label: &str, line: usize) -> Result<(usize, Encoding), ConversionError> {
    Encoding::from_label(label)
        .map(|encoding| (line, encoding))
        .ok_or_else(|| {
            LexError::UnknownEncoding {
                line,
                name: label.to_string(),
            }
            .into()
        })
}

fn invalid(body: &[u8], offset: usize, encoding: Encoding) -> ConversionError {
    let line = body[..offset].iter().filter(|&&b| b == b'\n').count() + 1;
    LexError::InvalidEncoding {
        line,
        encoding: encoding.name().to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_forms() {
        assert_eq!(cookie("# -*- coding: utf-8 -*-"), Some("utf-8"));
        assert_eq!(cookie("# vim: set fileencoding=latin-1 :"), Some("latin-1"));
        assert_eq!(cookie("x = 1  # coding: utf-8"), None);
        assert_eq!(cookie("# just a comment"), None);
    }

    #[test]
    fn test_default_is_utf8() {
        let decoded = decode("print('é')\n".as_bytes()).unwrap();
        assert_eq!(decoded.encoding, Encoding::Utf8);
        assert_eq!(decoded.declared_on, None);
        assert_eq!(decoded.text, "print('é')\n");
    }

    #[test]
    fn test_bom_is_stripped() {
        let decoded = decode(b"\xEF\xBB\xBFx = 1\n").unwrap();
        assert_eq!(decoded.encoding, Encoding::Utf8Sig);
        assert_eq!(decoded.text, "x = 1\n");
    }

    #[test]
    fn test_latin1_cookie_on_second_line() {
        let decoded = decode(b"#!/usr/bin/env python\n# coding: latin-1\ns = '\xE9'\n").unwrap();
        assert_eq!(decoded.encoding, Encoding::Latin1);
        assert_eq!(decoded.declared_on, Some(2));
        assert!(decoded.text.ends_with("s = 'é'\n"));
    }

    #[test]
    fn test_second_line_ignored_after_code() {
        let decoded = decode(b"x = 1\n# coding: latin-1\n").unwrap();
        assert_eq!(decoded.encoding, Encoding::Utf8);
        assert_eq!(decoded.declared_on, None);
    }

    #[test]
    fn test_unknown_encoding() {
        let err = decode(b"# coding: klingon\n").unwrap_err();
        assert_eq!(
            err,
            ConversionError::Lex(LexError::UnknownEncoding {
                line: 1,
                name: "klingon".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let err = decode(b"x = 1\ny = '\xFF'\n").unwrap_err();
        assert_eq!(
            err,
            ConversionError::Lex(LexError::InvalidEncoding {
                line: 2,
                encoding: "utf-8".to_string()
            })
        );
    }

    #[test]
    fn test_bom_conflicts_with_latin1_cookie() {
        let err = decode(b"\xEF\xBB\xBF# coding: latin-1\n").unwrap_err();
        assert!(matches!(
            err,
            ConversionError::Lex(LexError::InvalidEncoding { line: 1, .. })
        ));
    }
}
