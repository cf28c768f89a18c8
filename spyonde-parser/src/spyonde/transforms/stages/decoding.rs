//! Decoding stage
//!
//! Turns the raw bytes of a script into a [`Source`], honouring a BOM or coding cookie.

use crate::spyonde::error::ConversionError;
use crate::spyonde::lexing::decode;
use crate::spyonde::source::Source;
use crate::spyonde::transforms::Runnable;
use tracing::debug;

pub struct Decoding;

impl Decoding {
    pub fn new() -> Self {
        Decoding
    }
}

impl Default for Decoding {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<u8>, Source> for Decoding {
    fn run(&self, input: Vec<u8>) -> Result<Source, ConversionError> {
        let decoded = decode(&input)?;
        debug!(
            encoding = decoded.encoding.name(),
            declared_on = ?decoded.declared_on,
            bytes = input.len(),
            "decoded source"
        );
        Ok(Source::new(decoded.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_with_bom() {
        let source = Decoding::new()
            .run(b"\xEF\xBB\xBF# %% hi\nx = 1\n".to_vec())
            .unwrap();
        assert_eq!(source.text(), "# %% hi\nx = 1\n");
    }

    #[test]
    fn test_latin1_cookie() {
        let source = Decoding::new()
            .run(b"# -*- coding: latin-1 -*-\n# caf\xE9\n".to_vec())
            .unwrap();
        assert_eq!(source.line(1).unwrap().text, "# caf\u{e9}");
    }

    #[test]
    fn test_invalid_utf8_fails() {
        assert!(Decoding::new().run(b"x = '\xFF'\n".to_vec()).is_err());
    }
}
