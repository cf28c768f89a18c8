//! Physical source lines
//!
//! [`Source`] owns the decoded script text and an index of where each physical line
//! starts, so that byte offsets reported by the lexer map back to [`SourceLine`]s.
//! Lines end at `\n`, `\r\n` or a lone `\r`; a final terminator does not open an
//! extra empty line.

/// One physical line of the input, without its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 0-based position in the file
    pub index: usize,
    pub text: &'a str,
}

/// Decoded script text with a line index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    text: String,
    line_starts: Vec<usize>,
}

impl Source {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = line_starts(&text);
        Source { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }

    /// The line at `index`, if the file has that many lines
    pub fn line(&self, index: usize) -> Option<SourceLine<'_>> {
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.text.len());
        let raw = &self.text[start..end];
        let text = raw
            .strip_suffix("\r\n")
            .or_else(|| raw.strip_suffix('\n'))
            .or_else(|| raw.strip_suffix('\r'))
            .unwrap_or(raw);
        Some(SourceLine { index, text })
    }

    /// The line containing the byte at `offset`; offsets past the end map to the last line
    pub fn line_at(&self, offset: usize) -> SourceLine<'_> {
        let index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        self.line(index).unwrap_or(SourceLine { index: 0, text: "" })
    }

    pub fn lines(&self) -> impl Iterator<Item = SourceLine<'_>> + '_ {
        (0..self.line_count()).filter_map(move |index| self.line(index))
    }
}

fn line_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = Vec::new();
    if bytes.is_empty() {
        return starts;
    }
    starts.push(0);
    let mut i = 0;
    while i < bytes.len() {
        let next = match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => i + 2,
            b'\r' | b'\n' => i + 1,
            _ => {
                i += 1;
                continue;
            }
        };
        if next < bytes.len() {
            starts.push(next);
        }
        i = next;
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &Source) -> Vec<&str> {
        source.lines().map(|line| line.text).collect()
    }

    #[test]
    fn test_empty_source_has_no_lines() {
        let source = Source::new("");
        assert!(source.is_empty());
        assert_eq!(source.line_count(), 0);
    }

    #[test]
    fn test_trailing_newline_does_not_add_line() {
        assert_eq!(texts(&Source::new("a\nb\n")), vec!["a", "b"]);
        assert_eq!(texts(&Source::new("a\nb")), vec!["a", "b"]);
        assert_eq!(texts(&Source::new("a\n\n")), vec!["a", ""]);
    }

    #[test]
    fn test_mixed_terminators() {
        assert_eq!(texts(&Source::new("a\r\nb\rc\n")), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_line_at_offset() {
        let source = Source::new("ab\ncd\nef");
        assert_eq!(source.line_at(0).index, 0);
        assert_eq!(source.line_at(2).index, 0);
        assert_eq!(source.line_at(3).index, 1);
        assert_eq!(source.line_at(7).text, "ef");
        assert_eq!(source.line_at(100).index, 2);
    }
}
