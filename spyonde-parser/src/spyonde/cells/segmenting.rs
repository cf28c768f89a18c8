//! Cell segmenting
//!
//! Separator comments found by the tokenizer split the file's lines into [`Segment`]s.
//! Segment *i* runs from boundary *i* up to, not including, boundary *i + 1*; the last
//! one runs to the end of the file. Lines before the first boundary are not dropped:
//! a synthetic separator titled with the file name is put in front of them.

use super::Segment;
use crate::spyonde::context::ConversionContext;
use crate::spyonde::error::ConversionError;
use crate::spyonde::lexing::tokenize;
use crate::spyonde::source::Source;
use tracing::trace;

/// The file's lines and the indices of the lines that open a cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedSource {
    pub lines: Vec<String>,
    /// Ascending and unique
    pub boundaries: Vec<usize>,
}

/// Tokenize the whole source and record which lines are cell boundaries.
///
/// Any tokenizer error aborts the scan.
pub fn scan(source: &Source, context: &ConversionContext) -> Result<ScannedSource, ConversionError> {
    let mut boundaries: Vec<usize> = Vec::new();
    for token in tokenize(source) {
        let token = token?;
        if let Some(line) = context.markers.boundary_line(&token) {
            if boundaries.last() != Some(&line) {
                trace!(line, separator = token.text, "cell boundary");
                boundaries.push(line);
            }
        }
    }

    let lines = source
        .lines()
        .map(|line| line.text.trim_end().to_string())
        .collect();
    Ok(ScannedSource { lines, boundaries })
}

/// Split scanned lines into segments at their boundaries
pub fn segment(scanned: &ScannedSource, context: &ConversionContext) -> Vec<Segment> {
    let lines = &scanned.lines;
    if lines.is_empty() {
        return Vec::new();
    }

    let mut starts: Vec<usize> = scanned
        .boundaries
        .iter()
        .copied()
        .filter(|&line| line < lines.len())
        .collect();
    let synthetic = starts.first() != Some(&0);
    if synthetic {
        starts.insert(0, 0);
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(lines.len());
            let mut segment_lines = Vec::with_capacity(end - start + 1);
            if i == 0 && synthetic {
                segment_lines.push(context.leading_separator());
            }
            segment_lines.extend_from_slice(&lines[start..end]);
            Segment {
                span: start..end,
                lines: segment_lines,
                synthetic: i == 0 && synthetic,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments_of(text: &str) -> Vec<Segment> {
        let context = ConversionContext::new("demo.py");
        let source = Source::new(text);
        let scanned = scan(&source, &context).unwrap();
        segment(&scanned, &context)
    }

    #[test]
    fn test_empty_file_has_no_segments() {
        assert!(segments_of("").is_empty());
    }

    #[test]
    fn test_file_without_separators_is_one_titled_segment() {
        let segments = segments_of("import os\nprint(os.sep)\n");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].span, 0..2);
        assert!(segments[0].synthetic);
        assert_eq!(
            segments[0].lines,
            vec!["# %% demo.py", "import os", "print(os.sep)"]
        );
    }

    #[test]
    fn test_split_at_each_separator() {
        let segments = segments_of("#%% one\na = 1\n#%% two\nb = 2\n");
        assert_eq!(segments.len(), 2);
        assert!(!segments[0].synthetic);
        assert_eq!(segments[0].lines, vec!["#%% one", "a = 1"]);
        assert_eq!(segments[1].span, 2..4);
        assert_eq!(segments[1].lines, vec!["#%% two", "b = 2"]);
    }

    #[test]
    fn test_leading_content_gets_synthetic_separator() {
        let segments = segments_of("# -*- coding: utf-8 -*-\nimport os\n#%% body\nx = 1\n");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].span, 0..2);
        assert_eq!(segments[0].lines[0], "# %% demo.py");
        assert_eq!(segments[1].lines[0], "#%% body");
    }

    #[test]
    fn test_separator_in_string_does_not_split() {
        let segments = segments_of("#%% a\ns = '''\n#%% b\n'''\n");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].lines.len(), 4);
    }

    #[test]
    fn test_real_separator_named_like_the_file_is_not_synthetic() {
        let segments = segments_of("# %% demo.py\n\n");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].synthetic);
        assert_eq!(segments[0].lines, vec!["# %% demo.py", ""]);
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed() {
        let segments = segments_of("#%% a   \nx = 1\t\n");
        assert_eq!(segments[0].lines, vec!["#%% a", "x = 1"]);
    }

    #[test]
    fn test_scan_propagates_lex_errors() {
        let context = ConversionContext::new("bad.py");
        let source = Source::new("#%% a\ns = 'open\n");
        assert!(scan(&source, &context).is_err());
    }
}
