//! Cells
//!
//!     A cell is a contiguous block of source lines that becomes one notebook block.
//!     Cells go through four steps, each in its own module:
//!
//!         1. Segmenting. See [segmenting](segmenting). Lines are cut at separator
//!            comments into [`Segment`]s.
//!         2. Filtering. See [filtering](filtering). Segments carrying an ignore marker
//!            or holding only blank lines are dropped.
//!         3. Classification. See [classification](classification). A segment with any
//!            line that is neither blank nor a comment is code, the rest are markdown.
//!         4. Transformation. See [transformation](transformation). Markdown loses its
//!            comment syntax; code loses trailing blanks and separator leftovers.

pub mod classification;
pub mod filtering;
pub mod segmenting;
pub mod transformation;

use std::ops::Range;

/// The two notebook block types a cell can become
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Markdown,
    Code,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Markdown => "markdown",
            CellKind::Code => "code",
        }
    }
}

/// A contiguous range of source lines, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Source line indices this segment covers
    pub span: Range<usize>,
    /// The covered lines, with trailing whitespace removed
    pub lines: Vec<String>,
    /// Set on the first segment of a file that does not open with a separator; its
    /// first line is then the separator made up from the file name
    pub synthetic: bool,
}

/// A classified cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub lines: Vec<String>,
}

impl Cell {
    pub fn new(kind: CellKind, lines: Vec<String>) -> Self {
        Cell { kind, lines }
    }

    pub fn markdown<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Cell::new(CellKind::Markdown, lines.into_iter().map(Into::into).collect())
    }

    pub fn code<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Cell::new(CellKind::Code, lines.into_iter().map(Into::into).collect())
    }
}

/// Whether a line holds nothing but whitespace
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Whether a line is a comment once indentation is ignored
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
