//! Cell classification
//!
//! A cell is code as soon as one of its lines is neither blank nor a comment. Comments
//! alone never make a cell code, which is how comment-only blocks become prose.

use super::{is_blank, is_comment, CellKind};

/// How many lines of each sort a cell holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub comment: usize,
    pub blank: usize,
    pub other: usize,
}

impl LineCounts {
    pub fn of<S: AsRef<str>>(lines: &[S]) -> Self {
        lines
            .iter()
            .fold(LineCounts::default(), |mut counts, line| {
                let line = line.as_ref();
                if is_comment(line) {
                    counts.comment += 1;
                } else if is_blank(line) {
                    counts.blank += 1;
                } else {
                    counts.other += 1;
                }
                counts
            })
    }
}

/// Classify a cell's lines.
///
/// Returns `None` for a cell with nothing but blank lines; such a cell never reaches
/// the notebook.
pub fn classify<S: AsRef<str>>(lines: &[S]) -> Option<CellKind> {
    let counts = LineCounts::of(lines);
    if counts.other > 0 {
        Some(CellKind::Code)
    } else if counts.comment > 0 {
        Some(CellKind::Markdown)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_list_are_markdown() {
        assert_eq!(
            classify(&["# title", "# - a", "# - b"]),
            Some(CellKind::Markdown)
        );
    }

    #[test]
    fn test_any_statement_makes_code() {
        assert_eq!(classify(&["# comment", "x = 1"]), Some(CellKind::Code));
        assert_eq!(classify(&["", "    return x"]), Some(CellKind::Code));
    }

    #[test]
    fn test_blank_cell_is_rejected() {
        assert_eq!(classify(&["", "  "]), None);
        assert_eq!(classify::<&str>(&[]), None);
    }

    #[test]
    fn test_line_counts() {
        assert_eq!(
            LineCounts::of(&["#%% a", "", "  # b", "print(1)"]),
            LineCounts {
                comment: 2,
                blank: 1,
                other: 1
            }
        );
    }
}
