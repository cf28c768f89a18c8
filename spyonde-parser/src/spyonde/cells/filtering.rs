//! Cell filtering
//!
//! A segment is dropped when one of its lines is an ignore marker, or when it holds
//! nothing but blank lines. The synthetic leading separator does not count as content,
//! so a file that opens with blank lines does not produce an empty first cell.

use super::{is_blank, Cell, Segment};
use crate::spyonde::markers::CellMarkers;

/// Whether any line asks for the cell to be left out
pub fn is_ignored<S: AsRef<str>>(lines: &[S], markers: &CellMarkers) -> bool {
    lines
        .iter()
        .any(|line| markers.is_ignore_marker(line.as_ref()))
}

/// Whether any line holds more than whitespace
pub fn has_content<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().any(|line| !is_blank(line.as_ref()))
}

pub fn keep_segment(segment: &Segment, markers: &CellMarkers) -> bool {
    if is_ignored(&segment.lines, markers) {
        return false;
    }
    let content = match segment.lines.split_first() {
        Some((_, rest)) if segment.synthetic => rest,
        _ => &segment.lines[..],
    };
    has_content(content)
}

/// Checked again after transformation, which can empty a cell or surface a marker
pub fn keep_cell(cell: &Cell, markers: &CellMarkers) -> bool {
    has_content(&cell.lines) && !is_ignored(&cell.lines, markers)
}
