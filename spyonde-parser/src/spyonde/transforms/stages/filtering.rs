//! Ignore filter stage
//!
//! Runs twice in the standard pipeline: on raw segments, and again on transformed
//! cells, which can come out empty once separator leftovers are removed.

use crate::spyonde::cells::filtering::{keep_cell, keep_segment};
use crate::spyonde::cells::{Cell, Segment};
use crate::spyonde::context::ConversionContext;
use crate::spyonde::error::ConversionError;
use crate::spyonde::transforms::Runnable;
use std::sync::Arc;
use tracing::debug;

pub struct IgnoreFilter {
    context: Arc<ConversionContext>,
}

impl IgnoreFilter {
    pub fn new(context: Arc<ConversionContext>) -> Self {
        IgnoreFilter { context }
    }
}

impl Runnable<Vec<Segment>, Vec<Segment>> for IgnoreFilter {
    fn run(&self, input: Vec<Segment>) -> Result<Vec<Segment>, ConversionError> {
        let before = input.len();
        let kept: Vec<Segment> = input
            .into_iter()
            .filter(|segment| keep_segment(segment, &self.context.markers))
            .collect();
        debug!(dropped = before - kept.len(), kept = kept.len(), "filtered segments");
        Ok(kept)
    }
}

impl Runnable<Vec<Cell>, Vec<Cell>> for IgnoreFilter {
    fn run(&self, input: Vec<Cell>) -> Result<Vec<Cell>, ConversionError> {
        let before = input.len();
        let kept: Vec<Cell> = input
            .into_iter()
            .filter(|cell| keep_cell(cell, &self.context.markers))
            .collect();
        debug!(dropped = before - kept.len(), kept = kept.len(), "filtered cells");
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: usize, lines: &[&str]) -> Segment {
        Segment {
            span: start..start + lines.len(),
            lines: lines.iter().map(|line| line.to_string()).collect(),
            synthetic: false,
        }
    }

    #[test]
    fn test_segments_with_marker_are_dropped() {
        let filter = IgnoreFilter::new(Arc::new(ConversionContext::new("demo.py")));
        let segments = vec![
            segment(0, &["#%% keep", "x = 1"]),
            segment(2, &["#%% scratch", "# spyonde: ignore-cell", "y = 2"]),
            segment(5, &["", ""]),
        ];
        let kept: Vec<Segment> = filter.run(segments).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].span, 0..2);
    }

    #[test]
    fn test_empty_cells_are_dropped() {
        let filter = IgnoreFilter::new(Arc::new(ConversionContext::new("demo.py")));
        let cells = vec![Cell::code(Vec::<String>::new()), Cell::markdown(["# Hi"])];
        let kept: Vec<Cell> = filter.run(cells).unwrap();
        assert_eq!(kept, vec![Cell::markdown(["# Hi"])]);
    }
}
