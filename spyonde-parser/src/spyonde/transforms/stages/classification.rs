//! Classification stage
//!
//! Gives each segment its [`CellKind`](crate::spyonde::cells::CellKind). A segment
//! with nothing to classify is dropped here as well.

use crate::spyonde::cells::classification::classify;
use crate::spyonde::cells::{Cell, Segment};
use crate::spyonde::error::ConversionError;
use crate::spyonde::transforms::Runnable;
use tracing::{debug, trace};

pub struct Classification;

impl Classification {
    pub fn new() -> Self {
        Classification
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Segment>, Vec<Cell>> for Classification {
    fn run(&self, input: Vec<Segment>) -> Result<Vec<Cell>, ConversionError> {
        let cells: Vec<Cell> = input
            .into_iter()
            .filter_map(|segment| {
                let kind = classify(&segment.lines)?;
                trace!(start = segment.span.start, kind = kind.as_str(), "classified");
                Some(Cell::new(kind, segment.lines))
            })
            .collect();
        debug!(cells = cells.len(), "classified segments");
        Ok(cells)
    }
}
