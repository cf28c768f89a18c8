//! Cell transformation stage
//!
//! Applies the markdown or code rewrite to every classified cell.

use crate::spyonde::cells::transformation::transform;
use crate::spyonde::cells::Cell;
use crate::spyonde::context::ConversionContext;
use crate::spyonde::error::ConversionError;
use crate::spyonde::transforms::Runnable;
use std::sync::Arc;
use tracing::debug;

pub struct CellTransformation {
    context: Arc<ConversionContext>,
}

impl CellTransformation {
    pub fn new(context: Arc<ConversionContext>) -> Self {
        CellTransformation { context }
    }
}

impl Runnable<Vec<Cell>, Vec<Cell>> for CellTransformation {
    fn run(&self, input: Vec<Cell>) -> Result<Vec<Cell>, ConversionError> {
        let cells: Vec<Cell> = input
            .into_iter()
            .map(|cell| transform(cell, &self.context.markers))
            .collect();
        debug!(cells = cells.len(), "transformed cells");
        Ok(cells)
    }
}
