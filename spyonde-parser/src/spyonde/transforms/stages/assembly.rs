//! Assembly stage
//!
//! Wraps the final cell list into a [`Document`] carrying the requested runtime version.

use crate::spyonde::cells::Cell;
use crate::spyonde::error::ConversionError;
use crate::spyonde::notebook::Document;
use crate::spyonde::transforms::Runnable;
use tracing::debug;

pub struct Assembly {
    version: String,
}

impl Assembly {
    pub fn new(version: impl Into<String>) -> Self {
        Assembly {
            version: version.into(),
        }
    }
}

impl Runnable<Vec<Cell>, Document> for Assembly {
    fn run(&self, input: Vec<Cell>) -> Result<Document, ConversionError> {
        debug!(cells = input.len(), version = %self.version, "assembled document");
        Ok(Document::new(input, self.version.clone()))
    }
}
