//! Scanning and segmentation stages
//!
//! [`Scanning`] tokenizes the decoded source and records which lines open a cell.
//! [`Segmentation`] cuts the scanned lines into segments at those lines.

use crate::spyonde::cells::segmenting::{scan, segment, ScannedSource};
use crate::spyonde::cells::Segment;
use crate::spyonde::context::ConversionContext;
use crate::spyonde::error::ConversionError;
use crate::spyonde::source::Source;
use crate::spyonde::transforms::Runnable;
use std::sync::Arc;
use tracing::debug;

pub struct Scanning {
    context: Arc<ConversionContext>,
}

impl Scanning {
    pub fn new(context: Arc<ConversionContext>) -> Self {
        Scanning { context }
    }
}

impl Runnable<Source, ScannedSource> for Scanning {
    fn run(&self, input: Source) -> Result<ScannedSource, ConversionError> {
        let scanned = scan(&input, &self.context)?;
        debug!(
            file = self.context.display_name(),
            lines = scanned.lines.len(),
            boundaries = scanned.boundaries.len(),
            "scanned source"
        );
        Ok(scanned)
    }
}

pub struct Segmentation {
    context: Arc<ConversionContext>,
}

impl Segmentation {
    pub fn new(context: Arc<ConversionContext>) -> Self {
        Segmentation { context }
    }
}

impl Runnable<ScannedSource, Vec<Segment>> for Segmentation {
    fn run(&self, input: ScannedSource) -> Result<Vec<Segment>, ConversionError> {
        let segments = segment(&input, &self.context);
        debug!(segments = segments.len(), "segmented source");
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_then_segment() {
        let context = Arc::new(ConversionContext::new("demo.py"));
        let scanned = Scanning::new(context.clone())
            .run(Source::new("x = 0\n#%% a\nx = 1\n"))
            .unwrap();
        assert_eq!(scanned.boundaries, vec![1]);

        let segments = Segmentation::new(context).run(scanned).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].lines, vec!["# %% demo.py", "x = 0"]);
    }
}
