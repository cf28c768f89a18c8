//! Standard transform definitions
//!
//! Decoding needs no per-file state and is shared as a static. Everything after it
//! reads the [`ConversionContext`] of one file, so those pipelines are built per
//! conversion by the functions below.

use crate::spyonde::cells::Segment;
use crate::spyonde::context::ConversionContext;
use crate::spyonde::notebook::Document;
use crate::spyonde::source::Source;
use crate::spyonde::transforms::stages::{
    Assembly, CellTransformation, Classification, Decoding, IgnoreFilter, Scanning,
    Segmentation,
};
use crate::spyonde::transforms::Transform;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Type alias for the full conversion transform
pub type NotebookTransform = Transform<Vec<u8>, Document>;

/// Raw bytes to decoded source: Vec<u8> → Source
pub static DECODING: Lazy<Transform<Vec<u8>, Source>> =
    Lazy::new(|| Transform::from_fn(Ok).then(Decoding::new()));

/// Bytes to filtered segments: Vec<u8> → Vec<Segment>
///
/// 1. Decoding
/// 2. Scanning (tokenize, find boundaries)
/// 3. Segmentation
/// 4. Ignore filter on raw segments
pub fn segmenting(context: Arc<ConversionContext>) -> Transform<Vec<u8>, Vec<Segment>> {
    Transform::from_fn(Ok)
        .then_transform(&DECODING)
        .then(Scanning::new(context.clone()))
        .then(Segmentation::new(context.clone()))
        .then(IgnoreFilter::new(context))
}

/// Bytes to notebook document: Vec<u8> → Document
///
/// Continues [`segmenting`] with classification, cell transformation, a second ignore
/// filter pass over the transformed cells, and assembly.
pub fn conversion(context: Arc<ConversionContext>, version: impl Into<String>) -> NotebookTransform {
    segmenting(context.clone())
        .then(Classification::new())
        .then(CellTransformation::new(context.clone()))
        .then(IgnoreFilter::new(context))
        .then(Assembly::new(version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spyonde::cells::Cell;

    #[test]
    fn test_decoding_static() {
        let source = DECODING.run(b"x = 1\n".to_vec()).unwrap();
        assert_eq!(source.line_count(), 1);
    }

    #[test]
    fn test_conversion_pipeline() {
        let context = Arc::new(ConversionContext::new("demo.py"));
        let input = b"#%% \n# # Title\n# - point one\n\n#%%\nprint(\"x\")\n\n".to_vec();
        let document = conversion(context, "3.7.4").run(input).unwrap();
        assert_eq!(
            document.cells,
            vec![
                Cell::markdown(["# Title", "- point one", ""]),
                Cell::code(["print(\"x\")"]),
            ]
        );
    }

    #[test]
    fn test_segmenting_drops_ignored_cells() {
        let context = Arc::new(ConversionContext::new("demo.py"));
        let input = b"#%% a\nx = 1\n#%% b\n# spyonde: ignore-cell\ny = 2\n".to_vec();
        let segments = segmenting(context).run(input).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].span, 0..2);
    }
}
