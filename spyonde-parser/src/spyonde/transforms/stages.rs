//! Individual transformation stages
//!
//! Each stage implements [`Runnable`](super::Runnable) and can be run on its own or
//! composed into a pipeline. See [`standard`](super::standard) for the usual chains.

pub mod assembly;
pub mod classification;
pub mod decoding;
pub mod filtering;
pub mod scanning;
pub mod transformation;

pub use assembly::Assembly;
pub use classification::Classification;
pub use decoding::Decoding;
pub use filtering::IgnoreFilter;
pub use scanning::{Scanning, Segmentation};
pub use transformation::CellTransformation;
