//! Transform pipeline infrastructure
//!
//! A conversion is a chain of stages, each turning one intermediate value into the next:
//!
//! ```text
//! Vec<u8> → Source → ScannedSource → Vec<Segment> → Vec<Cell> → Document
//! ```
//!
//! ## The `Runnable` Trait
//!
//! Every stage implements `Runnable<I, O>`:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> Result<O, ConversionError>;
//! }
//! ```
//!
//! ## The `Transform<I, O>` Type
//!
//! Wraps a chain of stages and adds `.then()`, so the compiler checks that each stage's
//! input matches the previous stage's output:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Scanning::new(context.clone()))     // Source → ScannedSource
//!     .then(Segmentation::new(context.clone())); // ScannedSource → Vec<Segment>
//! ```
//!
//! Stages that need the compiled markers or the file name hold an
//! `Arc<ConversionContext>` built for the one conversion they serve. Context-free
//! pipelines, such as decoding, are shared statics. See [`standard`].
//!
//! Errors are never retried: every stage is deterministic, so the first failure ends
//! the run and is handed to the caller unchanged.

pub mod stages;
pub mod standard;

use crate::spyonde::error::ConversionError;

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, ConversionError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, ConversionError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, ConversionError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Feed this transform's output into `stage`
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a shared, pre-built transform
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, ConversionError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, ConversionError> {
        Transform::run(self, input)
    }
}
