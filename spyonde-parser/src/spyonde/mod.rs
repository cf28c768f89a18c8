//! Main module for spyonde library functionality

pub mod cells;
pub mod context;
pub mod error;
pub mod lexing;
pub mod loader;
pub mod markers;
pub mod notebook;
pub mod source;
pub mod transforms;

pub use cells::{Cell, CellKind};
pub use context::ConversionContext;
pub use error::{ConversionError, LexError};
pub use loader::{convert_file, Conversion, ConversionStatus, ConvertRequest, NotebookLoader};
pub use notebook::Document;
