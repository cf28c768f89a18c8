//! Script loading and notebook writing
//!
//! [`NotebookLoader`] holds the raw bytes of one script together with the
//! [`ConversionContext`] built for it, and runs transforms over them. [`convert_file`]
//! is the whole job for one file: read, convert in memory, then write the notebook
//! unless that would replace an existing file without permission.
//!
//! ```rust,ignore
//! use spyonde_parser::spyonde::loader::{convert_file, ConversionStatus, ConvertRequest};
//!
//! let request = ConvertRequest::new("demo.py", "3.7.4");
//! let mut conversion = convert_file(&request)?;
//! if conversion.status == ConversionStatus::PendingOverwrite && user_agrees() {
//!     conversion.commit()?;
//! }
//! ```

use crate::spyonde::cells::Segment;
use crate::spyonde::context::ConversionContext;
use crate::spyonde::error::ConversionError;
use crate::spyonde::notebook::Document;
use crate::spyonde::transforms::standard::{conversion, segmenting};
use crate::spyonde::transforms::Transform;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Appended to the input path when no output path is given
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".gen.ipynb";

/// Script loader with transform shortcuts
pub struct NotebookLoader {
    bytes: Vec<u8>,
    context: Arc<ConversionContext>,
}

impl NotebookLoader {
    /// Load a script from disk, naming the conversion after the file's base name
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConversionError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| ConversionError::io(path, err))?;
        Ok(NotebookLoader {
            bytes,
            context: Arc::new(ConversionContext::for_path(path)),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        NotebookLoader {
            bytes: bytes.into(),
            context: Arc::new(ConversionContext::new(name)),
        }
    }

    pub fn from_string(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self::from_bytes(name, source.into().into_bytes())
    }

    pub fn context(&self) -> &Arc<ConversionContext> {
        &self.context
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Run a custom transform on the raw bytes
    pub fn with<O: 'static>(&self, transform: &Transform<Vec<u8>, O>) -> Result<O, ConversionError> {
        transform.run(self.bytes.clone())
    }

    /// Decode, segment and drop ignored or empty segments
    pub fn segments(&self) -> Result<Vec<Segment>, ConversionError> {
        self.with(&segmenting(self.context.clone()))
    }

    /// Run the full pipeline into a notebook document
    pub fn convert(&self, version: &str) -> Result<Document, ConversionError> {
        self.with(&conversion(self.context.clone(), version))
    }
}

/// What to convert and where to put the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    pub input: PathBuf,
    /// Defaults to the input path with `output_suffix` appended
    pub output: Option<PathBuf>,
    pub version: String,
    /// Replace an existing output without asking
    pub overwrite: bool,
    pub output_suffix: String,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        ConvertRequest {
            input: input.into(),
            output: None,
            version: version.into(),
            overwrite: false,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_output_path(&self.input, &self.output_suffix),
        }
    }
}

/// `demo.py` becomes `demo.py.gen.ipynb` with the default suffix
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Written,
    /// The output exists and was left untouched; call [`Conversion::commit`] to replace it
    PendingOverwrite,
}

/// A finished in-memory conversion and whether it reached the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output_path: PathBuf,
    pub json: String,
    pub status: ConversionStatus,
}

impl Conversion {
    /// Write the notebook, replacing whatever is at the output path
    pub fn commit(&mut self) -> Result<(), ConversionError> {
        write_notebook(&self.output_path, &self.json)?;
        self.status = ConversionStatus::Written;
        Ok(())
    }

    /// The written path, or [`ConversionError::OutputExists`] if the write is still pending
    pub fn ensure_written(&self) -> Result<&Path, ConversionError> {
        match self.status {
            ConversionStatus::Written => Ok(&self.output_path),
            ConversionStatus::PendingOverwrite => {
                Err(ConversionError::OutputExists(self.output_path.clone()))
            }
        }
    }
}

/// Convert one script and write the notebook.
///
/// Nothing is written if any stage fails. An existing output is only replaced when
/// `request.overwrite` is set; otherwise the result comes back as
/// [`ConversionStatus::PendingOverwrite`].
pub fn convert_file(request: &ConvertRequest) -> Result<Conversion, ConversionError> {
    let loader = NotebookLoader::from_path(&request.input)?;
    let document = loader.convert(&request.version)?;
    let json = document.to_json()?;

    let mut conversion = Conversion {
        output_path: request.output_path(),
        json,
        status: ConversionStatus::PendingOverwrite,
    };
    if conversion.output_path.is_file() && !request.overwrite {
        debug!(path = %conversion.output_path.display(), "output exists, not overwriting");
        return Ok(conversion);
    }
    conversion.commit()?;
    Ok(conversion)
}

fn write_notebook(path: &Path, json: &str) -> Result<(), ConversionError> {
    fs::write(path, json).map_err(|err| ConversionError::io(path, err))?;
    info!(path = %path.display(), bytes = json.len(), "created notebook");
    Ok(())
}
