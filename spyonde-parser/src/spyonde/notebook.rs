//! Notebook assembly
//!
//! A [`Document`] is the final ordered cell list plus the runtime version string the
//! caller asked for. [`Document::to_notebook`] maps it onto the nbformat 4 schema and
//! [`Document::to_json`] serializes it the way notebook tools store it on disk: one
//! space of indentation and keys in schema order.

use crate::spyonde::cells::{Cell, CellKind};
use crate::spyonde::error::ConversionError;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

pub const NBFORMAT: u32 = 4;
pub const NBFORMAT_MINOR: u32 = 2;

/// The assembled document, ready for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub cells: Vec<Cell>,
    /// Runtime version written into `language_info.version`
    pub version: String,
}

impl Document {
    pub fn new(cells: Vec<Cell>, version: impl Into<String>) -> Self {
        Document {
            cells,
            version: version.into(),
        }
    }

    pub fn to_notebook(&self) -> Notebook {
        Notebook {
            cells: self.cells.iter().map(NotebookCell::from).collect(),
            metadata: NotebookMetadata::for_version(&self.version),
            nbformat: NBFORMAT,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }

    pub fn to_json(&self) -> Result<String, ConversionError> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
        self.to_notebook().serialize(&mut serializer)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|err| ConversionError::Serialization(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<NotebookCell>,
    pub metadata: NotebookMetadata,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum NotebookCell {
    Markdown {
        metadata: CellMetadata,
        source: Vec<String>,
    },
    Code {
        metadata: CellMetadata,
        source: Vec<String>,
        execution_count: Option<u32>,
        outputs: Vec<Value>,
    },
}

impl From<&Cell> for NotebookCell {
    fn from(cell: &Cell) -> Self {
        let source = cell.lines.iter().map(|line| format!("{}\n", line)).collect();
        match cell.kind {
            CellKind::Markdown => NotebookCell::Markdown {
                metadata: CellMetadata::markdown(),
                source,
            },
            CellKind::Code => NotebookCell::Code {
                metadata: CellMetadata::code(),
                source,
                execution_count: None,
                outputs: Vec::new(),
            },
        }
    }
}

/// Every cell is a slide; code cells also scroll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMetadata {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scrolled: Option<bool>,
    pub slideshow: Slideshow,
}

impl CellMetadata {
    pub fn markdown() -> Self {
        CellMetadata {
            scrolled: None,
            slideshow: Slideshow::slide(),
        }
    }

    pub fn code() -> Self {
        CellMetadata {
            scrolled: Some(true),
            slideshow: Slideshow::slide(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slideshow {
    pub slide_type: String,
}

impl Slideshow {
    fn slide() -> Self {
        Slideshow {
            slide_type: "slide".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    pub celltoolbar: String,
    pub kernelspec: KernelSpec,
    pub language_info: LanguageInfo,
}

impl NotebookMetadata {
    pub fn for_version(version: &str) -> Self {
        NotebookMetadata {
            celltoolbar: "Slideshow".to_string(),
            kernelspec: KernelSpec {
                display_name: "Python 3".to_string(),
                language: "python".to_string(),
                name: "python3".to_string(),
            },
            language_info: LanguageInfo {
                codemirror_mode: CodemirrorMode {
                    name: "ipython".to_string(),
                    version: 3,
                },
                file_extension: ".py".to_string(),
                mimetype: "text/x-python".to_string(),
                name: "python".to_string(),
                nbconvert_exporter: "python".to_string(),
                pygments_lexer: "ipython3".to_string(),
                version: version.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSpec {
    pub display_name: String,
    pub language: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub codemirror_mode: CodemirrorMode,
    pub file_extension: String,
    pub mimetype: String,
    pub name: String,
    pub nbconvert_exporter: String,
    pub pygments_lexer: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodemirrorMode {
    pub name: String,
    pub version: u32,
}
