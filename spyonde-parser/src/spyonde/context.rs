//! Per-conversion state
//!
//! Every stage of a conversion reads from one [`ConversionContext`]: the compiled cell
//! markers and the display name of the file being converted. A context is built by the
//! caller for one file and dropped with it, so concurrent conversions never share
//! anything mutable.

use crate::spyonde::markers::CellMarkers;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ConversionContext {
    pub markers: CellMarkers,
    display_name: String,
}

impl ConversionContext {
    pub fn new(display_name: impl Into<String>) -> Self {
        ConversionContext {
            markers: CellMarkers::new(),
            display_name: display_name.into(),
        }
    }

    /// Context named after the base name of `path`
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name)
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Separator line placed in front of a file that does not start with one
    pub fn leading_separator(&self) -> String {
        format!("# %% {}", self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_path_uses_base_name() {
        let context = ConversionContext::for_path("some/dir/demo.py");
        assert_eq!(context.display_name(), "demo.py");
        assert_eq!(context.leading_separator(), "# %% demo.py");
    }

    #[test]
    fn test_leading_separator_is_a_separator() {
        let context = ConversionContext::new("lesson one.py");
        assert!(context.markers.is_separator(&context.leading_separator()));
    }
}
