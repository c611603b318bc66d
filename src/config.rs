//! Settings for a single conversion run

use crate::prelude::*;

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error, From)]
pub enum ConfigError {
    #[error("{0}")]
    InvalidPath(InvalidPath),
    #[error("{0}")]
    UnknownFileType(UnknownFileType),
}

#[derive(Debug, Constructor)]
pub struct InvalidPath {
    pub path: PathBuf,
}

impl fmt::Display for InvalidPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid path `{}`: expected a file name with an extension",
            self.path.display()
        )
    }
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "unknown file type `{selector}`: expected c (CRACK), d (DAMAGE) or v (VON MISES)")]
pub struct UnknownFileType {
    pub selector: String,
}

/// Everything the converter needs besides the input itself
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub file_type: FileType,
    /// name of the input file without directory or extension, used to name the outputs
    pub base_name: String,
    /// directory in which `converted<base_name>` is created
    pub output_root: PathBuf,
}

impl ConvertConfig {
    pub fn new<T: Into<String>>(file_type: FileType, base_name: T) -> Self {
        Self {
            file_type,
            base_name: base_name.into(),
            output_root: PathBuf::from("."),
        }
    }

    /// configuration for converting the file at `path`
    pub fn for_input(path: &Path, file_type: FileType) -> Result<Self, ConfigError> {
        Ok(Self::new(file_type, base_name_from_path(path)?))
    }

    pub fn with_output_root<P: Into<PathBuf>>(mut self, output_root: P) -> Self {
        self.output_root = output_root.into();
        self
    }

    pub fn output_directory(&self) -> PathBuf {
        crate::write_vtk::output_directory(&self.output_root, &self.base_name)
    }
}

/// The file name of `path` with its directory and last extension removed.
///
/// ```
/// use std::path::Path;
/// assert_eq!(dat2vtk::base_name_from_path(Path::new("runs/beam.dat")).unwrap(), "beam");
/// assert!(dat2vtk::base_name_from_path(Path::new("runs/beam")).is_err());
/// ```
pub fn base_name_from_path(path: &Path) -> Result<String, ConfigError> {
    let invalid = || ConfigError::from(InvalidPath::new(path.to_path_buf()));

    let file_name = path.file_name().and_then(|name| name.to_str()).ok_or_else(invalid)?;

    match file_name.rsplit_once('.') {
        Some((stem, _extension)) if !stem.is_empty() => Ok(stem.to_string()),
        _ => Err(invalid()),
    }
}
