/// Extraction options loader - parses hydroframe.toml
///
/// The pipeline has one required switch (`interpolate`) plus the opt-in
/// `mark_interpolated`. Both default to false, so an empty file or a
/// missing `[extract]` table yields the default behaviour.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::model::NwisError;

/// Options consumed by `extract::extract_nwis_table`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Fill null value cells by linear interpolation over time.
    pub interpolate: bool,
    /// Tag filled cells `hf.interpolated` instead of keeping their gap tag.
    pub mark_interpolated: bool,
}

/// Root structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OptionsFile {
    extract: ExtractOptions,
}

impl ExtractOptions {
    /// Parses options from TOML text with an `[extract]` table.
    pub fn from_toml_str(contents: &str) -> Result<Self, NwisError> {
        let file: OptionsFile = toml::from_str(contents)
            .map_err(|e| NwisError::Config(format!("Failed to parse options: {}", e)))?;
        Ok(file.extract)
    }
}

/// Loads extraction options from a TOML file.
///
/// # Errors
/// `NwisError::Config` if the file can't be read or isn't valid TOML.
pub fn load_options(path: impl AsRef<Path>) -> Result<ExtractOptions, NwisError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| NwisError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    ExtractOptions::from_toml_str(&contents)
}
