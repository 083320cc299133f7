use serde::Deserialize;

use crate::lexer::TranscriptDialect;
use crate::path_normalizer::RootPaths;

/// Settings for a [`crate::ShaderExplorer`], e.g. from a TOML file:
///
/// ```toml
/// [roots]
/// install_root = "C:/Program Files/Editor/"
/// include_root = "C:/Program Files/Editor/Data/CGIncludes/"
///
/// [dialect]
/// local_keywords = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub roots: RootPaths,
    pub dialect: TranscriptDialect,
}

#[cfg(feature = "cli")]
impl ExplorerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, crate::ExplorerError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, crate::ExplorerError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}
