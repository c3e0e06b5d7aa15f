use std::path::Path;

use sdc_engine::TransformOptions;
use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// Pipeline settings, usually read from a JSON file.
///
/// ```json
/// {
///   "plugins": ["remove-debugger"],
///   "useHostResolution": false,
///   "options": { "compact": false, "comments": true }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Plugin identifiers, bare or with the `sdc-plugin-` prefix.
    pub plugins: Vec<String>,
    /// Resolve plugins from the host's installed set instead of the
    /// engine's built-in registry.
    pub use_host_resolution: bool,
    /// Baseline transform options.
    pub options: TransformOptions,
}

impl PipelineConfig {
    pub fn from_json(text: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(text).map_err(PipelineError::ConfigParse)
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
