use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contents of a sidecar map file.
///
/// Only `sourceRoot`, `sources[0]` and `file` drive the pipeline. Everything
/// else, including keys this type doesn't know about, is kept so that a map
/// can be handed to the transform engine unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub mappings: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> u32 {
    3
}

impl SourceMapDocument {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// The original source file this map points back to.
    pub fn source_file_name(&self) -> Option<&str> {
        self.sources.first().map(String::as_str)
    }
}

impl Default for SourceMapDocument {
    fn default() -> Self {
        Self {
            version: default_version(),
            file: None,
            source_root: None,
            sources: Vec::new(),
            sources_content: None,
            names: Vec::new(),
            mappings: String::new(),
            extra: Map::new(),
        }
    }
}
