use std::sync::LazyLock;

use regex::Regex;
use sdc_files::SourceMapDocument;
use serde::{Deserialize, Serialize};

/// Comments the pipeline manages itself and the engine must never re-emit.
pub const SOURCE_MAPPING_URL_PATTERN: &str = r"^\s*[#@]\s*sourceMappingURL=";

static SOURCE_MAPPING_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SOURCE_MAPPING_URL_PATTERN).expect("constant pattern is valid"));

/// Options for transforming one file.
///
/// A pipeline holds one baseline value and derives a fresh copy per file, so
/// nothing set for one file can leak into the next.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    pub filename: Option<String>,
    pub filename_relative: Option<String>,
    /// Generate a source map for the emitted code.
    pub source_maps: bool,
    pub source_root: Option<String>,
    /// Name recorded as the source of the generated map.
    pub source_file_name: Option<String>,
    /// Value of the generated map's `file` field.
    pub source_map_target: Option<String>,
    /// Map of the input text; the generated map is composed onto it.
    pub input_source_map: Option<SourceMapDocument>,
    /// Keep comments from the input.
    pub comments: bool,
    /// Emit minified code.
    pub compact: bool,
    /// Return the transformed module alongside the code.
    pub ast: bool,
    /// Comments whose text matches are dropped even when `comments` is set.
    #[serde(skip)]
    pub comment_filter: Option<Regex>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            filename: None,
            filename_relative: None,
            source_maps: false,
            source_root: None,
            source_file_name: None,
            source_map_target: None,
            input_source_map: None,
            comments: true,
            compact: false,
            ast: false,
            comment_filter: None,
        }
    }
}

impl TransformOptions {
    pub fn should_print_comment(&self, text: &str) -> bool {
        self.comments
            && !self
                .comment_filter
                .as_ref()
                .is_some_and(|filter| filter.is_match(text))
    }

    /// Filter that drops `# sourceMappingURL=` comments. Compiled once and
    /// shared by every caller.
    pub fn source_mapping_url_filter() -> Regex {
        SOURCE_MAPPING_URL.clone()
    }
}

/// Result of transforming one file.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub code: String,
    /// Present only when the engine generated a map.
    pub map: Option<SourceMapDocument>,
    pub ast: Option<swc_ecma_ast::Module>,
}

impl TransformOutput {
    pub fn code_only(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            map: None,
            ast: None,
        }
    }
}
