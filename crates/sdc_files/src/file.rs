use serde::{Deserialize, Serialize};

/// A single file emitted by the compiler, or by an earlier transform stage.
///
/// The pipeline only ever reads these; transformed code and regenerated maps
/// are returned as new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFile {
    pub name: String,
    pub text: String,
    /// Carried through untouched from input to output.
    #[serde(default)]
    pub write_byte_order_mark: bool,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            write_byte_order_mark: false,
        }
    }

    pub fn with_byte_order_mark(mut self, write_byte_order_mark: bool) -> Self {
        self.write_byte_order_mark = write_byte_order_mark;
        self
    }

    /// A file with the same name and BOM flag as `self` but different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            text: text.into(),
            write_byte_order_mark: self.write_byte_order_mark,
        }
    }
}
