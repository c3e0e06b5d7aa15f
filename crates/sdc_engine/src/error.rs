use thiserror::Error;

/// Failures raised while transforming a single file.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input is not valid ES/JSX source.
    #[error("{filename}:{line}:{column}: {message}")]
    Parse {
        filename: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to emit code")]
    Emit(#[from] std::io::Error),

    #[error("emitted code is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to compose source maps")]
    SourceMap(#[from] sourcemap::Error),

    #[error("failed to write source map: {0}")]
    SourceMapWrite(String),

    #[error("invalid source map json")]
    Json(#[from] serde_json::Error),

    /// Raised by engines that are not backed by SWC.
    #[error("{0}")]
    Other(String),
}
