use std::path::PathBuf;

use sdc_engine::{EngineError, ResolveError};
use thiserror::Error;

/// Everything that can fail a batch, or the construction of a pipeline.
///
/// All variants are fatal: a batch either transforms completely or not at all.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A sidecar map file is not valid JSON.
    #[error("failed to parse source map {name}")]
    MapParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize source map {name}")]
    MapSerialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The engine rejected a file, usually because of a syntax error.
    #[error("failed to transform {name}")]
    Transform {
        name: String,
        #[source]
        source: EngineError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A debug hook failed.
    #[error("{stage} hook failed for {name}")]
    Hook {
        stage: &'static str,
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to read config {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config")]
    ConfigParse(#[source] serde_json::Error),
}
