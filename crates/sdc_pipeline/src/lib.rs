//! Post-compilation transform stage.
//!
//! Takes the batch of files a compiler emitted, transforms every script,
//! keeps each script's sidecar source map in step with the new code and
//! hands back a batch of the same shape:
//!
//! - `*.js` / `*.jsx`: transformed; the map is regenerated when one came in
//! - `*.map`: dropped from its position, re-emitted after its script
//! - anything else: passed through untouched

pub mod batch;
pub mod config;
pub mod debug;
pub mod error;
pub mod transformer;

use std::path::Path;

use sdc_engine::{Engine, ModuleResolver, PluginLoader, SwcEngine, TransformOptions};
use tracing::debug;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use transformer::file_options;

/// A transform engine plus the baseline options every file starts from.
///
/// The baseline is never modified after construction; per-file options are
/// derived from it as fresh values.
pub struct Pipeline<E = SwcEngine> {
    engine: E,
    options: TransformOptions,
}

impl<E: Engine> Pipeline<E> {
    /// The pipeline writes the `sourceMappingURL` trailer itself, so the
    /// engine is always told to drop such comments and never to return an AST.
    pub fn new(engine: E, mut options: TransformOptions) -> Self {
        options.comment_filter = Some(TransformOptions::source_mapping_url_filter());
        options.ast = false;
        Self { engine, options }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl Pipeline<SwcEngine> {
    /// Resolve the configured plugins and build an SWC-backed pipeline.
    ///
    /// `root` is where host resolution starts looking.
    pub fn from_config(
        config: &PipelineConfig,
        host: &dyn ModuleResolver,
        root: &Path,
    ) -> Result<Self, PipelineError> {
        let loader = PluginLoader::new(config.use_host_resolution, root, host);
        let plugins = loader.load_all(&config.plugins)?;
        debug!(plugins = plugins.len(), host = config.use_host_resolution, "plugins loaded");
        Ok(Self::new(
            SwcEngine::with_plugins(plugins),
            config.options.clone(),
        ))
    }
}
