//! Plugin resolution.
//!
//! An identifier is tried bare and then with [`PLUGIN_PREFIX`], against each
//! search root in turn. The host policy searches the configured root and
//! then its parent; the engine policy asks the engine's own registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::{Plugin, PluginRegistry};

/// Conventional prefix of plugin packages.
pub const PLUGIN_PREFIX: &str = "sdc-plugin-";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot find module '{id}'")]
    NotFound { id: String },
}

/// Looks plugins up by identifier from a given location.
pub trait ModuleResolver {
    fn resolve(&self, id: &str, root: &Path) -> Option<Arc<dyn Plugin>>;
}

/// Identifiers to try for `id`, in order.
pub fn candidate_ids(id: &str) -> Vec<String> {
    if id.starts_with(PLUGIN_PREFIX) {
        vec![id.to_string()]
    } else {
        vec![id.to_string(), format!("{PLUGIN_PREFIX}{id}")]
    }
}

/// Resolve `id` against `roots` in order, bare identifier before prefixed.
pub fn resolve_plugin(
    id: &str,
    roots: &[&Path],
    resolver: &dyn ModuleResolver,
) -> Result<Arc<dyn Plugin>, ResolveError> {
    for root in roots {
        for candidate in candidate_ids(id) {
            if let Some(plugin) = resolver.resolve(&candidate, root) {
                debug!(id, candidate = %candidate, root = %root.display(), "resolved plugin");
                return Ok(plugin);
            }
        }
    }
    Err(ResolveError::NotFound { id: id.to_string() })
}

/// Plugins installed per directory, for host resolution.
#[derive(Default, Clone)]
pub struct InstalledPlugins {
    by_root: HashMap<PathBuf, PluginRegistry>,
}

impl InstalledPlugins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(
        &mut self,
        root: impl Into<PathBuf>,
        id: impl Into<String>,
        plugin: Arc<dyn Plugin>,
    ) {
        self.by_root
            .entry(root.into())
            .or_default()
            .register_as(id, plugin);
    }
}

impl ModuleResolver for InstalledPlugins {
    fn resolve(&self, id: &str, root: &Path) -> Option<Arc<dyn Plugin>> {
        self.by_root.get(root).and_then(|registry| registry.get(id))
    }
}

/// Chooses between engine and host resolution for a pipeline.
pub struct PluginLoader<'a> {
    use_host_resolution: bool,
    root: PathBuf,
    host: &'a dyn ModuleResolver,
    engine: PluginRegistry,
}

impl<'a> PluginLoader<'a> {
    pub fn new(
        use_host_resolution: bool,
        root: impl Into<PathBuf>,
        host: &'a dyn ModuleResolver,
    ) -> Self {
        Self {
            use_host_resolution,
            root: root.into(),
            host,
            engine: PluginRegistry::builtin(),
        }
    }

    pub fn load(&self, id: &str) -> Result<Arc<dyn Plugin>, ResolveError> {
        if !self.use_host_resolution {
            return resolve_plugin(id, &[self.root.as_path()], &self.engine);
        }

        let mut roots = vec![self.root.as_path()];
        roots.extend(self.root.parent());
        resolve_plugin(id, &roots, self.host)
    }

    pub fn load_all(&self, ids: &[String]) -> Result<Vec<Arc<dyn Plugin>>, ResolveError> {
        ids.iter().map(|id| self.load(id)).collect()
    }
}
