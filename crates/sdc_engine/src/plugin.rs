use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use swc_ecma_visit::VisitMut;

use crate::passes::StatementRemover;
use crate::resolve::{candidate_ids, ModuleResolver};

/// A named module pass.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// A fresh visitor for one file.
    fn pass(&self) -> Box<dyn VisitMut>;
}

struct BuiltinPlugin {
    name: &'static str,
    make: fn() -> StatementRemover,
}

impl Plugin for BuiltinPlugin {
    fn name(&self) -> &str {
        self.name
    }

    fn pass(&self) -> Box<dyn VisitMut> {
        Box::new((self.make)())
    }
}

/// Plugins keyed by identifier.
#[derive(Default, Clone)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The passes shipped with the engine.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BuiltinPlugin {
            name: "remove-debugger",
            make: StatementRemover::debugger,
        }));
        registry.register(Arc::new(BuiltinPlugin {
            name: "strip-console",
            make: StatementRemover::console,
        }));
        registry
    }

    /// Register under the plugin's own name.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        let id = plugin.name().to_string();
        self.plugins.insert(id, plugin);
    }

    pub fn register_as(&mut self, id: impl Into<String>, plugin: Arc<dyn Plugin>) {
        self.plugins.insert(id.into(), plugin);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// The engine's own resolution: location does not matter, and both the
/// bare and the prefixed identifier are accepted.
impl ModuleResolver for PluginRegistry {
    fn resolve(&self, id: &str, _root: &Path) -> Option<Arc<dyn Plugin>> {
        candidate_ids(id).iter().find_map(|candidate| self.get(candidate))
    }
}
