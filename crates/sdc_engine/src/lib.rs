//! The transform capability used by the sidecar pipeline.
//!
//! [`Engine`] is the seam: it turns `(text, options)` into `{ code, map }`.
//! [`SwcEngine`] is the stock implementation:
//!
//! 1. Parse: ES/JSX source through the SWC parser.
//! 2. Passes: run every configured [`Plugin`] over the module.
//! 3. Emit: SWC codegen, optionally with a source map composed onto the
//!    map the input came with.

pub mod engine;
pub mod error;
pub mod options;
pub mod parse;
pub mod passes;
pub mod plugin;
pub mod resolve;

pub use engine::{Engine, SwcEngine};
pub use error::EngineError;
pub use options::{TransformOptions, TransformOutput, SOURCE_MAPPING_URL_PATTERN};
pub use parse::parse_script;
pub use plugin::{Plugin, PluginRegistry};
pub use resolve::{
    resolve_plugin, InstalledPlugins, ModuleResolver, PluginLoader, ResolveError, PLUGIN_PREFIX,
};
