//! Shared data shapes for the sidecar transform stage.
//!
//! - [`OutputFile`]: a named text blob handed over by the upstream compiler
//! - [`SourceMapDocument`]: the parsed contents of a sidecar `.map` file
//! - naming helpers that pair a script with its map by file name

mod file;
mod naming;
mod source_map;

pub use file::OutputFile;
pub use naming::{
    basename, classify, locate_map, map_name_for, FileKind, MAP_SUFFIX, SCRIPT_SUFFIXES,
};
pub use source_map::SourceMapDocument;
