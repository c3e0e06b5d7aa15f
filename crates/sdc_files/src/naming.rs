//! File-name conventions that decide what gets transformed and which map
//! belongs to which script.

use crate::OutputFile;

/// Suffix identifying sidecar source-map files.
pub const MAP_SUFFIX: &str = ".map";

/// Suffixes of files the pipeline transforms: plain scripts and JSX.
pub const SCRIPT_SUFFIXES: [&str; 2] = [".js", ".jsx"];

/// How a batch element is treated, decided by its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Transformed, possibly together with its map.
    Script,
    /// Dropped; regenerated only as a byproduct of transforming its script.
    SourceMap,
    /// Passed through unchanged.
    Other,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Script => write!(f, "script"),
            FileKind::SourceMap => write!(f, "source map"),
            FileKind::Other => write!(f, "other"),
        }
    }
}

pub fn classify(name: &str) -> FileKind {
    if SCRIPT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        FileKind::Script
    } else if name.ends_with(MAP_SUFFIX) {
        FileKind::SourceMap
    } else {
        FileKind::Other
    }
}

/// Name of the sidecar map for `name`.
pub fn map_name_for(name: &str) -> String {
    format!("{name}{MAP_SUFFIX}")
}

/// Final path component of `name`, accepting either separator.
pub fn basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Find the sidecar map of `source` in `batch`.
///
/// Map files never have maps of their own. If several files carry the map
/// name, the first one wins.
pub fn locate_map<'a>(source: &OutputFile, batch: &'a [OutputFile]) -> Option<&'a OutputFile> {
    if source.name.ends_with(MAP_SUFFIX) {
        return None;
    }
    let candidate = map_name_for(&source.name);
    batch.iter().find(|file| file.name == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_suffix() {
        assert_eq!(classify("a.js"), FileKind::Script);
        assert_eq!(classify("dir/e.jsx"), FileKind::Script);
        assert_eq!(classify("f.js.map"), FileKind::SourceMap);
        assert_eq!(classify("a.d.ts"), FileKind::Other);
        assert_eq!(classify("d.txt"), FileKind::Other);
        assert_eq!(classify("a.json"), FileKind::Other);
    }

    #[test]
    fn basename_strips_directories() {
        assert_eq!(basename("out/lib/a.js"), "a.js");
        assert_eq!(basename(r"out\lib\a.js"), "a.js");
        assert_eq!(basename("a.js"), "a.js");
    }

    #[test]
    fn locates_map_by_exact_name() {
        let batch = vec![
            OutputFile::new("a.js", "a"),
            OutputFile::new("a.js.map", "{}"),
            OutputFile::new("b.js", "b"),
            OutputFile::new("ab.js.map", "{}"),
        ];
        let found = locate_map(&batch[0], &batch).unwrap();
        assert_eq!(found.name, "a.js.map");
        assert!(locate_map(&batch[2], &batch).is_none());
    }

    #[test]
    fn map_files_have_no_map() {
        let batch = vec![
            OutputFile::new("a.js.map", "{}"),
            OutputFile::new("a.js.map.map", "{}"),
        ];
        assert!(locate_map(&batch[0], &batch).is_none());
    }

    #[test]
    fn first_duplicate_map_wins() {
        let batch = vec![
            OutputFile::new("a.js", "a"),
            OutputFile::new("a.js.map", "first"),
            OutputFile::new("a.js.map", "second"),
        ];
        assert_eq!(locate_map(&batch[0], &batch).unwrap().text, "first");
    }
}
