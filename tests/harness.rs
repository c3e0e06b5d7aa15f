//! Batch fixture harness for the sidecar pipeline.
//!
//! Every directory under `tests/fixtures/` is one batch:
//!
//! - `batch.txt`: input file names, in batch order
//! - `expected.txt`: output file names, in the expected order
//! - `config.json` (optional): pipeline config
//! - `absent.txt` (optional): strings no transformed script may contain
//!
//! The batch runs through the SWC-backed pipeline and the output is checked
//! for ordering, pass-through identity, map pairing and valid syntax.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use sdc_engine::{parse_script, InstalledPlugins};
use sdc_files::{classify, map_name_for, FileKind, OutputFile, SourceMapDocument};
use sdc_pipeline::{Pipeline, PipelineConfig};

const BOM: char = '\u{feff}';

fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR is crates/sdc_test/, so go up two levels to workspace root.
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
}

fn collect_cases(dir: &Path) -> Vec<PathBuf> {
    let mut cases = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.join("batch.txt").exists() {
                cases.push(path);
            }
        }
    }
    cases.sort();
    cases
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn load_batch(case: &Path) -> Result<Vec<OutputFile>> {
    read_lines(&case.join("batch.txt"))?
        .into_iter()
        .map(|name| -> Result<OutputFile> {
            let text = std::fs::read_to_string(case.join(&name))
                .with_context(|| format!("reading input {name}"))?;
            Ok(match text.strip_prefix(BOM) {
                Some(rest) => OutputFile::new(name, rest).with_byte_order_mark(true),
                None => OutputFile::new(name, text),
            })
        })
        .collect()
}

fn run_case(case: &Path) -> Result<()> {
    let config_path = case.join("config.json");
    let config = if config_path.exists() {
        PipelineConfig::load(&config_path)?
    } else {
        PipelineConfig::default()
    };
    let pipeline = Pipeline::from_config(&config, &InstalledPlugins::new(), case)?;

    let batch = load_batch(case)?;
    let output = pipeline.transform_batch(&batch)?;

    let expected = read_lines(&case.join("expected.txt"))?;
    let actual: Vec<&str> = output.iter().map(|file| file.name.as_str()).collect();
    if actual != expected {
        bail!("output names differ\n  expected: {expected:?}\n  actual:   {actual:?}");
    }

    let absent = if case.join("absent.txt").exists() {
        read_lines(&case.join("absent.txt"))?
    } else {
        Vec::new()
    };

    for file in &output {
        let input = batch.iter().find(|input| input.name == file.name);
        match classify(&file.name) {
            FileKind::Other => {
                if input != Some(file) {
                    bail!("{}: pass-through file was modified", file.name);
                }
            }
            FileKind::Script => check_script(file, input, &output, &absent)?,
            FileKind::SourceMap => check_map(file, input)?,
        }
    }
    Ok(())
}

fn check_script(
    file: &OutputFile,
    input: Option<&OutputFile>,
    output: &[OutputFile],
    absent: &[String],
) -> Result<()> {
    let input = input.context("script has no matching input")?;
    if input.write_byte_order_mark != file.write_byte_order_mark {
        bail!("{}: byte order mark flag changed", file.name);
    }

    let has_map = output.iter().any(|other| other.name == map_name_for(&file.name));
    let references = file.text.matches("sourceMappingURL").count();
    if has_map {
        let trailer = format!(
            "\n//# sourceMappingURL={}",
            map_name_for(sdc_files::basename(&file.name))
        );
        if !file.text.ends_with(&trailer) || references != 1 {
            bail!("{}: expected exactly one trailing map reference\n{}", file.name, file.text);
        }
    } else if references != 0 {
        bail!("{}: map reference without a map\n{}", file.name, file.text);
    }

    for needle in absent {
        if file.text.contains(needle.as_str()) {
            bail!("{}: output still contains {needle:?}\n{}", file.name, file.text);
        }
    }

    parse_script(&file.text, &file.name, &file.name)
        .with_context(|| format!("{}: output is not valid\n{}", file.name, file.text))?;
    Ok(())
}

fn check_map(file: &OutputFile, input: Option<&OutputFile>) -> Result<()> {
    let input = input.context("regenerated map has no input map")?;
    if input.write_byte_order_mark != file.write_byte_order_mark {
        bail!("{}: byte order mark flag changed", file.name);
    }
    let before = SourceMapDocument::parse(&input.text)?;
    let after = SourceMapDocument::parse(&file.text)
        .with_context(|| format!("{}: regenerated map is not valid json", file.name))?;
    if after.version != 3 || after.file != before.file || after.source_root != before.source_root {
        bail!("{}: map header changed\n{}", file.name, file.text);
    }
    if !before.sources.iter().all(|source| after.sources.contains(source)) {
        bail!("{}: original sources lost\n{}", file.name, file.text);
    }
    if after.mappings.is_empty() {
        bail!("{}: regenerated map has no mappings", file.name);
    }
    Ok(())
}

#[test]
fn fixture_batches() {
    let fixtures = fixtures_dir();
    let cases = collect_cases(&fixtures);

    assert!(
        !cases.is_empty(),
        "No test fixtures found in {}",
        fixtures.display()
    );

    let mut failures = Vec::new();
    for case in &cases {
        let test_name = case
            .strip_prefix(&fixtures)
            .unwrap()
            .display()
            .to_string();
        if let Err(e) = run_case(case) {
            failures.push(format!("{test_name}: {e:#}"));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} fixture batch(es) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

#[test]
fn swc_output_feeds_a_second_pass() {
    let fixtures = fixtures_dir().join("map-pairing");
    let batch = load_batch(&fixtures).unwrap();
    let pipeline = Pipeline::from_config(
        &PipelineConfig::default(),
        &InstalledPlugins::new(),
        &fixtures,
    )
    .unwrap();

    let first = pipeline.transform_batch(&batch).unwrap();
    let second = pipeline.transform_batch(&first).unwrap();

    let names: Vec<&str> = second.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(names, ["a.js", "a.js.map"]);
    assert_eq!(second[0].text.matches("sourceMappingURL").count(), 1);

    let map = SourceMapDocument::parse(&second[1].text).unwrap();
    assert_eq!(map.source_file_name(), Some("../src/a.ts"));
}

#[test]
fn malformed_map_fails_the_batch() {
    let batch = vec![
        OutputFile::new("a.js", "export const a = 1;\n"),
        OutputFile::new("a.js.map", "{\"version\":3,"),
        OutputFile::new("b.js", "export const b = 2;\n"),
    ];
    let pipeline = Pipeline::from_config(
        &PipelineConfig::default(),
        &InstalledPlugins::new(),
        Path::new("."),
    )
    .unwrap();
    let err = pipeline.transform_batch(&batch).unwrap_err();
    assert_eq!(err.to_string(), "failed to parse source map a.js.map");
}

#[test]
fn syntax_error_fails_the_batch() {
    let batch = vec![OutputFile::new("broken.js", "export function (\n")];
    let pipeline = Pipeline::from_config(
        &PipelineConfig::default(),
        &InstalledPlugins::new(),
        Path::new("."),
    )
    .unwrap();
    let err = pipeline.transform_batch(&batch).unwrap_err();
    assert_eq!(err.to_string(), "failed to transform broken.js");
}
