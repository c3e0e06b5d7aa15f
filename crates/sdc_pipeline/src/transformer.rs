use sdc_engine::{Engine, TransformOptions};
use sdc_files::{basename, locate_map, map_name_for, OutputFile, SourceMapDocument};
use tracing::{debug, warn};

use crate::{Pipeline, PipelineError};

/// Options for one file, derived from `baseline`.
///
/// With an input map, generation is switched on and seeded from the map.
/// Without one, every map field is cleared, whatever the baseline says.
pub fn file_options(
    baseline: &TransformOptions,
    file: &OutputFile,
    input_map: Option<&SourceMapDocument>,
) -> TransformOptions {
    let mut options = baseline.clone();
    options.filename = Some(file.name.clone());
    options.filename_relative = Some(file.name.clone());

    match input_map {
        Some(map) => {
            options.source_maps = true;
            options.source_root = map.source_root.clone();
            options.source_file_name = map.source_file_name().map(str::to_string);
            options.source_map_target = map.file.clone();
            options.input_source_map = Some(map.clone());
        }
        None => {
            options.source_maps = false;
            options.source_root = None;
            options.source_file_name = None;
            options.source_map_target = None;
            options.input_source_map = None;
        }
    }
    options
}

impl<E: Engine> Pipeline<E> {
    /// Transform one script.
    ///
    /// Returns the transformed script, followed by its regenerated map when
    /// the script came with a map and the engine produced a new one. The map
    /// is looked up in `batch`, which should be the untransformed input.
    pub fn transform_file(
        &self,
        file: &OutputFile,
        batch: &[OutputFile],
    ) -> Result<Vec<OutputFile>, PipelineError> {
        let map_file = locate_map(file, batch);
        let input_map = map_file
            .map(|map_file| {
                SourceMapDocument::parse(&map_file.text).map_err(|source| PipelineError::MapParse {
                    name: map_file.name.clone(),
                    source,
                })
            })
            .transpose()?;
        debug!(name = %file.name, has_map = input_map.is_some(), "transforming");

        let options = file_options(&self.options, file, input_map.as_ref());
        let output = self
            .engine
            .transform(&file.text, &options)
            .map_err(|source| PipelineError::Transform {
                name: file.name.clone(),
                source,
            })?;

        let mut code = output.code;
        if output.map.is_some() {
            code.push_str("\n//# sourceMappingURL=");
            code.push_str(&map_name_for(basename(&file.name)));
        }

        let mut files = vec![file.with_text(code)];
        match (map_file, output.map) {
            (Some(map_file), Some(map)) => {
                let text = map.to_json().map_err(|source| PipelineError::MapSerialize {
                    name: map_file.name.clone(),
                    source,
                })?;
                files.push(map_file.with_text(text));
            }
            (Some(map_file), None) => {
                warn!(name = %map_file.name, "no source map generated, dropping the stale one");
            }
            (None, _) => {}
        }
        Ok(files)
    }
}
