use std::sync::Arc;

use sdc_files::SourceMapDocument;
use swc_common::{
    comments::Comments, comments::SingleThreadedComments, source_map::DefaultSourceMapGenConfig,
};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};
use swc_ecma_visit::VisitMut;
use tracing::debug;

use crate::{parse_script, EngineError, Plugin, TransformOptions, TransformOutput};

/// A source-to-source transform.
pub trait Engine {
    fn transform(
        &self,
        code: &str,
        options: &TransformOptions,
    ) -> Result<TransformOutput, EngineError>;
}

impl<F> Engine for F
where
    F: Fn(&str, &TransformOptions) -> Result<TransformOutput, EngineError>,
{
    fn transform(
        &self,
        code: &str,
        options: &TransformOptions,
    ) -> Result<TransformOutput, EngineError> {
        self(code, options)
    }
}

/// Engine backed by the SWC parser and code generator.
#[derive(Default, Clone)]
pub struct SwcEngine {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl SwcEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Passes run in the given order on every file.
    pub fn with_plugins(plugins: Vec<Arc<dyn Plugin>>) -> Self {
        Self { plugins }
    }

    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|plugin| plugin.name())
    }
}

impl Engine for SwcEngine {
    fn transform(
        &self,
        code: &str,
        options: &TransformOptions,
    ) -> Result<TransformOutput, EngineError> {
        let filename = options.filename.as_deref().unwrap_or("unknown.js");
        let source_name = options.source_file_name.as_deref().unwrap_or(filename);
        debug!(
            filename,
            source_maps = options.source_maps,
            plugins = self.plugins.len(),
            "swc transform"
        );

        let parsed = parse_script(code, filename, source_name)?;
        let mut module = parsed.module;
        for plugin in &self.plugins {
            let mut pass = plugin.pass();
            pass.visit_mut_module(&mut module);
        }

        retain_comments(&parsed.comments, |text| options.should_print_comment(text));
        let comments: Option<&dyn Comments> = if options.comments {
            Some(&parsed.comments)
        } else {
            None
        };

        let mut buf = Vec::new();
        let mut srcmap_buf = if options.source_maps { Some(vec![]) } else { None };
        {
            let writer = JsWriter::new(
                parsed.source_map.clone(),
                "\n",
                &mut buf,
                srcmap_buf.as_mut(),
            );
            let mut emitter = Emitter {
                cfg: swc_ecma_codegen::Config::default()
                    .with_target(swc_ecma_ast::EsVersion::latest())
                    .with_minify(options.compact),
                cm: parsed.source_map.clone(),
                comments,
                wr: writer,
            };
            module.emit_with(&mut emitter)?;
        }
        let code = String::from_utf8(buf)?;

        let map = match srcmap_buf {
            Some(srcmap_data) => {
                let srcmap = parsed
                    .source_map
                    .build_source_map(&srcmap_data, None, DefaultSourceMapGenConfig);
                let mut srcmap_json = vec![];
                srcmap
                    .to_writer(&mut srcmap_json)
                    .map_err(|e| EngineError::SourceMapWrite(e.to_string()))?;

                let mut document: SourceMapDocument = match &options.input_source_map {
                    Some(input) => {
                        let mut composed = compose(&srcmap_json, input)?;
                        for (key, value) in &input.extra {
                            composed
                                .extra
                                .entry(key.clone())
                                .or_insert_with(|| value.clone());
                        }
                        composed
                    }
                    None => serde_json::from_slice(&srcmap_json)?,
                };
                document.file = options.source_map_target.clone();
                document.source_root = options.source_root.clone();
                Some(document)
            }
            None => None,
        };

        Ok(TransformOutput {
            code,
            map,
            ast: options.ast.then_some(module),
        })
    }
}

/// Drop every comment `keep` rejects, leading and trailing alike.
fn retain_comments(comments: &SingleThreadedComments, keep: impl Fn(&str) -> bool) {
    let (mut leading, mut trailing) = comments.borrow_all_mut();
    for list in leading.values_mut().chain(trailing.values_mut()) {
        list.retain(|comment| keep(&comment.text));
    }
}

/// Rebase `generated` (output -> input text) onto `input` (input text ->
/// original sources), giving a map from output straight to the originals.
fn compose(generated: &[u8], input: &SourceMapDocument) -> Result<SourceMapDocument, EngineError> {
    let generated = sourcemap::SourceMap::from_slice(generated)?;
    let mut composed = sourcemap::SourceMap::from_slice(&serde_json::to_vec(input)?)?;
    composed.adjust_mappings(&generated);

    let mut out = Vec::new();
    composed.to_writer(&mut out)?;
    Ok(serde_json::from_slice(&out)?)
}
