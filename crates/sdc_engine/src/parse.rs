use std::path::PathBuf;

use swc_common::{comments::SingleThreadedComments, sync::Lrc, FileName, SourceMap, Spanned};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{EsSyntax, Syntax};

use crate::EngineError;

/// Result of parsing one compiled script.
pub struct ParseResult {
    pub module: swc_ecma_ast::Module,
    pub comments: SingleThreadedComments,
    pub source_map: Lrc<SourceMap>,
}

/// Parse compiled ES source.
///
/// `filename` picks the syntax (JSX for `.jsx`) and is used in errors.
/// `source_name` is what generated source maps will list as the source.
/// Errors the parser recovered from are still treated as failures.
pub fn parse_script(
    source: &str,
    filename: &str,
    source_name: &str,
) -> Result<ParseResult, EngineError> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Real(PathBuf::from(source_name))),
        source.to_string(),
    );

    let comments = SingleThreadedComments::default();

    let es_syntax = Syntax::Es(EsSyntax {
        jsx: filename.ends_with(".jsx"),
        ..Default::default()
    });

    let mut recovered = vec![];
    let parsed = swc_ecma_parser::parse_file_as_module(
        &source_file,
        es_syntax,
        EsVersion::latest(),
        Some(&comments),
        &mut recovered,
    );

    let error = match parsed {
        Ok(module) if recovered.is_empty() => {
            return Ok(ParseResult {
                module,
                comments,
                source_map,
            })
        }
        Ok(_) => recovered.swap_remove(0),
        Err(e) => e,
    };

    let loc = source_map.lookup_char_pos(error.span().lo);
    Err(EngineError::Parse {
        filename: filename.to_string(),
        line: loc.line,
        column: loc.col.0 + 1,
        message: error.kind().msg().to_string(),
    })
}
