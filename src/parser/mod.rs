//! From source text to a [`SyntaxTree`]: the grammar builds the bare tree,
//! then trivia, literal values and validation diagnostics are filled in.

use std::{fs, path::Path};

use pest::Parser;
use tracing::{debug, debug_span};

use crate::err::LuzError;
use crate::lexer::{attach_trivia, decode_literals};
use crate::options::SyntaxOptions;
use crate::syntax::SyntaxTree;
use crate::validate::validate;
use crate::{LuaParser, Rule};

mod builder;
mod expr;
pub mod token;

/// Parses `source` as Lua 5.4.
pub fn parse(source: &str) -> Result<SyntaxTree, LuzError> {
    parse_with_options(source, &SyntaxOptions::default())
}

pub fn parse_with_options(source: &str, options: &SyntaxOptions) -> Result<SyntaxTree, LuzError> {
    let _span = debug_span!("parse", len = source.len()).entered();

    let chunk = LuaParser::parse(Rule::Chunk, source)?
        .next()
        .ok_or_else(|| LuzError::Internal("grammar produced no chunk".into()))?;
    let mut root = builder::build_node(chunk)?;
    debug!(span = ?root.span(), "built syntax tree");

    attach_trivia(&mut root, source);
    let mut diagnostics = decode_literals(&mut root, options);
    diagnostics.extend(validate(&root, options));
    diagnostics.sort_by_key(|diagnostic| diagnostic.span.start);
    debug!(diagnostics = diagnostics.len(), "parsed");

    Ok(SyntaxTree::new(
        source.to_string(),
        root,
        diagnostics,
        options.clone(),
    ))
}

pub fn parse_file(path: impl AsRef<Path>, options: &SyntaxOptions) -> Result<SyntaxTree, LuzError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LuzError::LoadFile {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_with_options(&source, options)?.with_file_name(path.display().to_string()))
}
