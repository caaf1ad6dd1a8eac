//! Compile the template source into an AST that can be walked by the renderer.
//!
//! This process has two stages:
//! - The lexer chunks the template source into raw text and control tags.
//! - The parser builds the tree of conditionals from the token stream.

pub(crate) mod lex;
mod parse;

use crate::types::ast::Template;
use crate::{Engine, Result};

/// Parse a template into an AST.
pub fn template<'source>(engine: &Engine, source: &'source str) -> Result<Template<'source>> {
    parse::Parser::new(engine, source).parse_template()
}
