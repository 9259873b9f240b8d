use pest_derive::Parser;

pub mod diagnostics;
pub mod err;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod syntax;
pub mod validate;

pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use err::LuzError;
pub use options::{LuaVersion, SyntaxOptions, SyntaxOptionsBuilder};
pub use parser::{parse, parse_file, parse_with_options};
pub use syntax::{
    Span, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTree, SyntaxTrivia, TokenValue,
};

#[derive(Parser)]
#[grammar = "./grammar.pest"]
pub struct LuaParser;
