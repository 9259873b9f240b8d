use pest::error::{Error as PestError, ErrorVariant};
use thiserror::Error;

use crate::Rule;

#[derive(Debug, Error)]
pub enum LuzError {
    #[error("Parsing error: {0}")]
    Syntax(Box<PestError<Rule>>),

    #[error("Cannot load file {path:?}: {source}")]
    LoadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("Unknown Lua version {0:?} (expected one of 5.1, 5.2, 5.3, 5.4, jit)")]
    UnknownLuaVersion(String),

    #[error("{0:?} is not a valid number")]
    NumberParsing(String),

    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl LuzError {
    /// A syntax error positioned on `span`, rendered the way pest renders
    /// its own errors.
    pub fn at(span: pest::Span<'_>, message: impl Into<String>) -> Self {
        PestError::new_from_span(
            ErrorVariant::CustomError {
                message: message.into(),
            },
            span,
        )
        .into()
    }

    /// `(line, column)` of a syntax error, both 1-based.
    pub fn line_col(&self) -> Option<(usize, usize)> {
        match self {
            LuzError::Syntax(err) => Some(match err.line_col {
                pest::error::LineColLocation::Pos(pos) => pos,
                pest::error::LineColLocation::Span(start, _) => start,
            }),
            _ => None,
        }
    }
}

impl From<PestError<Rule>> for LuzError {
    fn from(value: PestError<Rule>) -> Self {
        LuzError::Syntax(Box::new(value))
    }
}
