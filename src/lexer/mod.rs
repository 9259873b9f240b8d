//! Token-level passes run on the tree once the grammar has built it: trivia
//! recovery from the gaps between tokens, and literal decoding.

pub mod numeral;
pub mod string;
pub mod trivia;

use tracing::trace;

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::options::SyntaxOptions;
use crate::syntax::{Span, SyntaxKind, SyntaxNode, SyntaxTrivia, TokenValue};

use self::numeral::{hex_digits, is_hex_float, Numeral};

/// Fills in the leading and trailing trivia of every token from the source
/// text between tokens.
///
/// A token's trailing trivia runs up to and including the first end of
/// line after it; the rest of the gap leads the next token. The first token
/// only has leading trivia, and the end-of-file token collects whatever is
/// left at the end.
pub fn attach_trivia(root: &mut SyntaxNode, source: &str) {
    let mut tokens = root.tokens_mut();
    let mut previous_end = 0;
    let mut pending_trailing: Option<usize> = None;

    for i in 0..tokens.len() {
        let span = tokens[i].span;
        let gap = source.get(previous_end..span.start).unwrap_or_default();
        let mut pieces = trivia::scan_trivia(gap, previous_end);

        if let Some(previous) = pending_trailing {
            let split = pieces
                .iter()
                .position(|t| t.kind == SyntaxKind::EndOfLineTrivia)
                .map_or(pieces.len(), |eol| eol + 1);
            let leading = pieces.split_off(split);
            tokens[previous].trailing_trivia = pieces;
            pieces = leading;
        }

        tokens[i].leading_trivia = pieces;
        previous_end = span.end;
        pending_trailing = Some(i);
    }
    trace!(tokens = tokens.len(), "attached trivia");
}

/// Decodes the value of every literal token and reports malformed or
/// unsupported literals.
pub fn decode_literals(root: &mut SyntaxNode, options: &SyntaxOptions) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];
    for token in root.tokens_mut() {
        token.value = match token.kind {
            SyntaxKind::NilKeyword => TokenValue::Nil,
            SyntaxKind::TrueKeyword => TokenValue::Boolean(true),
            SyntaxKind::FalseKeyword => TokenValue::Boolean(false),
            SyntaxKind::NumericLiteralToken => {
                decode_numeral(&token.text, token.span, options, &mut diagnostics)
            }
            SyntaxKind::StringLiteralToken => TokenValue::String(string::decode_string(
                &token.text,
                token.span.start,
                options,
                &mut diagnostics,
            )),
            _ => continue,
        };
    }
    trace!(diagnostics = diagnostics.len(), "decoded literals");
    diagnostics
}

fn decode_numeral(
    text: &str,
    span: Span,
    options: &SyntaxOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> TokenValue {
    if !options.accept_hex_floats && hex_digits(text).is_some_and(is_hex_float) {
        diagnostics.push(Diagnostic::feature_not_available(
            span,
            "Hexadecimal floating point literals",
        ));
    }
    match Numeral::parse_lua(text, options.integer_literals) {
        Ok(numeral) => numeral.into(),
        Err(err) => {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::MalformedNumber,
                span,
                err.to_string(),
            ));
            TokenValue::None
        }
    }
}

/// Trivia pieces in source order, for callers that want them flattened.
pub fn all_trivia(root: &SyntaxNode) -> Vec<&SyntaxTrivia> {
    root.tokens().flat_map(|token| token.trivia()).collect()
}
