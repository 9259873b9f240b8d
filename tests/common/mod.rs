#![allow(dead_code)]

use luz_syntax::{SyntaxKind, SyntaxNode, TokenValue};
use pretty_assertions::assert_eq;

/// One expected element of a pre-order walk.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Node(SyntaxKind),
    Token(SyntaxKind, String),
    Value(SyntaxKind, String, TokenValue),
}

/// A node of the given kind.
pub fn n(kind: SyntaxKind) -> Expected {
    Expected::Node(kind)
}

/// A token with its source text.
pub fn t(kind: SyntaxKind, text: &str) -> Expected {
    Expected::Token(kind, text.to_string())
}

/// A token with its source text and decoded value.
pub fn v(kind: SyntaxKind, text: &str, value: impl Into<TokenValue>) -> Expected {
    Expected::Value(kind, text.to_string(), value.into())
}

/// A string literal token whose value is `value`'s bytes.
pub fn s(text: &str, value: &str) -> Expected {
    v(SyntaxKind::StringLiteralToken, text, value.as_bytes())
}

/// Checks that the pre-order walk of `root` starts with `expected`.
///
/// Each actual element is described only as precisely as its expected
/// counterpart: a node by its kind, a token by kind and text, and a
/// `Value` entry also by the decoded value.
pub fn verify_prefix(root: &SyntaxNode, expected: &[Expected]) {
    let actual = root
        .descendants()
        .zip(expected)
        .map(|(element, expected)| match (element.as_token(), expected) {
            (None, _) => Expected::Node(element.kind()),
            (Some(token), Expected::Value(..)) => Expected::Value(
                token.kind(),
                token.text().to_string(),
                token.value().clone(),
            ),
            (Some(token), _) => Expected::Token(token.kind(), token.text().to_string()),
        })
        .collect::<Vec<_>>();
    assert_eq!(actual.as_slice(), expected);
}
