use std::fmt::{self, Display};

use derive_more::derive::From;
use derive_new::new;

use super::SyntaxKind;

/// Half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, new)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn empty(at: usize) -> Self {
        Self::new(at, at)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(span: pest::Span<'_>) -> Self {
        Span::new(span.start(), span.end())
    }
}

/// Decoded value of a literal token.
///
/// Strings are byte strings: escapes like `\xff` produce bytes that are
/// not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(Vec<u8>),
}

impl TokenValue {
    pub fn is_none(&self) -> bool {
        matches!(self, TokenValue::None)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TokenValue::String(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        TokenValue::Integer(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Float(value)
    }
}

impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        TokenValue::Boolean(value)
    }
}

impl From<Vec<u8>> for TokenValue {
    fn from(value: Vec<u8>) -> Self {
        TokenValue::String(value)
    }
}

impl From<&[u8]> for TokenValue {
    fn from(value: &[u8]) -> Self {
        TokenValue::String(value.to_vec())
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::None => Ok(()),
            TokenValue::Nil => write!(f, "nil"),
            TokenValue::Boolean(b) => write!(f, "{b}"),
            TokenValue::Integer(i) => write!(f, "{i}"),
            TokenValue::Float(n) => write!(f, "{n:?}"),
            TokenValue::String(bytes) => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
        }
    }
}

/// Whitespace, newlines and comments, attached to the tokens around them.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SyntaxTrivia {
    pub(crate) kind: SyntaxKind,
    pub(crate) text: String,
    pub(crate) span: Span,
}

impl SyntaxTrivia {
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq, new)]
pub struct SyntaxToken {
    pub(crate) kind: SyntaxKind,
    pub(crate) text: String,
    pub(crate) span: Span,
    #[new(default)]
    pub(crate) value: TokenValue,
    #[new(default)]
    pub(crate) leading_trivia: Vec<SyntaxTrivia>,
    #[new(default)]
    pub(crate) trailing_trivia: Vec<SyntaxTrivia>,
}

impl SyntaxToken {
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn leading_trivia(&self) -> &[SyntaxTrivia] {
        &self.leading_trivia
    }

    pub fn trailing_trivia(&self) -> &[SyntaxTrivia] {
        &self.trailing_trivia
    }

    /// Span including the attached trivia.
    pub fn full_span(&self) -> Span {
        let start = self.leading_trivia.first().map_or(self.span.start, |t| t.span.start);
        let end = self.trailing_trivia.last().map_or(self.span.end, |t| t.span.end);
        Span::new(start, end)
    }

    pub fn full_text(&self) -> String {
        let mut text = String::with_capacity(self.full_span().len());
        self.write_full_text(&mut text);
        text
    }

    fn write_full_text(&self, out: &mut String) {
        self.leading_trivia.iter().for_each(|t| out.push_str(&t.text));
        out.push_str(&self.text);
        self.trailing_trivia.iter().for_each(|t| out.push_str(&t.text));
    }

    pub fn trivia(&self) -> impl Iterator<Item = &SyntaxTrivia> {
        self.leading_trivia.iter().chain(self.trailing_trivia.iter())
    }
}

#[derive(Debug, Clone, PartialEq, From)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        self.borrowed().kind()
    }

    pub fn span(&self) -> Span {
        self.borrowed().span()
    }

    pub fn borrowed(&self) -> SyntaxElementRef<'_> {
        match self {
            SyntaxElement::Node(node) => SyntaxElementRef::Node(node),
            SyntaxElement::Token(token) => SyntaxElementRef::Token(token),
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }
}

/// Borrowed view of a [`SyntaxElement`], yielded by tree walks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyntaxElementRef<'a> {
    Node(&'a SyntaxNode),
    Token(&'a SyntaxToken),
}

impl<'a> SyntaxElementRef<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElementRef::Node(node) => node.kind,
            SyntaxElementRef::Token(token) => token.kind,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxElementRef::Node(node) => node.span,
            SyntaxElementRef::Token(token) => token.span,
        }
    }

    pub fn as_node(&self) -> Option<&'a SyntaxNode> {
        match *self {
            SyntaxElementRef::Node(node) => Some(node),
            SyntaxElementRef::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&'a SyntaxToken> {
        match *self {
            SyntaxElementRef::Token(token) => Some(token),
            SyntaxElementRef::Node(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub(crate) kind: SyntaxKind,
    pub(crate) span: Span,
    pub(crate) children: Vec<SyntaxElement>,
}

impl SyntaxNode {
    /// Builds a node whose span covers its children. A childless node gets
    /// an empty span at offset 0; see [`SyntaxNode::empty`].
    pub fn new(kind: SyntaxKind, children: Vec<SyntaxElement>) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span().cover(last.span()),
            _ => Span::default(),
        };
        Self {
            kind,
            span,
            children,
        }
    }

    pub fn empty(kind: SyntaxKind, at: usize) -> Self {
        Self {
            kind,
            span: Span::empty(at),
            children: vec![],
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[SyntaxElement] {
        &self.children
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.children.iter().filter_map(SyntaxElement::as_token)
    }

    pub fn child_node(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.child_nodes().find(|node| node.kind == kind)
    }

    pub fn child_token(&self, kind: SyntaxKind) -> Option<&SyntaxToken> {
        self.child_tokens().find(|token| token.kind == kind)
    }

    /// Pre-order walk starting with `self`: every node comes before its
    /// children, and children come in source order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![SyntaxElementRef::Node(self)],
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.descendants().filter_map(|element| element.as_token())
    }

    pub fn first_token(&self) -> Option<&SyntaxToken> {
        self.tokens().next()
    }

    pub fn last_token(&self) -> Option<&SyntaxToken> {
        self.children.iter().rev().find_map(|child| match child {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.last_token(),
        })
    }

    /// Source text of the node including the trivia of its first and last
    /// tokens.
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        self.tokens().for_each(|token| token.write_full_text(&mut text));
        text
    }

    /// Source text of the node without its outer trivia.
    pub fn text(&self) -> String {
        let tokens = self.tokens().collect::<Vec<_>>();
        let last = tokens.len().saturating_sub(1);
        let mut text = String::with_capacity(self.span.len());
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                token.leading_trivia.iter().for_each(|t| text.push_str(&t.text));
            }
            text.push_str(&token.text);
            if i < last {
                token.trailing_trivia.iter().for_each(|t| text.push_str(&t.text));
            }
        }
        text
    }

    pub(crate) fn tokens_mut(&mut self) -> Vec<&mut SyntaxToken> {
        let mut tokens = vec![];
        collect_tokens_mut(self, &mut tokens);
        tokens
    }
}

fn collect_tokens_mut<'a>(node: &'a mut SyntaxNode, out: &mut Vec<&'a mut SyntaxToken>) {
    for child in &mut node.children {
        match child {
            SyntaxElement::Node(node) => collect_tokens_mut(node, out),
            SyntaxElement::Token(token) => out.push(token),
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<SyntaxElementRef<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = SyntaxElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        if let SyntaxElementRef::Node(node) = element {
            self.stack
                .extend(node.children.iter().rev().map(SyntaxElement::borrowed));
        }
        Some(element)
    }
}
