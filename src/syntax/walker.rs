use super::{SyntaxElement, SyntaxElementRef, SyntaxNode, SyntaxToken, SyntaxTrivia};

/// Read-only tree visitor. Every hook recurses by default, so implementors
/// only override what they look at and call [`walk_node`] / [`walk_token`]
/// to keep descending.
pub trait SyntaxWalker {
    fn visit_node(&mut self, node: &SyntaxNode) {
        walk_node(self, node);
    }

    fn visit_token(&mut self, token: &SyntaxToken) {
        walk_token(self, token);
    }

    fn visit_trivia(&mut self, _trivia: &SyntaxTrivia) {}
}

pub fn walk_node<W: SyntaxWalker + ?Sized>(walker: &mut W, node: &SyntaxNode) {
    for child in node.children() {
        child.accept(walker);
    }
}

pub fn walk_token<W: SyntaxWalker + ?Sized>(walker: &mut W, token: &SyntaxToken) {
    for trivia in token.leading_trivia() {
        walker.visit_trivia(trivia);
    }
    for trivia in token.trailing_trivia() {
        walker.visit_trivia(trivia);
    }
}

pub trait Visitable<W: SyntaxWalker + ?Sized> {
    fn accept(&self, walker: &mut W);
}

impl<W: SyntaxWalker + ?Sized> Visitable<W> for SyntaxNode {
    fn accept(&self, walker: &mut W) {
        walker.visit_node(self)
    }
}

impl<W: SyntaxWalker + ?Sized> Visitable<W> for SyntaxToken {
    fn accept(&self, walker: &mut W) {
        walker.visit_token(self)
    }
}

impl<W: SyntaxWalker + ?Sized> Visitable<W> for SyntaxElement {
    fn accept(&self, walker: &mut W) {
        match self {
            SyntaxElement::Node(node) => walker.visit_node(node),
            SyntaxElement::Token(token) => walker.visit_token(token),
        }
    }
}

impl<W: SyntaxWalker + ?Sized> Visitable<W> for SyntaxElementRef<'_> {
    fn accept(&self, walker: &mut W) {
        match self {
            SyntaxElementRef::Node(node) => walker.visit_node(node),
            SyntaxElementRef::Token(token) => walker.visit_token(token),
        }
    }
}
