use derive_new::new;

use super::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia, TokenValue};

/// Renders a tree as indented text:
///
/// ```text
/// Chunk
/// ├─ Block
/// │  └─ BreakStatement
/// │     └─ BreakKeyword "break"
/// └─ EndOfFileToken ""
/// ```
#[derive(Debug, Clone, Copy, Default, new)]
pub struct TreePrinter {
    show_trivia: bool,
}

impl TreePrinter {
    pub fn print(&self, root: &SyntaxNode) -> String {
        let mut out = String::new();
        out.push_str(&root.kind().to_string());
        out.push('\n');
        self.print_children(root.children(), "", &mut out);
        out
    }

    fn print_children(&self, children: &[SyntaxElement], prefix: &str, out: &mut String) {
        let last = children.len().saturating_sub(1);
        for (i, child) in children.iter().enumerate() {
            let (branch, indent) = if i == last {
                ("└─ ", "   ")
            } else {
                ("├─ ", "│  ")
            };
            out.push_str(prefix);
            out.push_str(branch);
            let child_prefix = format!("{prefix}{indent}");
            match child {
                SyntaxElement::Node(node) => {
                    out.push_str(&node.kind().to_string());
                    out.push('\n');
                    self.print_children(node.children(), &child_prefix, out);
                }
                SyntaxElement::Token(token) => {
                    out.push_str(&describe_token(token));
                    out.push('\n');
                    if self.show_trivia {
                        self.print_trivia(token, &child_prefix, out);
                    }
                }
            }
        }
    }

    fn print_trivia(&self, token: &SyntaxToken, prefix: &str, out: &mut String) {
        let trivia = token
            .leading_trivia()
            .iter()
            .map(|t| ("leading", t))
            .chain(token.trailing_trivia().iter().map(|t| ("trailing", t)))
            .collect::<Vec<_>>();
        let last = trivia.len().saturating_sub(1);
        for (i, (position, piece)) in trivia.into_iter().enumerate() {
            let branch = if i == last { "└─ " } else { "├─ " };
            out.push_str(prefix);
            out.push_str(branch);
            out.push_str(&describe_trivia(position, piece));
            out.push('\n');
        }
    }
}

fn describe_token(token: &SyntaxToken) -> String {
    let mut line = format!("{} {:?}", token.kind(), token.text());
    match token.value() {
        TokenValue::Integer(_) | TokenValue::Float(_) | TokenValue::String(_) => {
            let value = token.value().to_string();
            if value != token.text() {
                line.push_str(&format!(" = {value}"));
            }
        }
        _ => {}
    }
    line
}

fn describe_trivia(position: &str, trivia: &SyntaxTrivia) -> String {
    format!("{position} {} {:?}", trivia.kind(), trivia.text())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::syntax::{Span, SyntaxKind};

    #[test]
    fn test_print_tree() {
        let mut number = SyntaxToken::new(
            SyntaxKind::NumericLiteralToken,
            "0x10".to_string(),
            Span::new(7, 11),
        );
        number.value = TokenValue::Integer(16);
        let mut keyword =
            SyntaxToken::new(SyntaxKind::ReturnKeyword, "return".to_string(), Span::new(0, 6));
        keyword.trailing_trivia = vec![SyntaxTrivia::new(
            SyntaxKind::WhitespaceTrivia,
            " ".to_string(),
            Span::new(6, 7),
        )];
        let statement = SyntaxNode::new(
            SyntaxKind::ReturnStatement,
            vec![
                keyword.into(),
                SyntaxNode::new(SyntaxKind::NumericalLiteralExpression, vec![number.into()])
                    .into(),
            ],
        );
        let root = SyntaxNode::new(
            SyntaxKind::Chunk,
            vec![
                SyntaxNode::new(SyntaxKind::Block, vec![statement.into()]).into(),
                SyntaxToken::new(SyntaxKind::EndOfFileToken, String::new(), Span::empty(11))
                    .into(),
            ],
        );

        let expected = r#"Chunk
├─ Block
│  └─ ReturnStatement
│     ├─ ReturnKeyword "return"
│     └─ NumericalLiteralExpression
│        └─ NumericLiteralToken "0x10" = 16
└─ EndOfFileToken ""
"#;
        assert_eq!(TreePrinter::default().print(&root), expected);

        let with_trivia = TreePrinter::new(true).print(&root);
        assert!(with_trivia.contains("│     │  └─ trailing WhitespaceTrivia \" \"\n"));
    }
}
