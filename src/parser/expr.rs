use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::PrattParser;

use crate::err::LuzError;
use crate::syntax::{SyntaxElement, SyntaxNode};
use crate::Rule;

use super::builder::{build_node, build_token};
use super::token::{binary_expression_kind, token_kind, unary_expression_kind};

lazy_static::lazy_static! {
    static ref PRATT_EXPR_PARSER: PrattParser<Rule> = {
        use pest::pratt_parser::{Assoc::*, Op};

        // Precedence is defined lowest to highest
        PrattParser::new()
            // Logic op
            .op(Op::infix(Rule::OrKeyword, Left))
            .op(Op::infix(Rule::AndKeyword, Left))

            // Comparison op
            .op(Op::infix(Rule::LessThanToken, Left) |
                Op::infix(Rule::GreaterThanToken, Left) |
                Op::infix(Rule::LessThanEqualsToken, Left) |
                Op::infix(Rule::GreaterThanEqualsToken, Left) |
                Op::infix(Rule::TildeEqualsToken, Left) |
                Op::infix(Rule::EqualsEqualsToken, Left)
            )

            // Bitwise op
            .op(Op::infix(Rule::PipeToken, Left))
            .op(Op::infix(Rule::TildeToken, Left))
            .op(Op::infix(Rule::AmpersandToken, Left))
            .op(Op::infix(Rule::LessThanLessThanToken, Left) |
                Op::infix(Rule::GreaterThanGreaterThanToken, Left))

            // Arithmetic op
            .op(Op::infix(Rule::DotDotToken, Right))
            .op(Op::infix(Rule::PlusToken, Left) | Op::infix(Rule::MinusToken, Left))
            .op(Op::infix(Rule::StarToken, Left) |
                Op::infix(Rule::SlashToken, Left) |
                Op::infix(Rule::SlashSlashToken, Left) |
                Op::infix(Rule::PercentToken, Left))
            .op(Op::prefix(Rule::NotOperator) |
                Op::prefix(Rule::LengthOperator) |
                Op::prefix(Rule::NegateOperator) |
                Op::prefix(Rule::BitwiseNotOperator))
            .op(Op::infix(Rule::HatToken, Right))
    };
}

fn operator_token(op: &Pair<Rule>) -> Result<SyntaxElement, LuzError> {
    let kind = token_kind(op.as_rule())
        .ok_or_else(|| LuzError::Internal(format!("{:?} is not an operator", op.as_rule())))?;
    Ok(build_token(kind, op).into())
}

/// Folds the flat operand/operator sequence of an `Expression` into nested
/// unary and binary expression nodes.
pub(crate) fn build_expression(pairs: Pairs<Rule>) -> Result<SyntaxNode, LuzError> {
    PRATT_EXPR_PARSER
        .map_primary(build_node)
        .map_prefix(|op, rhs| {
            let kind = unary_expression_kind(op.as_rule()).ok_or_else(|| {
                LuzError::Internal(format!("{:?} is not a unary operator", op.as_rule()))
            })?;
            Ok(SyntaxNode::new(kind, vec![operator_token(&op)?, rhs?.into()]))
        })
        .map_infix(|lhs, op, rhs| {
            let kind = binary_expression_kind(op.as_rule()).ok_or_else(|| {
                LuzError::Internal(format!("{:?} is not a binary operator", op.as_rule()))
            })?;
            Ok(SyntaxNode::new(
                kind,
                vec![lhs?.into(), operator_token(&op)?, rhs?.into()],
            ))
        })
        .parse(pairs)
}

#[cfg(test)]
mod test {
    use pest::Parser;

    use super::build_expression;
    use crate::syntax::{SyntaxKind, SyntaxNode};
    use crate::{LuaParser, Rule};

    fn expression(source: &str) -> SyntaxNode {
        let mut pairs = LuaParser::parse(Rule::Expression, source).unwrap();
        build_expression(pairs.next().unwrap().into_inner()).unwrap()
    }

    /// Expression in prefix notation with every operator node parenthesized.
    fn shape(node: &SyntaxNode) -> String {
        if node.kind().is_unary_expression() || node.kind().is_binary_expression() {
            let operands = node
                .child_nodes()
                .map(shape)
                .collect::<Vec<_>>()
                .join(" ");
            let op = node
                .child_tokens()
                .next()
                .map(|token| token.text().to_string())
                .unwrap_or_default();
            format!("({op} {operands})")
        } else {
            node.text()
        }
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(shape(&expression("1 + 2 * 3")), "(+ 1 (* 2 3))");
        assert_eq!(shape(&expression("1 * 2 + 3")), "(+ (* 1 2) 3)");
        assert_eq!(shape(&expression("1 - 2 - 3")), "(- (- 1 2) 3)");
        assert_eq!(shape(&expression("7 // 2 % 3")), "(% (// 7 2) 3)");
    }

    #[test]
    fn test_right_associative_operators() {
        assert_eq!(shape(&expression("a .. b .. c")), "(.. a (.. b c))");
        assert_eq!(shape(&expression("2 ^ 3 ^ 2")), "(^ 2 (^ 3 2))");
    }

    #[test]
    fn test_unary_and_power() {
        assert_eq!(shape(&expression("-x ^ 2")), "(- (^ x 2))");
        assert_eq!(shape(&expression("2 ^ -3")), "(^ 2 (- 3))");
        assert_eq!(shape(&expression("not a == b")), "(== (not a) b)");
        assert_eq!(shape(&expression("#t + 1")), "(+ (# t) 1)");
        assert_eq!(shape(&expression("~~x")), "(~ (~ x))");
    }

    #[test]
    fn test_logic_and_comparison() {
        assert_eq!(
            shape(&expression("a or b and c < d")),
            "(or a (and b (< c d)))"
        );
        assert_eq!(shape(&expression("a | b ~ c & d")), "(| a (~ b (& c d)))");
        assert_eq!(shape(&expression("1 << 2 .. 3")), "(<< 1 (.. 2 3))");
    }

    #[test]
    fn test_operator_kinds() {
        let node = expression("not x");
        assert_eq!(node.kind(), SyntaxKind::LogicalNotExpression);
        assert_eq!(
            node.child_tokens().next().unwrap().kind(),
            SyntaxKind::NotKeyword
        );

        let node = expression("a ~ b");
        assert_eq!(node.kind(), SyntaxKind::ExclusiveOrExpression);
        assert_eq!(
            node.child_tokens().next().unwrap().kind(),
            SyntaxKind::TildeToken
        );

        assert_eq!(expression("a ~= b").kind(), SyntaxKind::NotEqualsExpression);
        assert_eq!(expression("-1").kind(), SyntaxKind::UnaryMinusExpression);
        assert_eq!(expression("~1").kind(), SyntaxKind::BitwiseNotExpression);
    }
}
