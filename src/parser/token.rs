// Unary `-`, `~`, `not` and `#` are matched by their own grammar rules and
// come out as the same token kinds as their binary/keyword spelling.

use crate::syntax::SyntaxKind;
use crate::Rule;

/// Token kind produced by a grammar rule, if the rule is a token rule.
pub fn token_kind(rule: Rule) -> Option<SyntaxKind> {
    use SyntaxKind as K;
    Some(match rule {
        Rule::PlusToken => K::PlusToken,
        Rule::MinusToken | Rule::NegateOperator => K::MinusToken,
        Rule::StarToken => K::StarToken,
        Rule::SlashToken => K::SlashToken,
        Rule::SlashSlashToken => K::SlashSlashToken,
        Rule::PercentToken => K::PercentToken,
        Rule::HatToken => K::HatToken,
        Rule::LengthOperator => K::HashToken,
        Rule::AmpersandToken => K::AmpersandToken,
        Rule::TildeToken | Rule::BitwiseNotOperator => K::TildeToken,
        Rule::PipeToken => K::PipeToken,
        Rule::LessThanLessThanToken => K::LessThanLessThanToken,
        Rule::GreaterThanGreaterThanToken => K::GreaterThanGreaterThanToken,
        Rule::EqualsEqualsToken => K::EqualsEqualsToken,
        Rule::TildeEqualsToken => K::TildeEqualsToken,
        Rule::LessThanEqualsToken => K::LessThanEqualsToken,
        Rule::GreaterThanEqualsToken => K::GreaterThanEqualsToken,
        Rule::LessThanToken => K::LessThanToken,
        Rule::GreaterThanToken => K::GreaterThanToken,
        Rule::EqualsToken => K::EqualsToken,
        Rule::OpenParenthesisToken => K::OpenParenthesisToken,
        Rule::CloseParenthesisToken => K::CloseParenthesisToken,
        Rule::OpenBraceToken => K::OpenBraceToken,
        Rule::CloseBraceToken => K::CloseBraceToken,
        Rule::OpenBracketToken => K::OpenBracketToken,
        Rule::CloseBracketToken => K::CloseBracketToken,
        Rule::ColonColonToken => K::ColonColonToken,
        Rule::SemicolonToken => K::SemicolonToken,
        Rule::ColonToken => K::ColonToken,
        Rule::CommaToken => K::CommaToken,
        Rule::DotToken => K::DotToken,
        Rule::DotDotToken => K::DotDotToken,
        Rule::DotDotDotToken => K::DotDotDotToken,

        Rule::AndKeyword => K::AndKeyword,
        Rule::BreakKeyword => K::BreakKeyword,
        Rule::DoKeyword => K::DoKeyword,
        Rule::ElseKeyword => K::ElseKeyword,
        Rule::ElseIfKeyword => K::ElseIfKeyword,
        Rule::EndKeyword => K::EndKeyword,
        Rule::FalseKeyword => K::FalseKeyword,
        Rule::ForKeyword => K::ForKeyword,
        Rule::FunctionKeyword => K::FunctionKeyword,
        Rule::GotoKeyword => K::GotoKeyword,
        Rule::IfKeyword => K::IfKeyword,
        Rule::InKeyword => K::InKeyword,
        Rule::LocalKeyword => K::LocalKeyword,
        Rule::NilKeyword => K::NilKeyword,
        Rule::NotKeyword | Rule::NotOperator => K::NotKeyword,
        Rule::OrKeyword => K::OrKeyword,
        Rule::RepeatKeyword => K::RepeatKeyword,
        Rule::ReturnKeyword => K::ReturnKeyword,
        Rule::ThenKeyword => K::ThenKeyword,
        Rule::TrueKeyword => K::TrueKeyword,
        Rule::UntilKeyword => K::UntilKeyword,
        Rule::WhileKeyword => K::WhileKeyword,

        Rule::IdentifierToken => K::IdentifierToken,
        Rule::NumericLiteralToken => K::NumericLiteralToken,
        Rule::StringLiteralToken => K::StringLiteralToken,
        Rule::EOI => K::EndOfFileToken,
        _ => return None,
    })
}

/// Node kind of the grammar rules that map one-to-one onto a node.
///
/// Rules that are folded into other shapes (expressions, suffix chains,
/// function names, assignment-or-call statements) are not listed.
pub fn node_kind(rule: Rule) -> Option<SyntaxKind> {
    use SyntaxKind as K;
    Some(match rule {
        Rule::Chunk => K::Chunk,
        Rule::Block => K::Block,

        Rule::EmptyStatement => K::EmptyStatement,
        Rule::LocalFunctionDeclarationStatement => K::LocalFunctionDeclarationStatement,
        Rule::LocalDeclarationStatement => K::LocalDeclarationStatement,
        Rule::FunctionDeclarationStatement => K::FunctionDeclarationStatement,
        Rule::IfStatement => K::IfStatement,
        Rule::WhileStatement => K::WhileStatement,
        Rule::DoStatement => K::DoStatement,
        Rule::NumericForStatement => K::NumericForStatement,
        Rule::GenericForStatement => K::GenericForStatement,
        Rule::RepeatUntilStatement => K::RepeatUntilStatement,
        Rule::BreakStatement => K::BreakStatement,
        Rule::GotoStatement => K::GotoStatement,
        Rule::GotoLabelStatement => K::GotoLabelStatement,
        Rule::ReturnStatement => K::ReturnStatement,

        Rule::LocalDeclarationName => K::LocalDeclarationName,
        Rule::VariableAttribute => K::VariableAttribute,
        Rule::EqualsValuesClause => K::EqualsValuesClause,
        Rule::ElseIfClause => K::ElseIfClause,
        Rule::ElseClause => K::ElseClause,
        Rule::ParameterList => K::ParameterList,
        Rule::NamedParameter => K::NamedParameter,
        Rule::VarArgParameter => K::VarArgParameter,
        Rule::ExpressionListFunctionArgument => K::ExpressionListFunctionArgument,
        Rule::StringFunctionArgument => K::StringFunctionArgument,
        Rule::TableConstructorFunctionArgument => K::TableConstructorFunctionArgument,
        Rule::ExpressionKeyedTableField => K::ExpressionKeyedTableField,
        Rule::IdentifierKeyedTableField => K::IdentifierKeyedTableField,
        Rule::UnkeyedTableField => K::UnkeyedTableField,

        Rule::NilLiteralExpression => K::NilLiteralExpression,
        Rule::TrueLiteralExpression => K::TrueLiteralExpression,
        Rule::FalseLiteralExpression => K::FalseLiteralExpression,
        Rule::NumericalLiteralExpression => K::NumericalLiteralExpression,
        Rule::StringLiteralExpression => K::StringLiteralExpression,
        Rule::VarArgExpression => K::VarArgExpression,
        Rule::AnonymousFunctionExpression => K::AnonymousFunctionExpression,
        Rule::TableConstructorExpression => K::TableConstructorExpression,
        Rule::IdentifierName => K::IdentifierName,
        Rule::ParenthesizedExpression => K::ParenthesizedExpression,
        _ => return None,
    })
}

/// Node kind built around each suffix of a suffixed expression.
pub fn suffix_kind(rule: Rule) -> Option<SyntaxKind> {
    Some(match rule {
        Rule::MemberAccessSuffix => SyntaxKind::MemberAccessExpression,
        Rule::ElementAccessSuffix => SyntaxKind::ElementAccessExpression,
        Rule::MethodCallSuffix => SyntaxKind::MethodCallExpression,
        Rule::InvocationSuffix => SyntaxKind::InvocationExpression,
        _ => return None,
    })
}

pub fn unary_expression_kind(rule: Rule) -> Option<SyntaxKind> {
    Some(match rule {
        Rule::NegateOperator => SyntaxKind::UnaryMinusExpression,
        Rule::NotOperator => SyntaxKind::LogicalNotExpression,
        Rule::LengthOperator => SyntaxKind::LengthExpression,
        Rule::BitwiseNotOperator => SyntaxKind::BitwiseNotExpression,
        _ => return None,
    })
}

pub fn binary_expression_kind(rule: Rule) -> Option<SyntaxKind> {
    use SyntaxKind as K;
    Some(match rule {
        Rule::PlusToken => K::AddExpression,
        Rule::MinusToken => K::SubtractExpression,
        Rule::StarToken => K::MultiplyExpression,
        Rule::SlashToken => K::DivideExpression,
        Rule::SlashSlashToken => K::FloorDivideExpression,
        Rule::PercentToken => K::ModuloExpression,
        Rule::HatToken => K::ExponentiateExpression,
        Rule::DotDotToken => K::ConcatExpression,
        Rule::AmpersandToken => K::BitwiseAndExpression,
        Rule::PipeToken => K::BitwiseOrExpression,
        Rule::TildeToken => K::ExclusiveOrExpression,
        Rule::LessThanLessThanToken => K::LeftShiftExpression,
        Rule::GreaterThanGreaterThanToken => K::RightShiftExpression,
        Rule::EqualsEqualsToken => K::EqualsExpression,
        Rule::TildeEqualsToken => K::NotEqualsExpression,
        Rule::LessThanToken => K::LessThanExpression,
        Rule::LessThanEqualsToken => K::LessThanOrEqualExpression,
        Rule::GreaterThanToken => K::GreaterThanExpression,
        Rule::GreaterThanEqualsToken => K::GreaterThanOrEqualExpression,
        Rule::AndKeyword => K::LogicalAndExpression,
        Rule::OrKeyword => K::LogicalOrExpression,
        _ => return None,
    })
}
