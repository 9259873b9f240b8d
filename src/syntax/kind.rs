use std::fmt::{self, Display};

/// Tag of every node, token and trivia piece of the tree.
///
/// Variants are grouped: tokens first (punctuation, keywords, then the
/// tokens with free-form text), trivia next, nodes last. The grouping is
/// relied upon by the classification helpers below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Punctuation
    PlusToken,
    MinusToken,
    StarToken,
    SlashToken,
    SlashSlashToken,
    PercentToken,
    HatToken,
    HashToken,
    AmpersandToken,
    TildeToken,
    PipeToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    EqualsEqualsToken,
    TildeEqualsToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    OpenParenthesisToken,
    CloseParenthesisToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    ColonColonToken,
    SemicolonToken,
    ColonToken,
    CommaToken,
    DotToken,
    DotDotToken,
    DotDotDotToken,

    // Keywords
    AndKeyword,
    BreakKeyword,
    DoKeyword,
    ElseKeyword,
    ElseIfKeyword,
    EndKeyword,
    FalseKeyword,
    ForKeyword,
    FunctionKeyword,
    GotoKeyword,
    IfKeyword,
    InKeyword,
    LocalKeyword,
    NilKeyword,
    NotKeyword,
    OrKeyword,
    RepeatKeyword,
    ReturnKeyword,
    ThenKeyword,
    TrueKeyword,
    UntilKeyword,
    WhileKeyword,

    IdentifierToken,
    NumericLiteralToken,
    StringLiteralToken,
    EndOfFileToken,

    // Trivia
    WhitespaceTrivia,
    EndOfLineTrivia,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    ShebangTrivia,
    SkippedTokensTrivia,

    // Nodes
    Chunk,
    Block,

    LocalDeclarationStatement,
    LocalFunctionDeclarationStatement,
    FunctionDeclarationStatement,
    AssignmentStatement,
    ExpressionStatement,
    DoStatement,
    WhileStatement,
    RepeatUntilStatement,
    IfStatement,
    NumericForStatement,
    GenericForStatement,
    ReturnStatement,
    BreakStatement,
    GotoStatement,
    GotoLabelStatement,
    EmptyStatement,

    LocalDeclarationName,
    VariableAttribute,
    EqualsValuesClause,
    ElseIfClause,
    ElseClause,
    ParameterList,
    NamedParameter,
    VarArgParameter,
    SimpleFunctionName,
    MemberFunctionName,
    MethodFunctionName,
    ExpressionListFunctionArgument,
    StringFunctionArgument,
    TableConstructorFunctionArgument,
    ExpressionKeyedTableField,
    IdentifierKeyedTableField,
    UnkeyedTableField,

    NilLiteralExpression,
    TrueLiteralExpression,
    FalseLiteralExpression,
    NumericalLiteralExpression,
    StringLiteralExpression,
    VarArgExpression,
    IdentifierName,
    ParenthesizedExpression,
    MemberAccessExpression,
    ElementAccessExpression,
    InvocationExpression,
    MethodCallExpression,
    AnonymousFunctionExpression,
    TableConstructorExpression,

    UnaryMinusExpression,
    LogicalNotExpression,
    LengthExpression,
    BitwiseNotExpression,

    AddExpression,
    SubtractExpression,
    MultiplyExpression,
    DivideExpression,
    FloorDivideExpression,
    ModuloExpression,
    ExponentiateExpression,
    ConcatExpression,
    BitwiseAndExpression,
    BitwiseOrExpression,
    ExclusiveOrExpression,
    LeftShiftExpression,
    RightShiftExpression,
    EqualsExpression,
    NotEqualsExpression,
    LessThanExpression,
    LessThanOrEqualExpression,
    GreaterThanExpression,
    GreaterThanOrEqualExpression,
    LogicalAndExpression,
    LogicalOrExpression,
}

impl SyntaxKind {
    #[inline]
    fn between(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        first <= self && self <= last
    }

    pub fn is_token(self) -> bool {
        self <= SyntaxKind::EndOfFileToken
    }

    pub fn is_keyword(self) -> bool {
        self.between(SyntaxKind::AndKeyword, SyntaxKind::WhileKeyword)
    }

    pub fn is_punctuation(self) -> bool {
        self <= SyntaxKind::DotDotDotToken
    }

    pub fn is_trivia(self) -> bool {
        self.between(SyntaxKind::WhitespaceTrivia, SyntaxKind::SkippedTokensTrivia)
    }

    pub fn is_node(self) -> bool {
        self >= SyntaxKind::Chunk
    }

    pub fn is_statement(self) -> bool {
        self.between(SyntaxKind::LocalDeclarationStatement, SyntaxKind::EmptyStatement)
    }

    pub fn is_expression(self) -> bool {
        self.between(SyntaxKind::NilLiteralExpression, SyntaxKind::LogicalOrExpression)
    }

    pub fn is_unary_expression(self) -> bool {
        self.between(SyntaxKind::UnaryMinusExpression, SyntaxKind::BitwiseNotExpression)
    }

    pub fn is_binary_expression(self) -> bool {
        self.between(SyntaxKind::AddExpression, SyntaxKind::LogicalOrExpression)
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            SyntaxKind::SingleLineCommentTrivia | SyntaxKind::MultiLineCommentTrivia
        )
    }

    /// Expressions that may appear on the left of `=`.
    pub fn is_assignable(self) -> bool {
        matches!(
            self,
            SyntaxKind::IdentifierName
                | SyntaxKind::MemberAccessExpression
                | SyntaxKind::ElementAccessExpression
        )
    }

    /// Expressions that may stand alone as a statement.
    pub fn is_call(self) -> bool {
        matches!(
            self,
            SyntaxKind::InvocationExpression | SyntaxKind::MethodCallExpression
        )
    }

    /// The text of tokens that can only be spelled one way.
    pub fn fixed_text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        Some(match self {
            PlusToken => "+",
            MinusToken => "-",
            StarToken => "*",
            SlashToken => "/",
            SlashSlashToken => "//",
            PercentToken => "%",
            HatToken => "^",
            HashToken => "#",
            AmpersandToken => "&",
            TildeToken => "~",
            PipeToken => "|",
            LessThanLessThanToken => "<<",
            GreaterThanGreaterThanToken => ">>",
            EqualsEqualsToken => "==",
            TildeEqualsToken => "~=",
            LessThanEqualsToken => "<=",
            GreaterThanEqualsToken => ">=",
            LessThanToken => "<",
            GreaterThanToken => ">",
            EqualsToken => "=",
            OpenParenthesisToken => "(",
            CloseParenthesisToken => ")",
            OpenBraceToken => "{",
            CloseBraceToken => "}",
            OpenBracketToken => "[",
            CloseBracketToken => "]",
            ColonColonToken => "::",
            SemicolonToken => ";",
            ColonToken => ":",
            CommaToken => ",",
            DotToken => ".",
            DotDotToken => "..",
            DotDotDotToken => "...",
            AndKeyword => "and",
            BreakKeyword => "break",
            DoKeyword => "do",
            ElseKeyword => "else",
            ElseIfKeyword => "elseif",
            EndKeyword => "end",
            FalseKeyword => "false",
            ForKeyword => "for",
            FunctionKeyword => "function",
            GotoKeyword => "goto",
            IfKeyword => "if",
            InKeyword => "in",
            LocalKeyword => "local",
            NilKeyword => "nil",
            NotKeyword => "not",
            OrKeyword => "or",
            RepeatKeyword => "repeat",
            ReturnKeyword => "return",
            ThenKeyword => "then",
            TrueKeyword => "true",
            UntilKeyword => "until",
            WhileKeyword => "while",
            EndOfFileToken => "",
            _ => return None,
        })
    }

    /// Reserved word lookup. `goto` is not reserved: it only acts as a
    /// keyword at the start of a statement.
    pub fn keyword(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        Some(match text {
            "and" => AndKeyword,
            "break" => BreakKeyword,
            "do" => DoKeyword,
            "else" => ElseKeyword,
            "elseif" => ElseIfKeyword,
            "end" => EndKeyword,
            "false" => FalseKeyword,
            "for" => ForKeyword,
            "function" => FunctionKeyword,
            "if" => IfKeyword,
            "in" => InKeyword,
            "local" => LocalKeyword,
            "nil" => NilKeyword,
            "not" => NotKeyword,
            "or" => OrKeyword,
            "repeat" => RepeatKeyword,
            "return" => ReturnKeyword,
            "then" => ThenKeyword,
            "true" => TrueKeyword,
            "until" => UntilKeyword,
            "while" => WhileKeyword,
            _ => return None,
        })
    }
}

impl Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
