mod common;

use luz_syntax::{
    parse, parse_with_options, DiagnosticCode, LuaVersion, SyntaxKind, SyntaxKind::*, TokenValue,
};
use pretty_assertions::assert_eq;

use common::{n, s, t, v, verify_prefix, Expected};

const TPACK: &str = include_str!("fixtures/tpack.lua");

fn local_member(name: &str, table: &str, member: &str) -> Vec<Expected> {
    vec![
        n(LocalDeclarationStatement),
        t(LocalKeyword, "local"),
        n(LocalDeclarationName),
        n(IdentifierName),
        t(IdentifierToken, name),
        n(EqualsValuesClause),
        t(EqualsToken, "="),
        n(MemberAccessExpression),
        n(IdentifierName),
        t(IdentifierToken, table),
        t(DotToken, "."),
        t(IdentifierToken, member),
    ]
}

fn local_packsize(name: &str, format: &str) -> Vec<Expected> {
    vec![
        n(LocalDeclarationStatement),
        t(LocalKeyword, "local"),
        n(LocalDeclarationName),
        n(IdentifierName),
        t(IdentifierToken, name),
        n(EqualsValuesClause),
        t(EqualsToken, "="),
        n(InvocationExpression),
        n(IdentifierName),
        t(IdentifierToken, "packsize"),
        n(ExpressionListFunctionArgument),
        t(OpenParenthesisToken, "("),
        n(StringLiteralExpression),
        s(&format!("\"{format}\""), format),
        t(CloseParenthesisToken, ")"),
    ]
}

#[test]
fn test_tpack_header() {
    let tree = parse(TPACK).unwrap();

    let mut expected = vec![n(Chunk), n(Block)];
    expected.extend(local_member("pack", "string", "pack"));
    expected.extend(local_member("packsize", "string", "packsize"));
    expected.extend(local_member("unpack", "string", "unpack"));
    expected.extend([
        n(ExpressionStatement),
        n(InvocationExpression),
        n(IdentifierName),
        t(IdentifierToken, "print"),
        n(StringFunctionArgument),
        n(StringLiteralExpression),
        s("\"testing pack/unpack\"", "testing pack/unpack"),
    ]);
    expected.extend([
        n(LocalDeclarationStatement),
        t(LocalKeyword, "local"),
        n(LocalDeclarationName),
        n(IdentifierName),
        t(IdentifierToken, "NB"),
        n(EqualsValuesClause),
        t(EqualsToken, "="),
        n(NumericalLiteralExpression),
        v(NumericLiteralToken, "16", 16i64),
    ]);
    for (name, format) in [
        ("sizeshort", "h"),
        ("sizeint", "i"),
        ("sizelong", "l"),
        ("sizesize_t", "T"),
        ("sizeLI", "j"),
        ("sizefloat", "f"),
        ("sizedouble", "d"),
        ("sizenumber", "n"),
    ] {
        expected.extend(local_packsize(name, format));
    }
    expected.extend([
        n(LocalDeclarationStatement),
        t(LocalKeyword, "local"),
        n(LocalDeclarationName),
        n(IdentifierName),
        t(IdentifierToken, "little"),
        n(EqualsValuesClause),
        t(EqualsToken, "="),
        n(ParenthesizedExpression),
        t(OpenParenthesisToken, "("),
        n(EqualsExpression),
        n(InvocationExpression),
        n(IdentifierName),
        t(IdentifierToken, "pack"),
        n(ExpressionListFunctionArgument),
        t(OpenParenthesisToken, "("),
        n(StringLiteralExpression),
        s("\"i2\"", "i2"),
        t(CommaToken, ","),
        n(NumericalLiteralExpression),
        v(NumericLiteralToken, "1", 1i64),
        t(CloseParenthesisToken, ")"),
        t(EqualsEqualsToken, "=="),
        n(StringLiteralExpression),
        v(StringLiteralToken, "\"\\1\\0\"", vec![1u8, 0]),
        t(CloseParenthesisToken, ")"),
    ]);
    expected.extend(local_packsize("align", "!xXi16"));

    verify_prefix(tree.root(), &expected);
}

#[test]
fn test_tpack_is_clean_lua54() {
    let tree = parse(TPACK).unwrap();
    assert!(tree.diagnostics().is_empty(), "{:?}", tree.diagnostics());
    assert_eq!(tree.root().full_text(), TPACK);
}

#[test]
fn test_tpack_header_comments_lead_first_statement() {
    let tree = parse(TPACK).unwrap();
    let local = tree.root().first_token().unwrap();
    assert_eq!(local.kind(), LocalKeyword);
    let comments = local
        .leading_trivia()
        .iter()
        .filter(|trivia| trivia.kind().is_comment())
        .map(|trivia| trivia.text())
        .collect::<Vec<_>>();
    assert_eq!(
        comments,
        vec![
            "-- $Id: testes/tpack.lua $",
            "-- See Copyright Notice in file all.lua",
        ]
    );
}

#[test]
fn test_tpack_literal_values() {
    let tree = parse(TPACK).unwrap();
    let value_of = |text: &str| {
        tree.root()
            .tokens()
            .find(|token| token.text() == text)
            .map(|token| token.value().clone())
            .unwrap()
    };

    assert_eq!(
        value_of("0x13121110090807060504030201"),
        TokenValue::Integer(0x0807060504030201)
    );
    assert_eq!(value_of("0xffffffff"), TokenValue::Integer(0xffffffff));
    assert_eq!(value_of("2000.25"), TokenValue::Float(2000.25));
    assert_eq!(value_of("1e20"), TokenValue::Float(1e20));
    assert_eq!(value_of("\"\\xff\""), TokenValue::String(vec![0xff]));
    assert_eq!(
        value_of("\"\\1\\2\\3\\4\\5\\6\\7\\8\\9\\10\\11\\12\\13\""),
        TokenValue::String((1..=13).collect())
    );
    assert_eq!(
        value_of("\"\\0\\0\\0\\100\""),
        TokenValue::String(vec![0, 0, 0, 100])
    );

    let format = tree
        .root()
        .tokens()
        .find(|token| token.text().starts_with("\"\\tshort"))
        .unwrap();
    assert_eq!(
        format.value(),
        &TokenValue::String(
            b"\tshort %d, int %d, long %d, size_t %d, float %d, double %d,\n\tlua Integer %d, lua Number %d"
                .to_vec()
        )
    );
}

#[test]
fn test_tpack_tail() {
    let tree = parse(TPACK).unwrap();
    let block = tree.root().child_node(Block).unwrap();
    let last = block.child_nodes().last().unwrap();
    assert_eq!(last.kind(), ExpressionStatement);
    assert_eq!(last.text(), "print \"OK\"");

    let eof = tree.root().last_token().unwrap();
    assert_eq!(eof.kind(), EndOfFileToken);
    assert_eq!(eof.span().start, TPACK.len());
}

#[test]
fn test_tpack_needs_lua53() {
    let tree = parse_with_options(TPACK, &LuaVersion::Lua53.options()).unwrap();
    assert!(tree.diagnostics().is_empty());

    let tree = parse_with_options(TPACK, &LuaVersion::Lua52.options()).unwrap();
    let codes = tree
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.code)
        .collect::<Vec<_>>();
    assert!(!codes.is_empty());
    assert!(codes
        .iter()
        .all(|code| *code == DiagnosticCode::FeatureNotAvailable));

    // `lnum & (~(-1 << (i * 8)))`
    let bitwise = tree
        .root()
        .descendants()
        .filter(|element| element.kind() == SyntaxKind::BitwiseAndExpression)
        .count();
    assert_eq!(bitwise, 1);
}
