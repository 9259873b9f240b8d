use pest::iterators::Pair;

use crate::err::LuzError;
use crate::syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use crate::Rule;

use super::expr::build_expression;
use super::token::{node_kind, suffix_kind, token_kind};

pub(crate) fn build_token(kind: SyntaxKind, pair: &Pair<Rule>) -> SyntaxToken {
    SyntaxToken::new(kind, pair.as_str().to_string(), pair.as_span().into())
}

pub(crate) fn build_element(pair: Pair<Rule>) -> Result<SyntaxElement, LuzError> {
    match token_kind(pair.as_rule()) {
        Some(kind) => Ok(build_token(kind, &pair).into()),
        None => Ok(build_node(pair)?.into()),
    }
}

pub(crate) fn build_node(pair: Pair<Rule>) -> Result<SyntaxNode, LuzError> {
    match pair.as_rule() {
        Rule::Expression => build_expression(pair.into_inner()),
        Rule::SuffixedExpression => build_suffixed_expression(pair),
        Rule::AssignmentOrCallStatement => build_assignment_or_call(pair),
        Rule::FunctionNamePath => build_function_name(pair),
        rule => match node_kind(rule) {
            Some(kind) => build_children(kind, pair),
            None => Err(LuzError::Internal(format!(
                "no syntax node for Rule::{rule:?}"
            ))),
        },
    }
}

fn build_children(kind: SyntaxKind, pair: Pair<Rule>) -> Result<SyntaxNode, LuzError> {
    let at = pair.as_span().start();
    let children = pair
        .into_inner()
        .map(build_element)
        .collect::<Result<Vec<_>, _>>()?;
    if children.is_empty() {
        Ok(SyntaxNode::empty(kind, at))
    } else {
        Ok(SyntaxNode::new(kind, children))
    }
}

/// `a.b[c]:d(e)` is a primary expression followed by suffixes; each suffix
/// wraps everything to its left.
fn build_suffixed_expression(pair: Pair<Rule>) -> Result<SyntaxNode, LuzError> {
    let mut inner = pair.into_inner();
    let primary = inner
        .next()
        .ok_or_else(|| LuzError::Internal("suffixed expression without primary".into()))?;
    inner.fold(build_node(primary), |expr, suffix| {
        wrap(suffix_kind(suffix.as_rule()), expr?, suffix)
    })
}

/// `a.b.c:m` nests left the same way: `SimpleFunctionName(a)`, then one
/// member name per `.`, then the method name.
fn build_function_name(pair: Pair<Rule>) -> Result<SyntaxNode, LuzError> {
    let mut inner = pair.into_inner();
    let name = inner
        .next()
        .ok_or_else(|| LuzError::Internal("function name without identifier".into()))?;
    let simple = SyntaxNode::new(
        SyntaxKind::SimpleFunctionName,
        vec![build_element(name)?],
    );
    inner.fold(Ok(simple), |name, suffix| {
        let kind = match suffix.as_rule() {
            Rule::MemberNameSuffix => Some(SyntaxKind::MemberFunctionName),
            Rule::MethodNameSuffix => Some(SyntaxKind::MethodFunctionName),
            _ => None,
        };
        wrap(kind, name?, suffix)
    })
}

/// New `kind` node holding `inner` followed by the children of `suffix`.
fn wrap(
    kind: Option<SyntaxKind>,
    inner: SyntaxNode,
    suffix: Pair<Rule>,
) -> Result<SyntaxNode, LuzError> {
    let kind = kind.ok_or_else(|| {
        LuzError::Internal(format!("unexpected suffix Rule::{:?}", suffix.as_rule()))
    })?;
    let mut children = vec![inner.into()];
    for pair in suffix.into_inner() {
        children.push(build_element(pair)?);
    }
    Ok(SyntaxNode::new(kind, children))
}

/// The grammar can't tell `f(x)` from `a, b = x` up front, so both come in
/// as one rule: with an `=` clause it is an assignment whose targets must be
/// assignable, without one it must be a single call.
fn build_assignment_or_call(pair: Pair<Rule>) -> Result<SyntaxNode, LuzError> {
    let mut children = vec![];
    let mut targets = vec![];
    let mut is_assignment = false;

    for pair in pair.into_inner() {
        match pair.as_rule() {
            Rule::SuffixedExpression => {
                let span = pair.as_span();
                let expr = build_suffixed_expression(pair)?;
                targets.push((expr.kind(), span));
                children.push(expr.into());
            }
            Rule::EqualsValuesClause => {
                is_assignment = true;
                children.push(build_element(pair)?);
            }
            _ => children.push(build_element(pair)?),
        }
    }

    if is_assignment {
        if let Some((_, span)) = targets.iter().find(|(kind, _)| !kind.is_assignable()) {
            return Err(LuzError::at(*span, "syntax error: cannot assign to this expression"));
        }
        return Ok(SyntaxNode::new(SyntaxKind::AssignmentStatement, children));
    }

    match targets.as_slice() {
        [(kind, _)] if kind.is_call() => {
            Ok(SyntaxNode::new(SyntaxKind::ExpressionStatement, children))
        }
        [(_, span)] => Err(LuzError::at(
            *span,
            "syntax error: expression statement must be a function call",
        )),
        _ => Err(LuzError::Internal("expression list without assignment".into())),
    }
}
