//! Checks run on a finished tree: language features switched off in the
//! options, and the scoping rules Lua enforces when compiling a chunk.

use tracing::trace;

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::options::SyntaxOptions;
use crate::syntax::walker::{walk_node, walk_token};
use crate::syntax::{
    Span, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTrivia, SyntaxWalker, Visitable,
};

pub fn validate(root: &SyntaxNode, options: &SyntaxOptions) -> Vec<Diagnostic> {
    let mut validator = Validator::new(options);
    validator.visit_node(root);
    trace!(diagnostics = validator.diagnostics.len(), "validated");
    validator.diagnostics
}

#[derive(Debug)]
struct Local {
    name: String,
    /// `<const>` or `<close>`.
    read_only: bool,
}

impl Local {
    fn new(name: impl Into<String>, read_only: bool) -> Self {
        Self {
            name: name.into(),
            read_only,
        }
    }
}

#[derive(Debug, Default)]
struct BlockScope {
    is_loop: bool,
    locals: Vec<Local>,
    labels: Vec<(String, Span)>,
    /// Gotos of this block and its closed inner blocks still looking for a label.
    gotos: Vec<(String, Span)>,
}

#[derive(Debug)]
struct FunctionScope {
    is_vararg: bool,
    blocks: Vec<BlockScope>,
}

struct Validator<'a> {
    options: &'a SyntaxOptions,
    functions: Vec<FunctionScope>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Validator<'a> {
    fn new(options: &'a SyntaxOptions) -> Self {
        Self {
            options,
            functions: vec![],
            diagnostics: vec![],
        }
    }

    fn error(&mut self, code: DiagnosticCode, span: Span, message: String) {
        self.diagnostics.push(Diagnostic::error(code, span, message));
    }

    fn gate(&mut self, accepted: bool, span: Span, feature: &str) {
        if !accepted {
            self.diagnostics
                .push(Diagnostic::feature_not_available(span, feature));
        }
    }

    fn enter_function(&mut self, is_vararg: bool) {
        self.functions.push(FunctionScope {
            is_vararg,
            blocks: vec![],
        });
    }

    fn exit_function(&mut self) {
        self.functions.pop();
    }

    fn enter_block(&mut self, is_loop: bool, locals: Vec<Local>) {
        if let Some(function) = self.functions.last_mut() {
            function.blocks.push(BlockScope {
                is_loop,
                locals,
                ..Default::default()
            });
        }
    }

    /// Gotos the closing block could not resolve move to the enclosing
    /// block; at the function's outermost block they are undefined.
    fn exit_block(&mut self) {
        let Some(function) = self.functions.last_mut() else {
            return;
        };
        let Some(block) = function.blocks.pop() else {
            return;
        };
        let unresolved = block
            .gotos
            .into_iter()
            .filter(|(name, _)| !block.labels.iter().any(|(label, _)| label == name))
            .collect::<Vec<_>>();
        match function.blocks.last_mut() {
            Some(parent) => parent.gotos.extend(unresolved),
            None => {
                for (name, span) in unresolved {
                    self.diagnostics.push(Diagnostic::error(
                        DiagnosticCode::UndefinedLabel,
                        span,
                        format!("no visible label '{name}' for goto"),
                    ));
                }
            }
        }
    }

    fn declare(&mut self, local: Local) {
        if let Some(block) = self.functions.last_mut().and_then(|f| f.blocks.last_mut()) {
            block.locals.push(local);
        }
    }

    /// Innermost local named `name`, looking through enclosing functions.
    fn resolve(&self, name: &str) -> Option<&Local> {
        self.functions
            .iter()
            .rev()
            .flat_map(|function| function.blocks.iter().rev())
            .flat_map(|block| block.locals.iter().rev())
            .find(|local| local.name == name)
    }

    fn check_assignment(&mut self, name: &SyntaxToken) {
        if self.resolve(name.text()).is_some_and(|local| local.read_only) {
            self.error(
                DiagnosticCode::AssignToConst,
                name.span(),
                format!("attempt to assign to const variable '{}'", name.text()),
            );
        }
    }

    fn visit_block(&mut self, block: &SyntaxNode, is_loop: bool, locals: Vec<Local>) {
        self.enter_block(is_loop, locals);
        walk_node(self, block);
        self.exit_block();
    }

    /// Visits the children of `node`, opening a scope holding `locals` for
    /// its block.
    fn visit_with_block(&mut self, node: &SyntaxNode, is_loop: bool, locals: Vec<Local>) {
        let mut locals = Some(locals);
        for child in node.children() {
            match child.as_node() {
                Some(block) if block.kind() == SyntaxKind::Block => {
                    self.visit_block(block, is_loop, locals.take().unwrap_or_default())
                }
                _ => child.accept(self),
            }
        }
    }

    fn visit_function(&mut self, node: &SyntaxNode, is_method: bool) {
        let mut parameters = vec![];
        if is_method {
            parameters.push(Local::new("self", false));
        }
        let mut is_vararg = false;
        if let Some(list) = node.child_node(SyntaxKind::ParameterList) {
            for parameter in list.child_nodes() {
                match parameter.kind() {
                    SyntaxKind::NamedParameter => {
                        if let Some(name) = parameter.child_token(SyntaxKind::IdentifierToken) {
                            parameters.push(Local::new(name.text(), false));
                        }
                    }
                    SyntaxKind::VarArgParameter => is_vararg = true,
                    _ => {}
                }
            }
        }

        let mut parameters = Some(parameters);
        for child in node.children() {
            match child.as_node() {
                Some(block) if block.kind() == SyntaxKind::Block => {
                    self.enter_function(is_vararg);
                    self.visit_block(block, false, parameters.take().unwrap_or_default());
                    self.exit_function();
                }
                _ => child.accept(self),
            }
        }
    }

    fn visit_local_declaration(&mut self, node: &SyntaxNode) {
        // Values are evaluated before the new names come into scope.
        if let Some(values) = node.child_node(SyntaxKind::EqualsValuesClause) {
            self.visit_node(values);
        }

        let mut locals = vec![];
        let mut closes = 0;
        for child in node.children() {
            match child.as_node() {
                Some(name) if name.kind() == SyntaxKind::LocalDeclarationName => {
                    if let Some(local) = self.local_declaration_name(name, &mut closes) {
                        locals.push(local);
                    }
                }
                Some(values) if values.kind() == SyntaxKind::EqualsValuesClause => {}
                _ => child.accept(self),
            }
        }
        for local in locals {
            self.declare(local);
        }
    }

    fn local_declaration_name(&mut self, node: &SyntaxNode, closes: &mut usize) -> Option<Local> {
        walk_node(self, node);
        let name = node
            .child_node(SyntaxKind::IdentifierName)?
            .child_token(SyntaxKind::IdentifierToken)?;

        let Some(attribute) = node.child_node(SyntaxKind::VariableAttribute) else {
            return Some(Local::new(name.text(), false));
        };
        self.gate(
            self.options.accept_local_attributes,
            attribute.span(),
            "Local variable attributes",
        );
        let kind = attribute.child_token(SyntaxKind::IdentifierToken)?;
        match kind.text() {
            "const" => {}
            "close" => {
                *closes += 1;
                if *closes > 1 {
                    self.error(
                        DiagnosticCode::MultipleToBeClosed,
                        attribute.span(),
                        "multiple to-be-closed variables in local list".to_string(),
                    );
                }
            }
            other => self.error(
                DiagnosticCode::UnknownAttribute,
                kind.span(),
                format!("unknown attribute '{other}'"),
            ),
        }
        Some(Local::new(name.text(), true))
    }

    fn visit_label(&mut self, node: &SyntaxNode) {
        self.gate(self.options.accept_goto, node.span(), "Goto labels");
        if let Some(name) = node.child_token(SyntaxKind::IdentifierToken) {
            let duplicate = self.functions.last().is_some_and(|function| {
                function
                    .blocks
                    .iter()
                    .any(|block| block.labels.iter().any(|(label, _)| label == name.text()))
            });
            if duplicate {
                self.error(
                    DiagnosticCode::DuplicateLabel,
                    name.span(),
                    format!("label '{}' already defined", name.text()),
                );
            }
            if let Some(block) = self.functions.last_mut().and_then(|f| f.blocks.last_mut()) {
                block.labels.push((name.text().to_string(), name.span()));
            }
        }
        walk_node(self, node);
    }

    fn visit_goto(&mut self, node: &SyntaxNode) {
        self.gate(self.options.accept_goto, node.span(), "Goto statements");
        if let Some(name) = node.child_token(SyntaxKind::IdentifierToken) {
            if let Some(block) = self.functions.last_mut().and_then(|f| f.blocks.last_mut()) {
                block.gotos.push((name.text().to_string(), name.span()));
            }
        }
        walk_node(self, node);
    }

    fn operator_span(node: &SyntaxNode) -> Span {
        node.child_tokens()
            .next()
            .map_or(node.span(), |token| token.span())
    }
}

impl SyntaxWalker for Validator<'_> {
    fn visit_node(&mut self, node: &SyntaxNode) {
        use SyntaxKind as K;
        match node.kind() {
            K::Chunk => {
                self.enter_function(true);
                walk_node(self, node);
                self.exit_function();
            }
            K::Block => self.visit_block(node, false, vec![]),

            K::WhileStatement => self.visit_with_block(node, true, vec![]),
            K::NumericForStatement => {
                let locals = node
                    .child_node(K::IdentifierName)
                    .and_then(|name| name.child_token(K::IdentifierToken))
                    .map(|name| vec![Local::new(name.text(), false)])
                    .unwrap_or_default();
                self.visit_with_block(node, true, locals);
            }
            K::GenericForStatement => {
                let locals = node
                    .children()
                    .iter()
                    .take_while(|child| child.kind() != K::InKeyword)
                    .filter_map(|child| child.as_node())
                    .filter_map(|name| name.child_token(K::IdentifierToken))
                    .map(|name| Local::new(name.text(), false))
                    .collect();
                self.visit_with_block(node, true, locals);
            }
            K::RepeatUntilStatement => {
                // The condition sees the locals of the loop body.
                self.enter_block(true, vec![]);
                for child in node.children() {
                    match child.as_node() {
                        Some(block) if block.kind() == K::Block => walk_node(self, block),
                        _ => child.accept(self),
                    }
                }
                self.exit_block();
            }

            K::LocalFunctionDeclarationStatement => {
                if let Some(name) = node
                    .child_node(K::IdentifierName)
                    .and_then(|name| name.child_token(K::IdentifierToken))
                {
                    self.declare(Local::new(name.text(), false));
                }
                self.visit_function(node, false);
            }
            K::FunctionDeclarationStatement => {
                let name = node.child_nodes().next();
                if let Some(simple) = name.filter(|name| name.kind() == K::SimpleFunctionName) {
                    if let Some(token) = simple.child_token(K::IdentifierToken) {
                        self.check_assignment(token);
                    }
                }
                let is_method = name.is_some_and(|name| name.kind() == K::MethodFunctionName);
                self.visit_function(node, is_method);
            }
            K::AnonymousFunctionExpression => self.visit_function(node, false),

            K::LocalDeclarationStatement => self.visit_local_declaration(node),
            K::AssignmentStatement => {
                for target in node.child_nodes().filter(|n| n.kind() == K::IdentifierName) {
                    if let Some(token) = target.child_token(K::IdentifierToken) {
                        self.check_assignment(token);
                    }
                }
                walk_node(self, node);
            }

            K::BreakStatement => {
                let in_loop = self
                    .functions
                    .last()
                    .is_some_and(|function| function.blocks.iter().any(|block| block.is_loop));
                if !in_loop {
                    self.error(
                        DiagnosticCode::BreakOutsideLoop,
                        node.span(),
                        "break outside a loop".to_string(),
                    );
                }
                walk_node(self, node);
            }
            K::GotoStatement => self.visit_goto(node),
            K::GotoLabelStatement => self.visit_label(node),
            K::EmptyStatement => {
                self.gate(
                    self.options.accept_empty_statements,
                    node.span(),
                    "Empty statements",
                );
                walk_node(self, node);
            }

            K::VarArgExpression => {
                if !self.functions.last().is_some_and(|function| function.is_vararg) {
                    self.error(
                        DiagnosticCode::VarArgOutsideVarArgFunction,
                        node.span(),
                        "cannot use '...' outside a vararg function".to_string(),
                    );
                }
                walk_node(self, node);
            }

            K::BitwiseAndExpression
            | K::BitwiseOrExpression
            | K::ExclusiveOrExpression
            | K::LeftShiftExpression
            | K::RightShiftExpression
            | K::BitwiseNotExpression => {
                self.gate(
                    self.options.accept_bitwise_operators,
                    Self::operator_span(node),
                    "Bitwise operators",
                );
                walk_node(self, node);
            }
            K::FloorDivideExpression => {
                self.gate(
                    self.options.accept_floor_division,
                    Self::operator_span(node),
                    "Floor division operators",
                );
                walk_node(self, node);
            }

            _ => walk_node(self, node),
        }
    }

    fn visit_token(&mut self, token: &SyntaxToken) {
        if self.options.accept_goto
            && token.kind() == SyntaxKind::IdentifierToken
            && token.text() == "goto"
        {
            self.error(
                DiagnosticCode::ReservedWord,
                token.span(),
                "'goto' is a reserved word".to_string(),
            );
        }
        walk_token(self, token);
    }

    fn visit_trivia(&mut self, trivia: &SyntaxTrivia) {
        if trivia.kind() == SyntaxKind::ShebangTrivia {
            self.gate(self.options.accept_shebang, trivia.span(), "Shebangs");
        }
    }
}
