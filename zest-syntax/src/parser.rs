//! A recursive-descent parser producing a [`rowan`] concrete syntax tree.
//!
//! The grammar implemented here is deliberately small: it covers every
//! expression and declaration shape the analysis core's dispatch tables
//! need to exercise, not the full surface grammar of a production
//! language. Unparseable input still yields a tree (errors are collected
//! alongside it), matching the "tolerate errors, partial trees acceptable"
//! contract of the parser collaborator.

use rowan::GreenNode;
use rowan::GreenNodeBuilder;
use rowan::Checkpoint;
use rowan::TextRange;

use crate::SyntaxKind;
use crate::SyntaxKind::*;
use crate::SyntaxNode;
use crate::lexer::lex;

/// The result of parsing a source file: a CST root plus any diagnostics
/// encountered while recovering from malformed input.
#[derive(Debug)]
pub struct Parse {
    green: GreenNode,
    /// Human-readable parse error messages, in source order.
    pub errors: Vec<String>,
}

impl Parse {
    /// Returns the root [`SyntaxNode`] of the parsed tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }
}

/// Parses `source` into a concrete syntax tree.
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        builder: GreenNodeBuilder::new(),
        errors: Vec::new(),
    };
    parser.parse_root();
    Parse {
        green: parser.builder.finish(),
        errors: parser.errors,
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(SyntaxKind, TextRange)>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<String>,
}

const CAST_TYPES: &[&str] = &["int", "float", "string", "bool", "array", "object"];

impl<'a> Parser<'a> {
    // -- token stream helpers -------------------------------------------------

    /// The `n`-th non-trivia token ahead of the cursor, without consuming.
    fn significant_nth(&self, n: usize) -> Option<(SyntaxKind, TextRange)> {
        let mut skipped = 0;
        let mut i = self.pos;
        while i < self.tokens.len() {
            let (kind, range) = self.tokens[i];
            if kind.is_trivia() {
                i += 1;
                continue;
            }
            if skipped == n {
                return Some((kind, range));
            }
            skipped += 1;
            i += 1;
        }
        None
    }

    fn current(&self) -> Option<SyntaxKind> {
        self.significant_nth(0).map(|(k, _)| k)
    }

    fn nth_text(&self, n: usize) -> Option<&'a str> {
        self.significant_nth(n).map(|(_, r)| &self.source[r])
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.current().is_none()
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.bump_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.bump_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Pushes any pending whitespace/comment tokens straight into the tree.
    fn bump_trivia(&mut self) {
        while let Some(&(kind, range)) = self.tokens.get(self.pos) {
            if !kind.is_trivia() {
                break;
            }
            self.builder.token(kind.into(), &self.source[range]);
            self.pos += 1;
        }
    }

    /// Consumes and appends the current significant token, returning its
    /// kind. Panics if called at end of input; callers must check `at_eof`
    /// or a specific `at(..)` first.
    fn bump(&mut self) -> SyntaxKind {
        self.bump_trivia();
        let (kind, range) = self.tokens[self.pos];
        self.builder.token(kind.into(), &self.source[range]);
        self.pos += 1;
        kind
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) {
        if !self.eat(kind) {
            self.errors.push(format!(
                "expected {kind:?}, found {:?}",
                self.current()
            ));
        }
    }

    // -- declarations -----------------------------------------------------

    fn parse_root(&mut self) {
        // Not `self.start_node`: that flushes pending trivia before opening
        // the node, but at the very start of the file there's no node open
        // yet to flush it into. Leading trivia is instead picked up as
        // Root's first children by the first `start_node`/`bump` call below.
        self.builder.start_node(Root.into());
        while !self.at_eof() {
            self.parse_top_level_item();
        }
        self.bump_trivia();
        self.finish_node();
    }

    fn parse_top_level_item(&mut self) {
        match self.current() {
            Some(NamespaceKw) => self.parse_namespace_decl(),
            Some(UseKw) => self.parse_use_decl(),
            Some(ClassKw) => self.parse_class_like(ClassDecl),
            Some(InterfaceKw) => self.parse_class_like(InterfaceDecl),
            Some(FunctionKw) => self.parse_function_decl(),
            Some(ConstKw) => self.parse_const_decl(),
            _ => self.parse_stmt(),
        }
    }

    fn parse_namespace_decl(&mut self) {
        self.start_node(NamespaceDecl);
        self.bump();
        self.parse_qualified_name();
        self.expect(Semicolon);
        self.finish_node();
    }

    fn parse_use_decl(&mut self) {
        self.start_node(UseDecl);
        self.bump();
        self.parse_qualified_name();
        if self.eat(AsKw) {
            self.expect(Ident);
        }
        self.expect(Semicolon);
        self.finish_node();
    }

    fn parse_qualified_name(&mut self) {
        self.start_node(QualifiedName);
        self.eat(Backslash);
        self.expect(Ident);
        while self.at(Backslash) {
            self.bump();
            self.expect(Ident);
        }
        self.finish_node();
    }

    fn parse_class_like(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump(); // class | interface
        self.expect(Ident);
        if self.eat(ExtendsKw) {
            self.parse_qualified_name();
            while self.eat(Comma) {
                self.parse_qualified_name();
            }
        }
        if self.eat(ImplementsKw) {
            self.parse_qualified_name();
            while self.eat(Comma) {
                self.parse_qualified_name();
            }
        }
        self.expect(LBrace);
        while !self.at(RBrace) && !self.at_eof() {
            self.parse_class_member();
        }
        self.expect(RBrace);
        self.finish_node();
    }

    fn parse_class_member(&mut self) {
        // Visibility/staticness modifiers are insignificant to the
        // analysis core beyond having been consumed.
        while matches!(
            self.current(),
            Some(PublicKw) | Some(PrivateKw) | Some(ProtectedKw) | Some(StaticKw)
        ) {
            self.bump();
        }

        match self.current() {
            Some(ConstKw) => self.parse_const_decl(),
            Some(FunctionKw) => self.parse_method_decl(),
            Some(Variable) => self.parse_property_decl(),
            _ => {
                self.errors.push(format!(
                    "unexpected token in class body: {:?}",
                    self.current()
                ));
                if !self.at_eof() {
                    self.bump();
                }
            }
        }
    }

    fn parse_const_decl(&mut self) {
        self.start_node(ConstDecl);
        self.bump();
        self.expect(Ident);
        self.expect(Eq);
        self.parse_expr();
        self.expect(Semicolon);
        self.finish_node();
    }

    fn parse_property_decl(&mut self) {
        self.start_node(PropertyDecl);
        self.expect(Variable);
        if self.eat(Eq) {
            self.parse_expr();
        }
        self.expect(Semicolon);
        self.finish_node();
    }

    fn parse_method_decl(&mut self) {
        self.start_node(MethodDecl);
        self.bump();
        self.expect(Ident);
        self.parse_param_list();
        if self.eat(Colon) {
            self.parse_qualified_name();
        }
        if self.at(LBrace) {
            self.parse_block();
        } else {
            self.expect(Semicolon);
        }
        self.finish_node();
    }

    fn parse_function_decl(&mut self) {
        self.start_node(FunctionDecl);
        self.bump();
        self.expect(Ident);
        self.parse_param_list();
        if self.eat(Colon) {
            self.parse_qualified_name();
        }
        self.parse_block();
        self.finish_node();
    }

    fn parse_param_list(&mut self) {
        self.start_node(ParamList);
        self.expect(LParen);
        while !self.at(RParen) && !self.at_eof() {
            self.parse_param();
            if !self.eat(Comma) {
                break;
            }
        }
        self.expect(RParen);
        self.finish_node();
    }

    fn parse_param(&mut self) {
        self.start_node(Param);
        if self.at(Ident) || self.at(Backslash) {
            self.parse_qualified_name();
        }
        self.expect(Variable);
        if self.eat(Eq) {
            self.parse_expr();
        }
        self.finish_node();
    }

    fn parse_block(&mut self) {
        self.start_node(Block);
        self.expect(LBrace);
        while !self.at(RBrace) && !self.at_eof() {
            self.parse_stmt();
        }
        self.expect(RBrace);
        self.finish_node();
    }

    fn parse_stmt(&mut self) {
        match self.current() {
            Some(ReturnKw) => {
                self.start_node(ReturnStmt);
                self.bump();
                if !self.at(Semicolon) {
                    self.parse_expr();
                }
                self.expect(Semicolon);
                self.finish_node();
            }
            None => {}
            _ => {
                self.start_node(ExprStmt);
                self.parse_expr();
                self.expect(Semicolon);
                self.finish_node();
            }
        }
    }

    // -- expressions --------------------------------------------------------

    fn parse_expr(&mut self) {
        self.parse_assignment();
    }

    fn parse_assignment(&mut self) {
        let cp = self.checkpoint();
        self.parse_ternary();
        if self.eat(Eq) {
            self.parse_assignment();
            self.start_node_at(cp, AssignExpr);
            self.finish_node();
        }
    }

    fn parse_ternary(&mut self) {
        let cp = self.checkpoint();
        self.parse_null_coalesce();
        if self.eat(QuestionColon) {
            self.parse_ternary();
            self.start_node_at(cp, ShortTernaryExpr);
            self.finish_node();
            return;
        }
        if self.eat(Question) {
            if self.eat(Colon) {
                self.parse_ternary();
                self.start_node_at(cp, ShortTernaryExpr);
                self.finish_node();
                return;
            }
            self.parse_expr();
            self.expect(Colon);
            self.parse_ternary();
            self.start_node_at(cp, TernaryExpr);
            self.finish_node();
        }
    }

    fn parse_null_coalesce(&mut self) {
        let cp = self.checkpoint();
        self.parse_logical_or();
        if self.eat(QuestionQuestion) {
            self.parse_null_coalesce();
            self.start_node_at(cp, NullCoalesceExpr);
            self.finish_node();
        }
    }

    fn parse_logical_or(&mut self) {
        let mut cp = self.checkpoint();
        self.parse_logical_and();
        while matches!(self.current(), Some(PipePipe) | Some(OrKw)) {
            self.bump();
            self.parse_logical_and();
            self.start_node_at(cp, OrExpr);
            self.finish_node();
            cp = self.checkpoint();
        }
    }

    fn parse_logical_and(&mut self) {
        let mut cp = self.checkpoint();
        self.parse_logical_xor();
        while matches!(self.current(), Some(AmpAmp) | Some(AndKw)) {
            self.bump();
            self.parse_logical_xor();
            self.start_node_at(cp, AndExpr);
            self.finish_node();
            cp = self.checkpoint();
        }
    }

    fn parse_logical_xor(&mut self) {
        let mut cp = self.checkpoint();
        self.parse_equality();
        while self.at(XorKw) {
            self.bump();
            self.parse_equality();
            self.start_node_at(cp, XorExpr);
            self.finish_node();
            cp = self.checkpoint();
        }
    }

    fn parse_equality(&mut self) {
        let mut cp = self.checkpoint();
        self.parse_relational();
        loop {
            let kind = match self.current() {
                Some(EqEq) => EqExpr,
                Some(NotEq) => NotEqExpr,
                Some(EqEqEq) => IdenticalExpr,
                Some(NotEqEq) => NotIdenticalExpr,
                _ => break,
            };
            self.bump();
            self.parse_relational();
            self.start_node_at(cp, kind);
            self.finish_node();
            cp = self.checkpoint();
        }
    }

    fn parse_relational(&mut self) {
        let mut cp = self.checkpoint();
        self.parse_concat();
        loop {
            let kind = match self.current() {
                Some(Lt) => LtExpr,
                Some(Gt) => GtExpr,
                Some(LtEq) => LeExpr,
                Some(GtEq) => GeExpr,
                _ => break,
            };
            self.bump();
            self.parse_concat();
            self.start_node_at(cp, kind);
            self.finish_node();
            cp = self.checkpoint();
        }
    }

    fn parse_concat(&mut self) {
        let mut cp = self.checkpoint();
        self.parse_additive();
        while self.at(Dot) {
            self.bump();
            self.parse_additive();
            self.start_node_at(cp, ConcatExpr);
            self.finish_node();
            cp = self.checkpoint();
        }
    }

    fn parse_additive(&mut self) {
        let mut cp = self.checkpoint();
        self.parse_multiplicative();
        loop {
            let kind = match self.current() {
                Some(Plus) => AddExpr,
                Some(Minus) => SubExpr,
                _ => break,
            };
            self.bump();
            self.parse_multiplicative();
            self.start_node_at(cp, kind);
            self.finish_node();
            cp = self.checkpoint();
        }
    }

    fn parse_multiplicative(&mut self) {
        let mut cp = self.checkpoint();
        self.parse_power();
        loop {
            let kind = match self.current() {
                Some(Star) => MulExpr,
                Some(Slash) => DivExpr,
                Some(Percent) => ModExpr,
                _ => break,
            };
            self.bump();
            self.parse_power();
            self.start_node_at(cp, kind);
            self.finish_node();
            cp = self.checkpoint();
        }
    }

    fn parse_power(&mut self) {
        let cp = self.checkpoint();
        self.parse_instanceof();
        if self.eat(StarStar) {
            // Right-associative.
            self.parse_power();
            self.start_node_at(cp, PowExpr);
            self.finish_node();
        }
    }

    fn parse_instanceof(&mut self) {
        let cp = self.checkpoint();
        self.parse_unary();
        while self.eat(InstanceofKw) {
            if self.at(Ident) || self.at(Backslash) {
                self.parse_qualified_name();
            } else {
                self.parse_unary();
            }
            self.start_node_at(cp, InstanceofExpr);
            self.finish_node();
        }
    }

    fn parse_unary(&mut self) {
        match self.current() {
            Some(Bang) => {
                let cp = self.checkpoint();
                self.bump();
                self.parse_unary();
                self.start_node_at(cp, NotExpr);
                self.finish_node();
            }
            Some(Minus) => {
                let cp = self.checkpoint();
                self.bump();
                self.parse_unary();
                self.start_node_at(cp, NegExpr);
                self.finish_node();
            }
            Some(CloneKw) => {
                let cp = self.checkpoint();
                self.bump();
                self.parse_unary();
                self.start_node_at(cp, CloneExpr);
                self.finish_node();
            }
            Some(IncludeKw) | Some(RequireKw) => {
                let cp = self.checkpoint();
                self.bump();
                self.parse_expr();
                self.start_node_at(cp, IncludeExpr);
                self.finish_node();
            }
            Some(EmptyKw) => {
                let cp = self.checkpoint();
                self.bump();
                self.expect(LParen);
                self.parse_expr();
                self.expect(RParen);
                self.start_node_at(cp, EmptyExpr);
                self.finish_node();
            }
            Some(IssetKw) => {
                let cp = self.checkpoint();
                self.bump();
                self.expect(LParen);
                self.parse_expr();
                while self.eat(Comma) {
                    self.parse_expr();
                }
                self.expect(RParen);
                self.start_node_at(cp, IssetExpr);
                self.finish_node();
            }
            Some(LParen) if self.looks_like_cast() => {
                let cp = self.checkpoint();
                self.bump(); // (
                self.bump(); // type ident
                self.bump(); // )
                self.parse_unary();
                self.start_node_at(cp, CastExpr);
                self.finish_node();
            }
            Some(NewKw) => self.parse_new_expr(),
            _ => self.parse_postfix(),
        }
    }

    fn looks_like_cast(&self) -> bool {
        matches!(self.significant_nth(0), Some((LParen, _)))
            && matches!(self.significant_nth(1), Some((Ident, _)))
            && matches!(self.significant_nth(2), Some((RParen, _)))
            && self
                .nth_text(1)
                .is_some_and(|text| CAST_TYPES.contains(&text))
    }

    fn parse_new_expr(&mut self) {
        let cp = self.checkpoint();
        self.bump(); // new
        if self.at(ClassKw) {
            self.bump();
            if self.at(LParen) {
                self.parse_arg_list();
            }
            if self.at(LBrace) {
                self.parse_class_body_items();
            }
            self.start_node_at(cp, AnonClassExpr);
            self.finish_node();
            return;
        }
        if self.at(Variable) {
            self.parse_postfix();
        } else {
            self.parse_qualified_name();
        }
        if self.at(LParen) {
            self.parse_arg_list();
        }
        self.start_node_at(cp, NewExpr);
        self.finish_node();
    }

    /// Parses the body of an anonymous class declaration in place (no
    /// extends/implements clause support, matching `new class { ... }`'s
    /// minimal form in the dispatch table).
    fn parse_class_body_items(&mut self) {
        self.expect(LBrace);
        while !self.at(RBrace) && !self.at_eof() {
            self.parse_class_member();
        }
        self.expect(RBrace);
    }

    fn parse_postfix(&mut self) {
        let mut cp = self.checkpoint();
        self.parse_primary();
        loop {
            if self.eat(Arrow) {
                self.expect(Ident);
                let is_call = self.at(LParen);
                if is_call {
                    self.parse_arg_list();
                }
                self.start_node_at(cp, if is_call { MethodCallExpr } else { PropertyFetchExpr });
                self.finish_node();
                cp = self.checkpoint();
                continue;
            }
            if self.eat(LBracket) {
                if !self.at(RBracket) {
                    self.parse_expr();
                }
                self.expect(RBracket);
                self.start_node_at(cp, IndexExpr);
                self.finish_node();
                cp = self.checkpoint();
                continue;
            }
            break;
        }
    }

    fn parse_primary(&mut self) {
        match self.current() {
            Some(IntLit) => self.leaf(IntLitExpr),
            Some(FloatLit) => self.leaf(FloatLitExpr),
            Some(StringLit) => self.leaf(StringLitExpr),
            Some(TrueKw) | Some(FalseKw) => self.leaf(BoolLitExpr),
            Some(NullKw) => self.leaf(NullLitExpr),
            Some(Variable) => self.leaf(VarExpr),
            Some(LParen) => {
                self.start_node(ParenExpr);
                self.bump();
                self.parse_expr();
                self.expect(RParen);
                self.finish_node();
            }
            Some(LBracket) => self.parse_array_literal(),
            Some(FunctionKw) => self.parse_closure_expr(),
            Some(Ident) | Some(Backslash) => self.parse_name_expr(),
            other => {
                self.errors
                    .push(format!("expected an expression, found {other:?}"));
                if !self.at_eof() {
                    self.start_node(NameExpr);
                    self.bump();
                    self.finish_node();
                }
            }
        }
    }

    fn leaf(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    fn parse_name_expr(&mut self) {
        let cp = self.checkpoint();
        self.parse_qualified_name();
        if self.eat(ColonColon) {
            if self.at(Variable) {
                self.bump();
                self.start_node_at(cp, StaticPropertyFetchExpr);
                self.finish_node();
                return;
            }
            self.expect(Ident);
            let is_call = self.at(LParen);
            if is_call {
                self.parse_arg_list();
            }
            self.start_node_at(
                cp,
                if is_call {
                    StaticCallExpr
                } else {
                    ClassConstFetchExpr
                },
            );
            self.finish_node();
            return;
        }
        if self.at(LParen) {
            self.parse_arg_list();
            self.start_node_at(cp, CallExpr);
            self.finish_node();
            return;
        }
        self.start_node_at(cp, NameExpr);
        self.finish_node();
    }

    fn parse_arg_list(&mut self) {
        self.start_node(ArgList);
        self.expect(LParen);
        while !self.at(RParen) && !self.at_eof() {
            self.start_node(Arg);
            self.parse_expr();
            self.finish_node();
            if !self.eat(Comma) {
                break;
            }
        }
        self.expect(RParen);
        self.finish_node();
    }

    fn parse_array_literal(&mut self) {
        self.start_node(ArrayLiteralExpr);
        self.expect(LBracket);
        while !self.at(RBracket) && !self.at_eof() {
            self.start_node(ArrayItem);
            self.parse_expr();
            if self.eat(FatArrow) {
                self.parse_expr();
            }
            self.finish_node();
            if !self.eat(Comma) {
                break;
            }
        }
        self.expect(RBracket);
        self.finish_node();
    }

    fn parse_closure_expr(&mut self) {
        self.start_node(ClosureExpr);
        self.bump(); // function
        self.eat(Amp); // by-ref return, ignored
        self.parse_param_list();
        if self.eat(UseKw) {
            self.start_node(CaptureList);
            self.expect(LParen);
            while !self.at(RParen) && !self.at_eof() {
                self.start_node(CaptureItem);
                self.eat(Amp);
                self.expect(Variable);
                self.finish_node();
                if !self.eat(Comma) {
                    break;
                }
            }
            self.expect(RParen);
            self.finish_node();
        }
        if self.eat(Colon) {
            self.parse_qualified_name();
        }
        self.parse_block();
        self.finish_node();
    }
}
