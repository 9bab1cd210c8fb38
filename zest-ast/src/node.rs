//! Typed wrappers for declaration, structure, and name nodes.

use zest_syntax::SyntaxKind;
use zest_syntax::SyntaxToken;

use crate::AstNode;
use crate::Expr;
use crate::SyntaxNode;
use crate::child;
use crate::children;
use crate::nth_child;
use crate::token;

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(
    /// The root of a parsed file: an optional namespace declaration,
    /// zero or more `use` imports, and a sequence of top-level items.
    Root => Root
);

impl Root {
    /// The file's namespace declaration, if it has one.
    pub fn namespace(&self) -> Option<NamespaceDecl> {
        child(&self.0)
    }

    /// The file's `use` import declarations, in source order.
    pub fn uses(&self) -> impl Iterator<Item = UseDecl> + '_ {
        children(&self.0)
    }

    /// The top-level class declarations in this file.
    pub fn classes(&self) -> impl Iterator<Item = ClassDecl> + '_ {
        children(&self.0)
    }

    /// The top-level interface declarations in this file.
    pub fn interfaces(&self) -> impl Iterator<Item = InterfaceDecl> + '_ {
        children(&self.0)
    }

    /// The top-level function declarations in this file.
    pub fn functions(&self) -> impl Iterator<Item = FunctionDecl> + '_ {
        children(&self.0)
    }

    /// The top-level (global) constant declarations in this file.
    pub fn consts(&self) -> impl Iterator<Item = ConstDecl> + '_ {
        children(&self.0)
    }

    /// The top-level statements in this file (script-style code outside
    /// any function or class).
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A `namespace foo\bar;` declaration.
    NamespaceDecl => NamespaceDecl
);

impl NamespaceDecl {
    /// The declared namespace name.
    pub fn name(&self) -> Option<QualifiedName> {
        child(&self.0)
    }
}

ast_node!(
    /// A `use foo\bar as baz;` import declaration.
    UseDecl => UseDecl
);

impl UseDecl {
    /// The imported name.
    pub fn name(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    /// The local alias introduced by an `as` clause, if present.
    pub fn alias(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }
}

ast_node!(
    /// A possibly-qualified, possibly namespace-rooted name, such as
    /// `\Foo\Bar` or `Bar`.
    QualifiedName => QualifiedName
);

impl QualifiedName {
    /// Whether the name starts with a leading `\`, anchoring it to the
    /// global namespace regardless of the current namespace or imports.
    pub fn is_rooted(&self) -> bool {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .next()
            .is_some_and(|t| t.kind() == SyntaxKind::Backslash)
    }

    /// The name's `\`-separated segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = String> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::Ident)
            .map(|t| t.text().to_string())
    }

    /// The name's full source text, including any leading `\`.
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

ast_node!(
    /// A class declaration.
    ClassDecl => ClassDecl
);

ast_node!(
    /// An interface declaration.
    InterfaceDecl => InterfaceDecl
);

macro_rules! class_like {
    ($name:ident) => {
        impl $name {
            /// The class or interface's simple (unqualified) name.
            pub fn name(&self) -> Option<SyntaxToken> {
                token(&self.0, SyntaxKind::Ident)
            }

            /// The names this type extends.
            pub fn extends(&self) -> impl Iterator<Item = QualifiedName> + '_ {
                children(&self.0)
            }

            /// The method declarations in this type's body.
            pub fn methods(&self) -> impl Iterator<Item = MethodDecl> + '_ {
                children(&self.0)
            }

            /// The property declarations in this type's body.
            pub fn properties(&self) -> impl Iterator<Item = PropertyDecl> + '_ {
                children(&self.0)
            }

            /// The class constant declarations in this type's body.
            pub fn consts(&self) -> impl Iterator<Item = ConstDecl> + '_ {
                children(&self.0)
            }
        }
    };
}

class_like!(ClassDecl);
class_like!(InterfaceDecl);

ast_node!(
    /// A top-level `function` declaration.
    FunctionDecl => FunctionDecl
);

ast_node!(
    /// A `function` declaration inside a class or interface body.
    MethodDecl => MethodDecl
);

macro_rules! function_like {
    ($name:ident) => {
        impl $name {
            /// The function or method's name.
            pub fn name(&self) -> Option<SyntaxToken> {
                token(&self.0, SyntaxKind::Ident)
            }

            /// The parameter list.
            pub fn params(&self) -> Option<ParamList> {
                child(&self.0)
            }

            /// The declared return type, if annotated.
            ///
            /// A `QualifiedName` that is a direct child (rather than
            /// nested inside the parameter list) can only be the return
            /// type annotation.
            pub fn return_type(&self) -> Option<QualifiedName> {
                child(&self.0)
            }

            /// The function or method body. Absent for interface method
            /// signatures and abstract methods.
            pub fn body(&self) -> Option<Block> {
                child(&self.0)
            }
        }
    };
}

function_like!(FunctionDecl);
function_like!(MethodDecl);

ast_node!(
    /// A property declaration inside a class body, e.g. `$name = "";`.
    PropertyDecl => PropertyDecl
);

impl PropertyDecl {
    /// The property's name (including its leading `$`).
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Variable)
    }

    /// The property's default-value expression, if any.
    pub fn default(&self) -> Option<Expr> {
        child(&self.0)
    }
}

ast_node!(
    /// A class constant declaration, e.g. `const FOO = 1;`.
    ConstDecl => ConstDecl
);

impl ConstDecl {
    /// The constant's name.
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    /// The constant's value expression.
    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

ast_node!(
    /// A parenthesized, comma-separated parameter list.
    ParamList => ParamList
);

impl ParamList {
    /// The parameters, in declaration order.
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A single parameter: an optional type hint, a name, and an
    /// optional default value.
    Param => Param
);

impl Param {
    /// The parameter's type hint, if annotated.
    pub fn ty(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    /// The parameter's name (including its leading `$`).
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Variable)
    }

    /// The parameter's default-value expression, if any.
    pub fn default(&self) -> Option<Expr> {
        child(&self.0)
    }
}

ast_node!(
    /// A brace-delimited sequence of statements.
    Block => Block
);

impl Block {
    /// The statements in this block, in order.
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A statement consisting of a bare expression followed by `;`.
    ExprStmt => ExprStmt
);

impl ExprStmt {
    /// The statement's expression.
    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }
}

ast_node!(
    /// A `return` statement.
    ReturnStmt => ReturnStmt
);

impl ReturnStmt {
    /// The returned expression, if any (`return;` has none).
    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }
}

/// A top-level or block-level statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    /// See [`ExprStmt`].
    Expr(ExprStmt),
    /// See [`ReturnStmt`].
    Return(ReturnStmt),
}

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::ExprStmt | SyntaxKind::ReturnStmt)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ExprStmt => Some(Self::Expr(ExprStmt(node))),
            SyntaxKind::ReturnStmt => Some(Self::Return(ReturnStmt(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Expr(it) => it.syntax(),
            Self::Return(it) => it.syntax(),
        }
    }
}

ast_node!(
    /// A parenthesized, comma-separated call argument list.
    ArgList => ArgList
);

impl ArgList {
    /// The arguments, in call order.
    pub fn args(&self) -> impl Iterator<Item = Arg> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A single call argument.
    Arg => Arg
);

impl Arg {
    /// The argument's expression.
    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }
}

ast_node!(
    /// The `use (...)` capture list of a closure expression.
    CaptureList => CaptureList
);

impl CaptureList {
    /// The captured variables, in order.
    pub fn items(&self) -> impl Iterator<Item = CaptureItem> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A single captured variable in a closure's `use (...)` clause.
    CaptureItem => CaptureItem
);

impl CaptureItem {
    /// The captured variable's name (including its leading `$`).
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Variable)
    }

    /// Whether the variable is captured by reference (`&$name`).
    pub fn by_ref(&self) -> bool {
        token(&self.0, SyntaxKind::Amp).is_some()
    }
}

pub(crate) fn nth_expr(parent: &SyntaxNode, n: usize) -> Option<Expr> {
    nth_child(parent, n)
}
