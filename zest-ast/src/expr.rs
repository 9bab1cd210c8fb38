//! Typed wrappers for expression nodes.

use zest_syntax::SyntaxKind;
use zest_syntax::SyntaxToken;

use crate::AstNode;
use crate::ArgList;
use crate::QualifiedName;
use crate::SyntaxNode;
use crate::child;
use crate::children;
use crate::node::nth_expr;
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

/// Any expression node kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// See [`VarExpr`].
    Var(VarExpr),
    /// See [`IntLitExpr`].
    IntLit(IntLitExpr),
    /// See [`FloatLitExpr`].
    FloatLit(FloatLitExpr),
    /// See [`StringLitExpr`].
    StringLit(StringLitExpr),
    /// See [`BoolLitExpr`].
    BoolLit(BoolLitExpr),
    /// See [`NullLitExpr`].
    NullLit(NullLitExpr),
    /// See [`NameExpr`].
    Name(NameExpr),
    /// See [`ParenExpr`].
    Paren(ParenExpr),
    /// See [`AssignExpr`].
    Assign(AssignExpr),
    /// See [`TernaryExpr`].
    Ternary(TernaryExpr),
    /// See [`ShortTernaryExpr`].
    ShortTernary(ShortTernaryExpr),
    /// See [`NullCoalesceExpr`].
    NullCoalesce(NullCoalesceExpr),
    /// See [`EqExpr`].
    Eq(EqExpr),
    /// See [`NotEqExpr`].
    NotEq(NotEqExpr),
    /// See [`IdenticalExpr`].
    Identical(IdenticalExpr),
    /// See [`NotIdenticalExpr`].
    NotIdentical(NotIdenticalExpr),
    /// See [`LtExpr`].
    Lt(LtExpr),
    /// See [`GtExpr`].
    Gt(GtExpr),
    /// See [`LeExpr`].
    Le(LeExpr),
    /// See [`GeExpr`].
    Ge(GeExpr),
    /// See [`AndExpr`].
    And(AndExpr),
    /// See [`OrExpr`].
    Or(OrExpr),
    /// See [`XorExpr`].
    Xor(XorExpr),
    /// See [`NotExpr`].
    Not(NotExpr),
    /// See [`NegExpr`].
    Neg(NegExpr),
    /// See [`ConcatExpr`].
    Concat(ConcatExpr),
    /// See [`AddExpr`].
    Add(AddExpr),
    /// See [`SubExpr`].
    Sub(SubExpr),
    /// See [`MulExpr`].
    Mul(MulExpr),
    /// See [`DivExpr`].
    Div(DivExpr),
    /// See [`ModExpr`].
    Mod(ModExpr),
    /// See [`PowExpr`].
    Pow(PowExpr),
    /// See [`CallExpr`].
    Call(CallExpr),
    /// See [`MethodCallExpr`].
    MethodCall(MethodCallExpr),
    /// See [`PropertyFetchExpr`].
    PropertyFetch(PropertyFetchExpr),
    /// See [`StaticCallExpr`].
    StaticCall(StaticCallExpr),
    /// See [`StaticPropertyFetchExpr`].
    StaticPropertyFetch(StaticPropertyFetchExpr),
    /// See [`ClassConstFetchExpr`].
    ClassConstFetch(ClassConstFetchExpr),
    /// See [`NewExpr`].
    New(NewExpr),
    /// See [`AnonClassExpr`].
    AnonClass(AnonClassExpr),
    /// See [`CloneExpr`].
    Clone(CloneExpr),
    /// See [`InstanceofExpr`].
    Instanceof(InstanceofExpr),
    /// See [`EmptyExpr`].
    Empty(EmptyExpr),
    /// See [`IssetExpr`].
    Isset(IssetExpr),
    /// See [`CastExpr`].
    Cast(CastExpr),
    /// See [`IncludeExpr`].
    Include(IncludeExpr),
    /// See [`ArrayLiteralExpr`].
    ArrayLiteral(ArrayLiteralExpr),
    /// See [`IndexExpr`].
    Index(IndexExpr),
    /// See [`ClosureExpr`].
    Closure(ClosureExpr),
}

macro_rules! expr_enum {
    ($($variant:ident($kind:ident)),* $(,)?) => {
        impl AstNode for Expr {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|*)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                match node.kind() {
                    $(SyntaxKind::$kind => Some(Self::$variant($kind(node))),)*
                    _ => None,
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(it) => it.syntax(),)*
                }
            }
        }
    };
}

expr_enum! {
    Var(VarExpr),
    IntLit(IntLitExpr),
    FloatLit(FloatLitExpr),
    StringLit(StringLitExpr),
    BoolLit(BoolLitExpr),
    NullLit(NullLitExpr),
    Name(NameExpr),
    Paren(ParenExpr),
    Assign(AssignExpr),
    Ternary(TernaryExpr),
    ShortTernary(ShortTernaryExpr),
    NullCoalesce(NullCoalesceExpr),
    Eq(EqExpr),
    NotEq(NotEqExpr),
    Identical(IdenticalExpr),
    NotIdentical(NotIdenticalExpr),
    Lt(LtExpr),
    Gt(GtExpr),
    Le(LeExpr),
    Ge(GeExpr),
    And(AndExpr),
    Or(OrExpr),
    Xor(XorExpr),
    Not(NotExpr),
    Neg(NegExpr),
    Concat(ConcatExpr),
    Add(AddExpr),
    Sub(SubExpr),
    Mul(MulExpr),
    Div(DivExpr),
    Mod(ModExpr),
    Pow(PowExpr),
    Call(CallExpr),
    MethodCall(MethodCallExpr),
    PropertyFetch(PropertyFetchExpr),
    StaticCall(StaticCallExpr),
    StaticPropertyFetch(StaticPropertyFetchExpr),
    ClassConstFetch(ClassConstFetchExpr),
    New(NewExpr),
    AnonClass(AnonClassExpr),
    Clone(CloneExpr),
    Instanceof(InstanceofExpr),
    Empty(EmptyExpr),
    Isset(IssetExpr),
    Cast(CastExpr),
    Include(IncludeExpr),
    ArrayLiteral(ArrayLiteralExpr),
    Index(IndexExpr),
    Closure(ClosureExpr),
}

ast_node!(
    /// A variable reference, e.g. `$x`.
    VarExpr => VarExpr
);

impl VarExpr {
    /// The variable's name, without its leading `$`.
    pub fn name(&self) -> Option<String> {
        token(&self.0, SyntaxKind::Variable).map(|t| t.text()[1..].to_string())
    }
}

ast_node!(
    /// An integer literal.
    IntLitExpr => IntLitExpr
);

ast_node!(
    /// A floating-point literal.
    FloatLitExpr => FloatLitExpr
);

ast_node!(
    /// A string literal.
    StringLitExpr => StringLitExpr
);

impl StringLitExpr {
    /// The literal's value with its surrounding quotes removed.
    pub fn value(&self) -> String {
        let text = self.0.text().to_string();
        text.get(1..text.len().saturating_sub(1))
            .unwrap_or_default()
            .to_string()
    }
}

ast_node!(
    /// A `true` or `false` literal.
    BoolLitExpr => BoolLitExpr
);

impl BoolLitExpr {
    /// The literal's boolean value.
    pub fn value(&self) -> bool {
        self.0.text().to_string() == "true"
    }
}

ast_node!(
    /// A `null` literal.
    NullLitExpr => NullLitExpr
);

ast_node!(
    /// A bare name: a function call's callee before the `(...)`, a bare
    /// constant reference, or a type name used as a value.
    NameExpr => NameExpr
);

impl NameExpr {
    /// The referenced name.
    pub fn name(&self) -> Option<QualifiedName> {
        child(&self.0)
    }
}

ast_node!(
    /// A parenthesized expression.
    ParenExpr => ParenExpr
);

impl ParenExpr {
    /// The parenthesized inner expression.
    pub fn inner(&self) -> Option<Expr> {
        child(&self.0)
    }
}

macro_rules! binary_expr {
    ($name:ident) => {
        ast_node!(
            /// A binary expression.
            $name => $name
        );

        impl $name {
            /// The left-hand operand.
            pub fn lhs(&self) -> Option<Expr> {
                nth_expr(&self.0, 0)
            }

            /// The right-hand operand.
            pub fn rhs(&self) -> Option<Expr> {
                nth_expr(&self.0, 1)
            }
        }
    };
}

binary_expr!(AssignExpr);
binary_expr!(NullCoalesceExpr);
binary_expr!(EqExpr);
binary_expr!(NotEqExpr);
binary_expr!(IdenticalExpr);
binary_expr!(NotIdenticalExpr);
binary_expr!(LtExpr);
binary_expr!(GtExpr);
binary_expr!(LeExpr);
binary_expr!(GeExpr);
binary_expr!(AndExpr);
binary_expr!(OrExpr);
binary_expr!(XorExpr);
binary_expr!(ConcatExpr);
binary_expr!(AddExpr);
binary_expr!(SubExpr);
binary_expr!(MulExpr);
binary_expr!(DivExpr);
binary_expr!(ModExpr);
binary_expr!(PowExpr);

ast_node!(
    /// A short-circuit ternary, `cond ? then : else`.
    TernaryExpr => TernaryExpr
);

impl TernaryExpr {
    /// The condition.
    pub fn condition(&self) -> Option<Expr> {
        nth_expr(&self.0, 0)
    }

    /// The expression evaluated when the condition is truthy.
    pub fn then_branch(&self) -> Option<Expr> {
        nth_expr(&self.0, 1)
    }

    /// The expression evaluated when the condition is falsy.
    pub fn else_branch(&self) -> Option<Expr> {
        nth_expr(&self.0, 2)
    }
}

ast_node!(
    /// The Elvis operator, `cond ?: else`.
    ShortTernaryExpr => ShortTernaryExpr
);

impl ShortTernaryExpr {
    /// The condition, which also supplies the truthy result.
    pub fn condition(&self) -> Option<Expr> {
        nth_expr(&self.0, 0)
    }

    /// The expression evaluated when the condition is falsy.
    pub fn else_branch(&self) -> Option<Expr> {
        nth_expr(&self.0, 1)
    }
}

macro_rules! unary_expr {
    ($name:ident) => {
        ast_node!(
            /// A unary expression.
            $name => $name
        );

        impl $name {
            /// The operand.
            pub fn operand(&self) -> Option<Expr> {
                child(&self.0)
            }
        }
    };
}

unary_expr!(NotExpr);
unary_expr!(NegExpr);
unary_expr!(CloneExpr);
unary_expr!(IncludeExpr);

ast_node!(
    /// A function call, e.g. `foo(1, 2)`.
    CallExpr => CallExpr
);

impl CallExpr {
    /// The called function's name.
    pub fn callee(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    /// The call's arguments.
    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }
}

ast_node!(
    /// An instance method call, e.g. `$obj->method(1)`.
    MethodCallExpr => MethodCallExpr
);

impl MethodCallExpr {
    /// The receiver expression.
    pub fn receiver(&self) -> Option<Expr> {
        child(&self.0)
    }

    /// The called method's name.
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    /// The call's arguments.
    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }
}

ast_node!(
    /// An instance property fetch, e.g. `$obj->name`.
    PropertyFetchExpr => PropertyFetchExpr
);

impl PropertyFetchExpr {
    /// The receiver expression.
    pub fn receiver(&self) -> Option<Expr> {
        child(&self.0)
    }

    /// The fetched property's name.
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }
}

ast_node!(
    /// A static method call, e.g. `Foo::bar(1)`.
    StaticCallExpr => StaticCallExpr
);

impl StaticCallExpr {
    /// The class name.
    pub fn class(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    /// The called method's name.
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    /// The call's arguments.
    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }
}

ast_node!(
    /// A static property fetch, e.g. `Foo::$bar`.
    StaticPropertyFetchExpr => StaticPropertyFetchExpr
);

impl StaticPropertyFetchExpr {
    /// The class name.
    pub fn class(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    /// The fetched property's name, without its leading `$`.
    pub fn name(&self) -> Option<String> {
        token(&self.0, SyntaxKind::Variable).map(|t| t.text()[1..].to_string())
    }
}

ast_node!(
    /// A class constant fetch, e.g. `Foo::BAR`.
    ClassConstFetchExpr => ClassConstFetchExpr
);

impl ClassConstFetchExpr {
    /// The class name.
    pub fn class(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    /// The fetched constant's name.
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }
}

ast_node!(
    /// A `new` expression instantiating a named class.
    NewExpr => NewExpr
);

impl NewExpr {
    /// The instantiated class's name, for a statically named `new`.
    pub fn class(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    /// The expression naming the class, for `new $expr(...)`.
    pub fn class_expr(&self) -> Option<Expr> {
        nth_expr(&self.0, 0)
    }

    /// The constructor's arguments.
    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }
}

ast_node!(
    /// A `new class { ... }` anonymous class expression.
    AnonClassExpr => AnonClassExpr
);

impl AnonClassExpr {
    /// The constructor's arguments.
    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }
}

ast_node!(
    /// An `instanceof` expression.
    InstanceofExpr => InstanceofExpr
);

impl InstanceofExpr {
    /// The tested expression.
    pub fn expr(&self) -> Option<Expr> {
        nth_expr(&self.0, 0)
    }

    /// The statically named class tested against, if not dynamic.
    pub fn class(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    /// The expression naming the class, for `$x instanceof $cls`.
    pub fn class_expr(&self) -> Option<Expr> {
        nth_expr(&self.0, 1)
    }
}

ast_node!(
    /// An `empty(...)` expression.
    EmptyExpr => EmptyExpr
);

impl EmptyExpr {
    /// The tested expression.
    pub fn operand(&self) -> Option<Expr> {
        child(&self.0)
    }
}

ast_node!(
    /// An `isset(...)` expression.
    IssetExpr => IssetExpr
);

impl IssetExpr {
    /// The tested expressions.
    pub fn operands(&self) -> impl Iterator<Item = Expr> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A `(type) expr` cast expression.
    CastExpr => CastExpr
);

impl CastExpr {
    /// The target type's name, as written (`int`, `float`, `string`,
    /// `bool`, `array`, or `object`).
    pub fn type_name(&self) -> Option<String> {
        token(&self.0, SyntaxKind::Ident).map(|t| t.text().to_string())
    }

    /// The casted expression.
    pub fn operand(&self) -> Option<Expr> {
        child(&self.0)
    }
}

ast_node!(
    /// An array literal, e.g. `[1, "k" => 2]`.
    ArrayLiteralExpr => ArrayLiteralExpr
);

impl ArrayLiteralExpr {
    /// The array's items, in order.
    pub fn items(&self) -> impl Iterator<Item = ArrayItem> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A single element of an array literal.
    ArrayItem => ArrayItem
);

impl ArrayItem {
    /// The item's explicit key, for `key => value` items.
    pub fn key(&self) -> Option<Expr> {
        let mut exprs = self.0.children().filter_map(Expr::cast);
        let first = exprs.next();
        let second = exprs.next();
        if second.is_some() { first } else { None }
    }

    /// The item's value.
    pub fn value(&self) -> Option<Expr> {
        let mut exprs = self.0.children().filter_map(Expr::cast);
        let first = exprs.next();
        let second = exprs.next();
        second.or(first)
    }
}

ast_node!(
    /// An array (or offset-capable) index expression, e.g. `$a[0]`.
    IndexExpr => IndexExpr
);

impl IndexExpr {
    /// The indexed expression.
    pub fn base(&self) -> Option<Expr> {
        nth_expr(&self.0, 0)
    }

    /// The index expression. Absent for the append form `$a[]`.
    pub fn index(&self) -> Option<Expr> {
        nth_expr(&self.0, 1)
    }
}

ast_node!(
    /// An anonymous function expression.
    ClosureExpr => ClosureExpr
);

impl ClosureExpr {
    /// The closure's parameter list.
    pub fn params(&self) -> Option<crate::ParamList> {
        child(&self.0)
    }

    /// The closure's `use (...)` capture list, if any.
    pub fn captures(&self) -> Option<crate::CaptureList> {
        child(&self.0)
    }

    /// The closure's declared return type, if annotated.
    pub fn return_type(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    /// The closure's body.
    pub fn body(&self) -> Option<crate::Block> {
        child(&self.0)
    }
}
