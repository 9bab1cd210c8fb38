//! The kinds of tokens and nodes that make up a Zest concrete syntax tree.

/// Every kind of token or node that can appear in a Zest concrete syntax
/// tree.
///
/// This is a single flat enum (rather than separate token/node enums)
/// because `rowan` represents both in one `u16`-keyed kind space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    // Trivia.
    Whitespace,
    Comment,

    // Literals and identifiers.
    IntLit,
    FloatLit,
    StringLit,
    TrueKw,
    FalseKw,
    NullKw,
    Variable,
    Ident,

    // Keywords.
    NamespaceKw,
    UseKw,
    AsKw,
    ClassKw,
    InterfaceKw,
    ExtendsKw,
    ImplementsKw,
    FunctionKw,
    PublicKw,
    PrivateKw,
    ProtectedKw,
    StaticKw,
    ConstKw,
    NewKw,
    CloneKw,
    InstanceofKw,
    EmptyKw,
    IssetKw,
    IncludeKw,
    RequireKw,
    ReturnKw,
    AndKw,
    OrKw,
    XorKw,

    // Punctuation and operators.
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Colon,
    ColonColon,
    Arrow,
    FatArrow,
    Backslash,
    Dot,
    Amp,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    Eq,
    EqEq,
    EqEqEq,
    NotEq,
    NotEqEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AmpAmp,
    PipePipe,
    Bang,
    Question,
    QuestionQuestion,
    QuestionColon,
    Dollar,

    // Error/unknown token.
    Error,

    // Nodes: structure.
    Root,
    NamespaceDecl,
    UseDecl,
    ClassDecl,
    InterfaceDecl,
    FunctionDecl,
    MethodDecl,
    PropertyDecl,
    ConstDecl,
    ParamList,
    Param,
    Block,
    ExprStmt,
    ReturnStmt,
    QualifiedName,
    ArgList,
    Arg,
    CaptureList,
    CaptureItem,

    // Nodes: expressions.
    VarExpr,
    IntLitExpr,
    FloatLitExpr,
    StringLitExpr,
    BoolLitExpr,
    NullLitExpr,
    NameExpr,
    ParenExpr,
    AssignExpr,
    TernaryExpr,
    ShortTernaryExpr,
    NullCoalesceExpr,
    EqExpr,
    NotEqExpr,
    IdenticalExpr,
    NotIdenticalExpr,
    LtExpr,
    GtExpr,
    LeExpr,
    GeExpr,
    AndExpr,
    OrExpr,
    XorExpr,
    NotExpr,
    NegExpr,
    ConcatExpr,
    AddExpr,
    SubExpr,
    MulExpr,
    DivExpr,
    ModExpr,
    PowExpr,
    CallExpr,
    MethodCallExpr,
    PropertyFetchExpr,
    StaticCallExpr,
    StaticPropertyFetchExpr,
    ClassConstFetchExpr,
    NewExpr,
    AnonClassExpr,
    CloneExpr,
    InstanceofExpr,
    EmptyExpr,
    IssetExpr,
    CastExpr,
    IncludeExpr,
    ArrayLiteralExpr,
    ArrayItem,
    IndexExpr,
    ClosureExpr,

    /// Sentinel marking the last valid discriminant; never produced by the
    /// lexer or parser.
    __Last,
}

impl SyntaxKind {
    /// Returns whether this kind is whitespace or a comment.
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Comment)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}
