//! Tokenization of Zest source text.

use logos::Logos;

use crate::SyntaxKind;

/// A lexical token kind, as produced directly by [`logos`].
///
/// This mirrors the token-only subset of [`SyntaxKind`]; [`Token::into`]
/// widens it into the full kind space the parser and CST share.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Horizontal or vertical whitespace.
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// A line or block comment.
    #[regex(r"//[^\n]*")]
    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    Comment,

    #[regex(r"[0-9]+")]
    IntLit,
    #[regex(r"[0-9]+\.[0-9]+")]
    FloatLit,
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    StringLit,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    Variable,

    #[token("namespace")]
    NamespaceKw,
    #[token("use")]
    UseKw,
    #[token("as")]
    AsKw,
    #[token("class")]
    ClassKw,
    #[token("interface")]
    InterfaceKw,
    #[token("extends")]
    ExtendsKw,
    #[token("implements")]
    ImplementsKw,
    #[token("function")]
    FunctionKw,
    #[token("public")]
    PublicKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("static")]
    StaticKw,
    #[token("const")]
    ConstKw,
    #[token("new")]
    NewKw,
    #[token("clone")]
    CloneKw,
    #[token("instanceof")]
    InstanceofKw,
    #[token("empty")]
    EmptyKw,
    #[token("isset")]
    IssetKw,
    #[token("include")]
    IncludeKw,
    #[token("require")]
    RequireKw,
    #[token("return")]
    ReturnKw,
    #[token("and")]
    AndKw,
    #[token("or")]
    OrKw,
    #[token("xor")]
    XorKw,

    // Identifiers are matched after keywords so keywords win ties; logos
    // picks the longest match and, on a tie, the earlier variant, so
    // keyword tokens must be declared before this regex.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("\\")]
    Backslash,
    #[token(".")]
    Dot,
    #[token("&&")]
    AmpAmp,
    #[token("&")]
    Amp,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("**")]
    StarStar,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("===")]
    EqEqEq,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!==")]
    NotEqEq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("||")]
    PipePipe,
    #[token("??")]
    QuestionQuestion,
    #[token("?:")]
    QuestionColon,
    #[token("?")]
    Question,
}

impl From<Token> for SyntaxKind {
    fn from(token: Token) -> Self {
        match token {
            Token::Whitespace => SyntaxKind::Whitespace,
            Token::Comment => SyntaxKind::Comment,
            Token::IntLit => SyntaxKind::IntLit,
            Token::FloatLit => SyntaxKind::FloatLit,
            Token::StringLit => SyntaxKind::StringLit,
            Token::TrueKw => SyntaxKind::TrueKw,
            Token::FalseKw => SyntaxKind::FalseKw,
            Token::NullKw => SyntaxKind::NullKw,
            Token::Variable => SyntaxKind::Variable,
            Token::NamespaceKw => SyntaxKind::NamespaceKw,
            Token::UseKw => SyntaxKind::UseKw,
            Token::AsKw => SyntaxKind::AsKw,
            Token::ClassKw => SyntaxKind::ClassKw,
            Token::InterfaceKw => SyntaxKind::InterfaceKw,
            Token::ExtendsKw => SyntaxKind::ExtendsKw,
            Token::ImplementsKw => SyntaxKind::ImplementsKw,
            Token::FunctionKw => SyntaxKind::FunctionKw,
            Token::PublicKw => SyntaxKind::PublicKw,
            Token::PrivateKw => SyntaxKind::PrivateKw,
            Token::ProtectedKw => SyntaxKind::ProtectedKw,
            Token::StaticKw => SyntaxKind::StaticKw,
            Token::ConstKw => SyntaxKind::ConstKw,
            Token::NewKw => SyntaxKind::NewKw,
            Token::CloneKw => SyntaxKind::CloneKw,
            Token::InstanceofKw => SyntaxKind::InstanceofKw,
            Token::EmptyKw => SyntaxKind::EmptyKw,
            Token::IssetKw => SyntaxKind::IssetKw,
            Token::IncludeKw => SyntaxKind::IncludeKw,
            Token::RequireKw => SyntaxKind::RequireKw,
            Token::ReturnKw => SyntaxKind::ReturnKw,
            Token::AndKw => SyntaxKind::AndKw,
            Token::OrKw => SyntaxKind::OrKw,
            Token::XorKw => SyntaxKind::XorKw,
            Token::Ident => SyntaxKind::Ident,
            Token::LParen => SyntaxKind::LParen,
            Token::RParen => SyntaxKind::RParen,
            Token::LBrace => SyntaxKind::LBrace,
            Token::RBrace => SyntaxKind::RBrace,
            Token::LBracket => SyntaxKind::LBracket,
            Token::RBracket => SyntaxKind::RBracket,
            Token::Semicolon => SyntaxKind::Semicolon,
            Token::Comma => SyntaxKind::Comma,
            Token::ColonColon => SyntaxKind::ColonColon,
            Token::Colon => SyntaxKind::Colon,
            Token::Arrow => SyntaxKind::Arrow,
            Token::FatArrow => SyntaxKind::FatArrow,
            Token::Backslash => SyntaxKind::Backslash,
            Token::Dot => SyntaxKind::Dot,
            Token::AmpAmp => SyntaxKind::AmpAmp,
            Token::Amp => SyntaxKind::Amp,
            Token::Plus => SyntaxKind::Plus,
            Token::Minus => SyntaxKind::Minus,
            Token::StarStar => SyntaxKind::StarStar,
            Token::Star => SyntaxKind::Star,
            Token::Slash => SyntaxKind::Slash,
            Token::Percent => SyntaxKind::Percent,
            Token::EqEqEq => SyntaxKind::EqEqEq,
            Token::EqEq => SyntaxKind::EqEq,
            Token::Eq => SyntaxKind::Eq,
            Token::NotEqEq => SyntaxKind::NotEqEq,
            Token::NotEq => SyntaxKind::NotEq,
            Token::Bang => SyntaxKind::Bang,
            Token::LtEq => SyntaxKind::LtEq,
            Token::Lt => SyntaxKind::Lt,
            Token::GtEq => SyntaxKind::GtEq,
            Token::Gt => SyntaxKind::Gt,
            Token::PipePipe => SyntaxKind::PipePipe,
            Token::QuestionQuestion => SyntaxKind::QuestionQuestion,
            Token::QuestionColon => SyntaxKind::QuestionColon,
            Token::Question => SyntaxKind::Question,
        }
    }
}

/// Lexes `source` into a flat list of `(kind, text range)` pairs, including
/// trivia (whitespace and comments).
pub fn lex(source: &str) -> Vec<(SyntaxKind, rowan::TextRange)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(Token::Whitespace) => SyntaxKind::Whitespace,
            Ok(token) => token.into(),
            Err(()) => SyntaxKind::Error,
        };
        let range = rowan::TextRange::new((span.start as u32).into(), (span.end as u32).into());
        tokens.push((kind, range));
    }
    tokens
}
