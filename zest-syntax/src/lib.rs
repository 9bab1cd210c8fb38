//! Lexing and parsing of Zest source files into a concrete syntax tree.
//!
//! This crate plays the role of the "third-party parser" collaborator: it
//! turns source text into a [`rowan`] concrete syntax tree that `zest-ast`
//! wraps with typed accessors. It covers the subset of the language's
//! grammar needed to exercise every node kind the analysis core dispatches
//! on; it is not a complete grammar for the language.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]

mod lexer;
mod parser;
mod syntax_kind;

pub use lexer::Token;
pub use parser::Parse;
pub use parser::parse;
pub use syntax_kind::SyntaxKind;
pub use syntax_kind::SyntaxKind::*;

/// The Zest concrete syntax tree's language marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZestLanguage {}

impl rowan::Language for ZestLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::__Last as u16);
        // SAFETY: `SyntaxKind` is `#[repr(u16)]` and the assertion above
        // guarantees `raw.0` names a valid discriminant.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

/// A node in the Zest concrete syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<ZestLanguage>;
/// A token in the Zest concrete syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<ZestLanguage>;
/// An element (node or token) in the Zest concrete syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<ZestLanguage>;
/// A byte range within a source document.
pub type Span = rowan::TextRange;
