//! A typed abstract syntax tree layered over `zest-syntax`'s concrete
//! syntax tree.
//!
//! Every node kind the analysis core dispatches on gets a thin typed
//! wrapper here; traversal (parent, previous sibling, descendants) is
//! inherited directly from `rowan`, since the underlying tree already
//! tracks it. The one thing the CST doesn't give for free is resolving a
//! short name against the file's `use` imports, so that lives here too
//! (see [`UseMap`]).

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]

mod expr;
mod node;
mod use_map;
mod visit;

pub use expr::*;
pub use node::*;
pub use use_map::UseMap;
pub use visit::Visitor;
pub use visit::walk;

pub use zest_syntax::Span;
pub use zest_syntax::SyntaxElement;
pub use zest_syntax::SyntaxKind;
pub use zest_syntax::SyntaxNode;
pub use zest_syntax::SyntaxToken;

/// Implemented by every typed wrapper around a [`SyntaxNode`].
pub trait AstNode: Sized {
    /// Returns whether `kind` is a node kind this type can wrap.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// Attempts to wrap `node`, returning `None` if its kind doesn't match.
    fn cast(node: SyntaxNode) -> Option<Self>;

    /// Returns the underlying syntax node.
    fn syntax(&self) -> &SyntaxNode;

    /// The byte range of this node in the source document.
    fn span(&self) -> Span {
        self.syntax().text_range()
    }
}

/// Implemented by every typed wrapper around a [`SyntaxToken`].
pub trait AstToken: Sized {
    /// Returns whether `kind` is a token kind this type can wrap.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// Attempts to wrap `token`, returning `None` if its kind doesn't match.
    fn cast(token: SyntaxToken) -> Option<Self>;

    /// Returns the underlying syntax token.
    fn syntax(&self) -> &SyntaxToken;

    /// The token's source text.
    fn text(&self) -> &str {
        self.syntax().text()
    }

    /// The byte range of this token in the source document.
    fn span(&self) -> Span {
        self.syntax().text_range()
    }
}

/// Parses `source` and returns the root [`Root`] node, discarding parse
/// errors (callers that need them should call [`zest_syntax::parse`]
/// directly).
pub fn parse(source: &str) -> Root {
    Root::cast(zest_syntax::parse(source).syntax())
        .expect("the grammar always produces a Root at the tree root")
}

pub(crate) fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

pub(crate) fn children<'a, N: AstNode + 'a>(parent: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
    parent.children().filter_map(N::cast)
}

pub(crate) fn nth_child<N: AstNode>(parent: &SyntaxNode, n: usize) -> Option<N> {
    parent.children().filter_map(N::cast).nth(n)
}

pub(crate) fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

/// The doc comment immediately preceding `node`, if any.
///
/// The parser attaches comment trivia to whichever node is open when it's
/// encountered (see `zest-syntax`'s `bump_trivia`), so a declaration's
/// doc comment ends up as a preceding sibling token, not a child. This
/// walks backward over sibling tokens, skipping whitespace, and returns
/// the first comment's text — stopping (returning `None`) the moment it
/// hits anything else, so a comment separated from `node` by another
/// declaration is never mistaken for its doc comment.
pub fn preceding_doc_comment(node: &SyntaxNode) -> Option<String> {
    let mut sibling = node.prev_sibling_or_token();
    while let Some(element) = sibling {
        match element.as_token().map(|t| t.kind()) {
            Some(SyntaxKind::Whitespace) => {
                sibling = element.prev_sibling_or_token();
            }
            Some(SyntaxKind::Comment) => {
                return element.into_token().map(|t| t.text().to_string());
            }
            _ => return None,
        }
    }
    None
}
