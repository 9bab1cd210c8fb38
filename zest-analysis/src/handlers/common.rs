//! Shared helpers for the LSP-facing handlers: offset/position
//! conversion and syntax-node lookup.

use line_index::LineIndex;
use line_index::TextSize;
use zest_ast::AstNode;
use zest_syntax::SyntaxKind;
use zest_syntax::SyntaxNode;
use zest_syntax::SyntaxToken;

/// Finds an identifier or variable token at `offset`.
fn token_at_offset(node: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    node.token_at_offset(offset)
        .find(|t| matches!(t.kind(), SyntaxKind::Ident | SyntaxKind::Variable))
}

/// The smallest ancestor of the token at `offset` that is a
/// `QualifiedName` or `VarExpr` — the two node kinds the query facade
/// and scope resolver operate on.
pub(crate) fn reference_node_at(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxNode> {
    token_at_offset(root, offset)?
        .parent_ancestors()
        .find(|node| matches!(node.kind(), SyntaxKind::QualifiedName | SyntaxKind::VarExpr))
}

/// Finds the [`zest_ast::Expr`] at `offset`, for type/hover queries that
/// want the whole expression rather than just a reference node.
pub(crate) fn expr_at(root: &SyntaxNode, offset: TextSize) -> Option<zest_ast::Expr> {
    token_at_offset(root, offset)?
        .parent_ancestors()
        .find_map(zest_ast::Expr::cast)
}

/// Converts an LSP `Position` to a byte offset using `index`.
pub(crate) fn position_to_offset(
    index: &LineIndex,
    position: lsp_types::Position,
) -> Option<TextSize> {
    index.offset(line_index::LineCol {
        line: position.line,
        col: position.character,
    })
}

/// Converts a byte span to an LSP `Range` using `index`.
pub(crate) fn span_to_range(index: &LineIndex, span: zest_ast::Span) -> lsp_types::Range {
    let start = index.line_col(span.start());
    let end = index.line_col(span.end());
    lsp_types::Range::new(
        lsp_types::Position::new(start.line, start.col),
        lsp_types::Position::new(end.line, end.col),
    )
}
