//! Implements `textDocument/references`.

use anyhow::Result;
use line_index::LineIndex;
use lsp_types::Location;
use zest_ast::AstNode;

use crate::Workspace;
use crate::fqn;
use crate::handlers::common::position_to_offset;
use crate::handlers::common::reference_node_at;
use crate::handlers::common::span_to_range;

/// Finds every document referencing the symbol at `position` in `uri`,
/// surfaced as one `Location` per referring document (pointing at its
/// start, since the referrer set itself doesn't track individual call
/// sites — only which documents mention the FQN at all).
pub fn find_references(
    workspace: &Workspace,
    uri: &url::Url,
    position: lsp_types::Position,
) -> Result<Vec<Location>> {
    let Some(document) = workspace.document(uri) else {
        return Ok(Vec::new());
    };
    let index = LineIndex::new(document.text());
    let Some(offset) = position_to_offset(&index, position) else {
        return Ok(Vec::new());
    };
    let Some(node) = reference_node_at(document.root().syntax(), offset) else {
        return Ok(Vec::new());
    };
    let Some(name) = zest_ast::QualifiedName::cast(node) else {
        return Ok(Vec::new());
    };
    let target_fqn = fqn::resolve_name(document.namespace(), document.uses(), &name);

    Ok(workspace
        .references_to(&target_fqn)
        .filter_map(|referrer_uri| {
            let referrer = workspace.document(referrer_uri)?;
            let index = LineIndex::new(referrer.text());
            let span = zest_ast::Span::new(0.into(), 0.into());
            Some(Location::new(referrer_uri.clone(), span_to_range(&index, span)))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn finds_documents_referencing_a_class_name() {
        let mut workspace = Workspace::new();
        let a = Url::parse("file:///a.zst").unwrap();
        let b = Url::parse("file:///b.zst").unwrap();
        workspace.open_document(a.clone(), "class Foo { function bar() {} }".to_string());
        // "\Foo::bar();": backslash(0) F(1) o(2) o(3) :(4) :(5) b(6)...
        workspace.open_document(b.clone(), "\\Foo::bar();".to_string());

        let locations = find_references(&workspace, &b, lsp_types::Position::new(0, 2)).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].uri, b);
    }
}
