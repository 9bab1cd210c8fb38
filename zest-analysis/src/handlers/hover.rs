//! Implements `textDocument/hover`.

use anyhow::Result;
use line_index::LineIndex;
use lsp_types::Hover;
use lsp_types::HoverContents;
use lsp_types::MarkupContent;
use lsp_types::MarkupKind;

use zest_ast::AstNode;
use zest_ast::VarExpr;

use crate::Workspace;
use crate::handlers::common::expr_at;
use crate::handlers::common::position_to_offset;
use crate::handlers::common::reference_node_at;

/// Renders hover information for the reference or expression at
/// `position`: the symbol's kind, FQN, and declared type when a
/// reference node is found there, or just the inferred type for any
/// other expression.
///
/// A variable node is never passed to the query facade — `definitionFor
/// Node` treats that as a contract violation (resolving a variable is
/// C2's job, not C6's) — so a variable reference falls straight through
/// to the inferred-type path below instead.
pub fn hover(
    workspace: &Workspace,
    uri: &url::Url,
    position: lsp_types::Position,
) -> Result<Option<Hover>> {
    let Some(document) = workspace.document(uri) else {
        return Ok(None);
    };
    let index = LineIndex::new(document.text());
    let Some(offset) = position_to_offset(&index, position) else {
        return Ok(None);
    };

    let reference = reference_node_at(document.root().syntax(), offset)
        .filter(|node| VarExpr::cast(node.clone()).is_none());

    let markdown = match reference {
        Some(node) => workspace.definition_for_node(document, &node)?.map(|definition| {
            format!(
                "**{kind:?}** `{fqn}`\n\ntype: `{ty}`",
                kind = definition.kind,
                fqn = definition.fqn,
                ty = definition
                    .declared_type
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "mixed".to_string()),
            )
        }),
        None => None,
    };

    let markdown = markdown.or_else(|| {
        let expr = expr_at(document.root().syntax(), offset)?;
        let ty = workspace.type_of_expression(document, &expr);
        Some(format!("type: `{ty}`"))
    });

    Ok(markdown.map(|value| Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn hovers_a_variable_use_show_its_inferred_type() {
        let mut workspace = Workspace::new();
        let uri = Url::parse("file:///a.zst").unwrap();
        workspace.open_document(uri.clone(), "$a = 5;\n$b = $a;\n".to_string());
        // Column 5 on the second line lands inside `$a` on the right-hand
        // side of `$b = $a;`.
        let hover = hover(&workspace, &uri, lsp_types::Position::new(1, 6))
            .unwrap()
            .expect("hover should render");
        let HoverContents::Markup(markup) = hover.contents else {
            panic!("expected markup contents");
        };
        assert!(markup.value.contains("int"));
    }
}
