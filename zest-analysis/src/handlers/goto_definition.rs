//! Implements `textDocument/definition`.

use anyhow::Result;
use line_index::LineIndex;
use lsp_types::Location;
use tracing::debug;
use zest_ast::AstNode;

use crate::Document;
use crate::Workspace;
use crate::handlers::common::position_to_offset;
use crate::handlers::common::reference_node_at;
use crate::handlers::common::span_to_range;

/// Resolves the definition at `position` in `uri`.
///
/// Returns `Ok(None)` for an unresolved reference, a position outside
/// any reference node, or a document that isn't open — all normal,
/// non-error outcomes per §7. Returns `Err` for a [`crate::FacadeError`],
/// including the contract violation of pointing this at a variable
/// node — a programmer error, fatal to this call, not a result to
/// swallow into `None`.
pub fn goto_definition(
    workspace: &Workspace,
    uri: &url::Url,
    position: lsp_types::Position,
) -> Result<Option<Location>> {
    let Some(document) = workspace.document(uri) else {
        debug!(%uri, "goto_definition: document not open");
        return Ok(None);
    };
    let index = LineIndex::new(document.text());
    let Some(offset) = position_to_offset(&index, position) else {
        return Ok(None);
    };
    let Some(node) = reference_node_at(document.root().syntax(), offset) else {
        return Ok(None);
    };

    let definition = workspace.definition_for_node(document, &node)?;

    Ok(definition.map(|definition| {
        // The target document may not be open (e.g. a definition in a
        // file the editor never loaded); fall back to a transient,
        // non-promoting load through the content provider before
        // giving up and reporting a zero range.
        let loaded;
        let target_text = match workspace.document(&definition.uri) {
            Some(doc) => Some(doc.text()),
            None => {
                loaded = workspace.load_document(&definition.uri);
                loaded.as_ref().map(Document::text)
            }
        };
        let range = target_text
            .map(|text| span_to_range(&LineIndex::new(text), definition.span))
            .unwrap_or_default();
        Location::new(definition.uri, range)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn resolves_function_call_to_its_definition() {
        let mut workspace = Workspace::new();
        let uri = Url::parse("file:///a.zst").unwrap();
        workspace.open_document(uri.clone(), "function greet() {}\ngreet();\n".to_string());

        let location = goto_definition(&workspace, &uri, lsp_types::Position::new(1, 1))
            .unwrap()
            .expect("definition should resolve");
        assert_eq!(location.uri, uri);
        assert_eq!(location.range.start.line, 0);
    }

    #[test]
    fn resolves_a_definition_in_a_document_not_open_via_content_provider() {
        let mut workspace = Workspace::new();
        let a = Url::parse("file:///a.zst").unwrap();
        let b = Url::parse("file:///b.zst").unwrap();
        let mut provider = crate::content::StaticContentProvider::new();
        provider.insert(b.clone(), "function greet() {}\n".to_string());
        workspace.set_content_provider(provider);
        workspace.open_document(a.clone(), "greet();\n".to_string());
        workspace.open_document_from_provider(&b);
        workspace.unload_document_buffer(&b);

        let location = goto_definition(&workspace, &a, lsp_types::Position::new(0, 1))
            .unwrap()
            .expect("definition should resolve through the content provider");
        assert_eq!(location.uri, b);
        assert_eq!(location.range.start.line, 0);
    }

    #[test]
    fn variable_node_is_a_contract_violation_for_the_handler() {
        let mut workspace = Workspace::new();
        let uri = Url::parse("file:///a.zst").unwrap();
        workspace.open_document(uri.clone(), "$a = 1;\n".to_string());
        let err = goto_definition(&workspace, &uri, lsp_types::Position::new(0, 1)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::FacadeError>(),
            Some(crate::FacadeError::VariableNodeRequested)
        ));
    }
}
