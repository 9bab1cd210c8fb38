//! Semantic analysis of Zest documents: FQN resolution, variable scope
//! resolution, static type inference, and a project-wide symbol graph.
//!
//! [`Workspace`] is the top-level entry point: it owns every open
//! document and the symbol graph they feed, and exposes the query
//! facade (C6) as methods.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod content;
pub mod docblock;
pub mod document;
pub mod facade;
pub mod fqn;
pub mod graph;
pub mod handlers;
pub mod typing;
pub mod types;
pub mod vars;

use indexmap::IndexMap;
use url::Url;

pub use config::Config;
pub use content::ContentProvider;
pub use document::Definition;
pub use document::Document;
pub use document::DocumentDelta;
pub use facade::FacadeError;
pub use graph::SymbolGraph;
pub use types::Fqn;
pub use types::SymbolKind;
pub use types::Type;

/// The full state of an analyzed project: every open document plus the
/// symbol graph they've fed. Mutated only through `&mut self` methods —
/// there is no interior mutability here; concurrent access (from an LSP
/// server, for instance) is the caller's responsibility, per §5.
#[derive(Debug, Default)]
pub struct Workspace {
    documents: IndexMap<Url, Document>,
    graph: SymbolGraph,
    /// Active policy knobs.
    pub config: Config,
    /// Reads documents outside the open set, e.g. a goto-definition
    /// target the editor never opened. `None` in a workspace with no
    /// on-disk backing (most tests).
    content_provider: Option<Box<dyn ContentProvider + Send + Sync>>,
}

impl Workspace {
    /// An empty workspace with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the [`ContentProvider`] backing [`Workspace::load_document`]
    /// and [`Workspace::open_document_from_provider`].
    pub fn set_content_provider(&mut self, provider: impl ContentProvider + Send + Sync + 'static) {
        self.content_provider = Some(Box::new(provider));
    }

    /// Loads and parses `uri`'s content through the configured content
    /// provider, without promoting it into the open-documents set.
    ///
    /// This is the non-mutating half of §9's lazy-loading redesign: the
    /// returned `Document` is scoped to the caller, matching §5's
    /// resource lifecycle ("documents acquired by on-disk load are
    /// scoped to the query that requested them unless promoted into the
    /// open set"). Returns `None` if there's no provider installed or it
    /// reports the document unavailable (the IO-unavailable case, §7).
    pub fn load_document(&self, uri: &Url) -> Option<Document> {
        let text = self.content_provider.as_deref()?.read(uri)?;
        Some(Document::new(uri.clone(), text))
    }

    /// Loads `uri` through the configured content provider and promotes
    /// it into the open-documents set, indexing it into the symbol graph
    /// exactly like an editor-opened document. Returns `false` if the
    /// provider has no content for `uri`.
    ///
    /// This is the mutating half of §9's lazy-loading redesign — the
    /// counterpart to [`Workspace::load_document`] that an editor event
    /// (rather than a transient query) should use.
    pub fn open_document_from_provider(&mut self, uri: &Url) -> bool {
        let Some(document) = self.load_document(uri) else {
            return false;
        };
        self.graph.apply_delta(uri, &document.initial_delta());
        self.documents.insert(uri.clone(), document);
        true
    }

    /// Evicts `uri`'s cached buffer without touching the symbol graph.
    ///
    /// Unlike [`Workspace::close_document`] — an editor event meaning the
    /// URI is no longer tracked at all, which retracts its graph entries
    /// per Invariant 2 — this only drops the held `Document` (e.g. to
    /// bound memory use for a project indexed via
    /// [`Workspace::open_document_from_provider`]). The graph still
    /// knows the URI's definitions; a later query re-fetches its text
    /// transiently through [`Workspace::load_document`].
    pub fn unload_document_buffer(&mut self, uri: &Url) -> bool {
        self.documents.shift_remove(uri).is_some()
    }

    /// Opens (or replaces) a document, indexing it and publishing its
    /// definitions and references into the symbol graph.
    pub fn open_document(&mut self, uri: Url, text: String) {
        let document = Document::new(uri.clone(), text);
        self.graph.apply_delta(&uri, &document.initial_delta());
        self.documents.insert(uri, document);
    }

    /// Replaces a document's content. A no-op (returns `false`) if the
    /// document isn't open.
    pub fn update_document(&mut self, uri: &Url, text: String) -> bool {
        let Some(document) = self.documents.get_mut(uri) else {
            return false;
        };
        let delta = document.update_content(text);
        self.graph.apply_delta(uri, &delta);
        true
    }

    /// Closes a document, removing every symbol graph entry that
    /// attributed its definitions or references to this URI.
    pub fn close_document(&mut self, uri: &Url) {
        let Some(document) = self.documents.shift_remove(uri) else {
            return;
        };
        let delta = document::DocumentDelta {
            added: Vec::new(),
            removed: document.definitions().keys().cloned().collect(),
            references_added: Vec::new(),
            references_removed: document.references().iter().cloned().collect(),
        };
        self.graph.apply_delta(uri, &delta);
    }

    /// The document open at `uri`, if any.
    pub fn document(&self, uri: &Url) -> Option<&Document> {
        self.documents.get(uri)
    }

    /// The project-wide symbol graph.
    pub fn graph(&self) -> &SymbolGraph {
        &self.graph
    }

    /// Resolves the definition a reference node points to (C6).
    pub fn definition_for_node(
        &self,
        document: &Document,
        node: &zest_syntax::SyntaxNode,
    ) -> Result<Option<Definition>, FacadeError> {
        facade::definition_for_node(document, &self.graph, &self.config, node)
    }

    /// The static type of an expression (C6, delegating to C3).
    pub fn type_of_expression(&self, document: &Document, expr: &zest_ast::Expr) -> Type {
        facade::type_of_expression(document, &self.graph, &self.config, expr)
    }

    /// The documents that reference `fqn`.
    pub fn references_to(&self, fqn: &Fqn) -> impl Iterator<Item = &Url> {
        facade::references_to(&self.graph, fqn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_a_document_removes_its_referrer_entries() {
        let mut workspace = Workspace::new();
        let a = Url::parse("file:///a.zst").unwrap();
        let b = Url::parse("file:///b.zst").unwrap();
        workspace.open_document(a.clone(), "\\B::m();".to_string());
        workspace.open_document(b.clone(), "class B { function m() {} }".to_string());

        assert!(workspace.graph().is_defined(&Fqn::new("\\B::m()")));
        workspace.close_document(&b);
        assert!(!workspace.graph().is_defined(&Fqn::new("\\B::m()")));
    }

    #[test]
    fn losing_a_conflict_then_editing_does_not_evict_the_winner() {
        let mut workspace = Workspace::new();
        let a = Url::parse("file:///a.zst").unwrap();
        let b = Url::parse("file:///b.zst").unwrap();
        workspace.open_document(a.clone(), "class Foo {}".to_string());
        workspace.open_document(b.clone(), "class Foo {}".to_string());

        // Last writer wins: `b` now owns `\Foo`.
        assert_eq!(workspace.graph().definition(&Fqn::new("\\Foo")).unwrap().uri, b);

        // `a` drops its (already-shadowed) definition. Its delta's
        // `removed` list still names `\Foo`, computed purely from its own
        // before/after maps, but it must not evict `b`'s live entry.
        workspace.update_document(&a, "".to_string());
        assert_eq!(workspace.graph().definition(&Fqn::new("\\Foo")).unwrap().uri, b);
    }

    #[test]
    fn load_document_reads_through_the_content_provider_without_opening_it() {
        let mut workspace = Workspace::new();
        let uri = Url::parse("file:///a.zst").unwrap();
        let mut provider = content::StaticContentProvider::new();
        provider.insert(uri.clone(), "function greet() {}\n".to_string());
        workspace.set_content_provider(provider);

        let document = workspace.load_document(&uri).expect("provider has the file");
        assert!(document.definitions().contains_key(&Fqn::new("\\greet")));
        assert!(workspace.document(&uri).is_none());
    }

    #[test]
    fn load_document_returns_none_without_a_provider() {
        let workspace = Workspace::new();
        let uri = Url::parse("file:///a.zst").unwrap();
        assert!(workspace.load_document(&uri).is_none());
    }

    #[test]
    fn open_document_from_provider_promotes_into_the_open_set() {
        let mut workspace = Workspace::new();
        let uri = Url::parse("file:///a.zst").unwrap();
        let mut provider = content::StaticContentProvider::new();
        provider.insert(uri.clone(), "class Foo {}".to_string());
        workspace.set_content_provider(provider);

        assert!(workspace.open_document_from_provider(&uri));
        assert!(workspace.document(&uri).is_some());
        assert!(workspace.graph().is_defined(&Fqn::new("\\Foo")));
    }

    #[test]
    fn unload_document_buffer_keeps_its_graph_entries() {
        let mut workspace = Workspace::new();
        let uri = Url::parse("file:///a.zst").unwrap();
        let mut provider = content::StaticContentProvider::new();
        provider.insert(uri.clone(), "class Foo {}".to_string());
        workspace.set_content_provider(provider);
        workspace.open_document_from_provider(&uri);

        assert!(workspace.unload_document_buffer(&uri));
        assert!(workspace.document(&uri).is_none());
        assert!(workspace.graph().is_defined(&Fqn::new("\\Foo")));
    }

    #[test]
    fn closing_a_losing_document_does_not_evict_the_winner() {
        let mut workspace = Workspace::new();
        let a = Url::parse("file:///a.zst").unwrap();
        let b = Url::parse("file:///b.zst").unwrap();
        workspace.open_document(a.clone(), "class Foo {}".to_string());
        workspace.open_document(b.clone(), "class Foo {}".to_string());

        workspace.close_document(&a);
        assert_eq!(workspace.graph().definition(&Fqn::new("\\Foo")).unwrap().uri, b);
    }
}
