//! Symbol Graph (C5): the project-wide map from FQN to its definition,
//! and from FQN to the documents that reference it.
//!
//! Deliberately two flat maps rather than a `petgraph` dependency graph:
//! nothing here needs traversal, only point lookups by FQN and by
//! referrer, so a graph library would add a dependency for structure the
//! core never walks.

use indexmap::IndexMap;
use indexmap::IndexSet;
use url::Url;

use crate::document::Definition;
use crate::document::DocumentDelta;
use crate::types::Fqn;

/// The project-wide index of every known definition and who references
/// it.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    definitions: IndexMap<Fqn, Definition>,
    referrers: IndexMap<Fqn, IndexSet<Url>>,
}

impl SymbolGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records or replaces a definition. Last writer wins: if two
    /// documents define the same FQN, whichever applies its delta last
    /// is authoritative, per §4.5.
    pub fn set_definition(&mut self, definition: Definition) {
        self.definitions.insert(definition.fqn.clone(), definition);
    }

    /// Removes `fqn`'s definition, but only if `uri` is still its
    /// current owner. A document's delta is computed purely from its
    /// own local before/after maps, so under last-writer-wins a losing
    /// document's stale removal must not evict the winner's live entry.
    pub fn remove_definition(&mut self, fqn: &Fqn, uri: &Url) {
        if self.definitions.get(fqn).is_some_and(|def| &def.uri == uri) {
            self.definitions.shift_remove(fqn);
        }
    }

    /// Whether any document currently defines `fqn`.
    pub fn is_defined(&self, fqn: &Fqn) -> bool {
        self.definitions.contains_key(fqn)
    }

    /// The current definition for `fqn`, if any.
    pub fn definition(&self, fqn: &Fqn) -> Option<&Definition> {
        self.definitions.get(fqn)
    }

    /// Records that `uri` references `fqn`.
    pub fn add_referrer(&mut self, fqn: Fqn, uri: Url) {
        self.referrers.entry(fqn).or_default().insert(uri);
    }

    /// Removes `uri` from `fqn`'s referrer set.
    pub fn remove_referrer(&mut self, fqn: &Fqn, uri: &Url) {
        if let Some(referrers) = self.referrers.get_mut(fqn) {
            referrers.shift_remove(uri);
            if referrers.is_empty() {
                self.referrers.shift_remove(fqn);
            }
        }
    }

    /// The documents that reference `fqn`, if any.
    pub fn referrer_uris(&self, fqn: &Fqn) -> impl Iterator<Item = &Url> {
        self.referrers.get(fqn).into_iter().flatten()
    }

    /// Folds a document's [`DocumentDelta`] into the graph: applies
    /// added/removed definitions and references_added/references_removed
    /// in one step, so a document update never leaves the graph in a
    /// partially-stale state between the two.
    pub fn apply_delta(&mut self, uri: &Url, delta: &DocumentDelta) {
        for definition in &delta.added {
            self.set_definition(definition.clone());
        }
        for fqn in &delta.removed {
            self.remove_definition(fqn, uri);
        }
        for fqn in &delta.references_added {
            self.add_referrer(fqn.clone(), uri.clone());
        }
        for fqn in &delta.references_removed {
            self.remove_referrer(fqn, uri);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn apply_delta_seeds_definitions_and_referrers() {
        let uri = Url::parse("file:///a.zst").unwrap();
        let document = Document::new(uri.clone(), "function a() {} strlen(\"x\");".to_string());
        let mut graph = SymbolGraph::new();
        graph.apply_delta(&uri, &document.initial_delta());

        assert!(graph.is_defined(&Fqn::new("\\a")));
        assert!(graph
            .referrer_uris(&Fqn::new("\\strlen"))
            .any(|u| u == &uri));
    }

    #[test]
    fn last_writer_wins_on_conflicting_definitions() {
        let uri_a = Url::parse("file:///a.zst").unwrap();
        let uri_b = Url::parse("file:///b.zst").unwrap();
        let doc_a = Document::new(uri_a.clone(), "function shared() {}".to_string());
        let doc_b = Document::new(uri_b.clone(), "function shared() {}".to_string());

        let mut graph = SymbolGraph::new();
        graph.apply_delta(&uri_a, &doc_a.initial_delta());
        graph.apply_delta(&uri_b, &doc_b.initial_delta());

        assert_eq!(graph.definition(&Fqn::new("\\shared")).unwrap().uri, uri_b);
    }
}
