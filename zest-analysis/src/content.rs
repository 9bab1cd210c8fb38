//! The collaborator interface the analysis core uses to read a document's
//! text without owning a textual-document store of its own.

use url::Url;

/// Reads document text by URI. Implemented by an in-memory fake in tests
/// and by a filesystem-backed reader in `zest-lsp`.
pub trait ContentProvider: std::fmt::Debug {
    /// Returns the current text for `uri`, or `None` if it isn't
    /// available (not open, not on disk, read error).
    fn read(&self, uri: &Url) -> Option<String>;
}

/// A fixed in-memory [`ContentProvider`], useful for tests and for the
/// `zest` CLI's one-shot analysis mode.
#[derive(Debug, Clone, Default)]
pub struct StaticContentProvider {
    files: std::collections::HashMap<Url, String>,
}

impl StaticContentProvider {
    /// An empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `text` as the content for `uri`.
    pub fn insert(&mut self, uri: Url, text: String) {
        self.files.insert(uri, text);
    }
}

impl ContentProvider for StaticContentProvider {
    fn read(&self, uri: &Url) -> Option<String> {
        self.files.get(uri).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_provider_round_trips() {
        let uri = Url::parse("file:///a.zst").unwrap();
        let mut provider = StaticContentProvider::new();
        provider.insert(uri.clone(), "<?php\n".to_string());
        assert_eq!(provider.read(&uri).as_deref(), Some("<?php\n"));
    }
}
