//! A filesystem-backed [`ContentProvider`] for documents the editor
//! hasn't opened.

use std::fs;

use tracing::warn;
use url::Url;
use zest_analysis::ContentProvider;

/// Reads a document's text straight from disk via its `file://` URI.
///
/// Used by [`crate::Server`] to resolve a goto-definition target in a
/// file the editor never opened, per §9's lazy-loading redesign. A
/// `uri` that isn't a `file://` URI, or whose path can't be read, is
/// reported as unavailable (§7's IO-unavailable case) rather than as an
/// error.
#[derive(Debug, Clone, Default)]
pub struct FsContentProvider;

impl ContentProvider for FsContentProvider {
    fn read(&self, uri: &Url) -> Option<String> {
        let path = uri.to_file_path().ok()?;
        fs::read_to_string(&path)
            .map_err(|e| warn!(%uri, error = %e, "failed to read document from disk"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_an_existing_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("zest_content_provider_test.zst");
        std::fs::write(&path, "function greet() {}\n").unwrap();
        let uri = Url::from_file_path(&path).unwrap();

        assert_eq!(
            FsContentProvider.read(&uri).as_deref(),
            Some("function greet() {}\n")
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn reports_a_missing_file_as_unavailable() {
        let uri = Url::parse("file:///does/not/exist.zst").unwrap();
        assert_eq!(FsContentProvider.read(&uri), None);
    }
}
