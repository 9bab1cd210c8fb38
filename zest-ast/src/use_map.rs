//! Resolving short names against a file's `use` imports.

use indexmap::IndexMap;

use crate::Root;

/// Maps the local alias introduced by each `use` import (or, absent an
/// `as` clause, the imported name's final segment) to the fully
/// qualified name it stands for.
///
/// Built once per parse and consulted by FQN resolution whenever a
/// reference uses a short, unqualified name.
#[derive(Debug, Clone, Default)]
pub struct UseMap {
    aliases: IndexMap<String, String>,
}

impl UseMap {
    /// Builds a [`UseMap`] from a file's `use` declarations.
    pub fn build(root: &Root) -> Self {
        let mut aliases = IndexMap::new();
        for use_decl in root.uses() {
            let Some(name) = use_decl.name() else {
                continue;
            };
            let target = name.text();
            let alias = match use_decl.alias() {
                Some(token) => token.text().to_string(),
                None => match name.segments().last() {
                    Some(segment) => segment,
                    None => continue,
                },
            };
            aliases.insert(alias, target);
        }
        Self { aliases }
    }

    /// Resolves `name` against the import table, returning the fully
    /// qualified target if `name` is a bare alias introduced by a `use`
    /// declaration.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Iterates over every `(alias, target)` pair in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
