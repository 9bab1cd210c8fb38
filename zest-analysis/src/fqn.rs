//! FQN Builder (C1): resolving names against a file's namespace and
//! imports, and building the FQNs of definitions.
//!
//! The "reference" half of C1 — resolving a *use* of a name, including
//! member references whose owner comes from C3 — lives on [`crate::typing::Ctx`]
//! in `typing.rs`, since it needs the type resolver to find a dynamic
//! receiver's class. Everything that doesn't need type inference is here.

use zest_ast::QualifiedName;
use zest_ast::Root;
use zest_ast::UseMap;

use crate::types::Fqn;

/// The namespace declared at the top of `root`, or the empty string for
/// the global namespace.
pub fn namespace_of(root: &Root) -> String {
    root.namespace()
        .and_then(|decl| decl.name())
        .map(|name| name.text().trim_start_matches('\\').to_string())
        .unwrap_or_default()
}

/// Qualifies a bare declaration name (e.g. a class or function's own
/// name) under `namespace`, producing a canonical, namespace-rooted FQN.
pub fn qualify(namespace: &str, name: &str) -> Fqn {
    if namespace.is_empty() {
        Fqn::new(format!("\\{name}"))
    } else {
        Fqn::new(format!("\\{namespace}\\{name}"))
    }
}

/// Resolves a (possibly short, possibly rooted) name reference against
/// the enclosing namespace and the file's `use` imports, per §4.1:
/// "Identifier-kind references ... use the parser-provided
/// `namespacedName` attribute if present, else the literal name." Here
/// the import table stands in for that attribute.
pub fn resolve_name(namespace: &str, uses: &UseMap, name: &QualifiedName) -> Fqn {
    let segments: Vec<String> = name.segments().collect();
    if name.is_rooted() {
        return Fqn::new(format!("\\{}", segments.join("\\")));
    }
    if segments.len() == 1 {
        if let Some(target) = uses.resolve(&segments[0]) {
            let target = target.trim_start_matches('\\');
            return Fqn::new(format!("\\{target}"));
        }
    }
    qualify(namespace, &segments.join("\\"))
}

#[cfg(test)]
mod tests {
    use zest_ast::AstNode;

    use super::*;

    fn qualified_name(source: &str) -> QualifiedName {
        let parsed = zest_ast::parse(source);
        parsed
            .syntax()
            .descendants()
            .find_map(QualifiedName::cast)
            .expect("qualified name present")
    }

    #[test]
    fn rooted_name_ignores_namespace() {
        let uses = UseMap::default();
        let name = qualified_name("\\Foo\\Bar;\n");
        assert_eq!(resolve_name("App", &uses, &name).as_str(), "\\Foo\\Bar");
    }

    #[test]
    fn unqualified_name_joins_enclosing_namespace() {
        let uses = UseMap::default();
        let name = qualified_name("Bar;\n");
        assert_eq!(resolve_name("App", &uses, &name).as_str(), "\\App\\Bar");
    }

    #[test]
    fn namespace_of_reads_declaration() {
        let root = zest_ast::parse("namespace App\\Sub;\n");
        assert_eq!(namespace_of(&root), "App\\Sub");
    }
}
