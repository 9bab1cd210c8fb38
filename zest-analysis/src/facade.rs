//! Query Facade (C6): the thin dispatch surface the rest of the world
//! talks to — "definition at node", "type of expression", "references to
//! FQN" — plus the namespace-fallback policy for unqualified call-site
//! and constant-fetch references.

use zest_ast::AstNode;
use zest_ast::Expr;
use zest_ast::SyntaxNode;

use crate::document::Definition;
use crate::document::Document;
use crate::fqn;
use crate::graph::SymbolGraph;
use crate::types::{Fqn, Type};
use crate::typing::Ctx;

/// Errors the facade can report. Everything that isn't a programmer
/// error is expressed as `None`/empty results instead, per §7's error
/// taxonomy — this enum exists only for the one class of error that
/// really is fatal to the calling handler.
#[derive(Debug)]
pub enum FacadeError {
    /// `definitionForNode` was asked for the definition of a variable
    /// node. Variables are resolved through C2 directly; conflating
    /// local and global scope here would be a bug in the caller.
    VariableNodeRequested,
}

impl std::fmt::Display for FacadeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacadeError::VariableNodeRequested => f.write_str(
                "cannot ask the query facade for a variable's definition; use the scope resolver",
            ),
        }
    }
}

impl std::error::Error for FacadeError {}

/// Resolves the definition a reference node points to, applying the
/// namespace-fallback policy (§4.6) when the node is a call-site or
/// constant-fetch callee and the qualified lookup misses.
pub fn definition_for_node(
    document: &Document,
    graph: &SymbolGraph,
    config: &crate::config::Config,
    node: &SyntaxNode,
) -> Result<Option<Definition>, FacadeError> {
    if zest_ast::VarExpr::cast(node.clone()).is_some() {
        return Err(FacadeError::VariableNodeRequested);
    }

    let Some(name) = zest_ast::QualifiedName::cast(node.clone()) else {
        return Ok(None);
    };
    let target_fqn = fqn::resolve_name(document.namespace(), document.uses(), &name);

    // The fallback applies to unqualified function-call callees and bare
    // constant references (a `QualifiedName` used on its own, not as a
    // class-member access) — not to method calls or class constants,
    // which are always resolved against their explicit owner.
    let allow_fallback = node
        .parent()
        .is_some_and(|parent| matches!(parent.kind(), zest_syntax::SyntaxKind::CallExpr | zest_syntax::SyntaxKind::NameExpr));

    let ctx = Ctx::new(document, graph, config);
    Ok(ctx
        .lookup_with_fallback(&target_fqn, allow_fallback)
        .cloned())
}

/// The static type of an expression node, delegating to C3.
pub fn type_of_expression(
    document: &Document,
    graph: &SymbolGraph,
    config: &crate::config::Config,
    expr: &Expr,
) -> Type {
    Ctx::new(document, graph, config).type_of(expr)
}

/// The FQN a node resolves to, for callers that just need the name
/// (e.g. hover) rather than the full definition lookup.
pub fn fqn_for_node(document: &Document, node: &SyntaxNode) -> Option<Fqn> {
    let name = zest_ast::QualifiedName::cast(node.clone())?;
    Some(fqn::resolve_name(document.namespace(), document.uses(), &name))
}

/// The documents that reference `fqn`, per the symbol graph's referrer
/// set.
pub fn references_to<'a>(graph: &'a SymbolGraph, fqn: &Fqn) -> impl Iterator<Item = &'a url::Url> {
    graph.referrer_uris(fqn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use url::Url;

    fn doc(source: &str) -> Document {
        Document::new(Url::parse("file:///t.zst").unwrap(), source.to_string())
    }

    fn last_qualified_name(document: &Document) -> SyntaxNode {
        document
            .root()
            .syntax()
            .descendants()
            .filter(|n| n.kind() == zest_syntax::SyntaxKind::QualifiedName)
            .last()
            .expect("a qualified name")
    }

    #[test]
    fn rejects_variable_node() {
        let document = doc("$a = 1;");
        let graph = SymbolGraph::new();
        let config = Config::default();
        let var = document
            .root()
            .syntax()
            .descendants()
            .find(|n| n.kind() == zest_syntax::SyntaxKind::VarExpr)
            .unwrap();
        assert!(matches!(
            definition_for_node(&document, &graph, &config, &var),
            Err(FacadeError::VariableNodeRequested)
        ));
    }

    #[test]
    fn namespace_fallback_resolves_bare_call() {
        let mut document = doc("namespace App;\nstrlen(\"x\");\n");
        let mut graph = SymbolGraph::new();
        let global = Document::new(
            Url::parse("file:///global.zst").unwrap(),
            "function strlen() {}".to_string(),
        );
        graph.apply_delta(global.uri(), &global.initial_delta());
        document.diagnostics.clear();

        let config = Config::default();
        let node = last_qualified_name(&document);
        let result = definition_for_node(&document, &graph, &config, &node).unwrap();
        assert!(result.is_some());
    }
}
