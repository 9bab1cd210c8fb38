//! Variable Scope Resolver (C2).
//!
//! Implements §4.2's algorithm exactly: walk previous siblings looking
//! for a dominating assignment, ascend to the parent when siblings are
//! exhausted, and stop at (without crossing) the first function-like
//! boundary — consulting its parameters and, for a closure, its capture
//! list.

use zest_ast::AssignExpr;
use zest_ast::AstNode;
use zest_ast::CaptureItem;
use zest_ast::ClosureExpr;
use zest_ast::Expr;
use zest_ast::FunctionDecl;
use zest_ast::MethodDecl;
use zest_ast::Param;
use zest_ast::SyntaxKind;
use zest_ast::SyntaxNode;
use zest_ast::VarExpr;

/// The AST node that established a variable: a parameter, a closure
/// capture, or the nearest preceding assignment.
#[derive(Debug, Clone)]
pub enum VarDef {
    /// A function or method parameter.
    Param(Param),
    /// A closure's captured binding.
    Capture(CaptureItem),
    /// The nearest lexically preceding assignment to the same name.
    Assignment(AssignExpr),
}

fn is_function_like(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::FunctionDecl | SyntaxKind::MethodDecl | SyntaxKind::ClosureExpr
    )
}

/// Resolves the defining node for a variable use, or `None` if no
/// definition is found before a function-like boundary.
pub fn resolve(use_node: &VarExpr) -> Option<VarDef> {
    let Some(name) = use_node.name() else {
        return None;
    };
    let mut current: SyntaxNode = use_node.syntax().clone();

    loop {
        // Walk previous siblings, nearest first, looking for a dominating
        // assignment before ascending past `current`.
        let mut sibling = current.prev_sibling();
        while let Some(node) = sibling {
            if let Some(assign) = find_assignment_to(&node, &name) {
                return Some(VarDef::Assignment(assign));
            }
            sibling = node.prev_sibling();
        }

        let Some(parent) = current.parent() else {
            return None;
        };

        if is_function_like(parent.kind()) {
            return resolve_at_boundary(&parent, &name);
        }

        current = parent;
    }
}

/// Checks whether `node` is (or, if it's an expression statement,
/// contains) an assignment to a variable named `name`.
fn find_assignment_to(node: &SyntaxNode, name: &str) -> Option<AssignExpr> {
    let expr = Expr::cast(node.clone()).or_else(|| node.children().find_map(Expr::cast))?;
    let Expr::Assign(assign) = expr else {
        return None;
    };
    let Some(Expr::Var(var)) = assign.lhs() else {
        return None;
    };
    if var.name().as_deref() == Some(name) {
        Some(assign)
    } else {
        None
    }
}

/// Consults a function-like node's parameters (and, for a closure, its
/// capture list) for a binding named `name`.
fn resolve_at_boundary(boundary: &SyntaxNode, name: &str) -> Option<VarDef> {
    if let Some(function) = FunctionDecl::cast(boundary.clone()) {
        let params = function
            .params()
            .into_iter()
            .flat_map(|p| p.params().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        return find_param(params.into_iter(), name);
    }
    if let Some(method) = MethodDecl::cast(boundary.clone()) {
        let params = method
            .params()
            .into_iter()
            .flat_map(|p| p.params().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        return find_param(params.into_iter(), name);
    }
    if let Some(closure) = ClosureExpr::cast(boundary.clone()) {
        let params = closure
            .params()
            .into_iter()
            .flat_map(|p| p.params().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        if let Some(def) = find_param(params.into_iter(), name) {
            return Some(def);
        }
        let items = closure
            .captures()
            .into_iter()
            .flat_map(|c| c.items().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        return items
            .into_iter()
            .find(|item| item.name().is_some_and(|t| &t.text()[1..] == name))
            .map(VarDef::Capture);
    }
    None
}

fn find_param(params: impl Iterator<Item = Param>, name: &str) -> Option<VarDef> {
    params
        .into_iter()
        .find(|p| p.name().is_some_and(|t| &t.text()[1..] == name))
        .map(VarDef::Param)
}

#[cfg(test)]
mod tests {
    use zest_ast::Root;

    use super::*;

    fn vars_named(root: &Root, name: &str) -> Vec<VarExpr> {
        root.syntax()
            .descendants()
            .filter_map(VarExpr::cast)
            .filter(|v| v.name().as_deref() == Some(name))
            .collect()
    }

    #[test]
    fn resolves_nearest_preceding_assignment() {
        let root = zest_ast::parse("function f() { $a = 1; $a = 2; $b = $a; }");
        let uses = vars_named(&root, "a");
        let use_in_rhs = uses.last().unwrap();
        let def = resolve(use_in_rhs).expect("a definition should be found");
        match def {
            VarDef::Assignment(assign) => {
                let Some(Expr::IntLit(lit)) = assign.rhs() else {
                    panic!("expected int literal rhs");
                };
                assert_eq!(lit.syntax().text().to_string(), "2");
            }
            _ => panic!("expected an assignment"),
        }
    }

    #[test]
    fn resolves_parameter() {
        let root = zest_ast::parse("function f($x) { $y = $x; }");
        let uses = vars_named(&root, "x");
        let def = resolve(&uses[0]).expect("a definition should be found");
        assert!(matches!(def, VarDef::Param(_)));
    }

    #[test]
    fn does_not_cross_function_boundary() {
        let root = zest_ast::parse("$a = 1; function f() { $b = $a; }");
        let uses = vars_named(&root, "a");
        assert!(resolve(&uses[0]).is_none());
    }

    #[test]
    fn resolves_closure_capture() {
        let root = zest_ast::parse("$a = 1; $f = function() use ($a) { $b = $a; };");
        let uses = vars_named(&root, "a");
        let use_in_closure = uses.last().unwrap();
        let def = resolve(use_in_closure).expect("a definition should be found");
        assert!(matches!(def, VarDef::Capture(_)));
    }
}
