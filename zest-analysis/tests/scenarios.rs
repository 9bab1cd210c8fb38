//! Integration test exercising the project's concrete scenarios (S1-S6)
//! end to end through the query facade, as opposed to each module's own
//! unit tests against their internal APIs directly.

use url::Url;
use zest_analysis::Type;
use zest_analysis::Workspace;
use zest_analysis::handlers;
use zest_ast::Stmt;

/// The type of the last top-level expression statement in `uri`'s
/// document, resolved through [`Workspace::type_of_expression`].
fn last_expr_type(workspace: &Workspace, uri: &Url) -> Type {
    let document = workspace.document(uri).expect("document should be open");
    let expr = document
        .root()
        .stmts()
        .filter_map(|stmt| match stmt {
            Stmt::Expr(expr_stmt) => expr_stmt.expr(),
            _ => None,
        })
        .last()
        .expect("an expression statement");
    workspace.type_of_expression(document, &expr)
}

#[test]
fn scenario_s1_variable_chain() {
    let mut workspace = Workspace::new();
    let uri = Url::parse("file:///s1.zst").unwrap();
    workspace.open_document(uri.clone(), "$a = 5; $b = $a; $c = $b;".to_string());
    assert_eq!(last_expr_type(&workspace, &uri), Type::Integer);
}

#[test]
fn scenario_s2_method_return_type() {
    let mut workspace = Workspace::new();
    let uri = Url::parse("file:///s2.zst").unwrap();
    workspace.open_document(
        uri.clone(),
        "class Foo { function bar(): string {} }\n(new Foo())->bar();".to_string(),
    );
    assert_eq!(last_expr_type(&workspace, &uri), Type::String);
}

#[test]
fn scenario_s3_dynamic_receiver_is_mixed() {
    let mut workspace = Workspace::new();
    let uri = Url::parse("file:///s3.zst").unwrap();
    workspace.open_document(uri.clone(), "$x->bar();".to_string());
    assert_eq!(last_expr_type(&workspace, &uri), Type::Mixed);
}

#[test]
fn scenario_s4_namespace_fallback_resolves_bare_call_to_the_global_function() {
    let mut workspace = Workspace::new();
    let global = Url::parse("file:///global.zst").unwrap();
    let app = Url::parse("file:///app.zst").unwrap();
    workspace.open_document(global.clone(), "function strlen() {}".to_string());
    // "strlen($s);" on the second line: s(0)t(1)r(2)l(3)e(4)n(5)...
    workspace.open_document(app.clone(), "namespace App;\nstrlen($s);\n".to_string());

    let location = handlers::goto_definition(&workspace, &app, lsp_types::Position::new(1, 2))
        .unwrap()
        .expect("namespace fallback should resolve to the global function");
    assert_eq!(location.uri, global);
}

#[test]
fn scenario_s4_namespace_fallback_does_not_apply_to_a_static_method_call() {
    let mut workspace = Workspace::new();
    let uri = Url::parse("file:///app.zst").unwrap();
    // No `\App\Thing` is ever defined, and no global `Thing` either: the
    // static-call class name must not fall back to a bare global lookup
    // the way a call-site/const-fetch callee would.
    // "Thing::method();" on the second line: T(0)h(1)i(2)n(3)g(4)...
    workspace.open_document(uri.clone(), "namespace App;\nThing::method();\n".to_string());

    let location = handlers::goto_definition(&workspace, &uri, lsp_types::Position::new(1, 1)).unwrap();
    assert!(location.is_none());
}

#[test]
fn scenario_s5_ternary_union() {
    let mut workspace = Workspace::new();
    let uri = Url::parse("file:///s5.zst").unwrap();
    workspace.open_document(uri.clone(), "$x = cond() ? 1 : \"a\";".to_string());
    assert_eq!(
        last_expr_type(&workspace, &uri),
        Type::compound([Type::Integer, Type::String])
    );
}

#[test]
fn scenario_s6_closing_the_defining_document_unresolves_the_reference() {
    let mut workspace = Workspace::new();
    let a = Url::parse("file:///a.zst").unwrap();
    let b = Url::parse("file:///b.zst").unwrap();
    workspace.open_document(a.clone(), "\\B::m();".to_string());
    workspace.open_document(b.clone(), "class B { function m() {} }".to_string());

    // "\B::m();": backslash(0) B(1) :(2) :(3) m(4)...
    assert!(
        handlers::goto_definition(&workspace, &a, lsp_types::Position::new(0, 1))
            .unwrap()
            .is_some()
    );

    workspace.close_document(&b);

    assert!(
        handlers::goto_definition(&workspace, &a, lsp_types::Position::new(0, 1))
            .unwrap()
            .is_none()
    );
}
