//! A preorder visitor over the typed AST.
//!
//! Grounded on the observation that every node kind the analysis core
//! cares about casts independently from the same underlying
//! [`SyntaxNode`]; a visitor just needs to attempt every cast at each
//! node and let callers override the handlers they need.

use crate::AstNode;
use crate::ClassDecl;
use crate::ConstDecl;
use crate::Expr;
use crate::FunctionDecl;
use crate::InterfaceDecl;
use crate::MethodDecl;
use crate::PropertyDecl;
use crate::Root;

/// Callbacks invoked while walking a parsed file.
///
/// Default method bodies do nothing, so implementors only override the
/// node kinds they care about.
#[allow(unused_variables)]
pub trait Visitor {
    /// Called for every class declaration.
    fn visit_class(&mut self, node: &ClassDecl) {}
    /// Called for every interface declaration.
    fn visit_interface(&mut self, node: &InterfaceDecl) {}
    /// Called for every top-level or method function declaration.
    fn visit_function(&mut self, node: &FunctionDecl) {}
    /// Called for every method declaration.
    fn visit_method(&mut self, node: &MethodDecl) {}
    /// Called for every property declaration.
    fn visit_property(&mut self, node: &PropertyDecl) {}
    /// Called for every class constant declaration.
    fn visit_const(&mut self, node: &ConstDecl) {}
    /// Called for every expression node.
    fn visit_expr(&mut self, node: &Expr) {}
}

/// Walks every node in `root` in document order, dispatching to `visitor`.
pub fn walk(root: &Root, visitor: &mut impl Visitor) {
    for node in root.syntax().descendants() {
        if let Some(class) = ClassDecl::cast(node.clone()) {
            visitor.visit_class(&class);
        } else if let Some(interface) = InterfaceDecl::cast(node.clone()) {
            visitor.visit_interface(&interface);
        } else if let Some(function) = FunctionDecl::cast(node.clone()) {
            visitor.visit_function(&function);
        } else if let Some(method) = MethodDecl::cast(node.clone()) {
            visitor.visit_method(&method);
        } else if let Some(property) = PropertyDecl::cast(node.clone()) {
            visitor.visit_property(&property);
        } else if let Some(const_decl) = ConstDecl::cast(node.clone()) {
            visitor.visit_const(&const_decl);
        } else if let Some(expr) = Expr::cast(node) {
            visitor.visit_expr(&expr);
        }
    }
}
