//! Type Resolver (C3), plus the member-reference half of the FQN Builder
//! (C1) that needs C3 to resolve a dynamic receiver's class.
//!
//! Both live behind one [`Ctx`] because they are mutually recursive: a
//! function-call's FQN feeds type inference (to find its declared return
//! type), and a method call's FQN needs the receiver's *type* first. A
//! small in-progress set breaks cycles (`$a = $a;`, or type inference
//! that bottoms out back at the same variable across function calls), per
//! §4.3's "infinite recursion" failure semantics.

use std::cell::RefCell;
use std::collections::HashSet;

use zest_ast::AstNode;
use zest_ast::Expr;
use zest_ast::UseMap;
use zest_ast::VarExpr;

use crate::config::Config;
use crate::document::Document;
use crate::fqn;
use crate::graph::SymbolGraph;
use crate::types::Fqn;
use crate::types::Type;
use crate::vars;
use crate::vars::VarDef;

/// Analysis context for a single document: the namespace/import state
/// needed to resolve names, the project-wide symbol graph needed to look
/// up definitions, and a cycle guard shared across a query.
#[derive(Debug)]
pub struct Ctx<'a> {
    /// The document the node being analyzed belongs to.
    pub document: &'a Document,
    /// The project-wide symbol graph.
    pub graph: &'a SymbolGraph,
    /// Active policy knobs.
    pub config: &'a Config,
    in_progress: RefCell<HashSet<InProgressKey>>,
}

/// Identifies a node (by its span) plus the kind of query in flight, so a
/// cyclic re-entry on the *same* query is caught without also rejecting
/// unrelated nested queries against the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum InProgressKey {
    TypeOf(zest_ast::Span),
    VarDefType(zest_ast::Span),
}

impl<'a> Ctx<'a> {
    /// Builds a context for querying `document` against `graph`.
    pub fn new(document: &'a Document, graph: &'a SymbolGraph, config: &'a Config) -> Self {
        Self {
            document,
            graph,
            config,
            in_progress: RefCell::new(HashSet::new()),
        }
    }

    fn namespace(&self) -> &str {
        self.document.namespace()
    }

    fn uses(&self) -> &UseMap {
        self.document.uses()
    }

    /// Guards `f` against re-entrant evaluation of the same key, returning
    /// `Mixed` on cyclic re-entry instead of recursing forever.
    fn guarded(&self, key: InProgressKey, f: impl FnOnce() -> Type) -> Type {
        if !self.in_progress.borrow_mut().insert(key) {
            return Type::Mixed;
        }
        let result = f();
        self.in_progress.borrow_mut().remove(&key);
        result
    }

    /// C3: the static type of an expression. Total over every expression
    /// kind; unresolvable shapes conservatively widen to [`Type::Mixed`].
    pub fn type_of(&self, expr: &Expr) -> Type {
        let key = InProgressKey::TypeOf(expr.span());
        self.guarded(key, || self.type_of_uncached(expr))
    }

    fn type_of_uncached(&self, expr: &Expr) -> Type {
        match expr {
            Expr::Var(var) => self.type_of_var(var),
            Expr::IntLit(_) => Type::Integer,
            Expr::FloatLit(_) => Type::Float,
            Expr::StringLit(_) => Type::String,
            Expr::BoolLit(_) => Type::Boolean,
            Expr::NullLit(_) => Type::Null,
            Expr::Paren(paren) => paren.inner().map_or(Type::Mixed, |inner| self.type_of(&inner)),
            Expr::Assign(assign) => assign.rhs().map_or(Type::Mixed, |rhs| self.type_of(&rhs)),
            Expr::Name(name) => self.type_of_name(name),
            Expr::Call(call) => self.type_of_call(call),
            Expr::MethodCall(call) => self.type_of_method_call(call),
            Expr::PropertyFetch(fetch) => self.type_of_property_fetch(fetch),
            Expr::StaticCall(call) => self.type_of_static_call(call),
            Expr::StaticPropertyFetch(fetch) => self.type_of_static_property_fetch(fetch),
            Expr::ClassConstFetch(fetch) => self.type_of_class_const_fetch(fetch),
            Expr::New(new_expr) => self.type_of_new(new_expr),
            Expr::AnonClass(_) => Type::Object(None),
            Expr::Clone(clone_expr) => clone_expr
                .operand()
                .map_or(Type::Mixed, |operand| self.type_of(&operand)),
            Expr::Ternary(ternary) => Type::compound([
                ternary.then_branch().map_or(Type::Mixed, |e| self.type_of(&e)),
                ternary.else_branch().map_or(Type::Mixed, |e| self.type_of(&e)),
            ]),
            Expr::ShortTernary(short) => Type::compound([
                short.condition().map_or(Type::Mixed, |e| self.type_of(&e)),
                short.else_branch().map_or(Type::Mixed, |e| self.type_of(&e)),
            ]),
            Expr::NullCoalesce(coalesce) => Type::compound([
                coalesce.lhs().map_or(Type::Mixed, |e| self.type_of(&e)),
                coalesce.rhs().map_or(Type::Mixed, |e| self.type_of(&e)),
            ]),
            Expr::Instanceof(_)
            | Expr::Not(_)
            | Expr::Empty(_)
            | Expr::Isset(_)
            | Expr::Eq(_)
            | Expr::NotEq(_)
            | Expr::Identical(_)
            | Expr::NotIdentical(_)
            | Expr::Lt(_)
            | Expr::Gt(_)
            | Expr::Le(_)
            | Expr::Ge(_)
            | Expr::And(_)
            | Expr::Or(_)
            | Expr::Xor(_) => Type::Boolean,
            Expr::Concat(_) => Type::String,
            Expr::Cast(cast) => self.type_of_cast(cast),
            Expr::Add(binary) => self.type_of_arithmetic(binary.lhs(), binary.rhs()),
            Expr::Sub(binary) => self.type_of_arithmetic(binary.lhs(), binary.rhs()),
            Expr::Mul(binary) => self.type_of_arithmetic(binary.lhs(), binary.rhs()),
            Expr::Div(binary) => self.type_of_arithmetic(binary.lhs(), binary.rhs()),
            Expr::Pow(binary) => self.type_of_arithmetic(binary.lhs(), binary.rhs()),
            Expr::Mod(_) => Type::Integer,
            Expr::ArrayLiteral(array) => self.type_of_array_literal(array),
            Expr::Index(index) => self.type_of_index(index),
            Expr::Include(_) => Type::Mixed,
            Expr::Closure(_) => Type::Callable,
            Expr::Neg(neg) => neg.operand().map_or(Type::Mixed, |e| self.type_of(&e)),
        }
    }

    fn type_of_var(&self, var: &VarExpr) -> Type {
        let key = InProgressKey::VarDefType(var.span());
        self.guarded(key, || match vars::resolve(var) {
            Some(VarDef::Assignment(assign)) => {
                assign.rhs().map_or(Type::Mixed, |rhs| self.type_of(&rhs))
            }
            Some(VarDef::Param(param)) => param
                .ty()
                .map(|ty| self.type_from_name(&ty))
                .unwrap_or(Type::Mixed),
            Some(VarDef::Capture(_)) => Type::Mixed,
            None => Type::Mixed,
        })
    }

    fn type_from_name(&self, name: &zest_ast::QualifiedName) -> Type {
        match name.text().trim_start_matches('\\') {
            "int" | "integer" => Type::Integer,
            "float" | "double" => Type::Float,
            "string" => Type::String,
            "bool" | "boolean" => Type::Boolean,
            "array" => Type::array(Type::Mixed, Type::Mixed),
            "void" => Type::Void,
            "null" => Type::Null,
            "callable" => Type::Callable,
            _ => Type::Object(Some(fqn::resolve_name(
                self.namespace(),
                self.uses(),
                name,
            ))),
        }
    }

    fn type_of_name(&self, name_expr: &zest_ast::NameExpr) -> Type {
        let Some(name) = name_expr.name() else {
            return Type::Mixed;
        };
        match name.text().trim_start_matches('\\') {
            "true" | "false" => return Type::Boolean,
            _ => {}
        }
        let fqn = fqn::resolve_name(self.namespace(), self.uses(), &name);
        self.definition_declared_type(&fqn)
    }

    fn type_of_call(&self, call: &zest_ast::CallExpr) -> Type {
        let Some(name) = call.callee() else {
            return Type::Mixed;
        };
        let fqn = fqn::resolve_name(self.namespace(), self.uses(), &name);
        match self.lookup_with_fallback(&fqn, true) {
            Some(def) => def.declared_type.clone().unwrap_or(Type::Mixed),
            None => Type::Mixed,
        }
    }

    fn type_of_method_call(&self, call: &zest_ast::MethodCallExpr) -> Type {
        let (Some(receiver), Some(name)) = (call.receiver(), call.name()) else {
            return Type::Mixed;
        };
        let Type::Object(Some(owner)) = self.type_of(&receiver) else {
            return Type::Mixed;
        };
        let fqn = Fqn::method(&owner, name.text());
        self.definition_declared_type(&fqn)
    }

    fn type_of_property_fetch(&self, fetch: &zest_ast::PropertyFetchExpr) -> Type {
        let (Some(receiver), Some(name)) = (fetch.receiver(), fetch.name()) else {
            return Type::Mixed;
        };
        let Type::Object(Some(owner)) = self.type_of(&receiver) else {
            return Type::Mixed;
        };
        let fqn = Fqn::member(&owner, name.text());
        self.definition_declared_type(&fqn)
    }

    fn type_of_static_call(&self, call: &zest_ast::StaticCallExpr) -> Type {
        let (Some(class), Some(name)) = (call.class(), call.name()) else {
            return Type::Mixed;
        };
        let owner = fqn::resolve_name(self.namespace(), self.uses(), &class);
        let fqn = Fqn::method(&owner, name.text());
        self.definition_declared_type(&fqn)
    }

    fn type_of_static_property_fetch(&self, fetch: &zest_ast::StaticPropertyFetchExpr) -> Type {
        let (Some(class), Some(name)) = (fetch.class(), fetch.name()) else {
            return Type::Mixed;
        };
        let owner = fqn::resolve_name(self.namespace(), self.uses(), &class);
        let fqn = Fqn::static_member(&owner, &name);
        self.definition_declared_type(&fqn)
    }

    fn type_of_class_const_fetch(&self, fetch: &zest_ast::ClassConstFetchExpr) -> Type {
        let (Some(class), Some(name)) = (fetch.class(), fetch.name()) else {
            return Type::Mixed;
        };
        let owner = fqn::resolve_name(self.namespace(), self.uses(), &class);
        let fqn = Fqn::member(&owner, name.text());
        self.definition_declared_type(&fqn)
    }

    fn type_of_new(&self, new_expr: &zest_ast::NewExpr) -> Type {
        if new_expr.class_expr().is_some() {
            return Type::Mixed;
        }
        match new_expr.class() {
            Some(class) => Type::Object(Some(fqn::resolve_name(
                self.namespace(),
                self.uses(),
                &class,
            ))),
            None => Type::Mixed,
        }
    }

    fn type_of_cast(&self, cast: &zest_ast::CastExpr) -> Type {
        match cast.type_name().as_deref() {
            Some("int") => Type::Integer,
            Some("float") => Type::Float,
            Some("string") => Type::String,
            Some("bool") => Type::Boolean,
            Some("array") => Type::array(Type::Mixed, Type::Mixed),
            Some("object") => Type::Object(None),
            _ => Type::Mixed,
        }
    }

    fn type_of_arithmetic(&self, lhs: Option<Expr>, rhs: Option<Expr>) -> Type {
        if !self.config.promote_float_arithmetic {
            return Type::Integer;
        }
        let is_float = |e: Option<Expr>| matches!(e.map(|e| self.type_of(&e)), Some(Type::Float));
        if is_float(lhs) || is_float(rhs) {
            Type::Float
        } else {
            Type::Integer
        }
    }

    fn type_of_array_literal(&self, array: &zest_ast::ArrayLiteralExpr) -> Type {
        let mut value_types = Vec::new();
        let mut key_types = Vec::new();
        for item in array.items() {
            if let Some(value) = item.value() {
                value_types.push(self.type_of(&value));
            }
            match item.key() {
                Some(key) => key_types.push(self.type_of(&key)),
                None => key_types.push(Type::Integer),
            }
        }
        Type::array(Type::compound(value_types), Type::compound(key_types))
    }

    fn type_of_index(&self, index: &zest_ast::IndexExpr) -> Type {
        let Some(base) = index.base() else {
            return Type::Mixed;
        };
        match self.type_of(&base) {
            Type::Array(value, _) => *value,
            _ => Type::Mixed,
        }
    }

    /// Looks up `fqn` in the symbol graph, applying namespace fallback
    /// when `allow_fallback` is set (the facade restricts this to
    /// call-site/const-fetch parents per §4.6/§8 property 6).
    pub fn lookup_with_fallback(
        &self,
        fqn: &Fqn,
        allow_fallback: bool,
    ) -> Option<&crate::document::Definition> {
        if let Some(def) = self.graph.definition(fqn) {
            return Some(def);
        }
        if allow_fallback && self.config.namespace_fallback {
            let bare = fqn.without_namespace();
            let bare = if bare.as_str().contains("::") {
                bare
            } else {
                Fqn::new(format!("\\{}", bare.as_str()))
            };
            return self.graph.definition(&bare);
        }
        None
    }

    fn definition_declared_type(&self, fqn: &Fqn) -> Type {
        self.lookup_with_fallback(fqn, false)
            .and_then(|def| def.declared_type.clone())
            .unwrap_or(Type::Mixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::document::Document;
    use crate::graph::SymbolGraph;

    fn type_of_last_expr(source: &str) -> Type {
        let document = Document::new(url::Url::parse("file:///t.zst").unwrap(), source.to_string());
        let graph = SymbolGraph::new();
        let config = Config::default();
        let ctx = Ctx::new(&document, &graph, &config);
        // The last top-level expression statement, not the last descendant
        // in document order — `descendants()` is pre-order, so its last
        // yield is the deepest-rightmost leaf (e.g. the else-branch
        // literal of a trailing ternary), not the outer expression.
        let expr = document
            .root()
            .stmts()
            .filter_map(|stmt| match stmt {
                zest_ast::Stmt::Expr(expr_stmt) => expr_stmt.expr(),
                _ => None,
            })
            .last()
            .expect("an expression statement");
        ctx.type_of(&expr)
    }

    #[test]
    fn scenario_s1_variable_chain() {
        assert_eq!(
            type_of_last_expr("$a = 5; $b = $a; $c = $b;"),
            Type::Integer
        );
    }

    #[test]
    fn scenario_s3_dynamic_receiver_is_mixed() {
        assert_eq!(type_of_last_expr("$x->bar();"), Type::Mixed);
    }

    #[test]
    fn scenario_s5_ternary_union() {
        assert_eq!(
            type_of_last_expr("$x = cond() ? 1 : \"a\";"),
            Type::compound([Type::Integer, Type::String])
        );
    }
}
