//! Document Index (C4): per-file parse state, the definitions a file
//! contributes, and the FQNs it statically references.

use indexmap::IndexMap;
use indexmap::IndexSet;
use url::Url;
use zest_ast::AstNode;
use zest_ast::Expr;
use zest_ast::Root;
use zest_ast::UseMap;

use crate::docblock;
use crate::docblock::Docblock;
use crate::fqn;
use crate::types::Fqn;
use crate::types::SymbolKind;
use crate::types::Type;

/// One definition a document contributes to the project-wide symbol
/// graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// The definition's canonical name.
    pub fqn: Fqn,
    /// What kind of symbol this is.
    pub kind: SymbolKind,
    /// The document the definition lives in.
    pub uri: Url,
    /// The definition's byte range within that document's text.
    pub span: zest_ast::Span,
    /// The type declared at the definition site (a return type, a
    /// parameter's type hint, or a docblock `@var`/`@return` tag), if
    /// any. `None` means no annotation was present, not that the symbol
    /// is untyped — inference falls back to widening.
    pub declared_type: Option<Type>,
}

/// What changed between a document's previous and current content, as
/// computed by [`Document::update_content`]. The symbol graph applies
/// this directly rather than re-deriving it from two full snapshots.
#[derive(Debug, Clone, Default)]
pub struct DocumentDelta {
    /// Definitions the new content introduces or replaces.
    pub added: Vec<Definition>,
    /// Definitions the previous content had that the new content lacks.
    pub removed: Vec<Fqn>,
    /// FQNs newly referenced by the new content.
    pub references_added: Vec<Fqn>,
    /// FQNs the previous content referenced that the new content no
    /// longer does.
    pub references_removed: Vec<Fqn>,
}

/// A single analyzed document: its text, parsed syntax tree, resolved
/// namespace/import state, and the definitions and references it
/// contributes to the project.
#[derive(Debug, Clone)]
pub struct Document {
    uri: Url,
    text: String,
    /// The immutable, `Send`/`Sync` green tree. The typed [`Root`] (built
    /// on rowan's `Rc`-based cursor layer, which is neither) is
    /// reconstructed on demand from this by [`Document::root`] rather
    /// than stored, so a `Document` can live behind a lock shared across
    /// an async runtime's worker threads.
    green: rowan::GreenNode,
    namespace: String,
    uses: UseMap,
    definitions: IndexMap<Fqn, Definition>,
    references: IndexSet<Fqn>,
    /// Parser diagnostics from the most recent parse. Non-aborting: a
    /// document with diagnostics still has a best-effort tree and index.
    pub diagnostics: Vec<String>,
}

impl Document {
    /// Parses `text` and builds a fresh index for it.
    pub fn new(uri: Url, text: String) -> Self {
        let parsed = zest_syntax::parse(&text);
        let diagnostics = parsed.errors.clone();
        let green = parsed.syntax().green().into_owned();
        let root = Root::cast(zest_syntax::SyntaxNode::new_root(green.clone()))
            .expect("parser always produces a Root node");
        let namespace = fqn::namespace_of(&root);
        let uses = UseMap::build(&root);
        let mut document = Self {
            uri,
            text,
            green,
            namespace,
            uses,
            definitions: IndexMap::new(),
            references: IndexSet::new(),
            diagnostics,
        };
        document.reindex();
        document
    }

    /// The document's URI.
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// The document's current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The document's parsed syntax tree, freshly rebuilt from the
    /// stored green tree.
    pub fn root(&self) -> Root {
        Root::cast(zest_syntax::SyntaxNode::new_root(self.green.clone()))
            .expect("parser always produces a Root node")
    }

    /// The namespace declared at the top of the file (empty for the
    /// global namespace).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The file's `use`-import table.
    pub fn uses(&self) -> &UseMap {
        &self.uses
    }

    /// The definitions this document contributes, keyed by FQN.
    pub fn definitions(&self) -> &IndexMap<Fqn, Definition> {
        &self.definitions
    }

    /// The FQNs this document statically references (call sites, static
    /// fetches, `new`, `use` imports — anything resolvable without type
    /// inference).
    pub fn references(&self) -> &IndexSet<Fqn> {
        &self.references
    }

    /// Replaces the document's content, re-parsing and re-indexing it,
    /// and returns what changed so the symbol graph can be updated
    /// incrementally instead of rebuilt from scratch.
    pub fn update_content(&mut self, text: String) -> DocumentDelta {
        let previous_definitions = std::mem::take(&mut self.definitions);
        let previous_references = std::mem::take(&mut self.references);

        let parsed = zest_syntax::parse(&text);
        self.diagnostics = parsed.errors.clone();
        self.green = parsed.syntax().green().into_owned();
        self.text = text;
        let root = self.root();
        self.namespace = fqn::namespace_of(&root);
        self.uses = UseMap::build(&root);
        self.reindex();

        let mut delta = DocumentDelta::default();
        for (fqn, def) in &self.definitions {
            if previous_definitions.get(fqn) != Some(def) {
                delta.added.push(def.clone());
            }
        }
        for fqn in previous_definitions.keys() {
            if !self.definitions.contains_key(fqn) {
                delta.removed.push(fqn.clone());
            }
        }
        for fqn in &self.references {
            if !previous_references.contains(fqn) {
                delta.references_added.push(fqn.clone());
            }
        }
        for fqn in &previous_references {
            if !self.references.contains(fqn) {
                delta.references_removed.push(fqn.clone());
            }
        }
        delta
    }

    /// The definitions and references of the initial parse, expressed as
    /// a `DocumentDelta` where everything is "added" — used to seed the
    /// symbol graph when a document is first opened.
    pub fn initial_delta(&self) -> DocumentDelta {
        DocumentDelta {
            added: self.definitions.values().cloned().collect(),
            removed: Vec::new(),
            references_added: self.references.iter().cloned().collect(),
            references_removed: Vec::new(),
        }
    }

    fn reindex(&mut self) {
        self.definitions.clear();
        self.references.clear();
        let root = self.root();

        for class in root.classes().collect::<Vec<_>>() {
            self.index_class_like(
                class.name(),
                SymbolKind::Class,
                class.methods(),
                class.properties(),
                class.consts(),
            );
            for extends in class.extends() {
                self.reference_name(&extends);
            }
        }
        for iface in root.interfaces().collect::<Vec<_>>() {
            self.index_class_like(
                iface.name(),
                SymbolKind::Interface,
                iface.methods(),
                iface.properties(),
                iface.consts(),
            );
            for extends in iface.extends() {
                self.reference_name(&extends);
            }
        }
        for function in root.functions() {
            let Some(name) = function.name() else {
                continue;
            };
            let fqn = fqn::qualify(&self.namespace, name.text());
            let declared_type = function
                .return_type()
                .and_then(|ty| self.type_from_hint(&ty))
                .or_else(|| self.docblock_return_type(function.syntax()));
            self.definitions.insert(
                fqn.clone(),
                Definition {
                    fqn,
                    kind: SymbolKind::Function,
                    uri: self.uri.clone(),
                    span: function.span(),
                    declared_type,
                },
            );
        }

        for const_decl in root.consts() {
            let Some(name) = const_decl.name() else {
                continue;
            };
            let fqn = fqn::qualify(&self.namespace, name.text());
            self.definitions.insert(
                fqn.clone(),
                Definition {
                    fqn,
                    kind: SymbolKind::Constant,
                    uri: self.uri.clone(),
                    span: const_decl.span(),
                    declared_type: None,
                },
            );
        }

        let references: Vec<Expr> = root.syntax().descendants().filter_map(Expr::cast).collect();
        for expr in &references {
            self.collect_static_references(expr);
        }
        let use_names: Vec<zest_ast::QualifiedName> =
            root.uses().filter_map(|u| u.name()).collect();
        for name in &use_names {
            self.reference_name(name);
        }
    }

    fn index_class_like(
        &mut self,
        name: Option<zest_syntax::SyntaxToken>,
        kind: SymbolKind,
        methods: impl Iterator<Item = zest_ast::MethodDecl>,
        properties: impl Iterator<Item = zest_ast::PropertyDecl>,
        consts: impl Iterator<Item = zest_ast::ConstDecl>,
    ) {
        let Some(name) = name else { return };
        let owner = fqn::qualify(&self.namespace, name.text());
        self.definitions.insert(
            owner.clone(),
            Definition {
                fqn: owner.clone(),
                kind,
                uri: self.uri.clone(),
                span: name.text_range(),
                declared_type: None,
            },
        );
        for method in methods {
            let Some(method_name) = method.name() else {
                continue;
            };
            let fqn = Fqn::method(&owner, method_name.text());
            let declared_type = method
                .return_type()
                .and_then(|ty| self.type_from_hint(&ty))
                .or_else(|| self.docblock_return_type(method.syntax()));
            self.definitions.insert(
                fqn.clone(),
                Definition {
                    fqn,
                    kind: SymbolKind::Method,
                    uri: self.uri.clone(),
                    span: method.span(),
                    declared_type,
                },
            );
        }
        for property in properties {
            let Some(prop_name) = property.name() else {
                continue;
            };
            let fqn = Fqn::member(&owner, &prop_name.text()[1..]);
            let declared_type = self.docblock_var_type(property.syntax());
            self.definitions.insert(
                fqn.clone(),
                Definition {
                    fqn,
                    kind: SymbolKind::Property,
                    uri: self.uri.clone(),
                    span: property.span(),
                    declared_type,
                },
            );
        }
        for constant in consts {
            let Some(const_name) = constant.name() else {
                continue;
            };
            let fqn = Fqn::member(&owner, const_name.text());
            self.definitions.insert(
                fqn.clone(),
                Definition {
                    fqn,
                    kind: SymbolKind::Constant,
                    uri: self.uri.clone(),
                    span: constant.span(),
                    declared_type: None,
                },
            );
        }
    }

    fn type_from_hint(&self, name: &zest_ast::QualifiedName) -> Option<Type> {
        let text = name.text();
        let bare = text.trim_start_matches('\\');
        Some(match bare {
            "int" | "integer" => Type::Integer,
            "float" | "double" => Type::Float,
            "string" => Type::String,
            "bool" | "boolean" => Type::Boolean,
            "array" => Type::array(Type::Mixed, Type::Mixed),
            "void" => Type::Void,
            "callable" => Type::Callable,
            _ => Type::Object(Some(fqn::resolve_name(&self.namespace, &self.uses, name))),
        })
    }

    /// Falls back to a declaration's preceding `@return` docblock tag
    /// when the grammar has no explicit return-type hint.
    fn docblock_return_type(&self, node: &zest_ast::SyntaxNode) -> Option<Type> {
        let comment = zest_ast::preceding_doc_comment(node)?;
        let type_name = Docblock::parse(&comment).return_type?;
        Some(docblock::resolve_tag_type(&self.namespace, &self.uses, &type_name))
    }

    /// Falls back to a declaration's preceding `@var` docblock tag when
    /// the grammar has no explicit type hint (properties have none).
    fn docblock_var_type(&self, node: &zest_ast::SyntaxNode) -> Option<Type> {
        let comment = zest_ast::preceding_doc_comment(node)?;
        let type_name = Docblock::parse(&comment).var_type?;
        Some(docblock::resolve_tag_type(&self.namespace, &self.uses, &type_name))
    }

    fn reference_name(&mut self, name: &zest_ast::QualifiedName) {
        self.references
            .insert(fqn::resolve_name(&self.namespace, &self.uses, name));
    }

    /// Records the FQNs reachable from `expr` without needing type
    /// inference: call callees, statically named classes, static
    /// fetches, and class-constant fetches. Dynamic-receiver member
    /// access is resolved lazily by the query facade instead.
    fn collect_static_references(&mut self, expr: &Expr) {
        match expr {
            Expr::Call(call) => {
                if let Some(name) = call.callee() {
                    self.reference_name(&name);
                }
            }
            Expr::New(new_expr) => {
                if let Some(class) = new_expr.class() {
                    self.reference_name(&class);
                }
            }
            Expr::StaticCall(call) => {
                if let Some(class) = call.class() {
                    self.reference_name(&class);
                }
            }
            Expr::StaticPropertyFetch(fetch) => {
                if let Some(class) = fetch.class() {
                    self.reference_name(&class);
                }
            }
            Expr::ClassConstFetch(fetch) => {
                if let Some(class) = fetch.class() {
                    self.reference_name(&class);
                }
            }
            Expr::Instanceof(inst) => {
                if let Some(class) = inst.class() {
                    self.reference_name(&class);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(source: &str) -> Document {
        Document::new(Url::parse("file:///t.zst").unwrap(), source.to_string())
    }

    #[test]
    fn indexes_top_level_function() {
        let document = doc("namespace App;\nfunction greet() {}\n");
        assert!(document.definitions().contains_key(&Fqn::new("\\App\\greet")));
    }

    #[test]
    fn indexes_top_level_constant() {
        let document = doc("namespace App;\nconst MAX = 10;\n");
        let fqn = Fqn::new("\\App\\MAX");
        let definition = document
            .definitions()
            .get(&fqn)
            .expect("a global constant definition");
        assert_eq!(definition.kind, SymbolKind::Constant);
    }

    #[test]
    fn infers_function_return_type_from_docblock() {
        let document = doc("/**\n * @return int\n */\nfunction count() {}\n");
        let definition = document
            .definitions()
            .get(&Fqn::new("\\count"))
            .expect("a function definition");
        assert_eq!(definition.declared_type, Some(Type::Integer));
    }

    #[test]
    fn explicit_return_type_hint_wins_over_docblock() {
        let document = doc("/**\n * @return int\n */\nfunction count(): string {}\n");
        let definition = document
            .definitions()
            .get(&Fqn::new("\\count"))
            .expect("a function definition");
        assert_eq!(definition.declared_type, Some(Type::String));
    }

    #[test]
    fn infers_property_type_from_docblock_var_tag() {
        let document = doc("class Foo {\n/**\n * @var string\n */\n$name = \"\";\n}\n");
        let definition = document
            .definitions()
            .get(&Fqn::new("\\Foo::name"))
            .expect("a property definition");
        assert_eq!(definition.declared_type, Some(Type::String));
    }

    #[test]
    fn indexes_class_members() {
        let document = doc("class Foo { function bar() {} $baz = 1; const QUX = 1; }");
        assert!(document.definitions().contains_key(&Fqn::new("\\Foo::bar()")));
        assert!(document.definitions().contains_key(&Fqn::new("\\Foo::baz")));
        assert!(document.definitions().contains_key(&Fqn::new("\\Foo::QUX")));
    }

    #[test]
    fn tracks_static_references() {
        let document = doc("strlen(\"x\"); new Foo();");
        assert!(document.references().contains(&Fqn::new("\\strlen")));
        assert!(document.references().contains(&Fqn::new("\\Foo")));
    }

    #[test]
    fn update_content_reports_delta() {
        let mut document = doc("function a() {}\n");
        let delta = document.update_content("function a() {}\nfunction b() {}\n".to_string());
        assert_eq!(delta.added.len(), 1);
        assert_eq!(delta.added[0].fqn, Fqn::new("\\b"));
        assert!(delta.removed.is_empty());
    }
}
