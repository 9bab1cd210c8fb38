//! Docblock parser collaborator (§6): extracts `@param`/`@return`/`@var`
//! type tags from a comment's text.
//!
//! This is intentionally small — a third-party docblock parser is out of
//! scope, and the analysis core only needs the type tags, not the full
//! structured-comment grammar (descriptions, `@deprecated`, etc).

use crate::fqn;
use crate::types::Type;
use zest_ast::UseMap;

/// A single parsed `@param` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    /// The parameter's name, without its leading `$`.
    pub name: String,
    /// The tag's type name, as written.
    pub type_name: String,
}

/// The type tags extracted from one docblock comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docblock {
    /// `@param $name Type` tags, in order.
    pub params: Vec<ParamTag>,
    /// The `@return Type` tag, if present.
    pub return_type: Option<String>,
    /// The `@var Type` tag, if present.
    pub var_type: Option<String>,
}

impl Docblock {
    /// Parses a `/** ... */`-style comment's text for type tags. Lines
    /// that don't start with a recognized tag are ignored.
    pub fn parse(comment: &str) -> Self {
        let comment = comment
            .trim()
            .trim_start_matches("/**")
            .trim_end_matches("*/");
        let mut docblock = Docblock::default();
        for line in comment.lines() {
            let line = line.trim().trim_start_matches('*').trim();
            let Some(rest) = line.strip_prefix('@') else {
                continue;
            };
            let mut words = rest.split_whitespace();
            match words.next() {
                Some("param") => {
                    let Some(type_name) = words.next() else {
                        continue;
                    };
                    let Some(name) = words.next() else {
                        continue;
                    };
                    docblock.params.push(ParamTag {
                        name: name.trim_start_matches('$').to_string(),
                        type_name: type_name.to_string(),
                    });
                }
                Some("return") => {
                    docblock.return_type = words.next().map(str::to_string);
                }
                Some("var") => {
                    docblock.var_type = words.next().map(str::to_string);
                }
                _ => {}
            }
        }
        docblock
    }
}

/// Resolves a docblock type-tag name (e.g. `int`, `\App\Foo`, `Foo`)
/// against the enclosing namespace and imports, producing a [`Type`].
pub fn resolve_tag_type(namespace: &str, uses: &UseMap, type_name: &str) -> Type {
    match type_name.trim_start_matches('\\') {
        "int" | "integer" => Type::Integer,
        "float" | "double" => Type::Float,
        "string" => Type::String,
        "bool" | "boolean" => Type::Boolean,
        "array" => Type::array(Type::Mixed, Type::Mixed),
        "void" => Type::Void,
        "null" => Type::Null,
        "callable" => Type::Callable,
        "mixed" => Type::Mixed,
        bare => {
            if type_name.starts_with('\\') {
                Type::Object(Some(fqn::qualify("", bare)))
            } else if let Some(target) = uses.resolve(bare) {
                Type::Object(Some(fqn::qualify("", target.trim_start_matches('\\'))))
            } else {
                Type::Object(Some(fqn::qualify(namespace, bare)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_param_and_return_tags() {
        let docblock = Docblock::parse(
            "/**\n * @param int $x\n * @param string $y\n * @return bool\n */",
        );
        assert_eq!(
            docblock.params,
            vec![
                ParamTag { name: "x".into(), type_name: "int".into() },
                ParamTag { name: "y".into(), type_name: "string".into() },
            ]
        );
        assert_eq!(docblock.return_type.as_deref(), Some("bool"));
    }

    #[test]
    fn parses_var_tag() {
        let docblock = Docblock::parse("/** @var \\App\\Foo */");
        assert_eq!(docblock.var_type.as_deref(), Some("\\App\\Foo"));
    }

    #[test]
    fn resolves_primitive_tag_type() {
        let uses = UseMap::default();
        assert_eq!(resolve_tag_type("App", &uses, "int"), Type::Integer);
    }

    #[test]
    fn resolves_class_tag_type_against_namespace() {
        let uses = UseMap::default();
        assert_eq!(
            resolve_tag_type("App", &uses, "Foo"),
            Type::Object(Some(crate::types::Fqn::new("\\App\\Foo")))
        );
    }
}
