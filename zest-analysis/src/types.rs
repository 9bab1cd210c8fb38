//! The FQN and static-type representations the rest of the crate is built
//! around.

use std::fmt;

/// A fully qualified name: the project-wide canonical identifier for a
/// definition.
///
/// Equality is byte-exact on the canonical string; there is no
/// case-insensitive or whitespace-tolerant comparison anywhere in the
/// crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fqn(String);

impl Fqn {
    /// Wraps an already-canonical FQN string.
    pub fn new(canonical: impl Into<String>) -> Self {
        Self(canonical.into())
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the FQN of a method, `OWNER::name()`.
    pub fn method(owner: &Fqn, name: &str) -> Self {
        Self(format!("{}::{name}()", owner.0))
    }

    /// Builds the FQN of an instance property or class constant,
    /// `OWNER::name`.
    pub fn member(owner: &Fqn, name: &str) -> Self {
        Self(format!("{}::{name}", owner.0))
    }

    /// Builds the FQN of a static property, `OWNER::$name`.
    pub fn static_member(owner: &Fqn, name: &str) -> Self {
        Self(format!("{}::${name}", owner.0))
    }

    /// Strips all namespace segments, leaving only the trailing
    /// `Name`/`Owner::member`-style tail. Used by the query facade's
    /// namespace-fallback policy.
    pub fn without_namespace(&self) -> Fqn {
        match self.0.rfind('\\') {
            Some(idx) => Fqn(self.0[idx + 1..].to_string()),
            None => self.clone(),
        }
    }
}

impl fmt::Display for Fqn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of symbol a [`crate::document::Definition`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A class declaration.
    Class,
    /// An interface declaration.
    Interface,
    /// A top-level function.
    Function,
    /// A method inside a class or interface.
    Method,
    /// An instance property.
    Property,
    /// A class constant.
    Constant,
}

/// A static type, as computed by the type resolver (C3).
///
/// [`Type::compound`] is the only way to build a [`Type::Compound`]; it
/// applies the normalization rules from the dispatch table so that every
/// `Compound` reachable from analysis code is already canonical
/// (duplicates collapsed, singletons unwrapped, any `Mixed` absorbs the
/// whole union).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The top type: inference gave up or was never attempted.
    Mixed,
    /// `true` / `false`.
    Boolean,
    /// A whole number.
    Integer,
    /// A floating-point number.
    Float,
    /// A text string.
    String,
    /// An instance of a class. `None` for an anonymous class.
    Object(Option<Fqn>),
    /// An array, with independently tracked value and key types.
    Array(Box<Type>, Box<Type>),
    /// A normalized union of two or more distinct alternatives.
    Compound(Vec<Type>),
    /// Something invocable (a closure or callable reference).
    Callable,
    /// The absence of a return value.
    Void,
    /// The `null` value.
    Null,
}

impl Type {
    /// Builds an array type from its value and key types.
    pub fn array(value: Type, key: Type) -> Type {
        Type::Array(Box::new(value), Box::new(key))
    }

    /// Builds a normalized union from a set of alternatives.
    ///
    /// Nested compounds are flattened, duplicates are dropped (first
    /// occurrence wins, so the result is deterministic), a single
    /// remaining alternative unwraps to itself, and any `Mixed` among the
    /// alternatives collapses the whole union to `Mixed`.
    pub fn compound(alternatives: impl IntoIterator<Item = Type>) -> Type {
        let mut flat = Vec::new();
        for ty in alternatives {
            match ty {
                Type::Compound(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.contains(&Type::Mixed) {
            return Type::Mixed;
        }
        let mut deduped: Vec<Type> = Vec::new();
        for ty in flat {
            if !deduped.contains(&ty) {
                deduped.push(ty);
            }
        }
        match deduped.len() {
            0 => Type::Mixed,
            1 => deduped.into_iter().next().expect("length checked above"),
            _ => Type::Compound(deduped),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Mixed => write!(f, "mixed"),
            Type::Boolean => write!(f, "bool"),
            Type::Integer => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Object(Some(fqn)) => write!(f, "{fqn}"),
            Type::Object(None) => write!(f, "object(anonymous)"),
            Type::Array(value, key) => write!(f, "array<{key}, {value}>"),
            Type::Compound(alts) => {
                let rendered: Vec<String> = alts.iter().map(ToString::to_string).collect();
                write!(f, "{}", rendered.join("|"))
            }
            Type::Callable => write!(f, "callable"),
            Type::Void => write!(f, "void"),
            Type::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_collapses_duplicates() {
        let ty = Type::compound([Type::Integer, Type::Integer, Type::String]);
        assert_eq!(ty, Type::Compound(vec![Type::Integer, Type::String]));
    }

    #[test]
    fn compound_unwraps_singleton() {
        assert_eq!(Type::compound([Type::Integer]), Type::Integer);
    }

    #[test]
    fn compound_absorbs_mixed() {
        let ty = Type::compound([Type::Integer, Type::Mixed, Type::String]);
        assert_eq!(ty, Type::Mixed);
    }

    #[test]
    fn without_namespace_strips_to_tail() {
        let fqn = Fqn::new("\\App\\strlen");
        assert_eq!(fqn.without_namespace().as_str(), "strlen");
    }
}
