//! Analysis-wide policy knobs.

/// Policy knobs that change how the analysis core resolves names and
/// types. Every field defaults to the behavior described by the core
/// algorithm in the absence of configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Whether an unresolved call-site or constant-fetch FQN falls back
    /// to a bare-name lookup after stripping its namespace, per §4.6.
    pub namespace_fallback: bool,
    /// Whether `+`/`-`/`*`/`/`/`**` widen to [`crate::types::Type::Float`]
    /// when either operand is a float. Left `false` by default: arithmetic
    /// stays `Integer`-typed regardless of operand types, per §9.
    pub promote_float_arithmetic: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace_fallback: true,
            promote_float_arithmetic: false,
        }
    }
}
