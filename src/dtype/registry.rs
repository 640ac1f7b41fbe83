// Extensible dtype lookup for the Tessera schema system
//
// Deployments can register their own type-name aliases (for example mapping a
// host language's native names onto canonical dtypes) without touching the
// built-in table.

use std::collections::HashMap;

use crate::dtype::types::Dtype;
use crate::internal::error::Result;

/// Name-to-dtype lookup table consulted during schema construction.
///
/// Custom aliases take precedence over the built-in names understood by
/// [`Dtype::parse`].
#[derive(Debug, Clone, Default)]
pub struct DtypeRegistry {
    /// Custom alias mappings (raw name -> canonical dtype)
    aliases: HashMap<String, Dtype>,
}

impl DtypeRegistry {
    /// Creates a registry with no custom aliases.
    pub fn new() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Registers a custom alias for a canonical dtype.
    ///
    /// Registering an existing alias replaces the previous mapping.
    pub fn register_alias(&mut self, alias: &str, dtype: Dtype) {
        self.aliases.insert(alias.to_string(), dtype);
    }

    /// Normalizes a raw type name into a canonical dtype.
    ///
    /// Checks custom aliases first, then falls back to the built-in names.
    pub fn normalize(&self, raw: &str) -> Result<Dtype> {
        if let Some(dtype) = self.aliases.get(raw) {
            return Ok(*dtype);
        }
        Dtype::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_builtin_fallback() {
        let registry = DtypeRegistry::new();
        assert_eq!(registry.normalize("int32").unwrap(), Dtype::Int32);
        assert_eq!(registry.normalize("double").unwrap(), Dtype::Float64);
    }

    #[test]
    fn test_custom_alias() {
        let mut registry = DtypeRegistry::new();
        registry.register_alias("long", Dtype::Int64);
        assert_eq!(registry.normalize("long").unwrap(), Dtype::Int64);
        // Built-in names still resolve.
        assert_eq!(registry.normalize("int64").unwrap(), Dtype::Int64);
    }

    #[test]
    fn test_custom_alias_precedence() {
        let mut registry = DtypeRegistry::new();
        // A custom alias shadows the built-in meaning of the same name.
        registry.register_alias("float32", Dtype::Float64);
        assert_eq!(registry.normalize("float32").unwrap(), Dtype::Float64);
    }

    #[test]
    fn test_alias_replacement() {
        let mut registry = DtypeRegistry::new();
        registry.register_alias("word", Dtype::UInt16);
        registry.register_alias("word", Dtype::UInt32);
        assert_eq!(registry.normalize("word").unwrap(), Dtype::UInt32);
    }

    #[test]
    fn test_unknown_name() {
        let registry = DtypeRegistry::new();
        let result = registry.normalize("quaternion");
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Dtype Error: Unknown dtype: quaternion"
        );
    }
}
