//! Symbol table and the resolver seam used by the entity expander

use serde_json::Value;
use std::collections::HashMap;

use crate::Symbol;

/// Resolves a symbolic constant to its concrete value.
///
/// The compiler only knows the `domain.EnumName.MEMBER` shape; the values come
/// from whichever presentation layer is plugged in. Closures can be used
/// directly as resolvers.
pub trait SymbolResolver {
    /// Look up the concrete value of a symbol, `None` if unknown
    fn resolve(&self, symbol: &Symbol) -> Option<Value>;
}

impl<F> SymbolResolver for F
where
    F: Fn(&Symbol) -> Option<Value>,
{
    fn resolve(&self, symbol: &Symbol) -> Option<Value> {
        self(symbol)
    }
}

/// Statically registered table mapping `(domain, enum, member)` to a value
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<(String, String, String), Value>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single member value
    pub fn register(
        &mut self,
        domain: &str,
        enum_name: &str,
        member: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.entries.insert(
            (domain.to_string(), enum_name.to_string(), member.to_string()),
            value.into(),
        );
        self
    }

    /// Register every member of an enum whose values are strings
    pub fn register_str_enum(
        &mut self,
        domain: &str,
        enum_name: &str,
        members: &[(&str, &str)],
    ) -> &mut Self {
        for (member, value) in members {
            self.register(domain, enum_name, member, *value);
        }
        self
    }

    /// Register every member of a bit-flag enum
    pub fn register_flag_enum(
        &mut self,
        domain: &str,
        enum_name: &str,
        members: &[(&str, u64)],
    ) -> &mut Self {
        for (member, value) in members {
            self.register(domain, enum_name, member, *value);
        }
        self
    }

    /// Look up a value by its parts
    pub fn get(&self, domain: &str, enum_name: &str, member: &str) -> Option<&Value> {
        self.entries
            .get(&(domain.to_string(), enum_name.to_string(), member.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve(&self, symbol: &Symbol) -> Option<Value> {
        self.get(symbol.domain(), symbol.enum_name(), symbol.member())
            .cloned()
    }
}
