//! Original record name -> rendered (prefixed/suffixed) name.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: HashMap<String, String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last registration for a name wins.
    pub fn register(&mut self, original: impl Into<String>, rendered: impl Into<String>) {
        self.names.insert(original.into(), rendered.into());
    }

    /// Rendered name, or `original` unchanged when it was never registered.
    pub fn lookup<'a>(&'a self, original: &'a str) -> &'a str {
        self.names.get(original).map(String::as_str).unwrap_or(original)
    }

    pub fn contains(&self, original: &str) -> bool {
        self.names.contains_key(original)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_original() {
        let mut reg = NameRegistry::new();
        reg.register("Alias", "MyAlias");
        assert_eq!(reg.lookup("Alias"), "MyAlias");
        assert_eq!(reg.lookup("Another"), "Another");
        assert!(!reg.contains("Another"));
    }

    #[test]
    fn re_registration_is_idempotent() {
        let mut reg = NameRegistry::new();
        reg.register("User", "TUser");
        reg.register("User", "TUser");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.lookup("User"), "TUser");
    }
}
