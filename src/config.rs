//! Immutable conversion settings, built once and passed by reference.

/// Naming, namespace and directive settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prefix: String,
    pub suffix: String,
    /// TypeScript only: wrap interfaces in `namespace <name>` and export it.
    pub namespace: Option<String>,
    /// Extra C includes, placed before those found in comments.
    pub includes: Vec<String>,
    /// Extra TypeScript imports, placed before those found in comments.
    pub imports: Vec<String>,
    pub indent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prefix: String::new(),
            suffix: String::new(),
            namespace: None,
            includes: Vec::new(),
            imports: Vec::new(),
            indent: "    ".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// An empty namespace means none.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = if namespace.is_empty() { None } else { Some(namespace) };
        self
    }

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.includes.push(include.into());
        self
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// `prefix + name + suffix`
    pub fn rendered_name(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.suffix)
    }
}
