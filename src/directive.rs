//! Include/import directives collected from source comments and configuration.
//!
//! A comment line `#c.include <stdint.h>` adds `<stdint.h>` to the C includes;
//! `#ts.import moment from "moment";` adds `moment from "moment"` to the
//! TypeScript imports. Lines are kept in first-seen order, duplicates dropped.

use crate::ast::Comment;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

static C_INCLUDE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s*c.include\s*").unwrap());
static TS_IMPORT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s*ts.import\s*").unwrap());
static INCLUDE_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s*include\s*").unwrap());
static IMPORT_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^import\b\s*").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub includes: IndexSet<String>,
    pub imports: IndexSet<String>,
}

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clean and add an include argument. Returns false if it was already present or empty.
    pub fn add_include(&mut self, line: &str) -> bool {
        let cleaned = clean_include(line);
        !cleaned.is_empty() && self.includes.insert(cleaned)
    }

    /// Clean and add an import statement. Returns false if it was already present or empty.
    pub fn add_import(&mut self, line: &str) -> bool {
        let cleaned = clean_import(line);
        !cleaned.is_empty() && self.imports.insert(cleaned)
    }

    /// Scan comment lines for include/import markers.
    pub fn scan_comments<'a>(&mut self, comments: impl IntoIterator<Item = &'a Comment>) {
        for comment in comments {
            for line in comment.lines() {
                if let Some(m) = C_INCLUDE_MARKER.find(line) {
                    self.add_include(&line[m.end()..]);
                } else if let Some(m) = TS_IMPORT_MARKER.find(line) {
                    self.add_import(&line[m.end()..]);
                }
            }
        }
    }
}

/// `#include <stdint.h>;` -> `<stdint.h>`
pub fn clean_include(line: &str) -> String {
    let trimmed = line.trim();
    let stripped = match INCLUDE_KEYWORD.find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => trimmed,
    };
    strip_terminator(stripped).to_string()
}

/// `import moment from "moment"; // x` -> `moment from "moment"`
pub fn clean_import(line: &str) -> String {
    let trimmed = line.trim();
    let stripped = match IMPORT_KEYWORD.find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => trimmed,
    };
    strip_terminator(stripped).to_string()
}

/// Drop the first `;` and everything after it.
fn strip_terminator(s: &str) -> &str {
    match s.find(';') {
        Some(idx) => s[..idx].trim_end(),
        None => s.trim_end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str) -> Comment {
        Comment { text: text.to_string() }
    }

    #[test]
    fn cleans_include_forms() {
        assert_eq!(clean_include("#include <SystemConfig.h>"), "<SystemConfig.h>");
        assert_eq!(clean_include("  # include \"local.h\"  "), "\"local.h\"");
        assert_eq!(clean_include("<stdint.h>"), "<stdint.h>");
        assert_eq!(clean_include("<stdint.h>;"), "<stdint.h>");
    }

    #[test]
    fn cleans_import_forms() {
        assert_eq!(clean_import(r#"import moment from "moment";"#), r#"moment from "moment""#);
        assert_eq!(clean_import(r#"{ a } from "b";; trailing"#), r#"{ a } from "b""#);
        assert_eq!(clean_import("importer from 'x'"), "importer from 'x'");
    }

    #[test]
    fn scans_markers_and_dedupes() {
        let mut d = Directives::new();
        d.scan_comments(&[
            comment("#c.include #include <SystemConfig.h>\n#c.include <stdint.h>"),
            comment("#ts.import import moment from \"moment\";"),
            comment("some random comment"),
            comment("#c.include <stdint.h>"),
        ]);
        let includes: Vec<_> = d.includes.iter().cloned().collect();
        assert_eq!(includes, vec!["<SystemConfig.h>", "<stdint.h>"]);
        assert_eq!(d.imports.len(), 1);
        assert!(d.imports.contains("moment from \"moment\""));
    }

    #[test]
    fn empty_directive_is_ignored() {
        let mut d = Directives::new();
        assert!(!d.add_include("   "));
        assert!(d.includes.is_empty());
    }
}
