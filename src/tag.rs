//! Struct tag grammar: `key:"name,opt1,opt2" other:"value"`.
//!
//! Follows Go's `reflect.StructTag` convention. Keys are looked up
//! independently; an absent key is not an error.

use crate::parser::unescape;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("bad syntax for struct tag pair near `{0}`")]
    Syntax(String),
    #[error("bad syntax for struct tag key near `{0}`")]
    KeySyntax(String),
    #[error("bad syntax for struct tag value near `{0}`")]
    ValueSyntax(String),
}

/// One `key:"value"` pair, the value split on `,` into a name and options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub name: String,
    pub options: Vec<String>,
}

impl Tag {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// The name split into base text and a verbatim `[...]` suffix.
    pub fn split_suffix(&self) -> (&str, Option<&str>) {
        split_suffix(&self.name)
    }
}

/// All tags of one field, keyed by tag key. The first occurrence of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    tags: IndexMap<String, Tag>,
}

impl Tags {
    pub fn parse(raw: &str) -> Result<Self, TagError> {
        let mut tags = IndexMap::new();
        let mut rest = raw;
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }

            let key_end = rest
                .find(|c: char| c == ':' || c == ' ' || c == '"' || c.is_control())
                .unwrap_or(rest.len());
            if key_end == 0 {
                return Err(TagError::KeySyntax(rest.to_string()));
            }
            let key = &rest[..key_end];
            rest = &rest[key_end..];
            let Some(after_colon) = rest.strip_prefix(':') else {
                return Err(TagError::Syntax(key.to_string()));
            };
            let Some(quoted) = after_colon.strip_prefix('"') else {
                return Err(TagError::ValueSyntax(format!("{}:{}", key, after_colon)));
            };

            let (value, remaining) = read_quoted(quoted)
                .ok_or_else(|| TagError::ValueSyntax(format!("{}:\"{}", key, quoted)))?;
            rest = remaining;

            let mut parts = value.split(',');
            let name = parts.next().unwrap_or_default().to_string();
            let options = parts.map(str::to_string).collect();
            tags.entry(key.to_string()).or_insert(Tag {
                key: key.to_string(),
                name,
                options,
            });
        }
        Ok(Tags { tags })
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

/// Read a Go-quoted value up to its closing quote. Returns the unescaped value
/// and the text after the quote, or `None` if unterminated or badly escaped.
fn read_quoted(s: &str) -> Option<(String, &str)> {
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((unescape(&s[..i]).ok()?, &s[i + 1..])),
            '\\' => {
                chars.next()?;
            }
            c if c.is_control() => return None,
            _ => {}
        }
    }
    None
}

/// Split `char[255]` into `("char", Some("[255]"))`. A bracket at index 0 is not a suffix.
pub fn split_suffix(value: &str) -> (&str, Option<&str>) {
    match value.find('[') {
        Some(idx) if idx > 0 => (&value[..idx], Some(&value[idx..])),
        _ => (value, None),
    }
}
