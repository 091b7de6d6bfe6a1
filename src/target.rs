//! Output targets and their per-target tables.

use crate::ir::TypeDescriptor;
use crate::tag::Tags;
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\pL_][\pL\pN_]*$").unwrap());

/// Serialization-name tag key.
pub const NAME_TAG: &str = "json";
/// Serialization-name value that discards a field.
pub const DISCARD: &str = "-";
/// Serialization-name option that marks a field optional.
pub const OMIT_EMPTY: &str = "omitempty";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// C header with `typedef struct` blocks.
    C,
    /// TypeScript `interface` declarations.
    TypeScript,
}

impl Target {
    pub fn file_extension(&self) -> &'static str {
        match self {
            Target::C => "h",
            Target::TypeScript => "ts",
        }
    }

    /// Tag key carrying an explicit target type.
    pub fn override_key(&self) -> &'static str {
        match self {
            Target::C => "ctype",
            Target::TypeScript => "tstype",
        }
    }

    /// Target text for a predeclared or well-known source type.
    pub fn scalar_name(&self, canonical: &str) -> Option<&'static str> {
        match self {
            Target::C => c_scalar(canonical),
            Target::TypeScript => ts_scalar(canonical),
        }
    }

    /// Native string type; byte slices map here.
    pub fn string_type(&self) -> &'static str {
        match self {
            Target::C => "char *",
            Target::TypeScript => "string",
        }
    }

    /// Universal top type for interfaces, `any` and type parameters.
    pub fn top_type(&self) -> &'static str {
        match self {
            Target::C => "void *",
            Target::TypeScript => "any",
        }
    }

    /// Letters or underscore first, then letters, digits or underscore.
    pub fn valid_identifier(&self, name: &str) -> bool {
        IDENTIFIER.is_match(name)
    }

    /// Whether member names failing [`Target::valid_identifier`] can be emitted quoted.
    pub fn quotes_invalid_identifiers(&self) -> bool {
        matches!(self, Target::TypeScript)
    }

    pub fn supports_maps(&self) -> bool {
        matches!(self, Target::TypeScript)
    }

    /// Raw descriptor from this target's override tag, if the field has one.
    pub fn type_override(&self, tags: &Tags) -> Option<TypeDescriptor> {
        let tag = tags.get(self.override_key())?;
        let (text, suffix) = tag.split_suffix();
        Some(TypeDescriptor::raw(text, suffix.map(str::to_string)))
    }
}

fn c_scalar(canonical: &str) -> Option<&'static str> {
    let name = match canonical {
        "bool" => "bool_t",
        "string" | "[]byte" => "char *",
        "int" => "int",
        "uint" => "unsigned int",
        "int8" => "int8_t",
        "int16" => "int16_t",
        "int32" => "int32_t",
        "int64" => "int64_t",
        "uint8" | "byte" => "uint8_t",
        "uint16" => "uint16_t",
        "uint32" => "uint32_t",
        "uint64" => "uint64_t",
        "rune" => "int32_t",
        "uintptr" => "uintptr_t",
        "float32" => "float",
        "float64" => "double",
        "complex64" => "float _Complex",
        "complex128" => "double _Complex",
        "time.Time" | "time.Duration" => "int64_t",
        "decimal.Decimal" => "double",
        "json.RawMessage" => "char *",
        "sql.NullString" => "char *",
        "sql.NullInt64" => "int64_t",
        "sql.NullInt32" => "int32_t",
        "sql.NullFloat64" => "double",
        "sql.NullBool" => "bool_t",
        "sql.NullTime" => "int64_t",
        "any" | "interface" | "interface{}" => "void *",
        _ => return None,
    };
    Some(name)
}

fn ts_scalar(canonical: &str) -> Option<&'static str> {
    let name = match canonical {
        "bool" => "boolean",
        "string" | "[]byte" => "string",
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "byte" | "rune" | "uintptr" | "float32" | "float64" | "complex64"
        | "complex128" => "number",
        "time.Time" => "string",
        "time.Duration" => "number",
        "decimal.Decimal" => "number",
        "json.RawMessage" => "any",
        "sql.NullString" => "string",
        "sql.NullInt64" | "sql.NullInt32" | "sql.NullFloat64" => "number",
        "sql.NullBool" => "boolean",
        "sql.NullTime" => "string",
        "any" | "interface" | "interface{}" => "any",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeKind;

    #[test]
    fn sized_integers_map_per_target() {
        assert_eq!(Target::C.scalar_name("int16"), Some("int16_t"));
        assert_eq!(Target::C.scalar_name("uint64"), Some("uint64_t"));
        assert_eq!(Target::TypeScript.scalar_name("int16"), Some("number"));
        assert_eq!(Target::C.scalar_name("bool"), Some("bool_t"));
        assert_eq!(Target::TypeScript.scalar_name("bool"), Some("boolean"));
        assert_eq!(Target::C.scalar_name("Alias"), None);
    }

    #[test]
    fn time_differs_per_target() {
        assert_eq!(Target::C.scalar_name("time.Time"), Some("int64_t"));
        assert_eq!(Target::TypeScript.scalar_name("time.Time"), Some("string"));
    }

    #[test]
    fn identifiers() {
        let t = Target::C;
        assert!(t.valid_identifier("Name"));
        assert!(t.valid_identifier("_x1"));
        assert!(t.valid_identifier("größe"));
        assert!(!t.valid_identifier("1abc"));
        assert!(!t.valid_identifier("my-name"));
        assert!(!t.valid_identifier(""));
    }

    #[test]
    fn override_reads_own_key_only() {
        let tags = Tags::parse(r#"ctype:"char[255]" tstype:"string | moment.Moment""#).unwrap();
        let c = Target::C.type_override(&tags).unwrap();
        assert_eq!(c.kind, TypeKind::Raw { text: "char".into(), suffix: Some("[255]".into()) });
        let ts = Target::TypeScript.type_override(&tags).unwrap();
        assert_eq!(ts.kind, TypeKind::Raw { text: "string | moment.Moment".into(), suffix: None });
        assert!(Target::C.type_override(&Tags::default()).is_none());
    }
}
