//! Declaration tree for the Go subset understood by the parser.
//!
//! Only the shapes needed to describe data records are represented. The tree is
//! read-only input to the extractor.

/// One parsed source file.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub package: Option<String>,
    /// Import paths, unquoted, in source order.
    pub imports: Vec<String>,
    pub decls: Vec<TypeDecl>,
    /// Every comment in the file, in source order.
    pub comments: Vec<Comment>,
}

/// Comment text with the `//` or `/* */` markers removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    /// Lines of the comment, as Go's `CommentGroup.Text` would split them.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `type Name T`
    Type,
    /// `var name T`
    Var,
}

/// A top-level named declaration.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    /// Names of type parameters (`type Box[T any] struct {...}`).
    pub type_params: Vec<String>,
    pub ty: TypeExpr,
    pub kind: DeclKind,
    /// Comment lines directly above the declaration.
    pub doc: Option<String>,
}

impl TypeDecl {
    /// Fields of the declaration when it is a record, `None` otherwise.
    pub fn struct_fields(&self) -> Option<&[Field]> {
        match &self.ty {
            TypeExpr::Struct(fields) => Some(fields),
            _ => None,
        }
    }
}

/// A type expression as written in source.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Ident(String),
    /// `package.Name`
    Qualified { package: String, name: String },
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T`; the length is kept verbatim.
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// Inline (anonymous) record.
    Struct(Vec<Field>),
    /// `interface{ ... }`; method specs kept as text.
    Interface { methods: Vec<String> },
    Chan(Box<TypeExpr>),
    /// `func(...) ...`; signature kept as text.
    Func(String),
    /// Instantiated generic type, `Name[Args]`.
    Generic { base: Box<TypeExpr>, args: Vec<TypeExpr> },
}

impl TypeExpr {
    pub fn is_pointer(&self) -> bool {
        matches!(self, TypeExpr::Pointer(_))
    }

    /// True if a map appears in this type, looking through pointers, slices and arrays.
    pub fn contains_map(&self) -> bool {
        match self {
            TypeExpr::Map { .. } => true,
            TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => inner.contains_map(),
            TypeExpr::Array { elem, .. } => elem.contains_map(),
            _ => false,
        }
    }

    /// Short description of the shape, used in error messages.
    pub fn shape(&self) -> String {
        match self {
            TypeExpr::Ident(name) => name.clone(),
            TypeExpr::Qualified { package, name } => format!("{}.{}", package, name),
            TypeExpr::Pointer(inner) => format!("*{}", inner.shape()),
            TypeExpr::Slice(elem) => format!("[]{}", elem.shape()),
            TypeExpr::Array { len, elem } => format!("[{}]{}", len, elem.shape()),
            TypeExpr::Map { key, value } => format!("map[{}]{}", key.shape(), value.shape()),
            TypeExpr::Struct(_) => "struct{...}".to_string(),
            TypeExpr::Interface { methods } if methods.is_empty() => "interface{}".to_string(),
            TypeExpr::Interface { .. } => "interface{...}".to_string(),
            TypeExpr::Chan(elem) => format!("chan {}", elem.shape()),
            TypeExpr::Func(sig) => format!("func{}", sig),
            TypeExpr::Generic { base, args } => {
                let args: Vec<String> = args.iter().map(TypeExpr::shape).collect();
                format!("{}[{}]", base.shape(), args.join(", "))
            }
        }
    }
}

/// One field line inside a struct body.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Declared names; empty for an embedded field.
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Tag contents with the surrounding quotes removed.
    pub tag: Option<String>,
    /// Trailing comment on the same line.
    pub comment: Option<String>,
}

impl Field {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}
