//! Target-independent intermediate representation of records and fields.

/// Resolved type of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    pub is_pointer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Target scalar text (`int32_t`, `number`, ...).
    Scalar(String),
    /// `len` is set for fixed-length source arrays.
    Array { elem: Box<TypeDescriptor>, len: Option<String> },
    Map { key: Box<TypeDescriptor>, value: Box<TypeDescriptor> },
    /// Reference to a record by its source name; renamed at render time.
    Named(String),
    /// Explicit target type from a tag, with a verbatim suffix (`[255]`).
    Raw { text: String, suffix: Option<String> },
}

impl TypeDescriptor {
    pub fn new(kind: TypeKind) -> Self {
        TypeDescriptor { kind, is_pointer: false }
    }

    pub fn scalar(text: impl Into<String>) -> Self {
        Self::new(TypeKind::Scalar(text.into()))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Named(name.into()))
    }

    pub fn raw(text: impl Into<String>, suffix: Option<String>) -> Self {
        Self::new(TypeKind::Raw { text: text.into(), suffix })
    }

    pub fn array(elem: TypeDescriptor, len: Option<String>) -> Self {
        Self::new(TypeKind::Array { elem: Box::new(elem), len })
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::new(TypeKind::Map { key: Box::new(key), value: Box::new(value) })
    }

    pub fn pointer(mut self) -> Self {
        self.is_pointer = true;
        self
    }

    /// True if a map appears anywhere in this type.
    pub fn contains_map(&self) -> bool {
        match &self.kind {
            TypeKind::Map { .. } => true,
            TypeKind::Array { elem, .. } => elem.contains_map(),
            _ => false,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Output name, after tag renaming.
    pub name: String,
    pub ty: TypeDescriptor,
    pub comment: Option<String>,
    /// Pointer or `omitempty`.
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Source name; the rendered name comes from the registry.
    pub name: String,
    pub fields: Vec<Field>,
    pub comment: Option<String>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Record { name: name.into(), fields: Vec::new(), comment: None }
    }
}
