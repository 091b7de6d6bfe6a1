//! Map source type expressions to IR type descriptors for one target.
//!
//! Resolution order:
//! 1. explicit target type from the field's override tag (`ctype` / `tstype`)
//! 2. pointers, then slices and arrays (`[]byte` is the target string), then maps
//! 3. qualified names through the well-known table, else echoed verbatim
//! 4. predeclared scalars, then references to other records
//! 5. interfaces, `any` and type parameters become the target's top type
//!
//! Channels, functions and generic instantiations are rejected. Inline structs
//! are handed to the caller's hoist callback, which returns the name of the
//! record it created.

use crate::ast::{Field, TypeExpr};
use crate::error::ConvertError;
use crate::ir::TypeDescriptor;
use crate::tag::Tags;
use crate::target::Target;

pub struct TypeResolver<'a> {
    target: Target,
    /// Type parameters of the enclosing declaration.
    type_params: &'a [String],
    record: &'a str,
    field: &'a str,
}

impl<'a> TypeResolver<'a> {
    pub fn new(target: Target, type_params: &'a [String], record: &'a str, field: &'a str) -> Self {
        TypeResolver { target, type_params, record, field }
    }

    /// Resolve a field's type, honouring the target's override tag first.
    pub fn resolve_field<H>(&self, ty: &TypeExpr, tags: &Tags, hoist: &mut H) -> Result<TypeDescriptor, ConvertError>
    where
        H: FnMut(&[Field]) -> Result<String, ConvertError>,
    {
        if let Some(raw) = self.target.type_override(tags) {
            return Ok(raw);
        }
        self.resolve(ty, hoist)
    }

    pub fn resolve<H>(&self, ty: &TypeExpr, hoist: &mut H) -> Result<TypeDescriptor, ConvertError>
    where
        H: FnMut(&[Field]) -> Result<String, ConvertError>,
    {
        match ty {
            TypeExpr::Pointer(inner) => Ok(self.resolve(inner, hoist)?.pointer()),
            TypeExpr::Slice(elem) => {
                if is_byte(elem) {
                    return Ok(TypeDescriptor::scalar(self.target.string_type()));
                }
                Ok(TypeDescriptor::array(self.resolve(elem, hoist)?, None))
            }
            TypeExpr::Array { len, elem } => Ok(TypeDescriptor::array(self.resolve(elem, hoist)?, Some(len.clone()))),
            TypeExpr::Map { key, value } => {
                let key = self.resolve(key, hoist)?;
                let value = self.resolve(value, hoist)?;
                Ok(TypeDescriptor::map(key, value))
            }
            TypeExpr::Qualified { package, name } => {
                let dotted = format!("{}.{}", package, name);
                match self.target.scalar_name(&dotted) {
                    Some(scalar) => Ok(TypeDescriptor::scalar(scalar)),
                    None => Ok(TypeDescriptor::named(dotted)),
                }
            }
            TypeExpr::Ident(name) => {
                if self.type_params.iter().any(|p| p == name) {
                    return Ok(TypeDescriptor::scalar(self.target.top_type()));
                }
                match self.target.scalar_name(name) {
                    Some(scalar) => Ok(TypeDescriptor::scalar(scalar)),
                    None => Ok(TypeDescriptor::named(name.clone())),
                }
            }
            TypeExpr::Interface { .. } => Ok(TypeDescriptor::scalar(self.target.top_type())),
            TypeExpr::Struct(fields) => Ok(TypeDescriptor::named(hoist(fields)?)),
            TypeExpr::Chan(_) | TypeExpr::Func(_) | TypeExpr::Generic { .. } => Err(self.unsupported(ty)),
        }
    }

    fn unsupported(&self, ty: &TypeExpr) -> ConvertError {
        ConvertError::UnsupportedType {
            record: self.record.to_string(),
            field: self.field.to_string(),
            shape: ty.shape(),
        }
    }
}

fn is_byte(ty: &TypeExpr) -> bool {
    matches!(ty, TypeExpr::Ident(name) if name == "byte" || name == "uint8")
}
