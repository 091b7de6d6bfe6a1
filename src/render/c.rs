//! C header output: `#pragma once`, includes, one `typedef struct` per record.

use crate::config::Config;
use crate::extract::Extraction;
use crate::ir::{TypeDescriptor, TypeKind};
use crate::registry::NameRegistry;

pub fn render(ir: &Extraction, config: &Config) -> String {
    let indent = &config.indent;
    let mut w = String::new();

    w.push_str("#pragma once\n\n");
    for include in &ir.directives.includes {
        w.push_str(&format!("#include {}\n", include));
    }
    if !ir.directives.includes.is_empty() {
        w.push('\n');
    }

    for record in &ir.records {
        if let Some(comment) = &record.comment {
            for line in comment.lines() {
                w.push_str(format!("// {}", line).trim_end());
                w.push('\n');
            }
        }
        w.push_str("typedef struct {\n");

        for field in &record.fields {
            // Extraction already drops these for C; hand-built IR may still carry them.
            if field.ty.contains_map() {
                tracing::warn!(record = %record.name, field = %field.name, "maps are unsupported, skipping");
                continue;
            }

            let (ty, suffix) = c_type(&field.ty, &ir.registry);
            let star = if field.ty.is_pointer { "*" } else { "" };
            w.push_str(&format!("{}{} {}{}{};", indent, ty, star, field.name, suffix));
            if let Some(comment) = &field.comment {
                w.push_str(&format!("{}// {}", indent, comment));
            }
            w.push('\n');
        }

        w.push_str(&format!("}} {};\n\n", ir.registry.lookup(&record.name)));
    }

    w
}

/// Type text before the member name, and suffix text after it.
fn c_type(ty: &TypeDescriptor, registry: &NameRegistry) -> (String, String) {
    match &ty.kind {
        TypeKind::Scalar(text) => (text.clone(), String::new()),
        TypeKind::Named(name) => (registry.lookup(name).to_string(), String::new()),
        TypeKind::Raw { text, suffix } => (text.clone(), suffix.clone().unwrap_or_default()),
        TypeKind::Array { elem, len } => {
            let (elem_ty, elem_suffix) = c_type(elem, registry);
            let elem_ty = if elem.is_pointer { format!("{} *", elem_ty) } else { elem_ty };
            match len {
                Some(len) => (elem_ty, format!("[{}]{}", len, elem_suffix)),
                None => (format!("{} *", elem_ty), elem_suffix),
            }
        }
        TypeKind::Map { .. } => ("void *".to_string(), String::new()),
    }
}
