//! TypeScript output: imports, optional namespace, one `interface` per record.

use crate::config::Config;
use crate::extract::Extraction;
use crate::ir::{TypeDescriptor, TypeKind};
use crate::registry::NameRegistry;
use crate::target::Target;

pub fn render(ir: &Extraction, config: &Config) -> String {
    let mut w = String::new();

    for import in &ir.directives.imports {
        w.push_str(&format!("import {};\n", import));
    }
    if !ir.directives.imports.is_empty() {
        w.push('\n');
    }

    let (outer, inner, keyword) = match &config.namespace {
        Some(namespace) => {
            w.push_str(&format!("namespace {} {{\n", namespace));
            (config.indent.clone(), config.indent.repeat(2), "export interface")
        }
        None => (String::new(), config.indent.clone(), "declare interface"),
    };

    for (i, record) in ir.records.iter().enumerate() {
        if i > 0 {
            w.push('\n');
        }
        if let Some(comment) = &record.comment {
            for line in comment.lines() {
                w.push_str(format!("{}// {}", outer, line).trim_end());
                w.push('\n');
            }
        }
        w.push_str(&format!("{}{} {} {{\n", outer, keyword, ir.registry.lookup(&record.name)));

        for field in &record.fields {
            let optional = if field.optional { "?" } else { "" };
            w.push_str(&format!(
                "{}{}{}: {};",
                inner,
                member_name(&field.name),
                optional,
                ts_type(&field.ty, &ir.registry)
            ));
            if let Some(comment) = &field.comment {
                w.push_str(&format!("{}// {}", config.indent, comment));
            }
            w.push('\n');
        }

        w.push_str(&format!("{}}}\n", outer));
    }

    if let Some(namespace) = &config.namespace {
        w.push_str(&format!("}}\n\nexport default {};\n", namespace));
    }

    w
}

/// Invalid identifiers are emitted as quoted member names.
fn member_name(name: &str) -> String {
    if Target::TypeScript.valid_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

fn ts_type(ty: &TypeDescriptor, registry: &NameRegistry) -> String {
    match &ty.kind {
        TypeKind::Scalar(text) => text.clone(),
        TypeKind::Named(name) => registry.lookup(name).to_string(),
        TypeKind::Raw { text, suffix } => format!("{}{}", text, suffix.as_deref().unwrap_or("")),
        TypeKind::Array { elem, .. } => format!("{}[]", ts_type(elem, registry)),
        TypeKind::Map { key, value } => {
            format!("{{ [key: {}]: {} }}", ts_type(key, registry), ts_type(value, registry))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::Directives;
    use crate::ir::{Field, Record};

    fn extraction(records: Vec<Record>, registry: NameRegistry) -> Extraction {
        Extraction { records, registry, directives: Directives::new(), warnings: Vec::new() }
    }

    fn field(name: &str, ty: TypeDescriptor, optional: bool) -> Field {
        Field { name: name.to_string(), ty, comment: None, optional }
    }

    #[test]
    fn renders_optional_arrays_and_maps() {
        let mut reg = NameRegistry::new();
        reg.register("Alias", "MyAlias");
        let mut rec = Record::new("Alias");
        rec.fields.push(field("Self", TypeDescriptor::named("Alias").pointer(), true));
        rec.fields.push(field("Tags", TypeDescriptor::array(TypeDescriptor::scalar("string"), None), false));
        rec.fields.push(field(
            "Lookup",
            TypeDescriptor::map(TypeDescriptor::scalar("number"), TypeDescriptor::scalar("string")),
            false,
        ));
        rec.fields.push(field("my-name", TypeDescriptor::scalar("number"), false));

        let out = render(&extraction(vec![rec], reg), &Config::new());
        assert_eq!(
            out,
            "declare interface MyAlias {\n    \
             Self?: MyAlias;\n    \
             Tags: string[];\n    \
             Lookup: { [key: number]: string };\n    \
             \"my-name\": number;\n\
             }\n"
        );
    }

    #[test]
    fn namespace_exports_everything() {
        let mut rec = Record::new("A");
        rec.fields.push(field("X", TypeDescriptor::scalar("number"), false));
        let mut ir = extraction(vec![rec], NameRegistry::new());
        ir.directives.add_import("import moment from \"moment\";");
        let out = render(&ir, &Config::new().with_namespace("Models"));
        assert_eq!(
            out,
            "import moment from \"moment\";\n\n\
             namespace Models {\n    \
             export interface A {\n        \
             X: number;\n    \
             }\n\
             }\n\nexport default Models;\n"
        );
    }
}
