//! Walk declaration trees and build the IR for one target.
//!
//! Records are registered under their rendered name before their fields are
//! resolved, so self and forward references render correctly. Inline structs
//! are hoisted into their own records, named after the field, and placed
//! before the record that contains them.

use crate::ast::{Field as SourceField, SourceFile};
use crate::config::Config;
use crate::directive::Directives;
use crate::error::ConvertError;
use crate::ir::{Field, Record};
use crate::registry::NameRegistry;
use crate::resolve::TypeResolver;
use crate::tag::Tags;
use crate::target::{Target, DISCARD, NAME_TAG, OMIT_EMPTY};

/// Kind of recoverable problem found during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Output name is not a valid identifier and the target cannot quote it.
    InvalidIdentifier,
    /// Container the target cannot express (maps in C).
    UnsupportedContainer,
    /// A record name was registered twice.
    DuplicateRecord,
}

/// A recoverable problem; the affected field was dropped (or, for duplicate
/// records, both records were kept).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub record: String,
    pub field: Option<String>,
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}.{}: {}", self.record, field, self.message),
            None => write!(f, "{}: {}", self.record, self.message),
        }
    }
}

/// Finished IR, ready to render.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub registry: NameRegistry,
    pub directives: Directives,
    pub warnings: Vec<Warning>,
}

pub struct Extractor<'c> {
    target: Target,
    config: &'c Config,
    records: Vec<Record>,
    registry: NameRegistry,
    directives: Directives,
    warnings: Vec<Warning>,
}

impl<'c> Extractor<'c> {
    /// Directives from the configuration come first, cleaned like those from comments.
    pub fn new(target: Target, config: &'c Config) -> Self {
        let mut directives = Directives::new();
        for include in &config.includes {
            directives.add_include(include);
        }
        for import in &config.imports {
            directives.add_import(import);
        }
        Extractor {
            target,
            config,
            records: Vec::new(),
            registry: NameRegistry::new(),
            directives,
            warnings: Vec::new(),
        }
    }

    /// Add every record declared in `file`. May be called once per input file.
    pub fn extract(&mut self, file: &SourceFile) -> Result<(), ConvertError> {
        self.directives.scan_comments(&file.comments);

        for decl in &file.decls {
            let Some(fields) = decl.struct_fields() else {
                continue;
            };
            let mut produced = self.extract_record(&decl.name, &decl.type_params, fields)?;
            if let Some(record) = produced.last_mut() {
                record.comment = decl.doc.clone();
            }
            self.records.extend(produced);
        }
        Ok(())
    }

    pub fn finish(self) -> Extraction {
        Extraction {
            records: self.records,
            registry: self.registry,
            directives: self.directives,
            warnings: self.warnings,
        }
    }

    /// Returns the hoisted records followed by the record itself.
    fn extract_record(
        &mut self,
        name: &str,
        type_params: &[String],
        fields: &[SourceField],
    ) -> Result<Vec<Record>, ConvertError> {
        self.register(name);

        let mut produced = Vec::new();
        let mut record = Record::new(name);

        for field in fields {
            // Embedded members are not promoted.
            if field.is_embedded() {
                continue;
            }
            let exported: Vec<&str> = field
                .names
                .iter()
                .map(String::as_str)
                .filter(|n| is_exported(n))
                .collect();
            if exported.is_empty() {
                continue;
            }

            let tags = match &field.tag {
                Some(raw) => Tags::parse(raw).map_err(|source| ConvertError::MalformedTag {
                    record: name.to_string(),
                    field: exported[0].to_string(),
                    source,
                })?,
                None => Tags::default(),
            };
            let name_tag = tags.get(NAME_TAG);
            if name_tag.is_some_and(|t| t.name == DISCARD) {
                continue;
            }
            let omit_empty = name_tag.is_some_and(|t| t.has_option(OMIT_EMPTY));
            let overridden = self.target.type_override(&tags).is_some();

            for source_name in exported {
                let out_name = name_tag
                    .map(|t| t.name.as_str())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(source_name);

                if !self.target.valid_identifier(out_name) && !self.target.quotes_invalid_identifiers() {
                    self.warn(
                        WarningKind::InvalidIdentifier,
                        name,
                        Some(out_name),
                        format!("`{}` is not a valid identifier, skipping", out_name),
                    );
                    continue;
                }

                // Nothing under a dropped map is hoisted.
                if !overridden && !self.target.supports_maps() && field.ty.contains_map() {
                    self.warn(
                        WarningKind::UnsupportedContainer,
                        name,
                        Some(out_name),
                        "maps are unsupported, skipping".to_string(),
                    );
                    continue;
                }

                // Record names are never quoted.
                let hoist_name = if self.target.valid_identifier(out_name) { out_name } else { source_name };

                let resolver = TypeResolver::new(self.target, type_params, name, out_name);
                let mut hoisted = Vec::new();
                let ty = resolver.resolve_field(&field.ty, &tags, &mut |nested: &[SourceField]| {
                    hoisted.extend(self.extract_record(hoist_name, type_params, nested)?);
                    Ok(hoist_name.to_string())
                })?;
                produced.extend(hoisted);

                record.fields.push(Field {
                    name: out_name.to_string(),
                    // A source pointer is optional even under an override.
                    optional: omit_empty || ty.is_pointer || field.ty.is_pointer(),
                    ty,
                    comment: field.comment.clone(),
                });
            }
        }

        produced.push(record);
        Ok(produced)
    }

    fn register(&mut self, name: &str) {
        if self.registry.contains(name) {
            self.warn(
                WarningKind::DuplicateRecord,
                name,
                None,
                format!("record `{}` is declared more than once", name),
            );
        }
        self.registry.register(name, self.config.rendered_name(name));
    }

    fn warn(&mut self, kind: WarningKind, record: &str, field: Option<&str>, message: String) {
        tracing::warn!(?kind, record, field, "{}", message);
        self.warnings.push(Warning {
            kind,
            record: record.to_string(),
            field: field.map(str::to_string),
            message,
        });
    }
}

/// Go's export rule: the name starts with an uppercase letter.
fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
