//! # structconv — Go struct declarations to C headers and TypeScript interfaces
//!
//! Reads Go source, picks out every `struct` declaration, and renders each one
//! as a C `typedef struct` or a TypeScript `interface`. Field names follow the
//! `json` tag; per-target types can be forced with `ctype` / `tstype` tags.
//!
//! ## Pipeline
//!
//! - **Parse**: a PEST grammar for the declaration subset of Go (`parser`)
//! - **Extract**: walk struct declarations, parse tags, resolve types, hoist
//!   inline structs into their own records (`extract`, `tag`, `resolve`)
//! - **Render**: one output per [`Target`], names resolved through the registry
//!
//! ## Tags
//!
//! - `json:"name,omitempty"`: output name, optional member; `json:"-"` drops the field
//! - `ctype:"char[255]"`: C type with a suffix placed after the member name
//! - `tstype:"string | null"`: TypeScript type
//!
//! ## Directives
//!
//! Comments carrying `#c.include <stdint.h>` or `#ts.import moment from "moment"`
//! add include / import lines to the matching output, once each.
//!
//! ## Example
//!
//! ```text
//! // #c.include <stdint.h>
//! type Alias struct {
//!     Name string `json:"name" ctype:"char[32]"`
//!     Next *Alias `json:"next,omitempty"`
//! }
//! ```
//!
//! See `tests/integration.rs` for full conversions.

pub mod ast;
pub mod config;
pub mod convert;
pub mod directive;
pub mod error;
pub mod extract;
pub mod ir;
pub mod parser;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod tag;
pub mod target;

pub use ast::SourceFile;
pub use config::Config;
pub use convert::{convert, convert_files, Conversion};
pub use directive::Directives;
pub use error::ConvertError;
pub use extract::{Extraction, Extractor, Warning, WarningKind};
pub use ir::{Record, TypeDescriptor, TypeKind};
pub use parser::parse;
pub use registry::NameRegistry;
pub use tag::{Tag, TagError, Tags};
pub use target::Target;
