//! Whole-pipeline entry points: parse, extract, render.

use crate::config::Config;
use crate::error::ConvertError;
use crate::extract::{Extractor, Warning};
use crate::parser::parse;
use crate::target::Target;
use std::path::Path;

/// Rendered text plus every recoverable problem met on the way.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub output: String,
    pub warnings: Vec<Warning>,
}

/// Convert in-memory sources. Records from all sources share one registry and
/// one output, in source order.
pub fn convert(sources: &[&str], target: Target, config: &Config) -> Result<Conversion, ConvertError> {
    let named: Vec<(String, &str)> = sources
        .iter()
        .enumerate()
        .map(|(i, src)| (format!("<input {}>", i + 1), *src))
        .collect();
    run(&named, target, config)
}

/// Read and convert files. Directories and empty files are rejected before
/// anything is parsed.
pub fn convert_files<P: AsRef<Path>>(paths: &[P], target: Target, config: &Config) -> Result<Conversion, ConvertError> {
    let mut loaded = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let io_err = |source| ConvertError::Io { path: path.to_path_buf(), source };
        let meta = std::fs::metadata(path).map_err(io_err)?;
        if meta.is_dir() {
            return Err(ConvertError::NotAFile(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(io_err)?;
        if text.trim().is_empty() {
            return Err(ConvertError::EmptySource(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded source");
        loaded.push((path.display().to_string(), text));
    }

    let named: Vec<(String, &str)> = loaded.iter().map(|(p, t)| (p.clone(), t.as_str())).collect();
    run(&named, target, config)
}

fn run(sources: &[(String, &str)], target: Target, config: &Config) -> Result<Conversion, ConvertError> {
    let mut extractor = Extractor::new(target, config);
    for (path, text) in sources {
        let file = parse(text).map_err(|message| ConvertError::Parse { path: path.clone(), message })?;
        extractor.extract(&file)?;
    }
    let ir = extractor.finish();
    tracing::debug!(records = ir.records.len(), warnings = ir.warnings.len(), ?target, "extracted");

    Ok(Conversion {
        output: target.render(&ir, config),
        warnings: ir.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_the_input() {
        let err = convert(&["type A struct {\n\tX int\n}\n", "type ("], Target::C, &Config::new()).unwrap_err();
        match err {
            ConvertError::Parse { path, .. } => assert_eq!(path, "<input 2>"),
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn records_from_all_sources_share_one_output() {
        let a = "type A struct {\n\tB B\n}\n";
        let b = "type B struct {\n\tX int\n}\n";
        let conv = convert(&[a, b], Target::TypeScript, &Config::new().with_suffix("T")).unwrap();
        assert!(conv.output.contains("declare interface AT {\n    B: BT;\n}"));
        assert!(conv.output.contains("declare interface BT {\n    X: number;\n}"));
        assert!(conv.warnings.is_empty());
    }

    #[test]
    fn no_records_still_renders_preamble() {
        let conv = convert(&["package empty\n"], Target::C, &Config::new()).unwrap();
        assert_eq!(conv.output, "#pragma once\n\n");
    }
}
