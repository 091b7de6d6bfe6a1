//! Parse Go source into the declaration tree using PEST.

use crate::ast::*;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct GoParser;

/// Parse Go source into a [`SourceFile`].
pub fn parse(source: &str) -> Result<SourceFile, String> {
    let pairs = GoParser::parse(Rule::file, source).map_err(|e| format!("Parse error: {}", e))?;
    let pair = pairs.into_iter().next().ok_or("Empty parse")?;
    build_file(pair)
}

fn build_file(pair: Pair<Rule>) -> Result<SourceFile, String> {
    let mut file = SourceFile {
        comments: collect_comments(&pair),
        ..SourceFile::default()
    };

    let mut docs = DocTracker::default();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::line_comment | Rule::block_comment => docs.comment(&inner),
            Rule::package_clause => {
                docs.clear();
                let ident = inner.into_inner().next().ok_or("package: missing name")?;
                file.package = Some(ident.as_str().to_string());
            }
            Rule::import_decl => {
                docs.clear();
                for spec in inner.into_inner().filter(|p| p.as_rule() == Rule::import_spec) {
                    let lit = spec
                        .into_inner()
                        .find(|p| p.as_rule() == Rule::string_lit)
                        .ok_or("import: missing path")?;
                    file.imports.push(build_string_lit(lit)?);
                }
            }
            Rule::type_decl => {
                let doc = docs.take_for(&inner);
                file.decls.extend(build_type_decl(inner, doc)?);
            }
            Rule::var_decl => {
                let doc = docs.take_for(&inner);
                file.decls.extend(build_var_decl(inner, doc)?);
            }
            _ => docs.clear(),
        }
    }

    Ok(file)
}

/// Every comment in the file, including those inside struct bodies and trailing fields.
fn collect_comments(pair: &Pair<Rule>) -> Vec<Comment> {
    pair.clone()
        .into_inner()
        .flatten()
        .filter_map(|p| match p.as_rule() {
            Rule::line_comment => Some(Comment { text: line_comment_text(p.as_str()) }),
            Rule::block_comment => Some(Comment { text: block_comment_text(p.as_str()) }),
            _ => None,
        })
        .collect()
}

fn line_comment_text(s: &str) -> String {
    let body = s.strip_prefix("//").unwrap_or(s);
    body.strip_prefix(' ').unwrap_or(body).trim_end().to_string()
}

fn block_comment_text(s: &str) -> String {
    let body = s.strip_prefix("/*").unwrap_or(s);
    let body = body.strip_suffix("*/").unwrap_or(body);
    body.lines()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Tracks a run of comments on consecutive lines so it can be attached to the
/// declaration on the line right after it.
#[derive(Default)]
struct DocTracker {
    lines: Vec<String>,
    last_line: usize,
}

impl DocTracker {
    fn comment(&mut self, pair: &Pair<Rule>) {
        let (start, _) = pair.as_span().start_pos().line_col();
        if start != self.last_line + 1 {
            self.lines.clear();
        }
        let text = match pair.as_rule() {
            Rule::block_comment => block_comment_text(pair.as_str()),
            _ => line_comment_text(pair.as_str()),
        };
        self.lines.push(text);
        self.last_line = pair.as_span().end_pos().line_col().0;
    }

    fn take_for(&mut self, pair: &Pair<Rule>) -> Option<String> {
        let (start, _) = pair.as_span().start_pos().line_col();
        let doc = if !self.lines.is_empty() && self.last_line + 1 == start {
            Some(self.lines.join("\n"))
        } else {
            None
        };
        self.clear();
        doc
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.last_line = 0;
    }
}

/// A single spec takes the doc above `type`; specs in a group take their own.
fn build_type_decl(pair: Pair<Rule>, doc: Option<String>) -> Result<Vec<TypeDecl>, String> {
    let grouped = pair.as_str()["type".len()..].trim_start().starts_with('(');
    let mut docs = DocTracker::default();
    let mut decls = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::line_comment | Rule::block_comment => docs.comment(&inner),
            Rule::type_spec => {
                let spec_doc = if grouped { docs.take_for(&inner) } else { doc.clone() };
                let mut decl = build_type_spec(inner)?;
                decl.doc = spec_doc;
                decls.push(decl);
            }
            _ => {}
        }
    }
    Ok(decls)
}

fn build_var_decl(pair: Pair<Rule>, doc: Option<String>) -> Result<Vec<TypeDecl>, String> {
    let mut decls = Vec::new();
    for spec in pair.into_inner().filter(|p| p.as_rule() == Rule::var_spec) {
        decls.extend(build_var_spec(spec, doc.clone())?);
    }
    Ok(decls)
}

fn build_type_spec(pair: Pair<Rule>) -> Result<TypeDecl, String> {
    let mut name = String::new();
    let mut type_params = Vec::new();
    let mut ty = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = inner.as_str().to_string(),
            Rule::type_params => {
                for param in inner.into_inner().filter(|p| p.as_rule() == Rule::type_param) {
                    let names = param.into_inner().next().ok_or("type param: missing names")?;
                    type_params.extend(build_ident_list(names));
                }
            }
            Rule::type_expr => ty = Some(build_type_expr(inner)?),
            _ => {}
        }
    }
    if name.is_empty() {
        return Err("type declaration: missing name".to_string());
    }
    Ok(TypeDecl {
        name,
        type_params,
        ty: ty.ok_or("type declaration: missing type")?,
        kind: DeclKind::Type,
        doc: None,
    })
}

/// A `var` spec yields one declaration per name, and only when a type is written.
fn build_var_spec(pair: Pair<Rule>, doc: Option<String>) -> Result<Vec<TypeDecl>, String> {
    let mut names = Vec::new();
    let mut ty = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident_list => names = build_ident_list(inner),
            Rule::type_expr => ty = Some(build_type_expr(inner)?),
            _ => {}
        }
    }
    let Some(ty) = ty else {
        return Ok(Vec::new());
    };
    Ok(names
        .into_iter()
        .map(|name| TypeDecl {
            name,
            type_params: Vec::new(),
            ty: ty.clone(),
            kind: DeclKind::Var,
            doc: doc.clone(),
        })
        .collect())
}

fn build_ident_list(pair: Pair<Rule>) -> Vec<String> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::ident)
        .map(|p| p.as_str().to_string())
        .collect()
}

fn build_type_expr(pair: Pair<Rule>) -> Result<TypeExpr, String> {
    let inner = pair.into_inner().next().ok_or("Empty type_expr")?;
    match inner.as_rule() {
        Rule::pointer_type => Ok(TypeExpr::Pointer(Box::new(first_type_expr(inner, "pointer")?))),
        Rule::slice_type => Ok(TypeExpr::Slice(Box::new(first_type_expr(inner, "slice")?))),
        Rule::array_type => {
            let mut it = inner.into_inner();
            let len = it.next().ok_or("array: missing length")?.as_str().trim().to_string();
            let elem = it.next().ok_or("array: missing element type")?;
            Ok(TypeExpr::Array { len, elem: Box::new(build_type_expr(elem)?) })
        }
        Rule::map_type => {
            let mut it = inner.into_inner().filter(|p| p.as_rule() == Rule::type_expr);
            let key = it.next().ok_or("map: missing key type")?;
            let value = it.next().ok_or("map: missing value type")?;
            Ok(TypeExpr::Map {
                key: Box::new(build_type_expr(key)?),
                value: Box::new(build_type_expr(value)?),
            })
        }
        Rule::chan_type => Ok(TypeExpr::Chan(Box::new(first_type_expr(inner, "chan")?))),
        Rule::func_type => {
            let sig = inner
                .into_inner()
                .find(|p| p.as_rule() == Rule::func_signature)
                .ok_or("func: missing signature")?;
            Ok(TypeExpr::Func(sig.as_str().trim().to_string()))
        }
        Rule::struct_type => {
            let fields = inner
                .into_inner()
                .filter(|p| p.as_rule() == Rule::field_decl)
                .map(build_field)
                .collect::<Result<Vec<_>, String>>()?;
            Ok(TypeExpr::Struct(fields))
        }
        Rule::interface_type => {
            let methods = inner
                .into_inner()
                .filter(|p| p.as_rule() == Rule::interface_elem)
                .map(|p| p.as_str().trim().to_string())
                .collect();
            Ok(TypeExpr::Interface { methods })
        }
        Rule::paren_type => first_type_expr(inner, "parenthesised type"),
        Rule::named_type => build_named_type(inner),
        _ => Err(format!("Unhandled type rule: {:?}", inner.as_rule())),
    }
}

fn first_type_expr(pair: Pair<Rule>, what: &str) -> Result<TypeExpr, String> {
    let inner = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::type_expr)
        .ok_or_else(|| format!("{}: missing type", what))?;
    build_type_expr(inner)
}

fn build_named_type(pair: Pair<Rule>) -> Result<TypeExpr, String> {
    let mut base = None;
    let mut args = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::type_name => base = Some(build_type_name(inner)?),
            Rule::type_args => {
                for arg in inner.into_inner().filter(|p| p.as_rule() == Rule::type_expr) {
                    args.push(build_type_expr(arg)?);
                }
            }
            _ => {}
        }
    }
    let base = base.ok_or("named type: missing name")?;
    if args.is_empty() {
        Ok(base)
    } else {
        Ok(TypeExpr::Generic { base: Box::new(base), args })
    }
}

fn build_type_name(pair: Pair<Rule>) -> Result<TypeExpr, String> {
    let mut idents = pair.into_inner().map(|p| p.as_str().to_string());
    let first = idents.next().ok_or("type name: missing identifier")?;
    match idents.next() {
        Some(name) => Ok(TypeExpr::Qualified { package: first, name }),
        None => Ok(TypeExpr::Ident(first)),
    }
}

fn build_field(pair: Pair<Rule>) -> Result<Field, String> {
    let mut names = Vec::new();
    let mut ty = None;
    let mut tag = None;
    let mut comment = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident_list => names = build_ident_list(inner),
            Rule::type_expr => ty = Some(build_type_expr(inner)?),
            Rule::embedded_field => {
                let pointer = inner.as_str().trim_start().starts_with('*');
                let name = inner
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::type_name)
                    .ok_or("embedded field: missing type")?;
                let base = build_type_name(name)?;
                ty = Some(if pointer { TypeExpr::Pointer(Box::new(base)) } else { base });
            }
            Rule::tag => {
                let lit = inner.into_inner().next().ok_or("tag: missing literal")?;
                tag = Some(build_string_lit(lit)?);
            }
            Rule::line_comment => {
                let text = line_comment_text(inner.as_str());
                if !text.is_empty() {
                    comment = Some(text.trim().to_string());
                }
            }
            _ => {}
        }
    }
    Ok(Field {
        names,
        ty: ty.ok_or("Missing type in field")?,
        tag,
        comment,
    })
}

fn build_string_lit(pair: Pair<Rule>) -> Result<String, String> {
    let lit = match pair.as_rule() {
        Rule::string_lit => pair.into_inner().next().ok_or("Empty string literal")?,
        _ => pair,
    };
    let rule = lit.as_rule();
    let body = lit.into_inner().next().map(|p| p.as_str()).unwrap_or("");
    match rule {
        Rule::raw_string => Ok(body.replace('\r', "")),
        Rule::interpreted_string => unescape(body),
        other => Err(format!("Unexpected string literal rule: {:?}", other)),
    }
}

/// Resolve the escapes of a Go interpreted string literal.
pub(crate) fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0c}'),
            Some('v') => out.push('\u{0b}'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                let b = u8::from_str_radix(&hex, 16).map_err(|_| format!("Invalid \\x escape: {}", hex))?;
                out.push(char::from(b));
            }
            Some('u') => out.push(unicode_escape(&mut chars, 4)?),
            Some('U') => out.push(unicode_escape(&mut chars, 8)?),
            Some(other) => return Err(format!("Unknown escape sequence: \\{}", other)),
            None => return Err("Trailing backslash in string literal".to_string()),
        }
    }
    Ok(out)
}

fn unicode_escape(chars: &mut std::str::Chars<'_>, n: usize) -> Result<char, String> {
    let hex: String = chars.by_ref().take(n).collect();
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| format!("Invalid unicode escape: {}", hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_handles_quotes_and_newlines() {
        assert_eq!(unescape(r#"json:\"name\""#).unwrap(), r#"json:"name""#);
        assert_eq!(unescape(r"a\nb\tc").unwrap(), "a\nb\tc");
        assert_eq!(unescape(r"\u00e9").unwrap(), "\u{e9}");
    }

    #[test]
    fn unescape_rejects_unknown_escape() {
        assert!(unescape(r"\q").is_err());
    }

    #[test]
    fn line_comment_strips_marker_and_one_space() {
        assert_eq!(line_comment_text("// #c.include <stdint.h>"), "#c.include <stdint.h>");
        assert_eq!(line_comment_text("//no space"), "no space");
    }

    #[test]
    fn block_comment_keeps_lines() {
        assert_eq!(block_comment_text("/* a\n * b */"), "a\n* b");
    }
}
