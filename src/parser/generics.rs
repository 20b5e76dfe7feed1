// `@extends Base<Inner>` annotation parsing
//
// A single dedicated grammar: tag keyword, base identifier, `<`, one type
// expression, `>`. The inner expression's leading identifier is resolved
// to a fully-qualified name; a nested wrapper like `array<UserDto>` is
// preserved syntactically in the display form.

use crate::parser::docblock::logical_lines;
use crate::symbols::{resolve_type_name, short_type_name};
use std::collections::BTreeMap;

/// A resolved generic return-type annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericType {
    /// Display form, shortened to the last name segment
    pub type_name: String,
    /// Fully-qualified name of the leading identifier
    pub class: String,
}

/// Extract the first `@extends Base<Inner>` annotation from a class
/// docblock and resolve `Inner` against the file's alias map and
/// namespace. Absence of the tag or an unparseable comment yields None.
pub fn extract_generic_type(
    doc: &str,
    uses: &BTreeMap<String, String>,
    namespace: &str,
) -> Option<GenericType> {
    for line in logical_lines(doc) {
        let Some(rest) = line.strip_prefix("@extends") else {
            continue;
        };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }

        if let Some(inner) = parse_type_argument(rest.trim_start()) {
            let (leading, wrapper) = match inner.find('<') {
                Some(pos) => (&inner[..pos], &inner[pos..]),
                None => (inner.as_str(), ""),
            };

            return Some(GenericType {
                type_name: format!("{}{}", short_type_name(leading), wrapper),
                class: resolve_type_name(leading, uses, namespace),
            });
        }
    }

    None
}

/// Parse `Base<Inner>` and return the inner type expression, honoring
/// nested angle brackets.
fn parse_type_argument(expr: &str) -> Option<String> {
    let chars: Vec<char> = expr.chars().collect();
    let mut i = 0;

    // base identifier
    while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '\\') {
        i += 1;
    }
    if i == 0 {
        return None;
    }

    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if chars.get(i) != Some(&'<') {
        return None;
    }
    i += 1;

    let start = i;
    let mut depth = 1;
    while i < chars.len() {
        match chars[i] {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    let inner: String = chars[start..i].iter().collect();
                    let inner = inner.trim().to_string();
                    return if inner.is_empty() { None } else { Some(inner) };
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}
