#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Text helpers shared by the schema, operation and security generators:
//! case conversion, a pluralization heuristic, key escaping and the small
//! amount of TypeScript-expression massaging the writers need.

use regex::Regex;
use std::sync::OnceLock;

/// Wraps a type expression in parentheses when it is a complex expression.
///
/// Required whenever the expression becomes part of a larger one (array
/// items, union/intersection members) and contains punctuation outside
/// `[A-Za-z0-9\[\]/*\\]` that would otherwise bind ambiguously.
pub fn parenthesize(type_string: &str) -> String {
    let complex = type_string.chars().any(|c| {
        !(c.is_ascii_alphanumeric() || matches!(c, '[' | ']' | '/' | '*' | '\\'))
    });
    if complex {
        format!("({})", type_string)
    } else {
        type_string.to_string()
    }
}

/// Strips `/* .. */` comment runs and collapses all whitespace to single
/// spaces, so multi-line object types can be used inline in a signature.
pub fn trim_type_ws(input: &str) -> String {
    static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
    static WS_RE: OnceLock<Regex> = OnceLock::new();
    let comment_re =
        COMMENT_RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("Invalid regex constant"));
    let ws_re = WS_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex constant"));

    let stripped = comment_re.replace_all(input, "");
    ws_re.replace_all(&stripped, " ").trim().to_string()
}

/// Derives the emitted TypeScript name for a named schema: `Api` prefix,
/// with the first literal `dto` substring removed.
pub fn entity_name(name: &str) -> String {
    format!("Api{}", name.replacen("dto", "", 1))
}

/// Escapes an object key for use in a TypeScript literal or interface body.
///
/// Identifier-like keys and `[`-prefixed index signatures pass through;
/// everything else is single-quoted with backslashes and quotes escaped.
pub fn escape_key(input: &str) -> String {
    let identifier_like = input
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if identifier_like || input.starts_with('[') {
        return input.to_string();
    }
    format!("'{}'", input.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Re-indents every continuation line of `input` with `padding`.
pub fn indent_block(input: &str, padding: &str) -> String {
    input.replace('\n', &format!("\n{}", padding))
}

/// Upper-cases the first character.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower-cases the first character.
pub fn uncapitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Converts a space/underscore/hyphen separated string to lowerCamelCase.
///
/// A string with no separators is returned unchanged; callers that need the
/// first letter lowered apply [`uncapitalize`] themselves, matching the
/// method-naming rules.
pub fn camel_case(input: &str) -> String {
    let chunks: Vec<&str> = input.split([' ', '_', '-']).collect();
    if chunks.len() > 1 {
        let mut output = String::new();
        for chunk in chunks {
            output.push_str(&capitalize(chunk));
        }
        return uncapitalize(&output);
    }
    input.to_string()
}

/// Pluralization heuristic for tag names: `ies` -> `y`, trailing `s` dropped.
// TODO: cover irregular plurals once a consumed document actually uses one.
pub fn singular(input: &str) -> String {
    if let Some(stem) = input.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    if let Some(stem) = input.strip_suffix('s') {
        return stem.to_string();
    }
    input.to_string()
}

/// Normalized registry key for a named security scheme.
pub fn security_name(input: &str) -> String {
    camel_case(input)
}
