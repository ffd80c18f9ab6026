//! Vocabulary → Rust mapping tables.
//!
//! Deterministic mappings from schema.org constructs to Rust identifiers
//! and types.

/// Maps a schema.org `DataType` (or `DataType` subtype) to a Rust scalar.
///
/// Returns `None` for every ordinary type. A name with a scalar mapping is
/// a primitive: it never enters a selection and never renders as a model.
#[must_use]
pub fn scalar_type(name: &str) -> Option<&'static str> {
    Some(match name {
        "Boolean" | "True" | "False" => "bool",
        "Integer" => "i64",
        "Number" | "Float" => "f64",
        "Text" | "URL" | "Date" | "DateTime" | "Time" | "CssSelectorType"
        | "PronounceableText" | "XPathType" => "String",
        _ => return None,
    })
}

/// Specificity rank of a scalar expected type; higher is more specific.
///
/// Union variants are ordered most-specific-first because the generated
/// unions are `#[serde(untagged)]`: deserialization tries variants in
/// declaration order, so `Integer` must be tried before `Number` and
/// `DateTime` before plain `Text`.
#[must_use]
pub fn specificity(name: &str) -> u8 {
    match name {
        "Integer" | "DateTime" => 5,
        "Date" | "Time" | "Float" => 4,
        "Number" => 3,
        "URL" => 2,
        "Boolean" | "True" | "False" | "Text" | "CssSelectorType" | "PronounceableText"
        | "XPathType" => 1,
        _ => 0,
    }
}

/// Converts a camelCase property name into a snake_case Rust identifier,
/// escaping Rust keywords with a trailing underscore.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for ch in s.chars() {
        if ch.is_uppercase() {
            // No underscore between consecutive uppercase (e.g. "ISBN").
            if prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                result.push('_');
            }
            result.push(ch.to_lowercase().next().unwrap_or(ch));
        } else {
            result.push(ch);
        }
        prev = Some(ch);
    }
    if is_keyword(&result) {
        result.push('_');
    }
    result
}

/// Converts a type or member name into a legal Rust type identifier.
///
/// schema.org names are already PascalCase; the only illegal shape is a
/// leading digit (e.g. `3DModel`).
#[must_use]
pub fn rust_type_name(name: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name.to_owned()
    }
}

fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "abstract" | "as" | "async" | "await" | "become" | "box" | "break" | "const"
            | "continue" | "crate" | "do" | "dyn" | "else" | "enum" | "extern" | "false"
            | "final" | "fn" | "for" | "if" | "impl" | "in" | "let" | "loop" | "macro"
            | "match" | "mod" | "move" | "mut" | "override" | "priv" | "pub" | "ref"
            | "return" | "self" | "static" | "struct" | "super" | "trait" | "true" | "try"
            | "type" | "typeof" | "unsafe" | "unsized" | "use" | "virtual" | "where"
            | "while" | "yield"
    )
}
