//! Identifier derivation for generated items.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Rust keywords, strict and reserved, that cannot name a module.
static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
        "final", "gen", "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
        "yield",
    ]
    .into_iter()
    .collect()
});

/// Bundle-level constants emitted next to the accessors.
pub const RESERVED_CONSTANTS: [&str; 3] = ["MAIN_LOCALE", "LOCALES", "KEYS"];

/// Constant name for a prefix-stripped key: `app.title` → `APP_TITLE`.
///
/// Characters outside `[A-Z0-9_]` become `_`; a leading digit gets a `_`
/// prefix.
#[must_use]
pub fn constant_name(key: &str) -> String {
    let mut ident: String = key
        .chars()
        .flat_map(char::to_uppercase)
        .map(|c| if c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Type name for a constant name: `APP_TITLE` → `AppTitle`.
///
/// Returns `None` when no letter or digit is left.
#[must_use]
pub fn type_name(constant: &str) -> Option<String> {
    let mut name = String::with_capacity(constant.len());
    for part in constant.split('_').filter(|part| !part.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.push(first);
            name.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    if name.is_empty() {
        return None;
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "Msg");
    }
    if KEYWORDS.contains(name.as_str()) {
        name.push('_');
    }
    Some(name)
}

/// Whether `name` can be used as a module name.
#[must_use]
pub fn is_module_name(name: &str) -> bool {
    is_identifier(name) && !KEYWORDS.contains(name)
}

/// Whether `path` is a Rust path such as `::msgspec_runtime` or `crate::rt`.
#[must_use]
pub fn is_path(path: &str) -> bool {
    let rest = path.strip_prefix("::").unwrap_or(path);
    !rest.is_empty()
        && rest.split("::").all(|segment| {
            is_identifier(segment)
                && (!KEYWORDS.contains(segment) || matches!(segment, "crate" | "self" | "super"))
        })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether a constant name is usable: not bare underscores, not reserved.
#[must_use]
pub fn is_usable_constant(constant: &str) -> bool {
    constant.chars().any(|c| c != '_') && !RESERVED_CONSTANTS.contains(&constant)
}
