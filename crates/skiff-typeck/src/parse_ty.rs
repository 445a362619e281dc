//! Parsing of raw type-annotation strings into [`Ty`] values.

use crate::ty::Ty;

/// Map a builtin type name plus already-parsed arguments to its type.
///
/// Returns `None` for names that are not builtin. Missing collection
/// arguments are padded with `Unknown` to the kind's arity; extras are
/// dropped.
pub fn builtin_type(name: &str, args: Vec<Ty>) -> Option<Ty> {
    let mut args = args.into_iter();
    let mut next = || args.next().unwrap_or(Ty::Unknown);
    match name {
        "Int" => Some(Ty::Int),
        "String" => Some(Ty::String),
        "Bool" => Some(Ty::Bool),
        "List" => Some(Ty::list(next())),
        "MutableMap" => Some(Ty::map(next(), next())),
        "MutableSet" => Some(Ty::set(next())),
        _ => None,
    }
}

/// Split a generic-argument list on commas that sit at angle-bracket
/// depth zero. `"Int, Map<String, Int>"` yields two parts.
pub fn parse_comma_separated(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in raw.chars() {
        match c {
            '<' => {
                depth += 1;
                current.push(c);
            }
            '>' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// Parse a raw type-annotation string into a [`Ty`].
///
/// Builtin names map to their kinds; anything else becomes `Custom`. A
/// top-level `<...>` suffix is split on top-level commas and each part
/// parsed recursively, left to right. Unparseable input degrades to
/// `Unknown` rather than failing.
pub fn parse_type_str(raw: &str) -> Ty {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ty::Unknown;
    }
    let (name, args) = match raw.find('<') {
        Some(open) => {
            let name = raw[..open].trim();
            let inner = raw[open + 1..].strip_suffix('>').unwrap_or(&raw[open + 1..]);
            let args = parse_comma_separated(inner)
                .iter()
                .map(|part| parse_type_str(part))
                .collect();
            (name, args)
        }
        None => (raw, Vec::new()),
    };
    if name.is_empty() {
        return Ty::Unknown;
    }
    match builtin_type(name, args.clone()) {
        Some(ty) => ty,
        None => Ty::custom_generic(name, args),
    }
}
