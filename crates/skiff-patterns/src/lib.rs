//! Textual extraction rules for Skiff source lines.
//!
//! Each rule takes a single line (or an expression fragment) and returns
//! either a typed match record or `None`. The rules are pure: no state, no
//! side effects, and the same input always produces the same record. All
//! patterns are compiled once into process-wide statics.
//!
//! The records here are deliberately raw -- annotation and value fields are
//! kept as unparsed strings so the type layer decides how to interpret them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// ── Declarations ───────────────────────────────────────────────────────

/// The binding keyword of a declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DeclKeyword {
    /// `var` -- mutable binding.
    Var,
    /// `val` -- immutable binding.
    Val,
}

/// A matched `var`/`val` declaration line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeclMatch {
    pub keyword: DeclKeyword,
    pub name: String,
    /// The raw `: Type` annotation, if present (without the colon).
    pub annotation: Option<String>,
    /// The raw right-hand side after `=`, if present.
    pub value: Option<String>,
}

static DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(var|val)\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?::\s*([A-Za-z_][A-Za-z0-9_<>,\s]*?))?\s*(?:=\s*(.+?))?\s*$",
    )
    .unwrap()
});

/// Match a `var`/`val` declaration, with optional annotation and value.
pub fn match_declaration(line: &str) -> Option<DeclMatch> {
    let caps = DECL_RE.captures(line)?;
    let keyword = match &caps[1] {
        "var" => DeclKeyword::Var,
        _ => DeclKeyword::Val,
    };
    Some(DeclMatch {
        keyword,
        name: caps[2].to_string(),
        annotation: caps.get(3).map(|m| m.as_str().trim().to_string()),
        value: caps.get(4).map(|m| m.as_str().trim().to_string()),
    })
}

// ── Function signatures ────────────────────────────────────────────────

/// A matched `fun` signature line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FnMatch {
    /// Whether the `io` effect modifier was present.
    pub io: bool,
    pub name: String,
    /// The raw text between the signature's parentheses.
    pub params: String,
    /// The raw return type after `->`, if present.
    pub return_type: Option<String>,
}

static FN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(io\s+)?fun\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)\s*(?:->\s*([A-Za-z_][A-Za-z0-9_<>,\s]*?))?\s*\{?\s*$",
    )
    .unwrap()
});

/// Match a function signature: optional `io`, `fun`, name, parameter list,
/// optional `-> ReturnType`, optional trailing `{`.
pub fn match_function(line: &str) -> Option<FnMatch> {
    let caps = FN_RE.captures(line)?;
    Some(FnMatch {
        io: caps.get(1).is_some(),
        name: caps[2].to_string(),
        params: caps[3].to_string(),
        return_type: caps.get(4).map(|m| m.as_str().trim().to_string()),
    })
}

// ── Class / actor headers ──────────────────────────────────────────────

/// The keyword of a type declaration header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TypeKeyword {
    Class,
    Actor,
}

/// A matched `class`/`actor` header line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeHeaderMatch {
    pub keyword: TypeKeyword,
    pub name: String,
}

static TYPE_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(class|actor)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// Match a `class Name` or `actor Name` header.
pub fn match_type_header(line: &str) -> Option<TypeHeaderMatch> {
    let caps = TYPE_HEADER_RE.captures(line)?;
    let keyword = match &caps[1] {
        "class" => TypeKeyword::Class,
        _ => TypeKeyword::Actor,
    };
    Some(TypeHeaderMatch {
        keyword,
        name: caps[2].to_string(),
    })
}

// ── Parameters ─────────────────────────────────────────────────────────

/// A matched `name: Type` parameter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParamMatch {
    pub name: String,
    /// The raw type text, including any generic suffix.
    pub ty: String,
}

static PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*:\s*([A-Za-z_][A-Za-z0-9_]*(?:<[^>]*>)?)").unwrap()
});

/// Extract every `name: Type` pair from the parenthesized list of a header
/// line, in left-to-right order. Lines without parentheses yield nothing.
pub fn match_params(line: &str) -> Vec<ParamMatch> {
    let open = match line.find('(') {
        Some(i) => i,
        None => return Vec::new(),
    };
    // Unclosed parens degrade to the rest of the line.
    let close = line[open..].find(')').map(|i| open + i).unwrap_or(line.len());
    let inner = &line[open + 1..close];
    PARAM_RE
        .captures_iter(inner)
        .map(|caps| ParamMatch {
            name: caps[1].to_string(),
            ty: caps[2].to_string(),
        })
        .collect()
}

// ── Constructor calls ──────────────────────────────────────────────────

/// A matched `TypeName<Generics>.new(args)` expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CtorMatch {
    pub type_name: String,
    /// The raw text between the angle brackets, if present.
    pub generics: Option<String>,
    /// The raw text between the call's parentheses.
    pub args: String,
}

static CTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(?:<(.+)>)?\s*\.\s*new\s*\((.*)\)\s*$").unwrap()
});

static COLLECTION_CTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(List|MutableMap|MutableSet)\s*(?:<(.+)>)?\s*\.\s*new\s*\((.*)\)\s*$").unwrap()
});

fn ctor_from_captures(caps: regex::Captures<'_>) -> CtorMatch {
    CtorMatch {
        type_name: caps[1].to_string(),
        generics: caps.get(2).map(|m| m.as_str().trim().to_string()),
        args: caps[3].to_string(),
    }
}

/// Match any `TypeName<Generics>.new(args)` constructor expression.
pub fn match_constructor(expr: &str) -> Option<CtorMatch> {
    CTOR_RE.captures(expr.trim()).map(ctor_from_captures)
}

/// Match a builtin-collection constructor, restricted to
/// `List`, `MutableMap`, and `MutableSet`.
pub fn match_collection_constructor(expr: &str) -> Option<CtorMatch> {
    COLLECTION_CTOR_RE
        .captures(expr.trim())
        .map(ctor_from_captures)
}

// ── Method and bare calls ──────────────────────────────────────────────

/// A matched `receiver.method(args)` fragment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MethodCallMatch {
    pub receiver: String,
    pub method: String,
    /// The raw argument text between the parentheses.
    pub args: String,
}

static METHOD_CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*\.\s*([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)").unwrap()
});

/// Match the first `receiver.method(args)` call on a line.
pub fn match_method_call(line: &str) -> Option<MethodCallMatch> {
    let caps = METHOD_CALL_RE.captures(line)?;
    Some(MethodCallMatch {
        receiver: caps[1].to_string(),
        method: caps[2].to_string(),
        args: caps[3].to_string(),
    })
}

/// A matched bare call or identifier expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CallMatch {
    pub name: String,
    /// `Some` when the expression had a parenthesized argument list.
    pub args: Option<String>,
}

static CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(?:\((.*)\))?$").unwrap());

/// Match a bare `name(...)` call or a lone `name` identifier.
pub fn match_call(expr: &str) -> Option<CallMatch> {
    let caps = CALL_RE.captures(expr.trim())?;
    Some(CallMatch {
        name: caps[1].to_string(),
        args: caps.get(2).map(|m| m.as_str().to_string()),
    })
}

// ── Binary operators ───────────────────────────────────────────────────

/// A matched `<lhs> <op> <rhs>` expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinaryOpMatch {
    pub lhs: String,
    pub op: char,
    pub rhs: String,
}

static BINARY_OP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*([+\-*/%])\s*(.+)$").unwrap());

/// Match a binary arithmetic expression with `+ - * / %`.
pub fn match_binary_op(expr: &str) -> Option<BinaryOpMatch> {
    let caps = BINARY_OP_RE.captures(expr.trim())?;
    Some(BinaryOpMatch {
        lhs: caps[1].trim().to_string(),
        op: caps[2].chars().next()?,
        rhs: caps[3].trim().to_string(),
    })
}

// ── Literal classifiers ────────────────────────────────────────────────

static STRING_LIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^".*"$"#).unwrap());
static INT_LIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());

/// Whether the expression is a double-quoted string literal.
pub fn is_string_literal(expr: &str) -> bool {
    STRING_LIT_RE.is_match(expr.trim())
}

/// Whether the expression is `true` or `false`.
pub fn is_bool_literal(expr: &str) -> bool {
    matches!(expr.trim(), "true" | "false")
}

/// Whether the expression is an integer or decimal literal.
pub fn is_int_literal(expr: &str) -> bool {
    INT_LIT_RE.is_match(expr.trim())
}

// ── Argument splitting ─────────────────────────────────────────────────

/// Split an argument list on commas that are not nested inside parentheses,
/// angle brackets, or string literals. Empty input yields no arguments.
pub fn split_arguments(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut current = String::new();
    for c in raw.chars() {
        match c {
            '"' => {
                in_string = !in_string;
                current.push(c);
            }
            '(' | '<' | '[' if !in_string => {
                depth += 1;
                current.push(c);
            }
            ')' | '>' | ']' if !in_string => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 && !in_string => {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_with_annotation_and_value() {
        let m = match_declaration("  val count: Int = 42").unwrap();
        assert_eq!(m.keyword, DeclKeyword::Val);
        assert_eq!(m.name, "count");
        assert_eq!(m.annotation.as_deref(), Some("Int"));
        assert_eq!(m.value.as_deref(), Some("42"));
    }

    #[test]
    fn declaration_value_only() {
        let m = match_declaration("var s = \"hi\"").unwrap();
        assert_eq!(m.keyword, DeclKeyword::Var);
        assert_eq!(m.annotation, None);
        assert_eq!(m.value.as_deref(), Some("\"hi\""));
    }

    #[test]
    fn declaration_generic_annotation() {
        let m = match_declaration("val xs: List<Int>").unwrap();
        assert_eq!(m.annotation.as_deref(), Some("List<Int>"));
        assert_eq!(m.value, None);
    }

    #[test]
    fn declaration_rejects_other_lines() {
        assert!(match_declaration("fun main() {").is_none());
        assert!(match_declaration("x = 5").is_none());
    }

    #[test]
    fn function_signature_full() {
        let m = match_function("io fun fetch(url: String) -> String {").unwrap();
        assert!(m.io);
        assert_eq!(m.name, "fetch");
        assert_eq!(m.params, "url: String");
        assert_eq!(m.return_type.as_deref(), Some("String"));
    }

    #[test]
    fn function_signature_no_return() {
        let m = match_function("fun run() {").unwrap();
        assert!(!m.io);
        assert_eq!(m.return_type, None);
    }

    #[test]
    fn type_headers() {
        let c = match_type_header("class Point {").unwrap();
        assert_eq!(c.keyword, TypeKeyword::Class);
        assert_eq!(c.name, "Point");
        let a = match_type_header("  actor Counter(start: Int) {").unwrap();
        assert_eq!(a.keyword, TypeKeyword::Actor);
        assert_eq!(a.name, "Counter");
    }

    #[test]
    fn params_from_header() {
        let ps = match_params("fun dist(a: Point, b: Point) -> Int {");
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[0].name, "a");
        assert_eq!(ps[0].ty, "Point");
        assert_eq!(ps[1].name, "b");
    }

    #[test]
    fn params_generic_type() {
        let ps = match_params("fun sum(xs: List<Int>) -> Int {");
        assert_eq!(ps.len(), 1);
        assert_eq!(ps[0].ty, "List<Int>");
    }

    #[test]
    fn params_without_parens() {
        assert!(match_params("class Point {").is_empty());
    }

    #[test]
    fn constructor_plain_and_generic() {
        let m = match_constructor("Point.new(1, 2)").unwrap();
        assert_eq!(m.type_name, "Point");
        assert_eq!(m.generics, None);
        assert_eq!(m.args, "1, 2");

        let m = match_constructor("Box<Int>.new(5)").unwrap();
        assert_eq!(m.generics.as_deref(), Some("Int"));
    }

    #[test]
    fn collection_constructor_restricted() {
        assert!(match_collection_constructor("List<Int>.new()").is_some());
        assert!(match_collection_constructor("MutableMap.new()").is_some());
        assert!(match_collection_constructor("MutableSet<String>.new()").is_some());
        assert!(match_collection_constructor("Point.new(1, 2)").is_none());
    }

    #[test]
    fn method_call() {
        let m = match_method_call("  lst.add(3)").unwrap();
        assert_eq!(m.receiver, "lst");
        assert_eq!(m.method, "add");
        assert_eq!(m.args, "3");
    }

    #[test]
    fn bare_call_and_identifier() {
        let call = match_call("make()").unwrap();
        assert_eq!(call.name, "make");
        assert_eq!(call.args.as_deref(), Some(""));
        let ident = match_call("count").unwrap();
        assert_eq!(ident.args, None);
    }

    #[test]
    fn binary_op() {
        let m = match_binary_op("a + 2").unwrap();
        assert_eq!(m.lhs, "a");
        assert_eq!(m.op, '+');
        assert_eq!(m.rhs, "2");
    }

    #[test]
    fn literal_classifiers() {
        assert!(is_string_literal("\"hello\""));
        assert!(!is_string_literal("hello"));
        assert!(is_bool_literal("true"));
        assert!(is_bool_literal(" false "));
        assert!(!is_bool_literal("truth"));
        assert!(is_int_literal("42"));
        assert!(is_int_literal("-7"));
        assert!(is_int_literal("3.14"));
        assert!(!is_int_literal("x1"));
    }

    #[test]
    fn split_arguments_respects_nesting() {
        assert_eq!(split_arguments("1, 2"), vec!["1", "2"]);
        assert_eq!(
            split_arguments("Pair<Int, String>.new(), 3"),
            vec!["Pair<Int, String>.new()", "3"]
        );
        assert_eq!(split_arguments("\"a, b\", 1"), vec!["\"a, b\"", "1"]);
        assert!(split_arguments("").is_empty());
    }
}
