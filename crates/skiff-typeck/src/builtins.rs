//! The immutable builtin type catalog.
//!
//! Built once into a process-wide static on first access and never mutated
//! afterwards, so it is safe to read from any number of concurrent
//! analyses. Collection entries declare generic parameters (`T`, or `K`/`V`)
//! that the registry substitutes when queried against an instantiation.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::ty::Ty;

/// A catalog entry: a named type with its methods and fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeDef {
    pub name: String,
    /// Generic parameter names, e.g. `["K", "V"]` for `MutableMap<K, V>`.
    pub generic_params: Vec<String>,
    pub methods: Vec<MethodInfo>,
    pub fields: Vec<FieldInfo>,
}

/// A method exposed by a type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub return_type: Ty,
    pub params: Vec<ParamInfo>,
    /// Short description rendered by the editor layer on hover.
    pub doc: Option<String>,
}

/// A named method parameter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParamInfo {
    pub name: String,
    pub ty: Ty,
}

/// A field exposed by a user-defined type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldInfo {
    pub name: String,
    pub ty: Ty,
    /// `true` for `var` fields, `false` for `val`.
    pub mutable: bool,
}

fn method(name: &str, params: Vec<(&str, Ty)>, ret: Ty, doc: &str) -> MethodInfo {
    MethodInfo {
        name: name.to_string(),
        return_type: ret,
        params: params
            .into_iter()
            .map(|(n, ty)| ParamInfo { name: n.to_string(), ty })
            .collect(),
        doc: Some(doc.to_string()),
    }
}

fn type_def(name: &str, generic_params: &[&str], methods: Vec<MethodInfo>) -> TypeDef {
    TypeDef {
        name: name.to_string(),
        generic_params: generic_params.iter().map(|p| p.to_string()).collect(),
        methods,
        fields: Vec::new(),
    }
}

static BUILTINS: Lazy<FxHashMap<&'static str, TypeDef>> = Lazy::new(|| {
    let t = || Ty::custom("T");
    let k = || Ty::custom("K");
    let v = || Ty::custom("V");
    let mut map = FxHashMap::default();

    // ── Scalars ─────────────────────────────────────────────────────
    map.insert(
        "Int",
        type_def(
            "Int",
            &[],
            vec![
                method("toString", vec![], Ty::String, "Render the number as a string."),
                method("abs", vec![], Ty::Int, "Absolute value."),
            ],
        ),
    );
    map.insert(
        "String",
        type_def(
            "String",
            &[],
            vec![
                method("length", vec![], Ty::Int, "Number of characters."),
                method("toUpper", vec![], Ty::String, "Uppercase copy."),
                method("toLower", vec![], Ty::String, "Lowercase copy."),
                method(
                    "contains",
                    vec![("other", Ty::String)],
                    Ty::Bool,
                    "Whether `other` occurs in this string.",
                ),
                method(
                    "split",
                    vec![("separator", Ty::String)],
                    Ty::list(Ty::String),
                    "Split on a separator into a list of parts.",
                ),
            ],
        ),
    );
    map.insert(
        "Bool",
        type_def(
            "Bool",
            &[],
            vec![method("toString", vec![], Ty::String, "`\"true\"` or `\"false\"`.")],
        ),
    );

    // ── Collections ─────────────────────────────────────────────────
    map.insert(
        "List",
        type_def(
            "List",
            &["T"],
            vec![
                method("size", vec![], Ty::Int, "Number of elements."),
                method("isEmpty", vec![], Ty::Bool, "Whether the list has no elements."),
                method(
                    "get",
                    vec![("index", Ty::Int)],
                    t(),
                    "The element at `index`.",
                ),
                method(
                    "add",
                    vec![("item", t())],
                    Ty::unit(),
                    "Append an element to the end of the list.",
                ),
                method(
                    "remove",
                    vec![("index", Ty::Int)],
                    t(),
                    "Remove and return the element at `index`.",
                ),
                method(
                    "contains",
                    vec![("item", t())],
                    Ty::Bool,
                    "Whether the list contains `item`.",
                ),
                method("clear", vec![], Ty::unit(), "Remove every element."),
            ],
        ),
    );
    map.insert(
        "MutableMap",
        type_def(
            "MutableMap",
            &["K", "V"],
            vec![
                method("size", vec![], Ty::Int, "Number of entries."),
                method("get", vec![("key", k())], v(), "The value stored under `key`."),
                method(
                    "put",
                    vec![("key", k()), ("value", v())],
                    Ty::unit(),
                    "Insert or replace the value under `key`.",
                ),
                method(
                    "remove",
                    vec![("key", k())],
                    v(),
                    "Remove and return the value under `key`.",
                ),
                method(
                    "containsKey",
                    vec![("key", k())],
                    Ty::Bool,
                    "Whether an entry exists under `key`.",
                ),
                method("keys", vec![], Ty::list(k()), "All keys as a list."),
                method("values", vec![], Ty::list(v()), "All values as a list."),
                method("clear", vec![], Ty::unit(), "Remove every entry."),
            ],
        ),
    );
    map.insert(
        "MutableSet",
        type_def(
            "MutableSet",
            &["T"],
            vec![
                method("size", vec![], Ty::Int, "Number of elements."),
                method(
                    "add",
                    vec![("item", t())],
                    Ty::unit(),
                    "Insert an element if not already present.",
                ),
                method(
                    "remove",
                    vec![("item", t())],
                    Ty::Bool,
                    "Remove `item`; `true` if it was present.",
                ),
                method(
                    "contains",
                    vec![("item", t())],
                    Ty::Bool,
                    "Whether the set contains `item`.",
                ),
                method("clear", vec![], Ty::unit(), "Remove every element."),
            ],
        ),
    );

    map
});

/// The process-wide builtin catalog, keyed by source-level type name.
pub fn builtin_catalog() -> &'static FxHashMap<&'static str, TypeDef> {
    &BUILTINS
}

/// The builtin catalog name for a type, if it has one.
///
/// `Map`/`Set` report their source-level spellings `MutableMap`/`MutableSet`.
pub fn builtin_name(ty: &Ty) -> Option<&'static str> {
    match ty {
        Ty::Int => Some("Int"),
        Ty::String => Some("String"),
        Ty::Bool => Some("Bool"),
        Ty::List(_) => Some("List"),
        Ty::Map(..) => Some("MutableMap"),
        Ty::Set(_) => Some("MutableSet"),
        _ => None,
    }
}
