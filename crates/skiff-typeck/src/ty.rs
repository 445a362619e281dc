//! Type representation for the Skiff analyzer.
//!
//! Defines the core `Ty` enum. Generic arity is fixed by the variant shape
//! (`List` carries one argument, `Map` two), so an ill-formed combination
//! like a parameterized `Int` is unrepresentable. Generic placeholders such
//! as `T`, `K`, `V` and user-defined names are both `Custom`.

use std::fmt;

use serde::Serialize;

/// The display name used for an unresolved type.
pub const UNKNOWN_NAME: &str = "any";

/// A Skiff type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Ty {
    Int,
    String,
    Bool,
    /// `List<T>`.
    List(Box<Ty>),
    /// `Map<K, V>` (written `MutableMap` in source).
    Map(Box<Ty>, Box<Ty>),
    /// `Set<T>` (written `MutableSet` in source).
    Set(Box<Ty>),
    /// A function type: `(param_types) -> return_type`.
    Function(Vec<Ty>, Box<Ty>),
    /// A user-defined type or a generic placeholder, with optional arguments.
    Custom { name: String, args: Vec<Ty> },
    /// Nothing could be inferred; rendered as `any`.
    Unknown,
}

impl Ty {
    /// Create a `List<inner>` type.
    pub fn list(inner: Ty) -> Ty {
        Ty::List(Box::new(inner))
    }

    /// Create a `Map<key, value>` type.
    pub fn map(key: Ty, value: Ty) -> Ty {
        Ty::Map(Box::new(key), Box::new(value))
    }

    /// Create a `Set<inner>` type.
    pub fn set(inner: Ty) -> Ty {
        Ty::Set(Box::new(inner))
    }

    /// Create a function type.
    pub fn function(params: Vec<Ty>, ret: Ty) -> Ty {
        Ty::Function(params, Box::new(ret))
    }

    /// Create a non-generic custom type (or a generic placeholder like `T`).
    pub fn custom(name: impl Into<String>) -> Ty {
        Ty::Custom { name: name.into(), args: Vec::new() }
    }

    /// Create a custom type with generic arguments.
    pub fn custom_generic(name: impl Into<String>, args: Vec<Ty>) -> Ty {
        Ty::Custom { name: name.into(), args }
    }

    /// The `Unit` result type of methods that return nothing useful.
    pub fn unit() -> Ty {
        Ty::custom("Unit")
    }

    /// The name shown for this type's outer kind, ignoring generics.
    pub fn display_name(&self) -> &str {
        match self {
            Ty::Int => "Int",
            Ty::String => "String",
            Ty::Bool => "Bool",
            Ty::List(_) => "List",
            Ty::Map(..) => "Map",
            Ty::Set(_) => "Set",
            Ty::Function(..) => "Function",
            Ty::Custom { name, .. } => name,
            Ty::Unknown => UNKNOWN_NAME,
        }
    }

    /// The generic arguments carried by this type, outermost level only.
    pub fn args(&self) -> Vec<&Ty> {
        match self {
            Ty::List(t) | Ty::Set(t) => vec![t],
            Ty::Map(k, v) => vec![k, v],
            Ty::Custom { args, .. } => args.iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Function(params, ret) => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ") -> {}", ret)
            }
            _ => {
                write!(f, "{}", self.display_name())?;
                let args = self.args();
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", a)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
        }
    }
}
