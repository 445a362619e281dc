//! Skiff type layer: type parsing, the builtin/user type catalogs, and
//! best-effort document inference.
//!
//! Everything here is a pure transformation of a document snapshot. The
//! builtin catalog is the only process-wide state and is immutable after
//! construction; the user catalog lives inside a per-document
//! [`TypeRegistry`] instance and is rebuilt wholesale on every
//! `collect_user_types` call. No operation in this crate can fail --
//! absence and `Unknown` are the only degradation channels.

pub mod builtins;
pub mod infer;
pub mod parse_ty;
pub mod registry;
pub mod ty;

pub use builtins::{builtin_catalog, FieldInfo, MethodInfo, ParamInfo, TypeDef};
pub use infer::{infer, merge};
pub use parse_ty::{parse_comma_separated, parse_type_str};
pub use registry::TypeRegistry;
pub use ty::Ty;
