//! The type registry: builtin lookups with generic substitution, plus the
//! per-document catalog of user-defined classes and actors.
//!
//! A registry instance is scoped to one document. `collect_user_types`
//! rebuilds the user catalog wholesale on every call; there is no partial
//! update. Distinct documents must use distinct instances so one document's
//! classes never answer another document's queries.

use rustc_hash::FxHashMap;

use skiff_parser::{split_lines, Ast, NodeKind};
use skiff_patterns as patterns;

use crate::builtins::{builtin_catalog, builtin_name, FieldInfo, MethodInfo, TypeDef};
use crate::parse_ty::parse_type_str;
use crate::ty::Ty;

/// Per-document type registry.
#[derive(Default)]
pub struct TypeRegistry {
    user_types: FxHashMap<String, TypeDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the user catalog from a parsed document.
    ///
    /// Every class/actor node becomes a [`TypeDef`]: its function children
    /// become methods and its variable children become fields, by re-matching
    /// their declaration lines against the extraction patterns. A child whose
    /// line no longer matches still contributes an `Unknown`-typed member
    /// rather than being dropped.
    pub fn collect_user_types(&mut self, ast: &Ast, text: &str) {
        self.user_types.clear();
        let lines = split_lines(text);
        for id in ast.descendants(ast.root()) {
            let node = ast.node(id);
            if !matches!(node.kind, NodeKind::Class | NodeKind::Actor) {
                continue;
            }
            let mut def = TypeDef {
                name: node.name.clone(),
                generic_params: Vec::new(),
                methods: Vec::new(),
                fields: Vec::new(),
            };
            for &child_id in ast.children(id) {
                let child = ast.node(child_id);
                let line = lines.get(child.line).copied().unwrap_or("");
                match child.kind {
                    NodeKind::Function => def.methods.push(method_from_line(child, line)),
                    NodeKind::Variable => {
                        // Header-line variables are constructor parameters;
                        // their types come from the parameter pattern.
                        let field = if child.line == node.line {
                            param_field(&child.name, line)
                        } else {
                            field_from_line(child, line)
                        };
                        def.fields.push(field);
                    }
                    _ => {}
                }
            }
            tracing::trace!(name = %def.name, methods = def.methods.len(), fields = def.fields.len(), "collected user type");
            self.user_types.insert(def.name.clone(), def);
        }
        tracing::debug!(types = self.user_types.len(), "user catalog rebuilt");
    }

    /// The methods callable on `ty`.
    ///
    /// Builtin types have their declared generic parameters substituted with
    /// `ty`'s arguments, position by position (truncated to the shorter
    /// list), recursively through nested generics. Non-builtin types are
    /// looked up in the user catalog by display name. Unknown types have no
    /// methods.
    pub fn methods_for_type(&self, ty: &Ty) -> Vec<MethodInfo> {
        if let Some(def) = builtin_name(ty).and_then(|n| builtin_catalog().get(n)) {
            let args = ty.args();
            if def.generic_params.is_empty() || args.is_empty() {
                return def.methods.clone();
            }
            let subst: FxHashMap<&str, &Ty> = def
                .generic_params
                .iter()
                .map(String::as_str)
                .zip(args)
                .collect();
            return def
                .methods
                .iter()
                .map(|m| {
                    let mut m = m.clone();
                    m.return_type = substitute(&m.return_type, &subst);
                    for p in &mut m.params {
                        p.ty = substitute(&p.ty, &subst);
                    }
                    m
                })
                .collect();
        }
        self.user_types
            .get(ty.display_name())
            .map(|def| def.methods.clone())
            .unwrap_or_default()
    }

    /// The fields of `ty`. Builtins expose none.
    pub fn fields_for_type(&self, ty: &Ty) -> Vec<FieldInfo> {
        self.user_types
            .get(ty.display_name())
            .map(|def| def.fields.clone())
            .unwrap_or_default()
    }

    /// Whether `name` was declared as a class or actor in this document.
    pub fn is_user_defined(&self, name: &str) -> bool {
        self.user_types.contains_key(name)
    }

    /// Look up a definition by name, builtin catalog first.
    pub fn type_definition(&self, name: &str) -> Option<&TypeDef> {
        builtin_catalog().get(name).or_else(|| self.user_types.get(name))
    }
}

/// Replace generic-parameter placeholders in `ty` with their mapped
/// concrete types. Names that are not parameters pass through; nested
/// generics are resolved recursively.
fn substitute(ty: &Ty, subst: &FxHashMap<&str, &Ty>) -> Ty {
    match ty {
        Ty::Custom { name, args } if args.is_empty() => match subst.get(name.as_str()) {
            Some(mapped) => (*mapped).clone(),
            None => ty.clone(),
        },
        Ty::Custom { name, args } => Ty::Custom {
            name: name.clone(),
            args: args.iter().map(|a| substitute(a, subst)).collect(),
        },
        Ty::List(t) => Ty::list(substitute(t, subst)),
        Ty::Set(t) => Ty::set(substitute(t, subst)),
        Ty::Map(k, v) => Ty::map(substitute(k, subst), substitute(v, subst)),
        Ty::Function(params, ret) => Ty::function(
            params.iter().map(|p| substitute(p, subst)).collect(),
            substitute(ret, subst),
        ),
        _ => ty.clone(),
    }
}

/// Build a method entry by re-matching a function child's line.
fn method_from_line(child: &skiff_parser::NodeData, line: &str) -> MethodInfo {
    match patterns::match_function(line) {
        Some(sig) => MethodInfo {
            name: sig.name,
            return_type: sig
                .return_type
                .map(|rt| parse_type_str(&rt))
                .unwrap_or_else(Ty::unit),
            params: patterns::match_params(line)
                .into_iter()
                .map(|p| crate::builtins::ParamInfo {
                    name: p.name,
                    ty: parse_type_str(&p.ty),
                })
                .collect(),
            doc: None,
        },
        None => MethodInfo {
            name: child.name.clone(),
            return_type: Ty::Unknown,
            params: Vec::new(),
            doc: None,
        },
    }
}

/// Build a field entry by re-matching a variable child's line.
fn field_from_line(child: &skiff_parser::NodeData, line: &str) -> FieldInfo {
    match patterns::match_declaration(line) {
        Some(decl) => FieldInfo {
            name: decl.name,
            ty: decl
                .annotation
                .map(|a| parse_type_str(&a))
                .unwrap_or(Ty::Unknown),
            mutable: decl.keyword == patterns::DeclKeyword::Var,
        },
        None => FieldInfo {
            name: child.name.clone(),
            ty: Ty::Unknown,
            mutable: false,
        },
    }
}

/// Build a field entry for a constructor parameter on a header line.
fn param_field(name: &str, header_line: &str) -> FieldInfo {
    let ty = patterns::match_params(header_line)
        .into_iter()
        .find(|p| p.name == name)
        .map(|p| parse_type_str(&p.ty))
        .unwrap_or(Ty::Unknown);
    FieldInfo {
        name: name.to_string(),
        ty,
        mutable: false,
    }
}
