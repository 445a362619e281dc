//! Best-effort type inference over a whole document.
//!
//! Produces one `name -> Ty` entry per declared or mutated symbol. The pass
//! is total: a line that matches no pattern is skipped, an expression that
//! resists inference becomes `Unknown`, and nothing here can fail. The map
//! is rebuilt from scratch on every call.

use rustc_hash::FxHashMap;

use skiff_parser::{split_lines, Ast, NodeKind};
use skiff_patterns as patterns;

use crate::parse_ty::{builtin_type, parse_comma_separated, parse_type_str};
use crate::ty::Ty;

/// Infer a type for every symbol observed in the document.
///
/// When an [`Ast`] is supplied, every variable node seeds an `Unknown`
/// entry, so declared-but-uninferrable symbols still appear in the output.
pub fn infer(text: &str, ast: Option<&Ast>) -> FxHashMap<String, Ty> {
    let lines = split_lines(text);
    let mut types: FxHashMap<String, Ty> = FxHashMap::default();
    let mut fn_returns: FxHashMap<String, Ty> = FxHashMap::default();

    // 1. Seed every declared variable with Unknown.
    if let Some(ast) = ast {
        for id in ast.descendants(ast.root()) {
            let node = ast.node(id);
            if node.kind == NodeKind::Variable {
                types.entry(node.name.clone()).or_insert(Ty::Unknown);
            }
        }
    }

    // 2. Declaration scan, in line order; later lines overwrite earlier
    // observations. Function signatures feed the return-type side map.
    for line in &lines {
        if let Some(sig) = patterns::match_function(line) {
            if let Some(rt) = sig.return_type {
                fn_returns.insert(sig.name, parse_type_str(&rt));
            }
            continue;
        }
        let Some(decl) = patterns::match_declaration(line) else {
            continue;
        };
        if let Some(annotation) = &decl.annotation {
            types.insert(decl.name, parse_type_str(annotation));
        } else if let Some(value) = &decl.value {
            match infer_expr(value, &types, &fn_returns) {
                Some(ty) => {
                    types.insert(decl.name, ty);
                }
                // A call to a name with no recorded return contributes
                // nothing, but the declaration itself is still observed.
                None => {
                    types.entry(decl.name).or_insert(Ty::Unknown);
                }
            }
        } else {
            types.entry(decl.name).or_insert(Ty::Unknown);
        }
    }

    // 3. Collection-mutation scan: `.add` observes a List element,
    // `.put` observes a Map entry.
    for line in &lines {
        let Some(call) = patterns::match_method_call(line) else {
            continue;
        };
        let args = patterns::split_arguments(&call.args);
        let observed = match (call.method.as_str(), args.len()) {
            ("add", 1) => Ty::list(arg_type(&args[0], &types, &fn_returns)),
            ("put", 2) => Ty::map(
                arg_type(&args[0], &types, &fn_returns),
                arg_type(&args[1], &types, &fn_returns),
            ),
            _ => continue,
        };
        merge_into_receiver(&mut types, &call.receiver, observed);
    }

    // 4. Binary-operator scan: a declaration whose value is arithmetic over
    // two Int operands is forced to Int, even if step 2 gave up on it.
    for line in &lines {
        let Some(decl) = patterns::match_declaration(line) else {
            continue;
        };
        let Some(value) = &decl.value else { continue };
        let Some(op) = patterns::match_binary_op(value) else {
            continue;
        };
        if operand_is_int(&op.lhs, &types) && operand_is_int(&op.rhs, &types) {
            types.insert(decl.name, Ty::Int);
        }
    }

    tracing::debug!(symbols = types.len(), "inference complete");
    types
}

/// Infer the type of a right-hand-side expression.
///
/// Rules are tried in order, first match wins. Returns `None` only for a
/// call/identifier whose name resolves to nothing; any other unrecognized
/// expression is `Unknown`.
fn infer_expr(
    expr: &str,
    types: &FxHashMap<String, Ty>,
    fn_returns: &FxHashMap<String, Ty>,
) -> Option<Ty> {
    let expr = expr.trim();
    if patterns::is_string_literal(expr) {
        return Some(Ty::String);
    }
    if patterns::is_bool_literal(expr) {
        return Some(Ty::Bool);
    }
    if patterns::is_int_literal(expr) {
        return Some(Ty::Int);
    }
    if let Some(ctor) = patterns::match_collection_constructor(expr) {
        let args = parse_generic_args(ctor.generics.as_deref());
        // The name is restricted to the builtin collections, so this
        // lookup always produces a type.
        return builtin_type(&ctor.type_name, args);
    }
    if let Some(ctor) = patterns::match_constructor(expr) {
        let args = parse_generic_args(ctor.generics.as_deref());
        return Some(Ty::custom_generic(ctor.type_name, args));
    }
    if let Some(call) = patterns::match_call(expr) {
        if let Some(ret) = fn_returns.get(&call.name) {
            return Some(ret.clone());
        }
        if let Some(existing) = types.get(&call.name) {
            return Some(existing.clone());
        }
        return None;
    }
    Some(Ty::Unknown)
}

/// Parse an explicit generic-argument list from a constructor, if present.
fn parse_generic_args(generics: Option<&str>) -> Vec<Ty> {
    match generics {
        Some(raw) => parse_comma_separated(raw)
            .iter()
            .map(|part| parse_type_str(part))
            .collect(),
        None => Vec::new(),
    }
}

/// The type of a mutation-call argument; unresolvable arguments observe
/// `Unknown` rather than blocking the container observation.
fn arg_type(
    expr: &str,
    types: &FxHashMap<String, Ty>,
    fn_returns: &FxHashMap<String, Ty>,
) -> Ty {
    infer_expr(expr, types, fn_returns).unwrap_or(Ty::Unknown)
}

/// Whether an operand is an Int literal or resolves to Int through the
/// running map. The literal test takes priority.
fn operand_is_int(expr: &str, types: &FxHashMap<String, Ty>) -> bool {
    let expr = expr.trim();
    patterns::is_int_literal(expr) || matches!(types.get(expr), Some(Ty::Int))
}

/// Fold a container observation into the receiver's running type.
///
/// An untyped or `Unknown` receiver takes the observation as-is; a receiver
/// of the same outer kind merges slot by slot; a receiver of a different
/// kind is assumed to be an unrelated symbol and left unchanged.
fn merge_into_receiver(types: &mut FxHashMap<String, Ty>, receiver: &str, observed: Ty) {
    match types.get(receiver) {
        None | Some(Ty::Unknown) => {
            types.insert(receiver.to_string(), observed);
        }
        Some(existing) if same_kind(existing, &observed) => {
            let merged = merge(existing, &observed);
            types.insert(receiver.to_string(), merged);
        }
        Some(_) => {}
    }
}

/// Whether two types share the same outer kind.
fn same_kind(a: &Ty, b: &Ty) -> bool {
    matches!(
        (a, b),
        (Ty::Int, Ty::Int)
            | (Ty::String, Ty::String)
            | (Ty::Bool, Ty::Bool)
            | (Ty::List(_), Ty::List(_))
            | (Ty::Map(..), Ty::Map(..))
            | (Ty::Set(_), Ty::Set(_))
            | (Ty::Function(..), Ty::Function(..))
            | (Ty::Custom { .. }, Ty::Custom { .. })
            | (Ty::Unknown, Ty::Unknown)
    )
}

/// Combine two observations of the same symbol.
///
/// Equal kinds merge their generic slots pairwise (when the arities agree;
/// otherwise `a` wins). `Unknown` always yields the other side. A genuine
/// kind mismatch degrades to a `Custom` type whose name joins both kinds --
/// a lossy placeholder, not a union type.
pub fn merge(a: &Ty, b: &Ty) -> Ty {
    match (a, b) {
        (Ty::Unknown, other) | (other, Ty::Unknown) => other.clone(),
        (Ty::List(x), Ty::List(y)) => Ty::list(merge(x, y)),
        (Ty::Set(x), Ty::Set(y)) => Ty::set(merge(x, y)),
        (Ty::Map(k1, v1), Ty::Map(k2, v2)) => Ty::map(merge(k1, k2), merge(v1, v2)),
        (Ty::Function(p1, r1), Ty::Function(p2, r2)) if p1.len() == p2.len() => Ty::function(
            p1.iter().zip(p2).map(|(x, y)| merge(x, y)).collect(),
            merge(r1, r2),
        ),
        (Ty::Custom { name, args: a1 }, Ty::Custom { args: a2, .. })
            if a1.len() == a2.len() && !a1.is_empty() =>
        {
            Ty::Custom {
                name: name.clone(),
                args: a1.iter().zip(a2).map(|(x, y)| merge(x, y)).collect(),
            }
        }
        _ if same_kind(a, b) => a.clone(),
        _ => Ty::custom(format!("{}|{}", a.display_name(), b.display_name())),
    }
}
