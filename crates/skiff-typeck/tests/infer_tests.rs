//! Inference engine integration tests.
//!
//! These exercise literal inference, constructor analysis, collection
//! mutation merging, annotation parsing, function-return resolution, the
//! numeric-operator heuristic, and the lossy merge fallback.

use rustc_hash::FxHashMap;
use skiff_typeck::{infer, merge, Ty};

// ── Helpers ────────────────────────────────────────────────────────────

/// Run inference over bare text, without an AST.
fn infer_text(src: &str) -> FxHashMap<String, Ty> {
    infer(src, None)
}

/// Assert that `name` was inferred with the expected rendered type.
fn assert_type(map: &FxHashMap<String, Ty>, name: &str, expected: &str) {
    let actual = map
        .get(name)
        .unwrap_or_else(|| panic!("no entry for `{name}`, map: {map:?}"));
    assert_eq!(
        actual.to_string(),
        expected,
        "expected `{name}: {expected}`, got `{actual}`"
    );
}

// ── Literals ───────────────────────────────────────────────────────────

/// Integer, string, and boolean literals resolve directly.
#[test]
fn literal_declarations() {
    let map = infer_text("var x = 5\nvar s = \"hi\"\nvar b = true\n");
    assert_type(&map, "x", "Int");
    assert_type(&map, "s", "String");
    assert_type(&map, "b", "Bool");
}

/// Decimal literals count as Int.
#[test]
fn decimal_literal_is_int() {
    let map = infer_text("val pi = 3.14\n");
    assert_type(&map, "pi", "Int");
}

/// A later declaration of the same name overwrites the earlier one.
#[test]
fn later_declaration_overwrites() {
    let map = infer_text("var x = 5\nvar x = \"now a string\"\n");
    assert_type(&map, "x", "String");
}

// ── Annotations ────────────────────────────────────────────────────────

/// An explicit annotation takes the place of value inference.
#[test]
fn annotation_wins_over_value() {
    let map = infer_text("val xs: List<Int> = something()\n");
    assert_type(&map, "xs", "List<Int>");
}

/// An annotated declaration without a value still gets its type.
#[test]
fn annotation_without_value() {
    let map = infer_text("var m: MutableMap<String, Int>\n");
    assert_type(&map, "m", "Map<String, Int>");
}

// ── Constructors ───────────────────────────────────────────────────────

/// Collection constructors with explicit generics keep them.
#[test]
fn collection_constructor_with_generics() {
    let map = infer_text("val lst = List<Int>.new()\n");
    assert_type(&map, "lst", "List<Int>");
}

/// Collection constructors without generics fill with `any` placeholders
/// sized to the collection's arity.
#[test]
fn collection_constructor_without_generics() {
    let map = infer_text("val lst = List.new()\nval m = MutableMap.new()\n");
    assert_type(&map, "lst", "List<any>");
    assert_type(&map, "m", "Map<any, any>");
}

/// A user-type constructor yields a custom type with its generics.
#[test]
fn user_constructor() {
    let map = infer_text("val p = Point.new(1, 2)\nval b = Box<Int>.new(5)\n");
    assert_type(&map, "p", "Point");
    assert_type(&map, "b", "Box<Int>");
}

// ── Collection mutation merging ────────────────────────────────────────

/// `.add` on an explicitly typed list does not degrade the generic.
#[test]
fn add_keeps_explicit_generic() {
    let map = infer_text("val lst = List<Int>.new()\nlst.add(3)\n");
    assert_type(&map, "lst", "List<Int>");
}

/// `.put` promotes `any` placeholders to the observed key/value types.
#[test]
fn put_promotes_placeholders() {
    let map = infer_text("val m = MutableMap.new()\nm.put(\"k\", 1)\n");
    assert_type(&map, "m", "Map<String, Int>");
}

/// `.add` on a never-declared receiver still records a list observation.
#[test]
fn add_on_untyped_receiver() {
    let map = infer_text("xs.add(\"a\")\n");
    assert_type(&map, "xs", "List<String>");
}

/// Conflicting element observations degrade to the joined-name fallback.
#[test]
fn conflicting_elements_join_names() {
    let map = infer_text("val lst = List.new()\nlst.add(3)\nlst.add(\"x\")\n");
    assert_type(&map, "lst", "List<Int|String>");
}

/// A mutation call on a receiver of a different outer kind is assumed to
/// target an unrelated symbol and leaves the type alone.
#[test]
fn mismatched_receiver_kind_unchanged() {
    let map = infer_text("val s = MutableSet<Int>.new()\ns.add(3)\n");
    // `.add` observes a List; the Set-typed receiver is left as declared.
    assert_type(&map, "s", "Set<Int>");
}

/// Mutation arguments resolve through the running map.
#[test]
fn mutation_argument_resolves_via_map() {
    let map = infer_text("var n = 7\nval lst = List.new()\nlst.add(n)\n");
    assert_type(&map, "lst", "List<Int>");
}

// ── Calls and identifiers ──────────────────────────────────────────────

/// A call to a function with a declared return type resolves to it.
#[test]
fn function_return_resolution() {
    let src = "class C {\n  fun make() -> MutableSet<String> {\n  }\n  val s = make()\n}\n";
    let map = infer_text(src);
    assert_type(&map, "s", "Set<String>");
}

/// Assigning one variable to another copies its inferred type.
#[test]
fn identifier_copies_existing_type() {
    let map = infer_text("var a = 5\nvar b = a\n");
    assert_type(&map, "b", "Int");
}

/// A call to an unknown name records the declaration as `any`.
#[test]
fn unknown_call_degrades_to_any() {
    let map = infer_text("var z = mystery()\n");
    assert_type(&map, "z", "any");
}

// ── Operator heuristic ─────────────────────────────────────────────────

/// Arithmetic over two Int operands forces the declared name to Int.
#[test]
fn int_arithmetic_forces_int() {
    let map = infer_text("var a = 5\nvar c = a + 2\n");
    assert_type(&map, "c", "Int");
}

/// The heuristic stays silent when an operand is not Int.
#[test]
fn non_int_operand_is_not_forced() {
    let map = infer_text("var s = \"x\"\nvar c = s + 2\n");
    assert_type(&map, "c", "any");
}

// ── AST seeding ────────────────────────────────────────────────────────

/// With an AST supplied, every declared variable has an entry even when
/// nothing could be inferred for it.
#[test]
fn ast_seeds_unknown_entries() {
    let src = "class C {\n  fun f(q: Point) {\n  }\n}\n";
    let ast = skiff_parser::parse(src);
    let map = infer(src, Some(&ast));
    assert_type(&map, "q", "any");
}

// ── Merge rule ─────────────────────────────────────────────────────────

/// Unknown yields the other side; equal kinds merge pairwise; mismatched
/// kinds join their names.
#[test]
fn merge_cases() {
    assert_eq!(merge(&Ty::Unknown, &Ty::Int), Ty::Int);
    assert_eq!(merge(&Ty::Bool, &Ty::Unknown), Ty::Bool);
    assert_eq!(
        merge(&Ty::list(Ty::Unknown), &Ty::list(Ty::String)),
        Ty::list(Ty::String)
    );
    assert_eq!(
        merge(&Ty::map(Ty::String, Ty::Unknown), &Ty::map(Ty::Unknown, Ty::Int)),
        Ty::map(Ty::String, Ty::Int)
    );
    assert_eq!(merge(&Ty::Int, &Ty::String), Ty::custom("Int|String"));
    // Same kind, no generics: left side wins.
    assert_eq!(merge(&Ty::custom("A"), &Ty::custom("B")), Ty::custom("A"));
}
