//! Integration tests for the derived list functions.
//!
//! The load-bearing property everywhere: operations are persistent. A
//! "mutation" yields a new list and the argument is bit-for-bit what it
//! was before the call.

use machina_funcs::{register_list_functions, NthFn, ReverseFn, SetNthFn};
use machina_storage::{Element, FunctionClass, FunctionElement, FunctionTable};

fn abc() -> Element {
    Element::list(vec![
        Element::string("a"),
        Element::string("b"),
        Element::string("c"),
    ])
}

fn num(n: f64) -> Element {
    Element::number(n)
}

// ══════════════════════════════════════════════════════════════════════════════
// setnth
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn setnth_replaces_and_preserves_original() {
    let original = abc();
    let f = SetNthFn::new();

    let updated = f.value(&[original.clone(), num(2.0), Element::string("z")]);
    assert_eq!(
        updated,
        Element::list(vec![
            Element::string("a"),
            Element::string("z"),
            Element::string("c"),
        ])
    );
    // persistent update: the argument is unchanged
    assert_eq!(original, abc());
}

#[test]
fn setnth_appends_at_length_plus_one() {
    let f = SetNthFn::new();
    let updated = f.value(&[abc(), num(4.0), Element::string("d")]);
    assert_eq!(
        updated,
        Element::list(vec![
            Element::string("a"),
            Element::string("b"),
            Element::string("c"),
            Element::string("d"),
        ])
    );
}

#[test]
fn setnth_out_of_range_is_undef() {
    let f = SetNthFn::new();
    assert_eq!(f.value(&[abc(), num(5.0), Element::string("z")]), Element::Undef);
    assert_eq!(f.value(&[abc(), num(0.0), Element::string("z")]), Element::Undef);
}

#[test]
fn setnth_precondition_violations_are_silent() {
    let f = SetNthFn::new();
    // wrong arity
    assert_eq!(f.value(&[abc(), num(1.0)]), Element::Undef);
    // non-list first argument
    assert_eq!(
        f.value(&[num(1.0), num(1.0), Element::string("z")]),
        Element::Undef
    );
    // non-natural index
    assert_eq!(
        f.value(&[abc(), num(1.5), Element::string("z")]),
        Element::Undef
    );
    assert_eq!(
        f.value(&[abc(), num(-1.0), Element::string("z")]),
        Element::Undef
    );
    // undefined replacement value
    assert_eq!(f.value(&[abc(), num(1.0), Element::Undef]), Element::Undef);
}

// ══════════════════════════════════════════════════════════════════════════════
// nth / take / drop / reverse
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn nth_is_one_based() {
    let f = NthFn::new();
    assert_eq!(f.value(&[abc(), num(1.0)]), Element::string("a"));
    assert_eq!(f.value(&[abc(), num(3.0)]), Element::string("c"));
    assert_eq!(f.value(&[abc(), num(0.0)]), Element::Undef);
    assert_eq!(f.value(&[abc(), num(4.0)]), Element::Undef);
}

#[test]
fn reverse_builds_a_new_list() {
    let original = abc();
    let f = ReverseFn::new();
    let reversed = f.value(&[original.clone()]);
    assert_eq!(
        reversed,
        Element::list(vec![
            Element::string("c"),
            Element::string("b"),
            Element::string("a"),
        ])
    );
    assert_eq!(original, abc());
}

#[test]
fn take_and_drop_clamp_to_length() {
    let mut table = FunctionTable::new();
    register_list_functions(&mut table);

    let take = table.get("take").unwrap();
    let drop = table.get("drop").unwrap();

    assert_eq!(
        take.value(&[abc(), num(2.0)]),
        Element::list(vec![Element::string("a"), Element::string("b")])
    );
    assert_eq!(take.value(&[abc(), num(10.0)]), abc());
    assert_eq!(
        drop.value(&[abc(), num(2.0)]),
        Element::list(vec![Element::string("c")])
    );
    assert_eq!(drop.value(&[abc(), num(10.0)]), Element::list(vec![]));
}

#[test]
fn family_is_registered_as_derived_with_signatures() {
    let mut table = FunctionTable::new();
    register_list_functions(&mut table);

    assert_eq!(
        table.names(),
        vec!["drop", "nth", "reverse", "setnth", "take"]
    );
    for name in table.names() {
        let f = table.get(name).unwrap();
        assert_eq!(f.fclass(), FunctionClass::Derived);
        let sig = f.signature().expect("list functions declare signatures");
        assert!(sig.arity() >= 1);
    }
}
