use crate::Interner;

#[test]
fn same_text_same_symbol() {
    let mut interner = Interner::new();
    let a = interner.intern("start");
    let b = interner.intern("start");

    assert_eq!(a, b);
    assert_eq!(interner.len(), 1);
}

#[test]
fn different_text_different_symbol() {
    let mut interner = Interner::new();
    let a = interner.intern("start");
    let b = interner.intern("loop");

    assert_ne!(a, b);
    assert_eq!(interner.resolve(a), "start");
    assert_eq!(interner.resolve(b), "loop");
}

#[test]
fn arena_holds_each_string_once() {
    let mut interner = Interner::new();
    interner.intern("msg");
    interner.intern("hello world");
    interner.intern("msg");

    assert_eq!(interner.arena_size(), "msghello world".len());
}

#[test]
fn empty_string_is_valid() {
    let mut interner = Interner::new();
    let empty = interner.intern("");

    assert_eq!(interner.resolve(empty), "");
    assert_eq!(interner.get(""), Some(empty));
}

#[test]
fn get_does_not_intern() {
    let mut interner = Interner::new();
    assert_eq!(interner.get("x"), None);
    assert!(interner.is_empty());

    let x = interner.intern("x");
    assert_eq!(interner.get("x"), Some(x));
}

#[test]
fn try_resolve_foreign_symbol() {
    let mut big = Interner::new();
    big.intern("a");
    let b = big.intern("b");

    let small = Interner::new();
    assert_eq!(small.try_resolve(b), None);
}

#[test]
fn iter_follows_insertion_order() {
    let mut interner = Interner::new();
    interner.intern("zeta");
    interner.intern("alpha");
    interner.intern("zeta");

    let strings: Vec<_> = interner.iter().map(|(_, s)| s).collect();
    assert_eq!(strings, ["zeta", "alpha"]);
}
