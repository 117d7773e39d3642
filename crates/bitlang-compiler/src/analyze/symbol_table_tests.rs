use bitlang_core::Interner;

use super::SymbolTable;

#[test]
fn add_then_lookup() {
    let mut interner = Interner::new();
    let start = interner.intern("start");
    let mut table = SymbolTable::new();

    assert!(table.add(start, 0x10));
    assert!(table.contains(start));
    assert_eq!(table.lookup(start), Some(0x10));
}

#[test]
fn second_add_is_rejected() {
    let mut interner = Interner::new();
    let start = interner.intern("start");
    let mut table = SymbolTable::new();

    assert!(table.add(start, 0x10));
    assert!(!table.add(start, 0x20));
    assert_eq!(table.lookup(start), Some(0x10));
    assert_eq!(table.len(), 1);
}

#[test]
fn lookup_undefined() {
    let mut interner = Interner::new();
    let ghost = interner.intern("ghost");
    let table = SymbolTable::new();

    assert!(table.is_empty());
    assert_eq!(table.lookup(ghost), None);
    assert!(!table.contains(ghost));
}

#[test]
fn iter_in_definition_order() {
    let mut interner = Interner::new();
    let names = ["main", "loop", "done"].map(|n| interner.intern(n));
    let mut table = SymbolTable::new();
    for (i, name) in names.iter().enumerate() {
        table.add(*name, (i * 8) as u32);
    }

    let addrs: Vec<_> = table.iter().map(|(_, addr)| addr).collect();
    assert_eq!(addrs, [0, 8, 16]);
}
