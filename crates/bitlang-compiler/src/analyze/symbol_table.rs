//! Symbol table: label and data names to absolute addresses.
//!
//! Entries are write-once. The emitter records every definition in its
//! layout pass before any reference is resolved, so a failed `lookup` always
//! means the name is undefined.

use bitlang_core::Symbol;
use indexmap::IndexMap;

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    /// Insertion order is definition order.
    table: IndexMap<Symbol, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name`. Returns `false` and leaves the table unchanged if it is
    /// already defined.
    pub fn add(&mut self, name: Symbol, address: u32) -> bool {
        if self.table.contains_key(&name) {
            return false;
        }
        self.table.insert(name, address);
        true
    }

    pub fn lookup(&self, name: Symbol) -> Option<u32> {
        self.table.get(&name).copied()
    }

    pub fn contains(&self, name: Symbol) -> bool {
        self.table.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u32)> + '_ {
        self.table.iter().map(|(&name, &addr)| (name, addr))
    }
}
