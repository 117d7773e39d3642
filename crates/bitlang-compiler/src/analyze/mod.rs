//! Name resolution for one assembly run.

mod symbol_table;

pub use symbol_table::SymbolTable;

#[cfg(test)]
mod symbol_table_tests;
