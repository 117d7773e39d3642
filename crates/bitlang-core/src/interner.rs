//! Arena-backed string interning for one assembly run.
//!
//! Every identifier, label name and string literal the assembler sees is
//! copied once into a single growable buffer and addressed by a `Symbol`.
//! Dropping the `Interner` releases all of them at once.

use std::collections::HashMap;
use std::ops::Range;

/// Handle to a string stored in an [`Interner`].
///
/// Two symbols from the same interner are equal iff their strings are equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct Interner {
    /// Concatenated bytes of every interned string.
    buffer: String,
    /// Byte range of each symbol inside `buffer`, indexed by symbol.
    spans: Vec<Range<u32>>,
    lookup: HashMap<String, Symbol>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` (once) and return its handle.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.lookup.get(text) {
            return sym;
        }

        let start = self.buffer.len() as u32;
        self.buffer.push_str(text);
        let end = self.buffer.len() as u32;

        let sym = Symbol(self.spans.len() as u32);
        self.spans.push(start..end);
        self.lookup.insert(text.to_owned(), sym);
        sym
    }

    /// Look up a string without interning it.
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.lookup.get(text).copied()
    }

    /// # Panics
    /// Panics if `sym` was produced by a different interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        let span = &self.spans[sym.index()];
        &self.buffer[span.start as usize..span.end as usize]
    }

    #[inline]
    pub fn try_resolve(&self, sym: Symbol) -> Option<&str> {
        let span = self.spans.get(sym.index())?;
        self.buffer.get(span.start as usize..span.end as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Total bytes held by the arena.
    pub fn arena_size(&self) -> usize {
        self.buffer.len()
    }

    /// Strings in the order they were first interned.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.spans.iter().enumerate().map(|(i, span)| {
            (
                Symbol(i as u32),
                &self.buffer[span.start as usize..span.end as usize],
            )
        })
    }
}
