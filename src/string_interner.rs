use std::collections::HashMap;

#[derive(PartialEq, Debug, Clone, Copy, Hash, Eq, PartialOrd, Ord)]
pub struct Symbol(u32);

// Hashing a `Symbol` writes a single `u32`, so the identity hasher is enough.
impl nohash_hasher::IsEnabled for Symbol {}

/// Owns every type name seen by the registry and hands out `Symbol`s for them.
#[derive(Debug, Default)]
pub struct StringInterner {
    symbols: HashMap<Box<str>, Symbol>,
    names: Vec<Box<str>>,
}

impl StringInterner {
    pub fn new() -> StringInterner {
        StringInterner {
            symbols: HashMap::new(),
            names: Vec::new(),
        }
    }

    pub fn add(&mut self, name: &str) -> Symbol {
        if let Some(sym) = self.symbols.get(name) {
            return *sym;
        }

        let sym = Symbol(self.names.len() as u32);

        let s: Box<str> = name.into();

        self.names.push(s.clone());

        self.symbols.insert(s, sym);

        sym
    }

    pub fn find_symbol(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    pub fn get(&self, symbol: Symbol) -> &str {
        &self.names[symbol.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
