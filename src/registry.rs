use crate::error::RegistryError;
use crate::string_interner::{StringInterner, Symbol};
use crate::types::{AtomicType, CompositeType, TypeDef};
use nohash_hasher::IntMap;

/// Every type known to the calculator, keyed by name.
///
/// Names are unique across atomic and composite types. A composite can only
/// refer to names that were defined before it, which keeps the registry free
/// of cycles.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    symbols: StringInterner,
    types: IntMap<Symbol, TypeDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            symbols: StringInterner::new(),
            types: IntMap::default(),
        }
    }

    pub fn define_atomic(
        &mut self,
        name: &str,
        size: u32,
        align: u32,
    ) -> Result<Symbol, RegistryError> {
        if self.contains(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        if align == 0 {
            return Err(RegistryError::ZeroAlignment(name.to_string()));
        }

        let sym = self.symbols.add(name);
        self.types
            .insert(sym, TypeDef::Atomic(AtomicType { size, align }));

        tracing::debug!(type_name = name, size, align, "defined atomic type");

        Ok(sym)
    }

    pub fn define_composite<S: AsRef<str>>(
        &mut self,
        name: &str,
        field_names: &[S],
        is_union: bool,
    ) -> Result<Symbol, RegistryError> {
        if self.contains(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        let mut fields = Vec::with_capacity(field_names.len());

        for field in field_names {
            let field = field.as_ref();
            match self.defined_symbol(field) {
                Some(sym) => fields.push(sym),
                None => return Err(RegistryError::UndefinedFieldType(field.to_string())),
            }
        }

        let sym = self.symbols.add(name);
        self.types
            .insert(sym, TypeDef::Composite(CompositeType { fields, is_union }));

        tracing::debug!(
            type_name = name,
            field_count = field_names.len(),
            is_union,
            "defined composite type"
        );

        Ok(sym)
    }

    pub fn is_union(&self, name: &str) -> Result<bool, RegistryError> {
        self.lookup(name).map(|(_, def)| def.is_union())
    }

    pub fn lookup(&self, name: &str) -> Result<(Symbol, &TypeDef), RegistryError> {
        self.defined_symbol(name)
            .and_then(|sym| self.types.get(&sym).map(|def| (sym, def)))
            .ok_or_else(|| RegistryError::UndefinedType(name.to_string()))
    }

    pub fn get(&self, sym: Symbol) -> Option<&TypeDef> {
        self.types.get(&sym)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defined_symbol(name).is_some()
    }

    pub fn name_of(&self, sym: Symbol) -> &str {
        self.symbols.get(sym)
    }

    /// Field names of a composite, in their stored order.
    pub fn field_names(&self, name: &str) -> Result<Vec<&str>, RegistryError> {
        match self.lookup(name)? {
            (_, TypeDef::Composite(composite)) => Ok(composite
                .fields
                .iter()
                .map(|&field| self.name_of(field))
                .collect()),
            (_, TypeDef::Atomic(_)) => Ok(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn defined_symbol(&self, name: &str) -> Option<Symbol> {
        self.symbols
            .find_symbol(name)
            .filter(|sym| self.types.contains_key(sym))
    }

    /// Rewrites the stored fields of `name`, bypassing validation. Lets tests
    /// build registries the public API refuses to produce.
    #[cfg(test)]
    pub(crate) fn overwrite_fields(&mut self, name: &str, field_names: &[&str]) {
        let fields = field_names
            .iter()
            .map(|field| self.symbols.add(field))
            .collect();
        let sym = self.symbols.add(name);
        if let Some(TypeDef::Composite(composite)) = self.types.get_mut(&sym) {
            composite.fields = fields;
        }
    }
}
