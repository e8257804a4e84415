use crate::string_interner::Symbol;

/// A primitive type: fixed byte size and alignment, no sub-fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtomicType {
    pub size: u32,
    pub align: u32,
}

/// A struct or union built from previously defined types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeType {
    pub fields: Vec<Symbol>,
    pub is_union: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeDef {
    Atomic(AtomicType),
    Composite(CompositeType),
}

impl TypeDef {
    pub fn is_union(&self) -> bool {
        matches!(self, TypeDef::Composite(CompositeType { is_union: true, .. }))
    }
}
