//! Size and alignment of composite types.
//!
//! Fields are placed in order at a running offset. A struct inserts padding
//! in front of each field whose alignment does not divide the current
//! offset and counts that padding as wasted. A union overlays its fields, so
//! its size is the largest field and its alignment is the least common
//! multiple of all field alignments.
//!
//! The alignment of a struct is the alignment of its first field.

use crate::error::LayoutError;
use crate::registry::TypeRegistry;
use crate::string_interner::Symbol;
use crate::types::{CompositeType, TypeDef};
use nohash_hasher::IntMap;

/// Default upper bound on the direct fields of a composite the optimizer
/// will permute.
pub const DEFAULT_MAX_PERMUTED_FIELDS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutData {
    pub byte_size: u64,
    pub align: u64,
}

/// Result of laying out one composite under the packed and naturally
/// aligned policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub packed: LayoutData,
    pub unpacked: LayoutData,
    /// Padding bytes inserted by the naturally aligned layout, nested
    /// composites included.
    pub wasted_bytes: u64,
}

/// Best naturally aligned layout over every ordering of the direct fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptimalLayout {
    pub byte_size: u64,
    pub align: u64,
    pub wasted_bytes: u64,
}

/// How a composite nested inside the one being laid out contributes its
/// naturally aligned size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NestedLayout {
    /// The nested composite keeps its declared field order.
    Declared,
    /// The nested composite uses its own optimal field order.
    Optimal,
}

/// What a single field brings to the composite that contains it.
#[derive(Clone, Copy, Debug)]
struct FieldLayout {
    packed_size: u64,
    unpacked: LayoutData,
    wasted_bytes: u64,
}

/// Query context over a registry.
///
/// The registry is borrowed immutably for the lifetime of the context, so
/// the optimal layouts of nested composites can be cached between queries.
pub struct LayoutContext<'r> {
    pub(crate) registry: &'r TypeRegistry,
    pub(crate) max_permuted_fields: usize,
    pub(crate) optimal_cache: IntMap<Symbol, (OptimalLayout, u64)>,
}

impl<'r> LayoutContext<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            max_permuted_fields: DEFAULT_MAX_PERMUTED_FIELDS,
            optimal_cache: IntMap::default(),
        }
    }

    pub fn with_max_permuted_fields(mut self, limit: usize) -> Self {
        self.max_permuted_fields = limit;
        self
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Lays out `type_name` in its declared field order.
    ///
    /// `is_union` selects struct or union placement for the top level type.
    /// Nested composites are always placed according to their own flag.
    /// An atomic type yields its own size and alignment under both policies.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn compute_layout(
        &mut self,
        type_name: &str,
        is_union: bool,
        nested: NestedLayout,
    ) -> Result<Layout, LayoutError> {
        let registry = self.registry;

        match registry.lookup(type_name)? {
            (_, TypeDef::Atomic(atomic)) => {
                let data = LayoutData {
                    byte_size: atomic.size.into(),
                    align: atomic.align.into(),
                };
                Ok(Layout {
                    packed: data,
                    unpacked: data,
                    wasted_bytes: 0,
                })
            }
            (sym, TypeDef::Composite(composite)) => {
                let layout = self.layout_fields(sym, &composite.fields, is_union, nested)?;
                tracing::debug!(?layout, "computed layout");
                Ok(layout)
            }
        }
    }

    /// Lays out the fields of `owner` in the given order. The field order is
    /// an explicit parameter so alternative orderings can be evaluated without
    /// touching the registry.
    pub(crate) fn layout_fields(
        &mut self,
        owner: Symbol,
        fields: &[Symbol],
        is_union: bool,
        nested: NestedLayout,
    ) -> Result<Layout, LayoutError> {
        let mut offset = 0u64;
        let mut packed_size = 0u64;
        let mut wasted_bytes = 0u64;
        let mut first_align = None;

        let mut union_packed_size = 0u64;
        let mut union_unpacked_size = 0u64;
        let mut union_align = 1u64;

        let registry = self.registry;
        let overflow = move || LayoutError::Overflow(registry.name_of(owner).to_string());

        for &field in fields {
            let field = self.field_layout(field, nested)?;
            let LayoutData { byte_size, align } = field.unpacked;

            if first_align.is_none() {
                first_align = Some(align);
            }

            // Padding inside nested composites counts for unions too.
            wasted_bytes = wasted_bytes
                .checked_add(field.wasted_bytes)
                .ok_or_else(overflow)?;

            let misalignment = offset % align;
            let pad = if misalignment == 0 {
                0
            } else {
                align - misalignment
            };

            if !is_union {
                wasted_bytes = wasted_bytes.checked_add(pad).ok_or_else(overflow)?;
            }

            offset = offset
                .checked_add(pad)
                .and_then(|offset| offset.checked_add(byte_size))
                .ok_or_else(overflow)?;
            packed_size = packed_size
                .checked_add(field.packed_size)
                .ok_or_else(overflow)?;

            if is_union {
                union_packed_size = union_packed_size.max(field.packed_size);
                union_unpacked_size = union_unpacked_size.max(byte_size);
                union_align = lcm(union_align, align).ok_or_else(overflow)?;
            }
        }

        if is_union {
            let align = union_align;
            return Ok(Layout {
                packed: LayoutData {
                    byte_size: union_packed_size,
                    align,
                },
                unpacked: LayoutData {
                    byte_size: union_unpacked_size,
                    align,
                },
                wasted_bytes,
            });
        }

        let align = first_align.unwrap_or(1);

        Ok(Layout {
            packed: LayoutData {
                byte_size: packed_size,
                align,
            },
            unpacked: LayoutData {
                byte_size: offset,
                align,
            },
            wasted_bytes,
        })
    }

    fn field_layout(
        &mut self,
        field: Symbol,
        nested: NestedLayout,
    ) -> Result<FieldLayout, LayoutError> {
        let registry = self.registry;

        let Some(def) = registry.get(field) else {
            return Err(LayoutError::UnrecognizedFieldType(
                registry.name_of(field).to_string(),
            ));
        };

        match def {
            TypeDef::Atomic(atomic) => {
                let size = u64::from(atomic.size);
                Ok(FieldLayout {
                    packed_size: size,
                    unpacked: LayoutData {
                        byte_size: size,
                        align: atomic.align.into(),
                    },
                    wasted_bytes: 0,
                })
            }
            TypeDef::Composite(composite) => self.nested_layout(field, composite, nested),
        }
    }

    fn nested_layout(
        &mut self,
        sym: Symbol,
        composite: &'r CompositeType,
        nested: NestedLayout,
    ) -> Result<FieldLayout, LayoutError> {
        match nested {
            NestedLayout::Declared => {
                let layout =
                    self.layout_fields(sym, &composite.fields, composite.is_union, nested)?;
                Ok(FieldLayout {
                    packed_size: layout.packed.byte_size,
                    unpacked: LayoutData {
                        byte_size: layout.unpacked.byte_size,
                        align: layout.packed.align,
                    },
                    wasted_bytes: layout.wasted_bytes,
                })
            }
            NestedLayout::Optimal => {
                let (optimal, packed_size) = self.optimal_layout_of(sym, composite)?;
                Ok(FieldLayout {
                    packed_size,
                    unpacked: LayoutData {
                        byte_size: optimal.byte_size,
                        align: optimal.align,
                    },
                    wasted_bytes: optimal.wasted_bytes,
                })
            }
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple of two alignments, `None` if it does not fit in a
/// `u64`. Both arguments must be non-zero.
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    (a / gcd(a, b)).checked_mul(b)
}
