//! Exhaustive search for the field order with the smallest naturally
//! aligned size.
//!
//! Orders are enumerated lexicographically over field positions, starting
//! with the declared order. The first order reaching the minimum size wins,
//! which fixes the reported alignment and waste when several orders tie.

use crate::error::LayoutError;
use crate::layout::{Layout, LayoutContext, NestedLayout, OptimalLayout};
use crate::string_interner::Symbol;
use crate::types::{CompositeType, TypeDef};

/// Generates every permutation of `0..n` in lexicographic order.
pub struct Permutations {
    indices: Vec<usize>,
    started: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
            started: false,
        }
    }

    /// Moves to the next permutation and returns it, or `None` once every
    /// permutation has been produced. The identity comes first, also for
    /// `n == 0`.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        let n = self.indices.len();
        if n < 2 {
            return None;
        }

        // Rightmost position that is smaller than its successor.
        let mut i = n - 1;
        while i > 0 && self.indices[i - 1] >= self.indices[i] {
            i -= 1;
        }
        if i == 0 {
            return None;
        }

        let pivot = i - 1;
        let mut j = n - 1;
        while self.indices[j] <= self.indices[pivot] {
            j -= 1;
        }

        self.indices.swap(pivot, j);
        self.indices[i..].reverse();

        Some(&self.indices)
    }
}

impl<'r> LayoutContext<'r> {
    /// Finds the smallest naturally aligned size of `type_name` over every
    /// ordering of its direct fields. Nested composites are laid out in their
    /// own optimal order. The registry is never modified.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn find_optimal_layout(&mut self, type_name: &str) -> Result<OptimalLayout, LayoutError> {
        let registry = self.registry;

        match registry.lookup(type_name)? {
            (_, TypeDef::Atomic(atomic)) => Ok(OptimalLayout {
                byte_size: atomic.size.into(),
                align: atomic.align.into(),
                wasted_bytes: 0,
            }),
            (sym, TypeDef::Composite(composite)) => {
                let (optimal, _) = self.optimal_layout_of(sym, composite)?;
                tracing::debug!(?optimal, "found optimal layout");
                Ok(optimal)
            }
        }
    }

    /// Optimal layout of a composite together with its packed size.
    pub(crate) fn optimal_layout_of(
        &mut self,
        sym: Symbol,
        composite: &'r CompositeType,
    ) -> Result<(OptimalLayout, u64), LayoutError> {
        if let Some(cached) = self.optimal_cache.get(&sym) {
            return Ok(*cached);
        }

        let fields = &composite.fields;

        if fields.len() > self.max_permuted_fields {
            return Err(LayoutError::TooManyFields {
                name: self.registry.name_of(sym).to_string(),
                count: fields.len(),
                limit: self.max_permuted_fields,
            });
        }

        let is_union = composite.is_union;

        // The identity comes first, and is the declared order itself.
        let mut permutations = Permutations::new(fields.len());
        permutations.advance();
        let declared = self.layout_fields(sym, fields, is_union, NestedLayout::Optimal)?;
        let mut best = optimal_of(declared);

        let mut order = Vec::with_capacity(fields.len());

        while let Some(permutation) = permutations.advance() {
            order.clear();
            order.extend(permutation.iter().map(|&i| fields[i]));

            let layout = self.layout_fields(sym, &order, is_union, NestedLayout::Optimal)?;

            tracing::trace!(?permutation, size = layout.unpacked.byte_size, "evaluated order");

            if layout.unpacked.byte_size < best.0.byte_size {
                best = optimal_of(layout);
            }
        }

        self.optimal_cache.insert(sym, best);

        Ok(best)
    }
}

/// The optimal-layout view of one evaluated order, plus its packed size.
fn optimal_of(layout: Layout) -> (OptimalLayout, u64) {
    (
        OptimalLayout {
            byte_size: layout.unpacked.byte_size,
            align: layout.unpacked.align,
            wasted_bytes: layout.wasted_bytes,
        },
        layout.packed.byte_size,
    )
}
