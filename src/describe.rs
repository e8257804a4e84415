use crate::error::LayoutError;
use crate::layout::{Layout, LayoutContext, NestedLayout, OptimalLayout};
use crate::types::TypeDef;
use std::fmt;

/// Everything `DESCRIBIR` reports about a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Description {
    Atomic {
        name: String,
        size: u32,
        align: u32,
    },
    Composite {
        name: String,
        is_union: bool,
        layout: Layout,
        /// The reordering search can be refused (too many fields) or fail
        /// while the declared layout is still known.
        optimal: Result<OptimalLayout, LayoutError>,
    },
}

pub fn describe(ctx: &mut LayoutContext<'_>, type_name: &str) -> Result<Description, LayoutError> {
    let registry = ctx.registry();

    match registry.lookup(type_name)? {
        (_, TypeDef::Atomic(atomic)) => Ok(Description::Atomic {
            name: type_name.to_string(),
            size: atomic.size,
            align: atomic.align,
        }),
        (_, TypeDef::Composite(composite)) => {
            let layout = ctx.compute_layout(type_name, composite.is_union, NestedLayout::Declared)?;
            let optimal = ctx.find_optimal_layout(type_name);
            if let Err(e) = &optimal {
                tracing::debug!(%e, "optimal layout unavailable");
            }

            Ok(Description::Composite {
                name: type_name.to_string(),
                is_union: composite.is_union,
                layout,
                optimal,
            })
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Description::Atomic { name, size, align } => {
                writeln!(f, "Tipo Atómico: {}", name)?;
                writeln!(f, "Representación(Empaquetado,Optimo,Ordenado): {} bytes", size)?;
                writeln!(f, "Alineación: {} bytes", align)?;
                writeln!(f, "Bytes desperdiciados: 0 bytes")
            }
            Description::Composite {
                name,
                is_union,
                layout,
                optimal,
            } => {
                let kind = if *is_union { "Union" } else { "Struct" };
                writeln!(f, "Tipo {}: {}", kind, name)?;
                writeln!(f, "Tamaño empaquetado: {} bytes", layout.packed.byte_size)?;
                writeln!(f, "Alineación empaquetado: {} bytes", layout.packed.align)?;
                writeln!(f, "Tamaño no empaquetado: {} bytes", layout.unpacked.byte_size)?;
                writeln!(f, "Alineación no empaquetado: {} bytes", layout.unpacked.align)?;

                let optimal = match optimal {
                    Ok(optimal) => optimal,
                    Err(e) => {
                        writeln!(f, "Bytes desperdiciados (empaquetado): 0 bytes")?;
                        writeln!(
                            f,
                            "Bytes desperdiciados (no empaquetado): {} bytes",
                            layout.wasted_bytes
                        )?;
                        return writeln!(f, "Error: {}", e);
                    }
                };

                writeln!(f, "Tamaño óptimo: {} bytes", optimal.byte_size)?;
                writeln!(f, "Alineación óptimo: {} bytes", optimal.align)?;
                writeln!(f, "Bytes desperdiciados (empaquetado): 0 bytes")?;
                writeln!(
                    f,
                    "Bytes desperdiciados (no empaquetado): {} bytes",
                    layout.wasted_bytes
                )?;
                writeln!(
                    f,
                    "Bytes desperdiciados (óptimo): {} bytes",
                    optimal.wasted_bytes
                )
            }
        }
    }
}
