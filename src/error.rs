//! Error taxonomy of the calculator.
//!
//! The `Display` texts are the messages shown to the user. The command loop
//! prefixes them with `"Error: "`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("el tipo '{0}' ya existe.")]
    DuplicateName(String),

    #[error("el tipo '{0}' no está definido.")]
    UndefinedFieldType(String),

    #[error("el tipo '{0}' no está definido.")]
    UndefinedType(String),

    #[error("la alineación del tipo '{0}' debe ser positiva.")]
    ZeroAlignment(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A field refers to a name the registry cannot resolve. Only reachable
    /// when a registry was modified behind the registration API.
    #[error("tipo no reconocido: '{0}'")]
    UnrecognizedFieldType(String),

    #[error("el tamaño o la alineación del tipo '{0}' no cabe en 64 bits.")]
    Overflow(String),

    #[error("el tipo '{name}' tiene {count} campos; el máximo para reordenar es {limit}.")]
    TooManyFields {
        name: String,
        count: usize,
        limit: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("faltan argumentos o hay argumentos de mas")]
    ArgumentCount,

    #[error("'{0}' no es un entero positivo.")]
    InvalidInteger(String),

    #[error("'{0}' es demasiado grande; el máximo es 4294967295.")]
    IntegerTooLarge(String),
}
