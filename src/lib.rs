pub mod string_interner;
pub mod types;

pub mod registry;

pub mod layout;
pub mod reorder;

pub mod describe;

pub mod command;
pub mod repl;

pub mod error;
