use crate::command::{parse_command, Command};
use crate::describe::describe;
use crate::layout::{LayoutContext, DEFAULT_MAX_PERMUTED_FIELDS};
use crate::registry::TypeRegistry;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Ingrese una acción: ";

pub struct Options {
    /// Printed before every line is read, without a trailing newline.
    pub prompt: Option<String>,
    pub max_permuted_fields: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prompt: None,
            max_permuted_fields: DEFAULT_MAX_PERMUTED_FIELDS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The command loop. Owns the registry for the whole run.
pub struct Session {
    registry: TypeRegistry,
    options: Options,
}

impl Session {
    pub fn new(options: Options) -> Self {
        Self {
            registry: TypeRegistry::new(),
            options,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Reads commands until `SALIR` or the end of `input`.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {
        let mut line = String::new();

        loop {
            if let Some(prompt) = &self.options.prompt {
                write!(out, "{}", prompt)?;
                out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!("end of input");
                return Ok(());
            }

            if self.execute(&line, &mut out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Runs a single command line. Command errors are written to `out` and
    /// leave the registry as it was; only I/O errors are returned.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                report(out, e)?;
                return Ok(Flow::Continue);
            }
        };

        tracing::trace!(?command, "executing");

        match command {
            Command::Atomic { name, size, align } => {
                if let Err(e) = self.registry.define_atomic(name, size, align) {
                    report(out, e)?;
                }
            }
            Command::Composite {
                name,
                fields,
                is_union,
            } => {
                if let Err(e) = self.registry.define_composite(name, &fields, is_union) {
                    report(out, e)?;
                }
            }
            Command::Describe { name } => {
                let mut ctx = LayoutContext::new(&self.registry)
                    .with_max_permuted_fields(self.options.max_permuted_fields);

                match describe(&mut ctx, name) {
                    Ok(description) => write!(out, "{}", description)?,
                    Err(e) => report(out, e)?,
                }
            }
            Command::Exit => {
                writeln!(out, "Saliendo")?;
                return Ok(Flow::Exit);
            }
            Command::Unknown(keyword) => {
                writeln!(out, "Accion {} desconocida", keyword)?;
            }
        }

        Ok(Flow::Continue)
    }
}

fn report<W: Write, E: Display>(out: &mut W, error: E) -> io::Result<()> {
    writeln!(out, "Error: {}", error)
}
