use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use typelayout::layout::DEFAULT_MAX_PERMUTED_FIELDS;
use typelayout::repl::{Options, Session, PROMPT};

/// Computes packed, aligned and optimal layouts of user defined types.
#[derive(ClapParser, Debug)]
struct Args {
    /// Read commands from this file instead of standard input.
    script: Option<PathBuf>,

    /// Largest number of direct fields the optimizer will reorder.
    #[arg(long, default_value_t = DEFAULT_MAX_PERMUTED_FIELDS)]
    max_fields: usize,

    #[arg(long, default_value_t = false)]
    no_prompt: bool,
}

/// Logs go to stderr, and only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> Result<()> {
    let Args {
        script,
        max_fields,
        no_prompt,
    } = Args::parse();

    init_tracing();

    let stdout = io::stdout().lock();

    match script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("could not open {}", path.display()))?;

            let mut session = Session::new(Options {
                prompt: None,
                max_permuted_fields: max_fields,
            });
            session.run(BufReader::new(file), stdout)?;
        }
        None => {
            let stdin = io::stdin();
            let interactive = !no_prompt && stdin.is_terminal();

            let mut session = Session::new(Options {
                prompt: interactive.then(|| PROMPT.to_string()),
                max_permuted_fields: max_fields,
            });
            session.run(stdin.lock(), stdout)?;
        }
    }

    Ok(())
}
