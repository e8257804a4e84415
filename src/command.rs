use crate::error::CommandError;
use std::num::IntErrorKind;

/// One line of input to the command loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Atomic {
        name: &'a str,
        size: u32,
        align: u32,
    },
    Composite {
        name: &'a str,
        fields: Vec<&'a str>,
        is_union: bool,
    },
    Describe {
        name: &'a str,
    },
    Exit,
    Unknown(&'a str),
}

/// Splits `line` on whitespace and checks the arguments of the command.
/// Returns `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command<'_>>, CommandError> {
    let mut words = line.split_whitespace();

    let Some(keyword) = words.next() else {
        return Ok(None);
    };

    let args: Vec<&str> = words.collect();

    let command = match keyword {
        "ATOMICO" => {
            let [name, size, align] = args[..] else {
                return Err(CommandError::ArgumentCount);
            };
            Command::Atomic {
                name,
                size: parse_positive(size)?,
                align: parse_positive(align)?,
            }
        }
        "STRUCT" | "UNION" => {
            let Some((&name, fields)) = args.split_first() else {
                return Err(CommandError::ArgumentCount);
            };
            Command::Composite {
                name,
                fields: fields.to_vec(),
                is_union: keyword == "UNION",
            }
        }
        "DESCRIBIR" => {
            let [name] = args[..] else {
                return Err(CommandError::ArgumentCount);
            };
            Command::Describe { name }
        }
        "SALIR" => Command::Exit,
        _ => Command::Unknown(keyword),
    };

    Ok(Some(command))
}

fn parse_positive(word: &str) -> Result<u32, CommandError> {
    match word.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            Err(CommandError::IntegerTooLarge(word.to_string()))
        }
        _ => Err(CommandError::InvalidInteger(word.to_string())),
    }
}
