//! Command-line parsing.

use std::path::PathBuf;

use ordmaze::render::RenderStyle;

use crate::error::CliError;

/// Where the identifier comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSource {
    Literal(String),
    /// First identifier in a wallet/indexer JSON payload.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Flags {
    pub size: Option<usize>,
    pub grid: Option<u32>,
    pub style: Option<RenderStyle>,
    pub exit: bool,
    pub json: bool,
    pub moves: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Maze(IdSource),
    Seeds(String),
    Play(IdSource),
    Snake(IdSource),
    Pellet { id: String, number: u32 },
    Ids(PathBuf),
    Urls(String),
    Paths,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub flags: Flags,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

pub fn usage_text() -> &'static str {
    "\
ordmaze - deterministic mazes and games from inscription ids / addresses

Usage: ordmaze [--verbose] [--config FILE] <command> [args]

Commands:
  maze <id> [--size N] [--style classic|boxed] [--exit] [--json]
                              Print the maze for <id>
  seeds <id>                  Print the seed pair derived from <id>
  play <id> [--size N] [--style S]
                              Walk the maze on stdin (w/a/s/d, space, q)
  snake <id> [--grid N] [--moves SCRIPT]
                              Run snake, one script char per tick
                              (w/a/s/d turn, '.' keep going)
  pellet <id> <n> [--grid N]  Print pellet <n> for <id>
  ids <file.json>             List identifiers in a wallet/indexer payload
  urls <id>                   Print the indexer URLs for <id>
  paths                       Show the config file location

  maze, play and snake accept --from <file.json> instead of <id>.
"
}

fn take_value(args: &mut std::vec::IntoIter<String>, flag: &str) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::usage(format!("{flag} needs a value")))
}

fn parse_number<T: std::str::FromStr>(s: &str, what: &str) -> Result<T, CliError> {
    s.parse()
        .map_err(|_| CliError::usage(format!("{what} must be a non-negative integer, got {s:?}")))
}

pub fn parse_args(args: Vec<String>) -> Result<Invocation, CliError> {
    let mut verbose = false;
    let mut config = None;
    let mut flags = Flags::default();
    let mut from: Option<PathBuf> = None;
    let mut positional: Vec<String> = Vec::new();
    let mut help = false;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => help = true,
            "-v" | "--verbose" => verbose = true,
            "--config" => config = Some(PathBuf::from(take_value(&mut it, "--config")?)),
            "--size" => {
                flags.size = Some(parse_number(&take_value(&mut it, "--size")?, "--size")?)
            }
            "--grid" => {
                flags.grid = Some(parse_number(&take_value(&mut it, "--grid")?, "--grid")?)
            }
            "--style" => {
                let v = take_value(&mut it, "--style")?;
                flags.style = Some(RenderStyle::from_name(&v).ok_or_else(|| {
                    CliError::usage(format!("--style must be classic or boxed, got {v:?}"))
                })?);
            }
            "--exit" => flags.exit = true,
            "--json" => flags.json = true,
            "--moves" => flags.moves = Some(take_value(&mut it, "--moves")?),
            "--from" => from = Some(PathBuf::from(take_value(&mut it, "--from")?)),
            // Identifiers that start with "--" must follow a bare "--".
            "--" => positional.extend(it.by_ref()),
            s if s.starts_with("--") => {
                return Err(CliError::usage(format!("unknown flag {s}")));
            }
            _ => positional.push(arg),
        }
    }

    if help || positional.is_empty() {
        return Ok(Invocation {
            command: Command::Help,
            flags,
            verbose,
            config,
        });
    }

    let name = positional.remove(0);
    let mut rest = positional.into_iter();

    let id_source = |rest: &mut std::vec::IntoIter<String>| -> Result<IdSource, CliError> {
        match (from.clone(), rest.next()) {
            (Some(_), Some(id)) => Err(CliError::usage(format!(
                "give either <id> or --from, not both (got {id:?})"
            ))),
            (Some(path), None) => Ok(IdSource::File(path)),
            (None, Some(id)) => Ok(IdSource::Literal(id)),
            (None, None) => Err(CliError::usage(format!("{name} needs <id> or --from <file>"))),
        }
    };
    let required = |rest: &mut std::vec::IntoIter<String>, what: &str| -> Result<String, CliError> {
        rest.next()
            .ok_or_else(|| CliError::usage(format!("{name} needs <{what}>")))
    };

    let command = match name.as_str() {
        "maze" => Command::Maze(id_source(&mut rest)?),
        "play" => Command::Play(id_source(&mut rest)?),
        "snake" => Command::Snake(id_source(&mut rest)?),
        "seeds" => Command::Seeds(required(&mut rest, "id")?),
        "urls" => Command::Urls(required(&mut rest, "id")?),
        "ids" => Command::Ids(PathBuf::from(required(&mut rest, "file.json")?)),
        "pellet" => {
            let id = required(&mut rest, "id")?;
            let number = parse_number(&required(&mut rest, "n")?, "<n>")?;
            Command::Pellet { id, number }
        }
        "paths" => Command::Paths,
        "help" => Command::Help,
        other => return Err(CliError::usage(format!("unknown command {other:?}"))),
    };

    if let Some(extra) = rest.next() {
        return Err(CliError::usage(format!("unexpected argument {extra:?}")));
    }

    Ok(Invocation {
        command,
        flags,
        verbose,
        config,
    })
}
