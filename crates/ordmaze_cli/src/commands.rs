use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use ordmaze::maze::{build_maze, Grid};
use ordmaze::render::{render, RenderOptions};
use ordmaze::seed::{derive_seeds, SeedPair};
use ordmaze_games::snake::clamp_grid_size;
use ordmaze_games::{identifiers_from_json, pellet_for, MazeSession, Point, SnakeGame};
use serde::Serialize;
use tracing::{debug, info};

use crate::args::{usage_text, Command, Flags, IdSource};
use crate::error::CliError;
use crate::paths::Config;
use crate::play::{play_maze, run_snake_script};

pub struct Context {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

#[derive(Serialize)]
struct MazeReport<'a> {
    identifier: &'a str,
    seeds: SeedPair,
    size: usize,
    wall_masks: Vec<u8>,
    grid: &'a Grid,
}

#[derive(Serialize)]
struct PelletReport<'a> {
    identifier: &'a str,
    pellet: u32,
    grid: u32,
    position: Point,
}

fn read_payload(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn resolve_identifier(src: &IdSource) -> Result<String, CliError> {
    match src {
        IdSource::Literal(id) => Ok(id.clone()),
        IdSource::File(path) => {
            let ids = identifiers_from_json(&read_payload(path)?)?;
            let first = ids.into_iter().next().ok_or(ordmaze_games::SourceError::Empty)?;
            info!(path = %path.display(), identifier = %first, "identifier taken from payload");
            Ok(first)
        }
    }
}

pub fn run<R: BufRead, W: Write>(
    command: &Command,
    flags: &Flags,
    ctx: &Context,
    input: R,
    out: &mut W,
) -> Result<(), CliError> {
    let cfg = &ctx.config;
    let size = flags.size.unwrap_or(cfg.default_size);
    let style = flags.style.unwrap_or(cfg.render_style);
    let grid_size = clamp_grid_size(flags.grid.unwrap_or(cfg.snake_grid));

    match command {
        Command::Help => write!(out, "{}", usage_text())?,

        Command::Maze(src) => {
            let id = resolve_identifier(src)?;
            let grid = build_maze(&id, size)?;
            debug!(identifier = %id, size, passages = grid.open_passages(), "maze built");
            if flags.json {
                let report = MazeReport {
                    identifier: &id,
                    seeds: derive_seeds(&id),
                    size,
                    wall_masks: grid.wall_masks(),
                    grid: &grid,
                };
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                let opts = RenderOptions {
                    style,
                    exit_marker: flags.exit,
                    ..Default::default()
                };
                write!(out, "{}", render(&grid, &opts))?;
            }
        }

        Command::Seeds(id) => {
            let s = derive_seeds(id);
            if flags.json {
                serde_json::to_writer(&mut *out, &s)?;
                writeln!(out)?;
            } else {
                writeln!(out, "h1={} ({:#010x})", s.h1, s.h1)?;
                writeln!(out, "h2={} ({:#010x})", s.h2, s.h2)?;
            }
        }

        Command::Play(src) => {
            let id = resolve_identifier(src)?;
            let mut session = MazeSession::new(&id, size)?;
            play_maze(&mut session, style, input, out)?;
        }

        Command::Snake(src) => {
            let id = resolve_identifier(src)?;
            let mut game = SnakeGame::new(&id, grid_size, cfg.snake_tick_ms);
            let script = match &flags.moves {
                Some(m) => m.clone(),
                None => ".".repeat(game.sim.grid_size() as usize),
            };
            let run = run_snake_script(&mut game, &script)?;
            let sim = &game.sim;
            write!(out, "{}", sim.render())?;
            writeln!(
                out,
                "ticks={} length={} pellets={} phase={} last={}",
                run.ticks,
                sim.len(),
                sim.pellets_eaten(),
                sim.phase().as_str(),
                run.last_event.as_str()
            )?;
        }

        Command::Pellet { id, number } => {
            let position = pellet_for(id, *number, grid_size);
            if flags.json {
                let report = PelletReport {
                    identifier: id,
                    pellet: *number,
                    grid: grid_size,
                    position,
                };
                serde_json::to_writer(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                writeln!(out, "x={} y={}", position.x, position.y)?;
            }
        }

        Command::Ids(path) => {
            for id in identifiers_from_json(&read_payload(path)?)? {
                writeln!(out, "{id}")?;
            }
        }

        Command::Urls(id) => {
            writeln!(out, "{}", cfg.address_url(id))?;
            writeln!(out, "{}", cfg.inscription_url(id))?;
        }

        Command::Paths => match &ctx.config_path {
            Some(p) => writeln!(out, "Config file: {}", p.display())?,
            None => writeln!(out, "Config file: (no config directory on this platform)")?,
        },
    }
    Ok(())
}
