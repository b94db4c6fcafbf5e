//! Terminal front-ends for the games: a line-driven maze walk and a
//! scripted snake run.

use std::io::{BufRead, Write};

use ordmaze::render::RenderStyle;
use ordmaze_games::{Key, MazeEvent, MazePhase, MazeSession, SnakeEvent, SnakeGame};

use crate::error::CliError;

/// Walk `session` with keys read from `input`, one line at a time.
///
/// Every character on a line is a key (`w/a/s/d`); an empty line is the
/// start/restart key and `q` quits. The board is printed after each line.
pub fn play_maze<R: BufRead, W: Write>(
    session: &mut MazeSession,
    style: RenderStyle,
    input: R,
    out: &mut W,
) -> Result<(), CliError> {
    write!(out, "{}", session.render(style))?;
    writeln!(
        out,
        "maze {}x{} for {:?}. Empty line starts, w/a/s/d moves, q quits.",
        session.grid().size(),
        session.grid().size(),
        session.identifier()
    )?;

    'lines: for line in input.lines() {
        let line = line?;
        let keys = line.trim();
        let mut last = MazeEvent::None;

        if keys.is_empty() {
            last = session.handle_key(Key::Start);
        }
        for c in keys.chars() {
            if c == 'q' {
                break 'lines;
            }
            match Key::from_char(c) {
                Some(key) => last = session.handle_key(key),
                None => writeln!(out, "ignoring key {c:?}")?,
            }
        }

        write!(out, "{}", session.render(style))?;
        let pos = session.player();
        writeln!(
            out,
            "phase={} pos=({},{}) steps={} bumps={} event={}",
            session.phase().as_str(),
            pos.row,
            pos.col,
            session.steps(),
            session.bumps(),
            last.as_str()
        )?;
        if session.phase() == MazePhase::Solved {
            writeln!(out, "You solved it! Empty line to restart, q to quit.")?;
        }
    }

    let stats = &session.stats;
    match stats.best_score {
        Some(best) => writeln!(out, "solved {} time(s), best {} steps", stats.wins, best)?,
        None => writeln!(out, "not solved")?,
    }
    Ok(())
}

/// Outcome of a scripted snake run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeRun {
    pub ticks: u32,
    pub last_event: SnakeEvent,
}

/// Run `game` from the start, one tick period per script character.
///
/// `w/a/s/d` queue a turn before the tick, `.` keeps the heading. Whitespace
/// is skipped. Stops early on a crash.
pub fn run_snake_script(game: &mut SnakeGame, script: &str) -> Result<SnakeRun, CliError> {
    game.handle_key(Key::Start);
    let period = game.tick_period();
    let mut run = SnakeRun {
        ticks: 0,
        last_event: SnakeEvent::None,
    };
    for c in script.chars().filter(|c| !c.is_whitespace()) {
        match (c, Key::from_char(c)) {
            ('.', _) => {}
            (_, Some(Key::Move(dir))) => {
                game.handle_key(Key::Move(dir));
            }
            _ => {
                return Err(CliError::usage(format!(
                    "snake script may only contain w/a/s/d and '.', got {c:?}"
                )))
            }
        }
        run.last_event = game.advance(period);
        run.ticks += 1;
        if run.last_event == SnakeEvent::Crashed {
            break;
        }
    }
    Ok(run)
}
