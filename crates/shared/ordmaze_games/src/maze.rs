use ordmaze::maze::{build_maze, Direction, Grid, MazeError, Position};
use ordmaze::render::{render, RenderOptions, RenderStyle};
use tracing::{debug, info};

use crate::stats::{GameStats, ScoreOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazePhase {
    /// Maze is shown, waiting for the start key.
    Waiting,
    Playing,
    Solved,
}

impl MazePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            MazePhase::Waiting => "waiting",
            MazePhase::Playing => "playing",
            MazePhase::Solved => "solved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeEvent {
    None,
    Started,
    Restarted,
    Moved,
    Bump,
    ReachedGoal,
}

impl MazeEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            MazeEvent::None => "none",
            MazeEvent::Started => "started",
            MazeEvent::Restarted => "restarted",
            MazeEvent::Moved => "moved",
            MazeEvent::Bump => "bump",
            MazeEvent::ReachedGoal => "reached_goal",
        }
    }
}

/// Keyboard input shared by the maze and snake games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Space: start, or restart once a round has ended.
    Start,
    Move(Direction),
}

impl Key {
    /// WASD and space.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Key::Start),
            'w' | 'W' => Some(Key::Move(Direction::Top)),
            'd' | 'D' => Some(Key::Move(Direction::Right)),
            's' | 'S' => Some(Key::Move(Direction::Bottom)),
            'a' | 'A' => Some(Key::Move(Direction::Left)),
            _ => None,
        }
    }

    /// Browser-style key names (`"ArrowUp"`, `" "`, `"w"`, ...).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::Move(Direction::Top)),
            "ArrowRight" => Some(Key::Move(Direction::Right)),
            "ArrowDown" => Some(Key::Move(Direction::Bottom)),
            "ArrowLeft" => Some(Key::Move(Direction::Left)),
            "Space" | "space" => Some(Key::Start),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }
}

/// One player walking one maze from the top-left cell to the bottom-right.
#[derive(Debug, Clone)]
pub struct MazeSession {
    grid: Grid,
    identifier: String,
    player: Position,
    phase: MazePhase,
    steps: u32,
    bumps: u32,
    pub stats: GameStats,
}

impl MazeSession {
    pub fn new(identifier: &str, size: usize) -> Result<Self, MazeError> {
        let grid = build_maze(identifier, size)?;
        info!(identifier, size, "maze generated");
        Ok(Self::from_grid(identifier, grid))
    }

    pub fn from_grid(identifier: &str, grid: Grid) -> Self {
        Self {
            grid,
            identifier: identifier.to_string(),
            player: Position::ORIGIN,
            phase: MazePhase::Waiting,
            steps: 0,
            bumps: 0,
            stats: GameStats::new(ScoreOrder::LowerIsBetter),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn goal(&self) -> Position {
        self.grid.goal()
    }

    pub fn phase(&self) -> MazePhase {
        self.phase
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn bumps(&self) -> u32 {
        self.bumps
    }

    pub fn manhattan_to_goal(&self) -> usize {
        let goal = self.goal();
        self.player.row.abs_diff(goal.row) + self.player.col.abs_diff(goal.col)
    }

    pub fn handle_key(&mut self, key: Key) -> MazeEvent {
        match key {
            Key::Start => self.press_start(),
            Key::Move(dir) => self.try_move(dir),
        }
    }

    /// Start from `Waiting`, restart from `Solved`; ignored while playing.
    pub fn press_start(&mut self) -> MazeEvent {
        match self.phase {
            MazePhase::Waiting => {
                self.phase = MazePhase::Playing;
                debug!(identifier = %self.identifier, "maze started");
                self.check_goal();
                MazeEvent::Started
            }
            MazePhase::Solved => {
                self.reset_round();
                self.phase = MazePhase::Playing;
                debug!(identifier = %self.identifier, "maze restarted");
                self.check_goal();
                MazeEvent::Restarted
            }
            MazePhase::Playing => MazeEvent::None,
        }
    }

    pub fn try_move(&mut self, dir: Direction) -> MazeEvent {
        if self.phase != MazePhase::Playing {
            return MazeEvent::None;
        }

        // The grid already reports boundary walls, so the neighbour lookup only
        // fails on a malformed grid.
        let next = match self.grid.neighbor(self.player, dir) {
            Some(next) if !self.grid.has_wall(self.player, dir) => next,
            _ => {
                self.bumps = self.bumps.saturating_add(1);
                debug!(
                    row = self.player.row,
                    col = self.player.col,
                    dir = dir.as_str(),
                    "bumped into a wall"
                );
                return MazeEvent::Bump;
            }
        };

        self.player = next;
        self.steps = self.steps.saturating_add(1);

        if self.check_goal() {
            MazeEvent::ReachedGoal
        } else {
            MazeEvent::Moved
        }
    }

    /// Text view with the player marked.
    pub fn render(&self, style: RenderStyle) -> String {
        let opts = RenderOptions {
            style,
            exit_marker: true,
            player: (self.phase != MazePhase::Waiting).then_some(self.player),
            show_goal: true,
        };
        render(&self.grid, &opts)
    }

    fn reset_round(&mut self) {
        self.player = Position::ORIGIN;
        self.steps = 0;
        self.bumps = 0;
    }

    fn check_goal(&mut self) -> bool {
        if self.player != self.grid.goal() {
            return false;
        }
        self.phase = MazePhase::Solved;
        self.stats.record_round(true, self.steps);
        info!(
            identifier = %self.identifier,
            steps = self.steps,
            bumps = self.bumps,
            "maze solved"
        );
        true
    }
}
