//! Snake on a square board with identifier-seeded pellets.
//!
//! Coordinate system: `x` grows to the right, `y` grows downward, both in
//! `[0, grid_size)`. Headings reuse [`Direction`] (`Top` is `y - 1`).

use std::collections::VecDeque;

use ordmaze::maze::Direction;
use tracing::{debug, info};

use crate::maze::Key;
use crate::pellet::{pellet_position, Point};
use crate::stats::{GameStats, ScoreOrder};
use crate::time::{Duration, Instant};

pub const DEFAULT_GRID_SIZE: u32 = 20;
pub const DEFAULT_TICK_MS: u64 = 150;
const MIN_GRID_SIZE: u32 = 4;
/// Largest board side; larger requests are clamped.
pub const MAX_GRID_SIZE: u32 = 1024;
const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 60_000;
const INITIAL_LEN: i32 = 3;
/// Upper bound on ticks replayed by one `advance` call after a stall.
const MAX_CATCH_UP_TICKS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakePhase {
    Waiting,
    Running,
    Over,
}

impl SnakePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SnakePhase::Waiting => "waiting",
            SnakePhase::Running => "running",
            SnakePhase::Over => "over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SnakeEvent {
    None,
    Queued,
    Started,
    Restarted,
    Moved,
    Ate,
    Crashed,
}

impl SnakeEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            SnakeEvent::None => "none",
            SnakeEvent::Queued => "queued",
            SnakeEvent::Started => "started",
            SnakeEvent::Restarted => "restarted",
            SnakeEvent::Moved => "moved",
            SnakeEvent::Ate => "ate",
            SnakeEvent::Crashed => "crashed",
        }
    }
}

/// Board size actually used for a requested `grid_size`.
pub fn clamp_grid_size(grid_size: u32) -> u32 {
    grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
}

/// Snake state and tick rules, without any clock.
#[derive(Debug, Clone)]
pub struct SnakeSim {
    asset_id: String,
    grid_size: u32,
    body: VecDeque<Point>,
    heading: Direction,
    queued: Option<Direction>,
    pellet_number: u32,
    pellet: Point,
    phase: SnakePhase,
}

impl SnakeSim {
    pub fn new(asset_id: &str, grid_size: u32) -> Self {
        let grid_size = clamp_grid_size(grid_size);
        let mut sim = Self {
            asset_id: asset_id.to_string(),
            grid_size,
            body: VecDeque::new(),
            heading: Direction::Right,
            queued: None,
            pellet_number: 1,
            pellet: Point::new(0, 0),
            phase: SnakePhase::Waiting,
        };
        sim.reset_board();
        sim
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Head first.
    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn queued(&self) -> Option<Direction> {
        self.queued
    }

    pub fn pellet(&self) -> Point {
        self.pellet
    }

    pub fn pellet_number(&self) -> u32 {
        self.pellet_number
    }

    pub fn pellets_eaten(&self) -> u32 {
        self.pellet_number - 1
    }

    pub fn phase(&self) -> SnakePhase {
        self.phase
    }

    pub fn handle_key(&mut self, key: Key) -> SnakeEvent {
        match key {
            Key::Start => self.press_start(),
            Key::Move(dir) => self.queue_turn(dir),
        }
    }

    /// Start from `Waiting`; full reset and start from `Over`.
    pub fn press_start(&mut self) -> SnakeEvent {
        match self.phase {
            SnakePhase::Waiting => {
                self.phase = SnakePhase::Running;
                debug!(asset_id = %self.asset_id, "snake started");
                SnakeEvent::Started
            }
            SnakePhase::Over => {
                self.reset_board();
                self.phase = SnakePhase::Running;
                debug!(asset_id = %self.asset_id, "snake restarted");
                SnakeEvent::Restarted
            }
            SnakePhase::Running => SnakeEvent::None,
        }
    }

    /// Queue one turn for the next tick.
    ///
    /// Rejected while a turn is already queued, or when it would reverse the
    /// current heading.
    pub fn queue_turn(&mut self, dir: Direction) -> SnakeEvent {
        if self.phase != SnakePhase::Running
            || self.queued.is_some()
            || dir == self.heading.opposite()
        {
            return SnakeEvent::None;
        }
        self.queued = Some(dir);
        SnakeEvent::Queued
    }

    /// Advance one step.
    pub fn tick(&mut self) -> SnakeEvent {
        if self.phase != SnakePhase::Running {
            return SnakeEvent::None;
        }

        if let Some(turn) = self.queued.take() {
            if turn != self.heading.opposite() {
                self.heading = turn;
            }
        }

        let head = self.head();
        let (dy, dx) = self.heading.offset();
        let next = Point::new(head.x + dx as i32, head.y + dy as i32);

        let g = self.grid_size as i32;
        let out_of_bounds = next.x < 0 || next.x >= g || next.y < 0 || next.y >= g;
        if out_of_bounds || self.body.contains(&next) {
            self.phase = SnakePhase::Over;
            info!(
                asset_id = %self.asset_id,
                length = self.body.len(),
                pellets = self.pellets_eaten(),
                "snake crashed"
            );
            return SnakeEvent::Crashed;
        }

        self.body.push_front(next);
        let event = if next == self.pellet {
            self.pellet_number += 1;
            debug!(asset_id = %self.asset_id, pellet = self.pellet_number, "pellet eaten");
            SnakeEvent::Ate
        } else {
            self.body.pop_back();
            SnakeEvent::Moved
        };

        // Re-placed on every change so a pellet hidden under the body moves
        // back once the body clears its primary cell.
        self.refresh_pellet();
        event
    }

    /// Text board: `@` head, `o` body, `*` pellet, `.` empty.
    pub fn render(&self) -> String {
        let side = self.grid_size as usize;
        let mut out = String::with_capacity((side + 1) * side);
        let g = self.grid_size as i32;
        for y in 0..g {
            for x in 0..g {
                let p = Point::new(x, y);
                let c = if p == self.head() {
                    '@'
                } else if self.body.contains(&p) {
                    'o'
                } else if p == self.pellet {
                    '*'
                } else {
                    '.'
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }

    fn reset_board(&mut self) {
        let mid = (self.grid_size / 2) as i32;
        self.body = (0..INITIAL_LEN).map(|i| Point::new(mid - i, mid)).collect();
        self.heading = Direction::Right;
        self.queued = None;
        self.pellet_number = 1;
        self.refresh_pellet();
    }

    fn refresh_pellet(&mut self) {
        let body = &self.body;
        self.pellet = pellet_position(
            &self.asset_id,
            self.pellet_number,
            self.grid_size,
            |p| body.contains(&p),
        );
    }
}

/// [`SnakeSim`] paced by a monotonic clock.
#[derive(Debug)]
pub struct SnakeGame {
    pub sim: SnakeSim,
    pub stats: GameStats,
    tick_period: Duration,
    pending: Duration,
    last_update_at: Instant,
}

impl SnakeGame {
    pub fn new(asset_id: &str, grid_size: u32, tick_ms: u64) -> Self {
        Self {
            sim: SnakeSim::new(asset_id, grid_size),
            stats: GameStats::new(ScoreOrder::HigherIsBetter),
            tick_period: Duration::from_millis(tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS)),
            pending: Duration::ZERO,
            last_update_at: Instant::now(),
        }
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn handle_key(&mut self, key: Key) -> SnakeEvent {
        let event = self.sim.handle_key(key);
        if matches!(event, SnakeEvent::Started | SnakeEvent::Restarted) {
            self.pending = Duration::ZERO;
            self.last_update_at = Instant::now();
        }
        event
    }

    /// Run every tick that is due on the wall clock.
    pub fn update(&mut self) -> SnakeEvent {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update_at);
        self.last_update_at = now;
        self.advance(elapsed)
    }

    /// Run the ticks covered by `elapsed` and return the most significant
    /// event among them (`Crashed` > `Ate` > `Moved`).
    pub fn advance(&mut self, elapsed: Duration) -> SnakeEvent {
        if self.sim.phase() != SnakePhase::Running {
            self.pending = Duration::ZERO;
            return SnakeEvent::None;
        }

        self.pending += elapsed;
        let mut strongest = SnakeEvent::None;
        let mut ticks = 0;
        while self.pending >= self.tick_period {
            if ticks == MAX_CATCH_UP_TICKS {
                self.pending = Duration::ZERO;
                break;
            }
            self.pending -= self.tick_period;
            ticks += 1;

            let event = self.sim.tick();
            strongest = strongest.max(event);
            if event == SnakeEvent::Crashed {
                self.stats
                    .record_round(false, self.sim.len().min(u32::MAX as usize) as u32);
                self.pending = Duration::ZERO;
                break;
            }
        }
        strongest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "test-inscription-id";

    fn running(id: &str) -> SnakeSim {
        let mut sim = SnakeSim::new(id, DEFAULT_GRID_SIZE);
        assert_eq!(sim.press_start(), SnakeEvent::Started);
        sim
    }

    #[test]
    fn initial_layout_and_first_pellet() {
        let sim = SnakeSim::new(ID, DEFAULT_GRID_SIZE);
        let body: Vec<Point> = sim.body().iter().copied().collect();
        assert_eq!(
            body,
            [Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
        );
        assert_eq!(sim.heading(), Direction::Right);
        assert_eq!(sim.pellet(), Point::new(17, 5));
        assert_eq!(sim.phase(), SnakePhase::Waiting);
    }

    #[test]
    fn does_not_move_before_start() {
        let mut sim = SnakeSim::new(ID, DEFAULT_GRID_SIZE);
        assert_eq!(sim.tick(), SnakeEvent::None);
        assert_eq!(sim.queue_turn(Direction::Top), SnakeEvent::None);
        assert_eq!(sim.head(), Point::new(10, 10));
    }

    #[test]
    fn moves_and_follows_tail() {
        let mut sim = running(ID);
        assert_eq!(sim.tick(), SnakeEvent::Moved);
        let body: Vec<Point> = sim.body().iter().copied().collect();
        assert_eq!(
            body,
            [Point::new(11, 10), Point::new(10, 10), Point::new(9, 10)]
        );
    }

    #[test]
    fn reversal_and_double_queue_are_rejected() {
        let mut sim = running(ID);
        assert_eq!(sim.queue_turn(Direction::Left), SnakeEvent::None);
        assert_eq!(sim.queue_turn(Direction::Top), SnakeEvent::Queued);
        // Only one turn per tick.
        assert_eq!(sim.queue_turn(Direction::Bottom), SnakeEvent::None);
        sim.tick();
        assert_eq!(sim.heading(), Direction::Top);
        assert_eq!(sim.head(), Point::new(10, 9));
        assert_eq!(sim.queued(), None);
    }

    #[test]
    fn eats_the_deterministic_pellet_and_grows() {
        let mut sim = running(ID);
        // Pellet 1 sits at (17, 5): go right 7, then up 5.
        for _ in 0..7 {
            assert_eq!(sim.tick(), SnakeEvent::Moved);
        }
        sim.queue_turn(Direction::Top);
        for _ in 0..4 {
            assert_eq!(sim.tick(), SnakeEvent::Moved);
        }
        assert_eq!(sim.tick(), SnakeEvent::Ate);
        assert_eq!(sim.len(), 4);
        assert_eq!(sim.pellets_eaten(), 1);
        assert_eq!(sim.pellet(), Point::new(2, 7));
    }

    #[test]
    fn wall_crash_ends_round_and_space_restarts() {
        let mut sim = running(ID);
        sim.queue_turn(Direction::Bottom);
        let mut last = SnakeEvent::None;
        for _ in 0..20 {
            last = sim.tick();
            if last == SnakeEvent::Crashed {
                break;
            }
        }
        assert_eq!(last, SnakeEvent::Crashed);
        assert_eq!(sim.phase(), SnakePhase::Over);
        // Snake is left where it was.
        assert_eq!(sim.head(), Point::new(10, 19));
        assert_eq!(sim.tick(), SnakeEvent::None);

        assert_eq!(sim.press_start(), SnakeEvent::Restarted);
        assert_eq!(sim.head(), Point::new(10, 10));
        assert_eq!(sim.heading(), Direction::Right);
        assert_eq!(sim.pellet_number(), 1);
    }

    #[test]
    fn running_into_the_body_crashes() {
        let mut sim = running(ID);
        // A three-segment snake can never reach itself; coil a longer one.
        sim.body = [
            Point::new(5, 5),
            Point::new(5, 6),
            Point::new(6, 6),
            Point::new(6, 5),
            Point::new(6, 4),
        ]
        .into_iter()
        .collect();
        sim.heading = Direction::Top;
        sim.queue_turn(Direction::Right);
        assert_eq!(sim.tick(), SnakeEvent::Crashed);
    }

    #[test]
    fn tiny_grids_are_clamped() {
        let sim = SnakeSim::new(ID, 1);
        assert_eq!(sim.grid_size(), MIN_GRID_SIZE);
        assert!(sim.body().iter().all(|p| p.x >= 0 && p.y >= 0));
    }

    #[test]
    fn huge_grids_are_clamped() {
        let mut sim = SnakeSim::new(ID, u32::MAX);
        assert_eq!(sim.grid_size(), MAX_GRID_SIZE);
        assert_eq!(sim.head(), Point::new(512, 512));
        sim.press_start();
        assert_eq!(sim.tick(), SnakeEvent::Moved);
        assert_eq!(sim.head(), Point::new(513, 512));

        let text = SnakeSim::new("x", 50_000).render();
        assert_eq!(text.lines().count(), MAX_GRID_SIZE as usize);
        assert_eq!(clamp_grid_size(0), MIN_GRID_SIZE);
        assert_eq!(clamp_grid_size(20), 20);
    }

    #[test]
    fn render_shows_board() {
        let sim = SnakeSim::new(ID, DEFAULT_GRID_SIZE);
        let text = sim.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 20);
        assert_eq!(&lines[10][8..11], "oo@");
        assert_eq!(lines[5].as_bytes()[17], b'*');
    }

    #[test]
    fn game_paces_ticks_by_elapsed_time() {
        let mut game = SnakeGame::new(ID, DEFAULT_GRID_SIZE, DEFAULT_TICK_MS);
        // Nothing happens before start.
        assert_eq!(game.advance(Duration::from_secs(1)), SnakeEvent::None);

        game.handle_key(Key::Start);
        assert_eq!(game.advance(Duration::from_millis(100)), SnakeEvent::None);
        assert_eq!(game.sim.head(), Point::new(10, 10));
        // 100 + 200 = 300ms pending: two ticks.
        assert_eq!(game.advance(Duration::from_millis(200)), SnakeEvent::Moved);
        assert_eq!(game.sim.head(), Point::new(12, 10));
    }

    #[test]
    fn tick_period_is_clamped() {
        let game = SnakeGame::new(ID, DEFAULT_GRID_SIZE, 0);
        assert_eq!(game.tick_period(), Duration::from_millis(10));
        let game = SnakeGame::new(ID, DEFAULT_GRID_SIZE, u64::MAX);
        assert_eq!(game.tick_period(), Duration::from_secs(60));
        let game = SnakeGame::new(ID, DEFAULT_GRID_SIZE, DEFAULT_TICK_MS);
        assert_eq!(game.tick_period(), Duration::from_millis(150));
    }

    #[test]
    fn game_caps_catch_up_and_records_crash() {
        let mut game = SnakeGame::new(ID, DEFAULT_GRID_SIZE, DEFAULT_TICK_MS);
        game.handle_key(Key::Start);
        // A long stall replays at most MAX_CATCH_UP_TICKS ticks.
        game.advance(Duration::from_secs(60));
        assert_eq!(game.sim.head(), Point::new(18, 10));

        assert_eq!(game.advance(Duration::from_secs(60)), SnakeEvent::Crashed);
        assert_eq!(game.stats.rounds, 1);
        assert_eq!(game.stats.best_score, Some(3));
    }
}
