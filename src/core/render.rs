//! Text renderings of a [`Grid`].

use std::fmt::Write as _;

use crate::maze::{Direction, Grid, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RenderStyle {
    /// One text line per row; only top and right walls are drawn.
    #[default]
    Classic,
    /// Full `+--+` box drawing with every wall.
    Boxed,
}

impl RenderStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(RenderStyle::Classic),
            "boxed" => Some(RenderStyle::Boxed),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderStyle::Classic => "classic",
            RenderStyle::Boxed => "boxed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub style: RenderStyle,
    /// Leave a gap in the bottom wall of the goal cell.
    pub exit_marker: bool,
    pub player: Option<Position>,
    pub show_goal: bool,
}

pub fn render(grid: &Grid, opts: &RenderOptions) -> String {
    match opts.style {
        RenderStyle::Classic => render_classic(grid),
        RenderStyle::Boxed => render_boxed(grid, opts),
    }
}

/// Compact two-characters-per-cell layout.
///
/// The first line is `" _"` per column. Every row starts with `|`, then each
/// cell contributes `_` when its top wall stands (space otherwise) and `|`
/// when its right wall stands (space otherwise). Bottom walls are implied by
/// the next row's top walls and are not drawn for the last row.
pub fn render_classic(grid: &Grid) -> String {
    let n = grid.size();
    let mut out = String::with_capacity((2 * n + 2) * (n + 1));
    out.push_str(&" _".repeat(n));
    out.push('\n');

    for row in grid.rows() {
        out.push('|');
        for cell in row {
            out.push(if cell.has_wall(Direction::Top) { '_' } else { ' ' });
            out.push(if cell.has_wall(Direction::Right) { '|' } else { ' ' });
        }
        out.push('\n');
    }
    out
}

/// Full box drawing, `2N+1` lines of `4N+1` characters.
pub fn render_boxed(grid: &Grid, opts: &RenderOptions) -> String {
    let n = grid.size();
    let goal = grid.goal();
    let mut out = String::with_capacity((4 * n + 2) * (2 * n + 1));

    // Top border of row 0.
    for col in 0..n {
        let wall = grid.has_wall(Position::new(0, col), Direction::Top);
        let _ = write!(out, "+{}", if wall { "---" } else { "   " });
    }
    out.push_str("+\n");

    for row in 0..n {
        // Cell interiors with left/right walls.
        for col in 0..n {
            let pos = Position::new(row, col);
            out.push(if grid.has_wall(pos, Direction::Left) { '|' } else { ' ' });
            let mark = if opts.player == Some(pos) {
                '@'
            } else if opts.show_goal && pos == goal {
                '*'
            } else {
                ' '
            };
            let _ = write!(out, " {mark} ");
        }
        let last = Position::new(row, n - 1);
        out.push(if grid.has_wall(last, Direction::Right) { '|' } else { ' ' });
        out.push('\n');

        // Bottom walls of this row.
        for col in 0..n {
            let pos = Position::new(row, col);
            let exit = opts.exit_marker && pos == goal;
            let wall = grid.has_wall(pos, Direction::Bottom) && !exit;
            let _ = write!(out, "+{}", if wall { "---" } else { "   " });
        }
        out.push_str("+\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::build_maze;

    #[test]
    fn classic_matches_recorded_output() {
        let grid = build_maze("abc", 4).unwrap();
        assert_eq!(
            render_classic(&grid),
            " _ _ _ _\n|_ _ _ _|\n|_ _ _| |\n| |_|   |\n|    _ _|\n"
        );
    }

    #[test]
    fn classic_single_cell() {
        let grid = build_maze("x", 1).unwrap();
        assert_eq!(render_classic(&grid), " _\n|_|\n");
    }

    #[test]
    fn boxed_single_cell_with_markers() {
        let grid = build_maze("x", 1).unwrap();
        let opts = RenderOptions {
            style: RenderStyle::Boxed,
            player: Some(Position::ORIGIN),
            ..Default::default()
        };
        assert_eq!(render(&grid, &opts), "+---+\n| @ |\n+---+\n");

        let opts = RenderOptions {
            style: RenderStyle::Boxed,
            exit_marker: true,
            show_goal: true,
            ..Default::default()
        };
        assert_eq!(render(&grid, &opts), "+---+\n| * |\n+   +\n");
    }

    #[test]
    fn boxed_two_by_two() {
        // masks [13, 3, 13, 6]: passages (0,0)-(0,1), (0,1)-(1,1), (1,1)-(1,0).
        let grid = build_maze("abc", 2).unwrap();
        let expected = "\
+---+---+
|       |
+---+   +
|       |
+---+---+
";
        assert_eq!(render_boxed(&grid, &RenderOptions::default()), expected);
    }

    #[test]
    fn boxed_dimensions() {
        let grid = build_maze("dims", 7).unwrap();
        let text = render_boxed(&grid, &RenderOptions::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 * 7 + 1);
        assert!(lines.iter().all(|l| l.chars().count() == 4 * 7 + 1));
    }

    #[test]
    fn style_names_round_trip() {
        for s in [RenderStyle::Classic, RenderStyle::Boxed] {
            assert_eq!(RenderStyle::from_name(s.name()), Some(s));
        }
        assert_eq!(RenderStyle::from_name("fancy"), None);
    }
}
