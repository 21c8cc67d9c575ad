//! Sliding tiles
//!
//! Slide tiles into the blank until the tiles are in order, with the blank in the bottom
//! right corner. Each row of a level lists its tiles separated by whitespace, `0` being the
//! blank.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::collections::grid::manhattan_distance;
use crate::collections::{Grid, Position};
use crate::error::InvalidLevel;
use crate::level::Level;
use crate::report::DescribeMove;
use crate::search::PuzzleState;

type Tile = u8;

const BLANK: Tile = 0;

const DIRECTION_NAMES: [&str; 4] = ["up", "right", "down", "left"];

/// A sliding tile level
pub struct Game {
    start: Grid<Tile>,
}

impl Game {
    pub fn new(level: &Level) -> Result<Self, InvalidLevel> {
        let invalid = |msg: String| InvalidLevel::new(level.id(), msg);
        let rows = level
            .rows()
            .iter()
            .map(|row| {
                row.split_whitespace()
                    .map(|s| s.parse::<Tile>().map_err(|_| invalid(format!("invalid tile {:?}", s))))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let start = Grid::from_rows(rows).map_err(|e| invalid(format!("{:?}", e)))?;
        let mut tiles: Vec<Tile> = start.iter_positions().map(|(_, &t)| t).collect();
        if tiles.is_empty() {
            return Err(invalid("the level has no tiles".to_string()));
        }
        tiles.sort_unstable();
        if tiles.iter().enumerate().any(|(i, &t)| usize::from(t) != i) {
            return Err(invalid(format!(
                "the tiles must be the numbers 0 to {}",
                tiles.len().saturating_sub(1)
            )));
        }
        let game = Self { start };
        if !game.is_solvable() {
            return Err(invalid("the tiles cannot be put in order".to_string()));
        }
        Ok(game)
    }

    /// The position a tile has in the solved puzzle
    fn home(&self, tile: Tile) -> Position {
        let cols = self.start.cols();
        let i = if tile == BLANK {
            self.start.rows() * cols - 1
        } else {
            usize::from(tile) - 1
        };
        Position::new((i / cols) as i32, (i % cols) as i32)
    }

    /// Checks the permutation parity of the start position. Every move of the blank flips the
    /// parity of the tile order when the width is even, and keeps it when the width is odd.
    fn is_solvable(&self) -> bool {
        let tiles: Vec<Tile> = self
            .start
            .iter_positions()
            .map(|(_, &t)| t)
            .filter(|&t| t != BLANK)
            .collect();
        let inversions = tiles
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| a > b)
            .count();
        if self.start.cols() % 2 == 1 {
            inversions % 2 == 0
        } else {
            let blank_row = self
                .start
                .iter_positions()
                .find(|&(_, &t)| t == BLANK)
                .map_or(0, |(p, _)| p.row() as usize);
            let rows_from_bottom = self.start.rows() - blank_row;
            (inversions + rows_from_bottom) % 2 == 1
        }
    }
}

#[derive(Clone)]
pub struct State<'a> {
    game: &'a Game,
    tiles: Grid<Tile>,
    blank: Position,
}

impl<'a> State<'a> {
    pub fn new(game: &'a Game) -> Self {
        let blank = game
            .start
            .iter_positions()
            .find(|&(_, &t)| t == BLANK)
            .map_or_else(Position::default, |(p, _)| p);
        Self {
            game,
            tiles: game.start.clone(),
            blank,
        }
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }
}

impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for State<'_> {}

impl Hash for State<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tiles.hash(state);
    }
}

impl PuzzleState for State<'_> {
    fn is_goal_state(&self) -> bool {
        self.heuristic() == 0
    }

    fn gen_children(&self, children: &mut Vec<Self>) {
        for &offset in &Position::DIRECTIONS4 {
            let next = self.blank + offset;
            if !self.tiles.contains(next) {
                continue;
            }
            let mut child = self.clone();
            child.tiles[self.blank] = self.tiles[next];
            child.tiles[next] = BLANK;
            child.blank = next;
            children.push(child);
        }
    }

    /// The sum of the distances of the tiles from their places
    fn heuristic(&self) -> u32 {
        self.tiles
            .iter_positions()
            .filter(|&(_, &t)| t != BLANK)
            .map(|(p, &t)| manhattan_distance(p, self.game.home(t)))
            .sum()
    }
}

impl DescribeMove for State<'_> {
    /// The tile that slid into the blank and its direction, such as `5 up`
    fn describe_move(&self, child: &Self) -> String {
        let tile = self.tiles[child.blank];
        let direction = Position::DIRECTIONS4
            .iter()
            .position(|&d| child.blank + d == self.blank)
            .map_or("?", |i| DIRECTION_NAMES[i]);
        format!("{} {}", tile, direction)
    }
}

impl Display for State<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.rows() * self.tiles.cols() - 1).to_string().len();
        for row in self.tiles.row_slices() {
            let line = row
                .iter()
                .map(|&t| {
                    if t == BLANK {
                        format!("{:>w$}", "", w = width)
                    } else {
                        format!("{:>w$}", t, w = width)
                    }
                })
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, State};
    use crate::level::Level;
    use crate::report::DescribeMove;
    use crate::search::{AStar, BreadthFirst, PuzzleState, Solver};

    fn level(rows: &[&str]) -> Level {
        Level::new("test", rows.iter().map(|s| s.to_string()).collect())
    }

    fn solve_moves(rows: &[&str]) -> usize {
        let game = Game::new(&level(rows)).unwrap();
        let outcome = AStar::new().solve(State::new(&game));
        let solution = outcome.result.into_solved().unwrap();
        assert!(solution.goal().is_goal_state());
        solution.moves()
    }

    #[test]
    fn optimal_moves() {
        assert_eq!(0, solve_moves(&["1 2", "3 0"]));
        assert_eq!(2, solve_moves(&["1 2 3", "4 5 6", "0 7 8"]));
        assert_eq!(6, solve_moves(&["4 1 3", "7 2 6", "0 5 8"]));
        assert_eq!(12, solve_moves(&["0 3 5", "2 1 8", "4 7 6"]));
        assert_eq!(9, solve_moves(&["5 1 2 4", "9 6 3 8", "13 10 7 11", "0 14 15 12"]));
    }

    #[test]
    fn breadth_first_agrees() {
        let game = Game::new(&level(&["0 3 5", "2 1 8", "4 7 6"])).unwrap();
        let astar = AStar::new().solve(State::new(&game));
        let bfs = BreadthFirst::new().solve(State::new(&game));
        assert_eq!(
            astar.result.solved().unwrap().cost,
            bfs.result.solved().unwrap().cost
        );
    }

    #[test]
    fn heuristic() {
        let game = Game::new(&level(&["1 2 3", "4 5 6", "0 7 8"])).unwrap();
        assert_eq!(2, State::new(&game).heuristic());
    }

    #[test]
    fn children_move_the_blank() {
        let game = Game::new(&level(&["1 2 3", "4 0 6", "7 5 8"])).unwrap();
        let mut children = Vec::new();
        State::new(&game).gen_children(&mut children);
        assert_eq!(4, children.len());
        // moving the blank down is the first step of the solution
        assert_eq!(1, children[2].heuristic());
    }

    #[test]
    fn unsolvable() {
        assert!(Game::new(&level(&["1 2 3", "4 5 6", "8 7 0"])).is_err());
        assert!(Game::new(&level(&["2 1", "3 0"])).is_err());
    }

    #[test]
    fn invalid_tiles() {
        assert!(Game::new(&level(&["1 2", "2 0"])).is_err());
        assert!(Game::new(&level(&["1 x", "3 0"])).is_err());
        assert!(Game::new(&level(&["1 2 3", "0"])).is_err());
    }

    #[test]
    fn empty_board() {
        assert!(Game::new(&level(&["   "])).is_err());
        assert!(Game::new(&level(&[])).is_err());
    }

    #[test]
    fn describe_moves() {
        let game = Game::new(&level(&["1 2 3", "4 5 6", "0 7 8"])).unwrap();
        let outcome = AStar::new().solve(State::new(&game));
        let path = outcome.result.into_solved().unwrap().path;
        let moves: Vec<String> = path.windows(2).map(|w| w[0].describe_move(&w[1])).collect();
        assert_eq!(vec!["7 left", "8 left"], moves);
    }

    #[test]
    fn display() {
        let game = Game::new(&level(&["1 2", "0 3"])).unwrap();
        assert_eq!("1 2\n  3\n", State::new(&game).to_string());
    }
}
