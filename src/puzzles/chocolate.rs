//! Chocolate
//!
//! Find some chocolate bars. A bar is a rectangle of chocolate cells and may cross area
//! borders. Bars must not be orthogonally adjacent. A number in an area gives the number of
//! chocolate cells in the area; an area without a number can hold any amount of chocolate.
//!
//! A level with side length `n` is written with `2n + 1` rows. Even rows hold the
//! horizontal walls: `-` at column `2c + 1` of row `2r` is a wall above cell `(r, c)`. Odd
//! rows hold the vertical walls and the cells: `|` at column `2c` of row `2r + 1` is a wall
//! left of cell `(r, c)` and column `2c + 1` holds the area number, if any.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::collections::grid::flood;
use crate::collections::{Grid, Position};
use crate::error::InvalidLevel;
use crate::level::Level;
use crate::propagate::{self, MatchState, Matches};
use crate::report::DescribeMove;
use crate::search::PuzzleState;

type AreaId = usize;
type BarId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Not decided yet
    Space,
    /// Next to a bar, so it cannot be chocolate
    Empty,
    Chocolate,
}

impl Cell {
    fn as_char(self) -> char {
        match self {
            Cell::Space => ' ',
            Cell::Empty => '.',
            Cell::Chocolate => 'C',
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug)]
struct Area {
    /// the required number of chocolate cells
    num: Option<u32>,
    cells: Vec<Position>,
    bars: Vec<BarId>,
}

/// A rectangle that may become a chocolate bar
#[derive(Debug)]
struct Bar {
    top_left: Position,
    bottom_right: Position,
    /// the number of cells the bar covers in each area
    area_counts: BTreeMap<AreaId, u32>,
}

impl Bar {
    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.top_left.row()..=self.bottom_right.row()).flat_map(move |r| {
            (self.top_left.col()..=self.bottom_right.col()).map(move |c| Position::new(r, c))
        })
    }

    /// The cells orthogonally adjacent to the bar, which may lie outside of the board
    fn border(&self) -> impl Iterator<Item = Position> + '_ {
        let (top, left) = (self.top_left.row(), self.top_left.col());
        let (bottom, right) = (self.bottom_right.row(), self.bottom_right.col());
        let sides = (top..=bottom)
            .flat_map(move |r| vec![Position::new(r, left - 1), Position::new(r, right + 1)]);
        let ends = (left..=right)
            .flat_map(move |c| vec![Position::new(top - 1, c), Position::new(bottom + 1, c)]);
        sides.chain(ends)
    }
}

/// A Chocolate level
pub struct Game {
    sidelen: usize,
    numbers: BTreeMap<Position, u32>,
    horz_walls: BTreeSet<Position>,
    vert_walls: BTreeSet<Position>,
    areas: Vec<Area>,
    area_ids: Grid<AreaId>,
    bars: Vec<Bar>,
}

impl Game {
    pub fn new(level: &Level) -> Result<Self, InvalidLevel> {
        let rows = level.rows();
        if rows.len() < 3 || rows.len() % 2 == 0 {
            return Err(InvalidLevel::new(
                level.id(),
                format!("expected an odd number of rows, found {}", rows.len()),
            ));
        }
        let sidelen = rows.len() / 2;
        let mut numbers = BTreeMap::new();
        let mut horz_walls = BTreeSet::new();
        let mut vert_walls = BTreeSet::new();
        for r in 0..=sidelen {
            // trailing spaces may have been trimmed
            let horz: Vec<char> = rows[r * 2].chars().collect();
            for c in 0..sidelen {
                if horz.get(c * 2 + 1) == Some(&'-') {
                    horz_walls.insert(Position::new(r as i32, c as i32));
                }
            }
            if r == sidelen {
                break;
            }
            let line: Vec<char> = rows[r * 2 + 1].chars().collect();
            for c in 0..=sidelen {
                let p = Position::new(r as i32, c as i32);
                if line.get(c * 2) == Some(&'|') {
                    vert_walls.insert(p);
                }
                if c == sidelen {
                    break;
                }
                match line.get(c * 2 + 1) {
                    None | Some(' ') => {}
                    Some(&ch) => {
                        let n = ch.to_digit(10).ok_or_else(|| {
                            InvalidLevel::new(level.id(), format!("invalid number {:?} at {}", ch, p))
                        })?;
                        numbers.insert(p, n);
                    }
                }
            }
        }
        let mut game = Self {
            sidelen,
            numbers,
            horz_walls,
            vert_walls,
            areas: Vec::new(),
            area_ids: Grid::with_value(sidelen, sidelen, 0),
            bars: Vec::new(),
        };
        game.find_areas(level)?;
        game.find_bars();
        debug!(
            "chocolate level {}: {} areas, {} bars",
            level.id(),
            game.areas.len(),
            game.bars.len()
        );
        Ok(game)
    }

    /// The neighbours of a cell that are not separated from it by a wall
    fn open_neighbors(&self, p: Position) -> Vec<Position> {
        (0..4)
            .filter_map(|i| {
                let walls = if i % 2 == 0 {
                    &self.horz_walls
                } else {
                    &self.vert_walls
                };
                if walls.contains(&(p + Position::WALLS_OFFSET4[i])) {
                    None
                } else {
                    Some(p + Position::DIRECTIONS4[i])
                }
            })
            .collect()
    }

    fn find_areas(&mut self, level: &Level) -> Result<(), InvalidLevel> {
        let cells: BTreeSet<Position> = self.area_ids.positions().collect();
        let regions = flood::regions(&cells, |p| self.open_neighbors(p));
        let mut areas = Vec::with_capacity(regions.len());
        for (id, mut cells) in regions.into_iter().enumerate() {
            cells.sort();
            let mut num = None;
            for p in &cells {
                if let Some(&n) = self.numbers.get(p) {
                    if num.is_some() {
                        return Err(InvalidLevel::new(
                            level.id(),
                            format!("more than one number in the area at {}", cells[0]),
                        ));
                    }
                    num = Some(n);
                }
            }
            for &p in &cells {
                self.area_ids[p] = id;
            }
            areas.push(Area {
                num,
                cells,
                bars: Vec::new(),
            });
        }
        self.areas = areas;
        Ok(())
    }

    /// Collects every rectangle that does not put too much chocolate in any area
    fn find_bars(&mut self) {
        let n = self.sidelen as i32;
        for r1 in 0..n {
            for c1 in 0..n {
                for r2 in r1..n {
                    for c2 in c1..n {
                        let mut bar = Bar {
                            top_left: Position::new(r1, c1),
                            bottom_right: Position::new(r2, c2),
                            area_counts: BTreeMap::new(),
                        };
                        let mut area_counts = BTreeMap::new();
                        for p in bar.cells() {
                            *area_counts.entry(self.area_ids[p]).or_insert(0) += 1;
                        }
                        let fits = area_counts.iter().all(|(&area, &count)| {
                            self.areas[area].num.map_or(true, |num| count <= num)
                        });
                        if fits {
                            let id = self.bars.len();
                            for &area in area_counts.keys() {
                                self.areas[area].bars.push(id);
                            }
                            bar.area_counts = area_counts;
                            self.bars.push(bar);
                        }
                    }
                }
            }
        }
    }

    pub fn sidelen(&self) -> usize {
        self.sidelen
    }

    /// The number of areas
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Returns true if the chocolate cells are a valid solution
    pub fn verify(&self, cells: &Grid<Cell>) -> bool {
        let chocolate: BTreeSet<Position> = cells
            .iter_positions()
            .filter(|&(_, &cell)| cell == Cell::Chocolate)
            .map(|(p, _)| p)
            .collect();
        let numbers_match = self.areas.iter().all(|area| {
            area.num.map_or(true, |num| {
                area.cells.iter().filter(|&p| chocolate.contains(p)).count() as u32 == num
            })
        });
        // each connected group of chocolate cells must fill its bounding rectangle
        let bars = flood::regions(&chocolate, |p| p.neighbors4().collect::<Vec<_>>());
        let rectangles = bars.iter().all(|bar| {
            let rows = bar.iter().map(|p| p.row());
            let cols = bar.iter().map(|p| p.col());
            let height = rows.clone().max().unwrap_or(0) - rows.min().unwrap_or(0) + 1;
            let width = cols.clone().max().unwrap_or(0) - cols.min().unwrap_or(0) + 1;
            (height * width) as usize == bar.len()
        });
        numbers_match && rectangles
    }
}

/// A board with some bars placed.
///
/// Each numbered area that still needs chocolate is a slot and its candidates are the bars
/// that can still be placed over it.
#[derive(Clone)]
pub struct State<'a> {
    game: &'a Game,
    cells: Grid<Cell>,
    matches: Matches<AreaId, BarId>,
    /// chocolate still needed by each numbered area
    remaining: Vec<Option<u32>>,
}

impl<'a> State<'a> {
    pub fn new(game: &'a Game) -> Self {
        let mut matches = Matches::new();
        for (id, area) in game.areas.iter().enumerate() {
            if area.num.map_or(false, |num| num != 0) {
                matches.insert(id, area.bars.clone());
            }
        }
        let mut state = Self {
            game,
            cells: Grid::with_value(game.sidelen, game.sidelen, Cell::Space),
            matches,
            remaining: game.areas.iter().map(|area| area.num).collect(),
        };
        if !propagate::prune(&mut state) {
            trace!("an area has no bar that fits at the start");
        }
        state
    }

    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    fn is_chocolate(&self, p: Position) -> bool {
        self.cells.get(p) == Some(&Cell::Chocolate)
    }
}

impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells && self.matches == other.matches
    }
}

impl Eq for State<'_> {}

impl Hash for State<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
        self.matches.hash(state);
    }
}

impl MatchState for State<'_> {
    type Slot = AreaId;
    type Candidate = BarId;

    fn matches(&self) -> &Matches<AreaId, BarId> {
        &self.matches
    }

    fn matches_mut(&mut self) -> &mut Matches<AreaId, BarId> {
        &mut self.matches
    }

    fn is_consistent(&self, _: &AreaId, &bar: &BarId) -> bool {
        let bar = &self.game.bars[bar];
        bar.cells().all(|p| self.cells[p] == Cell::Space)
            && !bar.border().any(|p| self.is_chocolate(p))
            && bar.area_counts.iter().all(|(&area, &count)| {
                self.remaining[area].map_or(true, |remaining| count <= remaining)
            })
    }

    fn commit(&mut self, _: &AreaId, &bar: &BarId) {
        let bar = &self.game.bars[bar];
        for p in bar.cells() {
            self.cells[p] = Cell::Chocolate;
        }
        for p in bar.border() {
            if self.cells.contains(p) {
                self.cells[p] = Cell::Empty;
            }
        }
        for (&area, &count) in &bar.area_counts {
            if let Some(remaining) = &mut self.remaining[area] {
                *remaining -= count;
                if *remaining == 0 {
                    self.matches.remove(&area);
                }
            }
        }
    }
}

impl PuzzleState for State<'_> {
    fn is_goal_state(&self) -> bool {
        self.heuristic() == 0
    }

    fn gen_children(&self, children: &mut Vec<Self>) {
        propagate::gen_children(self, children)
    }

    fn heuristic(&self) -> u32 {
        self.matches.len() as u32
    }

    fn distance_to(&self, child: &Self) -> u32 {
        propagate::resolved_between(self, child)
    }
}

/// The corners of each bar placed by the move, forced ones included
impl DescribeMove for State<'_> {
    fn describe_move(&self, child: &Self) -> String {
        let placed: BTreeSet<Position> = child
            .cells
            .iter_positions()
            .filter(|&(p, &cell)| cell == Cell::Chocolate && !self.is_chocolate(p))
            .map(|(p, _)| p)
            .collect();
        // bars never touch, so each region is one bar
        let bars = flood::regions(&placed, Position::neighbors4)
            .into_iter()
            .filter_map(|bar| Some((*bar.iter().min()?, *bar.iter().max()?)))
            .map(|(top_left, bottom_right)| format!("{}-{}", top_left, bottom_right))
            .join(" ");
        format!("bar {}", bars)
    }
}

/// The walls and numbers of the level, with each cell followed by its contents
impl Display for State<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let n = self.game.sidelen as i32;
        for r in 0..=n {
            for c in 0..n {
                let wall = self.game.horz_walls.contains(&Position::new(r, c));
                write!(f, "{}", if wall { " --" } else { "   " })?;
            }
            writeln!(f)?;
            if r == n {
                break;
            }
            for c in 0..=n {
                let p = Position::new(r, c);
                let wall = self.game.vert_walls.contains(&p);
                write!(f, "{}", if wall { '|' } else { ' ' })?;
                if c == n {
                    break;
                }
                match self.game.numbers.get(&p) {
                    Some(num) => write!(f, "{}", num)?,
                    None => write!(f, " ")?,
                }
                write!(f, "{}", self.cells[p])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{Cell, Game, State};
    use crate::collections::Position;
    use crate::level::Level;
    use crate::propagate;
    use crate::report::DescribeMove;
    use crate::search::{AStar, PuzzleState, SearchResult, Solver};

    fn game(rows: &[&str]) -> Game {
        let level = Level::new("test", rows.iter().map(|s| s.to_string()).collect());
        Game::new(&level).unwrap()
    }

    /// The top two rows are split into an area of five cells and an area of one cell, and
    /// the bottom row is an area without chocolate. The only solution is a single bar
    /// crossing the border between the top areas.
    const CROSSING: &[&str] = &[
        " - - -",
        "|5    |",
        "     -",
        "|   |1|",
        " - - -",
        "|0    |",
        " - - -",
    ];

    #[test]
    fn areas_follow_walls() {
        let game = game(CROSSING);
        assert_eq!(3, game.sidelen());
        assert_eq!(3, game.area_count());
        let id = |r, c| game.area_ids[Position::new(r, c)];
        assert_eq!(id(0, 0), id(1, 1));
        assert_ne!(id(1, 1), id(1, 2));
        assert_ne!(id(0, 2), id(1, 2));
        assert_eq!(id(2, 0), id(2, 2));
    }

    #[test]
    fn bars_avoid_empty_areas() {
        let game = game(CROSSING);
        assert!(game.bars.iter().all(|bar| bar.bottom_right.row() < 2));
        let whole = game
            .bars
            .iter()
            .find(|bar| bar.top_left == Position::new(0, 0) && bar.bottom_right == Position::new(1, 2))
            .unwrap();
        assert_eq!(vec![5, 1], whole.area_counts.values().copied().collect::<Vec<_>>());
    }

    #[test]
    fn invalid_row_count() {
        let level = Level::new("short", vec![" -".to_string(), "|1|".to_string()]);
        assert!(Game::new(&level).is_err());
    }

    #[test]
    fn invalid_number() {
        let level = Level::new("bad", vec![" -".to_string(), "|x|".to_string(), " -".to_string()]);
        let error = Game::new(&level).err().unwrap();
        assert_eq!("bad", error.id());
    }

    #[test]
    fn solve() {
        let game = game(CROSSING);
        let outcome = AStar::new().solve(State::new(&game));
        let solution = outcome.result.solved().unwrap();
        let goal = solution.goal();
        assert!(goal.is_goal_state());
        assert!(game.verify(goal.cells()));
        assert_eq!(1, solution.moves());
        assert_eq!(2, solution.cost);
        let chocolate: BTreeSet<Position> = goal
            .cells()
            .iter_positions()
            .filter(|&(_, &cell)| cell == Cell::Chocolate)
            .map(|(p, _)| p)
            .collect();
        let expected: BTreeSet<Position> =
            (0..2).flat_map(|r| (0..3).map(move |c| Position::new(r, c))).collect();
        assert_eq!(expected, chocolate);
    }

    #[test]
    fn single_cell_bar() {
        let game = game(&[" -", "|1|", " -"]);
        let outcome = AStar::new().solve(State::new(&game));
        let solution = outcome.result.solved().unwrap();
        assert_eq!(1, solution.moves());
        assert_eq!(Cell::Chocolate, solution.goal().cells()[Position::new(0, 0)]);
    }

    #[test]
    fn describe_move() {
        let game = game(CROSSING);
        let outcome = AStar::new().solve(State::new(&game));
        let path = outcome.result.into_solved().unwrap().path;
        assert_eq!("bar (0, 0)-(1, 2)", path[0].describe_move(&path[1]));
    }

    #[test]
    fn unsolvable() {
        // a single cell cannot hold two chocolate cells
        let game = game(&[" -", "|2|", " -"]);
        let outcome = AStar::new().solve(State::new(&game));
        assert!(matches!(outcome.result, SearchResult::NoSolution));
    }

    #[test]
    fn commit_surrounds_bar() {
        let game = game(CROSSING);
        let mut state = State::new(&game);
        let corner = Position::new(0, 0);
        let bar = game
            .bars
            .iter()
            .position(|bar| bar.top_left == corner && bar.bottom_right == corner)
            .unwrap();
        let area = game.area_ids[corner];
        assert!(propagate::make_move(&mut state, &area, &bar));
        assert_eq!(Cell::Chocolate, state.cells()[corner]);
        assert_eq!(Cell::Empty, state.cells()[Position::new(0, 1)]);
        assert_eq!(Cell::Empty, state.cells()[Position::new(1, 0)]);
        assert_eq!(Cell::Space, state.cells()[Position::new(1, 1)]);
        // the area still needs four more cells
        assert!(state.matches.contains_slot(&area));
    }

    #[test]
    fn verify_rejects_wrong_counts() {
        let game = game(CROSSING);
        let state = State::new(&game);
        assert!(!game.verify(state.cells()));
    }

    #[test]
    fn display() {
        let game = game(&[" -", "|1|", " -"]);
        let state = State::new(&game);
        assert_eq!(" --\n|1 |\n --\n", state.to_string());
    }
}
