//! Pointing
//!
//! Every cell holds an arrow. Mark some arrows so that each arrow points to exactly one
//! marked arrow.
//!
//! Levels are written with one digit per arrow, `0` pointing up and the following digits
//! turning clockwise in steps of 45 degrees.

use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::collections::{Grid, Position};
use crate::error::InvalidLevel;
use crate::level::Level;
use crate::propagate::{self, MatchState, Matches};
use crate::report::DescribeMove;
use crate::search::PuzzleState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrow {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Arrow {
    const ALL: [Arrow; 8] = [
        Arrow::Up,
        Arrow::UpRight,
        Arrow::Right,
        Arrow::DownRight,
        Arrow::Down,
        Arrow::DownLeft,
        Arrow::Left,
        Arrow::UpLeft,
    ];

    pub fn from_digit(c: char) -> Option<Self> {
        let i = c.to_digit(10)? as usize;
        Self::ALL.get(i).copied()
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn offset(self) -> Position {
        Position::DIRECTIONS8[self.index()]
    }
}

impl Display for Arrow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A Pointing level
pub struct Game {
    arrows: Grid<Arrow>,
    /// the cells each arrow points to
    ranges: Grid<Vec<Position>>,
}

impl Game {
    pub fn new(level: &Level) -> Result<Self, InvalidLevel> {
        let invalid = |msg: String| InvalidLevel::new(level.id(), msg);
        let rows = level
            .rows()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.chars()
                    .map(|c| {
                        Arrow::from_digit(c)
                            .ok_or_else(|| invalid(format!("invalid arrow {:?} in row {}", c, r)))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let arrows = Grid::from_rows(rows).map_err(|e| invalid(format!("{:?}", e)))?;
        let mut ranges = Grid::with_value(arrows.rows(), arrows.cols(), Vec::new());
        for (p, &arrow) in arrows.iter_positions() {
            let offset = arrow.offset();
            let mut next = p + offset;
            while arrows.contains(next) {
                ranges[p].push(next);
                next += offset;
            }
        }
        Ok(Self { arrows, ranges })
    }

    pub fn arrows(&self) -> &Grid<Arrow> {
        &self.arrows
    }

    /// The cells the arrow at `p` points to, nearest first
    pub fn range(&self, p: Position) -> &[Position] {
        &self.ranges[p]
    }

    /// Returns true if every arrow points to exactly one of the marked cells
    pub fn verify(&self, marked: &BTreeSet<Position>) -> bool {
        self.arrows.positions().all(|p| {
            let count = self.range(p).iter().filter(|&q| marked.contains(q)).count();
            count == 1
        })
    }
}

/// A partially marked board.
///
/// Each unresolved arrow is a slot whose candidates are the cells in its range that may
/// still be marked. Marking a cell resolves every arrow pointing to it, and the other cells
/// those arrows point to can no longer be marked.
#[derive(Clone)]
pub struct State<'a> {
    game: &'a Game,
    matches: Matches<Position, Position>,
    marked: BTreeSet<Position>,
    excluded: BTreeSet<Position>,
}

impl<'a> State<'a> {
    pub fn new(game: &'a Game) -> Self {
        let mut matches = Matches::new();
        for p in game.arrows.positions() {
            matches.insert(p, game.range(p).to_vec());
        }
        let mut state = Self {
            game,
            matches,
            marked: BTreeSet::new(),
            excluded: BTreeSet::new(),
        };
        if !propagate::prune(&mut state) {
            trace!("a cell has nothing to point at from the start");
        }
        state
    }

    pub fn marked(&self) -> &BTreeSet<Position> {
        &self.marked
    }
}

impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.matches == other.matches && self.marked == other.marked
    }
}

impl Eq for State<'_> {}

impl Hash for State<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.matches.hash(state);
        self.marked.hash(state);
    }
}

impl MatchState for State<'_> {
    type Slot = Position;
    type Candidate = Position;

    fn matches(&self) -> &Matches<Position, Position> {
        &self.matches
    }

    fn matches_mut(&mut self) -> &mut Matches<Position, Position> {
        &mut self.matches
    }

    fn is_consistent(&self, _: &Position, target: &Position) -> bool {
        !self.excluded.contains(target)
    }

    /// Marks the target, which resolves the committed arrow along with every other arrow
    /// pointing to it
    fn commit(&mut self, _: &Position, &target: &Position) {
        self.marked.insert(target);
        let resolved: Vec<Position> = self
            .matches
            .iter()
            .filter(|(_, range)| range.contains(&target))
            .map(|(&p, _)| p)
            .collect();
        for p in resolved {
            if let Some(range) = self.matches.remove(&p) {
                self.excluded.extend(range.into_iter().filter(|&q| q != target));
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

/// The cells marked by the move, forced ones included
impl DescribeMove for State<'_> {
    fn describe_move(&self, child: &Self) -> String {
        format!("mark {}", child.marked.difference(&self.marked).join(" "))
    }
}

/// Each arrow followed by `*` if it is marked
impl Display for State<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (p, arrow) in self.game.arrows.iter_positions() {
            let mark = if self.marked.contains(&p) { '*' } else { ' ' };
            write!(f, "{}{}", arrow, mark)?;
            if p.col() as usize == self.game.arrows.cols() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
