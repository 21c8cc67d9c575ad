use std::fmt;
use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A `Position` represents the row and column of a cell in a `Grid`.
/// Positions may lie outside of any grid, which makes them usable as offsets.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(i32, i32);

impl Position {
    pub const UP: Position = Position(-1, 0);
    pub const RIGHT: Position = Position(0, 1);
    pub const DOWN: Position = Position(1, 0);
    pub const LEFT: Position = Position(0, -1);

    /// The four orthogonal neighbour offsets, clockwise from up
    pub const DIRECTIONS4: [Position; 4] = [Self::UP, Self::RIGHT, Self::DOWN, Self::LEFT];

    /// All eight neighbour offsets, clockwise from up
    pub const DIRECTIONS8: [Position; 8] = [
        Self::UP,
        Position(-1, 1),
        Self::RIGHT,
        Position(1, 1),
        Self::DOWN,
        Position(1, -1),
        Self::LEFT,
        Position(-1, -1),
    ];

    pub const DIAGONALS4: [Position; 4] = [
        Position(-1, -1),
        Position(-1, 1),
        Position(1, 1),
        Position(1, -1),
    ];

    /// For each of `DIRECTIONS4`, the offset of the wall crossed when moving that way.
    /// Horizontal walls are keyed by the cell below them and vertical walls by the cell
    /// to their right.
    pub const WALLS_OFFSET4: [Position; 4] = [
        Position(0, 0),
        Position(0, 1),
        Position(1, 0),
        Position(0, 0),
    ];

    /// Offsets of the cells of a 2x2 block anchored at its top-left cell
    pub const SQUARE_2X2: [Position; 4] = [
        Position(0, 0),
        Position(0, 1),
        Position(1, 0),
        Position(1, 1),
    ];

    pub const fn new(row: i32, col: i32) -> Self {
        Self(row, col)
    }

    pub fn row(self) -> i32 {
        self.0
    }

    pub fn col(self) -> i32 {
        self.1
    }

    /// Positions of the four orthogonal neighbours
    pub fn neighbors4(self) -> impl Iterator<Item = Position> {
        Self::DIRECTIONS4.iter().map(move |&offset| self + offset)
    }
}

pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as u32
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        *self = *self + rhs;
    }
}

impl SubAssign for Position {
    fn sub_assign(&mut self, rhs: Position) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Position {
    type Output = Position;

    fn mul(self, rhs: i32) -> Position {
        Position(self.0 * rhs, self.1 * rhs)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Position {
        Position(-self.0, -self.1)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self(row, col)
    }
}

impl Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}
