pub mod flood;
mod position;

pub use self::position::{manhattan_distance, Position};

use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

/// A container of elements laid out in a rectangular grid and addressed by `Position`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    elements: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a new `Grid` of the specified dimensions filled with a value
    pub fn with_value(rows: usize, cols: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            cols,
            elements: vec![value; rows * cols],
        }
    }

    /// Creates a grid from rows of elements. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, RaggedRows> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().position(|r| r.len() != cols) {
            return Err(RaggedRows(row));
        }
        let row_count = rows.len();
        Ok(Self {
            rows: row_count,
            cols,
            elements: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the position lies within the grid
    pub fn contains(&self, p: Position) -> bool {
        p.row() >= 0 && p.col() >= 0 && (p.row() as usize) < self.rows && (p.col() as usize) < self.cols
    }

    pub fn get(&self, p: Position) -> Option<&T> {
        if self.contains(p) {
            Some(&self.elements[self.offset(p)])
        } else {
            None
        }
    }

    /// Every position of the grid in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| Position::new((i / cols) as i32, (i % cols) as i32))
    }

    /// Returns an iterator over every element, paired with its `Position`
    pub fn iter_positions(&self) -> impl Iterator<Item = (Position, &T)> {
        self.positions().zip(self.elements.iter())
    }

    /// Returns an iterator over the rows of the grid
    pub fn row_slices(&self) -> impl Iterator<Item = &[T]> {
        // chunks panics on a zero size
        self.elements.chunks(self.cols.max(1))
    }

    fn offset(&self, p: Position) -> usize {
        assert!(self.contains(p), "{} is outside of the grid", p);
        p.row() as usize * self.cols + p.col() as usize
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, p: Position) -> &Self::Output {
        &self.elements[self.offset(p)]
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, p: Position) -> &mut Self::Output {
        let offset = self.offset(p);
        &mut self.elements[offset]
    }
}

impl<T: Display> Display for Grid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.row_slices() {
            for element in row {
                write!(f, "{}", element)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(PartialEq)]
pub struct RaggedRows(usize);

impl Debug for RaggedRows {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Row {} has a different length than the first row", self.0)
    }
}

impl RaggedRows {
    /// The index of the first row whose length differs from the first row
    pub fn row(&self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, Position, RaggedRows};

    #[test]
    fn from_rows() {
        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(2, grid.rows());
        assert_eq!(3, grid.cols());
        assert_eq!(6, grid[Position::new(1, 2)]);
    }

    #[test]
    fn from_ragged_rows() {
        assert_eq!(Err(RaggedRows(1)), Grid::from_rows(vec![vec![1, 2], vec![3]]));
    }

    #[test]
    fn contains() {
        let grid = Grid::with_value(2, 3, 0);
        assert!(grid.contains(Position::new(1, 2)));
        assert!(!grid.contains(Position::new(2, 0)));
        assert!(!grid.contains(Position::new(0, -1)));
        assert_eq!(None, grid.get(Position::new(-1, 0)));
    }

    #[test]
    fn positions_are_row_major() {
        let grid = Grid::with_value(2, 2, ' ');
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ],
            positions
        );
    }

    #[test]
    fn display() {
        let mut grid = Grid::with_value(2, 2, '.');
        grid[Position::new(0, 1)] = 'x';
        assert_eq!(".x\n..\n", grid.to_string());
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds() {
        let grid = Grid::with_value(2, 2, 0);
        let _ = grid[Position::new(0, 2)];
    }
}
