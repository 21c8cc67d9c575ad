pub mod grid;

pub use self::grid::{Grid, Position};
