//! Puzzles solved with the search engine

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;

pub mod chocolate;
pub mod pointing;
pub mod sliding;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleKind {
    Pointing,
    Chocolate,
    Sliding,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 3] = [
        PuzzleKind::Pointing,
        PuzzleKind::Chocolate,
        PuzzleKind::Sliding,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PuzzleKind::Pointing => "pointing",
            PuzzleKind::Chocolate => "chocolate",
            PuzzleKind::Sliding => "sliding",
        }
    }
}

impl Display for PuzzleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PuzzleKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| anyhow!("unknown puzzle: {}", s))
    }
}
