//! Plain text level files.
//!
//! A level file holds any number of levels. Each level starts with a `level <id>` header
//! line, followed by the rows of the level. The rows end at an empty line, at the next
//! header or at the end of the file. Rows are kept exactly as written, so spaces are
//! significant. Outside of levels, lines starting with `#` are comments.
//!
//! ```text
//! # two small levels
//! level 1
//! 42
//! 06
//!
//! level 2
//! 3
//! ```

use std::fs;
use std::path::Path;

use crate::error::{InvalidLevel, LevelError, LoadError};

const HEADER: &str = "level";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    id: String,
    rows: Vec<String>,
}

impl Level {
    pub fn new(id: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            id: id.into(),
            rows,
        }
    }

    /// Reads every level from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<Self>, LevelError> {
        let s = fs::read_to_string(path)?;
        parse_levels(&s)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Reads every level from a file and builds a game from each one
pub fn load_games<G>(
    path: impl AsRef<Path>,
    new_game: impl Fn(&Level) -> Result<G, InvalidLevel>,
) -> Result<Vec<(Level, G)>, LoadError> {
    let levels = Level::from_file(path)?;
    let mut games = Vec::with_capacity(levels.len());
    for level in levels {
        let game = new_game(&level)?;
        games.push((level, game));
    }
    Ok(games)
}

/// Splits the contents of a level file into levels
pub fn parse_levels(s: &str) -> Result<Vec<Level>, LevelError> {
    let mut levels = Vec::new();
    let mut current: Option<Level> = None;
    for (i, line) in s.lines().enumerate() {
        let line_number = i + 1;
        if let Some(id) = parse_header(line) {
            let id = id.ok_or(LevelError::MissingId { line: line_number })?;
            if let Some(level) = current.take() {
                levels.push(finish_level(level)?);
            }
            current = Some(Level::new(id, Vec::new()));
        } else if line.is_empty() {
            if let Some(level) = current.take() {
                levels.push(finish_level(level)?);
            }
        } else if let Some(level) = current.as_mut() {
            level.rows.push(line.to_string());
        } else if !line.starts_with('#') && !line.trim().is_empty() {
            return Err(LevelError::OutsideLevel { line: line_number });
        }
    }
    if let Some(level) = current {
        levels.push(finish_level(level)?);
    }
    debug!("parsed {} levels", levels.len());
    Ok(levels)
}

/// Returns `Some` if the line is a header, containing the id if there is one
fn parse_header(line: &str) -> Option<Option<&str>> {
    let mut words = line.split_whitespace();
    if words.next() != Some(HEADER) {
        return None;
    }
    Some(words.next())
}

fn finish_level(level: Level) -> Result<Level, LevelError> {
    if level.rows.is_empty() {
        return Err(LevelError::EmptyLevel { id: level.id });
    }
    Ok(level)
}
