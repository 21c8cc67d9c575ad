use std::io;

use thiserror::Error;

/// A level file that could not be read or split into levels
#[derive(Error, Debug)]
pub enum LevelError {
    #[error("error reading level file")]
    Io(#[from] io::Error),
    #[error("level header without an id at line {line}")]
    MissingId { line: usize },
    #[error("level {id} has no rows")]
    EmptyLevel { id: String },
    #[error("unexpected text outside of a level at line {line}")]
    OutsideLevel { line: usize },
}

/// A level whose contents do not describe a valid puzzle
#[derive(Error, Debug)]
#[error("invalid level {id}: {msg}")]
pub struct InvalidLevel {
    id: String,
    msg: String,
}

impl InvalidLevel {
    pub(crate) fn new(id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            msg: msg.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    InvalidLevel(#[from] InvalidLevel),
}
