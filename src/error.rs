//! Error types for the simulation engine.

use std::fmt;

use thiserror::Error;

/// Edits that are rejected while the simulation is auto-advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle,
    Randomize,
    Reset,
    Load,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::Toggle => "toggle",
            Action::Randomize => "randomize",
            Action::Reset => "reset",
            Action::Load => "load",
        };
        f.write_str(verb)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A board needs at least one row and one column.
    #[error("invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Coordinate outside the grid.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        row: isize,
        col: isize,
        rows: usize,
        cols: usize,
    },

    /// A valid edit attempted while the simulation is running.
    #[error("cannot {0} cells while the simulation is running, stop it first")]
    ForbiddenWhileRunning(Action),
}

impl Error {
    /// Whether the caller can recover by stopping the simulation and retrying.
    pub fn is_forbidden_while_running(&self) -> bool {
        matches!(self, Error::ForbiddenWhileRunning(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
