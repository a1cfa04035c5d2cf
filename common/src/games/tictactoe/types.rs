use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    Player(char),
}

impl Mark {
    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }

    pub fn label(&self) -> Option<char> {
        match self {
            Mark::Empty => None,
            Mark::Player(label) => Some(*label),
        }
    }
}

impl From<char> for Mark {
    fn from(label: char) -> Self {
        Mark::Player(label)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => Ok(()),
            Mark::Player(label) => write!(f, "{}", label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A cell assignment. An empty mark describes an unoccupied cell and is what
/// the board is seeded with; a player mark is a committed play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub mark: Mark,
}

impl Move {
    pub fn new(row: usize, col: usize, mark: Mark) -> Self {
        Self { row, col, mark }
    }

    pub fn empty(row: usize, col: usize) -> Self {
        Self::new(row, col, Mark::Empty)
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub label: char,
    /// Presentation only.
    pub color: String,
}

impl Player {
    pub fn new(label: char, color: impl Into<String>) -> Self {
        Self {
            label,
            color: color.into(),
        }
    }

    pub fn mark(&self) -> Mark {
        Mark::Player(self.label)
    }
}

pub type WinningCombo = Vec<Position>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Won { combo: WinningCombo, mark: Mark },
    Tied,
}

impl GameOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}
