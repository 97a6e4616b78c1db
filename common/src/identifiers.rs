use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnakeId(String);

impl SnakeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Stable id for the snake at `index` in turn order: `player1`, `player2`, ...
    pub fn for_index(index: usize) -> Self {
        Self(format!("player{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SnakeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SnakeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<SnakeId> for String {
    fn from(id: SnakeId) -> Self {
        id.0
    }
}

impl fmt::Display for SnakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for GameId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
