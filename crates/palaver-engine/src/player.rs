//! Player identity and the game state offers act on.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a new random player ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A respawn anchor a player can bind to.
#[derive(Debug, Clone, PartialEq)]
pub struct RespawnPoint {
    /// Display name of the anchor.
    pub name: String,
    /// World position of the anchor.
    pub position: [f32; 3],
}

impl RespawnPoint {
    /// Create an anchor at the given position.
    pub fn new(name: impl Into<String>, position: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// The per-player game state the dialogue engine sees.
///
/// Offers read this in their availability checks and mutate it in their
/// selection actions; the engine itself only threads it through. The rest of
/// the player (position, health, equipment) lives with the surrounding game.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// The player's ID.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Bound respawn anchor, if any.
    pub respawn: Option<RespawnPoint>,
    /// Arbitrary state flags.
    pub flags: HashMap<String, bool>,
}

impl PlayerState {
    /// Create a player with a random ID and no state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            respawn: None,
            flags: HashMap::new(),
        }
    }

    /// Check if a flag is set.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Set a flag.
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.flags.insert(key.into(), value);
    }
}
