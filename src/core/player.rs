use alloc::string::String;
use core::fmt;

use crate::core::battlefield::Battlefield;

/// Seat of a player in a game: 1 for the creator, 2 for the joiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A named player and the battlefield it owns for the whole game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    id: PlayerId,
    name: String,
    battlefield: Battlefield,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, battlefield: Battlefield) -> Self {
        Self {
            id,
            name: name.into(),
            battlefield,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub(crate) fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.battlefield
    }
}
