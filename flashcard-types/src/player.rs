use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

/// Opaque player identifier.
///
/// Freshly created players get a random UUID. Ids read back from storage are
/// kept as-is, so older timestamp-style ids stay addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::generate(),
            name: name.into(),
            score: 0,
        }
    }

    /// Apply a signed delta, clamping at zero.
    pub fn apply_delta(&mut self, delta: i32) -> u32 {
        let next = (self.score as i64 + delta as i64).clamp(0, u32::MAX as i64);
        self.score = next as u32;
        self.score
    }
}
