use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::word::{Word, WordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DeckStatus {
    Active,    // Cards left, current word shown
    Exhausted, // Every card dismissed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeckProgress {
    pub remaining: usize,
    pub total: usize,
}

impl DeckProgress {
    pub fn seen(&self) -> usize {
        self.total.saturating_sub(self.remaining)
    }
}

/// Read-only view of the deck handed to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeckSnapshot {
    pub remaining_ids: Vec<WordId>,
    pub current_word: Option<Word>,
    pub status: DeckStatus,
    pub progress: DeckProgress,
}
