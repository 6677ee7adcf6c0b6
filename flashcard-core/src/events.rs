use flashcard_types::{PlayerId, WordId};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashcardEvent {
    DeckShuffled {
        size: usize,
    },
    DeckResumed {
        remaining: usize,
        dropped: usize,
    },
    CardAdvanced {
        dismissed: WordId,
        remaining: usize,
    },
    DeckExhausted,
    PlayerAdded {
        player_id: PlayerId,
        name: String,
    },
    PlayerRemoved {
        player_id: PlayerId,
    },
    RosterCleared {
        removed: usize,
    },
    ScoreAdjusted {
        player_id: PlayerId,
        score: u32,
    },
    PersistenceFailed {
        key: String,
        message: String,
    },
}

/// Event handler trait for observing deck and roster changes
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &FlashcardEvent);
}

/// Simple event bus shared by the deck, the roster and the session.
///
/// Clones publish to the same set of handlers.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Arc<Mutex<Vec<Box<dyn EventHandler>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler(&self, handler: Box<dyn EventHandler>) {
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        handlers.push(handler);
    }

    pub fn publish(&self, event: FlashcardEvent) {
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        for handler in handlers.iter_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .finish()
    }
}
