use flashcard_types::{ClientError, DeckStatus};
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
    DECK_KEY, DeckTracker, EventBus, EventHandler, KeyValueStore, PlayerRoster, ROSTER_KEY,
    StateError, WordCatalog,
};

/// Message shown to the user when saved progress cannot be read.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load progress";

/// Prompt passed to the confirmation callback before clearing the roster.
pub const CLEAR_ALL_PROMPT: &str = "Are you sure you want to remove everyone?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub roster_enabled: bool,
    pub deck_key: String,
    pub roster_key: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            roster_enabled: true,
            deck_key: DECK_KEY.to_string(),
            roster_key: ROSTER_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready(DeckStatus),
    Failed(ClientError),
}

/// A drilling session: the deck plus, optionally, the scoreboard.
///
/// Both share one [`EventBus`], so a UI can subscribe once and redraw from
/// the events.
pub struct FlashcardSession {
    deck: DeckTracker,
    roster: Option<PlayerRoster>,
    events: EventBus,
    load_error: Option<ClientError>,
}

impl FlashcardSession {
    pub fn new(
        catalog: Arc<WordCatalog>,
        store: Arc<dyn KeyValueStore>,
        options: SessionOptions,
    ) -> Self {
        let events = EventBus::new();
        let deck = DeckTracker::new(catalog, store.clone())
            .with_storage_key(options.deck_key)
            .with_event_bus(events.clone());
        let roster = options.roster_enabled.then(|| {
            PlayerRoster::new(store)
                .with_storage_key(options.roster_key)
                .with_event_bus(events.clone())
        });

        Self {
            deck,
            roster,
            events,
            load_error: None,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.deck = self.deck.with_rng(rng);
        self
    }

    /// Load the deck and, if enabled, the roster.
    ///
    /// Any read failure is reported once as [`LOAD_FAILURE_MESSAGE`]. The
    /// session stays usable afterwards; a later `reset` starts a fresh deck.
    pub async fn load(&mut self) -> LoadOutcome {
        self.load_error = None;

        match self.deck.initialize().await {
            Ok(_) => {}
            Err(e) if e.is_load_failure() => return self.fail(e),
            Err(e) => warn!("Deck loaded but could not be saved: {}", e),
        }

        if let Some(roster) = self.roster.as_mut() {
            if let Err(e) = roster.load().await {
                return self.fail(e);
            }
        }

        let status = self.deck.status();
        info!(
            "Session ready: {:?}, {} of {} words remaining",
            status,
            self.deck.progress().remaining,
            self.deck.progress().total
        );
        LoadOutcome::Ready(status)
    }

    /// Clear the roster after `confirm` accepts [`CLEAR_ALL_PROMPT`].
    /// Returns whether the roster was cleared.
    pub async fn clear_players<F>(&mut self, confirm: F) -> Result<bool, StateError>
    where
        F: FnOnce(&str) -> bool,
    {
        let Some(roster) = self.roster.as_mut() else {
            return Ok(false);
        };

        if !confirm(CLEAR_ALL_PROMPT) {
            debug!("Clearing players cancelled");
            return Ok(false);
        }

        roster.clear_all().await?;
        Ok(true)
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.add_handler(handler);
    }

    pub fn deck(&self) -> &DeckTracker {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut DeckTracker {
        &mut self.deck
    }

    /// `None` when the scoreboard is disabled for this session.
    pub fn roster(&self) -> Option<&PlayerRoster> {
        self.roster.as_ref()
    }

    pub fn roster_mut(&mut self) -> Option<&mut PlayerRoster> {
        self.roster.as_mut()
    }

    pub fn load_error(&self) -> Option<&ClientError> {
        self.load_error.as_ref()
    }

    fn fail(&mut self, error: StateError) -> LoadOutcome {
        error!("{}: {}", LOAD_FAILURE_MESSAGE, error);
        let client_error = ClientError::LoadFailed {
            message: LOAD_FAILURE_MESSAGE.to_string(),
        };
        self.load_error = Some(client_error.clone());
        LoadOutcome::Failed(client_error)
    }
}
