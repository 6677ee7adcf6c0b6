use flashcard_types::{Player, PlayerId};
use std::sync::Arc;
use tracing::{debug, info};

use crate::store::{read_json, write_json};
use crate::{EventBus, FlashcardEvent, KeyValueStore, ROSTER_KEY, StateError};

/// The list of players and their scores, written through on every change.
pub struct PlayerRoster {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    players: Vec<Player>,
    events: EventBus,
}

impl PlayerRoster {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            storage_key: ROSTER_KEY.to_string(),
            players: Vec::new(),
            events: EventBus::new(),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Read the saved roster. A missing key means nobody has been added yet.
    pub async fn load(&mut self) -> Result<usize, StateError> {
        let players: Option<Vec<Player>> =
            read_json(self.store.as_ref(), &self.storage_key).await?;
        self.players = players.unwrap_or_default();
        info!("Loaded {} players", self.players.len());
        Ok(self.players.len())
    }

    /// Add a player with a score of zero. Blank names are ignored.
    pub async fn add_player(&mut self, name: &str) -> Result<Option<PlayerId>, StateError> {
        if name.trim().is_empty() {
            return Ok(None);
        }

        let player = Player::new(name);
        let player_id = player.id.clone();
        self.players.push(player);
        info!("Added player {} ({})", name, player_id);
        self.events.publish(FlashcardEvent::PlayerAdded {
            player_id: player_id.clone(),
            name: name.to_string(),
        });

        self.persist().await?;
        Ok(Some(player_id))
    }

    /// Remove a player. Returns whether anyone was removed; an unknown id is
    /// not an error and leaves storage untouched.
    pub async fn remove_player(&mut self, player_id: &PlayerId) -> Result<bool, StateError> {
        let before = self.players.len();
        self.players.retain(|p| &p.id != player_id);
        if self.players.len() == before {
            debug!("remove_player: no player {}", player_id);
            return Ok(false);
        }

        info!("Removed player {}", player_id);
        self.events.publish(FlashcardEvent::PlayerRemoved {
            player_id: player_id.clone(),
        });
        self.persist().await?;
        Ok(true)
    }

    /// Remove everyone. Asking the user first is the caller's job.
    pub async fn clear_all(&mut self) -> Result<(), StateError> {
        let removed = self.players.len();
        self.players.clear();
        info!("Cleared {} players", removed);
        self.events.publish(FlashcardEvent::RosterCleared { removed });
        self.persist().await
    }

    /// Add `delta` to a player's score, clamping at zero. Returns the new
    /// score, or `None` for an unknown id.
    pub async fn adjust_score(
        &mut self,
        player_id: &PlayerId,
        delta: i32,
    ) -> Result<Option<u32>, StateError> {
        let Some(player) = self.players.iter_mut().find(|p| &p.id == player_id) else {
            debug!("adjust_score: no player {}", player_id);
            return Ok(None);
        };

        let score = player.apply_delta(delta);
        debug!("Player {} score is now {}", player_id, score);
        self.events.publish(FlashcardEvent::ScoreAdjusted {
            player_id: player_id.clone(),
            score,
        });

        self.persist().await?;
        Ok(Some(score))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == player_id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    async fn persist(&self) -> Result<(), StateError> {
        write_json(
            self.store.as_ref(),
            &self.storage_key,
            &self.players,
            &self.events,
        )
        .await
    }
}
