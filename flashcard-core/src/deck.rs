use flashcard_types::{DeckProgress, DeckSnapshot, DeckStatus, Word, WordId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::store::{read_json, write_json};
use crate::{
    DECK_KEY, EventBus, FlashcardEvent, KeyValueStore, StateError, WordCatalog, shuffled_ids,
};

/// Whether the deck has been read from storage yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed,
}

/// Tracks which words are still to be reviewed and which one is showing.
pub struct DeckTracker {
    catalog: Arc<WordCatalog>,
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    remaining: Vec<WordId>,
    current: Option<Word>,
    load_state: LoadState,
    rng: StdRng,
    events: EventBus,
}

impl DeckTracker {
    pub fn new(catalog: Arc<WordCatalog>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog,
            store,
            storage_key: DECK_KEY.to_string(),
            remaining: Vec::new(),
            current: None,
            load_state: LoadState::Pending,
            rng: StdRng::from_entropy(),
            events: EventBus::new(),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Resume the persisted deck, or shuffle a fresh one if nothing is stored.
    ///
    /// A read or parse failure leaves the tracker in [`LoadState::Failed`]
    /// with an empty deck; it never falls back to a fresh shuffle.
    pub async fn initialize(&mut self) -> Result<DeckStatus, StateError> {
        let persisted: Option<Vec<WordId>> =
            match read_json(self.store.as_ref(), &self.storage_key).await {
                Ok(persisted) => persisted,
                Err(e) => {
                    warn!("Failed to load deck: {}", e);
                    self.remaining.clear();
                    self.current = None;
                    self.load_state = LoadState::Failed;
                    return Err(e);
                }
            };

        let Some(persisted) = persisted else {
            info!("No saved deck under {}, starting fresh", self.storage_key);
            return self.shuffle_and_persist().await;
        };

        let (ids, dropped) = self.retain_known(&persisted);
        if ids.is_empty() && !persisted.is_empty() && !self.catalog.is_empty() {
            warn!(
                "None of the {} saved word ids exist in the catalog, reshuffling",
                persisted.len()
            );
            return self.shuffle_and_persist().await;
        }

        self.replace(ids);
        self.load_state = LoadState::Ready;
        info!(
            "Resumed deck with {} of {} words remaining",
            self.remaining.len(),
            self.catalog.len()
        );
        self.events.publish(FlashcardEvent::DeckResumed {
            remaining: self.remaining.len(),
            dropped,
        });

        if dropped > 0 {
            warn!(
                "Dropped {} saved word ids missing from the catalog or repeated",
                dropped
            );
            self.persist().await?;
        }

        Ok(self.status())
    }

    /// Dismiss the current card. No-op on an exhausted deck.
    pub async fn advance(&mut self) -> Result<DeckStatus, StateError> {
        if self.remaining.is_empty() {
            return Ok(DeckStatus::Exhausted);
        }

        let dismissed = self.remaining.remove(0);
        self.current = self.head_word();
        debug!(
            "Dismissed word {}, {} remaining",
            dismissed,
            self.remaining.len()
        );

        self.events.publish(FlashcardEvent::CardAdvanced {
            dismissed,
            remaining: self.remaining.len(),
        });
        if self.remaining.is_empty() {
            info!("Deck exhausted");
            self.events.publish(FlashcardEvent::DeckExhausted);
        }

        self.persist().await?;
        Ok(self.status())
    }

    /// Discard progress and start over with a fresh shuffle of the whole catalog.
    pub async fn reset(&mut self) -> Result<DeckStatus, StateError> {
        info!("Resetting deck");
        self.shuffle_and_persist().await
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.current.as_ref()
    }

    pub fn remaining_ids(&self) -> &[WordId] {
        &self.remaining
    }

    pub fn status(&self) -> DeckStatus {
        if self.remaining.is_empty() {
            DeckStatus::Exhausted
        } else {
            DeckStatus::Active
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn progress(&self) -> DeckProgress {
        DeckProgress {
            remaining: self.remaining.len(),
            total: self.catalog.len(),
        }
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot {
            remaining_ids: self.remaining.clone(),
            current_word: self.current.clone(),
            status: self.status(),
            progress: self.progress(),
        }
    }

    async fn shuffle_and_persist(&mut self) -> Result<DeckStatus, StateError> {
        let ids = shuffled_ids(&self.catalog, &mut self.rng);
        self.replace(ids);
        self.load_state = LoadState::Ready;
        info!("Shuffled a new deck of {} words", self.remaining.len());
        self.events.publish(FlashcardEvent::DeckShuffled {
            size: self.remaining.len(),
        });

        self.persist().await?;
        Ok(self.status())
    }

    /// Keep ids the catalog knows, first occurrence only. Returns the kept ids
    /// and how many were dropped.
    fn retain_known(&self, persisted: &[WordId]) -> (Vec<WordId>, usize) {
        let mut seen = HashSet::with_capacity(persisted.len());
        let kept: Vec<WordId> = persisted
            .iter()
            .copied()
            .filter(|id| self.catalog.contains(*id) && seen.insert(*id))
            .collect();
        let dropped = persisted.len() - kept.len();
        (kept, dropped)
    }

    fn replace(&mut self, ids: Vec<WordId>) {
        self.remaining = ids;
        self.current = self.head_word();
    }

    fn head_word(&self) -> Option<Word> {
        self.remaining
            .first()
            .and_then(|id| self.catalog.get(*id))
            .cloned()
    }

    async fn persist(&self) -> Result<(), StateError> {
        write_json(
            self.store.as_ref(),
            &self.storage_key,
            &self.remaining,
            &self.events,
        )
        .await
    }
}
