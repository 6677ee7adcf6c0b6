#![allow(dead_code)]

use async_trait::async_trait;
use flashcard_core::{
    DeckTracker, EventHandler, FlashcardEvent, KeyValueStore, MemoryStore, StoreError,
    WordCatalog,
};
use flashcard_types::{Word, WordId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// The two-word catalog from the cat/dog walkthrough
pub fn pets_catalog() -> Arc<WordCatalog> {
    Arc::new(
        WordCatalog::from_words(vec![
            Word::new(1, "cat", "gato"),
            Word::new(2, "dog", "perro"),
        ])
        .unwrap(),
    )
}

/// A catalog with `n` generated words, ids 1..=n
pub fn numbered_catalog(n: u32) -> Arc<WordCatalog> {
    let words = (1..=n)
        .map(|id| Word::new(id, format!("en-{}", id), format!("es-{}", id)).with_level(id % 3))
        .collect();
    Arc::new(WordCatalog::from_words(words).unwrap())
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

pub fn create_deck(catalog: Arc<WordCatalog>, store: Arc<dyn KeyValueStore>) -> DeckTracker {
    DeckTracker::new(catalog, store).with_rng(seeded_rng())
}

pub async fn stored_ids(store: &dyn KeyValueStore, key: &str) -> Option<Vec<WordId>> {
    store
        .get(key)
        .await
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

pub fn sorted(ids: &[WordId]) -> Vec<WordId> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids
}

/// Store wrapper whose reads and writes can be made to fail
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: MemoryStore::with_entries(entries),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read {
                key: key.to_string(),
                message: "storage unavailable".to_string(),
            });
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                key: key.to_string(),
                message: "storage full".to_string(),
            });
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<FlashcardEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<FlashcardEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&FlashcardEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl EventHandler for EventCollector {
    fn handle_event(&mut self, event: &FlashcardEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
