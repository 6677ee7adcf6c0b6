mod common;

use common::*;
use flashcard_core::{DECK_KEY, EventBus, FlashcardEvent, LoadState, MemoryStore, StateError};
use flashcard_types::DeckStatus;
use std::sync::Arc;

#[tokio::test]
async fn test_fresh_deck_is_permutation_of_catalog() {
    for n in 1..=12 {
        let catalog = numbered_catalog(n);
        let store = Arc::new(MemoryStore::new());
        let mut deck = create_deck(catalog.clone(), store.clone());

        let status = deck.initialize().await.unwrap();
        assert_eq!(status, DeckStatus::Active);
        assert_eq!(deck.load_state(), LoadState::Ready);
        assert_eq!(deck.remaining_ids().len(), n as usize);
        assert_eq!(sorted(deck.remaining_ids()), catalog.ids());

        // Fresh decks are written through immediately
        let persisted = stored_ids(&*store, DECK_KEY).await.unwrap();
        assert_eq!(persisted, deck.remaining_ids());
    }
}

#[tokio::test]
async fn test_cat_dog_walkthrough() {
    let catalog = pets_catalog();
    let store = Arc::new(MemoryStore::new());
    let mut deck = create_deck(catalog.clone(), store.clone());

    deck.initialize().await.unwrap();
    assert_eq!(sorted(deck.remaining_ids()), vec![1, 2]);

    assert_eq!(deck.advance().await.unwrap(), DeckStatus::Active);
    assert_eq!(deck.remaining_ids().len(), 1);
    let head = deck.remaining_ids()[0];
    assert_eq!(deck.current_word(), catalog.get(head));

    assert_eq!(deck.advance().await.unwrap(), DeckStatus::Exhausted);
    assert!(deck.remaining_ids().is_empty());
    assert!(deck.current_word().is_none());

    assert_eq!(deck.reset().await.unwrap(), DeckStatus::Active);
    assert_eq!(deck.remaining_ids().len(), 2);
    assert!(deck.current_word().is_some());
}

#[tokio::test]
async fn test_advance_shrinks_by_one_and_tracks_head() {
    let catalog = numbered_catalog(6);
    let store = Arc::new(MemoryStore::new());
    let mut deck = create_deck(catalog.clone(), store.clone());
    deck.initialize().await.unwrap();

    for expected in (0..6).rev() {
        let before = deck.remaining_ids().to_vec();
        deck.advance().await.unwrap();

        assert_eq!(deck.remaining_ids(), &before[1..]);
        assert_eq!(deck.remaining_ids().len(), expected);
        match deck.remaining_ids().first() {
            Some(head) => assert_eq!(deck.current_word(), catalog.get(*head)),
            None => assert!(deck.current_word().is_none()),
        }

        // Round trip: storage always matches memory
        let persisted = stored_ids(&*store, DECK_KEY).await.unwrap();
        assert_eq!(persisted, deck.remaining_ids());
    }
}

#[tokio::test]
async fn test_advance_on_exhausted_is_noop() {
    let store = Arc::new(FlakyStore::with_entries([(DECK_KEY, "[]")]));
    let mut deck = create_deck(pets_catalog(), store.clone());

    assert_eq!(deck.initialize().await.unwrap(), DeckStatus::Exhausted);
    assert_eq!(deck.load_state(), LoadState::Ready);

    assert_eq!(deck.advance().await.unwrap(), DeckStatus::Exhausted);
    assert!(deck.remaining_ids().is_empty());
    assert!(deck.current_word().is_none());
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_resume_adopts_persisted_order() {
    let store = Arc::new(MemoryStore::with_entries([(DECK_KEY, "[3,1,2]")]));
    let mut deck = create_deck(numbered_catalog(3), store.clone());

    assert_eq!(deck.initialize().await.unwrap(), DeckStatus::Active);
    assert_eq!(deck.remaining_ids(), &[3, 1, 2]);
    assert_eq!(deck.current_word().unwrap().en, "en-3");
}

#[tokio::test]
async fn test_resume_filters_stale_ids_and_rewrites() {
    let store = Arc::new(MemoryStore::with_entries([(DECK_KEY, "[2,99,1,2]")]));
    let collector = EventCollector::new();
    let bus = EventBus::new();
    bus.add_handler(Box::new(collector.clone()));
    let mut deck = create_deck(numbered_catalog(3), store.clone()).with_event_bus(bus);

    deck.initialize().await.unwrap();
    assert_eq!(deck.remaining_ids(), &[2, 1]);
    assert_eq!(
        stored_ids(&*store, DECK_KEY).await.unwrap(),
        vec![2, 1]
    );
    assert!(collector.has_event_type(|e| matches!(
        e,
        FlashcardEvent::DeckResumed {
            remaining: 2,
            dropped: 2
        }
    )));
}

#[tokio::test]
async fn test_resume_with_no_known_ids_reshuffles() {
    let store = Arc::new(MemoryStore::with_entries([(DECK_KEY, "[40,41]")]));
    let catalog = numbered_catalog(4);
    let mut deck = create_deck(catalog.clone(), store.clone());

    assert_eq!(deck.initialize().await.unwrap(), DeckStatus::Active);
    assert_eq!(sorted(deck.remaining_ids()), catalog.ids());
    assert_eq!(
        stored_ids(&*store, DECK_KEY).await.unwrap(),
        deck.remaining_ids()
    );
}

#[tokio::test]
async fn test_read_failure_marks_failed_without_shuffling() {
    let store = Arc::new(FlakyStore::new());
    store.fail_reads(true);
    let mut deck = create_deck(pets_catalog(), store.clone());

    let err = deck.initialize().await.unwrap_err();
    assert!(matches!(err, StateError::Load { .. }));
    assert!(err.is_load_failure());
    assert_eq!(deck.load_state(), LoadState::Failed);
    assert!(deck.remaining_ids().is_empty());
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_a_load_failure() {
    let store = Arc::new(FlakyStore::with_entries([(DECK_KEY, "{\"not\": \"a list\"}")]));
    let mut deck = create_deck(pets_catalog(), store.clone());

    let err = deck.initialize().await.unwrap_err();
    assert!(matches!(err, StateError::Malformed { .. }));
    assert_eq!(deck.load_state(), LoadState::Failed);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_reset_recovers_failed_deck() {
    let store = Arc::new(FlakyStore::new());
    store.fail_reads(true);
    let mut deck = create_deck(pets_catalog(), store.clone());
    assert!(deck.initialize().await.is_err());

    assert_eq!(deck.reset().await.unwrap(), DeckStatus::Active);
    assert_eq!(deck.load_state(), LoadState::Ready);
    assert_eq!(deck.remaining_ids().len(), 2);
}

#[tokio::test]
async fn test_write_failure_keeps_memory_and_is_reported() {
    let store = Arc::new(FlakyStore::new());
    let collector = EventCollector::new();
    let bus = EventBus::new();
    bus.add_handler(Box::new(collector.clone()));
    let mut deck = create_deck(numbered_catalog(3), store.clone()).with_event_bus(bus);
    deck.initialize().await.unwrap();

    store.fail_writes(true);
    let err = deck.advance().await.unwrap_err();
    assert!(matches!(err, StateError::Save { .. }));
    assert!(!err.is_load_failure());

    // Not rolled back
    assert_eq!(deck.remaining_ids().len(), 2);
    assert!(collector.has_event_type(|e| matches!(e, FlashcardEvent::PersistenceFailed { .. })));

    // Storage still holds the previous sequence
    let persisted = stored_ids(&*store, DECK_KEY).await.unwrap();
    assert_eq!(persisted.len(), 3);
}

#[tokio::test]
async fn test_reset_from_any_state_restores_full_deck() {
    let catalog = numbered_catalog(5);
    let store = Arc::new(MemoryStore::new());
    let mut deck = create_deck(catalog.clone(), store.clone());

    // Before initialize
    assert_eq!(deck.reset().await.unwrap(), DeckStatus::Active);
    assert_eq!(deck.remaining_ids().len(), 5);

    // Mid-deck
    deck.advance().await.unwrap();
    deck.advance().await.unwrap();
    deck.reset().await.unwrap();
    assert_eq!(sorted(deck.remaining_ids()), catalog.ids());

    // Exhausted
    for _ in 0..5 {
        deck.advance().await.unwrap();
    }
    assert_eq!(deck.status(), DeckStatus::Exhausted);
    deck.reset().await.unwrap();
    assert_eq!(deck.progress().remaining, 5);
    assert_eq!(deck.progress().total, 5);
}

#[tokio::test]
async fn test_empty_catalog_is_exhausted() {
    let catalog = Arc::new(flashcard_core::WordCatalog::from_json("[]").unwrap());
    let store = Arc::new(MemoryStore::new());
    let mut deck = create_deck(catalog, store.clone());

    assert_eq!(deck.initialize().await.unwrap(), DeckStatus::Exhausted);
    assert_eq!(deck.reset().await.unwrap(), DeckStatus::Exhausted);
    assert_eq!(
        stored_ids(&*store, DECK_KEY).await.unwrap(),
        Vec::<u32>::new()
    );
}

#[tokio::test]
async fn test_custom_storage_key() {
    let store = Arc::new(MemoryStore::new());
    let mut deck = create_deck(pets_catalog(), store.clone()).with_storage_key("deck_v2");
    deck.initialize().await.unwrap();

    assert_eq!(deck.storage_key(), "deck_v2");
    assert!(stored_ids(&*store, "deck_v2").await.is_some());
    assert!(stored_ids(&*store, DECK_KEY).await.is_none());
}

#[tokio::test]
async fn test_events_for_a_full_pass() {
    let collector = EventCollector::new();
    let bus = EventBus::new();
    bus.add_handler(Box::new(collector.clone()));
    let mut deck =
        create_deck(pets_catalog(), Arc::new(MemoryStore::new())).with_event_bus(bus);

    deck.initialize().await.unwrap();
    let first = deck.remaining_ids()[0];
    deck.advance().await.unwrap();
    deck.advance().await.unwrap();

    let events = collector.get_events();
    assert_eq!(events[0], FlashcardEvent::DeckShuffled { size: 2 });
    assert_eq!(
        events[1],
        FlashcardEvent::CardAdvanced {
            dismissed: first,
            remaining: 1
        }
    );
    assert_eq!(events.last(), Some(&FlashcardEvent::DeckExhausted));
}
