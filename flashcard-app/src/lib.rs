use anyhow::{Context, Result};
use flashcard_core::{FlashcardSession, WordCatalog};
use flashcard_persistence::{SqliteStore, connection::connect_and_migrate};
use std::sync::Arc;

pub mod config;

use config::Config;

/// Load the catalog, open the database and build an unloaded session.
pub async fn open_session(config: &Config) -> Result<FlashcardSession> {
    let catalog = Arc::new(WordCatalog::from_file(&config.words_file)?);

    let db = connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    let store = Arc::new(SqliteStore::new(db));

    Ok(FlashcardSession::new(
        catalog,
        store,
        config.session_options(),
    ))
}
