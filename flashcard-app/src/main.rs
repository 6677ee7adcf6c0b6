use flashcard_app::{config::Config, open_session};
use flashcard_core::LoadOutcome;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting flashcards...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("Loading words from {}", config.words_file.display());

    let mut session = match open_session(&config).await {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start session: {:#}", e);
            error!("Set WORDS_FILE to a words.json catalog and DATABASE_URL to a writable database.");
            std::process::exit(1);
        }
    };

    match session.load().await {
        LoadOutcome::Ready(status) => {
            let progress = session.deck().progress();
            info!(
                "Deck {:?}: {} of {} words remaining",
                status, progress.remaining, progress.total
            );
            if let Some(word) = session.deck().current_word() {
                info!("Current word: {} / {}", word.en, word.es);
            }
            if let Some(roster) = session.roster() {
                for player in roster.players() {
                    info!("Player {}: {}", player.name, player.score);
                }
            }
        }
        LoadOutcome::Failed(e) => {
            error!("{:?}", e);
            std::process::exit(1);
        }
    }
}
