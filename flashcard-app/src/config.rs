use anyhow::{Result, anyhow};
use flashcard_core::{DECK_KEY, ROSTER_KEY, SessionOptions};
use flashcard_persistence::connection::DEFAULT_DATABASE_URL;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub words_file: PathBuf,
    pub roster_enabled: bool,
    pub deck_key: String,
    pub players_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source; unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let roster_enabled = match lookup("ROSTER_ENABLED") {
            Some(value) => parse_flag(&value)
                .ok_or_else(|| anyhow!("Invalid ROSTER_ENABLED: {:?}", value))?,
            None => defaults.roster_enabled,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            words_file: lookup("WORDS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.words_file),
            roster_enabled,
            deck_key: non_empty(lookup("DECK_STORAGE_KEY"), "DECK_STORAGE_KEY")?
                .unwrap_or(defaults.deck_key),
            players_key: non_empty(lookup("PLAYERS_STORAGE_KEY"), "PLAYERS_STORAGE_KEY")?
                .unwrap_or(defaults.players_key),
        })
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            roster_enabled: self.roster_enabled,
            deck_key: self.deck_key.clone(),
            roster_key: self.players_key.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            words_file: PathBuf::from("./data/words.json"),
            roster_enabled: true,
            deck_key: DECK_KEY.to_string(),
            players_key: ROSTER_KEY.to_string(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty(value: Option<String>, name: &str) -> Result<Option<String>> {
    match value {
        Some(v) if v.trim().is_empty() => Err(anyhow!("{} must not be empty", name)),
        other => Ok(other),
    }
}
