use anyhow::{Context, Result, anyhow};
use flashcard_types::{Word, WordId};
use std::collections::HashMap;
use std::path::Path;

/// The static, read-only word list.
#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
    words: Vec<Word>,
    index: HashMap<WordId, usize>,
}

impl WordCatalog {
    /// Build a catalog, keeping the given order. Duplicate ids are rejected.
    pub fn from_words(words: Vec<Word>) -> Result<Self> {
        let mut index = HashMap::with_capacity(words.len());
        for (position, word) in words.iter().enumerate() {
            if index.insert(word.id, position).is_some() {
                return Err(anyhow!("Duplicate word id {} in catalog", word.id));
            }
        }

        Ok(Self { words, index })
    }

    /// Parse a catalog from the `words.json` array format.
    pub fn from_json(json: &str) -> Result<Self> {
        let words: Vec<Word> = serde_json::from_str(json).context("Invalid word catalog JSON")?;
        Self::from_words(words)
    }

    /// Load a catalog from a `words.json` file on disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word catalog {}", path.display()))?;
        let catalog = Self::from_json(&json)?;
        tracing::info!("Loaded {} words from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.index.get(&id).map(|&position| &self.words[position])
    }

    pub fn contains(&self, id: WordId) -> bool {
        self.index.contains_key(&id)
    }

    /// All ids in catalog order
    pub fn ids(&self) -> Vec<WordId> {
        self.words.iter().map(|word| word.id).collect()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
