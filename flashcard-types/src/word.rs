use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub type WordId = u32;

/// A single vocabulary entry from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Word {
    pub id: WordId,
    pub en: String,
    pub es: String,
    #[serde(default)]
    pub level: Option<u32>,
}

impl Word {
    pub fn new(id: WordId, en: impl Into<String>, es: impl Into<String>) -> Self {
        Self {
            id,
            en: en.into(),
            es: es.into(),
            level: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }
}
