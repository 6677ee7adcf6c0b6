use flashcard_types::ClientError;
use thiserror::Error;

use crate::StoreError;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("failed to load {key}: {source}")]
    Load {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("stored value under {key} is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode state for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to save {key}: {source}")]
    Save {
        key: String,
        #[source]
        source: StoreError,
    },
}

impl StateError {
    /// True for failures that prevent state from being read at startup.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, StateError::Load { .. } | StateError::Malformed { .. })
    }

    pub fn key(&self) -> &str {
        match self {
            StateError::Load { key, .. }
            | StateError::Malformed { key, .. }
            | StateError::Encode { key, .. }
            | StateError::Save { key, .. } => key,
        }
    }
}

impl From<&StateError> for ClientError {
    fn from(error: &StateError) -> Self {
        if error.is_load_failure() {
            ClientError::LoadFailed {
                message: error.to_string(),
            }
        } else {
            ClientError::SaveFailed {
                key: error.key().to_string(),
                message: error.to_string(),
            }
        }
    }
}
