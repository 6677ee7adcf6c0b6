use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Errors as reported to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientError {
    LoadFailed { message: String },
    SaveFailed { key: String, message: String },
}
