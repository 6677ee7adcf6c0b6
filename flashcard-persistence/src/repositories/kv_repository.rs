use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::entities::{kv_entries, prelude::*};

#[derive(Clone)]
pub struct KvRepository {
    db: DatabaseConnection,
}

impl KvRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, key: &str) -> Result<Option<String>> {
        let entry = KvEntries::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(entry.map(|model| model.value))
    }

    /// Insert or fully replace the value stored under `key`
    pub async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        let entry = kv_entries::ActiveModel {
            key: sea_orm::ActiveValue::Set(key.to_string()),
            value: sea_orm::ActiveValue::Set(value.to_string()),
            updated_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        KvEntries::insert(entry)
            .on_conflict(
                OnConflict::column(kv_entries::Column::Key)
                    .update_columns([kv_entries::Column::Value, kv_entries::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(KvEntries::find().count(&self.db).await?)
    }
}
