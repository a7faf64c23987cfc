//! In-Memory Repository Implementation

use crate::domain::entities::TaskRecord;
use crate::domain::repository::TaskRepository;
use crate::domain::value_objects::{TaskKey, TaskList};
use crate::error::PlannerResult;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local task store
///
/// Same replace-on-save semantics as the Supabase table. Data is lost on
/// restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskRepository {
    records: Arc<RwLock<HashMap<TaskKey, TaskRecord>>>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full stored record, including `updated_at`
    pub async fn record(&self, key: &TaskKey) -> Option<TaskRecord> {
        self.records.read().await.get(key).cloned()
    }
}

impl TaskRepository for MemoryTaskRepository {
    async fn find_tasks(&self, key: &TaskKey) -> PlannerResult<Option<TaskList>> {
        Ok(self
            .records
            .read()
            .await
            .get(key)
            .map(|record| record.tasks.clone()))
    }

    async fn upsert(&self, record: &TaskRecord) -> PlannerResult<()> {
        self.records
            .write()
            .await
            .insert(record.key(), record.clone());
        Ok(())
    }
}
