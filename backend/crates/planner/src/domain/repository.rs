//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::TaskRecord;
use crate::domain::value_objects::{TaskKey, TaskList};
use crate::error::PlannerResult;

/// Task store keyed by `(telegram_id, date)`
///
/// Every call is a single attempt; failures surface as
/// [`PlannerError::Storage`](crate::error::PlannerError::Storage) or
/// [`PlannerError::StorageTimeout`](crate::error::PlannerError::StorageTimeout).
#[trait_variant::make(TaskRepository: Send)]
pub trait LocalTaskRepository {
    /// Tasks stored under `key`, or `None` when nothing was saved yet
    async fn find_tasks(&self, key: &TaskKey) -> PlannerResult<Option<TaskList>>;

    /// Insert the record or atomically replace the one with the same key
    async fn upsert(&self, record: &TaskRecord) -> PlannerResult<()>;
}
