//! Save Tasks Use Case

use crate::domain::entities::TaskRecord;
use crate::domain::repository::TaskRepository;
use crate::domain::value_objects::{TaskKey, TaskList};
use crate::error::PlannerResult;
use std::sync::Arc;

/// Save Tasks Use Case
pub struct SaveTasksUseCase<R>
where
    R: TaskRepository,
{
    repo: Arc<R>,
}

impl<R> SaveTasksUseCase<R>
where
    R: TaskRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Replace the whole list stored under `key`
    pub async fn execute(&self, key: TaskKey, tasks: TaskList) -> PlannerResult<()> {
        let record = TaskRecord::new(key, tasks);
        self.repo.upsert(&record).await?;

        tracing::info!(
            telegram_id = %record.telegram_id,
            date = %record.date,
            count = record.tasks.len(),
            "Saved tasks"
        );

        Ok(())
    }
}
