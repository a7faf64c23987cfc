//! Get Tasks Use Case

use crate::domain::repository::TaskRepository;
use crate::domain::value_objects::{TaskKey, TaskList};
use crate::error::PlannerResult;
use std::sync::Arc;

/// Get Tasks Use Case
pub struct GetTasksUseCase<R>
where
    R: TaskRepository,
{
    repo: Arc<R>,
}

impl<R> GetTasksUseCase<R>
where
    R: TaskRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Tasks saved for the key, or an empty list when nothing was saved
    pub async fn execute(&self, key: &TaskKey) -> PlannerResult<TaskList> {
        let tasks = self.repo.find_tasks(key).await?.unwrap_or_default();

        tracing::debug!(
            telegram_id = %key.telegram_id,
            date = %key.date,
            count = tasks.len(),
            "Loaded tasks"
        );

        Ok(tasks)
    }
}
