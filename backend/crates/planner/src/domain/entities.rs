//! Domain Entities
//!
//! Core business entities for the planner domain.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{TaskDate, TaskKey, TaskList, TelegramId};

/// One user's task list for one day
///
/// At most one record exists per `(telegram_id, date)`; saving replaces
/// the whole record.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub telegram_id: TelegramId,
    pub date: TaskDate,
    pub tasks: TaskList,
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Create a record stamped with the current time
    pub fn new(key: TaskKey, tasks: TaskList) -> Self {
        Self {
            telegram_id: key.telegram_id,
            date: key.date,
            tasks,
            updated_at: Utc::now(),
        }
    }

    pub fn key(&self) -> TaskKey {
        TaskKey::new(self.telegram_id.clone(), self.date.clone())
    }
}
