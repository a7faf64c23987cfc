//! Domain Value Objects
//!
//! Immutable value types for the planner domain.

use serde_json::Value;
use std::fmt;

/// Telegram user id in its decimal string form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TelegramId(String);

impl TelegramId {
    /// Returns `None` for an empty id
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TelegramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar day the task list belongs to
///
/// Clients format it (`YYYY-MM-DD`); the server treats it as an opaque key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskDate(String);

impl TaskDate {
    /// Returns `None` for an empty date
    pub fn new(date: impl Into<String>) -> Option<Self> {
        let date = date.into();
        if date.is_empty() { None } else { Some(Self(date)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite primary key of a task record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskKey {
    pub telegram_id: TelegramId,
    pub date: TaskDate,
}

impl TaskKey {
    pub fn new(telegram_id: TelegramId, date: TaskDate) -> Self {
        Self { telegram_id, date }
    }
}

/// Opaque list of tasks; only its being a JSON array is checked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList(Vec<Value>);

impl TaskList {
    pub fn new(tasks: Vec<Value>) -> Self {
        Self(tasks)
    }

    /// Accepts JSON arrays only
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self(items)),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}
