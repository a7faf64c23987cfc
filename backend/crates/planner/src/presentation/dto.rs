//! API DTOs (Data Transfer Objects)

use crate::domain::value_objects::{TaskDate, TaskKey, TaskList, TelegramId};
use crate::error::{PlannerError, PlannerResult, RequestField};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for POST /api/tasks
///
/// Fields are kept as raw JSON so that a wrong type reports the same
/// client error as a missing field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksRequest {
    #[serde(default)]
    pub init_data: Option<Value>,
    #[serde(default)]
    pub telegram_id: Option<Value>,
    /// Accepted in place of `telegramId`
    #[serde(default)]
    pub identity: Option<Value>,
    #[serde(default)]
    pub action: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub tasks: Option<Value>,
}

/// Requested operation
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOperation {
    Get,
    Save(TaskList),
}

/// Validated request, not yet authenticated
#[derive(Debug, Clone, PartialEq)]
pub struct TasksCommand {
    pub init_data: String,
    pub key: TaskKey,
    pub operation: TaskOperation,
}

impl TasksRequest {
    /// Parse a raw body; an empty body reads as `{}`
    pub fn from_body(body: &[u8]) -> PlannerResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body).map_err(|_| PlannerError::InvalidJson)?;
        if !value.is_object() {
            return Err(PlannerError::InvalidJson);
        }

        serde_json::from_value(value).map_err(|_| PlannerError::InvalidJson)
    }

    /// Check field presence and shape
    ///
    /// Order: telegramId, action, date, known action, tasks array.
    pub fn into_command(self) -> PlannerResult<TasksCommand> {
        let telegram_id = self
            .telegram_id
            .or(self.identity)
            .and_then(non_empty_string)
            .and_then(TelegramId::new)
            .ok_or(PlannerError::MissingField(RequestField::TelegramId))?;

        let action = self
            .action
            .and_then(non_empty_string)
            .ok_or(PlannerError::MissingField(RequestField::Action))?;

        let date = self
            .date
            .and_then(non_empty_string)
            .and_then(TaskDate::new)
            .ok_or(PlannerError::MissingField(RequestField::Date))?;

        let operation = match action.as_str() {
            "get" => TaskOperation::Get,
            "save" => {
                let tasks = self
                    .tasks
                    .and_then(TaskList::from_value)
                    .ok_or(PlannerError::TasksNotArray)?;
                TaskOperation::Save(tasks)
            }
            _ => return Err(PlannerError::UnknownAction(action)),
        };

        let init_data = match self.init_data {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };

        Ok(TasksCommand {
            init_data,
            key: TaskKey::new(telegram_id, date),
            operation,
        })
    }
}

fn non_empty_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Response for `get`
#[derive(Debug, Clone, Serialize)]
pub struct GetTasksResponse {
    pub tasks: Vec<Value>,
}

/// Response for `save`
#[derive(Debug, Clone, Serialize)]
pub struct SaveTasksResponse {
    pub ok: bool,
}

/// Response for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
