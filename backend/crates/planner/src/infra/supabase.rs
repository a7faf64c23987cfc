//! Supabase (PostgREST) Repository Implementation

use crate::application::config::{ServiceRoleKey, StoreConfig};
use crate::domain::entities::TaskRecord;
use crate::domain::repository::TaskRepository;
use crate::domain::value_objects::{TaskKey, TaskList};
use crate::error::{PlannerError, PlannerResult};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upsert conflict target; matches the table's composite primary key
const ON_CONFLICT: &str = "telegram_id,date";

const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=minimal";

/// Row shape returned by the select
#[derive(Debug, Deserialize)]
struct TasksRow {
    #[serde(default)]
    tasks: Option<Value>,
}

/// Row shape written by the upsert
#[derive(Debug, Serialize)]
struct UpsertRow<'a> {
    telegram_id: &'a str,
    date: &'a str,
    tasks: &'a [Value],
    updated_at: DateTime<Utc>,
}

impl<'a> From<&'a TaskRecord> for UpsertRow<'a> {
    fn from(record: &'a TaskRecord) -> Self {
        Self {
            telegram_id: record.telegram_id.as_str(),
            date: record.date.as_str(),
            tasks: record.tasks.as_slice(),
            updated_at: record.updated_at,
        }
    }
}

/// PostgREST error body
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Task repository backed by a Supabase table
#[derive(Clone)]
pub struct SupabaseTaskRepository {
    client: Client,
    endpoint: String,
    service_role_key: ServiceRoleKey,
}

impl SupabaseTaskRepository {
    pub fn new(config: &StoreConfig) -> PlannerResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PlannerError::Internal(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            service_role_key: config.service_role_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.service_role_key.expose_secret();
        request.header("apikey", key).bearer_auth(key)
    }
}

impl TaskRepository for SupabaseTaskRepository {
    async fn find_tasks(&self, key: &TaskKey) -> PlannerResult<Option<TaskList>> {
        let telegram_id = format!("eq.{}", key.telegram_id);
        let date = format!("eq.{}", key.date);

        let request = self.client.get(&self.endpoint).query(&[
            ("select", "tasks"),
            ("telegram_id", telegram_id.as_str()),
            ("date", date.as_str()),
            ("limit", "1"),
        ]);

        let response = check_status(self.authorized(request).send().await?).await?;
        let rows: Vec<TasksRow> = response.json().await?;

        rows_to_tasks(rows)
    }

    async fn upsert(&self, record: &TaskRecord) -> PlannerResult<()> {
        let request = self
            .client
            .post(&self.endpoint)
            .query(&[("on_conflict", ON_CONFLICT)])
            .header("Prefer", PREFER_UPSERT)
            .json(&[UpsertRow::from(record)]);

        check_status(self.authorized(request).send().await?).await?;
        Ok(())
    }
}

/// First row's tasks; `null` reads as an empty list
fn rows_to_tasks(rows: Vec<TasksRow>) -> PlannerResult<Option<TaskList>> {
    let Some(row) = rows.into_iter().next() else {
        return Ok(None);
    };

    match row.tasks {
        None | Some(Value::Null) => Ok(Some(TaskList::default())),
        Some(value) => TaskList::from_value(value).map(Some).ok_or_else(|| {
            PlannerError::storage(
                "Invalid response from task store",
                Some("stored tasks value is not an array".to_string()),
            )
        }),
    }
}

async fn check_status(response: Response) -> PlannerResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(store_error(status, &body))
}

/// Map a non-success store response to a storage error
fn store_error(status: StatusCode, body: &str) -> PlannerError {
    let parsed: PostgrestError = serde_json::from_str(body).unwrap_or_default();

    let message = parsed
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Task store returned {}", status));

    let details: Vec<String> = [
        parsed.code.map(|c| format!("code {}", c)),
        parsed.details,
        parsed.hint,
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();

    let details = if details.is_empty() {
        None
    } else {
        Some(details.join("; "))
    };

    PlannerError::storage(message, details)
}
