//! HTTP Handlers

use crate::application::authenticate::AuthenticateUseCase;
use crate::application::config::PlannerConfig;
use crate::application::get_tasks::GetTasksUseCase;
use crate::application::save_tasks::SaveTasksUseCase;
use crate::domain::repository::TaskRepository;
use crate::error::{PlannerError, PlannerResult};
use crate::presentation::dto::{
    GetTasksResponse, HealthResponse, SaveTasksResponse, TaskOperation, TasksRequest,
};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use telegram::InitDataVerifier;

/// Shared state for task handlers
#[derive(Clone)]
pub struct TasksAppState<R>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<PlannerConfig>,
    pub verifier: Arc<InitDataVerifier>,
}

impl<R> TasksAppState<R>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: PlannerConfig) -> Self {
        let verifier = InitDataVerifier::new(&config.bot_token);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            verifier: Arc::new(verifier),
        }
    }
}

/// POST /api/tasks
///
/// The store is only touched after the init data vouches for the
/// claimed `telegramId`.
pub async fn handle_tasks<R>(
    State(state): State<TasksAppState<R>>,
    body: Bytes,
) -> PlannerResult<Response>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let command = TasksRequest::from_body(&body)?.into_command()?;

    let auth = AuthenticateUseCase::new(state.verifier.clone(), state.config.clone());
    auth.execute(&command.init_data, &command.key.telegram_id)?;

    match command.operation {
        TaskOperation::Get => {
            let use_case = GetTasksUseCase::new(state.repo.clone());
            let tasks = use_case.execute(&command.key).await?;

            Ok(Json(GetTasksResponse {
                tasks: tasks.into_inner(),
            })
            .into_response())
        }
        TaskOperation::Save(tasks) => {
            let use_case = SaveTasksUseCase::new(state.repo.clone());
            use_case.execute(command.key, tasks).await?;

            Ok(Json(SaveTasksResponse { ok: true }).into_response())
        }
    }
}

/// Any other method on the tasks route
pub async fn method_not_allowed() -> PlannerError {
    PlannerError::MethodNotAllowed
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
