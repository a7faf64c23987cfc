//! Tasks Router

use crate::application::config::PlannerConfig;
use crate::domain::repository::TaskRepository;
use crate::infra::supabase::SupabaseTaskRepository;
use crate::presentation::handlers::{self, TasksAppState};
use axum::{
    Router,
    routing::{get, post},
};

/// Create the tasks router with the Supabase repository
pub fn tasks_router(repo: SupabaseTaskRepository, config: PlannerConfig) -> Router {
    let state = TasksAppState::new(repo, config);

    Router::new()
        .route(
            "/tasks",
            post(handlers::handle_tasks::<SupabaseTaskRepository>)
                .fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Create a generic tasks router for any repository implementation
pub fn tasks_router_generic<R>(repo: R, config: PlannerConfig) -> Router
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let state = TasksAppState::new(repo, config);

    Router::new()
        .route(
            "/tasks",
            post(handlers::handle_tasks::<R>).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
