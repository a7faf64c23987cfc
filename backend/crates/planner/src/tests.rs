//! Router-level tests for the planner crate

#[cfg(test)]
mod router_tests {
    use crate::application::config::{PlannerConfig, ServiceRoleKey, StoreConfig};
    use crate::domain::entities::TaskRecord;
    use crate::domain::repository::TaskRepository;
    use crate::domain::value_objects::{TaskDate, TaskKey, TaskList, TelegramId};
    use crate::error::{PlannerError, PlannerResult};
    use crate::infra::memory::MemoryTaskRepository;
    use crate::presentation::router::tasks_router_generic;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use chrono::Utc;
    use serde_json::{Value, json};
    use std::time::Duration;
    use telegram::{BotToken, InitDataVerifier};
    use tower::ServiceExt;

    const BOT_TOKEN: &str = "123456:TEST-TOKEN";
    const USER_ID: &str = "279058397";
    const DATE: &str = "2024-05-01";

    fn config() -> PlannerConfig {
        PlannerConfig::new(
            BotToken::new(BOT_TOKEN),
            StoreConfig::new("http://127.0.0.1:1", ServiceRoleKey::new("unused")),
        )
    }

    fn init_data_for(user_id: &str) -> String {
        init_data_at(user_id, Utc::now().timestamp())
    }

    fn init_data_at(user_id: &str, auth_date: i64) -> String {
        let verifier = InitDataVerifier::new(&BotToken::new(BOT_TOKEN));
        let user = format!(r#"{{"id":{},"first_name":"Ann","username":"ann"}}"#, user_id);
        let auth_date = auth_date.to_string();
        verifier.sign(&[
            ("query_id", "AAHdF6IQAAAAAN0XohDhrOrc"),
            ("user", user.as_str()),
            ("auth_date", auth_date.as_str()),
        ])
    }

    fn key(user_id: &str, date: &str) -> TaskKey {
        TaskKey::new(
            TelegramId::new(user_id).unwrap(),
            TaskDate::new(date).unwrap(),
        )
    }

    async fn send(app: &Router, method: Method, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn post(app: &Router, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, "/tasks", body.to_string()).await
    }

    fn get_body(user_id: &str, date: &str) -> Value {
        json!({
            "initData": init_data_for(user_id),
            "telegramId": user_id,
            "action": "get",
            "date": date,
        })
    }

    fn save_body(user_id: &str, date: &str, tasks: Value) -> Value {
        json!({
            "initData": init_data_for(user_id),
            "telegramId": user_id,
            "action": "save",
            "date": date,
            "tasks": tasks,
        })
    }

    fn memory_app() -> (Router, MemoryTaskRepository) {
        let repo = MemoryTaskRepository::new();
        (tasks_router_generic(repo.clone(), config()), repo)
    }

    /// Repository whose every call fails like an unreachable store
    #[derive(Clone)]
    struct FailingRepository;

    impl TaskRepository for FailingRepository {
        async fn find_tasks(&self, _key: &TaskKey) -> PlannerResult<Option<TaskList>> {
            Err(PlannerError::storage(
                "Task store unreachable",
                Some("connection refused".to_string()),
            ))
        }

        async fn upsert(&self, _record: &TaskRecord) -> PlannerResult<()> {
            Err(PlannerError::StorageTimeout)
        }
    }

    #[tokio::test]
    async fn test_get_without_record_returns_empty_list() {
        let (app, _) = memory_app();
        let (status, body) = post(&app, get_body(USER_ID, DATE)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"tasks": []}));
    }

    #[tokio::test]
    async fn test_save_then_get_round_trip() {
        let (app, repo) = memory_app();
        let tasks = json!([
            {"id": 1, "title": "Buy milk", "done": false},
            {"id": 2, "title": "Call mom", "done": true}
        ]);

        let (status, body) = post(&app, save_body(USER_ID, DATE, tasks.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));

        let (status, body) = post(&app, get_body(USER_ID, DATE)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"tasks": tasks}));

        let record = repo.record(&key(USER_ID, DATE)).await.unwrap();
        assert!(record.updated_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_list() {
        let (app, _) = memory_app();

        post(&app, save_body(USER_ID, DATE, json!(["a", "b", "c"]))).await;
        post(&app, save_body(USER_ID, DATE, json!(["d"]))).await;

        let (_, body) = post(&app, get_body(USER_ID, DATE)).await;
        assert_eq!(body, json!({"tasks": ["d"]}));

        post(&app, save_body(USER_ID, DATE, json!([]))).await;
        let (_, body) = post(&app, get_body(USER_ID, DATE)).await;
        assert_eq!(body, json!({"tasks": []}));
    }

    #[tokio::test]
    async fn test_records_are_isolated_by_user_and_date() {
        let (app, _) = memory_app();
        post(&app, save_body(USER_ID, DATE, json!(["mine"]))).await;

        let (_, body) = post(&app, get_body("42", DATE)).await;
        assert_eq!(body, json!({"tasks": []}));

        let (_, body) = post(&app, get_body(USER_ID, "2024-05-02")).await;
        assert_eq!(body, json!({"tasks": []}));
    }

    #[tokio::test]
    async fn test_identity_alias_is_accepted() {
        let (app, _) = memory_app();
        let body = json!({
            "initData": init_data_for(USER_ID),
            "identity": USER_ID,
            "action": "save",
            "date": DATE,
            "tasks": [1]
        });

        let (status, _) = post(&app, body).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_post_is_method_not_allowed() {
        let (app, _) = memory_app();

        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let (status, body) = send(&app, method, "/tasks", String::new()).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body, json!({"error": "Method not allowed"}));
        }
    }

    #[tokio::test]
    async fn test_client_errors() {
        let (app, repo) = memory_app();
        let init_data = init_data_for(USER_ID);

        let cases = vec![
            ("{broken".to_string(), "Invalid JSON body"),
            ("[]".to_string(), "Invalid JSON body"),
            (String::new(), "telegramId is required"),
            (
                json!({"telegramId": USER_ID, "date": DATE}).to_string(),
                "action is required",
            ),
            (
                json!({"telegramId": USER_ID, "action": "get"}).to_string(),
                "date is required (YYYY-MM-DD)",
            ),
            (
                json!({"initData": init_data, "telegramId": USER_ID, "action": "drop", "date": DATE})
                    .to_string(),
                "Unknown action. Use 'get' or 'save'.",
            ),
            (
                json!({"initData": init_data, "telegramId": USER_ID, "action": "save", "date": DATE, "tasks": "x"})
                    .to_string(),
                "tasks must be an array",
            ),
        ];

        for (body, message) in cases {
            let (status, response) = send(&app, Method::POST, "/tasks", body.clone()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(response, json!({"error": message}), "body: {}", body);
        }

        assert!(repo.record(&key(USER_ID, DATE)).await.is_none());
    }

    #[tokio::test]
    async fn test_field_errors_win_over_bad_init_data() {
        let (app, _) = memory_app();
        let body = json!({"initData": "garbage", "telegramId": USER_ID, "action": "get"});

        let (status, response) = post(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"error": "date is required (YYYY-MM-DD)"}));
    }

    #[tokio::test]
    async fn test_unauthenticated_requests_never_reach_the_store() {
        let (app, repo) = memory_app();
        let other_bot = InitDataVerifier::new(&BotToken::new("654321:OTHER-TOKEN"))
            .sign(&[("user", r#"{"id":279058397}"#), ("auth_date", "1700000000")]);
        let mut tampered = init_data_for(USER_ID);
        tampered.insert_str(0, "extra=1&");

        for init_data in [
            Value::Null,
            json!(""),
            json!(42),
            json!("not-init-data"),
            json!(other_bot),
            json!(tampered),
            json!(init_data_for("42")),
        ] {
            let body = json!({
                "initData": init_data,
                "telegramId": USER_ID,
                "action": "save",
                "date": DATE,
                "tasks": ["intruder"]
            });
            let (status, response) = post(&app, body).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "initData: {}", init_data);
            assert_eq!(response, json!({"error": "Invalid Telegram initData"}));
        }

        assert!(repo.record(&key(USER_ID, DATE)).await.is_none());
    }

    #[tokio::test]
    async fn test_stale_init_data_is_rejected_when_window_set() {
        let mut config = config();
        config.max_init_data_age = Some(Duration::from_secs(3600));
        let app = tasks_router_generic(MemoryTaskRepository::new(), config);

        let mut body = get_body(USER_ID, DATE);
        body["initData"] = json!(init_data_at(USER_ID, Utc::now().timestamp() - 7200));
        let (status, _) = post(&app, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = post(&app, get_body(USER_ID, DATE)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_storage_failures_map_to_gateway_errors() {
        let app = tasks_router_generic(FailingRepository, config());

        let (status, body) = post(&app, get_body(USER_ID, DATE)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            json!({"error": "Task store unreachable", "details": "connection refused"})
        );

        let (status, body) = post(&app, save_body(USER_ID, DATE, json!([]))).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body, json!({"error": "Task store timed out"}));
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = memory_app();
        let (status, body) = send(&app, Method::GET, "/health", String::new()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::{AuthFailure, PlannerError, RequestField};
    use axum::http::StatusCode;
    use kernel::error::kind::ErrorKind;
    use telegram::InitDataError;

    #[test]
    fn test_status_codes() {
        let cases = [
            (PlannerError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (PlannerError::InvalidJson, StatusCode::BAD_REQUEST),
            (
                PlannerError::MissingField(RequestField::Date),
                StatusCode::BAD_REQUEST,
            ),
            (
                PlannerError::UnknownAction("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (PlannerError::TasksNotArray, StatusCode::BAD_REQUEST),
            (
                PlannerError::InvalidCredentials(AuthFailure::Stale),
                StatusCode::UNAUTHORIZED,
            ),
            (PlannerError::storage("down", None), StatusCode::BAD_GATEWAY),
            (PlannerError::StorageTimeout, StatusCode::GATEWAY_TIMEOUT),
            (
                PlannerError::Internal("bug".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{:?}", err);
            assert_eq!(err.kind().status_code(), status.as_u16(), "{:?}", err);
        }
    }

    #[test]
    fn test_auth_reasons_share_one_message() {
        for reason in [
            AuthFailure::InitData(InitDataError::SignatureMismatch),
            AuthFailure::InitData(InitDataError::MissingHash),
            AuthFailure::IdentityMismatch,
            AuthFailure::Stale,
        ] {
            let err = PlannerError::from(reason);
            assert_eq!(err.to_string(), "Invalid Telegram initData");
            assert_eq!(err.kind(), ErrorKind::Unauthorized);
        }
    }

    #[test]
    fn test_storage_details_reach_app_error() {
        let app_error =
            PlannerError::storage("Invalid API key", Some("code 401".to_string())).to_app_error();
        assert_eq!(app_error.message(), "Invalid API key");
        assert_eq!(app_error.details(), Some("code 401"));
    }
}
