pub mod task_routes;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{app_state::SharedState, settings::Settings};

pub fn map_routes(app_state: SharedState, settings: &Settings) -> Router {
    let router = Router::new().merge(task_routes::get_router(app_state));

    // Built client, if configured
    let router = match &settings.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app_state::AppState, task_store::TaskStore};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(settings: Settings) -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(AppState {
            task_store: TaskStore::new(dir.path().join("tasks.json")),
        });
        (map_routes(state, &settings), dir)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn end_to_end_scenario() {
        let (app, _dir) = test_app(Settings::default());

        let (status, created) = send(
            &app,
            Method::POST,
            "/tasks",
            Some(json!({"date": "2024-05-01", "time": "10:00", "task": "Write report"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());

        let (status, listed) = send(&app, Method::GET, "/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            listed,
            json!([{
                "id": id,
                "date": "2024-05-01",
                "time": "10:00",
                "task": "Write report",
                "done": false
            }])
        );

        let (status, toggled) = send(&app, Method::PATCH, &format!("/tasks/{id}/toggle"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(toggled["done"], json!(true));

        let (status, deleted) = send(&app, Method::DELETE, &format!("/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, json!({"success": true}));

        let (status, listed) = send(&app, Method::GET, "/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn blank_task_is_rejected() {
        let (app, _dir) = test_app(Settings::default());

        let (status, body) = send(&app, Method::POST, "/tasks", Some(json!({"task": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Task text is required"}));

        let (status, body) = send(&app, Method::POST, "/tasks", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Task text is required"}));

        let (_, listed) = send(&app, Method::GET, "/tasks", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn array_bodies_carry_no_fields() {
        let (app, dir) = test_app(Settings::default());
        let (_, created) = send(&app, Method::POST, "/tasks", Some(json!({"task": "X", "time": "09:00"}))).await;
        let id = created["id"].as_str().unwrap();
        let on_disk = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            "/tasks",
            Some(json!(["2024-05-01", "10:00", "sneaky"])),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Task text is required"}));
        assert_eq!(std::fs::read_to_string(dir.path().join("tasks.json")).unwrap(), on_disk);

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/tasks/{id}"),
            Some(json!(["2024-05-01", "10:00", "sneaky", true])),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let (app, _dir) = test_app(Settings::default());
        let not_found = json!({"error": "Task not found"});

        let (status, body) = send(&app, Method::PUT, "/tasks/nope", Some(json!({"done": true}))).await;
        assert_eq!((status, body), (StatusCode::NOT_FOUND, not_found.clone()));

        let (status, body) = send(&app, Method::DELETE, "/tasks/nope", None).await;
        assert_eq!((status, body), (StatusCode::NOT_FOUND, not_found.clone()));

        let (status, body) = send(&app, Method::PATCH, "/tasks/nope/toggle", None).await;
        assert_eq!((status, body), (StatusCode::NOT_FOUND, not_found));
    }

    #[tokio::test]
    async fn put_merges_fields() {
        let (app, _dir) = test_app(Settings::default());
        let (_, created) = send(
            &app,
            Method::POST,
            "/tasks",
            Some(json!({"date": "2024-01-01", "time": "09:00", "task": "X"})),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/tasks/{id}"),
            Some(json!({"time": "11:30", "done": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            updated,
            json!({"id": id, "date": "2024-01-01", "time": "11:30", "task": "X", "done": true})
        );
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (app, _dir) = test_app(Settings::default());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/tasks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"task\": "))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn io_failures_are_generic_500s() {
        let (app, dir) = test_app(Settings::default());
        // A directory where the backing file should be
        std::fs::create_dir(dir.path().join("tasks.json")).unwrap();

        let (status, body) = send(&app, Method::GET, "/tasks", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to read tasks"}));

        let (status, body) = send(&app, Method::POST, "/tasks", Some(json!({"task": "x"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to create task"}));
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let (app, _dir) = test_app(Settings::default());
        let request = Request::builder()
            .uri("/tasks")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn static_dir_serves_client() {
        let client = tempfile::tempdir().unwrap();
        std::fs::write(client.path().join("index.html"), "<html>tasks</html>").unwrap();
        let settings = Settings {
            static_dir: Some(client.path().to_path_buf()),
            ..Settings::default()
        };
        let (app, _dir) = test_app(settings);

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>tasks</html>");

        let (status, listed) = send(&app, Method::GET, "/tasks", None).await;
        assert_eq!((status, listed), (StatusCode::OK, json!([])));
    }

    #[tokio::test]
    async fn unknown_paths_without_static_dir_are_404() {
        let (app, _dir) = test_app(Settings::default());
        let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
