use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{delete, get},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use gremio_core::curriculum::{
    AcademicDegree, Institution, Profession, Study, StudyType, WorkExperience,
};
use gremio_core::table::TableEntity;

use crate::{
    handlers::{
        curriculum::{create, get_one, list, remove, update},
        health::health,
    },
    state::{AppState, HasTable},
};

/// Builds the route group for one entity kind under the given path segment.
fn entity_routes<E>(path: &str) -> Router<AppState>
where
    E: TableEntity + Serialize + DeserializeOwned,
    AppState: HasTable<E>,
{
    Router::new()
        .route(&format!("/{path}"), get(list::<E>).post(create::<E>))
        .route(
            &format!("/{path}/{{row_key}}"),
            get(get_one::<E>).put(update::<E>),
        )
        .route(
            &format!("/{path}/{{partition_key}}/{{row_key}}"),
            delete(remove::<E>),
        )
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        .merge(entity_routes::<Study>("studies"))
        .merge(entity_routes::<Institution>("institutions"))
        .merge(entity_routes::<Profession>("professions"))
        .merge(entity_routes::<AcademicDegree>("degrees"))
        .merge(entity_routes::<StudyType>("study-types"))
        .merge(entity_routes::<WorkExperience>("experiences"))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_list_studies_empty() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/api/studies")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_study_assigns_identity() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/studies",
                json!({ "title": "B.Sc. Computer Science" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["title"], "B.Sc. Computer Science");
        assert_eq!(body["partition_key"], "study");
        assert!(body["row_key"].is_string());
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_create_ignores_caller_supplied_identity() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/professions",
                json!({
                    "name": "Engineer",
                    "row_key": "chosen-by-caller",
                    "version": "forged"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_ne!(body["row_key"], "chosen-by-caller");
        assert_ne!(body["version"], "forged");
    }

    #[tokio::test]
    async fn test_get_missing_study_returns_404() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(get_request("/api/studies/no-such-row"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_with_invalid_key_returns_400() {
        let app = create_app(AppState::default());

        // %23 is '#', which is reserved as the key separator.
        let response = app
            .oneshot(get_request("/api/studies/bad%23key"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_created_study_is_retrievable() {
        let state = AppState::default();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/studies",
                json!({ "title": "B.Sc." }),
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        let row_key = created["row_key"].as_str().unwrap();

        let response = app
            .oneshot(get_request(&format!("/api/studies/{row_key}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn test_update_with_current_version_succeeds() {
        let state = AppState::default();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/studies",
                json!({ "title": "B.Sc." }),
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        let row_key = created["row_key"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/studies/{row_key}"),
                json!({ "title": "B.Sc. Honors", "version": created["version"] }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let updated = body_json(response).await;
        assert_eq!(updated["title"], "B.Sc. Honors");
        assert_ne!(updated["version"], created["version"]);

        let response = app
            .oneshot(get_request(&format!("/api/studies/{row_key}")))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["title"], "B.Sc. Honors");
    }

    #[tokio::test]
    async fn test_update_with_stale_version_returns_400() {
        let state = AppState::default();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/studies",
                json!({ "title": "B.Sc." }),
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        let row_key = created["row_key"].as_str().unwrap();

        // First writer wins.
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/studies/{row_key}"),
                json!({ "title": "First", "version": created["version"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Second writer still holds the original version.
        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/studies/{row_key}"),
                json!({ "title": "Second", "version": created["version"] }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_without_version_returns_400() {
        let state = AppState::default();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/studies",
                json!({ "title": "B.Sc." }),
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        let row_key = created["row_key"].as_str().unwrap();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/studies/{row_key}"),
                json!({ "title": "No version" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_missing_row_returns_404() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/studies/no-such-row",
                json!({ "title": "Ghost", "version": "whatever" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let state = AppState::default();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/institutions",
                json!({ "name": "MIT" }),
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        let row_key = created["row_key"].as_str().unwrap();
        let uri = format!("/api/institutions/institution/{row_key}");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "deleted": true }));

        // Deleting again reports false rather than an error.
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "deleted": false }));
    }

    #[tokio::test]
    async fn test_entity_kinds_are_independent() {
        let state = AppState::default();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/degrees",
                json!({ "name": "Bachelor of Science", "abbreviation": "B.Sc." }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(get_request("/api/study-types"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!([]));

        let response = app.oneshot(get_request("/api/degrees")).await.unwrap();
        let degrees = body_json(response).await;
        assert_eq!(degrees.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_experience_with_dates() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/experiences",
                json!({
                    "company": "Acme",
                    "position": "Engineer",
                    "started_on": "2020-01-15",
                    "ended_on": "2023-06-30",
                    "duties": "Built things"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["partition_key"], "experience");
        assert_eq!(body["started_on"], "2020-01-15");
    }
}
