pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::report::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Report API
        .route("/api/report", post(handlers::handle_create_report))
        .route("/api/profile", get(handlers::handle_get_profile))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::{USER_EMAIL_HEADER, USER_ID_HEADER};
    use crate::mailer::recording::RecordingMailer;
    use crate::profiles::memory::MemoryProfileStore;
    use crate::state::test_state;

    fn report_request(body: Value, signed_in: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/report")
            .header(header::CONTENT_TYPE, "application/json");
        if signed_in {
            builder = builder
                .header(USER_ID_HEADER, "user-1")
                .header(USER_EMAIL_HEADER, "ann@example.com");
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "fullName": "Nguyen Van A",
            "birthDate": "1990-05-15",
            "email": "ANN@example.com"
        })
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(
            Arc::new(MemoryProfileStore::default()),
            Arc::new(RecordingMailer::default()),
        ));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "numerology-api");
    }

    #[tokio::test]
    async fn test_report_requires_authentication() {
        let app = build_router(test_state(
            Arc::new(MemoryProfileStore::default()),
            Arc::new(RecordingMailer::default()),
        ));
        let response = app.oneshot(report_request(valid_body(), false)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_report_rejects_invalid_input() {
        let cases = [
            json!({"fullName": "Nguyen Van A", "birthDate": "1990-05-15", "email": "bob@example.com"}),
            json!({"fullName": "Nguyen Van A", "birthDate": "15/05/1990", "email": "ann@example.com"}),
            json!({"fullName": "123 456", "birthDate": "1990-05-15", "email": "ann@example.com"}),
            json!({"fullName": "Al", "birthDate": "1990-05-15", "email": "ann@example.com"}),
            json!({"fullName": "Nguyen Van A", "birthDate": "1990-05-15", "email": "not-an-email"}),
        ];

        for body in cases {
            let app = build_router(test_state(
                Arc::new(MemoryProfileStore::default()),
                Arc::new(RecordingMailer::default()),
            ));
            let response = app.oneshot(report_request(body.clone(), true)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_report_happy_path_then_profile() {
        let profiles = Arc::new(MemoryProfileStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let state = test_state(profiles.clone(), mailer.clone());

        let response = build_router(state.clone())
            .oneshot(report_request(valid_body(), true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["report"]["lifePathNumber"], 3);
        assert_eq!(body["report"]["expressionNumber"], 7);
        assert_eq!(body["report"]["soulUrgeNumber"], 1);
        assert_eq!(body["report"]["personalityNumber"], 33);
        assert_eq!(body["report"]["recommendations"].as_array().unwrap().len(), 4);

        let pdf = BASE64.decode(body["files"]["pdf"].as_str().unwrap()).unwrap();
        let docx = BASE64.decode(body["files"]["docx"].as_str().unwrap()).unwrap();
        assert!(lopdf::Document::load_mem(&pdf).is_ok());
        assert!(zip::ZipArchive::new(std::io::Cursor::new(docx)).is_ok());

        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
        assert!(profiles.get("user-1").is_some());

        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/profile")
                    .header(USER_ID_HEADER, "user-1")
                    .header(USER_EMAIL_HEADER, "ann@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["profile"]["fullName"], "Nguyen Van A");
        assert_eq!(body["profile"]["birthDate"], "1990-05-15");
        assert_eq!(body["profile"]["report"]["lifePathNumber"], 3);
    }

    #[tokio::test]
    async fn test_profile_is_null_before_first_report() {
        let app = build_router(test_state(
            Arc::new(MemoryProfileStore::default()),
            Arc::new(RecordingMailer::default()),
        ));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/profile")
                    .header(USER_ID_HEADER, "user-2")
                    .header(USER_EMAIL_HEADER, "bob@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["profile"].is_null());
    }

    #[tokio::test]
    async fn test_mail_failure_is_bad_gateway() {
        let app = build_router(test_state(
            Arc::new(MemoryProfileStore::default()),
            Arc::new(RecordingMailer::failing()),
        ));
        let response = app.oneshot(report_request(valid_body(), true)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "MAIL_ERROR");
    }
}
